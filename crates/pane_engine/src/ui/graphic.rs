//! Background graphics and button styling

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::foundation::math::{colors, Color, Vec2};
use crate::render::{ImageHandle, Renderer, Shape, ShapeStyle, TextStyle};

/// What a component draws behind its content
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Graphic {
    /// Solid rectangle
    Solid(Color),
    /// Rectangle whose colour follows the hover state
    Hover {
        /// Colour while the pointer is elsewhere
        idle: Color,
        /// Colour while the pointer is over the component
        hovered: Color,
    },
    /// Image stretched over the component
    Image(ImageHandle),
}

impl Graphic {
    /// Fill colour for the given hover state, `None` for images
    pub fn color(&self, hovered: bool) -> Option<Color> {
        match *self {
            Self::Solid(color) => Some(color),
            Self::Hover { idle, hovered: over } => Some(if hovered { over } else { idle }),
            Self::Image(_) => None,
        }
    }

    /// Draw the graphic over the box at `position` of `size`
    pub fn draw(&self, renderer: &mut dyn Renderer, position: Vec2, size: Vec2, hovered: bool) {
        match self {
            Self::Image(image) => renderer.draw_image(*image, position, size),
            _ => {
                if let Some(color) = self.color(hovered) {
                    renderer.draw_shape(&Shape::Rect { size }, position, &ShapeStyle::filled(color));
                }
            }
        }
    }
}

/// Look of buttons created through [`Component::button`](super::Component::button)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonTheme {
    /// Background while idle
    pub idle: Color,
    /// Background while hovered
    pub hovered: Color,
    /// Label style
    pub text: TextStyle,
    /// Space between label and button edge
    pub padding: Vec2,
}

impl Default for ButtonTheme {
    fn default() -> Self {
        Self {
            idle: colors::green(),
            hovered: colors::red(),
            text: TextStyle {
                color: colors::black(),
                font_size: 20.0,
            },
            padding: Vec2::new(10.0, 6.0),
        }
    }
}

impl Config for ButtonTheme {}

impl ButtonTheme {
    /// Hover graphic built from this theme
    pub fn graphic(&self) -> Graphic {
        Graphic::Hover {
            idle: self.idle,
            hovered: self.hovered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{CommandRenderer, FrameContext, RenderCommand};

    #[test]
    fn test_hover_graphic_switches_colour() {
        let graphic = ButtonTheme::default().graphic();
        assert_eq!(graphic.color(false), Some(colors::green()));
        assert_eq!(graphic.color(true), Some(colors::red()));
    }

    #[test]
    fn test_image_graphic_draws_image() {
        let mut renderer = CommandRenderer::new();
        renderer.begin_frame(FrameContext { index: 0, surface_size: Vec2::new(100.0, 100.0) });

        Graphic::Image(ImageHandle(7)).draw(&mut renderer, Vec2::zeros(), Vec2::new(4.0, 4.0), false);

        assert!(matches!(
            renderer.commands(),
            [RenderCommand::Image { image: ImageHandle(7), .. }]
        ));
    }
}
