//! Command-recording renderer
//!
//! Records every draw call of a frame as a [`RenderCommand`]. A GPU backend
//! consumes the list after the pass; tests inspect it directly.

use super::{FrameContext, ImageHandle, Renderer, Shape, ShapeStyle, TextStyle};
use crate::foundation::math::Vec2;

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Shape draw
    Shape {
        /// Geometry
        shape: Shape,
        /// Screen position (pixels from top-left)
        position: Vec2,
        /// Fill and outline
        style: ShapeStyle,
    },
    /// Text draw
    Text {
        /// Text content
        text: String,
        /// Screen position of the top-left corner
        position: Vec2,
        /// Colour and size
        style: TextStyle,
    },
    /// Image draw
    Image {
        /// Backend image
        image: ImageHandle,
        /// Screen position of the top-left corner
        position: Vec2,
        /// Target size
        size: Vec2,
    },
}

/// Renderer that keeps the draw calls of the current frame
#[derive(Debug, Default)]
pub struct CommandRenderer {
    frame: Option<FrameContext>,
    commands: Vec<RenderCommand>,
    frames_completed: u64,
}

impl CommandRenderer {
    /// Create a renderer with no bound frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded since the last `begin_frame`
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Text of every text command, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                RenderCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of passes that reached `end_frame`
    pub fn frames_completed(&self) -> u64 {
        self.frames_completed
    }
}

impl Renderer for CommandRenderer {
    fn begin_frame(&mut self, frame: FrameContext) {
        // Reuse the allocation from the previous frame
        self.commands.clear();
        self.frame = Some(frame);
    }

    fn draw_shape(&mut self, shape: &Shape, position: Vec2, style: &ShapeStyle) {
        self.commands.push(RenderCommand::Shape { shape: *shape, position, style: *style });
    }

    fn draw_text(&mut self, text: &str, position: Vec2, style: &TextStyle) {
        self.commands.push(RenderCommand::Text {
            text: text.to_owned(),
            position,
            style: *style,
        });
    }

    fn draw_image(&mut self, image: ImageHandle, position: Vec2, size: Vec2) {
        self.commands.push(RenderCommand::Image { image, position, size });
    }

    fn end_frame(&mut self) {
        self.frames_completed += 1;
        log::trace!("Frame recorded {} commands", self.commands.len());
    }

    fn frame(&self) -> Option<FrameContext> {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::colors;

    fn frame(index: u64) -> FrameContext {
        FrameContext { index, surface_size: Vec2::new(800.0, 600.0) }
    }

    #[test]
    fn test_begin_frame_discards_previous_commands() {
        let mut renderer = CommandRenderer::new();
        renderer.begin_frame(frame(0));
        renderer.draw_text("old", Vec2::zeros(), &TextStyle::default());
        renderer.end_frame();

        renderer.begin_frame(frame(1));
        renderer.draw_shape(
            &Shape::Rect { size: Vec2::new(10.0, 10.0) },
            Vec2::zeros(),
            &ShapeStyle::filled(colors::red()),
        );

        assert_eq!(renderer.commands().len(), 1);
        assert!(renderer.texts().is_empty());
        assert_eq!(renderer.frame().map(|f| f.index), Some(1));
        assert_eq!(renderer.frames_completed(), 1);
    }
}
