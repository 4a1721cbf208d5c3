//! # Rendering capability
//!
//! The UI layer never draws pixels itself. It orchestrates *when* a renderer is
//! invoked and hands it shapes, text and images to draw. Any backend that
//! implements [`Renderer`] can sit behind a [`Window`](crate::window::Window).
//!
//! ## Frame lifecycle
//!
//! ```text
//! Window::render(consumer)
//!   ├─ FrameContext { index, surface_size }
//!   ├─ renderer.begin_frame(ctx)  (drawing context rebound, renderer reused)
//!   ├─ consumer(&mut renderer)    (all draw calls for the frame)
//!   ├─ renderer.end_frame()
//!   └─ backend.present()
//! ```

pub mod commands;

pub use commands::{CommandRenderer, RenderCommand};

use crate::foundation::math::{Color, Vec2};
use serde::{Deserialize, Serialize};

/// Drawing context bound to a renderer for one render pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Monotonic frame number, starting at 0
    pub index: u64,
    /// Size of the drawable surface in pixels
    pub surface_size: Vec2,
}

/// Geometry a renderer knows how to draw, relative to the draw position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Axis-aligned rectangle extending right and down from the position
    Rect {
        /// Width and height
        size: Vec2,
    },
    /// Rectangle with rounded corners
    RoundedRect {
        /// Width and height
        size: Vec2,
        /// Corner radius in pixels
        radius: f32,
    },
    /// Circle centred on the position
    Circle {
        /// Radius in pixels
        radius: f32,
    },
    /// Line from the position to `position + delta`
    Line {
        /// End point relative to the start
        delta: Vec2,
    },
}

/// Fill and outline of a shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    /// Fill colour, `None` for an outline only
    pub fill: Option<Color>,
    /// Outline colour and width in pixels
    pub stroke: Option<(Color, f32)>,
}

impl ShapeStyle {
    /// Solid fill without outline
    pub fn filled(color: Color) -> Self {
        Self { fill: Some(color), stroke: None }
    }

    /// Outline only
    pub fn outlined(color: Color, width: f32) -> Self {
        Self { fill: None, stroke: Some((color, width)) }
    }
}

/// How text is drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Text colour (RGBA)
    pub color: Color,
    /// Font size in pixels
    pub font_size: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: crate::foundation::math::colors::white(),
            font_size: 20.0,
        }
    }
}

/// Opaque handle to an image owned by the renderer backend
///
/// Loading and decoding images is the backend's job; the UI only refers to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u64);

/// Backend-agnostic drawing interface
///
/// One instance lives in each window and is reused across frames: the window
/// rebinds it with [`Renderer::begin_frame`] instead of allocating a new one.
pub trait Renderer {
    /// Bind the drawing context for a new render pass
    fn begin_frame(&mut self, frame: FrameContext);

    /// Draw a shape at `position`
    fn draw_shape(&mut self, shape: &Shape, position: Vec2, style: &ShapeStyle);

    /// Draw a single line of text with its top-left corner at `position`
    fn draw_text(&mut self, text: &str, position: Vec2, style: &TextStyle);

    /// Draw an image scaled to `size` with its top-left corner at `position`
    fn draw_image(&mut self, image: ImageHandle, position: Vec2, size: Vec2);

    /// Finish the render pass
    fn end_frame(&mut self) {}

    /// Context bound by the last `begin_frame`, if any
    fn frame(&self) -> Option<FrameContext>;
}
