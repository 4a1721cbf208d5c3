//! Math utilities and types
//!
//! Provides the 2D math types used by the window and UI layers. Screen space
//! has its origin at the top-left corner with y growing downwards.

use serde::{Deserialize, Serialize};

pub use nalgebra::{Vector2, Vector4};

/// 2D vector type (positions, offsets and sizes in pixels)
pub type Vec2 = Vector2<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// RGBA colour with components in `0.0..=1.0`
pub type Color = Vec4;

/// Axis-aligned rectangle in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub origin: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Bottom-right corner
    pub fn max(&self) -> Vec2 {
        self.origin + self.size
    }

    /// Check whether a point lies inside the rectangle (edges inclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.origin.x && point.x <= max.x && point.y >= self.origin.y && point.y <= max.y
    }

    /// Rectangle moved by `offset`
    #[must_use]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.origin + offset, self.size)
    }
}

/// Named colours
pub mod colors {
    use super::Color;

    /// Opaque white
    pub fn white() -> Color {
        Color::new(1.0, 1.0, 1.0, 1.0)
    }

    /// Opaque black
    pub fn black() -> Color {
        Color::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Opaque green, the idle colour of a default button
    pub fn green() -> Color {
        Color::new(0.0, 1.0, 0.0, 1.0)
    }

    /// Opaque red, the hover colour of a default button
    pub fn red() -> Color {
        Color::new(1.0, 0.0, 0.0, 1.0)
    }

    /// Fully transparent
    pub fn transparent() -> Color {
        Color::new(0.0, 0.0, 0.0, 0.0)
    }
}
