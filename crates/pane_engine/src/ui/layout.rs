//! UI layout calculations
//!
//! Components are placed at an offset from an anchor point on their parent's
//! area. Resolving the anchor against the current surface size is all the
//! "layout" this layer does.

use crate::foundation::math::Vec2;
use serde::{Deserialize, Serialize};

/// Anchor point for UI positioning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Anchor {
    /// Top-left corner (0, 0) in screen space
    #[default]
    TopLeft,
    /// Top-center
    TopCenter,
    /// Top-right corner
    TopRight,
    /// Middle-left
    MiddleLeft,
    /// Center of the area
    Center,
    /// Middle-right
    MiddleRight,
    /// Bottom-left corner
    BottomLeft,
    /// Bottom-center
    BottomCenter,
    /// Bottom-right corner
    BottomRight,
}

impl Anchor {
    /// Normalized anchor position (0.0 to 1.0)
    pub fn to_normalized(self) -> (f32, f32) {
        match self {
            Self::TopLeft => (0.0, 0.0),
            Self::TopCenter => (0.5, 0.0),
            Self::TopRight => (1.0, 0.0),
            Self::MiddleLeft => (0.0, 0.5),
            Self::Center => (0.5, 0.5),
            Self::MiddleRight => (1.0, 0.5),
            Self::BottomLeft => (0.0, 1.0),
            Self::BottomCenter => (0.5, 1.0),
            Self::BottomRight => (1.0, 1.0),
        }
    }

    /// Top-left corner of a box of `size` placed at `offset` from this anchor
    ///
    /// The box is aligned on the anchor: a centred box is centred on the
    /// anchor point, a bottom-right box ends on it, and so on.
    pub fn resolve(self, offset: Vec2, size: Vec2, area: Vec2) -> Vec2 {
        let (nx, ny) = self.to_normalized();
        Vec2::new(
            nx * area.x - nx * size.x + offset.x,
            ny * area.y - ny * size.y + offset.y,
        )
    }
}
