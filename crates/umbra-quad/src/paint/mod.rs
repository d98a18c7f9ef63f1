//! Paint model shared between descriptors and the render layer.
//!
//! Scope:
//! - color representation (straight alpha at the boundary, premultiplied after
//!   ingestion)
//! - fill sources (solid, multi-stop gradients)
//!
//! Geometry types remain in `coords`.

pub mod color;
pub mod gradient;

pub use color::Color;
pub use gradient::{ColorStop, Conic, Gradient, GradientKind, Linear, Radial};

/// Fill source for a quad.
///
/// Solid fills bypass gradient evaluation entirely; the render layer treats
/// them as their own fast path.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Gradient(Gradient),
}

impl Paint {
    #[inline]
    pub fn solid(color: Color) -> Self {
        Paint::Solid(color)
    }

    #[inline]
    pub fn is_opaque(&self) -> bool {
        match self {
            Paint::Solid(c) => c.a >= 1.0,
            Paint::Gradient(g) => {
                !g.stops().is_empty() && g.stops().iter().all(|s| s.color.a >= 1.0)
            }
        }
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

impl From<Gradient> for Paint {
    fn from(gradient: Gradient) -> Self {
        Paint::Gradient(gradient)
    }
}
