//! Quad descriptors.
//!
//! A quad is an axis-aligned rounded rectangle with optional border and
//! shadow. Descriptors are plain value types produced fresh each frame by the
//! widget layer; nothing here is shared or mutated during rendering.

use crate::coords::{CornerRadii, Rect, Vec2};
use crate::paint::{Color, Paint};

/// Stroke drawn along the outer edge of a quad.
///
/// A width of zero means no border; there is no separate "absent" state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Border {
    pub width: f32,
    /// Straight alpha; premultiplied by the geometry stage.
    pub color: Color,
}

impl Border {
    #[inline]
    pub const fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

/// Drop shadow attached to a quad.
///
/// An absent shadow is a zero-alpha color, never an `Option`: the compositor
/// is required to treat `color.a == 0` as an exact no-op, so the empty value
/// costs nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Shadow {
    /// Straight alpha; premultiplied by the geometry stage.
    pub color: Color,
    pub offset: Vec2,
    /// Softness of the falloff, ≥ 0. Zero produces a hard edge.
    pub blur_radius: f32,
    /// Inset shadows draw inside the quad and never expand its footprint.
    pub inset: bool,
}

impl Shadow {
    /// An outset (default) shadow.
    #[inline]
    pub const fn new(color: Color, offset: Vec2, blur_radius: f32) -> Self {
        Self { color, offset, blur_radius, inset: false }
    }

    /// An inset shadow.
    #[inline]
    pub const fn inset(color: Color, offset: Vec2, blur_radius: f32) -> Self {
        Self { color, offset, blur_radius, inset: true }
    }

    #[inline]
    pub fn with_inset(mut self, inset: bool) -> Self {
        self.inset = inset;
        self
    }
}

/// How the fill paints relative to the quad's outline.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum FillMode {
    /// Paint the whole interior.
    #[default]
    Fill,
    /// Paint only the border band; interior pixels are masked out. Lets a
    /// gradient color the stroke itself.
    BorderOnly,
}

/// A rounded-rectangle draw primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Quad {
    /// Position and size in logical pixels.
    pub rect: Rect,
    /// Corner radii, clamped by the geometry stage to half the smaller
    /// dimension.
    pub radii: CornerRadii,
    pub fill: Paint,
    pub border: Border,
    pub shadow: Shadow,
    pub mode: FillMode,
    /// Snap position and size to the device pixel grid.
    pub snap: bool,
}

impl Quad {
    #[inline]
    pub fn new(rect: Rect, radii: CornerRadii, fill: impl Into<Paint>) -> Self {
        Self {
            rect,
            radii,
            fill: fill.into(),
            border: Border::default(),
            shadow: Shadow::default(),
            mode: FillMode::Fill,
            snap: false,
        }
    }

    #[inline]
    pub fn with_border(mut self, border: Border) -> Self {
        self.border = border;
        self
    }

    #[inline]
    pub fn with_shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = shadow;
        self
    }

    #[inline]
    pub fn with_mode(mut self, mode: FillMode) -> Self {
        self.mode = mode;
        self
    }

    #[inline]
    pub fn with_snap(mut self, snap: bool) -> Self {
        self.snap = snap;
        self
    }
}
