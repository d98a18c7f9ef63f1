//! Multi-stop gradient fills.
//!
//! A gradient is a direction (linear), an elliptical distance field (radial),
//! or a sweep around a center (conic), plus an ordered list of color stops.
//! Stops are kept sorted by offset at insertion time; the render layer relies
//! on that ordering when it truncates to a target's stop capacity.

use smallvec::SmallVec;

use crate::coords::Vec2;

use super::Color;

/// Inline capacity for stop storage; matches the largest stop ceiling any
/// render target carries.
pub(crate) type Stops = SmallVec<[ColorStop; 8]>;

/// A point along the gradient where the given color is unmixed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    /// Offset along the gradient, expected in [0, 1].
    pub offset: f32,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// A fill which transitions colors progressively, either linearly, radially,
/// or conically.
#[derive(Debug, Clone, PartialEq)]
pub enum Gradient {
    /// Interpolates colors along the direction from a start to an end point.
    Linear(Linear),
    /// Interpolates colors in an elliptical pattern from a center point.
    Radial(Radial),
    /// Interpolates colors around a center point, like a color wheel.
    Conic(Conic),
}

/// Discriminant of a [`Gradient`]; the render layer's wire contract assigns
/// each variant a stable ordinal.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GradientKind {
    Linear,
    Radial,
    Conic,
}

impl Gradient {
    #[inline]
    pub fn kind(&self) -> GradientKind {
        match self {
            Gradient::Linear(_) => GradientKind::Linear,
            Gradient::Radial(_) => GradientKind::Radial,
            Gradient::Conic(_) => GradientKind::Conic,
        }
    }

    #[inline]
    pub fn stops(&self) -> &[ColorStop] {
        match self {
            Gradient::Linear(g) => &g.stops,
            Gradient::Radial(g) => &g.stops,
            Gradient::Conic(g) => &g.stops,
        }
    }

    /// Scales the alpha channel of every stop by the given factor.
    pub fn scale_alpha(mut self, factor: f32) -> Self {
        let stops = match &mut self {
            Gradient::Linear(g) => &mut g.stops,
            Gradient::Radial(g) => &mut g.stops,
            Gradient::Conic(g) => &mut g.stops,
        };
        for stop in stops.iter_mut() {
            stop.color = stop.color.scale_alpha(factor);
        }
        self
    }
}

impl From<Linear> for Gradient {
    fn from(gradient: Linear) -> Self {
        Self::Linear(gradient)
    }
}

impl From<Radial> for Gradient {
    fn from(gradient: Radial) -> Self {
        Self::Radial(gradient)
    }
}

impl From<Conic> for Gradient {
    fn from(gradient: Conic) -> Self {
        Self::Conic(gradient)
    }
}

/// Inserts a stop keeping the list sorted by offset (stable for equal offsets).
///
/// Offsets outside `0.0..=1.0` (or non-finite) are ignored with a warning;
/// downstream sentinel encoding reserves offsets above 1.0.
fn insert_stop(stops: &mut Stops, offset: f32, color: Color) {
    if !offset.is_finite() || !(0.0..=1.0).contains(&offset) {
        log::warn!("gradient stop offset {offset} outside 0.0..=1.0; ignored");
        return;
    }

    let index = stops.partition_point(|stop| stop.offset <= offset);
    stops.insert(index, ColorStop::new(offset, color));
}

/// A linear gradient between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct Linear {
    /// Starting position, in the same coordinate space as quad geometry.
    pub start: Vec2,
    /// Ending position.
    pub end: Vec2,
    pub stops: Stops,
}

impl Linear {
    #[inline]
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end, stops: Stops::new() }
    }

    /// Adds a stop, keeping stops ordered by offset.
    pub fn add_stop(mut self, offset: f32, color: Color) -> Self {
        insert_stop(&mut self.stops, offset, color);
        self
    }

    pub fn add_stops(mut self, stops: impl IntoIterator<Item = ColorStop>) -> Self {
        for stop in stops {
            self = self.add_stop(stop.offset, stop.color);
        }
        self
    }
}

/// A radial gradient radiating from a center point, with independent per-axis
/// radii (elliptical).
#[derive(Debug, Clone, PartialEq)]
pub struct Radial {
    pub center: Vec2,
    pub radius_x: f32,
    pub radius_y: f32,
    pub stops: Stops,
}

impl Radial {
    /// Circular gradient.
    #[inline]
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self::elliptical(center, radius, radius)
    }

    #[inline]
    pub fn elliptical(center: Vec2, radius_x: f32, radius_y: f32) -> Self {
        Self { center, radius_x, radius_y, stops: Stops::new() }
    }

    pub fn add_stop(mut self, offset: f32, color: Color) -> Self {
        insert_stop(&mut self.stops, offset, color);
        self
    }

    pub fn add_stops(mut self, stops: impl IntoIterator<Item = ColorStop>) -> Self {
        for stop in stops {
            self = self.add_stop(stop.offset, stop.color);
        }
        self
    }
}

/// A conic (sweep) gradient around a center point.
///
/// Offsets measure the fraction of a full rotation from the start angle.
/// 0 radians points right (3 o'clock); the sweep runs counter-clockwise on
/// screen (Y is flipped before the angle is taken, since screen space grows
/// downward).
#[derive(Debug, Clone, PartialEq)]
pub struct Conic {
    pub center: Vec2,
    /// Starting angle in radians.
    pub angle: f32,
    pub stops: Stops,
}

impl Conic {
    #[inline]
    pub fn new(center: Vec2, angle: f32) -> Self {
        Self { center, angle, stops: Stops::new() }
    }

    pub fn add_stop(mut self, offset: f32, color: Color) -> Self {
        insert_stop(&mut self.stops, offset, color);
        self
    }

    pub fn add_stops(mut self, stops: impl IntoIterator<Item = ColorStop>) -> Self {
        for stop in stops {
            self = self.add_stop(stop.offset, stop.color);
        }
        self
    }
}
