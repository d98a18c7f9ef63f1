//! Multi-stop gradient evaluation.
//!
//! Descriptors (and wire records) are converted into a [`ResolvedGradient`]
//! with a fixed-capacity stop array and an *explicit* valid-stop count before
//! any per-pixel work: the wire format terminates unused slots with an
//! offset sentinel above 1.0, and scanning for it once here keeps the hot
//! sampling loop free of it.

use crate::coords::Vec2;
use crate::paint::{Color, Gradient, GradientKind, Paint};

use super::caps::Caps;
use super::common::{fract, smoothstep};
use super::wire;

/// Hard stop capacity of the resolved form; targets with a smaller
/// interpolator budget lower their ceiling via [`Caps::max_stops`].
pub const MAX_STOPS: usize = 8;

/// Amplitude of the deterministic per-pixel dither applied to evaluated
/// gradient colors. Breaks up banding introduced by 8-bit stop quantization.
pub const DITHER_EPSILON: f32 = 0.3 / 255.0;

/// One-time degradation notices, so a scene full of over-budget gradients
/// logs once rather than per quad.
#[derive(Debug, Default)]
pub struct ResolveWarnings {
    pub(crate) truncated: bool,
    pub(crate) conic: bool,
    pub(crate) border_only: bool,
}

/// A fill ready for per-pixel evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedPaint {
    Solid(Color),
    Gradient(ResolvedGradient),
}

impl ResolvedPaint {
    /// Converts a descriptor fill under the target's capability ceiling.
    ///
    /// Solid colors are premultiplied here (descriptor ingestion); gradient
    /// stop colors are deliberately left as supplied — the evaluator treats
    /// them as blend-ready.
    pub fn resolve(paint: &Paint, caps: &Caps, warnings: &mut ResolveWarnings) -> Self {
        match paint {
            Paint::Solid(color) => ResolvedPaint::Solid(color.premultiply()),
            Paint::Gradient(gradient) => {
                if gradient.kind() == GradientKind::Conic && !caps.conic {
                    if !warnings.conic {
                        log::debug!("target lacks conic gradients; using first stop color");
                        warnings.conic = true;
                    }
                    let first = gradient
                        .stops()
                        .first()
                        .map_or(Color::TRANSPARENT, |s| s.color);
                    return ResolvedPaint::Solid(first);
                }

                ResolvedPaint::Gradient(ResolvedGradient::from_gradient(
                    gradient,
                    caps.max_stops,
                    warnings,
                ))
            }
        }
    }

    /// Samples the fill at a device-pixel position.
    #[inline]
    pub fn eval(&self, sample: Vec2) -> Color {
        match self {
            ResolvedPaint::Solid(color) => *color,
            ResolvedPaint::Gradient(gradient) => gradient.eval(sample),
        }
    }

    /// Logical→device scaling of gradient geometry, applied once by the
    /// geometry stage.
    pub(crate) fn scale_geometry(&mut self, factor: f32) {
        if let ResolvedPaint::Gradient(gradient) = self {
            gradient.scale_geometry(factor);
        }
    }
}

/// A gradient in evaluation form: fixed-capacity stop arrays plus an explicit
/// count discovered from the sentinel exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedGradient {
    kind: GradientKind,
    /// Linear: `start.xy, end.xy`. Radial: `center.xy, radius.xy`.
    /// Conic: `center.xy, start_angle, 0`.
    direction: [f32; 4],
    colors: [Color; MAX_STOPS],
    offsets: [f32; MAX_STOPS],
    len: usize,
}

impl ResolvedGradient {
    /// Builds the evaluation form from a descriptor, dropping stops beyond
    /// the target's ceiling. Stops arrive pre-sorted, so the surviving prefix
    /// is still a valid gradient.
    pub fn from_gradient(
        gradient: &Gradient,
        max_stops: usize,
        warnings: &mut ResolveWarnings,
    ) -> Self {
        let stops = gradient.stops();
        let len = stops.len().min(max_stops).min(MAX_STOPS);

        if stops.len() > len && !warnings.truncated {
            log::debug!(
                "gradient has {} stops; target carries {len}; dropping the tail",
                stops.len(),
            );
            warnings.truncated = true;
        }

        let mut colors = [Color::TRANSPARENT; MAX_STOPS];
        let mut offsets = [wire::STOP_SENTINEL; MAX_STOPS];
        for (i, stop) in stops[..len].iter().enumerate() {
            colors[i] = stop.color;
            offsets[i] = stop.offset;
        }

        Self {
            kind: gradient.kind(),
            direction: wire::gradient_direction(gradient),
            colors,
            offsets,
            len,
        }
    }

    /// Builds the evaluation form from wire channels.
    ///
    /// The valid stop count is discovered here: the first offset above 1.0 is
    /// the sentinel, and everything before it is live. Records with all slots
    /// occupied simply have no sentinel.
    pub fn from_wire(
        packed_colors: &[u32],
        wire_offsets: &[f32],
        direction: [f32; 4],
        kind: GradientKind,
    ) -> Self {
        let capacity = packed_colors.len().min(wire_offsets.len()).min(MAX_STOPS);

        let mut len = capacity;
        for (i, &offset) in wire_offsets[..capacity].iter().enumerate() {
            if offset > 1.0 {
                len = i;
                break;
            }
        }

        let mut colors = [Color::TRANSPARENT; MAX_STOPS];
        let mut offsets = [wire::STOP_SENTINEL; MAX_STOPS];
        for i in 0..len {
            colors[i] = wire::unpack_rgba8(packed_colors[i]);
            offsets[i] = wire_offsets[i];
        }

        Self { kind, direction, colors, offsets, len }
    }

    #[inline]
    pub fn stop_count(&self) -> usize {
        self.len
    }

    pub(crate) fn scale_geometry(&mut self, factor: f32) {
        match self.kind {
            GradientKind::Linear | GradientKind::Radial => {
                for v in &mut self.direction {
                    *v *= factor;
                }
            }
            // Center scales; the start angle is unitless.
            GradientKind::Conic => {
                self.direction[0] *= factor;
                self.direction[1] *= factor;
            }
        }
    }

    /// Samples the gradient at a device-pixel position.
    ///
    /// An empty stop list is a producer contract violation; it yields
    /// transparent rather than a panic. Degenerate geometry (zero-length
    /// axis, zero radius) is left to f32 arithmetic — a NaN-colored pixel,
    /// never an abort.
    pub fn eval(&self, sample: Vec2) -> Color {
        if self.len == 0 {
            return Color::TRANSPARENT;
        }

        let color = match self.kind {
            GradientKind::Linear => self.sample_clamped(self.linear_t(sample)),
            GradientKind::Radial => self.sample_clamped(self.radial_t(sample)),
            GradientKind::Conic => self.sample_wrapped(self.conic_t(sample)),
        };

        dither(color, sample)
    }

    /// Projection of `sample` onto the gradient axis, 0 at `start`, 1 at `end`.
    fn linear_t(&self, sample: Vec2) -> f32 {
        let start = Vec2::new(self.direction[0], self.direction[1]);
        let end = Vec2::new(self.direction[2], self.direction[3]);

        let axis = end - start;
        let length = axis.length();
        (axis / length).dot(sample - start) / length
    }

    /// Elliptical distance from the center: per-axis radius division first,
    /// then magnitude.
    fn radial_t(&self, sample: Vec2) -> f32 {
        let center = Vec2::new(self.direction[0], self.direction[1]);
        let radius = Vec2::new(self.direction[2], self.direction[3]);
        ((sample - center) / radius).length()
    }

    /// Fraction of a full rotation from the start angle, in [0, 1).
    ///
    /// Y is negated because screen space grows downward.
    fn conic_t(&self, sample: Vec2) -> f32 {
        let center = Vec2::new(self.direction[0], self.direction[1]);
        let start_angle = self.direction[2];

        let delta = sample - center;
        let angle = (-delta.y).atan2(delta.x);
        fract((angle - start_angle + core::f32::consts::TAU) / core::f32::consts::TAU)
    }

    /// Saturating lookup used by linear and radial gradients: positions
    /// outside [first, last] take the boundary stop's color.
    fn sample_clamped(&self, t: f32) -> Color {
        let last = self.len - 1;
        if t <= self.offsets[0] {
            return self.colors[0];
        }
        if t >= self.offsets[last] {
            return self.colors[last];
        }
        self.sample_between(t)
    }

    /// Periodic lookup used by conic gradients: positions outside
    /// [first, last] interpolate between the last and first stop across the
    /// wrap seam, with the fraction measured along the wrap arc — never
    /// clamped to either endpoint.
    fn sample_wrapped(&self, t: f32) -> Color {
        let last = self.len - 1;
        let first_offset = self.offsets[0];
        let last_offset = self.offsets[last];

        if t < first_offset || t > last_offset {
            let traveled = if t > last_offset {
                t - last_offset
            } else {
                t + 1.0 - last_offset
            };
            let arc = (1.0 - last_offset) + first_offset;
            return self.colors[last].mix(self.colors[0], traveled / arc);
        }

        self.sample_between(t)
    }

    /// Eased interpolation between the two stops enclosing `t`.
    fn sample_between(&self, t: f32) -> Color {
        for i in 0..self.len - 1 {
            let (lo, hi) = (self.offsets[i], self.offsets[i + 1]);
            if t >= lo && t <= hi {
                return self.colors[i].mix(self.colors[i + 1], smoothstep(lo, hi, t));
            }
        }
        self.colors[self.len - 1]
    }
}

/// Deterministic screen-space noise in [0, 1): the same position always
/// dithers the same way, so neighboring frames don't shimmer.
#[inline]
fn hash(p: Vec2) -> f32 {
    fract((p.x * 12.9898 + p.y * 78.233).sin() * 43758.5453)
}

/// Perturbs RGB by a uniform value in (-ε, ε) keyed on the sample position.
#[inline]
fn dither(color: Color, sample: Vec2) -> Color {
    let noise = (hash(sample) - 0.5) * (2.0 * DITHER_EPSILON);
    Color::new(color.r + noise, color.g + noise, color.b + noise, color.a)
}
