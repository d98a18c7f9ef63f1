//! Wire contract between the geometry stage's output and the pixel stage's
//! input.
//!
//! Targets with a constrained interpolator budget cannot carry a gradient's
//! stops as individual typed channels, so stops, offsets, and mode flags are
//! bit-packed into fixed-width integer channels. The layouts below are a
//! schema shared by packer and evaluator — change either side and rendering
//! breaks silently, so everything is spelled out here and nowhere else.
//!
//! Packed color channel (32-bit little-endian RGBA8):
//!
//! | bits     | field |
//! |----------|-------|
//! | [0, 8)   | r     |
//! | [8, 16)  | g     |
//! | [16, 24) | b     |
//! | [24, 32) | a     |
//!
//! Flag channel (reduced record only):
//!
//! | bits     | field                                      |
//! |----------|--------------------------------------------|
//! | [0, 16)  | gradient kind (0 linear, 1 radial, 2 conic)|
//! | 16       | shadow inset                               |
//! | [17, 32) | reserved, must be zero                     |
//!
//! Unused trailing stop slots are terminated with an offset above 1.0 (we
//! write [`STOP_SENTINEL`]) instead of a separate count channel; the
//! evaluator rediscovers the live count from the sentinel once per record.

use bytemuck::{Pod, Zeroable};

use crate::paint::{Color, Gradient, GradientKind};
use crate::quad::Quad;

use super::gradient::{ResolveWarnings, ResolvedGradient};

/// Offset written into unused stop slots. Any value above 1.0 terminates the
/// stop list; this one survives 8/16-bit float transport untouched.
pub const STOP_SENTINEL: f32 = 2.0;

/// Stop capacity of the reduced record.
pub const REDUCED_STOPS: usize = 4;

/// Stop capacity of the native record.
pub const NATIVE_STOPS: usize = 8;

const FLAG_KIND_MASK: u32 = 0xFFFF;
const FLAG_SHADOW_INSET: u32 = 1 << 16;

/// Quantizes four [0, 1] channels to 8 bits each: `(a<<24)|(b<<16)|(g<<8)|r`.
///
/// Channels are clamped independently and rounded. The round trip through
/// [`unpack_rgba8`] loses sub-8-bit precision by design; the evaluator's
/// dither exists to hide the resulting banding.
#[inline]
pub fn pack_rgba8(color: Color) -> u32 {
    let q = |x: f32| (x.clamp(0.0, 1.0) * 255.0).round() as u32;
    (q(color.a) << 24) | (q(color.b) << 16) | (q(color.g) << 8) | q(color.r)
}

/// Exact inverse scaling of [`pack_rgba8`]: each byte divided by 255.
#[inline]
pub fn unpack_rgba8(raw: u32) -> Color {
    Color::new(
        (raw & 0xFF) as f32 / 255.0,
        ((raw >> 8) & 0xFF) as f32 / 255.0,
        ((raw >> 16) & 0xFF) as f32 / 255.0,
        ((raw >> 24) & 0xFF) as f32 / 255.0,
    )
}

#[inline]
pub fn kind_ordinal(kind: GradientKind) -> u32 {
    match kind {
        GradientKind::Linear => 0,
        GradientKind::Radial => 1,
        GradientKind::Conic => 2,
    }
}

/// Unknown ordinals decode as linear; a corrupt record draws wrong, not UB.
#[inline]
pub fn kind_from_ordinal(raw: u32) -> GradientKind {
    match raw {
        1 => GradientKind::Radial,
        2 => GradientKind::Conic,
        _ => GradientKind::Linear,
    }
}

#[inline]
pub fn pack_flags(kind: GradientKind, shadow_inset: bool) -> u32 {
    kind_ordinal(kind) | if shadow_inset { FLAG_SHADOW_INSET } else { 0 }
}

#[inline]
pub fn unpack_flags(raw: u32) -> (GradientKind, bool) {
    (
        kind_from_ordinal(raw & FLAG_KIND_MASK),
        raw & FLAG_SHADOW_INSET != 0,
    )
}

/// Gradient geometry channel: meaning depends on the kind.
#[inline]
pub(crate) fn gradient_direction(gradient: &Gradient) -> [f32; 4] {
    match gradient {
        Gradient::Linear(g) => [g.start.x, g.start.y, g.end.x, g.end.y],
        Gradient::Radial(g) => [g.center.x, g.center.y, g.radius_x, g.radius_y],
        Gradient::Conic(g) => [g.center.x, g.center.y, g.angle, 0.0],
    }
}

/// Per-quad instance record for full-budget targets (192 bytes):
///
///  offset   0  colors          [u32; 8]  RGBA8-packed stops (straight alpha)
///  offset  32  offsets         [f32; 8]  stop offsets, sentinel-terminated
///  offset  64  direction       [f32; 4]  meaning depends on kind
///  offset  80  kind            u32
///  offset  84  _pad0           [u32; 3]
///  offset  96  position        [f32; 2]  logical px
///  offset 104  size            [f32; 2]  logical px
///  offset 112  border_color    [f32; 4]  premultiplied
///  offset 128  border_radius   [f32; 4]  tl, tr, br, bl
///  offset 144  border_width    f32
///  offset 148  shadow_blur     f32
///  offset 152  shadow_offset   [f32; 2]
///  offset 160  shadow_color    [f32; 4]  premultiplied
///  offset 176  inset           u32
///  offset 180  snap            u32
///  offset 184  _pad1           [u32; 2]
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadInstance {
    colors: [u32; 8],
    offsets: [f32; 8],
    direction: [f32; 4],
    kind: u32,
    _pad0: [u32; 3],
    position: [f32; 2],
    size: [f32; 2],
    border_color: [f32; 4],
    border_radius: [f32; 4],
    border_width: f32,
    shadow_blur: f32,
    shadow_offset: [f32; 2],
    shadow_color: [f32; 4],
    inset: u32,
    snap: u32,
    _pad1: [u32; 2],
}

/// Per-quad instance record for constrained targets (144 bytes).
///
/// Stops beyond index 3 are never transmitted; scalar flags share one
/// integer channel (see the module-level flag table):
///
///  offset   0  colors          [u32; 4]  RGBA8-packed stops (straight alpha)
///  offset  16  offsets         [f32; 4]  stop offsets, sentinel-terminated
///  offset  32  direction       [f32; 4]
///  offset  48  flags           u32       kind + shadow inset
///  offset  52  snap            u32
///  offset  56  position        [f32; 2]
///  offset  64  size            [f32; 2]
///  offset  72  border_color    [f32; 4]  premultiplied
///  offset  88  border_radius   [f32; 4]
///  offset 104  border_width    f32
///  offset 108  shadow_blur     f32
///  offset 112  shadow_offset   [f32; 2]
///  offset 120  shadow_color    [f32; 4]  premultiplied
///  offset 136  _pad            [u32; 2]
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadInstanceReduced {
    colors: [u32; 4],
    offsets: [f32; 4],
    direction: [f32; 4],
    flags: u32,
    snap: u32,
    position: [f32; 2],
    size: [f32; 2],
    border_color: [f32; 4],
    border_radius: [f32; 4],
    border_width: f32,
    shadow_blur: f32,
    shadow_offset: [f32; 2],
    shadow_color: [f32; 4],
    _pad: [u32; 2],
}

/// Packs the quad fields shared by both record widths.
///
/// This is the producer-side ingestion point: border and shadow colors are
/// premultiplied exactly here and nowhere else. Gradient stop colors stay
/// straight — the evaluator consumes them as supplied.
fn quad_fields(quad: &Quad) -> ([f32; 2], [f32; 2], [f32; 4], [f32; 4], f32, f32, [f32; 2], [f32; 4]) {
    let border = quad.border.color.premultiply();
    let shadow = quad.shadow.color.premultiply();
    (
        [quad.rect.origin.x, quad.rect.origin.y],
        [quad.rect.size.x, quad.rect.size.y],
        [border.r, border.g, border.b, border.a],
        quad.radii.to_array(),
        quad.border.width,
        quad.shadow.blur_radius,
        [quad.shadow.offset.x, quad.shadow.offset.y],
        [shadow.r, shadow.g, shadow.b, shadow.a],
    )
}

impl QuadInstance {
    pub fn pack(quad: &Quad, gradient: &Gradient) -> Self {
        let mut colors = [0u32; NATIVE_STOPS];
        let mut offsets = [STOP_SENTINEL; NATIVE_STOPS];

        let stops = gradient.stops();
        for (i, stop) in stops.iter().take(NATIVE_STOPS).enumerate() {
            colors[i] = pack_rgba8(stop.color);
            offsets[i] = stop.offset;
        }

        let (position, size, border_color, border_radius, border_width, shadow_blur, shadow_offset, shadow_color) =
            quad_fields(quad);

        Self {
            colors,
            offsets,
            direction: gradient_direction(gradient),
            kind: kind_ordinal(gradient.kind()),
            _pad0: [0; 3],
            position,
            size,
            border_color,
            border_radius,
            border_width,
            shadow_blur,
            shadow_offset,
            shadow_color,
            inset: quad.shadow.inset as u32,
            snap: quad.snap as u32,
            _pad1: [0; 2],
        }
    }

    /// Consumer side: sentinel scan + color unpack into evaluation form.
    pub fn gradient(&self) -> ResolvedGradient {
        ResolvedGradient::from_wire(
            &self.colors,
            &self.offsets,
            self.direction,
            kind_from_ordinal(self.kind),
        )
    }

    #[inline]
    pub fn shadow_inset(&self) -> bool {
        self.inset != 0
    }
}

impl QuadInstanceReduced {
    /// Packs into the reduced layout, silently dropping stops beyond index 3.
    ///
    /// This is a deliberate lossy fallback for small interpolator budgets,
    /// not an error: offsets arrive pre-sorted, so the surviving prefix is a
    /// valid gradient. The drop is reported once per [`ResolveWarnings`].
    pub fn pack(quad: &Quad, gradient: &Gradient, warnings: &mut ResolveWarnings) -> Self {
        let stops = gradient.stops();
        if stops.len() > REDUCED_STOPS && !warnings.truncated {
            log::debug!(
                "gradient has {} stops; reduced target carries {REDUCED_STOPS}; dropping the tail",
                stops.len(),
            );
            warnings.truncated = true;
        }

        let mut colors = [0u32; REDUCED_STOPS];
        let mut offsets = [STOP_SENTINEL; REDUCED_STOPS];
        for (i, stop) in stops.iter().take(REDUCED_STOPS).enumerate() {
            colors[i] = pack_rgba8(stop.color);
            offsets[i] = stop.offset;
        }

        let (position, size, border_color, border_radius, border_width, shadow_blur, shadow_offset, shadow_color) =
            quad_fields(quad);

        Self {
            colors,
            offsets,
            direction: gradient_direction(gradient),
            flags: pack_flags(gradient.kind(), quad.shadow.inset),
            snap: quad.snap as u32,
            position,
            size,
            border_color,
            border_radius,
            border_width,
            shadow_blur,
            shadow_offset,
            shadow_color,
            _pad: [0; 2],
        }
    }

    /// Consumer side: sentinel scan + color unpack into evaluation form.
    pub fn gradient(&self) -> ResolvedGradient {
        let (kind, _) = unpack_flags(self.flags);
        ResolvedGradient::from_wire(&self.colors, &self.offsets, self.direction, kind)
    }

    #[inline]
    pub fn shadow_inset(&self) -> bool {
        let (_, inset) = unpack_flags(self.flags);
        inset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{CornerRadii, Rect, Vec2};
    use crate::paint::Linear;
    use crate::quad::Shadow;

    // ── packed color channel ──────────────────────────────────────────────

    #[test]
    fn rgba8_bit_layout_puts_red_in_the_low_byte() {
        assert_eq!(pack_rgba8(Color::new(1.0, 0.0, 0.0, 0.0)), 0x0000_00FF);
        assert_eq!(pack_rgba8(Color::new(0.0, 1.0, 0.0, 0.0)), 0x0000_FF00);
        assert_eq!(pack_rgba8(Color::new(0.0, 0.0, 1.0, 0.0)), 0x00FF_0000);
        assert_eq!(pack_rgba8(Color::new(0.0, 0.0, 0.0, 1.0)), 0xFF00_0000);
    }

    #[test]
    fn rgba8_clamps_out_of_range_channels() {
        assert_eq!(pack_rgba8(Color::new(2.0, -1.0, 0.0, 1.0)), 0xFF00_00FF);
    }

    #[test]
    fn rgba8_round_trip_within_one_step() {
        for r in [0.0, 0.1, 0.33, 0.5, 0.77, 1.0] {
            for a in [0.0, 0.25, 0.5, 1.0] {
                let c = Color::new(r, 1.0 - r, r * 0.5, a);
                let back = unpack_rgba8(pack_rgba8(c));
                for (x, y) in [(c.r, back.r), (c.g, back.g), (c.b, back.b), (c.a, back.a)] {
                    assert!((x - y).abs() <= 1.0 / 255.0, "{x} vs {y}");
                }
            }
        }
    }

    #[test]
    fn rgba8_is_exact_for_quantized_colors() {
        let c = Color::from_rgba8(17, 99, 204, 128);
        assert_eq!(unpack_rgba8(pack_rgba8(c)), c);
    }

    // ── flag channel ──────────────────────────────────────────────────────

    #[test]
    fn flag_channel_bit_positions() {
        assert_eq!(pack_flags(GradientKind::Linear, false), 0);
        assert_eq!(pack_flags(GradientKind::Conic, false), 2);
        assert_eq!(pack_flags(GradientKind::Radial, true), 1 | (1 << 16));
    }

    #[test]
    fn flag_channel_round_trips() {
        for kind in [GradientKind::Linear, GradientKind::Radial, GradientKind::Conic] {
            for inset in [false, true] {
                let raw = pack_flags(kind, inset);
                assert_eq!(unpack_flags(raw), (kind, inset));
                // Reserved bits stay clear.
                assert_eq!(raw & !0x1_FFFF, 0);
            }
        }
    }

    // ── record layout ─────────────────────────────────────────────────────

    #[test]
    fn record_sizes_match_the_documented_layout() {
        assert_eq!(core::mem::size_of::<QuadInstance>(), 192);
        assert_eq!(core::mem::size_of::<QuadInstanceReduced>(), 144);
    }

    // ── packing ───────────────────────────────────────────────────────────

    fn sample_quad() -> Quad {
        Quad::new(
            Rect::new(10.0, 20.0, 100.0, 50.0),
            CornerRadii::all(4.0),
            Color::WHITE,
        )
        .with_shadow(Shadow::inset(
            Color::new(0.0, 0.0, 0.0, 0.5),
            Vec2::new(2.0, 2.0),
            6.0,
        ))
    }

    fn six_stop_gradient() -> Gradient {
        let mut g = Linear::new(Vec2::zero(), Vec2::new(100.0, 0.0));
        for i in 0..6 {
            g = g.add_stop(i as f32 / 5.0, Color::rgb(i as f32 / 5.0, 0.0, 0.0));
        }
        g.into()
    }

    #[test]
    fn native_pack_terminates_unused_slots_with_the_sentinel() {
        let g: Gradient = Linear::new(Vec2::zero(), Vec2::new(1.0, 0.0))
            .add_stop(0.0, Color::BLACK)
            .add_stop(1.0, Color::WHITE)
            .into();
        let instance = QuadInstance::pack(&sample_quad(), &g);

        assert_eq!(instance.offsets[0], 0.0);
        assert_eq!(instance.offsets[1], 1.0);
        for slot in &instance.offsets[2..] {
            assert!(*slot > 1.0);
        }
        assert_eq!(instance.gradient().stop_count(), 2);
    }

    #[test]
    fn reduced_pack_drops_stops_past_the_budget() {
        let instance = QuadInstanceReduced::pack(
            &sample_quad(),
            &six_stop_gradient(),
            &mut ResolveWarnings::default(),
        );

        // Four slots, all live, no sentinel: the tail was never transmitted.
        assert_eq!(instance.gradient().stop_count(), 4);
        assert_eq!(instance.offsets[3], 3.0 / 5.0);
    }

    #[test]
    fn reduced_pack_keeps_shadow_inset_in_the_flag_channel() {
        let instance = QuadInstanceReduced::pack(
            &sample_quad(),
            &six_stop_gradient(),
            &mut ResolveWarnings::default(),
        );
        assert!(instance.shadow_inset());
        assert_eq!(instance.flags & FLAG_KIND_MASK, 0);
    }

    #[test]
    fn pack_premultiplies_shadow_but_not_stop_colors() {
        let g: Gradient = Linear::new(Vec2::zero(), Vec2::new(1.0, 0.0))
            .add_stop(0.0, Color::new(1.0, 1.0, 1.0, 0.5))
            .add_stop(1.0, Color::WHITE)
            .into();
        let instance = QuadInstance::pack(&sample_quad(), &g);

        // Shadow color (alpha 0.5) is premultiplied on the wire.
        assert_eq!(instance.shadow_color, [0.0, 0.0, 0.0, 0.5]);
        // The half-transparent stop keeps straight RGB: r stays 255.
        assert_eq!(instance.colors[0] & 0xFF, 255);
        assert_eq!(instance.colors[0] >> 24, 128);
    }
}
