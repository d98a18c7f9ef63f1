//! Geometry stage: places a quad in device/clip space and derives the
//! per-pixel record.
//!
//! Runs once per quad (conceptually once per corner on a GPU; the placement
//! math is identical for all four, so the CPU form computes it once and
//! derives corners on demand). Everything the pixel stage consumes leaves
//! here pre-scaled to device pixels with border/shadow colors premultiplied,
//! so the hot loop never repeats either conversion.

use crate::coords::{Rect, Transform2, Vec2};
use crate::paint::Color;
use crate::quad::{FillMode, Quad};

use super::caps::Caps;
use super::gradient::{ResolveWarnings, ResolvedPaint};

/// Frame-global parameters shared by every quad.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Globals {
    /// Device px → clip space (camera/projection).
    pub transform: Transform2,
    /// Logical px → device px.
    pub scale_factor: f32,
}

impl Globals {
    #[inline]
    pub fn new(transform: Transform2, scale_factor: f32) -> Self {
        Self { transform, scale_factor }
    }
}

/// Corners of the unit quad, emitted as two triangles via [`QUAD_INDICES`].
pub const UNIT_QUAD: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Everything the per-pixel stage needs, in device pixels.
///
/// `position`/`scale` describe the *visual* rectangle — the SDF measures
/// against it, not against the shadow-expanded draw area, which lives in
/// `draw_origin`/`draw_size`.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelRecord {
    pub position: Vec2,
    pub scale: Vec2,
    /// Resolved radii: tl, tr, br, bl, clamped to the visual rectangle.
    pub radii: [f32; 4],
    pub border_width: f32,
    /// Premultiplied.
    pub border_color: Color,
    /// Premultiplied. Alpha 0 disables all shadow work exactly.
    pub shadow_color: Color,
    pub shadow_offset: Vec2,
    pub shadow_blur: f32,
    pub shadow_inset: bool,
    pub fill: ResolvedPaint,
    pub mode: FillMode,
    /// Origin of the expanded draw area (includes the half-pixel apron).
    pub draw_origin: Vec2,
    /// Size of the expanded draw area.
    pub draw_size: Vec2,
}

impl PixelRecord {
    /// The area rasterization must cover for this quad.
    #[inline]
    pub fn draw_rect(&self) -> Rect {
        Rect::from_origin_size(self.draw_origin, self.draw_size)
    }

    /// Clip-space position of one corner of the draw area; `index` ∈ {0..3}
    /// selects a [`UNIT_QUAD`] corner.
    #[inline]
    pub fn clip_corner(&self, globals: &Globals, index: usize) -> Vec2 {
        let local = self.draw_origin + UNIT_QUAD[index] * self.draw_size;
        globals.transform.apply(local)
    }
}

/// Integer-grid correction for a device-space rectangle.
///
/// Position and far corner are rounded *independently*, so snapping a run of
/// adjacent quads never accumulates size drift:
/// `pos_snap = round(pos) − pos`,
/// `size_snap = round(pos + size) − pos − pos_snap − size`.
/// Already-integer rectangles get a zero correction.
#[inline]
pub fn snap_correction(pos: Vec2, size: Vec2) -> (Vec2, Vec2) {
    let pos_snap = pos.round() - pos;
    let size_snap = (pos + size).round() - pos - pos_snap - size;
    (pos_snap, size_snap)
}

/// Transforms one quad descriptor into its per-pixel record.
///
/// Pure function of its inputs; all numeric inputs are assumed finite, and
/// NaN/Inf propagation matches what a rasterizer would do with them.
pub fn place(quad: &Quad, globals: &Globals, caps: &Caps, warnings: &mut ResolveWarnings) -> PixelRecord {
    let rect = quad.rect.normalized();
    let shadow = &quad.shadow;
    let k = globals.scale_factor;

    // Outset shadows widen the draw area to cover their footprint; inset
    // shadows live strictly inside the quad and expand nothing.
    let draw_rect = if shadow.inset {
        rect
    } else {
        let blur = Vec2::splat(shadow.blur_radius);
        let before = blur - shadow.offset.min(Vec2::zero());
        let after = shadow.offset.max(Vec2::zero()) + blur;
        rect.expanded(before, after)
    };

    let draw_rect = draw_rect.scaled(k);
    let visual = rect.scaled(k);

    let (pos_snap, size_snap) = if quad.snap {
        snap_correction(draw_rect.origin, draw_rect.size)
    } else {
        (Vec2::zero(), Vec2::zero())
    };

    // Radius limits come from the *unexpanded* quad: the radius belongs to
    // the visible rectangle, not the shadow halo.
    let radii = quad.radii.scaled(k).clamped_to(visual.size).to_array();

    let mut fill = ResolvedPaint::resolve(&quad.fill, caps, warnings);
    fill.scale_geometry(k);

    let mode = if quad.mode == FillMode::BorderOnly && !caps.border_only {
        if !warnings.border_only {
            log::debug!("target lacks border-only fills; painting the interior");
            warnings.border_only = true;
        }
        FillMode::Fill
    } else {
        quad.mode
    };

    PixelRecord {
        position: visual.origin + pos_snap,
        scale: visual.size + size_snap,
        radii,
        border_width: quad.border.width * k,
        border_color: quad.border.color.premultiply(),
        shadow_color: shadow.color.premultiply(),
        shadow_offset: shadow.offset * k,
        shadow_blur: shadow.blur_radius * k,
        shadow_inset: shadow.inset,
        fill,
        mode,
        // The half-pixel apron keeps the SDF's inclusive boundary inside the
        // rasterized area: scale by size+1, translate by pos−0.5.
        draw_origin: draw_rect.origin + pos_snap - Vec2::splat(0.5),
        draw_size: draw_rect.size + size_snap + Vec2::splat(1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{CornerRadii, Viewport};
    use crate::quad::Shadow;

    fn globals() -> Globals {
        Globals::new(Transform2::IDENTITY, 1.0)
    }

    fn place_simple(quad: &Quad) -> PixelRecord {
        place(quad, &globals(), &Caps::NATIVE, &mut ResolveWarnings::default())
    }

    fn base_quad() -> Quad {
        Quad::new(
            Rect::new(100.0, 100.0, 200.0, 100.0),
            CornerRadii::zero(),
            Color::WHITE,
        )
    }

    // ── snapping ──────────────────────────────────────────────────────────

    #[test]
    fn snap_correction_is_zero_on_integer_rects() {
        let (p, s) = snap_correction(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0));
        assert_eq!(p, Vec2::zero());
        assert_eq!(s, Vec2::zero());
    }

    #[test]
    fn snap_correction_rounds_both_corners_independently() {
        let pos = Vec2::new(10.4, 20.6);
        let size = Vec2::new(30.3, 40.1);
        let (p, s) = snap_correction(pos, size);

        let snapped_pos = pos + p;
        let snapped_far = pos + p + size + s;
        assert_eq!(snapped_pos, Vec2::new(10.0, 21.0));
        assert_eq!(snapped_far, Vec2::new(41.0, 61.0));
    }

    #[test]
    fn placing_without_snap_leaves_fractional_positions() {
        let quad = Quad::new(
            Rect::new(10.3, 20.7, 30.0, 40.0),
            CornerRadii::zero(),
            Color::WHITE,
        );
        let record = place_simple(&quad);
        assert_eq!(record.position, Vec2::new(10.3, 20.7));
    }

    // ── shadow expansion ──────────────────────────────────────────────────

    #[test]
    fn outset_shadow_expands_the_draw_area() {
        // Offset (5, 5), blur 10: the draw area must reach 15 device units
        // past the visual far corner and 10 before the origin (plus the
        // half-pixel apron).
        let quad = base_quad().with_shadow(Shadow::new(
            Color::new(0.0, 0.0, 0.0, 1.0),
            Vec2::new(5.0, 5.0),
            10.0,
        ));
        let record = place_simple(&quad);
        let draw = record.draw_rect();

        assert!(draw.min().x <= 100.0 - 10.0);
        assert!(draw.min().y <= 100.0 - 10.0);
        assert!(draw.max().x >= 300.0 + 15.0);
        assert!(draw.max().y >= 200.0 + 15.0);
    }

    #[test]
    fn inset_shadow_expands_nothing() {
        let quad = base_quad().with_shadow(Shadow::inset(
            Color::new(0.0, 0.0, 0.0, 1.0),
            Vec2::new(5.0, 5.0),
            10.0,
        ));
        let record = place_simple(&quad);
        let draw = record.draw_rect();

        // Only the half-pixel apron remains.
        assert_eq!(draw.min(), Vec2::new(99.5, 99.5));
        assert_eq!(draw.max(), Vec2::new(300.5, 200.5));
    }

    #[test]
    fn expansion_never_moves_the_visual_rectangle() {
        let quad = base_quad().with_shadow(Shadow::new(
            Color::new(0.0, 0.0, 0.0, 1.0),
            Vec2::new(-8.0, 3.0),
            4.0,
        ));
        let record = place_simple(&quad);
        assert_eq!(record.position, Vec2::new(100.0, 100.0));
        assert_eq!(record.scale, Vec2::new(200.0, 100.0));
    }

    // ── radius clamping ───────────────────────────────────────────────────

    #[test]
    fn radii_clamp_against_the_unexpanded_size() {
        // A huge blur makes the draw area much larger than the quad; the
        // radius cap must still come from the 100-unit visual height.
        let quad = Quad::new(
            Rect::new(0.0, 0.0, 200.0, 100.0),
            CornerRadii::all(80.0),
            Color::WHITE,
        )
        .with_shadow(Shadow::new(
            Color::new(0.0, 0.0, 0.0, 1.0),
            Vec2::zero(),
            300.0,
        ));
        let record = place_simple(&quad);
        assert_eq!(record.radii, [50.0; 4]);
    }

    // ── device scaling ────────────────────────────────────────────────────

    #[test]
    fn scale_factor_applies_to_every_forwarded_field() {
        let quad = Quad::new(
            Rect::new(10.0, 10.0, 50.0, 40.0),
            CornerRadii::all(8.0),
            Color::WHITE,
        )
        .with_border(crate::quad::Border::new(2.0, Color::BLACK))
        .with_shadow(Shadow::new(
            Color::new(0.0, 0.0, 0.0, 0.5),
            Vec2::new(3.0, -1.0),
            4.0,
        ));
        let globals = Globals::new(Transform2::IDENTITY, 2.0);
        let record = place(&quad, &globals, &Caps::NATIVE, &mut ResolveWarnings::default());

        assert_eq!(record.position, Vec2::new(20.0, 20.0));
        assert_eq!(record.scale, Vec2::new(100.0, 80.0));
        assert_eq!(record.radii, [16.0; 4]);
        assert_eq!(record.border_width, 4.0);
        assert_eq!(record.shadow_offset, Vec2::new(6.0, -2.0));
        assert_eq!(record.shadow_blur, 8.0);
    }

    // ── color ingestion ───────────────────────────────────────────────────

    #[test]
    fn border_and_shadow_colors_are_premultiplied_once() {
        let quad = base_quad()
            .with_border(crate::quad::Border::new(1.0, Color::new(1.0, 1.0, 1.0, 0.5)))
            .with_shadow(Shadow::new(
                Color::new(1.0, 0.0, 0.0, 0.5),
                Vec2::zero(),
                1.0,
            ));
        let record = place_simple(&quad);

        assert_eq!(record.border_color, Color::new(0.5, 0.5, 0.5, 0.5));
        assert_eq!(record.shadow_color, Color::new(0.5, 0.0, 0.0, 0.5));
    }

    // ── clip-space emission ───────────────────────────────────────────────

    #[test]
    fn clip_corners_cover_the_draw_area() {
        let viewport = Viewport::new(400.0, 400.0);
        let globals = Globals::new(Transform2::orthographic(viewport, 1.0), 1.0);
        let quad = Quad::new(
            Rect::new(0.0, 0.0, 400.0, 400.0),
            CornerRadii::zero(),
            Color::WHITE,
        );
        let record = place(&quad, &globals, &Caps::NATIVE, &mut ResolveWarnings::default());

        // Full-viewport quad: corners land just outside clip space by the
        // half-pixel apron.
        let top_left = record.clip_corner(&globals, 0);
        let bottom_right = record.clip_corner(&globals, 2);
        assert!(top_left.x < -0.99 && top_left.y > 0.99);
        assert!(bottom_right.x > 0.99 && bottom_right.y < -0.99);
    }

    // ── capability gating ─────────────────────────────────────────────────

    #[test]
    fn border_only_falls_back_when_unsupported() {
        let caps = Caps { border_only: false, ..Caps::NATIVE };
        let quad = base_quad().with_mode(FillMode::BorderOnly);
        let record = place(&quad, &globals(), &caps, &mut ResolveWarnings::default());
        assert_eq!(record.mode, FillMode::Fill);
    }
}
