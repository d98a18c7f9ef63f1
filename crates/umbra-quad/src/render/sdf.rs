//! Rounded-box signed distance and per-pixel compositing.
//!
//! The distance field drives everything visible: coverage antialiasing on the
//! outer edge, the border seam on the inner edge, and both shadow falloffs.
//! Distances are negative inside the quad, positive outside, zero on the
//! visual edge; one device unit of distance spans roughly one pixel of
//! antialiasing.

use crate::coords::Vec2;
use crate::paint::Color;
use crate::quad::FillMode;

use super::common::smoothstep;
use super::vertex::PixelRecord;

/// Signed distance from `p` (relative to the rectangle's center) to a rounded
/// box with the given half-size and corner radius.
#[inline]
pub fn rounded_box_sdf(p: Vec2, half_size: Vec2, radius: f32) -> f32 {
    let q = p.abs() - half_size + Vec2::splat(radius);
    q.max(Vec2::zero()).length() + q.max_component().min(0.0) - radius
}

/// Selects the corner radius governing `p`'s quadrant.
///
/// `radii` is `[top_left, top_right, bottom_right, bottom_left]`; `p` is
/// relative to the rectangle's center, +Y down.
#[inline]
pub fn corner_radius(radii: [f32; 4], p: Vec2) -> f32 {
    let top = if p.x > 0.0 { radii[1] } else { radii[0] };
    let bottom = if p.x > 0.0 { radii[2] } else { radii[3] };
    if p.y > 0.0 { bottom } else { top }
}

/// Shades one pixel: fill, border seam, coverage, and shadow compositing.
///
/// `frag` is the pixel's device position. The result is premultiplied RGBA
/// with alpha in [0, 1]; pixels past the antialiasing band come back fully
/// transparent.
pub fn shade(record: &PixelRecord, frag: Vec2) -> Color {
    let half = record.scale * 0.5;
    let center = record.position + half;
    let p = frag - center;

    let radius = corner_radius(record.radii, p);
    let d = rounded_box_sdf(p, half, radius);

    let fill = record.fill.eval(frag);

    let (quad_color, coverage) = match record.mode {
        FillMode::Fill => {
            // The border mix factor reaches 0.5 exactly at the border's inner
            // edge (d = −width), giving a one-pixel antialiased seam there.
            let mixed = if record.border_width > 0.0 {
                let seam = (0.5 + d + record.border_width).clamp(0.0, 1.0);
                fill.mix(record.border_color, seam)
            } else {
                fill
            };
            let coverage = (0.5 - d).clamp(0.0, 1.0);
            (mixed * coverage, coverage)
        }
        FillMode::BorderOnly => {
            // Inner SDF is the outer one shifted inward by the border width;
            // the fill paints only the ring between the two.
            let outer = (0.5 - d).clamp(0.0, 1.0);
            let inner = (0.5 - (d + record.border_width)).clamp(0.0, 1.0);
            let band = outer * (1.0 - inner);
            (fill * band, band)
        }
    };

    // Exact early exit: a quad without a shadow must produce bit-identical
    // output to one whose shadow math was never run.
    if record.shadow_color.a == 0.0 {
        return quad_color;
    }

    // The shadow reuses the quad's own rectangle, sampled at an offset.
    let sample = frag - record.shadow_offset - center;
    let shadow_radius = corner_radius(record.radii, sample);
    let shadow_d = rounded_box_sdf(sample, half, shadow_radius);
    let blur = record.shadow_blur;

    if record.shadow_inset {
        // Falloff originates at the interior edge and is confined to pixels
        // the quad already covers.
        let alpha = 1.0 - smoothstep(-blur, blur, (-shadow_d).max(0.0));
        quad_color.mix(record.shadow_color * coverage, alpha * coverage)
    } else {
        // Shadow shows only where the quad itself doesn't fully cover.
        let alpha = 1.0 - smoothstep(-blur, blur, shadow_d.max(0.0));
        quad_color.mix(record.shadow_color, (1.0 - coverage) * alpha)
    }
}
