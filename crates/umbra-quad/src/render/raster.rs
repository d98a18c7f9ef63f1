//! Reference rasterizer: the scalar per-pixel shader plus a thin row-parallel
//! dispatch wrapper.
//!
//! Each pixel is a pure function of `(record, position)` — no shared mutable
//! state, no ordering requirement between pixels. Rows of the target are
//! disjoint, so the dispatch hands each row to `rayon` without any
//! synchronization. Quads still composite in submission order, which is the
//! only ordering that matters.

use rayon::prelude::*;

use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::quad::Quad;

use super::caps::Caps;
use super::gradient::ResolveWarnings;
use super::sdf;
use super::vertex::{self, Globals, PixelRecord};

/// A premultiplied RGBA f32 pixel buffer.
#[derive(Debug, Clone)]
pub struct RasterTarget {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl RasterTarget {
    /// Creates a transparent target. Zero-sized targets are valid and simply
    /// receive no pixels.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        self.pixels[y * self.width + x]
    }

    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Resets every pixel to transparent, keeping the allocation.
    pub fn clear(&mut self) {
        self.pixels.fill(Color::TRANSPARENT);
    }

    #[inline]
    fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
    }
}

/// Premultiplied source-over: `dst = src + dst·(1 − src.a)`.
#[inline]
fn blend_over(dst: Color, src: Color) -> Color {
    let inv = 1.0 - src.a;
    Color::new(
        src.r + dst.r * inv,
        src.g + dst.g * inv,
        src.b + dst.b * inv,
        src.a + dst.a * inv,
    )
}

/// Draws quad lists into a [`RasterTarget`].
///
/// Holds the target capability ceiling and the one-time degradation notices,
/// so repeated frames don't spam the log.
#[derive(Debug)]
pub struct Rasterizer {
    caps: Caps,
    warnings: ResolveWarnings,
}

impl Rasterizer {
    pub fn new(caps: Caps) -> Self {
        Self {
            caps,
            warnings: ResolveWarnings::default(),
        }
    }

    #[inline]
    pub fn caps(&self) -> &Caps {
        &self.caps
    }

    /// Composites `quads` over the target in submission order.
    pub fn render(&mut self, quads: &[Quad], globals: &Globals, target: &mut RasterTarget) {
        for quad in quads {
            if quad.rect.normalized().is_empty() {
                continue;
            }

            let record = vertex::place(quad, globals, &self.caps, &mut self.warnings);
            rasterize_record(&record, target);
        }
    }
}

/// Shades every pixel of the record's draw area that lies inside the target,
/// one parallel task per row.
fn rasterize_record(record: &PixelRecord, target: &mut RasterTarget) {
    let Some(area) = record.draw_rect().intersect(target.bounds()) else {
        return;
    };

    let x0 = area.min().x.floor().max(0.0) as usize;
    let y0 = area.min().y.floor().max(0.0) as usize;
    let x1 = (area.max().x.ceil() as usize).min(target.width);
    let y1 = (area.max().y.ceil() as usize).min(target.height);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let width = target.width;
    target.pixels[y0 * width..y1 * width]
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(i, row)| {
            let y = (y0 + i) as f32 + 0.5;
            for x in x0..x1 {
                let frag = Vec2::new(x as f32 + 0.5, y);
                let src = sdf::shade(record, frag);
                if src != Color::TRANSPARENT {
                    row[x] = blend_over(row[x], src);
                }
            }
        });
}
