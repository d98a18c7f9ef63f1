//! Umbra quad crate.
//!
//! This crate owns the rounded-quad draw layer of the UI stack: descriptors
//! for rectangles with borders, shadows, and multi-stop gradient fills, the
//! geometry stage that places them in device space, and the SDF-based
//! per-pixel pipeline that shades them. A reference rasterizer exercises the
//! whole path on the CPU; GPU backends consume the same records and the wire
//! layout in `render::wire`.

pub mod logging;

pub mod coords;
pub mod paint;
pub mod quad;
pub mod render;
