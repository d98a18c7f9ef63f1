//! The quad render pipeline.
//!
//! Stages, in data-flow order:
//! - `vertex`: places a quad in device/clip space and derives the per-pixel
//!   record (everything pre-scaled to device pixels, colors premultiplied).
//! - `wire`: packs gradient stops and mode flags into fixed-width instance
//!   records for targets with a constrained interpolator budget.
//! - `gradient`: samples the fill color at a point for linear/radial/conic
//!   multi-stop gradients.
//! - `sdf`: rounded-box signed distance, border blend, shadow compositing,
//!   and coverage-derived alpha.
//! - `raster`: a scalar per-pixel reference shader with a row-parallel
//!   dispatch wrapper.
//!
//! Every stage is a pure function of its inputs; the only contract between
//! stages is the record layout in `wire`.

mod caps;
mod common;

pub mod gradient;
pub mod raster;
pub mod sdf;
pub mod vertex;
pub mod wire;

pub use caps::Caps;
