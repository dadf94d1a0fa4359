//! Per-pixel structs and algorithms used by Umbra's denoising stages.
//!
//! Everything here operates on a single screen position at a time and reads
//! from immutable texture views only; scheduling the kernels over the whole
//! screen (and owning the buffers they read and write) is the job of the
//! `umbra` crate.

#![allow(clippy::manual_range_contains)]

mod depth_normal;
mod edge_stopping;
mod material;
mod passes;
mod reprojection;
mod stages;
mod utils;

pub use self::depth_normal::*;
pub use self::edge_stopping::*;
pub use self::material::*;
pub use self::passes::*;
pub use self::reprojection::*;
pub use self::stages::*;
pub use self::utils::*;

pub mod prelude {
    pub use glam::*;

    pub use crate::*;
}

/// Guards denominators of the edge-stopping functions and of the reprojection
/// depth test.
pub const UMBRA_EPSILON: f32 = 1e-2;

/// Maximum depth difference between a pixel and its reprojected counterpart,
/// expressed in multiples of the pixel's screen-space depth derivative.
pub const DEPTH_THRESHOLD: f32 = 10.0;

/// Minimum cosine between a pixel's normal and its reprojected counterpart.
pub const NORMAL_THRESHOLD: f32 = 0.9;

/// Pixels with a history shorter than this get their variance estimated
/// spatially instead of temporally.
pub const HISTORY_THRESHOLD: f32 = 4.0;

/// Radius of the neighbourhood used by the spatial variance estimation.
pub const VARIANCE_ESTIMATION_RADIUS: i32 = 3;

/// Weights of the à-trous filter footprint, indexed by `|offset|`.
///
/// This is the (unnormalized) B3 spline `1/16 [1 4 6 4 1]`.
pub const ATROUS_KERNEL: [f32; 3] = [1.0, 2.0 / 3.0, 1.0 / 6.0];

/// Weight-sum below which a filter falls back to the unfiltered sample.
pub const MIN_WEIGHT_SUM: f32 = 1e-6;

/// Lowest albedo used when demodulating colors, so that black surfaces don't
/// blow up the illumination.
pub const MIN_ALBEDO: f32 = 1e-3;
