//! Real-time denoiser for noisy, low sample-count ray-traced signals, built
//! around the spatiotemporal variance-guided filter (SVGF).
//!
//! A [`Denoiser`] is created from a [`BufferDescriptor`] which names the
//! buffers it reads and writes; every frame the host fills a [`Resources`]
//! map with those buffers and calls [`Denoiser::execute()`].

mod buffers;
mod config;
mod denoiser;
mod descriptor;
mod error;
mod resources;
mod utils;

pub use glam;
pub use umbra_kernels as kernels;

pub use self::buffers::*;
pub use self::config::*;
pub use self::denoiser::*;
pub use self::descriptor::*;
pub use self::error::*;
pub use self::resources::*;
pub(crate) use self::utils::*;
