use glam::UVec2;
use log::debug;

use crate::{DoubleBuffered, Texture};

/// Screen-sized buffers owned by a denoiser.
///
/// Moments and history length are double-buffered: the reprojection pass
/// reads the front buffer (last frame's data), writes the back one and
/// flips them. Illumination doesn't need that, since next frame's history
/// comes from `filtered_past` instead.
#[derive(Debug)]
pub struct DenoiserBuffers {
    pub size: UVec2,

    /// Depth and normals of the current frame, packed.
    pub depth_normal: Texture,

    /// Depth and normals of the previous frame.
    pub prev_depth_normal: Texture,

    /// Output of the feedback tap, i.e. illumination used as history by the
    /// next frame.
    pub filtered_past: Texture,

    /// Illumination after temporal accumulation, with temporal variance in
    /// `w`.
    pub illumination: Texture,

    pub moments: DoubleBuffered<Texture>,
    pub history_length: DoubleBuffered<Texture>,

    /// Scratch buffers for the variance estimation and à-trous passes.
    pub ping_pong: DoubleBuffered<Texture>,
}

impl DenoiserBuffers {
    pub fn new(size: UVec2) -> Self {
        debug!("Allocating denoiser buffers; size={:?}", size);

        Self {
            size,
            depth_normal: Texture::new("umbra_depth_normal", size),
            prev_depth_normal: Texture::new("umbra_prev_depth_normal", size),
            filtered_past: Texture::new("umbra_filtered_past", size),
            illumination: Texture::new("umbra_illumination", size),
            moments: DoubleBuffered::<Texture>::new("umbra_moments", size),
            history_length: DoubleBuffered::<Texture>::new(
                "umbra_history_length",
                size,
            ),
            ping_pong: DoubleBuffered::<Texture>::new("umbra_ping_pong", size),
        }
    }

    /// Zeroes every buffer, so that the next frame starts with no history.
    pub fn clear(&mut self) {
        debug!("Clearing denoiser buffers");

        self.depth_normal.clear();
        self.prev_depth_normal.clear();
        self.filtered_past.clear();
        self.illumination.clear();
        self.moments.clear();
        self.history_length.clear();
        self.ping_pong.clear();
    }
}
