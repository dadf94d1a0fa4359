use glam::{UVec2, Vec3, Vec4Swizzles};

use crate::{Tex, Vec3Ext};

/// Albedo and emission of the primary surfaces.
///
/// Denoising colors directly would blur textures together with the noise, so
/// instead the albedo is factored out before filtering and multiplied back in
/// afterwards.
#[derive(Clone, Copy, Debug)]
pub struct Material<'a> {
    pub albedo: Tex<'a>,
    pub emission: Tex<'a>,
}

impl<'a> Material<'a> {
    pub fn albedo(&self, screen_pos: UVec2) -> Vec3 {
        self.albedo.read(screen_pos).xyz()
    }

    pub fn emission(&self, screen_pos: UVec2) -> Vec3 {
        self.emission.read(screen_pos).xyz()
    }

    /// Turns a final color into the illumination arriving at the surface.
    pub fn demodulate(&self, screen_pos: UVec2, color: Vec3) -> Vec3 {
        (color - self.emission(screen_pos)).demodulate(self.albedo(screen_pos))
    }

    /// Inverse of [`Self::demodulate()`].
    pub fn remodulate(&self, screen_pos: UVec2, illumination: Vec3) -> Vec3 {
        illumination * self.albedo(screen_pos) + self.emission(screen_pos)
    }
}
