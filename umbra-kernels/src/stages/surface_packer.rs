use glam::{UVec2, Vec4, Vec4Swizzles};

use crate::{DepthNormal, Tex};

/// Builds the packed [`DepthNormal`] texel out of separate G-buffer
/// attachments.
#[derive(Clone, Copy, Debug)]
pub struct SurfacePacker<'a> {
    /// Linear depth in `x` and its screen-space derivative in `y`.
    pub linear_z: Tex<'a>,

    /// World-space normal in `xyz`; doesn't have to be normalized.
    pub world_normal: Tex<'a>,
}

impl<'a> SurfacePacker<'a> {
    pub fn run(&self, screen_pos: UVec2) -> Vec4 {
        let linear_z = self.linear_z.read(screen_pos);
        let normal = self.world_normal.read(screen_pos).xyz();

        DepthNormal::new(linear_z.x, linear_z.y, normal.normalize_or_zero())
            .pack()
    }
}
