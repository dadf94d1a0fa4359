use umbra_kernels::SurfacePacker;

use crate::denoiser::{DenoiserBuffers, DenoiserPass};
use crate::{BufferDescriptor, FrameInputs, FrameSurface};

/// Brings the frame's depth and normals into the packed layout the rest of
/// the passes read.
#[derive(Debug)]
pub struct SurfacePackingPass {
    pass: DenoiserPass,
}

impl SurfacePackingPass {
    pub fn new(_: &BufferDescriptor) -> Self {
        Self {
            pass: DenoiserPass::new("surface_packing"),
        }
    }

    pub fn run(&self, inputs: &FrameInputs, buffers: &mut DenoiserBuffers) {
        match inputs.surface {
            FrameSurface::Packed(depth_normal) => {
                self.pass.measure(|| {
                    buffers.depth_normal.copy_from(depth_normal);
                });
            }

            FrameSurface::Separate {
                linear_z,
                world_normal,
            } => {
                let packer = SurfacePacker {
                    linear_z: linear_z.view(),
                    world_normal: world_normal.view(),
                };

                self.pass.run(&mut buffers.depth_normal, |screen_pos| {
                    packer.run(screen_pos)
                });
            }
        }
    }
}
