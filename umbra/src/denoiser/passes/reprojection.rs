use rayon::prelude::*;
use umbra_kernels::{idx_to_screen, DepthNormalMap, Reprojector};

use crate::denoiser::{DenoiserBuffers, DenoiserPass};
use crate::{BufferDescriptor, DenoiserConfig, FrameInputs};

#[derive(Debug)]
pub struct ReprojectionPass {
    pass: DenoiserPass,
}

impl ReprojectionPass {
    pub fn new(_: &BufferDescriptor) -> Self {
        Self {
            pass: DenoiserPass::new("reprojection"),
        }
    }

    pub fn run(
        &self,
        config: &DenoiserConfig,
        inputs: &FrameInputs,
        buffers: &mut DenoiserBuffers,
    ) {
        let size = buffers.size;
        let params = config.reprojection_params();

        let (prev_moments, moments) = buffers.moments.split_mut();

        let (prev_history_length, history_length) =
            buffers.history_length.split_mut();

        let reprojector = Reprojector {
            samples: inputs.signal.view(),
            surface_map: DepthNormalMap::new(buffers.depth_normal.view()),
            motion_vectors: inputs.motion_vectors.view(),
            prev_surface_map: DepthNormalMap::new(
                buffers.prev_depth_normal.view(),
            ),
            prev_illumination: buffers.filtered_past.view(),
            prev_moments: prev_moments.view(),
            prev_history_length: prev_history_length.view(),
            material: inputs.material(),
        };

        let illumination = &mut buffers.illumination;

        self.pass.measure(|| {
            illumination
                .pixels_mut()
                .par_iter_mut()
                .zip(moments.pixels_mut().par_iter_mut())
                .zip(history_length.pixels_mut().par_iter_mut())
                .enumerate()
                .for_each(|(idx, ((illumination, moments), history_length))| {
                    let sample =
                        reprojector.run(idx_to_screen(size, idx), &params);

                    *illumination = sample.packed_illumination();
                    *moments = sample.packed_moments();
                    *history_length = sample.packed_history_length();
                });
        });

        buffers.moments.flip();
        buffers.history_length.flip();
    }
}
