use umbra_kernels::{DepthNormalMap, VarianceEstimator};

use crate::denoiser::{DenoiserBuffers, DenoiserPass};
use crate::{BufferDescriptor, DenoiserConfig};

#[derive(Debug)]
pub struct VarianceEstimationPass {
    pass: DenoiserPass,
}

impl VarianceEstimationPass {
    pub fn new(_: &BufferDescriptor) -> Self {
        Self {
            pass: DenoiserPass::new("variance_estimation"),
        }
    }

    pub fn run(&self, config: &DenoiserConfig, buffers: &mut DenoiserBuffers) {
        let params = config.variance_estimation_params();

        let estimator = VarianceEstimator {
            surface_map: DepthNormalMap::new(buffers.depth_normal.view()),
            illumination: buffers.illumination.view(),
            moments: buffers.moments.front().view(),
            history_length: buffers.history_length.front().view(),
        };

        self.pass.run(buffers.ping_pong.back_mut(), |screen_pos| {
            estimator.run(screen_pos, &params)
        });

        buffers.ping_pong.flip();
    }
}
