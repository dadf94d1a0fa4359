use umbra_kernels::{AtrousFilter, DepthNormalMap};

use crate::denoiser::{DenoiserBuffers, DenoiserPass};
use crate::{BufferDescriptor, DenoiserConfig};

#[derive(Debug)]
pub struct AtrousPass {
    passes: Vec<DenoiserPass>,
}

impl AtrousPass {
    pub fn new(_: &BufferDescriptor) -> Self {
        let passes = (0..*DenoiserConfig::ITERATIONS.end())
            .map(|nth| DenoiserPass::new(format!("atrous_{nth}")))
            .collect();

        Self { passes }
    }

    /// Runs all the à-trous iterations, starting from the front ping-pong
    /// buffer; the final result lands in the front buffer as well.
    ///
    /// Along the way, the output of the feedback-tap iteration is stored into
    /// `filtered_past`.
    pub fn run(&self, config: &DenoiserConfig, buffers: &mut DenoiserBuffers) {
        let surface_map = DepthNormalMap::new(buffers.depth_normal.view());

        if config.feedback_tap < 0 {
            buffers.filtered_past.copy_from(&buffers.illumination);
        }

        for (iteration, pass) in self
            .passes
            .iter()
            .take(config.iterations as usize)
            .enumerate()
        {
            let params = config.atrous_params(iteration as u32);
            let (input, output) = buffers.ping_pong.split_mut();

            let filter = AtrousFilter {
                surface_map,
                input: input.view(),
            };

            pass.run(output, |screen_pos| filter.run(screen_pos, &params));

            buffers.ping_pong.flip();

            if config.feedback_tap == iteration as i32 {
                buffers.filtered_past.copy_from(buffers.ping_pong.front());
            }
        }
    }
}
