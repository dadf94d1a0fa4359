use glam::Vec4Swizzles;
use umbra_kernels::Compositor;

use crate::denoiser::{DenoiserBuffers, DenoiserPass};
use crate::{BufferDescriptor, FrameInputs, Texture};

/// Writes the filtered signal into the output buffer, remodulating it first
/// if the descriptor names a material.
#[derive(Debug)]
pub struct CompositionPass {
    pass: DenoiserPass,
}

impl CompositionPass {
    pub fn new(descriptor: &BufferDescriptor) -> Self {
        let label = if descriptor.is_color() {
            "composition"
        } else {
            "output"
        };

        Self {
            pass: DenoiserPass::new(label),
        }
    }

    pub fn run(
        &self,
        inputs: &FrameInputs,
        buffers: &DenoiserBuffers,
        output: &mut Texture,
    ) {
        let illumination = buffers.ping_pong.front().view();
        let samples = inputs.signal.view();

        if let Some(material) = inputs.material() {
            let compositor = Compositor {
                illumination,
                material,
                samples,
            };

            self.pass.run(output, |screen_pos| compositor.run(screen_pos));
        } else {
            self.pass.run(output, |screen_pos| {
                illumination
                    .read(screen_pos)
                    .xyz()
                    .extend(samples.read(screen_pos).w)
            });
        }
    }
}
