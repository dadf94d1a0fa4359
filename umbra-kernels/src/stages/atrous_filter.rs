use glam::{ivec2, UVec2, Vec3, Vec4, Vec4Swizzles};

use crate::{
    AtrousPassParams, DepthNormalMap, EdgeStopping, F32Ext, Tex, Vec3Ext,
    ATROUS_KERNEL, MIN_WEIGHT_SUM,
};

/// Single iteration of the edge-avoiding à-trous wavelet filter.
///
/// Reads illumination as `[rgb, variance]` and produces the same layout,
/// with variance propagated through the squared filter weights so that the
/// next iteration knows how much noise is left.
#[derive(Clone, Copy, Debug)]
pub struct AtrousFilter<'a> {
    pub surface_map: DepthNormalMap<'a>,
    pub input: Tex<'a>,
}

impl<'a> AtrousFilter<'a> {
    pub fn run(&self, screen_pos: UVec2, params: &AtrousPassParams) -> Vec4 {
        let center = self.input.read(screen_pos);
        let center_surface = self.surface_map.get(screen_pos);

        if center_surface.is_background() {
            return center;
        }

        let center_luma = center.xyz().luma();

        let edge_stopping = EdgeStopping {
            phi_normal: params.phi_normal,
            phi_luma: params.phi_color
                * self.blurred_variance(screen_pos).max(0.0).sqrt(),
        };

        let step_size = params.step_size.max(1) as i32;

        let mut sum_weights = 0.0;
        let mut sum_illumination = Vec3::ZERO;
        let mut sum_variance = 0.0;

        for dy in -2..=2 {
            for dx in -2..=2 {
                let offset = ivec2(dx, dy) * step_size;
                let sample_pos = screen_pos.as_ivec2() + offset;

                if !self.input.contains(sample_pos) {
                    continue;
                }

                let sample_pos = sample_pos.as_uvec2();
                let sample_surface = self.surface_map.get(sample_pos);

                if sample_surface.is_background() {
                    continue;
                }

                let sample = self.input.read(sample_pos);

                let kernel = ATROUS_KERNEL[dx.unsigned_abs() as usize]
                    * ATROUS_KERNEL[dy.unsigned_abs() as usize];

                let weight = kernel
                    * edge_stopping.eval(
                        &center_surface,
                        center_luma,
                        &sample_surface,
                        sample.xyz().luma(),
                        offset.as_vec2().length(),
                    );

                sum_weights += weight;
                sum_illumination += sample.xyz() * weight;
                sum_variance += weight.sqr() * sample.w;
            }
        }

        if sum_weights < MIN_WEIGHT_SUM {
            return center;
        }

        (sum_illumination / sum_weights)
            .extend(sum_variance / sum_weights.sqr())
    }

    /// Returns the center pixel's variance, prefiltered with a 3x3 gaussian
    /// to make the luminance edge-stopping less sensitive to outliers.
    fn blurred_variance(&self, screen_pos: UVec2) -> f32 {
        const KERNEL: [f32; 3] = [1.0 / 4.0, 1.0 / 8.0, 1.0 / 16.0];

        let mut sum = 0.0;

        for dy in -1..=1 {
            for dx in -1..=1 {
                let sample_pos = screen_pos.as_ivec2() + ivec2(dx, dy);

                if !self.input.contains(sample_pos) {
                    continue;
                }

                let weight = KERNEL[(dx.abs() + dy.abs()) as usize];

                sum += self.input.read(sample_pos.as_uvec2()).w * weight;
            }
        }

        sum
    }
}
