use glam::{ivec2, UVec2, Vec2, Vec4, Vec4Swizzles};

use crate::{
    DepthNormalMap, EdgeStopping, F32Ext, Tex, Vec3Ext,
    VarianceEstimationPassParams, HISTORY_THRESHOLD, MIN_WEIGHT_SUM,
    VARIANCE_ESTIMATION_RADIUS,
};

/// Replaces temporal variance with a spatial estimate for pixels whose
/// history is too short for the temporal one to be meaningful.
#[derive(Clone, Copy, Debug)]
pub struct VarianceEstimator<'a> {
    pub surface_map: DepthNormalMap<'a>,
    pub illumination: Tex<'a>,
    pub moments: Tex<'a>,
    pub history_length: Tex<'a>,
}

impl<'a> VarianceEstimator<'a> {
    pub fn run(
        &self,
        screen_pos: UVec2,
        params: &VarianceEstimationPassParams,
    ) -> Vec4 {
        let center = self.illumination.read(screen_pos);
        let center_surface = self.surface_map.get(screen_pos);

        if center_surface.is_background()
            || self.history_length.read(screen_pos).x >= HISTORY_THRESHOLD
        {
            return center;
        }

        let center_luma = center.xyz().luma();

        let edge_stopping = EdgeStopping {
            phi_normal: params.phi_normal,
            phi_luma: params.phi_color,
        };

        let mut sum_weights = 0.0;
        let mut sum_moments = Vec2::ZERO;

        for dy in -VARIANCE_ESTIMATION_RADIUS..=VARIANCE_ESTIMATION_RADIUS {
            for dx in -VARIANCE_ESTIMATION_RADIUS..=VARIANCE_ESTIMATION_RADIUS {
                let offset = ivec2(dx, dy);
                let sample_pos = screen_pos.as_ivec2() + offset;

                if !self.illumination.contains(sample_pos) {
                    continue;
                }

                let sample_pos = sample_pos.as_uvec2();
                let sample_surface = self.surface_map.get(sample_pos);

                if sample_surface.is_background() {
                    continue;
                }

                let sample_luma =
                    self.illumination.read(sample_pos).xyz().luma();

                let weight = edge_stopping.eval(
                    &center_surface,
                    center_luma,
                    &sample_surface,
                    sample_luma,
                    offset.as_vec2().length(),
                );

                sum_weights += weight;
                sum_moments += self.moments.read(sample_pos).xy() * weight;
            }
        }

        let moments = sum_moments / sum_weights.max(MIN_WEIGHT_SUM);
        let variance = (moments.y - moments.x.sqr()).max(0.0);

        center.xyz().extend(variance)
    }
}
