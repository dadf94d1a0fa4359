use glam::{vec2, UVec2, Vec2, Vec3, Vec4, Vec4Swizzles};

use crate::{
    lerp, BilinearFilter, DepthNormalMap, F32Ext, Material, Reprojection,
    ReprojectionPassParams, Tex, Vec3Ext,
};

/// Blends the current, noisy sample with whatever the pixel saw in the
/// previous frame, accumulating luminance moments and history length along
/// the way.
#[derive(Clone, Copy, Debug)]
pub struct Reprojector<'a> {
    pub samples: Tex<'a>,
    pub surface_map: DepthNormalMap<'a>,
    pub motion_vectors: Tex<'a>,
    pub prev_surface_map: DepthNormalMap<'a>,
    pub prev_illumination: Tex<'a>,
    pub prev_moments: Tex<'a>,
    pub prev_history_length: Tex<'a>,

    /// When present, samples are treated as final colors and get demodulated
    /// before being accumulated.
    pub material: Option<Material<'a>>,
}

impl<'a> Reprojector<'a> {
    pub fn run(
        &self,
        screen_pos: UVec2,
        params: &ReprojectionPassParams,
    ) -> ReprojectedSample {
        let sample = self.samples.read(screen_pos).xyz();

        let illumination = if let Some(material) = &self.material {
            material.demodulate(screen_pos, sample)
        } else {
            sample
        };

        let luma = illumination.luma();
        let moments = vec2(luma, luma.sqr());

        let reprojection = Reprojection::find(
            screen_pos,
            self.motion_vectors.read(screen_pos).xy(),
            self.surface_map.get(screen_pos),
            self.prev_surface_map,
        );

        if reprojection.is_none() {
            return ReprojectedSample {
                illumination,
                moments,
                history_length: 1.0,
            };
        }

        let prev_illumination =
            BilinearFilter::reproject(reprojection, |pos| {
                self.prev_illumination.read(pos)
            })
            .xyz();

        let prev_moments = BilinearFilter::reproject(reprojection, |pos| {
            self.prev_moments.read(pos)
        })
        .xy();

        // History length is a counter, so instead of interpolating it we just
        // pick it from the closest valid tap
        let prev_history_length = {
            let filter =
                BilinearFilter::from_reprojection(reprojection, |pos| {
                    self.prev_history_length.read(pos)
                });

            filter
                .dominant_tap(reprojection.prev_pos_fract())
                .map_or(0.0, |nth| filter.sample(nth).x)
        };

        ReprojectedSample {
            illumination: lerp(prev_illumination, illumination, params.alpha),
            moments: lerp(prev_moments, moments, params.moments_alpha),
            history_length: prev_history_length + 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReprojectedSample {
    pub illumination: Vec3,
    pub moments: Vec2,
    pub history_length: f32,
}

impl ReprojectedSample {
    /// Returns temporal variance of this sample's luminance.
    pub fn variance(&self) -> f32 {
        (self.moments.y - self.moments.x.sqr()).max(0.0)
    }

    /// Packs illumination as `[rgb, variance]`.
    pub fn packed_illumination(&self) -> Vec4 {
        self.illumination.extend(self.variance())
    }

    /// Packs moments as `[first, second, 0, 0]`.
    pub fn packed_moments(&self) -> Vec4 {
        Vec4::new(self.moments.x, self.moments.y, 0.0, 0.0)
    }

    pub fn packed_history_length(&self) -> Vec4 {
        Vec4::new(self.history_length, 0.0, 0.0, 0.0)
    }
}
