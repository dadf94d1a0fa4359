use crate::{DepthNormal, F32Ext, UMBRA_EPSILON};

/// Weights a filter tap by how similar it is to the center pixel, so that the
/// spatial filters don't blur across geometric edges or strong luminance
/// discontinuities.
#[derive(Clone, Copy, Debug)]
pub struct EdgeStopping {
    /// Exponent applied on the normals' cosine; larger values make the filter
    /// stop earlier on curved surfaces.
    pub phi_normal: f32,

    /// Tolerated luminance difference; already scaled by the standard
    /// deviation by the à-trous filter.
    pub phi_luma: f32,
}

impl EdgeStopping {
    /// Evaluates weight of a tap laying `distance` pixels away from the center
    /// (already multiplied by the filter's step size).
    pub fn eval(
        &self,
        center: &DepthNormal,
        center_luma: f32,
        sample: &DepthNormal,
        sample_luma: f32,
        distance: f32,
    ) -> f32 {
        let phi_depth = center.depth_deriv.max(1e-8) * distance;

        let depth_weight =
            (center.depth - sample.depth).abs() / (phi_depth + UMBRA_EPSILON);

        let luma_weight = (center_luma - sample_luma).abs()
            / (self.phi_luma.max(0.0) + UMBRA_EPSILON);

        let normal_weight = center
            .normal
            .dot(sample.normal)
            .saturate()
            .powf(self.phi_normal);

        (-depth_weight - luma_weight).exp() * normal_weight
    }
}
