use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ReprojectionPassParams {
    /// Weight given to the new sample when blending it with the history.
    pub alpha: f32,

    /// Same as `alpha`, but for the luminance moments.
    pub moments_alpha: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct VarianceEstimationPassParams {
    pub phi_color: f32,
    pub phi_normal: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct AtrousPassParams {
    /// Distance between taps, `2^iteration`.
    pub step_size: u32,
    pub phi_color: f32,
    pub phi_normal: f32,
}
