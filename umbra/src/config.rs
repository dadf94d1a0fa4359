use std::ops::RangeInclusive;

use umbra_kernels::{
    AtrousPassParams, ReprojectionPassParams, VarianceEstimationPassParams,
};

/// Parameters of the filter, adjustable at runtime through
/// [`crate::Denoiser::set_config()`].
///
/// Out-of-range values are clamped, non-finite ones are replaced with the
/// defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DenoiserConfig {
    /// When disabled, the noisy signal is copied into the output as-is.
    pub enabled: bool,

    /// Number of à-trous iterations.
    pub iterations: u32,

    /// Index of the à-trous iteration whose output becomes the next frame's
    /// history; `-1` stores the unfiltered, temporally accumulated signal.
    pub feedback_tap: i32,

    /// Luminance edge-stopping strength; the larger, the more the filter
    /// blurs across luminance differences.
    pub phi_color: f32,

    /// Normal edge-stopping strength; the larger, the less the filter blurs
    /// across differently oriented surfaces.
    pub phi_normal: f32,

    /// Weight of the current frame when blending it with the history
    /// (0 = full reuse, 1 = no reuse).
    pub alpha: f32,

    /// Same as `alpha`, but for the luminance moments.
    pub moments_alpha: f32,
}

impl DenoiserConfig {
    pub const ITERATIONS: RangeInclusive<u32> = 2..=10;
    pub const PHI_COLOR: RangeInclusive<f32> = 0.0..=10000.0;
    pub const PHI_NORMAL: RangeInclusive<f32> = 0.001..=1000.0;
    pub const ALPHA: RangeInclusive<f32> = 0.0..=1.0;

    /// Returns the range of feedback taps valid for given iteration count.
    pub fn feedback_taps(iterations: u32) -> RangeInclusive<i32> {
        -1..=(iterations as i32 - 2)
    }

    /// Returns a copy of this config with every parameter brought into its
    /// valid range.
    pub fn clamped(self) -> Self {
        let default = Self::default();

        let iterations = self
            .iterations
            .clamp(*Self::ITERATIONS.start(), *Self::ITERATIONS.end());

        let feedback_tap = {
            let taps = Self::feedback_taps(iterations);

            self.feedback_tap.clamp(*taps.start(), *taps.end())
        };

        Self {
            enabled: self.enabled,
            iterations,
            feedback_tap,
            phi_color: clamp_f32(
                self.phi_color,
                Self::PHI_COLOR,
                default.phi_color,
            ),
            phi_normal: clamp_f32(
                self.phi_normal,
                Self::PHI_NORMAL,
                default.phi_normal,
            ),
            alpha: clamp_f32(self.alpha, Self::ALPHA, default.alpha),
            moments_alpha: clamp_f32(
                self.moments_alpha,
                Self::ALPHA,
                default.moments_alpha,
            ),
        }
    }

    /// Describes every parameter, e.g. for building a control panel.
    pub fn schema(&self) -> ConfigSchema {
        let default = Self::default();
        let feedback_taps = Self::feedback_taps(self.iterations);

        ConfigSchema {
            params: vec![
                ConfigParam {
                    name: "enabled",
                    label: "Enabled",
                    kind: ConfigParamKind::Toggle {
                        default: default.enabled,
                    },
                },
                ConfigParam {
                    name: "iterations",
                    label: "Iterations",
                    kind: ConfigParamKind::Int {
                        min: *Self::ITERATIONS.start() as i32,
                        max: *Self::ITERATIONS.end() as i32,
                        step: 1,
                        default: default.iterations as i32,
                    },
                },
                ConfigParam {
                    name: "feedback_tap",
                    label: "Feedback tap",
                    kind: ConfigParamKind::Int {
                        min: *feedback_taps.start(),
                        max: *feedback_taps.end(),
                        step: 1,
                        default: default.feedback_tap,
                    },
                },
                ConfigParam {
                    name: "phi_color",
                    label: "Color phi",
                    kind: ConfigParamKind::Float {
                        min: *Self::PHI_COLOR.start(),
                        max: *Self::PHI_COLOR.end(),
                        step: 0.01,
                        default: default.phi_color,
                    },
                },
                ConfigParam {
                    name: "phi_normal",
                    label: "Normal phi",
                    kind: ConfigParamKind::Float {
                        min: *Self::PHI_NORMAL.start(),
                        max: *Self::PHI_NORMAL.end(),
                        step: 0.2,
                        default: default.phi_normal,
                    },
                },
                ConfigParam {
                    name: "alpha",
                    label: "Alpha",
                    kind: ConfigParamKind::Float {
                        min: *Self::ALPHA.start(),
                        max: *Self::ALPHA.end(),
                        step: 0.001,
                        default: default.alpha,
                    },
                },
                ConfigParam {
                    name: "moments_alpha",
                    label: "Moments alpha",
                    kind: ConfigParamKind::Float {
                        min: *Self::ALPHA.start(),
                        max: *Self::ALPHA.end(),
                        step: 0.001,
                        default: default.moments_alpha,
                    },
                },
            ],
        }
    }

    pub(crate) fn reprojection_params(&self) -> ReprojectionPassParams {
        ReprojectionPassParams {
            alpha: self.alpha,
            moments_alpha: self.moments_alpha,
        }
    }

    pub(crate) fn variance_estimation_params(
        &self,
    ) -> VarianceEstimationPassParams {
        VarianceEstimationPassParams {
            phi_color: self.phi_color,
            phi_normal: self.phi_normal,
        }
    }

    pub(crate) fn atrous_params(&self, iteration: u32) -> AtrousPassParams {
        AtrousPassParams {
            step_size: 1 << iteration,
            phi_color: self.phi_color,
            phi_normal: self.phi_normal,
        }
    }
}

impl Default for DenoiserConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            iterations: 4,
            feedback_tap: 1,
            phi_color: 10.0,
            phi_normal: 128.0,
            alpha: 0.05,
            moments_alpha: 0.2,
        }
    }
}

fn clamp_f32(value: f32, range: RangeInclusive<f32>, default: f32) -> f32 {
    if value.is_nan() {
        default
    } else {
        value.clamp(*range.start(), *range.end())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConfigSchema {
    pub params: Vec<ConfigParam>,
}

impl ConfigSchema {
    pub fn get(&self, name: &str) -> Option<&ConfigParam> {
        self.params.iter().find(|param| param.name == name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConfigParam {
    /// Name of the corresponding [`DenoiserConfig`] field.
    pub name: &'static str,
    pub label: &'static str,
    pub kind: ConfigParamKind,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigParamKind {
    Toggle {
        default: bool,
    },
    Int {
        min: i32,
        max: i32,
        step: i32,
        default: i32,
    },
    Float {
        min: f32,
        max: f32,
        step: f32,
        default: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let target = DenoiserConfig::default();

        assert_eq!(target, target.clamped());
        assert!(target.feedback_tap <= target.iterations as i32 - 2);

        // Two iterations would leave no room for the default feedback tap
        let target = DenoiserConfig {
            iterations: 2,
            ..Default::default()
        };

        assert_eq!(0, target.clamped().feedback_tap);
    }

    #[test]
    fn clamping() {
        let target = DenoiserConfig {
            enabled: false,
            iterations: 50,
            feedback_tap: 20,
            phi_color: -3.0,
            phi_normal: 0.0,
            alpha: 1.5,
            moments_alpha: f32::NAN,
        }
        .clamped();

        assert!(!target.enabled);
        assert_eq!(10, target.iterations);
        assert_eq!(8, target.feedback_tap);
        assert_eq!(0.0, target.phi_color);
        assert_eq!(0.001, target.phi_normal);
        assert_eq!(1.0, target.alpha);
        assert_eq!(0.2, target.moments_alpha);

        let target = DenoiserConfig {
            iterations: 0,
            feedback_tap: -7,
            ..Default::default()
        }
        .clamped();

        assert_eq!(2, target.iterations);
        assert_eq!(-1, target.feedback_tap);
    }

    #[test]
    fn feedback_tap_follows_iterations() {
        let target = DenoiserConfig {
            iterations: 3,
            feedback_tap: 3,
            ..Default::default()
        }
        .clamped();

        assert_eq!(1, target.feedback_tap);
    }

    #[test]
    fn schema() {
        let config = DenoiserConfig {
            iterations: 6,
            ..Default::default()
        };

        let schema = config.schema();

        assert_eq!(7, schema.params.len());

        assert_eq!(
            Some(ConfigParamKind::Int {
                min: -1,
                max: 4,
                step: 1,
                default: 1,
            }),
            schema.get("feedback_tap").map(|param| param.kind)
        );

        assert_eq!(
            Some(ConfigParamKind::Float {
                min: 0.001,
                max: 1000.0,
                step: 0.2,
                default: 128.0,
            }),
            schema.get("phi_normal").map(|param| param.kind)
        );

        assert!(schema.get("unknown").is_none());
    }

    #[test]
    fn atrous_step_sizes() {
        let target = DenoiserConfig::default();

        assert_eq!(1, target.atrous_params(0).step_size);
        assert_eq!(2, target.atrous_params(1).step_size);
        assert_eq!(16, target.atrous_params(4).step_size);
    }
}
