use glam::{ivec2, vec4, IVec2, UVec2, Vec2, Vec4};

use crate::Reprojection;

#[derive(Clone, Copy, Debug)]
pub struct BilinearFilter {
    /// Sample at `f(x=0, y=0)`
    pub s00: Vec4,

    /// Sample at `f(x=1, y=0)`
    pub s10: Vec4,

    /// Sample at `f(x=0, y=1)`
    pub s01: Vec4,

    /// Sample at `f(x=1, y=1)`
    pub s11: Vec4,

    /// Weights for each sample (1.0 for valid taps, 0.0 for invalid ones)
    pub weights: Vec4,
}

impl BilinearFilter {
    /// Samples previous-frame data at the reprojected position, taking into
    /// account only the taps that were found to be valid.
    pub fn reproject(
        reprojection: Reprojection,
        sample: impl Fn(UVec2) -> Vec4,
    ) -> Vec4 {
        Self::from_reprojection(reprojection, sample)
            .eval(reprojection.prev_pos_fract())
    }

    pub fn from_reprojection(
        reprojection: Reprojection,
        sample: impl Fn(UVec2) -> Vec4,
    ) -> Self {
        let mut samples = [Vec4::ZERO; 4];
        let mut weights = [0.0f32; 4];

        let coords = Self::reprojection_coords(reprojection.prev_pos());

        for (nth, pos) in coords.into_iter().enumerate() {
            if reprojection.is_tap_valid(nth) {
                samples[nth] = sample(pos.as_uvec2());
                weights[nth] = 1.0;
            }
        }

        let [s00, s10, s01, s11] = samples;

        Self {
            s00,
            s10,
            s01,
            s11,
            weights: Vec4::from(weights),
        }
    }

    pub fn reprojection_coords(prev_pos: Vec2) -> [IVec2; 4] {
        let p00 = prev_pos.floor().as_ivec2();

        [
            p00,
            p00 + ivec2(1, 0),
            p00 + ivec2(0, 1),
            p00 + ivec2(1, 1),
        ]
    }

    /// Returns bilinear weights of each tap at given fractional position,
    /// already multiplied by the tap's validity.
    pub fn tap_weights(&self, uv: Vec2) -> Vec4 {
        self.weights
            * vec4(
                (1.0 - uv.x) * (1.0 - uv.y),
                uv.x * (1.0 - uv.y),
                (1.0 - uv.x) * uv.y,
                uv.x * uv.y,
            )
    }

    /// Returns index of the valid tap which contributes the most at given
    /// fractional position.
    pub fn dominant_tap(&self, uv: Vec2) -> Option<usize> {
        let weights = self.tap_weights(uv).to_array();
        let mut best: Option<usize> = None;

        for nth in 0..4 {
            if self.weights[nth] == 0.0 {
                continue;
            }

            if best.map_or(true, |best| weights[nth] > weights[best]) {
                best = Some(nth);
            }
        }

        best
    }

    pub fn sample(&self, nth: usize) -> Vec4 {
        [self.s00, self.s10, self.s01, self.s11][nth]
    }

    pub fn eval(&self, uv: Vec2) -> Vec4 {
        let weights = self.tap_weights(uv);
        let w_sum = weights.dot(Vec4::ONE);

        if w_sum > 0.0 {
            (self.s00 * weights.x
                + self.s10 * weights.y
                + self.s01 * weights.z
                + self.s11 * weights.w)
                / w_sum
        } else {
            // All the valid taps lay on the "far" side of the position (e.g.
            // we're exactly at a pixel's center, but that pixel got rejected);
            // fall back to averaging whatever's valid.
            let n = self.weights.dot(Vec4::ONE);

            if n == 0.0 {
                Default::default()
            } else {
                (self.s00 * self.weights.x
                    + self.s10 * self.weights.y
                    + self.s01 * self.weights.z
                    + self.s11 * self.weights.w)
                    / n
            }
        }
    }
}
