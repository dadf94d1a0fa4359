use glam::{UVec2, Vec4, Vec4Swizzles};

use crate::{Material, Tex};

/// Multiplies the filtered illumination back by the surface's albedo.
#[derive(Clone, Copy, Debug)]
pub struct Compositor<'a> {
    pub illumination: Tex<'a>,
    pub material: Material<'a>,

    /// Noisy input; its alpha gets carried over into the output.
    pub samples: Tex<'a>,
}

impl<'a> Compositor<'a> {
    pub fn run(&self, screen_pos: UVec2) -> Vec4 {
        let illumination = self.illumination.read(screen_pos).xyz();

        self.material
            .remodulate(screen_pos, illumination)
            .extend(self.samples.read(screen_pos).w)
    }
}

#[cfg(test)]
mod tests {
    use glam::{uvec2, vec3, vec4};

    use super::*;

    #[test]
    fn remodulation() {
        let size = uvec2(2, 1);
        let illumination = vec![vec4(1.0, 2.0, 0.5, 9.0); 2];
        let albedo = vec![vec4(0.5, 0.25, 1.0, 1.0); 2];
        let emission = vec![vec4(0.1, 0.2, 0.3, 0.0); 2];
        let samples = vec![vec4(0.0, 0.0, 0.0, 0.75); 2];

        let target = Compositor {
            illumination: Tex::new(size, &illumination),
            material: Material {
                albedo: Tex::new(size, &albedo),
                emission: Tex::new(size, &emission),
            },
            samples: Tex::new(size, &samples),
        };

        let actual = target.run(uvec2(1, 0));

        assert!(actual.xyz().abs_diff_eq(vec3(0.6, 0.7, 0.8), 1e-6));
        assert_eq!(0.75, actual.w);
    }
}
