use glam::{vec3, Vec3};

pub trait Vec3Ext
where
    Self: Sized,
{
    /// Returns luminance of this color-vector.
    fn luma(self) -> f32;

    /// Divides this color-vector by given albedo, leaving just the incoming
    /// illumination.
    fn demodulate(self, albedo: Self) -> Self;
}

impl Vec3Ext for Vec3 {
    fn luma(self) -> f32 {
        self.dot(vec3(0.2126, 0.7152, 0.0722))
    }

    fn demodulate(self, albedo: Self) -> Self {
        self / albedo.max(Vec3::splat(crate::MIN_ALBEDO))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn luma() {
        assert_relative_eq!(1.0, Vec3::ONE.luma(), epsilon = 1e-6);
        assert_relative_eq!(0.7152, vec3(0.0, 1.0, 0.0).luma());
        assert_eq!(0.0, Vec3::ZERO.luma());
    }

    #[test]
    fn demodulate() {
        let color = vec3(0.25, 0.5, 0.0);

        assert_eq!(
            vec3(0.5, 1.0, 0.0),
            color.demodulate(vec3(0.5, 0.5, 0.5))
        );

        // Black albedo must not produce infinities
        assert!(color.demodulate(Vec3::ZERO).is_finite());
    }
}
