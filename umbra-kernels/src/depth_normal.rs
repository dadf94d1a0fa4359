use glam::{
    vec2, IVec2, UVec2, Vec2, Vec2Swizzles, Vec3, Vec3Swizzles, Vec4,
    Vec4Swizzles,
};

use crate::{Tex, DEPTH_THRESHOLD, NORMAL_THRESHOLD, UMBRA_EPSILON};

/// Geometry of a single pixel, as seen by the denoiser: linear depth, its
/// screen-space derivative and the surface normal.
///
/// Packed into a single RGBA texel as `[depth, depth_deriv, oct(normal)]`,
/// where `oct` maps the unit sphere onto `[0, 1]²` through an octahedron.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DepthNormal {
    pub depth: f32,
    pub depth_deriv: f32,
    pub normal: Vec3,
}

impl DepthNormal {
    pub fn new(depth: f32, depth_deriv: f32, normal: Vec3) -> Self {
        Self {
            depth,
            depth_deriv,
            normal,
        }
    }

    pub fn unpack(texel: Vec4) -> Self {
        Self {
            depth: texel.x,
            depth_deriv: texel.y,
            normal: oct_decode(texel.zw()),
        }
    }

    pub fn pack(self) -> Vec4 {
        let normal = oct_encode(self.normal);

        Vec4::new(self.depth, self.depth_deriv, normal.x, normal.y)
    }

    /// Returns whether there's no geometry at this pixel (e.g. it's sky or
    /// it comes from a zero-cleared buffer).
    pub fn is_background(&self) -> bool {
        self.depth <= 0.0
    }

    /// Returns the largest depth difference a reprojected sample can have and
    /// still be considered the same surface.
    pub fn depth_tolerance(depth_deriv: f32) -> f32 {
        DEPTH_THRESHOLD * (depth_deriv + UMBRA_EPSILON)
    }

    /// Returns whether `prev` (coming from the previous frame) describes the
    /// same surface as `self`.
    pub fn is_reprojection_of(&self, prev: &Self) -> bool {
        if self.is_background() || prev.is_background() {
            return false;
        }

        let depth_diff = (self.depth - prev.depth).abs();

        depth_diff <= Self::depth_tolerance(self.depth_deriv)
            && self.normal.dot(prev.normal) > NORMAL_THRESHOLD
    }
}

fn oct_encode(normal: Vec3) -> Vec2 {
    // Zero-length normals (e.g. sky) land in the middle of the +Z face
    let normal = normal / normal.abs().dot(Vec3::ONE).max(f32::MIN_POSITIVE);

    let folded = if normal.z < 0.0 {
        (Vec2::ONE - normal.yx().abs()) * sign_not_zero(normal.xy())
    } else {
        normal.xy()
    };

    folded * 0.5 + 0.5
}

fn oct_decode(texel: Vec2) -> Vec3 {
    let texel = texel * 2.0 - 1.0;
    let z = 1.0 - texel.x.abs() - texel.y.abs();

    let unfolded = if z < 0.0 {
        (Vec2::ONE - texel.yx().abs()) * sign_not_zero(texel)
    } else {
        texel
    };

    unfolded.extend(z).normalize()
}

fn sign_not_zero(v: Vec2) -> Vec2 {
    vec2(1.0f32.copysign(v.x), 1.0f32.copysign(v.y))
}

#[derive(Clone, Copy, Debug)]
pub struct DepthNormalMap<'a> {
    tex: Tex<'a>,
}

impl<'a> DepthNormalMap<'a> {
    pub fn new(tex: Tex<'a>) -> Self {
        Self { tex }
    }

    pub fn size(&self) -> UVec2 {
        self.tex.size()
    }

    pub fn contains(&self, pos: IVec2) -> bool {
        self.tex.contains(pos)
    }

    pub fn get(&self, pos: UVec2) -> DepthNormal {
        DepthNormal::unpack(self.tex.read(pos))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::vec3;

    use super::*;

    const EPSILON: f32 = 0.001;

    #[test]
    fn serialization() {
        let target = DepthNormal {
            depth: 123.456,
            depth_deriv: 0.25,
            normal: vec3(0.26, 0.53, 0.80).normalize(),
        };

        let actual = DepthNormal::unpack(target.pack());

        assert_eq!(target.depth, actual.depth);
        assert_eq!(target.depth_deriv, actual.depth_deriv);
        assert_relative_eq!(target.normal.x, actual.normal.x, epsilon = EPSILON);
        assert_relative_eq!(target.normal.y, actual.normal.y, epsilon = EPSILON);
        assert_relative_eq!(target.normal.z, actual.normal.z, epsilon = EPSILON);
    }

    #[test]
    fn normal_encoding() {
        let normals = [
            Vec3::X,
            Vec3::NEG_X,
            Vec3::Y,
            Vec3::NEG_Y,
            Vec3::Z,
            Vec3::NEG_Z,
            vec3(0.26, 0.53, 0.80).normalize(),
            vec3(-0.3, 0.1, -0.9).normalize(),
            vec3(0.7, -0.7, -0.1).normalize(),
        ];

        for normal in normals {
            let actual = oct_decode(oct_encode(normal));

            assert_relative_eq!(normal.x, actual.x, epsilon = 1e-5);
            assert_relative_eq!(normal.y, actual.y, epsilon = 1e-5);
            assert_relative_eq!(normal.z, actual.z, epsilon = 1e-5);
        }
    }

    #[test]
    fn degenerate_normals_stay_finite() {
        assert!(oct_decode(Vec2::ZERO).is_finite());
        assert!(oct_encode(Vec3::ZERO).is_finite());
        assert!(DepthNormal::default().pack().is_finite());
    }

    #[test]
    fn background() {
        assert!(DepthNormal::default().is_background());
        assert!(DepthNormal::unpack(Vec4::ZERO).is_background());
        assert!(!DepthNormal::new(0.1, 0.0, Vec3::Z).is_background());
    }

    #[test]
    fn reprojection_depth_boundary() {
        let depth_deriv = 0.5;
        let tolerance = DepthNormal::depth_tolerance(depth_deriv);
        let curr = DepthNormal::new(20.0, depth_deriv, Vec3::Z);

        let inside = DepthNormal::new(20.0 + tolerance * 0.999, 0.0, Vec3::Z);
        let outside = DepthNormal::new(20.0 + tolerance * 1.001, 0.0, Vec3::Z);

        assert!(curr.is_reprojection_of(&inside));
        assert!(!curr.is_reprojection_of(&outside));

        let inside = DepthNormal::new(20.0 - tolerance * 0.999, 0.0, Vec3::Z);
        let outside = DepthNormal::new(20.0 - tolerance * 1.001, 0.0, Vec3::Z);

        assert!(curr.is_reprojection_of(&inside));
        assert!(!curr.is_reprojection_of(&outside));
    }

    #[test]
    fn reprojection_normal_mismatch() {
        let curr = DepthNormal::new(5.0, 0.1, Vec3::Z);
        let prev = DepthNormal::new(5.0, 0.1, vec3(1.0, 0.0, 1.0).normalize());

        assert!(!curr.is_reprojection_of(&prev));
    }

    #[test]
    fn reprojection_of_cleared_history() {
        let curr = DepthNormal::new(0.001, 0.0, Vec3::Z);

        assert!(!curr.is_reprojection_of(&DepthNormal::unpack(Vec4::ZERO)));
    }
}
