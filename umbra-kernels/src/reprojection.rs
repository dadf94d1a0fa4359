use glam::{vec2, IVec2, UVec2, Vec2};

use crate::{BilinearFilter, DepthNormal, DepthNormalMap};

/// Position of a pixel in the previous frame, together with the bilinear
/// taps that were found to describe the same surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Reprojection {
    pub prev_x: f32,
    pub prev_y: f32,

    /// Bitmask of valid taps, in the order of
    /// [`BilinearFilter::reprojection_coords()`].
    pub validity: u32,
}

impl Reprojection {
    /// Follows the motion vector of a pixel back into the previous frame and
    /// checks which of the surrounding taps are geometrically consistent with
    /// the current surface.
    ///
    /// Motion vectors are expressed in pixels, so that
    /// `prev_pos = screen_pos - motion`.
    pub fn find(
        screen_pos: UVec2,
        motion: Vec2,
        surface: DepthNormal,
        prev_surface_map: DepthNormalMap,
    ) -> Self {
        if surface.is_background() {
            return Default::default();
        }

        let prev_pos = screen_pos.as_vec2() - motion;
        let size = prev_surface_map.size().as_vec2();

        // Anything strictly within one pixel of the screen still has a tap
        // on it; written in this form so that NaNs get rejected as well
        let is_inside = prev_pos.x > -1.0
            && prev_pos.y > -1.0
            && prev_pos.x < size.x
            && prev_pos.y < size.y;

        if !is_inside {
            return Default::default();
        }

        let mut validity = 0;

        for (nth, tap) in BilinearFilter::reprojection_coords(prev_pos)
            .into_iter()
            .enumerate()
        {
            if !prev_surface_map.contains(tap) {
                continue;
            }

            let prev_surface = prev_surface_map.get(tap.as_uvec2());

            if surface.is_reprojection_of(&prev_surface) {
                validity |= 1 << nth;
            }
        }

        Self {
            prev_x: prev_pos.x,
            prev_y: prev_pos.y,
            validity,
        }
    }

    pub fn is_some(&self) -> bool {
        self.validity != 0
    }

    pub fn is_none(&self) -> bool {
        !self.is_some()
    }

    pub fn is_tap_valid(&self, nth: usize) -> bool {
        self.validity & (1 << nth) > 0
    }

    pub fn prev_pos(&self) -> Vec2 {
        vec2(self.prev_x, self.prev_y)
    }

    pub fn prev_pos_floor(&self) -> IVec2 {
        self.prev_pos().floor().as_ivec2()
    }

    pub fn prev_pos_fract(&self) -> Vec2 {
        self.prev_pos() - self.prev_pos().floor()
    }
}
