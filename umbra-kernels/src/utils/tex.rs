use glam::{uvec2, IVec2, UVec2, Vec4};

/// Read-only view of a screen-space RGBA32F buffer.
#[derive(Clone, Copy, Debug)]
pub struct Tex<'a> {
    size: UVec2,
    data: &'a [Vec4],
}

impl<'a> Tex<'a> {
    pub fn new(size: UVec2, data: &'a [Vec4]) -> Self {
        assert_eq!(
            data.len(),
            (size.x as usize) * (size.y as usize),
            "texture data doesn't match its size"
        );

        Self { size, data }
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    /// Returns whether given point lays inside the texture.
    pub fn contains(&self, pos: IVec2) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && pos.x < (self.size.x as i32)
            && pos.y < (self.size.y as i32)
    }

    pub fn read(&self, pos: UVec2) -> Vec4 {
        self.data[screen_to_idx(self.size, pos)]
    }
}

/// Given a point in screen-coordinates, returns a unique index for it; used
/// to index screen-space buffers.
pub fn screen_to_idx(size: UVec2, pos: UVec2) -> usize {
    (pos.y as usize) * (size.x as usize) + (pos.x as usize)
}

/// See: [`screen_to_idx()`].
pub fn idx_to_screen(size: UVec2, idx: usize) -> UVec2 {
    let width = size.x as usize;

    uvec2((idx % width) as u32, (idx / width) as u32)
}
