use derivative::Derivative;
use glam::{UVec2, Vec4};
use log::debug;
use umbra_kernels::{idx_to_screen, screen_to_idx, Tex};

/// Screen-space RGBA32F buffer.
#[derive(Clone, Derivative)]
#[derivative(Debug)]
pub struct Texture {
    label: String,
    size: UVec2,
    #[derivative(Debug = "ignore")]
    data: Vec<Vec4>,
}

impl Texture {
    /// Creates a zero-initialized texture.
    pub fn new(label: impl AsRef<str>, size: UVec2) -> Self {
        Self::filled(label, size, Vec4::ZERO)
    }

    pub fn filled(label: impl AsRef<str>, size: UVec2, value: Vec4) -> Self {
        let label = label.as_ref();

        debug!("Allocating texture `{label}`; size={:?}", size);

        Self {
            label: label.to_owned(),
            size,
            data: vec![value; Self::len_of(size)],
        }
    }

    pub fn from_fn(
        label: impl AsRef<str>,
        size: UVec2,
        mut f: impl FnMut(UVec2) -> Vec4,
    ) -> Self {
        let data = (0..Self::len_of(size))
            .map(|idx| f(idx_to_screen(size, idx)))
            .collect();

        Self::from_pixels(label, size, data)
    }

    /// Creates a texture out of row-major pixels.
    ///
    /// # Panics
    ///
    /// Panics if `data` doesn't contain exactly `size.x * size.y` pixels.
    pub fn from_pixels(
        label: impl AsRef<str>,
        size: UVec2,
        data: Vec<Vec4>,
    ) -> Self {
        assert_eq!(
            data.len(),
            Self::len_of(size),
            "texture data doesn't match its size"
        );

        Self {
            label: label.as_ref().to_owned(),
            size,
            data,
        }
    }

    /// Creates a texture out of tightly-packed, row-major RGBA floats.
    ///
    /// # Panics
    ///
    /// Panics if `data` doesn't contain exactly `4 * size.x * size.y` floats.
    pub fn from_raw(label: impl AsRef<str>, size: UVec2, data: &[f32]) -> Self {
        assert_eq!(
            data.len(),
            4 * Self::len_of(size),
            "texture data doesn't match its size"
        );

        let data = data.chunks_exact(4).map(Vec4::from_slice).collect();

        Self::from_pixels(label, size, data)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn view(&self) -> Tex<'_> {
        Tex::new(self.size, &self.data)
    }

    pub fn read(&self, pos: UVec2) -> Vec4 {
        self.data[screen_to_idx(self.size, pos)]
    }

    pub fn write(&mut self, pos: UVec2, value: Vec4) {
        self.data[screen_to_idx(self.size, pos)] = value;
    }

    pub fn pixels(&self) -> &[Vec4] {
        &self.data
    }

    pub fn pixels_mut(&mut self) -> &mut [Vec4] {
        &mut self.data
    }

    /// Returns pixels as tightly-packed RGBA floats.
    pub fn as_raw(&self) -> &[f32] {
        bytemuck::cast_slice(&self.data)
    }

    /// Fills the entire texture with zeros.
    pub fn clear(&mut self) {
        self.data.fill(Vec4::ZERO);
    }

    /// Copies pixels of `other` into this texture, keeping this texture's
    /// label.
    ///
    /// # Panics
    ///
    /// Panics if both textures are of different sizes.
    pub fn copy_from(&mut self, other: &Self) {
        assert_eq!(
            self.size, other.size,
            "cannot copy `{}` into `{}`: sizes differ",
            other.label, self.label
        );

        self.data.copy_from_slice(&other.data);
    }

    fn len_of(size: UVec2) -> usize {
        (size.x as usize) * (size.y as usize)
    }
}
