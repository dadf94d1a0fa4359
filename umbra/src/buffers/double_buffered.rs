use glam::UVec2;

use crate::Texture;

/// Two equally-shaped buffers: the front one, holding the most recently
/// written data, and the back one, being written to.
///
/// Instead of swapping the buffers around, we just flip an index.
#[derive(Debug)]
pub struct DoubleBuffered<T> {
    a: T,
    b: T,
    flipped: bool,
}

impl DoubleBuffered<Texture> {
    /// Creates a double-buffered texture.
    ///
    /// See: [`Texture::new()`].
    pub fn new(label: impl AsRef<str>, size: UVec2) -> Self {
        let label = label.as_ref();

        Self::from_slots(
            Texture::new(format!("{label}_a"), size),
            Texture::new(format!("{label}_b"), size),
        )
    }

    pub fn clear(&mut self) {
        self.a.clear();
        self.b.clear();
        self.flipped = false;
    }
}

impl<T> DoubleBuffered<T> {
    pub fn from_slots(a: T, b: T) -> Self {
        Self {
            a,
            b,
            flipped: false,
        }
    }

    pub fn front(&self) -> &T {
        if self.flipped {
            &self.b
        } else {
            &self.a
        }
    }

    pub fn back(&self) -> &T {
        if self.flipped {
            &self.a
        } else {
            &self.b
        }
    }

    pub fn back_mut(&mut self) -> &mut T {
        if self.flipped {
            &mut self.a
        } else {
            &mut self.b
        }
    }

    /// Returns the front buffer for reading and the back buffer for writing.
    pub fn split_mut(&mut self) -> (&T, &mut T) {
        if self.flipped {
            (&self.b, &mut self.a)
        } else {
            (&self.a, &mut self.b)
        }
    }

    /// Makes the back buffer the front one (and vice versa).
    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }
}
