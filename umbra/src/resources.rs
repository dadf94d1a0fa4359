use fxhash::FxHashMap;

use crate::Texture;

/// Named buffers owned by the host and lent to denoisers for the duration of
/// a frame.
#[derive(Debug, Default)]
pub struct Resources {
    textures: FxHashMap<String, Texture>,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a texture, returning the one that was previously stored under
    /// the same name (if any).
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        texture: Texture,
    ) -> Option<Texture> {
        self.textures.insert(name.into(), texture)
    }

    pub fn remove(&mut self, name: &str) -> Option<Texture> {
        self.textures.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Texture> {
        self.textures.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Texture> {
        self.textures.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.textures.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.textures.keys().map(String::as_str)
    }
}
