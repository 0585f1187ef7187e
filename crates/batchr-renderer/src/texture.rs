//! Texture handles shared between the batcher and its backend.

use std::fmt;

/// Stable opaque identity of a backend texture resource.
///
/// Two handles refer to the same texture exactly when their ids are equal;
/// pixel contents play no part in the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(u64);

impl TextureId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tex#{}", self.0)
    }
}

/// A texture created by a [`RenderBackend`](crate::RenderBackend).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture {
    id: TextureId,
    width: u32,
    height: u32,
}

impl Texture {
    pub fn new(id: TextureId, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }

    pub fn id(&self) -> TextureId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_id_display() {
        assert_eq!(TextureId::new(7).to_string(), "tex#7");
    }

    #[test]
    fn texture_exposes_dimensions() {
        let t = Texture::new(TextureId::new(3), 64, 32);
        assert_eq!(t.id(), TextureId::new(3));
        assert_eq!(t.width(), 64);
        assert_eq!(t.height(), 32);
    }

    #[test]
    fn identity_is_the_id() {
        let a = Texture::new(TextureId::new(1), 8, 8);
        let b = Texture::new(TextureId::new(2), 8, 8);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.id(), a.id());
    }
}
