//! Per-batch texture slot allocation.

use crate::backend::RenderBackend;
use crate::texture::TextureId;

/// Maps texture identities to texture units for the lifetime of one batch.
///
/// Slot 0 always holds the reserved white texture. Other slots are handed
/// out in first-use order and released all at once by [`reset`](Self::reset).
/// Lookup is a linear scan; the table never holds more than a handful of
/// entries.
#[derive(Debug, Clone)]
pub struct TextureSlotTable {
    slots: Vec<TextureId>,
    capacity: usize,
}

impl TextureSlotTable {
    pub fn new(white: TextureId, capacity: u32) -> Self {
        debug_assert!(capacity >= 1, "slot table needs room for the white texture");
        let capacity = capacity as usize;
        let mut slots = Vec::with_capacity(capacity);
        slots.push(white);
        Self { slots, capacity }
    }

    /// Drop every slot except the white texture.
    pub fn reset(&mut self) {
        self.slots.truncate(1);
    }

    /// Return the slot already holding `texture`, or assign it the next free
    /// one. `None` means the table is full and the caller must flush first.
    pub fn resolve_or_reserve(&mut self, texture: TextureId) -> Option<u32> {
        if let Some(slot) = self.slots.iter().position(|&t| t == texture) {
            return Some(slot as u32);
        }
        if self.is_full() {
            return None;
        }
        self.slots.push(texture);
        Some((self.slots.len() - 1) as u32)
    }

    /// Bind every occupied slot to its texture unit.
    pub fn bind_all<B: RenderBackend + ?Sized>(&self, backend: &mut B) {
        for (unit, &texture) in self.slots.iter().enumerate() {
            backend.bind_texture(texture, unit as u32);
        }
    }

    pub fn white(&self) -> TextureId {
        self.slots[0]
    }

    pub fn get(&self, slot: u32) -> Option<TextureId> {
        self.slots.get(slot as usize).copied()
    }

    /// Occupied slots, including slot 0.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() == self.capacity
    }
}
