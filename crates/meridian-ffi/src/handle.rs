//! Slot+generation table mapping opaque `u64` handles to owned values.
//!
//! A handle is `(slot + 1) << 32 | generation`, so no live value is ever
//! addressed by [`NULL_HANDLE`]. Removing a value bumps the slot's
//! generation, so any handle still held by C for that value stops
//! resolving: lookups and removals through it return `None`.

/// The handle value that never names a context.
pub(crate) const NULL_HANDLE: u64 = 0;

fn encode(slot: u32, generation: u32) -> u64 {
    ((u64::from(slot) + 1) << 32) | u64::from(generation)
}

fn decode(handle: u64) -> Option<(u32, u32)> {
    let slot = u32::try_from((handle >> 32).checked_sub(1)?).ok()?;
    Some((slot, handle as u32))
}

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Owned values addressed by generation-checked handles.
pub(crate) struct HandleTable<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    live: usize,
}

impl<T> HandleTable<T> {
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Take ownership of `value` and return its handle.
    pub fn insert(&mut self, value: T) -> u64 {
        self.live += 1;
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.value = Some(value);
                encode(index, slot.generation)
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    value: Some(value),
                });
                encode(index, 0)
            }
        }
    }

    fn slot(&self, handle: u64) -> Option<&Slot<T>> {
        let (index, generation) = decode(handle)?;
        self.slots
            .get(index as usize)
            .filter(|slot| slot.generation == generation)
    }

    fn slot_mut(&mut self, handle: u64) -> Option<&mut Slot<T>> {
        let (index, generation) = decode(handle)?;
        self.slots
            .get_mut(index as usize)
            .filter(|slot| slot.generation == generation)
    }

    pub fn get(&self, handle: u64) -> Option<&T> {
        self.slot(handle)?.value.as_ref()
    }

    pub fn get_mut(&mut self, handle: u64) -> Option<&mut T> {
        self.slot_mut(handle)?.value.as_mut()
    }

    /// Give the value back and invalidate `handle`.
    ///
    /// A slot whose generation wraps to 0 is retired rather than reused,
    /// so a handle from its first lifetime can never match again.
    pub fn remove(&mut self, handle: u64) -> Option<T> {
        let (index, _) = decode(handle)?;
        let slot = self.slot_mut(handle)?;
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        if slot.generation != 0 {
            self.free.push(index);
        }
        self.live -= 1;
        Some(value)
    }

    /// Values currently held.
    pub fn len(&self) -> usize {
        self.live
    }
}
