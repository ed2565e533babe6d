//! Kernels and the six kernel slots of an operation.

use std::fmt;

use meridian_core::KernelId;

/// A coordinate tuple as seen by every kernel arity (unused components are 0).
pub type Coord = [f64; 4];

/// Signature shared by all kernel slots.
pub type KernelFn = fn(Coord) -> Coord;

/// An invocable transformation routine with a stable identity.
///
/// Equality and hashing go through [`id`](Kernel::id) only. Two kernels
/// with the same identity are the same kernel as far as dispatch-table
/// generation is concerned, whatever their function address.
#[derive(Clone, Copy)]
pub struct Kernel {
    id: KernelId,
    func: KernelFn,
}

impl Kernel {
    /// Pair an identity with its routine.
    pub const fn new(id: KernelId, func: KernelFn) -> Self {
        Self { id, func }
    }

    /// Stable identity.
    pub fn id(&self) -> KernelId {
        self.id
    }

    /// Run the kernel on one coordinate.
    pub fn invoke(&self, coord: Coord) -> Coord {
        (self.func)(coord)
    }
}

impl PartialEq for Kernel {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Kernel {}

impl fmt::Debug for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Kernel").field(&self.id.name()).finish()
    }
}

/// Arity and direction of a kernel slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KernelSlot {
    /// Forward, 2D.
    Fwd2d,
    /// Inverse, 2D.
    Inv2d,
    /// Forward, 3D.
    Fwd3d,
    /// Inverse, 3D.
    Inv3d,
    /// Forward, 4D (time-dependent).
    Fwd4d,
    /// Inverse, 4D (time-dependent).
    Inv4d,
}

impl KernelSlot {
    /// Every slot, in storage order.
    pub const ALL: [KernelSlot; 6] = [
        KernelSlot::Fwd2d,
        KernelSlot::Inv2d,
        KernelSlot::Fwd3d,
        KernelSlot::Inv3d,
        KernelSlot::Fwd4d,
        KernelSlot::Inv4d,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// The six optional kernel slots of one operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KernelSlots([Option<Kernel>; 6]);

impl KernelSlots {
    /// All slots empty.
    pub const fn empty() -> Self {
        Self([None; 6])
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, slot: KernelSlot, kernel: Kernel) -> Self {
        self.set(slot, kernel);
        self
    }

    /// Fill `slot`, replacing any kernel already there.
    pub fn set(&mut self, slot: KernelSlot, kernel: Kernel) {
        self.0[slot.index()] = Some(kernel);
    }

    /// Empty `slot`, returning what it held.
    pub fn clear(&mut self, slot: KernelSlot) -> Option<Kernel> {
        self.0[slot.index()].take()
    }

    /// Kernel in `slot`, if present.
    pub fn get(&self, slot: KernelSlot) -> Option<&Kernel> {
        self.0[slot.index()].as_ref()
    }

    /// Present slots in storage order.
    pub fn present(&self) -> impl Iterator<Item = (KernelSlot, &Kernel)> + '_ {
        KernelSlot::ALL
            .into_iter()
            .zip(self.0.iter())
            .filter_map(|(slot, k)| k.as_ref().map(|k| (slot, k)))
    }

    /// Number of present slots.
    pub fn count(&self) -> usize {
        self.0.iter().filter(|k| k.is_some()).count()
    }

    /// Whether no slot is present.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }
}
