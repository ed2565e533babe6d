//! Low-level primitives: the system allocator and [`AllocBox`].
//!
//! Every `unsafe` block in this crate lives here, each with a `// SAFETY:`
//! comment. The invariant all of them rest on: an `AllocBox<T>` owns one
//! initialised `T` in a block obtained from `self.allocator` with
//! `Layout::new::<T>()` (or a dangling pointer when `T` is zero-sized).

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};

use crate::allocator::{Allocator, AllocatorRef, SystemAllocator};
use crate::error::ArenaError;

impl Allocator for SystemAllocator {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        if layout.size() == 0 {
            return None;
        }
        // SAFETY: layout has a non-zero size.
        NonNull::new(unsafe { alloc::alloc(layout) })
    }

    fn allocate_zeroed(&self, layout: Layout) -> Option<NonNull<u8>> {
        if layout.size() == 0 {
            return None;
        }
        // SAFETY: layout has a non-zero size.
        NonNull::new(unsafe { alloc::alloc_zeroed(layout) })
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded caller contract; the block came from the
        // global allocator with this layout.
        unsafe { alloc::dealloc(ptr.as_ptr(), layout) }
    }
}

/// A single `T` stored in memory obtained from a specific [`Allocator`].
///
/// Behaves like `Box<T>`, except that the block comes from (and on drop
/// returns to) the allocator passed to [`try_new_in`](AllocBox::try_new_in).
/// Allocation failure is reported as an error instead of aborting.
pub struct AllocBox<T> {
    ptr: NonNull<T>,
    allocator: AllocatorRef,
    _owns: PhantomData<T>,
}

// SAFETY: AllocBox uniquely owns its T, exactly like Box<T>; the allocator
// handle is Send + Sync by the Allocator trait bound.
unsafe impl<T: Send> Send for AllocBox<T> {}
// SAFETY: shared access only hands out &T.
unsafe impl<T: Sync> Sync for AllocBox<T> {}

impl<T> AllocBox<T> {
    /// Move `value` into a block from `allocator`.
    pub fn try_new_in(value: T, allocator: AllocatorRef) -> Result<Self, ArenaError> {
        let layout = Layout::new::<T>();
        let ptr = if layout.size() == 0 {
            NonNull::dangling()
        } else {
            let block = allocator
                .allocate(layout)
                .ok_or(ArenaError::AllocationFailed {
                    size: layout.size(),
                    align: layout.align(),
                })?;
            let addr = block.as_ptr() as usize;
            if addr % layout.align() != 0 {
                // SAFETY: `block` was just returned by this allocator for
                // `layout` and has not been used.
                unsafe { allocator.deallocate(block, layout) };
                return Err(ArenaError::Misaligned {
                    align: layout.align(),
                    addr,
                });
            }
            block.cast::<T>()
        };
        // SAFETY: `ptr` is valid for a write of T: either a fresh, aligned
        // block of T's layout, or dangling for a zero-sized T.
        unsafe { ptr.as_ptr().write(value) };
        Ok(Self {
            ptr,
            allocator,
            _owns: PhantomData,
        })
    }

    /// Value-copy the contents into a fresh block from `allocator`.
    ///
    /// The two boxes never alias: mutating one leaves the other untouched.
    pub fn try_clone_in(&self, allocator: AllocatorRef) -> Result<Self, ArenaError>
    where
        T: Clone,
    {
        Self::try_new_in((**self).clone(), allocator)
    }

    /// The allocator this block came from and will be released through.
    pub fn allocator(&self) -> &AllocatorRef {
        &self.allocator
    }

    /// Address of the stored value, for identity checks.
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Bracket host access with the allocator's mapping notifications.
    ///
    /// The returned guard calls `notify_map(ptr, true)` now and
    /// `notify_map(ptr, false)` when dropped.
    pub fn map(&mut self) -> MappedGuard<'_, T> {
        if Layout::new::<T>().size() != 0 {
            self.allocator.notify_map(self.ptr.cast(), true);
        }
        MappedGuard { boxed: self }
    }
}

impl<T> Deref for AllocBox<T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: ptr holds an initialised T owned by self.
        unsafe { self.ptr.as_ref() }
    }
}

impl<T> DerefMut for AllocBox<T> {
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: ptr holds an initialised T owned by self; &mut self
        // guarantees exclusivity.
        unsafe { self.ptr.as_mut() }
    }
}

impl<T> Drop for AllocBox<T> {
    fn drop(&mut self) {
        let layout = Layout::new::<T>();
        // SAFETY: ptr holds an initialised T that is dropped exactly once here.
        unsafe { ptr::drop_in_place(self.ptr.as_ptr()) };
        if layout.size() != 0 {
            // SAFETY: the block came from `self.allocator.allocate(layout)`
            // in `try_new_in` and is released exactly once.
            unsafe { self.allocator.deallocate(self.ptr.cast(), layout) };
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for AllocBox<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

/// Host-mapped access to an [`AllocBox`]. See [`AllocBox::map`].
pub struct MappedGuard<'a, T> {
    boxed: &'a mut AllocBox<T>,
}

impl<T> Deref for MappedGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &**self.boxed
    }
}

impl<T> DerefMut for MappedGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut **self.boxed
    }
}

impl<T> Drop for MappedGuard<'_, T> {
    fn drop(&mut self) {
        if Layout::new::<T>().size() != 0 {
            self.boxed
                .allocator
                .notify_map(self.boxed.ptr.cast(), false);
        }
    }
}
