//! The [`Allocator`] interface and the process-wide system allocator.

use std::alloc::Layout;
use std::ptr::NonNull;
use std::sync::{Arc, OnceLock};

/// Allocation callbacks a context routes its owned blocks through.
///
/// This is the Rust form of an `{ user_data, malloc, calloc, free, map }`
/// callback table: the user data is whatever the implementing type holds.
///
/// # Contract
///
/// - Layouts passed in always have a non-zero size.
/// - A block returned by [`allocate`](Allocator::allocate) or
///   [`allocate_zeroed`](Allocator::allocate_zeroed) is released exactly
///   once, through [`deallocate`](Allocator::deallocate) on the same
///   allocator instance, with the same layout.
/// - Returning `None` signals allocation failure; it is never a panic.
#[allow(unsafe_code)]
pub trait Allocator: Send + Sync {
    /// Allocate an uninitialised block for `layout`.
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Allocate a zero-filled block for `layout`.
    fn allocate_zeroed(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Release a block.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `allocate` or `allocate_zeroed` on
    /// this allocator with the same `layout`, and must not be used after
    /// this call.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);

    /// Host mapping notification.
    ///
    /// Called with `mapped = true` before the host reads or writes the
    /// block and `mapped = false` afterwards. Allocators backed by ordinary
    /// host memory ignore it.
    fn notify_map(&self, _ptr: NonNull<u8>, _mapped: bool) {}
}

/// Shared handle to an allocator.
pub type AllocatorRef = Arc<dyn Allocator>;

/// Allocator backed by the Rust global allocator.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemAllocator;

/// The process-wide default allocator.
///
/// Every call returns a handle to the same instance.
pub fn system_allocator() -> AllocatorRef {
    static SYSTEM: OnceLock<AllocatorRef> = OnceLock::new();
    SYSTEM.get_or_init(|| Arc::new(SystemAllocator)).clone()
}

/// Whether two handles refer to the same allocator instance.
///
/// Compares data addresses only, so two handles to one instance compare
/// equal even when their vtable pointers differ across codegen units.
pub fn same_allocator(a: &AllocatorRef, b: &AllocatorRef) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_allocator_is_a_singleton() {
        let a = system_allocator();
        let b = system_allocator();
        assert!(same_allocator(&a, &b));
    }

    #[test]
    fn distinct_instances_are_not_the_same() {
        let a: AllocatorRef = Arc::new(SystemAllocator);
        assert!(!same_allocator(&a, &system_allocator()));
    }

    #[test]
    #[allow(unsafe_code)]
    fn system_allocator_zeroes() {
        let alloc = SystemAllocator;
        let layout = Layout::array::<u64>(8).unwrap();
        let ptr = alloc.allocate_zeroed(layout).unwrap();
        let bytes = ptr.as_ptr() as usize;
        assert_eq!(bytes % layout.align(), 0);
        // SAFETY: `ptr` came from `allocate_zeroed(layout)` on `alloc`.
        unsafe {
            assert!(std::slice::from_raw_parts(ptr.as_ptr(), layout.size())
                .iter()
                .all(|&b| b == 0));
            alloc.deallocate(ptr, layout);
        }
    }
}
