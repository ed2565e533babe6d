//! Instrumented allocators.

#![allow(unsafe_code)]

use std::alloc::Layout;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use meridian_arena::{Allocator, SystemAllocator};

/// Forwards to the system allocator and counts every call.
///
/// Optionally starts failing after a fixed number of successful
/// allocations, to exercise failure paths deep inside a sequence.
pub struct CountingAllocator {
    allocations: AtomicUsize,
    frees: AtomicUsize,
    fail_after: Option<usize>,
    map_events: Mutex<Vec<bool>>,
}

impl CountingAllocator {
    pub fn new() -> Self {
        Self {
            allocations: AtomicUsize::new(0),
            frees: AtomicUsize::new(0),
            fail_after: None,
            map_events: Mutex::new(Vec::new()),
        }
    }

    /// Succeed `n` times, then return `None` for every request.
    pub fn failing_after(n: usize) -> Self {
        Self {
            fail_after: Some(n),
            ..Self::new()
        }
    }

    pub fn total_allocations(&self) -> usize {
        self.allocations.load(Ordering::SeqCst)
    }

    pub fn total_frees(&self) -> usize {
        self.frees.load(Ordering::SeqCst)
    }

    /// Blocks currently outstanding.
    pub fn live(&self) -> usize {
        self.total_allocations() - self.total_frees()
    }

    /// `notify_map` calls received, in order (`true` = mapped).
    pub fn map_events(&self) -> Vec<bool> {
        self.map_events.lock().unwrap().clone()
    }

    fn admit(&self) -> bool {
        match self.fail_after {
            Some(limit) => self
                .allocations
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                    (n < limit).then_some(n + 1)
                })
                .is_ok(),
            None => {
                self.allocations.fetch_add(1, Ordering::SeqCst);
                true
            }
        }
    }
}

impl Default for CountingAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl Allocator for CountingAllocator {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        if !self.admit() {
            return None;
        }
        let block = SystemAllocator.allocate(layout);
        if block.is_none() {
            self.allocations.fetch_sub(1, Ordering::SeqCst);
        }
        block
    }

    fn allocate_zeroed(&self, layout: Layout) -> Option<NonNull<u8>> {
        if !self.admit() {
            return None;
        }
        let block = SystemAllocator.allocate_zeroed(layout);
        if block.is_none() {
            self.allocations.fetch_sub(1, Ordering::SeqCst);
        }
        block
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.frees.fetch_add(1, Ordering::SeqCst);
        // SAFETY: forwarded caller contract; every block this allocator
        // hands out comes from the system allocator.
        unsafe { SystemAllocator.deallocate(ptr, layout) }
    }

    fn notify_map(&self, _ptr: NonNull<u8>, mapped: bool) {
        self.map_events.lock().unwrap().push(mapped);
    }
}

/// An allocator that never succeeds.
#[derive(Clone, Copy, Debug, Default)]
pub struct FailingAllocator;

impl Allocator for FailingAllocator {
    fn allocate(&self, _layout: Layout) -> Option<NonNull<u8>> {
        None
    }

    fn allocate_zeroed(&self, _layout: Layout) -> Option<NonNull<u8>> {
        None
    }

    unsafe fn deallocate(&self, _ptr: NonNull<u8>, _layout: Layout) {
        // Nothing was ever handed out.
    }
}
