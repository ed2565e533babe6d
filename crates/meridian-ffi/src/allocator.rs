//! C allocator callbacks adapted to the [`Allocator`] trait.

use std::alloc::Layout;
use std::ffi::c_void;
use std::ptr::NonNull;

use meridian_arena::Allocator;

/// Allocation callbacks supplied by C.
///
/// `malloc`, `calloc`, and `free` are required; `map` may be null. Blocks
/// must be aligned for any fundamental type, as C `malloc` guarantees.
/// `user_data` is passed back as the first argument of every callback.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct MrdAllocator {
    /// Opaque pointer handed to every callback.
    pub user_data: *mut c_void,
    /// `(user_data, size) -> block or null`.
    pub malloc: Option<unsafe extern "C" fn(*mut c_void, usize) -> *mut c_void>,
    /// `(user_data, count, size) -> zeroed block or null`.
    pub calloc: Option<unsafe extern "C" fn(*mut c_void, usize, usize) -> *mut c_void>,
    /// `(user_data, block)`.
    pub free: Option<unsafe extern "C" fn(*mut c_void, *mut c_void)>,
    /// `(user_data, block, mapped)`: 1 before host access, 0 after.
    pub map: Option<unsafe extern "C" fn(*mut c_void, *mut c_void, i32)>,
}

const _: () = assert!(std::mem::size_of::<MrdAllocator>() == 5 * std::mem::size_of::<usize>());

type MallocFn = unsafe extern "C" fn(*mut c_void, usize) -> *mut c_void;
type CallocFn = unsafe extern "C" fn(*mut c_void, usize, usize) -> *mut c_void;
type FreeFn = unsafe extern "C" fn(*mut c_void, *mut c_void);
type MapFn = unsafe extern "C" fn(*mut c_void, *mut c_void, i32);

/// Rust-side wrapper that routes [`Allocator`] calls to C.
pub(crate) struct CallbackAllocator {
    user_data: *mut c_void,
    malloc: MallocFn,
    calloc: CallocFn,
    free: FreeFn,
    map: Option<MapFn>,
}

// SAFETY: the FFI contract requires the callbacks and user_data to be
// usable from any thread; contexts (and their clones) may be dropped or
// cloned on a thread other than the one that created them.
#[allow(unsafe_code)]
unsafe impl Send for CallbackAllocator {}
// SAFETY: as above; the callbacks must tolerate concurrent calls, because
// clones of one context share the allocator.
#[allow(unsafe_code)]
unsafe impl Sync for CallbackAllocator {}

impl CallbackAllocator {
    /// `None` if a required callback is null.
    pub(crate) fn from_c(def: &MrdAllocator) -> Option<Self> {
        Some(Self {
            user_data: def.user_data,
            malloc: def.malloc?,
            calloc: def.calloc?,
            free: def.free?,
            map: def.map,
        })
    }
}

#[allow(unsafe_code)]
impl Allocator for CallbackAllocator {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        // SAFETY: malloc is a valid callback per caller contract.
        NonNull::new(unsafe { (self.malloc)(self.user_data, layout.size()) }.cast())
    }

    fn allocate_zeroed(&self, layout: Layout) -> Option<NonNull<u8>> {
        // SAFETY: calloc is a valid callback per caller contract.
        NonNull::new(unsafe { (self.calloc)(self.user_data, 1, layout.size()) }.cast())
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, _layout: Layout) {
        // SAFETY: ptr came from malloc/calloc on this allocator.
        unsafe { (self.free)(self.user_data, ptr.as_ptr().cast()) }
    }

    fn notify_map(&self, ptr: NonNull<u8>, mapped: bool) {
        if let Some(map) = self.map {
            // SAFETY: map is a valid callback per caller contract; ptr is
            // a live block from this allocator.
            unsafe { map(self.user_data, ptr.as_ptr().cast(), i32::from(mapped)) }
        }
    }
}
