//! Context lifecycle and configuration FFI.
//!
//! All contexts created through C live in one process-wide table. The
//! table lock is held for the duration of each call; contexts are not
//! internally synchronized, so this also serializes access to any one
//! context from C.

use std::ffi::{c_char, c_void, CStr};
use std::sync::{Arc, Mutex};

use meridian_context::ExecutionContext;
use meridian_core::{ContextError, DebugLevel};

use crate::allocator::{CallbackAllocator, MrdAllocator};
use crate::handle::{HandleTable, NULL_HANDLE};
use crate::logger::{init_stream_logger, CallbackLogger, MrdLogFn};
use crate::status::MrdStatus;

static CONTEXTS: Mutex<HandleTable<ExecutionContext>> = Mutex::new(HandleTable::new());

/// Store a freshly built context and publish its handle.
fn publish(result: Result<ExecutionContext, ContextError>, out: *mut u64) -> i32 {
    publish_into(&CONTEXTS, result, out)
}

/// `out` is cleared before the table is locked, so every failure path
/// leaves [`NULL_HANDLE`] behind.
#[allow(unsafe_code)]
fn publish_into(
    contexts: &Mutex<HandleTable<ExecutionContext>>,
    result: Result<ExecutionContext, ContextError>,
    out: *mut u64,
) -> i32 {
    // SAFETY: out is non-null and valid per caller contract.
    unsafe { *out = NULL_HANDLE };
    match result {
        Ok(ctx) => {
            let handle = ffi_lock!(contexts).insert(ctx);
            // SAFETY: as above.
            unsafe { *out = handle };
            MrdStatus::Ok as i32
        }
        Err(e) => MrdStatus::from(&e) as i32,
    }
}

/// Borrow a C string as UTF-8.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string.
#[allow(unsafe_code)]
unsafe fn utf8<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: non-null and NUL-terminated per the function contract.
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

/// Create a context with the default allocator and environment defaults.
///
/// Writes the new handle to `ctx_out`; a successful create never yields
/// 0. On allocation failure writes 0.
///
/// The first create installs the stderr stream behind the default logger.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn mrd_context_create(ctx_out: *mut u64) -> i32 {
    ffi_guard!({
        if ctx_out.is_null() {
            return MrdStatus::InvalidArgument as i32;
        }
        init_stream_logger();
        publish(ExecutionContext::create(None), ctx_out)
    })
}

/// Create a context whose shared state is allocated through `alloc`.
///
/// The callback table is copied; `alloc->user_data` must stay valid
/// until the context and every clone of it are destroyed.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn mrd_context_create_with_allocator(
    alloc: *const MrdAllocator,
    ctx_out: *mut u64,
) -> i32 {
    ffi_guard!({
        if alloc.is_null() || ctx_out.is_null() {
            return MrdStatus::InvalidArgument as i32;
        }
        // SAFETY: alloc is non-null and points to a valid MrdAllocator.
        let def = unsafe { &*alloc };
        let allocator = match CallbackAllocator::from_c(def) {
            Some(a) => a,
            None => return MrdStatus::InvalidArgument as i32,
        };
        init_stream_logger();
        publish(ExecutionContext::create(Some(Arc::new(allocator))), ctx_out)
    })
}

/// Clone a context into a new, independent one using the same allocator.
///
/// Cloning handle 0 creates a fresh default context instead. On
/// allocation failure writes 0 to `ctx_out` and returns
/// `AllocationFailed`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn mrd_context_clone(handle: u64, ctx_out: *mut u64) -> i32 {
    ffi_guard!({
        if ctx_out.is_null() {
            return MrdStatus::InvalidArgument as i32;
        }
        if handle == NULL_HANDLE {
            init_stream_logger();
            return publish(ExecutionContext::create(None), ctx_out);
        }
        // SAFETY: ctx_out is non-null and valid per caller contract.
        unsafe { *ctx_out = NULL_HANDLE };
        let mut table = ffi_lock!(CONTEXTS);
        let cloned = match table.get(handle) {
            Some(ctx) => ctx.try_clone(),
            None => return MrdStatus::InvalidHandle as i32,
        };
        match cloned {
            Ok(ctx) => {
                let new_handle = table.insert(ctx);
                // SAFETY: as above.
                unsafe { *ctx_out = new_handle };
                MrdStatus::Ok as i32
            }
            Err(e) => MrdStatus::from(&e) as i32,
        }
    })
}

/// Destroy a context, releasing everything it owns.
///
/// Destroying the same handle twice returns `InvalidHandle`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn mrd_context_destroy(handle: u64) -> i32 {
    ffi_guard!({
        // Drop outside the lock: the context may log or call C on release.
        let removed = ffi_lock!(CONTEXTS).remove(handle);
        match removed {
            Some(ctx) => {
                drop(ctx);
                MrdStatus::Ok as i32
            }
            None => MrdStatus::InvalidHandle as i32,
        }
    })
}

/// Replace the search paths with `n_paths` NUL-terminated UTF-8 strings.
///
/// `paths` may be null when `n_paths` is 0. The strings are copied.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn mrd_context_set_search_paths(
    handle: u64,
    paths: *const *const c_char,
    n_paths: usize,
) -> i32 {
    ffi_guard!({
        let mut owned = Vec::with_capacity(n_paths);
        if n_paths > 0 {
            if paths.is_null() {
                return MrdStatus::InvalidArgument as i32;
            }
            // SAFETY: paths points to n_paths pointers per caller contract.
            let raw = unsafe { std::slice::from_raw_parts(paths, n_paths) };
            for &p in raw {
                // SAFETY: each entry is null or NUL-terminated.
                match unsafe { utf8(p) } {
                    Some(s) => owned.push(s),
                    None => return MrdStatus::InvalidArgument as i32,
                }
            }
        }
        let mut table = ffi_lock!(CONTEXTS);
        let Some(ctx) = table.get_mut(handle) else {
            return MrdStatus::InvalidHandle as i32;
        };
        ctx.set_search_paths(owned);
        MrdStatus::Ok as i32
    })
}

/// Number of search paths.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn mrd_context_search_path_count(handle: u64, count_out: *mut usize) -> i32 {
    ffi_guard!({
        if count_out.is_null() {
            return MrdStatus::InvalidArgument as i32;
        }
        let table = ffi_lock!(CONTEXTS);
        let Some(ctx) = table.get(handle) else {
            return MrdStatus::InvalidHandle as i32;
        };
        // SAFETY: count_out is non-null and valid per caller contract.
        unsafe { *count_out = ctx.search_paths().len() };
        MrdStatus::Ok as i32
    })
}

/// Copy search path `index` into `buf` as a NUL-terminated string.
///
/// `len_out` (if non-null) always receives the path length in bytes,
/// excluding the terminator. Pass `buf = NULL, cap = 0` to query the
/// length only. Returns `BufferTooSmall` when `cap` cannot hold the path
/// plus its terminator; nothing is written to `buf` in that case.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn mrd_context_search_path(
    handle: u64,
    index: usize,
    buf: *mut c_char,
    cap: usize,
    len_out: *mut usize,
) -> i32 {
    ffi_guard!({
        let table = ffi_lock!(CONTEXTS);
        let Some(ctx) = table.get(handle) else {
            return MrdStatus::InvalidHandle as i32;
        };
        let views = ctx.search_paths().c_views();
        let Some(path) = views.get(index) else {
            return MrdStatus::InvalidArgument as i32;
        };
        let bytes = path.to_bytes_with_nul();
        if !len_out.is_null() {
            // SAFETY: len_out is non-null and valid per caller contract.
            unsafe { *len_out = bytes.len() - 1 };
        }
        if buf.is_null() {
            return if cap == 0 {
                MrdStatus::Ok as i32
            } else {
                MrdStatus::InvalidArgument as i32
            };
        }
        if cap < bytes.len() {
            return MrdStatus::BufferTooSmall as i32;
        }
        // SAFETY: buf holds at least cap >= bytes.len() bytes per caller
        // contract and cannot overlap the context's own storage.
        unsafe { std::ptr::copy_nonoverlapping(bytes.as_ptr().cast(), buf, bytes.len()) };
        MrdStatus::Ok as i32
    })
}

/// Set the certificate bundle path; null restores the system store.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn mrd_context_set_ca_bundle_path(handle: u64, path: *const c_char) -> i32 {
    ffi_guard!({
        let path = if path.is_null() {
            None
        } else {
            // SAFETY: path is non-null and NUL-terminated per caller contract.
            match unsafe { utf8(path) } {
                Some(p) => Some(p.to_owned()),
                None => return MrdStatus::InvalidArgument as i32,
            }
        };
        let mut table = ffi_lock!(CONTEXTS);
        let Some(ctx) = table.get_mut(handle) else {
            return MrdStatus::InvalidHandle as i32;
        };
        match path {
            Some(p) => ctx.set_ca_bundle_path(p),
            None => ctx.clear_ca_bundle_path(),
        }
        MrdStatus::Ok as i32
    })
}

/// Set the debug level. Out-of-range values are clamped.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn mrd_context_set_debug_level(handle: u64, level: i32) -> i32 {
    ffi_guard!({
        let mut table = ffi_lock!(CONTEXTS);
        let Some(ctx) = table.get_mut(handle) else {
            return MrdStatus::InvalidHandle as i32;
        };
        ctx.set_debug_level(DebugLevel::clamped(i64::from(level)));
        MrdStatus::Ok as i32
    })
}

/// Read the debug level.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn mrd_context_debug_level(handle: u64, level_out: *mut i32) -> i32 {
    ffi_guard!({
        if level_out.is_null() {
            return MrdStatus::InvalidArgument as i32;
        }
        let table = ffi_lock!(CONTEXTS);
        let Some(ctx) = table.get(handle) else {
            return MrdStatus::InvalidHandle as i32;
        };
        // SAFETY: level_out is non-null and valid per caller contract.
        unsafe { *level_out = ctx.debug_level().get() };
        MrdStatus::Ok as i32
    })
}

/// Install a log callback; a null `callback` restores the default logger.
///
/// `user_data` is passed back on every call and must stay valid until the
/// logger is replaced or the context (and its clones) are destroyed.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn mrd_context_set_logger(
    handle: u64,
    callback: Option<MrdLogFn>,
    user_data: *mut c_void,
) -> i32 {
    ffi_guard!({
        let mut table = ffi_lock!(CONTEXTS);
        let Some(ctx) = table.get_mut(handle) else {
            return MrdStatus::InvalidHandle as i32;
        };
        match callback {
            Some(cb) => ctx.set_logger(Arc::new(CallbackLogger::new(cb, user_data))),
            None => ctx.reset_logger(),
        }
        MrdStatus::Ok as i32
    })
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use super::*;
    use std::ffi::CString;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn create() -> u64 {
        let mut h = 0u64;
        assert_eq!(mrd_context_create(&mut h), MrdStatus::Ok as i32);
        assert_ne!(h, NULL_HANDLE);
        h
    }

    // ── C allocator fixture ────────────────────────────────────

    /// State behind `user_data`: live block count and an allocation budget.
    struct Budget {
        live: AtomicUsize,
        remaining: AtomicUsize,
        maps: AtomicUsize,
    }

    impl Budget {
        fn new(allocations: usize) -> Self {
            Self {
                live: AtomicUsize::new(0),
                remaining: AtomicUsize::new(allocations),
                maps: AtomicUsize::new(0),
            }
        }
    }

    const ALIGN: usize = 16;

    unsafe extern "C" fn budget_malloc(user: *mut c_void, size: usize) -> *mut c_void {
        // SAFETY: user is a &Budget for the duration of the test.
        let budget = unsafe { &*(user as *const Budget) };
        if budget
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_err()
        {
            return std::ptr::null_mut();
        }
        budget.live.fetch_add(1, Ordering::SeqCst);
        let layout = std::alloc::Layout::from_size_align(size.max(1), ALIGN).unwrap();
        // SAFETY: non-zero size.
        let p = unsafe { std::alloc::alloc(layout) };
        // budget_free recomputes the layout from SharedState's size.
        p.cast()
    }

    unsafe extern "C" fn budget_calloc(user: *mut c_void, n: usize, size: usize) -> *mut c_void {
        // SAFETY: forwarded.
        let p = unsafe { budget_malloc(user, n * size) };
        if !p.is_null() {
            // SAFETY: p points to n * size bytes.
            unsafe { std::ptr::write_bytes(p.cast::<u8>(), 0, n * size) };
        }
        p
    }

    unsafe extern "C" fn budget_free(user: *mut c_void, ptr: *mut c_void) {
        // SAFETY: user is a &Budget.
        let budget = unsafe { &*(user as *const Budget) };
        budget.live.fetch_sub(1, Ordering::SeqCst);
        let size = std::mem::size_of::<meridian_context::SharedState>().max(1);
        let layout = std::alloc::Layout::from_size_align(size, ALIGN).unwrap();
        // SAFETY: ptr came from budget_malloc with this layout.
        unsafe { std::alloc::dealloc(ptr.cast(), layout) };
    }

    unsafe extern "C" fn budget_map(user: *mut c_void, _ptr: *mut c_void, _mapped: i32) {
        // SAFETY: user is a &Budget.
        let budget = unsafe { &*(user as *const Budget) };
        budget.maps.fetch_add(1, Ordering::SeqCst);
    }

    fn c_allocator(budget: &Budget) -> MrdAllocator {
        MrdAllocator {
            user_data: budget as *const Budget as *mut c_void,
            malloc: Some(budget_malloc),
            calloc: Some(budget_calloc),
            free: Some(budget_free),
            map: Some(budget_map),
        }
    }

    // ── Lifecycle ──────────────────────────────────────────────

    #[test]
    fn create_and_destroy() {
        let h = create();
        assert_eq!(mrd_context_destroy(h), MrdStatus::Ok as i32);
    }

    #[test]
    fn double_destroy_is_invalid_handle() {
        let h = create();
        assert_eq!(mrd_context_destroy(h), MrdStatus::Ok as i32);
        assert_eq!(mrd_context_destroy(h), MrdStatus::InvalidHandle as i32);
    }

    #[test]
    fn successful_create_never_returns_null_handle() {
        let handles: Vec<u64> = (0..4).map(|_| create()).collect();
        assert!(handles.iter().all(|&h| h != NULL_HANDLE));
        for h in handles {
            assert_eq!(mrd_context_destroy(h), MrdStatus::Ok as i32);
        }
    }

    #[test]
    fn null_handle_is_never_live() {
        let mut count = 0usize;
        assert_eq!(
            mrd_context_search_path_count(NULL_HANDLE, &mut count),
            MrdStatus::InvalidHandle as i32
        );
        assert_eq!(mrd_context_destroy(NULL_HANDLE), MrdStatus::InvalidHandle as i32);
    }

    #[test]
    fn clone_of_null_handle_creates_default_context() {
        let mut h = NULL_HANDLE;
        assert_eq!(mrd_context_clone(NULL_HANDLE, &mut h), MrdStatus::Ok as i32);
        assert_ne!(h, NULL_HANDLE);
        let mut level = 0;
        assert_eq!(mrd_context_debug_level(h, &mut level), MrdStatus::Ok as i32);
        assert_eq!(mrd_context_destroy(h), MrdStatus::Ok as i32);
    }

    #[test]
    fn poisoned_table_clears_out_handle() {
        let table = Mutex::new(HandleTable::new());
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = table.lock().unwrap();
            panic!("poison the table");
        }));
        assert!(table.is_poisoned());

        let mut out = 42u64;
        assert_eq!(
            publish_into(&table, ExecutionContext::create(None), &mut out),
            MrdStatus::InternalError as i32
        );
        assert_eq!(out, NULL_HANDLE);
    }

    #[test]
    fn create_installs_stream_logger() {
        let h = create();
        assert_eq!(mrd_context_destroy(h), MrdStatus::Ok as i32);
        assert!(log::max_level() >= log::LevelFilter::Error);
    }

    #[test]
    fn null_out_pointer_is_rejected() {
        assert_eq!(
            mrd_context_create(std::ptr::null_mut()),
            MrdStatus::InvalidArgument as i32
        );
    }

    #[test]
    fn custom_allocator_round_trip() {
        let budget = Budget::new(8);
        let alloc = c_allocator(&budget);
        let mut h = 0u64;
        assert_eq!(
            mrd_context_create_with_allocator(&alloc, &mut h),
            MrdStatus::Ok as i32
        );
        assert_eq!(budget.live.load(Ordering::SeqCst), 1);

        let mut clone = 0u64;
        assert_eq!(mrd_context_clone(h, &mut clone), MrdStatus::Ok as i32);
        assert_eq!(budget.live.load(Ordering::SeqCst), 2);

        assert_eq!(mrd_context_destroy(h), MrdStatus::Ok as i32);
        assert_eq!(mrd_context_destroy(clone), MrdStatus::Ok as i32);
        assert_eq!(budget.live.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn missing_required_callback_is_rejected() {
        let budget = Budget::new(1);
        let mut alloc = c_allocator(&budget);
        alloc.free = None;
        let mut h = 7u64;
        assert_eq!(
            mrd_context_create_with_allocator(&alloc, &mut h),
            MrdStatus::InvalidArgument as i32
        );
    }

    #[test]
    fn clone_through_exhausted_allocator_writes_zero() {
        let budget = Budget::new(1);
        let alloc = c_allocator(&budget);
        let mut h = 0u64;
        assert_eq!(
            mrd_context_create_with_allocator(&alloc, &mut h),
            MrdStatus::Ok as i32
        );

        let mut clone = 99u64;
        assert_eq!(
            mrd_context_clone(h, &mut clone),
            MrdStatus::AllocationFailed as i32
        );
        assert_eq!(clone, 0);
        assert_eq!(mrd_context_destroy(h), MrdStatus::Ok as i32);
        assert_eq!(budget.live.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn create_through_exhausted_allocator_writes_zero() {
        let budget = Budget::new(0);
        let alloc = c_allocator(&budget);
        let mut h = 99u64;
        assert_eq!(
            mrd_context_create_with_allocator(&alloc, &mut h),
            MrdStatus::AllocationFailed as i32
        );
        assert_eq!(h, 0);
    }

    #[test]
    fn clone_of_destroyed_handle() {
        let h = create();
        mrd_context_destroy(h);
        let mut out = 5u64;
        assert_eq!(mrd_context_clone(h, &mut out), MrdStatus::InvalidHandle as i32);
        assert_eq!(out, 0);
    }

    // ── Search paths ───────────────────────────────────────────

    #[test]
    fn search_paths_round_trip() {
        let h = create();
        let owned: Vec<CString> = ["/usr/share/meridian", "/opt/grids"]
            .iter()
            .map(|s| CString::new(*s).unwrap())
            .collect();
        let ptrs: Vec<*const c_char> = owned.iter().map(|c| c.as_ptr()).collect();
        assert_eq!(
            mrd_context_set_search_paths(h, ptrs.as_ptr(), ptrs.len()),
            MrdStatus::Ok as i32
        );

        let mut count = 0usize;
        assert_eq!(mrd_context_search_path_count(h, &mut count), MrdStatus::Ok as i32);
        assert_eq!(count, 2);

        let mut len = 0usize;
        assert_eq!(
            mrd_context_search_path(h, 1, std::ptr::null_mut(), 0, &mut len),
            MrdStatus::Ok as i32
        );
        assert_eq!(len, "/opt/grids".len());

        let mut small = [0 as c_char; 4];
        assert_eq!(
            mrd_context_search_path(h, 1, small.as_mut_ptr(), small.len(), &mut len),
            MrdStatus::BufferTooSmall as i32
        );

        let mut buf = [0 as c_char; 64];
        assert_eq!(
            mrd_context_search_path(h, 0, buf.as_mut_ptr(), buf.len(), &mut len),
            MrdStatus::Ok as i32
        );
        // SAFETY: the call wrote a NUL-terminated string into buf.
        let got = unsafe { CStr::from_ptr(buf.as_ptr()) };
        assert_eq!(got.to_str().unwrap(), "/usr/share/meridian");

        assert_eq!(
            mrd_context_search_path(h, 2, buf.as_mut_ptr(), buf.len(), &mut len),
            MrdStatus::InvalidArgument as i32
        );
        mrd_context_destroy(h);
    }

    #[test]
    fn clone_search_paths_are_independent() {
        let h = create();
        let a = CString::new("/a").unwrap();
        let ptrs = [a.as_ptr()];
        mrd_context_set_search_paths(h, ptrs.as_ptr(), 1);

        let mut c = 0u64;
        mrd_context_clone(h, &mut c);
        mrd_context_set_search_paths(c, std::ptr::null(), 0);

        let mut count = 0usize;
        mrd_context_search_path_count(h, &mut count);
        assert_eq!(count, 1);
        mrd_context_search_path_count(c, &mut count);
        assert_eq!(count, 0);
        mrd_context_destroy(h);
        mrd_context_destroy(c);
    }

    #[test]
    fn null_path_entry_is_rejected() {
        let h = create();
        let ptrs = [std::ptr::null::<c_char>()];
        assert_eq!(
            mrd_context_set_search_paths(h, ptrs.as_ptr(), 1),
            MrdStatus::InvalidArgument as i32
        );
        mrd_context_destroy(h);
    }

    // ── Settings ───────────────────────────────────────────────

    #[test]
    fn debug_level_is_clamped() {
        let h = create();
        assert_eq!(mrd_context_set_debug_level(h, -50), MrdStatus::Ok as i32);
        let mut level = 0;
        assert_eq!(mrd_context_debug_level(h, &mut level), MrdStatus::Ok as i32);
        assert_eq!(level, 3);
        mrd_context_set_debug_level(h, 50);
        mrd_context_debug_level(h, &mut level);
        assert_eq!(level, 4);
        mrd_context_destroy(h);
    }

    #[test]
    fn ca_bundle_set_and_clear() {
        let h = create();
        let path = CString::new("/etc/ssl/cert.pem").unwrap();
        assert_eq!(
            mrd_context_set_ca_bundle_path(h, path.as_ptr()),
            MrdStatus::Ok as i32
        );
        {
            let table = CONTEXTS.lock().unwrap();
            assert_eq!(table.get(h).unwrap().ca_bundle_path(), Some("/etc/ssl/cert.pem"));
        }
        assert_eq!(
            mrd_context_set_ca_bundle_path(h, std::ptr::null()),
            MrdStatus::Ok as i32
        );
        {
            let table = CONTEXTS.lock().unwrap();
            assert_eq!(table.get(h).unwrap().ca_bundle_path(), None);
        }
        mrd_context_destroy(h);
    }

    unsafe extern "C" fn count_messages(user: *mut c_void, level: i32, msg: *const c_char) {
        // SAFETY: user is a &AtomicUsize; msg is NUL-terminated.
        let counter = unsafe { &*(user as *const AtomicUsize) };
        // SAFETY: msg is valid for the duration of the call.
        let text = unsafe { CStr::from_ptr(msg) };
        assert_eq!(level, 1);
        assert_eq!(text.to_str().unwrap(), "grid not found");
        counter.fetch_add(1, Ordering::SeqCst);
    }

    #[test]
    fn logger_callback_receives_messages() {
        let h = create();
        let counter = AtomicUsize::new(0);
        assert_eq!(
            mrd_context_set_logger(
                h,
                Some(count_messages),
                &counter as *const AtomicUsize as *mut c_void
            ),
            MrdStatus::Ok as i32
        );
        {
            let table = CONTEXTS.lock().unwrap();
            table
                .get(h)
                .unwrap()
                .log(meridian_core::LogLevel::Error, "grid not found");
        }
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        assert_eq!(mrd_context_set_logger(h, None, std::ptr::null_mut()), MrdStatus::Ok as i32);
        mrd_context_destroy(h);
    }

    #[test]
    fn stale_handle_everywhere() {
        let h = create();
        mrd_context_destroy(h);
        let mut n = 0usize;
        let mut level = 0i32;
        assert_eq!(mrd_context_search_path_count(h, &mut n), MrdStatus::InvalidHandle as i32);
        assert_eq!(mrd_context_set_debug_level(h, 1), MrdStatus::InvalidHandle as i32);
        assert_eq!(mrd_context_debug_level(h, &mut level), MrdStatus::InvalidHandle as i32);
        assert_eq!(
            mrd_context_set_ca_bundle_path(h, std::ptr::null()),
            MrdStatus::InvalidHandle as i32
        );
        assert_eq!(
            mrd_context_set_logger(h, None, std::ptr::null_mut()),
            MrdStatus::InvalidHandle as i32
        );
    }
}
