//! C logging callback adapted to the [`Logger`] trait, and the stderr
//! stream behind the default logger in C builds.

use std::ffi::{c_char, c_void, CString};
use std::sync::Once;

use log::LevelFilter;
use meridian_context::logger::LOG_TARGET;
use meridian_core::{LogLevel, Logger};

/// Stream builder passing everything under the `meridian` target; each
/// context filters by its own debug level. `RUST_LOG` directives override.
fn stream_builder() -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_module(LOG_TARGET, LevelFilter::Trace)
        .parse_default_env();
    builder
}

/// Install the stderr stream once per process.
///
/// A host that already installed a `log` backend keeps it.
pub(crate) fn init_stream_logger() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = stream_builder().try_init();
    });
}

/// `(user_data, level, message)`. `level` is 1 = error, 2 = debug,
/// 3 = trace, 4 = tell; `message` is NUL-terminated and only valid for
/// the duration of the call.
pub type MrdLogFn = unsafe extern "C" fn(*mut c_void, i32, *const c_char);

/// Rust-side wrapper that forwards log messages to C.
pub(crate) struct CallbackLogger {
    callback: MrdLogFn,
    user_data: *mut c_void,
}

// SAFETY: the FFI contract requires user_data to be usable from any
// thread that logs through the context.
#[allow(unsafe_code)]
unsafe impl Send for CallbackLogger {}
// SAFETY: as above; clones of one context share the logger and may log
// concurrently.
#[allow(unsafe_code)]
unsafe impl Sync for CallbackLogger {}

impl CallbackLogger {
    pub(crate) fn new(callback: MrdLogFn, user_data: *mut c_void) -> Self {
        Self {
            callback,
            user_data,
        }
    }
}

impl Logger for CallbackLogger {
    #[allow(unsafe_code)]
    fn log(&self, level: LogLevel, message: &str) {
        let text = match CString::new(message) {
            Ok(text) => text,
            Err(_) => match CString::new(message.replace('\0', " ")) {
                Ok(text) => text,
                Err(_) => return,
            },
        };
        // SAFETY: callback is valid per caller contract; text outlives the call.
        unsafe { (self.callback)(self.user_data, level as i32, text.as_ptr()) }
    }
}
