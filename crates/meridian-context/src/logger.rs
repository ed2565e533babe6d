//! Default stream logger.

use std::sync::{Arc, OnceLock};

use meridian_core::{LogLevel, Logger};

/// `log` target every context message is emitted under.
pub const LOG_TARGET: &str = "meridian";

/// Logger that forwards context messages to the `log` facade.
///
/// The embedding binary chooses the stream (e.g. `env_logger` to stderr).
/// Error maps to `error!`, Debug to `debug!`, and both Trace and Tell
/// to `trace!`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FacadeLogger;

impl Logger for FacadeLogger {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::None => {}
            LogLevel::Error => log::error!(target: LOG_TARGET, "{message}"),
            LogLevel::Debug => log::debug!(target: LOG_TARGET, "{message}"),
            LogLevel::Trace | LogLevel::Tell => log::trace!(target: LOG_TARGET, "{message}"),
        }
    }
}

/// Shared handle to the default logger.
pub fn default_logger() -> Arc<dyn Logger> {
    static DEFAULT: OnceLock<Arc<dyn Logger>> = OnceLock::new();
    DEFAULT.get_or_init(|| Arc::new(FacadeLogger)).clone()
}
