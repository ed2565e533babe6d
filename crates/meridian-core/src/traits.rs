//! Collaborator traits a context calls out through.
//!
//! Each trait replaces a C-style "callback + opaque user data" pair:
//! the user data is whatever state the implementing type carries.
//! Closures implement [`Logger`] and [`FileFinder`] directly.

use std::path::PathBuf;

use crate::level::LogLevel;
use crate::network::NetworkSettings;

/// Sink for context log messages.
///
/// Called only for messages that passed the context's debug level, so
/// implementations need not filter again.
pub trait Logger: Send + Sync {
    /// Deliver one message.
    fn log(&self, level: LogLevel, message: &str);
}

impl<F> Logger for F
where
    F: Fn(LogLevel, &str) + Send + Sync,
{
    fn log(&self, level: LogLevel, message: &str) {
        self(level, message)
    }
}

/// Resolves resource file names (grids, databases) to paths.
///
/// Consulted before the context's search paths.
pub trait FileFinder: Send + Sync {
    /// Return the full path of `name`, or `None` to fall through.
    fn find(&self, name: &str) -> Option<PathBuf>;
}

impl<F> FileFinder for F
where
    F: Fn(&str) -> Option<PathBuf> + Send + Sync,
{
    fn find(&self, name: &str) -> Option<PathBuf> {
        self(name)
    }
}

/// File and network access layer.
///
/// Only the default-settings hook is consumed by the context; actual
/// file and network I/O lives behind the same implementor elsewhere.
pub trait FileManager: Send + Sync {
    /// Populate `settings` with this manager's defaults.
    ///
    /// Called once per freshly created context, before environment
    /// overrides are applied.
    fn fill_default_network_settings(&self, settings: &mut NetworkSettings);
}
