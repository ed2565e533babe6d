//! Test utilities and mock collaborators for Meridian development.
//!
//! Provides instrumented allocators ([`CountingAllocator`],
//! [`FailingAllocator`]), a [`RecordingLogger`], and pipeline
//! [`fixtures`] for scanner and propagation tests.

#![deny(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod allocator;
pub mod fixtures;

pub use allocator::{CountingAllocator, FailingAllocator};

use std::sync::Mutex;

use meridian_core::{LogLevel, Logger};

/// Logger that keeps every delivered message for later assertions.
pub struct RecordingLogger {
    messages: Mutex<Vec<(LogLevel, String)>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of all messages received so far.
    pub fn messages(&self) -> Vec<(LogLevel, String)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.messages.lock().unwrap().clear();
    }
}

impl Default for RecordingLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: LogLevel, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((level, message.to_owned()));
    }
}
