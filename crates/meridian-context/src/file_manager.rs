//! Default [`FileManager`] installed on new contexts.

use meridian_core::{FileManager, NetworkSettings};

/// File manager used when none is supplied at context creation.
///
/// Installs [`NetworkSettings::default`]: networking off, the default
/// endpoint, and the grid-chunk cache enabled with its default bounds.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultFileManager;

impl FileManager for DefaultFileManager {
    fn fill_default_network_settings(&self, settings: &mut NetworkSettings) {
        *settings = NetworkSettings::default();
    }
}
