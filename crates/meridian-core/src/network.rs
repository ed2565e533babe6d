//! Network and grid-chunk-cache settings held by a context.
//!
//! Downloading grids is out of scope here; these settings are carried so
//! that the network layer can read them from whichever context an
//! operation is bound to. Defaults are installed at context creation by
//! a [`FileManager`](crate::FileManager).

/// Configuration for the on-disk cache of downloaded grid chunks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridChunkCacheConfig {
    /// Whether downloaded chunks are cached at all. Default: true.
    pub enabled: bool,
    /// Cache database file. `None` = derived from the user-writable directory.
    pub filename: Option<String>,
    /// Upper bound on the cache size in megabytes. Default: 300.
    pub max_size_mb: u64,
    /// Seconds before a cached chunk is revalidated. Default: 86400 (one day).
    pub ttl_secs: u64,
}

impl GridChunkCacheConfig {
    /// Default cache size bound in megabytes.
    pub const DEFAULT_MAX_SIZE_MB: u64 = 300;

    /// Default revalidation interval in seconds.
    pub const DEFAULT_TTL_SECS: u64 = 86_400;
}

impl Default for GridChunkCacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            filename: None,
            max_size_mb: Self::DEFAULT_MAX_SIZE_MB,
            ttl_secs: Self::DEFAULT_TTL_SECS,
        }
    }
}

/// Network access settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkSettings {
    /// Whether remote grid access is allowed. Default: false.
    pub enabled: bool,
    /// Base URL remote grids are fetched from.
    pub endpoint: String,
    /// Grid-chunk cache configuration.
    pub grid_chunk_cache: GridChunkCacheConfig,
    /// Whether a configuration file has already been merged into these settings.
    pub config_file_loaded: bool,
}

impl NetworkSettings {
    /// Default grid endpoint.
    pub const DEFAULT_ENDPOINT: &'static str = "https://cdn.meridian-geo.org";
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: Self::DEFAULT_ENDPOINT.to_owned(),
            grid_chunk_cache: GridChunkCacheConfig::default(),
            config_file_loaded: false,
        }
    }
}

/// Parse an on/off flag from configuration text.
///
/// Accepts `on`, `yes`, `true`, `1` (case-insensitive) as enabled and
/// `off`, `no`, `false`, `0` as disabled. Anything else is `None`.
pub fn parse_network_flag(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "on" | "yes" | "true" | "1" => Some(true),
        "off" | "no" | "false" | "0" => Some(false),
        _ => None,
    }
}
