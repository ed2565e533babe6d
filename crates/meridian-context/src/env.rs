//! Environment variables consulted when a context is created.
//!
//! Creation reads the environment through an [`EnvSource`] so tests and
//! embedders can supply a fixed environment instead of the process one.

use std::collections::HashMap;

/// Initial debug level (integer; clamped, unparseable values ignored).
pub const DEBUG_ENV: &str = "MERIDIAN_DEBUG";

/// Data directory hint cached on the context for file finders.
pub const DATA_ENV: &str = "MERIDIAN_DATA";

/// Default network switch (`ON`/`OFF`, `YES`/`NO`, `TRUE`/`FALSE`, `1`/`0`).
pub const NETWORK_ENV: &str = "MERIDIAN_NETWORK";

/// Where environment variables are read from.
#[derive(Clone, Debug, Default)]
pub enum EnvSource {
    /// The process environment.
    #[default]
    Process,
    /// A fixed set of variables; anything else is unset.
    Fixed(HashMap<String, String>),
}

impl EnvSource {
    /// An environment with no variables set.
    pub fn empty() -> Self {
        Self::Fixed(HashMap::new())
    }

    /// A fixed environment built from `(name, value)` pairs.
    pub fn fixed<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Fixed(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Look up one variable. Non-UTF-8 process values count as unset.
    pub fn var(&self, name: &str) -> Option<String> {
        match self {
            Self::Process => std::env::var(name).ok(),
            Self::Fixed(vars) => vars.get(name).cloned(),
        }
    }
}
