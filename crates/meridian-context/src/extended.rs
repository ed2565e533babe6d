//! The extended secondary context.
//!
//! Holds state for the database and lookup layer. It is created lazily
//! the first time a context is asked for it, stays bound to that context
//! (by [`ContextId`]), and is torn down with it.

use indexmap::IndexMap;
use meridian_core::ContextId;

/// Per-context state for the lookup layer.
#[derive(Debug)]
pub struct ExtendedContext {
    owner: ContextId,
    database_path: Option<String>,
    auxiliary_database_paths: Vec<String>,
    lookup_cache: IndexMap<String, String>,
}

impl ExtendedContext {
    /// Create an empty extended context bound to `owner`.
    pub fn new(owner: ContextId) -> Self {
        Self {
            owner,
            database_path: None,
            auxiliary_database_paths: Vec::new(),
            lookup_cache: IndexMap::new(),
        }
    }

    /// The context this extended context belongs to.
    pub fn owner(&self) -> ContextId {
        self.owner
    }

    /// Main database path, if one was set.
    pub fn database_path(&self) -> Option<&str> {
        self.database_path.as_deref()
    }

    /// Auxiliary database paths, in attach order.
    pub fn auxiliary_database_paths(&self) -> &[String] {
        &self.auxiliary_database_paths
    }

    /// Point the lookup layer at a different database set.
    ///
    /// Cached lookups were answered by the old databases and are dropped.
    pub fn set_database_paths(&mut self, main: Option<String>, auxiliary: Vec<String>) {
        self.database_path = main;
        self.auxiliary_database_paths = auxiliary;
        self.lookup_cache.clear();
    }

    /// Cached answer for `key`.
    pub fn cached(&self, key: &str) -> Option<&str> {
        self.lookup_cache.get(key).map(String::as_str)
    }

    /// Remember an answer.
    pub fn cache(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.lookup_cache.insert(key.into(), value.into());
    }

    /// Number of cached answers.
    pub fn cache_len(&self) -> usize {
        self.lookup_cache.len()
    }

    /// Copy for a cloned context.
    ///
    /// Database configuration carries over; the cache does not, since a
    /// clone is meant to be used independently (often on another thread).
    pub fn clone_for(&self, owner: ContextId) -> Self {
        Self {
            owner,
            database_path: self.database_path.clone(),
            auxiliary_database_paths: self.auxiliary_database_paths.clone(),
            lookup_cache: IndexMap::new(),
        }
    }
}
