//! The [`ExecutionContext`] and its lifecycle: create, clone, default instance.

use std::alloc::{handle_alloc_error, Layout};
use std::fmt;
use std::sync::{Arc, OnceLock};

use meridian_arena::{system_allocator, AllocBox, AllocatorRef, MappedGuard};
use meridian_core::{
    parse_debug_level, parse_network_flag, ContextError, ContextId, DebugLevel, FileFinder,
    FileManager, LogLevel, Logger, NetworkSettings,
};

use crate::env::{EnvSource, DATA_ENV, DEBUG_ENV, NETWORK_ENV};
use crate::extended::ExtendedContext;
use crate::file_manager::DefaultFileManager;
use crate::logger::default_logger;
use crate::search_path::SearchPaths;
use crate::shared::SharedState;

/// Algorithm selector for transverse Mercator operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TmercAlgorithm {
    /// Pick per call based on distance from the central meridian.
    Auto,
    /// Evenden/Snyder series (fast, accurate near the central meridian).
    EvendenSnyder,
    /// Poder/Engsager (accurate far from the central meridian).
    #[default]
    PoderEngsager,
}

/// Inputs for [`ExecutionContext::with_options`].
#[derive(Clone, Default)]
pub struct ContextOptions {
    /// Allocator for the shared state block. `None` = process-wide system allocator.
    pub allocator: Option<AllocatorRef>,
    /// Supplies default network settings. `None` = [`DefaultFileManager`].
    pub file_manager: Option<Arc<dyn FileManager>>,
    /// Where `MERIDIAN_*` variables are read from.
    pub env: EnvSource,
}

/// Configuration and resource owner referenced by every operation.
///
/// # Ownership
///
/// The context exclusively owns its [`SharedState`] block (released
/// through the allocator that produced it), its search paths, and its
/// [`ExtendedContext`]. Nothing else holds an owning handle to them, so
/// they are released exactly once, when the context drops. The allocator,
/// logger, and file finder are shared handles supplied from outside.
///
/// # Cloning
///
/// There is deliberately no `Clone` impl: cloning allocates and can fail.
/// Use [`try_clone`](Self::try_clone) or [`clone_in`](Self::clone_in).
pub struct ExecutionContext {
    id: ContextId,
    allocator: AllocatorRef,
    // Declared before `shared`: the extended context is torn down first.
    extended: OnceLock<ExtendedContext>,
    shared: AllocBox<SharedState>,
    debug_level: DebugLevel,
    logger: Arc<dyn Logger>,
    search_paths: SearchPaths,
    ca_bundle_path: Option<String>,
    network: NetworkSettings,
    tmerc_algorithm: TmercAlgorithm,
    use_legacy_init_rules: bool,
    epsg_file_exists: Option<bool>,
    file_finder: Option<Arc<dyn FileFinder>>,
    custom_vfs_name: Option<String>,
    user_writable_directory: Option<String>,
    data_dir_env: Option<String>,
}

impl ExecutionContext {
    /// Create a context with environment-derived defaults.
    ///
    /// Uses the process-wide system allocator when `allocator` is `None`.
    /// Fails only if the allocator cannot provide the shared state block.
    pub fn create(allocator: Option<AllocatorRef>) -> Result<Self, ContextError> {
        Self::with_options(ContextOptions {
            allocator,
            ..ContextOptions::default()
        })
    }

    /// Create a context from explicit options.
    ///
    /// Order of initialisation:
    ///
    /// 1. debug level = error, default logger installed;
    /// 2. network settings filled by the file manager;
    /// 3. `MERIDIAN_DEBUG`, `MERIDIAN_NETWORK`, `MERIDIAN_DATA` applied.
    pub fn with_options(options: ContextOptions) -> Result<Self, ContextError> {
        let allocator = options.allocator.unwrap_or_else(system_allocator);
        let shared = AllocBox::try_new_in(SharedState::default(), allocator.clone())?;

        let mut ctx = Self {
            id: ContextId::next(),
            allocator,
            extended: OnceLock::new(),
            shared,
            debug_level: DebugLevel::DEFAULT,
            logger: default_logger(),
            search_paths: SearchPaths::new(),
            ca_bundle_path: None,
            network: NetworkSettings::default(),
            tmerc_algorithm: TmercAlgorithm::default(),
            use_legacy_init_rules: false,
            epsg_file_exists: None,
            file_finder: None,
            custom_vfs_name: None,
            user_writable_directory: None,
            data_dir_env: None,
        };

        let file_manager = options
            .file_manager
            .unwrap_or_else(|| Arc::new(DefaultFileManager));
        file_manager.fill_default_network_settings(&mut ctx.network);

        if let Some(level) = options.env.var(DEBUG_ENV).as_deref().and_then(parse_debug_level) {
            ctx.debug_level = level;
        }
        if let Some(enabled) = options
            .env
            .var(NETWORK_ENV)
            .as_deref()
            .and_then(parse_network_flag)
        {
            ctx.network.enabled = enabled;
        }
        ctx.data_dir_env = options.env.var(DATA_ENV);

        Ok(ctx)
    }

    /// The process-wide default context.
    ///
    /// Built on first use, exactly once, even under concurrent first
    /// calls. It lives for the rest of the process and is read-only;
    /// clone it to get a context you can configure.
    ///
    /// Allocation failure here has no caller to report to and goes
    /// through [`handle_alloc_error`], like any failed global allocation.
    pub fn global() -> &'static ExecutionContext {
        static DEFAULT: OnceLock<ExecutionContext> = OnceLock::new();
        DEFAULT.get_or_init(|| match Self::create(None) {
            Ok(ctx) => ctx,
            Err(ContextError::AllocationFailed { .. }) => {
                handle_alloc_error(Layout::new::<SharedState>())
            }
        })
    }

    /// Clone into a new, independent context using the same allocator.
    pub fn try_clone(&self) -> Result<Self, ContextError> {
        self.clone_in(None)
    }

    /// Clone into a new, independent context.
    ///
    /// All configuration is deep-copied. The search paths are rebuilt
    /// over the clone's own storage; the shared state is value-copied
    /// into a fresh block from `allocator` (or this context's allocator);
    /// an extended context, if this one has been created, is cloned and
    /// bound to the new context, otherwise the clone creates its own
    /// lazily. Fails only on allocation failure.
    pub fn clone_in(&self, allocator: Option<AllocatorRef>) -> Result<Self, ContextError> {
        let allocator = allocator.unwrap_or_else(|| self.allocator.clone());
        let shared = self.shared.try_clone_in(allocator.clone())?;
        let id = ContextId::next();
        let extended = match self.extended.get() {
            Some(ext) => OnceLock::from(ext.clone_for(id)),
            None => OnceLock::new(),
        };

        let clone = Self {
            id,
            allocator,
            extended,
            shared,
            debug_level: self.debug_level,
            logger: self.logger.clone(),
            search_paths: self.search_paths.iter().collect(),
            ca_bundle_path: self.ca_bundle_path.clone(),
            network: self.network.clone(),
            tmerc_algorithm: self.tmerc_algorithm,
            use_legacy_init_rules: self.use_legacy_init_rules,
            epsg_file_exists: self.epsg_file_exists,
            file_finder: self.file_finder.clone(),
            custom_vfs_name: self.custom_vfs_name.clone(),
            user_writable_directory: self.user_writable_directory.clone(),
            data_dir_env: self.data_dir_env.clone(),
        };
        if clone.enabled(LogLevel::Trace) {
            clone.log(LogLevel::Trace, &format!("{} cloned from {}", clone.id, self.id));
        }
        Ok(clone)
    }

    /// Unique identity of this context instance.
    pub fn id(&self) -> ContextId {
        self.id
    }

    /// The allocator the shared state block lives in.
    pub fn allocator(&self) -> &AllocatorRef {
        &self.allocator
    }

    // ── Shared state ───────────────────────────────────────────────

    /// Read access to the shared state block.
    pub fn shared(&self) -> &SharedState {
        &self.shared
    }

    /// Write access to the shared state block, bracketed by the
    /// allocator's host-mapping notifications.
    pub fn shared_mut(&mut self) -> MappedGuard<'_, SharedState> {
        self.shared.map()
    }

    /// Last error number raised on this context (0 = none).
    pub fn last_errno(&self) -> i32 {
        self.shared.last_errno
    }

    /// Record (or with 0, clear) the pending error number.
    pub fn set_last_errno(&mut self, errno: i32) {
        self.shared_mut().last_errno = errno;
    }

    // ── Logging ────────────────────────────────────────────────────

    /// Current debug level.
    pub fn debug_level(&self) -> DebugLevel {
        self.debug_level
    }

    /// Replace the debug level.
    pub fn set_debug_level(&mut self, level: DebugLevel) {
        self.debug_level = level;
    }

    /// The installed logger.
    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }

    /// Install a logger; its captured state plays the role of user data.
    pub fn set_logger(&mut self, logger: Arc<dyn Logger>) {
        self.logger = logger;
    }

    /// Go back to the default stream logger.
    pub fn reset_logger(&mut self) {
        self.logger = default_logger();
    }

    /// Whether a message at `level` would currently be delivered.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::None && self.debug_level.allows(level, self.shared.error_pending())
    }

    /// Deliver `message` to the logger if the debug level allows it.
    pub fn log(&self, level: LogLevel, message: &str) {
        if self.enabled(level) {
            self.logger.log(level, message);
        }
    }

    // ── Extended context ───────────────────────────────────────────

    /// The extended context, created and bound to this context on first call.
    pub fn extended(&self) -> &ExtendedContext {
        self.extended.get_or_init(|| {
            self.log(LogLevel::Debug, &format!("creating extended context for {}", self.id));
            ExtendedContext::new(self.id)
        })
    }

    /// Mutable access to the extended context, creating it if needed.
    pub fn extended_mut(&mut self) -> &mut ExtendedContext {
        self.extended();
        match self.extended.get_mut() {
            Some(ext) => ext,
            None => unreachable!("extended context initialised just above"),
        }
    }

    /// Whether the extended context has been created yet.
    pub fn has_extended(&self) -> bool {
        self.extended.get().is_some()
    }

    // ── Search paths ───────────────────────────────────────────────

    /// Resource search paths and their derived views.
    pub fn search_paths(&self) -> &SearchPaths {
        &self.search_paths
    }

    /// Replace the search paths. The derived views are rebuilt with them.
    pub fn set_search_paths<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.search_paths.set(paths);
        if self.enabled(LogLevel::Trace) {
            self.log(
                LogLevel::Trace,
                &format!("search paths set: {:?}", self.search_paths),
            );
        }
    }

    // ── Network ────────────────────────────────────────────────────

    /// Certificate bundle used for network access, if overridden.
    pub fn ca_bundle_path(&self) -> Option<&str> {
        self.ca_bundle_path.as_deref()
    }

    /// Override the certificate bundle path.
    pub fn set_ca_bundle_path(&mut self, path: impl Into<String>) {
        self.ca_bundle_path = Some(path.into());
    }

    /// Go back to the system certificate store.
    pub fn clear_ca_bundle_path(&mut self) {
        self.ca_bundle_path = None;
    }

    /// Network and grid-cache settings.
    pub fn network(&self) -> &NetworkSettings {
        &self.network
    }

    /// Mutable network and grid-cache settings.
    pub fn network_mut(&mut self) -> &mut NetworkSettings {
        &mut self.network
    }

    /// Whether remote grid access is enabled.
    pub fn is_network_enabled(&self) -> bool {
        self.network.enabled
    }

    /// Enable or disable remote grid access.
    pub fn set_network_enabled(&mut self, enabled: bool) {
        self.network.enabled = enabled;
    }

    // ── Behaviour flags ────────────────────────────────────────────

    /// Transverse Mercator algorithm selector.
    pub fn tmerc_algorithm(&self) -> TmercAlgorithm {
        self.tmerc_algorithm
    }

    /// Change the transverse Mercator algorithm selector.
    pub fn set_tmerc_algorithm(&mut self, algorithm: TmercAlgorithm) {
        self.tmerc_algorithm = algorithm;
    }

    /// Whether legacy initialisation rules (axis order, `+init=`) apply.
    pub fn use_legacy_init_rules(&self) -> bool {
        self.use_legacy_init_rules
    }

    /// Switch legacy initialisation rules on or off.
    pub fn set_use_legacy_init_rules(&mut self, enabled: bool) {
        self.use_legacy_init_rules = enabled;
    }

    /// Cached answer to "does the legacy EPSG init file exist?". `None` = not probed.
    pub fn epsg_file_exists(&self) -> Option<bool> {
        self.epsg_file_exists
    }

    /// Record the EPSG init file probe result.
    pub fn set_epsg_file_exists(&mut self, exists: Option<bool>) {
        self.epsg_file_exists = exists;
    }

    // ── File access ────────────────────────────────────────────────

    /// The installed file finder.
    pub fn file_finder(&self) -> Option<&Arc<dyn FileFinder>> {
        self.file_finder.as_ref()
    }

    /// Install or remove a file finder.
    pub fn set_file_finder(&mut self, finder: Option<Arc<dyn FileFinder>>) {
        self.file_finder = finder;
    }

    /// Name of a custom virtual file system for database access.
    pub fn custom_vfs_name(&self) -> Option<&str> {
        self.custom_vfs_name.as_deref()
    }

    /// Set or clear the custom virtual file system name.
    pub fn set_custom_vfs_name(&mut self, name: Option<String>) {
        self.custom_vfs_name = name;
    }

    /// Directory downloaded grids and caches are written to.
    pub fn user_writable_directory(&self) -> Option<&str> {
        self.user_writable_directory.as_deref()
    }

    /// Set or clear the user-writable directory.
    pub fn set_user_writable_directory(&mut self, dir: Option<String>) {
        self.user_writable_directory = dir;
    }

    /// Value of `MERIDIAN_DATA` captured at creation.
    pub fn data_dir_env(&self) -> Option<&str> {
        self.data_dir_env.as_deref()
    }
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("id", &self.id)
            .field("debug_level", &self.debug_level)
            .field("shared", &*self.shared)
            .field("search_paths", &self.search_paths)
            .field("ca_bundle_path", &self.ca_bundle_path)
            .field("network", &self.network)
            .field("tmerc_algorithm", &self.tmerc_algorithm)
            .field("has_extended", &self.has_extended())
            .finish_non_exhaustive()
    }
}
