//! Strongly-typed identifiers for contexts, kernels, and source files.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`ContextId`] allocation.
static CONTEXT_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for an execution context.
///
/// Allocated from a monotonic atomic counter via [`ContextId::next`].
/// Every constructed context gets a fresh ID, and so does every clone:
/// a clone is a distinct owner of distinct resources. Secondary objects
/// that must stay bound to one context (the extended context, loaded
/// grids) record the ID instead of a back-pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(u64);

impl ContextId {
    /// Allocate a fresh, unique context ID. Thread-safe.
    pub fn next() -> Self {
        Self(CONTEXT_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ctx#{}", self.0)
    }
}

/// Stable identity of a transformation kernel.
///
/// Kernels are identified by their module-qualified static name
/// (e.g. `"meridian::helmert::forward_3d"`), never by function address.
/// The name survives relocation, copying, and process boundaries, so a
/// dispatch table generated from a scan is reproducible across builds.
///
/// Use the [`kernel_id!`](crate::kernel_id) macro to derive the name
/// from the call site's module path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KernelId(&'static str);

impl KernelId {
    /// Wrap a static kernel name.
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The interned name.
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for KernelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Build a [`KernelId`] named `<module_path>::<ident>`.
///
/// ```
/// use meridian_core::{kernel_id, KernelId};
///
/// const FWD: KernelId = kernel_id!(forward_3d);
/// assert!(FWD.name().ends_with("::forward_3d"));
/// ```
#[macro_export]
macro_rules! kernel_id {
    ($name:ident) => {
        $crate::id::KernelId::new(concat!(module_path!(), "::", stringify!($name)))
    };
}

/// Identifier of the source file an operation's kernels are defined in.
///
/// The accelerated backend compiles kernels from source, so the scan
/// records which files must be pulled in. Typically produced with
/// [`source_file!`](crate::source_file).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceFile(&'static str);

impl SourceFile {
    /// Wrap a static file path.
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    /// The file path as recorded at compile time.
    pub const fn path(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// The [`SourceFile`] of the invoking file.
#[macro_export]
macro_rules! source_file {
    () => {
        $crate::id::SourceFile::new(file!())
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_ids_are_unique() {
        let a = ContextId::next();
        let b = ContextId::next();
        assert_ne!(a, b);
        assert!(b.get() > a.get());
    }

    #[test]
    fn kernel_id_macro_qualifies_with_module_path() {
        let id = kernel_id!(inverse_2d);
        assert_eq!(id.name(), "meridian_core::id::tests::inverse_2d");
    }

    #[test]
    fn kernel_ids_compare_by_name() {
        assert_eq!(KernelId::new("a::fwd"), KernelId::new("a::fwd"));
        assert_ne!(KernelId::new("a::fwd"), KernelId::new("b::fwd"));
    }

    #[test]
    fn source_file_macro_records_this_file() {
        let file = source_file!();
        assert!(file.path().ends_with("id.rs"));
    }
}
