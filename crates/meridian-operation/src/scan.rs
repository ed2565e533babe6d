//! Pipeline scanning: which kernels does a composed operation invoke?
//!
//! The scan feeds dispatch-table generation for accelerated backends.
//! It is a read-only walk over one concrete pipeline: the root, then its
//! declared sub-operations as their kinds direct. Alternatives are never
//! visited; they are fallbacks, not part of the pipeline being compiled.

use indexmap::IndexSet;
use meridian_core::{KernelId, SourceFile};

use crate::kind::ScanMode;
use crate::node::OperationNode;

/// Distinct kernels and source files collected by a scan.
///
/// Both sets keep first-seen order for iteration; equality ignores
/// order. Use [`sorted_kernels`](Self::sorted_kernels) and
/// [`sorted_files`](Self::sorted_files) for reproducible output.
#[derive(Clone, Debug, Default)]
pub struct ScanResult {
    kernels: IndexSet<KernelId>,
    files: IndexSet<SourceFile>,
}

impl ScanResult {
    /// Empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Distinct kernel identities, in first-seen order.
    pub fn kernels(&self) -> &IndexSet<KernelId> {
        &self.kernels
    }

    /// Distinct source files, in first-seen order.
    pub fn files(&self) -> &IndexSet<SourceFile> {
        &self.files
    }

    /// Kernel identities sorted by name.
    pub fn sorted_kernels(&self) -> Vec<KernelId> {
        let mut kernels: Vec<KernelId> = self.kernels.iter().copied().collect();
        kernels.sort_unstable();
        kernels
    }

    /// Source files sorted by path.
    pub fn sorted_files(&self) -> Vec<SourceFile> {
        let mut files: Vec<SourceFile> = self.files.iter().copied().collect();
        files.sort_unstable();
        files
    }

    /// Whether nothing was collected.
    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty() && self.files.is_empty()
    }
}

impl PartialEq for ScanResult {
    fn eq(&self, other: &Self) -> bool {
        // IndexSet equality is already order-insensitive.
        self.kernels == other.kernels && self.files == other.files
    }
}

impl Eq for ScanResult {}

/// Collect the node's own present kernels. A node that contributed at
/// least one kernel also contributes its source file.
pub fn scan_local(node: &OperationNode<'_>, result: &mut ScanResult) {
    let mut any = false;
    for (_, kernel) in node.kernels().present() {
        result.kernels.insert(kernel.id());
        any = true;
    }
    if any {
        result.files.insert(node.source_file());
    }
}

/// [`scan_local`] on the node, then each declared sub-operation in role
/// order, scanned according to its own kind.
pub fn scan_recursive(node: &OperationNode<'_>, result: &mut ScanResult) {
    scan_local(node, result);
    for (_, sub) in node.sub_operations() {
        scan_with_mode(sub, result);
    }
}

/// Contributes nothing.
pub fn scan_noop(_node: &OperationNode<'_>, _result: &mut ScanResult) {}

/// Scan a pipeline rooted at `root`.
pub fn scan_pipeline(root: &OperationNode<'_>) -> ScanResult {
    let mut result = ScanResult::new();
    scan_with_mode(root, &mut result);
    result
}

fn scan_with_mode(node: &OperationNode<'_>, result: &mut ScanResult) {
    match node.kind().scan_mode() {
        ScanMode::Skip => scan_noop(node, result),
        ScanMode::Local => scan_local(node, result),
        ScanMode::Recursive => scan_recursive(node, result),
    }
}

impl OperationNode<'_> {
    /// Method form of [`scan_pipeline`].
    pub fn scan(&self) -> ScanResult {
        scan_pipeline(self)
    }
}
