//! Ordered search-path list with derived read-only views.
//!
//! All paths live in one owned arena (`String`), each followed by a NUL
//! byte. The list itself is a set of spans into that arena. Views are
//! derived from the arena on demand and borrow it, so no view can outlive
//! or observe a replaced list: the view array is always exactly as long
//! as the path list, and a replacement rebuilds arena and spans together.

use std::ffi::CStr;
use std::fmt;
use std::ops::Range;

use smallvec::SmallVec;

/// Search paths for resource files (grids, databases).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SearchPaths {
    arena: String,
    spans: SmallVec<[Range<usize>; 4]>,
}

impl SearchPaths {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every path with `paths`, in order.
    pub fn set<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut arena = String::new();
        let mut spans = SmallVec::new();
        for path in paths {
            let path = path.as_ref();
            let start = arena.len();
            arena.push_str(path);
            spans.push(start..arena.len());
            arena.push('\0');
        }
        self.arena = arena;
        self.spans = spans;
    }

    /// Number of paths.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Whether there are no paths.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// The path at `index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        let span = self.spans.get(index)?;
        Some(&self.arena[span.clone()])
    }

    /// Iterate over the paths in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.spans.iter().map(|span| &self.arena[span.clone()])
    }

    /// The derived view array: one borrowed `&str` per path.
    pub fn views(&self) -> Vec<&str> {
        self.iter().collect()
    }

    /// NUL-terminated views for C consumers.
    ///
    /// A path containing an interior NUL is seen by C truncated at it.
    pub fn c_views(&self) -> Vec<&CStr> {
        self.spans
            .iter()
            .filter_map(|span| {
                CStr::from_bytes_until_nul(&self.arena.as_bytes()[span.start..]).ok()
            })
            .collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SearchPaths {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut paths = Self::new();
        paths.set(iter);
        paths
    }
}

impl fmt::Debug for SearchPaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
