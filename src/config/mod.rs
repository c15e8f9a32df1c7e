//! Configuration and constants
//!
//! Option objects consumed by the listing and tree operations. There is
//! no configuration file; callers build these values directly.

pub mod defaults;

use crate::core::lister::SortOrder;
use crate::core::tree::TraversalOrder;

/// Options for directory listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    /// Order of sibling entries
    pub sort_order: SortOrder,
    /// Include `.` and `..` at the top level
    pub include_dots: bool,
    /// Descend into subdirectories (recursive listings only)
    pub recurse: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            sort_order: SortOrder::Ascending,
            include_dots: false,
            recurse: true,
        }
    }
}

impl ListOptions {
    #[must_use]
    pub fn sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }

    #[must_use]
    pub fn include_dots(mut self, include_dots: bool) -> Self {
        self.include_dots = include_dots;
        self
    }

    #[must_use]
    pub fn recurse(mut self, recurse: bool) -> Self {
        self.recurse = recurse;
        self
    }
}

/// Options for tree building and searching
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeOptions {
    /// Traversal strategy
    pub order: TraversalOrder,
}

impl TreeOptions {
    #[must_use]
    pub fn order(mut self, order: TraversalOrder) -> Self {
        self.order = order;
        self
    }
}
