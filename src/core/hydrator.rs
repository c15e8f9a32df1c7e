//! Builds a [`FileTree`] from a directory on disk

use std::path::Path;
use std::sync::Arc;

use crate::config::TreeOptions;
use crate::core::tree::{self, FileInfoNode, FileTree, NodeIdAllocator, TraversalOrder};
use crate::error::{AccessError, UsageError};
use crate::infra::backend::{self, Backend};

/// Walks a directory into a tree, one node per entry
pub struct FileTreeHydrator {
    backend: Arc<dyn Backend>,
    order: TraversalOrder,
}

impl FileTreeHydrator {
    pub fn new() -> Self {
        Self::with_backend(backend::real(), &TreeOptions::default())
    }

    pub fn with_backend(backend: Arc<dyn Backend>, options: &TreeOptions) -> Self {
        Self {
            backend,
            order: options.order,
        }
    }

    /// Walk `root_dir`; ids start at 0 and the root has no parent
    pub fn hydrate(&self, root_dir: &Path) -> Result<FileTree, AccessError> {
        if !root_dir.is_dir() {
            return Err(UsageError::DirectoryDoesNotExist {
                path: root_dir.to_path_buf(),
            }
            .into());
        }

        let mut ids = NodeIdAllocator::new();
        let root = FileInfoNode::root(&mut ids, root_dir);
        let nodes = tree::search(root, self.order, &mut ids, self.backend.as_ref())?;

        // Both orders reach a parent before its children
        let mut file_tree = FileTree::new();
        for node in nodes {
            file_tree.insert(node)?;
        }

        tracing::debug!(
            "Hydrated {} nodes from {} ({})",
            file_tree.len(),
            root_dir.display(),
            self.order
        );
        Ok(file_tree)
    }
}

impl Default for FileTreeHydrator {
    fn default() -> Self {
        Self::new()
    }
}
