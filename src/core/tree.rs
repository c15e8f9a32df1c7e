//! File nodes, trees and live traversal
//!
//! A [`FileInfoNode`] is a path with an id and a parent id. Its children are
//! discovered by listing the directory again, so a search over nodes always
//! reflects the filesystem as it is now. A [`FileTree`] is the materialized
//! result of a full walk.

use std::collections::{BTreeMap, VecDeque};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::core::diagnostic::{Diagnostic, MessageId};
use crate::error::UsageError;
use crate::infra::backend::Backend;

/// Identity of a node within one tree
pub type NodeId = usize;

/// Hands out node ids for a single walk
#[derive(Debug, Clone, Default)]
pub struct NodeIdAllocator {
    next: NodeId,
}

impl NodeIdAllocator {
    /// Allocator whose first id is 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocator whose first id is `first`
    pub fn starting_at(first: NodeId) -> Self {
        Self { next: first }
    }

    /// Take the next unused id
    pub fn next_id(&mut self) -> NodeId {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Number of ids this allocator would hand out next
    pub fn peek(&self) -> NodeId {
        self.next
    }
}

/// A filesystem entry with tree identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfoNode {
    node_id: NodeId,
    parent_id: Option<NodeId>,
    path: PathBuf,
}

impl FileInfoNode {
    pub fn new(node_id: NodeId, parent_id: Option<NodeId>, path: impl Into<PathBuf>) -> Self {
        Self {
            node_id,
            parent_id,
            path: path.into(),
        }
    }

    /// Parentless node with a freshly allocated id
    pub fn root(ids: &mut NodeIdAllocator, path: impl Into<PathBuf>) -> Self {
        Self::new(ids.next_id(), None, path)
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn parent_id(&self) -> Option<NodeId> {
        self.parent_id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Last path component, or the whole path when there is none
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |name| name.to_string_lossy().into_owned())
    }

    /// Whether the node is a directory to descend into
    ///
    /// The root follows a symbolic link, as the caller's directory check did.
    /// Links below the root are leaves.
    pub fn is_dir(&self) -> bool {
        let metadata = if self.is_root() {
            std::fs::metadata(&self.path)
        } else {
            std::fs::symlink_metadata(&self.path)
        };
        metadata.is_ok_and(|metadata| metadata.is_dir())
    }

    /// Immediate children, sorted by name, each with a fresh id
    ///
    /// Anything that is not a real directory has no children.
    pub fn children(&self, ids: &mut NodeIdAllocator, backend: &dyn Backend) -> Result<Vec<FileInfoNode>, Diagnostic> {
        if !self.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = backend
            .read_dir(&self.path)
            .map_err(|e| Diagnostic::for_dir(MessageId::DirectoryNotListable, &self.path).with_os_error(&e))?;
        names.sort();

        Ok(names
            .into_iter()
            .map(|name| FileInfoNode::new(ids.next_id(), Some(self.node_id), self.path.join(name)))
            .collect())
    }
}

/// Traversal strategy for searches and hydration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalOrder {
    /// Level order
    #[default]
    BreadthFirst,
    /// Pre-order, first child fully before the second
    DepthFirst,
}

impl std::fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BreadthFirst => write!(f, "bfs"),
            Self::DepthFirst => write!(f, "dfs"),
        }
    }
}

impl FromStr for TraversalOrder {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bfs" | "breadth-first" => Ok(Self::BreadthFirst),
            "dfs" | "depth-first" => Ok(Self::DepthFirst),
            other => Err(UsageError::InvalidTraversalOrder {
                value: other.to_string(),
            }),
        }
    }
}

/// Visit every node reachable from `start` in `order`
///
/// Children are listed live as the search reaches them. Symbolic links are
/// leaves, so the search terminates even over link cycles.
pub fn search(
    start: FileInfoNode,
    order: TraversalOrder,
    ids: &mut NodeIdAllocator,
    backend: &dyn Backend,
) -> Result<Vec<FileInfoNode>, Diagnostic> {
    let mut visited = Vec::new();

    match order {
        TraversalOrder::BreadthFirst => {
            let mut queue = VecDeque::from([start]);
            while let Some(node) = queue.pop_front() {
                queue.extend(node.children(ids, backend)?);
                visited.push(node);
            }
        }
        TraversalOrder::DepthFirst => {
            let mut stack = vec![start];
            while let Some(node) = stack.pop() {
                stack.extend(node.children(ids, backend)?.into_iter().rev());
                visited.push(node);
            }
        }
    }

    Ok(visited)
}

/// Materialized tree of file nodes
#[derive(Debug, Clone, Default)]
pub struct FileTree {
    nodes: BTreeMap<NodeId, FileInfoNode>,
    /// Parent id -> child ids in insertion order
    children: BTreeMap<NodeId, Vec<NodeId>>,
    root: Option<NodeId>,
}

impl FileTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node whose parent, if any, is already present
    pub fn insert(&mut self, node: FileInfoNode) -> Result<(), UsageError> {
        let node_id = node.node_id();
        if self.nodes.contains_key(&node_id) {
            return Err(UsageError::DuplicateNodeId { node_id });
        }

        match node.parent_id() {
            None => {
                if let Some(root_id) = self.root {
                    return Err(UsageError::RootAlreadySet { node_id, root_id });
                }
                self.root = Some(node_id);
            }
            Some(parent_id) => {
                if !self.nodes.contains_key(&parent_id) {
                    return Err(UsageError::UnknownParent { node_id, parent_id });
                }
                self.children.entry(parent_id).or_default().push(node_id);
            }
        }

        self.nodes.insert(node_id, node);
        Ok(())
    }

    pub fn get(&self, node_id: NodeId) -> Option<&FileInfoNode> {
        self.nodes.get(&node_id)
    }

    pub fn root(&self) -> Option<&FileInfoNode> {
        self.root.and_then(|id| self.nodes.get(&id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes ordered by id
    pub fn nodes(&self) -> impl Iterator<Item = &FileInfoNode> {
        self.nodes.values()
    }

    pub fn children_of(&self, node_id: NodeId) -> Vec<&FileInfoNode> {
        self.children
            .get(&node_id)
            .map(|ids| ids.iter().filter_map(|id| self.nodes.get(id)).collect())
            .unwrap_or_default()
    }

    /// Level-order enumeration from the root
    pub fn breadth_first(&self) -> Vec<&FileInfoNode> {
        let mut visited = Vec::with_capacity(self.len());
        let mut queue: VecDeque<&FileInfoNode> = self.root().into_iter().collect();
        while let Some(node) = queue.pop_front() {
            queue.extend(self.children_of(node.node_id()));
            visited.push(node);
        }
        visited
    }

    /// Pre-order enumeration from the root
    pub fn depth_first(&self) -> Vec<&FileInfoNode> {
        let mut visited = Vec::with_capacity(self.len());
        let mut stack: Vec<&FileInfoNode> = self.root().into_iter().collect();
        while let Some(node) = stack.pop() {
            stack.extend(self.children_of(node.node_id()).into_iter().rev());
            visited.push(node);
        }
        visited
    }

    /// Enumerate in the given order
    pub fn traverse(&self, order: TraversalOrder) -> Vec<&FileInfoNode> {
        match order {
            TraversalOrder::BreadthFirst => self.breadth_first(),
            TraversalOrder::DepthFirst => self.depth_first(),
        }
    }

    /// Format as tree string
    pub fn format_tree(&self) -> String {
        let Some(root) = self.root() else {
            return "Empty tree".to_string();
        };

        let mut output = format!("{}\n", root.path().display());
        let children = self.children_of(root.node_id());
        for (i, child) in children.iter().enumerate() {
            self.format_node(&mut output, child, "", i == children.len() - 1);
        }
        output
    }

    fn format_node(&self, output: &mut String, node: &FileInfoNode, prefix: &str, is_last: bool) {
        let connector = if is_last { "└── " } else { "├── " };
        output.push_str(&format!("{prefix}{connector}{}\n", node.name()));

        let child_prefix = if is_last {
            format!("{prefix}    ")
        } else {
            format!("{prefix}│   ")
        };
        let children = self.children_of(node.node_id());
        for (i, child) in children.iter().enumerate() {
            self.format_node(output, child, &child_prefix, i == children.len() - 1);
        }
    }
}
