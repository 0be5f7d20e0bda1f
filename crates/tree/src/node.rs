//! Node handles and storage cells for record trees

use std::fmt;

use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique identifier for a node within a tree
///
/// Internally represented as an index into an arena-based storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(pub usize);

impl NodeId {
    /// Create a new NodeId from a usize
    pub const fn new(id: usize) -> Self {
        NodeId(id)
    }

    /// Get the inner usize value
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl From<usize> for NodeId {
    fn from(id: usize) -> Self {
        NodeId(id)
    }
}

impl From<NodeId> for usize {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// A single node in the tree
///
/// Wraps one record and tracks its parent back-reference and its ordered
/// children. Nodes are owned by the tree arena; links between them are
/// [`NodeId`] indices, so a child is owned by exactly one parent while the
/// parent back-reference carries no ownership.
#[derive(Debug, Clone)]
pub struct Node<R> {
    pub(crate) record: R,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: SmallVec<[NodeId; 4]>,
}

impl<R> Node<R> {
    pub(crate) fn new(record: R, parent: Option<NodeId>) -> Self {
        Self {
            record,
            parent,
            children: SmallVec::new(),
        }
    }

    /// The wrapped record
    pub fn record(&self) -> &R {
        &self.record
    }

    /// Mutable access to the wrapped record
    pub fn record_mut(&mut self) -> &mut R {
        &mut self.record
    }

    /// The parent back-reference, if any
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Ordered children of this node
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns true if this node has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
