//! Arena tree over record-wrapping nodes

use serde_json::Value;

use crate::node::{Node, NodeId};
use crate::query::TreeView;
use crate::record::Record;

/// An in-memory tree of record-wrapping nodes
///
/// The tree owns every node in an arena; parent and child links are
/// [`NodeId`] indices into it. Nodes inserted with [`Tree::push`] start
/// detached and become part of a hierarchy through [`Tree::attach`];
/// detached nodes stay in the arena and are simply unreachable from the
/// root.
///
/// Navigation and query operations live on the [`TreeView`] /
/// [`crate::TreeQuery`] traits, which this type implements.
///
/// No operation returns an error: invalid ids yield `None` or empty
/// slices, and mutations through them do nothing.
#[derive(Debug, Clone)]
pub struct Tree<R> {
    nodes: Vec<Node<R>>,
    root: Option<NodeId>,
    roots: Vec<NodeId>,
}

impl<R> Tree<R> {
    /// Create an empty tree
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            roots: Vec::new(),
        }
    }

    /// Number of nodes in the arena, attached or not
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the arena holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert a detached node wrapping `record`
    pub fn push(&mut self, record: R) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::new(record, None));
        id
    }

    /// Insert a node wrapping `record` and attach it under `parent`
    pub fn push_child(&mut self, parent: NodeId, record: R) -> NodeId {
        let id = self.push(record);
        self.attach(parent, id);
        id
    }

    /// Attach `child` under `parent`
    ///
    /// Sets the child's parent reference and appends it to the parent's
    /// children, in that order. There is no duplicate or cycle check, and
    /// attaching a node that already has a parent does not remove it from
    /// the old parent's children; keeping the structure acyclic is the
    /// caller's obligation.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        if parent.get() >= self.nodes.len() || child.get() >= self.nodes.len() {
            return;
        }
        self.nodes[child.get()].parent = Some(parent);
        self.nodes[parent.get()].children.push(child);
    }

    /// The resolved root, if any
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Construction-time root candidates, in input order
    ///
    /// Empty for hand-built trees. When construction found several
    /// disconnected roots and no default root was supplied, [`Tree::root`]
    /// resolves to the first candidate while this keeps all of them
    /// reachable.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Mark `id` as the tree's root
    pub fn set_root(&mut self, id: NodeId) {
        if id.get() < self.nodes.len() {
            self.root = Some(id);
        }
    }

    pub(crate) fn set_root_candidates(&mut self, roots: Vec<NodeId>) {
        self.roots = roots;
    }

    /// Get a node by id
    pub fn get(&self, id: NodeId) -> Option<&Node<R>> {
        self.nodes.get(id.get())
    }

    /// Get a node by id, mutably
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<R>> {
        self.nodes.get_mut(id.get())
    }

    /// The record wrapped by a node
    pub fn record(&self, id: NodeId) -> Option<&R> {
        self.get(id).map(Node::record)
    }

    /// The record wrapped by a node, mutably
    pub fn record_mut(&mut self, id: NodeId) -> Option<&mut R> {
        self.get_mut(id).map(Node::record_mut)
    }

    /// Iterate over every node id in insertion order
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId::new)
    }
}

impl<R: Record> Tree<R> {
    /// Read a field of the node's record
    pub fn field(&self, id: NodeId, key: &str) -> Option<&Value> {
        self.record(id).and_then(|record| record.get(key))
    }

    /// Whether the node's record has a non-null value for `key`
    pub fn has_field(&self, id: NodeId, key: &str) -> bool {
        self.record(id).is_some_and(|record| record.has(key))
    }

    /// Write a field of the node's record
    ///
    /// Silently dropped when the record has no keyed write capability.
    pub fn set_field(&mut self, id: NodeId, key: &str, value: Value) {
        if let Some(record) = self.record_mut(id) {
            record.set(key, value);
        }
    }

    /// Remove a field of the node's record
    ///
    /// Silently dropped when the record has no keyed write capability.
    pub fn remove_field(&mut self, id: NodeId, key: &str) {
        if let Some(record) = self.record_mut(id) {
            record.remove(key);
        }
    }
}

impl<R> Default for Tree<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> TreeView for Tree<R> {
    type Rec = R;

    fn get(&self, id: NodeId) -> Option<&Node<R>> {
        Tree::get(self, id)
    }

    fn node_count(&self) -> usize {
        Tree::node_count(self)
    }
}
