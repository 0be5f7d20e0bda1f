//! Generic search, filter, projection and serialization over trees

use serde_json::Value;

use crate::node::{Node, NodeId};
use crate::record::{value_is_empty, value_to_key, FieldMap, Record};

/// Read access to a tree of record-wrapping nodes
///
/// The minimal surface the query engine is derived from. Implemented by
/// [`crate::Tree`]; [`TreeQuery`] is blanket-implemented on top.
pub trait TreeView {
    /// Record representation stored at each node
    type Rec: Record;

    /// Get a node by its id
    ///
    /// Returns `None` if the id is invalid.
    fn get(&self, id: NodeId) -> Option<&Node<Self::Rec>>;

    /// Get the parent of a node
    ///
    /// Returns `None` for root and detached nodes.
    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.parent())
    }

    /// Ordered children of a node
    ///
    /// Returns an empty slice for leaf nodes or invalid ids.
    fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|node| node.children()).unwrap_or(&[])
    }

    /// The record wrapped by a node
    fn record(&self, id: NodeId) -> Option<&Self::Rec> {
        self.get(id).map(Node::record)
    }

    /// Count total nodes in the tree
    fn node_count(&self) -> usize;
}

/// Extension trait providing tree search, filter and projection utilities
///
/// This trait is automatically implemented for all types that implement
/// [`TreeView`]. All operations represent absence as `None` or an empty
/// collection; nothing fails.
pub trait TreeQuery: TreeView {
    /// Walk parent references to the top of this node's chain
    ///
    /// Returns `None` when the node itself has no parent.
    fn root_of(&self, id: NodeId) -> Option<NodeId> {
        let mut top = self.parent(id)?;
        while let Some(next) = self.parent(top) {
            top = next;
        }
        Some(top)
    }

    /// All ancestors of a node, from immediate parent to root
    ///
    /// Returns an empty vector for parentless nodes.
    fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            chain.push(ancestor);
            current = self.parent(ancestor);
        }
        chain
    }

    /// First ancestor whose record satisfies `pred`, nearest first
    fn find_ancestor<F>(&self, id: NodeId, pred: F) -> Option<NodeId>
    where
        F: Fn(&Self::Rec) -> bool,
    {
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            if self.record(ancestor).is_some_and(&pred) {
                return Some(ancestor);
            }
            current = self.parent(ancestor);
        }
        None
    }

    /// All ancestors whose records satisfy `pred`, nearest first
    fn filter_ancestors<F>(&self, id: NodeId, pred: F) -> Vec<NodeId>
    where
        F: Fn(&Self::Rec) -> bool,
    {
        let mut matches = Vec::new();
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            if self.record(ancestor).is_some_and(&pred) {
                matches.push(ancestor);
            }
            current = self.parent(ancestor);
        }
        matches
    }

    /// First ancestor whose `key` field is a member of `values`
    ///
    /// An empty `values` set matches nothing and returns without walking;
    /// null or absent fields never match.
    fn find_ancestor_by_value(&self, id: NodeId, key: &str, values: &[Value]) -> Option<NodeId> {
        if values.is_empty() {
            return None;
        }
        self.find_ancestor(id, |record| field_matches(record, key, values))
    }

    /// All ancestors whose `key` field is a member of `values`, nearest first
    fn filter_ancestors_by_value(&self, id: NodeId, key: &str, values: &[Value]) -> Vec<NodeId> {
        if values.is_empty() {
            return Vec::new();
        }
        self.filter_ancestors(id, |record| field_matches(record, key, values))
    }

    /// First node below `id` whose record satisfies `pred`
    ///
    /// Depth-first pre-order: each child is tested before its own subtree
    /// is entered, siblings left to right. The node itself is not tested.
    fn find_descendant<F>(&self, id: NodeId, pred: F) -> Option<NodeId>
    where
        F: Fn(&Self::Rec) -> bool,
    {
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            if self.record(next).is_some_and(&pred) {
                return Some(next);
            }
            stack.extend(self.children(next).iter().rev());
        }
        None
    }

    /// All nodes below `id` whose records satisfy `pred`, in the same
    /// pre-order as [`TreeQuery::find_descendant`]
    fn filter_descendants<F>(&self, id: NodeId, pred: F) -> Vec<NodeId>
    where
        F: Fn(&Self::Rec) -> bool,
    {
        let mut matches = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            if self.record(next).is_some_and(&pred) {
                matches.push(next);
            }
            stack.extend(self.children(next).iter().rev());
        }
        matches
    }

    /// First descendant whose `key` field is a member of `values`
    ///
    /// Same membership rule as [`TreeQuery::find_ancestor_by_value`].
    fn find_descendant_by_value(&self, id: NodeId, key: &str, values: &[Value]) -> Option<NodeId> {
        if values.is_empty() {
            return None;
        }
        self.find_descendant(id, |record| field_matches(record, key, values))
    }

    /// All descendants whose `key` field is a member of `values`, in pre-order
    fn filter_descendants_by_value(&self, id: NodeId, key: &str, values: &[Value]) -> Vec<NodeId> {
        if values.is_empty() {
            return Vec::new();
        }
        self.filter_descendants(id, |record| field_matches(record, key, values))
    }

    /// Project the `value_key` field of each listed node, in order
    ///
    /// Absent fields project as null.
    fn column(&self, ids: &[NodeId], value_key: &str) -> Vec<Value> {
        ids.iter()
            .map(|&id| {
                self.record(id)
                    .and_then(|record| record.get(value_key))
                    .cloned()
                    .unwrap_or(Value::Null)
            })
            .collect()
    }

    /// Project the `value_key` field keyed by each node's `key_key` value
    ///
    /// Entries whose computed key is empty or absent are appended under
    /// the next positional index, rendered as a string. Later duplicate
    /// keys overwrite the value but keep the first insertion position.
    fn keyed_column(&self, ids: &[NodeId], value_key: &str, key_key: &str) -> FieldMap {
        let mut projection = FieldMap::new();
        let mut next_index = 0usize;
        for &id in ids {
            let value = self
                .record(id)
                .and_then(|record| record.get(value_key))
                .cloned()
                .unwrap_or(Value::Null);
            let key = self
                .record(id)
                .and_then(|record| record.get(key_key))
                .filter(|candidate| !value_is_empty(candidate))
                .and_then(value_to_key);
            match key {
                Some(key) => {
                    projection.insert(key, value);
                }
                None => {
                    projection.insert(next_index.to_string(), value);
                    next_index += 1;
                }
            }
        }
        projection
    }

    /// Map the subtree rooted at `id` to a nested structural form
    ///
    /// `transform` produces the base mapping for each node; the recursive
    /// results for its children are injected under `children_key` at
    /// every level. Stack depth is bounded by tree depth.
    fn map_structure(
        &self,
        id: NodeId,
        children_key: &str,
        transform: &dyn Fn(&Self, NodeId) -> FieldMap,
    ) -> FieldMap
    where
        Self: Sized,
    {
        let mut structure = transform(self, id);
        let children: Vec<Value> = self
            .children(id)
            .iter()
            .map(|&child| Value::Object(self.map_structure(child, children_key, transform)))
            .collect();
        structure.insert(children_key.to_string(), Value::Array(children));
        structure
    }

    /// Canonical nested serialization of the subtree rooted at `id`
    ///
    /// The record's own structural form (or an empty mapping if it has
    /// none) merged with a `children` array holding the recursive
    /// serialization of every child; leaves carry `children: []`.
    fn to_value(&self, id: NodeId) -> Value
    where
        Self: Sized,
    {
        Value::Object(self.map_structure(id, "children", &|tree, node| {
            tree.record(node)
                .and_then(|record| record.to_object())
                .unwrap_or_default()
        }))
    }
}

// Blanket implementation for all TreeView types
impl<T: TreeView> TreeQuery for T {}

fn field_matches<R: Record>(record: &R, key: &str, values: &[Value]) -> bool {
    match record.get(key) {
        Some(value) if !value.is_null() => values.contains(value),
        _ => false,
    }
}
