//! One-shot tree construction from flat, self-referential record lists

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, trace};

use crate::node::NodeId;
use crate::record::{value_is_empty, value_to_key, Record};
use crate::tree::Tree;

/// Builds a [`Tree`] from a flat list of records
///
/// Each record carries a primary-key field identifying it and a
/// parent-key field referencing another record's primary key. The builder
/// wires every record to its resolved parent and determines the root:
///
/// - records with an empty or absent primary key are skipped;
/// - a duplicate primary key keeps the later record (last write wins);
/// - a parent key that resolves to no record leaves the node detached in
///   the arena, unreachable from the root;
/// - exactly one root candidate (empty parent key) becomes the root;
///   with several candidates a synthetic root is created when a default
///   root record was supplied, otherwise the first candidate wins and the
///   rest stay reachable through [`Tree::roots`];
/// - with no candidate at all the tree has no root.
///
/// No cycle detection or key validation is performed; callers needing
/// stricter guarantees must validate the input first.
///
/// # Example
///
/// ```
/// use record_tree::{FieldMap, TreeBuilder, TreeView};
/// use serde_json::json;
///
/// let records: Vec<FieldMap> = [
///     json!({"id": 1, "name": "root"}),
///     json!({"id": 2, "parentId": 1, "name": "leaf"}),
/// ]
/// .into_iter()
/// .map(|value| value.as_object().cloned().unwrap())
/// .collect();
///
/// let tree = TreeBuilder::new("parentId", "id").build(records);
/// let root = tree.root().unwrap();
/// assert_eq!(tree.children(root).len(), 1);
/// ```
pub struct TreeBuilder<'a, R> {
    parent_key: &'a str,
    primary_key: &'a str,
    default_root: Option<R>,
}

impl<'a, R: Record> TreeBuilder<'a, R> {
    /// Create a builder reading parent references from `parent_key` and
    /// record identity from `primary_key`
    pub fn new(parent_key: &'a str, primary_key: &'a str) -> Self {
        Self {
            parent_key,
            primary_key,
            default_root: None,
        }
    }

    /// Record to wrap in a synthetic root node when construction finds
    /// more than one root candidate
    pub fn default_root(mut self, record: R) -> Self {
        self.default_root = Some(record);
        self
    }

    /// Consume the records and build the tree
    pub fn build<I>(self, records: I) -> Tree<R>
    where
        I: IntoIterator<Item = R>,
    {
        // Insertion-ordered so that linking, and therefore children
        // order, follows the input list. Duplicate keys replace the
        // record but keep the first position.
        let mut keyed: IndexMap<String, R> = IndexMap::new();
        for record in records {
            let key = record
                .get(self.primary_key)
                .filter(|value| !value_is_empty(value))
                .and_then(value_to_key);
            match key {
                Some(key) => {
                    keyed.insert(key, record);
                }
                None => debug!(
                    "skipping record with empty or absent primary key field {:?}",
                    self.primary_key
                ),
            }
        }

        let mut tree = Tree::new();
        if keyed.is_empty() {
            return tree;
        }

        let mut by_key: HashMap<String, NodeId> = HashMap::with_capacity(keyed.len());
        let mut links: Vec<(NodeId, Option<String>)> = Vec::with_capacity(keyed.len());
        for (key, record) in keyed {
            let parent_ref = record
                .get(self.parent_key)
                .filter(|value| !value_is_empty(value))
                .and_then(value_to_key);
            let id = tree.push(record);
            by_key.insert(key, id);
            links.push((id, parent_ref));
        }

        let mut candidates = Vec::new();
        for (id, parent_ref) in links {
            match parent_ref {
                None => candidates.push(id),
                Some(reference) => match by_key.get(&reference) {
                    Some(&parent) => tree.attach(parent, id),
                    None => debug!(
                        "{} references missing parent {:?}, leaving it detached",
                        id, reference
                    ),
                },
            }
        }

        let root = match (candidates.len(), self.default_root) {
            (0, _) => None,
            (1, _) => Some(candidates[0]),
            (count, Some(default_record)) => {
                trace!("joining {} root candidates under a synthetic root", count);
                let synthetic = tree.push(default_record);
                for &candidate in &candidates {
                    tree.attach(synthetic, candidate);
                }
                Some(synthetic)
            }
            (_, None) => Some(candidates[0]),
        };

        if let Some(root) = root {
            tree.set_root(root);
        }
        tree.set_root_candidates(candidates);
        tree
    }
}
