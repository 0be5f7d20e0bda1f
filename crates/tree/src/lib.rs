//! Tree construction and querying over flat, self-referential records
//!
//! Builds an in-memory tree from a flat list of records that reference
//! their parents by key, then provides generic navigation over the
//! result: ancestor and descendant search, predicate and field-value
//! filtering, column projection, and nested structural serialization.

mod builder;
mod node;
mod query;
mod record;
mod tree;

pub use builder::TreeBuilder;
pub use node::{Node, NodeId};
pub use query::{TreeQuery, TreeView};
pub use record::{value_is_empty, value_to_key, FieldMap, Record};
pub use tree::Tree;

/// Re-export common types for convenience
pub mod prelude {
    pub use super::{FieldMap, Node, NodeId, Record, Tree, TreeBuilder, TreeQuery, TreeView};
}
