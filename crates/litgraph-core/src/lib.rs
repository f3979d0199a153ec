//! Core data model for litgraph: node records, the node store, and the
//! object model shared by every converter.
//!
//! A litgraph is a set of numbered records of three kinds:
//!
//! - **Instance**: a typed object (`#1 = I("type1")`)
//! - **Attribute**: a name/value pair attached to an instance
//! - **Relation**: a named link between two records
//!
//! The store itself holds no persistence logic; see `litgraph-text` for the
//! textual encoding.

pub mod hash;
pub mod node;
pub mod object;
pub mod store;

pub use hash::{content_hash, hash_hex, ContentHash};
pub use node::{AttributeNode, InstanceNode, Node, NodeKind, NodeNumber, RelationNode};
pub use object::{Object, ObjectSink, ObjectSource, ObjectValue};
pub use store::{DanglingReference, KindCounts, NodeStore, StoreError};
