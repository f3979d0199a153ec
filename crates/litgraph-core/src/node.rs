//! Node record types.
//!
//! A node is one addressable record in a litgraph store: a typed instance,
//! an attribute attached to an instance, or a named relation between two
//! nodes. Records are identified by their `number` alone.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Store-unique record number. Also used for references between records.
pub type NodeNumber = i32;

/// Discriminant of the three record shapes, as written in the text format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeKind {
    Instance,
    Attribute,
    Relation,
}

impl NodeKind {
    /// All kinds in tag order.
    pub const ALL: [NodeKind; 3] = [NodeKind::Instance, NodeKind::Attribute, NodeKind::Relation];

    /// The single-byte tag used in the text format.
    pub fn tag(self) -> u8 {
        match self {
            NodeKind::Instance => b'I',
            NodeKind::Attribute => b'A',
            NodeKind::Relation => b'R',
        }
    }

    /// Map a tag byte back to its kind.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            b'I' => Some(NodeKind::Instance),
            b'A' => Some(NodeKind::Attribute),
            b'R' => Some(NodeKind::Relation),
            _ => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            NodeKind::Instance => "instance",
            NodeKind::Attribute => "attribute",
            NodeKind::Relation => "relation",
        })
    }
}

/// A standalone typed object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceNode {
    pub number: NodeNumber,
    pub type_name: String,
}

impl InstanceNode {
    pub fn new(number: NodeNumber, type_name: impl Into<String>) -> Self {
        Self {
            number,
            type_name: type_name.into(),
        }
    }
}

/// A named value attached to an instance.
///
/// `instance` is not checked against the store when the record is built or
/// parsed; use [`NodeStore::dangling_references`](crate::NodeStore::dangling_references)
/// to find unresolved references.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeNode {
    pub number: NodeNumber,
    pub instance: NodeNumber,
    pub name: String,
    pub value: String,
}

impl AttributeNode {
    pub fn new(
        number: NodeNumber,
        instance: NodeNumber,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            number,
            instance,
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A named, directed link from `source` to `target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationNode {
    pub number: NodeNumber,
    pub relation_name: String,
    pub source: NodeNumber,
    pub target: NodeNumber,
}

impl RelationNode {
    pub fn new(
        number: NodeNumber,
        relation_name: impl Into<String>,
        source: NodeNumber,
        target: NodeNumber,
    ) -> Self {
        Self {
            number,
            relation_name: relation_name.into(),
            source,
            target,
        }
    }
}

/// One record in the graph.
///
/// Equality and hashing look at `number` only, matching the store's
/// last-write-wins identity. Use [`Node::is_identical`] for a field-by-field
/// comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Instance(InstanceNode),
    Attribute(AttributeNode),
    Relation(RelationNode),
}

impl Node {
    /// The record number.
    pub fn number(&self) -> NodeNumber {
        match self {
            Node::Instance(n) => n.number,
            Node::Attribute(n) => n.number,
            Node::Relation(n) => n.number,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Instance(_) => NodeKind::Instance,
            Node::Attribute(_) => NodeKind::Attribute,
            Node::Relation(_) => NodeKind::Relation,
        }
    }

    /// Numbers of the records this one points at, in field order.
    pub fn references(&self) -> Vec<NodeNumber> {
        match self {
            Node::Instance(_) => Vec::new(),
            Node::Attribute(n) => vec![n.instance],
            Node::Relation(n) => vec![n.source, n.target],
        }
    }

    /// Same variant and same fields.
    pub fn is_identical(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Instance(a), Node::Instance(b)) => a == b,
            (Node::Attribute(a), Node::Attribute(b)) => a == b,
            (Node::Relation(a), Node::Relation(b)) => a == b,
            _ => false,
        }
    }

    pub fn as_instance(&self) -> Option<&InstanceNode> {
        match self {
            Node::Instance(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_attribute(&self) -> Option<&AttributeNode> {
        match self {
            Node::Attribute(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_relation(&self) -> Option<&RelationNode> {
        match self {
            Node::Relation(n) => Some(n),
            _ => None,
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.number() == other.number()
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.number().hash(state);
    }
}

impl From<InstanceNode> for Node {
    fn from(n: InstanceNode) -> Self {
        Node::Instance(n)
    }
}

impl From<AttributeNode> for Node {
    fn from(n: AttributeNode) -> Self {
        Node::Attribute(n)
    }
}

impl From<RelationNode> for Node {
    fn from(n: RelationNode) -> Self {
        Node::Relation(n)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Instance(n) => write!(f, "#{} {} {:?}", n.number, self.kind(), n.type_name),
            Node::Attribute(n) => write!(
                f,
                "#{} {} {:?}={:?} of #{}",
                n.number,
                self.kind(),
                n.name,
                n.value,
                n.instance
            ),
            Node::Relation(n) => write!(
                f,
                "#{} {} {:?} #{} -> #{}",
                n.number,
                self.kind(),
                n.relation_name,
                n.source,
                n.target
            ),
        }
    }
}
