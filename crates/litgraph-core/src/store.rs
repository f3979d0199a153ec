//! The in-memory node store.
//!
//! A [`NodeStore`] maps record numbers to records. It has no durability of
//! its own: it is filled from, and written back to, object streams layered
//! over some byte source or sink.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, trace};

use crate::hash::{content_hash, ContentHash};
use crate::node::{AttributeNode, Node, NodeKind, NodeNumber, RelationNode};
use crate::object::{ObjectSink, ObjectSource, ObjectValue};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while filling or draining a store through object streams.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("expected a node, found {found}")]
    NotANode { found: &'static str },

    #[error("object source failed: {0}")]
    Source(#[source] BoxError),

    #[error("object sink failed: {0}")]
    Sink(#[source] BoxError),
}

/// A reference that does not point at an instance record in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    /// The record holding the reference.
    pub from: NodeNumber,
    /// Which field of that record holds it.
    pub field: &'static str,
    /// The unresolved record number.
    pub target: NodeNumber,
}

impl fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} field `{}` refers to #{}, which is not an instance",
            self.from, self.field, self.target
        )
    }
}

/// Per-kind record counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KindCounts {
    pub instances: usize,
    pub attributes: usize,
    pub relations: usize,
}

impl KindCounts {
    pub fn get(&self, kind: NodeKind) -> usize {
        match kind {
            NodeKind::Instance => self.instances,
            NodeKind::Attribute => self.attributes,
            NodeKind::Relation => self.relations,
        }
    }

    pub fn total(&self) -> usize {
        self.instances + self.attributes + self.relations
    }
}

/// Records keyed by number. Inserting an existing number replaces the old
/// record.
#[derive(Debug, Clone, Default)]
pub struct NodeStore {
    nodes: BTreeMap<NodeNumber, Node>,
}

impl NodeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
        }
    }

    /// Insert a record, returning the one it replaced.
    pub fn insert(&mut self, node: Node) -> Option<Node> {
        self.nodes.insert(node.number(), node)
    }

    /// Same as [`insert`](Self::insert).
    pub fn update(&mut self, node: Node) -> Option<Node> {
        self.insert(node)
    }

    /// Remove the record with `node`'s number. No-op when absent.
    pub fn delete(&mut self, node: &Node) -> Option<Node> {
        self.remove(node.number())
    }

    pub fn remove(&mut self, number: NodeNumber) -> Option<Node> {
        self.nodes.remove(&number)
    }

    pub fn query(&self, number: NodeNumber) -> Option<&Node> {
        self.nodes.get(&number)
    }

    pub fn contains(&self, number: NodeNumber) -> bool {
        self.nodes.contains_key(&number)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Records in ascending number order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Node> + ExactSizeIterator {
        self.nodes.values()
    }

    pub fn numbers(&self) -> impl Iterator<Item = NodeNumber> + '_ {
        self.nodes.keys().copied()
    }

    /// Read up to `max_count` records from `source`.
    ///
    /// Stops early, without error, once the source runs dry. Every object
    /// must be a node; anything else aborts the batch. Records read before a
    /// failure stay in the store.
    pub fn read<S>(&mut self, source: &mut S, max_count: usize) -> Result<usize, StoreError>
    where
        S: ObjectSource + ?Sized,
    {
        let mut count = 0;
        while count < max_count {
            if !source.has_more().map_err(|e| StoreError::Source(e.into()))? {
                break;
            }
            let object = source
                .read_object()
                .map_err(|e| StoreError::Source(e.into()))?;
            let node = object.into_node().map_err(|other| StoreError::NotANode {
                found: other.type_name(),
            })?;
            trace!(number = node.number(), kind = %node.kind(), "read record");
            self.insert(node);
            count += 1;
        }
        debug!(count, max_count, total = self.len(), "bulk read finished");
        Ok(count)
    }

    /// Write every record, in ascending order, to `sink`.
    pub fn write<S>(&self, sink: &mut S) -> Result<usize, StoreError>
    where
        S: ObjectSink + ?Sized,
    {
        for node in self.nodes.values() {
            sink.write_object(node.clone().into_object())
                .map_err(|e| StoreError::Sink(e.into()))?;
        }
        sink.flush().map_err(|e| StoreError::Sink(e.into()))?;
        debug!(count = self.len(), "wrote store");
        Ok(self.len())
    }

    /// Insert every record of `other`. Returns how many existing records
    /// were replaced.
    pub fn merge(&mut self, other: &NodeStore) -> usize {
        let mut replaced = 0;
        for node in other.iter() {
            if self.insert(node.clone()).is_some() {
                replaced += 1;
            }
        }
        debug!(merged = other.len(), replaced, "merged stores");
        replaced
    }

    /// Attributes whose `instance` is `number`.
    pub fn attributes_of(&self, number: NodeNumber) -> impl Iterator<Item = &AttributeNode> {
        self.iter()
            .filter_map(Node::as_attribute)
            .filter(move |a| a.instance == number)
    }

    /// Relations with `number` as source or target.
    pub fn relations_of(&self, number: NodeNumber) -> impl Iterator<Item = &RelationNode> {
        self.iter()
            .filter_map(Node::as_relation)
            .filter(move |r| r.source == number || r.target == number)
    }

    /// References that do not resolve to an instance record.
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let resolves = |n: NodeNumber| matches!(self.query(n), Some(Node::Instance(_)));
        let mut dangling = Vec::new();
        for node in self.iter() {
            let fields = match node {
                Node::Instance(_) => vec![],
                Node::Attribute(a) => vec![("instance", a.instance)],
                Node::Relation(r) => vec![("source", r.source), ("target", r.target)],
            };
            for (field, target) in fields {
                if !resolves(target) {
                    dangling.push(DanglingReference {
                        from: node.number(),
                        field,
                        target,
                    });
                }
            }
        }
        dangling
    }

    pub fn kind_counts(&self) -> KindCounts {
        let mut counts = KindCounts::default();
        for node in self.iter() {
            match node.kind() {
                NodeKind::Instance => counts.instances += 1,
                NodeKind::Attribute => counts.attributes += 1,
                NodeKind::Relation => counts.relations += 1,
            }
        }
        counts
    }

    /// SHA-256 over the ordered records.
    pub fn content_hash(&self) -> Result<ContentHash, serde_json::Error> {
        let nodes: Vec<&Node> = self.iter().collect();
        content_hash(&nodes)
    }
}

impl FromIterator<Node> for NodeStore {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        let mut store = NodeStore::new();
        store.extend(iter);
        store
    }
}

impl Extend<Node> for NodeStore {
    fn extend<I: IntoIterator<Item = Node>>(&mut self, iter: I) {
        for node in iter {
            self.insert(node);
        }
    }
}

impl<'a> IntoIterator for &'a NodeStore {
    type Item = &'a Node;
    type IntoIter = std::collections::btree_map::Values<'a, NodeNumber, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.values()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::io;

    use super::*;
    use crate::node::InstanceNode;
    use crate::object::Object;

    /// Hands out pre-built objects in order.
    struct QueueSource {
        objects: VecDeque<Object>,
    }

    impl QueueSource {
        fn new(objects: Vec<Object>) -> Self {
            Self {
                objects: objects.into(),
            }
        }
    }

    impl ObjectSource for QueueSource {
        type Error = io::Error;

        fn has_more(&mut self) -> Result<bool, io::Error> {
            Ok(!self.objects.is_empty())
        }

        fn read_object(&mut self) -> Result<Object, io::Error> {
            self.objects
                .pop_front()
                .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))
        }
    }

    #[derive(Default)]
    struct VecSink {
        objects: Vec<Object>,
        flushed: bool,
    }

    impl ObjectSink for VecSink {
        type Error = io::Error;

        fn write_object(&mut self, object: Object) -> Result<(), io::Error> {
            self.objects.push(object);
            Ok(())
        }

        fn flush(&mut self) -> Result<(), io::Error> {
            self.flushed = true;
            Ok(())
        }
    }

    fn instance(number: NodeNumber, type_name: &str) -> Node {
        InstanceNode::new(number, type_name).into()
    }

    fn sample_store() -> NodeStore {
        [
            instance(1, "type1"),
            instance(2, "type2"),
            RelationNode::new(3, "child", 1, 2).into(),
            AttributeNode::new(4, 1, "color", "red").into(),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn insert_query_delete() {
        let mut store = NodeStore::new();
        assert!(store.insert(instance(1, "a")).is_none());
        assert_eq!(store.len(), 1);
        assert!(store.query(1).is_some());
        assert!(store.query(99).is_none());

        let removed = store.delete(&instance(1, "ignored"));
        assert!(removed.is_some());
        assert!(store.is_empty());
        assert!(store.delete(&instance(1, "a")).is_none());
    }

    #[test]
    fn insert_is_last_write_wins() {
        let mut store = NodeStore::new();
        store.insert(instance(1, "old"));
        let prev = store.update(RelationNode::new(1, "r", 2, 3).into()).unwrap();
        assert_eq!(prev.as_instance().unwrap().type_name, "old");
        assert_eq!(store.len(), 1);
        assert!(store.query(1).unwrap().as_relation().is_some());
    }

    #[test]
    fn read_stops_at_max_count() {
        let mut source = QueueSource::new(vec![
            Object::Node(instance(1, "a")),
            Object::Node(instance(2, "b")),
            Object::Node(instance(3, "c")),
        ]);
        let mut store = NodeStore::new();
        assert_eq!(store.read(&mut source, 2).unwrap(), 2);
        assert_eq!(store.len(), 2);
        assert!(store.query(3).is_none());
    }

    #[test]
    fn read_stops_when_source_is_dry() {
        let mut source = QueueSource::new(vec![Object::Node(instance(1, "a"))]);
        let mut store = NodeStore::new();
        assert_eq!(store.read(&mut source, 10).unwrap(), 1);
    }

    #[test]
    fn read_rejects_non_node() {
        let mut source = QueueSource::new(vec![
            Object::Node(instance(1, "a")),
            Object::Integer(5),
            Object::Node(instance(2, "b")),
        ]);
        let mut store = NodeStore::new();
        let err = store.read(&mut source, 10).unwrap_err();
        assert!(matches!(err, StoreError::NotANode { found: "integer" }));
        assert_eq!(store.len(), 1);
        assert!(store.query(2).is_none());
    }

    #[test]
    fn write_emits_ascending_and_flushes() {
        let store: NodeStore = [instance(5, "e"), instance(2, "b"), instance(9, "i")]
            .into_iter()
            .collect();
        let mut sink = VecSink::default();
        assert_eq!(store.write(&mut sink).unwrap(), 3);
        assert!(sink.flushed);
        let numbers: Vec<_> = sink
            .objects
            .into_iter()
            .map(|o| o.into_node().unwrap().number())
            .collect();
        assert_eq!(numbers, vec![2, 5, 9]);
    }

    #[test]
    fn merge_replaces_and_adds() {
        let mut base = sample_store();
        let other: NodeStore = [instance(1, "renamed"), instance(10, "new")]
            .into_iter()
            .collect();
        assert_eq!(base.merge(&other), 1);
        assert_eq!(base.len(), 5);
        assert_eq!(base.query(1).unwrap().as_instance().unwrap().type_name, "renamed");
    }

    #[test]
    fn dangling_references_are_reported() {
        let mut store = sample_store();
        assert!(store.dangling_references().is_empty());

        store.insert(RelationNode::new(5, "child", 1, 42).into());
        store.insert(AttributeNode::new(6, 3, "x", "y").into());
        let dangling = store.dangling_references();
        assert_eq!(
            dangling,
            vec![
                DanglingReference { from: 5, field: "target", target: 42 },
                DanglingReference { from: 6, field: "instance", target: 3 },
            ]
        );
    }

    #[test]
    fn reference_queries() {
        let store = sample_store();
        let attrs: Vec<_> = store.attributes_of(1).map(|a| a.number).collect();
        assert_eq!(attrs, vec![4]);
        assert_eq!(store.relations_of(2).count(), 1);
        assert_eq!(store.relations_of(4).count(), 0);
    }

    #[test]
    fn kind_counts_cover_every_record() {
        let counts = sample_store().kind_counts();
        assert_eq!(counts.instances, 2);
        assert_eq!(counts.get(NodeKind::Attribute), 1);
        assert_eq!(counts.relations, 1);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn content_hash_ignores_insertion_order() {
        let a = sample_store();
        let mut b = NodeStore::new();
        for node in a.iter().rev() {
            b.insert(node.clone());
        }
        assert_eq!(a.content_hash().unwrap(), b.content_hash().unwrap());

        b.insert(instance(1, "changed"));
        assert_ne!(a.content_hash().unwrap(), b.content_hash().unwrap());
    }

    #[test]
    fn iter_is_ordered_both_ways() {
        let store = sample_store();
        let forward: Vec<_> = store.iter().map(Node::number).collect();
        let mut backward: Vec<_> = store.iter().rev().map(Node::number).collect();
        backward.reverse();
        assert_eq!(forward, backward);
        assert!(forward.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(store.iter().len(), store.len());
    }

}
