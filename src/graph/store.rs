//! In-memory graph storage
//!
//! Nodes and edges live in parallel vectors indexed by dense ids. Adjacency
//! is kept as per-node lists of edge indices, appended to as edges arrive.

use super::types::{EdgeIndex, EdgeLabel, GraphStatistics, Label, NodeIndex};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;
use wl_refine_algorithms::GraphView;

/// Errors that can occur during graph construction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Invalid edge: source node {0} does not exist")]
    InvalidEdgeSource(NodeIndex),

    #[error("Invalid edge: target node {0} does not exist")]
    InvalidEdgeTarget(NodeIndex),

    #[error("Length mismatch for {what}: expected {expected}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}

pub type GraphResult<T> = Result<T, GraphError>;

/// In-memory labeled multigraph
///
/// - node_labels: NodeIndex -> Label
/// - edges_src / edges_dst / edge_labels: EdgeIndex -> record field
/// - outbound / inbound: NodeIndex -> Vec<EdgeIndex>
///
/// `Clone` deep-copies every container; clones never share state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphStore {
    directed: bool,

    /// Label per node
    node_labels: Vec<Label>,

    /// Edge records, split into parallel vectors
    edges_src: Vec<NodeIndex>,
    edges_dst: Vec<NodeIndex>,
    edge_labels: Vec<Label>,

    /// Outgoing edges for each node (adjacency list)
    outbound: Vec<Vec<EdgeIndex>>,

    /// Incoming edges for each node (adjacency list)
    inbound: Vec<Vec<EdgeIndex>>,

    /// Distinct labels in use
    node_label_set: BTreeSet<Label>,
    edge_label_set: BTreeSet<Label>,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new(directed: bool) -> Self {
        GraphStore {
            directed,
            node_labels: Vec::new(),
            edges_src: Vec::new(),
            edges_dst: Vec::new(),
            edge_labels: Vec::new(),
            outbound: Vec::new(),
            inbound: Vec::new(),
            node_label_set: BTreeSet::new(),
            edge_label_set: BTreeSet::new(),
        }
    }

    /// Create a store with `num_nodes` edgeless nodes.
    ///
    /// Nodes are labeled `0` unless `node_labels` is given.
    pub fn with_nodes(
        num_nodes: usize,
        node_labels: Option<Vec<Label>>,
        directed: bool,
    ) -> GraphResult<Self> {
        let node_labels = match node_labels {
            Some(labels) if labels.len() != num_nodes => {
                return Err(GraphError::LengthMismatch {
                    what: "node labels",
                    expected: num_nodes,
                    actual: labels.len(),
                });
            }
            Some(labels) => labels,
            None => vec![0; num_nodes],
        };

        let mut store = GraphStore::new(directed);
        store.node_label_set = node_labels.iter().copied().collect();
        store.node_labels = node_labels;
        store.outbound = vec![Vec::new(); num_nodes];
        store.inbound = vec![Vec::new(); num_nodes];
        Ok(store)
    }

    /// Bulk construction from parallel arrays.
    ///
    /// `edges_src`, `edges_dst` and `edge_labels` (when given) must have the
    /// same length. For undirected stores each entry also inserts its mirror.
    pub fn from_parts(
        num_nodes: usize,
        node_labels: Option<Vec<Label>>,
        edges_src: &[NodeIndex],
        edges_dst: &[NodeIndex],
        edge_labels: Option<&[Label]>,
        directed: bool,
    ) -> GraphResult<Self> {
        if edges_dst.len() != edges_src.len() {
            return Err(GraphError::LengthMismatch {
                what: "edge destinations",
                expected: edges_src.len(),
                actual: edges_dst.len(),
            });
        }
        if let Some(labels) = edge_labels {
            if labels.len() != edges_src.len() {
                return Err(GraphError::LengthMismatch {
                    what: "edge labels",
                    expected: edges_src.len(),
                    actual: labels.len(),
                });
            }
        }

        let mut store = GraphStore::with_nodes(num_nodes, node_labels, directed)?;
        for (i, (&src, &dst)) in edges_src.iter().zip(edges_dst).enumerate() {
            let label = edge_labels.map_or(0, |labels| labels[i]);
            store.add_edge(src, dst, label)?;
        }
        Ok(store)
    }

    /// Add a node with empty adjacency lists
    pub fn add_node(&mut self, label: Label) -> NodeIndex {
        self.node_labels.push(label);
        self.node_label_set.insert(label);
        self.outbound.push(Vec::new());
        self.inbound.push(Vec::new());
        self.node_labels.len() - 1
    }

    /// Add an edge `src -> dst`.
    ///
    /// Undirected stores also record the mirror `dst -> src` under the next
    /// index. Returns the index of the primary record.
    pub fn add_edge(&mut self, src: NodeIndex, dst: NodeIndex, label: Label) -> GraphResult<EdgeIndex> {
        if src >= self.num_nodes() {
            return Err(GraphError::InvalidEdgeSource(src));
        }
        if dst >= self.num_nodes() {
            return Err(GraphError::InvalidEdgeTarget(dst));
        }

        let edge = self.push_edge(src, dst, label);
        if !self.directed {
            self.push_edge(dst, src, label);
        }
        self.edge_label_set.insert(label);
        Ok(edge)
    }

    fn push_edge(&mut self, src: NodeIndex, dst: NodeIndex, label: Label) -> EdgeIndex {
        let edge = self.edges_src.len();
        self.edges_src.push(src);
        self.edges_dst.push(dst);
        self.edge_labels.push(label);
        self.outbound[src].push(edge);
        self.inbound[dst].push(edge);
        edge
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn num_nodes(&self) -> usize {
        self.node_labels.len()
    }

    /// Number of edge records (twice the inserted count when undirected)
    pub fn num_edges(&self) -> usize {
        self.edges_src.len()
    }

    /// Source node of an edge. Panics if `edge` is out of range.
    pub fn edge_source(&self, edge: EdgeIndex) -> NodeIndex {
        self.edges_src[edge]
    }

    /// Destination node of an edge. Panics if `edge` is out of range.
    pub fn edge_destination(&self, edge: EdgeIndex) -> NodeIndex {
        self.edges_dst[edge]
    }

    pub fn outbound_edges(&self, node: NodeIndex) -> &[EdgeIndex] {
        &self.outbound[node]
    }

    pub fn inbound_edges(&self, node: NodeIndex) -> &[EdgeIndex] {
        &self.inbound[node]
    }

    /// Number of inbound edge records
    pub fn in_degree(&self, node: NodeIndex) -> usize {
        self.inbound[node].len()
    }

    /// Number of outbound edge records
    pub fn out_degree(&self, node: NodeIndex) -> usize {
        self.outbound[node].len()
    }

    /// In + out for directed stores. Undirected stores count the outbound
    /// list alone, which already holds one record per incident edge.
    pub fn degree(&self, node: NodeIndex) -> usize {
        if self.directed {
            self.in_degree(node) + self.out_degree(node)
        } else {
            self.out_degree(node)
        }
    }

    /// Linear scan of `v`'s outbound list
    pub fn has_edge(&self, v: NodeIndex, w: NodeIndex) -> bool {
        self.outbound
            .get(v)
            .is_some_and(|edges| edges.iter().any(|&e| self.edges_dst[e] == w))
    }

    pub fn node_label(&self, node: NodeIndex) -> Label {
        self.node_labels[node]
    }

    pub fn edge_label(&self, edge: EdgeIndex) -> Label {
        self.edge_labels[edge]
    }

    pub fn node_labels(&self) -> &[Label] {
        &self.node_labels
    }

    pub fn edge_labels(&self) -> &[Label] {
        &self.edge_labels
    }

    pub fn node_label_set(&self) -> &BTreeSet<Label> {
        &self.node_label_set
    }

    pub fn edge_label_set(&self) -> &BTreeSet<Label> {
        &self.edge_label_set
    }

    /// Remap edge labels onto `[0, k)` by ascending label value.
    ///
    /// Returns the dense label of every edge record and `k`.
    pub fn dense_edge_labels(&self) -> (Vec<EdgeLabel>, usize) {
        let dense: BTreeMap<Label, EdgeLabel> = self
            .edge_label_set
            .iter()
            .enumerate()
            .map(|(i, &label)| (label, i))
            .collect();
        let labels = self.edge_labels.iter().map(|label| dense[label]).collect();
        (labels, dense.len())
    }

    pub fn statistics(&self) -> GraphStatistics {
        GraphStatistics {
            directed: self.directed,
            node_count: self.num_nodes(),
            edge_count: self.num_edges(),
            node_label_count: self.node_label_set.len(),
            edge_label_count: self.edge_label_set.len(),
            max_degree: (0..self.num_nodes()).map(|v| self.degree(v)).max().unwrap_or(0),
        }
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        GraphStore::new(true)
    }
}

impl GraphView for GraphStore {
    fn num_nodes(&self) -> usize {
        GraphStore::num_nodes(self)
    }

    fn num_edges(&self) -> usize {
        GraphStore::num_edges(self)
    }

    fn outbound_edges(&self, node: NodeIndex) -> &[EdgeIndex] {
        GraphStore::outbound_edges(self, node)
    }

    fn inbound_edges(&self, node: NodeIndex) -> &[EdgeIndex] {
        GraphStore::inbound_edges(self, node)
    }

    fn edge_source(&self, edge: EdgeIndex) -> NodeIndex {
        GraphStore::edge_source(self, edge)
    }

    fn edge_destination(&self, edge: EdgeIndex) -> NodeIndex {
        GraphStore::edge_destination(self, edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_node() {
        let mut store = GraphStore::new(true);
        assert_eq!(store.add_node(4), 0);
        assert_eq!(store.add_node(7), 1);

        assert_eq!(store.num_nodes(), 2);
        assert_eq!(store.node_label(1), 7);
        assert!(store.outbound_edges(0).is_empty());
        assert!(store.inbound_edges(1).is_empty());
    }

    #[test]
    fn test_directed_adjacency_lists() {
        let mut store = GraphStore::with_nodes(3, None, true).unwrap();
        let e0 = store.add_edge(0, 1, 0).unwrap();
        let e1 = store.add_edge(0, 2, 0).unwrap();
        let e2 = store.add_edge(1, 2, 1).unwrap();

        assert_eq!((e0, e1, e2), (0, 1, 2));
        assert_eq!(store.num_edges(), 3);
        assert_eq!(store.outbound_edges(0), &[0, 1]);
        assert_eq!(store.inbound_edges(2), &[1, 2]);
        assert_eq!(store.edge_source(2), 1);
        assert_eq!(store.edge_destination(2), 2);

        // Node 0: 2 outgoing, node 2: 2 incoming
        assert_eq!(store.out_degree(0), 2);
        assert_eq!(store.in_degree(0), 0);
        assert_eq!(store.in_degree(2), 2);
        assert_eq!(store.out_degree(2), 0);
        assert_eq!(store.degree(1), 2);
    }

    #[test]
    fn test_undirected_mirror_edges() {
        let mut store = GraphStore::with_nodes(2, None, false).unwrap();
        let edge = store.add_edge(0, 1, 5).unwrap();

        assert_eq!(edge, 0);
        assert_eq!(store.num_edges(), 2);
        assert_eq!(store.edge_source(1), 1);
        assert_eq!(store.edge_destination(1), 0);
        assert_eq!(store.edge_label(1), 5);
        assert_eq!(store.outbound_edges(0), &[0]);
        assert_eq!(store.inbound_edges(0), &[1]);
        assert_eq!(store.outbound_edges(1), &[1]);
        assert_eq!(store.inbound_edges(1), &[0]);

        // Undirected degree counts each incident edge once.
        assert_eq!(store.degree(0), 1);
        assert!(store.has_edge(0, 1));
        assert!(store.has_edge(1, 0));
    }

    #[test]
    fn test_edge_validation() {
        let mut store = GraphStore::with_nodes(1, None, true).unwrap();

        let result = store.add_edge(9, 0, 0);
        assert_eq!(result, Err(GraphError::InvalidEdgeSource(9)));

        let result = store.add_edge(0, 9, 0);
        assert_eq!(result, Err(GraphError::InvalidEdgeTarget(9)));
        assert_eq!(store.num_edges(), 0);
    }

    #[test]
    fn test_multiple_edges_between_nodes() {
        let mut store = GraphStore::with_nodes(2, None, true).unwrap();
        let edge1 = store.add_edge(0, 1, 0).unwrap();
        let edge2 = store.add_edge(0, 1, 1).unwrap();
        let edge3 = store.add_edge(0, 1, 0).unwrap();

        assert_ne!(edge1, edge2);
        assert_ne!(edge1, edge3);
        assert_eq!(store.out_degree(0), 3);
        assert_eq!(store.edge_label_set().len(), 2);
    }

    #[test]
    fn test_has_edge_is_directional() {
        let mut store = GraphStore::with_nodes(3, None, true).unwrap();
        store.add_edge(0, 1, 0).unwrap();

        assert!(store.has_edge(0, 1));
        assert!(!store.has_edge(1, 0));
        assert!(!store.has_edge(0, 2));
        assert!(!store.has_edge(7, 0));
    }

    #[test]
    fn test_from_parts() {
        let store = GraphStore::from_parts(
            3,
            Some(vec![1, 2, 2]),
            &[0, 1],
            &[1, 2],
            Some(&[10, 20][..]),
            true,
        )
        .unwrap();

        assert_eq!(store.num_edges(), 2);
        assert_eq!(store.edge_labels(), &[10, 20]);
        assert_eq!(store.node_label_set().iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_from_parts_length_mismatch() {
        let err = GraphStore::from_parts(3, Some(vec![1, 2]), &[], &[], None, true).unwrap_err();
        assert_eq!(
            err,
            GraphError::LengthMismatch { what: "node labels", expected: 3, actual: 2 }
        );

        let err = GraphStore::from_parts(3, None, &[0, 1], &[1], None, true).unwrap_err();
        assert!(matches!(err, GraphError::LengthMismatch { what: "edge destinations", .. }));

        let err = GraphStore::from_parts(3, None, &[0], &[1], Some(&[0, 0][..]), true).unwrap_err();
        assert!(matches!(err, GraphError::LengthMismatch { what: "edge labels", .. }));

        let err = GraphStore::from_parts(2, None, &[0], &[5], None, true).unwrap_err();
        assert_eq!(err, GraphError::InvalidEdgeTarget(5));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = GraphStore::with_nodes(2, None, true).unwrap();
        original.add_edge(0, 1, 0).unwrap();

        let mut copy = original.clone();
        copy.add_node(3);
        copy.add_edge(1, 0, 1).unwrap();

        assert_eq!(original.num_nodes(), 2);
        assert_eq!(original.num_edges(), 1);
        assert!(original.inbound_edges(0).is_empty());
        assert_eq!(copy.num_edges(), 2);
        assert!(!original.edge_label_set().contains(&1));
    }

    #[test]
    fn test_dense_edge_labels() {
        let mut store = GraphStore::with_nodes(3, None, true).unwrap();
        store.add_edge(0, 1, 40).unwrap();
        store.add_edge(1, 2, 7).unwrap();
        store.add_edge(2, 0, 40).unwrap();

        let (labels, count) = store.dense_edge_labels();
        assert_eq!(count, 2);
        assert_eq!(labels, vec![1, 0, 1]);
    }

    #[test]
    fn test_statistics() {
        let mut store = GraphStore::with_nodes(3, Some(vec![1, 1, 2]), false).unwrap();
        store.add_edge(0, 1, 0).unwrap();
        store.add_edge(0, 2, 0).unwrap();

        let stats = store.statistics();
        assert!(!stats.directed);
        assert_eq!(stats.node_count, 3);
        assert_eq!(stats.edge_count, 4);
        assert_eq!(stats.node_label_count, 2);
        assert_eq!(stats.edge_label_count, 1);
        assert_eq!(stats.max_degree, 2);
    }
}
