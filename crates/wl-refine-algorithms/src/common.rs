//! Shared types for refinement algorithms
//!
//! Provides the read-only view of graph topology the engine iterates over,
//! and the color value the engine produces.

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;

/// Dense node index in `[0, num_nodes)`
pub type NodeIndex = usize;

/// Dense edge index, assigned in insertion order
pub type EdgeIndex = usize;

/// Dense edge label in `[0, num_edge_labels)`
pub type EdgeLabel = usize;

/// A read-only, integer-indexed view of a directed multigraph.
///
/// Every edge is a separate record with its own index. Undirected graphs
/// are presented as pairs of mirrored directed records.
pub trait GraphView {
    /// Number of nodes
    fn num_nodes(&self) -> usize;

    /// Number of edge records
    fn num_edges(&self) -> usize;

    /// Indices of the edges leaving `node`
    fn outbound_edges(&self, node: NodeIndex) -> &[EdgeIndex];

    /// Indices of the edges entering `node`
    fn inbound_edges(&self, node: NodeIndex) -> &[EdgeIndex];

    /// Source node of `edge`
    fn edge_source(&self, edge: EdgeIndex) -> NodeIndex;

    /// Destination node of `edge`
    fn edge_destination(&self, edge: EdgeIndex) -> NodeIndex;
}

impl<G: GraphView + ?Sized> GraphView for &G {
    fn num_nodes(&self) -> usize {
        (**self).num_nodes()
    }

    fn num_edges(&self) -> usize {
        (**self).num_edges()
    }

    fn outbound_edges(&self, node: NodeIndex) -> &[EdgeIndex] {
        (**self).outbound_edges(node)
    }

    fn inbound_edges(&self, node: NodeIndex) -> &[EdgeIndex] {
        (**self).inbound_edges(node)
    }

    fn edge_source(&self, edge: EdgeIndex) -> NodeIndex {
        (**self).edge_source(edge)
    }

    fn edge_destination(&self, edge: EdgeIndex) -> NodeIndex {
        (**self).edge_destination(edge)
    }
}

/// A node color.
///
/// Colors are unbounded non-negative integers. They are only meaningful
/// through equality: two nodes share a class iff their colors are equal.
/// `0` is the sentinel and never the color of a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Color(BigUint);

impl Color {
    /// The reserved sentinel color
    pub fn sentinel() -> Self {
        Color(BigUint::zero())
    }

    pub fn is_sentinel(&self) -> bool {
        self.0.is_zero()
    }

    /// Converts to `u64` when the value fits
    pub fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }

    pub(crate) fn from_biguint(value: BigUint) -> Self {
        Color(value)
    }

    pub(crate) fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    /// Total order on raw values, used only to canonicalize neighbor groups.
    pub(crate) fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }

    pub(crate) fn successor(&self) -> Self {
        Color(&self.0 + 1u32)
    }
}

impl From<u64> for Color {
    fn from(value: u64) -> Self {
        Color(BigUint::from(value))
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Color(BigUint::from(value))
    }
}

impl From<usize> for Color {
    fn from(value: usize) -> Self {
        Color(BigUint::from(value))
    }
}

impl From<BigUint> for Color {
    fn from(value: BigUint) -> Self {
        Color(value)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
