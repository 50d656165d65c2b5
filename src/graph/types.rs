//! Core type definitions for the graph store

use serde::Serialize;

pub use wl_refine_algorithms::{EdgeIndex, EdgeLabel, NodeIndex};

/// Raw node or edge label as stored. Edge labels are remapped onto a dense
/// range before refinement, node labels seed the initial coloring.
pub type Label = u64;

/// Summary counts of a graph store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GraphStatistics {
    pub directed: bool,
    pub node_count: usize,
    pub edge_count: usize,
    pub node_label_count: usize,
    pub edge_label_count: usize,
    pub max_degree: usize,
}
