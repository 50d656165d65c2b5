//! Graph representation for color refinement
//!
//! Labeled, possibly directed multigraph with:
//! - Dense node and edge indices, edges numbered in insertion order
//! - Outbound and inbound edge-index lists per node, maintained incrementally
//! - Undirected edges stored as two mirrored records

pub mod store;
pub mod types;

pub use store::{GraphError, GraphResult, GraphStore};
pub use types::{EdgeIndex, EdgeLabel, GraphStatistics, Label, NodeIndex};
