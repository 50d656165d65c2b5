//! wl-refine
//!
//! Color refinement (the 1-dimensional Weisfeiler-Leman algorithm) over
//! labeled directed graphs.
//!
//! Two nodes end up with the same stable color exactly when 1-WL cannot
//! tell them apart: every round folds a node's own color with the sorted
//! colors of its neighbors, grouped by edge label and direction, through
//! the Cantor-style pairing function `p(a, b)`.
//!
//! # Layout
//!
//! - [`graph`]: the labeled graph store
//! - [`algo`]: adapter onto the refinement engine in `wl-refine-algorithms`
//! - [`ingest`]: `.lp` fact file reader
//! - [`report`]: text and JSON rendering of a result
//!
//! ## Example Usage
//!
//! ```rust
//! use wl_refine::algo::{stable_coloring, ColoringOptions};
//! use wl_refine::graph::GraphStore;
//!
//! // Directed 3-cycle: every node looks the same.
//! let store = GraphStore::from_parts(3, None, &[0, 1, 2], &[1, 2, 0], None, true).unwrap();
//! let coloring = stable_coloring(&store, &ColoringOptions::default()).unwrap();
//!
//! assert_eq!(coloring.num_colors(), 1);
//! assert_eq!(coloring.iterations, 1);
//! ```

pub mod algo;
pub mod graph;
pub mod ingest;
pub mod report;

// Re-export main types for convenience
pub use algo::{stable_coloring, Color, ColoringOptions, RefinementError, StableColoring};
pub use graph::{GraphError, GraphStore, Label};
pub use ingest::{load_graph, IngestError, LoadOptions, LoadedGraph};
pub use report::{render_json, render_text, ColoringReport};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
