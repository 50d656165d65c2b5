//! Graph algorithms module
//!
//! The refinement engine lives in the `wl-refine-algorithms` crate.
//! This module is the adapter layer: it derives a refinement configuration
//! from the labels held by a `GraphStore`.

use crate::graph::GraphStore;
use std::time::Instant;
use tracing::info;

// Re-export algorithms
pub use wl_refine_algorithms::{
    compute_stable_coloring, pairing, partition_of, Color, ColorCompaction, GraphView,
    RefinementConfig, RefinementError, RefinementResult, StableColoring,
};

/// Options for refining a `GraphStore`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColoringOptions {
    /// Seed the initial coloring with the store's node labels. When off,
    /// every node starts with color 1.
    pub use_node_labels: bool,
    /// Group neighbors by the store's edge labels. When off, all edges share
    /// one group per direction.
    pub use_edge_labels: bool,
    pub compaction: ColorCompaction,
    pub max_iterations: Option<usize>,
    pub parallel: bool,
}

impl Default for ColoringOptions {
    fn default() -> Self {
        Self {
            use_node_labels: true,
            use_edge_labels: true,
            compaction: ColorCompaction::Raw,
            max_iterations: None,
            parallel: true,
        }
    }
}

/// Build the engine configuration for `store`.
///
/// Edge labels are remapped onto a dense range, ascending by raw value.
pub fn build_config(store: &GraphStore, options: &ColoringOptions) -> RefinementConfig {
    let mut config = RefinementConfig {
        compaction: options.compaction,
        max_iterations: options.max_iterations,
        parallel: options.parallel,
        ..RefinementConfig::default()
    };

    if options.use_node_labels {
        config = config.with_node_labels(store.node_labels().iter().copied());
    }
    if options.use_edge_labels && store.num_edges() > 0 {
        let (labels, num_edge_labels) = store.dense_edge_labels();
        config = config.with_edge_labels(labels, num_edge_labels);
    }
    config
}

/// Compute the stable coloring of `store`
pub fn stable_coloring(
    store: &GraphStore,
    options: &ColoringOptions,
) -> RefinementResult<StableColoring> {
    let config = build_config(store, options);

    let start = Instant::now();
    let result = compute_stable_coloring(store, &config)?;
    info!(
        nodes = store.num_nodes(),
        edges = store.num_edges(),
        edge_labels = config.num_edge_labels,
        iterations = result.iterations,
        colors = result.num_colors(),
        converged = result.converged,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "computed stable coloring"
    );
    Ok(result)
}
