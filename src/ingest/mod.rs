//! Graph ingestion
//!
//! Builds a `GraphStore` from fact files. The only supported format is the
//! clingo-style `.lp` fact listing (see [`lp`]).

pub mod lp;

use crate::graph::{GraphError, GraphStore};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub use lp::read_lp_graph;

/// Errors raised while reading a graph
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: malformed atom `{atom}`: {reason}")]
    Malformed {
        line: usize,
        atom: String,
        reason: &'static str,
    },

    #[error("Line {line}: node `{node}` declared twice")]
    DuplicateNode { line: usize, node: String },

    #[error("Line {line}: edge ({src},{dst}) declared twice")]
    DuplicateEdge { line: usize, src: String, dst: String },

    #[error("Line {line}: label index {index} declared twice")]
    DuplicateLabel { line: usize, index: u64 },

    #[error("Reference to undeclared node `{0}`")]
    UnknownNode(String),

    #[error("Edge ({src},{dst}) uses undeclared label {label}")]
    UnknownLabel { src: String, dst: String, label: u64 },

    #[error("Edge ({src},{dst}) has {count} labels, expected exactly one")]
    EdgeLabelCount { src: String, dst: String, count: usize },

    #[error("Unsupported graph file format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Graph construction failed: {0}")]
    Graph(#[from] GraphError),
}

pub type IngestResult<T> = Result<T, IngestError>;

/// Ingestion options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Ignore `color/2` atoms; every node starts with label 1
    pub uniform_initial_coloring: bool,
    /// Keep only edges whose label appears in a `chosen/1` atom
    pub use_chosen_labels: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            uniform_initial_coloring: false,
            use_chosen_labels: true,
        }
    }
}

/// A graph read from a fact file, with the names behind its indices
#[derive(Debug, Clone)]
pub struct LoadedGraph {
    pub store: GraphStore,
    /// Node name per node index
    pub node_names: Vec<String>,
    /// Declared label name per dense edge label
    pub edge_label_names: Vec<String>,
}

/// Load a graph file, dispatching on its extension
pub fn load_graph(path: &Path, options: &LoadOptions) -> IngestResult<LoadedGraph> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("lp") => {
            debug!("Reading fact file {:?}", path);
            let reader = BufReader::new(File::open(path)?);
            read_lp_graph(reader, options)
        }
        _ => Err(IngestError::UnsupportedFormat(path.to_path_buf())),
    }
}
