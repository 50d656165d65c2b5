pub mod common;
pub mod pairing;
pub mod refinement;

pub use common::{Color, EdgeIndex, EdgeLabel, GraphView, NodeIndex};
pub use pairing::pairing;
pub use refinement::{
    compute_stable_coloring, partition_of, ColorCompaction, RefinementConfig, RefinementError,
    RefinementResult, StableColoring,
};
