//! Color refinement (1-dimensional Weisfeiler–Leman)
//!
//! Computes the stable coloring of a labeled, possibly directed multigraph.
//! Every round, a node's new color folds its own color with the sorted
//! colors of its neighbors, grouped by edge label and direction. Rounds
//! repeat until the number of distinct colors stops growing.

use super::common::{Color, EdgeIndex, EdgeLabel, GraphView, NodeIndex};
use super::pairing;
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors raised while validating a refinement request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RefinementError {
    #[error("Expected {expected} node labels, got {actual}")]
    NodeLabelCount { expected: usize, actual: usize },

    #[error("Expected {expected} edge labels, got {actual}")]
    EdgeLabelCount { expected: usize, actual: usize },

    #[error("Edge {edge} has label {label}, outside of [0, {num_edge_labels})")]
    EdgeLabelOutOfRange {
        edge: EdgeIndex,
        label: EdgeLabel,
        num_edge_labels: usize,
    },
}

pub type RefinementResult<T> = Result<T, RefinementError>;

/// How colors are carried from one round to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorCompaction {
    /// Fold every neighborhood through the pairing function. Canonical
    /// across graphs, but each folded element squares the running value,
    /// so this is only practical on low-degree graphs with few rounds.
    #[default]
    Raw,
    /// Number each round's distinct neighborhood signatures `1..=k` in
    /// first-seen node order, without folding. Colors stay at most the node
    /// count whatever the degree; the partition is the same as with `Raw`,
    /// but color values are only comparable within one run.
    Dense,
}

/// Color refinement configuration
#[derive(Debug, Clone)]
pub struct RefinementConfig {
    /// Initial color per node. Uniform `1` when absent.
    pub node_labels: Option<Vec<Color>>,
    /// Label per edge record, each in `[0, num_edge_labels)`. Uniform `0`
    /// when absent.
    pub edge_labels: Option<Vec<EdgeLabel>>,
    /// Number of edge label groups per direction
    pub num_edge_labels: usize,
    pub compaction: ColorCompaction,
    /// Upper bound on rounds; `None` runs to the fixpoint
    pub max_iterations: Option<usize>,
    /// Refine the nodes of a round on the rayon pool
    pub parallel: bool,
}

impl Default for RefinementConfig {
    fn default() -> Self {
        Self {
            node_labels: None,
            edge_labels: None,
            num_edge_labels: 1,
            compaction: ColorCompaction::Raw,
            max_iterations: None,
            parallel: true,
        }
    }
}

impl RefinementConfig {
    pub fn with_node_labels<I, C>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Color>,
    {
        self.node_labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_edge_labels(mut self, labels: Vec<EdgeLabel>, num_edge_labels: usize) -> Self {
        self.edge_labels = Some(labels);
        self.num_edge_labels = num_edge_labels;
        self
    }

    pub fn with_compaction(mut self, compaction: ColorCompaction) -> Self {
        self.compaction = compaction;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Result of color refinement
#[derive(Debug, Clone)]
pub struct StableColoring {
    /// Distinct colors of the final coloring
    pub colors: HashSet<Color>,
    /// Color -> member nodes, ascending
    pub color_to_nodes: HashMap<Color, Vec<NodeIndex>>,
    /// Node -> color
    pub node_to_color: Vec<Color>,
    /// Number of rounds executed, including the one that confirmed stability
    pub iterations: usize,
    /// `false` when `max_iterations` stopped the run before the fixpoint
    pub converged: bool,
    /// Distinct colors of the initial coloring, then after every round
    pub color_counts: Vec<usize>,
}

impl StableColoring {
    fn from_coloring(
        node_to_color: Vec<Color>,
        iterations: usize,
        converged: bool,
        color_counts: Vec<usize>,
    ) -> Self {
        let mut color_to_nodes: HashMap<Color, Vec<NodeIndex>> = HashMap::new();
        for (node, color) in node_to_color.iter().enumerate() {
            color_to_nodes.entry(color.clone()).or_default().push(node);
        }
        let colors = color_to_nodes.keys().cloned().collect();

        StableColoring {
            colors,
            color_to_nodes,
            node_to_color,
            iterations,
            converged,
            color_counts,
        }
    }

    pub fn num_colors(&self) -> usize {
        self.colors.len()
    }

    pub fn color_of(&self, node: NodeIndex) -> Option<&Color> {
        self.node_to_color.get(node)
    }

    /// Color classes as ascending node lists, ordered by their smallest member
    pub fn partition(&self) -> Vec<Vec<NodeIndex>> {
        partition_of(&self.node_to_color)
    }

    /// Class sizes, ascending
    pub fn class_sizes(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = self.color_to_nodes.values().map(Vec::len).collect();
        sizes.sort_unstable();
        sizes
    }
}

/// Groups nodes by equal color. Classes are ascending node lists, ordered by
/// their smallest member.
pub fn partition_of(coloring: &[Color]) -> Vec<Vec<NodeIndex>> {
    let mut class_of: FxHashMap<&Color, usize> = FxHashMap::default();
    let mut classes: Vec<Vec<NodeIndex>> = Vec::new();
    for (node, color) in coloring.iter().enumerate() {
        let class = *class_of.entry(color).or_insert_with(|| {
            classes.push(Vec::new());
            classes.len() - 1
        });
        classes[class].push(node);
    }
    classes
}

/// Compute the stable coloring of `graph`.
///
/// Validation happens up front; an invalid request yields no partial result.
pub fn compute_stable_coloring<G>(
    graph: &G,
    config: &RefinementConfig,
) -> RefinementResult<StableColoring>
where
    G: GraphView + Sync,
{
    let num_nodes = graph.num_nodes();
    let num_edges = graph.num_edges();
    let num_edge_labels = config.num_edge_labels;

    if let Some(labels) = &config.node_labels {
        if labels.len() != num_nodes {
            return Err(RefinementError::NodeLabelCount {
                expected: num_nodes,
                actual: labels.len(),
            });
        }
    }

    let edge_labels: Cow<'_, [EdgeLabel]> = match &config.edge_labels {
        Some(labels) if labels.len() != num_edges => {
            return Err(RefinementError::EdgeLabelCount {
                expected: num_edges,
                actual: labels.len(),
            });
        }
        Some(labels) => Cow::Borrowed(labels.as_slice()),
        None => Cow::Owned(vec![0; num_edges]),
    };

    if let Some((edge, &label)) = edge_labels
        .iter()
        .enumerate()
        .find(|(_, &label)| label >= num_edge_labels)
    {
        return Err(RefinementError::EdgeLabelOutOfRange {
            edge,
            label,
            num_edge_labels,
        });
    }

    let mut coloring = initial_coloring(num_nodes, config.node_labels.as_deref());
    let mut num_colors = count_colors(&coloring);
    let mut color_counts = vec![num_colors];
    let mut iterations = 0;
    let mut converged = false;

    while config.max_iterations.map_or(true, |max| iterations < max) {
        iterations += 1;

        let next = refine_round(graph, &coloring, &edge_labels, num_edge_labels, config);
        let next_num_colors = count_colors(&next);

        debug!(
            iteration = iterations,
            colors = next_num_colors,
            previous = num_colors,
            "color refinement round"
        );
        color_counts.push(next_num_colors);
        coloring = next;

        if next_num_colors == num_colors {
            converged = true;
            break;
        }
        num_colors = next_num_colors;
    }

    trace!(iterations, converged, "color refinement finished");
    Ok(StableColoring::from_coloring(coloring, iterations, converged, color_counts))
}

/// Node labels, shifted by one everywhere if any of them is the sentinel.
fn initial_coloring(num_nodes: usize, node_labels: Option<&[Color]>) -> Vec<Color> {
    match node_labels {
        None => vec![Color::from(1u64); num_nodes],
        Some(labels) => {
            let shift = labels.iter().any(Color::is_sentinel);
            if shift {
                labels.iter().map(Color::successor).collect()
            } else {
                labels.to_vec()
            }
        }
    }
}

fn count_colors(coloring: &[Color]) -> usize {
    coloring.iter().collect::<FxHashSet<_>>().len()
}

/// One refinement round. Reads only `coloring`, so nodes are independent.
fn refine_round<G>(
    graph: &G,
    coloring: &[Color],
    edge_labels: &[EdgeLabel],
    num_edge_labels: usize,
    config: &RefinementConfig,
) -> Vec<Color>
where
    G: GraphView + Sync,
{
    let groups = |node| neighbor_groups(graph, coloring, edge_labels, num_edge_labels, node);

    match config.compaction {
        ColorCompaction::Raw => {
            let refine = |node| fold_groups(&coloring[node], groups(node));
            if config.parallel {
                (0..graph.num_nodes()).into_par_iter().map(refine).collect()
            } else {
                (0..graph.num_nodes()).map(refine).collect()
            }
        }
        ColorCompaction::Dense => {
            let signature = |node| Signature::new(&coloring[node], groups(node));
            let signatures: Vec<Signature<'_>> = if config.parallel {
                (0..graph.num_nodes()).into_par_iter().map(signature).collect()
            } else {
                (0..graph.num_nodes()).map(signature).collect()
            };

            let mut ids: FxHashMap<Signature<'_>, Color> = FxHashMap::default();
            signatures
                .into_iter()
                .map(|signature| {
                    let next = Color::from(ids.len() + 1);
                    ids.entry(signature).or_insert(next).clone()
                })
                .collect()
        }
    }
}

/// Neighbor colors of `node`, ascending within each group.
///
/// `groups[2 * l]` holds outbound neighbors via label `l`,
/// `groups[2 * l + 1]` inbound neighbors via label `l`.
fn neighbor_groups<'c, G: GraphView>(
    graph: &G,
    coloring: &'c [Color],
    edge_labels: &[EdgeLabel],
    num_edge_labels: usize,
    node: NodeIndex,
) -> Vec<Vec<&'c Color>> {
    let mut groups: Vec<Vec<&Color>> = vec![Vec::new(); 2 * num_edge_labels];
    for &edge in graph.outbound_edges(node) {
        debug_assert_eq!(graph.edge_source(edge), node);
        groups[2 * edge_labels[edge]].push(&coloring[graph.edge_destination(edge)]);
    }
    for &edge in graph.inbound_edges(node) {
        debug_assert_eq!(graph.edge_destination(edge), node);
        groups[2 * edge_labels[edge] + 1].push(&coloring[graph.edge_source(edge)]);
    }
    for group in &mut groups {
        group.sort_unstable_by(|a, b| a.canonical_cmp(b));
    }
    groups
}

/// Folds `own` with every group, each led by the sentinel.
fn fold_groups(own: &Color, groups: Vec<Vec<&Color>>) -> Color {
    let sentinel = Color::sentinel();
    groups.into_iter().fold(own.clone(), |running, group| {
        pairing::fold(running, std::iter::once(&sentinel).chain(group))
    })
}

/// The sequence a node's `Raw` color folds, kept unfolded: own color, then
/// each group behind a `None` separator. Equal signatures are exactly equal
/// folds, since node colors are never the sentinel.
#[derive(PartialEq, Eq, Hash)]
struct Signature<'c>(Vec<Option<&'c Color>>);

impl<'c> Signature<'c> {
    fn new(own: &'c Color, groups: Vec<Vec<&'c Color>>) -> Self {
        let len = 1 + groups.iter().map(|group| group.len() + 1).sum::<usize>();
        let mut items = Vec::with_capacity(len);
        items.push(Some(own));
        for group in groups {
            items.push(None);
            items.extend(group.into_iter().map(Some));
        }
        Signature(items)
    }
}
