//! Reporting of refinement results
//!
//! Renders a stable coloring as the plain-text listing of the original
//! tool chain, or as JSON.

use crate::algo::StableColoring;
use crate::graph::{GraphStatistics, GraphStore, NodeIndex};
use serde::Serialize;
use std::io::{self, Write};
use std::time::Duration;

/// One color class
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorClass {
    /// Decimal rendering of the color; only equality is meaningful
    pub color: String,
    pub nodes: Vec<NodeIndex>,
}

/// Summary of one refinement run
#[derive(Debug, Clone, Serialize)]
pub struct ColoringReport {
    pub source: String,
    pub graph: GraphStatistics,
    pub iterations: usize,
    pub converged: bool,
    pub num_colors: usize,
    pub elapsed_seconds: f64,
    /// Classes ordered by their smallest member
    pub classes: Vec<ColorClass>,
    /// Color per node index
    pub node_colors: Vec<String>,
    /// Name per dense edge label, when the source declared them
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub edge_labels: Vec<String>,
}

impl ColoringReport {
    pub fn new(
        source: impl Into<String>,
        store: &GraphStore,
        coloring: &StableColoring,
        elapsed: Duration,
    ) -> Self {
        let node_colors: Vec<String> = coloring.node_to_color.iter().map(ToString::to_string).collect();
        let classes = coloring
            .partition()
            .into_iter()
            .map(|nodes| ColorClass {
                color: node_colors[nodes[0]].clone(),
                nodes,
            })
            .collect();

        ColoringReport {
            source: source.into(),
            graph: store.statistics(),
            iterations: coloring.iterations,
            converged: coloring.converged,
            num_colors: coloring.num_colors(),
            elapsed_seconds: elapsed.as_secs_f64(),
            classes,
            node_colors,
            edge_labels: Vec::new(),
        }
    }

    /// Attach edge label names, indexed by dense edge label
    pub fn with_edge_labels(mut self, names: Vec<String>) -> Self {
        self.edge_labels = names;
        self
    }

    /// Total number of nodes over all classes
    pub fn total_nodes(&self) -> usize {
        self.classes.iter().map(|class| class.nodes.len()).sum()
    }
}

/// Plain-text listing: summary line, one line per class, one `color/2`
/// fact per node.
pub fn render_text<W: Write>(report: &ColoringReport, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "WL: #iterations={}, #colors={}, elapsed_time={}",
        report.iterations, report.num_colors, report.elapsed_seconds
    )?;
    for class in &report.classes {
        write!(out, "{} node(s) with color '{}':", class.nodes.len(), class.color)?;
        for node in &class.nodes {
            write!(out, " {}", node)?;
        }
        writeln!(out)?;
    }
    writeln!(out, "total {} node(s)", report.total_nodes())?;
    for (node, color) in report.node_colors.iter().enumerate() {
        writeln!(out, "color({},{})", node, color)?;
    }
    Ok(())
}

pub fn render_json<W: Write>(report: &ColoringReport, out: &mut W) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out).map_err(serde_json::Error::io)
}
