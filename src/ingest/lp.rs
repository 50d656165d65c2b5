//! Reader for `.lp` fact files
//!
//! One atom per line; lines that match none of the atoms below are ignored.
//!
//! ```text
//! node(a).                 declare node `a`
//! labelname(3,next).       declare edge label index 3
//! edge((a,b)).             directed edge a -> b
//! tlabel((a,b),3).         edge (a,b) has label 3
//! chosen(3).               label 3 is chosen
//! color(a,2).              initial color of node `a`
//! ```

use super::{IngestError, IngestResult, LoadOptions, LoadedGraph};
use crate::graph::{GraphStore, Label, NodeIndex};
use indexmap::{IndexMap, IndexSet};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::BufRead;
use tracing::{debug, info};

type EdgeKey = (String, String);

/// Top-level arguments of the first parenthesized group in `atom`.
///
/// Nested groups are kept intact: `tlabel((a,b),3)` yields `["(a,b)", "3"]`.
/// Returns `None` if the group is missing or never closed.
pub fn atom_args(atom: &str) -> Option<Vec<&str>> {
    let open = atom.find('(')?;
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = open + 1;

    for (offset, ch) in atom[open..].char_indices() {
        let i = open + offset;
        match ch {
            '(' => depth += 1,
            ',' if depth == 1 => {
                args.push(atom[start..i].trim());
                start = i + 1;
            }
            ')' => {
                depth -= 1;
                if depth == 0 {
                    args.push(atom[start..i].trim());
                    return Some(args);
                }
            }
            _ => {}
        }
    }
    None
}

/// Raw facts collected in a first pass, validated afterwards
#[derive(Default)]
struct Facts {
    nodes: IndexMap<String, NodeIndex>,
    labels: BTreeMap<u64, String>,
    edges: IndexSet<EdgeKey>,
    edge_labels: HashMap<EdgeKey, Vec<u64>>,
    chosen: HashSet<u64>,
    colors: Vec<(String, Label)>,
}

struct Line<'a> {
    number: usize,
    text: &'a str,
}

impl Line<'_> {
    fn malformed(&self, reason: &'static str) -> IngestError {
        IngestError::Malformed {
            line: self.number,
            atom: self.text.to_string(),
            reason,
        }
    }

    fn args(&self, arity: usize) -> IngestResult<Vec<&str>> {
        let args = atom_args(self.text).ok_or_else(|| self.malformed("unbalanced parentheses"))?;
        if args.len() != arity {
            return Err(self.malformed("wrong number of arguments"));
        }
        Ok(args)
    }

    fn edge(&self, term: &str) -> IngestResult<EdgeKey> {
        match atom_args(term).as_deref() {
            Some([src, dst]) => Ok((src.to_string(), dst.to_string())),
            _ => Err(self.malformed("expected an edge term (src,dst)")),
        }
    }

    fn integer(&self, term: &str) -> IngestResult<u64> {
        term.parse().map_err(|_| self.malformed("expected a non-negative integer"))
    }
}

impl Facts {
    fn collect<R: BufRead>(reader: R) -> IngestResult<Self> {
        let mut facts = Facts::default();

        for (i, text) in reader.lines().enumerate() {
            let text = text?;
            let line = Line { number: i + 1, text: text.trim() };

            if line.text.starts_with("node(") {
                // Compound names keep their inner commas.
                let name = atom_args(line.text)
                    .ok_or_else(|| line.malformed("unbalanced parentheses"))?
                    .join(",");
                let index = facts.nodes.len();
                if facts.nodes.insert(name.clone(), index).is_some() {
                    return Err(IngestError::DuplicateNode { line: line.number, node: name });
                }
            } else if line.text.starts_with("labelname(") {
                let args = line.args(2)?;
                let index = line.integer(args[0])?;
                if facts.labels.insert(index, args[1].to_string()).is_some() {
                    return Err(IngestError::DuplicateLabel { line: line.number, index });
                }
            } else if line.text.starts_with("edge(") {
                let args = line.args(1)?;
                let edge = line.edge(args[0])?;
                if facts.edges.contains(&edge) {
                    let (src, dst) = edge;
                    return Err(IngestError::DuplicateEdge { line: line.number, src, dst });
                }
                facts.edges.insert(edge);
            } else if line.text.starts_with("tlabel(") {
                let args = line.args(2)?;
                let edge = line.edge(args[0])?;
                let label = line.integer(args[1])?;
                facts.edge_labels.entry(edge).or_default().push(label);
            } else if line.text.starts_with("chosen(") {
                let args = line.args(1)?;
                facts.chosen.insert(line.integer(args[0])?);
            } else if line.text.starts_with("color(") {
                let args = line.args(2)?;
                let color = line.integer(args[1])?;
                facts.colors.push((args[0].to_string(), color));
            }
        }

        Ok(facts)
    }

    fn node(&self, name: &str) -> IngestResult<NodeIndex> {
        self.nodes
            .get(name)
            .copied()
            .ok_or_else(|| IngestError::UnknownNode(name.to_string()))
    }
}

/// Parse a `.lp` fact listing into a directed graph.
///
/// Declared label indices are remapped to `0..k` in ascending order. Nodes
/// without a `color/2` atom start with label 1.
pub fn read_lp_graph<R: BufRead>(reader: R, options: &LoadOptions) -> IngestResult<LoadedGraph> {
    let facts = Facts::collect(reader)?;
    info!(
        nodes = facts.nodes.len(),
        edges = facts.edges.len(),
        edge_labels = facts.labels.len(),
        "read fact file"
    );

    // Consistency
    for (src, dst) in &facts.edges {
        facts.node(src)?;
        facts.node(dst)?;
    }
    for ((src, dst), labels) in &facts.edge_labels {
        facts.node(src)?;
        facts.node(dst)?;
        if let Some(&label) = labels.iter().find(|&&label| !facts.labels.contains_key(&label)) {
            return Err(IngestError::UnknownLabel {
                src: src.clone(),
                dst: dst.clone(),
                label,
            });
        }
    }

    let remap: HashMap<u64, Label> = facts
        .labels
        .keys()
        .enumerate()
        .map(|(dense, &index)| (index, dense as Label))
        .collect();

    let mut node_labels: Vec<Label> = vec![1; facts.nodes.len()];
    if !options.uniform_initial_coloring {
        for (name, color) in &facts.colors {
            node_labels[facts.node(name)?] = *color;
        }
    }

    let mut edges_src = Vec::with_capacity(facts.edges.len());
    let mut edges_dst = Vec::with_capacity(facts.edges.len());
    let mut edge_labels = Vec::with_capacity(facts.edges.len());
    for (src, dst) in &facts.edges {
        let labels = facts
            .edge_labels
            .get(&(src.clone(), dst.clone()))
            .map_or(&[][..], Vec::as_slice);
        let &[label] = labels else {
            return Err(IngestError::EdgeLabelCount {
                src: src.clone(),
                dst: dst.clone(),
                count: labels.len(),
            });
        };
        if options.use_chosen_labels && !facts.chosen.contains(&label) {
            continue;
        }
        edges_src.push(facts.node(src)?);
        edges_dst.push(facts.node(dst)?);
        edge_labels.push(remap[&label]);
    }
    debug!(
        kept = edges_src.len(),
        dropped = facts.edges.len() - edges_src.len(),
        "filtered edges by chosen labels"
    );

    let store = GraphStore::from_parts(
        facts.nodes.len(),
        Some(node_labels),
        &edges_src,
        &edges_dst,
        Some(edge_labels.as_slice()),
        true,
    )?;

    Ok(LoadedGraph {
        store,
        node_names: facts.nodes.into_keys().collect(),
        edge_label_names: facts.labels.into_values().collect(),
    })
}
