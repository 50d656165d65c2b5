//! wl-refine CLI: stable colorings of `.lp` fact files
//!
//! Logs go to stderr, reports to stdout.

use anyhow::{Context, Result};
use clap::Parser;
use comfy_table::{ContentArrangement, Table};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use wl_refine::algo::{stable_coloring, ColorCompaction, ColoringOptions};
use wl_refine::ingest::{load_graph, LoadOptions, LoadedGraph};
use wl_refine::report::{render_json, render_text, ColoringReport};

#[derive(Parser)]
#[command(name = "wl-refine", version, about = "Color refinement (1-WL) over labeled graphs")]
struct Cli {
    /// Graph files (`.lp` fact listings)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Verbose logging
    #[arg(long)]
    debug: bool,

    /// Keep every edge, not only those whose label is chosen
    #[arg(long)]
    disable_chosen_labels: bool,

    /// Remap each round's colors to 1..=k
    #[arg(long)]
    normalize_colors: bool,

    /// Ignore `color/2` atoms
    #[arg(long)]
    uniform_initial_coloring: bool,

    /// Stop after this many rounds even without a fixpoint
    #[arg(long, value_name = "N")]
    max_iterations: Option<usize>,

    /// Refine nodes on the calling thread only
    #[arg(long)]
    sequential: bool,

    /// Output format
    #[arg(long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Table,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    if let Err(e) = run(&cli) {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let load_options = LoadOptions {
        uniform_initial_coloring: cli.uniform_initial_coloring,
        use_chosen_labels: !cli.disable_chosen_labels,
    };
    let coloring_options = ColoringOptions {
        compaction: if cli.normalize_colors {
            ColorCompaction::Dense
        } else {
            ColorCompaction::Raw
        },
        max_iterations: cli.max_iterations,
        parallel: !cli.sequential,
        ..ColoringOptions::default()
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for path in &cli.files {
        debug!("Processing {:?}", path);
        let loaded = load_graph(path, &load_options)
            .with_context(|| format!("failed to load {}", path.display()))?;
        let stats = loaded.store.statistics();
        info!(
            nodes = stats.node_count,
            edges = stats.edge_count,
            edge_labels = stats.edge_label_count,
            max_degree = stats.max_degree,
            "loaded {}",
            path.display()
        );

        let start = Instant::now();
        let coloring = stable_coloring(&loaded.store, &coloring_options)
            .with_context(|| format!("refinement failed for {}", path.display()))?;
        let report = ColoringReport::new(
            path.display().to_string(),
            &loaded.store,
            &coloring,
            start.elapsed(),
        )
        .with_edge_labels(loaded.edge_label_names.clone());

        match cli.format {
            OutputFormat::Text => render_text(&report, &mut out)?,
            OutputFormat::Json => render_json(&report, &mut out)?,
            OutputFormat::Table => print_table(&report, &loaded, &mut out)?,
        }
    }

    out.flush()?;
    Ok(())
}

fn print_table<W: Write>(report: &ColoringReport, loaded: &LoadedGraph, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "{}: {} node(s), {} edge(s), {} color(s) after {} iteration(s){}",
        report.source,
        report.graph.node_count,
        report.graph.edge_count,
        report.num_colors,
        report.iterations,
        if report.converged { "" } else { " (not converged)" }
    )?;
    if !report.edge_labels.is_empty() {
        writeln!(out, "edge labels: {}", report.edge_labels.join(", "))?;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Color", "Size", "Nodes"]);
    for class in &report.classes {
        let names: Vec<&str> = class
            .nodes
            .iter()
            .map(|&node| loaded.node_names[node].as_str())
            .collect();
        table.add_row(vec![
            class.color.clone(),
            class.nodes.len().to_string(),
            names.join(" "),
        ]);
    }

    writeln!(out, "{}", table)
}
