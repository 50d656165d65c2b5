use std::io::Write;
use std::time::Duration;
use tempfile::Builder;
use wl_refine::algo::{stable_coloring, ColorCompaction, ColoringOptions};
use wl_refine::ingest::{load_graph, IngestError, LoadOptions};
use wl_refine::report::{render_json, render_text, ColoringReport};

// Two disjoint 2-cycles over label 1, plus a tail u -> a over label 2.
const FACTS: &str = "\
node(a).
node(b).
node(c).
node(d).
node(u).
labelname(1,pair).
labelname(2,tail).
edge((a,b)).
edge((b,a)).
edge((c,d)).
edge((d,c)).
edge((u,a)).
tlabel((a,b),1).
tlabel((b,a),1).
tlabel((c,d),1).
tlabel((d,c),1).
tlabel((u,a),2).
chosen(1).
chosen(2).
";

fn write_facts(text: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_and_refine() {
    let file = write_facts(FACTS, ".lp");
    let loaded = load_graph(file.path(), &LoadOptions::default()).unwrap();
    assert_eq!(loaded.store.num_nodes(), 5);
    assert_eq!(loaded.store.num_edges(), 5);

    let result = stable_coloring(&loaded.store, &ColoringOptions::default()).unwrap();
    // a has an extra in-neighbor, b sees it, c and d stay twins, u is alone.
    assert_eq!(result.partition(), vec![vec![0], vec![1], vec![2, 3], vec![4]]);
}

#[test]
fn test_unchosen_tail_is_dropped() {
    let text = FACTS.replace("chosen(2).\n", "");
    let file = write_facts(&text, ".lp");
    let loaded = load_graph(file.path(), &LoadOptions::default()).unwrap();
    assert_eq!(loaded.store.num_edges(), 4);

    let result = stable_coloring(&loaded.store, &ColoringOptions::default()).unwrap();
    assert_eq!(result.partition(), vec![vec![0, 1, 2, 3], vec![4]]);

    let all_edges = LoadOptions {
        use_chosen_labels: false,
        ..Default::default()
    };
    let loaded = load_graph(file.path(), &all_edges).unwrap();
    assert_eq!(loaded.store.num_edges(), 5);
}

#[test]
fn test_initial_colors_from_file() {
    let text = format!("{}color(c,9).\n", FACTS);
    let file = write_facts(&text, ".lp");

    let loaded = load_graph(file.path(), &LoadOptions::default()).unwrap();
    let result = stable_coloring(&loaded.store, &ColoringOptions::default()).unwrap();
    assert_eq!(result.num_colors(), 5);

    let uniform = LoadOptions {
        uniform_initial_coloring: true,
        ..Default::default()
    };
    let loaded = load_graph(file.path(), &uniform).unwrap();
    let result = stable_coloring(&loaded.store, &ColoringOptions::default()).unwrap();
    assert_eq!(result.num_colors(), 4);
}

#[test]
fn test_text_report_for_file() {
    let file = write_facts(FACTS, ".lp");
    let loaded = load_graph(file.path(), &LoadOptions::default()).unwrap();
    let options = ColoringOptions {
        compaction: ColorCompaction::Dense,
        ..Default::default()
    };
    let result = stable_coloring(&loaded.store, &options).unwrap();
    let report = ColoringReport::new("facts.lp", &loaded.store, &result, Duration::ZERO);

    let mut out = Vec::new();
    render_text(&report, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.starts_with("WL: #iterations="));
    assert!(text.contains("2 node(s) with color '3': 2 3"));
    assert!(text.contains("total 5 node(s)"));
    assert_eq!(text.lines().filter(|l| l.starts_with("color(")).count(), 5);
}

#[test]
fn test_report_carries_edge_label_names() {
    let file = write_facts(FACTS, ".lp");
    let loaded = load_graph(file.path(), &LoadOptions::default()).unwrap();
    assert_eq!(loaded.edge_label_names, vec!["pair", "tail"]);

    let options = ColoringOptions {
        compaction: ColorCompaction::Dense,
        ..Default::default()
    };
    let result = stable_coloring(&loaded.store, &options).unwrap();
    let report = ColoringReport::new("facts.lp", &loaded.store, &result, Duration::ZERO)
        .with_edge_labels(loaded.edge_label_names.clone());

    let mut out = Vec::new();
    render_json(&report, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("\"edge_labels\""));
    assert!(text.contains("\"pair\""));
    assert!(text.contains("\"tail\""));
}

#[test]
fn test_unsupported_extension() {
    let file = write_facts(FACTS, ".txt");
    let err = load_graph(file.path(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFormat(_)));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_graph(&dir.path().join("absent.lp"), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::Io(_)));
}
