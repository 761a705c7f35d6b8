use crate::classify::classify;
use crate::model::{DiagramGraph, DiagramKind, NodeShape};

fn graph_with_edge_label(label: &str) -> DiagramGraph {
    let mut graph = DiagramGraph::new();
    graph.ensure_node("a", None, NodeShape::Rectangle);
    graph.ensure_node("b", None, NodeShape::Rectangle);
    graph.push_edge("a", "b", Some(label.to_string()), Default::default(), None);
    graph
}

#[test]
fn sequence_vocabulary_in_edge_labels_wins() {
    assert_eq!(
        classify(&graph_with_edge_label("API request")),
        DiagramKind::Sequence
    );
    assert_eq!(
        classify(&graph_with_edge_label("sends Response")),
        DiagramKind::Sequence
    );
    assert_eq!(
        classify(&graph_with_edge_label("rpc call")),
        DiagramKind::Sequence
    );
}

#[test]
fn class_markers_in_node_labels_rank_second() {
    let mut graph = DiagramGraph::new();
    graph.ensure_node("ui", Some("UserInterface (interface)"), NodeShape::Rectangle);
    assert_eq!(classify(&graph), DiagramKind::Class);

    let mut graph = DiagramGraph::new();
    graph.ensure_node("c", Some("plain"), NodeShape::Class);
    assert_eq!(classify(&graph), DiagramKind::Class);
}

#[test]
fn sequence_vocabulary_outranks_class_markers() {
    let mut graph = graph_with_edge_label("login request");
    graph.ensure_node("c", Some("SomeClass"), NodeShape::Class);
    assert_eq!(classify(&graph), DiagramKind::Sequence);
}

#[test]
fn everything_else_is_a_flowchart() {
    assert_eq!(
        classify(&graph_with_edge_label("yes")),
        DiagramKind::Flowchart
    );
    assert_eq!(classify(&DiagramGraph::new()), DiagramKind::Flowchart);
}
