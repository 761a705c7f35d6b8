use crate::model::{DiagramKind, EdgeStroke, NodeShape};
use crate::mermaid::parse_mermaid;

#[test]
fn parse_flowchart_counts_nodes_and_edges() {
    let text = r#"flowchart TD
A[Start] --> B{Check}
B -->|yes| C([Done])
B -->|no| D"#;

    let (graph, kind) = parse_mermaid(text).unwrap();
    assert_eq!(kind, DiagramKind::Flowchart);
    assert_eq!(graph.nodes.len(), 4);
    assert_eq!(graph.edges.len(), 3);
    assert!(graph.valid_edges().count() == 3);

    assert_eq!(graph.nodes["A"].label, "Start");
    assert_eq!(graph.nodes["A"].shape, NodeShape::Rectangle);
    assert_eq!(graph.nodes["B"].shape, NodeShape::Diamond);
    assert_eq!(graph.nodes["C"].shape, NodeShape::Stadium);
    assert_eq!(graph.nodes["D"].label, "D");

    assert_eq!(graph.edges[1].label.as_deref(), Some("yes"));
    assert_eq!(graph.edges[2].label.as_deref(), Some("no"));
}

#[test]
fn parse_flowchart_all_bracket_shapes() {
    let text = r#"flowchart LR
A(Round)
B([Stadium])
C[[Subroutine]]
D[(Cylinder)]
E{{Hexagon}}
F{Diamond}
G((Circle))
H[/Parallelogram/]
I>Asymmetric]
J[Rectangle]"#;

    let (graph, _) = parse_mermaid(text).unwrap();
    let shape = |id: &str| graph.nodes[id].shape;
    assert_eq!(shape("A"), NodeShape::Rounded);
    assert_eq!(shape("B"), NodeShape::Stadium);
    assert_eq!(shape("C"), NodeShape::Subroutine);
    assert_eq!(shape("D"), NodeShape::Cylinder);
    assert_eq!(shape("E"), NodeShape::Hexagon);
    assert_eq!(shape("F"), NodeShape::Diamond);
    assert_eq!(shape("G"), NodeShape::Circle);
    assert_eq!(shape("H"), NodeShape::Parallelogram);
    assert_eq!(shape("I"), NodeShape::Asymmetric);
    assert_eq!(shape("J"), NodeShape::Rectangle);
    assert_eq!(graph.nodes["I"].label, "Asymmetric");
}

#[test]
fn parse_flowchart_chained_edges_emit_one_edge_per_hop() {
    let (graph, _) = parse_mermaid("graph TD\nA --> B --> C").unwrap();
    assert_eq!(graph.nodes.len(), 3);
    assert_eq!(graph.edges.len(), 2);
    assert_eq!(
        (graph.edges[0].source.as_str(), graph.edges[0].target.as_str()),
        ("A", "B")
    );
    assert_eq!(
        (graph.edges[1].source.as_str(), graph.edges[1].target.as_str()),
        ("B", "C")
    );
}

#[test]
fn parse_flowchart_mixed_strokes_in_one_chain() {
    let (graph, _) = parse_mermaid("flowchart TD\nA-.->B==>C").unwrap();
    assert_eq!(graph.edges.len(), 2);
    assert_eq!(graph.edges[0].stroke, EdgeStroke::Dashed);
    assert_eq!(graph.edges[1].stroke, EdgeStroke::Thick);
}

#[test]
fn parse_flowchart_leftmost_pattern_wins_over_declaration_order() {
    // `---` sits to the left of `-->`; the earlier match must win even
    // though `-->` is declared first.
    let (graph, _) = parse_mermaid("flowchart TD\nA --- B --> C").unwrap();
    assert_eq!(graph.edges.len(), 2);
    assert_eq!(graph.edges[0].source, "A");
    assert_eq!(graph.edges[0].target, "B");
    assert_eq!(graph.edges[0].stroke, EdgeStroke::Plain);
}

#[test]
fn parse_flowchart_subgraph_scope_records_membership() {
    let text = r#"flowchart TD
subgraph grp [Backend]
A --> B
end
C --> A"#;

    let (graph, _) = parse_mermaid(text).unwrap();
    assert_eq!(graph.subgraphs.len(), 1);
    assert_eq!(graph.subgraphs[0].id, "grp");
    assert_eq!(graph.subgraphs[0].title, "Backend");
    assert_eq!(graph.subgraphs[0].nodes, vec!["A", "B"]);
    assert_eq!(graph.nodes.len(), 3);
}

#[test]
fn parse_flowchart_first_writer_wins_for_labels() {
    let (graph, _) = parse_mermaid("flowchart TD\nA[First]\nA[Second]").unwrap();
    assert_eq!(graph.nodes["A"].label, "First");

    // A bare auto-registration is upgraded by a later richer declaration.
    let (graph, _) = parse_mermaid("flowchart TD\nA --> B\nA[Label]").unwrap();
    assert_eq!(graph.nodes["A"].label, "Label");
}

#[test]
fn parse_flowchart_skips_malformed_lines() {
    let text = r#"flowchart TD
A --> B
style A fill:#f00
linkStyle 0 stroke:#333
this is not a node"#;

    let (graph, _) = parse_mermaid(text).unwrap();
    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(graph.edges.len(), 1);
}

#[test]
fn parse_unknown_header_falls_back_to_flowchart() {
    let (graph, kind) = parse_mermaid("someDiagram\nA --> B").unwrap();
    assert_eq!(kind, DiagramKind::Flowchart);
    // The unrecognized header line itself parses as a bare node.
    assert!(graph.nodes.contains_key("someDiagram"));
    assert!(graph.nodes.contains_key("A"));
    assert!(graph.nodes.contains_key("B"));
}

#[test]
fn parse_flowchart_comments_and_blank_lines_are_ignored() {
    let (graph, _) = parse_mermaid("flowchart TD\n\n%% a comment\nA --> B\n").unwrap();
    assert_eq!(graph.nodes.len(), 2);
}

#[test]
fn parse_flowchart_quoted_labels_and_breaks() {
    let (graph, _) = parse_mermaid("flowchart TD\nA[\"two<br/>lines\"]").unwrap();
    assert_eq!(graph.nodes["A"].label, "two\nlines");
}
