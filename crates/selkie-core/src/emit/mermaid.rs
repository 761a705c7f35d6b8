//! Graph model -> Mermaid text.

use super::mermaid_id;
use crate::Direction;
use crate::model::{DiagramGraph, DiagramKind, EdgeStroke, Node, NodeShape, Relation};
use crate::taxonomy;

pub fn to_mermaid(graph: &DiagramGraph, kind: DiagramKind, direction: Direction) -> String {
    match kind {
        DiagramKind::Flowchart => flowchart(graph, direction),
        DiagramKind::Sequence => sequence(graph),
        DiagramKind::Class => class(graph),
    }
}

/// Newlines inside labels become `<br/>`, the break form Mermaid renders in
/// all three sub-languages.
fn label_text(label: &str) -> String {
    label.replace('\n', "<br/>").replace('"', "'")
}

fn flowchart(graph: &DiagramGraph, direction: Direction) -> String {
    let mut out = format!("flowchart {}\n", direction.as_str());

    for node in graph.nodes.values() {
        out.push_str("    ");
        out.push_str(&node_decl(node));
        out.push('\n');
    }

    for edge in graph.valid_edges() {
        let arrow = taxonomy::mermaid_arrow(edge.stroke);
        let src = mermaid_id(&edge.source);
        let dst = mermaid_id(&edge.target);
        match edge.label.as_deref() {
            Some(label) => {
                let label = label_text(label).replace('|', "/");
                out.push_str(&format!("    {src} {arrow}|{label}| {dst}\n"));
            }
            None => out.push_str(&format!("    {src} {arrow} {dst}\n")),
        }
    }

    out
}

fn node_decl(node: &Node) -> String {
    let id = mermaid_id(&node.id);
    if node.label == node.id && node.shape == NodeShape::Rectangle {
        return id;
    }
    let (open, close) = taxonomy::mermaid_brackets(node.shape);
    format!("{id}{open}\"{}\"{close}", label_text(&node.label))
}

fn sequence(graph: &DiagramGraph) -> String {
    let mut out = String::from("sequenceDiagram\n");

    for node in graph.nodes.values() {
        let keyword = if node.shape == NodeShape::Circle {
            "actor"
        } else {
            "participant"
        };
        let id = mermaid_id(&node.id);
        if node.label == node.id {
            out.push_str(&format!("    {keyword} {id}\n"));
        } else {
            // Participant aliases are a single display line.
            let label = label_text(&node.label).replace("<br/>", " ");
            out.push_str(&format!("    {keyword} {id} as {label}\n"));
        }
    }

    for edge in graph.valid_edges() {
        let arrow = match edge.stroke {
            EdgeStroke::Dashed => "-->>",
            _ => "->>",
        };
        let src = mermaid_id(&edge.source);
        let dst = mermaid_id(&edge.target);
        let label = edge
            .label
            .as_deref()
            .map(|l| label_text(l).replace("<br/>", " "))
            .unwrap_or_default();
        out.push_str(&format!("    {src}{arrow}{dst}: {label}\n"));
    }

    out
}

fn class(graph: &DiagramGraph) -> String {
    let mut out = String::from("classDiagram\n");

    for node in graph.nodes.values() {
        let id = mermaid_id(&node.id);
        let head = if node.label == node.id {
            format!("class {id}")
        } else {
            format!("class {id}[\"{}\"]", label_text(&node.label))
        };
        if node.members.is_empty() {
            out.push_str(&format!("    {head}\n"));
        } else {
            out.push_str(&format!("    {head} {{\n"));
            for member in &node.members {
                out.push_str(&format!("        {member}\n"));
            }
            out.push_str("    }\n");
        }
    }

    for edge in graph.valid_edges() {
        let op = taxonomy::mermaid_relation_op(edge.relation.unwrap_or(Relation::Association));
        let src = mermaid_id(&edge.source);
        let dst = mermaid_id(&edge.target);
        match edge.label.as_deref() {
            Some(label) => {
                let label = label_text(label).replace("<br/>", " ");
                out.push_str(&format!("    {src} {op} {dst} : {label}\n"));
            }
            None => out.push_str(&format!("    {src} {op} {dst}\n")),
        }
    }

    out
}
