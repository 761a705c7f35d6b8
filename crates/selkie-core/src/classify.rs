//! Heuristic diagram-type classifier for the Draw.io -> Mermaid direction.
//!
//! Advisory only: callers with an explicit diagram-type request bypass it.
//! Evaluated in fixed priority order so the same graph always classifies the
//! same way.

use crate::model::{DiagramGraph, DiagramKind, NodeShape};

/// Edge-label vocabulary that marks message-passing diagrams.
const SEQUENCE_WORDS: &[&str] = &["request", "response", "call"];

/// Node-label markers for class diagrams.
const CLASS_WORDS: &[&str] = &["class", "interface"];

pub fn classify(graph: &DiagramGraph) -> DiagramKind {
    let sequency = graph.valid_edges().any(|edge| {
        edge.label.as_deref().is_some_and(|label| {
            let label = label.to_ascii_lowercase();
            SEQUENCE_WORDS.iter().any(|w| label.contains(w))
        })
    });
    if sequency {
        return DiagramKind::Sequence;
    }

    let classy = graph.nodes.values().any(|node| {
        if node.shape == NodeShape::Class {
            return true;
        }
        let label = node.label.to_ascii_lowercase();
        CLASS_WORDS.iter().any(|w| label.contains(w))
    });
    if classy {
        return DiagramKind::Class;
    }

    DiagramKind::Flowchart
}
