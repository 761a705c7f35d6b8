//! Class sub-parser: `class` declarations (with optional member blocks),
//! `X : member` lines, and relationship lines.

use super::{is_valid_id, strip_quotes};
use crate::model::{DiagramGraph, EdgeStroke, NodeShape, Relation};

/// Relationship operators in declaration order. `swap` reverses the declared
/// endpoints so inheritance/realization always point child -> parent and the
/// diamond owner of an aggregation is always the source.
const RELATION_OPS: &[(&str, Relation, bool, EdgeStroke)] = &[
    ("<|--", Relation::Inheritance, true, EdgeStroke::Plain),
    ("--|>", Relation::Inheritance, false, EdgeStroke::Plain),
    ("<|..", Relation::Realization, true, EdgeStroke::Dashed),
    ("..|>", Relation::Realization, false, EdgeStroke::Dashed),
    ("o--", Relation::Aggregation, false, EdgeStroke::Plain),
    ("--o", Relation::Aggregation, true, EdgeStroke::Plain),
    ("*--", Relation::Aggregation, false, EdgeStroke::Plain),
    ("--*", Relation::Aggregation, true, EdgeStroke::Plain),
    ("..>", Relation::Dependency, false, EdgeStroke::Dashed),
    ("<..", Relation::Dependency, true, EdgeStroke::Dashed),
    ("..", Relation::Association, false, EdgeStroke::Dashed),
    ("--", Relation::Association, false, EdgeStroke::Plain),
];

pub(super) fn parse(lines: &[&str]) -> DiagramGraph {
    let mut graph = DiagramGraph::new();
    // Id of the class whose `{ ... }` member block is currently open.
    let mut open_block: Option<String> = None;

    for line in lines {
        if let Some(class_id) = open_block.clone() {
            if line.trim() == "}" {
                open_block = None;
                continue;
            }
            push_member(&mut graph, &class_id, line.trim());
            continue;
        }

        if let Some(rest) = line.strip_prefix("class ") {
            open_block = declare_class(&mut graph, rest.trim());
            continue;
        }

        if parse_relationship(&mut graph, line) {
            continue;
        }

        // `X : member` appends to an existing or auto-registered class.
        if let Some((id, member)) = line.split_once(':') {
            let id = id.trim();
            let member = member.trim();
            if is_valid_id(id) && !member.is_empty() {
                push_member(&mut graph, id, member);
                continue;
            }
        }

        tracing::debug!(line, "skipping unrecognized class line");
    }

    graph
}

/// Parses `class X`, `class X["Label"]`, and `class X {`; returns the class
/// id when the declaration opens a member block.
fn declare_class(graph: &mut DiagramGraph, rest: &str) -> Option<String> {
    let (decl, opens_block) = match rest.strip_suffix('{') {
        Some(d) => (d.trim(), true),
        None => (rest, false),
    };

    let (id, label) = match decl.find('[') {
        Some(oi) if decl.ends_with(']') => (
            decl[..oi].trim(),
            Some(strip_quotes(decl[oi + 1..decl.len() - 1].trim())),
        ),
        _ => (decl, None),
    };
    if !is_valid_id(id) {
        tracing::debug!(declaration = rest, "skipping malformed class declaration");
        return None;
    }

    graph.ensure_node(id, label, NodeShape::Class);
    opens_block.then(|| id.to_string())
}

fn push_member(graph: &mut DiagramGraph, class_id: &str, member: &str) {
    if member.is_empty() {
        return;
    }
    let node = graph.ensure_node(class_id, None, NodeShape::Class);
    node.members.push(member.to_string());
}

fn parse_relationship(graph: &mut DiagramGraph, line: &str) -> bool {
    for (op, relation, swap, stroke) in RELATION_OPS {
        let Some(pos) = line.find(op) else { continue };
        let lhs = line[..pos].trim();
        let rhs = &line[pos + op.len()..];
        let (rhs, label) = match rhs.split_once(':') {
            Some((r, l)) => (r.trim(), Some(l.trim().to_string())),
            None => (rhs.trim(), None),
        };
        if !is_valid_id(lhs) || !is_valid_id(rhs) {
            return false;
        }

        graph.ensure_node(lhs, None, NodeShape::Class);
        graph.ensure_node(rhs, None, NodeShape::Class);
        let (source, target) = if *swap { (rhs, lhs) } else { (lhs, rhs) };
        graph.push_edge(source, target, label, *stroke, Some(*relation));
        return true;
    }
    false
}
