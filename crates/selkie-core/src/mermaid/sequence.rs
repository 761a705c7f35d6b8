//! Sequence sub-parser: participant/actor declarations plus message lines.
//! Control blocks (loop/alt/note/...) are outside the graph model and skip.

use super::strip_quotes;
use crate::model::{DiagramGraph, EdgeStroke, NodeShape};
use regex::Regex;
use std::sync::OnceLock;

fn message_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Longest arrows first so the alternation never truncates a token, and a
    // lazy source id so a leading `-` of the arrow is never swallowed by the
    // id charset.
    RE.get_or_init(|| {
        Regex::new(r"^([\w.-]+?)\s*(-->>|->>|-->|->|-)\s*([\w.-]+)\s*:\s*(.*)$")
            .expect("valid regex")
    })
}

pub(super) fn parse(lines: &[&str]) -> DiagramGraph {
    let mut graph = DiagramGraph::new();

    for line in lines {
        if let Some(rest) = keyword_rest(line, "participant") {
            declare(&mut graph, rest, NodeShape::Rectangle);
            continue;
        }
        if let Some(rest) = keyword_rest(line, "actor") {
            declare(&mut graph, rest, NodeShape::Circle);
            continue;
        }

        let Some(caps) = message_re().captures(line) else {
            tracing::debug!(line, "skipping unrecognized sequence line");
            continue;
        };
        let (src, arrow, dst) = (&caps[1], &caps[2], &caps[3]);
        let label = caps[4].trim();

        // Message endpoints are auto-registered on first sight.
        graph.ensure_node(src, None, NodeShape::Rectangle);
        graph.ensure_node(dst, None, NodeShape::Rectangle);

        let stroke = if arrow.starts_with("--") {
            EdgeStroke::Dashed
        } else {
            EdgeStroke::Plain
        };
        let label = (!label.is_empty()).then(|| label.to_string());
        graph.push_edge(src, dst, label, stroke, None);
    }

    graph
}

fn keyword_rest<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    rest.starts_with(char::is_whitespace).then(|| rest.trim())
}

fn declare(graph: &mut DiagramGraph, rest: &str, shape: NodeShape) {
    let (id, label) = match rest.split_once(" as ") {
        Some((id, label)) => (id.trim(), Some(strip_quotes(label.trim()))),
        None => (rest, None),
    };
    if id.is_empty() {
        return;
    }
    graph.ensure_node(id, label, shape);
}
