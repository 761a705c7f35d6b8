//! Flowchart sub-parser.
//!
//! Every line is scanned for the *leftmost* occurrence of any edge token;
//! declaration order only breaks ties at the same position. Text on either
//! side of the match is parsed as a node declaration, and the right side is
//! re-scanned to support chained syntax (`A --> B --> C`), emitting one edge
//! per hop.

use super::{is_valid_id, label_breaks_to_newlines, strip_quotes};
use crate::model::{DiagramGraph, EdgeStroke, NodeShape, Subgraph};
use crate::taxonomy::MERMAID_BRACKET_RULES;

/// Edge tokens in declaration order. Tie-break at equal match positions
/// follows this order.
const EDGE_TOKENS: &[(&str, EdgeStroke)] = &[
    ("-->", EdgeStroke::Plain),
    ("---", EdgeStroke::Plain),
    ("-.->", EdgeStroke::Dashed),
    ("==>", EdgeStroke::Thick),
];

struct EdgeMatch {
    start: usize,
    end: usize,
    stroke: EdgeStroke,
    label: Option<String>,
}

fn find_edge(s: &str) -> Option<EdgeMatch> {
    let mut best: Option<(usize, usize, EdgeStroke)> = None;
    for (token, stroke) in EDGE_TOKENS {
        if let Some(i) = s.find(token) {
            let earlier = best.is_none_or(|(b, _, _)| i < b);
            if earlier {
                best = Some((i, i + token.len(), *stroke));
            }
        }
    }
    let (start, mut end, stroke) = best?;

    // Optional `|label|` infix directly after the token.
    let mut label = None;
    let rest = &s[end..];
    if let Some(after_pipe) = rest.strip_prefix('|')
        && let Some(close) = after_pipe.find('|')
    {
        let raw = after_pipe[..close].trim();
        if !raw.is_empty() {
            label = Some(label_breaks_to_newlines(strip_quotes(raw)));
        }
        end += 1 + close + 1;
    }

    Some(EdgeMatch {
        start,
        end,
        stroke,
        label,
    })
}

struct NodeSpec<'a> {
    id: &'a str,
    label: Option<String>,
    shape: NodeShape,
}

fn parse_node_spec(raw: &str) -> Option<NodeSpec<'_>> {
    let s = raw.trim().trim_end_matches(';').trim_end();
    if s.is_empty() {
        return None;
    }

    for (open, close, shape) in MERMAID_BRACKET_RULES {
        let Some(oi) = s.find(open) else { continue };
        if oi == 0 || !s.ends_with(close) || s.len() < oi + open.len() + close.len() {
            continue;
        }
        let id = s[..oi].trim();
        if !is_valid_id(id) {
            continue;
        }
        let inner = strip_quotes(s[oi + open.len()..s.len() - close.len()].trim());
        let label = if inner.is_empty() {
            None
        } else {
            Some(label_breaks_to_newlines(inner))
        };
        return Some(NodeSpec {
            id,
            label,
            shape: *shape,
        });
    }

    is_valid_id(s).then_some(NodeSpec {
        id: s,
        label: None,
        shape: NodeShape::Rectangle,
    })
}

pub(super) fn parse(lines: &[&str]) -> DiagramGraph {
    let mut graph = DiagramGraph::new();
    // Stack of open `subgraph` scopes; indexes into `graph.subgraphs`.
    let mut scope_stack: Vec<usize> = Vec::new();

    for line in lines {
        if let Some(rest) = line.strip_prefix("subgraph")
            && (rest.is_empty() || rest.starts_with(char::is_whitespace))
        {
            let idx = open_subgraph(&mut graph, rest.trim());
            scope_stack.push(idx);
            continue;
        }
        if line.trim() == "end" {
            scope_stack.pop();
            continue;
        }

        parse_statement(line, &mut graph, scope_stack.last().copied());
    }

    graph
}

fn open_subgraph(graph: &mut DiagramGraph, header: &str) -> usize {
    let (id, title) = match header.find('[') {
        Some(oi) if header.ends_with(']') => {
            let id = header[..oi].trim();
            let title = strip_quotes(header[oi + 1..header.len() - 1].trim());
            if id.is_empty() {
                (title.to_string(), title.to_string())
            } else {
                (id.to_string(), title.to_string())
            }
        }
        _ => {
            let text = strip_quotes(header).to_string();
            (text.clone(), text)
        }
    };
    graph.subgraphs.push(Subgraph {
        id,
        title,
        nodes: Vec::new(),
    });
    graph.subgraphs.len() - 1
}

fn parse_statement(line: &str, graph: &mut DiagramGraph, scope: Option<usize>) {
    let Some(first) = find_edge(line) else {
        // Standalone node declaration.
        match parse_node_spec(line) {
            Some(spec) => register(graph, &spec, scope),
            None => tracing::debug!(line, "skipping unrecognized flowchart line"),
        }
        return;
    };

    let Some(src_spec) = parse_node_spec(&line[..first.start]) else {
        tracing::debug!(line, "skipping edge with unparsable source");
        return;
    };
    register(graph, &src_spec, scope);
    let mut source = src_spec.id.to_string();

    let mut pending = first;
    let mut rest = &line[pending.end..];
    loop {
        let next = find_edge(rest);
        let segment = match &next {
            Some(m) => &rest[..m.start],
            None => rest,
        };
        let Some(target_spec) = parse_node_spec(segment) else {
            tracing::debug!(line, "skipping edge with unparsable target");
            return;
        };
        register(graph, &target_spec, scope);
        graph.push_edge(
            &source,
            target_spec.id,
            pending.label.take(),
            pending.stroke,
            None,
        );
        source = target_spec.id.to_string();

        match next {
            Some(m) => {
                rest = &rest[m.end..];
                pending = m;
            }
            None => return,
        }
    }
}

fn register(graph: &mut DiagramGraph, spec: &NodeSpec<'_>, scope: Option<usize>) {
    graph.ensure_node(spec.id, spec.label.as_deref(), spec.shape);
    if let Some(idx) = scope {
        let sub = &mut graph.subgraphs[idx];
        if !sub.nodes.iter().any(|n| n == spec.id) {
            sub.nodes.push(spec.id.to_string());
        }
    }
}
