//! Deterministic layered layout for graphs without geometry.
//!
//! Mermaid-sourced graphs never carry coordinates, so the Draw.io serializer
//! needs some. This is the breadth-first flavor of layered placement: layer 0
//! is the set of in-degree-0 nodes (falling back to the first-declared node
//! for cyclic or edge-free graphs), each following layer is the not-yet-seen
//! successor set of the previous one, and stragglers in disconnected
//! fragments join the last layer. O(V+E), deterministic for a given
//! insertion order.

use crate::model::{DiagramGraph, Geometry};
use rustc_hash::{FxHashMap, FxHashSet};

pub const NODE_WIDTH: f64 = 120.0;
pub const NODE_HEIGHT: f64 = 60.0;
pub const H_SPACING: f64 = 180.0;
pub const V_SPACING: f64 = 120.0;
const ORIGIN_X: f64 = 50.0;
const ORIGIN_Y: f64 = 50.0;
/// Uniform horizontal shift so layouts land near the center of a default
/// editor page instead of hugging its left edge.
const RECENTER_X: f64 = 300.0;

/// Assigns geometry to every node, in place. Call sites gate on "any node
/// lacks (or has degenerate) geometry"; once invoked, all nodes get fresh
/// coordinates so rows stay consistent.
pub fn assign_geometry(graph: &mut DiagramGraph) {
    let order: Vec<String> = graph.nodes.keys().cloned().collect();
    if order.is_empty() {
        return;
    }

    let mut adjacency: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
    let mut in_degree: FxHashMap<&str, usize> = FxHashMap::default();
    for id in &order {
        adjacency.entry(id).or_default();
        in_degree.entry(id).or_insert(0);
    }
    for edge in graph.valid_edges() {
        adjacency
            .get_mut(edge.source.as_str())
            .expect("valid edge endpoints are registered")
            .push(&edge.target);
        *in_degree
            .get_mut(edge.target.as_str())
            .expect("valid edge endpoints are registered") += 1;
    }

    let mut layers: Vec<Vec<&str>> = Vec::new();
    let mut visited: FxHashSet<&str> = FxHashSet::default();

    let mut current: Vec<&str> = order
        .iter()
        .map(String::as_str)
        .filter(|id| in_degree[id] == 0)
        .collect();
    if current.is_empty() {
        // Cyclic (or otherwise entry-less) graph: seed from the first
        // declared node.
        current = vec![order[0].as_str()];
    }
    for id in &current {
        visited.insert(*id);
    }

    while !current.is_empty() {
        let mut next: Vec<&str> = Vec::new();
        for id in &current {
            for succ in &adjacency[id] {
                if visited.insert(*succ) {
                    next.push(*succ);
                }
            }
        }
        layers.push(current);
        current = next;
    }

    // Disconnected fragments with no entry point never get reached by the
    // BFS; append them to the last layer.
    let stragglers: Vec<&str> = order
        .iter()
        .map(String::as_str)
        .filter(|id| !visited.contains(id))
        .collect();
    if !stragglers.is_empty() {
        layers
            .last_mut()
            .expect("at least one layer exists")
            .extend(stragglers);
    }

    let widest = layers.iter().map(Vec::len).max().unwrap_or(1);
    let positions: Vec<(String, Geometry)> = layers
        .iter()
        .enumerate()
        .flat_map(|(row, layer)| {
            let y = ORIGIN_Y + row as f64 * V_SPACING;
            // Center each row against the widest one.
            let indent = (widest - layer.len()) as f64 * H_SPACING / 2.0;
            layer.iter().enumerate().map(move |(col, id)| {
                let x = ORIGIN_X + RECENTER_X + indent + col as f64 * H_SPACING;
                (
                    id.to_string(),
                    Geometry {
                        x,
                        y,
                        width: NODE_WIDTH,
                        height: NODE_HEIGHT,
                    },
                )
            })
        })
        .collect();

    for (id, geometry) in positions {
        if let Some(node) = graph.nodes.get_mut(&id) {
            node.geometry = Some(geometry);
        }
    }
}

/// True when at least one node still needs the layout pass.
pub fn needs_layout(graph: &DiagramGraph) -> bool {
    graph
        .nodes
        .values()
        .any(|n| n.geometry.is_none_or(|g| g.is_degenerate()))
}
