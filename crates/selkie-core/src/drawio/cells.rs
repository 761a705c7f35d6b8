//! Cell normalization and graph building.
//!
//! Every `mxCell` (including ones wrapped in `object`/`UserObject` carriers)
//! is first flattened into a [`CellRecord`]; all cross-cell passes then work
//! on the indexed records, so results are independent of element order in
//! the document.

use super::label::clean_label;
use crate::error::{Error, Result};
use crate::model::{DiagramGraph, Edge, Geometry, NodeShape, Subgraph};
use crate::taxonomy;
use rustc_hash::{FxHashMap, FxHashSet};

const DEFAULT_CELL_WIDTH: f64 = 100.0;
const DEFAULT_CELL_HEIGHT: f64 = 60.0;

#[derive(Debug, Clone)]
pub(crate) struct CellRecord {
    pub id: String,
    pub value: String,
    pub style: String,
    pub vertex: bool,
    pub edge: bool,
    pub connectable: bool,
    pub parent: Option<String>,
    pub source: Option<String>,
    pub target: Option<String>,
    pub geometry: Option<Geometry>,
}

fn flag(value: Option<&str>) -> bool {
    matches!(value, Some("1") | Some("true"))
}

pub(crate) fn collect_cells(model: roxmltree::Node<'_, '_>) -> Vec<CellRecord> {
    let mut cells = Vec::new();

    for el in model.descendants().filter(|n| n.has_tag_name("mxCell")) {
        // Wrapped cells keep their id/label on the carrier element.
        let wrapper = el.parent().filter(|p| {
            p.is_element() && (p.has_tag_name("object") || p.has_tag_name("UserObject"))
        });

        let id = el
            .attribute("id")
            .or_else(|| wrapper.and_then(|w| w.attribute("id")));
        let Some(id) = id else {
            tracing::debug!("skipping mxCell without an id");
            continue;
        };

        let value = el
            .attribute("value")
            .or_else(|| wrapper.and_then(|w| w.attribute("label")))
            .unwrap_or("");

        let vertex = flag(el.attribute("vertex"));
        let geometry = el
            .children()
            .find(|c| c.has_tag_name("mxGeometry"))
            .map(|g| Geometry {
                x: attr_f64(g, "x").unwrap_or(0.0),
                y: attr_f64(g, "y").unwrap_or(0.0),
                width: attr_f64(g, "width").unwrap_or(DEFAULT_CELL_WIDTH),
                height: attr_f64(g, "height").unwrap_or(DEFAULT_CELL_HEIGHT),
            })
            .or(vertex.then_some(Geometry {
                x: 0.0,
                y: 0.0,
                width: DEFAULT_CELL_WIDTH,
                height: DEFAULT_CELL_HEIGHT,
            }));

        cells.push(CellRecord {
            id: id.to_string(),
            value: value.to_string(),
            style: el.attribute("style").unwrap_or("").to_string(),
            vertex,
            edge: flag(el.attribute("edge")),
            connectable: el.attribute("connectable") != Some("0"),
            parent: el.attribute("parent").map(str::to_string),
            source: el.attribute("source").map(str::to_string),
            target: el.attribute("target").map(str::to_string),
            geometry,
        });
    }

    cells
}

fn attr_f64(node: roxmltree::Node<'_, '_>, name: &str) -> Option<f64> {
    node.attribute(name).and_then(|v| v.trim().parse().ok())
}

fn is_root_id(id: &str) -> bool {
    id == "0" || id == "1"
}

/// Outcome of the group-merging pass for one parent cell.
struct MergedGroup {
    title: String,
    members: Vec<String>,
}

pub(crate) fn build_graph(cells: &[CellRecord]) -> Result<DiagramGraph> {
    let mut children: FxHashMap<&str, Vec<&CellRecord>> = FxHashMap::default();
    for cell in cells {
        if let Some(parent) = cell.parent.as_deref() {
            children.entry(parent).or_default().push(cell);
        }
    }
    let edge_ids: FxHashSet<&str> = cells
        .iter()
        .filter(|c| c.edge)
        .map(|c| c.id.as_str())
        .collect();

    // Group-merging pass: decide up front which parents collapse into a
    // class-like node and which children they consume. Indexing first makes
    // this independent of document order.
    let mut merged: FxHashMap<&str, MergedGroup> = FxHashMap::default();
    let mut consumed: FxHashSet<&str> = FxHashSet::default();
    for cell in cells {
        if !cell.vertex
            || is_root_id(&cell.id)
            || cell.style.contains("swimlane")
            || cell.style.contains("group")
        {
            continue;
        }
        let Some(kids) = children.get(cell.id.as_str()) else {
            continue;
        };
        let mut kids: Vec<&&CellRecord> = kids.iter().filter(|k| k.vertex).collect();
        if kids.is_empty() {
            continue;
        }
        // Member order is geometric, not document order.
        kids.sort_by(|a, b| {
            let ay = a.geometry.map_or(0.0, |g| g.y);
            let by = b.geometry.map_or(0.0, |g| g.y);
            ay.partial_cmp(&by).unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut texts: Vec<String> = kids
            .iter()
            .map(|k| clean_label(&k.value))
            .filter(|t| !t.is_empty())
            .collect();
        let parent_label = clean_label(&cell.value);
        let title = if parent_label.is_empty() {
            if texts.is_empty() {
                continue;
            }
            // No title on the parent: promote the first child's text.
            texts.remove(0)
        } else {
            parent_label
        };
        if texts.is_empty() {
            // Nothing left to merge; the children fall through as plain nodes.
            continue;
        }

        for kid in &kids {
            consumed.insert(kid.id.as_str());
        }
        tracing::debug!(group = %cell.id, members = texts.len(), "merged container into class node");
        merged.insert(
            cell.id.as_str(),
            MergedGroup {
                title,
                members: texts,
            },
        );
    }

    // Emission pass, in document order so node insertion order is stable.
    let mut graph = DiagramGraph::new();
    let mut labels_by_edge: FxHashMap<&str, Vec<String>> = FxHashMap::default();

    for cell in cells {
        if is_root_id(&cell.id) {
            continue;
        }
        if consumed.contains(cell.id.as_str()) {
            continue;
        }
        if let Some(group) = merged.get(cell.id.as_str()) {
            let node = graph.ensure_node(&cell.id, Some(&group.title), NodeShape::Class);
            node.members = group.members.clone();
            node.geometry = cell.geometry;
            continue;
        }

        if cell.vertex {
            // A non-connectable vertex parented by an edge is that edge's
            // floating label, not a node.
            if !cell.connectable
                && cell
                    .parent
                    .as_deref()
                    .is_some_and(|p| edge_ids.contains(p))
            {
                let text = clean_label(&cell.value);
                if !text.is_empty() {
                    labels_by_edge
                        .entry(cell.parent.as_deref().expect("checked above"))
                        .or_default()
                        .push(text);
                }
                continue;
            }

            let shape = taxonomy::shape_from_drawio_style(&cell.style);
            if shape == NodeShape::Subgraph {
                // Unmerged containers stay display-only metadata; their
                // children are emitted as independent siblings.
                let nodes = children
                    .get(cell.id.as_str())
                    .map(|kids| {
                        kids.iter()
                            .filter(|k| k.vertex)
                            .map(|k| k.id.clone())
                            .collect()
                    })
                    .unwrap_or_default();
                graph.subgraphs.push(Subgraph {
                    id: cell.id.clone(),
                    title: clean_label(&cell.value),
                    nodes,
                });
                continue;
            }

            let label = clean_label(&cell.value);
            let label = if label.is_empty() { None } else { Some(label) };
            let node = graph.ensure_node(&cell.id, label.as_deref(), shape);
            node.geometry = cell.geometry;
            continue;
        }

        if cell.edge {
            let (Some(source), Some(target)) = (cell.source.as_deref(), cell.target.as_deref())
            else {
                tracing::debug!(edge = %cell.id, "skipping edge without both endpoints");
                continue;
            };
            let label = clean_label(&cell.value);
            graph.edges.push(Edge {
                id: cell.id.clone(),
                source: source.to_string(),
                target: target.to_string(),
                label: (!label.is_empty()).then_some(label),
                stroke: taxonomy::stroke_from_drawio_style(&cell.style),
                relation: Some(taxonomy::relation_from_drawio_style(&cell.style)),
            });
        }
    }

    // Edge-label reconciliation: fold collected label cells into the owning
    // edge exactly once, independent of where the labels appeared in the
    // document.
    for edge in &mut graph.edges {
        let Some(texts) = labels_by_edge.remove(edge.id.as_str()) else {
            continue;
        };
        let mut label = edge.label.take().unwrap_or_default();
        for text in texts {
            if !label.is_empty() {
                label.push(' ');
            }
            label.push_str(&text);
        }
        edge.label = (!label.is_empty()).then_some(label);
    }

    if graph.is_empty() {
        return Err(Error::NoNodes);
    }
    Ok(graph)
}
