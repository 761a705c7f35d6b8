//! The shared intermediate graph model both parsers produce and both
//! serializers consume.
//!
//! A [`DiagramGraph`] is exclusively owned by one conversion call: parsers
//! append to it, the layout engine fills in geometry, serializers read it.
//! Nothing here is shared or cached across calls.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Format-neutral shape vocabulary both grammars map onto.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeShape {
    #[default]
    Rectangle,
    Rounded,
    Stadium,
    Subroutine,
    Cylinder,
    Hexagon,
    Diamond,
    Circle,
    Parallelogram,
    Asymmetric,
    Class,
    Subgraph,
}

/// Stroke weight/pattern of an edge, independent of arrow heads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeStroke {
    #[default]
    Plain,
    Dashed,
    Thick,
}

/// Class-diagram relationship kinds. Only meaningful when the surrounding
/// diagram is (re-)emitted as a class diagram; flowchart/sequence output
/// ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Relation {
    Association,
    Aggregation,
    Inheritance,
    Realization,
    Dependency,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    /// Width/height of zero (or less) means the source never gave this node a
    /// real box; the layout engine treats it the same as missing geometry.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub shape: NodeShape,
    /// Ordered member list; non-empty only for `NodeShape::Class` nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
}

impl Node {
    pub fn is_class_like(&self) -> bool {
        self.shape == NodeShape::Class
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub stroke: EdgeStroke,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<Relation>,
}

/// Display-only grouping metadata. Parsed from Mermaid `subgraph` blocks and
/// Draw.io container cells, never re-emitted as containers by either
/// serializer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subgraph {
    pub id: String,
    pub title: String,
    pub nodes: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagramGraph {
    /// Node-id -> node, insertion order preserved. Layering and serialization
    /// are deterministic in this order.
    pub nodes: IndexMap<String, Node>,
    pub edges: Vec<Edge>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subgraphs: Vec<Subgraph>,
}

impl DiagramGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `id`, creating the node on first sight. First writer wins:
    /// a later registration only fills in the label/shape when the earlier
    /// one was a bare auto-registration (label equal to the id, default
    /// shape). Ids are immutable once created.
    pub fn ensure_node(&mut self, id: &str, label: Option<&str>, shape: NodeShape) -> &mut Node {
        if !self.nodes.contains_key(id) {
            self.nodes.insert(
                id.to_string(),
                Node {
                    id: id.to_string(),
                    label: label.unwrap_or(id).to_string(),
                    shape,
                    members: Vec::new(),
                    geometry: None,
                },
            );
            return self.nodes.get_mut(id).expect("just inserted");
        }

        let node = self.nodes.get_mut(id).expect("checked above");
        if let Some(label) = label
            && node.label == node.id
            && label != node.id
        {
            node.label = label.to_string();
        }
        if node.shape == NodeShape::default() && shape != NodeShape::default() {
            node.shape = shape;
        }
        node
    }

    /// Appends an edge without validating endpoints; parse time is permissive
    /// so callers can inspect partial graphs. Dangling edges are dropped at
    /// serialization time via [`DiagramGraph::valid_edges`].
    pub fn push_edge(
        &mut self,
        source: &str,
        target: &str,
        label: Option<String>,
        stroke: EdgeStroke,
        relation: Option<Relation>,
    ) {
        let id = format!("e{}", self.edges.len());
        self.edges.push(Edge {
            id,
            source: source.to_string(),
            target: target.to_string(),
            label: label.filter(|l| !l.is_empty()),
            stroke,
            relation,
        });
    }

    /// Edges whose both endpoints resolve to nodes in this graph.
    pub fn valid_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges
            .iter()
            .filter(|e| self.nodes.contains_key(&e.source) && self.nodes.contains_key(&e.target))
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// The three diagram sub-languages in scope for the graph model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagramKind {
    #[default]
    Flowchart,
    Sequence,
    Class,
}

impl DiagramKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flowchart => "flowchart",
            Self::Sequence => "sequence",
            Self::Class => "class",
        }
    }
}

impl std::str::FromStr for DiagramKind {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flowchart" | "graph" => Ok(Self::Flowchart),
            "sequence" | "sequencediagram" => Ok(Self::Sequence),
            "class" | "classdiagram" => Ok(Self::Class),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
