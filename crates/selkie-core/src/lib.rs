#![forbid(unsafe_code)]

//! Diagram interchange engine: Mermaid text <-> Draw.io (`mxGraphModel`) XML.
//!
//! Design goals:
//! - a single shared graph model both parsers produce and both serializers
//!   consume, so either direction is parse -> (layout/classify) -> emit
//! - permissive line/cell-level parsing, strict document-level errors
//! - deterministic, testable outputs (stable ordering, synthesized layout)
//!
//! The engine is stateless per call: each conversion owns its
//! [`DiagramGraph`] and nothing is cached across calls.

pub mod classify;
pub mod drawio;
pub mod emit;
pub mod error;
pub mod layout;
pub mod mermaid;
pub mod model;
pub mod taxonomy;

pub use drawio::PageInfo;
pub use error::{Error, Result};
pub use model::{
    DiagramGraph, DiagramKind, Edge, EdgeStroke, Geometry, Node, NodeShape, Relation, Subgraph,
};

use serde::{Deserialize, Serialize};

/// Flow direction of emitted Mermaid flowcharts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[default]
    Td,
    Tb,
    Bt,
    Rl,
    Lr,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Td => "TD",
            Self::Tb => "TB",
            Self::Bt => "BT",
            Self::Rl => "RL",
            Self::Lr => "LR",
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TD" => Ok(Self::Td),
            "TB" => Ok(Self::Tb),
            "BT" => Ok(Self::Bt),
            "RL" => Ok(Self::Rl),
            "LR" => Ok(Self::Lr),
            _ => Err(()),
        }
    }
}

/// Requested output diagram type for the Draw.io -> Mermaid direction.
/// `Auto` defers to the [`classify`] heuristic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagramTypeRequest {
    #[default]
    Flowchart,
    Sequence,
    Class,
    Auto,
}

impl std::str::FromStr for DiagramTypeRequest {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flowchart" | "graph" => Ok(Self::Flowchart),
            "sequence" => Ok(Self::Sequence),
            "class" => Ok(Self::Class),
            "auto" => Ok(Self::Auto),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConvertOptions {
    pub direction: Direction,
    pub diagram_type: DiagramTypeRequest,
    /// Page index for multi-page Draw.io documents; out-of-range values are
    /// clamped to the first page.
    pub page: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Engine;

impl Engine {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous variant of [`Engine::mermaid_to_drawio`].
    pub fn mermaid_to_drawio_sync(&self, text: &str) -> Result<String> {
        let (mut graph, kind) = mermaid::parse_mermaid(text)?;
        tracing::debug!(
            kind = %kind,
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "parsed mermaid input"
        );
        Ok(emit::drawio::to_drawio(&mut graph))
    }

    pub async fn mermaid_to_drawio(&self, text: &str) -> Result<String> {
        self.mermaid_to_drawio_sync(text)
    }

    /// Synchronous variant of [`Engine::drawio_to_mermaid`].
    pub fn drawio_to_mermaid_sync(&self, xml: &str, options: &ConvertOptions) -> Result<String> {
        let graph = drawio::parse_drawio(xml, options.page)?;
        let kind = match options.diagram_type {
            DiagramTypeRequest::Auto => classify::classify(&graph),
            DiagramTypeRequest::Flowchart => DiagramKind::Flowchart,
            DiagramTypeRequest::Sequence => DiagramKind::Sequence,
            DiagramTypeRequest::Class => DiagramKind::Class,
        };
        tracing::debug!(
            kind = %kind,
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "parsed draw.io input"
        );
        Ok(emit::mermaid::to_mermaid(&graph, kind, options.direction))
    }

    pub async fn drawio_to_mermaid(&self, xml: &str, options: &ConvertOptions) -> Result<String> {
        self.drawio_to_mermaid_sync(xml, options)
    }

    /// Parses Mermaid text into the shared graph model, for callers that
    /// want to inspect the graph instead of converting it.
    pub fn parse_mermaid(&self, text: &str) -> Result<(DiagramGraph, DiagramKind)> {
        mermaid::parse_mermaid(text)
    }

    /// Parses one page of a Draw.io document into the shared graph model.
    pub fn parse_drawio(&self, xml: &str, page: usize) -> Result<DiagramGraph> {
        drawio::parse_drawio(xml, page)
    }

    /// Enumerates the pages of a Draw.io document without a full parse.
    pub fn list_pages(&self, xml: &str) -> Result<Vec<PageInfo>> {
        drawio::list_pages(xml)
    }
}

#[cfg(test)]
mod tests;
