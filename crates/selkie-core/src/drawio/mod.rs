//! Draw.io (`mxGraphModel`) XML -> [`DiagramGraph`].
//!
//! Documents come in three layouts: a bare `<mxGraphModel>`, an `<mxfile>`
//! with inline per-page models, or an `<mxfile>` whose pages carry a
//! base64+deflate compressed payload. Page selection happens before any
//! payload is decoded; a decode failure is a [`Error::Decode`], distinct
//! from the [`Error::StructuralParse`] raised for malformed XML.

mod cells;
mod decode;
mod label;

use crate::error::{Error, Result};
use crate::model::DiagramGraph;
use serde::Serialize;

/// One page of a multi-page document, cheap to enumerate (no payload decode,
/// no cell processing).
#[derive(Debug, Clone, Serialize)]
pub struct PageInfo {
    pub id: String,
    pub name: String,
    pub index: usize,
}

/// Lists the pages of a document without performing a full parse, so callers
/// can offer page selection before committing to an index.
pub fn list_pages(xml: &str) -> Result<Vec<PageInfo>> {
    let text = strip_bom(xml);
    if text.trim().is_empty() {
        return Err(Error::EmptyInput);
    }
    let doc = roxmltree::Document::parse(text)?;
    let root = doc.root_element();

    if !root.has_tag_name("mxfile") {
        return Ok(vec![PageInfo {
            id: String::new(),
            name: "Page-1".to_string(),
            index: 0,
        }]);
    }

    Ok(root
        .children()
        .filter(|c| c.is_element() && c.has_tag_name("diagram"))
        .enumerate()
        .map(|(index, d)| PageInfo {
            id: d.attribute("id").unwrap_or("").to_string(),
            name: d
                .attribute("name")
                .map(str::to_string)
                .unwrap_or_else(|| format!("Page-{}", index + 1)),
            index,
        })
        .collect())
}

/// Parses the requested page into a graph. An out-of-range page index is
/// clamped to the first page rather than raised.
pub fn parse_drawio(xml: &str, page: usize) -> Result<DiagramGraph> {
    let text = strip_bom(xml);
    if text.trim().is_empty() {
        return Err(Error::EmptyInput);
    }
    let doc = roxmltree::Document::parse(text)?;
    let root = doc.root_element();

    if root.has_tag_name("mxfile") {
        let pages: Vec<roxmltree::Node<'_, '_>> = root
            .children()
            .filter(|c| c.is_element() && c.has_tag_name("diagram"))
            .collect();
        if pages.is_empty() {
            return Err(Error::NoNodes);
        }
        let index = if page < pages.len() { page } else { 0 };
        return parse_page(pages[index]);
    }

    match find_model(doc.root()) {
        Some(model) => cells::build_graph(&cells::collect_cells(model)),
        None => Err(Error::NoNodes),
    }
}

fn parse_page(diagram: roxmltree::Node<'_, '_>) -> Result<DiagramGraph> {
    if let Some(model) = find_model(diagram) {
        return cells::build_graph(&cells::collect_cells(model));
    }

    // No inline model: the page body is a compressed payload.
    let payload: String = diagram
        .children()
        .filter_map(|c| c.text())
        .collect::<Vec<_>>()
        .concat();
    if payload.trim().is_empty() {
        return Err(Error::NoNodes);
    }

    let decoded = decode::decode_diagram_payload(&payload)?;
    let inner = roxmltree::Document::parse(&decoded)?;
    match find_model(inner.root()) {
        Some(model) => cells::build_graph(&cells::collect_cells(model)),
        None => Err(Error::NoNodes),
    }
}

fn find_model<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
) -> Option<roxmltree::Node<'a, 'input>> {
    if node.is_element() && node.has_tag_name("mxGraphModel") {
        return Some(node);
    }
    node.descendants()
        .find(|n| n.is_element() && n.has_tag_name("mxGraphModel"))
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}
