//! Graph model -> self-contained Draw.io document.
//!
//! Output is always an uncompressed `mxfile`/`diagram`/`mxGraphModel` tree;
//! compression is only ever decoded, never produced. Class-like nodes are
//! written as a titled parent cell plus one child cell per member, which is
//! exactly the shape the group-merging pass reassembles on the way back in.

use crate::layout;
use crate::model::{DiagramGraph, Geometry, Node, NodeShape};
use crate::taxonomy;

const MEMBER_ROW_HEIGHT: f64 = 26.0;
const CLASS_TITLE_HEIGHT: f64 = 30.0;

pub fn to_drawio(graph: &mut DiagramGraph) -> String {
    if layout::needs_layout(graph) {
        layout::assign_geometry(graph);
    }

    let mut xml = String::with_capacity(1024);
    xml.push_str("<mxfile host=\"selkie\" type=\"device\">\n");
    xml.push_str("  <diagram id=\"page-1\" name=\"Page-1\">\n");
    xml.push_str(
        "    <mxGraphModel dx=\"1024\" dy=\"768\" grid=\"1\" gridSize=\"10\" guides=\"1\" \
         tooltips=\"1\" connect=\"1\" arrows=\"1\" fold=\"1\" page=\"1\" pageScale=\"1\" \
         pageWidth=\"850\" pageHeight=\"1100\" math=\"0\" shadow=\"0\">\n",
    );
    xml.push_str("      <root>\n");
    xml.push_str("        <mxCell id=\"0\" />\n");
    xml.push_str("        <mxCell id=\"1\" parent=\"0\" />\n");

    for node in graph.nodes.values() {
        if node.is_class_like() && !node.members.is_empty() {
            write_class_node(&mut xml, node);
        } else {
            write_plain_node(&mut xml, node);
        }
    }

    for edge in graph.valid_edges() {
        let style = taxonomy::drawio_style_for_edge(edge.stroke, edge.relation);
        xml.push_str(&format!(
            "        <mxCell id=\"{}\"{} style=\"{}\" edge=\"1\" parent=\"1\" source=\"{}\" target=\"{}\">\n",
            escape(&edge.id),
            edge.label
                .as_deref()
                .map(|l| format!(" value=\"{}\"", escape(l)))
                .unwrap_or_default(),
            escape(&style),
            escape(&edge.source),
            escape(&edge.target),
        ));
        xml.push_str("          <mxGeometry relative=\"1\" as=\"geometry\" />\n");
        xml.push_str("        </mxCell>\n");
    }

    xml.push_str("      </root>\n");
    xml.push_str("    </mxGraphModel>\n");
    xml.push_str("  </diagram>\n");
    xml.push_str("</mxfile>\n");
    xml
}

fn node_geometry(node: &Node) -> Geometry {
    node.geometry.unwrap_or(Geometry {
        x: 0.0,
        y: 0.0,
        width: layout::NODE_WIDTH,
        height: layout::NODE_HEIGHT,
    })
}

fn write_plain_node(xml: &mut String, node: &Node) {
    let geometry = node_geometry(node);
    let style = taxonomy::drawio_style_for_shape(node.shape);
    xml.push_str(&format!(
        "        <mxCell id=\"{}\" value=\"{}\" style=\"{}\" vertex=\"1\" parent=\"1\">\n",
        escape(&node.id),
        escape(&node.label),
        escape(style),
    ));
    xml.push_str(&format!(
        "          <mxGeometry x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" as=\"geometry\" />\n",
        geometry.x, geometry.y, geometry.width, geometry.height,
    ));
    xml.push_str("        </mxCell>\n");
}

fn write_class_node(xml: &mut String, node: &Node) {
    let mut geometry = node_geometry(node);
    // Make room for the member rows; layout-synthesized boxes are one-row.
    let needed = CLASS_TITLE_HEIGHT + node.members.len() as f64 * MEMBER_ROW_HEIGHT;
    if geometry.height < needed {
        geometry.height = needed;
    }

    let style = taxonomy::drawio_style_for_shape(NodeShape::Class);
    xml.push_str(&format!(
        "        <mxCell id=\"{}\" value=\"{}\" style=\"{}\" vertex=\"1\" parent=\"1\">\n",
        escape(&node.id),
        escape(&node.label),
        escape(style),
    ));
    xml.push_str(&format!(
        "          <mxGeometry x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" as=\"geometry\" />\n",
        geometry.x, geometry.y, geometry.width, geometry.height,
    ));
    xml.push_str("        </mxCell>\n");

    // Member rows are children of the class cell; child coordinates are
    // relative to the parent box, and the y order is what the group-merging
    // pass sorts by on re-parse.
    for (row, member) in node.members.iter().enumerate() {
        let y = CLASS_TITLE_HEIGHT + row as f64 * MEMBER_ROW_HEIGHT;
        xml.push_str(&format!(
            "        <mxCell id=\"{}-m{}\" value=\"{}\" style=\"{}\" vertex=\"1\" parent=\"{}\">\n",
            escape(&node.id),
            row,
            escape(member),
            taxonomy::drawio_member_style(),
            escape(&node.id),
        ));
        xml.push_str(&format!(
            "          <mxGeometry x=\"0\" y=\"{}\" width=\"{}\" height=\"{}\" as=\"geometry\" />\n",
            y, geometry.width, MEMBER_ROW_HEIGHT,
        ));
        xml.push_str("        </mxCell>\n");
    }
}

/// Minimal XML attribute escaping; newlines become character references so
/// multi-line labels survive attribute storage.
fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("&#10;"),
            _ => out.push(ch),
        }
    }
    out
}
