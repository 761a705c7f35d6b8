//! Static bidirectional shape/arrow taxonomy.
//!
//! Everything here is an ordered table evaluated by iteration, first match
//! wins. The order is significant in both grammars: Draw.io style strings are
//! free-form `key=value;` soup where several markers can coexist, and Mermaid
//! bracket delimiters are not mutually exclusive substrings (`([` contains
//! `(`), so each table fixes a priority.
//!
//! The Mermaid direction is intentionally lossy: several Draw.io styles
//! collapse onto one arrow or shape kind. Do not try to make this a
//! bijection.

use crate::model::{EdgeStroke, NodeShape, Relation};

/// Draw.io style substring -> canonical shape, tested in order.
const STYLE_SHAPE_RULES: &[(&str, NodeShape)] = &[
    ("swimlane", NodeShape::Subgraph),
    ("rhombus", NodeShape::Diamond),
    ("shape=cylinder", NodeShape::Cylinder),
    ("shape=datastore", NodeShape::Cylinder),
    ("shape=hexagon", NodeShape::Hexagon),
    ("shape=parallelogram", NodeShape::Parallelogram),
    ("shape=step", NodeShape::Asymmetric),
    ("shape=trapezoid", NodeShape::Asymmetric),
    ("shape=process", NodeShape::Subroutine),
    ("arcSize=40", NodeShape::Stadium),
    ("ellipse", NodeShape::Circle),
    ("rounded=1", NodeShape::Rounded),
    ("group", NodeShape::Subgraph),
];

pub fn shape_from_drawio_style(style: &str) -> NodeShape {
    for (needle, shape) in STYLE_SHAPE_RULES {
        if style.contains(needle) {
            return *shape;
        }
    }
    NodeShape::Rectangle
}

/// Canonical shape -> complete Draw.io vertex style string.
pub fn drawio_style_for_shape(shape: NodeShape) -> &'static str {
    match shape {
        NodeShape::Rectangle => "rounded=0;whiteSpace=wrap;html=1;",
        NodeShape::Rounded => "rounded=1;whiteSpace=wrap;html=1;",
        NodeShape::Stadium => "rounded=1;whiteSpace=wrap;html=1;arcSize=40;",
        NodeShape::Subroutine => "shape=process;whiteSpace=wrap;html=1;backgroundOutline=1;",
        NodeShape::Cylinder => {
            "shape=cylinder;whiteSpace=wrap;html=1;boundedLbl=1;backgroundOutline=1;size=15;"
        }
        NodeShape::Hexagon => "shape=hexagon;perimeter=hexagonPerimeter2;whiteSpace=wrap;html=1;",
        NodeShape::Diamond => "rhombus;whiteSpace=wrap;html=1;",
        NodeShape::Circle => "ellipse;whiteSpace=wrap;html=1;aspect=fixed;",
        NodeShape::Parallelogram => {
            "shape=parallelogram;perimeter=parallelogramPerimeter;whiteSpace=wrap;html=1;"
        }
        NodeShape::Asymmetric => "shape=step;perimeter=stepPerimeter;whiteSpace=wrap;html=1;",
        // Class-like nodes are emitted as a titled parent cell with one child
        // cell per member (see emit::drawio), so the parent style is a plain
        // top-aligned box rather than a swimlane: swimlane parents are
        // excluded from group-merging on re-parse.
        NodeShape::Class => "rounded=0;whiteSpace=wrap;html=1;verticalAlign=top;fontStyle=1;",
        NodeShape::Subgraph => "rounded=0;whiteSpace=wrap;html=1;verticalAlign=top;dashed=1;",
    }
}

/// Style for the member rows of an emitted class-like node.
pub fn drawio_member_style() -> &'static str {
    "text;html=1;align=left;verticalAlign=middle;spacingLeft=4;"
}

/// Canonical shape -> Mermaid bracket pair for node declarations.
pub fn mermaid_brackets(shape: NodeShape) -> (&'static str, &'static str) {
    match shape {
        NodeShape::Rounded => ("(", ")"),
        NodeShape::Stadium => ("([", "])"),
        NodeShape::Subroutine => ("[[", "]]"),
        NodeShape::Cylinder => ("[(", ")]"),
        NodeShape::Hexagon => ("{{", "}}"),
        NodeShape::Diamond => ("{", "}"),
        NodeShape::Circle => ("((", "))"),
        NodeShape::Parallelogram => ("[/", "/]"),
        NodeShape::Asymmetric => (">", "]"),
        NodeShape::Rectangle | NodeShape::Class | NodeShape::Subgraph => ("[", "]"),
    }
}

/// Mermaid bracket pair -> canonical shape, tried in priority order by the
/// flowchart parser. Multi-character delimiters come before their prefixes.
pub const MERMAID_BRACKET_RULES: &[(&str, &str, NodeShape)] = &[
    ("((", "))", NodeShape::Circle),
    ("([", "])", NodeShape::Stadium),
    ("[[", "]]", NodeShape::Subroutine),
    ("[(", ")]", NodeShape::Cylinder),
    ("{{", "}}", NodeShape::Hexagon),
    ("[/", "/]", NodeShape::Parallelogram),
    ("[", "]", NodeShape::Rectangle),
    ("(", ")", NodeShape::Rounded),
    ("{", "}", NodeShape::Diamond),
    (">", "]", NodeShape::Asymmetric),
];

/// Stroke classification of a Draw.io edge style.
pub fn stroke_from_drawio_style(style: &str) -> EdgeStroke {
    if style.contains("dashed=1") {
        return EdgeStroke::Dashed;
    }
    if style.contains("strokeWidth=2") || style.contains("strokeWidth=3") {
        return EdgeStroke::Thick;
    }
    EdgeStroke::Plain
}

/// Relationship classification of a Draw.io edge style. Always computed; the
/// Mermaid serializer only consults it when emitting a class diagram.
pub fn relation_from_drawio_style(style: &str) -> Relation {
    let dashed = style.contains("dashed=1");
    if style.contains("endArrow=block") || style.contains("startArrow=block") {
        return if dashed {
            Relation::Realization
        } else {
            Relation::Inheritance
        };
    }
    if style.contains("diamondThin") || style.contains("Arrow=diamond") {
        return Relation::Aggregation;
    }
    if dashed && style.contains("endArrow=open") {
        return Relation::Dependency;
    }
    Relation::Association
}

/// Canonical (stroke, relation) -> one Draw.io edge style string. Lossy in
/// the other direction by design.
pub fn drawio_style_for_edge(stroke: EdgeStroke, relation: Option<Relation>) -> String {
    let mut style = String::from("edgeStyle=orthogonalEdgeStyle;rounded=0;html=1;");
    match relation {
        Some(Relation::Inheritance) => style.push_str("endArrow=block;endFill=0;"),
        Some(Relation::Realization) => style.push_str("dashed=1;endArrow=block;endFill=0;"),
        Some(Relation::Aggregation) => style.push_str("endArrow=diamondThin;endFill=0;"),
        Some(Relation::Dependency) => style.push_str("dashed=1;endArrow=open;"),
        Some(Relation::Association) | None => {}
    }
    match stroke {
        EdgeStroke::Plain => {}
        EdgeStroke::Dashed => {
            if !style.contains("dashed=1") {
                style.push_str("dashed=1;");
            }
        }
        EdgeStroke::Thick => style.push_str("strokeWidth=2;"),
    }
    style
}

/// Stroke -> Mermaid flowchart arrow token.
pub fn mermaid_arrow(stroke: EdgeStroke) -> &'static str {
    match stroke {
        EdgeStroke::Plain => "-->",
        EdgeStroke::Dashed => "-.->",
        EdgeStroke::Thick => "==>",
    }
}

/// Relation -> Mermaid class-diagram relationship token.
pub fn mermaid_relation_op(relation: Relation) -> &'static str {
    match relation {
        Relation::Inheritance => "--|>",
        Relation::Realization => "..|>",
        Relation::Aggregation => "o--",
        Relation::Dependency => "..>",
        Relation::Association => "--",
    }
}
