use crate::drawio::{list_pages, parse_drawio};
use crate::error::Error;
use crate::model::{EdgeStroke, NodeShape};

#[test]
fn parse_bare_graph_model() {
    let xml = r#"<mxGraphModel>
  <root>
    <mxCell id="0" />
    <mxCell id="1" parent="0" />
    <mxCell id="a" value="Start" style="rounded=0;whiteSpace=wrap;html=1;" vertex="1" parent="1">
      <mxGeometry x="40" y="40" width="120" height="60" as="geometry" />
    </mxCell>
    <mxCell id="b" value="Check" style="rhombus;whiteSpace=wrap;html=1;" vertex="1" parent="1">
      <mxGeometry x="40" y="200" width="120" height="60" as="geometry" />
    </mxCell>
    <mxCell id="e1" value="go" style="edgeStyle=orthogonalEdgeStyle;html=1;" edge="1" parent="1" source="a" target="b" />
  </root>
</mxGraphModel>"#;

    let graph = parse_drawio(xml, 0).unwrap();
    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(graph.nodes["a"].label, "Start");
    assert_eq!(graph.nodes["a"].shape, NodeShape::Rectangle);
    assert_eq!(graph.nodes["b"].shape, NodeShape::Diamond);
    let geometry = graph.nodes["b"].geometry.unwrap();
    assert_eq!((geometry.x, geometry.y), (40.0, 200.0));

    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.edges[0].label.as_deref(), Some("go"));
    assert_eq!(graph.edges[0].stroke, EdgeStroke::Plain);
}

#[test]
fn parse_multi_page_file_selects_and_clamps() {
    let xml = r#"<mxfile host="app.diagrams.net">
  <diagram id="p1" name="One">
    <mxGraphModel><root>
      <mxCell id="0" /><mxCell id="1" parent="0" />
      <mxCell id="first" value="First" vertex="1" parent="1" />
    </root></mxGraphModel>
  </diagram>
  <diagram id="p2" name="Two">
    <mxGraphModel><root>
      <mxCell id="0" /><mxCell id="1" parent="0" />
      <mxCell id="second" value="Second" vertex="1" parent="1" />
    </root></mxGraphModel>
  </diagram>
</mxfile>"#;

    let page0 = parse_drawio(xml, 0).unwrap();
    assert!(page0.nodes.contains_key("first"));

    let page1 = parse_drawio(xml, 1).unwrap();
    assert!(page1.nodes.contains_key("second"));

    // Out-of-range page indexes clamp to the first page.
    let clamped = parse_drawio(xml, 7).unwrap();
    assert!(clamped.nodes.contains_key("first"));
}

#[test]
fn list_pages_enumerates_without_decoding() {
    let xml = r#"<mxfile>
  <diagram id="p1" name="One">ZZZZ-not-even-valid-base64-ZZZZ</diagram>
  <diagram id="p2" name="Two"><mxGraphModel><root /></mxGraphModel></diagram>
</mxfile>"#;

    let pages = list_pages(xml).unwrap();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].id, "p1");
    assert_eq!(pages[0].name, "One");
    assert_eq!(pages[0].index, 0);
    assert_eq!(pages[1].name, "Two");
}

#[test]
fn list_pages_single_model_document() {
    let pages = list_pages("<mxGraphModel><root /></mxGraphModel>").unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].index, 0);
}

// base64(raw-deflate(percent-encode(...))) of a two-node model with one
// labelled edge, as produced by the editor's export.
const COMPRESSED_PAGE: &str = "xZPBboMwDIafJvcQpj3AaNfTTjxBSqwELcEomAJvv0CiUpR12mk7INm/+Y39kbCycvPFy958oALLyjMrK49IMXJzBdYywVvFyhMTgoeHifcn1WKr8l566Og3BhkNN2lHiEpN0lNUB1psUj2OnYLVxFn5NpmWoO5ls1anMHzQDLkw/akIYeoJnmB+OtcmpaEugA7IL+GVZHiJY/PlmE6tIpP8aTNuoNUmNX1Nmhxiru+NdwYhSBi+R3LNkFQGms8ciUF3HYf/wCH4H/KAIgOiMaMBSkOdUvRkUGMn7XlXcyKr5Wce4Qs4+gYOZzWcTw30+K/2RfaLs211uFdf";

#[test]
fn parse_compressed_page_payload() {
    let xml = format!(
        "<mxfile host=\"app.diagrams.net\"><diagram id=\"p1\" name=\"Page-1\">{COMPRESSED_PAGE}</diagram></mxfile>"
    );

    let graph = parse_drawio(&xml, 0).unwrap();
    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(graph.nodes["a"].label, "Start");
    assert_eq!(graph.nodes["b"].shape, NodeShape::Diamond);
    assert_eq!(graph.edges[0].label.as_deref(), Some("go"));
}

#[test]
fn parse_undecodable_payload_is_a_decode_error() {
    let xml = r#"<mxfile><diagram id="p1" name="One">!!!not base64!!!</diagram></mxfile>"#;
    assert!(matches!(
        parse_drawio(xml, 0),
        Err(Error::Decode { .. })
    ));
}

fn group_cells(children_first: bool) -> String {
    let parent = r#"    <mxCell id="g1" value="Foo" style="rounded=0;whiteSpace=wrap;html=1;verticalAlign=top;" vertex="1" parent="1">
      <mxGeometry x="40" y="40" width="140" height="90" as="geometry" />
    </mxCell>"#;
    let kids = r#"    <mxCell id="m2" value="b:int" style="text;html=1;" vertex="1" parent="g1">
      <mxGeometry x="0" y="56" width="140" height="26" as="geometry" />
    </mxCell>
    <mxCell id="m1" value="a:int" style="text;html=1;" vertex="1" parent="g1">
      <mxGeometry x="0" y="30" width="140" height="26" as="geometry" />
    </mxCell>"#;

    let (first, second) = if children_first {
        (kids, parent)
    } else {
        (parent, kids)
    };
    format!(
        "<mxGraphModel><root>\n    <mxCell id=\"0\" />\n    <mxCell id=\"1\" parent=\"0\" />\n{first}\n{second}\n</root></mxGraphModel>"
    )
}

#[test]
fn group_merge_is_independent_of_document_order() {
    for children_first in [false, true] {
        let graph = parse_drawio(&group_cells(children_first), 0).unwrap();
        assert_eq!(graph.nodes.len(), 1, "children_first={children_first}");

        let node = &graph.nodes["g1"];
        assert_eq!(node.shape, NodeShape::Class);
        assert_eq!(node.label, "Foo");
        // Member order follows child y coordinates, not document order.
        assert_eq!(node.members, vec!["a:int", "b:int"]);
    }
}

#[test]
fn group_merge_promotes_first_child_when_parent_is_unlabelled() {
    let xml = r#"<mxGraphModel><root>
    <mxCell id="0" /><mxCell id="1" parent="0" />
    <mxCell id="g1" value="" style="rounded=0;html=1;" vertex="1" parent="1">
      <mxGeometry x="40" y="40" width="140" height="90" as="geometry" />
    </mxCell>
    <mxCell id="m1" value="Title" vertex="1" parent="g1">
      <mxGeometry x="0" y="10" width="140" height="26" as="geometry" />
    </mxCell>
    <mxCell id="m2" value="field" vertex="1" parent="g1">
      <mxGeometry x="0" y="40" width="140" height="26" as="geometry" />
    </mxCell>
</root></mxGraphModel>"#;

    let graph = parse_drawio(xml, 0).unwrap();
    let node = &graph.nodes["g1"];
    assert_eq!(node.label, "Title");
    assert_eq!(node.members, vec!["field"]);
}

#[test]
fn swimlane_containers_stay_containers() {
    let xml = r#"<mxGraphModel><root>
    <mxCell id="0" /><mxCell id="1" parent="0" />
    <mxCell id="lane" value="Backend" style="swimlane;html=1;" vertex="1" parent="1">
      <mxGeometry x="40" y="40" width="200" height="200" as="geometry" />
    </mxCell>
    <mxCell id="svc" value="Service" style="rounded=0;html=1;" vertex="1" parent="lane">
      <mxGeometry x="20" y="40" width="120" height="60" as="geometry" />
    </mxCell>
</root></mxGraphModel>"#;

    let graph = parse_drawio(xml, 0).unwrap();
    // The swimlane is recorded as display-only grouping, not merged.
    assert_eq!(graph.nodes.len(), 1);
    assert!(graph.nodes.contains_key("svc"));
    assert_eq!(graph.subgraphs.len(), 1);
    assert_eq!(graph.subgraphs[0].title, "Backend");
    assert_eq!(graph.subgraphs[0].nodes, vec!["svc"]);
}

fn edge_label_cells(label_first: bool) -> String {
    let edge = r#"    <mxCell id="e1" value="go" style="html=1;" edge="1" parent="1" source="a" target="b" />"#;
    let label = r#"    <mxCell id="l1" value="now" style="edgeLabel;html=1;" vertex="1" connectable="0" parent="e1">
      <mxGeometry x="-0.2" relative="1" as="geometry" />
    </mxCell>"#;
    let (first, second) = if label_first { (label, edge) } else { (edge, label) };
    format!(
        r#"<mxGraphModel><root>
    <mxCell id="0" /><mxCell id="1" parent="0" />
    <mxCell id="a" value="A" vertex="1" parent="1" />
    <mxCell id="b" value="B" vertex="1" parent="1" />
{first}
{second}
</root></mxGraphModel>"#
    )
}

#[test]
fn edge_labels_reconcile_exactly_once_in_either_order() {
    for label_first in [false, true] {
        let graph = parse_drawio(&edge_label_cells(label_first), 0).unwrap();
        assert_eq!(graph.nodes.len(), 2, "label_first={label_first}");
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(
            graph.edges[0].label.as_deref(),
            Some("go now"),
            "label_first={label_first}"
        );
    }
}

#[test]
fn wrapped_cells_take_id_and_label_from_the_carrier() {
    let xml = r#"<mxGraphModel><root>
    <mxCell id="0" /><mxCell id="1" parent="0" />
    <object id="u1" label="Wrapped">
      <mxCell style="rounded=1;html=1;" vertex="1" parent="1">
        <mxGeometry x="10" y="10" width="100" height="40" as="geometry" />
      </mxCell>
    </object>
</root></mxGraphModel>"#;

    let graph = parse_drawio(xml, 0).unwrap();
    let node = &graph.nodes["u1"];
    assert_eq!(node.label, "Wrapped");
    assert_eq!(node.shape, NodeShape::Rounded);
}

#[test]
fn html_labels_are_cleaned() {
    let xml = r#"<mxGraphModel><root>
    <mxCell id="0" /><mxCell id="1" parent="0" />
    <mxCell id="a" value="&lt;b&gt;Total &amp;amp; tax&lt;/b&gt;&lt;br&gt;second" vertex="1" parent="1" />
</root></mxGraphModel>"#;

    let graph = parse_drawio(xml, 0).unwrap();
    assert_eq!(graph.nodes["a"].label, "Total & tax\nsecond");
}

#[test]
fn empty_and_malformed_documents_fail_loudly() {
    assert!(matches!(parse_drawio("", 0), Err(Error::EmptyInput)));
    assert!(matches!(parse_drawio("   \n", 0), Err(Error::EmptyInput)));
    assert!(matches!(
        parse_drawio("<mxGraphModel><root>", 0),
        Err(Error::StructuralParse(_))
    ));
    assert!(matches!(
        parse_drawio("<mxGraphModel><root /></mxGraphModel>", 0),
        Err(Error::NoNodes)
    ));
}

#[test]
fn byte_order_mark_is_stripped() {
    let xml = "\u{feff}<mxGraphModel><root><mxCell id=\"0\" /><mxCell id=\"1\" parent=\"0\" /><mxCell id=\"n\" value=\"N\" vertex=\"1\" parent=\"1\" /></root></mxGraphModel>";
    let graph = parse_drawio(xml, 0).unwrap();
    assert!(graph.nodes.contains_key("n"));
}
