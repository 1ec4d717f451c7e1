//! Tests for JSX parsing.

use r19_parser::{NodeArena, NodeData, NodeIndex, NodeKind, parse};

fn parse_ok(source: &str) -> NodeArena {
    let result = parse("test.jsx", source);
    assert!(
        result.diagnostics.is_empty(),
        "unexpected diagnostics for {source:?}: {:?}",
        result.diagnostics
    );
    result.arena
}

fn all(arena: &NodeArena, kind: NodeKind) -> Vec<NodeIndex> {
    arena
        .iter()
        .filter(|(_, node)| node.kind() == kind)
        .map(|(idx, _)| idx)
        .collect()
}

#[test]
fn test_element_with_children() {
    let source = "const el = <div className=\"box\">Hello {name}!</div>;";
    let arena = parse_ok(source);
    let elements = all(&arena, NodeKind::JsxElement);
    assert_eq!(elements.len(), 1);
    assert_eq!(
        arena.node_text(elements[0]),
        "<div className=\"box\">Hello {name}!</div>"
    );
    match arena.data(elements[0]) {
        Some(NodeData::JsxElement(el)) => {
            let kinds: Vec<NodeKind> = el.children.iter().map(|c| arena.kind(c).unwrap()).collect();
            assert_eq!(
                kinds,
                vec![NodeKind::JsxText, NodeKind::JsxExpression, NodeKind::JsxText]
            );
        }
        other => panic!("unexpected {other:?}"),
    }
    let attrs = all(&arena, NodeKind::JsxAttribute);
    let attr = arena.get_jsx_attribute(attrs[0]).unwrap();
    assert_eq!(arena.identifier_text(attr.name), Some("className"));
    assert_eq!(arena.string_value(attr.initializer), Some("box"));
}

#[test]
fn test_string_ref_attribute_forms() {
    let source = r#"
const a = <input ref="input" />;
const b = <input ref={'input'} />;
const c = <input ref={`input`} />;
const d = <input ref={node => (this.input = node)} />;
"#;
    let arena = parse_ok(source);
    let attrs = all(&arena, NodeKind::JsxAttribute);
    assert_eq!(attrs.len(), 4);
    let value_kinds: Vec<NodeKind> = attrs
        .iter()
        .map(|&a| arena.kind(arena.get_jsx_attribute(a).unwrap().initializer).unwrap())
        .collect();
    assert_eq!(
        value_kinds,
        vec![
            NodeKind::StringLiteral,
            NodeKind::JsxExpression,
            NodeKind::JsxExpression,
            NodeKind::JsxExpression,
        ]
    );
    assert_eq!(all(&arena, NodeKind::JsxSelfClosingElement).len(), 4);
}

#[test]
fn test_nested_elements_fragments_and_member_tags() {
    let source = r#"
function App() {
  return (
    <>
      <Layout.Header title="x" {...rest} />
      <ul>
        {items.map(item => <li key={item.id}>{item.label}</li>)}
      </ul>
    </>
  );
}
"#;
    let arena = parse_ok(source);
    assert_eq!(all(&arena, NodeKind::JsxFragment).len(), 1);
    assert_eq!(all(&arena, NodeKind::JsxElement).len(), 2);
    assert_eq!(all(&arena, NodeKind::JsxSpreadAttribute).len(), 1);

    let self_closing = all(&arena, NodeKind::JsxSelfClosingElement)[0];
    match arena.data(self_closing) {
        Some(NodeData::JsxSelfClosingElement(el)) => {
            assert_eq!(arena.kind(el.tag_name), Some(NodeKind::PropertyAccessExpression));
            assert_eq!(arena.node_text(el.tag_name), "Layout.Header");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_dashed_and_namespaced_attribute_names() {
    let arena = parse_ok("<svg xlink:href=\"#a\" data-test-id='t' aria-hidden />;");
    let attrs = all(&arena, NodeKind::JsxAttribute);
    let names: Vec<&str> = attrs
        .iter()
        .map(|&a| arena.node_text(arena.get_jsx_attribute(a).unwrap().name))
        .collect();
    assert_eq!(names, vec!["xlink:href", "data-test-id", "aria-hidden"]);
    assert!(arena.get_jsx_attribute(attrs[2]).unwrap().initializer.is_none());
}

#[test]
fn test_less_than_comparison_is_not_jsx() {
    let arena = parse_ok("const small = a < b;");
    assert!(all(&arena, NodeKind::JsxElement).is_empty());
    assert_eq!(all(&arena, NodeKind::BinaryExpression).len(), 1);
}

#[test]
fn test_mismatched_closing_tag_reports() {
    let result = parse("test.jsx", "const el = <div></span>;");
    assert!(result.has_errors());
    assert!(
        result.diagnostics[0]
            .message
            .contains("Expected corresponding JSX closing tag for 'div'")
    );
}
