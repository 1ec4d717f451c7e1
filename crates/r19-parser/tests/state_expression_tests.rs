//! Tests for expression parsing.

use r19_parser::{NodeArena, NodeData, NodeIndex, NodeKind, parse};
use r19_scanner::SyntaxKind;

fn parse_ok(source: &str) -> NodeArena {
    let result = parse("test.js", source);
    assert!(
        result.diagnostics.is_empty(),
        "unexpected diagnostics for {source:?}: {:?}",
        result.diagnostics
    );
    result.arena
}

fn first_of(arena: &NodeArena, kind: NodeKind) -> NodeIndex {
    arena
        .iter()
        .find(|(_, node)| node.kind() == kind)
        .map(|(idx, _)| idx)
        .unwrap_or_else(|| panic!("no {kind:?} node"))
}

fn count(arena: &NodeArena, kind: NodeKind) -> usize {
    arena.iter().filter(|(_, node)| node.kind() == kind).count()
}

#[test]
fn test_arrow_function_forms() {
    let arena = parse_ok(
        "const a = x => x;\nconst b = (x, y = 1) => { return x + y; };\nconst c = async () => null;\nconst d = async x => x;",
    );
    assert_eq!(count(&arena, NodeKind::ArrowFunction), 4);

    let arrows: Vec<_> = arena
        .iter()
        .filter(|(_, n)| n.kind() == NodeKind::ArrowFunction)
        .map(|(i, _)| i)
        .collect();
    let simple = arena.get_function(arrows[0]).unwrap();
    assert_eq!(simple.params_open, None);
    assert_eq!(simple.parameters.len(), 1);

    let parenthesized = arena.get_function(arrows[1]).unwrap();
    assert!(parenthesized.params_open.is_some());
    assert_eq!(parenthesized.parameters.len(), 2);
    assert_eq!(arena.kind(parenthesized.body), Some(NodeKind::Block));

    assert!(arena.get_function(arrows[2]).unwrap().is_async);
    assert!(arena.get_function(arrows[3]).unwrap().is_async);
}

#[test]
fn test_parenthesized_expression_is_not_an_arrow() {
    let arena = parse_ok("const v = (a + b) * c;");
    assert_eq!(count(&arena, NodeKind::ArrowFunction), 0);
    assert_eq!(count(&arena, NodeKind::ParenthesizedExpression), 1);
    let binary = first_of(&arena, NodeKind::VariableDeclaration);
    let init = arena.get_variable_declaration(binary).unwrap().initializer;
    match arena.data(init) {
        Some(NodeData::BinaryExpression(bin)) => {
            assert_eq!(bin.operator_token, SyntaxKind::AsteriskToken)
        }
        other => panic!("expected binary expression, got {other:?}"),
    }
}

#[test]
fn test_binary_precedence() {
    let arena = parse_ok("x = a + b * c;");
    let assign = arena
        .get_assignment(first_of(&arena, NodeKind::AssignmentExpression))
        .unwrap();
    match arena.data(assign.right) {
        Some(NodeData::BinaryExpression(bin)) => {
            assert_eq!(bin.operator_token, SyntaxKind::PlusToken);
            assert_eq!(arena.node_text(bin.right), "b * c");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_shift_operators_are_rescanned() {
    let arena = parse_ok("y = a >> 2; z = b >>> 1; w = c >= d;");
    let ops: Vec<SyntaxKind> = arena
        .iter()
        .filter_map(|(_, n)| match &n.data {
            NodeData::BinaryExpression(bin) => Some(bin.operator_token),
            _ => None,
        })
        .collect();
    assert_eq!(
        ops,
        vec![
            SyntaxKind::GreaterThanGreaterThanToken,
            SyntaxKind::GreaterThanGreaterThanGreaterThanToken,
            SyntaxKind::GreaterThanEqualsToken,
        ]
    );
}

#[test]
fn test_object_literal_members() {
    let arena = parse_ok(
        "const o = { a: 1, 'b-c': 2, [k]: 3, d, ...rest, render() { return 1; }, get e() { return 2; } };",
    );
    let object = arena
        .get_object_literal(first_of(&arena, NodeKind::ObjectLiteralExpression))
        .unwrap();
    let kinds: Vec<NodeKind> = object
        .elements
        .iter()
        .map(|e| arena.kind(e).unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::PropertyAssignment,
            NodeKind::PropertyAssignment,
            NodeKind::PropertyAssignment,
            NodeKind::ShorthandPropertyAssignment,
            NodeKind::SpreadAssignment,
            NodeKind::MethodDeclaration,
            NodeKind::MethodDeclaration,
        ]
    );
    match arena.data(object.elements.nodes[1]) {
        Some(NodeData::PropertyAssignment(prop)) => {
            assert_eq!(arena.property_name_text(prop.name), Some("b-c"))
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_member_and_call_chains() {
    let arena = parse_ok("React.createFactory('div')(props)?.x[0];\nnew Foo.Bar(1).baz();");
    assert_eq!(count(&arena, NodeKind::CallExpression), 3);
    assert_eq!(count(&arena, NodeKind::NewExpression), 1);
    let new_expr = first_of(&arena, NodeKind::NewExpression);
    assert_eq!(arena.node_text(new_expr), "new Foo.Bar(1)");
}

#[test]
fn test_regex_and_division() {
    let arena = parse_ok("const r = /ab+c/gi; const q = a / b / c;");
    assert_eq!(count(&arena, NodeKind::RegularExpressionLiteral), 1);
    let regex = first_of(&arena, NodeKind::RegularExpressionLiteral);
    assert_eq!(arena.node_text(regex), "/ab+c/gi");
    assert_eq!(count(&arena, NodeKind::BinaryExpression), 2);
}

#[test]
fn test_template_literals() {
    let arena = parse_ok("const t = `a${b}c${ { d: 1 }.d }e`; const u = `plain`; tag`x`;");
    let template = first_of(&arena, NodeKind::TemplateExpression);
    match arena.data(template) {
        Some(NodeData::TemplateExpression(t)) => assert_eq!(t.expressions.len(), 2),
        other => panic!("unexpected {other:?}"),
    }
    let plain = first_of(&arena, NodeKind::NoSubstitutionTemplateLiteral);
    assert_eq!(arena.string_value(plain), Some("plain"));
    assert_eq!(count(&arena, NodeKind::TaggedTemplateExpression), 1);
}

#[test]
fn test_conditional_and_logical() {
    let arena = parse_ok("const v = a ?? b ? c || d : e && f;");
    assert_eq!(count(&arena, NodeKind::ConditionalExpression), 1);
    assert_eq!(count(&arena, NodeKind::BinaryExpression), 3);
}

#[test]
fn test_async_await_and_generators() {
    let arena = parse_ok(
        "async function f() { await g(); }\nfunction* h() { yield 1; yield* other(); }\nconst x = await load();",
    );
    assert_eq!(count(&arena, NodeKind::AwaitExpression), 2);
    assert_eq!(count(&arena, NodeKind::YieldExpression), 2);
}

#[test]
fn test_await_as_identifier_in_plain_function() {
    let arena = parse_ok("function f() { const await = 1; return await; }");
    assert_eq!(count(&arena, NodeKind::AwaitExpression), 0);
}

#[test]
fn test_skip_parentheses() {
    let arena = parse_ok("const x = ((y));");
    let decl = first_of(&arena, NodeKind::VariableDeclaration);
    let init = arena.get_variable_declaration(decl).unwrap().initializer;
    let inner = arena.skip_parentheses(init);
    assert_eq!(arena.identifier_text(inner), Some("y"));
}

#[test]
fn test_unterminated_expression_reports() {
    let result = parse("test.js", "const x = (a, ;");
    assert!(result.has_errors());
}
