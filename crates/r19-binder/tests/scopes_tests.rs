//! Tests for scope construction and name resolution.

use r19_binder::{BinderState, ScopeKind, bind};
use r19_parser::{NodeArena, NodeIndex, NodeKind, parse};

fn bind_ok(source: &str) -> (NodeArena, BinderState) {
    let result = parse("test.jsx", source);
    assert!(
        result.diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        result.diagnostics
    );
    let binder = bind(&result.arena, result.root);
    (result.arena, binder)
}

/// The `nth` identifier (0-based) whose text is `name`.
fn ident(arena: &NodeArena, name: &str, nth: usize) -> NodeIndex {
    arena
        .iter()
        .filter(|(idx, node)| {
            node.kind() == NodeKind::Identifier && arena.identifier_text(*idx) == Some(name)
        })
        .map(|(idx, _)| idx)
        .nth(nth)
        .unwrap_or_else(|| panic!("identifier {name} #{nth} not found"))
}

/// Kind of the declaration `name` resolves to at the `nth` occurrence.
fn resolved_kind(arena: &NodeArena, binder: &BinderState, name: &str, nth: usize) -> Option<NodeKind> {
    let at = ident(arena, name, nth);
    let symbol = binder.resolve_name(arena, name, at)?;
    arena.kind(binder.get_symbol(symbol)?.first_declaration())
}

#[test]
fn test_scope_kinds() {
    let source = r#"
function f(a) {
  { let b; }
  for (let i = 0; i < 1; i++) {}
  switch (a) { case 1: let c; }
  try {} catch (e) {}
}
const g = class G { static { var s; } m() {} };
"#;
    let (_, binder) = bind_ok(source);
    let kinds: Vec<ScopeKind> = binder.scopes().iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ScopeKind::Module,
            ScopeKind::Function,
            ScopeKind::Block,
            ScopeKind::Block,
            ScopeKind::Block,
            ScopeKind::Block,
            ScopeKind::Block,
            ScopeKind::Catch,
            ScopeKind::Block,
            ScopeKind::Class,
            ScopeKind::StaticBlock,
            ScopeKind::Function,
        ]
    );
}

#[test]
fn test_resolves_through_nested_scopes() {
    let source = r#"
const Component = () => null;
function outer() {
  function inner() {
    return Component;
  }
}
Component.defaultProps = {};
"#;
    let (arena, binder) = bind_ok(source);
    assert_eq!(
        resolved_kind(&arena, &binder, "Component", 1),
        Some(NodeKind::VariableDeclaration)
    );
    assert_eq!(
        resolved_kind(&arena, &binder, "Component", 2),
        Some(NodeKind::VariableDeclaration)
    );
}

#[test]
fn test_inner_declaration_shadows_outer() {
    let source = r#"
const x = 1;
function f(x) {
  return x;
}
{
  const x = 2;
  x;
}
x;
"#;
    let (arena, binder) = bind_ok(source);
    assert_eq!(resolved_kind(&arena, &binder, "x", 2), Some(NodeKind::Parameter));
    let inner = ident(&arena, "x", 4);
    let inner_symbol = binder.resolve_name(&arena, "x", inner).unwrap();
    let outer = ident(&arena, "x", 5);
    let outer_symbol = binder.resolve_name(&arena, "x", outer).unwrap();
    assert_ne!(inner_symbol, outer_symbol);
    assert_eq!(
        binder.get_symbol(outer_symbol).unwrap().scope,
        binder.file_scope().unwrap()
    );
}

#[test]
fn test_var_hoists_to_function_scope() {
    let source = "function f() { if (a) { var hoisted = 1; let local = 2; } return hoisted; }";
    let (arena, binder) = bind_ok(source);
    let symbol = binder
        .resolve_name(&arena, "hoisted", ident(&arena, "hoisted", 1))
        .unwrap();
    let scope = binder.get_symbol(symbol).unwrap().scope;
    assert_eq!(binder.get_scope(scope).unwrap().kind, ScopeKind::Function);

    let return_site = ident(&arena, "hoisted", 1);
    assert!(binder.is_unresolved(&arena, "local", return_site));
}

#[test]
fn test_declarations_after_use_resolve() {
    let source = "Component.defaultProps = {};\nfunction Component() { return null; }";
    let (arena, binder) = bind_ok(source);
    assert_eq!(
        resolved_kind(&arena, &binder, "Component", 0),
        Some(NodeKind::FunctionDeclaration)
    );
}

#[test]
fn test_named_expressions_bind_inside() {
    let source = "const f = function g() { return g; };\nconst C = class D { m() { return D; } };\ng; D;";
    let (arena, binder) = bind_ok(source);
    assert_eq!(
        resolved_kind(&arena, &binder, "g", 1),
        Some(NodeKind::FunctionExpression)
    );
    assert_eq!(
        resolved_kind(&arena, &binder, "D", 1),
        Some(NodeKind::ClassExpression)
    );
    assert!(binder.is_unresolved(&arena, "g", ident(&arena, "g", 2)));
    assert!(binder.is_unresolved(&arena, "D", ident(&arena, "D", 2)));
}

#[test]
fn test_unknown_globals_are_unresolved() {
    let (arena, binder) = bind_ok("React.createFactory('div');");
    assert!(binder.is_unresolved(&arena, "React", ident(&arena, "React", 0)));
}

#[test]
fn test_function_body_maps_to_function_scope() {
    let (arena, binder) = bind_ok("function f(a) { return a; }");
    let body = arena
        .iter()
        .find(|(_, n)| n.kind() == NodeKind::Block)
        .map(|(i, _)| i)
        .unwrap();
    let func = arena.parent(body);
    assert_eq!(binder.scope_of_node(body), binder.scope_of_node(func));
}
