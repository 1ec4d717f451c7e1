//! Tests for symbol declaration.

use r19_binder::{BinderState, SymbolFlags, bind};
use r19_parser::{NodeArena, NodeKind, parse};

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

fn module_symbol<'a>(binder: &'a BinderState, name: &str) -> &'a r19_binder::Symbol {
    let scope = binder.get_scope(binder.file_scope().unwrap()).unwrap();
    let id = scope
        .get(name)
        .unwrap_or_else(|| panic!("{name} not declared at module level"));
    binder.get_symbol(id).unwrap()
}

#[test]
fn test_declaration_nodes_by_form() {
    let source = r#"
import React, { useState as useS } from 'react';
import * as PropTypes from 'prop-types';
var a = 1;
let { b, c: [d] } = obj;
const Component = () => null;
function Fn() {}
class Klass {}
"#;
    let (arena, binder) = bind_ok(source);

    let expected = [
        ("React", NodeKind::ImportSpecifier, SymbolFlags::IMPORT),
        ("useS", NodeKind::ImportSpecifier, SymbolFlags::IMPORT),
        ("PropTypes", NodeKind::ImportSpecifier, SymbolFlags::IMPORT),
        ("a", NodeKind::VariableDeclaration, SymbolFlags::FUNCTION_SCOPED_VARIABLE),
        ("b", NodeKind::VariableDeclaration, SymbolFlags::BLOCK_SCOPED_VARIABLE),
        ("d", NodeKind::VariableDeclaration, SymbolFlags::BLOCK_SCOPED_VARIABLE),
        ("Component", NodeKind::VariableDeclaration, SymbolFlags::CONST),
        ("Fn", NodeKind::FunctionDeclaration, SymbolFlags::FUNCTION),
        ("Klass", NodeKind::ClassDeclaration, SymbolFlags::CLASS),
    ];
    for (name, kind, flags) in expected {
        let symbol = module_symbol(&binder, name);
        assert_eq!(
            arena.kind(symbol.first_declaration()),
            Some(kind),
            "declaration of {name}"
        );
        assert!(symbol.has_flags(flags), "flags of {name}: {:?}", symbol.flags);
    }

    let scope = binder.get_scope(binder.file_scope().unwrap()).unwrap();
    assert!(!scope.has("useState"));
    assert!(!scope.has("c"));
}

#[test]
fn test_redeclaration_keeps_source_order() {
    let (arena, binder) = bind_ok("var x = 1;\nvar x = 2;\nfunction x() {}");
    let symbol = module_symbol(&binder, "x");
    assert_eq!(symbol.declarations.len(), 3);
    assert_eq!(arena.node_text(symbol.first_declaration()), "x = 1");
    assert!(symbol.has_flags(SymbolFlags::FUNCTION_SCOPED_VARIABLE));
    assert!(symbol.has_flags(SymbolFlags::FUNCTION));
}

#[test]
fn test_declared_identifiers_map_to_symbols() {
    let (arena, binder) = bind_ok("const { a, b: renamed = 2, ...rest } = props;");
    let declared: Vec<&str> = arena
        .iter()
        .filter(|(idx, node)| {
            node.kind() == NodeKind::Identifier && binder.symbol_of_declaration_name(*idx).is_some()
        })
        .map(|(idx, _)| arena.identifier_text(idx).unwrap())
        .collect();
    assert_eq!(declared, vec!["a", "renamed", "rest"]);
}

#[test]
fn test_parameters_and_catch_bindings() {
    let source = "function f(p, { q } = {}, ...r) { try {} catch ({ message }) {} }";
    let (arena, binder) = bind_ok(source);
    let params: Vec<&r19_binder::Symbol> = binder
        .symbols()
        .iter()
        .filter(|s| s.has_flags(SymbolFlags::PARAMETER))
        .collect();
    let names: Vec<&str> = params.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["p", "q", "r"]);
    assert!(
        params
            .iter()
            .all(|s| arena.kind(s.first_declaration()) == Some(NodeKind::Parameter))
    );

    let message = binder
        .symbols()
        .iter()
        .find(|s| s.name == "message")
        .unwrap();
    assert!(message.has_flags(SymbolFlags::CATCH_VARIABLE));
    assert_eq!(
        arena.kind(message.first_declaration()),
        Some(NodeKind::CatchClause)
    );
}

#[test]
fn test_rebinding_resets_state() {
    let first = parse("a.js", "const a = 1;");
    let second = parse("b.js", "const b = 2;");
    let mut binder = BinderState::new();
    binder.bind_source_file(&first.arena, first.root);
    binder.bind_source_file(&second.arena, second.root);
    assert_eq!(binder.symbols().len(), 1);
    assert_eq!(binder.symbols()[0].name, "b");
}
