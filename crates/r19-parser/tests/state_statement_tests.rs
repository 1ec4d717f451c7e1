//! Tests for statement and declaration parsing.

use r19_parser::parser::node::{ImportSpecifierKind, MethodKind, VariableKind};
use r19_parser::{NodeArena, NodeData, NodeIndex, NodeKind, ParserState};

fn parse_ok(source: &str) -> (NodeArena, NodeIndex) {
    let mut parser = ParserState::new("test.jsx".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected diagnostics for {source:?}: {:?}",
        parser.get_diagnostics()
    );
    (parser.into_arena(), root)
}

fn statements(arena: &NodeArena, root: NodeIndex) -> Vec<NodeIndex> {
    match arena.data(root) {
        Some(NodeData::SourceFile(file)) => file.statements.nodes.clone(),
        other => panic!("expected source file, got {other:?}"),
    }
}

fn find_all(arena: &NodeArena, kind: NodeKind) -> Vec<NodeIndex> {
    arena
        .iter()
        .filter(|(_, node)| node.kind() == kind)
        .map(|(idx, _)| idx)
        .collect()
}

#[test]
fn test_default_props_assignment_statement() {
    let source = "function Component({ name }) { return name; }\nComponent.defaultProps = { name: 'Test' };";
    let (arena, root) = parse_ok(source);
    let stmts = statements(&arena, root);
    assert_eq!(stmts.len(), 2);
    assert_eq!(arena.kind(stmts[0]), Some(NodeKind::FunctionDeclaration));

    let stmt = arena.get_expression_statement(stmts[1]).expect("expression statement");
    let assign = arena.get_assignment(stmt.expression).expect("assignment");
    let access = arena.get_property_access(assign.left).expect("member");
    assert_eq!(arena.identifier_text(access.expression), Some("Component"));
    assert_eq!(arena.identifier_text(access.name_or_argument), Some("defaultProps"));
    assert_eq!(
        arena.node_text(stmt.expression),
        "Component.defaultProps = { name: 'Test' }"
    );
    // The statement range includes the semicolon.
    assert_eq!(arena.node_text(stmts[1]).chars().last(), Some(';'));
}

#[test]
fn test_function_records_parameter_parens() {
    let source = "function Foo( props ) {}";
    let (arena, root) = parse_ok(source);
    let func = arena.get_function(statements(&arena, root)[0]).expect("function");
    assert_eq!(func.params_open, Some(12));
    assert_eq!(func.params_close, Some(20));
    assert_eq!(func.parameters.len(), 1);
    let param = arena.get_parameter(func.parameters.nodes[0]).expect("parameter");
    assert_eq!(arena.identifier_text(param.name), Some("props"));
}

#[test]
fn test_object_binding_pattern_with_defaults_and_rest() {
    let source = "const Comp = ({ a, b: renamed = 2, ...rest } = {}) => null;";
    let (arena, _) = parse_ok(source);
    let patterns = find_all(&arena, NodeKind::ObjectBindingPattern);
    assert_eq!(patterns.len(), 1);
    let pattern = arena.get_object_binding_pattern(patterns[0]).unwrap();
    assert_eq!(pattern.elements.len(), 3);

    let a = arena.get_binding_element(pattern.elements.nodes[0]).unwrap();
    assert!(a.property_name.is_none());
    assert_eq!(arena.identifier_text(a.name), Some("a"));

    let b = arena.get_binding_element(pattern.elements.nodes[1]).unwrap();
    assert_eq!(arena.identifier_text(b.property_name), Some("b"));
    assert_eq!(arena.identifier_text(b.name), Some("renamed"));
    assert_eq!(arena.node_text(b.initializer), "2");

    let rest = arena.get_binding_element(pattern.elements.nodes[2]).unwrap();
    assert!(rest.dot_dot_dot);

    let param = arena.parent(patterns[0]);
    let param = arena.get_parameter(param).expect("pattern is a parameter name");
    assert_eq!(arena.node_text(param.initializer), "{}");
}

#[test]
fn test_variable_kinds() {
    let (arena, root) = parse_ok("var a = 1; let b; const c = a, d = c;");
    let kinds: Vec<VariableKind> = statements(&arena, root)
        .into_iter()
        .map(|s| arena.get_variable_statement(s).unwrap().kind)
        .collect();
    assert_eq!(
        kinds,
        vec![VariableKind::Var, VariableKind::Let, VariableKind::Const]
    );
    let decls = find_all(&arena, NodeKind::VariableDeclaration);
    assert_eq!(decls.len(), 4);
    assert_eq!(arena.declaration_kind(decls[3]), Some(VariableKind::Const));
}

#[test]
fn test_class_members() {
    let source = r#"
class Button extends React.Component {
  static defaultProps = { size: 'md' };
  static propTypes;
  state = {};
  constructor(props) { super(props); }
  get label() { return this.props.label; }
  render() { return null; }
  static { init(); }
}
"#;
    let (arena, root) = parse_ok(source);
    let class = arena.get_class(statements(&arena, root)[0]).expect("class");
    assert_eq!(arena.node_text(class.heritage), "React.Component");
    assert_eq!(class.members.len(), 7);

    let kinds: Vec<NodeKind> = class
        .members
        .iter()
        .map(|m| arena.kind(m).unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::PropertyDeclaration,
            NodeKind::PropertyDeclaration,
            NodeKind::PropertyDeclaration,
            NodeKind::MethodDeclaration,
            NodeKind::MethodDeclaration,
            NodeKind::MethodDeclaration,
            NodeKind::ClassStaticBlock,
        ]
    );
    match arena.data(class.members.nodes[0]) {
        Some(NodeData::PropertyDeclaration(prop)) => {
            assert!(prop.is_static);
            assert_eq!(arena.identifier_text(prop.name), Some("defaultProps"));
        }
        other => panic!("unexpected member {other:?}"),
    }
    assert_eq!(
        arena.get_method(class.members.nodes[3]).unwrap().kind,
        MethodKind::Constructor
    );
    assert_eq!(
        arena.get_method(class.members.nodes[4]).unwrap().kind,
        MethodKind::Getter
    );
    let render = arena.get_method(class.members.nodes[5]).unwrap();
    assert_eq!(arena.identifier_text(render.name), Some("render"));
    assert!(!render.is_static);
}

#[test]
fn test_imports_and_exports() {
    let source = r#"
import React, { createFactory as cf, useState } from 'react';
import * as PropTypes from "prop-types";
import './styles.css';
export default function App() {}
export const x = 1;
export { x as y };
export * from './other';
"#;
    let (arena, root) = parse_ok(source);
    let stmts = statements(&arena, root);
    assert_eq!(stmts.len(), 7);

    let specs = find_all(&arena, NodeKind::ImportSpecifier);
    let summary: Vec<(ImportSpecifierKind, Option<&str>, Option<&str>)> = specs
        .iter()
        .map(|&s| match arena.data(s) {
            Some(NodeData::ImportSpecifier(spec)) => (
                spec.kind,
                arena.identifier_text(spec.imported),
                arena.identifier_text(spec.local),
            ),
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            (ImportSpecifierKind::Default, None, Some("React")),
            (ImportSpecifierKind::Named, Some("createFactory"), Some("cf")),
            (ImportSpecifierKind::Named, None, Some("useState")),
            (ImportSpecifierKind::Namespace, None, Some("PropTypes")),
        ]
    );

    match arena.data(stmts[3]) {
        Some(NodeData::ExportAssignment(export)) => {
            assert_eq!(arena.kind(export.expression), Some(NodeKind::FunctionDeclaration));
        }
        other => panic!("expected export default, got {other:?}"),
    }
}

#[test]
fn test_control_flow_statements() {
    let source = r#"
for (let i = 0; i < n; i++) { if (i) continue; else break; }
for (const k in obj) {}
for (const v of list) {}
while (x) x--;
do { y++ } while (y < 3)
switch (z) { case 1: a(); break; default: b(); }
try { risky() } catch ({ message }) { log(message) } finally { done() }
outer: for (;;) { break outer; }
"#;
    let (arena, root) = parse_ok(source);
    let kinds: Vec<NodeKind> = statements(&arena, root)
        .into_iter()
        .map(|s| arena.kind(s).unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::ForStatement,
            NodeKind::ForInStatement,
            NodeKind::ForOfStatement,
            NodeKind::WhileStatement,
            NodeKind::DoStatement,
            NodeKind::SwitchStatement,
            NodeKind::TryStatement,
            NodeKind::LabeledStatement,
        ]
    );
}

#[test]
fn test_automatic_semicolon_insertion() {
    let source = "const a = 1\nconst b = a\nreturn\nfoo()";
    let (arena, root) = parse_ok(source);
    assert_eq!(statements(&arena, root).len(), 4);
}

#[test]
fn test_syntax_error_is_reported() {
    let mut parser = ParserState::new("bad.js".to_string(), "const = ;\nfoo(".to_string());
    parser.parse_source_file();
    assert!(!parser.get_diagnostics().is_empty());
}

#[test]
fn test_parents_are_linked() {
    let (arena, root) = parse_ok("const a = { b: [c] };");
    let c = find_all(&arena, NodeKind::Identifier)
        .into_iter()
        .find(|&i| arena.identifier_text(i) == Some("c"))
        .unwrap();
    let chain: Vec<NodeKind> = arena
        .ancestors(c)
        .map(|a| arena.kind(a).unwrap())
        .collect();
    assert_eq!(
        chain,
        vec![
            NodeKind::ArrayLiteralExpression,
            NodeKind::PropertyAssignment,
            NodeKind::ObjectLiteralExpression,
            NodeKind::VariableDeclaration,
            NodeKind::VariableStatement,
            NodeKind::SourceFile,
        ]
    );
    assert_eq!(arena.ancestors(c).last(), Some(root));
}
