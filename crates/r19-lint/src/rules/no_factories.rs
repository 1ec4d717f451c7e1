//! `no-factories`: module pattern factories and `createFactory`.

use r19_parser::parser::node::{ImportSpecifierKind, MethodKind};
use r19_parser::{NodeData, NodeIndex, NodeKind};

use crate::predicates::{is_require_call, member_key_name};
use crate::rule::{Report, Rule, RuleContext, RuleMeta, RuleType, Visitor};
use crate::selector::{
    all, callee, field, initializer, kind, member, module_specifier, return_argument,
    string_value,
};

pub const NO_MODULE_PATTERN: &str = "noModulePattern";
pub const NO_CREATE_FACTORY: &str = "noCreateFactory";

const CREATE_FACTORY: &str = "createFactory";

pub static META: RuleMeta = RuleMeta {
    name: "no-factories",
    rule_type: RuleType::Problem,
    description: "Disallow module pattern factories and React.createFactory",
    url: Some(
        "https://react.dev/blog/2024/04/25/react-19-upgrade-guide#removed-module-pattern-factories",
    ),
    fixable: false,
    has_suggestions: true,
    messages: &[
        (
            NO_MODULE_PATTERN,
            "Module pattern factories are removed in React 19. Use regular functions instead.",
        ),
        (
            NO_CREATE_FACTORY,
            "React.createFactory is removed in React 19. Use JSX instead.",
        ),
    ],
};

pub static RULE: Rule = Rule {
    meta: &META,
    visitors: &[
        Visitor::enter(NodeKind::ReturnStatement, check_return),
        Visitor::enter(NodeKind::ImportDeclaration, check_import),
        Visitor::enter(NodeKind::VariableDeclaration, check_require),
        Visitor::enter(NodeKind::CallExpression, check_call),
    ],
};

/// `return { render: function () { ... } }` or `return { render() { ... } }`
fn check_return(ctx: &mut RuleContext<'_>, node: NodeIndex) {
    let arena = ctx.arena;
    let Some(object) = arena.get_object_literal(return_argument(arena, node)) else {
        return;
    };
    let has_render = object.elements.iter().any(|element| match arena.data(element) {
        Some(NodeData::PropertyAssignment(prop)) => {
            member_key_name(arena, prop.name) == Some("render")
                && arena.kind(arena.skip_parentheses(prop.initializer))
                    == Some(NodeKind::FunctionExpression)
        }
        Some(NodeData::MethodDeclaration(method)) => {
            method.kind == MethodKind::Method && member_key_name(arena, method.name) == Some("render")
        }
        _ => false,
    });
    if has_render {
        ctx.report(Report::new(node, NO_MODULE_PATTERN));
    }
}

/// `import { createFactory } from 'react'`
fn check_import(ctx: &mut RuleContext<'_>, node: NodeIndex) {
    let arena = ctx.arena;
    let from_react = all(
        kind(NodeKind::ImportDeclaration),
        field(module_specifier, string_value("react")),
    );
    if !from_react(arena, node) {
        return;
    }
    let Some(NodeData::ImportDeclaration(import)) = arena.data(node) else {
        return;
    };
    for specifier in import.specifiers.iter() {
        let Some(NodeData::ImportSpecifier(spec)) = arena.data(specifier) else {
            continue;
        };
        let imported = if spec.imported.is_some() {
            spec.imported
        } else {
            spec.local
        };
        if spec.kind == ImportSpecifierKind::Named
            && arena.identifier_text(imported) == Some(CREATE_FACTORY)
        {
            ctx.report(Report::new(specifier, NO_CREATE_FACTORY));
        }
    }
}

/// `const { createFactory } = require('react')`
fn check_require(ctx: &mut RuleContext<'_>, node: NodeIndex) {
    let arena = ctx.arena;
    if !is_require_call(arena, initializer(arena, node), "react") {
        return;
    }
    let Some(decl) = arena.get_variable_declaration(node) else {
        return;
    };
    let Some(pattern) = arena.get_object_binding_pattern(decl.name) else {
        return;
    };
    for element_idx in pattern.elements.iter() {
        let Some(element) = arena.get_binding_element(element_idx) else {
            continue;
        };
        let key = if element.property_name.is_some() {
            member_key_name(arena, element.property_name)
        } else {
            arena.identifier_text(element.name)
        };
        if !element.dot_dot_dot && key == Some(CREATE_FACTORY) {
            ctx.report(Report::new(element_idx, NO_CREATE_FACTORY));
        }
    }
}

/// `React.createFactory(...)`
fn check_call(ctx: &mut RuleContext<'_>, node: NodeIndex) {
    let create_factory_call = all(
        kind(NodeKind::CallExpression),
        field(callee, member("React", CREATE_FACTORY)),
    );
    if create_factory_call(ctx.arena, node) {
        ctx.report(Report::new(node, NO_CREATE_FACTORY));
    }
}
