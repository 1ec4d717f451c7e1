//! Predicate combinators for the flag-only rules.
//!
//! A selector is any `Fn(&NodeArena, NodeIndex) -> bool`. Combinators take
//! and return `Copy` closures so a rule can build a selector inline and
//! reuse its parts.
//!
//! ```ignore
//! // CallExpression[callee.object.name='React'][callee.property.name='createFactory']
//! let sel = all(kind(NodeKind::CallExpression), field(callee, member("React", "createFactory")));
//! ```

use r19_parser::{NodeArena, NodeData, NodeIndex, NodeKind};

use crate::predicates;

/// Child accessor used by [`field`].
pub type Accessor = fn(&NodeArena, NodeIndex) -> NodeIndex;

pub fn kind(expected: NodeKind) -> impl Fn(&NodeArena, NodeIndex) -> bool + Copy {
    move |arena: &NodeArena, idx: NodeIndex| arena.kind(idx) == Some(expected)
}

pub fn all<A, B>(a: A, b: B) -> impl Fn(&NodeArena, NodeIndex) -> bool + Copy
where
    A: Fn(&NodeArena, NodeIndex) -> bool + Copy,
    B: Fn(&NodeArena, NodeIndex) -> bool + Copy,
{
    move |arena: &NodeArena, idx: NodeIndex| a(arena, idx) && b(arena, idx)
}

pub fn any<A, B>(a: A, b: B) -> impl Fn(&NodeArena, NodeIndex) -> bool + Copy
where
    A: Fn(&NodeArena, NodeIndex) -> bool + Copy,
    B: Fn(&NodeArena, NodeIndex) -> bool + Copy,
{
    move |arena: &NodeArena, idx: NodeIndex| a(arena, idx) || b(arena, idx)
}

pub fn not<A>(a: A) -> impl Fn(&NodeArena, NodeIndex) -> bool + Copy
where
    A: Fn(&NodeArena, NodeIndex) -> bool + Copy,
{
    move |arena: &NodeArena, idx: NodeIndex| !a(arena, idx)
}

/// Apply `pred` to the child selected by `get`. A missing child fails.
pub fn field<P>(get: Accessor, pred: P) -> impl Fn(&NodeArena, NodeIndex) -> bool + Copy
where
    P: Fn(&NodeArena, NodeIndex) -> bool + Copy,
{
    move |arena: &NodeArena, idx: NodeIndex| {
        let child = get(arena, idx);
        child.is_some() && pred(arena, child)
    }
}

/// Some ancestor (nearest first) satisfies `pred`.
pub fn has_ancestor<P>(pred: P) -> impl Fn(&NodeArena, NodeIndex) -> bool + Copy
where
    P: Fn(&NodeArena, NodeIndex) -> bool + Copy,
{
    move |arena: &NodeArena, idx: NodeIndex| arena.ancestors(idx).any(|a| pred(arena, a))
}

pub fn identifier_named(name: &'static str) -> impl Fn(&NodeArena, NodeIndex) -> bool + Copy {
    move |arena: &NodeArena, idx: NodeIndex| arena.identifier_text(idx) == Some(name)
}

/// String literal (or substitution-free template) with exactly `value`.
pub fn string_value(value: &'static str) -> impl Fn(&NodeArena, NodeIndex) -> bool + Copy {
    move |arena: &NodeArena, idx: NodeIndex| arena.string_value(idx) == Some(value)
}

pub fn string_like() -> impl Fn(&NodeArena, NodeIndex) -> bool + Copy {
    |arena: &NodeArena, idx: NodeIndex| predicates::is_string_like_literal(arena, idx)
}

/// `object.property` where both sides are plain identifiers.
pub fn member(
    object: &'static str,
    property: &'static str,
) -> impl Fn(&NodeArena, NodeIndex) -> bool + Copy {
    move |arena: &NodeArena, idx: NodeIndex| {
        predicates::member_access_parts(arena, idx)
            .is_some_and(|(obj, name)| name == property && arena.identifier_text(obj) == Some(object))
    }
}

// =============================================================================
// Accessors
// =============================================================================

pub fn parent(arena: &NodeArena, idx: NodeIndex) -> NodeIndex {
    arena.parent(idx)
}

/// Callee of a call or `new` expression.
pub fn callee(arena: &NodeArena, idx: NodeIndex) -> NodeIndex {
    match arena.data(idx) {
        Some(NodeData::CallExpression(call)) => call.expression,
        Some(NodeData::NewExpression(new)) => new.expression,
        _ => NodeIndex::NONE,
    }
}

pub fn first_argument(arena: &NodeArena, idx: NodeIndex) -> NodeIndex {
    arena
        .get_call(idx)
        .and_then(|call| call.arguments.first())
        .unwrap_or(NodeIndex::NONE)
}

pub fn attribute_name(arena: &NodeArena, idx: NodeIndex) -> NodeIndex {
    arena
        .get_jsx_attribute(idx)
        .map_or(NodeIndex::NONE, |attr| attr.name)
}

pub fn attribute_value(arena: &NodeArena, idx: NodeIndex) -> NodeIndex {
    arena
        .get_jsx_attribute(idx)
        .map_or(NodeIndex::NONE, |attr| attr.initializer)
}

/// Expression inside `{ ... }` in JSX, parentheses removed.
pub fn jsx_expression_inner(arena: &NodeArena, idx: NodeIndex) -> NodeIndex {
    match arena.data(idx) {
        Some(NodeData::JsxExpression(expr)) if !expr.dot_dot_dot => {
            arena.skip_parentheses(expr.expression)
        }
        _ => NodeIndex::NONE,
    }
}

/// Argument of `return`.
pub fn return_argument(arena: &NodeArena, idx: NodeIndex) -> NodeIndex {
    match arena.data(idx) {
        Some(NodeData::ReturnStatement(ret)) => arena.skip_parentheses(ret.expression),
        _ => NodeIndex::NONE,
    }
}

/// Module specifier of an import declaration.
pub fn module_specifier(arena: &NodeArena, idx: NodeIndex) -> NodeIndex {
    match arena.data(idx) {
        Some(NodeData::ImportDeclaration(import)) => import.module_specifier,
        _ => NodeIndex::NONE,
    }
}

/// Initializer of a variable declaration, parentheses removed.
pub fn initializer(arena: &NodeArena, idx: NodeIndex) -> NodeIndex {
    arena
        .get_variable_declaration(idx)
        .map_or(NodeIndex::NONE, |decl| arena.skip_parentheses(decl.initializer))
}
