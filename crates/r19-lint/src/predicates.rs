//! Node-shape predicates.
//!
//! Every predicate answers `false` (or `None`) for shapes it does not
//! expect; none of them panic on malformed trees.

use r19_parser::{NodeArena, NodeData, NodeIndex, NodeKind};
use r19_scanner::char_codes::is_identifier_text;
use r19_scanner::{SyntaxKind, keyword_from_text, token_is_reserved_word};

pub fn identifier_name(arena: &NodeArena, idx: NodeIndex) -> Option<&str> {
    arena.identifier_text(idx)
}

/// `object.name` with a plain identifier name: `(object, name)`.
pub fn member_access_parts(arena: &NodeArena, idx: NodeIndex) -> Option<(NodeIndex, &str)> {
    let access = arena.get_property_access(idx)?;
    let name = arena.identifier_text(access.name_or_argument)?;
    Some((access.expression, name))
}

/// `Identifier.member` on the left of an `=` assignment: the identifier
/// node and its name.
pub fn static_member_assignment_target<'a>(
    arena: &'a NodeArena,
    idx: NodeIndex,
    member: &str,
) -> Option<(NodeIndex, &'a str)> {
    let assign = arena.get_assignment(idx)?;
    if assign.operator_token != SyntaxKind::EqualsToken {
        return None;
    }
    let (object, name) = member_access_parts(arena, assign.left)?;
    if name != member {
        return None;
    }
    let object_name = arena.identifier_text(object)?;
    Some((object, object_name))
}

/// `Identifier.member = ...`
pub fn is_static_member_assignment(arena: &NodeArena, idx: NodeIndex, member: &str) -> bool {
    static_member_assignment_target(arena, idx, member).is_some()
}

/// `Identifier.defaultProps = { ... }`
pub fn is_deprecated_defaults_assignment(arena: &NodeArena, idx: NodeIndex) -> bool {
    is_static_member_assignment(arena, idx, "defaultProps")
        && arena
            .get_assignment(idx)
            .is_some_and(|assign| {
                arena.kind(arena.skip_parentheses(assign.right))
                    == Some(NodeKind::ObjectLiteralExpression)
            })
}

pub fn starts_with_uppercase(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

/// String literal or substitution-free template literal.
pub fn is_string_like_literal(arena: &NodeArena, idx: NodeIndex) -> bool {
    arena.string_value(idx).is_some()
}

/// `require('<module>')`
pub fn is_require_call(arena: &NodeArena, idx: NodeIndex, module: &str) -> bool {
    let Some(call) = arena.get_call(idx) else {
        return false;
    };
    arena.identifier_text(call.expression) == Some("require")
        && call.arguments.len() == 1
        && call
            .arguments
            .first()
            .and_then(|arg| arena.string_value(arg))
            == Some(module)
}

/// `this.props`
pub fn is_this_props(arena: &NodeArena, idx: NodeIndex) -> bool {
    let idx = arena.skip_parentheses(idx);
    member_access_parts(arena, idx).is_some_and(|(object, name)| {
        name == "props" && arena.kind(object) == Some(NodeKind::ThisKeyword)
    })
}

/// True when `idx` is the entire expression of an expression statement.
pub fn is_statement_expression(arena: &NodeArena, idx: NodeIndex) -> bool {
    arena
        .get_expression_statement(arena.parent(idx))
        .is_some_and(|stmt| stmt.expression == idx)
}

/// True when `statement` sits in a statement list (file, block, static
/// block or switch clause), so deleting it cannot change which statement
/// an enclosing `if`, loop or label governs.
pub fn is_in_statement_list(arena: &NodeArena, statement: NodeIndex) -> bool {
    matches!(
        arena.data(arena.parent(statement)),
        Some(
            NodeData::SourceFile(_)
                | NodeData::Block(_)
                | NodeData::ClassStaticBlock(_)
                | NodeData::CaseClause(_)
                | NodeData::DefaultClause(_)
        )
    )
}

/// A name usable as a shorthand binding: an identifier that is not a
/// reserved word.
pub fn is_valid_binding_name(name: &str) -> bool {
    is_identifier_text(name) && !keyword_from_text(name).is_some_and(token_is_reserved_word)
}

/// Static name of an object-literal or class member key.
pub fn member_key_name(arena: &NodeArena, key: NodeIndex) -> Option<&str> {
    match arena.data(key)? {
        NodeData::Identifier(id) => Some(&id.escaped_text),
        NodeData::StringLiteral(lit) => Some(&lit.text),
        _ => None,
    }
}

/// Whether an identifier node reads a binding, as opposed to naming a
/// property, a label, an attribute or a declaration.
pub fn is_reference_identifier(arena: &NodeArena, idx: NodeIndex) -> bool {
    if arena.kind(idx) != Some(NodeKind::Identifier) {
        return false;
    }
    let parent = arena.parent(idx);
    let Some(data) = arena.data(parent) else {
        return false;
    };
    match data {
        NodeData::PropertyAccessExpression(access) => access.name_or_argument != idx,
        NodeData::PropertyAssignment(prop) => prop.name != idx,
        NodeData::MethodDeclaration(method) => method.name != idx,
        NodeData::PropertyDeclaration(prop) => prop.name != idx,
        NodeData::BindingElement(element) => {
            element.property_name != idx && element.name != idx
        }
        NodeData::VariableDeclaration(decl) => decl.name != idx,
        NodeData::Parameter(param) => param.name != idx,
        NodeData::FunctionDeclaration(func)
        | NodeData::FunctionExpression(func)
        | NodeData::ArrowFunction(func) => func.name != idx,
        NodeData::ClassDeclaration(class) | NodeData::ClassExpression(class) => {
            class.name != idx
        }
        NodeData::CatchClause(clause) => clause.variable_declaration != idx,
        NodeData::LabeledStatement(_)
        | NodeData::BreakStatement(_)
        | NodeData::ContinueStatement(_)
        | NodeData::ImportSpecifier(_)
        | NodeData::ExportSpecifier(_)
        | NodeData::MetaProperty(_)
        | NodeData::JsxAttribute(_)
        | NodeData::JsxNamespacedName(_) => false,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use r19_parser::parse;

    fn first(arena: &NodeArena, kind: NodeKind) -> NodeIndex {
        arena
            .iter()
            .find(|(_, n)| n.kind() == kind)
            .map(|(i, _)| i)
            .expect("node of kind")
    }

    #[test]
    fn defaults_assignment_shapes() {
        let cases = [
            ("Foo.defaultProps = { a: 1 };", true),
            ("Foo.defaultProps = ({ a: 1 });", true),
            ("Foo.defaultProps = defaults;", false),
            ("Foo.defaultProps += { a: 1 };", false),
            ("Foo.bar.defaultProps = { a: 1 };", false),
            ("Foo['defaultProps'] = { a: 1 };", false),
            ("Foo.propTypes = { a: 1 };", false),
        ];
        for (source, expected) in cases {
            let result = parse("t.js", source);
            let assign = first(&result.arena, NodeKind::AssignmentExpression);
            assert_eq!(
                is_deprecated_defaults_assignment(&result.arena, assign),
                expected,
                "{source}"
            );
        }
    }

    #[test]
    fn statement_list_membership() {
        let cases = [
            ("x = 1;", true),
            ("{ x = 1; }", true),
            ("switch (k) { case 1: x = 1; }", true),
            ("if (c) x = 1;", false),
            ("if (c) {} else x = 1;", false),
            ("while (c) x = 1;", false),
            ("for (;;) x = 1;", false),
            ("label: x = 1;", false),
        ];
        for (source, expected) in cases {
            let result = parse("t.js", source);
            let statement = first(&result.arena, NodeKind::ExpressionStatement);
            assert_eq!(
                is_in_statement_list(&result.arena, statement),
                expected,
                "{source}"
            );
        }
    }

    #[test]
    fn non_assignments_are_not_matched() {
        let result = parse("t.js", "Foo.defaultProps;");
        let access = first(&result.arena, NodeKind::PropertyAccessExpression);
        assert!(!is_deprecated_defaults_assignment(&result.arena, access));
        assert!(!is_deprecated_defaults_assignment(&result.arena, NodeIndex::NONE));
    }

    #[test]
    fn binding_names() {
        assert!(is_valid_binding_name("name"));
        assert!(is_valid_binding_name("async"));
        assert!(!is_valid_binding_name("default"));
        assert!(!is_valid_binding_name("aria-label"));
    }

    #[test]
    fn reference_identifiers() {
        let result = parse("t.jsx", "const a = { b: c.d }; <X e={f} />;");
        let arena = &result.arena;
        let refs: Vec<&str> = arena
            .iter()
            .filter(|(i, n)| n.kind() == NodeKind::Identifier && is_reference_identifier(arena, *i))
            .map(|(i, _)| arena.identifier_text(i).unwrap())
            .collect();
        assert_eq!(refs, vec!["c", "X", "f"]);
    }
}
