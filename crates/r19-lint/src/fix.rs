//! Fix synthesis for the `defaultProps` migration.
//!
//! Every edit is computed against the pristine source: the defaults added
//! to the props pattern (or a new one), the removal of the assignment, and
//! the removal of its `;` when one follows. Existing pattern text is never
//! rewritten, only inserted into, so comments and layout survive.

use r19_common::{EditError, Fix, LineMap, TextEdit};
use r19_parser::parser::node::BindingElementData;
use r19_parser::{NodeArena, NodeIndex};
use r19_scanner::{ScannerState, SyntaxKind};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use thiserror::Error;

use crate::component::{ComponentShape, ParamInsertion};
use crate::defaults::DefaultMap;
use crate::predicates::{
    is_in_statement_list, is_reference_identifier, is_statement_expression, member_key_name,
};
use crate::resolver::{Resolution, ScopeResolver};

const INDENT_UNIT: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixError {
    #[error("component shape has no rewrite")]
    Unrecognized,

    #[error("the assignment is not a standalone statement in a statement list")]
    NotAStatement,

    #[error("parameter '{0}' is still referenced in the component body")]
    ParameterReferenced(String),

    #[error("'{0}' is already declared in the component")]
    AlreadyBound(String),

    #[error("a new '{0}' binding would capture references to an outer '{0}'")]
    CapturesReference(String),

    #[error("default value refers to '{0}', which means something else inside the component")]
    ValueRebound(String),

    #[error("node {0} is missing from the tree")]
    MissingNode(u32),

    #[error(transparent)]
    Edit(#[from] EditError),
}

/// Build the fix moving `defaults` into the component described by
/// `shape` and deleting `assignment`.
pub fn synthesize_fix(
    arena: &NodeArena,
    resolver: &dyn ScopeResolver,
    line_map: &LineMap,
    shape: &ComponentShape,
    defaults: &DefaultMap,
    assignment: NodeIndex,
) -> Result<Fix, FixError> {
    let values = arena
        .get_assignment(assignment)
        .ok_or(FixError::MissingNode(assignment.0))?
        .right;

    let mut edits: Vec<TextEdit> = match *shape {
        ComponentShape::Unrecognized(_) => return Err(FixError::Unrecognized),
        _ if defaults.is_empty() => Vec::new(),
        ComponentShape::FunctionWithDestructuredParam { function, pattern } => {
            let site = BindingSite::function(arena, function)?;
            let added = added_keys(arena, pattern, defaults)?;
            site.check(arena, resolver, &added, values)?;
            merge_into_pattern(arena, line_map, pattern, defaults)?
        }
        ComponentShape::ClassComponent {
            render_body,
            existing: Some(pattern),
            ..
        } => {
            let site = BindingSite::render(arena, render_body);
            let added = added_keys(arena, pattern, defaults)?;
            site.check(arena, resolver, &added, values)?;
            merge_into_pattern(arena, line_map, pattern, defaults)?
        }
        ComponentShape::FunctionWithPlainOrNoParam {
            function,
            insertion,
            param_referenced,
        } => {
            let edit = synthesize_parameter(arena, insertion, param_referenced, defaults)?;
            let added: Vec<&str> = defaults.keys().map(String::as_str).collect();
            BindingSite::function(arena, function)?.check(arena, resolver, &added, values)?;
            vec![edit]
        }
        ComponentShape::ClassComponent {
            render_body,
            existing: None,
            ..
        } => {
            let added: Vec<&str> = defaults.keys().map(String::as_str).collect();
            BindingSite::render(arena, render_body).check(arena, resolver, &added, values)?;
            vec![insert_props_destructuring(arena, line_map, render_body, defaults)?]
        }
    };

    edits.extend(removal_edits(arena, assignment)?);
    Ok(Fix::new(arena.source_text(), edits)?)
}

fn node_range(arena: &NodeArena, idx: NodeIndex) -> Result<(u32, u32), FixError> {
    arena
        .get(idx)
        .map(|node| (node.pos, node.end))
        .ok_or(FixError::MissingNode(idx.0))
}

fn contains(arena: &NodeArena, range: (u32, u32), idx: NodeIndex) -> bool {
    arena
        .get(idx)
        .is_some_and(|node| node.pos >= range.0 && node.end <= range.1)
}

/// The function whose scope receives new prop bindings, and the code that
/// will see them.
#[derive(Clone, Copy, Debug)]
struct BindingSite {
    scope: NodeIndex,
    body: NodeIndex,
}

impl BindingSite {
    fn function(arena: &NodeArena, function: NodeIndex) -> Result<Self, FixError> {
        let body = arena
            .get_function(function)
            .ok_or(FixError::MissingNode(function.0))?
            .body;
        Ok(BindingSite {
            scope: function,
            body,
        })
    }

    /// `render`'s body belongs to the method node's scope.
    fn render(arena: &NodeArena, render_body: NodeIndex) -> Self {
        BindingSite {
            scope: arena.parent(render_body),
            body: render_body,
        }
    }

    /// Reject the rewrite when introducing `added` bindings, or moving the
    /// default values in `values` into the component, would change what a
    /// name refers to.
    fn check(
        self,
        arena: &NodeArena,
        resolver: &dyn ScopeResolver,
        added: &[&str],
        values: NodeIndex,
    ) -> Result<(), FixError> {
        let scope_range = node_range(arena, self.scope)?;
        let declared_inside = |resolution: Resolution| {
            resolution
                .declaration()
                .is_some_and(|decl| contains(arena, scope_range, decl))
        };

        for &name in added {
            if declared_inside(resolver.resolve_declaration(name, self.body)) {
                return Err(FixError::AlreadyBound(name.to_string()));
            }
        }

        let body_range = node_range(arena, self.body)?;
        let values_range = node_range(arena, values)?;
        for (idx, _) in arena.iter() {
            if !is_reference_identifier(arena, idx) {
                continue;
            }
            let Some(name) = arena.identifier_text(idx) else {
                continue;
            };
            if contains(arena, body_range, idx)
                && added.contains(&name)
                && !declared_inside(resolver.resolve_declaration(name, idx))
            {
                return Err(FixError::CapturesReference(name.to_string()));
            }
            if contains(arena, values_range, idx)
                && (added.contains(&name)
                    || resolver.resolve_declaration(name, idx)
                        != resolver.resolve_declaration(name, self.body))
            {
                return Err(FixError::ValueRebound(name.to_string()));
            }
        }
        Ok(())
    }
}

/// `{ a = 1, b = 2 }`, or `{}` when there is nothing to list.
fn single_line_pattern<I>(properties: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let body = properties.into_iter().collect::<Vec<_>>().join(", ");
    if body.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {body} }}")
    }
}

fn default_entries(defaults: &DefaultMap) -> impl Iterator<Item = String> + '_ {
    defaults.iter().map(|(key, value)| format!("{key} = {value}"))
}

fn element_key<'a>(arena: &'a NodeArena, element: &BindingElementData) -> Option<&'a str> {
    if element.property_name.is_some() {
        member_key_name(arena, element.property_name)
    } else {
        arena.identifier_text(element.name)
    }
}

/// Keys of `defaults` the pattern does not destructure yet.
fn added_keys<'d>(
    arena: &NodeArena,
    pattern: NodeIndex,
    defaults: &'d DefaultMap,
) -> Result<Vec<&'d str>, FixError> {
    let data = arena
        .get_object_binding_pattern(pattern)
        .ok_or(FixError::MissingNode(pattern.0))?;
    let mut present: FxHashSet<&str> = FxHashSet::default();
    for element_idx in data.elements.iter() {
        if let Some(element) = arena.get_binding_element(element_idx) {
            if !element.dot_dot_dot {
                present.extend(element_key(arena, element));
            }
        }
    }
    Ok(defaults
        .keys()
        .map(String::as_str)
        .filter(|key| !present.contains(key))
        .collect())
}

/// Indentation for properties added to a multi-line pattern: that of the
/// first property starting its own line, else one level past the closing
/// brace's line.
fn property_indent(
    arena: &NodeArena,
    line_map: &LineMap,
    elements: impl Iterator<Item = NodeIndex>,
    closing: u32,
) -> String {
    let source = arena.source_text();
    elements
        .filter_map(|element| arena.get(element).map(|node| node.pos))
        .find(|&pos| line_map.is_first_on_line(pos, source))
        .map_or_else(
            || format!("{}{INDENT_UNIT}", line_map.indentation_at(closing, source)),
            |pos| line_map.indentation_at(pos, source).to_string(),
        )
}

/// Kind of the first token at or after `offset`, skipping trivia.
fn next_token(source: &str, offset: u32) -> SyntaxKind {
    let tail = source.get(offset as usize..).unwrap_or_default();
    ScannerState::new(tail.to_string()).scan()
}

/// Give every property the map mentions a default (author defaults win)
/// and add the missing ones after the last property, before any rest
/// element.
fn merge_into_pattern(
    arena: &NodeArena,
    line_map: &LineMap,
    pattern: NodeIndex,
    defaults: &DefaultMap,
) -> Result<Vec<TextEdit>, FixError> {
    let source = arena.source_text();
    let (start, end) = node_range(arena, pattern)?;
    let data = arena
        .get_object_binding_pattern(pattern)
        .ok_or(FixError::MissingNode(pattern.0))?;

    let mut edits = Vec::new();
    let mut present: FxHashSet<&str> = FxHashSet::default();
    let mut last_property = None;
    let mut rest = None;

    for element_idx in data.elements.iter() {
        let element = arena
            .get_binding_element(element_idx)
            .ok_or(FixError::MissingNode(element_idx.0))?;
        if element.dot_dot_dot {
            rest = Some(element_idx);
            continue;
        }
        last_property = Some(element_idx);
        let Some(key) = element_key(arena, element) else {
            continue;
        };
        present.insert(key);
        if element.initializer.is_some() {
            continue;
        }
        if let Some(value) = defaults.get(key) {
            let (_, name_end) = node_range(arena, element.name)?;
            edits.push(TextEdit::insert(name_end, format!(" = {value}")));
        }
    }

    let added: Vec<String> = defaults
        .iter()
        .filter(|(key, _)| !present.contains(key.as_str()))
        .map(|(key, value)| format!("{key} = {value}"))
        .collect();
    if added.is_empty() {
        return Ok(edits);
    }

    let closing = end.saturating_sub(1);
    let multi_line = line_map.line_of(start) != line_map.line_of(closing);
    let indent = || property_indent(arena, line_map, data.elements.iter(), closing);

    let edit = match (rest, last_property) {
        (Some(rest), _) => {
            let (rest_pos, _) = node_range(arena, rest)?;
            let text: String = if multi_line && line_map.is_first_on_line(rest_pos, source) {
                let rest_indent = line_map.indentation_at(rest_pos, source);
                added
                    .iter()
                    .map(|entry| format!("{entry},\n{rest_indent}"))
                    .collect()
            } else {
                format!("{}, ", added.join(", "))
            };
            TextEdit::insert(rest_pos, text)
        }
        (None, Some(last)) => {
            let (_, last_end) = node_range(arena, last)?;
            if !multi_line {
                TextEdit::insert(last_end, format!(", {}", added.join(", ")))
            } else if data.elements.has_trailing_comma
                && line_map.is_first_on_line(closing, source)
            {
                let indent = indent();
                let line_start = line_map
                    .line_start(line_map.line_of(closing))
                    .unwrap_or(closing);
                let text: String = added
                    .iter()
                    .map(|entry| format!("{indent}{entry},\n"))
                    .collect();
                TextEdit::insert(line_start, text)
            } else {
                let indent = indent();
                let text: String = added
                    .iter()
                    .map(|entry| format!(",\n{indent}{entry}"))
                    .collect();
                TextEdit::insert(last_end, text)
            }
        }
        (None, None) => {
            let inner = source.get(start as usize + 1..closing as usize).unwrap_or_default();
            if inner.trim().is_empty() {
                TextEdit::replace(start, end, single_line_pattern(added))
            } else {
                TextEdit::insert(start + 1, format!(" {}", added.join(", ")))
            }
        }
    };
    edits.push(edit);
    Ok(edits)
}

fn synthesize_parameter(
    arena: &NodeArena,
    insertion: ParamInsertion,
    param_referenced: bool,
    defaults: &DefaultMap,
) -> Result<TextEdit, FixError> {
    let pattern = single_line_pattern(default_entries(defaults));
    match insertion {
        ParamInsertion::EmptyParens { at } => Ok(TextEdit::insert(at, pattern)),
        ParamInsertion::Replace { name, bare_arrow } => {
            if param_referenced {
                return Err(FixError::ParameterReferenced(
                    arena.node_text(name).to_string(),
                ));
            }
            let (start, end) = node_range(arena, name)?;
            let text = if bare_arrow {
                format!("({pattern})")
            } else {
                pattern
            };
            Ok(TextEdit::replace(start, end, text))
        }
    }
}

/// Insert `const { ... } = this.props;` as the first statement of `render`.
fn insert_props_destructuring(
    arena: &NodeArena,
    line_map: &LineMap,
    render_body: NodeIndex,
    defaults: &DefaultMap,
) -> Result<TextEdit, FixError> {
    let block = arena
        .get_block(render_body)
        .ok_or(FixError::MissingNode(render_body.0))?;
    let statement = format!(
        "const {} = this.props;",
        single_line_pattern(default_entries(defaults))
    );

    match block.statements.first() {
        Some(first) => {
            let (pos, _) = node_range(arena, first)?;
            let source = arena.source_text();
            let separator = if line_map.is_first_on_line(pos, source) {
                format!("\n{}", line_map.indentation_at(pos, source))
            } else {
                " ".to_string()
            };
            Ok(TextEdit::insert(pos, format!("{statement}{separator}")))
        }
        None => {
            let (start, _) = node_range(arena, render_body)?;
            Ok(TextEdit::insert(start + 1, format!(" {statement} ")))
        }
    }
}

/// Remove the assignment and the `;` that terminates its statement. The
/// `;` stays when the next statement starts with a token that would
/// otherwise continue the previous line.
fn removal_edits(
    arena: &NodeArena,
    assignment: NodeIndex,
) -> Result<SmallVec<[TextEdit; 2]>, FixError> {
    let statement = arena.parent(assignment);
    if !is_statement_expression(arena, assignment) || !is_in_statement_list(arena, statement) {
        return Err(FixError::NotAStatement);
    }
    let (start, end) = node_range(arena, assignment)?;
    let (_, statement_end) = node_range(arena, statement)?;

    let mut edits = SmallVec::new();
    edits.push(TextEdit::remove(start, end));
    let source = arena.source_text();
    let has_semicolon =
        statement_end > end && source.as_bytes().get(statement_end as usize - 1) == Some(&b';');
    if has_semicolon && !continues_previous_line(next_token(source, statement_end)) {
        edits.push(TextEdit::remove(statement_end - 1, statement_end));
    }
    Ok(edits)
}

fn continues_previous_line(token: SyntaxKind) -> bool {
    matches!(
        token,
        SyntaxKind::OpenParenToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::TemplateHead
            | SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::SlashToken
            | SyntaxKind::SlashEqualsToken
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::classify;
    use crate::defaults::extract_defaults;
    use crate::resolver::{BinderResolver, Resolution, ScopeResolver};
    use r19_parser::{NodeKind, parse};

    /// Classify the declaration `Target` resolves to and fix the first
    /// `defaultProps` assignment in `source`.
    fn fix(source: &str) -> Result<String, FixError> {
        let result = parse("t.jsx", source);
        assert!(!result.has_errors(), "{:?}", result.diagnostics);
        let arena = &result.arena;
        let binder = r19_binder::bind(arena, result.root);
        let resolver = BinderResolver::new(arena, &binder);
        let line_map = LineMap::build(source);

        let assignment = arena
            .iter()
            .find(|(_, n)| n.kind() == NodeKind::AssignmentExpression)
            .map(|(i, _)| i)
            .unwrap();
        let assign = arena.get_assignment(assignment).unwrap();
        let object = arena.get_property_access(assign.left).unwrap().expression;
        let name = arena.identifier_text(object).unwrap();
        let Resolution::Declaration(decl) = resolver.resolve_declaration(name, object) else {
            panic!("unresolved {name}");
        };
        let shape = classify(arena, &resolver, decl);
        let defaults = extract_defaults(arena, assign.right).unwrap();
        synthesize_fix(arena, &resolver, &line_map, &shape, &defaults, assignment)
            .map(|fix| fix.apply(source))
    }

    #[test]
    fn author_defaults_are_preserved() {
        let out = fix("function C({ a = 1, b }) {}\nC.defaultProps = { a: 2, b: 3, c: 4 };").unwrap();
        assert_eq!(out, "function C({ a = 1, b = 3, c = 4 }) {}\n");
    }

    #[test]
    fn renamed_and_rest_properties() {
        let out = fix("const C = ({ a: x, ...rest }) => x;\nC.defaultProps = { a: 'A', b: 'B' };").unwrap();
        assert_eq!(out, "const C = ({ a: x = 'A', b = 'B', ...rest }) => x;\n");
    }

    #[test]
    fn multi_line_pattern_layout() {
        let source = "function C({\n  a,\n  b,\n}) {}\nC.defaultProps = { b: 2, c: 3 };";
        let out = fix(source).unwrap();
        assert_eq!(out, "function C({\n  a,\n  b = 2,\n  c = 3,\n}) {}\n");
    }

    #[test]
    fn multi_line_pattern_keeps_rest_last_without_comma() {
        let source = "function C({\n    a,\n    ...rest\n  }) {}\nC.defaultProps = { b: 2 };";
        let out = fix(source).unwrap();
        assert_eq!(out, "function C({\n    a,\n    b = 2,\n    ...rest\n  }) {}\n");
    }

    #[test]
    fn empty_parameter_list() {
        let out = fix("function C() { return null; }\nC.defaultProps = { a: 1, b: 'x' };").unwrap();
        assert_eq!(out, "function C({ a = 1, b = 'x' }) { return null; }\n");
    }

    #[test]
    fn bare_arrow_parameter_gets_parentheses() {
        let out = fix("const C = props => null;\nC.defaultProps = { a: 1 };").unwrap();
        assert_eq!(out, "const C = ({ a = 1 }) => null;\n");
    }

    #[test]
    fn referenced_plain_parameter_is_not_rewritten() {
        let err = fix("function C(props) { return props.a; }\nC.defaultProps = { a: 1 };").unwrap_err();
        assert_eq!(err, FixError::ParameterReferenced("props".to_string()));
    }

    #[test]
    fn shadowed_parameter_name_is_not_a_reference() {
        let out = fix(
            "function C(props) { const f = (props) => props; return f; }\nC.defaultProps = { a: 1 };",
        )
        .unwrap();
        assert_eq!(
            out,
            "function C({ a = 1 }) { const f = (props) => props; return f; }\n"
        );
    }

    #[test]
    fn class_without_destructuring() {
        let source = "class C extends React.Component {\n  render() {\n    return <div>{this.props.a}</div>;\n  }\n}\nC.defaultProps = { a: 1 };";
        let out = fix(source).unwrap();
        assert_eq!(
            out,
            "class C extends React.Component {\n  render() {\n    const { a = 1 } = this.props;\n    return <div>{this.props.a}</div>;\n  }\n}\n"
        );
    }

    #[test]
    fn class_with_existing_destructuring() {
        let source = "class C {\n  render() {\n    const { a, b = 2 } = this.props;\n    return a + b;\n  }\n}\nC.defaultProps = { a: 1, b: 5 };";
        let out = fix(source).unwrap();
        assert_eq!(
            out,
            "class C {\n  render() {\n    const { a = 1, b = 2 } = this.props;\n    return a + b;\n  }\n}\n"
        );
    }

    #[test]
    fn class_with_empty_render() {
        let out = fix("class C { render() {} }\nC.defaultProps = { a: 1 };").unwrap();
        assert_eq!(out, "class C { render() { const { a = 1 } = this.props; } }\n");
    }

    #[test]
    fn missing_semicolon_is_not_removed() {
        let out = fix("function C({ a }) {}\nC.defaultProps = { a: 1 }\nfoo();").unwrap();
        assert_eq!(out, "function C({ a = 1 }) {}\n\nfoo();");
    }

    #[test]
    fn nested_assignment_is_not_fixable() {
        let err = fix("function C({ a }) {}\nexport default (C.defaultProps = { a: 1 });").unwrap_err();
        assert_eq!(err, FixError::NotAStatement);
    }

    #[test]
    fn nested_pattern_is_unrecognized() {
        let err = fix("function C({ a: { b } }) {}\nC.defaultProps = { a: 1 };").unwrap_err();
        assert_eq!(err, FixError::Unrecognized);
    }

    #[test]
    fn sole_body_of_a_statement_is_not_removed() {
        for source in [
            "if (cond) C.defaultProps = { a: 1 };\nfoo();\nfunction C({ a }) { return a; }",
            "if (cond) {} else C.defaultProps = { a: 1 };\nfunction C({ a }) { return a; }",
            "while (cond) C.defaultProps = { a: 1 };\nfunction C({ a }) { return a; }",
            "done: C.defaultProps = { a: 1 };\nfunction C({ a }) { return a; }",
        ] {
            assert_eq!(fix(source).unwrap_err(), FixError::NotAStatement, "{source}");
        }
    }

    #[test]
    fn semicolon_guarding_the_next_line_is_kept() {
        let out = fix("const C = ({ a }) => a\nC.defaultProps = { a: 1 }\n;[1].map(x => x)").unwrap();
        assert_eq!(out, "const C = ({ a = 1 }) => a\n\n;[1].map(x => x)");

        let out = fix("function C({ a }) {}\nC.defaultProps = { a: 1 };\n(init)()").unwrap();
        assert_eq!(out, "function C({ a = 1 }) {}\n;\n(init)()");
    }

    #[test]
    fn existing_local_binding_blocks_the_fix() {
        let cases = [
            "function C() { const a = 5; return a; }\nC.defaultProps = { a: 1 };",
            "function C({ b }) { const a = 5; return a + b; }\nC.defaultProps = { a: 1 };",
            "function C({ x: a }) { return a; }\nC.defaultProps = { a: 1 };",
            "class C { render() { const a = 2; return a; } }\nC.defaultProps = { a: 1 };",
        ];
        for source in cases {
            assert_eq!(
                fix(source).unwrap_err(),
                FixError::AlreadyBound("a".to_string()),
                "{source}"
            );
        }
    }

    #[test]
    fn outer_reference_would_be_captured() {
        let err = fix("const a = 0;\nfunction C() { return a; }\nC.defaultProps = { a: 1 };").unwrap_err();
        assert_eq!(err, FixError::CapturesReference("a".to_string()));

        let out = fix("function C() { return (a) => a; }\nC.defaultProps = { a: 1 };").unwrap();
        assert_eq!(out, "function C({ a = 1 }) { return (a) => a; }\n");
    }

    #[test]
    fn default_values_naming_props_are_rejected() {
        let err = fix("function C({ b }) { return b; }\nC.defaultProps = { a: b };").unwrap_err();
        assert_eq!(err, FixError::ValueRebound("b".to_string()));

        let err = fix("const a = 1;\nfunction C() { return null; }\nC.defaultProps = { a };").unwrap_err();
        assert_eq!(err, FixError::ValueRebound("a".to_string()));

        let out = fix("const DEFAULT = 1;\nfunction C({ a }) { return a; }\nC.defaultProps = { a: DEFAULT };").unwrap();
        assert_eq!(out, "const DEFAULT = 1;\nfunction C({ a = DEFAULT }) { return a; }\n");
    }

    #[test]
    fn comments_inside_the_pattern_survive() {
        let source = "function C({\n  // the name\n  a,\n  b, // trailing\n}) {}\nC.defaultProps = { b: 2 };";
        assert_eq!(
            fix(source).unwrap(),
            "function C({\n  // the name\n  a,\n  b = 2, // trailing\n}) {}\n"
        );

        let source = "function C({\n  a, // first\n  b, // trailing\n}) {}\nC.defaultProps = { c: 3 };";
        assert_eq!(
            fix(source).unwrap(),
            "function C({\n  a, // first\n  b, // trailing\n  c = 3,\n}) {}\n"
        );
    }

    #[test]
    fn added_properties_follow_the_property_indent() {
        let out = fix("function C({ a,\n  b }) {}\nC.defaultProps = { c: 2 };").unwrap();
        assert_eq!(out, "function C({ a,\n  b,\n  c = 2 }) {}\n");
    }

    #[test]
    fn empty_pattern_is_filled() {
        let out = fix("function C({}) {}\nC.defaultProps = { a: 1 };").unwrap();
        assert_eq!(out, "function C({ a = 1 }) {}\n");
    }
}
