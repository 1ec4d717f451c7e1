//! Extraction of `defaultProps` object literals.

use indexmap::IndexMap;
use r19_parser::{NodeArena, NodeData, NodeIndex};
use thiserror::Error;

use crate::predicates::{is_valid_binding_name, member_key_name};

/// Property name -> verbatim source text of its value, in first-occurrence
/// order. A repeated key keeps its first position and takes the last value.
pub type DefaultMap = IndexMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("expected an object literal")]
    NotAnObjectLiteral,

    #[error("spread elements cannot be moved into parameter defaults")]
    Spread,

    #[error("computed property keys cannot be moved into parameter defaults")]
    ComputedKey,

    #[error("'{0}' is a method or accessor")]
    Method(String),

    #[error("'{0}' is not a valid binding name")]
    InvalidName(String),
}

/// Extract the defaults map from an object literal (parentheses allowed).
pub fn extract_defaults(arena: &NodeArena, object_literal: NodeIndex) -> Result<DefaultMap, ExtractError> {
    let object_literal = arena.skip_parentheses(object_literal);
    let object = arena
        .get_object_literal(object_literal)
        .ok_or(ExtractError::NotAnObjectLiteral)?;

    let mut defaults = DefaultMap::with_capacity(object.elements.len());
    for element in object.elements.iter() {
        let (key, value) = match arena.data(element) {
            Some(NodeData::PropertyAssignment(prop)) => {
                (property_key(arena, prop.name)?, arena.node_text(prop.initializer))
            }
            Some(NodeData::ShorthandPropertyAssignment(prop)) => {
                let name = property_key(arena, prop.name)?;
                (name, arena.node_text(prop.name))
            }
            Some(NodeData::SpreadAssignment(_)) => return Err(ExtractError::Spread),
            Some(NodeData::MethodDeclaration(method)) => {
                let name = arena.node_text(method.name).to_string();
                return Err(ExtractError::Method(name));
            }
            _ => return Err(ExtractError::NotAnObjectLiteral),
        };
        defaults.insert(key, value.to_string());
    }
    Ok(defaults)
}

fn property_key(arena: &NodeArena, key: NodeIndex) -> Result<String, ExtractError> {
    if let Some(NodeData::ComputedPropertyName(_)) = arena.data(key) {
        return Err(ExtractError::ComputedKey);
    }
    match member_key_name(arena, key) {
        Some(name) if is_valid_binding_name(name) => Ok(name.to_string()),
        _ => Err(ExtractError::InvalidName(arena.node_text(key).to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use r19_parser::{NodeKind, parse};

    fn extract(source: &str) -> Result<DefaultMap, ExtractError> {
        let result = parse("t.js", source);
        assert!(!result.has_errors(), "{:?}", result.diagnostics);
        let object = result
            .arena
            .iter()
            .find(|(_, n)| n.kind() == NodeKind::ObjectLiteralExpression)
            .map(|(i, _)| i)
            .unwrap();
        extract_defaults(&result.arena, object)
    }

    #[test]
    fn values_are_verbatim_and_ordered() {
        let map = extract("X.defaultProps = { b: f(1,  2), 'a': `t${x}`, c, d: { e: [1] } };").unwrap();
        let entries: Vec<(&str, &str)> = map.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(
            entries,
            vec![("b", "f(1,  2)"), ("a", "`t${x}`"), ("c", "c"), ("d", "{ e: [1] }")]
        );
    }

    #[test]
    fn duplicate_key_keeps_first_position_last_value() {
        let map = extract("X.defaultProps = { a: 1, b: 2, a: 3 };").unwrap();
        let entries: Vec<(&str, &str)> = map.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(entries, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn unextractable_members() {
        assert_eq!(extract("X.defaultProps = { ...base };"), Err(ExtractError::Spread));
        assert_eq!(extract("X.defaultProps = { [k]: 1 };"), Err(ExtractError::ComputedKey));
        assert_eq!(
            extract("X.defaultProps = { f() {} };"),
            Err(ExtractError::Method("f".to_string()))
        );
        assert_eq!(
            extract("X.defaultProps = { 'aria-label': 'x' };"),
            Err(ExtractError::InvalidName("'aria-label'".to_string()))
        );
        assert_eq!(
            extract("X.defaultProps = { 1: 'x' };"),
            Err(ExtractError::InvalidName("1".to_string()))
        );
    }
}
