//! Rule lookup by name.

use crate::rule::Rule;
use crate::rules::{no_default_props, no_factories, no_legacy_context, no_prop_types, no_string_refs};

static RULES: [&Rule; 5] = [
    &no_default_props::RULE,
    &no_prop_types::RULE,
    &no_legacy_context::RULE,
    &no_string_refs::RULE,
    &no_factories::RULE,
];

/// Older names still accepted in configuration.
static ALIASES: [(&str, &str); 2] = [
    ("no-defaultprops", "no-default-props"),
    ("no-proptypes", "no-prop-types"),
];

/// Every rule, in registration order.
pub fn all_rules() -> &'static [&'static Rule] {
    &RULES
}

/// Canonical rule names, in registration order.
pub fn rule_names() -> impl Iterator<Item = &'static str> {
    RULES.iter().map(|rule| rule.name())
}

/// Map a rule name or alias to its canonical name.
pub fn canonical_name(name: &str) -> Option<&'static str> {
    if let Some(rule) = RULES.iter().find(|rule| rule.name() == name) {
        return Some(rule.name());
    }
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, canonical)| *canonical)
}

pub fn get_rule(name: &str) -> Option<&'static Rule> {
    let canonical = canonical_name(name)?;
    RULES.iter().copied().find(|rule| rule.name() == canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_to_the_same_rule() {
        let by_alias = get_rule("no-defaultprops").unwrap();
        let by_name = get_rule("no-default-props").unwrap();
        assert!(std::ptr::eq(by_alias, by_name));
        assert_eq!(get_rule("no-proptypes").unwrap().name(), "no-prop-types");
    }

    #[test]
    fn unknown_names() {
        assert!(get_rule("no-such-rule").is_none());
        assert_eq!(canonical_name("No-Default-Props"), None);
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<&str> = rule_names().collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), all_rules().len());
    }
}
