//! `no-prop-types`: `propTypes` declarations and `prop-types` imports.

use r19_parser::{NodeData, NodeIndex, NodeKind};

use crate::predicates::{
    is_require_call, member_key_name, starts_with_uppercase, static_member_assignment_target,
};
use crate::rule::{Report, Rule, RuleContext, RuleMeta, RuleType, Visitor};
use crate::selector::{all, field, kind, module_specifier, string_value};

pub const PROP_TYPES_DISALLOWED: &str = "propTypesDisallowed";
pub const NO_PROP_TYPES_IMPORT: &str = "noPropTypesImport";

const PROP_TYPES_MODULE: &str = "prop-types";

pub static META: RuleMeta = RuleMeta {
    name: "no-prop-types",
    rule_type: RuleType::Problem,
    description: "Disallow the use of propTypes in React components",
    url: Some(
        "https://react.dev/blog/2024/04/25/react-19-upgrade-guide#removed-proptypes-and-defaultprops",
    ),
    fixable: false,
    has_suggestions: false,
    messages: &[
        (
            PROP_TYPES_DISALLOWED,
            "'propTypes' should not be used in '{0}' as they are no longer supported in React 19.",
        ),
        (
            NO_PROP_TYPES_IMPORT,
            "'prop-types' should not be imported as propTypes are no longer supported in React 19.",
        ),
    ],
};

pub static RULE: Rule = Rule {
    meta: &META,
    visitors: &[
        Visitor::enter(NodeKind::AssignmentExpression, check_assignment),
        Visitor::enter(NodeKind::PropertyDeclaration, check_class_property),
        Visitor::enter(NodeKind::ImportDeclaration, check_import),
        Visitor::enter(NodeKind::CallExpression, check_require),
    ],
};

fn check_assignment(ctx: &mut RuleContext<'_>, node: NodeIndex) {
    let Some((_, name)) = static_member_assignment_target(ctx.arena, node, "propTypes") else {
        return;
    };
    if starts_with_uppercase(name) {
        ctx.report(Report::new(node, PROP_TYPES_DISALLOWED).arg(name));
    }
}

/// `static propTypes = { ... }`
fn check_class_property(ctx: &mut RuleContext<'_>, node: NodeIndex) {
    let arena = ctx.arena;
    let Some(NodeData::PropertyDeclaration(prop)) = arena.data(node) else {
        return;
    };
    if prop.is_static && member_key_name(arena, prop.name) == Some("propTypes") {
        let class_name = ctx.class_name(arena.parent(node));
        ctx.report(Report::new(node, PROP_TYPES_DISALLOWED).arg(class_name));
    }
}

fn check_import(ctx: &mut RuleContext<'_>, node: NodeIndex) {
    let from_prop_types = all(
        kind(NodeKind::ImportDeclaration),
        field(module_specifier, string_value(PROP_TYPES_MODULE)),
    );
    if from_prop_types(ctx.arena, node) {
        ctx.report(Report::new(node, NO_PROP_TYPES_IMPORT));
    }
}

fn check_require(ctx: &mut RuleContext<'_>, node: NodeIndex) {
    if is_require_call(ctx.arena, node, PROP_TYPES_MODULE) {
        ctx.report(Report::new(node, NO_PROP_TYPES_IMPORT));
    }
}
