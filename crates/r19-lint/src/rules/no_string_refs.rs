//! `no-string-refs`: `ref="name"` and its `{'name'}` / `` {`name`} ``
//! spellings.

use r19_parser::{NodeIndex, NodeKind};

use crate::rule::{Report, Rule, RuleContext, RuleMeta, RuleType, Visitor};
use crate::selector::{
    all, any, attribute_name, attribute_value, field, identifier_named, jsx_expression_inner,
    kind, string_like,
};

pub const NO_STRING_REFS: &str = "noStringRefs";

pub static META: RuleMeta = RuleMeta {
    name: "no-string-refs",
    rule_type: RuleType::Problem,
    description: "Disallow the use of string refs in React components",
    url: Some("https://react.dev/blog/2024/04/25/react-19-upgrade-guide#removed-string-refs"),
    fixable: false,
    has_suggestions: false,
    messages: &[(
        NO_STRING_REFS,
        "String refs are deprecated and will be removed in React 19. Use callback refs instead.",
    )],
};

pub static RULE: Rule = Rule {
    meta: &META,
    visitors: &[Visitor::enter(NodeKind::JsxAttribute, check_attribute)],
};

fn check_attribute(ctx: &mut RuleContext<'_>, node: NodeIndex) {
    let string_ref = all(
        all(
            kind(NodeKind::JsxAttribute),
            field(attribute_name, identifier_named("ref")),
        ),
        field(
            attribute_value,
            any(string_like(), field(jsx_expression_inner, string_like())),
        ),
    );
    if string_ref(ctx.arena, node) {
        ctx.report(Report::new(node, NO_STRING_REFS));
    }
}
