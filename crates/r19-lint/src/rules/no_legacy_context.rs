//! `no-legacy-context`: `contextTypes`, `childContextTypes` and
//! `getChildContext`.

use r19_parser::parser::node::MethodKind;
use r19_parser::{NodeData, NodeIndex, NodeKind};

use crate::predicates::{member_key_name, starts_with_uppercase, static_member_assignment_target};
use crate::rule::{Report, Rule, RuleContext, RuleMeta, RuleType, Visitor};

pub const NO_LEGACY_CONTEXT: &str = "noLegacyContext";
pub const NO_LEGACY_CONTEXT_TYPES: &str = "noLegacyContextTypes";

const CONTEXT_TYPE_MEMBERS: [&str; 2] = ["contextTypes", "childContextTypes"];

pub static META: RuleMeta = RuleMeta {
    name: "no-legacy-context",
    rule_type: RuleType::Problem,
    description: "Disallow the use of legacy context APIs in React components",
    url: Some(
        "https://react.dev/blog/2024/04/25/react-19-upgrade-guide#removed-removing-legacy-context",
    ),
    fixable: false,
    has_suggestions: true,
    messages: &[
        (
            NO_LEGACY_CONTEXT,
            "'{0}' uses a legacy context API that is no longer supported in React 19. Use 'React.createContext()' instead.",
        ),
        (
            NO_LEGACY_CONTEXT_TYPES,
            "'{0}' uses a legacy contextTypes API that is no longer supported in React 19. Use 'contextType' instead.",
        ),
    ],
};

pub static RULE: Rule = Rule {
    meta: &META,
    visitors: &[
        Visitor::exit(NodeKind::ClassDeclaration, check_class),
        Visitor::exit(NodeKind::ClassExpression, check_class),
        Visitor::enter(NodeKind::AssignmentExpression, check_assignment),
    ],
};

fn check_class(ctx: &mut RuleContext<'_>, node: NodeIndex) {
    let arena = ctx.arena;
    let Some(class) = arena.get_class(node) else {
        return;
    };
    let class_name = ctx.class_name(node);

    for member in class.members.iter() {
        match arena.data(member) {
            Some(NodeData::PropertyDeclaration(prop))
                if member_key_name(arena, prop.name)
                    .is_some_and(|name| CONTEXT_TYPE_MEMBERS.contains(&name)) =>
            {
                ctx.report(Report::new(member, NO_LEGACY_CONTEXT_TYPES).arg(class_name.as_str()));
            }
            Some(NodeData::MethodDeclaration(method))
                if method.kind == MethodKind::Method
                    && member_key_name(arena, method.name) == Some("getChildContext") =>
            {
                ctx.report(Report::new(member, NO_LEGACY_CONTEXT).arg(class_name.as_str()));
            }
            _ => {}
        }
    }
}

/// `Component.contextTypes = ...` / `Component.childContextTypes = ...`
fn check_assignment(ctx: &mut RuleContext<'_>, node: NodeIndex) {
    let target = CONTEXT_TYPE_MEMBERS
        .iter()
        .find_map(|member| static_member_assignment_target(ctx.arena, node, member));
    if let Some((_, name)) = target {
        if starts_with_uppercase(name) {
            ctx.report(Report::new(node, NO_LEGACY_CONTEXT_TYPES).arg(name));
        }
    }
}
