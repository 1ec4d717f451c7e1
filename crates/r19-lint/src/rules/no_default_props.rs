//! `no-default-props`: move `Component.defaultProps = { ... }` into
//! default values of the destructured props.

use r19_common::Fix;
use r19_parser::{NodeData, NodeIndex, NodeKind};
use tracing::debug;

use crate::component::classify;
use crate::defaults::extract_defaults;
use crate::fix::synthesize_fix;
use crate::predicates::{is_deprecated_defaults_assignment, static_member_assignment_target};
use crate::resolver::{Resolution, chase_aliases};
use crate::rule::{Report, Rule, RuleContext, RuleMeta, RuleType, Visitor};

pub const MOVE_DEFAULT_PROPS: &str = "moveDefaultProps";

pub static META: RuleMeta = RuleMeta {
    name: "no-default-props",
    rule_type: RuleType::Suggestion,
    description: "Move defaultProps to default function parameters in destructured props",
    url: Some(
        "https://react.dev/blog/2024/04/25/react-19-upgrade-guide#removed-proptypes-and-defaultprops",
    ),
    fixable: true,
    has_suggestions: false,
    messages: &[(
        MOVE_DEFAULT_PROPS,
        "Move defaultProps of '{0}' to default parameters in the destructured props.",
    )],
};

pub static RULE: Rule = Rule {
    meta: &META,
    visitors: &[Visitor::enter(NodeKind::AssignmentExpression, check_assignment)],
};

fn check_assignment(ctx: &mut RuleContext<'_>, node: NodeIndex) {
    let arena = ctx.arena;
    if !is_deprecated_defaults_assignment(arena, node) {
        return;
    }
    let Some((object, name)) = static_member_assignment_target(arena, node, "defaultProps") else {
        return;
    };

    let resolver = ctx.resolver();
    let trace = chase_aliases(&resolver, arena, name, object);
    let mut report = Report::new(node, MOVE_DEFAULT_PROPS).arg(name);

    let Resolution::Declaration(declaration) = trace.direct else {
        debug!(component = name, "no declaration in scope; reporting without fix");
        ctx.report(report);
        return;
    };

    if trace.is_aliased() {
        if let Resolution::Declaration(origin) = trace.target {
            let origin_name = declared_name(ctx, origin);
            report = report.related(origin, format!("'{name}' is an alias of '{origin_name}'."));
        }
        debug!(component = name, hops = trace.hops, "aliased component; fix withheld");
        ctx.report(report);
        return;
    }

    let fix = build_fix(ctx, node, declaration, name);
    ctx.report(report.fix(fix));
}

fn build_fix(
    ctx: &RuleContext<'_>,
    assignment: NodeIndex,
    declaration: NodeIndex,
    name: &str,
) -> Option<Fix> {
    let arena = ctx.arena;
    let resolver = ctx.resolver();
    let shape = classify(arena, &resolver, declaration);
    if !shape.is_fixable() {
        debug!(component = name, ?shape, "unrecognized component shape");
        return None;
    }

    let right = arena.get_assignment(assignment)?.right;
    let defaults = match extract_defaults(arena, right) {
        Ok(defaults) => defaults,
        Err(err) => {
            debug!(component = name, %err, "defaults not extractable");
            return None;
        }
    };

    match synthesize_fix(arena, &resolver, ctx.line_map, &shape, &defaults, assignment) {
        Ok(fix) => Some(fix),
        Err(err) => {
            debug!(component = name, %err, "no fix");
            None
        }
    }
}

/// Name bound by a declaration node, for messages.
fn declared_name(ctx: &RuleContext<'_>, declaration: NodeIndex) -> String {
    let arena = ctx.arena;
    let name_node = match arena.data(declaration) {
        Some(NodeData::VariableDeclaration(decl)) => decl.name,
        Some(NodeData::ImportSpecifier(spec)) => spec.local,
        Some(NodeData::Parameter(param)) => param.name,
        _ => arena
            .get_function(declaration)
            .map(|func| func.name)
            .or_else(|| arena.get_class(declaration).map(|class| class.name))
            .unwrap_or(NodeIndex::NONE),
    };
    arena
        .identifier_text(name_node)
        .map_or_else(|| arena.node_text(declaration).to_string(), str::to_string)
}
