//! Tests for the traversal and fix driver.

use r19_common::DiagnosticCategory;
use r19_lint::rule::Report;
use r19_lint::rules::{no_default_props, no_string_refs};
use r19_lint::{LintConfig, Linter, Rule, RuleContext, RuleMeta, RuleType, Visitor};
use r19_parser::{NodeIndex, NodeKind};

static PANICKY_META: RuleMeta = RuleMeta {
    name: "panicky",
    rule_type: RuleType::Problem,
    description: "Panics on `boom`, reports `ok`",
    url: None,
    fixable: false,
    has_suggestions: false,
    messages: &[("found", "found '{0}'")],
};

static PANICKY: Rule = Rule {
    meta: &PANICKY_META,
    visitors: &[Visitor::enter(NodeKind::Identifier, visit_identifier)],
};

fn visit_identifier(ctx: &mut RuleContext<'_>, node: NodeIndex) {
    match ctx.arena.identifier_text(node) {
        Some("boom") => panic!("boom"),
        Some("ok") => {
            ctx.report(Report::new(node, "found").arg("ok"));
        }
        _ => {}
    }
}

static ORDER_META: RuleMeta = RuleMeta {
    name: "order",
    rule_type: RuleType::Problem,
    description: "Reports every class on enter and exit",
    url: None,
    fixable: false,
    has_suggestions: false,
    messages: &[("enter", "enter"), ("exit", "exit")],
};

static ORDER: Rule = Rule {
    meta: &ORDER_META,
    visitors: &[
        Visitor::exit(NodeKind::ClassDeclaration, visit_exit),
        Visitor::enter(NodeKind::Identifier, visit_enter),
    ],
};

fn visit_enter(ctx: &mut RuleContext<'_>, node: NodeIndex) {
    ctx.report(Report::new(node, "enter"));
}

fn visit_exit(ctx: &mut RuleContext<'_>, node: NodeIndex) {
    ctx.report(Report::new(node, "exit"));
}

#[test]
fn test_parse_errors_skip_rules() {
    let result = Linter::all().lint_source("broken.jsx", "const = ;\nFoo.propTypes = {};");
    assert!(result.parse_failed);
    assert!(!result.diagnostics.is_empty());
    assert!(
        result
            .diagnostics
            .iter()
            .all(|d| d.rule_id == "parse-error" && d.is_error())
    );
}

#[test]
fn test_fix_source_leaves_unparsable_input_alone() {
    let source = "function C({ a }) {\nC.defaultProps = { a: 1 };";
    let outcome = Linter::all().fix_source("broken.jsx", source);
    assert_eq!(outcome.output, source);
    assert!(!outcome.fixed);
    assert_eq!(outcome.passes, 0);
}

#[test]
fn test_diagnostics_follow_traversal_order() {
    let source = "import PropTypes from 'prop-types';\nfunction Foo({ a }) { return <div ref=\"x\">{a}</div>; }\nFoo.propTypes = { a: PropTypes.string };\nFoo.defaultProps = { a: 1 };";
    let result = Linter::all().lint_source("Foo.jsx", source);
    let rules: Vec<&str> = result.diagnostics.iter().map(|d| d.rule_id.as_str()).collect();
    assert_eq!(
        rules,
        vec!["no-prop-types", "no-string-refs", "no-prop-types", "no-default-props"]
    );
    assert_eq!(result.error_count(), 4);
    assert_eq!(result.fixable_count(), 1);
}

#[test]
fn test_exit_visitors_run_after_children() {
    let linter = Linter::with_rules(vec![(&ORDER, DiagnosticCategory::Warning)]);
    let result = linter.lint_source("test.js", "class A { m() { b; } }\nc;");
    let ids: Vec<&str> = result.diagnostics.iter().map(|d| d.message_id.as_str()).collect();
    assert_eq!(ids, vec!["enter", "enter", "enter", "exit", "enter"]);
    assert_eq!(result.warning_count(), 5);
}

#[test]
fn test_rule_panic_is_contained() {
    let linter = Linter::with_rules(vec![
        (&PANICKY, DiagnosticCategory::Error),
        (&no_string_refs::RULE, DiagnosticCategory::Error),
    ]);
    let result = linter.lint_source("test.jsx", "boom;\nok;\nconst el = <div ref=\"x\" />;");
    assert!(!result.parse_failed);
    let rules: Vec<&str> = result.diagnostics.iter().map(|d| d.rule_id.as_str()).collect();
    assert_eq!(rules, vec!["panicky", "no-string-refs"]);
    assert_eq!(result.diagnostics[0].message_text, "found 'ok'");
}

#[test]
fn test_config_severity_sets_category() {
    let config = LintConfig::from_json_str(
        r#"{ "rules": { "no-string-refs": "warn", "no-default-props": "off" } }"#,
    )
    .unwrap();
    let linter = Linter::new(&config);
    assert!(linter.rules().all(|rule| rule.name() != "no-default-props"));

    let result = linter.lint_source(
        "test.jsx",
        "function C({ a }) { return <i ref=\"r\" />; }\nC.defaultProps = { a: 1 };",
    );
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].category, DiagnosticCategory::Warning);
    assert_eq!(result.warning_count(), 1);
    assert_eq!(result.error_count(), 0);
}

#[test]
fn test_clean_source_needs_no_pass() {
    let source = "function C({ a = 1 }) { return a; }\n";
    let outcome = Linter::with_rules(vec![(&no_default_props::RULE, DiagnosticCategory::Error)])
        .fix_source("test.jsx", source);
    assert!(!outcome.fixed);
    assert_eq!(outcome.passes, 0);
    assert_eq!(outcome.output, source);
}

#[test]
fn test_unfixed_diagnostics_remain_after_fixing() {
    let source = "function A({ a }) { return a; }\nA.defaultProps = { a: 1 };\nFoo.propTypes = {};";
    let outcome = Linter::all().fix_source("test.jsx", source);
    assert_eq!(outcome.passes, 1);
    assert_eq!(outcome.output, "function A({ a = 1 }) { return a; }\n\nFoo.propTypes = {};");
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.diagnostics[0].rule_id, "no-prop-types");
}
