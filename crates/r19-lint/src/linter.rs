//! Traversal and fix driver.
//!
//! One depth-first walk per file dispatches every enabled rule's visitors
//! by node kind and phase. `fix_source` re-lints and applies the
//! non-overlapping fixes of each pass until nothing is left to fix.

use std::panic::{AssertUnwindSafe, catch_unwind};

use r19_binder::bind;
use r19_common::limits::MAX_FIX_PASSES;
use r19_common::{Diagnostic, DiagnosticCategory, Fix, LineMap, apply_fixes};
use r19_parser::{NodeIndex, NodeKind, parse};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, error, info_span};

use crate::config::LintConfig;
use crate::registry;
use crate::rule::{Phase, Rule, RuleContext, VisitFn};

/// Outcome of linting one file.
#[derive(Clone, Debug, Default)]
pub struct LintResult {
    /// Diagnostics in traversal order.
    pub diagnostics: Vec<Diagnostic>,
    /// The file did not parse; `diagnostics` holds the syntax errors only.
    pub parse_failed: bool,
}

impl LintResult {
    pub fn error_count(&self) -> usize {
        self.count(DiagnosticCategory::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(DiagnosticCategory::Warning)
    }

    pub fn fixable_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.fix.is_some()).count()
    }

    fn count(&self, category: DiagnosticCategory) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.category == category)
            .count()
    }
}

/// Outcome of [`Linter::fix_source`].
#[derive(Clone, Debug)]
pub struct FixOutcome {
    pub output: String,
    /// At least one fix was applied.
    pub fixed: bool,
    /// Number of passes that applied fixes.
    pub passes: usize,
    /// Diagnostics remaining in `output`.
    pub diagnostics: Vec<Diagnostic>,
}

type Dispatch = FxHashMap<(NodeKind, Phase), SmallVec<[(usize, VisitFn); 4]>>;

pub struct Linter {
    rules: Vec<(&'static Rule, DiagnosticCategory)>,
    dispatch: Dispatch,
}

impl Linter {
    pub fn new(config: &LintConfig) -> Self {
        Self::with_rules(config.enabled_rules())
    }

    /// Every registered rule at `error`.
    pub fn all() -> Self {
        Self::with_rules(
            registry::all_rules()
                .iter()
                .map(|rule| (*rule, DiagnosticCategory::Error))
                .collect(),
        )
    }

    pub fn with_rules(rules: Vec<(&'static Rule, DiagnosticCategory)>) -> Self {
        let mut dispatch = Dispatch::default();
        for (rule_index, (rule, _)) in rules.iter().enumerate() {
            for visitor in rule.visitors {
                dispatch
                    .entry((visitor.kind, visitor.phase))
                    .or_default()
                    .push((rule_index, visitor.visit));
            }
        }
        Linter { rules, dispatch }
    }

    pub fn rules(&self) -> impl Iterator<Item = &'static Rule> + '_ {
        self.rules.iter().map(|(rule, _)| *rule)
    }

    pub fn lint_source(&self, file_name: &str, source: &str) -> LintResult {
        let _span = info_span!("lint_file", file = file_name).entered();

        let parsed = parse(file_name, source);
        if parsed.has_errors() {
            debug!(
                errors = parsed.diagnostics.len(),
                "parse failed, rules skipped"
            );
            let diagnostics = parsed
                .diagnostics
                .iter()
                .map(|d| Diagnostic::parse_error(file_name, d.start, d.length, &d.message))
                .collect();
            return LintResult {
                diagnostics,
                parse_failed: true,
            };
        }

        let arena = &parsed.arena;
        let binder = bind(arena, parsed.root);
        let line_map = LineMap::build(source);
        let mut contexts: Vec<RuleContext<'_>> = self
            .rules
            .iter()
            .map(|&(rule, category)| {
                RuleContext::new(rule, category, file_name, arena, &binder, &line_map)
            })
            .collect();

        let mut diagnostics = Vec::new();
        let mut stack: Vec<(NodeIndex, Phase)> = vec![(parsed.root, Phase::Enter)];
        while let Some((idx, phase)) = stack.pop() {
            let Some(node) = arena.get(idx) else {
                continue;
            };
            if let Some(visitors) = self.dispatch.get(&(node.kind(), phase)) {
                for &(rule_index, visit) in visitors {
                    let ctx = &mut contexts[rule_index];
                    run_visitor(ctx, visit, idx);
                    diagnostics.extend(ctx.take_diagnostics());
                }
            }
            if phase == Phase::Enter {
                stack.push((idx, Phase::Exit));
                let children = arena.children(idx);
                stack.extend(children.iter().rev().map(|&child| (child, Phase::Enter)));
            }
        }

        debug!(diagnostics = diagnostics.len(), "lint finished");
        LintResult {
            diagnostics,
            parse_failed: false,
        }
    }

    /// Lint and fix repeatedly, at most `MAX_FIX_PASSES` times.
    pub fn fix_source(&self, file_name: &str, source: &str) -> FixOutcome {
        let mut text = source.to_string();
        let mut passes = 0;
        loop {
            let result = self.lint_source(file_name, &text);
            let fixes: Vec<&Fix> = result
                .diagnostics
                .iter()
                .filter_map(|d| d.fix.as_ref())
                .collect();
            if fixes.is_empty() || passes == MAX_FIX_PASSES {
                return FixOutcome {
                    output: text,
                    fixed: passes > 0,
                    passes,
                    diagnostics: result.diagnostics,
                };
            }

            let (next, applied) = apply_fixes(&text, &fixes);
            debug!(
                file = file_name,
                pass = passes + 1,
                applied = applied.len(),
                deferred = fixes.len() - applied.len(),
                "applied fixes"
            );
            if next == text {
                return FixOutcome {
                    output: text,
                    fixed: passes > 0,
                    passes,
                    diagnostics: result.diagnostics,
                };
            }
            text = next;
            passes += 1;
        }
    }
}

fn run_visitor(ctx: &mut RuleContext<'_>, visit: VisitFn, idx: NodeIndex) {
    let outcome = catch_unwind(AssertUnwindSafe(|| visit(ctx, idx)));
    if outcome.is_err() {
        error!(
            rule = ctx.rule().name(),
            file = ctx.file_name(),
            node = idx.0,
            "rule panicked; continuing with the next node"
        );
    }
}
