//! Rule objects, visitor tables and the per-rule reporting context.

use r19_binder::BinderState;
use r19_common::{
    Diagnostic, DiagnosticCategory, Fix, LineMap, display_name_from_path, format_message,
};
use r19_parser::{NodeArena, NodeData, NodeIndex, NodeKind};
use rustc_hash::FxHashSet;
use serde::Serialize;
use tracing::debug;

use crate::resolver::BinderResolver;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleType {
    Problem,
    Suggestion,
}

/// Static description of a rule. Rules take no options.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleMeta {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<&'static str>,
    pub fixable: bool,
    pub has_suggestions: bool,
    /// `(message id, template)` pairs; templates use `{0}` placeholders.
    pub messages: &'static [(&'static str, &'static str)],
}

impl RuleMeta {
    pub fn message(&self, id: &str) -> Option<&'static str> {
        self.messages
            .iter()
            .find(|(message_id, _)| *message_id == id)
            .map(|(_, template)| *template)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Enter,
    Exit,
}

pub type VisitFn = fn(&mut RuleContext<'_>, NodeIndex);

#[derive(Clone, Copy)]
pub struct Visitor {
    pub kind: NodeKind,
    pub phase: Phase,
    pub visit: VisitFn,
}

impl Visitor {
    pub const fn enter(kind: NodeKind, visit: VisitFn) -> Self {
        Visitor {
            kind,
            phase: Phase::Enter,
            visit,
        }
    }

    pub const fn exit(kind: NodeKind, visit: VisitFn) -> Self {
        Visitor {
            kind,
            phase: Phase::Exit,
            visit,
        }
    }
}

pub struct Rule {
    pub meta: &'static RuleMeta,
    pub visitors: &'static [Visitor],
}

impl Rule {
    pub fn name(&self) -> &'static str {
        self.meta.name
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.meta.name).finish()
    }
}

/// A finding a rule hands to [`RuleContext::report`].
#[derive(Debug)]
pub struct Report {
    pub node: NodeIndex,
    pub message_id: &'static str,
    pub args: Vec<String>,
    pub fix: Option<Fix>,
    /// `(node, message)` pairs pointing at related declarations.
    pub related: Vec<(NodeIndex, String)>,
}

impl Report {
    pub fn new(node: NodeIndex, message_id: &'static str) -> Self {
        Report {
            node,
            message_id,
            args: Vec::new(),
            fix: None,
            related: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn fix(mut self, fix: Option<Fix>) -> Self {
        self.fix = fix;
        self
    }

    #[must_use]
    pub fn related(mut self, node: NodeIndex, message: impl Into<String>) -> Self {
        self.related.push((node, message.into()));
        self
    }
}

/// Everything a rule sees while visiting one file.
pub struct RuleContext<'a> {
    pub arena: &'a NodeArena,
    pub binder: &'a BinderState,
    pub line_map: &'a LineMap,
    file_name: &'a str,
    rule: &'static Rule,
    category: DiagnosticCategory,
    reported: FxHashSet<u32>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        rule: &'static Rule,
        category: DiagnosticCategory,
        file_name: &'a str,
        arena: &'a NodeArena,
        binder: &'a BinderState,
        line_map: &'a LineMap,
    ) -> Self {
        RuleContext {
            arena,
            binder,
            line_map,
            file_name,
            rule,
            category,
            reported: FxHashSet::default(),
            diagnostics: Vec::new(),
        }
    }

    pub fn rule(&self) -> &'static Rule {
        self.rule
    }

    pub fn file_name(&self) -> &str {
        self.file_name
    }

    pub fn source(&self) -> &'a str {
        self.arena.source_text()
    }

    pub fn resolver(&self) -> BinderResolver<'a> {
        BinderResolver::new(self.arena, self.binder)
    }

    /// Display name derived from the file path, for anonymous components.
    pub fn display_name(&self) -> String {
        display_name_from_path(self.file_name).unwrap_or_else(|| "Component".to_string())
    }

    /// Name of a class: its own name, the variable it initializes, or the
    /// file's display name.
    pub fn class_name(&self, class: NodeIndex) -> String {
        let arena = self.arena;
        if let Some(name) = arena
            .get_class(class)
            .and_then(|data| arena.identifier_text(data.name))
        {
            return name.to_string();
        }
        match arena.data(arena.parent(class)) {
            Some(NodeData::VariableDeclaration(decl))
                if arena.skip_parentheses(decl.initializer) == class =>
            {
                arena
                    .identifier_text(decl.name)
                    .map_or_else(|| self.display_name(), str::to_string)
            }
            _ => self.display_name(),
        }
    }

    /// Report a finding. A node is reported at most once per rule; later
    /// reports for the same node are dropped.
    pub fn report(&mut self, report: Report) -> bool {
        if !self.reported.insert(report.node.0) {
            debug!(
                rule = self.rule.name(),
                node = report.node.0,
                "duplicate report dropped"
            );
            return false;
        }
        let Some(node) = self.arena.get(report.node) else {
            return false;
        };
        let Some(template) = self.rule.meta.message(report.message_id) else {
            debug!(
                rule = self.rule.name(),
                message_id = report.message_id,
                "unknown message id"
            );
            return false;
        };

        let args: Vec<&str> = report.args.iter().map(String::as_str).collect();
        let message = format_message(template, &args);
        let mut diagnostic = Diagnostic::new(
            self.file_name,
            node.pos,
            node.end - node.pos,
            self.category,
            self.rule.name(),
            report.message_id,
            message,
        )
        .with_args(report.args)
        .with_fix(report.fix);

        for (related, text) in report.related {
            if let Some(related_node) = self.arena.get(related) {
                diagnostic = diagnostic.with_related(
                    self.file_name,
                    related_node.pos,
                    related_node.end - related_node.pos,
                    text,
                );
            }
        }
        self.diagnostics.push(diagnostic);
        true
    }

    /// Diagnostics reported since the last call.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}
