//! Diagnostic types shared by the parser, the rules and the reporters.

use serde::Serialize;

use crate::fix::Fix;

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

/// Related information for a diagnostic (e.g., where an alias points to).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticRelatedInformation {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
}

/// A reported finding: location, message and an optional fix.
///
/// A diagnostic is created once per matched node and is not mutated after
/// it has been handed to the reporter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub category: DiagnosticCategory,
    /// Rule that produced the diagnostic (`parse-error` for syntax errors).
    pub rule_id: String,
    pub message_id: String,
    pub message_text: String,
    /// Interpolation arguments used to build `message_text`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,
    /// Related information spans (e.g., the declaration an alias resolves to)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_information: Vec<DiagnosticRelatedInformation>,
}

impl Diagnostic {
    /// Create a new diagnostic without a fix.
    #[must_use]
    pub fn new(
        file: impl Into<String>,
        start: u32,
        length: u32,
        category: DiagnosticCategory,
        rule_id: impl Into<String>,
        message_id: impl Into<String>,
        message_text: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            start,
            length,
            category,
            rule_id: rule_id.into(),
            message_id: message_id.into(),
            message_text: message_text.into(),
            args: Vec::new(),
            fix: None,
            related_information: Vec::new(),
        }
    }

    /// Create a syntax error diagnostic.
    #[must_use]
    pub fn parse_error(file: impl Into<String>, start: u32, length: u32, message: &str) -> Self {
        Self::new(
            file,
            start,
            length,
            DiagnosticCategory::Error,
            "parse-error",
            "parseError",
            message,
        )
    }

    #[must_use]
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    #[must_use]
    pub fn with_fix(mut self, fix: Option<Fix>) -> Self {
        self.fix = fix;
        self
    }

    /// Add related information to this diagnostic.
    #[must_use]
    pub fn with_related(
        mut self,
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
    ) -> Self {
        self.related_information.push(DiagnosticRelatedInformation {
            file: file.into(),
            start,
            length,
            message_text: message.into(),
            category: DiagnosticCategory::Message,
        });
        self
    }

    pub fn end(&self) -> u32 {
        self.start + self.length
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}
