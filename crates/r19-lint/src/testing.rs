//! Rule tester for valid / invalid snippets.
//!
//! ```ignore
//! RuleTester::new(&no_string_refs::RULE).run(
//!     &["<div ref={r} />"],
//!     vec![InvalidCase::new("<div ref=\"r\" />").error("noStringRefs")],
//! );
//! ```
//!
//! An invalid case without an `output` asserts that no fix is offered.

use r19_common::{Diagnostic, DiagnosticCategory};

use crate::linter::Linter;
use crate::rule::Rule;

const DEFAULT_FILE_NAME: &str = "test.jsx";

#[derive(Clone, Debug)]
pub struct ExpectedError {
    pub message_id: String,
    pub message: Option<String>,
}

#[derive(Clone, Debug)]
pub struct InvalidCase {
    pub code: String,
    pub file_name: Option<String>,
    pub errors: Vec<ExpectedError>,
    /// Fixed source; `None` means the rule must not offer a fix.
    pub output: Option<String>,
}

impl InvalidCase {
    pub fn new(code: impl Into<String>) -> Self {
        InvalidCase {
            code: code.into(),
            file_name: None,
            errors: Vec::new(),
            output: None,
        }
    }

    #[must_use]
    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    #[must_use]
    pub fn error(mut self, message_id: impl Into<String>) -> Self {
        self.errors.push(ExpectedError {
            message_id: message_id.into(),
            message: None,
        });
        self
    }

    #[must_use]
    pub fn error_with_message(
        mut self,
        message_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.errors.push(ExpectedError {
            message_id: message_id.into(),
            message: Some(message.into()),
        });
        self
    }

    #[must_use]
    pub fn output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }
}

pub struct RuleTester {
    rule: &'static Rule,
    linter: Linter,
}

impl RuleTester {
    pub fn new(rule: &'static Rule) -> Self {
        RuleTester {
            rule,
            linter: Linter::with_rules(vec![(rule, DiagnosticCategory::Error)]),
        }
    }

    pub fn run(&self, valid: &[&str], invalid: Vec<InvalidCase>) {
        for code in valid {
            self.valid(code);
        }
        for case in invalid {
            self.invalid(&case);
        }
    }

    /// Lint `code` with this rule only.
    pub fn lint(&self, file_name: &str, code: &str) -> Vec<Diagnostic> {
        let result = self.linter.lint_source(file_name, code);
        assert!(
            !result.parse_failed,
            "test code failed to parse: {:?}\n{code}",
            result.diagnostics
        );
        result.diagnostics
    }

    pub fn valid(&self, code: &str) {
        let diagnostics = self.lint(DEFAULT_FILE_NAME, code);
        assert!(
            diagnostics.is_empty(),
            "[{}] expected no diagnostics for:\n{code}\ngot: {:#?}",
            self.rule.name(),
            diagnostics
        );
    }

    pub fn invalid(&self, case: &InvalidCase) {
        let file_name = case.file_name.as_deref().unwrap_or(DEFAULT_FILE_NAME);
        let diagnostics = self.lint(file_name, &case.code);
        let rule = self.rule.name();
        let code = &case.code;

        assert_eq!(
            diagnostics.len(),
            case.errors.len(),
            "[{rule}] wrong number of diagnostics for:\n{code}\ngot: {diagnostics:#?}"
        );
        for (diagnostic, expected) in diagnostics.iter().zip(&case.errors) {
            assert_eq!(
                diagnostic.message_id, expected.message_id,
                "[{rule}] message id for:\n{code}"
            );
            if let Some(message) = &expected.message {
                assert_eq!(
                    &diagnostic.message_text, message,
                    "[{rule}] message for:\n{code}"
                );
            }
        }

        match &case.output {
            Some(expected) => {
                let outcome = self.linter.fix_source(file_name, code);
                assert_eq!(&outcome.output, expected, "[{rule}] fixed output for:\n{code}");
            }
            None => assert!(
                diagnostics.iter().all(|d| d.fix.is_none()),
                "[{rule}] expected no fix for:\n{code}"
            ),
        }
    }
}
