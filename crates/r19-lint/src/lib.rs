//! React 19 migration lint rules.
//!
//! The crate is layered leaves-first:
//! - `predicates` / `selector` - node-shape checks and combinators
//! - `resolver` - the `ScopeResolver` seam and explicit alias chasing
//! - `component` - component shape classification
//! - `defaults` - `defaultProps` object literal extraction
//! - `fix` - text-edit synthesis for the `defaultProps` migration
//! - `rule` / `rules` - rule metadata, visitor tables and the rules themselves
//! - `registry`, `config`, `linter` - rule lookup, configuration and the
//!   traversal/fix driver
//! - `testing` - a rule tester for valid/invalid snippets

pub mod component;
pub mod config;
pub mod defaults;
pub mod fix;
pub mod linter;
pub mod predicates;
pub mod registry;
pub mod resolver;
pub mod rule;
pub mod rules;
pub mod selector;
pub mod testing;

pub use config::{ConfigError, LintConfig, Severity};
pub use linter::{FixOutcome, LintResult, Linter};
pub use registry::{all_rules, get_rule};
pub use rule::{Phase, Rule, RuleContext, RuleMeta, RuleType, Visitor};
