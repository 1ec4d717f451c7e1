//! Common types and utilities for the r19 linter.
//!
//! This crate provides foundational types used across all r19 crates:
//! - Position/Range types and the `LineMap` for offset <-> line/column
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, message formatting)
//! - Text edits and fixes (`TextEdit`, `Fix`, fix application)
//! - Path helpers used to derive display names
//! - Shared limits (`limits`)

// Position/Range types for line/column source locations
pub mod position;
pub use position::{LineMap, Position, Range};

// Diagnostics reported by rules and the parser
pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticRelatedInformation, format_message,
};

// Range-tagged replacement edits against pristine source text
pub mod fix;
pub use fix::{EditError, Fix, TextEdit, apply_fixes};

// Centralized limits and thresholds
pub mod limits;

pub mod paths;
pub use paths::display_name_from_path;
