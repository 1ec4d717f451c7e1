//! JavaScript/JSX scanner for the r19 linter.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine, including the re-scan entry
//!   points the parser drives for regular expressions, templates and JSX
//! - `char_codes` - Character classification utilities

pub mod char_codes;
pub mod scanner;
pub mod syntax_kind;

pub use scanner::{ScannerDiagnostic, ScannerSnapshot, ScannerState, TokenFlags};
pub use syntax_kind::{
    SyntaxKind, keyword_from_text, token_is_assignment_operator, token_is_contextual_keyword,
    token_is_identifier_or_keyword, token_is_keyword, token_is_reserved_word, token_to_text,
};
