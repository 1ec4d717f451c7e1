//! Parser state: token handling, diagnostics and speculative parsing.
//!
//! The statement, expression and JSX productions live in the `state_*`
//! sibling modules as further `impl ParserState` blocks.

use std::sync::Arc;

use r19_scanner::{ScannerState, SyntaxKind, token_is_contextual_keyword, token_to_text};
use tracing::{debug, trace};

use super::base::{NodeIndex, NodeList};
use super::node::{IdentifierData, NodeData};
use super::node_arena::NodeArena;

// Context flags
pub const CONTEXT_FLAG_ASYNC: u8 = 1;
pub const CONTEXT_FLAG_GENERATOR: u8 = 1 << 1;
pub const CONTEXT_FLAG_DISALLOW_IN: u8 = 1 << 2;
/// Inside any function body (top-level `await` is only legal outside).
pub const CONTEXT_FLAG_IN_FUNCTION: u8 = 1 << 3;

/// Deep nesting aborts with a diagnostic instead of overflowing the stack.
const MAX_RECURSION_DEPTH: u32 = 400;

/// A syntax error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: String,
}

/// Everything produced by parsing one file.
#[derive(Debug)]
pub struct ParseResult {
    pub arena: NodeArena,
    pub root: NodeIndex,
    pub diagnostics: Vec<ParseDiagnostic>,
}

impl ParseResult {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Parse a complete source file.
pub fn parse(file_name: &str, source_text: &str) -> ParseResult {
    let mut parser = ParserState::new(file_name.to_string(), source_text.to_string());
    let root = parser.parse_source_file();
    let diagnostics = std::mem::take(&mut parser.parse_diagnostics);
    ParseResult {
        arena: parser.into_arena(),
        root,
        diagnostics,
    }
}

pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) arena: NodeArena,
    file_name: String,
    pub(crate) context_flags: u8,
    pub(crate) parse_diagnostics: Vec<ParseDiagnostic>,
    /// End of the most recently consumed token; used as node end.
    pub(crate) prev_token_end: u32,
    recursion_depth: u32,
    /// Errors reported so far, including deduplicated ones.
    error_count: u32,
}

/// Everything that must be rolled back when a speculative parse fails.
struct Checkpoint {
    scanner: r19_scanner::ScannerSnapshot,
    arena_len: usize,
    diagnostics_len: usize,
    prev_token_end: u32,
    context_flags: u8,
}

impl ParserState {
    pub fn new(file_name: String, source_text: String) -> ParserState {
        let source: Arc<str> = Arc::from(source_text.as_str());
        ParserState {
            scanner: ScannerState::new(source_text),
            arena: NodeArena::new(source),
            file_name,
            context_flags: 0,
            parse_diagnostics: Vec::new(),
            prev_token_end: 0,
            recursion_depth: 0,
            error_count: 0,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    pub fn get_diagnostics(&self) -> &[ParseDiagnostic] {
        &self.parse_diagnostics
    }

    // =========================================================================
    // Tokens
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.scanner.token()
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.scanner.token() == kind
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.token_start()
    }

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.prev_token_end = self.scanner.token_end();
        self.scanner.scan()
    }

    pub(crate) fn next_jsx_token(&mut self) -> SyntaxKind {
        self.prev_token_end = self.scanner.token_end();
        self.scanner.scan_jsx_token()
    }

    pub(crate) fn next_jsx_attribute_value(&mut self) -> SyntaxKind {
        self.prev_token_end = self.scanner.token_end();
        self.scanner.scan_jsx_attribute_value()
    }

    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.parse_optional(kind) {
            return true;
        }
        let text = token_to_text(kind).unwrap_or("token");
        self.error_at_current_token(&format!("'{text}' expected."));
        false
    }

    /// Identifiers, including contextual keywords used as names.
    pub(crate) fn is_identifier(&self) -> bool {
        let token = self.token();
        token == SyntaxKind::Identifier || token_is_contextual_keyword(token)
    }

    pub(crate) fn can_parse_semicolon(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) || self.scanner.has_preceding_line_break()
    }

    /// Consume a `;`, or accept an automatically inserted one.
    pub(crate) fn parse_semicolon(&mut self) -> bool {
        if self.parse_optional(SyntaxKind::SemicolonToken) {
            return true;
        }
        if self.can_parse_semicolon() {
            return true;
        }
        self.error_at_current_token("';' expected.");
        false
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    pub(crate) fn error_at(&mut self, start: u32, length: u32, message: &str) {
        self.error_count += 1;
        // One error per position keeps cascades out of the output.
        if self
            .parse_diagnostics
            .last()
            .is_some_and(|last| last.start == start)
        {
            return;
        }
        trace!(start, message, "parse error");
        self.parse_diagnostics.push(ParseDiagnostic {
            start,
            length,
            message: message.to_string(),
        });
    }

    pub(crate) fn error_at_current_token(&mut self, message: &str) {
        let start = self.scanner.token_start();
        let length = self.scanner.token_end().saturating_sub(start);
        self.error_at(start, length, message);
    }

    pub(crate) fn collect_scanner_diagnostics(&mut self) {
        let scanner_diags: Vec<ParseDiagnostic> = self
            .scanner
            .diagnostics()
            .iter()
            .map(|diag| ParseDiagnostic {
                start: diag.pos as u32,
                length: diag.length as u32,
                message: diag.message.to_string(),
            })
            .collect();
        for diag in scanner_diags {
            if !self
                .parse_diagnostics
                .iter()
                .any(|existing| existing.start == diag.start)
            {
                self.parse_diagnostics.push(diag);
            }
        }
        self.parse_diagnostics.sort_by_key(|diag| diag.start);
        if !self.parse_diagnostics.is_empty() {
            debug!(
                file = %self.file_name,
                count = self.parse_diagnostics.len(),
                "syntax errors"
            );
        }
    }

    // =========================================================================
    // Nodes
    // =========================================================================

    /// Create a node spanning from `start` to the end of the last consumed token.
    pub(crate) fn finish_node(&mut self, start: u32, data: NodeData) -> NodeIndex {
        let end = self.prev_token_end.max(start);
        self.arena.add(start, end, data)
    }

    pub(crate) fn make_list(&self, nodes: Vec<NodeIndex>, pos: u32) -> NodeList {
        NodeList::new(nodes, pos, self.token_pos())
    }

    pub(crate) fn parse_identifier(&mut self) -> NodeIndex {
        if !self.is_identifier() {
            self.error_at_current_token("Identifier expected.");
            return NodeIndex::NONE;
        }
        self.parse_identifier_token()
    }

    /// Any identifier or keyword (property names after `.`, JSX names).
    pub(crate) fn parse_identifier_name(&mut self) -> NodeIndex {
        if !r19_scanner::token_is_identifier_or_keyword(self.token()) {
            self.error_at_current_token("Identifier expected.");
            return NodeIndex::NONE;
        }
        self.parse_identifier_token()
    }

    fn parse_identifier_token(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let escaped_text = self.scanner.token_value().to_string();
        self.next_token();
        self.finish_node(start, NodeData::Identifier(IdentifierData { escaped_text }))
    }

    // =========================================================================
    // Context
    // =========================================================================

    #[inline]
    pub(crate) fn in_context(&self, flag: u8) -> bool {
        self.context_flags & flag != 0
    }

    /// Run `f` with `set` flags added and `clear` flags removed.
    pub(crate) fn with_context<T>(
        &mut self,
        set: u8,
        clear: u8,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let saved = self.context_flags;
        self.context_flags = (saved | set) & !clear;
        let result = f(self);
        self.context_flags = saved;
        result
    }

    pub(crate) fn enter_recursion(&mut self) -> bool {
        if self.recursion_depth >= MAX_RECURSION_DEPTH {
            self.error_at_current_token("Maximum nesting depth exceeded.");
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    // =========================================================================
    // Look-ahead
    // =========================================================================

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            scanner: self.scanner.save_state(),
            arena_len: self.arena.len(),
            diagnostics_len: self.parse_diagnostics.len(),
            prev_token_end: self.prev_token_end,
            context_flags: self.context_flags,
        }
    }

    fn rewind(&mut self, checkpoint: Checkpoint) {
        self.scanner.restore_state(checkpoint.scanner);
        self.arena.truncate(checkpoint.arena_len);
        self.parse_diagnostics.truncate(checkpoint.diagnostics_len);
        self.prev_token_end = checkpoint.prev_token_end;
        self.context_flags = checkpoint.context_flags;
    }

    /// Evaluate `f` and always roll back afterwards.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let checkpoint = self.checkpoint();
        let result = f(self);
        self.rewind(checkpoint);
        result
    }

    /// Evaluate `f`; keep its effects only if it returns `Some` without
    /// reporting any error.
    pub(crate) fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let checkpoint = self.checkpoint();
        let error_count = self.error_count;
        let scanner_errors = self.scanner.diagnostics().len();
        match f(self) {
            Some(value)
                if self.error_count == error_count
                    && self.scanner.diagnostics().len() == scanner_errors =>
            {
                Some(value)
            }
            _ => {
                self.rewind(checkpoint);
                None
            }
        }
    }

    /// Is the token after the current one `kind`?
    pub(crate) fn next_token_is(&mut self, kind: SyntaxKind) -> bool {
        self.look_ahead(|p| p.next_token() == kind)
    }

    /// `async function` with no line break in between.
    pub(crate) fn next_is_function_on_same_line(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token() == SyntaxKind::FunctionKeyword && !p.scanner.has_preceding_line_break()
        })
    }
}
