//! Scanner state machine.
//!
//! The scanner is driven by the parser: `scan()` produces ordinary tokens,
//! and the `re_scan_*` / `scan_jsx_*` entry points re-interpret the current
//! position when the parser knows more about the context (a `/` that starts
//! a regular expression, a `}` that continues a template, JSX children).

use bitflags::bitflags;

use crate::char_codes::{
    is_identifier_part, is_identifier_start, is_line_break, is_white_space_single_line,
};
use crate::syntax_kind::{SyntaxKind, keyword_from_text};

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct TokenFlags: u8 {
        const NONE = 0;
        const PRECEDING_LINE_BREAK = 1;
        const UNTERMINATED = 1 << 1;
    }
}

/// A lexical error found while scanning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerDiagnostic {
    pub pos: usize,
    pub length: usize,
    pub message: &'static str,
}

/// Saved scanner position used for look-ahead.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    token_flags: TokenFlags,
    diagnostics_len: usize,
}

pub struct ScannerState {
    text: String,
    pos: usize,
    end: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    token_flags: TokenFlags,
    diagnostics: Vec<ScannerDiagnostic>,
}

impl ScannerState {
    pub fn new(text: String) -> Self {
        let end = text.len();
        ScannerState {
            text,
            pos: 0,
            end,
            full_start: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            token_flags: TokenFlags::NONE,
            diagnostics: Vec::new(),
        }
    }

    /// Move the scanner to `pos` (clamped to the text length).
    pub fn reset_to(&mut self, pos: usize) {
        let pos = pos.min(self.end);
        self.pos = pos;
        self.full_start = pos;
        self.token_start = pos;
        self.token = SyntaxKind::Unknown;
        self.token_value.clear();
        self.token_flags = TokenFlags::NONE;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn source_text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    #[inline]
    pub fn token_start(&self) -> u32 {
        self.token_start as u32
    }

    #[inline]
    pub fn token_end(&self) -> u32 {
        self.pos as u32
    }

    #[inline]
    pub fn token_full_start(&self) -> u32 {
        self.full_start as u32
    }

    /// Cooked value for string literals, name for identifiers, raw text otherwise.
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    pub fn token_text(&self) -> &str {
        &self.text[self.token_start..self.pos]
    }

    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    pub fn is_unterminated(&self) -> bool {
        self.token_flags.contains(TokenFlags::UNTERMINATED)
    }

    pub fn diagnostics(&self) -> &[ScannerDiagnostic] {
        &self.diagnostics
    }

    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            full_start: self.full_start,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            token_flags: self.token_flags,
            diagnostics_len: self.diagnostics.len(),
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.full_start = snapshot.full_start;
        self.token_start = snapshot.token_start;
        self.token = snapshot.token;
        self.token_value = snapshot.token_value;
        self.token_flags = snapshot.token_flags;
        self.diagnostics.truncate(snapshot.diagnostics_len);
    }

    // =========================================================================
    // Character helpers
    // =========================================================================

    #[inline]
    fn char_at(&self, pos: usize) -> Option<char> {
        self.text.get(pos..).and_then(|rest| rest.chars().next())
    }

    #[inline]
    fn byte_at(&self, pos: usize) -> u8 {
        self.text.as_bytes().get(pos).copied().unwrap_or(0)
    }

    fn error(&mut self, pos: usize, length: usize, message: &'static str) {
        self.diagnostics.push(ScannerDiagnostic {
            pos,
            length,
            message,
        });
    }

    // =========================================================================
    // Main scan
    // =========================================================================

    /// Scan the next token, skipping whitespace and comments.
    pub fn scan(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.token_flags = TokenFlags::NONE;
        self.token_value.clear();
        self.skip_trivia();
        self.token_start = self.pos;

        let Some(ch) = self.char_at(self.pos) else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };

        self.token = match ch {
            '"' | '\'' => self.scan_string(ch),
            '`' => {
                self.pos += 1;
                self.scan_template(true)
            }
            '0'..='9' => self.scan_number(),
            '.' => {
                if self.byte_at(self.pos + 1).is_ascii_digit() {
                    self.scan_number()
                } else if self.byte_at(self.pos + 1) == b'.' && self.byte_at(self.pos + 2) == b'.'
                {
                    self.punct(3, SyntaxKind::DotDotDotToken)
                } else {
                    self.punct(1, SyntaxKind::DotToken)
                }
            }
            '#' => {
                if self.char_at(self.pos + 1).is_some_and(is_identifier_start) {
                    self.pos += 1;
                    self.scan_identifier_rest();
                    self.token_value = self.text[self.token_start..self.pos].to_string();
                    SyntaxKind::PrivateIdentifier
                } else {
                    self.error(self.pos, 1, "Invalid character.");
                    self.punct(1, SyntaxKind::Unknown)
                }
            }
            c if is_identifier_start(c) => self.scan_identifier(),
            _ => self.scan_punctuation(ch),
        };
        self.token
    }

    fn skip_trivia(&mut self) {
        if self.pos == 0 && self.text.starts_with("#!") {
            while let Some(ch) = self.char_at(self.pos) {
                if is_line_break(ch) {
                    break;
                }
                self.pos += ch.len_utf8();
            }
        }

        while let Some(ch) = self.char_at(self.pos) {
            if is_line_break(ch) {
                self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                self.pos += ch.len_utf8();
            } else if is_white_space_single_line(ch) {
                self.pos += ch.len_utf8();
            } else if ch == '/' && self.byte_at(self.pos + 1) == b'/' {
                self.pos += 2;
                while let Some(c) = self.char_at(self.pos) {
                    if is_line_break(c) {
                        break;
                    }
                    self.pos += c.len_utf8();
                }
            } else if ch == '/' && self.byte_at(self.pos + 1) == b'*' {
                let start = self.pos;
                self.pos += 2;
                let mut closed = false;
                while let Some(c) = self.char_at(self.pos) {
                    if c == '*' && self.byte_at(self.pos + 1) == b'/' {
                        self.pos += 2;
                        closed = true;
                        break;
                    }
                    if is_line_break(c) {
                        self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    }
                    self.pos += c.len_utf8();
                }
                if !closed {
                    self.error(start, self.pos - start, "'*/' expected.");
                }
            } else {
                break;
            }
        }
    }

    #[inline]
    fn punct(&mut self, len: usize, kind: SyntaxKind) -> SyntaxKind {
        self.pos += len;
        kind
    }

    fn scan_punctuation(&mut self, ch: char) -> SyntaxKind {
        use SyntaxKind::*;
        let b1 = self.byte_at(self.pos + 1);
        let b2 = self.byte_at(self.pos + 2);
        match ch {
            '{' => self.punct(1, OpenBraceToken),
            '}' => self.punct(1, CloseBraceToken),
            '(' => self.punct(1, OpenParenToken),
            ')' => self.punct(1, CloseParenToken),
            '[' => self.punct(1, OpenBracketToken),
            ']' => self.punct(1, CloseBracketToken),
            ';' => self.punct(1, SemicolonToken),
            ',' => self.punct(1, CommaToken),
            ':' => self.punct(1, ColonToken),
            '~' => self.punct(1, TildeToken),
            '@' => self.punct(1, AtToken),
            '?' => match (b1, b2) {
                (b'.', d) if !d.is_ascii_digit() => self.punct(2, QuestionDotToken),
                (b'?', b'=') => self.punct(3, QuestionQuestionEqualsToken),
                (b'?', _) => self.punct(2, QuestionQuestionToken),
                _ => self.punct(1, QuestionToken),
            },
            '<' => match (b1, b2) {
                (b'<', b'=') => self.punct(3, LessThanLessThanEqualsToken),
                (b'<', _) => self.punct(2, LessThanLessThanToken),
                (b'=', _) => self.punct(2, LessThanEqualsToken),
                _ => self.punct(1, LessThanToken),
            },
            // `>>`, `>=` and friends are produced by `re_scan_greater_token`.
            '>' => self.punct(1, GreaterThanToken),
            '=' => match (b1, b2) {
                (b'=', b'=') => self.punct(3, EqualsEqualsEqualsToken),
                (b'=', _) => self.punct(2, EqualsEqualsToken),
                (b'>', _) => self.punct(2, EqualsGreaterThanToken),
                _ => self.punct(1, EqualsToken),
            },
            '!' => match (b1, b2) {
                (b'=', b'=') => self.punct(3, ExclamationEqualsEqualsToken),
                (b'=', _) => self.punct(2, ExclamationEqualsToken),
                _ => self.punct(1, ExclamationToken),
            },
            '+' => match b1 {
                b'+' => self.punct(2, PlusPlusToken),
                b'=' => self.punct(2, PlusEqualsToken),
                _ => self.punct(1, PlusToken),
            },
            '-' => match b1 {
                b'-' => self.punct(2, MinusMinusToken),
                b'=' => self.punct(2, MinusEqualsToken),
                _ => self.punct(1, MinusToken),
            },
            '*' => match (b1, b2) {
                (b'*', b'=') => self.punct(3, AsteriskAsteriskEqualsToken),
                (b'*', _) => self.punct(2, AsteriskAsteriskToken),
                (b'=', _) => self.punct(2, AsteriskEqualsToken),
                _ => self.punct(1, AsteriskToken),
            },
            '/' => match b1 {
                b'=' => self.punct(2, SlashEqualsToken),
                _ => self.punct(1, SlashToken),
            },
            '%' => match b1 {
                b'=' => self.punct(2, PercentEqualsToken),
                _ => self.punct(1, PercentToken),
            },
            '&' => match (b1, b2) {
                (b'&', b'=') => self.punct(3, AmpersandAmpersandEqualsToken),
                (b'&', _) => self.punct(2, AmpersandAmpersandToken),
                (b'=', _) => self.punct(2, AmpersandEqualsToken),
                _ => self.punct(1, AmpersandToken),
            },
            '|' => match (b1, b2) {
                (b'|', b'=') => self.punct(3, BarBarEqualsToken),
                (b'|', _) => self.punct(2, BarBarToken),
                (b'=', _) => self.punct(2, BarEqualsToken),
                _ => self.punct(1, BarToken),
            },
            '^' => match b1 {
                b'=' => self.punct(2, CaretEqualsToken),
                _ => self.punct(1, CaretToken),
            },
            _ => {
                self.error(self.pos, ch.len_utf8(), "Invalid character.");
                self.punct(ch.len_utf8(), Unknown)
            }
        }
    }

    fn scan_identifier_rest(&mut self) {
        while let Some(c) = self.char_at(self.pos) {
            if !is_identifier_part(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        self.scan_identifier_rest();
        let text = &self.text[self.token_start..self.pos];
        self.token_value = text.to_string();
        keyword_from_text(text).unwrap_or(SyntaxKind::Identifier)
    }

    fn scan_digits(&mut self, accept: impl Fn(u8) -> bool) {
        while accept(self.byte_at(self.pos)) || self.byte_at(self.pos) == b'_' {
            self.pos += 1;
        }
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let first = self.byte_at(self.pos);
        let second = self.byte_at(self.pos + 1).to_ascii_lowercase();
        let mut is_integer = true;

        if first == b'0' && matches!(second, b'x' | b'b' | b'o') {
            self.pos += 2;
            match second {
                b'x' => self.scan_digits(|b| b.is_ascii_hexdigit()),
                b'b' => self.scan_digits(|b| b == b'0' || b == b'1'),
                _ => self.scan_digits(|b| (b'0'..=b'7').contains(&b)),
            }
        } else {
            self.scan_digits(|b| b.is_ascii_digit());
            if self.byte_at(self.pos) == b'.' {
                is_integer = false;
                self.pos += 1;
                self.scan_digits(|b| b.is_ascii_digit());
            }
            if matches!(self.byte_at(self.pos), b'e' | b'E') {
                let sign = self.byte_at(self.pos + 1);
                let digit_at = if sign == b'+' || sign == b'-' { 2 } else { 1 };
                if self.byte_at(self.pos + digit_at).is_ascii_digit() {
                    is_integer = false;
                    self.pos += digit_at;
                    self.scan_digits(|b| b.is_ascii_digit());
                }
            }
        }

        if is_integer && self.byte_at(self.pos) == b'n' {
            self.pos += 1;
            self.token_value = self.text[self.token_start..self.pos].to_string();
            return SyntaxKind::BigIntLiteral;
        }
        if self.char_at(self.pos).is_some_and(is_identifier_start) {
            self.error(
                self.pos,
                1,
                "An identifier or keyword cannot immediately follow a numeric literal.",
            );
        }
        self.token_value = self.text[self.token_start..self.pos].to_string();
        SyntaxKind::NumericLiteral
    }

    fn scan_hex_escape(&mut self, digits: usize) -> Option<char> {
        let hex = self.text.get(self.pos..self.pos + digits)?;
        let value = u32::from_str_radix(hex, 16).ok()?;
        self.pos += digits;
        char::from_u32(value)
    }

    /// Scan an escape sequence starting after the backslash.
    fn scan_escape(&mut self) -> Option<char> {
        let ch = self.char_at(self.pos)?;
        self.pos += ch.len_utf8();
        let cooked = match ch {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'b' => '\u{0008}',
            'f' => '\u{000C}',
            'v' => '\u{000B}',
            '0' if !self.byte_at(self.pos).is_ascii_digit() => '\0',
            'x' => return self.scan_hex_escape(2),
            'u' => {
                if self.byte_at(self.pos) == b'{' {
                    let close = self.text[self.pos..].find('}')?;
                    let value = u32::from_str_radix(&self.text[self.pos + 1..self.pos + close], 16)
                        .ok()?;
                    self.pos += close + 1;
                    return char::from_u32(value);
                }
                return self.scan_hex_escape(4);
            }
            '\r' => {
                if self.byte_at(self.pos) == b'\n' {
                    self.pos += 1;
                }
                return None;
            }
            c if is_line_break(c) => return None,
            c => c,
        };
        Some(cooked)
    }

    fn scan_string(&mut self, quote: char) -> SyntaxKind {
        self.pos += 1;
        let mut value = String::new();
        loop {
            let Some(ch) = self.char_at(self.pos) else {
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.error(
                    self.token_start,
                    self.pos - self.token_start,
                    "Unterminated string literal.",
                );
                break;
            };
            if ch == quote {
                self.pos += 1;
                break;
            }
            if is_line_break(ch) {
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.error(
                    self.token_start,
                    self.pos - self.token_start,
                    "Unterminated string literal.",
                );
                break;
            }
            if ch == '\\' {
                self.pos += 1;
                if let Some(cooked) = self.scan_escape() {
                    value.push(cooked);
                }
                continue;
            }
            value.push(ch);
            self.pos += ch.len_utf8();
        }
        self.token_value = value;
        SyntaxKind::StringLiteral
    }

    /// Scan template characters up to the next backtick or `${`.
    fn scan_template(&mut self, started_with_backtick: bool) -> SyntaxKind {
        let content_start = self.pos;
        loop {
            let Some(ch) = self.char_at(self.pos) else {
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.error(
                    self.token_start,
                    self.pos - self.token_start,
                    "Unterminated template literal.",
                );
                self.token_value = self.text[content_start..self.pos].to_string();
                return if started_with_backtick {
                    SyntaxKind::NoSubstitutionTemplateLiteral
                } else {
                    SyntaxKind::TemplateTail
                };
            };
            match ch {
                '`' => {
                    self.token_value = self.text[content_start..self.pos].to_string();
                    self.pos += 1;
                    return if started_with_backtick {
                        SyntaxKind::NoSubstitutionTemplateLiteral
                    } else {
                        SyntaxKind::TemplateTail
                    };
                }
                '$' if self.byte_at(self.pos + 1) == b'{' => {
                    self.token_value = self.text[content_start..self.pos].to_string();
                    self.pos += 2;
                    return if started_with_backtick {
                        SyntaxKind::TemplateHead
                    } else {
                        SyntaxKind::TemplateMiddle
                    };
                }
                '\\' => {
                    self.pos += 1;
                    if let Some(next) = self.char_at(self.pos) {
                        self.pos += next.len_utf8();
                    }
                }
                c => self.pos += c.len_utf8(),
            }
        }
    }

    // =========================================================================
    // Re-scan entry points
    // =========================================================================

    /// Re-scan a `/` or `/=` token as a regular expression literal.
    pub fn re_scan_slash_token(&mut self) -> SyntaxKind {
        if !matches!(self.token, SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken) {
            return self.token;
        }
        let mut p = self.token_start + 1;
        let mut in_class = false;
        loop {
            let Some(ch) = self.char_at(p) else {
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.error(
                    self.token_start,
                    p - self.token_start,
                    "Unterminated regular expression literal.",
                );
                break;
            };
            if is_line_break(ch) {
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.error(
                    self.token_start,
                    p - self.token_start,
                    "Unterminated regular expression literal.",
                );
                break;
            }
            match ch {
                '\\' => {
                    p += 1;
                    if let Some(next) = self.char_at(p) {
                        p += next.len_utf8();
                    }
                    continue;
                }
                '[' => in_class = true,
                ']' => in_class = false,
                '/' if !in_class => {
                    p += 1;
                    break;
                }
                _ => {}
            }
            p += ch.len_utf8();
        }
        self.pos = p;
        self.scan_identifier_rest();
        self.token_value = self.text[self.token_start..self.pos].to_string();
        self.token = SyntaxKind::RegularExpressionLiteral;
        self.token
    }

    /// Re-scan a `}` as the continuation of a template literal.
    pub fn re_scan_template_token(&mut self) -> SyntaxKind {
        if self.token != SyntaxKind::CloseBraceToken {
            return self.token;
        }
        self.pos = self.token_start + 1;
        self.token = self.scan_template(false);
        self.token
    }

    /// Extend a `>` token into `>=`, `>>`, `>>=`, `>>>` or `>>>=`.
    pub fn re_scan_greater_token(&mut self) -> SyntaxKind {
        use SyntaxKind::*;
        if self.token != GreaterThanToken {
            return self.token;
        }
        let b0 = self.byte_at(self.pos);
        let b1 = self.byte_at(self.pos + 1);
        let b2 = self.byte_at(self.pos + 2);
        self.token = match (b0, b1, b2) {
            (b'>', b'>', b'=') => self.punct(3, GreaterThanGreaterThanGreaterThanEqualsToken),
            (b'>', b'>', _) => self.punct(2, GreaterThanGreaterThanGreaterThanToken),
            (b'>', b'=', _) => self.punct(2, GreaterThanGreaterThanEqualsToken),
            (b'>', _, _) => self.punct(1, GreaterThanGreaterThanToken),
            (b'=', _, _) => self.punct(1, GreaterThanEqualsToken),
            _ => GreaterThanToken,
        };
        self.token
    }

    // =========================================================================
    // JSX
    // =========================================================================

    /// Extend an identifier/keyword token with JSX name characters (`data-id`).
    pub fn scan_jsx_identifier(&mut self) -> SyntaxKind {
        if self.token == SyntaxKind::Identifier || crate::token_is_keyword(self.token) {
            while let Some(ch) = self.char_at(self.pos) {
                if ch != '-' && !is_identifier_part(ch) {
                    break;
                }
                self.pos += ch.len_utf8();
            }
            self.token_value = self.text[self.token_start..self.pos].to_string();
            self.token = SyntaxKind::Identifier;
        }
        self.token
    }

    /// Scan a token in JSX child position: text, `{`, `<` or `</`.
    pub fn scan_jsx_token(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.token_start = self.pos;
        self.token_flags = TokenFlags::NONE;
        self.token_value.clear();

        let Some(ch) = self.char_at(self.pos) else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };
        self.token = match ch {
            '<' if self.byte_at(self.pos + 1) == b'/' => self.punct(2, SyntaxKind::LessThanSlashToken),
            '<' => self.punct(1, SyntaxKind::LessThanToken),
            '{' => self.punct(1, SyntaxKind::OpenBraceToken),
            _ => {
                while let Some(c) = self.char_at(self.pos) {
                    if c == '{' || c == '<' {
                        break;
                    }
                    self.pos += c.len_utf8();
                }
                self.token_value = self.text[self.token_start..self.pos].to_string();
                SyntaxKind::JsxText
            }
        };
        self.token
    }

    /// Scan a JSX attribute value. Quoted values are taken verbatim (JSX
    /// strings have no escape sequences).
    pub fn scan_jsx_attribute_value(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.token_flags = TokenFlags::NONE;
        self.skip_trivia();
        self.token_start = self.pos;
        match self.char_at(self.pos) {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let content_start = self.pos;
                loop {
                    match self.char_at(self.pos) {
                        None => {
                            self.token_flags |= TokenFlags::UNTERMINATED;
                            self.error(
                                self.token_start,
                                self.pos - self.token_start,
                                "Unterminated string literal.",
                            );
                            self.token_value = self.text[content_start..self.pos].to_string();
                            break;
                        }
                        Some(c) if c == quote => {
                            self.token_value = self.text[content_start..self.pos].to_string();
                            self.pos += 1;
                            break;
                        }
                        Some(c) => self.pos += c.len_utf8(),
                    }
                }
                self.token = SyntaxKind::StringLiteral;
                self.token
            }
            _ => {
                self.pos = self.full_start;
                self.scan()
            }
        }
    }
}
