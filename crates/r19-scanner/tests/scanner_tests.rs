//! Tests for the scanner.

use r19_scanner::*;

fn tokens(source: &str) -> Vec<(SyntaxKind, String)> {
    let mut scanner = ScannerState::new(source.to_string());
    let mut out = Vec::new();
    loop {
        let kind = scanner.scan();
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
        out.push((kind, scanner.token_text().to_string()));
    }
    out
}

#[test]
fn test_token_is_keyword() {
    assert!(token_is_keyword(SyntaxKind::BreakKeyword));
    assert!(token_is_keyword(SyntaxKind::ConstKeyword));
    assert!(token_is_keyword(SyntaxKind::StaticKeyword));
    assert!(!token_is_keyword(SyntaxKind::Identifier));
    assert!(!token_is_keyword(SyntaxKind::OpenBraceToken));
    assert!(token_is_reserved_word(SyntaxKind::ClassKeyword));
    assert!(!token_is_reserved_word(SyntaxKind::AsyncKeyword));
}

#[test]
fn test_token_is_assignment_operator() {
    assert!(token_is_assignment_operator(SyntaxKind::EqualsToken));
    assert!(token_is_assignment_operator(SyntaxKind::QuestionQuestionEqualsToken));
    assert!(!token_is_assignment_operator(SyntaxKind::PlusToken));
}

#[test]
fn scans_default_props_assignment() {
    let toks = tokens("Component.defaultProps = { name: 'Test' };");
    let kinds: Vec<SyntaxKind> = toks.iter().map(|(k, _)| *k).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::DotToken,
            SyntaxKind::Identifier,
            SyntaxKind::EqualsToken,
            SyntaxKind::OpenBraceToken,
            SyntaxKind::Identifier,
            SyntaxKind::ColonToken,
            SyntaxKind::StringLiteral,
            SyntaxKind::CloseBraceToken,
            SyntaxKind::SemicolonToken,
        ]
    );
    assert_eq!(toks[7].1, "'Test'");
}

#[test]
fn string_values_are_cooked() {
    let mut scanner = ScannerState::new(r#"'a\'b\n' "A\x42""#.to_string());
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.token_value(), "a'b\n");
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.token_value(), "AB");
}

#[test]
fn comments_and_line_breaks_are_trivia() {
    let mut scanner = ScannerState::new("a // c\n/* x\n */ b".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert!(!scanner.has_preceding_line_break());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.token_value(), "b");
    assert!(scanner.has_preceding_line_break());
}

#[test]
fn numbers() {
    let kinds: Vec<SyntaxKind> = tokens("1 1.5 .5 1e3 0xff 1_000 10n")
        .into_iter()
        .map(|(k, _)| k)
        .collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::NumericLiteral,
            SyntaxKind::NumericLiteral,
            SyntaxKind::NumericLiteral,
            SyntaxKind::NumericLiteral,
            SyntaxKind::NumericLiteral,
            SyntaxKind::NumericLiteral,
            SyntaxKind::BigIntLiteral,
        ]
    );
}

#[test]
fn rescan_slash_as_regex() {
    let mut scanner = ScannerState::new("/a[/]b\\//gi.test(x)".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::SlashToken);
    assert_eq!(
        scanner.re_scan_slash_token(),
        SyntaxKind::RegularExpressionLiteral
    );
    assert_eq!(scanner.token_text(), "/a[/]b\\//gi");
    assert_eq!(scanner.scan(), SyntaxKind::DotToken);
}

#[test]
fn template_rescan() {
    let mut scanner = ScannerState::new("`a${b}c${d}e`".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::TemplateHead);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
    assert_eq!(scanner.re_scan_template_token(), SyntaxKind::TemplateMiddle);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
    assert_eq!(scanner.re_scan_template_token(), SyntaxKind::TemplateTail);
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
}

#[test]
fn greater_than_rescan() {
    let mut scanner = ScannerState::new("a >>>= b".to_string());
    scanner.scan();
    assert_eq!(scanner.scan(), SyntaxKind::GreaterThanToken);
    assert_eq!(
        scanner.re_scan_greater_token(),
        SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken
    );
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
}

#[test]
fn jsx_tokens() {
    let mut scanner = ScannerState::new("data-id=\"x\\y\">hi {name}</".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan_jsx_identifier(), SyntaxKind::Identifier);
    assert_eq!(scanner.token_value(), "data-id");
    assert_eq!(scanner.scan(), SyntaxKind::EqualsToken);
    assert_eq!(scanner.scan_jsx_attribute_value(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.token_value(), "x\\y");
    assert_eq!(scanner.scan(), SyntaxKind::GreaterThanToken);
    assert_eq!(scanner.scan_jsx_token(), SyntaxKind::JsxText);
    assert_eq!(scanner.token_value(), "hi ");
    assert_eq!(scanner.scan_jsx_token(), SyntaxKind::OpenBraceToken);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
    assert_eq!(scanner.scan_jsx_token(), SyntaxKind::LessThanSlashToken);
}

#[test]
fn snapshot_restores_position() {
    let mut scanner = ScannerState::new("(a, b) => c".to_string());
    scanner.scan();
    let snapshot = scanner.save_state();
    scanner.scan();
    scanner.scan();
    scanner.restore_state(snapshot);
    assert_eq!(scanner.token(), SyntaxKind::OpenParenToken);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.token_value(), "a");
}

#[test]
fn unterminated_string_reports_diagnostic() {
    let mut scanner = ScannerState::new("'abc\nx".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert!(scanner.is_unterminated());
    assert_eq!(scanner.diagnostics().len(), 1);
}
