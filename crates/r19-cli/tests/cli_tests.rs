//! Tests for discovery, the lint run and the reporters.

use clap::Parser;
use r19_cli::args::{CliArgs, OutputFormat};
use r19_cli::driver::{self, RunSummary};
use r19_cli::reporter::{Reporter, render_json};
use r19_lint::{LintConfig, Linter};
use std::fs;
use std::path::Path;

const COMPONENT: &str = "function Foo({ a }) { return a; }\nFoo.defaultProps = { a: 1 };\n";

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn args(argv: &[&str]) -> CliArgs {
    CliArgs::parse_from(std::iter::once("r19lint").chain(argv.iter().copied()))
}

fn relative_names(root: &Path, files: &[std::path::PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|path| {
            path.strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

#[test]
fn test_args_defaults() {
    let parsed = args(&[]);
    assert_eq!(parsed.paths, vec![std::path::PathBuf::from(".")]);
    assert_eq!(parsed.format, OutputFormat::Text);
    assert!(!parsed.fix);
    assert!(parsed.rules.is_empty());
    assert_eq!(parsed.max_warnings, None);

    let parsed = args(&["--format", "json", "--rule", "no-factories", "--max-warnings", "3", "src"]);
    assert_eq!(parsed.format, OutputFormat::Json);
    assert_eq!(parsed.rules, vec!["no-factories"]);
    assert_eq!(parsed.max_warnings, Some(3));
    assert_eq!(parsed.paths, vec![std::path::PathBuf::from("src")]);
}

#[test]
fn test_discovery_applies_include_and_exclude() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "src/App.jsx", COMPONENT);
    write(root, "src/util.js", "export const x = 1;\n");
    write(root, "src/legacy.cjs", "module.exports = {};\n");
    write(root, "src/style.css", "a {}\n");
    write(root, "README.md", "# readme\n");
    write(root, "node_modules/pkg/index.js", "module.exports = 1;\n");

    let files = driver::discover_files(&[root.to_path_buf()], &LintConfig::default()).unwrap();
    assert_eq!(
        relative_names(root, &files),
        vec!["src/App.jsx", "src/legacy.cjs", "src/util.js"]
    );
}

#[test]
fn test_explicit_files_skip_include() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "component.es", COMPONENT);
    write(root, "node_modules/dep.js", COMPONENT);

    let files = driver::discover_files(
        &[root.join("component.es"), root.join("node_modules/dep.js")],
        &LintConfig::default(),
    )
    .unwrap();
    assert_eq!(relative_names(root, &files), vec!["component.es"]);
}

#[test]
fn test_missing_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = driver::discover_files(&[dir.path().join("nope")], &LintConfig::default())
        .unwrap_err();
    assert!(err.to_string().contains("path not found"));
}

#[test]
fn test_config_file_in_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "r19lint.json",
        r#"{ "rules": { "no-default-props": "warn" }, "include": ["**/*.jsx"] }"#,
    );
    write(dir.path(), "App.jsx", COMPONENT);
    write(dir.path(), "skip.js", COMPONENT);

    let summary = driver::run(&args(&[]), dir.path()).unwrap();
    assert_eq!(summary.files.len(), 1);
    assert_eq!(summary.warning_count(), 1);
    assert_eq!(summary.error_count(), 0);
    assert!(!summary.is_failure(None));
    assert!(!summary.is_failure(Some(1)));
    assert!(summary.is_failure(Some(0)));
}

#[test]
fn test_bad_config_and_rule_names() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "bad.json", r#"{ "rules": { "no-such-rule": 2 } }"#);

    let err = driver::run(&args(&["--config", "bad.json"]), dir.path()).unwrap_err();
    assert!(format!("{err:#}").contains("unknown rule 'no-such-rule'"));

    let err = driver::resolve_config(&args(&["--rule", "nope"]), dir.path()).unwrap_err();
    assert!(format!("{err:#}").contains("unknown rule 'nope'"));
}

#[test]
fn test_fix_writes_files() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/Foo.jsx", COMPONENT);
    write(dir.path(), "src/Clean.jsx", "export const Clean = () => null;\n");

    let summary = driver::run(&args(&["--fix", "src"]), dir.path()).unwrap();
    assert_eq!(summary.fixed_count(), 1);
    assert_eq!(summary.error_count(), 0);
    assert_eq!(
        fs::read_to_string(dir.path().join("src/Foo.jsx")).unwrap(),
        "function Foo({ a = 1 }) { return a; }\n\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("src/Clean.jsx")).unwrap(),
        "export const Clean = () => null;\n"
    );
}

#[test]
fn test_rule_flag_restricts_run() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "App.jsx",
        "Foo.propTypes = {};\nconst el = <div ref=\"x\" />;\n",
    );
    let summary = driver::run(&args(&["--rule", "no-string-refs"]), dir.path()).unwrap();
    let rules: Vec<&str> = summary.diagnostics().map(|d| d.rule_id.as_str()).collect();
    assert_eq!(rules, vec!["no-string-refs"]);
}

#[test]
fn test_text_reporter() {
    let diagnostics = Linter::all().lint_source("App.jsx", COMPONENT).diagnostics;
    let mut reporter = Reporter::new(false);
    reporter.add_source("App.jsx", COMPONENT);

    let expected = format!(
        "App.jsx:2:1 - error no-default-props: Move defaultProps of 'Foo' to default parameters in the destructured props. (fixable)\n    2   Foo.defaultProps = {{ a: 1 }};\n        {}",
        "~".repeat(27)
    );
    assert_eq!(reporter.render(&diagnostics), expected);
}

#[test]
fn test_summary_line() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "A.jsx", COMPONENT);
    write(dir.path(), "B.jsx", "const el = <div ref=\"x\" />;\nFoo.propTypes = {};\n");
    write(dir.path(), "C.jsx", "export default 1;\n");

    let summary = driver::run(&args(&[]), dir.path()).unwrap();
    let reporter = Reporter::new(false);
    assert_eq!(
        reporter.format_summary(&summary),
        "Found 3 errors and 0 warnings in 2 files."
    );
}

#[test]
fn test_json_reporter() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "App.jsx", COMPONENT);
    let summary: RunSummary = driver::run(&args(&["--format", "json"]), dir.path()).unwrap();

    let json: serde_json::Value = serde_json::from_str(&render_json(&summary).unwrap()).unwrap();
    let files = json.as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["errorCount"], 1);
    assert_eq!(files[0]["fixableCount"], 1);
    let diagnostic = &files[0]["diagnostics"][0];
    assert_eq!(diagnostic["ruleId"], "no-default-props");
    assert_eq!(diagnostic["messageId"], "moveDefaultProps");
    assert_eq!(diagnostic["args"][0], "Foo");
    assert!(diagnostic["fix"]["edits"].is_array());
}
