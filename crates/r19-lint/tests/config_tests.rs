//! Tests for `r19lint.json` loading.

use std::io::Write;

use r19_lint::{ConfigError, LintConfig, Severity, all_rules};

#[test]
fn test_defaults_enable_every_rule() {
    let config = LintConfig::default();
    assert_eq!(config.rules.len(), all_rules().len());
    assert!(config.rules.values().all(|s| *s == Severity::Error));
    assert_eq!(config.include, vec!["**/*.js", "**/*.jsx", "**/*.mjs", "**/*.cjs"]);
    assert_eq!(config.exclude, vec!["**/node_modules/**"]);
    assert_eq!(config.enabled_rules().len(), all_rules().len());
}

#[test]
fn test_string_and_numeric_severities() {
    let config = LintConfig::from_json_str(
        r#"{ "rules": { "no-defaultprops": "warn", "no-string-refs": 0, "no-factories": 2, "no-legacy-context": 1 } }"#,
    )
    .unwrap();
    assert_eq!(config.severity_for("no-default-props"), Severity::Warn);
    assert_eq!(config.severity_for("no-string-refs"), Severity::Off);
    assert_eq!(config.severity_for("no-factories"), Severity::Error);
    assert_eq!(config.severity_for("no-legacy-context"), Severity::Warn);
    assert_eq!(config.severity_for("no-proptypes"), Severity::Error);

    let enabled: Vec<&str> = config
        .enabled_rules()
        .iter()
        .map(|(rule, _)| rule.name())
        .collect();
    assert_eq!(
        enabled,
        vec!["no-default-props", "no-prop-types", "no-legacy-context", "no-factories"]
    );
}

#[test]
fn test_include_and_exclude_override_defaults() {
    let config = LintConfig::from_json_str(
        r#"{ "include": ["src/**/*.jsx"], "exclude": ["**/vendor/**", "**/node_modules/**"] }"#,
    )
    .unwrap();
    assert_eq!(config.include, vec!["src/**/*.jsx"]);
    assert_eq!(config.exclude.len(), 2);
    assert_eq!(config.rules, LintConfig::default().rules);
}

#[test]
fn test_invalid_configs() {
    assert!(matches!(
        LintConfig::from_json_str(r#"{ "rules": { "no-such-rule": "error" } }"#),
        Err(ConfigError::UnknownRule(name)) if name == "no-such-rule"
    ));
    assert!(matches!(
        LintConfig::from_json_str(r#"{ "rules": { "no-factories": "fatal" } }"#),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        LintConfig::from_json_str(r#"{ "rules": { "no-factories": 3 } }"#),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        LintConfig::from_json_str(r#"{ "plugins": [] }"#),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        LintConfig::from_json_str("{"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_restrict_to_named_rules() {
    let mut config = LintConfig::default();
    config
        .restrict_to(&["no-proptypes".to_string(), "no-factories".to_string()])
        .unwrap();
    let enabled: Vec<&str> = config
        .enabled_rules()
        .iter()
        .map(|(rule, _)| rule.name())
        .collect();
    assert_eq!(enabled, vec!["no-prop-types", "no-factories"]);

    assert!(matches!(
        config.restrict_to(&["nope".to_string()]),
        Err(ConfigError::UnknownRule(_))
    ));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "rules": {{ "no-string-refs": "off" }} }}"#).unwrap();
    let config = LintConfig::load(file.path()).unwrap();
    assert_eq!(config.severity_for("no-string-refs"), Severity::Off);

    let missing = file.path().with_extension("missing.json");
    assert!(matches!(
        LintConfig::load(&missing),
        Err(ConfigError::Io { .. })
    ));
}
