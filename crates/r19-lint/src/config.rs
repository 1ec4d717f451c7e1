//! `r19lint.json` configuration.

use std::path::Path;

use indexmap::IndexMap;
use r19_common::DiagnosticCategory;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::registry;
use crate::rule::Rule;

pub const CONFIG_FILE_NAME: &str = "r19lint.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown rule '{0}'")]
    UnknownRule(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Off,
    Warn,
    Error,
}

impl Severity {
    /// Diagnostic category for an enabled severity.
    pub fn category(self) -> Option<DiagnosticCategory> {
        match self {
            Severity::Off => None,
            Severity::Warn => Some(DiagnosticCategory::Warning),
            Severity::Error => Some(DiagnosticCategory::Error),
        }
    }
}

/// Accepts `"off" | "warn" | "error"` and `0 | 1 | 2`.
impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum NumberOrString {
            Number(u64),
            String(String),
        }

        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(0) => Ok(Severity::Off),
            NumberOrString::Number(1) => Ok(Severity::Warn),
            NumberOrString::Number(2) => Ok(Severity::Error),
            NumberOrString::String(s) => match s.as_str() {
                "off" => Ok(Severity::Off),
                "warn" => Ok(Severity::Warn),
                "error" => Ok(Severity::Error),
                _ => Err(Error::custom(format!(
                    "invalid severity: '{s}'. Expected \"off\", \"warn\" or \"error\""
                ))),
            },
            NumberOrString::Number(n) => Err(Error::custom(format!(
                "invalid severity: {n}. Expected 0, 1 or 2"
            ))),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    rules: IndexMap<String, Severity>,
    #[serde(default)]
    include: Option<Vec<String>>,
    #[serde(default)]
    exclude: Option<Vec<String>>,
}

/// Resolved configuration. Rule keys are canonical names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LintConfig {
    pub rules: IndexMap<&'static str, Severity>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl Default for LintConfig {
    fn default() -> Self {
        LintConfig {
            rules: registry::rule_names()
                .map(|name| (name, Severity::Error))
                .collect(),
            include: ["**/*.js", "**/*.jsx", "**/*.mjs", "**/*.cjs"]
                .into_iter()
                .map(String::from)
                .collect(),
            exclude: vec!["**/node_modules/**".to_string()],
        }
    }
}

impl LintConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Parse a config; rules not mentioned keep their default severity.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(text)?;
        let mut config = LintConfig::default();
        for (name, severity) in raw.rules {
            let canonical =
                registry::canonical_name(&name).ok_or_else(|| ConfigError::UnknownRule(name))?;
            config.rules.insert(canonical, severity);
        }
        if let Some(include) = raw.include {
            config.include = include;
        }
        if let Some(exclude) = raw.exclude {
            config.exclude = exclude;
        }
        Ok(config)
    }

    pub fn severity_for(&self, name: &str) -> Severity {
        registry::canonical_name(name)
            .and_then(|canonical| self.rules.get(canonical).copied())
            .unwrap_or(Severity::Off)
    }

    /// Keep only the named rules enabled. Unknown names are an error.
    pub fn restrict_to(&mut self, names: &[String]) -> Result<(), ConfigError> {
        let mut keep = Vec::with_capacity(names.len());
        for name in names {
            keep.push(
                registry::canonical_name(name).ok_or_else(|| ConfigError::UnknownRule(name.clone()))?,
            );
        }
        for (name, severity) in &mut self.rules {
            if !keep.contains(name) {
                *severity = Severity::Off;
            }
        }
        Ok(())
    }

    /// Enabled rules with their diagnostic category, in registration order.
    pub fn enabled_rules(&self) -> Vec<(&'static Rule, DiagnosticCategory)> {
        registry::all_rules()
            .iter()
            .filter_map(|rule| {
                let category = self.severity_for(rule.name()).category()?;
                Some((*rule, category))
            })
            .collect()
    }
}
