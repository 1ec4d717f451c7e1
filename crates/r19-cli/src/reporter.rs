use colored::Colorize;
use r19_common::{Diagnostic, DiagnosticCategory, DiagnosticRelatedInformation, LineMap};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::path::Path;

use crate::driver::{FileReport, RunSummary};

/// Text reporter in the style of `tsc --pretty`.
pub struct Reporter {
    color: bool,
    sources: FxHashMap<String, String>,
    line_maps: FxHashMap<String, LineMap>,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter {
            color,
            sources: FxHashMap::default(),
            line_maps: FxHashMap::default(),
        }
    }

    /// Register file contents so snippets reflect what was linted rather
    /// than what is on disk now.
    pub fn add_source(&mut self, file: &str, source: &str) {
        self.line_maps.remove(file);
        self.sources.insert(file.to_string(), source.to_string());
    }

    pub fn render(&mut self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(diagnostic));
        }
        out
    }

    pub fn format_diagnostic(&mut self, diagnostic: &Diagnostic) -> String {
        let location = self.format_location(&diagnostic.file, diagnostic.start);
        let category = self.format_category(diagnostic.category);
        let rule = self.format_rule(&diagnostic.rule_id);

        let mut output = String::new();
        match location {
            Some(location) => output.push_str(&location),
            None if !diagnostic.file.is_empty() => output.push_str(&diagnostic.file),
            None => output.push_str("<unknown>"),
        }
        output.push_str(" - ");
        output.push_str(&category);
        output.push(' ');
        output.push_str(&rule);
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);
        if diagnostic.fix.is_some() {
            output.push_str(&self.dim(" (fixable)"));
        }

        if let Some(snippet) =
            self.format_snippet(&diagnostic.file, diagnostic.start, diagnostic.length)
        {
            output.push_str(&snippet);
        }

        for related in &diagnostic.related_information {
            output.push('\n');
            output.push_str(&self.format_related(related));
            if let Some(snippet) = self.format_snippet(&related.file, related.start, related.length)
            {
                output.push_str(&snippet);
            }
        }
        output
    }

    /// `Found 3 errors and 1 warning in 2 files.`
    pub fn format_summary(&self, summary: &RunSummary) -> String {
        let files_with_problems = summary
            .files
            .iter()
            .filter(|file| !file.diagnostics.is_empty())
            .count();
        let mut line = format!(
            "Found {} and {} in {}.",
            plural(summary.error_count(), "error"),
            plural(summary.warning_count(), "warning"),
            plural(files_with_problems, "file")
        );
        let fixed = summary.fixed_count();
        if fixed > 0 {
            line.push_str(&format!(" Fixed {}.", plural(fixed, "file")));
        }
        line
    }

    /// Underlined source line for a span, e.g.
    ///   2   Foo.defaultProps = { a: 1 };
    ///       ~~~~~~~~~~~~~~~~~~~~~~~~~~~
    fn format_snippet(&mut self, file: &str, start: u32, length: u32) -> Option<String> {
        if file.is_empty() || length == 0 {
            return None;
        }
        self.ensure_line_map(file)?;
        let source = self.sources.get(file)?;
        let line_map = self.line_maps.get(file)?;

        let line = line_map.line_of(start);
        let line_start = line_map.line_start(line)? as usize;
        let line_end = line_map
            .line_start(line + 1)
            .map_or(source.len(), |next| next as usize);
        let line_text = source
            .get(line_start..line_end)?
            .trim_end_matches(['\n', '\r']);

        let span_start = (start as usize).saturating_sub(line_start);
        let span_end = ((start + length) as usize)
            .saturating_sub(line_start)
            .min(line_text.len());

        let mut underline = String::new();
        for (offset, ch) in line_text.char_indices() {
            if offset >= span_end {
                break;
            }
            let width = if ch == '\t' { 4 } else { 1 };
            let mark = if offset < span_start { ' ' } else { '~' };
            underline.extend(std::iter::repeat_n(mark, width));
        }
        if !underline.contains('~') {
            underline.push('~');
        }

        let display_line = line_text.replace('\t', "    ");
        let underline = if self.color {
            underline.red().to_string()
        } else {
            underline
        };
        Some(format!("\n  {:>3}   {display_line}\n        {underline}", line + 1))
    }

    fn format_related(&mut self, related: &DiagnosticRelatedInformation) -> String {
        let location = self
            .format_location(&related.file, related.start)
            .unwrap_or_else(|| related.file.clone());
        format!(
            "{}: {} - {}",
            self.dim("  Related"),
            location,
            related.message_text
        )
    }

    fn format_location(&mut self, file: &str, offset: u32) -> Option<String> {
        if file.is_empty() {
            return None;
        }
        self.ensure_line_map(file)?;
        let source = self.sources.get(file)?;
        let position = self.line_maps.get(file)?.offset_to_position(offset, source);
        Some(format!(
            "{}:{}:{}",
            file,
            position.line + 1,
            position.character + 1
        ))
    }

    fn ensure_line_map(&mut self, file: &str) -> Option<()> {
        if !self.sources.contains_key(file) {
            let contents = std::fs::read_to_string(Path::new(file)).ok()?;
            self.sources.insert(file.to_string(), contents);
        }
        if !self.line_maps.contains_key(file) {
            let map = LineMap::build(self.sources.get(file)?);
            self.line_maps.insert(file.to_string(), map);
        }
        Some(())
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = match category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        };
        if !self.color {
            return label.to_string();
        }
        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Suggestion => label.blue().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_rule(&self, rule_id: &str) -> String {
        if self.color {
            rule_id.bright_blue().to_string()
        } else {
            rule_id.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonFileReport<'a> {
    file_path: &'a str,
    diagnostics: &'a [Diagnostic],
    error_count: usize,
    warning_count: usize,
    fixable_count: usize,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    fixed: bool,
}

impl<'a> From<&'a FileReport> for JsonFileReport<'a> {
    fn from(report: &'a FileReport) -> Self {
        let count = |category| {
            report
                .diagnostics
                .iter()
                .filter(|d| d.category == category)
                .count()
        };
        JsonFileReport {
            file_path: &report.file_name,
            diagnostics: &report.diagnostics,
            error_count: count(DiagnosticCategory::Error),
            warning_count: count(DiagnosticCategory::Warning),
            fixable_count: report.diagnostics.iter().filter(|d| d.fix.is_some()).count(),
            fixed: report.fixed,
        }
    }
}

/// One JSON object per file, as an array.
pub fn render_json(summary: &RunSummary) -> serde_json::Result<String> {
    let files: Vec<JsonFileReport<'_>> = summary.files.iter().map(JsonFileReport::from).collect();
    serde_json::to_string_pretty(&files)
}
