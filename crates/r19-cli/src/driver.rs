//! File discovery and the parallel lint run.

use anyhow::{Context, Result, bail};
use globset::{Glob, GlobSet, GlobSetBuilder};
use r19_common::{Diagnostic, DiagnosticCategory};
use r19_lint::config::CONFIG_FILE_NAME;
use r19_lint::{LintConfig, Linter};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span};
use walkdir::WalkDir;

use crate::args::CliArgs;

/// Result of linting one file.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    /// Path as shown in diagnostics.
    pub file_name: String,
    /// Text the diagnostics refer to (the fixed text after `--fix`).
    pub source: String,
    pub diagnostics: Vec<Diagnostic>,
    pub fixed: bool,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub files: Vec<FileReport>,
}

impl RunSummary {
    pub fn error_count(&self) -> usize {
        self.count(DiagnosticCategory::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(DiagnosticCategory::Warning)
    }

    pub fn fixed_count(&self) -> usize {
        self.files.iter().filter(|file| file.fixed).count()
    }

    fn count(&self, category: DiagnosticCategory) -> usize {
        self.files
            .iter()
            .flat_map(|file| &file.diagnostics)
            .filter(|d| d.category == category)
            .count()
    }

    /// Diagnostics of every file, in file order.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.files.iter().flat_map(|file| &file.diagnostics)
    }

    /// Whether the run should exit with a failure status.
    pub fn is_failure(&self, max_warnings: Option<usize>) -> bool {
        self.error_count() > 0 || max_warnings.is_some_and(|max| self.warning_count() > max)
    }
}

/// Load `--config`, or `r19lint.json` from `cwd` when present, then apply
/// `--rule` restrictions.
pub fn resolve_config(args: &CliArgs, cwd: &Path) -> Result<LintConfig> {
    let path = match &args.config {
        Some(path) => Some(cwd.join(path)),
        None => Some(cwd.join(CONFIG_FILE_NAME)).filter(|path| path.is_file()),
    };
    let mut config = match path {
        Some(path) => {
            debug!(config = %path.display(), "loading config");
            LintConfig::load(&path)
                .with_context(|| format!("failed to load config from {}", path.display()))?
        }
        None => LintConfig::default(),
    };
    if !args.rules.is_empty() {
        config
            .restrict_to(&args.rules)
            .context("invalid --rule value")?;
    }
    Ok(config)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).with_context(|| format!("invalid glob pattern '{pattern}'"))?;
        builder.add(glob);
    }
    builder.build().context("failed to build glob set")
}

/// Expand `paths` into the sorted list of files to lint.
///
/// Directories are walked and filtered by the config's include/exclude
/// globs, matched against paths relative to the directory. Files named
/// explicitly are only subject to `exclude`.
pub fn discover_files(paths: &[PathBuf], config: &LintConfig) -> Result<Vec<PathBuf>> {
    let include = build_globset(&config.include)?;
    let exclude = build_globset(&config.exclude)?;
    let mut files = Vec::new();

    for root in paths {
        if root.is_file() {
            if !exclude.is_match(root) {
                files.push(root.clone());
            }
            continue;
        }
        if !root.is_dir() {
            bail!("path not found: {}", root.display());
        }

        let walker = WalkDir::new(root).follow_links(true).into_iter();
        for entry in walker.filter_entry(|entry| {
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            relative.as_os_str().is_empty() || !exclude.is_match(relative)
        }) {
            let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            if include.is_match(relative) {
                files.push(entry.into_path());
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn lint_file(path: &Path, linter: &Linter, fix: bool) -> Result<FileReport> {
    let file_name = path.display().to_string();
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {file_name}"))?;

    if !fix {
        let result = linter.lint_source(&file_name, &source);
        return Ok(FileReport {
            path: path.to_path_buf(),
            file_name,
            source,
            diagnostics: result.diagnostics,
            fixed: false,
        });
    }

    let outcome = linter.fix_source(&file_name, &source);
    if outcome.fixed {
        std::fs::write(path, &outcome.output)
            .with_context(|| format!("failed to write fixes to {file_name}"))?;
        info!(file = %file_name, passes = outcome.passes, "wrote fixes");
    }
    Ok(FileReport {
        path: path.to_path_buf(),
        file_name,
        source: outcome.output,
        diagnostics: outcome.diagnostics,
        fixed: outcome.fixed,
    })
}

/// Lint `files` in parallel. Reports come back in input order.
pub fn lint_files(files: &[PathBuf], linter: &Linter, fix: bool) -> Result<Vec<FileReport>> {
    files
        .par_iter()
        .map(|path| lint_file(path, linter, fix))
        .collect()
}

pub fn run(args: &CliArgs, cwd: &Path) -> Result<RunSummary> {
    let config = resolve_config(args, cwd)?;
    let linter = Linter::new(&config);

    let roots: Vec<PathBuf> = args.paths.iter().map(|path| cwd.join(path)).collect();
    let files = {
        let _span = info_span!("discover_files", roots = roots.len()).entered();
        discover_files(&roots, &config)?
    };
    debug!(files = files.len(), "discovered files");

    let _span = info_span!("lint_files", files = files.len(), fix = args.fix).entered();
    let files = lint_files(&files, &linter, args.fix)?;
    Ok(RunSummary { files })
}
