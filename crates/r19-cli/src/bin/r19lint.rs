#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{IsTerminal, Write};
use std::process::ExitCode;

use r19_cli::args::{CliArgs, OutputFormat};
use r19_cli::reporter::{Reporter, render_json};
use r19_cli::{driver, tracing_config};

fn main() -> ExitCode {
    tracing_config::init_tracing();
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let summary = driver::run(&args, &cwd)?;

    let mut stdout = std::io::stdout().lock();
    match args.format {
        OutputFormat::Json => {
            let json = render_json(&summary).context("failed to serialize diagnostics")?;
            writeln!(stdout, "{json}")?;
        }
        OutputFormat::Text => {
            let color = !args.no_color && std::io::stdout().is_terminal();
            let mut reporter = Reporter::new(color);
            for file in &summary.files {
                reporter.add_source(&file.file_name, &file.source);
            }
            let diagnostics: Vec<_> = summary.diagnostics().cloned().collect();
            if !diagnostics.is_empty() {
                writeln!(stdout, "{}\n", reporter.render(&diagnostics))?;
            }
            if !diagnostics.is_empty() || summary.fixed_count() > 0 {
                writeln!(stdout, "{}", reporter.format_summary(&summary))?;
            }
        }
    }

    if summary.is_failure(args.max_warnings) {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
