//! `r19lint` command-line driver: argument parsing, file discovery,
//! parallel linting and reporting.

pub mod args;
pub mod driver;
pub mod reporter;
pub mod tracing_config;
