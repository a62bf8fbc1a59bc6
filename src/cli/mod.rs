//! CLI module for tabledb
//!
//! Provides command-line access to:
//! - schema: inferred schema of a delimited file
//! - row: one row by record id
//! - query: range query, optionally explained

mod args;
mod commands;
mod errors;
mod io;

pub use args::{parse_criterion, parse_sort, Cli, Command};
pub use commands::{execute, query, row, run, run_command, schema};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};
