//! CLI argument definitions using clap
//!
//! Commands:
//! - tabledb schema <FILE>
//! - tabledb row <FILE> <ID>
//! - tabledb query <FILE> --where FIELD=MIN..MAX ... [--sort FIELD[:asc|:desc] ...] [--explain]
//!
//! Every command accepts `--config <PATH>`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::index::RecordId;
use crate::planner::{SearchCriterion, SortCriterion, SortDirection};

/// tabledb - in-memory tables with ordered indexes and range queries
#[derive(Parser, Debug)]
#[command(name = "tabledb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load a delimited file and print its schema
    Schema {
        /// Delimited file with a header line
        file: PathBuf,
    },

    /// Print one row by record id
    Row {
        /// Delimited file with a header line
        file: PathBuf,
        /// Record id (0-based insertion position)
        id: RecordId,
    },

    /// Run a range query
    Query {
        /// Delimited file with a header line
        file: PathBuf,

        /// Range criterion; either bound may be empty, a bare value matches exactly
        #[arg(long = "where", value_name = "FIELD=MIN..MAX", value_parser = parse_criterion)]
        criteria: Vec<SearchCriterion>,

        /// Sort key, applied in the order given
        #[arg(long = "sort", value_name = "FIELD[:asc|:desc]", value_parser = parse_sort)]
        sort: Vec<SortCriterion>,

        /// Print the query plan instead of running it
        #[arg(long)]
        explain: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

/// Parses `FIELD=MIN..MAX`, `FIELD=MIN..`, `FIELD=..MAX` or `FIELD=VALUE`
pub fn parse_criterion(s: &str) -> Result<SearchCriterion, String> {
    let (field, bounds) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=MIN..MAX, got '{}'", s))?;
    if field.is_empty() {
        return Err(format!("missing field name in '{}'", s));
    }

    let criterion = match bounds.split_once("..") {
        Some((min, max)) => {
            SearchCriterion::new(field, Some(min.to_string()), Some(max.to_string()))
        }
        None => SearchCriterion::equal(field, bounds),
    };
    Ok(criterion)
}

/// Parses `FIELD`, `FIELD:asc` or `FIELD:desc`
pub fn parse_sort(s: &str) -> Result<SortCriterion, String> {
    let (field, direction) = match s.rsplit_once(':') {
        Some((field, suffix)) => {
            let direction = SortDirection::parse(suffix)
                .ok_or_else(|| format!("unknown sort direction '{}' (use asc or desc)", suffix))?;
            (field, direction)
        }
        None => (s, SortDirection::Ascending),
    };
    if field.is_empty() {
        return Err(format!("missing field name in '{}'", s));
    }
    Ok(SortCriterion {
        field_name: field.to_string(),
        direction,
    })
}
