//! CLI command implementations
//!
//! Each command loads the input file into a fresh table, does one thing and
//! returns the `data` payload. `run_command` wraps it in the response
//! envelope.

use std::path::Path;

use serde_json::{json, Value};

use crate::config::Config;
use crate::index::RecordId;
use crate::planner::{SearchCriterion, SortCriterion};
use crate::schema::SchemaLoader;
use crate::table::{DelimitedLoader, LoadSummary, Table, TableError};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

/// Main CLI entry point
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli)
}

/// Run a parsed command, printing exactly one response object
pub fn run_command(cli: Cli) -> CliResult<()> {
    match execute(cli) {
        Ok(data) => write_response(data),
        Err(err) => {
            write_error(err.code_str(), err.message())?;
            Err(err)
        }
    }
}

/// Run a parsed command and return its payload
pub fn execute(cli: Cli) -> CliResult<Value> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.apply_logging();

    match cli.command {
        Command::Schema { file } => schema(&config, &file),
        Command::Row { file, id } => row(&config, &file, id),
        Command::Query {
            file,
            criteria,
            sort,
            explain,
        } => query(&config, &file, &criteria, &sort, explain),
    }
}

fn load(config: &Config, file: &Path) -> CliResult<(Table, LoadSummary)> {
    Ok(DelimitedLoader::new(config.load_options()).load_path(file)?)
}

/// Describe the schema inferred from the header
pub fn schema(config: &Config, file: &Path) -> CliResult<Value> {
    let (table, summary) = load(config, file)?;
    let schema = table
        .schema()
        .ok_or_else(|| CliError::from(TableError::schema_unset()))?;

    Ok(json!({
        "fields": schema.fields(),
        "header": SchemaLoader::new(config.delimiter, config.index_marker).to_header(schema),
        "rows": table.row_count(),
        "load": summary,
    }))
}

/// Fetch one row by record id
pub fn row(config: &Config, file: &Path, id: RecordId) -> CliResult<Value> {
    let (table, _) = load(config, file)?;
    let values = table.get_row(id)?;
    Ok(json!({
        "id": id,
        "fields": table.schema().map(|s| s.names()).unwrap_or_default(),
        "values": values,
    }))
}

/// Run or explain a range query
pub fn query(
    config: &Config,
    file: &Path,
    criteria: &[SearchCriterion],
    sort: &[SortCriterion],
    explain: bool,
) -> CliResult<Value> {
    let (table, _) = load(config, file)?;

    if explain {
        return Ok(table.plan(criteria, sort)?.explain());
    }

    let result = table.search(criteria, sort)?;
    let rows = result
        .iter()
        .map(|id| table.get_row(id).map(|row| json!({"id": id, "values": row})))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(json!({
        "count": result.len(),
        "sorted": result.sorted,
        "skipped_sort_fields": result.skipped_sort_fields,
        "scanned_entries": result.scanned_entries,
        "rows": rows,
    }))
}
