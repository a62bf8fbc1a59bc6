//! Delimited text ingestion
//!
//! The first non-empty line is a header (see `SchemaLoader`); every later
//! non-empty line is one row. Rows with the wrong number of fields are
//! rejected and counted, never fatal.
//!
//! ```text
//! LastName*,Age*,FirstName
//! Adams,30,Zoe
//! Baker,25,Amy
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event};
use crate::planner::SortFieldPolicy;
use crate::schema::{Row, SchemaError, SchemaLoader, DEFAULT_DELIMITER, DEFAULT_INDEX_MARKER};

use super::table::Table;

/// Errors that abort a load
#[derive(Debug, Error)]
pub enum LoadError {
    /// Reading the input failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input has no header line
    #[error("Input is empty: no header line")]
    EmptyInput,

    /// Header line does not describe a valid schema
    #[error("{0}")]
    Schema(#[from] SchemaError),
}

/// Parsing options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Column separator
    pub delimiter: char,
    /// Header suffix that marks a column as indexed
    pub index_marker: char,
    /// Policy installed on the loaded table
    pub sort_field_policy: SortFieldPolicy,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            index_marker: DEFAULT_INDEX_MARKER,
            sort_field_policy: SortFieldPolicy::default(),
        }
    }
}

/// Outcome counts of one load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub rows_loaded: usize,
    pub rows_rejected: usize,
}

/// Builds tables from delimited text
#[derive(Debug, Clone, Copy, Default)]
pub struct DelimitedLoader {
    options: LoadOptions,
}

impl DelimitedLoader {
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    /// Loads a table from a file
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<(Table, LoadSummary), LoadError> {
        let path = path.as_ref();
        log_event_with_fields(Event::LoadStart, &[("path", &*path.to_string_lossy())]);
        let file = File::open(path)?;
        self.load(BufReader::new(file))
    }

    /// Loads a table from any buffered reader
    pub fn load<R: BufRead>(&self, reader: R) -> Result<(Table, LoadSummary), LoadError> {
        let mut lines = reader.lines();

        let header = loop {
            match lines.next() {
                Some(line) => {
                    let line = line?;
                    if !strip_line_end(&line).is_empty() {
                        break line;
                    }
                }
                None => return Err(LoadError::EmptyInput),
            }
        };

        let schema = SchemaLoader::new(self.options.delimiter, self.options.index_marker)
            .from_header(&header)
            .map_err(|err| {
                log_event_with_fields(Event::SchemaRejected, &[("reason", err.message())]);
                err
            })?;

        let mut table = Table::with_schema(schema);
        table.set_sort_field_policy(self.options.sort_field_policy);

        let mut summary = LoadSummary::default();
        for line in lines {
            let line = line?;
            let line = strip_line_end(&line);
            if line.is_empty() {
                continue;
            }
            // Arity failures are logged by the table.
            match table.insert_row(self.split(line)) {
                Ok(_) => summary.rows_loaded += 1,
                Err(_) => summary.rows_rejected += 1,
            }
        }

        let loaded = summary.rows_loaded.to_string();
        let rejected = summary.rows_rejected.to_string();
        log_event_with_fields(
            Event::LoadComplete,
            &[("rows_loaded", loaded.as_str()), ("rows_rejected", rejected.as_str())],
        );

        Ok((table, summary))
    }

    fn split(&self, line: &str) -> Row {
        line.split(self.options.delimiter).map(str::to_string).collect()
    }
}

fn strip_line_end(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}
