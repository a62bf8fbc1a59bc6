//! Table Lifecycle Tests
//!
//! Tests for table invariants:
//! - Record ids are sequential and `get_row` round-trips
//! - Schema must be set, indexed, and fixed once rows exist
//! - Rejected rows leave the table unchanged
//! - Delimited files load into a searchable table

use std::io::Write;

use tabledb::config::Config;
use tabledb::table::{DelimitedLoader, LoadError, LoadOptions};
use tabledb::{FieldDescriptor, Row, Schema, SearchCriterion, SortCriterion, Table, TableErrorCode};
use tempfile::NamedTempFile;

// =============================================================================
// Helper Functions
// =============================================================================

fn row(values: &[&str]) -> Row {
    values.iter().map(|v| v.to_string()).collect()
}

fn two_column_schema() -> Schema {
    Schema::new(vec![FieldDescriptor::indexed("Key"), FieldDescriptor::plain("Value")]).unwrap()
}

fn write_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// =============================================================================
// Row Round-trip
// =============================================================================

/// Every inserted row comes back under its insertion position.
#[test]
fn test_get_row_round_trip() {
    let mut table = Table::with_schema(two_column_schema());
    let inserted: Vec<Row> = (0..25)
        .map(|i| vec![format!("k{}", i % 4), i.to_string()])
        .collect();

    for (expected_id, r) in inserted.iter().enumerate() {
        assert_eq!(table.insert_row(r.clone()).unwrap(), expected_id);
    }
    for (id, r) in inserted.iter().enumerate() {
        assert_eq!(table.get_row(id).unwrap(), r);
    }

    let err = table.get_row(inserted.len()).unwrap_err();
    assert_eq!(err.code(), TableErrorCode::TdbRowNotFound);
}

// =============================================================================
// Schema Lifecycle
// =============================================================================

/// A schema without an indexed field never reaches a table.
#[test]
fn test_unindexed_schema_rejected() {
    assert!(Schema::new(vec![FieldDescriptor::plain("a")]).is_err());
}

/// Inserts wait for a schema; then the schema is fixed.
#[test]
fn test_schema_lifecycle() {
    let mut table = Table::new();
    let err = table.insert_row(row(&["k", "v"])).unwrap_err();
    assert_eq!(err.code(), TableErrorCode::TdbSchemaInvalid);

    let err = table
        .search(&[SearchCriterion::at_least("Key", "a")], &[])
        .unwrap_err();
    assert_eq!(err.code(), TableErrorCode::TdbSchemaInvalid);

    table.specify_schema(two_column_schema()).unwrap();
    table.insert_row(row(&["k", "v"])).unwrap();

    let err = table.specify_schema(two_column_schema()).unwrap_err();
    assert_eq!(err.code(), TableErrorCode::TdbSchemaInvalid);
    assert_eq!(table.row_count(), 1);
}

/// Arity failures do not consume record ids.
#[test]
fn test_rejected_row_does_not_consume_id() {
    let mut table = Table::with_schema(two_column_schema());
    assert_eq!(table.insert_row(row(&["a", "1"])).unwrap(), 0);
    assert!(table.insert_row(row(&["b"])).is_err());
    assert!(table.insert_row(row(&["c", "3", "extra"])).is_err());
    assert_eq!(table.insert_row(row(&["d", "4"])).unwrap(), 1);

    let found = table
        .search(&[SearchCriterion::at_least("Key", "a")], &[])
        .unwrap();
    assert_eq!(found.record_ids, vec![0, 1]);

    let metrics = table.metrics();
    assert_eq!(metrics.rows_inserted, 2);
    assert_eq!(metrics.rows_rejected, 2);
}

// =============================================================================
// Delimited Loading
// =============================================================================

/// A file with a marked header loads and answers queries.
#[test]
fn test_load_file_and_query() {
    let file = write_file(
        "LastName*,Age*,FirstName\n\
         Adams,30,Zoe\n\
         Baker,25,Amy\n\
         Broken,row\n\
         Nolan,40,Bob\n",
    );

    let (table, summary) = DelimitedLoader::default().load_path(file.path()).unwrap();
    assert_eq!(summary.rows_loaded, 3);
    assert_eq!(summary.rows_rejected, 1);

    let result = table
        .search(
            &[
                SearchCriterion::range("LastName", "A", "N"),
                SearchCriterion::at_most("Age", "35"),
            ],
            &[SortCriterion::asc("LastName")],
        )
        .unwrap();
    assert_eq!(result.record_ids, vec![0, 1]);
    assert_eq!(table.get_row(2).unwrap(), &row(&["Nolan", "40", "Bob"]));
}

/// Options from a config file drive parsing.
#[test]
fn test_load_with_config_options() {
    let config_file = write_file(r#"{"delimiter": ";", "index_marker": "!"}"#);
    let config = Config::load(config_file.path()).unwrap();

    let data = write_file("id!;label\r\n1;a,b\r\n2;c\r\n");
    let (table, summary) = DelimitedLoader::new(config.load_options())
        .load_path(data.path())
        .unwrap();

    assert_eq!(summary.rows_loaded, 2);
    assert_eq!(table.get_row(0).unwrap(), &row(&["1", "a,b"]));
    assert_eq!(table.schema().unwrap().indexed_columns(), vec![0]);
}

/// A `#` index marker from the config file marks header columns.
#[test]
fn test_load_with_hash_marker_config() {
    let config_file = write_file(
        r##"{"delimiter": "|", "index_marker": "#", "sort_field_policy": "reject"}"##,
    );
    let config = Config::load(config_file.path()).unwrap();
    assert_eq!(config.index_marker, '#');

    let data = write_file("Zip#|City#|Street\n02134|Boston|Main\n73301|Austin|Congress\n");
    let (table, summary) = DelimitedLoader::new(config.load_options())
        .load_path(data.path())
        .unwrap();

    assert_eq!(summary.rows_loaded, 2);
    assert_eq!(table.schema().unwrap().indexed_columns(), vec![0, 1]);
    let found = table
        .search(&[SearchCriterion::at_least("City", "B")], &[])
        .unwrap();
    assert_eq!(found.record_ids, vec![0]);
}

/// Header problems abort the load.
#[test]
fn test_load_failures() {
    let empty = write_file("");
    assert!(matches!(
        DelimitedLoader::default().load_path(empty.path()),
        Err(LoadError::EmptyInput)
    ));

    let unindexed = write_file("a,b\n1,2\n");
    assert!(matches!(
        DelimitedLoader::new(LoadOptions::default()).load_path(unindexed.path()),
        Err(LoadError::Schema(_))
    ));
}
