//! Query Intersection Tests
//!
//! Tests for search invariants:
//! - Matched set equals a brute-force filter over all rows
//! - Unsorted results are in ascending record id order
//! - Non-indexed criteria intersect like indexed ones
//! - Validation failures leave the table usable

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tabledb::{FieldDescriptor, Row, Schema, SearchCriterion, Table, TableErrorCode};

// =============================================================================
// Helper Functions
// =============================================================================

const FIELDS: [&str; 3] = ["City", "Age", "Name"];

fn random_value(rng: &mut StdRng, column: usize) -> String {
    match column {
        0 => ["Austin", "Boston", "Chicago", "Denver", "El Paso"][rng.gen_range(0..5)].to_string(),
        // Unpadded numbers: compared as strings, "100" < "35"
        1 => rng.gen_range(0..120).to_string(),
        _ => {
            let len = rng.gen_range(1..4);
            (0..len).map(|_| rng.gen_range(b'a'..=b'e') as char).collect()
        }
    }
}

fn random_table(seed: u64, rows: usize) -> Table {
    let schema = Schema::new(vec![
        FieldDescriptor::indexed(FIELDS[0]),
        FieldDescriptor::indexed(FIELDS[1]),
        FieldDescriptor::plain(FIELDS[2]),
    ])
    .unwrap();
    let mut table = Table::with_schema(schema);
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..rows {
        let row: Row = (0..3).map(|c| random_value(&mut rng, c)).collect();
        table.insert_row(row).unwrap();
    }
    table
}

fn random_criterion(rng: &mut StdRng) -> SearchCriterion {
    let column = rng.gen_range(0..3);
    let a = random_value(rng, column);
    let b = random_value(rng, column);
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    match rng.gen_range(0..3) {
        0 => SearchCriterion::range(FIELDS[column], low, high),
        1 => SearchCriterion::at_least(FIELDS[column], low),
        _ => SearchCriterion::at_most(FIELDS[column], high),
    }
}

fn satisfies(row: &Row, criterion: &SearchCriterion) -> bool {
    let column = FIELDS.iter().position(|f| *f == criterion.field_name).unwrap();
    let value = row[column].as_str();
    criterion.min_value.as_deref().map_or(true, |min| value >= min)
        && criterion.max_value.as_deref().map_or(true, |max| value <= max)
}

fn brute_force(table: &Table, criteria: &[SearchCriterion]) -> Vec<usize> {
    (0..table.row_count())
        .filter(|&id| {
            let row = table.get_row(id).unwrap();
            criteria.iter().all(|c| satisfies(row, c))
        })
        .collect()
}

// =============================================================================
// Intersection Property
// =============================================================================

/// Randomized queries agree with a linear filter.
#[test]
fn test_matches_brute_force() {
    for seed in 0..8 {
        let table = random_table(seed, 250);
        let mut rng = StdRng::seed_from_u64(seed + 1000);

        for _ in 0..40 {
            let count = rng.gen_range(1..4);
            let criteria: Vec<SearchCriterion> =
                (0..count).map(|_| random_criterion(&mut rng)).collect();

            let result = table.search(&criteria, &[]).unwrap();
            assert_eq!(
                result.record_ids,
                brute_force(&table, &criteria),
                "seed {} criteria {:?}",
                seed,
                criteria
            );
        }
    }
}

/// The concrete three-row scenario.
#[test]
fn test_people_scenario() {
    let schema = Schema::new(vec![
        FieldDescriptor::indexed("LastName"),
        FieldDescriptor::indexed("Age"),
        FieldDescriptor::plain("FirstName"),
    ])
    .unwrap();
    let mut table = Table::with_schema(schema);
    for values in [["Adams", "30", "Zoe"], ["Baker", "25", "Amy"], ["Nolan", "40", "Bob"]] {
        table
            .insert_row(values.iter().map(|v| v.to_string()).collect())
            .unwrap();
    }

    let criteria = [
        SearchCriterion::range("LastName", "A", "N"),
        SearchCriterion::at_most("Age", "35"),
    ];
    let result = table.search(&criteria, &[]).unwrap();
    assert_eq!(result.record_ids, vec![0, 1]);
}

/// Repeating a query gives the same answer; nothing leaks between searches.
#[test]
fn test_repeated_queries_are_independent() {
    let table = random_table(42, 100);
    let first = [SearchCriterion::at_least("City", "Boston")];
    let second = [SearchCriterion::at_most("Age", "5")];

    let a = table.search(&first, &[]).unwrap();
    let _ = table.search(&second, &[]).unwrap();
    let b = table.search(&first, &[]).unwrap();
    assert_eq!(a, b);
}

// =============================================================================
// Validation
// =============================================================================

/// Invalid queries are rejected and the table keeps answering.
#[test]
fn test_rejections_do_not_poison_table() {
    let table = random_table(5, 50);

    let err = table.search(&[], &[]).unwrap_err();
    assert_eq!(err.code(), TableErrorCode::TdbQueryInvalid);

    let err = table
        .search(&[SearchCriterion::new("Age", None, None)], &[])
        .unwrap_err();
    assert_eq!(err.code(), TableErrorCode::TdbQueryInvalid);

    let err = table
        .search(&[SearchCriterion::at_least("Zip", "0")], &[])
        .unwrap_err();
    assert_eq!(err.code(), TableErrorCode::TdbUnknownField);

    // An empty bound counts as absent
    let empty_bound = table.search(&[SearchCriterion::at_least("City", "")], &[]);
    assert!(empty_bound.is_err());

    let all = table.search(&[SearchCriterion::at_least("City", "A")], &[]).unwrap();
    assert_eq!(all.len(), 50);
}

/// Zero matches is an empty result, not an error.
#[test]
fn test_zero_matches() {
    let table = random_table(9, 30);
    let result = table
        .search(&[SearchCriterion::at_least("City", "Zurich")], &[])
        .unwrap();
    assert!(result.is_empty());
}
