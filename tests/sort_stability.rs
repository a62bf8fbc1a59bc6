//! Sort Stability Tests
//!
//! Tests for multi-key sort invariants:
//! - Output is ordered by the cascading comparator
//! - Elements tied on every key keep their input order
//! - Already ordered input is returned unchanged

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;
use tabledb::executor::MultiKeySorter;
use tabledb::planner::SortKey;
use tabledb::{FieldDescriptor, Row, Schema, SearchCriterion, SortCriterion, SortDirection, Table};

// =============================================================================
// Helper Functions
// =============================================================================

fn random_rows(seed: u64, count: usize) -> Vec<Row> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            vec![
                ["a", "b", "c"][rng.gen_range(0..3)].to_string(),
                ["x", "y"][rng.gen_range(0..2)].to_string(),
                rng.gen_range(0..10).to_string(),
            ]
        })
        .collect()
}

fn keys() -> Vec<SortKey> {
    vec![
        SortKey {
            column: 0,
            direction: SortDirection::Ascending,
        },
        SortKey {
            column: 1,
            direction: SortDirection::Descending,
        },
    ]
}

// =============================================================================
// Sorter Tests
// =============================================================================

/// Sorted output agrees with the standard library's stable sort.
#[test]
fn test_agrees_with_stable_reference() {
    for seed in 0..10 {
        let rows = random_rows(seed, 97);
        let keys = keys();
        let sorter = MultiKeySorter::new(&rows, &keys);

        let mut ids: Vec<usize> = (0..rows.len()).collect();
        let mut reference = ids.clone();
        sorter.sort(&mut ids);
        reference.sort_by(|a, b| sorter.compare(*a, *b));

        assert_eq!(ids, reference, "seed {}", seed);
    }
}

/// Adjacent output elements never compare Greater; ties keep ascending input order.
#[test]
fn test_ties_preserve_input_order() {
    let rows = random_rows(77, 200);
    let keys = keys();
    let sorter = MultiKeySorter::new(&rows, &keys);

    let mut ids: Vec<usize> = (0..rows.len()).collect();
    sorter.sort(&mut ids);

    for pair in ids.windows(2) {
        match sorter.compare(pair[0], pair[1]) {
            Ordering::Less => {}
            Ordering::Equal => assert!(pair[0] < pair[1]),
            Ordering::Greater => panic!("out of order: {:?}", pair),
        }
    }
}

/// Sorting sorted input is a no-op.
#[test]
fn test_sorted_input_unchanged() {
    let rows = random_rows(3, 64);
    let keys = keys();
    let sorter = MultiKeySorter::new(&rows, &keys);

    let mut once: Vec<usize> = (0..rows.len()).rev().collect();
    sorter.sort(&mut once);
    let mut twice = once.clone();
    sorter.sort(&mut twice);
    assert_eq!(once, twice);
}

// =============================================================================
// Table-level Sorting
// =============================================================================

/// Unknown sort fields are skipped and the remaining keys still apply.
#[test]
fn test_table_sort_with_skipped_field() {
    let schema = Schema::new(vec![
        FieldDescriptor::indexed("LastName"),
        FieldDescriptor::plain("FirstName"),
    ])
    .unwrap();
    let mut table = Table::with_schema(schema);
    for (last, first) in [("Ayers", "Ofelia"), ("Baker", "Amy"), ("Ayers", "Bruno"), ("Ayers", "Ofelia")] {
        table.insert_row(vec![last.to_string(), first.to_string()]).unwrap();
    }

    let result = table
        .search(
            &[SearchCriterion::at_least("LastName", "A")],
            &[
                SortCriterion::asc("Height"),
                SortCriterion::asc("FirstName"),
                SortCriterion::desc("LastName"),
            ],
        )
        .unwrap();

    assert!(result.sorted);
    assert_eq!(result.skipped_sort_fields, vec!["Height".to_string()]);
    // Amy, Bruno, then the two identical Ofelia rows in insertion order
    assert_eq!(result.record_ids, vec![1, 2, 0, 3]);
}
