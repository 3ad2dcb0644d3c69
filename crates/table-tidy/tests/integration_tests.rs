//! Integration tests for loading and cleaning.
//!
//! These tests verify end-to-end behavior of the pipeline using small fixture
//! files that exercise every stage.

use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::path::PathBuf;
use table_tidy::frame::write_csv;
use table_tidy::{
    Cell, CleaningError, CleaningStage, Column, ColumnKind, IqrBounds, Pipeline, Table, clean,
    load,
};

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_fixture(filename: &str) -> Table {
    let path = fixtures_path().join(filename);
    let bytes = std::fs::read(path).expect("Failed to read fixture");
    load(&bytes).expect("Failed to load fixture")
}

fn has_missing(table: &Table) -> bool {
    table.rows().any(|row| row.iter().any(|cell| cell.is_missing()))
}

fn has_duplicate_rows(table: &Table) -> bool {
    let rendered: Vec<String> = table
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| format!("{:?}", cell))
                .collect::<Vec<_>>()
                .join("\u{1f}")
        })
        .collect();
    rendered.iter().collect::<HashSet<_>>().len() != rendered.len()
}

// ============================================================================
// Full Pipeline Tests
// ============================================================================

#[test]
fn test_full_pipeline_messy_fixture() {
    let raw = load_fixture("messy.csv");
    assert_eq!(raw.shape(), (8, 6));

    let table = clean(raw);

    assert_eq!(
        table.column_names(),
        vec!["customer_id", "full_name", "age", "city", "spend"]
    );
    // one all-missing row dropped, one duplicate removed
    assert_eq!(table.height(), 6);
    assert!(!has_missing(&table));
    assert!(!has_duplicate_rows(&table));

    let age = table.column("age").unwrap();
    assert_eq!(age.kind(), ColumnKind::Numeric);
    // "nan" and "x" filled with the median 34, then 29 capped at 29.5
    assert_eq!(age.numeric_values(), vec![34.0, 34.0, 29.5, 34.0, 41.0, 38.0]);

    let names: Vec<&str> = table.column("full_name").unwrap().text_values().collect();
    assert_eq!(names, vec!["Alice", "Bob", "Carol", "Dan", "Alice", "Eve"]);

    let cities: Vec<&str> = table.column("city").unwrap().text_values().collect();
    assert_eq!(cities, vec!["Paris", "London", "berlin", "Madrid", "Paris", "Paris"]);

    let spend = table.column("spend").unwrap().numeric_values();
    assert_eq!(spend[3], 157.8125);
}

#[test]
fn test_pipeline_summary_messy_fixture() {
    let result = Pipeline::new().process(load_fixture("messy.csv"));
    let summary = &result.summary;

    assert_eq!(summary.rows_before, 8);
    assert_eq!(summary.rows_after, 6);
    assert_eq!(summary.rows_removed, 2);
    assert_eq!(summary.columns_before, 6);
    assert_eq!(summary.columns_after, 5);
    assert_eq!(summary.columns_removed, 1);
    assert_eq!(summary.stages.len(), CleaningStage::ALL.len());

    let pruning = summary.stage(CleaningStage::Pruning).unwrap();
    assert_eq!((pruning.rows_after, pruning.columns_after), (7, 5));

    let dedup = summary.stage(CleaningStage::Deduplication).unwrap();
    assert_eq!(dedup.rows_after, 6);
    assert_eq!(dedup.actions.len(), 1);

    let json = serde_json::to_value(summary).unwrap();
    assert_eq!(json["stages"][0]["stage"], "header_normalization");
}

#[test]
fn test_semicolon_fixture() {
    let table = clean(load_fixture("semicolon.csv"));

    assert_eq!(table.column_names(), vec!["product", "price", "qty"]);
    assert_eq!(table.height(), 2);
    // decimal commas are not numbers
    assert_eq!(table.column("price").unwrap().kind(), ColumnKind::Text);
    assert_eq!(table.column("qty").unwrap().numeric_values(), vec![3.0, 3.0]);
}

#[test]
fn test_tab_fixture() {
    let table = clean(load_fixture("tabbed.tsv"));

    assert_eq!(table.column("score").unwrap().numeric_values(), vec![10.0, 20.0, 30.0]);
    // "a" and "b" tie; "a" was seen first
    let labels: Vec<&str> = table.column("label").unwrap().text_values().collect();
    assert_eq!(labels, vec!["a", "b", "a"]);
}

// ============================================================================
// Loader Edge Cases
// ============================================================================

#[test]
fn test_latin1_upload() {
    let bytes = b"Nom,Ville\nJos\xe9,Montr\xe9al\nAna\xefs,Qu\xe9bec\n";
    let table = clean(load(bytes).unwrap());

    let cities: Vec<&str> = table.column("ville").unwrap().text_values().collect();
    assert_eq!(cities, vec!["Montréal", "Québec"]);
}

#[test]
fn test_empty_upload_is_unparsable() {
    let err = load(b"").unwrap_err();
    assert!(matches!(err, CleaningError::UnparsableInput(_)));
    assert!(err.is_user_facing());

    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["code"], "UNPARSABLE_INPUT");
}

#[test]
fn test_ragged_upload_is_unparsable() {
    let err = load(b"a,b\n1,2\n3,4,5\n").unwrap_err();
    assert_eq!(err.error_code(), "UNPARSABLE_INPUT");
}

#[test]
fn test_na_tokens_take_the_mode() {
    let table = clean(load(b"city,age\nParis,1\nNULL,2\nParis,3\nN/A,4\n").unwrap());

    let cities: Vec<&str> = table.column("city").unwrap().text_values().collect();
    assert_eq!(cities, vec!["Paris", "Paris", "Paris", "Paris"]);
}

#[test]
fn test_all_na_token_column_is_pruned() {
    let table = clean(load(b"id,note\n1,N/A\n2,NULL\n3,\n").unwrap());
    assert_eq!(table.column_names(), vec!["id"]);
}

#[test]
fn test_multiline_quoted_field_survives_cleaning() {
    let table = clean(load(b"note,n\n\"first\n\nsecond\",1\n").unwrap());
    let notes: Vec<&str> = table.column("note").unwrap().text_values().collect();
    assert_eq!(notes, vec!["first\n\nsecond"]);
}

#[test]
fn test_header_only_upload() {
    let table = clean(load(b"First Name,Age\n").unwrap());
    assert_eq!(table.shape(), (0, 2));
    assert_eq!(table.column_names(), vec!["first_name", "age"]);
}

// ============================================================================
// Pipeline Properties
// ============================================================================

#[test]
fn test_header_collisions_are_suffixed() {
    let table = clean(load(b"Name, name ,name_1\na,b,c\n").unwrap());
    assert_eq!(table.column_names(), vec!["name", "name_2", "name_1"]);
}

#[test]
fn test_duplicate_raw_headers_are_suffixed() {
    let table = clean(load(b"x,x\n1,2\n").unwrap());
    assert_eq!(table.column_names(), vec!["x", "x_1"]);
}

#[test]
fn test_coercion_threshold_scenario() {
    let table = Table::new(vec![Column::text(
        "v",
        vec![Some("1"), Some("2"), Some("x"), Some("3")],
    )])
    .unwrap();

    let result = Pipeline::new().process(table);
    let coercion = result.summary.stage(CleaningStage::TypeCoercion).unwrap();
    assert!(coercion.actions[0].contains("3/4"));

    let imputation = result.summary.stage(CleaningStage::Imputation).unwrap();
    assert!(imputation.actions[0].contains("median 2.00"));
}

#[test]
fn test_coercion_rejection_scenario() {
    let table = Table::new(vec![Column::text(
        "v",
        vec![Some("a"), Some("b"), Some("1"), Some("c")],
    )])
    .unwrap();

    let cleaned = clean(table);
    let column = cleaned.column("v").unwrap();
    assert_eq!(column.kind(), ColumnKind::Text);
    assert_eq!(column.cells()[2], Cell::Text("1".to_string()));
}

#[test]
fn test_all_missing_text_column_filled_with_unknown() {
    // the column survives pruning because sanitizing runs after it
    let table = clean(load(b"id,comment\n1,nan\n2,  \n").unwrap());
    let comments: Vec<&str> = table.column("comment").unwrap().text_values().collect();
    assert_eq!(comments, vec!["Unknown", "Unknown"]);
}

#[test]
fn test_outliers_bounded_by_pre_capping_fences() {
    let values = vec![5.0, 7.0, 6.0, 5.5, -40.0, 6.5, 90.0, 6.25];
    let bounds = IqrBounds::from_values(&values, 1.5).unwrap();

    let table = Table::new(vec![Column::numeric(
        "reading",
        values.iter().copied().map(Some),
    )])
    .unwrap();
    let cleaned = clean(table);

    for v in cleaned.column("reading").unwrap().numeric_values() {
        assert!(v >= bounds.lower && v <= bounds.upper, "{} outside bounds", v);
    }
}

#[test]
fn test_clean_is_idempotent() {
    let once = clean(load_fixture("messy.csv"));
    let twice = clean(once.clone());
    assert_eq!(twice, once);
}

#[test]
fn test_zero_row_table_passes_through() {
    let table = Table::new(vec![
        Column::text(" Mixed Case ", Vec::<Option<&str>>::new()),
        Column::numeric("n", Vec::<Option<f64>>::new()),
    ])
    .unwrap();

    let result = Pipeline::new().process(table);
    assert_eq!(result.table.shape(), (0, 2));
    assert_eq!(result.table.column_names(), vec!["mixed_case", "n"]);
    assert_eq!(result.summary.rows_removed, 0);
}

#[test]
fn test_concurrent_cleaning_is_deterministic() {
    let bytes = std::fs::read(fixtures_path().join("messy.csv")).unwrap();
    let expected = clean(load(&bytes).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let bytes = bytes.clone();
            std::thread::spawn(move || clean(load(&bytes).unwrap()))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_write_csv_round_trip() {
    let cleaned = clean(load_fixture("messy.csv"));

    let mut buf = Vec::new();
    write_csv(&cleaned, &mut buf).unwrap();
    let reloaded = load(&buf).unwrap();

    assert_eq!(reloaded, cleaned);
}

#[test]
fn test_dataframe_conversion() {
    let cleaned = clean(load_fixture("messy.csv"));
    let df = cleaned.to_dataframe().unwrap();

    assert_eq!(df.shape(), cleaned.shape());
    assert_eq!(Table::from_dataframe(&df).unwrap(), cleaned);
}
