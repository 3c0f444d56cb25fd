use templproc::error::Error;
use templproc::validation::validate_inputs;
use templproc::values::ValueTable;

fn patterns(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn table(rows: &[&[&str]]) -> ValueTable {
    ValueTable::new(rows.iter().map(|r| r.iter().map(|s| s.to_string()).collect()).collect())
}

#[test]
fn test_aligned_rows_pass() {
    let warnings = validate_inputs(
        &patterns(&["@HOST@", "@PORT@"]),
        &table(&[&["web1", "8080"], &["web2", "9090"]]),
        4096,
    )
    .unwrap();
    assert!(warnings.is_empty());
}

#[test]
fn test_duplicate_patterns_are_all_named() {
    match validate_inputs(&patterns(&["@A@", "@B@", "@A@", "@B@", "@C@"]), &table(&[&["1"]]), 4096)
    {
        Err(Error::DuplicatePattern { duplicates }) => {
            assert_eq!(duplicates, vec!["@A@".to_string(), "@B@".to_string()]);
        }
        other => panic!("Expected DuplicatePattern, got {other:?}"),
    }
}

#[test]
fn test_short_row_names_missing_trailing_patterns() {
    match validate_inputs(
        &patterns(&["@HOST@", "@IP@", "@PORT@"]),
        &table(&[&["web1", "10.0.0.1", "80"], &["web2"]]),
        4096,
    ) {
        Err(Error::InsufficientValues { row, expected, actual, missing }) => {
            assert_eq!(row, 2);
            assert_eq!(expected, 3);
            assert_eq!(actual, 1);
            assert_eq!(missing, vec!["@IP@".to_string(), "@PORT@".to_string()]);
        }
        other => panic!("Expected InsufficientValues, got {other:?}"),
    }
}

#[test]
fn test_long_row_is_a_warning() {
    let warnings =
        validate_inputs(&patterns(&["@HOST@"]), &table(&[&["web1", "extra", "more"]]), 4096)
            .unwrap();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("Row 1"));
    assert!(warnings[0].contains("extra"));
}

#[test]
fn test_value_too_large() {
    let big = "x".repeat(11);
    let rows = ValueTable::new(vec![vec!["ok".to_string(), big]]);
    match validate_inputs(&patterns(&["@A@", "@B@"]), &rows, 10) {
        Err(Error::ValueTooLarge { row, column, size, max }) => {
            assert_eq!((row, column, size, max), (1, 2, 11, 10));
        }
        other => panic!("Expected ValueTooLarge, got {other:?}"),
    }
}

#[test]
fn test_null_byte_rejected() {
    assert!(matches!(
        validate_inputs(&patterns(&["@A@"]), &table(&[&["ok"], &["bad\0value"]]), 4096),
        Err(Error::NullByteRejected { row: 2, column: 1 })
    ));
}

#[test]
fn test_newline_is_flagged_not_rejected() {
    let warnings =
        validate_inputs(&patterns(&["@A@"]), &table(&[&["line1\nline2"]]), 4096).unwrap();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("newline"));
}
