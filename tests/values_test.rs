use std::fs;
use tempfile::TempDir;
use templproc::error::Error;
use templproc::values::{parse_delimited, parse_inline, parse_values, ValueSource};

#[test]
fn test_inline_values() {
    let table = parse_values("server1, server2 ,,server3", 3000).unwrap();
    assert_eq!(
        table.rows(),
        [vec!["server1".to_string()], vec!["server2".to_string()], vec!["server3".to_string()]]
    );
}

#[test]
fn test_inline_rows_with_semicolon_fields() {
    let rows = parse_inline("web1;8080,web2;9090", 3000).unwrap();
    assert_eq!(rows, vec![vec!["web1", "8080"], vec!["web2", "9090"]]);
}

#[test]
fn test_file_values() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("values.txt");
    let content =
        "# hosts\n\nweb1\t10.0.0.1\n  # indented comment\nweb2;10.0.0.2\nweb3,10.0.0.3\nsingle\n";
    fs::write(&path, content).unwrap();

    let table = parse_values(path.to_str().unwrap(), 3000).unwrap();
    assert_eq!(
        table.rows(),
        [
            vec!["web1".to_string(), "10.0.0.1".to_string()],
            vec!["web2".to_string(), "10.0.0.2".to_string()],
            vec!["web3".to_string(), "10.0.0.3".to_string()],
            vec!["single".to_string()],
        ]
    );
}

#[test]
fn test_first_delimiter_found_wins() {
    let rows = parse_delimited("a;b\tc,d\n", 10).unwrap();
    assert_eq!(rows, vec![vec!["a;b", "c,d"]]);

    let rows = parse_delimited("a,b;c\n", 10).unwrap();
    assert_eq!(rows, vec![vec!["a,b", "c"]]);
}

#[test]
fn test_row_limit_is_strict() {
    assert_eq!(parse_delimited("a\nb\n", 2).unwrap().len(), 2);
    assert!(matches!(parse_delimited("a\nb\nc\n", 2), Err(Error::TooManyRows { max: 2 })));
    assert!(matches!(parse_inline("a,b,c", 2), Err(Error::TooManyRows { max: 2 })));
}

#[test]
fn test_missing_file_like_value() {
    for spec in ["missing/values", "values.csv", "data.TXT", "C:\\values"] {
        match parse_values(spec, 3000) {
            Err(Error::ValuesFileNotFound { path }) => assert_eq!(path, spec),
            other => panic!("Expected ValuesFileNotFound for {spec}, got {other:?}"),
        }
    }
}

#[test]
fn test_no_values_found() {
    assert!(matches!(parse_values(" , ", 3000), Err(Error::NoValuesFound)));

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("values.txt");
    fs::write(&path, "# only comments\n\n").unwrap();
    assert!(matches!(parse_values(path.to_str().unwrap(), 3000), Err(Error::NoValuesFound)));
}

#[test]
fn test_value_source_detection() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("rows");
    fs::write(&path, "a\n").unwrap();

    assert_eq!(ValueSource::detect(path.to_str().unwrap()).unwrap(), ValueSource::File(path));
    assert_eq!(ValueSource::detect("a,b").unwrap(), ValueSource::Inline("a,b".to_string()));
}

#[test]
fn test_numbered_rows_start_at_one() {
    let table = parse_values("a,b", 3000).unwrap();
    let numbers: Vec<usize> = table.numbered().map(|(line, _)| line).collect();
    assert_eq!(numbers, vec![1, 2]);
}

#[test]
fn test_undecodable_values_file_is_invalid_input() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("values.txt");
    fs::write(&path, b"web1,\xFF\xFE\n").unwrap();

    let err = parse_values(path.to_str().unwrap(), 3000).unwrap_err();
    match &err {
        Error::MalformedValuesFile { path: reported, .. } => {
            assert!(reported.ends_with("values.txt"))
        }
        other => panic!("Expected MalformedValuesFile, got {other:?}"),
    }
    assert_eq!(err.exit_code(), 1);
}
