use std::io;

use templproc::constants::exit_code;
use templproc::error::{Error, ErrorKind};

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_error_display() {
    let err = Error::ConfigError("invalid config".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid config.");

    let err = Error::DuplicatePattern { duplicates: vec!["@HOST@".to_string()] };
    assert_eq!(
        err.to_string(),
        "Duplicate patterns found: [\"@HOST@\"]. Each pattern must be unique."
    );

    let err = Error::ValueTooLarge { row: 2, column: 3, size: 5000, max: 4096 };
    assert!(err.to_string().contains("row 2, column 3"));
}

#[test]
fn test_error_kinds() {
    assert_eq!(Error::EmptyInput.kind(), ErrorKind::InvalidInput);
    assert_eq!(
        Error::ValuesFileNotFound { path: "v.txt".into() }.kind(),
        ErrorKind::NotFound
    );
    assert_eq!(
        Error::UnboundPlaceholder { template: "t".into(), placeholders: vec![] }.kind(),
        ErrorKind::PlaceholderMismatch
    );
    assert_eq!(
        Error::UnsafeOutputPath { path: "p".into(), reason: "r".into() }.kind(),
        ErrorKind::UnsafeOutputPath
    );
    assert_eq!(
        Error::PermissionDenied { path: "p".into(), reason: "r".into() }.kind(),
        ErrorKind::PermissionDenied
    );
    assert_eq!(
        Error::ProcessingFailed { successful: 1, failed: 1 }.kind(),
        ErrorKind::ProcessingFailure
    );
    assert_eq!(Error::Interrupted.kind(), ErrorKind::Interrupted);
}

#[test]
fn test_exit_codes() {
    assert_eq!(Error::NoValuesFound.exit_code(), exit_code::INVALID_INPUT);
    assert_eq!(
        Error::TemplateNotFound { template: "x".into() }.exit_code(),
        exit_code::NOT_FOUND
    );
    assert_eq!(
        Error::PermissionDenied { path: "p".into(), reason: "r".into() }.exit_code(),
        exit_code::PERMISSION_DENIED
    );
    assert_eq!(
        Error::ProcessingFailed { successful: 0, failed: 2 }.exit_code(),
        exit_code::PROCESSING_FAILURE
    );
    assert_eq!(Error::Interrupted.exit_code(), exit_code::INTERRUPTED);

    let denied: Error = io::Error::new(io::ErrorKind::PermissionDenied, "nope").into();
    assert_eq!(denied.exit_code(), exit_code::PERMISSION_DENIED);
}
