//! Error handling for templproc.
//! Defines the error type, its coarse classification and the exit code each
//! class maps to.

use std::io;
use thiserror::Error;

use crate::constants::exit_code;

/// Custom error types for templproc operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    #[error("Configuration error: {0}.")]
    ConfigError(String),

    #[error("No patterns provided.")]
    EmptyInput,

    #[error("Invalid pattern format: '{pattern}'. {hint}")]
    InvalidPatternFormat { pattern: String, hint: String },

    #[error(
        "Inconsistent delimiter in pattern '{pattern}': all patterns must use '{expected}' like the first one."
    )]
    InconsistentDelimiter { pattern: String, expected: char },

    #[error("Values file not found: {path}.")]
    ValuesFileNotFound { path: String },

    #[error("Values file {path} cannot be read as text: {reason}.")]
    MalformedValuesFile { path: String, reason: String },

    #[error("Too many value lines (max {max}).")]
    TooManyRows { max: usize },

    #[error("No values found.")]
    NoValuesFound,

    #[error("Duplicate patterns found: {duplicates:?}. Each pattern must be unique.")]
    DuplicatePattern { duplicates: Vec<String> },

    #[error("Value too large at row {row}, column {column}: {size} bytes (max {max} bytes).")]
    ValueTooLarge { row: usize, column: usize, size: usize, max: usize },

    #[error("Value at row {row}, column {column} contains a null byte.")]
    NullByteRejected { row: usize, column: usize },

    #[error(
        "Insufficient values in row {row}: need {expected} values, got {actual}. Missing values for patterns: {missing:?}."
    )]
    InsufficientValues { row: usize, expected: usize, actual: usize, missing: Vec<String> },

    #[error("No templates found: {template}.")]
    TemplateNotFound { template: String },

    #[error("No valid template files found in {template}.")]
    NoTemplatesFound { template: String },

    #[error("Unsupported template extension '{extension}' for {path}.")]
    InvalidExtension { path: String, extension: String },

    #[error("Template file too large: {path} is {size} bytes (max {max} bytes).")]
    TemplateTooLarge { path: String, size: u64, max: u64 },

    #[error(
        "Template filename too long: '{name}' would generate filenames exceeding {max} characters (by {excess} chars). Please rename it to be {excess} characters shorter."
    )]
    TemplateNameTooLong { name: String, max: usize, excess: usize },

    #[error("Template {path} is empty or contains only whitespace.")]
    EmptyTemplate { path: String },

    #[error("Too many templates: {count} (max {max}).")]
    TooManyTemplates { count: usize, max: usize },

    #[error("Total tasks ({count}) exceeds limit ({max}).")]
    TooManyTasks { count: usize, max: usize },

    #[error(
        "Output directory '{output_dir}' would be inside template directory '{template_dir}'. This could overwrite source templates."
    )]
    OutputOverlapsTemplates { output_dir: String, template_dir: String },

    #[error("Permission denied: {path}: {reason}.")]
    PermissionDenied { path: String, reason: String },

    #[error("Template '{template}' contains patterns without values: {placeholders:?}.")]
    UnboundPlaceholder { template: String, placeholders: Vec<String> },

    #[error(
        "Unreplaced patterns in {template} line {row}: {placeholders:?}. Output file would be broken."
    )]
    UnresolvedPlaceholder { template: String, row: usize, placeholders: Vec<String> },

    #[error("Unsafe output path {path}: {reason}.")]
    UnsafeOutputPath { path: String, reason: String },

    #[error("Processing completed with {failed} failures ({successful} successful).")]
    ProcessingFailed { successful: usize, failed: usize },

    #[error("Process interrupted by user.")]
    Interrupted,

    #[error("Glob error: {0}.")]
    GlobError(#[from] globset::Error),

    #[error("Directory walk error: {0}.")]
    WalkDirError(#[from] walkdir::Error),
}

/// Coarse classification of errors, one per distinguishable outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    PermissionDenied,
    UnsafeOutputPath,
    PlaceholderMismatch,
    ProcessingFailure,
    Interrupted,
}

impl ErrorKind {
    /// Process exit code reported for this kind of failure.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::InvalidInput | ErrorKind::PlaceholderMismatch => {
                exit_code::INVALID_INPUT
            }
            ErrorKind::NotFound => exit_code::NOT_FOUND,
            ErrorKind::PermissionDenied => exit_code::PERMISSION_DENIED,
            ErrorKind::UnsafeOutputPath | ErrorKind::ProcessingFailure => {
                exit_code::PROCESSING_FAILURE
            }
            ErrorKind::Interrupted => exit_code::INTERRUPTED,
        }
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::IoError(e) => match e.kind() {
                io::ErrorKind::NotFound => ErrorKind::NotFound,
                io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
                _ => ErrorKind::ProcessingFailure,
            },
            Error::ValuesFileNotFound { .. }
            | Error::TemplateNotFound { .. }
            | Error::NoTemplatesFound { .. } => ErrorKind::NotFound,
            Error::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Error::UnsafeOutputPath { .. } => ErrorKind::UnsafeOutputPath,
            Error::UnboundPlaceholder { .. } | Error::UnresolvedPlaceholder { .. } => {
                ErrorKind::PlaceholderMismatch
            }
            Error::ProcessingFailed { .. } | Error::WalkDirError(_) => {
                ErrorKind::ProcessingFailure
            }
            Error::Interrupted => ErrorKind::Interrupted,
            _ => ErrorKind::InvalidInput,
        }
    }

    /// Shortcut for `self.kind().exit_code()`.
    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }
}

/// Convenience type alias for Results with templproc's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that logs the error and exits with its mapped code.
pub fn default_error_handler(err: Error) -> ! {
    log::error!("{err}");
    std::process::exit(err.exit_code());
}
