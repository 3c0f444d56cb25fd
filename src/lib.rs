//! templproc expands parameterized templates into concrete files.
//! Each template is rendered once per row of values, replacing delimiter
//! bounded placeholders such as `@HOST@` literally.

/// Command-line interface module
pub mod cli;

/// Limits and allowed extensions, overridable from a JSON or YAML file
pub mod config;

/// Common constants and exit codes
pub mod constants;

/// Error types, their classification and exit codes
pub mod error;

/// Ctrl+C handling
pub mod interrupt;

/// Template discovery and the per-run template cache
pub mod loader;

/// Logger configuration
pub mod logger;

/// Output file naming
pub mod naming;

/// Placeholder pattern parsing and naming policies
pub mod pattern;

/// Pre-flight checks and the task loop
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// Literal multi-pattern substitution
pub mod renderer;

/// Output path safety checks
pub mod safety;

/// Placeholder discovery in templates and outputs
pub mod scanner;

/// Output file creation with rollback
pub mod transaction;

/// Pattern/value cross validation
pub mod validation;

/// Value table parsing
pub mod values;
