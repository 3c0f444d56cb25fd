//! Common constants used throughout templproc.

/// Maximum template file size in bytes.
pub const MAX_TEMPLATE_SIZE: u64 = 100 * 1024;

/// Maximum size of a single value field in bytes.
pub const MAX_VALUE_SIZE: usize = 4 * 1024;

/// Maximum number of rows in a value table.
pub const MAX_VALUE_ROWS: usize = 3000;

/// Maximum number of templates in one run.
pub const MAX_TEMPLATES: usize = 3000;

/// Maximum number of (template, row) tasks in one run.
pub const MAX_TASKS: usize = 3000;

/// Filesystem limit for a generated file name.
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Template extensions accepted during discovery and output naming.
pub const ALLOWED_EXTENSIONS: [&str; 10] = [
    ".txt",
    ".conf",
    ".yaml",
    ".yml",
    ".json",
    ".xml",
    ".cfg",
    ".ini",
    ".template",
    ".tpl",
];

/// Extensions that make a value argument look like a file reference.
pub const VALUE_FILE_EXTENSIONS: [&str; 4] = [".txt", ".csv", ".dat", ".tsv"];

/// Characters in a value that are worth a debug note.
pub const SPECIAL_CHARS: [char; 13] =
    ['$', '^', '[', ']', '(', ')', '{', '}', '\\', '|', '*', '+', '?'];

/// Process exit codes callers can rely on.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const INVALID_INPUT: i32 = 1;
    pub const NOT_FOUND: i32 = 2;
    pub const PERMISSION_DENIED: i32 = 3;
    pub const PROCESSING_FAILURE: i32 = 4;
    pub const INTERRUPTED: i32 = 130;
}
