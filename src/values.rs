//! Value table parsing.
//! A value argument is either an inline comma list or a path to a delimited
//! file; both produce an ordered table of rows.

use crate::constants::VALUE_FILE_EXTENSIONS;
use crate::error::{Error, Result};
use log::info;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Where the values come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    File(PathBuf),
    Inline(String),
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSource::File(path) => write!(f, "file '{}'", path.display()),
            ValueSource::Inline(_) => write!(f, "command line"),
        }
    }
}

impl ValueSource {
    /// Decides how to read `spec`.
    ///
    /// An existing file wins. Something that looks like a path but does not
    /// exist is an error rather than inline data.
    pub fn detect(spec: &str) -> Result<Self> {
        let path = Path::new(spec);
        if path.is_file() {
            return Ok(ValueSource::File(path.to_path_buf()));
        }
        if looks_like_file(spec) {
            return Err(Error::ValuesFileNotFound { path: spec.to_string() });
        }
        Ok(ValueSource::Inline(spec.to_string()))
    }
}

fn looks_like_file(spec: &str) -> bool {
    let lower = spec.to_lowercase();
    spec.contains('/')
        || spec.contains('\\')
        || VALUE_FILE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Ordered rows of values. Row order decides output numbering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueTable {
    rows: Vec<Vec<String>>,
}

impl ValueTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows paired with their 1-based line numbers.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &[String])> {
        self.rows.iter().enumerate().map(|(i, row)| (i + 1, row.as_slice()))
    }
}

/// Parses the value argument into a table of at most `max_rows` rows.
pub fn parse_values(spec: &str, max_rows: usize) -> Result<ValueTable> {
    let source = ValueSource::detect(spec)?;
    info!("Reading values from {source}");
    let rows = match &source {
        ValueSource::File(path) => {
            let content = fs::read_to_string(path).map_err(|e| match e.kind() {
                io::ErrorKind::InvalidData => Error::MalformedValuesFile {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                },
                _ => Error::IoError(e),
            })?;
            parse_delimited(&content, max_rows)?
        }
        ValueSource::Inline(text) => parse_inline(text, max_rows)?,
    };
    if rows.is_empty() {
        return Err(Error::NoValuesFound);
    }
    info!("Parsed {} value rows", rows.len());
    Ok(ValueTable::new(rows))
}

/// Parses file content: one row per line, fields split on TAB, `;` or `,`
/// (the first of those present wins). Blank and `#` lines are skipped.
pub fn parse_delimited(content: &str, max_rows: usize) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if rows.len() == max_rows {
            return Err(Error::TooManyRows { max: max_rows });
        }
        let row = match ['\t', ';', ','].into_iter().find(|sep| line.contains(*sep)) {
            Some(sep) => split_fields(line, sep),
            None => vec![line.to_string()],
        };
        if !row.is_empty() {
            rows.push(row);
        }
    }
    Ok(rows)
}

/// Parses an inline list: rows split on `,`, fields within a row on `;`.
pub fn parse_inline(text: &str, max_rows: usize) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    for item in text.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        if rows.len() == max_rows {
            return Err(Error::TooManyRows { max: max_rows });
        }
        let row = if item.contains(';') { split_fields(item, ';') } else { vec![item.to_string()] };
        if !row.is_empty() {
            rows.push(row);
        }
    }
    Ok(rows)
}

fn split_fields(line: &str, sep: char) -> Vec<String> {
    line.split(sep).map(str::trim).filter(|v| !v.is_empty()).map(String::from).collect()
}
