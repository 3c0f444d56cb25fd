//! Cross-checks between the parsed pattern list and the value table.

use crate::constants::SPECIAL_CHARS;
use crate::error::{Error, Result};
use crate::values::ValueTable;
use indexmap::IndexSet;
use log::{debug, warn};

/// Validates patterns against value rows before any output is attempted.
///
/// Fatal problems (duplicate patterns, oversized values, null bytes, short
/// rows) return an error. Non-fatal findings are logged and returned.
///
/// # Errors
/// * `Error::DuplicatePattern` naming every repeated pattern
/// * `Error::ValueTooLarge` / `Error::NullByteRejected` for a bad field
/// * `Error::InsufficientValues` for the first row shorter than the pattern list
pub fn validate_inputs(
    patterns: &[String],
    table: &ValueTable,
    max_value_size: usize,
) -> Result<Vec<String>> {
    check_unique(patterns)?;

    let mut warnings = Vec::new();
    for (row, fields) in table.numbered() {
        for (column, value) in fields.iter().enumerate() {
            let column = column + 1;
            if value.len() > max_value_size {
                return Err(Error::ValueTooLarge {
                    row,
                    column,
                    size: value.len(),
                    max: max_value_size,
                });
            }
            if value.contains('\0') {
                return Err(Error::NullByteRejected { row, column });
            }
            if value.contains(['\n', '\r']) {
                warnings.push(format!(
                    "Value at row {row}, column {column} contains newline characters"
                ));
            }
            let special: String = SPECIAL_CHARS.iter().filter(|c| value.contains(**c)).collect();
            if !special.is_empty() {
                debug!(
                    "Value at row {row}, column {column} contains special characters: {special}"
                );
            }
        }
    }

    let expected = patterns.len();
    for (row, fields) in table.numbered() {
        let actual = fields.len();
        if actual < expected {
            return Err(Error::InsufficientValues {
                row,
                expected,
                actual,
                missing: patterns[actual..].to_vec(),
            });
        }
        if actual > expected {
            warnings.push(format!(
                "Row {row}: {actual} values but only {expected} patterns. Extra values will be ignored: {:?}",
                &fields[expected..]
            ));
        }
    }

    for warning in &warnings {
        warn!("{warning}");
    }
    Ok(warnings)
}

fn check_unique(patterns: &[String]) -> Result<()> {
    let mut seen = IndexSet::new();
    let mut duplicates = IndexSet::new();
    for pattern in patterns {
        if !seen.insert(pattern.as_str()) {
            duplicates.insert(pattern.clone());
        }
    }
    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(Error::DuplicatePattern { duplicates: duplicates.into_iter().collect() })
    }
}
