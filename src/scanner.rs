//! Placeholder discovery in template and output text.
//!
//! Scanning is permissive about case and hyphens whatever naming policy the
//! patterns were parsed with: it finds candidates, it does not enforce names.

use crate::error::{Error, Result};
use crate::pattern::{Delimiter, PatternList};
use log::{debug, warn};
use regex::Regex;
use std::collections::BTreeSet;

/// Finds placeholder-shaped tokens bounded by one delimiter.
#[derive(Debug, Clone)]
pub struct PlaceholderScanner {
    delimiter: Delimiter,
    regex: Regex,
}

impl PlaceholderScanner {
    pub fn new(delimiter: Delimiter) -> Self {
        let d = regex::escape(&delimiter.as_char().to_string());
        let regex = Regex::new(&format!("{d}[A-Za-z_][A-Za-z0-9_-]*{d}"))
            .expect("placeholder regex is valid");
        Self { delimiter, regex }
    }

    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    /// Returns the distinct tokens present in `text`.
    pub fn scan(&self, text: &str) -> BTreeSet<String> {
        self.regex.find_iter(text).map(|m| m.as_str().to_string()).collect()
    }

    /// Audits a raw template: every token found must be among `patterns`.
    ///
    /// Returns the tokens with no supplied pattern. In strict mode a
    /// non-empty result is an `Error::UnboundPlaceholder` instead.
    pub fn check_template(
        &self,
        content: &str,
        patterns: &PatternList,
        template: &str,
        force: bool,
    ) -> Result<Vec<String>> {
        let found = self.scan(content);
        if !found.is_empty() {
            debug!("Template '{template}' contains patterns: {found:?}");
        }
        let missing: Vec<String> =
            found.into_iter().filter(|token| !patterns.contains(token)).collect();
        if missing.is_empty() {
            return Ok(missing);
        }
        if !force {
            return Err(Error::UnboundPlaceholder {
                template: template.to_string(),
                placeholders: missing,
            });
        }
        warn!("FORCE MODE: Template '{template}' contains patterns without values: {missing:?}");
        Ok(missing)
    }

    /// Audits substituted output: any token left is unresolved.
    ///
    /// In strict mode leftovers are an `Error::UnresolvedPlaceholder`; with
    /// `force` they are logged and returned.
    pub fn check_output(
        &self,
        output: &str,
        template: &str,
        row: usize,
        force: bool,
    ) -> Result<Vec<String>> {
        let remaining: Vec<String> = self.scan(output).into_iter().collect();
        if remaining.is_empty() {
            return Ok(remaining);
        }
        if !force {
            return Err(Error::UnresolvedPlaceholder {
                template: template.to_string(),
                row,
                placeholders: remaining,
            });
        }
        warn!("FORCE MODE: Unreplaced patterns in {template} line {row}: {remaining:?}");
        Ok(remaining)
    }
}

/// Convenience wrapper building a scanner for a single call.
pub fn scan_placeholders(text: &str, delimiter: Delimiter) -> BTreeSet<String> {
    PlaceholderScanner::new(delimiter).scan(text)
}

/// A supplied pattern whose name appears in the template only with different case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseMismatch {
    pub pattern: String,
    pub found: String,
}

/// Patterns that do not occur verbatim in `content`, plus case-mismatch hints.
///
/// Neither finding is an error; both are logged as warnings.
pub fn find_absent_patterns(
    content: &str,
    patterns: &PatternList,
    template: &str,
) -> (Vec<String>, Vec<CaseMismatch>) {
    let delimiter = patterns.delimiter();
    let mut absent = Vec::new();
    let mut hints = Vec::new();
    for pattern in patterns.iter() {
        if content.contains(pattern.as_str()) {
            continue;
        }
        absent.push(pattern.clone());
        let Some(name) = delimiter.strip(pattern) else {
            continue;
        };
        let upper = delimiter.wrap(&name.to_uppercase());
        let lower = delimiter.wrap(&name.to_lowercase());
        let found = if upper != *pattern && content.contains(&upper) {
            Some(upper)
        } else if lower != *pattern && content.contains(&lower) {
            Some(lower)
        } else {
            None
        };
        if let Some(found) = found {
            warn!("Found '{found}' in template {template}, but pattern is '{pattern}'");
            hints.push(CaseMismatch { pattern: pattern.clone(), found });
        }
    }
    if !absent.is_empty() {
        warn!("Patterns not found in template {template}: {absent:?}");
    }
    (absent, hints)
}
