//! Placeholder pattern parsing.
//! Turns the operator's comma-separated pattern argument into an ordered
//! token list sharing one delimiter and one naming policy.

use crate::error::{Error, Result};
use std::fmt;

/// Delimiter character bounding a placeholder name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// `@NAME@`
    At,
    /// `%NAME%`
    Percent,
}

impl Delimiter {
    pub const ALL: [Delimiter; 2] = [Delimiter::At, Delimiter::Percent];

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '@' => Some(Delimiter::At),
            '%' => Some(Delimiter::Percent),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Delimiter::At => '@',
            Delimiter::Percent => '%',
        }
    }

    /// Wraps `name` in this delimiter.
    pub fn wrap(self, name: &str) -> String {
        let d = self.as_char();
        format!("{d}{name}{d}")
    }

    /// Returns the name inside `token` when it is bounded by this delimiter.
    pub fn strip<'a>(self, token: &'a str) -> Option<&'a str> {
        let d = self.as_char();
        token.strip_prefix(d)?.strip_suffix(d)
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Character class a placeholder name must satisfy.
///
/// The base class is `[A-Z_][A-Z0-9_]*`. Mixed case admits lowercase letters
/// anywhere, hyphenated admits `-` after the first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamePolicy {
    #[default]
    StrictUpper,
    MixedCase,
    Hyphenated,
    MixedHyphenated,
}

impl NamePolicy {
    pub fn from_flags(mixed_case: bool, allow_hyphen: bool) -> Self {
        match (mixed_case, allow_hyphen) {
            (false, false) => NamePolicy::StrictUpper,
            (true, false) => NamePolicy::MixedCase,
            (false, true) => NamePolicy::Hyphenated,
            (true, true) => NamePolicy::MixedHyphenated,
        }
    }

    pub fn allows_mixed_case(self) -> bool {
        matches!(self, NamePolicy::MixedCase | NamePolicy::MixedHyphenated)
    }

    pub fn allows_hyphen(self) -> bool {
        matches!(self, NamePolicy::Hyphenated | NamePolicy::MixedHyphenated)
    }

    /// Equivalent regular expression, for messages.
    pub fn describe(self) -> &'static str {
        match self {
            NamePolicy::StrictUpper => "[A-Z_][A-Z0-9_]*",
            NamePolicy::MixedCase => "[A-Za-z_][A-Za-z0-9_]*",
            NamePolicy::Hyphenated => "[A-Z_][A-Z0-9_-]*",
            NamePolicy::MixedHyphenated => "[A-Za-z_][A-Za-z0-9_-]*",
        }
    }

    fn allows_letter(self, c: char) -> bool {
        c.is_ascii_uppercase() || (self.allows_mixed_case() && c.is_ascii_lowercase())
    }

    /// Checks `name` (without delimiters) against this policy.
    pub fn accepts(self, name: &str) -> bool {
        let mut chars = name.chars();
        let Some(first) = chars.next() else {
            return false;
        };
        if !(first == '_' || self.allows_letter(first)) {
            return false;
        }
        chars.all(|c| {
            c == '_'
                || c.is_ascii_digit()
                || self.allows_letter(c)
                || (c == '-' && self.allows_hyphen())
        })
    }

    /// Explains which flag would make `name` acceptable, if any single cause is detectable.
    fn rejection_hint(self, name: &str, delimiter: Delimiter) -> String {
        let example = delimiter.wrap("PATTERN_NAME");
        let needs_case = !self.allows_mixed_case()
            && NamePolicy::from_flags(true, self.allows_hyphen()).accepts(name);
        let needs_hyphen = !self.allows_hyphen()
            && NamePolicy::from_flags(self.allows_mixed_case(), true).accepts(name);
        let needs_both = !needs_case
            && !needs_hyphen
            && self != NamePolicy::MixedHyphenated
            && NamePolicy::MixedHyphenated.accepts(name);

        if needs_case {
            format!(
                "Lowercase letters are not allowed; use --mixed-case or rename it like {example}."
            )
        } else if needs_hyphen {
            format!("Hyphens are not allowed; use --allow-hyphen or rename it like {example}.")
        } else if needs_both {
            format!(
                "Lowercase letters and hyphens need --mixed-case and --allow-hyphen; or rename it like {example}."
            )
        } else {
            format!("Use {example} (name must match {}).", self.describe())
        }
    }
}

/// Ordered list of placeholder tokens supplied by the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternList {
    patterns: Vec<String>,
    delimiter: Delimiter,
}

impl PatternList {
    /// Parses a comma-separated pattern specification.
    ///
    /// The delimiter is taken from the first pattern; every following pattern
    /// must use it too. Duplicates are kept here and rejected by
    /// [`crate::validation::validate_inputs`].
    pub fn parse(input: &str, policy: NamePolicy) -> Result<Self> {
        let items: Vec<&str> =
            input.split(',').map(str::trim).filter(|item| !item.is_empty()).collect();
        let Some(first) = items.first() else {
            return Err(Error::EmptyInput);
        };

        let delimiter = detect_delimiter(first).ok_or_else(|| Error::InvalidPatternFormat {
            pattern: first.to_string(),
            hint: format!(
                "Patterns must start and end with one of: {}.",
                Delimiter::ALL.map(|d| d.wrap("NAME")).join(", ")
            ),
        })?;

        let mut patterns = Vec::with_capacity(items.len());
        for item in items {
            let name = match delimiter.strip(item) {
                Some(name) => name,
                None if detect_delimiter(item).is_some() => {
                    return Err(Error::InconsistentDelimiter {
                        pattern: item.to_string(),
                        expected: delimiter.as_char(),
                    })
                }
                None => {
                    return Err(Error::InvalidPatternFormat {
                        pattern: item.to_string(),
                        hint: format!("Use {}.", delimiter.wrap("PATTERN_NAME")),
                    })
                }
            };
            if !policy.accepts(name) {
                return Err(Error::InvalidPatternFormat {
                    pattern: item.to_string(),
                    hint: policy.rejection_hint(name, delimiter),
                });
            }
            patterns.push(item.to_string());
        }

        Ok(Self { patterns, delimiter })
    }

    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    pub fn as_slice(&self) -> &[String] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.patterns.iter().any(|p| p == token)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.patterns.iter()
    }
}

fn detect_delimiter(token: &str) -> Option<Delimiter> {
    let first = token.chars().next()?;
    let delimiter = Delimiter::from_char(first)?;
    delimiter.strip(token).map(|_| delimiter)
}
