//! Template rendering for templproc.
//! Renders one template against one value row by literal token substitution.

/// Output of rendering one template with one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub content: String,
    /// Total token occurrences replaced across all patterns.
    pub replacements: usize,
}

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders `template` with the fields of one value row.
    ///
    /// # Arguments
    /// * `template` - Template text
    /// * `row` - Values, positionally matching the renderer's patterns
    fn render(&self, template: &str, row: &[String]) -> Rendered;
}

/// Literal multi-pattern substitution.
pub struct LiteralRenderer<'a> {
    patterns: &'a [String],
}

impl<'a> LiteralRenderer<'a> {
    pub fn new(patterns: &'a [String]) -> Self {
        Self { patterns }
    }
}

impl TemplateRenderer for LiteralRenderer<'_> {
    fn render(&self, template: &str, row: &[String]) -> Rendered {
        substitute(template, self.patterns, row)
    }
}

/// Replaces every `patterns[i]` in `template` with `row[i]`.
///
/// Only the first `min(patterns.len(), row.len())` pairs take part. Pairs are
/// applied longest token first so a shorter token can never match inside a
/// longer one before the longer one is replaced.
pub fn substitute(template: &str, patterns: &[String], row: &[String]) -> Rendered {
    let mut pairs: Vec<(&str, &str)> =
        patterns.iter().zip(row).map(|(p, v)| (p.as_str(), v.as_str())).collect();
    pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut content = template.to_string();
    let mut replacements = 0;
    for (pattern, value) in pairs {
        let count = content.matches(pattern).count();
        if count > 0 {
            content = content.replace(pattern, value);
            replacements += count;
        }
    }
    Rendered { content, replacements }
}
