//! Output file naming.

use crate::config::Settings;
use crate::error::{Error, Result};
use std::path::Path;

/// Replaces every character that is not alphanumeric, `_`, `.` or `-` with `_`.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || matches!(c, '_' | '.' | '-') { c } else { '_' })
        .collect()
}

/// Extension of `path` with its leading dot, or an empty string.
pub fn extension_of(path: &Path) -> String {
    path.extension().map(|ext| format!(".{}", ext.to_string_lossy())).unwrap_or_default()
}

/// Builds `<sanitized-stem>_line<NNNN><extension>` for a 1-based row number.
pub fn output_file_name(template: &Path, line: usize) -> String {
    let stem = template.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    format!("{}_line{line:04}{}", sanitize_name(&stem), extension_of(template))
}

/// Checks that `template` can be turned into output names for every row.
///
/// The longest name is the one for the largest possible row number, so this
/// runs once per template before any processing.
///
/// # Errors
/// * `Error::InvalidExtension` when the extension is not allowed
/// * `Error::TemplateNameTooLong` when the worst-case name exceeds the limit
pub fn check_template_name(template: &Path, settings: &Settings) -> Result<()> {
    let extension = extension_of(template);
    if !settings.is_allowed_extension(&extension) {
        return Err(Error::InvalidExtension {
            path: template.display().to_string(),
            extension,
        });
    }

    let max = settings.limits.max_filename_length;
    let longest = output_file_name(template, settings.limits.max_rows).chars().count();
    if longest > max {
        let name = template
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        return Err(Error::TemplateNameTooLong { name, max, excess: longest - max });
    }
    Ok(())
}
