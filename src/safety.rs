//! Output path safety.
//!
//! Every write is gated by [`check_output_path`]; [`check_output_directory`]
//! runs once before a run so outputs can never land among the templates.

use crate::error::{Error, Result};
use log::warn;
use std::fs;
use std::path::{Component, Path, PathBuf};

fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path).map(|m| m.file_type().is_symlink()).unwrap_or(false)
}

fn unsafe_path(path: &Path, reason: impl Into<String>) -> Error {
    Error::UnsafeOutputPath { path: path.display().to_string(), reason: reason.into() }
}

/// Resolves `path` to an absolute, symlink-free form even when its tail does
/// not exist yet.
///
/// The deepest existing ancestor is canonicalized and the remaining
/// components are applied lexically.
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    let absolute =
        if path.is_absolute() { path.to_path_buf() } else { std::env::current_dir()?.join(path) };

    let mut existing = absolute.as_path();
    let mut tail = Vec::new();
    while !existing.exists() {
        match existing.parent() {
            Some(parent) => {
                tail.push(existing.components().next_back());
                existing = parent;
            }
            _ => break,
        }
    }

    let mut resolved = fs::canonicalize(existing)?;
    for component in tail.into_iter().rev().flatten() {
        match component {
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(part) => resolved.push(part),
            _ => {}
        }
    }
    Ok(resolved)
}

/// Verifies that `candidate` may be written as an output file of `output_dir`.
///
/// # Errors
/// * `Error::UnsafeOutputPath` when the candidate is a symlink, when a
///   directory between it and the output directory is a symlink, or when it
///   resolves outside the output directory
pub fn check_output_path(candidate: &Path, output_dir: &Path) -> Result<PathBuf> {
    if is_symlink(candidate) {
        return Err(unsafe_path(candidate, "target is a symbolic link"));
    }

    let mut current = candidate.parent();
    while let Some(dir) = current {
        if dir.as_os_str().is_empty() {
            break;
        }
        if is_symlink(dir) {
            return Err(unsafe_path(
                candidate,
                format!("directory '{}' is a symbolic link", dir.display()),
            ));
        }
        if dir == output_dir {
            break;
        }
        current = dir.parent();
    }

    let resolved = resolve_path(candidate)
        .map_err(|e| unsafe_path(candidate, format!("cannot be resolved: {e}")))?;
    let root = resolve_path(output_dir)
        .map_err(|e| unsafe_path(candidate, format!("output directory cannot be resolved: {e}")))?;
    if resolved == root || !resolved.starts_with(&root) {
        return Err(unsafe_path(
            candidate,
            format!("resolves outside output directory '{}'", root.display()),
        ));
    }
    Ok(resolved)
}

/// Rejects an output directory that equals or sits inside a template directory.
///
/// Template directories inside the output directory are allowed; each one is
/// returned and logged as a warning.
pub fn check_output_directory(output_dir: &Path, templates: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let output = resolve_path(output_dir)?;
    let mut nested = Vec::new();
    for template in templates {
        let Some(parent) = template.parent() else {
            continue;
        };
        let template_dir = resolve_path(parent)?;
        if output.starts_with(&template_dir) {
            return Err(Error::OutputOverlapsTemplates {
                output_dir: output_dir.display().to_string(),
                template_dir: template_dir.display().to_string(),
            });
        }
        if template_dir.starts_with(&output) && !nested.contains(&template_dir) {
            warn!(
                "Template directory '{}' is inside output directory '{}'. Be careful not to use output files as templates.",
                template_dir.display(),
                output_dir.display()
            );
            nested.push(template_dir);
        }
    }
    Ok(nested)
}
