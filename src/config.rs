//! Run settings for templproc.
//! Limits and allowed extensions default to the values in `constants` and can
//! be overridden from a JSON or YAML file.

use crate::constants::{
    ALLOWED_EXTENSIONS, MAX_FILENAME_LENGTH, MAX_TASKS, MAX_TEMPLATES, MAX_TEMPLATE_SIZE,
    MAX_VALUE_ROWS, MAX_VALUE_SIZE,
};
use crate::error::{Error, Result};
use log::debug;
use serde::Deserialize;
use std::path::Path;

/// Size and count limits applied to one run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub max_template_size: u64,
    pub max_value_size: usize,
    pub max_rows: usize,
    pub max_templates: usize,
    pub max_tasks: usize,
    pub max_filename_length: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_template_size: MAX_TEMPLATE_SIZE,
            max_value_size: MAX_VALUE_SIZE,
            max_rows: MAX_VALUE_ROWS,
            max_templates: MAX_TEMPLATES,
            max_tasks: MAX_TASKS,
            max_filename_length: MAX_FILENAME_LENGTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub limits: Limits,
    /// Extensions with the leading dot, compared case-insensitively.
    pub allowed_extensions: Vec<String>,
    /// Accept any extension during discovery and output naming.
    pub any_extension: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            allowed_extensions: ALLOWED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            any_extension: false,
        }
    }
}

impl Settings {
    /// Returns true when `extension` (with its leading dot, or empty) may be used.
    pub fn is_allowed_extension(&self, extension: &str) -> bool {
        if self.any_extension {
            return true;
        }
        let extension = extension.to_lowercase();
        self.allowed_extensions.iter().any(|allowed| allowed.to_lowercase() == extension)
    }
}

/// Parses settings content, trying JSON first and YAML second.
pub fn parse_settings(content: &str) -> Result<Settings> {
    match serde_json::from_str(content) {
        Ok(settings) => Ok(settings),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}"))),
    }
}

/// Loads settings from `path`, or returns the defaults when no path is given.
pub fn load_settings<P: AsRef<Path>>(path: Option<P>) -> Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::ConfigError(format!(
            "Invalid configuration path: {}",
            path.display()
        )));
    }
    debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(path).map_err(Error::IoError)?;
    parse_settings(&content)
}
