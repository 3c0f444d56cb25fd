//! Template discovery and loading for templproc.
//! Resolves the template argument (file, directory or glob) to template
//! paths and loads each template's text at most once per run.
use crate::config::{Limits, Settings};
use crate::error::{Error, Result};
use crate::naming::extension_of;
use globset::GlobBuilder;
use indexmap::IndexMap;
use log::{debug, info};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

const GLOB_CHARS: [char; 4] = ['*', '?', '[', '{'];

/// Represents where templates come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// A single template file
    File(PathBuf),
    /// Every file directly inside a directory
    Directory(PathBuf),
    /// Files matching a glob pattern
    Glob(String),
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateSource::File(path) => write!(f, "file: '{}'", path.display()),
            TemplateSource::Directory(path) => write!(f, "directory: '{}'", path.display()),
            TemplateSource::Glob(pattern) => write!(f, "wildcard pattern: '{pattern}'"),
        }
    }
}

impl TemplateSource {
    /// Creates a TemplateSource from the template argument.
    ///
    /// Existing paths are taken as they are; anything else is treated as a
    /// glob pattern.
    pub fn from_string(s: &str) -> Self {
        let path = PathBuf::from(s);
        if path.is_file() {
            TemplateSource::File(path)
        } else if path.is_dir() {
            TemplateSource::Directory(path)
        } else {
            TemplateSource::Glob(s.to_string())
        }
    }

    /// Lists the template files of this source.
    ///
    /// Results are resolved to symlink-free paths, deduplicated and sorted.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` when a glob matches nothing at all
    /// * `Error::NoTemplatesFound` when nothing with an allowed extension matched
    /// * `Error::InvalidExtension` for a single file with a disallowed extension
    /// * `Error::TooManyTemplates` above the configured limit
    pub fn discover(&self, settings: &Settings) -> Result<Vec<PathBuf>> {
        let candidates = match self {
            TemplateSource::File(path) => {
                let extension = extension_of(path);
                if !settings.is_allowed_extension(&extension) {
                    return Err(Error::InvalidExtension {
                        path: path.display().to_string(),
                        extension,
                    });
                }
                vec![path.clone()]
            }
            TemplateSource::Directory(dir) => {
                let mut files = Vec::new();
                for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
                    let entry = entry?;
                    if entry.file_type().is_file() {
                        files.push(entry.into_path());
                    }
                }
                filter_allowed(files, settings)
            }
            TemplateSource::Glob(pattern) => {
                info!("Trying wildcard pattern: {pattern}");
                let matches = glob_files(pattern)?;
                if matches.is_empty() {
                    return Err(Error::TemplateNotFound { template: pattern.clone() });
                }
                filter_allowed(matches, settings)
            }
        };

        if candidates.is_empty() {
            return Err(Error::NoTemplatesFound { template: self.to_string() });
        }

        let mut templates = BTreeSet::new();
        for path in candidates {
            templates.insert(fs::canonicalize(&path)?);
        }
        let templates: Vec<PathBuf> = templates.into_iter().collect();

        let max = settings.limits.max_templates;
        if templates.len() > max {
            return Err(Error::TooManyTemplates { count: templates.len(), max });
        }
        info!("Found {} template file(s)", templates.len());
        Ok(templates)
    }
}

fn filter_allowed(files: Vec<PathBuf>, settings: &Settings) -> Vec<PathBuf> {
    files
        .into_iter()
        .filter(|path| {
            let allowed = settings.is_allowed_extension(&extension_of(path));
            if !allowed {
                debug!("Skipping {}: extension not allowed", path.display());
            }
            allowed
        })
        .collect()
}

/// Expands a glob the way a shell would: `*` does not cross directories.
fn glob_files(pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = GlobBuilder::new(pattern).literal_separator(true).build()?.compile_matcher();

    let mut base = PathBuf::new();
    let mut remaining = 0;
    for component in Path::new(pattern).components() {
        if remaining > 0 || component.as_os_str().to_string_lossy().contains(GLOB_CHARS) {
            remaining += 1;
        } else {
            base.push(component);
        }
    }
    let relative_root = base.as_os_str().is_empty();
    let root = if relative_root { PathBuf::from(".") } else { base };
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut walker = WalkDir::new(&root).min_depth(1).follow_links(true);
    if !pattern.contains("**") {
        walker = walker.max_depth(remaining.max(1));
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let candidate = if relative_root { path.strip_prefix(".").unwrap_or(path) } else { path };
        if matcher.is_match(candidate) {
            files.push(candidate.to_path_buf());
        }
    }
    Ok(files)
}

/// Template text keyed by resolved path, filled on first use.
#[derive(Debug, Default)]
pub struct TemplateCache {
    entries: IndexMap<PathBuf, Arc<str>>,
}

impl TemplateCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the text of `path`, loading and validating it on first access.
    ///
    /// # Errors
    /// * `Error::TemplateTooLarge` above the size limit
    /// * `Error::EmptyTemplate` for empty or whitespace-only files
    /// * `Error::IoError` when the file cannot be read
    pub fn load(&mut self, path: &Path, limits: &Limits) -> Result<Arc<str>> {
        if let Some(content) = self.entries.get(path) {
            debug!("Using cached content for {}", path.display());
            return Ok(Arc::clone(content));
        }

        let size = fs::metadata(path)?.len();
        if size > limits.max_template_size {
            return Err(Error::TemplateTooLarge {
                path: path.display().to_string(),
                size,
                max: limits.max_template_size,
            });
        }

        let bytes = fs::read(path)?;
        let (content, encoding) = decode_template(&bytes);
        if encoding != "utf-8" {
            debug!("File {} read with {encoding} encoding", path.display());
        }
        if content.trim().is_empty() {
            return Err(Error::EmptyTemplate { path: path.display().to_string() });
        }

        let content: Arc<str> = Arc::from(content);
        self.entries.insert(path.to_path_buf(), Arc::clone(&content));
        debug!("Cached content for {}", path.display());
        Ok(content)
    }
}

/// Decodes template bytes as UTF-8 (BOM stripped) with Windows-1252 as fallback.
pub fn decode_template(bytes: &[u8]) -> (String, &'static str) {
    if let Some(rest) = bytes.strip_prefix(b"\xEF\xBB\xBF") {
        if let Ok(text) = std::str::from_utf8(rest) {
            return (text.to_string(), "utf-8-sig");
        }
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => (text.to_string(), "utf-8"),
        Err(_) => {
            let (text, _) = encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes);
            (text.into_owned(), encoding_rs::WINDOWS_1252.name())
        }
    }
}
