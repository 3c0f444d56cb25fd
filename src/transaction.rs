//! Output file creation with rollback.

use crate::error::{Error, Result};
use log::{info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Whether outputs are written or only reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Preview,
    Commit,
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunMode::Preview => write!(f, "DRY-RUN"),
            RunMode::Commit => write!(f, "RUN"),
        }
    }
}

/// Tracks the files created during one run.
///
/// Dropping a transaction that was neither committed nor rolled back removes
/// every file it created.
#[derive(Debug)]
pub struct OutputTransaction {
    mode: RunMode,
    created: Vec<PathBuf>,
    finished: bool,
}

impl OutputTransaction {
    pub fn new(mode: RunMode) -> Self {
        Self { mode, created: Vec::new(), finished: false }
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    /// Files written so far in this run.
    pub fn created(&self) -> &[PathBuf] {
        &self.created
    }

    /// Writes `content` to `path` in commit mode, or reports it in preview mode.
    pub fn stage(&mut self, path: &Path, content: &str) -> Result<()> {
        match self.mode {
            RunMode::Preview => {
                info!("Would create: {}", path.display());
                Ok(())
            }
            RunMode::Commit => {
                fs::write(path, content).map_err(|e| match e.kind() {
                    io::ErrorKind::PermissionDenied => Error::PermissionDenied {
                        path: path.display().to_string(),
                        reason: e.to_string(),
                    },
                    _ => Error::IoError(e),
                })?;
                self.created.push(path.to_path_buf());
                info!("Created: {}", path.display());
                Ok(())
            }
        }
    }

    /// Keeps every created file.
    pub fn commit(mut self) -> Vec<PathBuf> {
        self.finished = true;
        std::mem::take(&mut self.created)
    }

    /// Removes every file created in this run and returns how many were removed.
    pub fn rollback(mut self) -> usize {
        self.finished = true;
        remove_files(std::mem::take(&mut self.created))
    }
}

impl Drop for OutputTransaction {
    fn drop(&mut self) {
        if !self.finished && !self.created.is_empty() {
            warn!("Processing failed, cleaning up partial files...");
            remove_files(std::mem::take(&mut self.created));
        }
    }
}

fn remove_files(files: Vec<PathBuf>) -> usize {
    if files.is_empty() {
        return 0;
    }
    info!("Cleaning up {} files...", files.len());
    let mut cleaned = 0;
    for file in &files {
        match fs::remove_file(file) {
            Ok(()) => cleaned += 1,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("Could not remove {}: {e}", file.display()),
        }
    }
    info!("Cleaned up {cleaned}/{} files", files.len());
    cleaned
}
