//! User interaction handling.

use crate::error::{Error, Result};
use dialoguer::Confirm;

/// Asks the operator yes/no questions.
pub trait Prompter {
    /// Returns true without asking when `skip_prompt` is set.
    fn confirm(&self, skip_prompt: bool, prompt: String) -> Result<bool>;
}

/// Terminal prompter backed by dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, skip_prompt: bool, prompt: String) -> Result<bool> {
        if skip_prompt {
            return Ok(true);
        }
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| Error::ConfigError(e.to_string()))
    }
}
