//! Run orchestration.
//!
//! [`prepare`] performs every pre-flight check and yields a [`Job`]; nothing
//! is written before it succeeds. [`Processor::run`] then renders each
//! (template, row) task, isolating per-task failures.

use crate::config::Settings;
use crate::error::{Error, ErrorKind, Result};
use crate::interrupt::InterruptFlag;
use crate::loader::{TemplateCache, TemplateSource};
use crate::naming::{check_template_name, output_file_name, sanitize_name};
use crate::pattern::{NamePolicy, PatternList};
use crate::prompt::Prompter;
use crate::renderer::TemplateRenderer;
use crate::safety::{check_output_directory, check_output_path};
use crate::scanner::{find_absent_patterns, PlaceholderScanner};
use crate::transaction::{OutputTransaction, RunMode};
use crate::validation::validate_inputs;
use crate::values::{parse_values, ValueTable};
use log::{debug, error, info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Raw inputs of one run, as given by the operator.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub values: String,
    pub patterns: String,
    pub template: String,
    pub output_dir: PathBuf,
    pub mode: RunMode,
    pub force: bool,
    pub policy: NamePolicy,
    pub settings: Settings,
}

/// Validated inputs of one run.
#[derive(Debug)]
pub struct Job {
    pub patterns: PatternList,
    pub values: ValueTable,
    pub templates: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub mode: RunMode,
    pub force: bool,
    pub settings: Settings,
}

impl Job {
    pub fn total_tasks(&self) -> usize {
        self.templates.len() * self.values.len()
    }
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub successful: usize,
    pub failed: usize,
    /// Output paths written, or that would be written in preview mode.
    pub outputs: Vec<PathBuf>,
}

/// Request-scoped mutable state.
#[derive(Debug, Default)]
struct RunContext {
    cache: TemplateCache,
    summary: RunSummary,
}

/// Output directory for a run: `<output_dir or .>/<project>`.
///
/// The project name defaults to `project_<pid>` and is sanitized like file names.
pub fn resolve_output_dir(output_dir: Option<&Path>, project: Option<&str>) -> PathBuf {
    let project = match project {
        Some(project) => sanitize_name(project),
        None => format!("project_{}", std::process::id()),
    };
    output_dir.unwrap_or_else(|| Path::new(".")).join(project)
}

fn permission_denied(path: &Path, reason: impl Into<String>) -> Error {
    Error::PermissionDenied { path: path.display().to_string(), reason: reason.into() }
}

/// Whether the current user can create files in `dir`.
///
/// Mode bits alone do not answer this for a directory owned by someone else,
/// so an anonymous temporary file is created and dropped.
fn is_writable(dir: &Path) -> bool {
    tempfile::tempfile_in(dir).is_ok()
}

/// Checks that `output_dir` is writable, or can be created.
pub fn check_output_permissions(output_dir: &Path) -> Result<()> {
    if output_dir.exists() {
        if !output_dir.is_dir() {
            return Err(permission_denied(output_dir, "exists and is not a directory"));
        }
        if !is_writable(output_dir) {
            return Err(permission_denied(output_dir, "output directory not writable"));
        }
        return Ok(());
    }
    let parent = match output_dir.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !parent.exists() {
        return Err(permission_denied(parent, "parent directory does not exist"));
    }
    if !is_writable(parent) {
        return Err(permission_denied(
            parent,
            "cannot create output directory, parent not writable",
        ));
    }
    Ok(())
}

fn create_output_dir(output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir).map_err(|e| match e.kind() {
        io::ErrorKind::PermissionDenied => permission_denied(output_dir, e.to_string()),
        _ => Error::IoError(e),
    })?;
    check_output_permissions(output_dir)?;
    info!("Output directory ready: {}", output_dir.display());
    Ok(())
}

/// Parses and validates every input before any output is attempted.
pub fn prepare(request: RunRequest) -> Result<Job> {
    let RunRequest { values, patterns, template, output_dir, mode, force, policy, settings } =
        request;
    let limits = &settings.limits;

    let values = parse_values(&values, limits.max_rows)?;
    let patterns = PatternList::parse(&patterns, policy)?;
    let source = TemplateSource::from_string(&template);
    info!("Using templates from the {source}");
    let templates = source.discover(&settings)?;

    validate_inputs(patterns.as_slice(), &values, limits.max_value_size)?;
    check_output_permissions(&output_dir)?;
    check_output_directory(&output_dir, &templates)?;

    let total_tasks = templates.len() * values.len();
    if total_tasks > limits.max_tasks {
        return Err(Error::TooManyTasks { count: total_tasks, max: limits.max_tasks });
    }
    for template in &templates {
        check_template_name(template, &settings)?;
    }

    info!("Output: {}", output_dir.display());
    info!("Mode: {mode}");
    info!("Force mode: {}", if force { "ENABLED" } else { "DISABLED" });
    info!(
        "Templates: {}, Values: {}, Tasks: {total_tasks}",
        templates.len(),
        values.len()
    );

    Ok(Job { patterns, values, templates, output_dir, mode, force, settings })
}

fn template_name(path: &Path) -> String {
    path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
}

/// Executes a prepared job.
pub struct Processor<'a> {
    job: &'a Job,
    renderer: &'a dyn TemplateRenderer,
    prompt: &'a dyn Prompter,
    interrupt: &'a InterruptFlag,
    scanner: PlaceholderScanner,
    skip_cleanup_check: bool,
}

impl<'a> Processor<'a> {
    pub fn new(
        job: &'a Job,
        renderer: &'a dyn TemplateRenderer,
        prompt: &'a dyn Prompter,
        interrupt: &'a InterruptFlag,
        skip_cleanup_check: bool,
    ) -> Self {
        let scanner = PlaceholderScanner::new(job.patterns.delimiter());
        Self { job, renderer, prompt, interrupt, scanner, skip_cleanup_check }
    }

    /// Renders every task and writes (or previews) the outputs.
    ///
    /// # Errors
    /// * `Error::UnboundPlaceholder` in strict mode; files created so far are removed
    /// * `Error::PermissionDenied` when the output directory, a template or an
    ///   output file is unusable; files created so far are removed
    /// * `Error::Interrupted` when the interrupt flag is raised
    /// * `Error::ProcessingFailed` when at least one task failed
    pub fn run(&self) -> Result<RunSummary> {
        let job = self.job;
        let mut tx = OutputTransaction::new(job.mode);
        if self.interrupt.is_raised() {
            return self.interrupted(tx);
        }
        if job.mode == RunMode::Commit {
            create_output_dir(&job.output_dir)?;
        }

        let mut ctx = RunContext::default();
        let rows = job.values.len();
        let total = job.total_tasks();

        for (index, template) in job.templates.iter().enumerate() {
            let name = template_name(template);
            info!("Processing template {}/{}: {name}", index + 1, job.templates.len());

            let content = match ctx.cache.load(template, &job.settings.limits) {
                Ok(content) => content,
                Err(e) if e.kind() == ErrorKind::PermissionDenied => return Err(e),
                Err(e) => {
                    error!("Skipping template {name}: {e}");
                    ctx.summary.failed += rows;
                    continue;
                }
            };

            self.scanner.check_template(&content, &job.patterns, &name, job.force)?;
            find_absent_patterns(&content, &job.patterns, &name);

            for (line, row) in job.values.numbered() {
                if self.interrupt.is_raised() {
                    return self.interrupted(tx);
                }
                report_progress(index * rows + line, total);

                match self.process_task(template, &content, line, row, &mut tx) {
                    Ok(target) => {
                        ctx.summary.successful += 1;
                        ctx.summary.outputs.push(target);
                    }
                    Err(e) if e.kind() == ErrorKind::PermissionDenied => return Err(e),
                    Err(e) => {
                        error!("Error processing {name} line {line}: {e}");
                        ctx.summary.failed += 1;
                    }
                }
            }
        }

        if self.interrupt.is_raised() {
            return self.interrupted(tx);
        }
        tx.commit();
        let summary = ctx.summary;
        info!("Completed: {} successful, {} failed", summary.successful, summary.failed);
        if summary.failed > 0 {
            return Err(Error::ProcessingFailed {
                successful: summary.successful,
                failed: summary.failed,
            });
        }
        info!("All tasks completed successfully");
        Ok(summary)
    }

    fn process_task(
        &self,
        template: &Path,
        content: &str,
        line: usize,
        row: &[String],
        tx: &mut OutputTransaction,
    ) -> Result<PathBuf> {
        let name = template_name(template);
        let rendered = self.renderer.render(content, row);
        if rendered.replacements == 0 {
            warn!("No replacements in {name} line {line}");
        }
        debug!("{name} line {line}: {} replacements", rendered.replacements);

        self.scanner.check_output(&rendered.content, &name, line, self.job.force)?;

        let target = self.job.output_dir.join(output_file_name(template, line));
        check_output_path(&target, &self.job.output_dir)?;
        tx.stage(&target, &rendered.content)?;
        Ok(target)
    }

    fn interrupted(&self, tx: OutputTransaction) -> Result<RunSummary> {
        warn!("Process interrupted by user");
        let created = tx.created().len();
        if created == 0 {
            tx.commit();
            return Err(Error::Interrupted);
        }
        let cleanup = self
            .prompt
            .confirm(
                self.skip_cleanup_check,
                format!("Clean up {created} partially created files?"),
            )
            .unwrap_or_else(|e| {
                warn!("Could not ask about cleanup: {e}");
                false
            });
        if cleanup {
            tx.rollback();
        } else {
            tx.commit();
        }
        Err(Error::Interrupted)
    }
}

fn report_progress(current: usize, total: usize) {
    if total < 20 {
        return;
    }
    let interval = (total / 20).max(1);
    if current % interval == 0 {
        info!("Progress: {:.0}% ({current}/{total})", current as f64 * 100.0 / total as f64);
    }
}
