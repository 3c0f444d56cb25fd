//! templproc's main application entry point.
//! Parses arguments, configures logging and runs the processor.

use templproc::{
    cli::{get_args, Args},
    config::load_settings,
    error::{default_error_handler, Result},
    interrupt::InterruptFlag,
    logger::init_logger,
    pattern::NamePolicy,
    processor::{prepare, resolve_output_dir, Processor, RunRequest},
    prompt::DialoguerPrompter,
    renderer::LiteralRenderer,
    transaction::RunMode,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.level_filter());

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads settings and installs the interrupt handler
/// 2. Parses and validates values, patterns and templates
/// 3. Renders every (template, row) task
fn run(args: Args) -> Result<()> {
    log::info!("Starting template processor");
    let mut settings = load_settings(args.config.as_ref())?;
    settings.any_extension |= args.any_extension;
    let interrupt = InterruptFlag::install()?;

    let output_dir = resolve_output_dir(args.output_dir.as_deref(), args.project.as_deref());
    let request = RunRequest {
        values: args.values,
        patterns: args.pattern,
        template: args.template,
        output_dir,
        mode: if args.run { RunMode::Commit } else { RunMode::Preview },
        force: args.force,
        policy: NamePolicy::from_flags(args.mixed_case, args.allow_hyphen),
        settings,
    };

    let job = prepare(request)?;
    let renderer = LiteralRenderer::new(job.patterns.as_slice());
    let prompt = DialoguerPrompter::new();
    let processor =
        Processor::new(&job, &renderer, &prompt, &interrupt, args.skip_cleanup_check);
    processor.run()?;
    Ok(())
}
