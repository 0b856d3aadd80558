use std::path::Path;

use crate::StyleGuardError;
use crate::cli::{CheckArgs, Cli};
use crate::config::{Config, validate_config_semantics};
use crate::diagnostic::Diagnostic;
use crate::engine::{Engine, Report, input_error};
use crate::language::SourceKindRegistry;
use crate::output::{
    ColorMode, JsonFormatter, OutputFormat, OutputFormatter, SarifFormatter, ScanProgress,
    TextFormatter,
};
use crate::rules::RuleRegistry;
use crate::scanner::collect_sources;

use super::context::{color_choice_to_mode, exit_code_for, load_config, write_output};

#[must_use]
pub fn run_check(args: &CheckArgs, cli: &Cli) -> i32 {
    match run_check_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code_for(&e)
        }
    }
}

pub(crate) fn run_check_impl(args: &CheckArgs, cli: &Cli) -> crate::Result<i32> {
    // 1. Load configuration and apply CLI overrides
    let loaded = load_config(args.config.as_deref(), cli.no_config)?;
    let mut config = loaded.config;
    apply_cli_overrides(&mut config, args);
    validate_config_semantics(&config)?;

    // 2. Resolve rules; unknown ids are fatal here, before any file is read
    let registry = RuleRegistry::builtin();
    let rules = registry.select(&config)?;
    log::debug!("Enabled rules: {}", rules.ids().join(", "));

    // 3. Collect files
    let kinds = SourceKindRegistry::from_config(&config.files);
    let sources = collect_sources(&args.paths, &kinds, &config.files.exclude)?;
    log::debug!("Checking {} file(s)", sources.files.len());

    // 4. Run the engine in parallel; unreadable directories join as input errors
    let progress = ScanProgress::new(sources.files.len() as u64, cli.quiet);
    let engine = Engine::new(&rules, &config).with_fail_fast(args.fail_fast);
    let mut report = engine.run(&sources.files, args.jobs, || progress.inc())?;
    progress.finish();
    report.extend(walk_failures(&sources.unreadable));

    // 5. Format and write output
    let color_mode = if args.output.is_some() {
        ColorMode::Never
    } else {
        color_choice_to_mode(cli.color)
    };
    let output = format_output(args.format, &report, &registry, color_mode, cli.quiet)?;
    write_output(args.output.as_deref(), &output)?;

    Ok(report.exit_code(args.strict))
}

/// Fold `check` flags into the loaded configuration.
pub(crate) fn apply_cli_overrides(config: &mut Config, args: &CheckArgs) {
    if let Some(rules) = &args.rules {
        config.rules = Some(rules.clone());
    }
    config.disable.extend(args.disable.iter().cloned());
    for (rule, severity) in &args.severity {
        config.severity_overrides.insert(rule.clone(), *severity);
    }
    if let Some(width) = args.max_line_width {
        config.max_line_width = width;
    }
    config.files.exclude.extend(args.exclude.iter().cloned());
}

/// `input-error` diagnostics for directory entries the scan could not read.
pub(crate) fn walk_failures(unreadable: &[StyleGuardError]) -> Vec<Diagnostic> {
    unreadable
        .iter()
        .map(|error| input_error(error.path().unwrap_or_else(|| Path::new(".")), error))
        .collect()
}

pub(crate) fn format_output(
    format: OutputFormat,
    report: &Report,
    registry: &RuleRegistry,
    color_mode: ColorMode,
    quiet: bool,
) -> crate::Result<String> {
    match format {
        OutputFormat::Text => TextFormatter::new(color_mode)
            .with_summary(!quiet)
            .format(report),
        OutputFormat::Json => JsonFormatter.format(report),
        OutputFormat::Sarif => SarifFormatter::new(registry).format(report),
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
