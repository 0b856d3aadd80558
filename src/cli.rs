use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::LOCAL_CONFIG_NAME;
use crate::diagnostic::Severity;
use crate::output::OutputFormat;

/// Color output control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "cpp-style-guard")]
#[command(author, version, about = "C++ style guard - check sources against a C++ style guide")]
#[command(long_about = "Checks C++ interface and implementation files against naming, \
    layout, header and class-design conventions.\n\n\
    Exit codes:\n  \
    0 - No violations\n  \
    1 - Error-severity violations found (or warnings with --strict)\n  \
    2 - Configuration or startup error\n  \
    3 - Tool failure (unreadable file, invalid encoding, rule fault)")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    /// Skip loading configuration file
    #[arg(long, global = true)]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check C++ sources against the style rules
    Check(CheckArgs),

    /// List the available rules
    Rules(RulesArgs),

    /// Generate a default configuration file
    Init(InitArgs),

    /// Configuration file utilities
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct CheckArgs {
    /// Paths to check (files or directories)
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable only these rules (comma-separated rule ids)
    #[arg(long, value_delimiter = ',')]
    pub rules: Option<Vec<String>>,

    /// Disable these rules (comma-separated rule ids)
    #[arg(long, value_delimiter = ',')]
    pub disable: Vec<String>,

    /// Override a rule's severity, e.g. `--severity enum-underlying-type=error`
    #[arg(long = "severity", value_name = "RULE=LEVEL", value_parser = parse_severity_override)]
    pub severity: Vec<(String, Severity)>,

    /// Maximum line width in characters (overrides config)
    #[arg(long)]
    pub max_line_width: Option<usize>,

    /// Exclude patterns (glob syntax, can be specified multiple times)
    #[arg(long, short = 'x')]
    pub exclude: Vec<String>,

    /// Output format [possible values: text, json, sarif]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Worker threads (0 uses every core)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Stop starting new files after the first file with errors
    #[arg(long)]
    pub fail_fast: bool,

    /// Treat warnings as failures (exit code 1)
    #[arg(long)]
    pub strict: bool,
}

/// Parse `rule-id=level`.
fn parse_severity_override(s: &str) -> Result<(String, Severity), String> {
    let (rule, level) = s
        .split_once('=')
        .ok_or_else(|| format!("expected RULE=LEVEL, got '{s}'"))?;
    let rule = rule.trim();
    if rule.is_empty() {
        return Err(format!("missing rule id in '{s}'"));
    }
    let severity = level.trim().parse::<Severity>().map_err(|e| e.to_string())?;
    Ok((rule.to_string(), severity))
}

#[derive(Parser, Debug)]
pub struct RulesArgs {
    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long, default_value = LOCAL_CONFIG_NAME)]
    pub output: PathBuf,

    /// Overwrite existing configuration
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate configuration file syntax and values
    Validate {
        /// Path to configuration file
        #[arg(short, long, default_value = LOCAL_CONFIG_NAME)]
        config: PathBuf,
    },

    /// Display the effective configuration
    Show {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format [possible values: text, json]
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
