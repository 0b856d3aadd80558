use clap::Parser;

use cpp_style_guard::cli::{Cli, Commands};
use cpp_style_guard::commands::{run_check, run_config, run_init, run_rules};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match &cli.command {
        Commands::Check(args) => run_check(args, &cli),
        Commands::Rules(args) => run_rules(args),
        Commands::Init(args) => run_init(args),
        Commands::Config(args) => run_config(args, &cli),
    };

    std::process::exit(exit_code);
}

/// `RUST_LOG` wins; otherwise `-v` selects debug and `-vv` trace.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
