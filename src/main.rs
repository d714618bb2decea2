//! noisemon - ambient noise monitor
//!
//! A command-line tool that replays or streams raw microphone readings,
//! classifies the noise level and sounds alerts when it stays high.

use clap::Parser;
use noisemon::cli::args::{generate_completions, Cli, Commands};
use noisemon::commands::{effective_config, run_classify, run_config, run_monitor};
use noisemon::error::{AppError, ConfigError, SensorError};

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Set log level based on verbose flag
    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    // Run the appropriate command
    let result = run(&cli);

    if let Err(e) = result {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let config_path = cli.config.as_deref();

    match &cli.command {
        Commands::Run(args) => {
            let config = effective_config(config_path, cli.mode, args.sample_interval)?;
            run_monitor(args, config, cli.format)
        }

        Commands::Classify(args) => {
            let config = effective_config(config_path, cli.mode, None)?;
            run_classify(args, &config, cli.format)
        }

        Commands::Config(args) => run_config(args, config_path, cli.mode, cli.format),

        Commands::Completions { shell } => {
            generate_completions(*shell);
            Ok(())
        }
    }
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::Config(ConfigError::FileNotFound(_)) => {
            eprintln!();
            eprintln!("Hint: Create one with 'noisemon config init PATH'.");
        }
        AppError::Sensor(SensorError::InvalidSample { .. }) => {
            eprintln!();
            eprintln!("Hint: Expected one integer (0-65535) per line.");
            eprintln!("      Use --lenient to skip malformed lines.");
        }
        _ => {}
    }
}
