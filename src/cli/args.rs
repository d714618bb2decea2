//! CLI argument definitions using clap derive
//!
//! Defines all command-line arguments and subcommands.

use crate::domain::ClassificationMode;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Ambient noise monitor
///
/// Smooths raw microphone readings, classifies noise against a rolling
/// baseline and sounds escalating alerts when it stays high.
#[derive(Parser, Debug)]
#[command(name = "noisemon")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "NOISEMON_CONFIG")]
    pub config: Option<String>,

    /// Override the classification mode
    #[arg(long, global = true, value_enum)]
    pub mode: Option<ModeArg>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Feed raw samples through the monitor
    Run(RunArgs),

    /// Classify a single reading
    Classify(ClassifyArgs),

    /// Inspect or create the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// File with one raw reading per line ('-' for stdin)
    #[arg(short, long, default_value = "-")]
    pub input: String,

    /// Pace samples with the wall clock instead of replaying instantly
    #[arg(long)]
    pub realtime: bool,

    /// Stop after this many samples
    #[arg(long)]
    pub max_samples: Option<u64>,

    /// Sample interval in milliseconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub sample_interval: Option<u64>,

    /// Skip malformed lines instead of failing
    #[arg(long)]
    pub lenient: bool,

    /// Monitors to include in the status output
    #[arg(long, default_value = "2")]
    pub top: usize,

    /// Print alerts without ringing the terminal bell
    #[arg(long)]
    pub quiet: bool,
}

/// Arguments for the classify command
#[derive(Parser, Debug)]
pub struct ClassifyArgs {
    /// Smoothed current level
    #[arg(long)]
    pub current: f64,

    /// Baseline level (ratio mode)
    #[arg(long, default_value = "1")]
    pub baseline: f64,
}

/// Arguments for configuration commands
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Check a configuration file without running
    Validate {
        /// File to check (defaults to the first file found)
        path: Option<String>,
    },

    /// Write the default configuration to a file
    Init {
        /// Destination (defaults to the user config directory)
        path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Classification mode argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// Compare current/baseline against multipliers
    Ratio,
    /// Compare current against absolute levels
    Absolute,
}

impl From<ModeArg> for ClassificationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Ratio => ClassificationMode::Ratio,
            ModeArg::Absolute => ClassificationMode::Absolute,
        }
    }
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_run_defaults() {
        let args = Cli::try_parse_from(["noisemon", "run"]).unwrap();
        if let Commands::Run(run) = args.command {
            assert_eq!(run.input, "-");
            assert!(!run.realtime);
            assert_eq!(run.max_samples, None);
            assert_eq!(run.top, 2);
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn test_cli_parse_verbose() {
        let args = Cli::try_parse_from(["noisemon", "-v", "run"]).unwrap();
        assert!(args.verbose);
    }

    #[test]
    fn test_cli_parse_run_args() {
        let args = Cli::try_parse_from([
            "noisemon",
            "run",
            "--input",
            "samples.txt",
            "--realtime",
            "--max-samples",
            "100",
            "--sample-interval",
            "20",
        ])
        .unwrap();

        if let Commands::Run(run) = args.command {
            assert_eq!(run.input, "samples.txt");
            assert!(run.realtime);
            assert_eq!(run.max_samples, Some(100));
            assert_eq!(run.sample_interval, Some(20));
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn test_cli_zero_sample_interval_rejected() {
        let result = Cli::try_parse_from(["noisemon", "run", "--sample-interval", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_classify() {
        let args = Cli::try_parse_from([
            "noisemon",
            "--mode",
            "absolute",
            "classify",
            "--current",
            "250",
        ])
        .unwrap();
        assert_eq!(args.mode, Some(ModeArg::Absolute));

        if let Commands::Classify(classify) = args.command {
            assert_eq!(classify.current, 250.0);
            assert_eq!(classify.baseline, 1.0);
        } else {
            panic!("Expected Classify command");
        }
    }

    #[test]
    fn test_cli_parse_config_init() {
        let args =
            Cli::try_parse_from(["noisemon", "config", "init", "out.toml", "--force"]).unwrap();
        if let Commands::Config(config) = args.command {
            if let ConfigCommands::Init { path, force } = config.command {
                assert_eq!(path.as_deref(), Some("out.toml"));
                assert!(force);
            } else {
                panic!("Expected Init command");
            }
        } else {
            panic!("Expected Config command");
        }
    }

    #[test]
    fn test_mode_arg_conversion() {
        assert_eq!(
            ClassificationMode::from(ModeArg::Absolute),
            ClassificationMode::Absolute
        );
    }
}
