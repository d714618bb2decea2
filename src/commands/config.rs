//! Config command implementation

use crate::cli::args::{ConfigArgs, ConfigCommands, ModeArg, OutputFormat};
use crate::cli::output::{print_output, ConfigView, Message};
use crate::config::{Config, ConfigFile};
use crate::error::{AppError, ConfigError, Result};

use std::path::PathBuf;

/// Execute a config subcommand
pub fn run_config(
    args: &ConfigArgs,
    config_path: Option<&str>,
    mode: Option<ModeArg>,
    format: OutputFormat,
) -> Result<()> {
    match &args.command {
        ConfigCommands::Show => {
            let config = super::effective_config(config_path, mode, None)?;
            let source = config_path
                .map(PathBuf::from)
                .or_else(ConfigFile::find_default)
                .map(|p| p.display().to_string());
            print_output(&ConfigView { source, config }, format)?;
        }

        ConfigCommands::Validate { path } => {
            let target = path
                .as_deref()
                .or(config_path)
                .map(PathBuf::from)
                .or_else(ConfigFile::find_default);

            let message = match target {
                Some(path) => {
                    ConfigFile::load(&path)?;
                    format!("{} is valid", path.display())
                }
                None => "No configuration file found; built-in defaults apply".to_string(),
            };
            print_output(
                &Message {
                    message,
                    success: true,
                },
                format,
            )?;
        }

        ConfigCommands::Init { path, force } => {
            let target = init_target(path.as_deref().or(config_path))?;
            if target.exists() && !force {
                return Err(AppError::Config(ConfigError::invalid(
                    "path",
                    format!("{} already exists (use --force)", target.display()),
                )));
            }

            ConfigFile::save(&Config::default(), &target)?;
            log::info!("Wrote default configuration to {}", target.display());
            print_output(
                &Message {
                    message: format!("Wrote {}", target.display()),
                    success: true,
                },
                format,
            )?;
        }
    }

    Ok(())
}

/// Explicit path, else the per-user config file
fn init_target(path: Option<&str>) -> Result<PathBuf> {
    match path {
        Some(p) => Ok(PathBuf::from(p)),
        None => dirs::config_dir()
            .map(|dir| dir.join("noisemon").join("config.toml"))
            .ok_or_else(|| {
                AppError::Config(ConfigError::invalid(
                    "path",
                    "no user config directory; pass a path",
                ))
            }),
    }
}
