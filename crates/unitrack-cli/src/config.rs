//! # Config Subcommands
//!
//! `config check` loads and validates a commission configuration.
//! `config show` prints the effective configuration, which is the
//! built-in table when `--config` is not given.

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};

use crate::context::load_config;
use crate::GlobalOptions;

/// Arguments for `unitrack config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Output format for `config show`.
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum ConfigFormat {
    #[default]
    Yaml,
    Json,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Validate the configuration and report the result.
    Check,
    /// Print the effective configuration.
    Show {
        #[arg(long, value_enum, default_value_t = ConfigFormat::Yaml)]
        format: ConfigFormat,
    },
}

/// Execute `unitrack config`.
pub fn run_config(args: &ConfigArgs, opts: &GlobalOptions) -> Result<u8> {
    match &args.command {
        ConfigCommand::Check => {
            // Built-in defaults skip `load`, so validate here as well.
            let config = load_config(opts)?;
            if let Err(e) = config.validate() {
                eprintln!("FAIL: {e}");
                return Ok(1);
            }
            let source = opts
                .config
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in defaults".to_string());
            println!("OK: {source}");
            println!(
                "  {} tier(s), {} university, {} program, {} country rate(s)",
                config.tiers.len(),
                config.special_rates.by_university.len(),
                config.special_rates.by_program.len(),
                config.special_rates.by_country.len()
            );
            Ok(0)
        }
        ConfigCommand::Show { format } => {
            let config = load_config(opts)?;
            match format {
                ConfigFormat::Yaml => print!("{}", serde_yaml::to_string(&config)?),
                ConfigFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
            }
            Ok(0)
        }
    }
}
