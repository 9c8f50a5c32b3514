pub mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use uplink_core::config::{AppConfig, LoadOptions, LogFormat};

#[derive(Debug, Parser)]
#[command(
    name = "uplink",
    about = "Uplink recommendation CLI",
    long_about = "Score, rank, and explain catalog products for customers from telemetry.",
    after_help = "Examples:\n  uplink recommend --customer \"Avery\"\n  uplink recommend --customer \"Avery\" --json\n  uplink customers\n  uplink config"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Rank and explain every catalog product for one customer")]
    Recommend {
        #[arg(long, help = "Customer name as it appears in the telemetry export")]
        customer: String,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "List customer names present in the telemetry export")]
    Customers,
    #[command(about = "Inspect effective configuration values")]
    Config,
}

fn init_logging(config: &AppConfig) {
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        LogFormat::Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        LogFormat::Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    if let Ok(config) = AppConfig::load(LoadOptions::default()) {
        init_logging(&config);
    }

    let result = match cli.command {
        Command::Recommend { customer, json } => commands::recommend::run(&customer, json),
        Command::Customers => commands::customers::run(),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn recommend_requires_a_customer() {
        assert!(Cli::try_parse_from(["uplink", "recommend"]).is_err());
        assert!(Cli::try_parse_from(["uplink", "recommend", "--customer", "Avery"]).is_ok());
    }

    #[test]
    fn json_flag_is_optional() {
        let cli = Cli::try_parse_from(["uplink", "recommend", "--customer", "Avery", "--json"])
            .expect("parse");
        assert!(matches!(cli.command, Command::Recommend { json: true, .. }));
    }

    #[test]
    fn bare_subcommands_parse() {
        assert!(Cli::try_parse_from(["uplink", "customers"]).is_ok());
        assert!(Cli::try_parse_from(["uplink", "config"]).is_ok());
    }
}
