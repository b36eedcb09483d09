mod cli;

use clap::Parser;
use cli::{exit_status, init_logging, print_report, run, Cli};
use semgroup_cli::ScriptConfig;
use std::process::ExitCode;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match ScriptConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(1);
        }
    };

    if let Err(e) = init_logging(&cli, &config.logging) {
        eprintln!("Error: {}", e);
        return ExitCode::from(1);
    }

    let result = match run(&cli, &config).await {
        Ok(report) => print_report(&report, &cli.format),
        Err(e) => Err(e),
    };

    if let Err(ref e) = result {
        error!("{}", e);
        if cli.log_file.is_some() {
            eprintln!("Error: {}", e);
        }
    }

    ExitCode::from(exit_status(&result))
}
