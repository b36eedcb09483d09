use super::commands::Cli;
use semgroup_cli::config::LoggingConfig;
use semgroup_types::{SemgroupError, SemgroupResult};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn log_level(cli: &Cli, logging: &LoggingConfig) -> String {
    if cli.quiet {
        return "warn".to_string();
    }
    match cli.verbose {
        0 => logging.level.clone(),
        1 => "info,semgroup_cli=debug,semgroup_crypto=debug".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Logs go to stderr (or `--log-file`) so stdout only carries the report.
pub fn init_logging(cli: &Cli, logging: &LoggingConfig) -> SemgroupResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(cli, logging)));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    let result = if let Some(ref log_file) = cli.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)?;
        let file_layer = fmt::layer()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false);
        if logging.json {
            subscriber.with(file_layer.json()).try_init()
        } else {
            subscriber.with(file_layer).try_init()
        }
    } else {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(cli.verbose >= 2);
        if logging.json {
            subscriber.with(stderr_layer.json()).try_init()
        } else {
            subscriber.with(stderr_layer).try_init()
        }
    };

    result.map_err(|e| SemgroupError::Internal(format!("Failed to initialize logging: {}", e)))
}
