//! FileHub CLI entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use filehub_core::config::{ClientConfig, LoggingConfig};

mod commands;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ClientConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            output::print_error(&e.message);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging);

    if let Err(e) = cli.execute(&config).await {
        output::print_error(&e.message);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins over the configured level. Logs go to stderr so command
/// output stays pipeable.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.effective_level()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
