// Allow common clippy pedantic lints
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

//! CFP console CLI
//!
//! Command-line console for exchanging carbon footprint data along a supply chain

use cfp_console::cli::{Cli, Runner};
use cfp_console::config::AppConfig;
use clap::Parser;
use tracing::Level;

/// Log level from `--verbose`, then the config file, then INFO
fn default_level(cli: &Cli) -> Level {
    if cli.verbose {
        return Level::DEBUG;
    }
    cli.config
        .as_deref()
        .and_then(|path| AppConfig::from_file(path).ok())
        .and_then(|config| config.log_level)
        .map_or(Level::INFO, Into::into)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only command output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(default_level(&cli).into())
                .from_env_lossy(),
        )
        .init();

    let runner = Runner::new(cli);

    if let Err(e) = runner.run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
