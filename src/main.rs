//! api-annotations - Command-line tool for building an API inventory from doc comments.
//!
//! # Usage
//!
//! ```bash
//! api-annotations [OPTIONS] <DIR>
//! ```
//!
//! # Examples
//!
//! Write the inventory as JSON:
//! ```bash
//! api-annotations ./src/controllers -o api.json
//! ```
//!
//! Print YAML with debug logging:
//! ```bash
//! api-annotations ./src/controllers -f yaml -v
//! ```

use anyhow::Result;
use api_annotations::cli;
use clap::Parser;
use log::info;

fn main() -> Result<()> {
    // Parse once to read the verbose flag before the logger exists
    let args_for_verbose = cli::CliArgs::parse();

    let log_level = if args_for_verbose.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("api-annotations starting...");

    let args = cli::parse_args_from_parsed(args_for_verbose)?;
    cli::run(args)?;

    info!("API inventory generation completed successfully");

    Ok(())
}
