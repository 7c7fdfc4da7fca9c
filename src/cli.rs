use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::path::PathBuf;

use crate::serializer::Format;

/// Extracts @key(payload) annotations from Rust doc comments into an API inventory
#[derive(Parser, Debug)]
#[command(name = "api-annotations")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Directory holding the annotated handler sources (not searched recursively)
    #[arg(value_name = "DIR")]
    pub source_dir: PathBuf,

    /// Output format (json or yaml)
    #[arg(short = 'f', long = "format", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => Format::Json,
            OutputFormat::Yaml => Format::Yaml,
        }
    }
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.source_dir.exists() {
        anyhow::bail!(
            "Source directory does not exist: {}",
            args.source_dir.display()
        );
    }

    if !args.source_dir.is_dir() {
        anyhow::bail!(
            "Source path is not a directory: {}",
            args.source_dir.display()
        );
    }

    info!("Source directory: {}", args.source_dir.display());
    info!("Output format: {:?}", args.output_format);
    if let Some(ref output) = args.output_path {
        info!("Output file: {}", output.display());
    } else {
        info!("Output: stdout");
    }

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    use crate::fetch::fetch;
    use crate::schema::{Api, ApiMapper};
    use crate::serializer::{save_as, serialize_json, serialize_yaml};

    info!("Collecting annotations...");
    let mut apis: Vec<Api> = Vec::new();
    fetch(&args.source_dir, &mut apis, &ApiMapper::new())?;

    if apis.is_empty() {
        log::warn!("No annotated functions found in {}", args.source_dir.display());
    }

    let format = Format::from(args.output_format);
    if let Some(output_path) = &args.output_path {
        info!("Writing output to: {}", output_path.display());
        save_as(&apis, output_path, format)?;
    } else {
        let content = match format {
            Format::Json => serialize_json(&apis)?,
            Format::Yaml => serialize_yaml(&apis)?,
        };
        println!("{}", content);
    }

    info!("Summary:");
    info!("  - Handlers: {}", apis.len());
    info!(
        "  - Routes: {}",
        apis.iter().map(|api| api.routes.len()).sum::<usize>()
    );

    Ok(())
}
