use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use routesheet_core::{ExtractConfig, RouteExporter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod formatter;

const DEFAULT_CONFIG: &str = "routesheet.toml";

#[derive(Parser)]
#[command(name = "routesheet")]
#[command(about = "Export route spreadsheets to JSON", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the route spreadsheet
    #[arg(value_name = "FILE", default_value = "zwift.xlsx")]
    file: PathBuf,

    /// Where to write the JSON export
    #[arg(short, long, value_name = "OUTPUT", default_value = "routes_data.json")]
    output: PathBuf,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Summary format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Number of routes to show in the summary
    #[arg(short, long, default_value_t = 5)]
    preview: usize,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON output for scripting
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        ExtractConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        // Try to load default config from current directory if it exists
        let default_config_path = PathBuf::from(DEFAULT_CONFIG);
        if default_config_path.exists() {
            ExtractConfig::from_file(&default_config_path).with_context(|| {
                format!(
                    "Failed to load config from {}",
                    default_config_path.display()
                )
            })?
        } else {
            ExtractConfig::default()
        }
    };

    let exporter = RouteExporter::with_config(config).context("Invalid configuration")?;

    let summary = exporter
        .export_file(&cli.file, &cli.output)
        .with_context(|| format!("Failed to export routes from {}", cli.file.display()))?;

    match cli.format {
        OutputFormat::Human => formatter::print_human(&summary, cli.preview),
        OutputFormat::Json => formatter::print_json(&summary, cli.preview)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "routesheet_core=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
