//! Attendance Export - monthly attendance report builder for Excel and PDF.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use attendance_export as app;

use app::config::{AppConfig, ConfigLoadResult};
use app::export::{self, ExportFormat};
use app::models::attendance::AttendanceRecord;
use app::models::report::{ReportMeta, ReportPeriod};

/// Build a monthly attendance report from exported backend rows.
#[derive(Parser)]
#[command(name = "attendance-export")]
struct Cli {
    /// JSON file containing the attendance rows for one month
    input: PathBuf,

    /// Report month, e.g. 2025-08
    #[arg(long)]
    month: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Xls)]
    format: Format,

    /// Output directory (defaults to the configured directory)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Company name shown in the report header
    #[arg(long)]
    company: Option<String>,

    /// Filter description line shown under the header (repeatable)
    #[arg(long = "filter")]
    filters: Vec<String>,

    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// HTML table saved as .xls (legacy spreadsheet download)
    Xls,
    /// Native Excel workbook
    Xlsx,
    /// Paginated landscape PDF
    Pdf,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> ExportFormat {
        match format {
            Format::Xls => ExportFormat::Xls,
            Format::Xlsx => ExportFormat::Xlsx,
            Format::Pdf => ExportFormat::Pdf,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    // Determine config path based on mode
    let config_path = if cli.dev {
        tracing::info!("Dev mode: loading config from current directory");
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };

    let config = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => {
            tracing::info!("Config loaded from {:?}", config_path);
            config
        }
        ConfigLoadResult::Missing => AppConfig::default(),
        ConfigLoadResult::Invalid(e) => {
            bail!("Invalid config at {:?}: {e}", config_path);
        }
    };

    let period = ReportPeriod::parse(&cli.month)
        .with_context(|| format!("Invalid month descriptor '{}', expected YYYY-MM", cli.month))?;

    let content = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read input file {:?}", cli.input))?;
    let records: Vec<AttendanceRecord> =
        serde_json::from_str(&content).with_context(|| format!("Failed to decode attendance rows from {:?}", cli.input))?;
    tracing::info!("Loaded {} attendance rows", records.len());

    let company = cli.company.unwrap_or_else(|| config.report.company_name.clone());
    let meta = ReportMeta::new(config.report.title.clone(), company, period).with_filters(cli.filters);

    let output_dir = cli.out.unwrap_or_else(|| config.export.output_dir.clone());
    match export::export_report(&records, &meta, cli.format.into(), &config, &output_dir) {
        Ok(path) => {
            println!("Exported to: {}", path.display());
            Ok(())
        }
        Err(app::AppError::EmptyDataset) => {
            // User-facing notice, not a stack trace: nothing was written.
            eprintln!("No data available to export");
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("Export failed: {e}");
            Err(e.into())
        }
    }
}
