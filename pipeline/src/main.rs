//! Campaign Clean CLI - split campaign extracts into cleaned tables
//!
//! ```bash
//! campaign-clean                         # same as `run` with defaults
//! campaign-clean run -i files/input -o files/output --report report.json
//! campaign-clean inspect files/input/bank_marketing_0.csv.zip
//! campaign-clean months                  # show recognized month tokens
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use campaign_clean::config::{DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR};
use campaign_clean::transform::MONTH_ABBREVIATIONS;
use campaign_clean::{read_archive, run, PipelineConfig};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "campaign-clean")]
#[command(about = "Clean ZIP-compressed campaign extracts into client, campaign and economics CSV tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Full pipeline: archives → client.csv, campaign.csv, economics.csv
    Run {
        /// Directory containing the .zip extracts
        #[arg(short, long, env = "CAMPAIGN_INPUT_DIR", default_value = DEFAULT_INPUT_DIR)]
        input: PathBuf,

        /// Directory receiving the cleaned tables
        #[arg(short, long, env = "CAMPAIGN_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
        output: PathBuf,

        /// Abort on unrecognized month tokens instead of reporting them
        #[arg(long, env = "CAMPAIGN_STRICT_MONTHS")]
        strict_months: bool,

        /// Write the run report as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Parse one archive and print its entries and first rows as JSON
    Inspect {
        /// ZIP archive to read
        archive: PathBuf,

        /// Number of rows to print per entry
        #[arg(short, long, default_value = "5")]
        rows: usize,
    },

    /// Show the recognized month abbreviations
    Months,
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        None => cmd_run(PipelineConfig::default(), None),

        Some(Commands::Run {
            input,
            output,
            strict_months,
            report,
        }) => cmd_run(
            PipelineConfig::new(input, output).with_strict_months(strict_months),
            report.as_deref(),
        ),

        Some(Commands::Inspect { archive, rows }) => cmd_inspect(&archive, rows),

        Some(Commands::Months) => cmd_months(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_run(config: PipelineConfig, report_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        input = %config.input_dir.display(),
        output = %config.output_dir.display(),
        strict_months = config.strict_months,
        "starting run"
    );

    let report = run(&config)?;

    eprintln!("Archives:  {}", report.archives.len());
    eprintln!("Entries:   {}", report.entries.len());
    eprintln!("Rows:      {}", report.input_rows);
    eprintln!("client:    {} → {}", report.client_rows, report.outputs.client.display());
    eprintln!("campaign:  {} → {}", report.campaign_rows, report.outputs.campaign.display());
    eprintln!("economics: {} → {}", report.economics_rows, report.outputs.economics.display());
    if !report.issues.is_empty() {
        eprintln!("Data-quality issues: {}", report.issues.len());
    }

    if let Some(path) = report_path {
        fs::write(path, serde_json::to_string_pretty(&report)?)?;
        eprintln!("Report written to: {}", path.display());
    }

    Ok(())
}

fn cmd_inspect(archive: &Path, rows: usize) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Inspecting: {}", archive.display());

    for (summary, records) in read_archive(archive)? {
        eprintln!(
            "  {} - {} rows, encoding {}, delimiter {:?}",
            summary.name, summary.rows, summary.encoding, summary.delimiter
        );
        let preview = &records[..rows.min(records.len())];
        println!("{}", serde_json::to_string_pretty(preview)?);
    }

    Ok(())
}

fn cmd_months() -> Result<(), Box<dyn std::error::Error>> {
    for (abbr, month) in MONTH_ABBREVIATIONS {
        println!("{} → {:02} ({})", abbr, month.number_from_month(), month.name());
    }
    Ok(())
}
