//! CLI entry point for the Teachable report tool.
//!
//! Provides subcommands for generating the per-course enrollment report
//! spreadsheet and for listing the courses visible to the configured key.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::Path;
use teachable_report::api::TeachableClient;
use teachable_report::courses::list_all_courses;
use teachable_report::output::{write_csv, write_xlsx};
use teachable_report::report::build_report;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "teachable_report")]
#[command(about = "Fetches Teachable course data and writes an enrollment report", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the enrollment report spreadsheet
    Report {
        /// File to write the report to
        #[arg(short, long, default_value = "report.xlsx")]
        output: String,

        /// Spreadsheet format; inferred from the output extension when omitted
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// List courses visible to the configured API key
    ListCourses,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Csv,
    Xlsx,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/teachable_report.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("teachable_report.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let api_key = std::env::var("TEACHABLE_API_KEY")
        .context("TEACHABLE_API_KEY must be set (environment or .env)")?;
    let client = TeachableClient::new(&api_key)?;

    match cli.command {
        Commands::Report { output, format } => {
            let format = resolve_format(format, &output);

            let rows = build_report(&client).await?;
            info!(row_count = rows.len(), "Report built");

            match format {
                OutputFormat::Csv => write_csv(&output, &rows)?,
                OutputFormat::Xlsx => write_xlsx(&output, &rows)?,
            }
            info!(output = %output, ?format, "Report written");
        }
        Commands::ListCourses => {
            let courses = list_all_courses(&client).await?;

            for course in &courses {
                info!(
                    course_id = course.id,
                    name = %course.name,
                    published = course.is_published,
                    has_image = course.heading_image_url.is_some(),
                    "Course"
                );
            }

            let published = courses.iter().filter(|c| c.is_published).count();
            info!(
                total = courses.len(),
                published,
                drafts = courses.len() - published,
                "Course list summary"
            );
        }
    }

    Ok(())
}

/// Picks the sink format: an explicit flag wins, otherwise the output
/// extension decides, defaulting to XLSX.
fn resolve_format(format: Option<OutputFormat>, output: &str) -> OutputFormat {
    format.unwrap_or_else(|| {
        match Path::new(output).extension().and_then(OsStr::to_str) {
            Some("csv") => OutputFormat::Csv,
            _ => OutputFormat::Xlsx,
        }
    })
}
