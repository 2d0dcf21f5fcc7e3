use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use payout_engine::application::engine::PayoutEngine;
use payout_engine::config::AppConfig;
use payout_engine::domain::ports::RecordSourceBox;
use payout_engine::domain::rule::RuleTable;
use payout_engine::infrastructure::file_source::FileRecordSource;
use payout_engine::infrastructure::rule_file::load_rule_table;
use payout_engine::interfaces::csv::report_writer::ReportWriter;
use payout_engine::interfaces::json::report::PayoutReport;
use payout_engine::telemetry;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Extracted line items: a JSON array or a CSV file
    input: PathBuf,

    /// Company the line items belong to; used to title the report
    #[arg(long)]
    company: Option<String>,

    /// Rule table (.csv or .json) to use instead of the built-in one
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Write the report to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load().into_diagnostic()?;
    telemetry::init(&config.telemetry).into_diagnostic()?;

    let rules = match cli.rules.or(config.rules_path) {
        Some(path) => load_rule_table(path).await.into_diagnostic()?,
        None => RuleTable::builtin(),
    };
    let engine = PayoutEngine::new(Arc::new(rules));

    let company_name = cli.company.unwrap_or(config.company_name);
    let source: RecordSourceBox = Box::new(FileRecordSource::new(&cli.input));
    let batch = engine
        .run(source.as_ref(), &company_name)
        .await
        .into_diagnostic()?;

    let mut sink: Box<dyn Write> = match cli.output {
        Some(path) => Box::new(File::create(path).into_diagnostic()?),
        None => Box::new(io::stdout().lock()),
    };

    match cli.format {
        OutputFormat::Csv => {
            let mut writer = ReportWriter::new(sink);
            writer.write_outcomes(&batch.outcomes).into_diagnostic()?;
        }
        OutputFormat::Json => {
            let report = PayoutReport::new(&batch, engine.rules(), &company_name);
            let json = report.to_json().into_diagnostic()?;
            writeln!(sink, "{json}").into_diagnostic()?;
            sink.flush().into_diagnostic()?;
        }
    }

    Ok(())
}
