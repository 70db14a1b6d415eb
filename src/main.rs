use anyhow::Context;
use clap::Parser;
use product_etl::core::ConfigProvider;
use product_etl::utils::{logger, validation::Validate};
use product_etl::{CliConfig, CsvPipeline, EtlEngine, LocalStorage, RunSummary, SummaryFormat, TomlConfig};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct SummaryReport<'a> {
    #[serde(flatten)]
    summary: &'a RunSummary,
    output: &'a str,
}

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting product-etl CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let mut config = match TomlConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 {}", e.recovery_suggestion());
                    std::process::exit(1);
                }
            };
            cli.apply_overrides(&mut config);
            let monitor = cli.monitor || config.monitoring_enabled();
            tracing::info!("Running pipeline '{}'", config.pipeline_name());
            run(&config, monitor, cli.summary_format)
        }
        None => run(&cli, cli.monitor, cli.summary_format),
    }
}

fn run<C: ConfigProvider + Validate>(
    config: &C,
    monitor: bool,
    format: SummaryFormat,
) -> anyhow::Result<()> {
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let input = Path::new(config.input_path());
    if !input.exists() {
        eprintln!("ERROR: Input file not found: {}", input.display());
        eprintln!("Ensure you run from the project root and that the data/ folder exists.");
        std::process::exit(1);
    }

    if monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let pipeline = CsvPipeline::from_config(LocalStorage::default(), config)
        .context("failed to build pipeline from configuration")?;
    let mut engine = EtlEngine::new_with_monitoring(pipeline, monitor);

    match engine.run() {
        Ok(summary) => {
            print_summary(&summary, config.output_path(), format)
                .context("failed to render run summary")
        }
        Err(e) => {
            tracing::error!(
                "❌ ETL process failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    }
}

fn print_summary(
    summary: &RunSummary,
    output: &str,
    format: SummaryFormat,
) -> Result<(), serde_json::Error> {
    match format {
        SummaryFormat::Text => {
            println!("Summary:");
            println!("- Rows read: {}", summary.rows_read());
            println!("- Rows transformed: {}", summary.rows_transformed());
            println!("- Rows skipped: {}", summary.rows_skipped());
            println!("- Output written to: {}", output);
        }
        SummaryFormat::Json => {
            let report = SummaryReport { summary, output };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
