// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use salary_insights::utils::logging::{
    format_error, format_info, format_step, format_success, format_warning,
};
use salary_insights::{
    ConfidenceTier, Config, CurrencyConverter, InsightReport, JsonExporter, NormalizationPipeline,
    PipelineOrchestrator, QuestionId, RejectionReason, Validator, read_batch,
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "salary_insights")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Normalize salary survey responses and answer compensation questions", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a survey export and answer the business questions
    Analyze {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(short, long, default_value = "./exports")]
        output: PathBuf,

        #[arg(short, long)]
        pretty: bool,

        #[arg(long, value_name = "NUM", env = "SALARY_INSIGHTS_WORKERS")]
        workers: Option<usize>,
    },

    /// Validate the input schema and print the data-quality summary
    Check {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
    },

    /// Print the exchange-rate table
    Rates,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    salary_insights::utils::logging::init_logger(cli.color, cli.verbose);
    colored::control::set_override(cli.color);

    info!("Salary Insights Pipeline");
    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::default_config()
    };

    match cli.command {
        Commands::Analyze {
            input,
            output,
            pretty,
            workers,
        } => {
            cmd_analyze(config, &input, output, pretty, workers).await?;
        }
        Commands::Check { input } => {
            cmd_check(&config, &input)?;
        }
        Commands::Rates => {
            cmd_rates(&config);
        }
    }

    Ok(())
}

async fn cmd_analyze(
    mut config: Config,
    input: &Path,
    output: PathBuf,
    pretty: bool,
    workers: Option<usize>,
) -> Result<()> {
    let start_time = Instant::now();

    if let Some(workers) = workers {
        Validator::validate_worker_count(workers)?;
        config.pipeline.parallel_workers = workers;
    }
    Validator::validate_input(input)?;
    Validator::validate_output_dir(&output)?;

    println!("{}", format_step(1, 3, &format!("Reading {}", input.display())));
    let batch = read_batch(input)
        .with_context(|| format!("Failed to read survey export {}", input.display()))?;

    println!("{}", format_step(2, 3, &format!("Analyzing {} rows", batch.len())));
    let orchestrator = PipelineOrchestrator::new(config).context("Invalid configuration")?;
    let outcome = orchestrator.run(batch).await?;

    println!("{}", format_step(3, 3, "Exporting results"));
    let exporter = JsonExporter::new(output, pretty)?;
    let manifest = exporter.export_all(&outcome.report, &outcome.batch.records)?;

    print_report(&outcome.report);

    println!(
        "\n{}",
        format_success(&format!(
            "Wrote {} files to {} in {:.2}s",
            manifest.files.len() + 1,
            exporter.output_dir().display(),
            start_time.elapsed().as_secs_f64()
        ))
    );

    Ok(())
}

fn cmd_check(config: &Config, input: &Path) -> Result<()> {
    Validator::validate_input(input)?;

    let batch = read_batch(input)
        .with_context(|| format!("Failed to read survey export {}", input.display()))?;
    println!("{}", format_success(&format!("Schema OK: {} rows", batch.len())));

    let normalized = NormalizationPipeline::new(config).normalize(&batch)?;
    let quality = &normalized.summary;

    println!("\nData quality");
    println!("{}", "=".repeat(60));
    println!("  Rows in:        {}", quality.rows_in);
    println!(
        "  Rows retained:  {} ({:.1}%)",
        quality.rows_retained,
        quality.retention_rate()
    );
    println!("  Rows dropped:   {}", quality.rows_dropped());
    for reason in RejectionReason::ALL {
        println!("    {:<26}{}", reason.as_str(), quality.dropped(reason));
    }
    println!("  Experience unresolved:    {}", quality.experience_unresolved);
    println!("  State unresolved (US):    {}", quality.state_unresolved);
    println!("  Classification defaulted: {}", quality.classification_defaulted);
    println!("{}", "=".repeat(60));

    Ok(())
}

fn cmd_rates(config: &Config) {
    let converter = CurrencyConverter::new(&config.currency);

    println!(
        "\nExchange rates to USD ({} reference year)",
        converter.reference_year()
    );
    println!("{}", "=".repeat(40));
    for (code, rate) in converter.rates() {
        println!("  {:<6}{:>10.4}", code, rate);
    }
    println!("{}", "=".repeat(40));
}

fn print_report(report: &InsightReport) {
    println!(
        "\nInsights ({} rates, {} of {} rows retained)",
        report.reference_year, report.data_quality.rows_retained, report.data_quality.rows_in
    );
    println!("{}", "=".repeat(80));

    for id in QuestionId::ALL {
        let Some(answer) = report.answer(id) else {
            continue;
        };
        let line = format!(
            "{}: {} [n={}, {:?}]",
            id.description(),
            answer.answer_value,
            answer.sample_size,
            answer.confidence_tier
        );
        if !answer.answer_value.is_defined() {
            println!("{}", format_error(&line));
        } else if answer.confidence_tier == ConfidenceTier::Low {
            println!("{}", format_warning(&line));
        } else {
            println!("{}", format_info(&line));
        }
    }

    println!("{}", "=".repeat(80));
}
