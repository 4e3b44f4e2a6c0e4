use analytics::{AnalyticsError, CleaningOptions, DataCleaner, KpiEngine, order_value_distribution};
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use configuration::{Config, GeneratorSettings, LogFormat, load_config};
use core_types::{MissingAmountPolicy, RawTransaction};
use generator::{GeneratorParams, SalesGenerator};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::process::ExitCode;

/// The main entry point for the salesboard application.
fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "Run failed.");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Retail sales KPI dashboard: cleans a transaction table and reports on it.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults to `salesboard.toml` if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log line layout on stderr.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean a dataset, compute KPIs, print the report and write chart data (default).
    Analyze(AnalyzeArgs),
    /// Write a synthetic sales dataset to CSV and exit.
    Generate(GenerateArgs),
}

#[derive(Args, Default)]
struct AnalyzeArgs {
    /// Transaction CSV to analyze. Without it a sample dataset is generated.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Directory that receives the chart data and JSON summary.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Number of orders to generate when no input is given.
    #[arg(long)]
    orders: Option<usize>,

    /// Seed for the sample generator.
    #[arg(long)]
    seed: Option<u64>,

    /// Fill missing amounts with this value instead of dropping the row.
    #[arg(long, value_name = "AMOUNT")]
    impute_missing: Option<Decimal>,

    /// Number of bins in the order-value distribution.
    #[arg(long)]
    bins: Option<usize>,

    /// Print the report only.
    #[arg(long)]
    no_artifacts: bool,
}

#[derive(Args)]
struct GenerateArgs {
    /// Destination CSV file.
    #[arg(long)]
    output: PathBuf,

    #[arg(long)]
    orders: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    /// Share of rows (0.0 to 1.0) to damage on purpose.
    #[arg(long)]
    dirty_fraction: Option<f64>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }

    let command = cli.command.unwrap_or(Commands::Analyze(AnalyzeArgs::default()));
    match &command {
        Commands::Analyze(args) => apply_analyze_overrides(&mut config, args),
        Commands::Generate(args) => apply_generate_overrides(&mut config, args),
    }
    configuration::validate(&config).context("Invalid settings")?;

    // The guard flushes the log file on drop, so it lives until the run ends.
    let _log_guard = configuration::init_logging(&config.logging).context("Failed to initialize logging")?;

    match command {
        Commands::Analyze(args) => handle_analyze(&config, args.input),
        Commands::Generate(args) => handle_generate(&config, args.output),
    }
}

fn apply_analyze_overrides(config: &mut Config, args: &AnalyzeArgs) {
    if let Some(dir) = &args.output_dir {
        config.output.dir = dir.clone();
    }
    if let Some(orders) = args.orders {
        config.generator.orders = orders;
    }
    if let Some(seed) = args.seed {
        config.generator.seed = seed;
    }
    if let Some(amount) = args.impute_missing {
        config.cleaning.missing_amount = MissingAmountPolicy::Impute(amount);
    }
    if let Some(bins) = args.bins {
        config.report.histogram_bins = bins;
    }
    if args.no_artifacts {
        config.report.write_artifacts = false;
    }
}

fn apply_generate_overrides(config: &mut Config, args: &GenerateArgs) {
    if let Some(orders) = args.orders {
        config.generator.orders = orders;
    }
    if let Some(seed) = args.seed {
        config.generator.seed = seed;
    }
    if let Some(fraction) = args.dirty_fraction {
        config.generator.dirty_fraction = fraction;
    }
}

/// Runs the full pipeline: load or generate, clean, aggregate, report.
fn handle_analyze(config: &Config, input: Option<PathBuf>) -> anyhow::Result<ExitCode> {
    let raw = match input {
        Some(path) => dataset::load_csv(&path).context("Failed to load input dataset")?,
        None => generate_rows(&config.generator)?,
    };

    let cleaner = DataCleaner::new(CleaningOptions {
        missing_amount: config.cleaning.missing_amount,
        drop_duplicates: config.cleaning.drop_duplicates,
    });
    let cleaned = match cleaner.clean(&raw) {
        Ok(cleaned) => cleaned,
        Err(AnalyticsError::EmptyDataset { rows_in }) => {
            tracing::error!(rows_in, "No valid transactions remain after cleaning; nothing to report.");
            eprintln!("Error: no valid transactions remain after cleaning {rows_in} rows; nothing to report.");
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => return Err(err).context("Failed to clean dataset"),
    };

    let summary = KpiEngine::new()
        .calculate(&cleaned.transactions)
        .context("Failed to compute KPIs")?;
    println!("{}", reporting::render_summary(&summary, &cleaned.report));

    if !config.report.write_artifacts {
        return Ok(ExitCode::SUCCESS);
    }

    let histogram = order_value_distribution(&cleaned.transactions, config.report.histogram_bins)
        .context("Failed to build order-value distribution")?;
    let outcome = reporting::write_artifacts(&config.output.dir, &summary, &cleaned.report, &histogram);
    for path in &outcome.written {
        println!("Saved {}", path.display());
    }

    if outcome.is_complete() {
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::error!(failed = outcome.failures.len(), "Some artifacts could not be written.");
        eprintln!("Error: {} artifact(s) could not be written.", outcome.failures.len());
        Ok(ExitCode::FAILURE)
    }
}

fn handle_generate(config: &Config, output: PathBuf) -> anyhow::Result<ExitCode> {
    let rows = generate_rows(&config.generator)?;
    dataset::write_csv(&output, &rows)
        .with_context(|| format!("Failed to write dataset to '{}'", output.display()))?;
    println!("Wrote {} orders to {}", rows.len(), output.display());
    Ok(ExitCode::SUCCESS)
}

fn generate_rows(settings: &GeneratorSettings) -> anyhow::Result<Vec<RawTransaction>> {
    let params = GeneratorParams {
        orders: settings.orders,
        seed: settings.seed,
        start_date: settings.start_date,
        end_date: settings.end_date,
        dirty_fraction: settings.dirty_fraction,
    };
    let mut generator = SalesGenerator::new(params).context("Invalid generator settings")?;
    generator.generate().context("Failed to generate sample data")
}
