//! Default seed script - prints the SQL for a 90-day demo dataset
//!
//! Run with:
//! ```
//! cargo run -p seed-data --bin seed > seed.sql
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use seed_data::builders::ScenarioBuilder;
use seed_data::config::SeedConfig;
use time::Date;
use time::macros::format_description;
use tracing_subscriber::EnvFilter;

/// Generates seed SQL for the dairy database.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for reproducible output
    #[arg(short, long)]
    seed: Option<u64>,

    /// Last day of the window (YYYY-MM-DD), defaults to the local date
    #[arg(short, long, value_parser = parse_date)]
    today: Option<Date>,

    /// Days of history before today
    #[arg(short, long)]
    days: Option<u32>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the script here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn parse_date(s: &str) -> Result<Date, String> {
    Date::parse(s, format_description!("[year]-[month]-[day]")).map_err(|e| e.to_string())
}

/// Reads `--config` (or the defaults) and applies the `--days` override.
fn load_config(args: &Args) -> anyhow::Result<SeedConfig> {
    let mut config = match &args.config {
        Some(path) => SeedConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SeedConfig::default(),
    };
    if let Some(days) = args.days {
        config.history_days = days;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays pure SQL
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = load_config(&args)?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut builder = ScenarioBuilder::new().with_config(config).with_metrics(true);
    if let Some(today) = args.today {
        builder = builder.with_today(today);
    }

    let result = builder.build_data(&mut rng)?;
    let sql = result.to_sql()?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, format!("{sql}\n"))
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("Wrote seed script to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{sql}")?;
            stdout.flush()?;
        }
    }

    // Summary output
    if let Some(metrics) = &result.metrics {
        tracing::info!("Seed completed in {} ms", metrics.generation_time_ms);
        tracing::info!("  Days: {}", metrics.day_count);
        tracing::info!("  Products: {}", metrics.product_count);
        tracing::info!("  Milk records: {}", metrics.milk_record_count);
        tracing::info!(
            "  Production batches: {} ({} in progress)",
            metrics.batch_count,
            metrics.in_progress_batch_count
        );
        tracing::info!("  Sales: {}", metrics.sale_count);
    }

    Ok(())
}
