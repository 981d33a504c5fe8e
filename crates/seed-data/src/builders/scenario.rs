//! Fluent builder for constructing seed scenarios.

use std::time::Instant;

use rand::Rng;
use time::Date;
use tracing::info;

use dairy::{BatchStatus, Product};

use crate::calendar::{HistoryWindow, local_today};
use crate::config::SeedConfig;
use crate::error::SeedError;
use crate::generators::{
    BatchGenConfig, BatchGenerator, GeneratedBatch, GeneratedMilkRecord, GeneratedSale,
    MilkRecordGenerator, SaleGenerator,
};
use crate::sql::{SeedWriter, TRUNCATED_TABLES};

/// Result of building a scenario.
#[derive(Debug)]
pub struct ScenarioResult {
    pub window: HistoryWindow,
    pub schema: String,
    pub rows_per_statement: Option<usize>,
    pub products: Vec<Product>,
    pub milk_records: Vec<GeneratedMilkRecord>,
    pub batches: Vec<GeneratedBatch>,
    pub sales: Vec<GeneratedSale>,
    /// Metrics from scenario generation (populated if metrics tracking enabled).
    pub metrics: Option<ScenarioMetrics>,
}

impl ScenarioResult {
    /// Renders the complete seed script.
    ///
    /// Statement order: truncate, products, milk records, production batches, sales.
    pub fn to_sql(&self) -> Result<String, SeedError> {
        let mut writer = SeedWriter::new(self.schema.clone());
        if let Some(size) = self.rows_per_statement {
            writer = writer.with_batch_size(size);
        }

        writer.truncate(&TRUNCATED_TABLES);
        writer.write_products(&self.products)?;
        writer.write_milk_records(&self.milk_records)?;
        writer.write_batches(&self.batches)?;
        writer.write_sales(&self.sales)?;

        Ok(writer.finish())
    }
}

/// Counts and timing from scenario generation.
#[derive(Debug, Clone)]
pub struct ScenarioMetrics {
    /// Time spent generating data (milliseconds).
    pub generation_time_ms: u64,
    pub day_count: usize,
    pub product_count: usize,
    pub milk_record_count: usize,
    pub batch_count: usize,
    /// Batches started on the last day of the window.
    pub in_progress_batch_count: usize,
    pub sale_count: usize,
}

/// Builder for creating complete seed scenarios.
///
/// # Example
///
/// ```rust,ignore
/// let mut rng = StdRng::seed_from_u64(12345);
/// let sql = ScenarioBuilder::new()
///     .with_today(date!(2024 - 03 - 31))
///     .with_history_days(30)
///     .build(&mut rng)?;
/// ```
pub struct ScenarioBuilder {
    config: SeedConfig,
    /// Last day of the window; the local date when unset.
    today: Option<Date>,
    track_metrics: bool,
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioBuilder {
    /// Creates a new scenario builder with default settings.
    pub fn new() -> Self {
        Self {
            config: SeedConfig::default(),
            today: None,
            track_metrics: false,
        }
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: SeedConfig) -> Self {
        self.config = config;
        self
    }

    /// Pins the last day of the window.
    pub fn with_today(mut self, today: Date) -> Self {
        self.today = Some(today);
        self
    }

    /// Sets the number of days of history before today.
    pub fn with_history_days(mut self, days: u32) -> Self {
        self.config.history_days = days;
        self
    }

    /// Sets the schema namespace of the target tables.
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.config.schema = schema.into();
        self
    }

    /// Limits the number of rows per `INSERT` statement.
    pub fn with_rows_per_statement(mut self, rows: usize) -> Self {
        self.config.rows_per_statement = Some(rows);
        self
    }

    /// Sets the production batch configuration.
    pub fn with_batch_config(mut self, config: BatchGenConfig) -> Self {
        self.config.batches = config;
        self
    }

    /// Enables metrics tracking.
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.track_metrics = enabled;
        self
    }

    /// Generates every entity without rendering SQL.
    pub fn build_data(&self, rng: &mut impl Rng) -> Result<ScenarioResult, SeedError> {
        self.config.validate()?;

        let start_time = if self.track_metrics {
            Some(Instant::now())
        } else {
            None
        };

        let today = self.today.unwrap_or_else(local_today);
        let window = HistoryWindow::ending_on(today, self.config.history_days)?;
        info!(
            "Generating seed data from {} to {} ({} days)",
            window.start(),
            window.end(),
            window.day_count()
        );

        let products = self.config.products.clone();

        let milk_gen = MilkRecordGenerator::with_config(self.config.milk.clone());
        let milk_records = milk_gen.generate(&window, rng)?;
        info!("Generated {} milk records", milk_records.len());

        let batch_gen = BatchGenerator::with_config(self.config.batches.clone());
        let batches = batch_gen.generate(&window, rng)?;
        info!("Generated {} production batches", batches.len());

        let sale_gen = SaleGenerator::with_config(self.config.sales.clone());
        let sales = sale_gen.generate(&window, rng)?;
        info!("Generated {} sales", sales.len());

        let metrics = start_time.map(|start| ScenarioMetrics {
            generation_time_ms: start.elapsed().as_millis() as u64,
            day_count: window.day_count(),
            product_count: products.len(),
            milk_record_count: milk_records.len(),
            batch_count: batches.len(),
            in_progress_batch_count: batches
                .iter()
                .filter(|b| b.status == BatchStatus::InProgress)
                .count(),
            sale_count: sales.len(),
        });

        Ok(ScenarioResult {
            window,
            schema: self.config.schema.clone(),
            rows_per_statement: self.config.rows_per_statement,
            products,
            milk_records,
            batches,
            sales,
            metrics,
        })
    }

    /// Generates the scenario and renders it as a SQL script.
    pub fn build(&self, rng: &mut impl Rng) -> Result<String, SeedError> {
        self.build_data(rng)?.to_sql()
    }
}

/// Preset scenarios.
impl ScenarioBuilder {
    /// The standard 90-day demo dataset.
    pub fn demo() -> Self {
        Self::new().with_history_days(90)
    }

    /// A one-week dataset where every visited day starts a batch.
    pub fn quick_check() -> Self {
        Self::new()
            .with_history_days(6)
            .with_batch_config(BatchGenConfig {
                production_probability: 1.0,
                ..Default::default()
            })
    }
}
