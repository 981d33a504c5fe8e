//! Production batch generation.
//!
//! Batches are started on a walk through the history window that advances a
//! random number of days after each visited date. A visited date gets a batch
//! with a fixed probability; batches started on the last day of the window are
//! still running and carry no end time or output.

use rand::Rng;
use rand::seq::SliceRandom;
use rand_distr::{Bernoulli, Distribution};
use serde::{Deserialize, Serialize};
use time::{Date, Duration, PrimitiveDateTime};
use tracing::debug;

use dairy::{BatchStatus, ProductType};

use crate::calendar::HistoryWindow;
use crate::config::{CountRange, ValueRange, validate_choices, validate_probability};
use crate::error::SeedError;
use crate::generators::round_to;

/// Generated production batch ready for insertion into `production_batches`.
#[derive(Debug, Clone)]
pub struct GeneratedBatch {
    pub batch_number: String,
    /// Numeric suffix of `batch_number`.
    pub counter: u32,
    pub product_type: ProductType,
    pub milk_used_liters: f64,
    pub start_time: PrimitiveDateTime,
    pub end_time: Option<PrimitiveDateTime>,
    pub status: BatchStatus,
    pub output_quantity: Option<f64>,
    pub output_unit: Option<String>,
}

impl GeneratedBatch {
    pub fn start_date(&self) -> Date {
        self.start_time.date()
    }
}

/// Configuration for batch generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchGenConfig {
    /// Probability that a visited date starts a batch.
    pub production_probability: f64,
    /// Days to advance after each visited date.
    pub step_days: CountRange,
    /// Product types to choose from, uniformly.
    pub product_types: Vec<ProductType>,
    /// Milk consumed per batch, rounded to whole liters.
    pub milk_used_liters: ValueRange,
    /// Counter of the first batch.
    pub counter_start: u32,
    /// Year in the batch number; defaults to the year of the last window day.
    pub batch_year: Option<i32>,
    pub start_hour: u8,
    pub end_hour: u8,
    pub output_unit: String,
}

impl Default for BatchGenConfig {
    fn default() -> Self {
        Self {
            production_probability: 0.7,
            step_days: CountRange::new(1, 2),
            product_types: ProductType::ALL.to_vec(),
            milk_used_liters: ValueRange::new(300.0, 800.0),
            counter_start: 100,
            batch_year: None,
            start_hour: 8,
            end_hour: 18,
            output_unit: "Kg".to_string(),
        }
    }
}

impl BatchGenConfig {
    pub fn validate(&self) -> Result<(), SeedError> {
        validate_probability("batches.production_probability", self.production_probability)?;
        self.step_days.validate("batches.step_days")?;
        if self.step_days.min == 0 {
            return Err(SeedError::InvalidConfig(
                "batches.step_days: minimum step must be at least one day".to_string(),
            ));
        }
        validate_choices("batches.product_types", &self.product_types)?;
        self.milk_used_liters
            .validate_rounded("batches.milk_used_liters", 0)?;
        if self.start_hour > 23 || self.end_hour > 23 || self.start_hour > self.end_hour {
            return Err(SeedError::InvalidConfig(format!(
                "batches: hours {}..{} are not a valid working day",
                self.start_hour, self.end_hour
            )));
        }
        Ok(())
    }
}

/// Generates production batches.
pub struct BatchGenerator {
    config: BatchGenConfig,
}

impl BatchGenerator {
    /// Creates a new batch generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: BatchGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: BatchGenConfig) -> Self {
        Self { config }
    }

    /// Walks the window and generates batches in start order.
    pub fn generate(
        &self,
        window: &HistoryWindow,
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedBatch>, SeedError> {
        self.config.validate()?;

        let produce = Bernoulli::new(self.config.production_probability).map_err(|e| {
            SeedError::InvalidConfig(format!("batches.production_probability: {e}"))
        })?;
        let year = self.config.batch_year.unwrap_or_else(|| window.end().year());

        let mut batches = Vec::new();
        // None once the counter has been used up at u32::MAX
        let mut next_counter = Some(self.config.counter_start);
        let mut date = window.start();

        while date <= window.end() {
            if produce.sample(rng) {
                let counter = next_counter.ok_or_else(|| {
                    SeedError::InvalidConfig(format!(
                        "batches.counter_start: {} leaves no room for batch {}",
                        self.config.counter_start,
                        batches.len() + 1
                    ))
                })?;
                let batch = self.generate_single(date, counter, year, window, rng)?;
                debug!(
                    "Batch {} ({}) started {}",
                    batch.batch_number,
                    batch.status.as_str(),
                    date
                );
                batches.push(batch);
                next_counter = counter.checked_add(1);
            }

            let step = self.config.step_days.sample(rng);
            date = match date.checked_add(Duration::days(i64::from(step))) {
                Some(next) => next,
                None => break,
            };
        }

        Ok(batches)
    }

    /// Generates one batch started on `date`.
    pub(crate) fn generate_single(
        &self,
        date: Date,
        counter: u32,
        year: i32,
        window: &HistoryWindow,
        rng: &mut impl Rng,
    ) -> Result<GeneratedBatch, SeedError> {
        let product_type = *self.config.product_types.choose(rng).ok_or_else(|| {
            SeedError::InvalidConfig("batches.product_types: no values to choose from".to_string())
        })?;
        let milk_used_liters = self.config.milk_used_liters.sample_rounded(0, rng);
        let start_time = date.with_hms(self.config.start_hour, 0, 0)?;

        let batch_number = format!("{year}-{}-{counter}", product_type.batch_code());

        if window.days_before_end(date) < 1 {
            return Ok(GeneratedBatch {
                batch_number,
                counter,
                product_type,
                milk_used_liters,
                start_time,
                end_time: None,
                status: BatchStatus::InProgress,
                output_quantity: None,
                output_unit: None,
            });
        }

        let end_time = date.with_hms(self.config.end_hour, 0, 0)?;
        let output_quantity = round_to(milk_used_liters * product_type.yield_ratio(), 1);

        Ok(GeneratedBatch {
            batch_number,
            counter,
            product_type,
            milk_used_liters,
            start_time,
            end_time: Some(end_time),
            status: BatchStatus::Completed,
            output_quantity: Some(output_quantity),
            output_unit: Some(self.config.output_unit.clone()),
        })
    }
}

impl Default for BatchGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use time::macros::{date, datetime};

    fn window() -> HistoryWindow {
        HistoryWindow::ending_on(date!(2024 - 05 - 20), 90).unwrap()
    }

    #[test]
    fn test_counters_strictly_increase() {
        let batch_gen = BatchGenerator::new();
        let mut rng = StdRng::seed_from_u64(42);
        let batches = batch_gen.generate(&window(), &mut rng).unwrap();

        assert!(!batches.is_empty());
        assert_eq!(batches[0].counter, 100);
        for pair in batches.windows(2) {
            assert_eq!(pair[1].counter, pair[0].counter + 1);
            assert!(pair[1].start_time > pair[0].start_time);
        }

        let numbers: std::collections::HashSet<_> =
            batches.iter().map(|b| b.batch_number.as_str()).collect();
        assert_eq!(numbers.len(), batches.len());
    }

    #[test]
    fn test_steps_are_one_or_two_days() {
        let batch_gen = BatchGenerator::with_config(BatchGenConfig {
            production_probability: 1.0,
            ..Default::default()
        });
        let mut rng = StdRng::seed_from_u64(5);
        let batches = batch_gen.generate(&window(), &mut rng).unwrap();

        assert_eq!(batches[0].start_date(), window().start());
        for pair in batches.windows(2) {
            let gap = (pair[1].start_date() - pair[0].start_date()).whole_days();
            assert!((1..=2).contains(&gap), "gap of {gap} days");
        }
        // Roughly 91 days / 1.5 days per step
        assert!(batches.len() >= 46 && batches.len() <= 91);
    }

    #[test]
    fn test_batch_started_today_is_in_progress() {
        let batch_gen = BatchGenerator::new();
        let window = window();
        let mut rng = StdRng::seed_from_u64(9);
        let batch = batch_gen
            .generate_single(window.end(), 321, 2024, &window, &mut rng)
            .unwrap();

        assert_eq!(batch.status, BatchStatus::InProgress);
        assert_eq!(batch.start_time, datetime!(2024 - 05 - 20 08:00:00));
        assert!(batch.end_time.is_none());
        assert!(batch.output_quantity.is_none());
        assert!(batch.output_unit.is_none());
    }

    #[test]
    fn test_completed_batch_output() {
        let batch_gen = BatchGenerator::new();
        let window = window();
        let mut rng = StdRng::seed_from_u64(9);
        let batch = batch_gen
            .generate_single(date!(2024 - 05 - 19), 7, 2024, &window, &mut rng)
            .unwrap();

        assert_eq!(batch.status, BatchStatus::Completed);
        assert_eq!(batch.end_time, Some(datetime!(2024 - 05 - 19 18:00:00)));
        assert_eq!(batch.output_unit.as_deref(), Some("Kg"));
        assert_eq!(
            batch.output_quantity,
            Some(round_to(
                batch.milk_used_liters * batch.product_type.yield_ratio(),
                1
            ))
        );
        assert!((300.0..=800.0).contains(&batch.milk_used_liters));
        assert_eq!(batch.milk_used_liters.fract(), 0.0);
        assert_eq!(
            batch.batch_number,
            format!("2024-{}-7", batch.product_type.batch_code())
        );
    }

    #[test]
    fn test_yogurt_uses_higher_yield() {
        let batch_gen = BatchGenerator::with_config(BatchGenConfig {
            product_types: vec![ProductType::Yogurt],
            milk_used_liters: ValueRange::new(500.0, 500.0),
            ..Default::default()
        });
        let window = window();
        let mut rng = StdRng::seed_from_u64(1);
        let batch = batch_gen
            .generate_single(window.start(), 100, 2024, &window, &mut rng)
            .unwrap();

        assert_eq!(batch.batch_number, "2024-YOĞ-100");
        assert_eq!(batch.output_quantity, Some(400.0));
    }

    #[test]
    fn test_zero_probability_yields_no_batches() {
        let batch_gen = BatchGenerator::with_config(BatchGenConfig {
            production_probability: 0.0,
            ..Default::default()
        });
        let mut rng = StdRng::seed_from_u64(2);
        assert!(batch_gen.generate(&window(), &mut rng).unwrap().is_empty());
    }

    #[test]
    fn test_zero_step_is_rejected() {
        let config = BatchGenConfig {
            step_days: CountRange::new(0, 2),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_batch_year_defaults_to_window_end() {
        let batch_gen = BatchGenerator::with_config(BatchGenConfig {
            production_probability: 1.0,
            ..Default::default()
        });
        let window = HistoryWindow::ending_on(date!(2025 - 01 - 10), 30).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let batches = batch_gen.generate(&window, &mut rng).unwrap();

        assert!(batches.iter().all(|b| b.batch_number.starts_with("2025-")));
    }

    #[test]
    fn test_counter_overflow_is_reported() {
        let batch_gen = BatchGenerator::with_config(BatchGenConfig {
            counter_start: u32::MAX,
            production_probability: 1.0,
            ..Default::default()
        });
        let mut rng = StdRng::seed_from_u64(6);

        assert!(matches!(
            batch_gen.generate(&window(), &mut rng),
            Err(SeedError::InvalidConfig(msg)) if msg.contains("batches.counter_start")
        ));
    }

    #[test]
    fn test_last_counter_value_is_usable() {
        let batch_gen = BatchGenerator::with_config(BatchGenConfig {
            counter_start: u32::MAX,
            production_probability: 1.0,
            ..Default::default()
        });
        let window = HistoryWindow::ending_on(date!(2024 - 05 - 20), 0).unwrap();
        let mut rng = StdRng::seed_from_u64(6);
        let batches = batch_gen.generate(&window, &mut rng).unwrap();

        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].counter, u32::MAX);
    }

    #[test]
    fn test_empty_product_types_is_an_error() {
        let batch_gen = BatchGenerator::with_config(BatchGenConfig {
            product_types: Vec::new(),
            ..Default::default()
        });
        let window = window();
        let mut rng = StdRng::seed_from_u64(1);

        assert!(matches!(
            batch_gen.generate_single(window.start(), 100, 2024, &window, &mut rng),
            Err(SeedError::InvalidConfig(_))
        ));
    }
}
