//! Configuration types for seed data generation.

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use dairy::{Product, SCHEMA};

use crate::error::SeedError;
use crate::generators::{
    batch::BatchGenConfig, milk::MilkGenConfig, product::default_catalog, round_to,
    sale::SaleGenConfig,
};

/// Closed interval of real values sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns a uniform sample rounded to `decimals` places, never outside the range.
    ///
    /// Sampling happens between the innermost bounds representable at that
    /// precision, so rounding cannot push a value past `min` or `max`.
    pub fn sample_rounded(&self, decimals: i32, rng: &mut impl Rng) -> f64 {
        let (lo, hi) = self.rounded_bounds(decimals);
        round_to(rng.gen_range(lo..=hi), decimals).clamp(lo, hi)
    }

    /// Smallest and largest values within the range at `decimals` places.
    pub fn rounded_bounds(&self, decimals: i32) -> (f64, f64) {
        let factor = 10f64.powi(decimals);
        let lo = snap(self.min * factor, f64::ceil) / factor;
        let hi = snap(self.max * factor, f64::floor) / factor;
        (lo, hi)
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn validate(&self, field: &str) -> Result<(), SeedError> {
        if !self.min.is_finite()
            || !self.max.is_finite()
            || self.min > self.max
            || !(self.max - self.min).is_finite()
        {
            return Err(SeedError::InvalidConfig(format!(
                "{field}: range {}..={} is empty or not finite",
                self.min, self.max
            )));
        }
        Ok(())
    }

    /// Like [`validate`](Self::validate), and also requires a value at `decimals` places.
    pub fn validate_rounded(&self, field: &str, decimals: i32) -> Result<(), SeedError> {
        self.validate(field)?;

        let (lo, hi) = self.rounded_bounds(decimals);
        if !lo.is_finite() || !hi.is_finite() || lo > hi || !(hi - lo).is_finite() {
            return Err(SeedError::InvalidConfig(format!(
                "{field}: range {}..={} holds no value with {decimals} decimal places",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

// Absorbs float noise such as 4.1 * 100 = 409.99999999999994 before rounding outward.
fn snap(scaled: f64, direction: fn(f64) -> f64) -> f64 {
    let nearest = scaled.round();
    if (scaled - nearest).abs() < 1e-6 {
        nearest
    } else {
        direction(scaled)
    }
}

/// Closed interval of counts sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn sample(&self, rng: &mut impl Rng) -> u32 {
        rng.gen_range(self.min..=self.max)
    }

    pub fn contains(&self, value: u32) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn validate(&self, field: &str) -> Result<(), SeedError> {
        if self.min > self.max {
            return Err(SeedError::InvalidConfig(format!(
                "{field}: range {}..={} is empty",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

pub(crate) fn validate_probability(field: &str, p: f64) -> Result<(), SeedError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(SeedError::InvalidConfig(format!(
            "{field}: probability {p} is outside [0, 1]"
        )));
    }
    Ok(())
}

pub(crate) fn validate_choices<T>(field: &str, choices: &[T]) -> Result<(), SeedError> {
    if choices.is_empty() {
        return Err(SeedError::InvalidConfig(format!("{field}: no values to choose from")));
    }
    Ok(())
}

/// Top-level configuration for a seeding run.
///
/// Every field falls back to its default when missing from a config file, so a
/// file only needs to list what it overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Days of history before today (the window also includes today).
    pub history_days: u32,

    /// Schema namespace of the target tables.
    pub schema: String,

    /// Maximum rows per `INSERT` statement; `None` puts each table in one statement.
    pub rows_per_statement: Option<usize>,

    /// Static product catalog.
    pub products: Vec<Product>,

    pub milk: MilkGenConfig,
    pub batches: BatchGenConfig,
    pub sales: SaleGenConfig,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            history_days: 90,
            schema: SCHEMA.to_string(),
            rows_per_statement: None,
            products: default_catalog(),
            milk: MilkGenConfig::default(),
            batches: BatchGenConfig::default(),
            sales: SaleGenConfig::default(),
        }
    }
}

impl SeedConfig {
    /// Parses a JSON config, filling omitted fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Checks every range, probability, and choice list before generation starts.
    pub fn validate(&self) -> Result<(), SeedError> {
        if self.schema.is_empty()
            || !self
                .schema
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(SeedError::InvalidConfig(format!(
                "schema: '{}' is not a plain identifier",
                self.schema
            )));
        }
        if self.rows_per_statement == Some(0) {
            return Err(SeedError::InvalidConfig(
                "rows_per_statement: must be at least 1".to_string(),
            ));
        }

        self.milk.validate()?;
        self.batches.validate()?;
        self.sales.validate()?;
        Ok(())
    }
}
