//! Milk intake record generation, one record per shift per day.

use rand::Rng;
use serde::{Deserialize, Serialize};
use time::Date;

use dairy::Shift;

use crate::calendar::HistoryWindow;
use crate::config::ValueRange;
use crate::error::SeedError;

/// Generated milk record ready for insertion into `milk_records`.
#[derive(Debug, Clone)]
pub struct GeneratedMilkRecord {
    pub date: Date,
    pub shift: Shift,
    pub quantity_liters: f64,
    pub fat_rate: f64,
    pub ph_level: f64,
    pub notes: String,
}

/// Sampling bounds for a single shift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShiftProfile {
    /// Liters collected, rounded to 0.1.
    pub quantity_liters: ValueRange,
    /// Fat percentage, rounded to 0.01.
    pub fat_rate: ValueRange,
    /// pH, rounded to 0.01.
    pub ph_level: ValueRange,
}

impl ShiftProfile {
    pub const fn morning() -> Self {
        Self {
            quantity_liters: ValueRange::new(440.0, 480.0),
            fat_rate: ValueRange::new(3.6, 4.0),
            ph_level: ValueRange::new(6.6, 6.8),
        }
    }

    // Evening milk is less plentiful but slightly fattier.
    pub const fn evening() -> Self {
        Self {
            quantity_liters: ValueRange::new(410.0, 450.0),
            fat_rate: ValueRange::new(3.7, 4.1),
            ph_level: ValueRange::new(6.6, 6.8),
        }
    }

    fn validate(&self, shift: Shift) -> Result<(), SeedError> {
        let name = shift.as_str();
        self.quantity_liters
            .validate_rounded(&format!("milk.{name}.quantity_liters"), 1)?;
        self.fat_rate
            .validate_rounded(&format!("milk.{name}.fat_rate"), 2)?;
        self.ph_level
            .validate_rounded(&format!("milk.{name}.ph_level"), 2)?;
        Ok(())
    }
}

/// Configuration for milk record generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MilkGenConfig {
    pub morning: ShiftProfile,
    pub evening: ShiftProfile,
}

impl Default for MilkGenConfig {
    fn default() -> Self {
        Self {
            morning: ShiftProfile::morning(),
            evening: ShiftProfile::evening(),
        }
    }
}

impl MilkGenConfig {
    pub fn profile(&self, shift: Shift) -> &ShiftProfile {
        match shift {
            Shift::Morning => &self.morning,
            Shift::Evening => &self.evening,
        }
    }

    pub fn validate(&self) -> Result<(), SeedError> {
        for shift in Shift::ALL {
            self.profile(shift).validate(shift)?;
        }
        Ok(())
    }
}

/// Generates daily milk intake records.
pub struct MilkRecordGenerator {
    config: MilkGenConfig,
}

impl MilkRecordGenerator {
    /// Creates a new milk record generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: MilkGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: MilkGenConfig) -> Self {
        Self { config }
    }

    /// Generates the record for one shift of one day. The config must already be validated.
    pub(crate) fn generate_single(
        &self,
        date: Date,
        shift: Shift,
        rng: &mut impl Rng,
    ) -> GeneratedMilkRecord {
        let profile = self.config.profile(shift);

        GeneratedMilkRecord {
            date,
            shift,
            quantity_liters: profile.quantity_liters.sample_rounded(1, rng),
            fat_rate: profile.fat_rate.sample_rounded(2, rng),
            ph_level: profile.ph_level.sample_rounded(2, rng),
            notes: String::new(),
        }
    }

    /// Generates a morning and an evening record for every day in the window.
    pub fn generate(
        &self,
        window: &HistoryWindow,
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedMilkRecord>, SeedError> {
        self.config.validate()?;

        let mut records = Vec::with_capacity(window.day_count() * Shift::ALL.len());
        for date in window.days() {
            for shift in Shift::ALL {
                records.push(self.generate_single(date, shift, rng));
            }
        }

        Ok(records)
    }
}

impl Default for MilkRecordGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use time::macros::date;

    use crate::generators::round_to;

    fn window() -> HistoryWindow {
        HistoryWindow::ending_on(date!(2024 - 05 - 20), 90).unwrap()
    }

    #[test]
    fn test_two_records_per_day() {
        let milk_gen = MilkRecordGenerator::new();
        let mut rng = StdRng::seed_from_u64(7);
        let records = milk_gen.generate(&window(), &mut rng).unwrap();

        assert_eq!(records.len(), 2 * window().day_count());
        for pair in records.chunks(2) {
            assert_eq!(pair[0].date, pair[1].date);
            assert_eq!(pair[0].shift, Shift::Morning);
            assert_eq!(pair[1].shift, Shift::Evening);
        }
    }

    #[test]
    fn test_values_within_shift_bounds() {
        let milk_gen = MilkRecordGenerator::new();
        let config = MilkGenConfig::default();
        let mut rng = StdRng::seed_from_u64(11);

        for record in milk_gen.generate(&window(), &mut rng).unwrap() {
            let profile = config.profile(record.shift);
            assert!(profile.quantity_liters.contains(record.quantity_liters));
            assert!(profile.fat_rate.contains(record.fat_rate));
            assert!(profile.ph_level.contains(record.ph_level));
            assert!(record.notes.is_empty());
        }
    }

    #[test]
    fn test_values_are_rounded() {
        let milk_gen = MilkRecordGenerator::new();
        let mut rng = StdRng::seed_from_u64(3);
        let record = milk_gen.generate_single(date!(2024 - 05 - 20), Shift::Evening, &mut rng);

        assert_eq!(record.quantity_liters, round_to(record.quantity_liters, 1));
        assert_eq!(record.fat_rate, round_to(record.fat_rate, 2));
        assert_eq!(record.ph_level, round_to(record.ph_level, 2));
    }

    #[test]
    fn test_invalid_profile_is_rejected() {
        let mut config = MilkGenConfig::default();
        config.evening.ph_level = ValueRange::new(7.0, 6.0);
        let milk_gen = MilkRecordGenerator::with_config(config);
        let mut rng = StdRng::seed_from_u64(1);

        assert!(matches!(
            milk_gen.generate(&window(), &mut rng),
            Err(SeedError::InvalidConfig(msg)) if msg.contains("milk.evening.ph_level")
        ));
    }

    #[test]
    fn test_off_precision_bounds_are_respected() {
        let mut config = MilkGenConfig::default();
        config.morning.ph_level = ValueRange::new(6.601, 6.629);
        config.evening.fat_rate = ValueRange::new(3.705, 3.719);
        let milk_gen = MilkRecordGenerator::with_config(config.clone());
        let mut rng = StdRng::seed_from_u64(13);

        for record in milk_gen.generate(&window(), &mut rng).unwrap() {
            let profile = config.profile(record.shift);
            assert!(profile.ph_level.contains(record.ph_level), "{record:?}");
            assert!(profile.fat_rate.contains(record.fat_rate), "{record:?}");
        }
    }

    #[test]
    fn test_range_without_value_at_precision_is_rejected() {
        let mut config = MilkGenConfig::default();
        config.morning.ph_level = ValueRange::new(6.605, 6.609);
        let milk_gen = MilkRecordGenerator::with_config(config);
        let mut rng = StdRng::seed_from_u64(1);

        assert!(matches!(
            milk_gen.generate(&window(), &mut rng),
            Err(SeedError::InvalidConfig(msg)) if msg.contains("milk.morning.ph_level")
        ));
    }
}
