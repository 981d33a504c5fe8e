//! Entity generators for seed data.
//!
//! This module provides generators for each seeded table:
//! - [`default_catalog`]: The fixed product catalog
//! - [`MilkRecordGenerator`]: Two milk intake records per day
//! - [`BatchGenerator`]: Production batches every one or two days
//! - [`SaleGenerator`]: Daily sales with a JSON item list

pub mod batch;
pub mod milk;
pub mod product;
pub mod sale;

pub use batch::{BatchGenConfig, BatchGenerator, GeneratedBatch};
pub use milk::{GeneratedMilkRecord, MilkGenConfig, MilkRecordGenerator, ShiftProfile};
pub use product::default_catalog;
pub use sale::{GeneratedSale, SaleGenConfig, SaleGenerator};

/// Rounds to a fixed number of decimal places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(452.349, 1), 452.3);
        assert_eq!(round_to(3.8761, 2), 3.88);
        assert_eq!(round_to(523.5, 0), 524.0);
    }
}
