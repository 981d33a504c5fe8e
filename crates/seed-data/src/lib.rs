//! Seed data generation for the dairy production database.
//!
//! This crate generates a plausible, randomized 90-day history of milk intake,
//! production batches, and sales, plus the fixed product catalog, and renders
//! it as a SQL script for development and demo databases.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seed_data::prelude::*;
//!
//! let mut rng = StdRng::seed_from_u64(12345);
//! let sql = ScenarioBuilder::demo()
//!     .with_today(date!(2024 - 03 - 31))
//!     .build(&mut rng)?;
//! println!("{sql}");
//! ```

pub mod builders;
pub mod calendar;
pub mod config;
pub mod error;
pub mod generators;
pub mod sql;

pub use error::SeedError;

// Re-export core types from the dairy crate
pub use dairy::{
    BatchStatus, PaymentStatus, Product, ProductCategory, ProductType, SaleItem, Shift, Table,
};

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{ScenarioBuilder, ScenarioMetrics, ScenarioResult};
    pub use crate::calendar::{HistoryWindow, local_today};
    pub use crate::config::{CountRange, SeedConfig, ValueRange};
    pub use crate::error::SeedError;
    pub use crate::generators::{
        BatchGenConfig, BatchGenerator, MilkGenConfig, MilkRecordGenerator, SaleGenConfig,
        SaleGenerator, ShiftProfile, default_catalog,
    };
    pub use crate::sql::SeedWriter;
    pub use crate::{BatchStatus, PaymentStatus, ProductType, Shift};
}
