//! Fluent builder APIs for seed scenarios.
//!
//! The [`ScenarioBuilder`] provides a convenient way to generate a complete
//! seed dataset and render it as a SQL script.

mod scenario;

pub use scenario::{ScenarioBuilder, ScenarioMetrics, ScenarioResult};
