//! SQL script rendering for seed data.
//!
//! The [`SeedWriter`] turns generated entities into `INSERT` statements,
//! optionally splitting large tables across several statements.

mod value;
mod writer;

pub use value::{SqlValue, quote_literal};
pub use writer::{SeedWriter, TRUNCATED_TABLES};
