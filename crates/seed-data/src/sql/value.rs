//! SQL literal rendering.

use time::macros::format_description;
use time::{Date, PrimitiveDateTime};

use crate::error::SeedError;

/// A single column value in an `INSERT` row.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Text(String),
    Integer(i64),
    /// Fixed-point number rendered with `scale` decimal places.
    Decimal { value: f64, scale: usize },
    Date(Date),
    Timestamp(PrimitiveDateTime),
}

impl SqlValue {
    pub fn text(value: impl Into<String>) -> Self {
        SqlValue::Text(value.into())
    }

    pub fn decimal(value: f64, scale: usize) -> Self {
        SqlValue::Decimal { value, scale }
    }

    /// `NULL` when absent.
    pub fn optional<T>(value: Option<T>, f: impl FnOnce(T) -> SqlValue) -> Self {
        value.map(f).unwrap_or(SqlValue::Null)
    }

    pub fn render(&self) -> Result<String, SeedError> {
        Ok(match self {
            SqlValue::Null => "NULL".to_string(),
            SqlValue::Text(s) => quote_literal(s),
            SqlValue::Integer(n) => n.to_string(),
            SqlValue::Decimal { value, scale } => format!("{:.*}", *scale, value),
            SqlValue::Date(d) => {
                quote_literal(&d.format(format_description!("[year]-[month]-[day]"))?)
            }
            SqlValue::Timestamp(ts) => quote_literal(&ts.format(format_description!(
                "[year]-[month]-[day] [hour]:[minute]:[second]"
            ))?),
        })
    }
}

/// Single-quotes a string literal, doubling embedded quotes.
pub fn quote_literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}
