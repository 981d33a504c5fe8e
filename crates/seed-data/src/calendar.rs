//! The rolling history window every generator walks.

use time::{Date, Duration, OffsetDateTime};

use crate::error::SeedError;

/// Inclusive range of calendar days ending on "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryWindow {
    start: Date,
    end: Date,
}

impl HistoryWindow {
    /// Window covering `days_back` days before `today` plus `today` itself.
    pub fn ending_on(today: Date, days_back: u32) -> Result<Self, SeedError> {
        let start = today
            .checked_sub(Duration::days(i64::from(days_back)))
            .ok_or_else(|| {
                SeedError::DateOverflow(format!("{days_back} days before {today}"))
            })?;

        Ok(Self { start, end: today })
    }

    pub fn start(&self) -> Date {
        self.start
    }

    pub fn end(&self) -> Date {
        self.end
    }

    /// Number of days in the window, both ends included.
    pub fn day_count(&self) -> usize {
        ((self.end - self.start).whole_days() + 1) as usize
    }

    /// Every day from start to end, in order.
    pub fn days(&self) -> impl Iterator<Item = Date> + use<> {
        let end = self.end;
        std::iter::successors(Some(self.start), |d| d.next_day()).take_while(move |d| *d <= end)
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Whole days between `date` and the end of the window.
    pub fn days_before_end(&self, date: Date) -> i64 {
        (self.end - date).whole_days()
    }
}

/// Today's date in the local timezone, falling back to UTC when the local
/// offset cannot be determined.
pub fn local_today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}
