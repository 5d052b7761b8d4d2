// 📆 Calendar periods
// Completed years/months/days between two dates, plus year addition that
// keeps the month and day (Feb 29 clamps to Feb 28).

use crate::error::{PensionError, Result};
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

// ============================================================================
// PERIOD
// ============================================================================

/// Elapsed time expressed as completed calendar units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Period {
    pub years: i32,
    pub months: i32,
    pub days: i32,
}

impl Period {
    /// Period from `start` (inclusive) to `end` (exclusive).
    ///
    /// When the day of `end` is before the day of `start`, one month is
    /// borrowed and the remaining days are counted exactly from the
    /// month-shifted start. Negative spans mirror this using the length of
    /// `end`'s month.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        let mut total_months = proleptic_month(end) - proleptic_month(start);
        let mut days = end.day() as i64 - start.day() as i64;

        if total_months > 0 && days < 0 {
            total_months -= 1;
            // The shifted start never passes `end`
            days = start
                .checked_add_months(Months::new(total_months as u32))
                .map_or(0, |anchor| (end - anchor).num_days());
        } else if total_months < 0 && days > 0 {
            total_months += 1;
            days -= length_of_month(end);
        }

        Period {
            years: (total_months / 12) as i32,
            months: (total_months % 12) as i32,
            days: days as i32,
        }
    }

    /// Day count using 365-day years and 30-day months.
    ///
    /// This drifts from the exact day count over long spans and is kept
    /// as-is because contributed weeks are defined in terms of it.
    pub fn approximate_days(&self) -> i64 {
        self.years as i64 * 365 + self.months as i64 * 30 + self.days as i64
    }
}

fn proleptic_month(date: NaiveDate) -> i64 {
    date.year() as i64 * 12 + date.month0() as i64
}

// ============================================================================
// CALENDAR HELPERS
// ============================================================================

fn length_of_month(date: NaiveDate) -> i64 {
    let first = date - Days::new(date.day0() as u64);
    first
        .checked_add_months(Months::new(1))
        .map_or(31, |next| (next - first).num_days())
}

/// Same month and day `years` later. Feb 29 lands on Feb 28 in a common year.
pub fn add_years(date: NaiveDate, years: u32) -> Result<NaiveDate> {
    years
        .checked_mul(12)
        .and_then(|months| date.checked_add_months(Months::new(months)))
        .ok_or_else(|| {
            PensionError::InvalidDate(format!("{date} + {years} años está fuera del calendario"))
        })
}
