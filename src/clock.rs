// ⏰ Clock - "today" is an explicit input to every calculation

use chrono::{Local, NaiveDate};

pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date from the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 16).unwrap();
        let clock = FixedClock(day);
        assert_eq!(clock.today(), day);
        assert_eq!(clock.today(), clock.today());
    }

    #[test]
    fn test_system_clock_is_recent() {
        let floor = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(SystemClock.today() > floor);
    }
}
