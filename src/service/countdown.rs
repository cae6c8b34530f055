use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use chrono_tz::Tz;

use super::ServiceError;

/// A recurring calendar day, configured as `MM/DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl FromStr for MonthDay {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ServiceError::InvalidInput(format!("Invalid month/day: {}", s));

        let (month, day) = s.trim().split_once('/').ok_or_else(invalid)?;
        let month = month.trim().parse::<u32>().map_err(|_| invalid())?;
        let day = day.trim().parse::<u32>().map_err(|_| invalid())?;

        // 2024 is a leap year, so 02/29 is accepted
        NaiveDate::from_ymd_opt(2024, month, day).ok_or_else(invalid)?;

        Ok(Self { month, day })
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.day)
    }
}

impl MonthDay {
    /// First occurrence on or after `today`.
    pub fn next_occurrence(&self, today: NaiveDate) -> NaiveDate {
        let mut year = today.year();
        loop {
            if let Some(date) = NaiveDate::from_ymd_opt(year, self.month, self.day) {
                if date >= today {
                    return date;
                }
            }
            year += 1;
        }
    }
}

/// Whole days from the date of `at` in `tz` to the next `target`, `None` if no target is set.
pub fn days_until<T: TimeZone>(target: Option<MonthDay>, at: &DateTime<T>, tz: Tz) -> Option<i64> {
    let target = target?;
    let today = at.with_timezone(&tz).date_naive();

    Some((target.next_occurrence(today) - today).num_days())
}
