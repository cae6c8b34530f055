use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// ISO-8601 week a local date belongs to, with the Monday/Sunday bounding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsoWeekInfo {
    pub iso_year: i32,
    pub iso_week: u32,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
}

impl IsoWeekInfo {
    pub fn file_stem(&self) -> String {
        format!("{}-W{:02}", self.iso_year, self.iso_week)
    }
}

pub fn local_now(tz: Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(&tz)
}

pub fn format_date<T: TimeZone>(instant: &DateTime<T>) -> String {
    instant.date_naive().format("%Y-%m-%d").to_string()
}

pub fn iso_week_info<T: TimeZone>(instant: &DateTime<T>) -> IsoWeekInfo {
    iso_week_of_date(instant.date_naive())
}

pub fn iso_week_of_date(date: NaiveDate) -> IsoWeekInfo {
    let week = date.iso_week();
    // the Monday may sit in the previous calendar year, e.g. 2023-01-01 -> 2022-12-26
    let week_start = date - Duration::days(date.weekday().num_days_from_monday() as i64);

    IsoWeekInfo {
        iso_year: week.year(),
        iso_week: week.week(),
        week_start,
        week_end: week_start + Duration::days(6),
    }
}
