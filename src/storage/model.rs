use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    service::health::{HealthReport, MilitaryRank, WeightStatus},
    utils::time::IsoWeekInfo,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub chat_id: i64,
    pub user_id: u64,
    pub username: String,
    pub height: f64,
    pub weight: f64,
    pub bmi: f64,
    pub weight_status: WeightStatus,
    pub military_rank: MilitaryRank,
    pub created_at: DateTime<Utc>,
}

impl Record {
    pub fn new(chat_id: i64, user_id: u64, username: String, report: &HealthReport, created_at: DateTime<Utc>) -> Self {
        Self {
            chat_id,
            user_id,
            username,
            height: report.height,
            weight: report.weight,
            bmi: report.bmi,
            weight_status: report.status,
            military_rank: report.military.rank,
            created_at,
        }
    }

    /// JSON has no encoding for NaN or infinity, so such a record would poison the week file.
    pub fn has_finite_values(&self) -> bool {
        [self.height, self.weight, self.bmi].iter().all(|value| value.is_finite())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekMeta {
    pub iso_year: i32,
    pub iso_week: u32,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub timezone: String,
}

impl WeekMeta {
    pub fn new(info: &IsoWeekInfo, timezone: &str) -> Self {
        Self {
            iso_year: info.iso_year,
            iso_week: info.iso_week,
            week_start: info.week_start,
            week_end: info.week_end,
            timezone: timezone.to_string(),
        }
    }
}

/// Contents of one `{isoYear}-W{isoWeek}.json` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyLog {
    pub meta: WeekMeta,
    pub items: Vec<Record>,
}

impl WeeklyLog {
    pub fn new(meta: WeekMeta) -> Self {
        Self { meta, items: Vec::new() }
    }
}
