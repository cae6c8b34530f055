use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightStatus {
    Underweight,
    Normal,
    Overweight,
}

impl WeightStatus {
    pub fn label(&self) -> String {
        match self {
            WeightStatus::Underweight => t!("health.weight_status.underweight"),
            WeightStatus::Normal => t!("health.weight_status.normal"),
            WeightStatus::Overweight => t!("health.weight_status.overweight"),
        }
        .to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilitaryRank {
    Exempt,
    Alternative,
    Active,
    Undetermined,
}

impl MilitaryRank {
    pub fn label(&self) -> String {
        match self {
            MilitaryRank::Exempt => t!("health.military_rank.exempt"),
            MilitaryRank::Alternative => t!("health.military_rank.alternative"),
            MilitaryRank::Active => t!("health.military_rank.active"),
            MilitaryRank::Undetermined => t!("health.military_rank.undetermined"),
        }
        .to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExemptReason {
    HeightBelow155,
    BmiBelow15,
    BmiAbove35,
}

impl ExemptReason {
    pub fn label(&self) -> String {
        match self {
            ExemptReason::HeightBelow155 => t!("health.exempt_reason.height_below_155"),
            ExemptReason::BmiBelow15 => t!("health.exempt_reason.bmi_below_15"),
            ExemptReason::BmiAbove35 => t!("health.exempt_reason.bmi_above_35"),
        }
        .to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MilitaryClassification {
    pub rank: MilitaryRank,
    pub reason: Option<ExemptReason>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdSide {
    Low,
    High,
}

/// How far a BMI is from the nearest exemption threshold, or past it when `reached`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExemptionDistance {
    pub reached: bool,
    pub side: ThresholdSide,
    pub diff: f64,
}

/// Everything derived from one height/weight pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthReport {
    pub height: f64,
    pub weight: f64,
    pub bmi: f64,
    pub status: WeightStatus,
    pub military: MilitaryClassification,
    pub distance: ExemptionDistance,
}
