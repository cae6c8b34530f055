mod model;

pub use model::*;

pub const MIN_ACTIVE_HEIGHT_CM: f64 = 155.0;
pub const EXEMPT_BMI_LOW: f64 = 15.0;
pub const EXEMPT_BMI_HIGH: f64 = 35.0;
pub const ACTIVE_BMI_LOW: f64 = 16.5;
pub const ACTIVE_BMI_HIGH: f64 = 32.0;

const UNDERWEIGHT_BELOW: f64 = 18.5;
const NORMAL_BELOW: f64 = 24.0;

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn compute_bmi(height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = height_cm / 100.0;
    round1(weight_kg / (height_m * height_m))
}

pub fn weight_status(bmi: f64) -> WeightStatus {
    if bmi < UNDERWEIGHT_BELOW {
        WeightStatus::Underweight
    } else if bmi < NORMAL_BELOW {
        WeightStatus::Normal
    } else {
        WeightStatus::Overweight
    }
}

pub fn classify_military(height_cm: f64, bmi: f64) -> MilitaryClassification {
    let exempt = |reason| MilitaryClassification {
        rank: MilitaryRank::Exempt,
        reason: Some(reason),
    };
    let rank = |rank| MilitaryClassification { rank, reason: None };

    if height_cm < MIN_ACTIVE_HEIGHT_CM {
        exempt(ExemptReason::HeightBelow155)
    } else if bmi < EXEMPT_BMI_LOW {
        exempt(ExemptReason::BmiBelow15)
    } else if bmi > EXEMPT_BMI_HIGH {
        exempt(ExemptReason::BmiAbove35)
    } else if (EXEMPT_BMI_LOW..ACTIVE_BMI_LOW).contains(&bmi) || (bmi > ACTIVE_BMI_HIGH && bmi <= EXEMPT_BMI_HIGH) {
        rank(MilitaryRank::Alternative)
    } else if (ACTIVE_BMI_LOW..=ACTIVE_BMI_HIGH).contains(&bmi) {
        rank(MilitaryRank::Active)
    } else {
        // only reachable with NaN input
        rank(MilitaryRank::Undetermined)
    }
}

pub fn distance_to_exemption(bmi: f64) -> ExemptionDistance {
    if bmi < EXEMPT_BMI_LOW {
        return ExemptionDistance {
            reached: true,
            side: ThresholdSide::Low,
            diff: round1(EXEMPT_BMI_LOW - bmi),
        };
    }

    if bmi > EXEMPT_BMI_HIGH {
        return ExemptionDistance {
            reached: true,
            side: ThresholdSide::High,
            diff: round1(bmi - EXEMPT_BMI_HIGH),
        };
    }

    let to_low = bmi - EXEMPT_BMI_LOW;
    let to_high = EXEMPT_BMI_HIGH - bmi;

    if to_low <= to_high {
        ExemptionDistance {
            reached: false,
            side: ThresholdSide::Low,
            diff: round1(to_low),
        }
    } else {
        ExemptionDistance {
            reached: false,
            side: ThresholdSide::High,
            diff: round1(to_high),
        }
    }
}

/// Runs every classifier on one measurement. The rounded BMI feeds the
/// classifiers so the category always agrees with the number shown.
pub fn assess(height_cm: f64, weight_kg: f64) -> HealthReport {
    let bmi = compute_bmi(height_cm, weight_kg);

    HealthReport {
        height: height_cm,
        weight: weight_kg,
        bmi,
        status: weight_status(bmi),
        military: classify_military(height_cm, bmi),
        distance: distance_to_exemption(bmi),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_bmi() {
        assert_eq!(compute_bmi(182.0, 52.0), 15.7);
        assert_eq!(compute_bmi(170.0, 65.0), 22.5);
        assert_eq!(compute_bmi(160.0, 64.0), 25.0);
        assert_eq!(compute_bmi(200.0, 100.0), 25.0);
    }

    #[test]
    fn test_compute_bmi_matches_formula() {
        for height in [150.0, 163.5, 175.0, 188.2] {
            for weight in [40.0, 58.3, 72.0, 110.9] {
                let expected = ((weight / ((height / 100.0) * (height / 100.0))) * 10.0_f64).round() / 10.0;
                assert_eq!(compute_bmi(height, weight), expected);
            }
        }
    }

    #[test]
    fn test_weight_status() {
        assert_eq!(weight_status(15.7), WeightStatus::Underweight);
        assert_eq!(weight_status(18.4), WeightStatus::Underweight);
        assert_eq!(weight_status(18.5), WeightStatus::Normal);
        assert_eq!(weight_status(23.9), WeightStatus::Normal);
        assert_eq!(weight_status(24.0), WeightStatus::Overweight);
        assert_eq!(weight_status(40.0), WeightStatus::Overweight);
    }

    #[test]
    fn test_classify_military_exemptions() {
        let short = classify_military(154.9, 22.0);
        assert_eq!(short.rank, MilitaryRank::Exempt);
        assert_eq!(short.reason, Some(ExemptReason::HeightBelow155));

        let thin = classify_military(175.0, 14.9);
        assert_eq!(thin.rank, MilitaryRank::Exempt);
        assert_eq!(thin.reason, Some(ExemptReason::BmiBelow15));

        let heavy = classify_military(175.0, 35.1);
        assert_eq!(heavy.rank, MilitaryRank::Exempt);
        assert_eq!(heavy.reason, Some(ExemptReason::BmiAbove35));
    }

    #[test]
    fn test_classify_military_boundaries() {
        let rank = |bmi| classify_military(155.0, bmi).rank;

        assert_eq!(rank(15.0), MilitaryRank::Alternative);
        assert_eq!(rank(16.4), MilitaryRank::Alternative);
        assert_eq!(rank(16.5), MilitaryRank::Active);
        assert_eq!(rank(32.0), MilitaryRank::Active);
        assert_eq!(rank(32.1), MilitaryRank::Alternative);
        assert_eq!(rank(35.0), MilitaryRank::Alternative);

        assert_eq!(classify_military(155.0, 22.0).reason, None);
    }

    #[test]
    fn test_classify_military_is_total() {
        let mut bmi = 0.1;
        while bmi < 60.0 {
            let result = classify_military(170.0, bmi);
            assert_ne!(result.rank, MilitaryRank::Undetermined, "bmi {}", bmi);
            assert_eq!(result.reason.is_some(), result.rank == MilitaryRank::Exempt);
            bmi += 0.1;
        }

        assert_eq!(classify_military(170.0, f64::NAN).rank, MilitaryRank::Undetermined);
    }

    #[test]
    fn test_distance_to_exemption() {
        let low = distance_to_exemption(15.7);
        assert!(!low.reached);
        assert_eq!(low.side, ThresholdSide::Low);
        assert_eq!(low.diff, 0.7);

        let high = distance_to_exemption(30.2);
        assert!(!high.reached);
        assert_eq!(high.side, ThresholdSide::High);
        assert_eq!(high.diff, 4.8);

        let tie = distance_to_exemption(25.0);
        assert_eq!(tie.side, ThresholdSide::Low);
        assert_eq!(tie.diff, 10.0);
    }

    #[test]
    fn test_distance_when_already_exempt() {
        let under = distance_to_exemption(14.2);
        assert!(under.reached);
        assert_eq!(under.side, ThresholdSide::Low);
        assert_eq!(under.diff, 0.8);

        let over = distance_to_exemption(36.5);
        assert!(over.reached);
        assert_eq!(over.side, ThresholdSide::High);
        assert_eq!(over.diff, 1.5);
    }

    #[test]
    fn test_assess() {
        let report = assess(182.0, 52.0);
        assert_eq!(report.bmi, 15.7);
        assert_eq!(report.status, WeightStatus::Underweight);
        assert_eq!(report.military.rank, MilitaryRank::Alternative);
        assert_eq!(report.distance.diff, 0.7);
    }
}
