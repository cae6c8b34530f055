use std::sync::LazyLock;
use regex::Regex;

static NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+(?:\.\d+)?$").expect("valid number regex"));

static MEASUREMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)?)\s*(?:[,，]\s*|\s+)(\d+(?:\.\d+)?)$").expect("valid measurement regex"));

static STOP_KEYWORDS: &[&str] = &["stop", "cancel", "取消"];

/// Parses a single positive decimal such as `172` or `65.5`.
pub fn parse_positive(text: &str) -> Option<f64> {
    let text = text.trim();
    if !NUMBER_REGEX.is_match(text) {
        return None;
    }

    text.parse::<f64>().ok().filter(|value| value.is_finite() && *value > 0.0)
}

/// Parses `height,weight` (comma, full-width comma or whitespace separated).
pub fn parse_measurement(text: &str) -> Option<(f64, f64)> {
    let captures = MEASUREMENT_REGEX.captures(text.trim())?;

    let height = parse_positive(captures.get(1)?.as_str())?;
    let weight = parse_positive(captures.get(2)?.as_str())?;

    Some((height, weight))
}

pub fn is_stop_keyword(text: &str) -> bool {
    let text = text.trim().to_lowercase();
    STOP_KEYWORDS.iter().any(|keyword| text == *keyword)
}
