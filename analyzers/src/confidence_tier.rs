use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Review score at or above which the review counts as an ad.
///
/// For a single image this only picks the colour band; the image's own ad
/// verdict comes from the classifier.
pub const AD_THRESHOLD: f64 = 70.0;

/// Lower bound of the medium band.
pub const MEDIUM_THRESHOLD: f64 = 40.0;

/// Display band for a confidence percentage.
///
/// The same split is used for the review-level confidence and for every
/// per-image confidence, so both badges always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn classify(value: f64) -> Self {
        let value = clamp_percent(value);
        if value >= AD_THRESHOLD {
            ConfidenceTier::High
        } else if value >= MEDIUM_THRESHOLD {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "red",
            ConfidenceTier::Medium => "yellow",
            ConfidenceTier::Low => "green",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "high",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::Low => "low",
        }
    }
}

impl Display for ConfidenceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Forces a percentage into `[0, 100]`. NaN becomes 0.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

pub fn is_ad_score(score: u8) -> bool {
    f64::from(score) >= AD_THRESHOLD
}
