use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

use crate::ad_scorer::score_review;
use crate::confidence_tier::ConfidenceTier;
use crate::error::ScoringError;
use crate::models::DetailedAnalysisResult;

/// How many reviews one analysis run covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LimitRepr", into = "LimitRepr")]
pub enum AnalysisLimit {
    Ten,
    Twenty,
    Fifty,
    Hundred,
    TwoHundred,
    #[default]
    All,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum LimitRepr {
    Count(u32),
    Keyword(String),
}

impl AnalysisLimit {
    pub fn max_reviews(&self) -> Option<usize> {
        match self {
            AnalysisLimit::Ten => Some(10),
            AnalysisLimit::Twenty => Some(20),
            AnalysisLimit::Fifty => Some(50),
            AnalysisLimit::Hundred => Some(100),
            AnalysisLimit::TwoHundred => Some(200),
            AnalysisLimit::All => None,
        }
    }

    fn from_count(count: u32) -> Result<Self, ScoringError> {
        match count {
            10 => Ok(AnalysisLimit::Ten),
            20 => Ok(AnalysisLimit::Twenty),
            50 => Ok(AnalysisLimit::Fifty),
            100 => Ok(AnalysisLimit::Hundred),
            200 => Ok(AnalysisLimit::TwoHundred),
            other => Err(ScoringError::UnsupportedLimit(other.to_string())),
        }
    }
}

impl FromStr for AnalysisLimit {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(AnalysisLimit::All);
        }
        let count = s
            .parse::<u32>()
            .map_err(|_| ScoringError::UnsupportedLimit(s.to_string()))?;
        AnalysisLimit::from_count(count)
    }
}

impl Display for AnalysisLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.max_reviews() {
            Some(count) => write!(f, "{}", count),
            None => f.write_str("all"),
        }
    }
}

impl TryFrom<LimitRepr> for AnalysisLimit {
    type Error = ScoringError;

    fn try_from(value: LimitRepr) -> Result<Self, Self::Error> {
        match value {
            LimitRepr::Count(count) => AnalysisLimit::from_count(count),
            LimitRepr::Keyword(keyword) => keyword.parse(),
        }
    }
}

impl From<AnalysisLimit> for LimitRepr {
    fn from(value: AnalysisLimit) -> Self {
        match value.max_reviews() {
            Some(count) => LimitRepr::Count(count as u32),
            None => LimitRepr::Keyword("all".to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStats {
    pub total: usize,
    pub ads: usize,
    pub clean: usize,
    pub failed: usize,
    /// Reviews left out because of the limit.
    pub skipped: usize,
    pub high_confidence: usize,
    pub medium_confidence: usize,
    pub low_confidence: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub stats: BatchStats,
    pub results: Vec<DetailedAnalysisResult>,
}

/// Scores the first `limit` reviews, each one independently.
pub fn score_batch(reviews: Vec<DetailedAnalysisResult>, limit: AnalysisLimit) -> BatchReport {
    let available = reviews.len();
    let take = limit.max_reviews().unwrap_or(available).min(available);

    let results: Vec<DetailedAnalysisResult> =
        reviews.into_iter().take(take).map(score_review).collect();

    let mut stats = BatchStats {
        total: results.len(),
        skipped: available - take,
        ..BatchStats::default()
    };

    for review in &results {
        if review.is_failed() {
            stats.failed += 1;
            continue;
        }
        if review.is_ad {
            stats.ads += 1;
        } else {
            stats.clean += 1;
        }
        match review.confidence_tier() {
            ConfidenceTier::High => stats.high_confidence += 1,
            ConfidenceTier::Medium => stats.medium_confidence += 1,
            ConfidenceTier::Low => stats.low_confidence += 1,
        }
    }

    tracing::info!(
        total = stats.total,
        ads = stats.ads,
        failed = stats.failed,
        skipped = stats.skipped,
        %limit,
        "batch scored"
    );

    BatchReport { stats, results }
}

/// Decodes a backend payload holding either one review or an array of them.
pub fn decode_reviews(json: &str) -> Result<Vec<DetailedAnalysisResult>, ScoringError> {
    if json.trim_start().starts_with('[') {
        Ok(serde_json::from_str(json)?)
    } else {
        Ok(vec![serde_json::from_str(json)?])
    }
}
