use analyzers::batch::AnalysisLimit;
use analyzers::confidence_tier::ConfidenceTier;
use analyzers::models::DetailedAnalysisResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBatchRequest {
    pub reviews: Vec<DetailedAnalysisResult>,
    #[serde(default)]
    pub limit: Option<AnalysisLimit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierResponse {
    pub value: f64,
    pub tier: ConfidenceTier,
    pub color: String,
}

impl TierResponse {
    pub fn for_value(value: f64) -> Self {
        let tier = ConfidenceTier::classify(value);
        Self {
            value,
            tier,
            color: tier.color().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}
