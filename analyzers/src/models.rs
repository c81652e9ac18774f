use serde::{Deserialize, Deserializer, Serialize};

use crate::confidence_tier::{ConfidenceTier, clamp_percent};
use crate::image_role::{ImageRole, PriorityTier};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageType {
    ProductShowcase,
    Lifestyle,
    Mixed,
    #[default]
    Other,
}

/// Verdict for one crawled image, as returned by the image classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysisResult {
    /// 0-based crawl position within the post.
    pub image_index: i64,
    pub is_ad: bool,
    pub confidence: f64,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub detected_keywords: Vec<String>,
    #[serde(default)]
    pub image_type: ImageType,
}

/// Text-based score slot. Kept in the payload so the channel can come back
/// without a schema change; it never feeds the review score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TextAnalysis {
    #[default]
    Disabled,
    Enabled {
        score: f64,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionSource {
    #[default]
    Image,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionDetail {
    #[serde(rename = "type")]
    pub source: DetectionSource,
    pub image_index: i64,
    /// Raw per-image confidence, the value the image card shows.
    pub confidence: f64,
    pub reason: String,
    pub keywords: Vec<String>,
}

impl DetectionDetail {
    pub fn from_image(image: &ImageAnalysisResult) -> Self {
        Self {
            source: DetectionSource::Image,
            image_index: image.image_index,
            confidence: clamp_percent(image.confidence),
            reason: image.reason.clone(),
            keywords: image.detected_keywords.clone(),
        }
    }
}

/// Labeled view of one image: its inferred role, priority and both the raw
/// and the boosted confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageBreakdown {
    pub image_index: i64,
    pub role: ImageRole,
    pub role_label: String,
    pub priority: PriorityTier,
    pub raw_confidence: f64,
    pub effective_confidence: f64,
    pub raw_tier: ConfidenceTier,
    pub effective_tier: ConfidenceTier,
    pub is_ad: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub image_score: u8,
    pub best_image_index: Option<i64>,
    pub detection_details: Vec<DetectionDetail>,
    #[serde(default)]
    pub image_breakdown: Vec<ImageBreakdown>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewAnalysis {
    #[serde(default)]
    pub image_analysis: Vec<ImageAnalysisResult>,
    #[serde(default)]
    pub text_analysis: TextAnalysis,
    #[serde(default)]
    pub summary: AnalysisSummary,
}

/// One review as exchanged with the classification backend and handed to
/// the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedAnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub is_ad: bool,
    #[serde(default, deserialize_with = "lenient_percent")]
    pub confidence: u8,
    #[serde(default)]
    pub final_reason: String,
    #[serde(default)]
    pub analysis: ReviewAnalysis,
    /// Upstream failure. When set, consumers ignore every other field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DetailedAnalysisResult {
    pub fn from_images(images: Vec<ImageAnalysisResult>) -> Self {
        Self {
            analysis: ReviewAnalysis {
                image_analysis: images,
                ..ReviewAnalysis::default()
            },
            ..Self::default()
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    pub fn confidence_tier(&self) -> ConfidenceTier {
        ConfidenceTier::classify(f64::from(self.confidence))
    }
}

// The backend sometimes sends the precomputed confidence as a float.
fn lenient_percent<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    Ok(clamp_percent(value).round() as u8)
}
