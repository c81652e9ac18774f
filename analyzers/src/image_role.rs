use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::confidence_tier::clamp_percent;

/// Role of an image inferred from where it sits in the crawled post.
///
/// The role is never stored upstream; it depends only on the position and
/// on how many images the post has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageRole {
    /// Only image of the post, could be either a profile photo or body content.
    ProfileOrBody,
    Profile,
    FirstBody,
    SecondBody,
    Supplementary,
}

/// How likely an image position is to carry sponsored content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityTier {
    Highest,
    High,
    Low,
    Uncertain,
    Supplementary,
}

impl ImageRole {
    pub fn assign(position: usize, total_images: usize) -> Self {
        match position {
            0 if total_images <= 1 => ImageRole::ProfileOrBody,
            0 => ImageRole::Profile,
            1 => ImageRole::FirstBody,
            2 => ImageRole::SecondBody,
            _ => ImageRole::Supplementary,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImageRole::ProfileOrBody => "profile or body",
            ImageRole::Profile => "profile",
            ImageRole::FirstBody => "first body image",
            ImageRole::SecondBody => "second body image",
            ImageRole::Supplementary => "supplementary",
        }
    }

    pub fn priority(&self) -> PriorityTier {
        match self {
            ImageRole::ProfileOrBody => PriorityTier::Uncertain,
            ImageRole::Profile => PriorityTier::Low,
            ImageRole::FirstBody => PriorityTier::Highest,
            ImageRole::SecondBody => PriorityTier::High,
            ImageRole::Supplementary => PriorityTier::Supplementary,
        }
    }

    /// Multiplier applied to the raw confidence.
    ///
    /// The first slot is discounted whether or not the post has other images.
    pub fn boost_factor(&self) -> f64 {
        match self {
            ImageRole::ProfileOrBody | ImageRole::Profile => 0.60,
            ImageRole::FirstBody => 1.20,
            ImageRole::SecondBody => 1.10,
            ImageRole::Supplementary => 1.0,
        }
    }

    /// Raw confidence after positional boosting, clamped to `[0, 100]`.
    pub fn effective_confidence(&self, raw: f64) -> f64 {
        clamp_percent(clamp_percent(raw) * self.boost_factor())
    }
}

impl Display for ImageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl PriorityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityTier::Highest => "highest",
            PriorityTier::High => "high",
            PriorityTier::Low => "low",
            PriorityTier::Uncertain => "uncertain",
            PriorityTier::Supplementary => "supplementary",
        }
    }
}

impl Display for PriorityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
