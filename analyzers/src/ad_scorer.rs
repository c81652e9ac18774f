use crate::Analyzer;
use crate::confidence_tier::{ConfidenceTier, clamp_percent, is_ad_score};
use crate::image_role::ImageRole;
use crate::models::{
    AnalysisSummary, DetailedAnalysisResult, DetectionDetail, ImageAnalysisResult,
    ImageBreakdown, TextAnalysis,
};
use std::convert::Infallible;

/// Decides whether a blog review is sponsored from its per-image verdicts.
///
/// Each image's confidence is boosted or discounted by its position in the
/// post, and the strongest single image decides the review. Text analysis
/// is carried in the payload but contributes nothing.
pub struct ImagePriorityAdScorer;

impl Analyzer for ImagePriorityAdScorer {
    type Input = DetailedAnalysisResult;
    type Output = DetailedAnalysisResult;
    type Error = Infallible;

    fn analyze(input: Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(score_review(input))
    }
}

pub fn score_review(mut review: DetailedAnalysisResult) -> DetailedAnalysisResult {
    if let Some(ref error) = review.error {
        tracing::debug!(review_id = ?review.review_id, %error, "skipping failed review");
        return review;
    }

    let images = &review.analysis.image_analysis;
    let summary = summarize_images(images);
    let final_reason = describe_decision(&summary);

    review.is_ad = is_ad_score(summary.image_score);
    review.confidence = summary.image_score;
    review.final_reason = final_reason;
    review.analysis.text_analysis = TextAnalysis::Disabled;

    tracing::debug!(
        review_id = ?review.review_id,
        images = review.analysis.image_analysis.len(),
        score = summary.image_score,
        best_image = ?summary.best_image_index,
        is_ad = review.is_ad,
        "scored review"
    );

    review.analysis.summary = summary;
    review
}

pub fn summarize_images(images: &[ImageAnalysisResult]) -> AnalysisSummary {
    if images.is_empty() {
        return AnalysisSummary::default();
    }

    let breakdown: Vec<ImageBreakdown> = images
        .iter()
        .map(|image| assess_image(image, images.len()))
        .collect();

    let best = breakdown
        .iter()
        .fold(None, |best: Option<&ImageBreakdown>, entry| match best {
            Some(current) if !outranks(entry, current) => Some(current),
            _ => Some(entry),
        });

    let detection_details = images
        .iter()
        .filter(|image| image.is_ad)
        .map(DetectionDetail::from_image)
        .collect();

    AnalysisSummary {
        image_score: best.map_or(0, |entry| entry.effective_confidence.round() as u8),
        best_image_index: best.map(|entry| entry.image_index),
        detection_details,
        image_breakdown: breakdown,
    }
}

pub fn assess_image(image: &ImageAnalysisResult, total_images: usize) -> ImageBreakdown {
    let position = if image.image_index < 0 {
        tracing::warn!(
            image_index = image.image_index,
            "negative image index, treating as first image"
        );
        0
    } else {
        image.image_index as usize
    };

    let role = ImageRole::assign(position, total_images);
    let raw_confidence = clamp_percent(image.confidence);
    if raw_confidence != image.confidence {
        tracing::warn!(
            image_index = image.image_index,
            confidence = image.confidence,
            "confidence outside 0-100, clamped"
        );
    }
    let effective_confidence = role.effective_confidence(raw_confidence);

    ImageBreakdown {
        image_index: image.image_index,
        role,
        role_label: role.label().to_string(),
        priority: role.priority(),
        raw_confidence,
        effective_confidence,
        raw_tier: ConfidenceTier::classify(raw_confidence),
        effective_tier: ConfidenceTier::classify(effective_confidence),
        is_ad: image.is_ad,
    }
}

/// Boosted values closer than this are a tie; the boost factors are not exact in binary.
const TIE_TOLERANCE: f64 = 1e-9;

// Ties go to the lower image index so the winner does not depend on input order.
fn outranks(candidate: &ImageBreakdown, current: &ImageBreakdown) -> bool {
    let diff = candidate.effective_confidence - current.effective_confidence;
    if diff.abs() <= TIE_TOLERANCE {
        candidate.image_index < current.image_index
    } else {
        diff > 0.0
    }
}

fn describe_decision(summary: &AnalysisSummary) -> String {
    let best = summary.best_image_index.and_then(|index| {
        summary
            .image_breakdown
            .iter()
            .find(|entry| entry.image_index == index)
    });

    match best {
        Some(entry) => {
            let verdict = if is_ad_score(summary.image_score) {
                "likely sponsored"
            } else {
                "no sponsorship signal above threshold"
            };
            format!(
                "image {} ({}, {} priority) gave the highest score: {}%, {}",
                entry.image_index + 1,
                entry.role_label,
                entry.priority,
                summary.image_score,
                verdict
            )
        }
        None => "no images were analyzed: 0%".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_role::PriorityTier;
    use crate::models::ImageType;

    fn image(index: i64, confidence: f64, is_ad: bool) -> ImageAnalysisResult {
        ImageAnalysisResult {
            image_index: index,
            is_ad,
            confidence,
            reason: format!("image {index}"),
            detected_keywords: Vec::new(),
            image_type: ImageType::Other,
        }
    }

    fn score(images: Vec<ImageAnalysisResult>) -> DetailedAnalysisResult {
        score_review(DetailedAnalysisResult::from_images(images))
    }

    #[test]
    fn test_single_profile_image_is_discounted() {
        let review = score(vec![image(0, 80.0, true)]);
        let summary = &review.analysis.summary;

        assert_eq!(summary.image_score, 48);
        assert_eq!(summary.best_image_index, Some(0));
        assert!(!review.is_ad);
        assert_eq!(review.confidence, 48);
        assert_eq!(summary.image_breakdown[0].priority, PriorityTier::Uncertain);
        assert_eq!(summary.image_breakdown[0].role_label, "profile or body");
    }

    #[test]
    fn test_first_body_image_is_boosted() {
        let review = score(vec![image(0, 50.0, false), image(1, 65.0, true)]);
        let summary = &review.analysis.summary;

        assert_eq!(summary.image_score, 78);
        assert_eq!(summary.best_image_index, Some(1));
        assert!(review.is_ad);
        assert_eq!(summary.image_breakdown[0].priority, PriorityTier::Low);
        assert_eq!(summary.image_breakdown[1].priority, PriorityTier::Highest);
    }

    #[test]
    fn test_exactly_at_threshold() {
        let review = score(vec![
            image(0, 90.0, true),
            image(1, 10.0, false),
            image(2, 64.0, false),
        ]);
        let summary = &review.analysis.summary;

        assert_eq!(summary.image_score, 70);
        assert_eq!(summary.best_image_index, Some(2));
        assert!(review.is_ad);
    }

    #[test]
    fn test_just_below_threshold() {
        // 63 * 1.1 = 69.3
        let review = score(vec![image(0, 10.0, false), image(1, 10.0, false), image(2, 63.0, true)]);

        assert_eq!(review.analysis.summary.image_score, 69);
        assert!(!review.is_ad);
    }

    #[test]
    fn test_supplementary_image_is_not_boosted() {
        let review = score(vec![
            image(0, 0.0, false),
            image(1, 0.0, false),
            image(2, 0.0, false),
            image(3, 100.0, true),
        ]);
        let summary = &review.analysis.summary;

        assert_eq!(summary.image_score, 100);
        assert_eq!(summary.best_image_index, Some(3));
        assert!(review.is_ad);
        assert_eq!(
            summary.image_breakdown[3].priority,
            PriorityTier::Supplementary
        );
    }

    #[test]
    fn test_empty_image_list() {
        let review = score(Vec::new());
        let summary = &review.analysis.summary;

        assert_eq!(summary.image_score, 0);
        assert_eq!(summary.best_image_index, None);
        assert!(summary.detection_details.is_empty());
        assert!(!review.is_ad);
        assert_eq!(review.confidence, 0);
    }

    #[test]
    fn test_score_is_clamped() {
        let review = score(vec![image(0, 400.0, true), image(1, 150.0, true)]);
        let summary = &review.analysis.summary;

        assert_eq!(summary.image_score, 100);
        assert_eq!(summary.best_image_index, Some(1));

        let review = score(vec![image(0, -30.0, false), image(1, -1.0, false)]);
        assert_eq!(review.analysis.summary.image_score, 0);
        assert!(!review.is_ad);
    }

    #[test]
    fn test_max_not_average() {
        let review = score(vec![
            image(0, 0.0, false),
            image(1, 90.0, true),
            image(2, 0.0, false),
            image(3, 0.0, false),
            image(4, 0.0, false),
        ]);

        assert_eq!(review.analysis.summary.image_score, 100);
        assert!(review.is_ad);
    }

    #[test]
    fn test_permutation_does_not_change_result() {
        let ordered = vec![
            image(0, 50.0, false),
            image(1, 40.0, false),
            image(2, 20.0, true),
            image(3, 60.0, true),
            image(4, 60.0, true),
        ];
        let mut shuffled = ordered.clone();
        shuffled.reverse();
        shuffled.swap(1, 3);

        let a = summarize_images(&ordered);
        let b = summarize_images(&shuffled);

        assert_eq!(a.image_score, b.image_score);
        assert_eq!(a.best_image_index, b.best_image_index);
        assert_eq!(a.image_score, 60);
        assert_eq!(a.best_image_index, Some(3));
    }

    #[test]
    fn test_tie_prefers_lowest_index() {
        let images = vec![image(5, 60.0, false), image(3, 60.0, false), image(1, 10.0, false)];
        let summary = summarize_images(&images);

        assert_eq!(summary.image_score, 60);
        assert_eq!(summary.best_image_index, Some(3));
    }

    #[test]
    fn test_tie_across_boost_factors_prefers_lowest_index() {
        // 11 * 1.2 and 12 * 1.1 are both 13.2 but differ in the last bit
        let images = vec![image(0, 0.0, false), image(1, 11.0, false), image(2, 12.0, false)];
        let summary = summarize_images(&images);
        assert_eq!(summary.image_score, 13);
        assert_eq!(summary.best_image_index, Some(1));

        let mut reversed = images.clone();
        reversed.reverse();
        assert_eq!(summarize_images(&reversed).best_image_index, Some(1));

        // 22 * 0.6 against 12 * 1.1
        let images = vec![image(0, 22.0, false), image(1, 0.0, false), image(2, 12.0, false)];
        assert_eq!(summarize_images(&images).best_image_index, Some(0));
    }

    #[test]
    fn test_detection_details_follow_raw_verdict() {
        let images = vec![
            image(0, 95.0, true),
            image(1, 20.0, false),
            image(2, 30.0, true),
            image(3, 10.0, true),
        ];
        let summary = summarize_images(&images);

        assert_eq!(summary.detection_details.len(), 3);
        let indices: Vec<i64> = summary
            .detection_details
            .iter()
            .map(|d| d.image_index)
            .collect();
        assert_eq!(indices, vec![0, 2, 3]);
        // raw value, not the discounted 57
        assert_eq!(summary.detection_details[0].confidence, 95.0);
        assert_eq!(summary.image_breakdown[0].effective_confidence.round(), 57.0);
    }

    #[test]
    fn test_failed_review_is_passed_through() {
        let mut input = DetailedAnalysisResult::from_images(vec![image(1, 99.0, true)]);
        input.error = Some("crawler blocked".to_string());
        let output = score_review(input.clone());

        assert_eq!(output, input);
        assert!(!output.is_ad);
        assert_eq!(output.analysis.summary.image_score, 0);
    }

    #[test]
    fn test_text_channel_is_forced_disabled() {
        let mut input = DetailedAnalysisResult::from_images(vec![image(1, 20.0, false)]);
        input.analysis.text_analysis = TextAnalysis::Enabled { score: 100.0 };
        let output = score_review(input);

        assert_eq!(output.analysis.text_analysis, TextAnalysis::Disabled);
        assert_eq!(output.confidence, 24);
        assert!(!output.is_ad);
    }

    #[test]
    fn test_negative_index_treated_as_first_image() {
        let summary = summarize_images(&[image(-2, 100.0, true), image(1, 10.0, false)]);

        assert_eq!(summary.image_score, 60);
        assert_eq!(summary.best_image_index, Some(-2));
        assert_eq!(summary.image_breakdown[0].priority, PriorityTier::Low);
    }

    #[test]
    fn test_final_reason_names_best_image() {
        let review = score(vec![image(0, 50.0, false), image(1, 65.0, true)]);

        assert!(review.final_reason.contains("image 2"));
        assert!(review.final_reason.contains("first body image"));
        assert!(review.final_reason.contains("78%"));

        let empty = score(Vec::new());
        assert!(empty.final_reason.contains("no images"));
    }

    #[test]
    fn test_input_images_are_preserved() {
        let images = vec![image(0, 33.0, false), image(1, 71.0, true)];
        let review = score(images.clone());

        assert_eq!(review.analysis.image_analysis, images);
    }

    #[test]
    fn test_analyzer_trait() {
        let input = DetailedAnalysisResult::from_images(vec![image(1, 65.0, true)]);
        let output = ImagePriorityAdScorer::analyze(input).unwrap();

        assert_eq!(output.confidence, 78);
    }
}
