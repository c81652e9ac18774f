use analyzers::batch::{AnalysisLimit, BatchReport, BatchStats};
use analyzers::models::DetailedAnalysisResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;

#[derive(Serialize, Deserialize, Debug)]
pub struct AdScanReport {
    pub source: String,
    pub timestamp: String,
    pub limit: AnalysisLimit,
    pub stats: BatchStats,
    pub results: Vec<DetailedAnalysisResult>,
}

impl AdScanReport {
    pub fn new(source: &Path, limit: AnalysisLimit, batch: BatchReport) -> Self {
        Self {
            source: source.to_string_lossy().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            limit,
            stats: batch.stats,
            results: batch.results,
        }
    }

    /// One line per review, for terminal output.
    pub fn summary_lines(&self) -> Vec<String> {
        self.results
            .iter()
            .enumerate()
            .map(|(i, review)| {
                let label = review
                    .review_id
                    .clone()
                    .unwrap_or_else(|| format!("#{}", i + 1));
                match review.error {
                    Some(ref error) => format!("{}: analysis failed ({})", label, error),
                    None => format!(
                        "{}: {} {}% [{}] {}",
                        label,
                        if review.is_ad { "AD" } else { "ok" },
                        review.confidence,
                        review.confidence_tier(),
                        review.final_reason
                    ),
                }
            })
            .collect()
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, output_path: P) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = fs::File::create(output_path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
