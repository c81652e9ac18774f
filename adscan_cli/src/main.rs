mod json_report;

use analyzers::batch::{AnalysisLimit, decode_reviews, score_batch};
use clap::Parser;
use json_report::AdScanReport;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "adscan",
    version = "0.1.0",
    about = "Score blog review image analyses for sponsored content"
)]
struct Args {
    /// Path to a JSON file with one review or an array of reviews
    #[arg(short, long, required = true)]
    file: PathBuf,

    /// How many reviews to score: 10, 20, 50, 100, 200 or all
    #[arg(short, long, default_value_t = AnalysisLimit::All)]
    limit: AnalysisLimit,

    /// Write the JSON report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let args = Args::parse();

    let payload = std::fs::read_to_string(&args.file)?;
    let reviews = decode_reviews(&payload)?;

    if args.verbose {
        log::info!(
            "Scoring {} review(s) from {:?} with limit {}",
            reviews.len(),
            args.file,
            args.limit
        );
    }

    let report = AdScanReport::new(&args.file, args.limit, score_batch(reviews, args.limit));

    if args.verbose {
        for line in report.summary_lines() {
            log::info!("{}", line);
        }
    }

    match args.output {
        Some(ref path) => {
            report.save_to_file(path)?;
            log::info!(
                "Report written to {:?}: {} ad(s) out of {} review(s)",
                path,
                report.stats.ads,
                report.stats.total
            );
        }
        None => println!("{}", report.to_json()?),
    }

    Ok(())
}
