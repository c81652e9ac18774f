pub mod ad_scorer;
pub mod batch;
pub mod confidence_tier;
pub mod error;
pub mod image_role;
pub mod models;

pub use error::ScoringError;

pub trait Analyzer {
    type Output;
    type Input;
    type Error;

    fn analyze(input: Self::Input) -> Result<Self::Output, Self::Error>;
}
