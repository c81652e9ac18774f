pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod router;

// Re-export key types
pub use config::Config;
pub use error::ApiError;
pub use router::build_router;
