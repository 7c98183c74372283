pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::{build_state, router, serve, AppState};
pub use config::ServiceConfig;
pub use crate::core::{credibility::CredibilityTable, detector::HybridDetector};
pub use domain::model::{Assessment, Evidence, FactCheckHit, Verdict};
pub use utils::error::{DetectorError, Result};
