// Adapters layer: concrete clients for the external fact-check and inference services.

pub mod google_factcheck;
pub mod zero_shot;

pub use google_factcheck::GoogleFactChecker;
pub use zero_shot::{classifier_from_config, HttpZeroShotClassifier, NeutralClassifier};
