pub mod credibility;
pub mod detector;
pub mod domain_extract;
pub mod fusion;
pub mod stopwords;

pub use crate::domain::model::{Assessment, Evidence, FactCheckHit, Verdict};
pub use crate::domain::ports::{ConfigProvider, FactChecker, ZeroShotClassifier};
pub use crate::utils::error::Result;
