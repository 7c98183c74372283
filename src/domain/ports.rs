use crate::domain::model::FactCheckHit;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Looks up published fact-checks for a claim.
#[async_trait]
pub trait FactChecker: Send + Sync {
    async fn search(&self, query: &str) -> Result<Option<FactCheckHit>>;
}

/// Scores how likely a text is fake, in `[0, 1]`.
#[async_trait]
pub trait ZeroShotClassifier: Send + Sync {
    async fn fake_score(&self, text: &str) -> Result<f64>;
}

pub trait ConfigProvider: Send + Sync {
    fn factcheck_endpoint(&self) -> &str;
    fn factcheck_api_key(&self) -> &str;
    fn classifier_endpoint(&self) -> Option<&str>;
    fn classifier_token(&self) -> Option<&str>;
    fn request_timeout_secs(&self) -> u64;
}
