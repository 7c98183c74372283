//! Google Fact Check Tools `claims:search` client.

use crate::domain::model::FactCheckHit;
use crate::domain::ports::{ConfigProvider, FactChecker};
use crate::utils::error::{DetectorError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_FACTCHECK_ENDPOINT: &str =
    "https://factchecktools.googleapis.com/v1alpha1/claims:search";

#[derive(Debug, Default, Deserialize)]
struct ClaimSearchResponse {
    #[serde(default)]
    claims: Vec<Claim>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Claim {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    claim_review: Vec<ClaimReview>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClaimReview {
    #[serde(default)]
    publisher: Option<Publisher>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    textual_rating: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Publisher {
    #[serde(default)]
    name: Option<String>,
}

pub struct GoogleFactChecker {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GoogleFactChecker {
    pub fn new(endpoint: String, api_key: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::new(
            config.factcheck_endpoint().to_string(),
            config.factcheck_api_key().to_string(),
            Duration::from_secs(config.request_timeout_secs()),
        )
    }

    pub fn is_enabled(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn select_hit(response: ClaimSearchResponse) -> Option<FactCheckHit> {
        let first_reviewed = response
            .claims
            .iter()
            .find_map(|claim| claim.claim_review.first());

        if let Some(review) = first_reviewed {
            return Some(FactCheckHit {
                rating: review.textual_rating.clone().unwrap_or_default(),
                publisher: review
                    .publisher
                    .as_ref()
                    .and_then(|p| p.name.clone())
                    .unwrap_or_default(),
                review_url: review.url.clone().unwrap_or_default(),
            });
        }

        // Claims without any review still count as a match.
        response.claims.into_iter().next().map(|claim| FactCheckHit {
            rating: claim.text.unwrap_or_default(),
            ..FactCheckHit::default()
        })
    }
}

#[async_trait]
impl FactChecker for GoogleFactChecker {
    async fn search(&self, query: &str) -> Result<Option<FactCheckHit>> {
        if !self.is_enabled() {
            tracing::debug!("Fact-check API key not set, skipping lookup");
            return Ok(None);
        }

        tracing::debug!("Making fact-check request to: {}", self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("query", query), ("key", self.api_key.as_str())])
            .send()
            .await?;

        tracing::debug!("Fact-check response status: {}", response.status());
        if !response.status().is_success() {
            return Err(DetectorError::UpstreamStatusError {
                service: "factcheck".to_string(),
                status: response.status().as_u16(),
            });
        }

        let body: ClaimSearchResponse = response.json().await?;
        Ok(Self::select_hit(body))
    }
}
