//! Zero-shot NLI classification over an HTTP inference endpoint.

use crate::domain::ports::{ConfigProvider, ZeroShotClassifier};
use crate::utils::error::{DetectorError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const CANDIDATE_LABELS: [&str; 2] = ["fake", "real"];
pub const HYPOTHESIS_TEMPLATE: &str = "This example is {}.";

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters<'a>,
}

#[derive(Debug, Serialize)]
struct InferenceParameters<'a> {
    candidate_labels: &'a [&'a str],
    hypothesis_template: &'a str,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// Inference servers answer either with parallel arrays or a list of pairs.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Columns {
        #[serde(default)]
        labels: Vec<String>,
        #[serde(default)]
        scores: Vec<f64>,
    },
    Pairs(Vec<LabelScore>),
}

impl InferenceResponse {
    fn fake_score(self) -> Option<f64> {
        match self {
            InferenceResponse::Columns { labels, scores } => labels
                .iter()
                .zip(scores)
                .find(|(label, _)| label.eq_ignore_ascii_case("fake"))
                .map(|(_, score)| score),
            InferenceResponse::Pairs(pairs) => pairs
                .into_iter()
                .find(|p| p.label.eq_ignore_ascii_case("fake"))
                .map(|p| p.score),
        }
    }
}

pub struct HttpZeroShotClassifier {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpZeroShotClassifier {
    pub fn new(endpoint: String, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            token,
        })
    }
}

#[async_trait]
impl ZeroShotClassifier for HttpZeroShotClassifier {
    async fn fake_score(&self, text: &str) -> Result<f64> {
        let body = InferenceRequest {
            inputs: text,
            parameters: InferenceParameters {
                candidate_labels: &CANDIDATE_LABELS,
                hypothesis_template: HYPOTHESIS_TEMPLATE,
            },
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(DetectorError::UpstreamStatusError {
                service: "zero-shot".to_string(),
                status: response.status().as_u16(),
            });
        }

        let parsed: InferenceResponse = response.json().await?;
        Ok(parsed.fake_score().unwrap_or(0.5))
    }
}

/// Used when no inference endpoint is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeutralClassifier;

#[async_trait]
impl ZeroShotClassifier for NeutralClassifier {
    async fn fake_score(&self, _text: &str) -> Result<f64> {
        Ok(0.5)
    }
}

pub fn classifier_from_config<C: ConfigProvider + ?Sized>(
    config: &C,
) -> Result<Box<dyn ZeroShotClassifier>> {
    match config.classifier_endpoint() {
        Some(endpoint) => {
            tracing::info!("Zero-shot classifier endpoint: {}", endpoint);
            Ok(Box::new(HttpZeroShotClassifier::new(
                endpoint.to_string(),
                config.classifier_token().map(str::to_string),
                Duration::from_secs(config.request_timeout_secs()),
            )?))
        }
        None => {
            tracing::warn!("No zero-shot endpoint configured, AI layer scores neutral (0.5)");
            Ok(Box::new(NeutralClassifier))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn classifier(server: &MockServer, token: Option<&str>) -> HttpZeroShotClassifier {
        HttpZeroShotClassifier::new(
            server.url("/models/bart-large-mnli"),
            token.map(str::to_string),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fake_score_from_columns() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/models/bart-large-mnli")
                .header("authorization", "Bearer hf_token")
                .json_body(serde_json::json!({
                    "inputs": "Aliens built the pyramids",
                    "parameters": {
                        "candidate_labels": ["fake", "real"],
                        "hypothesis_template": "This example is {}."
                    }
                }));
            then.status(200).json_body(serde_json::json!({
                "sequence": "Aliens built the pyramids",
                "labels": ["fake", "real"],
                "scores": [0.83, 0.17]
            }));
        });

        let score = classifier(&server, Some("hf_token"))
            .fake_score("Aliens built the pyramids")
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(score, 0.83);
    }

    #[tokio::test]
    async fn test_fake_score_from_pairs() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/models/bart-large-mnli");
            then.status(200).json_body(serde_json::json!([
                {"label": "real", "score": 0.7},
                {"label": "FAKE", "score": 0.3}
            ]));
        });

        let score = classifier(&server, None).fake_score("text").await.unwrap();
        assert_eq!(score, 0.3);
    }

    #[tokio::test]
    async fn test_missing_fake_label_is_neutral() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/models/bart-large-mnli");
            then.status(200)
                .json_body(serde_json::json!({"labels": ["real"], "scores": [0.9]}));
        });

        let score = classifier(&server, None).fake_score("text").await.unwrap();
        assert_eq!(score, 0.5);
    }

    #[tokio::test]
    async fn test_model_loading_status_is_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/models/bart-large-mnli");
            then.status(503)
                .json_body(serde_json::json!({"error": "Model is currently loading"}));
        });

        let err = classifier(&server, None).fake_score("text").await.unwrap_err();
        assert!(matches!(
            err,
            DetectorError::UpstreamStatusError { status: 503, .. }
        ));
    }

    #[tokio::test]
    async fn test_neutral_classifier() {
        assert_eq!(NeutralClassifier.fake_score("anything").await.unwrap(), 0.5);
    }
}
