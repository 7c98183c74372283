use crate::core::credibility::CredibilityTable;
use crate::core::domain_extract::domain_from_text;
use crate::core::fusion::{round3, verdict_from_rating, FusionWeights};
use crate::core::stopwords::StopwordSet;
use crate::domain::model::Assessment;
use crate::domain::ports::{FactChecker, ZeroShotClassifier};
use crate::utils::error::{DetectorError, Result};
use std::sync::Arc;

pub const NEUTRAL_AI_SCORE: f64 = 0.5;
pub const DEFAULT_MAX_QUERY_TERMS: usize = 32;

/// Runs the fact-check, zero-shot and credibility layers for one text.
pub struct HybridDetector {
    fact_checker: Arc<dyn FactChecker>,
    classifier: Arc<dyn ZeroShotClassifier>,
    credibility: CredibilityTable,
    stopwords: StopwordSet,
    weights: FusionWeights,
    max_query_terms: usize,
}

impl HybridDetector {
    pub fn new(
        fact_checker: Arc<dyn FactChecker>,
        classifier: Arc<dyn ZeroShotClassifier>,
        credibility: CredibilityTable,
    ) -> Self {
        Self {
            fact_checker,
            classifier,
            credibility,
            stopwords: StopwordSet::english(),
            weights: FusionWeights::default(),
            max_query_terms: DEFAULT_MAX_QUERY_TERMS,
        }
    }

    pub fn with_stopwords(mut self, stopwords: StopwordSet) -> Self {
        self.stopwords = stopwords;
        self
    }

    pub fn with_weights(mut self, weights: FusionWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_max_query_terms(mut self, max_query_terms: usize) -> Self {
        self.max_query_terms = max_query_terms.max(1);
        self
    }

    pub async fn assess(&self, text: &str) -> Result<Assessment> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DetectorError::EmptyInput);
        }

        let query = self.factcheck_query(text);
        tracing::debug!("Fact-check query: {}", query);

        match self.fact_checker.search(&query).await {
            Ok(Some(hit)) => {
                let verdict = verdict_from_rating(&hit.rating);
                tracing::info!(
                    "Fact-check hit from '{}' rated '{}' -> {}",
                    hit.publisher,
                    hit.rating,
                    verdict
                );
                return Ok(Assessment::fact_checked(verdict, hit));
            }
            Ok(None) => tracing::debug!("No fact-check result, falling back to model layers"),
            Err(e) => tracing::warn!("Fact-check lookup failed: {}", e),
        }

        let ai_score = match self.classifier.fake_score(text).await {
            Ok(score) if score.is_finite() => score.clamp(0.0, 1.0),
            Ok(score) => {
                tracing::warn!("Classifier returned non-finite score {}", score);
                NEUTRAL_AI_SCORE
            }
            Err(e) => {
                tracing::warn!("Zero-shot classifier error: {}", e);
                NEUTRAL_AI_SCORE
            }
        };

        let domain = domain_from_text(text);
        let credibility = self.credibility.score_for(domain.as_deref());
        let (verdict, combined) = self.weights.combine(None, ai_score, credibility);

        tracing::info!(
            "Hybrid verdict {} (ai={:.3}, domain={}, credibility={:.3}, combined={})",
            verdict,
            ai_score,
            domain.as_deref().unwrap_or("unknown"),
            credibility,
            combined
        );

        Ok(Assessment::hybrid(
            verdict,
            round3(ai_score),
            domain,
            round3(credibility),
            combined,
        ))
    }

    /// Long texts are cut down to their leading content words.
    fn factcheck_query(&self, text: &str) -> String {
        if text.split_whitespace().count() <= self.max_query_terms {
            return text.to_string();
        }
        let terms = self.stopwords.query_terms(text, self.max_query_terms);
        if terms.is_empty() {
            text.to_string()
        } else {
            terms.join(" ")
        }
    }
}
