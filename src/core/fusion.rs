use crate::domain::model::Verdict;
use serde::{Deserialize, Serialize};

/// Rating fragments that mark a fact-check review as debunking the claim.
const NEGATIVE_RATING_TOKENS: &[&str] = &[
    "false",
    "fake",
    "misleading",
    "altered",
    "pants-on-fire",
    "not true",
];

const GOOGLE_FAKE_SCORE: f64 = 0.99;
const GOOGLE_REAL_SCORE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionWeights {
    pub ai_weight: f64,
    pub credibility_weight: f64,
    pub fake_threshold: f64,
    pub real_threshold: f64,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            ai_weight: 0.6,
            credibility_weight: 0.4,
            fake_threshold: 0.60,
            real_threshold: 0.40,
        }
    }
}

impl FusionWeights {
    /// Fuses the layers into a verdict and a fake-likelihood in `[0, 1]`.
    ///
    /// An explicit fact-check decision overrides the model layers.
    pub fn combine(&self, google_decision: Option<Verdict>, ai_score: f64, cred_score: f64) -> (Verdict, f64) {
        match google_decision {
            Some(Verdict::Fake) => return (Verdict::Fake, GOOGLE_FAKE_SCORE),
            Some(_) => return (Verdict::Real, GOOGLE_REAL_SCORE),
            None => {}
        }

        let ai = finite_or_neutral(ai_score);
        let cred = finite_or_neutral(cred_score);

        // Thresholds apply to the raw score; only the reported value is rounded.
        let combined = (self.ai_weight * ai + self.credibility_weight * (1.0 - cred)).clamp(0.0, 1.0);

        let verdict = if combined >= self.fake_threshold {
            Verdict::Fake
        } else if combined <= self.real_threshold {
            Verdict::Real
        } else {
            Verdict::Uncertain
        };

        (verdict, round3(combined))
    }
}

pub fn combine_scores(google_decision: Option<Verdict>, ai_score: f64, cred_score: f64) -> (Verdict, f64) {
    FusionWeights::default().combine(google_decision, ai_score, cred_score)
}

pub fn verdict_from_rating(rating: &str) -> Verdict {
    let rating = rating.to_lowercase();
    if NEGATIVE_RATING_TOKENS.iter().any(|tok| rating.contains(tok)) {
        Verdict::Fake
    } else {
        Verdict::Real
    }
}

pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn finite_or_neutral(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.5
    }
}
