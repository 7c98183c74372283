use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Fake,
    Real,
    Uncertain,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Fake => "FAKE",
            Verdict::Real => "REAL",
            Verdict::Uncertain => "UNCERTAIN",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A published fact-check review matching the submitted text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactCheckHit {
    pub rating: String,
    pub publisher: String,
    pub review_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "layer", rename_all = "snake_case")]
pub enum Evidence {
    FactChecked {
        hit: FactCheckHit,
    },
    Hybrid {
        ai_fake_score: f64,
        domain: Option<String>,
        credibility: f64,
        combined: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub verdict: Verdict,
    #[serde(flatten)]
    pub evidence: Evidence,
    pub checked_at: DateTime<Utc>,
}

impl Assessment {
    pub fn fact_checked(verdict: Verdict, hit: FactCheckHit) -> Self {
        Self {
            verdict,
            evidence: Evidence::FactChecked { hit },
            checked_at: Utc::now(),
        }
    }

    pub fn hybrid(
        verdict: Verdict,
        ai_fake_score: f64,
        domain: Option<String>,
        credibility: f64,
        combined: f64,
    ) -> Self {
        Self {
            verdict,
            evidence: Evidence::Hybrid {
                ai_fake_score,
                domain,
                credibility,
                combined,
            },
            checked_at: Utc::now(),
        }
    }
}
