use crate::utils::error::{DetectorError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

pub const NEUTRAL_CREDIBILITY: f64 = 0.5;

/// Domain → credibility score in `[0, 1]`, 1 meaning highly credible.
#[derive(Debug, Clone, Default)]
pub struct CredibilityTable {
    scores: HashMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    domain: String,
    score: String,
}

impl CredibilityTable {
    pub fn new(scores: HashMap<String, f64>) -> Self {
        let scores = scores
            .into_iter()
            .filter(|(_, v)| v.is_finite())
            .map(|(k, v)| (k.trim().to_lowercase(), v.clamp(0.0, 1.0)))
            .collect();
        Self { scores }
    }

    /// Loads a `.json` object or a `domain,score` `.csv` file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("csv") => Self::from_csv_str(&content),
            _ => Self::from_json_str(&content),
        }
    }

    /// Missing or broken tables degrade to an empty one.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(
                "Credibility table {} not found, all domains score {}",
                path.display(),
                NEUTRAL_CREDIBILITY
            );
            return Self::default();
        }

        match Self::from_file(path) {
            Ok(table) => {
                tracing::info!(
                    "Loaded {} domain credibility scores from {}",
                    table.len(),
                    path.display()
                );
                table
            }
            Err(e) => {
                tracing::warn!("Failed to load credibility table {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: HashMap<String, serde_json::Value> = serde_json::from_str(content)?;
        let scores = raw
            .into_iter()
            .filter_map(|(domain, value)| {
                let score = match &value {
                    serde_json::Value::Number(n) => n.as_f64(),
                    serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
                    _ => None,
                };
                if score.is_none() {
                    tracing::debug!("Skipping non-numeric credibility for {}: {}", domain, value);
                }
                score.map(|s| (domain, s))
            })
            .collect();
        Ok(Self::new(scores))
    }

    pub fn from_csv_str(content: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let mut scores = HashMap::new();
        for row in reader.deserialize::<CsvRow>() {
            let row = row?;
            match row.score.parse::<f64>() {
                Ok(score) => {
                    scores.insert(row.domain, score);
                }
                Err(_) => tracing::debug!(
                    "Skipping non-numeric credibility for {}: {}",
                    row.domain,
                    row.score
                ),
            }
        }

        if scores.is_empty() && !content.trim().is_empty() {
            return Err(DetectorError::ConfigError {
                message: "credibility CSV has no numeric 'domain,score' rows".to_string(),
            });
        }
        Ok(Self::new(scores))
    }

    /// Base domain (last two labels) first, then the full domain, else neutral.
    pub fn score_for(&self, domain: Option<&str>) -> f64 {
        let Some(domain) = domain.map(|d| d.to_lowercase()) else {
            return NEUTRAL_CREDIBILITY;
        };

        let parts: Vec<&str> = domain.split('.').collect();
        let base = if parts.len() >= 2 {
            parts[parts.len() - 2..].join(".")
        } else {
            domain.clone()
        };

        self.scores
            .get(&base)
            .or_else(|| self.scores.get(&domain))
            .copied()
            .unwrap_or(NEUTRAL_CREDIBILITY)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn table() -> CredibilityTable {
        CredibilityTable::from_json_str(
            r#"{"reuters.com": 0.95, "theonion.com": 0.05, "news.example.co": "0.7", "bad": "n/a"}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_unknown_or_missing_domain_is_neutral() {
        let table = table();
        assert_eq!(table.score_for(None), 0.5);
        assert_eq!(table.score_for(Some("unknown.org")), 0.5);
    }

    #[test]
    fn test_subdomain_uses_base_domain() {
        let table = table();
        assert_eq!(table.score_for(Some("www.reuters.com")), 0.95);
        assert_eq!(table.score_for(Some("THEONION.COM")), 0.05);
    }

    #[test]
    fn test_full_domain_fallback() {
        // base "example.co" is absent, full domain matches
        let table = table();
        assert_eq!(table.score_for(Some("news.example.co")), 0.7);
    }

    #[test]
    fn test_non_numeric_values_are_skipped() {
        assert_eq!(table().len(), 3);
    }

    #[test]
    fn test_scores_are_clamped() {
        let table = CredibilityTable::from_json_str(r#"{"a.com": 1.7, "b.com": -2}"#).unwrap();
        assert_eq!(table.score_for(Some("a.com")), 1.0);
        assert_eq!(table.score_for(Some("b.com")), 0.0);
    }

    #[test]
    fn test_csv_table() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"domain,score\nbbc.co.uk, 0.9\nclickbait.net,0.1\n")
            .unwrap();

        let table = CredibilityTable::from_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.score_for(Some("bbc.co.uk")), 0.9);
        assert_eq!(table.score_for(Some("www.clickbait.net")), 0.1);
    }

    #[test]
    fn test_load_or_empty_on_missing_and_invalid_files() {
        let missing = CredibilityTable::load_or_empty("/nonexistent/source_cred.json");
        assert!(missing.is_empty());

        let mut broken = NamedTempFile::new().unwrap();
        broken.write_all(b"{ not json").unwrap();
        let table = CredibilityTable::load_or_empty(broken.path());
        assert!(table.is_empty());
    }
}
