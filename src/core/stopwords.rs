use crate::utils::error::{DetectorError, Result};
use std::collections::HashSet;
use std::path::Path;

const BUILTIN_ENGLISH: &str = include_str!("../../data/stopwords/corpora/stopwords/english");

/// Relative location of the English list inside an NLTK-style data directory.
pub const ENGLISH_CORPUS_PATH: &str = "corpora/stopwords/english";

#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn english() -> Self {
        Self::from_lines(BUILTIN_ENGLISH)
    }

    pub fn from_lines(content: &str) -> Self {
        let words = content
            .lines()
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .collect();
        Self { words }
    }

    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let path = dir.as_ref().join(ENGLISH_CORPUS_PATH);
        let content = std::fs::read_to_string(&path)?;
        let set = Self::from_lines(&content);
        if set.is_empty() {
            return Err(DetectorError::ConfigError {
                message: format!("stopword corpus {} is empty", path.display()),
            });
        }
        Ok(set)
    }

    pub fn load_or_default(dir: Option<&Path>) -> Self {
        let Some(dir) = dir else {
            return Self::english();
        };

        match Self::from_dir(dir) {
            Ok(set) => {
                tracing::info!("Loaded {} stopwords from {}", set.len(), dir.display());
                set
            }
            Err(e) => {
                tracing::warn!(
                    "Stopword corpus under {} unusable ({}), using built-in list",
                    dir.display(),
                    e
                );
                Self::english()
            }
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// Content words of `text` in order, at most `max_terms` of them.
    pub fn query_terms(&self, text: &str, max_terms: usize) -> Vec<String> {
        text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .map(|t| t.trim_matches('\''))
            .filter(|t| !t.is_empty() && !self.contains(t))
            .take(max_terms)
            .map(str::to_string)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::english()
    }
}
