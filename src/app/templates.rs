use crate::domain::model::{Assessment, Evidence};
use crate::utils::error::{DetectorError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

pub const INDEX_TEMPLATE: &str = "index.html";
pub const PREDICT_TEMPLATE: &str = "predict.html";
pub const PREDICTION_TEMPLATE: &str = "prediction.html";

pub const EMPTY_INPUT_MESSAGE: &str = "⚠️ Please enter some text.";

// Accepts the Jinja-style `{{ prediction_text }}` and `{{ prediction_text|safe }}`.
static PREDICTION_SLOT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*prediction_text\s*(\|\s*safe\s*)?\}\}").expect("valid slot regex")
});

/// HTML pages read from a templates directory on every render.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn page(&self, name: &str) -> Result<String> {
        let path = self.dir.join(name);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| DetectorError::TemplateError {
                message: format!("cannot read {}: {}", path.display(), e),
            })
    }

    pub async fn render_prediction(&self, prediction_html: &str) -> Result<String> {
        let page = self.page(PREDICTION_TEMPLATE).await?;
        Ok(fill_prediction(&page, prediction_html))
    }
}

pub fn fill_prediction(page: &str, prediction_html: &str) -> String {
    PREDICTION_SLOT
        .replace_all(page, regex::NoExpand(prediction_html))
        .into_owned()
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

// Whole numbers keep one decimal place, so 1.0 shows as "1.0" and not "1".
fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.1}", score)
    } else {
        score.to_string()
    }
}

/// The result fragment shown on the prediction page.
pub fn assessment_fragment(assessment: &Assessment) -> String {
    match &assessment.evidence {
        Evidence::FactChecked { hit } => format!(
            "<b>{}</b><br>Rating: {}<br>Source: {}<br><a href='{}' target='_blank'>Fact-check link</a>",
            assessment.verdict,
            escape_html(or_placeholder(&hit.rating, "N/A")),
            escape_html(or_placeholder(&hit.publisher, "N/A")),
            escape_html(or_placeholder(&hit.review_url, "#")),
        ),
        Evidence::Hybrid {
            ai_fake_score,
            domain,
            credibility,
            combined,
        } => format!(
            "<b>{}</b><br>AI-fake-score: {}<br>Source domain: {} (credibility: {})<br>Hybrid-score (fake-likelihood): {}",
            assessment.verdict,
            format_score(*ai_fake_score),
            escape_html(domain.as_deref().unwrap_or("Unknown")),
            format_score(*credibility),
            format_score(*combined),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{FactCheckHit, Verdict};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_fill_prediction_slot_variants() {
        let page = "<p>{{ prediction_text }}</p><p>{{prediction_text|safe}}</p>";
        assert_eq!(fill_prediction(page, "<b>REAL</b>"), "<p><b>REAL</b></p><p><b>REAL</b></p>");
    }

    #[test]
    fn test_fill_prediction_does_not_expand_dollars() {
        assert_eq!(fill_prediction("{{ prediction_text }}", "$1 cost"), "$1 cost");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert('x')</script> & "q""#),
            "&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt; &amp; &quot;q&quot;"
        );
    }

    #[test]
    fn test_fact_checked_fragment_placeholders() {
        let assessment = Assessment::fact_checked(Verdict::Real, FactCheckHit::default());
        assert_eq!(
            assessment_fragment(&assessment),
            "<b>REAL</b><br>Rating: N/A<br>Source: N/A<br><a href='#' target='_blank'>Fact-check link</a>"
        );
    }

    #[test]
    fn test_hybrid_fragment() {
        let assessment = Assessment::hybrid(Verdict::Uncertain, 0.5, None, 0.5, 0.5);
        assert_eq!(
            assessment_fragment(&assessment),
            "<b>UNCERTAIN</b><br>AI-fake-score: 0.5<br>Source domain: Unknown (credibility: 0.5)<br>Hybrid-score (fake-likelihood): 0.5"
        );
    }

    #[test]
    fn test_hybrid_fragment_whole_scores_keep_decimal() {
        let assessment = Assessment::hybrid(
            Verdict::Fake,
            1.0,
            Some("fake.news".to_string()),
            0.0,
            1.0,
        );
        assert_eq!(
            assessment_fragment(&assessment),
            "<b>FAKE</b><br>AI-fake-score: 1.0<br>Source domain: fake.news (credibility: 0.0)<br>Hybrid-score (fake-likelihood): 1.0"
        );
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0.0), "0.0");
        assert_eq!(format_score(1.0), "1.0");
        assert_eq!(format_score(0.92), "0.92");
        assert_eq!(format_score(0.274), "0.274");
    }

    #[tokio::test]
    async fn test_missing_template_is_template_error() {
        let dir = TempDir::new().unwrap();
        let store = TemplateStore::new(dir.path());
        let err = store.page(INDEX_TEMPLATE).await.unwrap_err();
        assert!(matches!(err, DetectorError::TemplateError { .. }));

        fs::write(dir.path().join(PREDICTION_TEMPLATE), "<div>{{ prediction_text }}</div>").unwrap();
        let html = store.render_prediction("ok").await.unwrap();
        assert_eq!(html, "<div>ok</div>");
    }
}
