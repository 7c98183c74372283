use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(https?://[^\s'"<>]+)"#).expect("valid URL regex"));

static DOMAIN_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z0-9.-]+\.[A-Za-z]{2,6})").expect("valid domain regex"));

const TOKEN_TRIM: &[char] = &['.', ',', '\'', '"', '(', ')', '[', ']', '<', '>'];

/// Pulls the most likely source domain out of free text.
///
/// An explicit `http(s)://` URL wins; otherwise the first domain-looking token
/// (`example.com`) is used. The result is lower-cased.
pub fn domain_from_text(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    if let Some(m) = URL_RE.find(text) {
        match Url::parse(m.as_str()) {
            Ok(url) => {
                if let Some(host) = url.host_str().filter(|h| !h.is_empty()) {
                    return Some(host.to_lowercase());
                }
            }
            Err(e) => tracing::debug!("Ignoring unparsable URL {}: {}", m.as_str(), e),
        }
    }

    DOMAIN_TOKEN_RE
        .find(text)
        .map(|m| m.as_str().trim_matches(TOKEN_TRIM).to_lowercase())
        .filter(|d| !d.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_has_no_domain() {
        assert_eq!(domain_from_text(""), None);
        assert_eq!(domain_from_text("no domains in here"), None);
    }

    #[test]
    fn test_explicit_url_wins() {
        let text = "Read it on example.org first: https://News.BBC.co.uk/world/123?ref=x";
        assert_eq!(domain_from_text(text), Some("news.bbc.co.uk".to_string()));
    }

    #[test]
    fn test_url_port_is_dropped() {
        assert_eq!(
            domain_from_text("see http://localhost.test:8080/path"),
            Some("localhost.test".to_string())
        );
    }

    #[test]
    fn test_url_stops_at_quotes() {
        assert_eq!(
            domain_from_text("<a href='https://reuters.com/a'>link</a>"),
            Some("reuters.com".to_string())
        );
    }

    #[test]
    fn test_plain_domain_token() {
        assert_eq!(
            domain_from_text("According to CNN.com, the bridge collapsed."),
            Some("cnn.com".to_string())
        );
    }

    #[test]
    fn test_token_punctuation_is_trimmed() {
        assert_eq!(
            domain_from_text("(source: .theonion.com)"),
            Some("theonion.com".to_string())
        );
    }
}
