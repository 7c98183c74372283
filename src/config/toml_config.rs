use crate::adapters::google_factcheck::DEFAULT_FACTCHECK_ENDPOINT;
use crate::core::detector::DEFAULT_MAX_QUERY_TERMS;
use crate::core::fusion::FusionWeights;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{DetectorError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

const MAX_QUERY_TERMS_LIMIT: usize = 512;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub factcheck: FactCheckConfig,
    pub classifier: ClassifierConfig,
    pub fusion: FusionWeights,
    pub http: HttpConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub worker_threads: usize,
    pub templates_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            worker_threads: 8,
            templates_dir: "./templates".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub credibility_path: String,
    pub stopwords_dir: Option<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            credibility_path: "source_cred.json".to_string(),
            stopwords_dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FactCheckConfig {
    pub endpoint: String,
    pub api_key: String,
    pub max_query_terms: usize,
}

impl Default for FactCheckConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_FACTCHECK_ENDPOINT.to_string(),
            api_key: String::new(),
            max_query_terms: DEFAULT_MAX_QUERY_TERMS,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub endpoint: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_seconds: 10 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub json_logs: bool,
}

impl ServiceConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${API_KEY})
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::LazyLock;
        static ENV_VAR: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var regex"));

        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_host("server.host", &self.server.host)?;
        validation::validate_range("server.port", self.server.port, 1, u16::MAX)?;
        validation::validate_range("server.worker_threads", self.server.worker_threads, 1, 256)?;
        validation::validate_path("server.templates_dir", &self.server.templates_dir)?;

        validation::validate_credibility_path("data.credibility_path", &self.data.credibility_path)?;
        if let Some(dir) = &self.data.stopwords_dir {
            validation::validate_path("data.stopwords_dir", dir)?;
        }

        validation::validate_endpoint("factcheck.endpoint", &self.factcheck.endpoint)?;
        validation::validate_range(
            "factcheck.max_query_terms",
            self.factcheck.max_query_terms,
            1,
            MAX_QUERY_TERMS_LIMIT,
        )?;
        if let Some(endpoint) = &self.classifier.endpoint {
            validation::validate_endpoint("classifier.endpoint", endpoint)?;
        }
        validation::validate_range("http.timeout_seconds", self.http.timeout_seconds, 1, 300)?;

        self.validate_fusion()
    }

    fn validate_fusion(&self) -> Result<()> {
        let fusion = &self.fusion;
        validation::validate_unit_interval("fusion.ai_weight", fusion.ai_weight)?;
        validation::validate_unit_interval("fusion.credibility_weight", fusion.credibility_weight)?;
        validation::validate_unit_interval("fusion.fake_threshold", fusion.fake_threshold)?;
        validation::validate_unit_interval("fusion.real_threshold", fusion.real_threshold)?;

        let total = fusion.ai_weight + fusion.credibility_weight;
        if (total - 1.0).abs() > 1e-6 {
            return Err(DetectorError::InvalidConfigValueError {
                field: "fusion".to_string(),
                value: total.to_string(),
                reason: "ai_weight + credibility_weight must equal 1".to_string(),
            });
        }
        if fusion.real_threshold >= fusion.fake_threshold {
            return Err(DetectorError::InvalidConfigValueError {
                field: "fusion.real_threshold".to_string(),
                value: fusion.real_threshold.to_string(),
                reason: format!(
                    "must be below fusion.fake_threshold ({})",
                    fusion.fake_threshold
                ),
            });
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ConfigProvider for ServiceConfig {
    fn factcheck_endpoint(&self) -> &str {
        &self.factcheck.endpoint
    }

    fn factcheck_api_key(&self) -> &str {
        &self.factcheck.api_key
    }

    fn classifier_endpoint(&self) -> Option<&str> {
        self.classifier.endpoint.as_deref()
    }

    fn classifier_token(&self) -> Option<&str> {
        self.classifier.token.as_deref()
    }

    fn request_timeout_secs(&self) -> u64 {
        self.http.timeout_seconds
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = ServiceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
        assert_eq!(config.server.worker_threads, 8);
        assert_eq!(config.factcheck_endpoint(), DEFAULT_FACTCHECK_ENDPOINT);
        assert_eq!(config.classifier_endpoint(), None);
    }

    #[test]
    fn test_parse_partial_toml_config() {
        let toml_content = r#"
[server]
port = 8080

[classifier]
endpoint = "https://api-inference.huggingface.co/models/facebook/bart-large-mnli"

[fusion]
fake_threshold = 0.7
"#;

        let config = ServiceConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.fusion.fake_threshold, 0.7);
        assert_eq!(config.fusion.ai_weight, 0.6);
        assert!(config.classifier_endpoint().is_some());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("NEWS_VERIFY_TEST_KEY", "abc123");

        let toml_content = r#"
[factcheck]
api_key = "${NEWS_VERIFY_TEST_KEY}"
"#;

        let config = ServiceConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.factcheck_api_key(), "abc123");

        std::env::remove_var("NEWS_VERIFY_TEST_KEY");
    }

    #[test]
    fn test_unset_env_var_is_kept_verbatim() {
        let config = ServiceConfig::from_toml_str(
            r#"
[factcheck]
api_key = "${NEWS_VERIFY_SURELY_UNSET_VAR}"
"#,
        )
        .unwrap();
        assert_eq!(config.factcheck.api_key, "${NEWS_VERIFY_SURELY_UNSET_VAR}");
    }

    #[test]
    fn test_config_validation() {
        let bad_endpoint = ServiceConfig::from_toml_str(
            r#"
[factcheck]
endpoint = "invalid-url"
"#,
        )
        .unwrap();
        assert!(bad_endpoint.validate().is_err());

        let bad_weights = ServiceConfig::from_toml_str(
            r#"
[fusion]
ai_weight = 0.9
credibility_weight = 0.4
"#,
        )
        .unwrap();
        assert!(bad_weights.validate().is_err());

        let inverted = ServiceConfig::from_toml_str(
            r#"
[fusion]
fake_threshold = 0.3
real_threshold = 0.5
"#,
        )
        .unwrap();
        assert!(inverted.validate().is_err());

        let bad_table = ServiceConfig::from_toml_str(
            r#"
[data]
credibility_path = "cred.xml"
"#,
        )
        .unwrap();
        assert!(bad_table.validate().is_err());
    }

    #[test]
    fn test_numeric_bounds_are_enforced() {
        let zero_port = ServiceConfig::from_toml_str("[server]\nport = 0\n").unwrap();
        let err = zero_port.validate().unwrap_err();
        assert!(matches!(
            err,
            DetectorError::InvalidConfigValueError { ref field, .. } if field == "server.port"
        ));

        let no_terms = ServiceConfig::from_toml_str("[factcheck]\nmax_query_terms = 0\n").unwrap();
        assert!(no_terms.validate().is_err());

        let too_many_terms =
            ServiceConfig::from_toml_str("[factcheck]\nmax_query_terms = 10000\n").unwrap();
        assert!(too_many_terms.validate().is_err());

        let nan_threshold = ServiceConfig::from_toml_str("[fusion]\nfake_threshold = nan\n").unwrap();
        assert!(nan_threshold.validate().is_err());

        let hostless = ServiceConfig::from_toml_str(
            r#"
[classifier]
endpoint = "http://"
"#,
        )
        .unwrap();
        assert!(hostless.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = ServiceConfig::from_toml_str("[server\nport = ").unwrap_err();
        assert!(matches!(err, DetectorError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nhost = \"127.0.0.1\"\nworker_threads = 2\n")
            .unwrap();

        let config = ServiceConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:5000");
        assert_eq!(config.server.worker_threads, 2);
    }
}
