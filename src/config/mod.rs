pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};
pub use toml_config::ServiceConfig;

/// Command line and environment overrides; unset values fall through to the
/// TOML file (`--config`) and then to built-in defaults.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "news-verify")]
#[command(about = "Hybrid fake news detector: fact-check search, zero-shot AI and source credibility")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "NEWS_VERIFY_CONFIG")]
    pub config: Option<String>,

    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    #[arg(long, env = "WORKER_THREADS")]
    pub worker_threads: Option<usize>,

    #[arg(long, env = "TEMPLATES_DIR")]
    pub templates_dir: Option<String>,

    #[arg(long, env = "CREDIBILITY_PATH")]
    pub credibility_path: Option<String>,

    /// NLTK-style data directory holding corpora/stopwords/english
    #[arg(long, env = "STOPWORDS_DIR")]
    pub stopwords_dir: Option<String>,

    #[arg(long, env = "GOOGLE_FACTCHECK_API_KEY", hide_env_values = true)]
    pub factcheck_api_key: Option<String>,

    #[arg(long, env = "FACTCHECK_ENDPOINT")]
    pub factcheck_endpoint: Option<String>,

    #[arg(long, env = "ZERO_SHOT_ENDPOINT")]
    pub classifier_endpoint: Option<String>,

    #[arg(long, env = "ZERO_SHOT_TOKEN", hide_env_values = true)]
    pub classifier_token: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Report process stats on /health")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn resolve(&self) -> Result<ServiceConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                ServiceConfig::from_file(path)?
            }
            None => ServiceConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut ServiceConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(threads) = self.worker_threads {
            config.server.worker_threads = threads;
        }
        if let Some(dir) = &self.templates_dir {
            config.server.templates_dir = dir.clone();
        }
        if let Some(path) = &self.credibility_path {
            config.data.credibility_path = path.clone();
        }
        if let Some(dir) = &self.stopwords_dir {
            config.data.stopwords_dir = Some(dir.clone());
        }
        if let Some(key) = &self.factcheck_api_key {
            config.factcheck.api_key = key.clone();
        }
        if let Some(endpoint) = &self.factcheck_endpoint {
            config.factcheck.endpoint = endpoint.clone();
        }
        if let Some(endpoint) = self.classifier_endpoint.as_ref().filter(|e| !e.is_empty()) {
            config.classifier.endpoint = Some(endpoint.clone());
        }
        if let Some(token) = self.classifier_token.as_ref().filter(|t| !t.is_empty()) {
            config.classifier.token = Some(token.clone());
        }
        if self.monitor {
            config.monitoring.enabled = true;
        }
        if self.json_logs {
            config.monitoring.json_logs = true;
        }
    }
}
