use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Upstream {service} returned status {status}")]
    UpstreamStatusError { service: String, status: u16 },

    #[error("Template error: {message}")]
    TemplateError { message: String },

    #[error("Please enter some text")]
    EmptyInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DetectorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DetectorError::HttpError(_) | DetectorError::UpstreamStatusError { .. } => {
                ErrorCategory::Network
            }
            DetectorError::ConfigError { .. }
            | DetectorError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            DetectorError::CsvError(_) | DetectorError::SerializationError(_) => {
                ErrorCategory::Data
            }
            DetectorError::EmptyInput => ErrorCategory::Input,
            DetectorError::IoError(_) | DetectorError::TemplateError { .. } => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DetectorError::HttpError(_) => "Check network connectivity and the upstream endpoint",
            DetectorError::UpstreamStatusError { .. } => {
                "Verify the API key and endpoint, or retry later"
            }
            DetectorError::ConfigError { .. }
            | DetectorError::InvalidConfigValueError { .. } => {
                "Review the configuration file, CLI flags and environment variables"
            }
            DetectorError::CsvError(_) | DetectorError::SerializationError(_) => {
                "Make sure the credibility table is valid JSON or CSV"
            }
            DetectorError::IoError(_) => "Check that the file exists and is readable",
            DetectorError::TemplateError { .. } => "Check the templates directory",
            DetectorError::EmptyInput => "Submit a non-empty news text",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DetectorError::EmptyInput => "⚠️ Please enter some text.".to_string(),
            DetectorError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            DetectorError::HttpError(_) | DetectorError::UpstreamStatusError { .. } => {
                "An upstream service could not be reached".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<toml::de::Error> for DetectorError {
    fn from(e: toml::de::Error) -> Self {
        DetectorError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, DetectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_follows_category() {
        assert_eq!(DetectorError::EmptyInput.severity(), ErrorSeverity::Low);
        let config = DetectorError::ConfigError {
            message: "unreadable file".to_string(),
        };
        assert_eq!(config.category(), ErrorCategory::Configuration);
        assert_eq!(config.severity(), ErrorSeverity::High);

        let upstream = DetectorError::UpstreamStatusError {
            service: "factcheck".to_string(),
            status: 503,
        };
        assert_eq!(upstream.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_user_friendly_message() {
        assert_eq!(
            DetectorError::EmptyInput.user_friendly_message(),
            "⚠️ Please enter some text."
        );
        let invalid = DetectorError::InvalidConfigValueError {
            field: "port".to_string(),
            value: "0".to_string(),
            reason: "Value must be at least 1".to_string(),
        };
        assert_eq!(
            invalid.user_friendly_message(),
            "Invalid setting 'port': Value must be at least 1"
        );
    }
}
