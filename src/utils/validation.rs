use crate::utils::error::{DetectorError, Result};
use std::path::Path;
use url::Url;

/// Extensions the credibility table loader understands.
pub const CREDIBILITY_EXTENSIONS: &[&str] = &["json", "csv"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> DetectorError {
    DetectorError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// An upstream endpoint: absolute http(s) URL with a host.
pub fn validate_endpoint(field: &str, endpoint: &str) -> Result<()> {
    let url = Url::parse(endpoint).map_err(|e| invalid(field, endpoint, format!("not a URL: {}", e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field,
            endpoint,
            format!("scheme must be http or https, got {}", url.scheme()),
        ));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid(field, endpoint, "URL has no host"));
    }
    Ok(())
}

pub fn validate_path(field: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(invalid(field, path, "path cannot be empty"));
    }
    if path.contains('\0') {
        return Err(invalid(field, path, "path contains null bytes"));
    }
    Ok(())
}

/// The credibility table must be a `.json` or `.csv` file.
pub fn validate_credibility_path(field: &str, path: &str) -> Result<()> {
    validate_path(field, path)?;
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension {
        Some(ext) if CREDIBILITY_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(invalid(
            field,
            path,
            format!("expected one of: {}", CREDIBILITY_EXTENSIONS.join(", ")),
        )),
    }
}

pub fn validate_host(field: &str, host: &str) -> Result<()> {
    if host.trim().is_empty() || host.chars().any(char::is_whitespace) {
        return Err(invalid(field, host, "host must be a non-empty name or address"));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(field, value, format!("must be between {} and {}", min, max)));
    }
    Ok(())
}

/// Weights and thresholds live in `[0, 1]`; NaN is rejected.
pub fn validate_unit_interval(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(invalid(field, value, "must be a finite number"));
    }
    validate_range(field, value, 0.0, 1.0)
}
