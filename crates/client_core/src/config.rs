use std::{fs, io};

use serde::Deserialize;
use shared::protocol::DEFAULT_API_URL;
use thiserror::Error;
use url::Url;

pub const CONFIG_FILE: &str = "dashboard.toml";

/// Checked in order; a later variable overrides an earlier one.
const API_URL_ENV_VARS: [&str; 3] = ["VITE_API_URL", "DASHBOARD_API_URL", "APP__API_URL"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Gateway base URL without a trailing slash.
    pub api_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid API URL '{url}': {reason}")]
    InvalidApiUrl { url: String, reason: String },
}

/// Loads settings from `dashboard.toml`, the environment and an optional
/// command-line override, in increasing order of precedence.
pub fn load_settings(api_url_override: Option<&str>) -> Result<Settings, ConfigError> {
    let file = match fs::read_to_string(CONFIG_FILE) {
        Ok(raw) => Some(raw),
        Err(err) if err.kind() == io::ErrorKind::NotFound => None,
        Err(source) => {
            return Err(ConfigError::Read {
                path: CONFIG_FILE.into(),
                source,
            })
        }
    };

    resolve_settings(
        file.as_deref(),
        |name| std::env::var(name).ok(),
        api_url_override,
    )
}

pub fn resolve_settings(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
    api_url_override: Option<&str>,
) -> Result<Settings, ConfigError> {
    let mut api_url = None;

    if let Some(raw) = file {
        let file_cfg: FileSettings = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: CONFIG_FILE.into(),
            source,
        })?;
        if let Some(v) = non_empty(file_cfg.api_url) {
            api_url = Some(v);
        }
    }

    for name in API_URL_ENV_VARS {
        if let Some(v) = non_empty(env(name)) {
            tracing::debug!(var = name, "api url taken from environment");
            api_url = Some(v);
        }
    }

    if let Some(v) = non_empty(api_url_override.map(str::to_string)) {
        api_url = Some(v);
    }

    let api_url = match api_url {
        Some(raw) => normalize_api_url(&raw)?,
        None => Settings::default().api_url,
    };
    Ok(Settings { api_url })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn normalize_api_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = |reason: String| ConfigError::InvalidApiUrl {
        url: raw.to_string(),
        reason,
    };

    let parsed = Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "unsupported scheme '{}', expected http or https",
            parsed.scheme()
        )));
    }
    if parsed.host_str().is_none() {
        return Err(invalid("missing host".into()));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
