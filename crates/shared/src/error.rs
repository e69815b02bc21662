use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a single fetch of an upstream collection failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FetchError {
    #[error("HTTP {0}")]
    Status(u16),
    #[error("{0}")]
    Transport(String),
    #[error("{0}")]
    Decode(String),
}

/// A [`FetchError`] bound to the endpoint that produced it.
///
/// The display form is the exact text surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("Failed to fetch {endpoint}: {source}")]
pub struct FetchFailure {
    pub endpoint: String,
    pub source: FetchError,
}

impl FetchFailure {
    pub fn new(endpoint: impl Into<String>, source: FetchError) -> Self {
        Self {
            endpoint: endpoint.into(),
            source,
        }
    }
}
