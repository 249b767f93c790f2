// ── Cache purge ──

use serde::{Deserialize, Serialize};

use super::lenient::null_as_default;

/// `POST deleteallcache` body: purge everything cached for a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteAllCacheRequest {
    pub domain: String,
}

impl DeleteAllCacheRequest {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }
}

/// `POST deletecache` body: purge specific URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteCacheRequest {
    #[serde(rename = "URL")]
    pub urls: Vec<String>,
}

impl DeleteCacheRequest {
    pub fn new<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            urls: urls.into_iter().map(Into::into).collect(),
        }
    }
}

/// Outcome of purging one URL.
///
/// Results come back in request order and succeed or fail independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteCacheResult {
    #[serde(rename = "URL")]
    pub url: String,
    /// HTTP-style status code for this URL.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub result: String,
}

impl DeleteCacheResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
