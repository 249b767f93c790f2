// ── Origin guard tokens ──

use serde::{Deserialize, Serialize};

use super::lenient::null_as_default;

/// Current/next token pair the CDN presents to the origin.
///
/// A non-empty `next_origin_guard_token` means a rotation is in progress:
/// the origin should accept both until the next token is promoted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginGuardTokenResponse {
    #[serde(rename = "OriginGuardToken", default, deserialize_with = "null_as_default")]
    pub origin_guard_token: String,
    #[serde(
        rename = "NextOriginGuardToken",
        default,
        deserialize_with = "null_as_default"
    )]
    pub next_origin_guard_token: String,
}

impl OriginGuardTokenResponse {
    /// The token in force, if one has been issued.
    pub fn current(&self) -> Option<&str> {
        Some(self.origin_guard_token.as_str()).filter(|t| !t.is_empty())
    }

    /// The pending token, if a rotation is in progress.
    pub fn next(&self) -> Option<&str> {
        Some(self.next_origin_guard_token.as_str()).filter(|t| !t.is_empty())
    }

    pub fn is_rotating(&self) -> bool {
        self.next().is_some()
    }
}
