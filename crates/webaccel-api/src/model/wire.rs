// ── Flat wire form ──
//
// `SiteFields` is the site object exactly as it travels: every enumerated
// value is a raw string and both origin groups sit side by side. Anything
// decoded from JSON lands here first and is checked by `validate_create` /
// `validate_update` before it becomes a typed request.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lenient::null_as_default;

/// Raw site payload shared by create and update requests.
///
/// Absent fields are omitted on the wire. `CORSRules` and
/// `OnetimeURLSecrets` keep three states: absent (unchanged), `[]` (clear)
/// and populated (replace).
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SiteFields {
    // Common to both origin types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_protocol: Option<String>,
    #[serde(
        default,
        rename = "DefaultCacheTTL",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_cache_ttl: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vary_support: Option<String>,
    #[serde(default, rename = "NormalizeAE", skip_serializing_if = "Option::is_none")]
    pub normalize_ae: Option<String>,
    #[serde(default, rename = "CORSRules", skip_serializing_if = "Option::is_none")]
    pub cors_rules: Option<Vec<CorsRule>>,
    #[serde(
        default,
        rename = "OnetimeURLSecrets",
        skip_serializing_if = "Option::is_none"
    )]
    pub onetime_url_secrets: Option<Vec<String>>,

    // Web server origin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_header: Option<String>,

    // Object-storage origin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_name: Option<String>,
    #[serde(default, rename = "S3Endpoint", skip_serializing_if = "Option::is_none")]
    pub s3_endpoint: Option<String>,
    #[serde(default, rename = "S3Region", skip_serializing_if = "Option::is_none")]
    pub s3_region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_index: Option<String>,
    #[serde(default, rename = "AccessKeyID", skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_access_key: Option<String>,
}

impl SiteFields {
    /// Wire name of the first populated web-server-origin field.
    pub fn first_web_server_field(&self) -> Option<&'static str> {
        [("Origin", &self.origin), ("HostHeader", &self.host_header)]
            .into_iter()
            .find_map(|(name, value)| is_populated(value.as_deref()).then_some(name))
    }

    /// Wire name of the first populated object-storage-origin field.
    pub fn first_object_storage_field(&self) -> Option<&'static str> {
        [
            ("BucketName", &self.bucket_name),
            ("S3Endpoint", &self.s3_endpoint),
            ("S3Region", &self.s3_region),
            ("DocIndex", &self.doc_index),
            ("AccessKeyID", &self.access_key_id),
            ("SecretAccessKey", &self.secret_access_key),
        ]
        .into_iter()
        .find_map(|(name, value)| is_populated(value.as_deref()).then_some(name))
    }
}

fn is_populated(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

impl fmt::Debug for SiteFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const REDACTED: &str = "[REDACTED]";
        f.debug_struct("SiteFields")
            .field("name", &self.name)
            .field("origin_type", &self.origin_type)
            .field("domain", &self.domain)
            .field("domain_type", &self.domain_type)
            .field("request_protocol", &self.request_protocol)
            .field("origin_protocol", &self.origin_protocol)
            .field("default_cache_ttl", &self.default_cache_ttl)
            .field("vary_support", &self.vary_support)
            .field("normalize_ae", &self.normalize_ae)
            .field("cors_rules", &self.cors_rules)
            .field(
                "onetime_url_secrets",
                &self
                    .onetime_url_secrets
                    .as_ref()
                    .map(|s| vec![REDACTED; s.len()]),
            )
            .field("origin", &self.origin)
            .field("host_header", &self.host_header)
            .field("bucket_name", &self.bucket_name)
            .field("s3_endpoint", &self.s3_endpoint)
            .field("s3_region", &self.s3_region)
            .field("doc_index", &self.doc_index)
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| REDACTED),
            )
            .finish()
    }
}

// ── CORS ─────────────────────────────────────────────────────────────

/// Cross-origin rule. A site carries at most one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CorsRule {
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub allows_any_origin: bool,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub allowed_origins: Vec<String>,
}

impl CorsRule {
    /// Allow requests from any origin.
    pub fn any_origin() -> Self {
        Self {
            allows_any_origin: true,
            allowed_origins: Vec::new(),
        }
    }

    /// Allow requests from the listed origins only.
    pub fn allow<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allows_any_origin: false,
            allowed_origins: origins.into_iter().map(Into::into).collect(),
        }
    }
}
