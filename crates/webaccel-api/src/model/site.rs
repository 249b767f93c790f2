// Site response types
//
// Fields use `#[serde(default)]` liberally and read `null` as the default:
// the API omits or nulls empty values and adds fields over time. Enumerated
// settings stay as raw strings here and are parsed on demand by the typed
// accessors.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use super::cache_ttl::CacheTtl;
use super::enums::{
    DomainType, NormalizeAcceptEncoding, OriginProtocol, OriginType, RequestProtocol, SiteStatus,
    VarySupport, WireEnum, parse_opt,
};
use super::lenient::null_as_default;
use super::secret;
use super::wire::CorsRule;
use crate::validate::ValidationError;

/// A configured CDN site, as returned by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Site {
    #[serde(rename = "ID", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subdomain: String,
    #[serde(rename = "ASCIIDomain", default, deserialize_with = "null_as_default")]
    pub ascii_domain: String,
    /// `enabled` or `disabled`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_certificate: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_old_certificate: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gib_sent_in_last_week: i64,
    /// Unix seconds.
    #[serde(default, deserialize_with = "null_as_default")]
    pub cert_valid_not_before: i64,
    /// Unix seconds.
    #[serde(default, deserialize_with = "null_as_default")]
    pub cert_valid_not_after: i64,
    /// ISO 8601 date-time.
    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub request_protocol: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub origin_protocol: String,
    #[serde(rename = "DefaultCacheTTL", default)]
    pub default_cache_ttl: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vary_support: String,
    #[serde(rename = "NormalizeAE", default, deserialize_with = "null_as_default")]
    pub normalize_ae: String,
    #[serde(rename = "CORSRules", default, deserialize_with = "null_as_default")]
    pub cors_rules: Vec<CorsRule>,
    /// Never re-serialized.
    #[serde(
        rename = "OnetimeURLSecrets",
        default,
        deserialize_with = "deserialize_secrets",
        skip_serializing
    )]
    pub onetime_url_secrets: Vec<SecretString>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub origin_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub origin: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub host_header: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bucket_name: String,
    #[serde(rename = "S3Endpoint", default, deserialize_with = "null_as_default")]
    pub s3_endpoint: String,
    #[serde(rename = "S3Region", default, deserialize_with = "null_as_default")]
    pub s3_region: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub doc_index: String,
    #[serde(rename = "AccessKeyID", default, deserialize_with = "null_as_default")]
    pub access_key_id: String,
    /// Never re-serialized.
    #[serde(default, deserialize_with = "secret::deserialize_opt", skip_serializing)]
    pub secret_access_key: Option<SecretString>,

    /// Catch-all for fields not modeled above.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Site {
    pub fn status(&self) -> Result<Option<SiteStatus>, ValidationError> {
        parse_opt(Some(self.status.as_str()))
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self.status(), Ok(Some(SiteStatus::Enabled)))
    }

    pub fn origin_type(&self) -> Result<Option<OriginType>, ValidationError> {
        parse_opt(Some(self.origin_type.as_str()))
    }

    pub fn domain_type(&self) -> Result<Option<DomainType>, ValidationError> {
        parse_opt(Some(self.domain_type.as_str()))
    }

    pub fn request_protocol(&self) -> Result<Option<RequestProtocol>, ValidationError> {
        parse_opt(Some(self.request_protocol.as_str()))
    }

    pub fn origin_protocol(&self) -> Result<Option<OriginProtocol>, ValidationError> {
        parse_opt(Some(self.origin_protocol.as_str()))
    }

    pub fn vary_support(&self) -> Result<Option<VarySupport>, ValidationError> {
        parse_opt(Some(self.vary_support.as_str()))
    }

    pub fn normalize_accept_encoding(
        &self,
    ) -> Result<Option<NormalizeAcceptEncoding>, ValidationError> {
        parse_opt(Some(self.normalize_ae.as_str()))
    }

    pub fn default_cache_ttl(&self) -> Result<Option<CacheTtl>, ValidationError> {
        self.default_cache_ttl.map(CacheTtl::new).transpose()
    }

    /// Host clients should use: the custom domain, else the subdomain.
    pub fn serving_domain(&self) -> &str {
        match self.domain_type() {
            Ok(Some(DomainType::OwnDomain)) if !self.domain.is_empty() => &self.domain,
            _ if !self.subdomain.is_empty() => &self.subdomain,
            _ => &self.domain,
        }
    }

    /// Upstream summary for display: the origin host, or the bucket.
    pub fn origin_summary(&self) -> String {
        match self.origin_type() {
            Ok(Some(OriginType::ObjectStorage)) => format!("s3://{}", self.bucket_name),
            Ok(Some(OriginType::WebServer)) => self.origin.clone(),
            _ => {
                let raw = self.origin_type.as_str();
                format!("(unknown {} {raw:?})", OriginType::FIELD)
            }
        }
    }
}

fn deserialize_secrets<'de, D>(de: D) -> Result<Vec<SecretString>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<Vec<String>> = Option::deserialize(de)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(SecretString::from)
        .collect())
}

/// `GET site` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListSitesResult {
    /// Total count of sites.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub total: u32,
    /// Current page number.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub from: u32,
    /// Count of sites on this page.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub count: u32,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub sites: Vec<Site>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(v: &u32) -> bool {
    *v == 0
}
