// ── Typed site requests ──
//
// Each request serializes through `SiteFields` and deserializes through it
// with validation, so a decoded request always satisfies the site rules.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::cache_ttl::CacheTtl;
use super::enums::{
    DomainType, NormalizeAcceptEncoding, OriginProtocol, OriginType, RequestProtocol, SiteStatus,
    VarySupport, parse_opt,
};
use super::origin::{Origin, non_empty};
use super::wire::{CorsRule, SiteFields};
use crate::validate::{
    ValidationError, resolve_origin_type, validate_create, validate_status, validate_update,
};

// ── Create ─────────────────────────────────────────────────────────

/// `POST site` body. Every field is optional at this layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(into = "SiteFields", try_from = "SiteFields")]
pub struct CreateSiteRequest {
    pub name: Option<String>,
    /// Custom domain; only for `DomainType::OwnDomain`.
    pub domain: Option<String>,
    pub domain_type: Option<DomainType>,
    pub request_protocol: Option<RequestProtocol>,
    pub origin_protocol: Option<OriginProtocol>,
    pub default_cache_ttl: Option<CacheTtl>,
    pub vary_support: Option<VarySupport>,
    pub normalize_accept_encoding: Option<NormalizeAcceptEncoding>,
    pub origin: Option<Origin>,
}

impl CreateSiteRequest {
    /// Re-run the wire checks against this request.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_create(&SiteFields::from(self.clone()))
    }
}

impl From<CreateSiteRequest> for SiteFields {
    fn from(req: CreateSiteRequest) -> Self {
        let mut fields = SiteFields {
            name: req.name,
            domain: req.domain,
            domain_type: req.domain_type.map(|v| v.to_string()),
            origin_type: req.origin.as_ref().map(|o| o.origin_type().to_string()),
            ..SiteFields::default()
        };
        write_common(
            &mut fields,
            Common {
                request_protocol: req.request_protocol,
                origin_protocol: req.origin_protocol,
                default_cache_ttl: req.default_cache_ttl,
                vary_support: req.vary_support,
                normalize_accept_encoding: req.normalize_accept_encoding,
                origin: req.origin,
            },
        );
        fields
    }
}

impl TryFrom<SiteFields> for CreateSiteRequest {
    type Error = ValidationError;

    fn try_from(mut fields: SiteFields) -> Result<Self, Self::Error> {
        validate_create(&fields)?;
        let common = read_common(&mut fields)?;
        Ok(Self {
            name: non_empty(fields.name),
            domain: non_empty(fields.domain),
            domain_type: parse_opt(fields.domain_type.as_deref())?,
            request_protocol: common.request_protocol,
            origin_protocol: common.origin_protocol,
            default_cache_ttl: common.default_cache_ttl,
            vary_support: common.vary_support,
            normalize_accept_encoding: common.normalize_accept_encoding,
            origin: common.origin,
        })
    }
}

// ── Update ─────────────────────────────────────────────────────────

/// `PUT site/{id}` body. `None` leaves a setting unchanged.
///
/// `cors_rules` and `onetime_url_secrets` distinguish `None` (unchanged)
/// from `Some(vec![])` (clear).
///
/// `origin` edits fields within a group; `OriginType` goes on the wire only
/// when `origin_type` is set, so changing `HostHeader` alone does not
/// switch the site's origin kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(into = "SiteFields", try_from = "SiteFields")]
pub struct UpdateSiteRequest {
    pub name: Option<String>,
    pub origin_type: Option<OriginType>,
    pub request_protocol: Option<RequestProtocol>,
    pub origin_protocol: Option<OriginProtocol>,
    pub default_cache_ttl: Option<CacheTtl>,
    pub vary_support: Option<VarySupport>,
    pub normalize_accept_encoding: Option<NormalizeAcceptEncoding>,
    /// At most one rule.
    pub cors_rules: Option<Vec<CorsRule>>,
    pub onetime_url_secrets: Option<Vec<SecretString>>,
    pub origin: Option<Origin>,
}

impl UpdateSiteRequest {
    /// Re-run the wire checks against this request.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_update(&SiteFields::from(self.clone()))
    }

    /// Set `origin` and declare its `OriginType`.
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin_type = Some(origin.origin_type());
        self.origin = Some(origin);
        self
    }

    /// Remove the site's CORS rule.
    pub fn clear_cors_rules(mut self) -> Self {
        self.cors_rules = Some(Vec::new());
        self
    }

    /// Remove every one-time URL secret.
    pub fn clear_onetime_url_secrets(mut self) -> Self {
        self.onetime_url_secrets = Some(Vec::new());
        self
    }
}

impl From<UpdateSiteRequest> for SiteFields {
    fn from(req: UpdateSiteRequest) -> Self {
        let mut fields = SiteFields {
            name: req.name,
            origin_type: req.origin_type.map(|v| v.to_string()),
            cors_rules: req.cors_rules,
            onetime_url_secrets: req.onetime_url_secrets.map(|secrets| {
                secrets
                    .iter()
                    .map(|s| s.expose_secret().to_owned())
                    .collect()
            }),
            ..SiteFields::default()
        };
        write_common(
            &mut fields,
            Common {
                request_protocol: req.request_protocol,
                origin_protocol: req.origin_protocol,
                default_cache_ttl: req.default_cache_ttl,
                vary_support: req.vary_support,
                normalize_accept_encoding: req.normalize_accept_encoding,
                origin: req.origin,
            },
        );
        fields
    }
}

impl TryFrom<SiteFields> for UpdateSiteRequest {
    type Error = ValidationError;

    fn try_from(mut fields: SiteFields) -> Result<Self, Self::Error> {
        validate_update(&fields)?;
        let origin_type = parse_opt(fields.origin_type.as_deref())?;
        let common = read_common(&mut fields)?;
        Ok(Self {
            name: non_empty(fields.name),
            origin_type,
            request_protocol: common.request_protocol,
            origin_protocol: common.origin_protocol,
            default_cache_ttl: common.default_cache_ttl,
            vary_support: common.vary_support,
            normalize_accept_encoding: common.normalize_accept_encoding,
            cors_rules: fields.cors_rules,
            onetime_url_secrets: fields
                .onetime_url_secrets
                .map(|secrets| secrets.into_iter().map(SecretString::from).collect()),
            origin: common.origin,
        })
    }
}

// ── Shared plumbing ────────────────────────────────────────────────

struct Common {
    request_protocol: Option<RequestProtocol>,
    origin_protocol: Option<OriginProtocol>,
    default_cache_ttl: Option<CacheTtl>,
    vary_support: Option<VarySupport>,
    normalize_accept_encoding: Option<NormalizeAcceptEncoding>,
    origin: Option<Origin>,
}

fn write_common(fields: &mut SiteFields, common: Common) {
    fields.request_protocol = common.request_protocol.map(|v| v.to_string());
    fields.origin_protocol = common.origin_protocol.map(|v| v.to_string());
    fields.default_cache_ttl = common.default_cache_ttl.map(CacheTtl::get);
    fields.vary_support = common.vary_support.map(|v| v.to_string());
    fields.normalize_ae = common.normalize_accept_encoding.map(|v| v.to_string());
    if let Some(origin) = &common.origin {
        origin.write_to(fields);
    }
}

fn read_common(fields: &mut SiteFields) -> Result<Common, ValidationError> {
    let origin = match resolve_origin_type(fields)? {
        Some(origin_type) => Some(Origin::take_from(fields, origin_type)?),
        None => None,
    };
    Ok(Common {
        request_protocol: parse_opt(fields.request_protocol.as_deref())?,
        origin_protocol: parse_opt(fields.origin_protocol.as_deref())?,
        default_cache_ttl: fields.default_cache_ttl.map(CacheTtl::new).transpose()?,
        vary_support: parse_opt(fields.vary_support.as_deref())?,
        normalize_accept_encoding: parse_opt(fields.normalize_ae.as_deref())?,
        origin,
    })
}

// ── Status ─────────────────────────────────────────────────────────

/// `PUT site/{id}/status` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSiteStatusRequest {
    #[serde(rename = "Status")]
    pub status: SiteStatus,
}

impl UpdateSiteStatusRequest {
    pub fn new(status: SiteStatus) -> Self {
        Self { status }
    }

    pub fn enable() -> Self {
        Self::new(SiteStatus::Enabled)
    }

    pub fn disable() -> Self {
        Self::new(SiteStatus::Disabled)
    }
}

impl TryFrom<&str> for UpdateSiteStatusRequest {
    type Error = ValidationError;

    fn try_from(raw: &str) -> Result<Self, Self::Error> {
        validate_status(raw).map(Self::new)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;
    use serde_json::json;

    use super::*;
    use crate::model::{DocIndex, ObjectStorageOrigin, OriginType, WebServerOrigin};
    use crate::validate::Rule;

    #[test]
    fn web_server_create_round_trip_leaves_storage_absent() {
        let req = CreateSiteRequest {
            name: Some("blog".into()),
            domain_type: Some(DomainType::Subdomain),
            request_protocol: Some(RequestProtocol::RedirectToHttps),
            origin_protocol: Some(OriginProtocol::Https),
            default_cache_ttl: Some(CacheTtl::new(3600).unwrap()),
            origin: Some(Origin::WebServer(WebServerOrigin {
                origin: Some("origin.example.com".into()),
                host_header: Some("www.example.com".into()),
            })),
            ..CreateSiteRequest::default()
        };

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({
                "Name": "blog",
                "OriginType": "0",
                "DomainType": "subdomain",
                "RequestProtocol": "2",
                "OriginProtocol": "https",
                "DefaultCacheTTL": 3600,
                "Origin": "origin.example.com",
                "HostHeader": "www.example.com",
            })
        );

        let back: CreateSiteRequest = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(serde_json::to_value(&back).unwrap(), value);
        let Some(Origin::WebServer(web)) = back.origin else {
            panic!("expected web server origin");
        };
        assert_eq!(web.host_header.as_deref(), Some("www.example.com"));
        let fields = SiteFields::from(CreateSiteRequest {
            origin: Some(Origin::WebServer(web)),
            ..CreateSiteRequest::default()
        });
        assert_eq!(fields.first_object_storage_field(), None);
        assert_eq!(fields.bucket_name, None);
    }

    #[test]
    fn object_storage_create_serializes_its_group() {
        let req = CreateSiteRequest {
            origin: Some(Origin::ObjectStorage(ObjectStorageOrigin {
                bucket_name: Some("assets".into()),
                s3_endpoint: Some("s3.isk01.example.jp".into()),
                s3_region: Some("jp-north-1".into()),
                doc_index: Some(DocIndex::Enabled),
                access_key_id: Some("AKID".into()),
                secret_access_key: Some(SecretString::from("s3cr3t".to_owned())),
            })),
            ..CreateSiteRequest::default()
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "OriginType": "1",
                "BucketName": "assets",
                "S3Endpoint": "s3.isk01.example.jp",
                "S3Region": "jp-north-1",
                "DocIndex": "1",
                "AccessKeyID": "AKID",
                "SecretAccessKey": "s3cr3t",
            })
        );
    }

    #[test]
    fn decoding_rejects_contradictory_origin() {
        let err = serde_json::from_value::<CreateSiteRequest>(json!({
            "OriginType": "1",
            "Origin": "origin.example.com",
        }))
        .unwrap_err();
        assert!(err.to_string().contains("Origin"), "{err}");
    }

    #[test]
    fn decoding_infers_origin_type() {
        let req: UpdateSiteRequest =
            serde_json::from_value(json!({ "HostHeader": "www.example.com" })).unwrap();
        assert_eq!(
            req.origin.as_ref().map(Origin::origin_type),
            Some(OriginType::WebServer)
        );
    }

    #[test]
    fn update_keeps_origin_type_absent_unless_declared() {
        let value = json!({ "HostHeader": "www.example.com" });
        let req: UpdateSiteRequest = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(req.origin_type, None);
        assert_eq!(serde_json::to_value(&req).unwrap(), value);

        let value = json!({ "OriginType": "1", "S3Region": "jp-north-1" });
        let req: UpdateSiteRequest = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(req.origin_type, Some(OriginType::ObjectStorage));
        assert_eq!(serde_json::to_value(&req).unwrap(), value);

        let req = UpdateSiteRequest::default().with_origin(Origin::web_server("o.example.com"));
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "OriginType": "0", "Origin": "o.example.com" })
        );
    }

    #[test]
    fn typed_update_rejects_origin_type_mismatch() {
        let req = UpdateSiteRequest {
            origin_type: Some(OriginType::ObjectStorage),
            origin: Some(Origin::web_server("o.example.com")),
            ..UpdateSiteRequest::default()
        };
        let err = req.validate().unwrap_err();
        assert_eq!(err.field(), "Origin");
    }

    #[test]
    fn decoding_rejects_bad_enum_and_ttl() {
        assert!(serde_json::from_value::<CreateSiteRequest>(json!({ "VarySupport": "2" })).is_err());
        assert!(
            serde_json::from_value::<UpdateSiteRequest>(json!({ "DefaultCacheTTL": -2 })).is_err()
        );
    }

    #[test]
    fn update_distinguishes_absent_from_empty_cors_rules() {
        let untouched = UpdateSiteRequest {
            name: Some("renamed".into()),
            ..UpdateSiteRequest::default()
        };
        let cleared = untouched.clone().clear_cors_rules();

        let untouched = serde_json::to_value(&untouched).unwrap();
        let cleared = serde_json::to_value(&cleared).unwrap();
        assert!(untouched.get("CORSRules").is_none());
        assert_eq!(cleared["CORSRules"], json!([]));
    }

    #[test]
    fn update_onetime_secrets_three_states() {
        let absent = serde_json::to_value(UpdateSiteRequest::default()).unwrap();
        assert_eq!(absent, json!({}));

        let cleared =
            serde_json::to_value(UpdateSiteRequest::default().clear_onetime_url_secrets()).unwrap();
        assert_eq!(cleared, json!({ "OnetimeURLSecrets": [] }));

        let req: UpdateSiteRequest =
            serde_json::from_value(json!({ "OnetimeURLSecrets": ["a", "b"] })).unwrap();
        let secrets = req.onetime_url_secrets.unwrap();
        let exposed: Vec<&str> = secrets.iter().map(|s| s.expose_secret()).collect();
        assert_eq!(exposed, vec!["a", "b"]);
    }

    #[test]
    fn typed_update_validates_cors_cardinality() {
        let req = UpdateSiteRequest {
            cors_rules: Some(vec![CorsRule::any_origin(), CorsRule::any_origin()]),
            ..UpdateSiteRequest::default()
        };
        let err = req.validate().unwrap_err();
        assert_eq!(err.rule(), &Rule::TooManyItems { max: 1, got: 2 });

        let req = UpdateSiteRequest {
            cors_rules: Some(vec![CorsRule::allow(["https://a.example"])]),
            ..UpdateSiteRequest::default()
        };
        req.validate().unwrap();
    }

    #[test]
    fn update_rejects_domain_fields_on_decode() {
        assert!(
            serde_json::from_value::<UpdateSiteRequest>(json!({ "DomainType": "subdomain" }))
                .is_err()
        );
    }

    #[test]
    fn status_request_wire_shape() {
        assert_eq!(
            serde_json::to_value(UpdateSiteStatusRequest::disable()).unwrap(),
            json!({ "Status": "disabled" })
        );
        let req: UpdateSiteStatusRequest =
            serde_json::from_value(json!({ "Status": "enabled" })).unwrap();
        assert_eq!(req, UpdateSiteStatusRequest::enable());
        assert!(serde_json::from_value::<UpdateSiteStatusRequest>(json!({ "Status": "on" })).is_err());
    }

    #[test]
    fn status_request_from_str() {
        assert!(UpdateSiteStatusRequest::try_from("disabled").is_ok());
        for bad in ["Enabled", "", "on"] {
            assert!(UpdateSiteStatusRequest::try_from(bad).is_err());
        }
    }
}
