// Pre-transmission validation
//
// Checks run against the flat wire form (`SiteFields`) so that anything a
// caller could put on the wire, including raw JSON loaded from disk, goes
// through the same rules. Typed requests are converted to the wire form
// and checked by the same functions.

use thiserror::Error;

use crate::model::enums::parse_opt;
use crate::model::{
    CacheTtl, CorsRule, DocIndex, DomainType, NormalizeAcceptEncoding, OriginProtocol, OriginType,
    RequestProtocol, SiteFields, SiteStatus, VarySupport, WireEnum,
};

/// Maximum number of entries in `CORSRules`.
pub const MAX_CORS_RULES: usize = 1;

/// A request payload failed a local check and was not sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid value for {field}: {rule}")]
    InvalidField { field: &'static str, rule: Rule },
}

impl ValidationError {
    pub(crate) fn new(field: &'static str, rule: Rule) -> Self {
        Self::InvalidField { field, rule }
    }

    /// Wire name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidField { field, .. } => field,
        }
    }

    /// The rule the field violated.
    pub fn rule(&self) -> &Rule {
        match self {
            Self::InvalidField { rule, .. } => rule,
        }
    }
}

/// The rule behind a [`ValidationError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rule {
    #[error("{got:?} is not one of: {}", .allowed.join(", "))]
    OneOf {
        got: String,
        allowed: &'static [&'static str],
    },

    #[error("{got} is outside {min}..={max}")]
    Range { got: i64, min: i64, max: i64 },

    #[error("not applicable when OriginType is {origin_type:?}")]
    InactiveOriginGroup { origin_type: OriginType },

    #[error("web server and object storage origin fields cannot be combined")]
    MixedOriginGroups,

    #[error("at most {max} item(s) allowed, got {got}")]
    TooManyItems { max: usize, got: usize },

    #[error("cannot be combined with {other}")]
    ConflictsWith { other: &'static str },

    #[error("not accepted in a {request} request")]
    NotAccepted { request: &'static str },
}

// ── Site requests ────────────────────────────────────────────────────

/// Check a site creation payload.
///
/// No field is required here; the API enforces cross-field requiredness
/// (e.g. `Origin` for a web server origin).
pub fn validate_create(fields: &SiteFields) -> Result<(), ValidationError> {
    reject_present(fields.cors_rules.is_some(), "CORSRules", "create")?;
    reject_present(
        fields.onetime_url_secrets.is_some(),
        "OnetimeURLSecrets",
        "create",
    )?;
    check_enum::<DomainType>(fields.domain_type.as_deref())?;
    check_common(fields)
}

/// Check a site update payload.
///
/// An absent field leaves the site setting unchanged. `CORSRules` and
/// `OnetimeURLSecrets` are passed through as given: absent, empty (clear)
/// or populated (replace).
pub fn validate_update(fields: &SiteFields) -> Result<(), ValidationError> {
    reject_present(is_set(fields.domain.as_deref()), "Domain", "update")?;
    reject_present(is_set(fields.domain_type.as_deref()), "DomainType", "update")?;
    check_common(fields)?;
    if let Some(rules) = &fields.cors_rules {
        check_cors_rules(rules)?;
    }
    Ok(())
}

/// Parse a site status, accepting exactly `"enabled"` or `"disabled"`.
pub fn validate_status(raw: &str) -> Result<SiteStatus, ValidationError> {
    SiteStatus::parse_field(raw)
}

fn check_common(fields: &SiteFields) -> Result<(), ValidationError> {
    check_enum::<RequestProtocol>(fields.request_protocol.as_deref())?;
    check_enum::<OriginProtocol>(fields.origin_protocol.as_deref())?;
    check_enum::<VarySupport>(fields.vary_support.as_deref())?;
    check_enum::<NormalizeAcceptEncoding>(fields.normalize_ae.as_deref())?;
    check_enum::<DocIndex>(fields.doc_index.as_deref())?;
    if let Some(ttl) = fields.default_cache_ttl {
        CacheTtl::new(ttl)?;
    }
    resolve_origin_type(fields)?;
    Ok(())
}

/// Work out which origin group a payload targets.
///
/// With `OriginType` present, populating the other group is an error.
/// Without it, the populated group decides; populating both is an error.
pub(crate) fn resolve_origin_type(
    fields: &SiteFields,
) -> Result<Option<OriginType>, ValidationError> {
    let declared = parse_opt::<OriginType>(fields.origin_type.as_deref())?;
    let web = fields.first_web_server_field();
    let storage = fields.first_object_storage_field();

    match (declared, web, storage) {
        (Some(origin_type @ OriginType::WebServer), _, Some(field))
        | (Some(origin_type @ OriginType::ObjectStorage), Some(field), _) => Err(
            ValidationError::new(field, Rule::InactiveOriginGroup { origin_type }),
        ),
        (Some(origin_type), _, _) => Ok(Some(origin_type)),
        (None, Some(_), Some(field)) => Err(ValidationError::new(field, Rule::MixedOriginGroups)),
        (None, Some(_), None) => Ok(Some(OriginType::WebServer)),
        (None, None, Some(_)) => Ok(Some(OriginType::ObjectStorage)),
        (None, None, None) => Ok(None),
    }
}

fn check_cors_rules(rules: &[CorsRule]) -> Result<(), ValidationError> {
    if rules.len() > MAX_CORS_RULES {
        return Err(ValidationError::new(
            "CORSRules",
            Rule::TooManyItems {
                max: MAX_CORS_RULES,
                got: rules.len(),
            },
        ));
    }
    for rule in rules {
        if rule.allows_any_origin && !rule.allowed_origins.is_empty() {
            return Err(ValidationError::new(
                "AllowedOrigins",
                Rule::ConflictsWith {
                    other: "AllowsAnyOrigin",
                },
            ));
        }
    }
    Ok(())
}

fn check_enum<T: WireEnum>(raw: Option<&str>) -> Result<(), ValidationError> {
    parse_opt::<T>(raw).map(|_| ())
}

fn reject_present(
    present: bool,
    field: &'static str,
    request: &'static str,
) -> Result<(), ValidationError> {
    if present {
        return Err(ValidationError::new(field, Rule::NotAccepted { request }));
    }
    Ok(())
}

fn is_set(raw: Option<&str>) -> bool {
    raw.is_some_and(|s| !s.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn fields(json: serde_json::Value) -> SiteFields {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn empty_payload_is_valid() {
        let f = SiteFields::default();
        validate_create(&f).unwrap();
        validate_update(&f).unwrap();
    }

    #[test]
    fn every_enum_field_rejects_unknown_literal() {
        let cases = [
            ("OriginType", "2"),
            ("RequestProtocol", "3"),
            ("OriginProtocol", "ftp"),
            ("VarySupport", "yes"),
            ("NormalizeAE", "2"),
            ("DocIndex", "on"),
        ];
        for (field, value) in cases {
            let f = fields(serde_json::json!({ field: value }));
            let err = validate_create(&f).unwrap_err();
            assert_eq!(err.field(), field, "create: {field}={value}");
            let err = validate_update(&f).unwrap_err();
            assert_eq!(err.field(), field, "update: {field}={value}");
        }

        let f = fields(serde_json::json!({ "DomainType": "custom" }));
        assert_eq!(validate_create(&f).unwrap_err().field(), "DomainType");
    }

    #[test]
    fn every_documented_literal_is_accepted() {
        let cases: [(&str, &[&str]); 7] = [
            ("OriginType", &["0", "1"]),
            ("RequestProtocol", &["0", "1", "2"]),
            ("OriginProtocol", &["http", "https"]),
            ("VarySupport", &["0", "1"]),
            ("NormalizeAE", &["1", "3"]),
            ("DocIndex", &["0", "1"]),
            ("DomainType", &["own_domain", "subdomain"]),
        ];
        for (field, values) in cases {
            for value in values {
                let f = fields(serde_json::json!({ field: value }));
                validate_create(&f).unwrap_or_else(|e| panic!("create: {field}={value}: {e}"));
                if field != "DomainType" {
                    validate_update(&f).unwrap_or_else(|e| panic!("update: {field}={value}: {e}"));
                }
            }
        }
    }

    #[test]
    fn cache_ttl_boundaries() {
        for ok in [-1, 0, 1, 604_800] {
            let f = fields(serde_json::json!({ "DefaultCacheTTL": ok }));
            validate_create(&f).unwrap();
            validate_update(&f).unwrap();
        }
        for bad in [-2, 604_801, i64::MIN] {
            let f = fields(serde_json::json!({ "DefaultCacheTTL": bad }));
            let err = validate_create(&f).unwrap_err();
            assert_eq!(err.field(), "DefaultCacheTTL");
            assert!(matches!(err.rule(), Rule::Range { got, .. } if *got == bad));
        }
    }

    #[test]
    fn status_accepts_exact_literals_only() {
        assert_eq!(validate_status("enabled").unwrap(), SiteStatus::Enabled);
        assert_eq!(validate_status("disabled").unwrap(), SiteStatus::Disabled);
        for bad in ["Enabled", "", "on", "DISABLED", " enabled"] {
            let err = validate_status(bad).unwrap_err();
            assert_eq!(err.field(), "Status");
        }
    }

    #[test]
    fn object_storage_with_web_server_fields_is_flagged() {
        let f = fields(serde_json::json!({
            "OriginType": "1",
            "Origin": "origin.example.com",
            "HostHeader": "www.example.com",
        }));
        let err = validate_create(&f).unwrap_err();
        assert_eq!(err.field(), "Origin");
        assert_eq!(
            err.rule(),
            &Rule::InactiveOriginGroup {
                origin_type: OriginType::ObjectStorage
            }
        );
    }

    #[test]
    fn web_server_with_bucket_is_flagged() {
        let f = fields(serde_json::json!({ "OriginType": "0", "BucketName": "assets" }));
        let err = validate_update(&f).unwrap_err();
        assert_eq!(err.field(), "BucketName");
    }

    #[test]
    fn origin_type_inferred_from_single_group() {
        let f = fields(serde_json::json!({ "Origin": "origin.example.com" }));
        assert_eq!(resolve_origin_type(&f).unwrap(), Some(OriginType::WebServer));

        let f = fields(serde_json::json!({ "S3Region": "jp-north-1" }));
        assert_eq!(
            resolve_origin_type(&f).unwrap(),
            Some(OriginType::ObjectStorage)
        );

        let f = fields(serde_json::json!({ "Origin": "o.example.com", "S3Region": "r" }));
        assert_eq!(
            validate_create(&f).unwrap_err().rule(),
            &Rule::MixedOriginGroups
        );
    }

    #[test]
    fn update_rejects_domain_changes() {
        let f = fields(serde_json::json!({ "Domain": "cdn.example.com" }));
        let err = validate_update(&f).unwrap_err();
        assert_eq!(err.field(), "Domain");
        assert_eq!(err.rule(), &Rule::NotAccepted { request: "update" });
    }

    #[test]
    fn create_rejects_update_only_lists() {
        let f = fields(serde_json::json!({ "CORSRules": [] }));
        assert_eq!(validate_create(&f).unwrap_err().field(), "CORSRules");

        let f = fields(serde_json::json!({ "OnetimeURLSecrets": ["s1"] }));
        assert_eq!(validate_create(&f).unwrap_err().field(), "OnetimeURLSecrets");
    }

    #[test]
    fn cors_rules_single_element() {
        let f = fields(serde_json::json!({ "CORSRules": [] }));
        validate_update(&f).unwrap();

        let f = fields(serde_json::json!({ "CORSRules": [{ "AllowsAnyOrigin": true }] }));
        validate_update(&f).unwrap();

        let f = fields(serde_json::json!({
            "CORSRules": [
                { "AllowsAnyOrigin": true },
                { "AllowedOrigins": ["https://a.example"] },
            ]
        }));
        let err = validate_update(&f).unwrap_err();
        assert_eq!(err.field(), "CORSRules");
        assert_eq!(err.rule(), &Rule::TooManyItems { max: 1, got: 2 });
    }

    #[test]
    fn cors_rule_cannot_mix_any_and_list() {
        let f = fields(serde_json::json!({
            "CORSRules": [{ "AllowsAnyOrigin": true, "AllowedOrigins": ["https://a.example"] }]
        }));
        assert_eq!(validate_update(&f).unwrap_err().field(), "AllowedOrigins");
    }
}
