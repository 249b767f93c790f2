// ── String-encoded enums ──
//
// The API transmits every enumerated setting as a string literal ("0", "1",
// "http", "own_domain", ...). Each enum below is a closed set whose variants
// map to exactly one literal; parsing is case-sensitive and anything else is
// an `InvalidField` error. Numeric-looking literals carry no ordering.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};

use crate::validate::{Rule, ValidationError};

/// A setting transmitted as one of a fixed set of string literals.
pub trait WireEnum:
    Sized + Copy + std::str::FromStr + Into<&'static str> + VariantNames + 'static
{
    /// Wire name of the field this enum populates.
    const FIELD: &'static str;

    /// The exact literal sent on the wire.
    fn literal(self) -> &'static str {
        self.into()
    }

    /// Parse a wire literal, reporting the offending field on mismatch.
    fn parse_field(raw: &str) -> Result<Self, ValidationError> {
        raw.parse().map_err(|_| ValidationError::InvalidField {
            field: Self::FIELD,
            rule: Rule::OneOf {
                got: raw.to_owned(),
                allowed: Self::VARIANTS,
            },
        })
    }
}

macro_rules! wire_enum {
    ($ty:ty, $field:literal) => {
        impl WireEnum for $ty {
            const FIELD: &'static str = $field;
        }

        impl TryFrom<String> for $ty {
            type Error = ValidationError;

            fn try_from(raw: String) -> Result<Self, Self::Error> {
                Self::parse_field(&raw)
            }
        }
    };
}

/// Where the CDN fetches uncached content from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
    VariantNames,
    EnumIter,
)]
#[serde(try_from = "String", into = "&'static str")]
pub enum OriginType {
    #[strum(to_string = "0")]
    WebServer,
    #[strum(to_string = "1")]
    ObjectStorage,
}
wire_enum!(OriginType, "OriginType");

/// Whether the site is served from a custom domain or a provided subdomain.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
    VariantNames,
    EnumIter,
)]
#[serde(try_from = "String", into = "&'static str")]
pub enum DomainType {
    #[strum(to_string = "own_domain")]
    OwnDomain,
    #[strum(to_string = "subdomain")]
    Subdomain,
}
wire_enum!(DomainType, "DomainType");

/// Which client-facing protocols the site accepts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
    VariantNames,
    EnumIter,
)]
#[serde(try_from = "String", into = "&'static str")]
pub enum RequestProtocol {
    /// Serve both http and https.
    #[strum(to_string = "0")]
    HttpAndHttps,
    /// Serve https only.
    #[strum(to_string = "1")]
    HttpsOnly,
    /// Redirect http to https.
    #[strum(to_string = "2")]
    RedirectToHttps,
}
wire_enum!(RequestProtocol, "RequestProtocol");

/// Protocol used between the CDN and the origin.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
    VariantNames,
    EnumIter,
)]
#[serde(try_from = "String", into = "&'static str")]
pub enum OriginProtocol {
    #[strum(to_string = "http")]
    Http,
    #[strum(to_string = "https")]
    Https,
}
wire_enum!(OriginProtocol, "OriginProtocol");

/// Whether cache keys are split by the origin's `Vary` header.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
    VariantNames,
    EnumIter,
)]
#[serde(try_from = "String", into = "&'static str")]
pub enum VarySupport {
    #[strum(to_string = "0")]
    Disabled,
    #[strum(to_string = "1")]
    Enabled,
}
wire_enum!(VarySupport, "VarySupport");

/// How `Accept-Encoding` is normalized before the cache lookup.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
    VariantNames,
    EnumIter,
)]
#[serde(try_from = "String", into = "&'static str")]
pub enum NormalizeAcceptEncoding {
    /// Normalize to `gzip`.
    #[strum(to_string = "1")]
    Gzip,
    /// Normalize to the `br` + `gzip` pair.
    #[strum(to_string = "3")]
    BrotliAndGzip,
}
wire_enum!(NormalizeAcceptEncoding, "NormalizeAE");

/// Whether an object-storage origin serves `index.html` for directory paths.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
    VariantNames,
    EnumIter,
)]
#[serde(try_from = "String", into = "&'static str")]
pub enum DocIndex {
    #[strum(to_string = "0")]
    Disabled,
    #[strum(to_string = "1")]
    Enabled,
}
wire_enum!(DocIndex, "DocIndex");

/// Site activation state.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
    VariantNames,
    EnumIter,
)]
#[serde(try_from = "String", into = "&'static str")]
pub enum SiteStatus {
    #[strum(to_string = "enabled")]
    Enabled,
    #[strum(to_string = "disabled")]
    Disabled,
}
wire_enum!(SiteStatus, "Status");

/// Parse an optional wire literal. Empty strings count as absent, matching
/// the API's omit-on-empty convention.
pub(crate) fn parse_opt<T: WireEnum>(raw: Option<&str>) -> Result<Option<T>, ValidationError> {
    match raw {
        None | Some("") => Ok(None),
        Some(raw) => T::parse_field(raw).map(Some),
    }
}
