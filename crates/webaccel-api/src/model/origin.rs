// ── Origin union ──
//
// A site pulls from either a web server or an object-storage bucket. The
// wire form spreads both groups over one flat object keyed by `OriginType`;
// here each group is its own variant so the inactive one cannot be set.

use secrecy::SecretString;

use super::enums::{DocIndex, OriginType, parse_opt};
use super::secret;
use super::wire::SiteFields;
use crate::validate::ValidationError;

/// Upstream the CDN fetches uncached content from.
#[derive(Debug, Clone)]
pub enum Origin {
    WebServer(WebServerOrigin),
    ObjectStorage(ObjectStorageOrigin),
}

/// Web server origin (`OriginType` = `"0"`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebServerOrigin {
    /// Upstream host or URL.
    pub origin: Option<String>,
    /// `Host` header sent upstream.
    pub host_header: Option<String>,
}

/// Object-storage origin (`OriginType` = `"1"`).
#[derive(Debug, Clone, Default)]
pub struct ObjectStorageOrigin {
    pub bucket_name: Option<String>,
    pub s3_endpoint: Option<String>,
    pub s3_region: Option<String>,
    pub doc_index: Option<DocIndex>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<SecretString>,
}

impl Origin {
    /// Web server origin pointing at `origin`.
    pub fn web_server(origin: impl Into<String>) -> Self {
        Self::WebServer(WebServerOrigin {
            origin: Some(origin.into()),
            host_header: None,
        })
    }

    /// Object-storage origin for `bucket_name`.
    pub fn object_storage(bucket_name: impl Into<String>) -> Self {
        Self::ObjectStorage(ObjectStorageOrigin {
            bucket_name: Some(bucket_name.into()),
            ..ObjectStorageOrigin::default()
        })
    }

    pub fn origin_type(&self) -> OriginType {
        match self {
            Self::WebServer(_) => OriginType::WebServer,
            Self::ObjectStorage(_) => OriginType::ObjectStorage,
        }
    }

    /// Write this origin's field group into the flat form.
    ///
    /// `OriginType` is left to the caller.
    pub(crate) fn write_to(&self, fields: &mut SiteFields) {
        match self {
            Self::WebServer(web) => {
                fields.origin.clone_from(&web.origin);
                fields.host_header.clone_from(&web.host_header);
            }
            Self::ObjectStorage(storage) => {
                fields.bucket_name.clone_from(&storage.bucket_name);
                fields.s3_endpoint.clone_from(&storage.s3_endpoint);
                fields.s3_region.clone_from(&storage.s3_region);
                fields.doc_index = storage.doc_index.map(|d| d.to_string());
                fields.access_key_id.clone_from(&storage.access_key_id);
                fields.secret_access_key = secret::expose_opt(storage.secret_access_key.as_ref());
            }
        }
    }

    /// Move the origin group selected by `origin_type` out of the flat form.
    pub(crate) fn take_from(
        fields: &mut SiteFields,
        origin_type: OriginType,
    ) -> Result<Self, ValidationError> {
        fields.origin_type = None;
        Ok(match origin_type {
            OriginType::WebServer => Self::WebServer(WebServerOrigin {
                origin: non_empty(fields.origin.take()),
                host_header: non_empty(fields.host_header.take()),
            }),
            OriginType::ObjectStorage => Self::ObjectStorage(ObjectStorageOrigin {
                bucket_name: non_empty(fields.bucket_name.take()),
                s3_endpoint: non_empty(fields.s3_endpoint.take()),
                s3_region: non_empty(fields.s3_region.take()),
                doc_index: parse_opt(fields.doc_index.take().as_deref())?,
                access_key_id: non_empty(fields.access_key_id.take()),
                secret_access_key: non_empty(fields.secret_access_key.take())
                    .map(SecretString::from),
            }),
        })
    }
}

impl From<WebServerOrigin> for Origin {
    fn from(origin: WebServerOrigin) -> Self {
        Self::WebServer(origin)
    }
}

impl From<ObjectStorageOrigin> for Origin {
    fn from(origin: ObjectStorageOrigin) -> Self {
        Self::ObjectStorage(origin)
    }
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
