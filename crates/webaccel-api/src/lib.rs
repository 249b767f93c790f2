// webaccel-api: Typed schema and async client for the web accelerator (CDN) management API

pub mod client;
pub mod error;
pub mod model;
pub mod transport;
pub mod validate;

pub use client::{DEFAULT_API_URL, WebAccelClient};
pub use error::Error;
pub use model::{
    AclResult, CacheTtl, CorsRule, CreateOrUpdateCertificateRequest, CreateSiteRequest,
    DeleteAllCacheRequest, DeleteCacheRequest, DeleteCacheResult, DocIndex, DomainType,
    ListSitesResult, NormalizeAcceptEncoding, ObjectStorageOrigin, Origin,
    OriginGuardTokenResponse, OriginProtocol, OriginType, RequestProtocol, Site, SiteFields,
    SiteStatus, UpdateSiteRequest, UpdateSiteStatusRequest, VarySupport, WebServerOrigin,
    WireEnum,
};
pub use transport::{TlsRoots, TransportConfig};
pub use validate::{Rule, ValidationError, validate_create, validate_status, validate_update};
