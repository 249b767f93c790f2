// ── Schema types ──
//
// Request and response shapes for the web accelerator API. Requests are
// typed (closed enums, tagged origin union, range-checked TTL) and cross the
// wire through the flat `SiteFields` form; responses are decoded leniently.

pub mod acl;
pub mod cache;
pub mod cache_ttl;
pub mod certificate;
pub mod enums;
pub(crate) mod lenient;
pub mod origin;
pub mod origin_guard;
pub mod requests;
pub(crate) mod secret;
pub mod site;
pub mod wire;

pub use acl::AclResult;
pub use cache::{DeleteAllCacheRequest, DeleteCacheRequest, DeleteCacheResult};
pub use cache_ttl::CacheTtl;
pub use certificate::CreateOrUpdateCertificateRequest;
pub use enums::{
    DocIndex, DomainType, NormalizeAcceptEncoding, OriginProtocol, OriginType, RequestProtocol,
    SiteStatus, VarySupport, WireEnum,
};
pub use origin::{ObjectStorageOrigin, Origin, WebServerOrigin};
pub use origin_guard::OriginGuardTokenResponse;
pub use requests::{CreateSiteRequest, UpdateSiteRequest, UpdateSiteStatusRequest};
pub use site::{ListSitesResult, Site};
pub use wire::{CorsRule, SiteFields};
