// Web accelerator API HTTP client
//
// Wraps `reqwest::Client` with base-URL path construction, basic auth and
// response decoding. Every request body is validated before it is sent;
// non-2xx responses become `Error::Api`. No retries.

use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::model::{
    AclResult, CreateOrUpdateCertificateRequest, CreateSiteRequest, DeleteAllCacheRequest,
    DeleteCacheRequest, DeleteCacheResult, ListSitesResult, OriginGuardTokenResponse, Site,
    UpdateSiteRequest, UpdateSiteStatusRequest,
};
use crate::transport::TransportConfig;

/// Public endpoint of the web accelerator API.
pub const DEFAULT_API_URL: &str = "https://secure.sakura.ad.jp/cloud/zone/is1a/api/webaccel/1.0/";

/// Most site endpoints wrap their payload as `{"Site": {...}}`.
#[derive(serde::Deserialize)]
struct SiteEnvelope {
    #[serde(rename = "Site")]
    site: Site,
}

#[derive(serde::Deserialize)]
struct DeleteCacheEnvelope {
    #[serde(
        rename = "Results",
        default,
        deserialize_with = "crate::model::lenient::null_as_default"
    )]
    results: Vec<DeleteCacheResult>,
}

/// Error body shape used by the API for non-2xx responses.
#[derive(serde::Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    error_msg: Option<String>,
}

/// Async client for the web accelerator API.
pub struct WebAccelClient {
    http: reqwest::Client,
    base_url: Url,
    access_token: String,
    access_token_secret: SecretString,
}

impl WebAccelClient {
    /// Create a client from a `TransportConfig`.
    pub fn new(
        base_url: Url,
        access_token: impl Into<String>,
        access_token_secret: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, base_url, access_token, access_token_secret)
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        access_token: impl Into<String>,
        access_token_secret: SecretString,
    ) -> Result<Self, Error> {
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }
        Ok(Self {
            http,
            base_url,
            access_token: access_token.into(),
            access_token_secret,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Sites ────────────────────────────────────────────────────────

    /// `GET site`
    pub async fn list_sites(&self) -> Result<ListSitesResult, Error> {
        self.send(Method::GET, &["site"], None::<&()>).await
    }

    /// `GET site/{id}`
    pub async fn read_site(&self, id: &str) -> Result<Site, Error> {
        let env: SiteEnvelope = self.send(Method::GET, &["site", id], None::<&()>).await?;
        Ok(env.site)
    }

    /// `POST site`
    pub async fn create_site(&self, req: &CreateSiteRequest) -> Result<Site, Error> {
        req.validate()?;
        debug!(name = ?req.name, "creating site");
        let env: SiteEnvelope = self.send(Method::POST, &["site"], Some(req)).await?;
        Ok(env.site)
    }

    /// `PUT site/{id}`
    pub async fn update_site(&self, id: &str, req: &UpdateSiteRequest) -> Result<Site, Error> {
        req.validate()?;
        debug!(id, "updating site");
        let env: SiteEnvelope = self.send(Method::PUT, &["site", id], Some(req)).await?;
        Ok(env.site)
    }

    /// `PUT site/{id}/status`
    pub async fn update_site_status(
        &self,
        id: &str,
        req: &UpdateSiteStatusRequest,
    ) -> Result<Site, Error> {
        debug!(id, status = %req.status, "updating site status");
        let env: SiteEnvelope = self
            .send(Method::PUT, &["site", id, "status"], Some(req))
            .await?;
        Ok(env.site)
    }

    /// `DELETE site/{id}`
    pub async fn delete_site(&self, id: &str) -> Result<Site, Error> {
        debug!(id, "deleting site");
        let env: SiteEnvelope = self
            .send(Method::DELETE, &["site", id], None::<&()>)
            .await?;
        Ok(env.site)
    }

    // ── Cache ────────────────────────────────────────────────────────

    /// `POST deleteallcache`
    pub async fn delete_all_cache(&self, req: &DeleteAllCacheRequest) -> Result<(), Error> {
        debug!(domain = %req.domain, "purging all cache");
        self.send_unit(Method::POST, &["deleteallcache"], Some(req))
            .await
    }

    /// `POST deletecache`
    ///
    /// One result per URL, in request order. A failed URL does not fail
    /// the call.
    pub async fn delete_cache(
        &self,
        req: &DeleteCacheRequest,
    ) -> Result<Vec<DeleteCacheResult>, Error> {
        debug!(count = req.urls.len(), "purging cached URLs");
        let env: DeleteCacheEnvelope = self
            .send(Method::POST, &["deletecache"], Some(req))
            .await?;
        Ok(env.results)
    }

    // ── Certificates ─────────────────────────────────────────────────

    /// `POST site/{id}/certificate`
    pub async fn create_certificate(
        &self,
        id: &str,
        req: &CreateOrUpdateCertificateRequest,
    ) -> Result<(), Error> {
        debug!(id, "uploading certificate");
        self.send_unit(Method::POST, &["site", id, "certificate"], Some(req))
            .await
    }

    /// `PUT site/{id}/certificate`
    pub async fn update_certificate(
        &self,
        id: &str,
        req: &CreateOrUpdateCertificateRequest,
    ) -> Result<(), Error> {
        debug!(id, "replacing certificate");
        self.send_unit(Method::PUT, &["site", id, "certificate"], Some(req))
            .await
    }

    /// `DELETE site/{id}/certificate`
    pub async fn delete_certificate(&self, id: &str) -> Result<(), Error> {
        debug!(id, "deleting certificate");
        self.send_unit(Method::DELETE, &["site", id, "certificate"], None::<&()>)
            .await
    }

    // ── ACL ──────────────────────────────────────────────────────────

    /// `GET site/{id}/acl`
    pub async fn read_acl(&self, id: &str) -> Result<AclResult, Error> {
        self.send(Method::GET, &["site", id, "acl"], None::<&()>)
            .await
    }

    /// `PUT site/{id}/acl`
    pub async fn upsert_acl(&self, id: &str, acl: &AclResult) -> Result<AclResult, Error> {
        debug!(id, entries = acl.entries().count(), "writing ACL");
        self.send(Method::PUT, &["site", id, "acl"], Some(acl))
            .await
    }

    /// `DELETE site/{id}/acl`
    pub async fn delete_acl(&self, id: &str) -> Result<(), Error> {
        debug!(id, "deleting ACL");
        self.send_unit(Method::DELETE, &["site", id, "acl"], None::<&()>)
            .await
    }

    // ── Origin guard tokens ──────────────────────────────────────────

    /// `GET site/{id}/originguardtoken`
    pub async fn read_origin_guard_token(
        &self,
        id: &str,
    ) -> Result<OriginGuardTokenResponse, Error> {
        self.send(Method::GET, &["site", id, "originguardtoken"], None::<&()>)
            .await
    }

    /// `POST site/{id}/originguardtoken` -- issue a new current token.
    pub async fn create_origin_guard_token(
        &self,
        id: &str,
    ) -> Result<OriginGuardTokenResponse, Error> {
        debug!(id, "issuing origin guard token");
        self.send(Method::POST, &["site", id, "originguardtoken"], None::<&()>)
            .await
    }

    /// `POST site/{id}/originguardtoken/nextup` -- stage a rotation.
    pub async fn create_next_origin_guard_token(
        &self,
        id: &str,
    ) -> Result<OriginGuardTokenResponse, Error> {
        debug!(id, "staging next origin guard token");
        self.send(
            Method::POST,
            &["site", id, "originguardtoken", "nextup"],
            None::<&()>,
        )
        .await
    }

    /// `DELETE site/{id}/originguardtoken/nextup` -- abandon a staged rotation.
    pub async fn delete_next_origin_guard_token(&self, id: &str) -> Result<(), Error> {
        debug!(id, "discarding next origin guard token");
        self.send_unit(
            Method::DELETE,
            &["site", id, "originguardtoken", "nextup"],
            None::<&()>,
        )
        .await
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Append path segments to the base URL, percent-encoding each one.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> RequestBuilder {
        let url = self.endpoint(segments);
        debug!("{method} {url}");
        let builder = self
            .http
            .request(method, url)
            .basic_auth(
                &self.access_token,
                Some(self.access_token_secret.expose_secret()),
            );
        match body {
            Some(body) => builder.json(body),
            None => builder,
        }
    }

    async fn send<B, T>(&self, method: Method, segments: &[&str], body: Option<&B>) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.execute(self.request(method, segments, body)).await?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body,
        })
    }

    async fn send_unit<B>(&self, method: Method, segments: &[&str], body: Option<&B>) -> Result<(), Error>
    where
        B: Serialize + ?Sized,
    {
        self.execute(self.request(method, segments, body)).await?;
        Ok(())
    }

    /// Send the request and return the body text of a 2xx response.
    async fn execute(&self, builder: RequestBuilder) -> Result<String, Error> {
        let resp = builder.send().await.map_err(Error::Transport)?;
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;
        trace!(%status, body = %preview(&body), "response");

        if status.is_success() {
            return Ok(body);
        }

        let parsed = serde_json::from_str::<ApiErrorBody>(&body).ok();
        let code = parsed.as_ref().and_then(|p| p.error_code.clone());
        let message = parsed
            .and_then(|p| p.error_msg)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                let text = preview(&body);
                if text.is_empty() {
                    status.to_string()
                } else {
                    text
                }
            });
        Err(Error::Api {
            status: status.as_u16(),
            message,
            code,
        })
    }
}

fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}
