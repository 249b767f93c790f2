#![allow(clippy::unwrap_used)]
// Integration tests for `WebAccelClient` using wiremock.

use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use webaccel_api::{
    AclResult, CacheTtl, CorsRule, CreateOrUpdateCertificateRequest, CreateSiteRequest,
    DeleteAllCacheRequest, DeleteCacheRequest, Error, Origin, OriginType, Rule, SiteStatus,
    UpdateSiteRequest, UpdateSiteStatusRequest, WebAccelClient,
};

// ── Helpers ─────────────────────────────────────────────────────────

const BASIC_AUTH: &str = "Basic dG9rZW46c2VjcmV0";

async fn setup() -> (MockServer, WebAccelClient) {
    let server = MockServer::start().await;
    let client = WebAccelClient::with_client(
        reqwest::Client::new(),
        Url::parse(&server.uri()).unwrap(),
        "token",
        SecretString::from("secret".to_owned()),
    )
    .unwrap();
    (server, client)
}

fn site_json(id: &str) -> serde_json::Value {
    json!({
        "ID": id,
        "Name": "blog",
        "DomainType": "subdomain",
        "Subdomain": "abc123.user.webaccel.jp",
        "Status": "enabled",
        "OriginType": "0",
        "Origin": "origin.example.com",
        "RequestProtocol": "1"
    })
}

async fn assert_nothing_sent(server: &MockServer) {
    let received = server.received_requests().await.unwrap();
    assert!(received.is_empty(), "unexpected requests: {received:?}");
}

// ── Site tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_sites() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/site"))
        .and(header("authorization", BASIC_AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Total": 2,
            "Count": 2,
            "Sites": [site_json("1"), site_json("2")]
        })))
        .mount(&server)
        .await;

    let list = client.list_sites().await.unwrap();

    assert_eq!(list.total, 2);
    assert_eq!(list.sites.len(), 2);
    assert_eq!(list.sites[0].name, "blog");
    assert_eq!(list.sites[1].id, "2");
}

#[tokio::test]
async fn test_read_site_unwraps_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/site/100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Site": site_json("100") })))
        .mount(&server)
        .await;

    let site = client.read_site("100").await.unwrap();

    assert_eq!(site.id, "100");
    assert_eq!(site.origin_type().unwrap(), Some(OriginType::WebServer));
    assert!(site.is_enabled());
}

#[tokio::test]
async fn test_create_site_sends_flat_wire_form() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/site"))
        .and(body_json(json!({
            "Name": "blog",
            "DomainType": "subdomain",
            "OriginType": "0",
            "Origin": "origin.example.com",
            "DefaultCacheTTL": 600
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "Site": site_json("101") })))
        .expect(1)
        .mount(&server)
        .await;

    let req = CreateSiteRequest {
        name: Some("blog".into()),
        domain_type: Some(webaccel_api::DomainType::Subdomain),
        default_cache_ttl: Some(CacheTtl::new(600).unwrap()),
        origin: Some(Origin::web_server("origin.example.com")),
        ..CreateSiteRequest::default()
    };
    let site = client.create_site(&req).await.unwrap();

    assert_eq!(site.id, "101");
}

#[tokio::test]
async fn test_update_site_sends_empty_cors_list() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/site/100"))
        .and(body_json(json!({ "Name": "renamed", "CORSRules": [] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Site": site_json("100") })))
        .expect(1)
        .mount(&server)
        .await;

    let req = UpdateSiteRequest {
        name: Some("renamed".into()),
        ..UpdateSiteRequest::default()
    }
    .clear_cors_rules();
    client.update_site("100", &req).await.unwrap();
}

#[tokio::test]
async fn test_update_host_header_only_omits_origin_type() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/site/100"))
        .and(body_json(json!({ "HostHeader": "www.example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Site": site_json("100") })))
        .expect(1)
        .mount(&server)
        .await;

    let req: UpdateSiteRequest =
        serde_json::from_value(json!({ "HostHeader": "www.example.com" })).unwrap();
    client.update_site("100", &req).await.unwrap();
}

#[tokio::test]
async fn test_read_site_with_null_fields() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/site/100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Site": { "ID": "100", "Domain": null, "HasCertificate": null, "CORSRules": null }
        })))
        .mount(&server)
        .await;

    let site = client.read_site("100").await.unwrap();
    assert_eq!(site.id, "100");
    assert_eq!(site.domain, "");
    assert!(!site.has_certificate);
}

#[tokio::test]
async fn test_invalid_update_never_sent() {
    let (server, client) = setup().await;

    let req = UpdateSiteRequest {
        cors_rules: Some(vec![CorsRule::any_origin(), CorsRule::any_origin()]),
        ..UpdateSiteRequest::default()
    };
    let err = client.update_site("100", &req).await.unwrap_err();

    assert!(err.is_validation(), "expected validation error, got: {err:?}");
    let Error::Validation(inner) = err else {
        unreachable!()
    };
    assert_eq!(inner.field(), "CORSRules");
    assert_eq!(inner.rule(), &Rule::TooManyItems { max: 1, got: 2 });
    assert_nothing_sent(&server).await;
}

#[tokio::test]
async fn test_update_site_status() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/site/100/status"))
        .and(body_json(json!({ "Status": "disabled" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Site": { "ID": "100", "Status": "disabled" }
        })))
        .mount(&server)
        .await;

    let site = client
        .update_site_status("100", &UpdateSiteStatusRequest::disable())
        .await
        .unwrap();

    assert_eq!(site.status().unwrap(), Some(SiteStatus::Disabled));
}

#[tokio::test]
async fn test_delete_site() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/site/100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Site": site_json("100") })))
        .expect(1)
        .mount(&server)
        .await;

    let site = client.delete_site("100").await.unwrap();
    assert_eq!(site.id, "100");
}

// ── Cache tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_all_cache() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/deleteallcache"))
        .and(body_json(json!({ "Domain": "www.example.com" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client
        .delete_all_cache(&DeleteAllCacheRequest::new("www.example.com"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_cache_partial_failure() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/deletecache"))
        .and(body_json(json!({ "URL": ["http://a/x", "http://a/y"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Results": [
                { "URL": "http://a/x", "Status": 200, "Result": "Deleted" },
                { "URL": "http://a/y", "Status": 500, "Result": "Failed" }
            ]
        })))
        .mount(&server)
        .await;

    let results = client
        .delete_cache(&DeleteCacheRequest::new(["http://a/x", "http://a/y"]))
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].url, "http://a/x");
    assert!(results[0].is_success());
    assert_eq!(results[1].url, "http://a/y");
    assert!(!results[1].is_success());
}

// ── Certificate / ACL / token tests ─────────────────────────────────

#[tokio::test]
async fn test_update_certificate_passes_pem_through() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/site/100/certificate"))
        .and(body_json(json!({ "CertificateChain": "CHAIN", "Key": "KEY" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let req = CreateOrUpdateCertificateRequest::new("CHAIN", "KEY".to_owned());
    client.update_certificate("100", &req).await.unwrap();
}

#[tokio::test]
async fn test_acl_round_trip() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/site/100/acl"))
        .and(body_json(json!({ "ACL": "deny 192.0.2.0/24\nallow all" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "ACL": "deny 192.0.2.0/24\nallow all" })),
        )
        .mount(&server)
        .await;

    let acl = client
        .upsert_acl("100", &AclResult::new("deny 192.0.2.0/24\nallow all"))
        .await
        .unwrap();
    assert_eq!(acl.entries().count(), 2);
}

#[tokio::test]
async fn test_origin_guard_rotation() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/site/100/originguardtoken/nextup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "OriginGuardToken": "current",
            "NextOriginGuardToken": "upcoming"
        })))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/site/100/originguardtoken/nextup"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = client.create_next_origin_guard_token("100").await.unwrap();
    assert_eq!(tokens.current(), Some("current"));
    assert_eq!(tokens.next(), Some("upcoming"));

    client.delete_next_origin_guard_token("100").await.unwrap();
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_not_found_is_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/site/999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "is_fatal": true,
            "status": "404 Not Found",
            "error_code": "not_found",
            "error_msg": "site not found"
        })))
        .mount(&server)
        .await;

    let err = client.read_site("999").await.unwrap_err();

    assert!(err.is_not_found(), "expected not found, got: {err:?}");
    assert_eq!(err.api_error_code(), Some("not_found"));
    assert!(err.to_string().contains("site not found"));
}

#[tokio::test]
async fn test_unauthorized_plain_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/site"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let err = client.list_sites().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(matches!(err, Error::Api { status: 401, ref message, .. } if message == "Unauthorized"));
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/site/100"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client.read_site("100").await.unwrap_err();

    assert!(
        matches!(err, Error::Deserialization { ref body, .. } if body == "not json"),
        "expected Deserialization error, got: {err:?}"
    );
}
