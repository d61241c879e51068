use serde_json::json;
use wiremock::matchers::{body_string_contains, header, header_regex, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tf1_live::{Credentials, Endpoints, ResolverError, StreamResolver};

const PAGE_URL: &str = "https://www.tf1.fr/tf1/direct";

const MASTER_PLAYLIST: &str = "#EXTM3U
#EXT-X-STREAM-INF:BANDWIDTH=4800000,RESOLUTION=1920x1080
1080/index.m3u8
#EXT-X-STREAM-INF:BANDWIDTH=1200000,RESOLUTION=1280x720
720/index.m3u8
";

fn endpoints_for(server: &MockServer) -> Endpoints {
    let base = server.uri();
    Endpoints {
        session_url: format!("{base}/compte/connexion"),
        login_url: format!("{base}/accounts.login"),
        token_url: format!("{base}/token/gigya/web"),
        mediainfo_url: format!("{base}/mediainfocombo"),
        ..Endpoints::default()
    }
}

fn assertion_body() -> serde_json::Value {
    json!({
        "userSignature": "c2lnbmF0dXJl",
        "UID": "fffe0123",
        "timestamp": "1699999999",
    })
}

fn token_body() -> serde_json::Value {
    json!({
        "token": "tok123",
        "refresh_token": "refresh123",
        "ttl": 3600,
        "type": "Bearer",
    })
}

async fn mount_token_exchange(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token/gigya/web"))
        .and(header("referer", PAGE_URL))
        .and(body_string_contains("uid=fffe0123"))
        .and(body_string_contains("signature=c2lnbmF0dXJl"))
        .and(body_string_contains("timestamp=1699999999"))
        .and(body_string_contains("consentIds=10008"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .mount(server)
        .await;
}

async fn mount_media_delivery(server: &MockServer) {
    let manifest_url = format!("{}/live/manifest.m3u8", server.uri());
    Mock::given(method("GET"))
        .and(path("/mediainfocombo/L_TF1"))
        .and(query_param("context", "MYTF1"))
        .and(query_param("pver", "5015000"))
        .and(header("authorization", "Bearer tok123"))
        .and(header_regex("user-agent", "iPhone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "delivery": {"code": 200, "format": "hls", "url": manifest_url}
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/live/manifest.m3u8"))
        .respond_with(ResponseTemplate::new(200).set_body_string(MASTER_PLAYLIST))
        .mount(server)
        .await;
}

#[tokio::test]
async fn missing_credentials_short_circuit_before_any_request() {
    let server = MockServer::start().await;
    let resolver =
        StreamResolver::with_endpoints(Credentials::default(), endpoints_for(&server)).unwrap();

    let err = resolver.resolve(PAGE_URL).await.unwrap_err();
    assert!(matches!(err, ResolverError::MissingCredentials));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn full_login_flow_resolves_variants() {
    let _ = env_logger::builder().is_test(true).try_init();
    let server = MockServer::start().await;

    // the session endpoint bounces through a redirect whose query the
    // login call has to carry over, then lands on a plain HTML page
    let landing = format!("{}/identite?redirect_uri=abc123", server.uri());
    Mock::given(method("GET"))
        .and(path("/compte/connexion"))
        .and(query_param("ptrt", PAGE_URL))
        .respond_with(ResponseTemplate::new(302).insert_header("location", landing.as_str()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/identite"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/accounts.login"))
        .and(query_param("redirect_uri", "abc123"))
        .and(header("referer", PAGE_URL))
        .and(body_string_contains("loginID=alice%40example.test"))
        .and(body_string_contains("APIKey="))
        .respond_with(ResponseTemplate::new(200).set_body_json(assertion_body()))
        .expect(1)
        .mount(&server)
        .await;
    mount_token_exchange(&server).await;
    mount_media_delivery(&server).await;

    let credentials = Credentials::new("alice@example.test", "hunter2");
    let resolver = StreamResolver::with_endpoints(credentials, endpoints_for(&server)).unwrap();

    let variants = resolver.resolve(PAGE_URL).await.unwrap();
    assert_eq!(
        variants.iter().map(|v| v.name.as_str()).collect::<Vec<_>>(),
        vec!["1080p", "720p"]
    );
}

#[tokio::test]
async fn already_authenticated_session_skips_the_login_post() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/compte/connexion"))
        .and(query_param("ptrt", PAGE_URL))
        .respond_with(ResponseTemplate::new(200).set_body_json(assertion_body()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/accounts.login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    mount_token_exchange(&server).await;
    mount_media_delivery(&server).await;

    let credentials = Credentials::new("alice@example.test", "hunter2");
    let resolver = StreamResolver::with_endpoints(credentials, endpoints_for(&server)).unwrap();

    // resolving twice yields the same variants and still no login POST
    let first = resolver.resolve(PAGE_URL).await.unwrap();
    let second = resolver.resolve(PAGE_URL).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first[0].name, "1080p");
}

#[tokio::test]
async fn rejected_login_stops_before_mediainfo() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/compte/connexion"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/accounts.login"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/mediainfocombo/L_TF1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let credentials = Credentials::new("alice@example.test", "wrong");
    let resolver = StreamResolver::with_endpoints(credentials, endpoints_for(&server)).unwrap();

    let err = resolver.resolve(PAGE_URL).await.unwrap_err();
    assert!(matches!(
        err,
        ResolverError::AuthenticationRejected { status } if status.as_u16() == 403
    ));
}

#[tokio::test]
async fn token_exchange_shape_change_is_a_contract_violation() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/compte/connexion"))
        .respond_with(ResponseTemplate::new(200).set_body_json(assertion_body()))
        .mount(&server)
        .await;
    // ttl went missing upstream
    Mock::given(method("POST"))
        .and(path("/token/gigya/web"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok123",
            "refresh_token": "refresh123",
            "type": "Bearer",
        })))
        .mount(&server)
        .await;

    let credentials = Credentials::new("alice@example.test", "hunter2");
    let resolver = StreamResolver::with_endpoints(credentials, endpoints_for(&server)).unwrap();

    let err = resolver.resolve(PAGE_URL).await.unwrap_err();
    assert!(matches!(
        err,
        ResolverError::ContractViolation {
            stage: "token exchange",
            ..
        }
    ));
}

#[tokio::test]
async fn denied_delivery_reports_the_provider_error_and_no_streams() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/compte/connexion"))
        .respond_with(ResponseTemplate::new(200).set_body_json(assertion_body()))
        .mount(&server)
        .await;
    mount_token_exchange(&server).await;
    Mock::given(method("GET"))
        .and(path("/mediainfocombo/L_TF1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "delivery": {"code": 403, "error": "geo-blocked"}
        })))
        .mount(&server)
        .await;

    let credentials = Credentials::new("alice@example.test", "hunter2");
    let resolver = StreamResolver::with_endpoints(credentials, endpoints_for(&server)).unwrap();

    let err = resolver.resolve(PAGE_URL).await.unwrap_err();
    match err {
        ResolverError::DeliveryDenied { code, error } => {
            assert_eq!(code, 403);
            assert_eq!(error, "geo-blocked");
        }
        other => panic!("expected DeliveryDenied, got {other:?}"),
    }
}
