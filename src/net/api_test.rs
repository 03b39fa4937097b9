use super::*;
use crate::state::store::MemoryTokenStore;
use crate::test_helpers::{MockBackend, dead_origin};
use serde_json::json;

fn client_for(origin: &str, token: Option<&str>) -> ApiClient {
    let store: Arc<dyn TokenStore> = Arc::new(token.map_or_else(MemoryTokenStore::new, MemoryTokenStore::with_token));
    ApiClient::new(&ClientConfig::default().with_backend_url(origin), store).unwrap()
}

// =============================================================================
// resolve_url
// =============================================================================

#[test]
fn resolve_url_prefixes_api_paths() {
    assert_eq!(resolve_url("https://backend.test", "/api/x").unwrap(), "https://backend.test/api/x");
}

#[test]
fn resolve_url_trims_origin_trailing_slash() {
    assert_eq!(resolve_url("https://backend.test/", "/api/profile").unwrap(), "https://backend.test/api/profile");
}

#[test]
fn resolve_url_passes_absolute_through() {
    let url = "https://other.test/api/habits";
    assert_eq!(resolve_url("https://backend.test", url).unwrap(), url);
}

#[test]
fn resolve_url_rejects_bare_relative() {
    assert!(matches!(resolve_url("https://backend.test", "api/x"), Err(ApiError::InvalidUrl(_))));
}

#[test]
fn segment_escapes_reserved_bytes() {
    assert_eq!(segment("habit_1a"), "habit_1a");
    assert_eq!(segment("a/b c"), "a%2Fb%20c");
}

// =============================================================================
// prepare: header and URL construction without a network
// =============================================================================

#[test]
fn prepare_with_token_sets_bearer_and_origin() {
    let client = client_for("https://backend.test", Some("T"));
    let request = client.prepare::<Value>(Method::GET, "/api/x", &[], None).unwrap();

    assert_eq!(request.url().as_str(), "https://backend.test/api/x");
    assert_eq!(request.headers().get(AUTHORIZATION).unwrap(), "Bearer T");
}

#[test]
fn prepare_without_token_omits_authorization() {
    let client = client_for("https://backend.test", None);
    let request = client.prepare::<Value>(Method::GET, "/api/x", &[], None).unwrap();
    assert!(request.headers().get(AUTHORIZATION).is_none());
}

#[test]
fn prepare_with_body_sets_json_content_type() {
    let client = client_for("https://backend.test", None);
    let request = client
        .prepare(Method::POST, "/api/habits", &[], Some(&json!({"name": "Caminar"})))
        .unwrap();
    assert_eq!(request.headers().get(reqwest::header::CONTENT_TYPE).unwrap(), "application/json");
}

#[test]
fn prepare_encodes_query_pairs() {
    let client = client_for("https://backend.test", None);
    let request = client
        .prepare::<Value>(Method::GET, "/api/therapists/search", &[("query", "ana maría".to_owned())], None)
        .unwrap();
    assert_eq!(request.url().path(), "/api/therapists/search");
    assert_eq!(request.url().query(), Some("query=ana+mar%C3%ADa"));
}

#[test]
fn prepare_rejects_token_with_newline() {
    let client = client_for("https://backend.test", Some("bad\ntoken"));
    let err = client.prepare::<Value>(Method::GET, "/api/x", &[], None).unwrap_err();
    assert!(matches!(err, ApiError::InvalidHeader(_)));
}

// =============================================================================
// call against the mock backend
// =============================================================================

#[tokio::test]
async fn call_sends_bearer_to_backend() {
    let backend = MockBackend::start().await;
    backend.respond("GET", "/api/x", 200, json!({"ok": true}));
    let (client, _) = backend.client(Some("T"));

    let body: Value = client.get_json("/api/x").await.unwrap();

    assert_eq!(body, json!({"ok": true}));
    let recorded = backend.last();
    assert_eq!(recorded.path, "/api/x");
    assert_eq!(recorded.header("authorization"), Some("Bearer T"));
}

#[tokio::test]
async fn call_without_token_sends_no_authorization() {
    let backend = MockBackend::start().await;
    backend.respond("GET", "/api/x", 200, json!([]));
    let (client, _) = backend.client(None);

    let _: Value = client.get_json("/api/x").await.unwrap();

    assert_eq!(backend.last().header("authorization"), None);
}

#[tokio::test]
async fn call_non_ok_maps_detail() {
    let backend = MockBackend::start().await;
    backend.respond("POST", "/api/profile/set-role", 400, json!({"detail": "Rol inválido"}));
    let (client, _) = backend.client(Some("T"));

    let err = client
        .post_json::<_, Value>("/api/profile/set-role", &json!({"role": "x"}))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.detail(), Some("Rol inválido"));
}

#[tokio::test]
async fn call_posts_json_body() {
    let backend = MockBackend::start().await;
    backend.respond("POST", "/api/habits", 200, json!({"habit_id": "habit_1"}));
    let (client, _) = backend.client(Some("T"));

    let _: Value = client.post_json("/api/habits", &json!({"name": "Leer"})).await.unwrap();

    let recorded = backend.last();
    assert_eq!(recorded.method, "POST");
    assert_eq!(recorded.json(), json!({"name": "Leer"}));
    assert_eq!(recorded.header("content-type"), Some("application/json"));
}

#[tokio::test]
async fn call_null_success_body_decodes() {
    let backend = MockBackend::start().await;
    let (client, _) = backend.client(None);
    backend.respond("DELETE", "/api/nelson/conversation", 200, Value::Null);

    let body: Value = client.delete_json("/api/nelson/conversation").await.unwrap();
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn call_unrouted_path_is_status_404() {
    let backend = MockBackend::start().await;
    let (client, _) = backend.client(None);

    let err = client.get_json::<Value>("/api/unknown").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.detail(), Some("Not Found"));
}

#[tokio::test]
async fn call_unreachable_backend_is_network_error() {
    let origin = dead_origin().await;
    let client = client_for(&origin, Some("T"));

    let err = client.get_json::<Value>("/api/auth/me").await.unwrap_err();
    assert!(err.is_network());
    assert_eq!(err.user_message("ignored"), crate::error::CONNECTION_ERROR_MESSAGE);
}

#[tokio::test]
async fn token_changes_are_seen_by_next_request() {
    let backend = MockBackend::start().await;
    backend.respond("GET", "/api/x", 200, json!({}));
    let (client, store) = backend.client(None);

    let _: Value = client.get_json("/api/x").await.unwrap();
    store.store("fresh").unwrap();
    let _: Value = client.get_json("/api/x").await.unwrap();

    let requests = backend.requests_to("/api/x");
    assert_eq!(requests[0].header("authorization"), None);
    assert_eq!(requests[1].header("authorization"), Some("Bearer fresh"));
}

#[tokio::test]
async fn send_raw_unreachable_backend_is_network_error() {
    let origin = dead_origin().await;
    let client = client_for(&origin, None);

    let err = client.send_raw::<Value>(Method::POST, "/api/auth/login", None).await.unwrap_err();
    assert!(err.is_network());
}

// =============================================================================
// segment / clear_session
// =============================================================================

#[test]
fn segment_encodes_reserved_and_non_ascii() {
    assert_eq!(segment("week"), "week");
    assert_eq!(segment("id?x=1#f"), "id%3Fx%3D1%23f");
    assert_eq!(segment("maría"), "mar%C3%ADa");
}

#[test]
fn clear_session_without_jar_clears_store() {
    let store = Arc::new(MemoryTokenStore::with_token("T"));
    let dyn_store: Arc<dyn TokenStore> = store.clone();
    let client = ApiClient::new(&ClientConfig::default().with_backend_url("https://backend.test"), dyn_store).unwrap();

    client.clear_session().unwrap();

    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn clear_session_drops_jar_cookie() {
    let backend = MockBackend::start().await;
    backend.respond_with_cookie("GET", "/api/x", 200, json!({}), "session_token=jarred; Path=/");
    let (client, _) = backend.cookie_client(None);

    let _: Value = client.get_json("/api/x").await.unwrap();
    let _: Value = client.get_json("/api/x").await.unwrap();
    assert_eq!(backend.last().header("cookie"), Some("session_token=jarred"));

    client.clear_session().unwrap();
    backend.respond("GET", "/api/x", 200, json!({}));
    let _: Value = client.get_json("/api/x").await.unwrap();

    assert_eq!(backend.last().header("cookie"), None);
}
