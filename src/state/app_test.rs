use super::*;
use crate::test_helpers::{MockBackend, dead_origin};
use serde_json::json;

fn me_body() -> serde_json::Value {
    json!({"user_id": "user_123", "email": "ana@example.cl", "name": "Ana", "picture": null})
}

fn app_for(backend: &MockBackend, token: Option<&str>) -> App {
    let (api, _) = backend.client(token);
    App::new(AuthSession::new(api))
}

// =============================================================
// launch
// =============================================================

#[tokio::test]
async fn launch_without_token_lands_on_welcome() {
    let backend = MockBackend::start().await;
    let mut app = app_for(&backend, None);

    let state = app.launch(None).await.unwrap();

    assert_eq!(state.route, Route::Welcome);
    assert!(!state.auth.loading);
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn launch_with_unset_role_goes_to_role_select() {
    let backend = MockBackend::start().await;
    backend.respond("GET", "/api/auth/me", 200, me_body());
    backend.respond("GET", "/api/profile", 200, json!({"role": "", "profile_completed": false}));
    let mut app = app_for(&backend, Some("sess_ok"));

    app.launch(None).await.unwrap();

    assert_eq!(app.route(), Route::RoleSelect);
}

#[tokio::test]
async fn launch_with_incomplete_profile_goes_to_onboarding() {
    let backend = MockBackend::start().await;
    backend.respond("GET", "/api/auth/me", 200, me_body());
    backend.respond("GET", "/api/profile", 200, json!({"role": "family", "profile_completed": false}));
    let mut app = app_for(&backend, Some("sess_ok"));

    app.launch(None).await.unwrap();

    assert_eq!(app.route(), Route::Onboarding(Role::Family));
}

#[tokio::test]
async fn launch_with_complete_profile_goes_home() {
    let backend = MockBackend::start().await;
    backend.respond("GET", "/api/auth/me", 200, me_body());
    backend.respond("GET", "/api/profile", 200, json!({"role": "professional", "profile_completed": true}));
    let mut app = app_for(&backend, Some("sess_ok"));

    app.launch(None).await.unwrap();

    assert_eq!(app.route(), Route::Home(Role::Professional));
}

#[tokio::test]
async fn launch_profile_failure_falls_back_to_default_home() {
    let backend = MockBackend::start().await;
    backend.respond("GET", "/api/auth/me", 200, me_body());
    backend.respond("GET", "/api/profile", 500, json!({"detail": "boom"}));
    let mut app = app_for(&backend, Some("sess_ok"));

    app.launch(None).await.unwrap();

    assert_eq!(app.route(), Route::DEFAULT_HOME);
}

#[tokio::test]
async fn launch_expired_token_lands_on_welcome() {
    let backend = MockBackend::start().await;
    backend.respond("GET", "/api/auth/me", 401, json!({"detail": "Session expired"}));
    let (api, store) = backend.client(Some("sess_old"));
    let mut app = App::new(AuthSession::new(api));

    app.launch(None).await.unwrap();

    assert_eq!(app.route(), Route::Welcome);
    assert_eq!(crate::state::store::TokenStore::load(store.as_ref()).unwrap(), None);
}

#[tokio::test]
async fn launch_unreachable_backend_is_tolerated() {
    let origin = dead_origin().await;
    let store: std::sync::Arc<dyn crate::state::store::TokenStore> =
        std::sync::Arc::new(crate::state::store::MemoryTokenStore::with_token("sess_keep"));
    let api = ApiClient::new(&crate::config::ClientConfig::default().with_backend_url(&origin), store).unwrap();
    let mut app = App::new(AuthSession::new(api));

    let state = app.launch(None).await.unwrap();

    assert_eq!(state.route, Route::Welcome);
    assert!(!state.auth.loading);
}

#[tokio::test]
async fn launch_with_callback_exchanges_then_routes() {
    let backend = MockBackend::start().await;
    backend.respond_with_cookie(
        "POST",
        "/api/auth/session",
        200,
        json!({"user_id": "user_123"}),
        "session_token=sess_new; HttpOnly; Path=/",
    );
    backend.respond("GET", "/api/auth/me", 200, me_body());
    backend.respond("GET", "/api/profile", 200, json!({"role": "active_user", "profile_completed": true}));
    let (api, store) = backend.client(None);
    let mut app = App::new(AuthSession::new(api));

    app.launch(Some("sinadicciones://#session_id=abc")).await.unwrap();

    assert_eq!(app.route(), Route::Home(Role::ActiveUser));
    assert_eq!(backend.requests_to("/api/auth/session")[0].header("x-session-id"), Some("abc"));
    assert_eq!(
        crate::state::store::TokenStore::load(store.as_ref()).unwrap().as_deref(),
        Some("sess_new")
    );
}

// =============================================================
// actions
// =============================================================

#[tokio::test]
async fn login_failure_stays_on_welcome() {
    let backend = MockBackend::start().await;
    backend.respond("POST", "/api/auth/login", 401, json!({"detail": "Credenciales inválidas"}));
    let mut app = app_for(&backend, None);

    let err = app.login_with_email("ana@example.cl", "bad").await.unwrap_err();

    assert_eq!(err.detail(), Some("Credenciales inválidas"));
    assert_eq!(app.route(), Route::Welcome);
}

#[tokio::test]
async fn select_role_moves_to_onboarding_without_refetch() {
    let backend = MockBackend::start().await;
    backend.respond("POST", "/api/profile/set-role", 200, json!({"success": true}));
    let mut app = app_for(&backend, Some("sess_ok"));

    app.select_role(Role::ActiveUser, Some("CL"), None).await.unwrap();

    assert_eq!(app.route(), Route::Onboarding(Role::ActiveUser));
    assert!(backend.requests_to("/api/profile").is_empty());
}

#[tokio::test]
async fn select_role_rejected_keeps_route() {
    let backend = MockBackend::start().await;
    backend.respond("POST", "/api/profile/set-role", 400, json!({"detail": "Rol inválido"}));
    let mut app = app_for(&backend, Some("sess_ok"));

    let err = app.select_role(Role::Family, None, None).await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(app.route(), Route::Welcome);
}

#[tokio::test]
async fn logout_returns_to_welcome_even_if_server_fails() {
    let backend = MockBackend::start().await;
    backend.respond("GET", "/api/auth/me", 200, me_body());
    backend.respond("GET", "/api/profile", 200, json!({"role": "patient", "profile_completed": true}));
    backend.respond("POST", "/api/auth/logout", 500, json!({"detail": "down"}));
    let mut app = app_for(&backend, Some("sess_ok"));
    app.launch(None).await.unwrap();
    assert_eq!(app.route(), Route::Home(Role::Patient));

    let state = app.logout().await.unwrap();

    assert_eq!(state.route, Route::Welcome);
    assert!(state.auth.user.is_none());
}
