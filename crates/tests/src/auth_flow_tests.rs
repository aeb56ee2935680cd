use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use client::{KeyValueStore, SessionProvider};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use shared_types::{AppErrorKind, LoginPortal, LoginRequest, RegisterRequest, Role};
use std::sync::{Arc, Mutex};

use crate::common;

type Seen = Arc<Mutex<Vec<(String, Value)>>>;

fn record(seen: &Seen, path: &str, body: Value) {
    seen.lock().expect("lock").push((path.to_string(), body));
}

fn auth_backend(seen: &Seen) -> Router {
    Router::new()
        .route(
            "/auth/login/psychologist",
            post(|State(seen): State<Seen>, Json(body): Json<Value>| async move {
                record(&seen, "/auth/login/psychologist", body.clone());
                if body["password"] != "correcta" {
                    return (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Credenciales inválidas"})));
                }
                (
                    StatusCode::OK,
                    Json(json!({
                        "access_token": "acc-1",
                        "refresh_token": "ref-1",
                        "user_id": 12,
                        "username": "dra.luz",
                        "role": "psychologist"
                    })),
                )
            }),
        )
        .route(
            "/auth/register",
            post(|State(seen): State<Seen>, Json(body): Json<Value>| async move {
                record(&seen, "/auth/register", body.clone());
                (
                    StatusCode::OK,
                    Json(json!({
                        "access_token": "acc-2",
                        "refresh_token": "ref-2",
                        "user_id": "u-99",
                        "username": body["username"],
                        "role": "user"
                    })),
                )
            }),
        )
        .route(
            "/auth/logout",
            post(|State(seen): State<Seen>, Json(body): Json<Value>| async move {
                record(&seen, "/auth/logout", body);
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "db down"})))
            }),
        )
        .with_state(seen.clone())
}

#[tokio::test]
async fn test_login_stores_tokens_and_user_info() {
    let seen = Seen::default();
    let base = common::spawn_backend(auth_backend(&seen)).await;
    let (client, store) = common::test_client(&base);

    let request = LoginRequest {
        username_or_email: "dra.luz".into(),
        password: "correcta".into(),
    };
    let response = client
        .login(LoginPortal::Psychologist, &request)
        .await
        .expect("login succeeds");

    assert_eq!(response.role, Role::Psychologist);
    assert_eq!(store.get("access_token").as_deref(), Some("acc-1"));
    assert_eq!(store.get("refresh_token").as_deref(), Some("ref-1"));
    let user = client.session().current_user().expect("user cached");
    assert_eq!(user.id, "12");
    assert_eq!(user.username, "dra.luz");
    assert_eq!(user.role, Role::Psychologist);

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].1["username_or_email"], "dra.luz");
}

#[tokio::test]
async fn test_failed_login_leaves_session_anonymous() {
    let seen = Seen::default();
    let base = common::spawn_backend(auth_backend(&seen)).await;
    let (client, store) = common::test_client(&base);

    let request = LoginRequest {
        username_or_email: "dra.luz".into(),
        password: "incorrecta".into(),
    };
    let err = client
        .login(LoginPortal::Psychologist, &request)
        .await
        .unwrap_err();

    assert_eq!(err.kind, AppErrorKind::Unauthorized);
    assert_eq!(err.message, "Credenciales inválidas");
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_register_caches_email_and_user_role() {
    let seen = Seen::default();
    let base = common::spawn_backend(auth_backend(&seen)).await;
    let (client, _store) = common::test_client(&base);

    let request = RegisterRequest {
        username: "mateo".into(),
        email: Some("mateo@example.com".into()),
        password: "secreto1".into(),
    };
    client.register(&request).await.expect("register succeeds");

    let user = client.session().current_user().expect("user cached");
    assert_eq!(user.id, "u-99");
    assert_eq!(user.role, Role::User);
    assert_eq!(user.email.as_deref(), Some("mateo@example.com"));
}

#[tokio::test]
async fn test_invalid_registration_is_rejected_before_sending() {
    let seen = Seen::default();
    let base = common::spawn_backend(auth_backend(&seen)).await;
    let (client, _store) = common::test_client(&base);

    let request = RegisterRequest {
        username: String::new(),
        email: None,
        password: String::new(),
    };
    let err = client.register(&request).await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::ValidationError);
    assert!(err.field_errors.contains_key("username"));
    assert!(err.field_errors.contains_key("password"));
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_short_credentials_are_sent_to_the_backend() {
    let seen = Seen::default();
    let base = common::spawn_backend(auth_backend(&seen)).await;
    let (client, _store) = common::test_client(&base);

    let request = RegisterRequest {
        username: "jo".into(),
        email: None,
        password: "12345".into(),
    };
    client.register(&request).await.expect("backend decides on length");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, "/auth/register");
    assert_eq!(seen[0].1["username"], "jo");
    assert_eq!(seen[0].1["password"], "12345");
}

#[tokio::test]
async fn test_logout_sends_refresh_token_and_clears_even_on_server_error() {
    let seen = Seen::default();
    let base = common::spawn_backend(auth_backend(&seen)).await;
    let (client, store) = common::test_client(&base);
    common::seed_session(&store, "acc", "ref-to-revoke", "ana", Role::User);

    client.logout().await;

    assert!(store.is_empty());
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, "/auth/logout");
    assert_eq!(seen[0].1, json!({"refresh_token": "ref-to-revoke"}));
}

#[tokio::test]
async fn test_logout_without_refresh_token_skips_request() {
    let seen = Seen::default();
    let base = common::spawn_backend(auth_backend(&seen)).await;
    let (client, store) = common::test_client(&base);
    store.set("user_info", r#"{"id":"1","username":"ana","role":"user"}"#);

    client.logout().await;

    assert!(store.is_empty());
    assert!(seen.lock().unwrap().is_empty());
}
