use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use client::{KeyValueStore, SessionProvider};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use shared_types::{AppErrorKind, Role, Session};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::common;

#[derive(Clone, Default)]
struct Counters {
    refresh: Arc<AtomicUsize>,
    protected: Arc<AtomicUsize>,
}

/// `GET /system-status` only accepts `Bearer fresh`.
async fn protected(State(c): State<Counters>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    c.protected.fetch_add(1, Ordering::SeqCst);
    match common::bearer(&headers).as_deref() {
        Some("fresh") => (
            StatusCode::OK,
            Json(json!({"intelligent_detector": "hybrid", "analysis_capabilities": ["nlp"]})),
        ),
        _ => (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Token expired"}))),
    }
}

async fn always_unauthorized(State(c): State<Counters>) -> (StatusCode, Json<Value>) {
    c.protected.fetch_add(1, Ordering::SeqCst);
    (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Still expired"})))
}

async fn refresh_ok(
    State(c): State<Counters>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    c.refresh.fetch_add(1, Ordering::SeqCst);
    if common::bearer(&headers).is_some() || body["refresh_token"] != "old-refresh" {
        return (StatusCode::BAD_REQUEST, Json(json!({"detail": "bad refresh"})));
    }
    (
        StatusCode::OK,
        Json(json!({"access_token": "fresh", "refresh_token": "rotated", "token_type": "bearer"})),
    )
}

async fn refresh_rejected(State(c): State<Counters>) -> (StatusCode, Json<Value>) {
    c.refresh.fetch_add(1, Ordering::SeqCst);
    (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Refresh token revoked"})))
}

fn backend(counters: &Counters, refresh_succeeds: bool) -> Router {
    let router = Router::new().route("/symptoms/system-status", get(protected));
    let router = if refresh_succeeds {
        router.route("/auth/refresh", post(refresh_ok))
    } else {
        router.route("/auth/refresh", post(refresh_rejected))
    };
    router.with_state(counters.clone())
}

#[tokio::test]
async fn test_expired_token_is_refreshed_and_request_replayed() {
    let counters = Counters::default();
    let base = common::spawn_backend(backend(&counters, true)).await;
    let (client, store) = common::test_client(&base);
    common::seed_session(&store, "stale", "old-refresh", "ana", Role::Admin);

    let status = client.get_system_status().await.expect("replayed request succeeds");

    assert_eq!(status.intelligent_detector, "hybrid");
    assert_eq!(counters.refresh.load(Ordering::SeqCst), 1);
    assert_eq!(counters.protected.load(Ordering::SeqCst), 2);
    assert_eq!(store.get("access_token").as_deref(), Some("fresh"));
    assert_eq!(store.get("refresh_token").as_deref(), Some("rotated"));
    assert!(client.session().session().is_authenticated());
}

#[tokio::test]
async fn test_valid_token_does_not_refresh() {
    let counters = Counters::default();
    let base = common::spawn_backend(backend(&counters, true)).await;
    let (client, store) = common::test_client(&base);
    common::seed_session(&store, "fresh", "old-refresh", "ana", Role::Admin);

    client.get_system_status().await.expect("request succeeds");

    assert_eq!(counters.refresh.load(Ordering::SeqCst), 0);
    assert_eq!(counters.protected.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_refresh_failure_clears_session_and_reports_original_401() {
    let counters = Counters::default();
    let base = common::spawn_backend(backend(&counters, false)).await;
    let (client, store) = common::test_client(&base);
    common::seed_session(&store, "stale", "old-refresh", "ana", Role::User);

    let err = client.get_system_status().await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::Unauthorized);
    assert_eq!(err.message, "Token expired");
    assert_eq!(counters.refresh.load(Ordering::SeqCst), 1);
    assert!(store.get("access_token").is_none());
    assert!(store.get("refresh_token").is_none());
    assert!(store.get("user_info").is_none());
    assert_eq!(client.session().session(), Session::Anonymous);
}

#[tokio::test]
async fn test_no_refresh_token_means_no_refresh_attempt() {
    let counters = Counters::default();
    let base = common::spawn_backend(backend(&counters, true)).await;
    let (client, store) = common::test_client(&base);
    store.set("access_token", "stale");

    let err = client.get_system_status().await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::Unauthorized);
    assert_eq!(counters.refresh.load(Ordering::SeqCst), 0);
    // Nothing to clear beyond what the caller stored; the token stays.
    assert_eq!(store.get("access_token").as_deref(), Some("stale"));
}

#[tokio::test]
async fn test_refresh_is_attempted_at_most_once_per_request() {
    let counters = Counters::default();
    let router = Router::new()
        .route("/symptoms/system-status", get(always_unauthorized))
        .route("/auth/refresh", post(refresh_ok))
        .with_state(counters.clone());
    let base = common::spawn_backend(router).await;
    let (client, store) = common::test_client(&base);
    common::seed_session(&store, "stale", "old-refresh", "ana", Role::Admin);

    let err = client.get_system_status().await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::Unauthorized);
    assert_eq!(err.message, "Still expired");
    assert_eq!(counters.refresh.load(Ordering::SeqCst), 1);
    assert_eq!(counters.protected.load(Ordering::SeqCst), 2);
    // The refresh itself succeeded, so the new pair is kept.
    assert_eq!(client.session().access_token().as_deref(), Some("fresh"));
}

/// Accepts `old-refresh` exactly once, the way a rotating backend does.
async fn refresh_rotating(
    State(c): State<Counters>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let seen = c.refresh.fetch_add(1, Ordering::SeqCst);
    if seen > 0 || body["refresh_token"] != "old-refresh" {
        return (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Refresh token already used"})));
    }
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    (
        StatusCode::OK,
        Json(json!({"access_token": "fresh", "refresh_token": "rotated"})),
    )
}

#[tokio::test]
async fn test_concurrent_401s_share_one_refresh() {
    let counters = Counters::default();
    let router = Router::new()
        .route("/symptoms/system-status", get(protected))
        .route("/auth/refresh", post(refresh_rotating))
        .with_state(counters.clone());
    let base = common::spawn_backend(router).await;
    let (client, store) = common::test_client(&base);
    common::seed_session(&store, "stale", "old-refresh", "ana", Role::User);

    let (first, second) = tokio::join!(client.get_system_status(), client.get_system_status());

    assert!(first.is_ok(), "{first:?}");
    assert!(second.is_ok(), "{second:?}");
    assert_eq!(counters.refresh.load(Ordering::SeqCst), 1);
    assert_eq!(store.get("refresh_token").as_deref(), Some("rotated"));
    assert!(client.session().session().is_authenticated());
}
