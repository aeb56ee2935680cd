use axum::{http::StatusCode, routing::get, Json, Router};
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{AppErrorKind, NETWORK_ERROR_MESSAGE};

use crate::common;

fn error_backend() -> Router {
    Router::new()
        .route(
            "/admin/roles",
            get(|| async {
                (
                    StatusCode::FORBIDDEN,
                    Json(json!({"detail": "Solo administradores", "error": "forbidden", "message": "no"})),
                )
            }),
        )
        .route(
            "/admin/users",
            get(|| async {
                (
                    StatusCode::CONFLICT,
                    Json(json!({"error": "Usuario duplicado", "message": "ignored"})),
                )
            }),
        )
        .route(
            "/symptoms/system-status",
            get(|| async { (StatusCode::NOT_FOUND, Json(json!({"message": "Sin detector"}))) }),
        )
        .route(
            "/chat/history/all",
            get(|| async { (StatusCode::BAD_GATEWAY, "<html>upstream down</html>") }),
        )
        .route(
            "/ingest/documents",
            get(|| async {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({"detail": [{"loc": ["query", "limit"], "msg": "must be positive"}]})),
                )
            }),
        )
}

#[tokio::test]
async fn test_detail_takes_precedence() {
    let base = common::spawn_backend(error_backend()).await;
    let (client, _store) = common::test_client(&base);

    let err = client.list_roles().await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Forbidden);
    assert_eq!(err.message, "Solo administradores");
    assert_eq!(err.status, Some(403));
}

#[tokio::test]
async fn test_error_field_used_without_detail() {
    let base = common::spawn_backend(error_backend()).await;
    let (client, _store) = common::test_client(&base);

    let err = client.list_users().await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Conflict);
    assert_eq!(err.message, "Usuario duplicado");
}

#[tokio::test]
async fn test_message_field_used_last() {
    let base = common::spawn_backend(error_backend()).await;
    let (client, _store) = common::test_client(&base);

    let err = client.get_system_status().await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::NotFound);
    assert_eq!(err.message, "Sin detector");
}

#[tokio::test]
async fn test_non_json_error_body_falls_back_to_network_error() {
    let base = common::spawn_backend(error_backend()).await;
    let (client, _store) = common::test_client(&base);

    let err = client.get_all_users_history().await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::InternalError);
    assert_eq!(err.message, NETWORK_ERROR_MESSAGE);
    assert_eq!(err.status, Some(502));
}

#[tokio::test]
async fn test_validation_detail_list_maps_field_errors() {
    let base = common::spawn_backend(error_backend()).await;
    let (client, _store) = common::test_client(&base);

    let err = client.list_documents(0, 0, None).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::ValidationError);
    assert_eq!(err.field_errors.get("limit").map(String::as_str), Some("must be positive"));
}

#[tokio::test]
async fn test_unreachable_backend_is_a_network_error() {
    // Bind then drop a listener to get a port nothing is serving.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let (client, _store) = common::test_client(&format!("http://{addr}/api/v1"));

    let err = client.get_system_status().await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Network);
    assert!(!err.message.is_empty());
    assert_eq!(err.status, None);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let base = common::spawn_backend(Router::new()).await;
    let (client, _store) = common::test_client(&base);

    let err = client.list_roles().await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::NotFound);
    assert_eq!(err.message, "Not found");
}
