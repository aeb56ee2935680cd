use axum::Router;
use client::{ApiClient, KeyValueStore, MemoryStore, SessionStore};
use shared_types::{ApiSettings, Role, UserInfo};
use std::sync::Arc;

/// Serve `api` under `/api/v1` on an ephemeral localhost port and return
/// the base URL the client should use.
pub async fn spawn_backend(api: Router) -> String {
    let app = Router::new().nest("/api/v1", api);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock backend");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock backend crashed");
    });
    format!("http://{addr}/api/v1")
}

/// A client against `base_url` with an empty in-memory session.
/// The returned store is the same one the client writes to.
pub fn test_client(base_url: &str) -> (ApiClient, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let session = SessionStore::new(store.clone()).into_shared();
    let settings = ApiSettings {
        base_url: base_url.to_string(),
        timeout_secs: 5,
    };
    let client = ApiClient::new(&settings, session).expect("Failed to build client");
    (client, store)
}

/// Pre-populate the store as if `username` had signed in earlier.
pub fn seed_session(store: &MemoryStore, access: &str, refresh: &str, username: &str, role: Role) {
    store.set("access_token", access);
    store.set("refresh_token", refresh);
    let user = UserInfo {
        id: "1".into(),
        username: username.into(),
        role,
        email: None,
    };
    store.set(
        "user_info",
        &serde_json::to_string(&user).expect("Failed to encode user_info"),
    );
}

/// Extract the bearer token from request headers.
pub fn bearer(headers: &axum::http::HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}
