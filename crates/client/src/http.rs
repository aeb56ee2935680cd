//! Request plumbing shared by every endpoint wrapper.
//!
//! Each call attaches the stored bearer token. A 401 triggers one exchange
//! of the refresh token at `POST {base}/auth/refresh` and one replay of the
//! original request; if the exchange fails the session is cleared and the
//! original 401 is returned to the caller.
//!
//! Refreshes are serialized per client. A request that hits 401 while
//! another one is refreshing waits, then replays with the new token
//! instead of spending the already-rotated refresh token a second time.

use crate::store::{SessionProvider, SharedSession};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{ApiSettings, AppError, AuthResponse, RefreshRequest, NETWORK_ERROR_MESSAGE};
use std::sync::Arc;
use tokio::sync::Mutex;

pub const REFRESH_PATH: &str = "/auth/refresh";

/// HTTP client bound to one backend and one session.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SharedSession,
    refresh_lock: Arc<Mutex<()>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Two clients are equal when they target the same backend through the same
/// session handle.
impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url && Arc::ptr_eq(&self.session, &other.session)
    }
}

impl ApiClient {
    pub fn new(settings: &ApiSettings, session: SharedSession) -> Result<Self, AppError> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(std::time::Duration::from_secs(settings.timeout_secs));
        let http = builder
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            session,
            refresh_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    pub(crate) fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Send a request built by `build`, refreshing and replaying once on 401.
    ///
    /// `build` may run twice, so bodies that cannot be cloned (multipart)
    /// are rebuilt rather than reused.
    pub async fn send<F>(&self, build: F) -> Result<Response, AppError>
    where
        F: Fn(&reqwest::Client) -> RequestBuilder,
    {
        let sent_with = self.session.access_token();
        let response = self.dispatch(&build, sent_with.as_deref()).await?;
        if response.status() != StatusCode::UNAUTHORIZED || self.session.refresh_token().is_none() {
            return Ok(response);
        }

        let refreshing = self.refresh_lock.lock().await;
        let current = self.session.access_token();
        if current.is_some() && current != sent_with {
            drop(refreshing);
            tracing::debug!("token refreshed by a concurrent request; replaying");
            return self.dispatch(&build, current.as_deref()).await;
        }
        // A concurrent refresh that failed has already cleared the session.
        let Some(refresh_token) = self.session.refresh_token() else {
            return Ok(response);
        };

        let refreshed = self.refresh(&refresh_token).await;
        if let Err(e) = &refreshed {
            tracing::warn!(error = %e, "token refresh failed; clearing session");
            self.session.clear();
        }
        drop(refreshing);

        match refreshed {
            Ok(()) => {
                tracing::debug!("access token refreshed; replaying request");
                let fresh = self.session.access_token();
                self.dispatch(&build, fresh.as_deref()).await
            }
            Err(_) => Ok(response),
        }
    }

    async fn dispatch<F>(&self, build: &F, token: Option<&str>) -> Result<Response, AppError>
    where
        F: Fn(&reqwest::Client) -> RequestBuilder,
    {
        let mut request = build(&self.http);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.map_err(transport_error)
    }

    /// Exchange the refresh token for a new pair. Sent without the bearer.
    async fn refresh(&self, refresh_token: &str) -> Result<(), AppError> {
        let body = RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };
        let response = self
            .http
            .post(self.url(REFRESH_PATH))
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;
        let tokens: AuthResponse = read_json(response).await?;
        if tokens.access_token.is_empty() {
            return Err(AppError::unauthorized("Refresh returned no access token"));
        }
        self.session
            .set_tokens(&tokens.access_token, &tokens.refresh_token);
        Ok(())
    }

    pub async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let response = self.send(|http| http.get(&url).query(query)).await?;
        read_json(response).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let response = self.send(|http| http.post(&url).json(body)).await?;
        read_json(response).await
    }

    pub async fn delete_json<T>(&self, path: &str) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let response = self.send(|http| http.delete(&url)).await?;
        read_json(response).await
    }

    pub async fn post_multipart<T, F>(&self, path: &str, form: F) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        F: Fn() -> reqwest::multipart::Form,
    {
        let url = self.url(path);
        let response = self.send(|http| http.post(&url).multipart(form())).await?;
        read_json(response).await
    }
}

/// Decode a success body, or turn a failure into an [`AppError`].
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let err = AppError::from_response(status.as_u16(), &body);
        tracing::debug!(status = status.as_u16(), message = %err.message, "request failed");
        return Err(err);
    }
    let text = response.text().await.map_err(transport_error)?;
    // Some endpoints answer 204 or an empty 200.
    let text = if text.trim().is_empty() { "null" } else { text.as_str() };
    serde_json::from_str(text)
        .map_err(|e| AppError::internal(format!("Unexpected response from server: {e}")))
}

fn transport_error(e: reqwest::Error) -> AppError {
    let message = e.to_string();
    if message.is_empty() {
        AppError::network(NETWORK_ERROR_MESSAGE)
    } else {
        tracing::error!(error = %message, "request did not complete");
        AppError::network(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, SessionStore};

    fn client(base: &str) -> ApiClient {
        let settings = ApiSettings {
            base_url: base.to_string(),
            timeout_secs: 1,
        };
        ApiClient::new(&settings, SessionStore::new(MemoryStore::new()).into_shared()).unwrap()
    }

    #[test]
    fn url_joins_with_single_slash() {
        let c = client("http://localhost:8000/api/v1/");
        assert_eq!(c.base_url(), "http://localhost:8000/api/v1");
        assert_eq!(c.url("/chat"), "http://localhost:8000/api/v1/chat");
        assert_eq!(c.url("chat"), "http://localhost:8000/api/v1/chat");
    }
}
