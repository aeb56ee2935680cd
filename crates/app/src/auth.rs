use client::{ApiClient, SessionProvider};
use dioxus::prelude::*;
use shared_types::{AppError, Role, Session, UserInfo};
use shared_ui::{ToastOptions, Toasts};

/// Identity used for chat, history and trend calls when nobody is signed in.
pub const GUEST_USER_ID: &str = "guest";

/// Reactive copy of the persisted session.
///
/// The [`client::SessionStore`] owns the truth; this signal is reloaded
/// after sign-in, sign-out and any call that may have cleared the tokens.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuthState {
    pub session: Signal<Session>,
}

impl AuthState {
    pub fn new(session: Session) -> Self {
        Self {
            session: Signal::new(session),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_authenticated()
    }

    pub fn role(&self) -> Role {
        self.session.read().role()
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.session.read().user().cloned()
    }

    /// The signed-in user's id, or [`GUEST_USER_ID`].
    pub fn user_id(&self) -> String {
        self.session
            .read()
            .user()
            .map(|u| u.id.clone())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| GUEST_USER_ID.to_string())
    }

    /// Re-read the store into the signal.
    pub fn reload(&mut self, api: &ApiClient) {
        self.session.set(api.session().session());
    }
}

/// Hook to access auth state.
pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}

/// Hook to access the backend client.
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>()
}

/// Toast a failed call. A 401 that survived the refresh attempt means the
/// session is gone, so the signal is reloaded and the guard can react.
pub fn report_error(toast: Toasts, mut auth: AuthState, api: &ApiClient, context: &str, err: &AppError) {
    tracing::warn!(context, kind = %err.kind, message = %err.message, "request failed");
    if err.is_unauthorized() {
        auth.reload(api);
    }
    toast.error(format!("{context}: {}", err.friendly_message()), ToastOptions::new());
}
