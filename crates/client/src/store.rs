//! Persisted session state.
//!
//! Three keys live in the browser-persistent store: `access_token`,
//! `refresh_token` and `user_info` (JSON). Everything else in the client
//! reads and writes them through [`SessionProvider`].

use shared_types::{Session, Tokens, UserInfo};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const USER_INFO_KEY: &str = "user_info";

/// String key/value storage that survives page reloads.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-process store for tests and native builds.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries().remove(key);
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// Session contract consumed by the route guard and the HTTP client.
pub trait SessionProvider {
    /// Cached identity, or `None` when anonymous.
    fn current_user(&self) -> Option<UserInfo>;
    fn access_token(&self) -> Option<String>;
    fn refresh_token(&self) -> Option<String>;
    /// Store a token pair. Empty values leave the stored token untouched.
    fn set_tokens(&self, access: &str, refresh: &str);
    fn set_user(&self, user: &UserInfo);
    /// Drop the tokens and the cached identity.
    fn clear(&self);

    fn session(&self) -> Session {
        let tokens = Tokens {
            access_token: self.access_token().unwrap_or_default(),
            refresh_token: self.refresh_token().unwrap_or_default(),
        };
        Session::from_parts(self.current_user(), tokens)
    }
}

pub type SharedSession = Arc<dyn SessionProvider + Send + Sync>;

/// [`SessionProvider`] over any [`KeyValueStore`].
#[derive(Debug, Default)]
pub struct SessionStore<S> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_shared(self) -> SharedSession
    where
        S: Send + Sync + 'static,
    {
        Arc::new(self)
    }

    fn non_empty(&self, key: &str) -> Option<String> {
        self.store.get(key).filter(|v| !v.is_empty())
    }
}

impl<S: KeyValueStore> SessionProvider for SessionStore<S> {
    fn current_user(&self) -> Option<UserInfo> {
        let raw = self.non_empty(USER_INFO_KEY)?;
        match serde_json::from_str::<UserInfo>(&raw) {
            Ok(user) if !user.username.is_empty() => Some(user),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable user_info");
                None
            }
        }
    }

    fn access_token(&self) -> Option<String> {
        self.non_empty(ACCESS_TOKEN_KEY)
    }

    fn refresh_token(&self) -> Option<String> {
        self.non_empty(REFRESH_TOKEN_KEY)
    }

    fn set_tokens(&self, access: &str, refresh: &str) {
        if !access.is_empty() {
            self.store.set(ACCESS_TOKEN_KEY, access);
        }
        if !refresh.is_empty() {
            self.store.set(REFRESH_TOKEN_KEY, refresh);
        }
    }

    fn set_user(&self, user: &UserInfo) {
        match serde_json::to_string(user) {
            Ok(json) => self.store.set(USER_INFO_KEY, &json),
            Err(e) => tracing::error!(error = %e, "failed to persist user_info"),
        }
    }

    fn clear(&self) {
        self.store.remove(ACCESS_TOKEN_KEY);
        self.store.remove(REFRESH_TOKEN_KEY);
        self.store.remove(USER_INFO_KEY);
    }
}
