//! Where the session lives on each platform.

use client::{SessionStore, SharedSession};
use std::fmt::Debug;

/// Warn about a failed storage operation. Returns whether it succeeded.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn logged<E: Debug>(op: &str, key: &str, result: Result<(), E>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(op, key, error = ?e, "localStorage operation failed");
            false
        }
    }
}

/// `window.localStorage`, looked up on every access. Missing storage
/// (private mode, sandboxed iframes) reads as empty and drops writes.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

#[cfg(target_arch = "wasm32")]
impl client::KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            logged("write", key, storage.set_item(key, value));
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            logged("remove", key, storage.remove_item(key));
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn session_store() -> SharedSession {
    SessionStore::new(LocalStorage).into_shared()
}

/// Desktop builds keep the session for the lifetime of the process.
#[cfg(not(target_arch = "wasm32"))]
pub fn session_store() -> SharedSession {
    SessionStore::new(client::MemoryStore::new()).into_shared()
}
