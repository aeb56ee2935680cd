//! HTTP and session layer for the Camila web client.

pub mod api;
pub mod config;
pub mod http;
pub mod store;

pub use http::ApiClient;
pub use store::{
    KeyValueStore, MemoryStore, SessionProvider, SessionStore, SharedSession, ACCESS_TOKEN_KEY,
    REFRESH_TOKEN_KEY, USER_INFO_KEY,
};
