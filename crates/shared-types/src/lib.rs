pub mod error;
pub mod config;

// Access control
pub mod role;
pub mod rbac;
pub mod routes;
pub mod guard;
pub mod session;

// Backend API bodies
pub mod admin;
pub mod auth;
pub mod chat;
pub mod ingest;
pub mod symptoms;

pub use error::*;
pub use config::*;

pub use role::*;
pub use rbac::*;
pub use routes::*;
pub use guard::*;
pub use session::*;

pub use admin::*;
pub use auth::*;
pub use chat::*;
pub use ingest::*;
pub use symptoms::*;
