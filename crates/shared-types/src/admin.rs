use crate::session::deserialize_id;
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

/// A role record as stored by the backend's admin API. Names are free-form
/// strings there; the client only understands the four built-in ones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RoleRecord {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A user row in the admin panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AdminUser {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateRoleRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "El nombre del rol es obligatorio"))
    )]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssignRoleRequest {
    pub user_id: String,
    pub role_name: String,
}
