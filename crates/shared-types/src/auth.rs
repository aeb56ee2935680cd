use crate::role::Role;
use crate::session::{deserialize_id, Tokens, UserInfo};
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

/// Which login endpoint a credential pair is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginPortal {
    #[default]
    User,
    Psychologist,
    Admin,
}

impl LoginPortal {
    pub const ALL: [LoginPortal; 3] = [
        LoginPortal::User,
        LoginPortal::Psychologist,
        LoginPortal::Admin,
    ];

    /// Endpoint path relative to the API base.
    pub fn path(&self) -> &'static str {
        match self {
            LoginPortal::User => "/auth/login/user",
            LoginPortal::Psychologist => "/auth/login/psychologist",
            LoginPortal::Admin => "/auth/login/admin",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoginPortal::User => "Usuario",
            LoginPortal::Psychologist => "Psicólogo",
            LoginPortal::Admin => "Administrador",
        }
    }
}

/// Credentials for any of the login portals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct LoginRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "El usuario o email es obligatorio"))
    )]
    pub username_or_email: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "La contraseña es obligatoria"))
    )]
    pub password: String,
}

/// Self-service registration. The backend assigns the `user` role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct RegisterRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "El usuario es obligatorio"))
    )]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Email no válido"))
    )]
    pub email: Option<String>,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "La contraseña es obligatoria"))
    )]
    pub password: String,
}

/// Body returned by login, register and refresh.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub user_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub role: Role,
}

impl AuthResponse {
    pub fn tokens(&self) -> Tokens {
        Tokens {
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
        }
    }

    /// The identity record cached after a successful sign-in.
    pub fn user_info(&self, email: Option<String>) -> UserInfo {
        UserInfo {
            id: self.user_id.clone(),
            username: self.username.clone(),
            role: self.role,
            email,
        }
    }
}

/// Body of `POST /auth/refresh` and `POST /auth/logout`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshRequest {
    pub refresh_token: String,
}
