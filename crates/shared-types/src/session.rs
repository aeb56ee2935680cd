use crate::role::Role;
use serde::{Deserialize, Deserializer, Serialize};

/// Cached identity record, persisted under the `user_info` key.
///
/// The auth endpoints name the identifier `user_id`; the cached record uses
/// `id`. Both spellings are accepted, and numeric ids are kept as strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UserInfo {
    #[serde(alias = "user_id", default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Accept a JSON string, number, or null as an identifier.
pub fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(match raw {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Bearer / refresh token pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Tokens {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
}

/// Identity and token state for the current browser profile.
///
/// `Anonymous` is a typed state, not a missing role: its role is always
/// `Role::Guest`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated { user: UserInfo, tokens: Tokens },
}

impl Session {
    /// Build a session from whatever was persisted. A record without a
    /// username counts as anonymous.
    pub fn from_parts(user: Option<UserInfo>, tokens: Tokens) -> Self {
        match user {
            Some(user) if !user.username.is_empty() => Session::Authenticated { user, tokens },
            _ => Session::Anonymous,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    pub fn role(&self) -> Role {
        match self {
            Session::Anonymous => Role::Guest,
            Session::Authenticated { user, .. } => user.role,
        }
    }

    pub fn user(&self) -> Option<&UserInfo> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated { user, .. } => Some(user),
        }
    }

    pub fn tokens(&self) -> Option<&Tokens> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated { tokens, .. } => Some(tokens),
        }
    }
}
