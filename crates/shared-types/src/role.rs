use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// End-user category that determines baseline access.
///
/// - `Guest`: unauthenticated, or any role string the client does not recognize.
/// - `User`: registered person talking to the assistant.
/// - `Psychologist`: clinician reviewing conversations and curating the lexicon.
/// - `Admin`: operator with every permission.
///
/// Serialized as a lowercase string. Deserialization never fails on a bad
/// value: anything unrecognized becomes `Guest`, so a corrupted `user_info`
/// record degrades to guest access instead of breaking the session load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum Role {
    #[default]
    Guest,
    User,
    Psychologist,
    Admin,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Guest, Role::User, Role::Psychologist, Role::Admin];

    /// Parse a role claim. Unknown values default to Guest.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "user" => Role::User,
            "psychologist" => Role::Psychologist,
            "admin" => Role::Admin,
            _ => Role::Guest,
        }
    }

    /// Lowercase wire / storage form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::User => "user",
            Role::Psychologist => "psychologist",
            Role::Admin => "admin",
        }
    }

    /// Display name shown in the navbar greeting and the admin screens.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Guest => "Invitado",
            Role::User => "Usuario",
            Role::Psychologist => "Psicólogo",
            Role::Admin => "Administrador",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(raw
            .as_str()
            .map(Role::from_str_or_default)
            .unwrap_or_default())
    }
}

/// Atomic capability token gating one feature or action.
///
/// The set is closed and fixed at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewChat,
    ViewOwnHistory,
    ViewAllHistory,
    ViewDashboard,
    ViewAdminPanel,
    ManageRoles,
    ManageUsers,
    ViewSystemStatus,
    ManageLexicon,
    UploadDocuments,
    ViewReports,
    ViewPsychologistReports,
}

impl Permission {
    pub const ALL: [Permission; 12] = [
        Permission::ViewChat,
        Permission::ViewOwnHistory,
        Permission::ViewAllHistory,
        Permission::ViewDashboard,
        Permission::ViewAdminPanel,
        Permission::ManageRoles,
        Permission::ManageUsers,
        Permission::ViewSystemStatus,
        Permission::ManageLexicon,
        Permission::UploadDocuments,
        Permission::ViewReports,
        Permission::ViewPsychologistReports,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewChat => "view_chat",
            Permission::ViewOwnHistory => "view_own_history",
            Permission::ViewAllHistory => "view_all_history",
            Permission::ViewDashboard => "view_dashboard",
            Permission::ViewAdminPanel => "view_admin_panel",
            Permission::ManageRoles => "manage_roles",
            Permission::ManageUsers => "manage_users",
            Permission::ViewSystemStatus => "view_system_status",
            Permission::ManageLexicon => "manage_lexicon",
            Permission::UploadDocuments => "upload_documents",
            Permission::ViewReports => "view_reports",
            Permission::ViewPsychologistReports => "view_psychologist_reports",
        }
    }

    /// Parse a permission token. Unknown tokens are `None`; there is no
    /// fallback permission.
    pub fn parse(s: &str) -> Option<Self> {
        Permission::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_or_default_known_values() {
        assert_eq!(Role::from_str_or_default("user"), Role::User);
        assert_eq!(Role::from_str_or_default("Psychologist"), Role::Psychologist);
        assert_eq!(Role::from_str_or_default("ADMIN"), Role::Admin);
        assert_eq!(Role::from_str_or_default(" admin "), Role::Admin);
        assert_eq!(Role::from_str_or_default("guest"), Role::Guest);
    }

    #[test]
    fn from_str_or_default_unknown_falls_to_guest() {
        assert_eq!(Role::from_str_or_default(""), Role::Guest);
        assert_eq!(Role::from_str_or_default("superuser"), Role::Guest);
        assert_eq!(Role::from_str_or_default("{\"role\":1}"), Role::Guest);
    }

    #[test]
    fn role_as_str_roundtrip() {
        for role in Role::ALL {
            assert_eq!(Role::from_str_or_default(role.as_str()), role);
        }
    }

    #[test]
    fn role_deserializes_unknown_and_non_string_as_guest() {
        let unknown: Role = serde_json::from_str(r#""root""#).unwrap();
        assert_eq!(unknown, Role::Guest);
        let number: Role = serde_json::from_str("7").unwrap();
        assert_eq!(number, Role::Guest);
        let null: Role = serde_json::from_str("null").unwrap();
        assert_eq!(null, Role::Guest);
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Role::Psychologist).unwrap(),
            r#""psychologist""#
        );
    }

    #[test]
    fn permission_wire_names_match_as_str() {
        for permission in Permission::ALL {
            let json = serde_json::to_string(&permission).unwrap();
            assert_eq!(json, format!("\"{}\"", permission.as_str()));
        }
    }

    #[test]
    fn permission_parse_rejects_unknown_tokens() {
        assert_eq!(Permission::parse("manage_roles"), Some(Permission::ManageRoles));
        assert_eq!(Permission::parse("Manage_Roles"), None);
        assert_eq!(Permission::parse("delete_everything"), None);
    }
}
