//! Role → permission → navigation tables and the pure checks over them.
//!
//! Every role lists its permissions explicitly. There is no inheritance
//! between roles and no runtime editing: the tables are `const` and every
//! lookup is total, with an absent role resolving to `Role::Guest`.

use crate::role::{Permission, Role};
use serde::Serialize;

/// Version of [`role_permissions`] and [`navigation_items`].
///
/// Changelog:
/// - v1: guest `view_chat`; user adds `view_own_history`; psychologist
///   `view_chat` + `view_psychologist_reports`; admin holds every permission.
/// - v2: psychologist gains `view_dashboard`, `upload_documents` and
///   `manage_lexicon` so the `/dashboard` route (allowed for psychologists)
///   is reachable; psychologist navigation gains the Dashboard item.
pub const PERMISSION_TABLE_VERSION: u32 = 2;

const GUEST_PERMISSIONS: &[Permission] = &[Permission::ViewChat];

const USER_PERMISSIONS: &[Permission] = &[Permission::ViewChat, Permission::ViewOwnHistory];

const PSYCHOLOGIST_PERMISSIONS: &[Permission] = &[
    Permission::ViewChat,
    Permission::ViewPsychologistReports,
    Permission::ViewDashboard,
    Permission::UploadDocuments,
    Permission::ManageLexicon,
];

const ADMIN_PERMISSIONS: &[Permission] = &[
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

/// One link in the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationItem {
    pub path: &'static str,
    pub label: &'static str,
    pub permission: Permission,
}

const fn nav(path: &'static str, label: &'static str, permission: Permission) -> NavigationItem {
    NavigationItem {
        path,
        label,
        permission,
    }
}

const GUEST_NAVIGATION: &[NavigationItem] = &[nav("/chat", "Chat", Permission::ViewChat)];

const USER_NAVIGATION: &[NavigationItem] = &[
    nav("/chat", "Chat", Permission::ViewChat),
    nav("/history", "Historia", Permission::ViewOwnHistory),
];

const PSYCHOLOGIST_NAVIGATION: &[NavigationItem] = &[
    nav("/chat", "Chat", Permission::ViewChat),
    nav(
        "/psychologist-reports",
        "Reportes",
        Permission::ViewPsychologistReports,
    ),
    nav("/dashboard", "Dashboard", Permission::ViewDashboard),
];

const ADMIN_NAVIGATION: &[NavigationItem] = &[
    nav("/chat", "Chat", Permission::ViewChat),
    nav("/history", "Historia", Permission::ViewOwnHistory),
    nav("/dashboard", "Dashboard", Permission::ViewDashboard),
    nav("/admin", "Admin", Permission::ViewAdminPanel),
    nav("/admin/roles", "Gestión de Roles", Permission::ManageRoles),
    nav("/status", "Estado", Permission::ViewSystemStatus),
];

/// Full permission set for a role (guest when absent).
pub fn role_permissions(role: Option<Role>) -> &'static [Permission] {
    match role.unwrap_or_default() {
        Role::Guest => GUEST_PERMISSIONS,
        Role::User => USER_PERMISSIONS,
        Role::Psychologist => PSYCHOLOGIST_PERMISSIONS,
        Role::Admin => ADMIN_PERMISSIONS,
    }
}

/// Whether `role` holds `permission`.
pub fn has_permission(role: Option<Role>, permission: Permission) -> bool {
    role_permissions(role).contains(&permission)
}

/// True if at least one of `permissions` is granted. An empty list grants nothing.
pub fn has_any_permission(role: Option<Role>, permissions: &[Permission]) -> bool {
    permissions.iter().any(|p| has_permission(role, *p))
}

/// True only if every one of `permissions` is granted.
pub fn has_all_permissions(role: Option<Role>, permissions: &[Permission]) -> bool {
    permissions.iter().all(|p| has_permission(role, *p))
}

/// Ordered navigation bar entries for a role (guest's single item when absent).
pub fn navigation_items(role: Option<Role>) -> &'static [NavigationItem] {
    match role.unwrap_or_default() {
        Role::Guest => GUEST_NAVIGATION,
        Role::User => USER_NAVIGATION,
        Role::Psychologist => PSYCHOLOGIST_NAVIGATION,
        Role::Admin => ADMIN_NAVIGATION,
    }
}

/// String-keyed variant of [`has_permission`] for raw role claims.
pub fn role_str_has_permission(role: Option<&str>, permission: Permission) -> bool {
    has_permission(role.map(Role::from_str_or_default), permission)
}
