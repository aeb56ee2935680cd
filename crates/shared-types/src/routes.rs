use crate::role::{Permission, Role};

/// Access requirement attached to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Never evaluated by the guard (sign-in screens and the chat).
    Open,
    /// Evaluated by the guard on every navigation.
    Guarded {
        /// Allowed roles; empty means "any role".
        roles: &'static [Role],
        permission: Option<Permission>,
    },
}

/// A path and its access requirement. The router binds each path to a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteSpec {
    pub path: &'static str,
    pub access: RouteAccess,
}

const fn open(path: &'static str) -> RouteSpec {
    RouteSpec {
        path,
        access: RouteAccess::Open,
    }
}

const fn guarded(
    path: &'static str,
    roles: &'static [Role],
    permission: Permission,
) -> RouteSpec {
    RouteSpec {
        path,
        access: RouteAccess::Guarded {
            roles,
            permission: Some(permission),
        },
    }
}

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const CHAT_PATH: &str = "/chat";
pub const CONVERSATIONAL_CHAT_PATH: &str = "/chat/conversational";
pub const HISTORY_PATH: &str = "/history";
pub const PSYCHOLOGIST_REPORTS_PATH: &str = "/psychologist-reports";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const ADMIN_PATH: &str = "/admin";
pub const ROLE_MANAGEMENT_PATH: &str = "/admin/roles";
pub const STATUS_PATH: &str = "/status";

/// Every routed path of the application, in declaration order.
pub const ROUTE_TABLE: &[RouteSpec] = &[
    open(LOGIN_PATH),
    open(REGISTER_PATH),
    open(CHAT_PATH),
    open(CONVERSATIONAL_CHAT_PATH),
    guarded(
        HISTORY_PATH,
        &[Role::User, Role::Admin],
        Permission::ViewOwnHistory,
    ),
    guarded(
        PSYCHOLOGIST_REPORTS_PATH,
        &[Role::Psychologist, Role::Admin],
        Permission::ViewPsychologistReports,
    ),
    guarded(
        DASHBOARD_PATH,
        &[Role::Psychologist, Role::Admin],
        Permission::ViewDashboard,
    ),
    guarded(ADMIN_PATH, &[Role::Admin], Permission::ViewAdminPanel),
    guarded(ROLE_MANAGEMENT_PATH, &[Role::Admin], Permission::ManageRoles),
    guarded(STATUS_PATH, &[Role::Admin], Permission::ViewSystemStatus),
];

/// Look up a path in [`ROUTE_TABLE`]. Trailing slashes are ignored.
pub fn route_spec(path: &str) -> Option<&'static RouteSpec> {
    let trimmed = path.trim_end_matches('/');
    let normalized = if trimmed.is_empty() { "/" } else { trimmed };
    ROUTE_TABLE.iter().find(|spec| spec.path == normalized)
}

/// Access requirement for a path. Unknown paths are open (they render the 404 view).
pub fn route_access(path: &str) -> RouteAccess {
    route_spec(path)
        .map(|spec| spec.access)
        .unwrap_or(RouteAccess::Open)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rbac::{has_permission, navigation_items};

    #[test]
    fn paths_are_unique() {
        for (i, spec) in ROUTE_TABLE.iter().enumerate() {
            assert!(
                !ROUTE_TABLE[i + 1..].iter().any(|other| other.path == spec.path),
                "{} declared twice",
                spec.path
            );
        }
    }

    #[test]
    fn chat_and_auth_pages_are_open() {
        for path in [LOGIN_PATH, REGISTER_PATH, CHAT_PATH, CONVERSATIONAL_CHAT_PATH] {
            assert_eq!(route_access(path), RouteAccess::Open, "{path}");
        }
    }

    #[test]
    fn guarded_permission_is_reachable_by_some_allowed_role() {
        for spec in ROUTE_TABLE {
            if let RouteAccess::Guarded { roles, permission: Some(p) } = spec.access {
                assert!(
                    roles.iter().any(|r| has_permission(Some(*r), p)),
                    "{} is unreachable",
                    spec.path
                );
            }
        }
    }

    #[test]
    fn every_navigation_link_has_a_route() {
        for role in Role::ALL {
            for item in navigation_items(Some(role)) {
                assert!(route_spec(item.path).is_some(), "{} has no route", item.path);
            }
        }
    }

    #[test]
    fn route_spec_ignores_trailing_slash() {
        assert_eq!(route_spec("/admin/roles/").map(|s| s.path), Some(ROLE_MANAGEMENT_PATH));
        assert!(route_spec("/nope").is_none());
        assert_eq!(route_access("/nope"), RouteAccess::Open);
    }

    #[test]
    fn admin_routes_allow_only_admin() {
        for path in [ADMIN_PATH, ROLE_MANAGEMENT_PATH, STATUS_PATH] {
            match route_access(path) {
                RouteAccess::Guarded { roles, .. } => assert_eq!(roles, &[Role::Admin]),
                RouteAccess::Open => panic!("{path} must be guarded"),
            }
        }
    }
}
