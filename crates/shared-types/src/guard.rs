//! Per-navigation route authorization.
//!
//! The guard is a pure function of the current [`Session`], the route's
//! [`RouteAccess`] and the configured [`DefaultAccess`] policy. It never
//! fails: every input resolves to render or to a redirect.

use crate::rbac::has_permission;
use crate::role::{Permission, Role};
use crate::routes::{RouteAccess, CHAT_PATH, LOGIN_PATH};
use crate::session::Session;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a guarded route with no role list behaves for anonymous visitors.
///
/// - `Public`: a guarded route without roles or permission renders for anyone.
/// - `Authenticated`: every guarded route needs a signed-in session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultAccess {
    #[default]
    Public,
    Authenticated,
}

impl DefaultAccess {
    pub fn as_str(&self) -> &'static str {
        match self {
            DefaultAccess::Public => "public",
            DefaultAccess::Authenticated => "authenticated",
        }
    }
}

/// Where a rejected navigation is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectTarget {
    Login,
    Chat,
}

impl RedirectTarget {
    pub fn path(&self) -> &'static str {
        match self {
            RedirectTarget::Login => LOGIN_PATH,
            RedirectTarget::Chat => CHAT_PATH,
        }
    }
}

/// Outcome of evaluating a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(RedirectTarget),
}

impl fmt::Display for GuardDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardDecision::Render => f.write_str("render"),
            GuardDecision::Redirect(target) => write!(f, "redirect {}", target.path()),
        }
    }
}

/// Route guard bound to one access policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Guard {
    pub default_access: DefaultAccess,
}

impl Guard {
    pub fn new(default_access: DefaultAccess) -> Self {
        Self { default_access }
    }

    /// Decide whether `session` may see a route with `access`.
    pub fn evaluate(&self, session: &Session, access: &RouteAccess) -> GuardDecision {
        let decision = match access {
            RouteAccess::Open => GuardDecision::Render,
            RouteAccess::Guarded { roles, permission } => {
                self.evaluate_guarded(session, roles, *permission)
            }
        };
        tracing::debug!(
            role = %session.role(),
            authenticated = session.is_authenticated(),
            policy = self.default_access.as_str(),
            %decision,
            "route guard evaluated"
        );
        decision
    }

    fn evaluate_guarded(
        &self,
        session: &Session,
        roles: &[Role],
        permission: Option<Permission>,
    ) -> GuardDecision {
        let needs_login = !roles.is_empty() || self.default_access == DefaultAccess::Authenticated;
        if !session.is_authenticated() && needs_login {
            return GuardDecision::Redirect(RedirectTarget::Login);
        }

        let role = session.role();
        if !roles.is_empty() && !roles.contains(&role) {
            return GuardDecision::Redirect(RedirectTarget::Chat);
        }

        if let Some(permission) = permission {
            if !has_permission(Some(role), permission) {
                return GuardDecision::Redirect(RedirectTarget::Chat);
            }
        }

        GuardDecision::Render
    }

    /// Evaluate a path against [`crate::routes::ROUTE_TABLE`].
    pub fn evaluate_path(&self, session: &Session, path: &str) -> GuardDecision {
        self.evaluate(session, &crate::routes::route_access(path))
    }
}
