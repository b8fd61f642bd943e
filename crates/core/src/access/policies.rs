use super::page::PageId;
use super::permissions::{PermissionDenied, PermissionTable};
use crate::config::RouteConfig;
use crate::role::{ClaimedRole, Role};

/// Notice shown when a navigation needs a session first
pub const LOGIN_REQUIRED_NOTICE: &str = "الرجاء تسجيل الدخول";

/// Notice shown when a non-staff role reaches a console page
pub const INSUFFICIENT_PERMISSION_NOTICE: &str = "ليس لديك صلاحيات كافية للوصول لهذه الصفحة";

/// Where a denied navigation is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectTarget {
    Login,
    Home,
}

/// Outcome of one navigation check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny(PermissionDenied),
}

impl AccessDecision {
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Redirect target for a denial, `None` when allowed
    pub const fn redirect_target(&self) -> Option<RedirectTarget> {
        match self {
            Self::Allow => None,
            Self::Deny(PermissionDenied::LoginRequired)
            | Self::Deny(PermissionDenied::InsufficientPermission { .. })
            | Self::Deny(PermissionDenied::UnmappedRole { .. }) => {
                Some(RedirectTarget::Login)
            }
            Self::Deny(PermissionDenied::OutsideRole { .. })
            | Self::Deny(PermissionDenied::AlreadySignedIn { .. }) => Some(RedirectTarget::Home),
        }
    }

    /// User-visible message that accompanies the redirect, if any
    pub const fn notice(&self) -> Option<&'static str> {
        match self {
            Self::Deny(PermissionDenied::LoginRequired) => Some(LOGIN_REQUIRED_NOTICE),
            Self::Deny(
                PermissionDenied::InsufficientPermission { .. }
                | PermissionDenied::UnmappedRole { .. },
            ) => Some(INSUFFICIENT_PERMISSION_NOTICE),
            _ => None,
        }
    }
}

/// Decides whether a role may open a page, and where to go otherwise
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteAccessPolicy {
    login_path: String,
    home_path: String,
}

impl RouteAccessPolicy {
    pub fn new(login_path: impl Into<String>, home_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
            home_path: home_path.into(),
        }
    }

    pub fn from_config(routes: &RouteConfig) -> Self {
        Self::new(&routes.login_path, &routes.home_path)
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn home_path(&self) -> &str {
        &self.home_path
    }

    /// Path a redirect target resolves to
    pub fn redirect_path(&self, target: RedirectTarget) -> &str {
        match target {
            RedirectTarget::Login => &self.login_path,
            RedirectTarget::Home => &self.home_path,
        }
    }

    /// Decide a navigation to a guarded page
    pub fn decide(&self, role: Option<ClaimedRole>, page: &PageId) -> AccessDecision {
        let role = match role {
            None => return AccessDecision::Deny(PermissionDenied::LoginRequired),
            Some(ClaimedRole::Unmapped(code)) => {
                return AccessDecision::Deny(PermissionDenied::UnmappedRole {
                    code,
                    page: page.clone(),
                });
            }
            Some(ClaimedRole::Known(role)) => role,
        };

        if PermissionTable::permits(role, page) {
            return AccessDecision::Allow;
        }

        let page = page.clone();
        if role.is_staff() {
            AccessDecision::Deny(PermissionDenied::OutsideRole { role, page })
        } else {
            AccessDecision::Deny(PermissionDenied::InsufficientPermission { role, page })
        }
    }

    /// Decide a navigation to a page that only needs a session, not a
    /// permission table entry
    pub const fn decide_signed_in(&self, role: Option<ClaimedRole>) -> AccessDecision {
        match role {
            Some(_) => AccessDecision::Allow,
            None => AccessDecision::Deny(PermissionDenied::LoginRequired),
        }
    }

    /// Decide a navigation to the login page itself
    pub const fn decide_login_page(&self, role: Option<Role>) -> AccessDecision {
        match role {
            Some(role) => AccessDecision::Deny(PermissionDenied::AlreadySignedIn { role }),
            None => AccessDecision::Allow,
        }
    }
}

impl Default for RouteAccessPolicy {
    fn default() -> Self {
        Self::from_config(&RouteConfig::default())
    }
}
