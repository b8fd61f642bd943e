use super::page::{Page, PageId};
use crate::role::Role;
use thiserror::Error;

/// Reasons a navigation is turned away
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionDenied {
    /// No session, an expired one, or a role that could not be read
    #[error("Login required")]
    LoginRequired,

    /// A staff role opened a page outside its set
    #[error("Role '{role}' may not open '{page}'")]
    OutsideRole { role: Role, page: PageId },

    /// A non-staff role opened a console page
    #[error("Role '{role}' has insufficient permission for '{page}'")]
    InsufficientPermission { role: Role, page: PageId },

    /// A session whose role code maps to no role opened a console page
    #[error("Role code {code} has no permissions for '{page}'")]
    UnmappedRole { code: i64, page: PageId },

    /// A signed-in session opened the login page
    #[error("Already signed in as '{role}'")]
    AlreadySignedIn { role: Role },
}

/// Static role to page mapping. Anything not listed is denied.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionTable;

impl PermissionTable {
    /// Pages `role` may open
    pub const fn allowed_pages(role: Role) -> &'static [Page] {
        match role {
            Role::SuperAdmin => &[
                Page::Dashboard,
                Page::Supervisors,
                Page::Teachers,
                Page::Families,
                Page::Students,
                Page::Lessons,
            ],
            Role::Admin => &[
                Page::Dashboard,
                Page::Teachers,
                Page::Families,
                Page::Students,
                Page::Lessons,
            ],
            Role::Teacher => &[Page::Dashboard, Page::Lessons],
            Role::Student | Role::Family => &[],
        }
    }

    /// Pages for a possibly unknown role; unknown roles get nothing
    pub fn allowed_pages_for(role: Option<Role>) -> &'static [Page] {
        match role {
            Some(role) => Self::allowed_pages(role),
            None => &[],
        }
    }

    /// Whether `role` may open `page`
    pub fn permits(role: Role, page: &PageId) -> bool {
        page.page()
            .is_some_and(|page| Self::allowed_pages(role).contains(&page))
    }
}
