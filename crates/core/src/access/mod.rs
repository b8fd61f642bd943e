//! Role-based page access

pub mod page;
pub mod permissions;
pub mod policies;

pub use page::{Page, PageId};
pub use permissions::{PermissionDenied, PermissionTable};
pub use policies::{
    AccessDecision, INSUFFICIENT_PERMISSION_NOTICE, LOGIN_REQUIRED_NOTICE, RedirectTarget,
    RouteAccessPolicy,
};
