//! Console route table

use crate::guard::{Navigator, Notifier, RouteGuard};
use tutordesk_core::{AccessDecision, Page, PageId};
use yew_router::Routable;

#[derive(Clone, Debug, PartialEq, Eq, Routable)]
pub enum AppRoute {
    #[at("/")]
    Root,
    #[at("/login")]
    Login,
    #[at("/Dashboard")]
    Dashboard,
    #[at("/Supervisors")]
    Supervisors,
    #[at("/Teachers")]
    Teachers,
    #[at("/Families")]
    Families,
    #[at("/Students")]
    Students,
    #[at("/Lessons")]
    Lessons,
    #[at("/Companies")]
    Companies,
    #[at("/ServiceCategory")]
    ServiceCategory,
    #[at("/serviceCompanies/:service_id")]
    ServiceCompanies { service_id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// What a route requires before it renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAccess {
    /// Redirect-only routes
    Open,
    /// Only reachable without an active session
    LoginPage,
    /// Any active session
    SignedIn,
    /// An entry in the permission table
    Page(PageId),
}

impl AppRoute {
    /// Route for a navigation target. The root and unknown paths land on
    /// the companies catalogue.
    pub fn resolve(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };

        match Self::recognize(path) {
            Some(Self::Root | Self::NotFound) | None => Self::Companies,
            Some(route) => route,
        }
    }

    /// Console page behind the permission table, if this is one
    pub const fn page(&self) -> Option<Page> {
        match self {
            Self::Dashboard => Some(Page::Dashboard),
            Self::Supervisors => Some(Page::Supervisors),
            Self::Teachers => Some(Page::Teachers),
            Self::Families => Some(Page::Families),
            Self::Students => Some(Page::Students),
            Self::Lessons => Some(Page::Lessons),
            _ => None,
        }
    }

    pub fn access(&self) -> RouteAccess {
        if let Some(page) = self.page() {
            return RouteAccess::Page(page.into());
        }
        match self {
            Self::Login => RouteAccess::LoginPage,
            Self::Companies | Self::ServiceCategory | Self::ServiceCompanies { .. } => {
                RouteAccess::SignedIn
            }
            _ => RouteAccess::Open,
        }
    }
}

impl<N: Navigator, T: Notifier> RouteGuard<N, T> {
    /// Run the guard that protects `route`
    pub fn check_route(&self, route: &AppRoute) -> AccessDecision {
        match route.access() {
            RouteAccess::Open => AccessDecision::Allow,
            RouteAccess::LoginPage => self.can_activate_login(),
            RouteAccess::SignedIn => self.can_activate_signed_in(&route.to_path()),
            RouteAccess::Page(_) => self.can_activate(&route.to_path()),
        }
    }
}

impl Navigator for yew_router::navigator::Navigator {
    fn navigate(&self, path: &str) {
        self.push(&AppRoute::resolve(path));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_paths() {
        assert_eq!(AppRoute::resolve("/login"), AppRoute::Login);
        assert_eq!(AppRoute::resolve("/Dashboard"), AppRoute::Dashboard);
        assert_eq!(AppRoute::resolve("/Teachers?page=2"), AppRoute::Teachers);
        assert_eq!(AppRoute::resolve("/Lessons/"), AppRoute::Lessons);
        assert_eq!(
            AppRoute::resolve("/serviceCompanies/17"),
            AppRoute::ServiceCompanies {
                service_id: "17".to_string()
            }
        );
    }

    #[test]
    fn test_root_and_unknown_land_on_companies() {
        assert_eq!(AppRoute::resolve("/"), AppRoute::Companies);
        assert_eq!(AppRoute::resolve(""), AppRoute::Companies);
        assert_eq!(AppRoute::resolve("/no/such/page"), AppRoute::Companies);
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(AppRoute::Supervisors.to_path(), "/Supervisors");
        assert_eq!(
            AppRoute::ServiceCompanies {
                service_id: "3".to_string()
            }
            .to_path(),
            "/serviceCompanies/3"
        );
    }

    #[test]
    fn test_route_access() {
        assert_eq!(AppRoute::Login.access(), RouteAccess::LoginPage);
        assert_eq!(AppRoute::ServiceCategory.access(), RouteAccess::SignedIn);
        assert_eq!(
            AppRoute::Families.access(),
            RouteAccess::Page(PageId::new("families"))
        );
        assert_eq!(AppRoute::NotFound.access(), RouteAccess::Open);

        let guarded = [
            AppRoute::Dashboard,
            AppRoute::Supervisors,
            AppRoute::Teachers,
            AppRoute::Families,
            AppRoute::Students,
            AppRoute::Lessons,
        ];
        for route in guarded {
            let page = route.page().unwrap();
            assert_eq!(PageId::from_path(&route.to_path()), PageId::from(page));
        }
    }
}
