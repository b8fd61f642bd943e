//! Navigation guards
//!
//! A guard asks the session for its active role, lets the access policy
//! decide, and on denial performs the redirect and shows the notice.

use crate::session::SessionContext;
use tutordesk_core::{AccessDecision, ClaimedRole, PageId, Role, RouteAccessPolicy};

/// Moves the app to another path
pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// Shows a one-line message to the user
pub trait Notifier {
    fn notify(&self, notice: &str);
}

/// Notifier that only writes to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &str) {
        tracing::info!(notice, "User notice");
    }
}

pub struct RouteGuard<N, T> {
    session: SessionContext,
    policy: RouteAccessPolicy,
    navigator: N,
    notifier: T,
}

impl<N: Navigator, T: Notifier> RouteGuard<N, T> {
    pub const fn new(
        session: SessionContext,
        policy: RouteAccessPolicy,
        navigator: N,
        notifier: T,
    ) -> Self {
        Self {
            session,
            policy,
            navigator,
            notifier,
        }
    }

    pub const fn session(&self) -> &SessionContext {
        &self.session
    }

    pub const fn policy(&self) -> &RouteAccessPolicy {
        &self.policy
    }

    /// Check a navigation to a page behind the permission table
    pub fn can_activate(&self, target_path: &str) -> AccessDecision {
        let page = PageId::from_path(target_path);
        let role = self.session.active_claimed_role();
        let decision = self.policy.decide(role, &page);

        if let AccessDecision::Deny(reason) = &decision {
            let role_label = role
                .and_then(ClaimedRole::role)
                .map_or(tutordesk_core::UNKNOWN_ROLE_LABEL, Role::label);
            tracing::warn!(role = role_label, %page, %reason, "Access denied");
        }
        self.apply(&decision);
        decision
    }

    /// Check a navigation to a page that only needs a session
    pub fn can_activate_signed_in(&self, target_path: &str) -> AccessDecision {
        let decision = self.policy.decide_signed_in(self.session.active_claimed_role());
        if let AccessDecision::Deny(reason) = &decision {
            tracing::warn!(target_path, %reason, "Access denied");
        }
        self.apply(&decision);
        decision
    }

    /// Check a navigation to the login page; signed-in users go home
    pub fn can_activate_login(&self) -> AccessDecision {
        let decision = self.policy.decide_login_page(self.session.active_role());
        if let AccessDecision::Deny(reason) = &decision {
            tracing::debug!(%reason, "Skipping login page");
        }
        self.apply(&decision);
        decision
    }

    fn apply(&self, decision: &AccessDecision) {
        if let Some(notice) = decision.notice() {
            self.notifier.notify(notice);
        }
        if let Some(target) = decision.redirect_target() {
            self.navigator.navigate(self.policy.redirect_path(target));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryCookieJar;
    use chrono::{Duration, Utc};
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tutordesk_core::access::{INSUFFICIENT_PERMISSION_NOTICE, LOGIN_REQUIRED_NOTICE};
    use tutordesk_core::testing::unsigned_token;
    use tutordesk_core::{PermissionDenied, SessionConfig};

    #[derive(Default, Clone)]
    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl Recorder {
        fn take(&self) -> Vec<String> {
            self.0.borrow_mut().drain(..).collect()
        }
    }

    impl Navigator for Recorder {
        fn navigate(&self, path: &str) {
            self.0.borrow_mut().push(path.to_string());
        }
    }

    impl Notifier for Recorder {
        fn notify(&self, notice: &str) {
            self.0.borrow_mut().push(notice.to_string());
        }
    }

    struct Fixture {
        guard: RouteGuard<Recorder, Recorder>,
        navigations: Recorder,
        notices: Recorder,
    }

    fn fixture() -> Fixture {
        let settings = SessionConfig {
            secret: "test-secret".to_string(),
            ..SessionConfig::default()
        };
        let session = SessionContext::with_jar(Rc::new(MemoryCookieJar::new()), &settings);
        let navigations = Recorder::default();
        let notices = Recorder::default();
        Fixture {
            guard: RouteGuard::new(
                session,
                RouteAccessPolicy::default(),
                navigations.clone(),
                notices.clone(),
            ),
            navigations,
            notices,
        }
    }

    fn sign_in(fixture: &Fixture, role: i64, exp: chrono::DateTime<Utc>) {
        let token = unsigned_token(&json!({"role": role, "exp": exp.timestamp()}));
        fixture.guard.session().save_token(&token).unwrap();
    }

    fn in_an_hour() -> chrono::DateTime<Utc> {
        Utc::now() + Duration::hours(1)
    }

    #[test]
    fn test_allowed_navigation_has_no_side_effects() {
        let fixture = fixture();
        sign_in(&fixture, 0, in_an_hour());

        assert!(fixture.guard.can_activate("/Teachers").is_allowed());
        assert!(fixture.navigations.take().is_empty());
        assert!(fixture.notices.take().is_empty());
    }

    #[test]
    fn test_teacher_is_sent_home_silently() {
        let fixture = fixture();
        sign_in(&fixture, 2, in_an_hour());

        let decision = fixture.guard.can_activate("/Supervisors");
        assert!(matches!(
            decision,
            AccessDecision::Deny(PermissionDenied::OutsideRole { role: Role::Teacher, .. })
        ));
        assert_eq!(fixture.navigations.take(), vec!["/Dashboard"]);
        assert!(fixture.notices.take().is_empty());
    }

    #[test]
    fn test_student_is_sent_to_login_with_notice() {
        let fixture = fixture();
        sign_in(&fixture, 3, in_an_hour());

        fixture.guard.can_activate("/Dashboard");
        assert_eq!(fixture.navigations.take(), vec!["/login"]);
        assert_eq!(fixture.notices.take(), vec![INSUFFICIENT_PERMISSION_NOTICE]);
    }

    #[test]
    fn test_unmapped_role_code_gets_insufficient_permission() {
        let fixture = fixture();
        sign_in(&fixture, 9, in_an_hour());

        let decision = fixture.guard.can_activate("/Dashboard");
        assert!(matches!(
            decision,
            AccessDecision::Deny(PermissionDenied::UnmappedRole { code: 9, .. })
        ));
        assert_eq!(fixture.navigations.take(), vec!["/login"]);
        assert_eq!(fixture.notices.take(), vec![INSUFFICIENT_PERMISSION_NOTICE]);

        assert!(fixture.guard.can_activate_login().is_allowed());
        assert!(fixture.navigations.take().is_empty());
    }

    #[test]
    fn test_no_session_requires_login() {
        let fixture = fixture();

        fixture.guard.can_activate("/Lessons");
        assert_eq!(fixture.navigations.take(), vec!["/login"]);
        assert_eq!(fixture.notices.take(), vec![LOGIN_REQUIRED_NOTICE]);
    }

    #[test]
    fn test_expired_session_requires_login() {
        let fixture = fixture();
        sign_in(&fixture, 0, Utc::now() - Duration::minutes(1));
        assert!(fixture.guard.session().is_authenticated());

        let decision = fixture.guard.can_activate("/Dashboard");
        assert_eq!(decision, AccessDecision::Deny(PermissionDenied::LoginRequired));
        assert_eq!(fixture.navigations.take(), vec!["/login"]);
    }

    #[test]
    fn test_signed_in_route() {
        let fixture = fixture();
        fixture.guard.can_activate_signed_in("/Companies");
        assert_eq!(fixture.navigations.take(), vec!["/login"]);
        assert_eq!(fixture.notices.take(), vec![LOGIN_REQUIRED_NOTICE]);

        sign_in(&fixture, 4, in_an_hour());
        assert!(fixture.guard.can_activate_signed_in("/Companies").is_allowed());
        assert!(fixture.navigations.take().is_empty());
    }

    #[test]
    fn test_login_page_sends_signed_in_user_home() {
        let fixture = fixture();
        assert!(fixture.guard.can_activate_login().is_allowed());

        sign_in(&fixture, 1, in_an_hour());
        assert!(!fixture.guard.can_activate_login().is_allowed());
        assert_eq!(fixture.navigations.take(), vec!["/Dashboard"]);
        assert!(fixture.notices.take().is_empty());
    }
}
