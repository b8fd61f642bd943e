//! Session context shared by the guard, the console client and components

use super::cookie::CookieJar;
use super::store::TokenStore;
use crate::error::SessionResult;
use chrono::{DateTime, Utc};
use std::rc::Rc;
use tutordesk_core::{
    ClaimedRole, PageId, PermissionTable, Role, SessionConfig, TokenClaims, UNKNOWN_ROLE_LABEL,
};

/// Handle to the current session. Cloning shares the same store.
///
/// Every query re-reads the cookie, so a token saved or cleared through
/// one handle is visible through all of them.
#[derive(Debug, Clone)]
pub struct SessionContext {
    store: Rc<TokenStore>,
}

impl PartialEq for SessionContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store)
    }
}

impl SessionContext {
    pub fn new(store: TokenStore) -> Self {
        Self {
            store: Rc::new(store),
        }
    }

    pub fn with_jar(jar: Rc<dyn CookieJar>, settings: &SessionConfig) -> Self {
        Self::new(TokenStore::new(jar, settings))
    }

    /// Session backed by `document.cookie`
    #[cfg(target_arch = "wasm32")]
    pub fn browser(settings: &SessionConfig) -> Self {
        Self::with_jar(Rc::new(super::cookie::BrowserCookieJar::new()), settings)
    }

    /// # Errors
    ///
    /// Returns an error if the token cannot be sealed or stored
    pub fn save_token(&self, token: &str) -> SessionResult<()> {
        self.store.save_token(token)
    }

    pub fn token(&self) -> Option<String> {
        self.store.token()
    }

    /// # Errors
    ///
    /// Returns an error if the cookie cannot be removed
    pub fn clear_token(&self) -> SessionResult<()> {
        self.store.clear_token()
    }

    /// A token is stored. Expiry is not checked.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Claims of the stored token; signatures are not verified
    pub fn decode_token(&self) -> Option<TokenClaims> {
        TokenClaims::decode(&self.token()?)
    }

    /// Role claimed by the stored token, expired or not
    pub fn user_role(&self) -> Option<Role> {
        self.decode_token()?.role()
    }

    /// True without a readable token, without `exp`, or once `exp` has passed
    pub fn is_token_expired(&self) -> bool {
        self.is_token_expired_at(Utc::now())
    }

    pub fn is_token_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.decode_token()
            .is_none_or(|claims| claims.is_expired_at(now))
    }

    /// Role of a present, unexpired token. This is the role used for
    /// authorization.
    pub fn active_role(&self) -> Option<Role> {
        self.active_role_at(Utc::now())
    }

    pub fn active_role_at(&self, now: DateTime<Utc>) -> Option<Role> {
        self.active_claimed_role_at(now).and_then(ClaimedRole::role)
    }

    /// Like [`Self::active_role`], but keeps a numeric role code that maps
    /// to no known role so it can be told apart from a missing claim
    pub fn active_claimed_role(&self) -> Option<ClaimedRole> {
        self.active_claimed_role_at(Utc::now())
    }

    pub fn active_claimed_role_at(&self, now: DateTime<Utc>) -> Option<ClaimedRole> {
        let claims = self.decode_token()?;
        if claims.is_expired_at(now) {
            return None;
        }
        claims.claimed_role()
    }

    pub fn user_name(&self) -> String {
        self.decode_token()
            .and_then(|claims| claims.name().map(str::to_string))
            .unwrap_or_else(|| UNKNOWN_ROLE_LABEL.to_string())
    }

    pub fn user_email(&self) -> String {
        self.decode_token()
            .and_then(|claims| claims.email().map(str::to_string))
            .unwrap_or_default()
    }

    /// Display label of the current role
    pub fn user_role_label(&self) -> &'static str {
        self.user_role().map_or(UNKNOWN_ROLE_LABEL, Role::label)
    }

    pub fn subject(&self) -> Option<String> {
        self.decode_token()?.subject().map(str::to_string)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.user_role() == Some(role)
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.user_role().is_some_and(|role| roles.contains(&role))
    }

    /// Whether the current role's permission set contains `page`
    pub fn can_access_page(&self, page: impl Into<PageId>) -> bool {
        let page = page.into();
        self.user_role()
            .is_some_and(|role| PermissionTable::permits(role, &page))
    }

    /// `Bearer <token>` for the stored token
    pub fn authorization_header(&self) -> Option<String> {
        self.token().map(|token| format!("Bearer {token}"))
    }
}
