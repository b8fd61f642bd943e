//! Read-only view over the payload segment of a session token
//!
//! The console never verifies token signatures; the backend does that on
//! every request. Claims are only read to drive UI decisions, so every
//! decoding failure collapses into `None`.

use crate::role::{ClaimedRole, Role};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claim keys carrying the role, in lookup order
pub const ROLE_CLAIM_KEYS: &[&str] = &[
    "role",
    "http://schemas.microsoft.com/ws/2008/06/identity/claims/role",
];

/// Claim keys carrying the display name, in lookup order
pub const NAME_CLAIM_KEYS: &[&str] = &[
    "name",
    "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name",
];

/// Claim keys carrying the e-mail address, in lookup order
pub const EMAIL_CLAIM_KEYS: &[&str] = &[
    "email",
    "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress",
];

/// Claim keys carrying the subject identifier, in lookup order
pub const SUBJECT_CLAIM_KEYS: &[&str] = &[
    "sub",
    "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier",
];

pub const EXPIRY_CLAIM_KEY: &str = "exp";
pub const ISSUED_AT_CLAIM_KEY: &str = "iat";

/// Decoded claim set of a session token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenClaims(Map<String, Value>);

impl TokenClaims {
    pub const fn from_map(claims: Map<String, Value>) -> Self {
        Self(claims)
    }

    /// Decode the payload of a `header.payload.signature` token.
    ///
    /// Returns `None` unless the token has exactly three segments and the
    /// middle one is base64url-encoded JSON describing an object.
    pub fn decode(token: &str) -> Option<Self> {
        let segments: Vec<&str> = token.split('.').collect();
        let [_, payload, _] = segments.as_slice() else {
            tracing::debug!(segments = segments.len(), "Token does not have three segments");
            return None;
        };

        let bytes = match decode_segment(payload) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!("Token payload is not valid base64url: {e}");
                return None;
            }
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(claims)) => Some(Self(claims)),
            Ok(_) => {
                tracing::debug!("Token payload is not a JSON object");
                None
            }
            Err(e) => {
                tracing::debug!("Token payload is not valid JSON: {e}");
                None
            }
        }
    }

    /// Raw claim value by exact key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// First non-null value among `keys`
    pub fn first_present(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter()
            .filter_map(|key| self.0.get(*key))
            .find(|value| !value.is_null())
    }

    /// First non-empty string value among `keys`
    pub fn first_text(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .filter_map(|key| self.0.get(*key))
            .filter_map(Value::as_str)
            .find(|text| !text.is_empty())
    }

    /// Role claim value before normalisation
    pub fn role_claim(&self) -> Option<&Value> {
        self.first_present(ROLE_CLAIM_KEYS)
    }

    /// Role claim read from the first present alias; an unrecognised value
    /// there does not fall through to later aliases.
    pub fn claimed_role(&self) -> Option<ClaimedRole> {
        self.role_claim().and_then(ClaimedRole::from_claim)
    }

    /// One of the five roles, if the claim names one
    pub fn role(&self) -> Option<Role> {
        self.claimed_role().and_then(ClaimedRole::role)
    }

    pub fn name(&self) -> Option<&str> {
        self.first_text(NAME_CLAIM_KEYS)
    }

    pub fn email(&self) -> Option<&str> {
        self.first_text(EMAIL_CLAIM_KEYS)
    }

    pub fn subject(&self) -> Option<&str> {
        self.first_text(SUBJECT_CLAIM_KEYS)
    }

    /// Expiry instant from the `exp` claim
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.0.get(EXPIRY_CLAIM_KEY).and_then(timestamp_claim)
    }

    /// Issue instant from the `iat` claim
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.0.get(ISSUED_AT_CLAIM_KEY).and_then(timestamp_claim)
    }

    /// A token without an expiry counts as expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_none_or(|expires_at| expires_at <= now)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

impl From<Map<String, Value>> for TokenClaims {
    fn from(claims: Map<String, Value>) -> Self {
        Self(claims)
    }
}

/// Decode one base64url token segment. Padding is optional and the
/// standard alphabet is accepted as well.
fn decode_segment(segment: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let normalized: String = segment
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    URL_SAFE_NO_PAD.decode(normalized)
}

/// Seconds-since-epoch claim, given as a number or a numeric string
fn timestamp_claim(value: &Value) -> Option<DateTime<Utc>> {
    let seconds = match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|secs| secs.floor() as i64))?,
        Value::String(raw) => raw.trim().parse().ok()?,
        _ => return None,
    };
    DateTime::from_timestamp(seconds, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::unsigned_token;
    use chrono::Duration;
    use serde_json::json;

    #[test]
    fn test_decode_returns_payload_object() {
        let payload = json!({"sub": "42", "role": 1, "exp": 4_102_444_800_i64, "nested": {"a": [1, 2]}});
        let claims = TokenClaims::decode(&unsigned_token(&payload)).unwrap();
        assert_eq!(Value::Object(claims.into_map()), payload);
    }

    #[test]
    fn test_decode_rejects_wrong_segment_count() {
        assert!(TokenClaims::decode("").is_none());
        assert!(TokenClaims::decode("abc").is_none());
        assert!(TokenClaims::decode("a.b").is_none());
        assert!(TokenClaims::decode("a.b.c.d").is_none());

        let token = unsigned_token(&json!({"role": 0}));
        assert!(TokenClaims::decode(&format!("{token}.extra")).is_none());
    }

    #[test]
    fn test_decode_rejects_garbage_payload() {
        assert!(TokenClaims::decode("x.!!!.y").is_none());
        // "bm90IGpzb24" is base64url for "not json"
        assert!(TokenClaims::decode("x.bm90IGpzb24.y").is_none());
        // "WzEsMl0" is base64url for "[1,2]"
        assert!(TokenClaims::decode("x.WzEsMl0.y").is_none());
    }

    #[test]
    fn test_decode_accepts_padded_and_standard_alphabet() {
        // {"name":"??>"} encodes with '+' and '=' padding in the standard alphabet
        let payload = br#"{"name":"??>"}"#;
        let standard = base64::engine::general_purpose::STANDARD.encode(payload);
        let claims = TokenClaims::decode(&format!("h.{standard}.s")).unwrap();
        assert_eq!(claims.name(), Some("??>"));
    }

    #[test]
    fn test_role_alias_precedence() {
        let claims = TokenClaims::decode(&unsigned_token(&json!({
            "role": "Teacher",
            "http://schemas.microsoft.com/ws/2008/06/identity/claims/role": "SuperAdmin",
        })))
        .unwrap();
        assert_eq!(claims.role(), Some(Role::Teacher));

        let legacy = TokenClaims::decode(&unsigned_token(&json!({
            "http://schemas.microsoft.com/ws/2008/06/identity/claims/role": "Admin",
        })))
        .unwrap();
        assert_eq!(legacy.role(), Some(Role::Admin));
    }

    #[test]
    fn test_super_admin_code_zero_is_a_role() {
        let claims = TokenClaims::decode(&unsigned_token(&json!({"role": 0}))).unwrap();
        assert_eq!(claims.role(), Some(Role::SuperAdmin));
    }

    #[test]
    fn test_unrecognised_primary_role_does_not_fall_through() {
        let claims = TokenClaims::decode(&unsigned_token(&json!({
            "role": "Janitor",
            "http://schemas.microsoft.com/ws/2008/06/identity/claims/role": "Admin",
        })))
        .unwrap();
        assert_eq!(claims.role(), None);
        assert_eq!(claims.claimed_role(), None);
    }

    #[test]
    fn test_unmapped_code_is_still_claimed() {
        let claims = TokenClaims::decode(&unsigned_token(&json!({
            "role": 9,
            "http://schemas.microsoft.com/ws/2008/06/identity/claims/role": "Admin",
        })))
        .unwrap();
        assert_eq!(claims.role(), None);
        assert_eq!(claims.claimed_role(), Some(ClaimedRole::Unmapped(9)));
    }

    #[test]
    fn test_name_and_email_fallbacks() {
        let claims = TokenClaims::decode(&unsigned_token(&json!({
            "name": "",
            "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name": "Huda",
            "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress": "huda@example.com",
        })))
        .unwrap();
        assert_eq!(claims.name(), Some("Huda"));
        assert_eq!(claims.email(), Some("huda@example.com"));
        assert_eq!(claims.subject(), None);
    }

    #[test]
    fn test_expiry() {
        let now = Utc::now();
        let future = TokenClaims::decode(&unsigned_token(&json!({
            "exp": (now + Duration::hours(1)).timestamp()
        })))
        .unwrap();
        assert!(!future.is_expired_at(now));

        let past = TokenClaims::decode(&unsigned_token(&json!({
            "exp": (now - Duration::hours(1)).timestamp()
        })))
        .unwrap();
        assert!(past.is_expired_at(now));

        let missing = TokenClaims::decode(&unsigned_token(&json!({"role": 1}))).unwrap();
        assert!(missing.is_expired_at(now));
    }

    #[test]
    fn test_expiry_boundary_is_expired() {
        let exp = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let claims = TokenClaims::decode(&unsigned_token(&json!({"exp": 1_700_000_000}))).unwrap();
        assert!(claims.is_expired_at(exp));
        assert!(!claims.is_expired_at(exp - Duration::seconds(1)));
    }

    #[test]
    fn test_timestamp_shapes() {
        let claims = TokenClaims::decode(&unsigned_token(&json!({
            "exp": "1700000000",
            "iat": 1_699_990_000.7,
        })))
        .unwrap();
        assert_eq!(claims.expires_at().unwrap().timestamp(), 1_700_000_000);
        assert_eq!(claims.issued_at().unwrap().timestamp(), 1_699_990_000);
    }
}
