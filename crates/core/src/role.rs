//! Console roles and their claim representations

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

/// Display label used when a session carries no recognisable role
pub const UNKNOWN_ROLE_LABEL: &str = "مستخدم";

/// Authorization level assigned to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    SuperAdmin,
    Admin,
    Teacher,
    Student,
    Family,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

/// What a role claim turned out to hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimedRole {
    Known(Role),
    /// An integer code with no role behind it. Such a session has no
    /// permissions but is still a session.
    Unmapped(i64),
}

impl ClaimedRole {
    /// Read a role claim value.
    ///
    /// Numbers are codes. Strings are parsed as an integer code first and
    /// matched against the canonical names second. A name that matches no
    /// role, or any other JSON shape, is `None`.
    pub fn from_claim(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => {
                if let Some(code) = number.as_i64() {
                    return Some(Self::from_code(code));
                }
                number
                    .as_f64()
                    .filter(|code| code.fract() == 0.0)
                    .map(|code| Self::from_code(code as i64))
            }
            Value::String(raw) => {
                let trimmed = raw.trim();
                match trimmed.parse::<i64>() {
                    Ok(code) => Some(Self::from_code(code)),
                    Err(_) => Role::from_name(trimmed).map(Self::Known),
                }
            }
            _ => None,
        }
    }

    pub fn from_code(code: i64) -> Self {
        Role::from_code(code).map_or(Self::Unmapped(code), Self::Known)
    }

    pub const fn role(self) -> Option<Role> {
        match self {
            Self::Known(role) => Some(role),
            Self::Unmapped(_) => None,
        }
    }
}

impl From<Role> for ClaimedRole {
    fn from(role: Role) -> Self {
        Self::Known(role)
    }
}

impl Display for ClaimedRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(role) => Display::fmt(role, f),
            Self::Unmapped(code) => write!(f, "unmapped role {code}"),
        }
    }
}

impl Role {
    /// Every role, ordered by numeric code
    pub const ALL: [Self; 5] = [
        Self::SuperAdmin,
        Self::Admin,
        Self::Teacher,
        Self::Student,
        Self::Family,
    ];

    /// Numeric code the backend uses for this role
    pub const fn code(self) -> u8 {
        match self {
            Self::SuperAdmin => 0,
            Self::Admin => 1,
            Self::Teacher => 2,
            Self::Student => 3,
            Self::Family => 4,
        }
    }

    /// Look up a role by numeric code
    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|role| i64::from(role.code()) == code)
    }

    /// Look up a role by its canonical name (case-sensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.name() == name)
    }

    /// Normalise a role claim value to one of the five roles.
    ///
    /// An integer code outside 0–4 is `None` here; use
    /// [`ClaimedRole::from_claim`] to tell it apart from a missing role.
    pub fn from_claim(value: &Value) -> Option<Self> {
        ClaimedRole::from_claim(value).and_then(ClaimedRole::role)
    }

    /// Canonical English name, as found in string role claims
    pub const fn name(self) -> &'static str {
        match self {
            Self::SuperAdmin => "SuperAdmin",
            Self::Admin => "Admin",
            Self::Teacher => "Teacher",
            Self::Student => "Student",
            Self::Family => "Family",
        }
    }

    /// Label shown to console users
    pub const fn label(self) -> &'static str {
        match self {
            Self::SuperAdmin => "مشرف عام",
            Self::Admin => "مشرف",
            Self::Teacher => "معلم",
            Self::Student => "طالب",
            Self::Family => "عائلة",
        }
    }

    /// Staff roles land on the home page when they open a page they
    /// cannot see; everyone else is sent back to login.
    pub const fn is_staff(self) -> bool {
        matches!(self, Self::SuperAdmin | Self::Admin | Self::Teacher)
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let role = match trimmed.parse::<i64>() {
            Ok(code) => Self::from_code(code),
            Err(_) => Self::from_name(trimmed),
        };
        role.ok_or_else(|| UnknownRole(s.to_string()))
    }
}
