//! Wire DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! Only the fields the client branches on are typed. The rest of a profile
//! (habits, emotional logs, challenge state, professional details) stays
//! opaque JSON so server-side schema changes pass through untouched.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// User classification that decides which screens are shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Patient,
    ActiveUser,
    Professional,
    Family,
}

impl Role {
    pub const ALL: [Self; 4] = [Self::Patient, Self::ActiveUser, Self::Professional, Self::Family];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::ActiveUser => "active_user",
            Self::Professional => "professional",
            Self::Family => "family",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patient" => Ok(Self::Patient),
            "active_user" => Ok(Self::ActiveUser),
            "professional" => Ok(Self::Professional),
            "family" => Ok(Self::Family),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// Authenticated account returned by `/api/auth/me`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub picture: Option<String>,
}

/// Cached copy of `/api/profile`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// `None` until the user picks a role. The server stores "unset" as an
    /// empty string, null, or a missing key.
    #[serde(default, deserialize_with = "deserialize_optional_role")]
    pub role: Option<Role>,
    #[serde(default)]
    pub profile_completed: bool,
    /// Every other profile attribute, untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn deserialize_optional_role<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(D::Error::custom),
    }
}

/// Body returned by the session exchange and by email login/registration.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub session_token: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Clone, Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub name: &'a str,
}

#[derive(Clone, Debug, Serialize)]
pub struct ChangePasswordRequest<'a> {
    pub current_password: &'a str,
    pub new_password: &'a str,
}

#[derive(Clone, Debug, Serialize)]
pub struct SetRoleRequest<'a> {
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identification: Option<&'a str>,
}

/// Window for the server's AI analysis endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalysisPeriod {
    Week,
    Month,
}

impl AnalysisPeriod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl FromStr for AnalysisPeriod {
    type Err = crate::error::ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(crate::error::ApiError::InvalidPeriod(other.to_owned())),
        }
    }
}

impl fmt::Display for AnalysisPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
