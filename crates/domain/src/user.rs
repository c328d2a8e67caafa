//! The remote user resource.
//!
//! The service owns these records; the suite only creates, reads, updates and
//! deletes one of them per run.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl UserId {
    /// Reads an id out of a JSON value. Accepts integers and numeric strings.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_u64().map(Self),
            serde_json::Value::String(s) => s.parse().ok().map(Self),
            _ => None,
        }
    }

    /// The id as JSON, for equality assertions against response bodies.
    #[must_use]
    pub fn to_json(self) -> serde_json::Value {
        serde_json::Value::from(self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User gender as the remote service models it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// "male"
    Male,
    /// "female"
    Female,
}

/// Account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// "active"
    #[default]
    Active,
    /// "inactive"
    Inactive,
}

/// Payload for creating a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Display name
    pub name: String,
    /// Gender
    pub gender: Gender,
    /// Email; must not already exist on the service
    pub email: String,
    /// Initial status
    pub status: UserStatus,
}

impl NewUser {
    /// Creates a payload.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        gender: Gender,
        email: impl Into<String>,
        status: UserStatus,
    ) -> Self {
        Self {
            name: name.into(),
            gender,
            email: email.into(),
            status,
        }
    }
}

/// Partial update payload. Absent fields are left untouched by the service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    /// New display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
}

impl UserUpdate {
    /// Sets the name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn status(mut self, status: UserStatus) -> Self {
        self.status = Some(status);
        self
    }
}
