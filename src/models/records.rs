//! Documents kept in the managed backend store.
//!
//! These belong to the serverless handlers, not to the static directory.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Collection names used in the document store.
pub mod collections {
    pub const USERS: &str = "users";
    pub const SCHOLARSHIPS: &str = "scholarships";
    pub const INTERACTIONS: &str = "interactions";
    pub const NOTIFICATIONS: &str = "notifications";
    pub const MAIL: &str = "mail";
}

/// Role stored on a user profile.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Admin,
}

/// A user profile (`users/{uid}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub uid: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, rename = "displayName", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default)]
    pub role: Role,
}

/// Scholarship fields supplied by an admin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScholarshipInput {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Last day applications are accepted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

/// A stored scholarship (`scholarships/{id}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Scholarship {
    pub id: String,

    #[serde(flatten)]
    pub fields: ScholarshipInput,

    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Scholarship {
    /// Whether the application deadline is before `today`.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.fields.deadline.is_some_and(|d| d < today)
    }
}

/// A user interaction event (`interactions/{id}`), e.g. a viewed programme.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Interaction {
    pub id: String,
    pub user_id: String,
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// A push notification request (`notifications/{id}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationRecord {
    pub id: String,
    pub title: String,
    pub body: String,

    /// Topic subscribers receive the message; `all` when unset
    pub topic: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,

    pub sent_by: String,
    pub created_at: DateTime<Utc>,
}

/// An outgoing e-mail request (`mail/{id}`). Delivery is left to the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailRecord {
    pub id: String,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub requested_by: String,
    pub status: EmailStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmailStatus {
    Queued,
}
