// src/services/authorize.rs

//! Caller checks run before any handler touches the store.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::records::{Role, UserProfile, collections};
use crate::storage::{DocumentStore, get_typed};

/// Identity attached to a callable request by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CallerContext {
    #[serde(default)]
    pub uid: Option<String>,
}

impl CallerContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn user(uid: impl Into<String>) -> Self {
        Self {
            uid: Some(uid.into()),
        }
    }
}

/// Return the caller's uid, or fail if the request carries no identity.
pub fn require_caller(caller: &CallerContext) -> Result<&str> {
    caller
        .uid
        .as_deref()
        .map(str::trim)
        .filter(|uid| !uid.is_empty())
        .ok_or_else(|| AppError::unauthenticated("You must be signed in to call this function"))
}

/// Return the caller's uid if their stored profile has the admin role.
pub async fn require_admin<'a>(
    store: &dyn DocumentStore,
    caller: &'a CallerContext,
) -> Result<&'a str> {
    let uid = require_caller(caller)?;
    let profile: Option<UserProfile> = get_typed(store, collections::USERS, uid).await?;

    match profile {
        Some(profile) if profile.role == Role::Admin => Ok(uid),
        _ => {
            log::warn!("Rejected admin call from {}", uid);
            Err(AppError::permission_denied("Admin role required"))
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use serde_json::json;

    use crate::models::records::collections;
    use crate::storage::{DocumentStore, LocalStorage};

    /// Seed one admin (`admin-1`) and one student (`student-1`).
    pub async fn seed_users(store: &LocalStorage) {
        store
            .put(
                collections::USERS,
                "admin-1",
                &json!({"uid": "admin-1", "role": "admin"}),
            )
            .await
            .unwrap();
        store
            .put(
                collections::USERS,
                "student-1",
                &json!({"uid": "student-1", "role": "student"}),
            )
            .await
            .unwrap();
    }
}
