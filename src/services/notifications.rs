// src/services/notifications.rs

//! Admin-triggered push notifications.
//!
//! The handler records the request; fan-out to devices is done by the
//! backend's messaging service watching the `notifications` collection.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::records::{NotificationRecord, collections};
use crate::services::authorize::{CallerContext, require_admin};
use crate::storage::{DocumentStore, document_id, put_typed};

const DEFAULT_TOPIC: &str = "all";
const MAX_TITLE_LEN: usize = 120;
const MAX_BODY_LEN: usize = 1000;

/// Payload of the `send_notification` call.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,

    #[serde(default)]
    pub topic: Option<String>,

    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

impl NotificationRequest {
    fn validate(&self) -> Result<()> {
        let title = self.title.trim();
        let body = self.body.trim();
        if title.is_empty() || body.is_empty() {
            return Err(AppError::validation("title and body are required"));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(AppError::validation(format!(
                "title exceeds {MAX_TITLE_LEN} characters"
            )));
        }
        if body.chars().count() > MAX_BODY_LEN {
            return Err(AppError::validation(format!(
                "body exceeds {MAX_BODY_LEN} characters"
            )));
        }
        Ok(())
    }
}

/// Record a notification for delivery. Admin only. Returns the stored record.
pub async fn send_notification(
    store: &dyn DocumentStore,
    caller: &CallerContext,
    request: NotificationRequest,
) -> Result<NotificationRecord> {
    let uid = require_admin(store, caller).await?;
    request.validate()?;

    let now = Utc::now();
    let title = request.title.trim().to_string();
    let body = request.body.trim().to_string();
    let topic = request
        .topic
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TOPIC.to_string());

    let record = NotificationRecord {
        id: document_id(&[&title, &body, &topic], now),
        title,
        body,
        topic,
        data: request.data,
        sent_by: uid.to_string(),
        created_at: now,
    };

    put_typed(store, collections::NOTIFICATIONS, &record.id, &record).await?;
    log::info!(
        "Notification {} queued for topic '{}' by {}",
        record.id,
        record.topic,
        uid
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::authorize::testing::seed_users;
    use crate::storage::{LocalStorage, get_typed};
    use tempfile::TempDir;

    fn request(title: &str, body: &str) -> NotificationRequest {
        NotificationRequest {
            title: title.to_string(),
            body: body.to_string(),
            topic: None,
            data: BTreeMap::new(),
        }
    }

    #[tokio::test]
    async fn test_admin_sends() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStorage::new(tmp.path());
        seed_users(&store).await;

        let record = send_notification(
            &store,
            &CallerContext::user("admin-1"),
            request(" Résultats du Bac ", "Les résultats sont disponibles."),
        )
        .await
        .unwrap();

        assert_eq!(record.title, "Résultats du Bac");
        assert_eq!(record.topic, "all");
        let stored: NotificationRecord =
            get_typed(&store, collections::NOTIFICATIONS, &record.id)
                .await
                .unwrap()
                .unwrap();
        assert_eq!(stored, record);
    }

    #[tokio::test]
    async fn test_student_rejected_before_write() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStorage::new(tmp.path());
        seed_users(&store).await;

        let err = send_notification(
            &store,
            &CallerContext::user("student-1"),
            request("Titre", "Corps"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied(_)));
        assert!(store.list(collections::NOTIFICATIONS).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_body_rejected() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStorage::new(tmp.path());
        seed_users(&store).await;

        let err = send_notification(&store, &CallerContext::user("admin-1"), request("Titre", " "))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
