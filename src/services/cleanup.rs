// src/services/cleanup.rs

//! Scheduled daily cleanup.
//!
//! Runs without a caller: the scheduler is the only trigger.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::models::CleanupConfig;
use crate::models::records::{Interaction, Scholarship, collections};
use crate::storage::DocumentStore;

/// Counts reported by one cleanup run.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct CleanupReport {
    pub interactions_deleted: usize,
    pub scholarships_deleted: usize,
    /// Documents that could not be parsed and were left in place
    pub skipped: usize,
}

/// Delete stale interactions and expired scholarships as of `now`.
pub async fn run_daily_cleanup(
    store: &dyn DocumentStore,
    config: &CleanupConfig,
    now: DateTime<Utc>,
) -> Result<CleanupReport> {
    let mut report = CleanupReport::default();
    let cutoff = now - Duration::days(i64::from(config.interaction_retention_days));

    for (id, value) in store.list(collections::INTERACTIONS).await? {
        match serde_json::from_value::<Interaction>(value) {
            Ok(interaction) if interaction.created_at < cutoff => {
                if store.delete(collections::INTERACTIONS, &id).await? {
                    report.interactions_deleted += 1;
                }
            }
            Ok(_) => {}
            Err(e) => {
                log::warn!("Skipping interaction {}: {}", id, e);
                report.skipped += 1;
            }
        }
    }

    if config.purge_expired_scholarships {
        let today = now.date_naive();
        for (id, value) in store.list(collections::SCHOLARSHIPS).await? {
            match serde_json::from_value::<Scholarship>(value) {
                Ok(scholarship) if scholarship.is_expired(today) => {
                    if store.delete(collections::SCHOLARSHIPS, &id).await? {
                        report.scholarships_deleted += 1;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    log::warn!("Skipping scholarship {}: {}", id, e);
                    report.skipped += 1;
                }
            }
        }
    }

    log::info!(
        "Cleanup done: {} interactions, {} scholarships deleted, {} skipped",
        report.interactions_deleted,
        report.scholarships_deleted,
        report.skipped
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::records::ScholarshipInput;
    use crate::storage::{LocalStorage, put_typed};
    use chrono::{NaiveDate, TimeZone};
    use serde_json::json;
    use tempfile::TempDir;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 3, 0, 0).unwrap()
    }

    async fn seed(store: &LocalStorage) {
        for (id, created_at) in [("old", at(2026, 1, 1)), ("recent", at(2026, 10, 1))] {
            let interaction = Interaction {
                id: id.to_string(),
                user_id: "student-1".to_string(),
                kind: "view".to_string(),
                target: Some("/series/tsexp".to_string()),
                created_at,
            };
            put_typed(store, collections::INTERACTIONS, id, &interaction)
                .await
                .unwrap();
        }

        for (id, deadline) in [
            ("expired", NaiveDate::from_ymd_opt(2026, 10, 1)),
            ("open", NaiveDate::from_ymd_opt(2026, 12, 31)),
            ("no-deadline", None),
        ] {
            let scholarship = Scholarship {
                id: id.to_string(),
                fields: ScholarshipInput {
                    title: id.to_string(),
                    provider: None,
                    description: None,
                    amount: None,
                    link: None,
                    deadline,
                },
                created_by: "admin-1".to_string(),
                created_at: at(2026, 1, 1),
                updated_at: at(2026, 1, 1),
            };
            put_typed(store, collections::SCHOLARSHIPS, id, &scholarship)
                .await
                .unwrap();
        }

        store
            .put(collections::INTERACTIONS, "broken", &json!({"kind": 3}))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_cleanup_removes_stale_documents() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStorage::new(tmp.path());
        seed(&store).await;

        let report = run_daily_cleanup(&store, &CleanupConfig::default(), at(2026, 10, 19))
            .await
            .unwrap();

        assert_eq!(
            report,
            CleanupReport {
                interactions_deleted: 1,
                scholarships_deleted: 1,
                skipped: 1,
            }
        );
        assert!(store.get(collections::INTERACTIONS, "recent").await.unwrap().is_some());
        assert!(store.get(collections::INTERACTIONS, "broken").await.unwrap().is_some());
        assert_eq!(store.list(collections::SCHOLARSHIPS).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_scholarship_purge_can_be_disabled() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStorage::new(tmp.path());
        seed(&store).await;

        let config = CleanupConfig {
            purge_expired_scholarships: false,
            ..CleanupConfig::default()
        };
        let report = run_daily_cleanup(&store, &config, at(2026, 10, 19))
            .await
            .unwrap();
        assert_eq!(report.scholarships_deleted, 0);
        assert_eq!(store.list(collections::SCHOLARSHIPS).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_invalid_json_does_not_abort_cleanup() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStorage::new(tmp.path());
        seed(&store).await;
        std::fs::write(tmp.path().join("interactions/corrupt.json"), "{not json").unwrap();

        let report = run_daily_cleanup(&store, &CleanupConfig::default(), at(2026, 10, 19))
            .await
            .unwrap();

        assert_eq!(report.interactions_deleted, 1);
        assert!(store.get(collections::INTERACTIONS, "old").await.unwrap().is_none());
        assert!(tmp.path().join("interactions/corrupt.json").exists());
    }

    #[tokio::test]
    async fn test_empty_store() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStorage::new(tmp.path());
        let report = run_daily_cleanup(&store, &CleanupConfig::default(), Utc::now())
            .await
            .unwrap();
        assert_eq!(report, CleanupReport::default());
    }
}
