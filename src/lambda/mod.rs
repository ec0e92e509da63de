// src/lambda/mod.rs

//! Serverless request dispatch.
//!
//! One function handles every callable and the daily schedule. Three payload
//! shapes are accepted:
//!
//! - An EventBridge scheduled event (`"detail-type": "Scheduled Event"`),
//!   which runs the daily cleanup and nothing else.
//! - An API Gateway request. The action is read from `body` and the caller
//!   from the authorizer claims in `requestContext`.
//! - A direct invoke. The payload is the action and the caller is the
//!   invocation's Cognito identity, if any.
//!
//! ```json
//! {"action": "send_notification", "title": "...", "body": "..."}
//! ```
//!
//! The caller is never taken from the action payload.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::CleanupConfig;
use crate::models::records::ScholarshipInput;
use crate::services::{self, CallerContext, EmailRequest, NotificationRequest};
use crate::storage::DocumentStore;

const SCHEDULER_SOURCE: &str = "aws.events";
const SCHEDULED_DETAIL_TYPE: &str = "Scheduled Event";

/// A callable action, as sent by the app.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    SendNotification(NotificationRequest),
    SendEmail(EmailRequest),
    CreateScholarship { scholarship: ScholarshipInput },
    UpdateScholarship { id: String, scholarship: ScholarshipInput },
    DeleteScholarship { id: String },
    ListScholarships,
}

impl Action {
    /// Action name as it appears in the payload.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SendNotification(_) => "send_notification",
            Self::SendEmail(_) => "send_email",
            Self::CreateScholarship { .. } => "create_scholarship",
            Self::UpdateScholarship { .. } => "update_scholarship",
            Self::DeleteScholarship { .. } => "delete_scholarship",
            Self::ListScholarships => "list_scholarships",
        }
    }
}

/// One Lambda invocation, after the caller has been established.
#[derive(Debug)]
pub enum Invocation {
    /// Fired by the daily schedule
    Scheduled,
    Call {
        caller: CallerContext,
        action: Action,
    },
}

impl Invocation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scheduled => "daily_cleanup",
            Self::Call { action, .. } => action.name(),
        }
    }

    /// Classify a raw payload.
    ///
    /// `invoker` is the identity the runtime attached to a direct invoke.
    pub fn from_payload(payload: Value, invoker: Option<String>) -> Result<Self> {
        if payload.get("requestContext").is_some() {
            let request: GatewayRequest = serde_json::from_value(payload).map_err(invalid)?;
            return request.into_invocation();
        }

        if payload.get("detail-type").is_some() {
            let event: ScheduledEvent = serde_json::from_value(payload).map_err(invalid)?;
            if event.source == SCHEDULER_SOURCE && event.detail_type == SCHEDULED_DETAIL_TYPE {
                return Ok(Self::Scheduled);
            }
            return Err(AppError::validation(format!(
                "unsupported event '{}' from '{}'",
                event.detail_type, event.source
            )));
        }

        let action = serde_json::from_value(payload).map_err(invalid)?;
        Ok(Self::Call {
            caller: CallerContext { uid: invoker },
            action,
        })
    }
}

fn invalid(err: serde_json::Error) -> AppError {
    AppError::validation(format!("invalid payload: {err}"))
}

#[derive(Debug, Deserialize)]
struct ScheduledEvent {
    #[serde(default)]
    source: String,

    #[serde(rename = "detail-type")]
    detail_type: String,
}

/// API Gateway proxy request (REST or HTTP API).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GatewayRequest {
    request_context: GatewayContext,

    #[serde(default)]
    body: Option<String>,

    #[serde(default)]
    is_base64_encoded: bool,
}

#[derive(Debug, Deserialize)]
struct GatewayContext {
    #[serde(default)]
    authorizer: Option<Authorizer>,
}

/// HTTP APIs nest claims under `jwt`; REST APIs with a Cognito authorizer
/// put them directly under `claims`.
#[derive(Debug, Deserialize)]
struct Authorizer {
    #[serde(default)]
    jwt: Option<JwtAuthorizer>,

    #[serde(default)]
    claims: Option<Claims>,
}

#[derive(Debug, Deserialize)]
struct JwtAuthorizer {
    claims: Claims,
}

#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    sub: Option<String>,
}

impl GatewayRequest {
    fn into_invocation(self) -> Result<Invocation> {
        if self.is_base64_encoded {
            return Err(AppError::validation("base64-encoded bodies are not supported"));
        }

        let uid = self.request_context.authorizer.and_then(|authorizer| {
            authorizer
                .jwt
                .map(|jwt| jwt.claims)
                .or(authorizer.claims)
                .and_then(|claims| claims.sub)
        });

        let body = self.body.unwrap_or_default();
        let action = serde_json::from_str(&body).map_err(invalid)?;
        Ok(Invocation::Call {
            caller: CallerContext { uid },
            action,
        })
    }
}

/// Lambda response payload.
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct Response {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    /// Machine-readable error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            ..Default::default()
        }
    }

    pub fn failed(err: &AppError) -> Self {
        Self {
            success: false,
            code: Some(err.code().to_string()),
            error: Some(err.to_string()),
            ..Default::default()
        }
    }
}

/// Run one invocation against the store. Errors become failed responses.
pub async fn dispatch(
    store: &dyn DocumentStore,
    cleanup: &CleanupConfig,
    invocation: Invocation,
) -> Response {
    match run(store, cleanup, invocation).await {
        Ok(data) => Response::ok(data),
        Err(e) => {
            log::error!("Handler failed: {}", e);
            Response::failed(&e)
        }
    }
}

async fn run(
    store: &dyn DocumentStore,
    cleanup: &CleanupConfig,
    invocation: Invocation,
) -> Result<Value> {
    let (caller, action) = match invocation {
        Invocation::Scheduled => {
            let report = services::run_daily_cleanup(store, cleanup, Utc::now()).await?;
            return Ok(serde_json::to_value(report)?);
        }
        Invocation::Call { caller, action } => (caller, action),
    };

    let data = match action {
        Action::SendNotification(request) => {
            let record = services::send_notification(store, &caller, request).await?;
            serde_json::json!({ "id": record.id })
        }
        Action::SendEmail(request) => {
            let record = services::send_email(store, &caller, request).await?;
            serde_json::json!({ "id": record.id, "status": record.status })
        }
        Action::CreateScholarship { scholarship } => {
            serde_json::to_value(services::create_scholarship(store, &caller, scholarship).await?)?
        }
        Action::UpdateScholarship { id, scholarship } => serde_json::to_value(
            services::update_scholarship(store, &caller, &id, scholarship).await?,
        )?,
        Action::DeleteScholarship { id } => {
            services::delete_scholarship(store, &caller, &id).await?;
            serde_json::json!({ "id": id })
        }
        Action::ListScholarships => {
            serde_json::to_value(services::list_scholarships(store).await?)?
        }
    };
    Ok(data)
}

/// Cleanup settings from the environment (`RETENTION_DAYS`, `PURGE_EXPIRED`).
pub fn cleanup_config_from_env() -> CleanupConfig {
    cleanup_config_from_vars(
        std::env::var("RETENTION_DAYS").ok().as_deref(),
        std::env::var("PURGE_EXPIRED").ok().as_deref(),
    )
}

/// Apply overrides on top of the defaults. Values that do not parse, or a
/// zero retention, are ignored with a warning.
fn cleanup_config_from_vars(retention_days: Option<&str>, purge: Option<&str>) -> CleanupConfig {
    let mut config = CleanupConfig::default();

    if let Some(raw) = retention_days {
        match raw.trim().parse::<u32>() {
            Ok(days) if days > 0 => config.interaction_retention_days = days,
            _ => log::warn!(
                "Ignoring RETENTION_DAYS='{}', keeping {} days",
                raw,
                config.interaction_retention_days
            ),
        }
    }

    if let Some(raw) = purge {
        match raw.trim().parse() {
            Ok(purge) => config.purge_expired_scholarships = purge,
            Err(_) => log::warn!("Ignoring PURGE_EXPIRED='{}'", raw),
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::records::collections;
    use crate::services::authorize::testing::seed_users;
    use crate::storage::LocalStorage;
    use serde_json::json;
    use tempfile::TempDir;

    fn direct(payload: Value, invoker: Option<&str>) -> Invocation {
        Invocation::from_payload(payload, invoker.map(str::to_string)).unwrap()
    }

    fn gateway(body: &str, sub: Option<&str>) -> Value {
        let authorizer = match sub {
            Some(sub) => json!({"jwt": {"claims": {"sub": sub}}}),
            None => Value::Null,
        };
        json!({
            "requestContext": {"authorizer": authorizer},
            "body": body,
            "isBase64Encoded": false
        })
    }

    fn scheduled() -> Value {
        json!({
            "source": "aws.events",
            "detail-type": "Scheduled Event",
            "detail": {}
        })
    }

    #[test]
    fn test_parse_direct_invoke() {
        match direct(json!({"action": "send_notification", "title": "T", "body": "B"}), None) {
            Invocation::Call { caller, action } => {
                assert!(caller.uid.is_none());
                assert!(matches!(action, Action::SendNotification(ref r) if r.title == "T"));
            }
            other => panic!("unexpected invocation {other:?}"),
        }

        let err = Invocation::from_payload(json!({"action": "drop_tables"}), None).unwrap_err();
        assert_eq!(Response::failed(&err).code.as_deref(), Some("invalid-argument"));
    }

    #[test]
    fn test_parse_gateway_claims() {
        let payload = gateway(r#"{"action": "list_scholarships"}"#, Some("student-1"));
        match Invocation::from_payload(payload, None).unwrap() {
            Invocation::Call { caller, action } => {
                assert_eq!(caller.uid.as_deref(), Some("student-1"));
                assert_eq!(action.name(), "list_scholarships");
            }
            other => panic!("unexpected invocation {other:?}"),
        }

        let rest = json!({
            "requestContext": {"authorizer": {"claims": {"sub": "admin-1"}}},
            "body": r#"{"action": "delete_scholarship", "id": "x"}"#
        });
        match Invocation::from_payload(rest, None).unwrap() {
            Invocation::Call { caller, .. } => assert_eq!(caller.uid.as_deref(), Some("admin-1")),
            other => panic!("unexpected invocation {other:?}"),
        }
    }

    #[test]
    fn test_cleanup_only_from_scheduler() {
        assert!(matches!(direct(scheduled(), None), Invocation::Scheduled));

        let forged = json!({"source": "app", "detail-type": "Scheduled Event"});
        assert!(Invocation::from_payload(forged, None).is_err());

        for payload in [
            json!({"action": "daily_cleanup"}),
            gateway(r#"{"action": "daily_cleanup"}"#, Some("admin-1")),
        ] {
            assert!(Invocation::from_payload(payload, Some("admin-1".into())).is_err());
        }
    }

    #[tokio::test]
    async fn test_body_caller_is_ignored() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStorage::new(tmp.path());
        seed_users(&store).await;
        store
            .put(collections::SCHOLARSHIPS, "x", &json!({"title": "Bourse"}))
            .await
            .unwrap();

        let body = r#"{"action": "delete_scholarship", "caller": {"uid": "admin-1"}, "id": "x"}"#;
        for payload in [
            serde_json::from_str::<Value>(body).unwrap(),
            gateway(body, None),
        ] {
            let invocation = Invocation::from_payload(payload, None).unwrap();
            let response = dispatch(&store, &CleanupConfig::default(), invocation).await;
            assert!(!response.success);
            assert_eq!(response.code.as_deref(), Some("unauthenticated"));
        }
        assert!(store.get(collections::SCHOLARSHIPS, "x").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_dispatch_create_and_list() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStorage::new(tmp.path());
        seed_users(&store).await;

        let create = gateway(
            r#"{"action": "create_scholarship",
                "scholarship": {"title": "Bourse Campus France", "deadline": "2026-11-30"}}"#,
            Some("admin-1"),
        );
        let created = dispatch(
            &store,
            &CleanupConfig::default(),
            Invocation::from_payload(create, None).unwrap(),
        )
        .await;
        assert!(created.success, "{:?}", created.error);

        let listed = dispatch(
            &store,
            &CleanupConfig::default(),
            direct(json!({"action": "list_scholarships"}), None),
        )
        .await;
        let data = listed.data.unwrap();
        assert_eq!(data.as_array().unwrap().len(), 1);
        assert_eq!(data[0]["title"], "Bourse Campus France");
    }

    #[tokio::test]
    async fn test_dispatch_cleanup() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStorage::new(tmp.path());

        let response = dispatch(&store, &CleanupConfig::default(), direct(scheduled(), None)).await;
        assert!(response.success);
        assert_eq!(response.data.unwrap()["interactions_deleted"], 0);
    }

    #[test]
    fn test_cleanup_overrides() {
        let config = cleanup_config_from_vars(Some("30"), Some("false"));
        assert_eq!(config.interaction_retention_days, 30);
        assert!(!config.purge_expired_scholarships);

        let defaults = CleanupConfig::default();
        for raw in ["0", "-5", "soon"] {
            let config = cleanup_config_from_vars(Some(raw), Some("maybe"));
            assert_eq!(
                config.interaction_retention_days,
                defaults.interaction_retention_days
            );
            assert_eq!(
                config.purge_expired_scholarships,
                defaults.purge_expired_scholarships
            );
        }
    }
}
