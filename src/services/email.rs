// src/services/email.rs

//! E-mail requests from signed-in users.
//!
//! No mail is sent from here: the request is validated and queued in the
//! `mail` collection for the backend's mail extension.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::records::{EmailRecord, EmailStatus, collections};
use crate::services::authorize::{CallerContext, require_caller};
use crate::storage::{DocumentStore, document_id, put_typed};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email pattern")
});

/// Payload of the `send_email` call.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailRequest {
    pub to: String,
    pub subject: String,

    #[serde(default)]
    pub body: String,
}

/// Queue an e-mail. Requires a signed-in caller.
pub async fn send_email(
    store: &dyn DocumentStore,
    caller: &CallerContext,
    request: EmailRequest,
) -> Result<EmailRecord> {
    let uid = require_caller(caller)?;

    let to = request.to.trim();
    if !EMAIL.is_match(to) {
        return Err(AppError::validation(format!("invalid recipient '{to}'")));
    }
    let subject = request.subject.trim();
    if subject.is_empty() {
        return Err(AppError::validation("subject is required"));
    }

    let now = Utc::now();
    let record = EmailRecord {
        id: document_id(&[to, subject, uid], now),
        to: to.to_string(),
        subject: subject.to_string(),
        body: request.body,
        requested_by: uid.to_string(),
        status: EmailStatus::Queued,
        created_at: now,
    };

    put_typed(store, collections::MAIL, &record.id, &record).await?;
    log::info!("E-mail {} queued for {}", record.id, record.to);
    Ok(record)
}
