// src/services/scholarships.rs

//! Admin CRUD on scholarship documents.

use chrono::Utc;

use crate::error::{AppError, Result};
use crate::models::records::{Scholarship, ScholarshipInput, collections};
use crate::services::authorize::{CallerContext, require_admin};
use crate::storage::{DocumentStore, document_id, get_typed, put_typed};

fn validate(input: &ScholarshipInput) -> Result<()> {
    if input.title.trim().is_empty() {
        return Err(AppError::validation("scholarship title is required"));
    }
    Ok(())
}

/// Create a scholarship. Admin only.
pub async fn create_scholarship(
    store: &dyn DocumentStore,
    caller: &CallerContext,
    mut input: ScholarshipInput,
) -> Result<Scholarship> {
    let uid = require_admin(store, caller).await?;
    validate(&input)?;
    input.title = input.title.trim().to_string();

    let now = Utc::now();
    let scholarship = Scholarship {
        id: document_id(&[&input.title, uid], now),
        fields: input,
        created_by: uid.to_string(),
        created_at: now,
        updated_at: now,
    };

    put_typed(store, collections::SCHOLARSHIPS, &scholarship.id, &scholarship).await?;
    log::info!("Scholarship {} created by {}", scholarship.id, uid);
    Ok(scholarship)
}

/// Replace the fields of an existing scholarship. Admin only.
pub async fn update_scholarship(
    store: &dyn DocumentStore,
    caller: &CallerContext,
    id: &str,
    mut input: ScholarshipInput,
) -> Result<Scholarship> {
    let uid = require_admin(store, caller).await?;
    validate(&input)?;
    input.title = input.title.trim().to_string();

    let mut scholarship: Scholarship = get_typed(store, collections::SCHOLARSHIPS, id)
        .await?
        .ok_or_else(|| AppError::not_found(collections::SCHOLARSHIPS, id))?;

    scholarship.fields = input;
    scholarship.updated_at = Utc::now();

    put_typed(store, collections::SCHOLARSHIPS, id, &scholarship).await?;
    log::info!("Scholarship {} updated by {}", id, uid);
    Ok(scholarship)
}

/// Delete a scholarship. Admin only.
pub async fn delete_scholarship(
    store: &dyn DocumentStore,
    caller: &CallerContext,
    id: &str,
) -> Result<()> {
    let uid = require_admin(store, caller).await?;

    if !store.delete(collections::SCHOLARSHIPS, id).await? {
        return Err(AppError::not_found(collections::SCHOLARSHIPS, id));
    }
    log::info!("Scholarship {} deleted by {}", id, uid);
    Ok(())
}

/// List scholarships, soonest deadline first; open-ended ones last.
pub async fn list_scholarships(store: &dyn DocumentStore) -> Result<Vec<Scholarship>> {
    let mut scholarships: Vec<Scholarship> = store
        .list(collections::SCHOLARSHIPS)
        .await?
        .into_iter()
        .filter_map(|(id, value)| match serde_json::from_value(value) {
            Ok(scholarship) => Some(scholarship),
            Err(e) => {
                log::warn!("Skipping scholarship {}: {}", id, e);
                None
            }
        })
        .collect();

    scholarships.sort_by_key(|s| (s.fields.deadline.is_none(), s.fields.deadline));
    Ok(scholarships)
}
