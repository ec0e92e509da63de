//! Document store abstraction for the serverless handlers.
//!
//! Documents are JSON values addressed by `(collection, id)`. Both backends
//! use the same layout:
//!
//! ```text
//! {root}/
//! ├── users/
//! │   └── {uid}.json
//! ├── scholarships/
//! ├── interactions/
//! ├── notifications/
//! └── mail/
//! ```

pub mod local;
#[cfg(feature = "s3")]
pub mod s3;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::{AppError, Result};

// Re-export for convenience
pub use local::LocalStorage;

/// Trait for document storage backends.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read one document, `None` if it does not exist.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>>;

    /// Create or replace one document.
    async fn put(&self, collection: &str, id: &str, document: &Value) -> Result<()>;

    /// Delete one document. Returns whether it existed.
    async fn delete(&self, collection: &str, id: &str) -> Result<bool>;

    /// List `(id, document)` pairs of a collection, sorted by id.
    ///
    /// Documents that are not valid JSON are logged and left out.
    async fn list(&self, collection: &str) -> Result<Vec<(String, Value)>>;
}

/// Read and deserialize a typed document.
pub async fn get_typed<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: &str,
    id: &str,
) -> Result<Option<T>> {
    match store.get(collection, id).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Serialize and store a typed document.
pub async fn put_typed<T: Serialize + Sync>(
    store: &dyn DocumentStore,
    collection: &str,
    id: &str,
    document: &T,
) -> Result<()> {
    let value = serde_json::to_value(document)?;
    store.put(collection, id, &value).await
}

/// Derive a short document id from its content and creation time.
pub fn document_id(parts: &[&str], at: DateTime<Utc>) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
        hasher.update([0u8]);
    }
    hasher.update(at.timestamp_nanos_opt().unwrap_or_default().to_be_bytes());
    hex::encode(&hasher.finalize()[..10])
}

fn valid_segment(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('.')
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Reject collection names that would escape the store root.
pub(crate) fn check_collection(collection: &str) -> Result<()> {
    if valid_segment(collection) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "invalid collection '{collection}'"
        )))
    }
}

/// Reject keys that would escape the collection directory or key prefix.
pub(crate) fn check_key(collection: &str, id: &str) -> Result<()> {
    check_collection(collection)?;
    if valid_segment(id) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "invalid document key '{collection}/{id}'"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_is_stable() {
        let at = Utc::now();
        let a = document_id(&["title", "body"], at);
        assert_eq!(a, document_id(&["title", "body"], at));
        assert_eq!(a.len(), 20);
        assert_ne!(a, document_id(&["titlebody"], at));
    }

    #[test]
    fn test_check_key() {
        assert!(check_key("users", "u_1-A").is_ok());
        assert!(check_key("users", "").is_err());
        assert!(check_key("users", "../secret").is_err());
        assert!(check_key("..", "x").is_err());
        assert!(check_key("users", "a/b").is_err());
    }
}
