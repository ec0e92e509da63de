//! Local filesystem document store.
//!
//! One pretty-printed JSON file per document at
//! `{root}/{collection}/{id}.json`. Used for development and tests; the
//! serverless deployment can use `S3Storage` instead.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::storage::{DocumentStore, check_collection, check_key};

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Directory holding one subdirectory per collection.
    pub fn root(&self) -> &Path {
        &self.root_dir
    }

    fn path(&self, collection: &str, id: &str) -> PathBuf {
        self.root_dir.join(collection).join(format!("{id}.json"))
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, path: &PathBuf, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, path: &PathBuf) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[async_trait]
impl DocumentStore for LocalStorage {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        check_key(collection, id)?;
        match self.read_bytes(&self.path(collection, id)).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, collection: &str, id: &str, document: &Value) -> Result<()> {
        check_key(collection, id)?;
        let bytes = serde_json::to_vec_pretty(document)?;
        self.write_bytes(&self.path(collection, id), &bytes).await?;
        log::debug!("Stored {}/{}", collection, id);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool> {
        check_key(collection, id)?;
        match tokio::fs::remove_file(self.path(collection, id)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    async fn list(&self, collection: &str) -> Result<Vec<(String, Value)>> {
        check_collection(collection)?;
        let dir = self.root_dir.join(collection);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(AppError::Io(e)),
        };

        let mut documents = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Some(bytes) = self.read_bytes(&path).await? else {
                continue;
            };
            match serde_json::from_slice(&bytes) {
                Ok(document) => documents.push((id.to_string(), document)),
                Err(e) => log::warn!("Skipping unreadable {}/{}: {}", collection, id, e),
            }
        }

        documents.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(documents)
    }
}
