//! AWS S3 document store.
//!
//! Documents live at `s3://{bucket}/{prefix}/{collection}/{id}.json`.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::storage::{DocumentStore, check_collection, check_key};

/// S3-based document storage.
#[derive(Clone)]
pub struct S3Storage {
    client: Client,
    bucket: String,
    prefix: String,
}

impl S3Storage {
    /// Create a new S3 storage instance.
    pub fn new(client: Client, bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            prefix: prefix.into().trim_matches('/').to_string(),
        }
    }

    /// Create S3 storage from environment configuration.
    pub async fn from_env() -> Result<Self> {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = Client::new(&config);

        let bucket = std::env::var("S3_BUCKET")
            .map_err(|_| AppError::config("S3_BUCKET is not set"))?;
        let prefix = std::env::var("S3_PREFIX").unwrap_or_else(|_| "orientation".to_string());

        Ok(Self::new(client, bucket, prefix))
    }

    fn collection_prefix(&self, collection: &str) -> String {
        if self.prefix.is_empty() {
            format!("{collection}/")
        } else {
            format!("{}/{}/", self.prefix, collection)
        }
    }

    fn key(&self, collection: &str, id: &str) -> String {
        format!("{}{}.json", self.collection_prefix(collection), id)
    }

    async fn read_key(&self, key: &str) -> Result<Option<Value>> {
        let result = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await;

        match result {
            Ok(output) => {
                let bytes = output.body.collect().await.map_err(AppError::storage)?;
                Ok(Some(serde_json::from_slice(&bytes.into_bytes())?))
            }
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_no_such_key() {
                    Ok(None)
                } else {
                    Err(AppError::storage(service_err))
                }
            }
        }
    }

    async fn exists(&self, key: &str) -> bool {
        self.client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .is_ok()
    }
}

#[async_trait]
impl DocumentStore for S3Storage {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        check_key(collection, id)?;
        self.read_key(&self.key(collection, id)).await
    }

    async fn put(&self, collection: &str, id: &str, document: &Value) -> Result<()> {
        check_key(collection, id)?;
        let key = self.key(collection, id);
        let body = ByteStream::from(serde_json::to_vec_pretty(document)?);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(body)
            .content_type("application/json")
            .send()
            .await
            .map_err(AppError::storage)?;

        log::debug!("Wrote s3://{}/{}", self.bucket, key);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool> {
        check_key(collection, id)?;
        let key = self.key(collection, id);
        if !self.exists(&key).await {
            return Ok(false);
        }

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
            .map_err(AppError::storage)?;

        log::debug!("Deleted s3://{}/{}", self.bucket, key);
        Ok(true)
    }

    async fn list(&self, collection: &str) -> Result<Vec<(String, Value)>> {
        check_collection(collection)?;
        let prefix = self.collection_prefix(collection);
        let mut keys = Vec::new();
        let mut token: Option<String> = None;

        loop {
            let output = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(&prefix)
                .set_continuation_token(token.take())
                .send()
                .await
                .map_err(AppError::storage)?;

            keys.extend(
                output
                    .contents()
                    .iter()
                    .filter_map(|object| object.key().map(str::to_string)),
            );

            match output.next_continuation_token() {
                Some(next) => token = Some(next.to_string()),
                None => break,
            }
        }

        let mut documents = Vec::new();
        for key in keys {
            let Some(id) = key
                .strip_prefix(&prefix)
                .and_then(|rest| rest.strip_suffix(".json"))
                .filter(|id| !id.contains('/'))
            else {
                continue;
            };
            match self.read_key(&key).await {
                Ok(Some(value)) => documents.push((id.to_string(), value)),
                Ok(None) => {}
                Err(AppError::Json(e)) => log::warn!("Skipping unreadable {}: {}", key, e),
                Err(e) => return Err(e),
            }
        }

        documents.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(documents)
    }
}
