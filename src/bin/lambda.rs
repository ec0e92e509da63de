//! AWS Lambda entry point for the orientation backend
//!
//! Deploy with `cargo lambda build --release --features lambda,s3`.
//! Every callable and the daily schedule invoke the same function. The
//! caller identity comes from the invocation context, never the payload.

use std::sync::Arc;

use lambda_runtime::{Error as LambdaError, LambdaEvent, service_fn};
use orientation::{
    lambda::{self, Invocation, Response},
    models::CleanupConfig,
    storage::DocumentStore,
};
use serde_json::Value;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the AWS Lambda function.
#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Orientation Lambda starting...");

    let store = build_store().await?;
    let cleanup = Arc::new(lambda::cleanup_config_from_env());
    info!(
        retention_days = cleanup.interaction_retention_days,
        purge_expired = cleanup.purge_expired_scholarships,
        "Cleanup settings loaded"
    );

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let store = Arc::clone(&store);
        let cleanup = Arc::clone(&cleanup);
        async move { handler(store.as_ref(), &cleanup, event).await }
    }))
    .await
}

#[cfg(feature = "s3")]
async fn build_store() -> Result<Arc<dyn DocumentStore>, LambdaError> {
    let store = orientation::storage::s3::S3Storage::from_env().await?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "s3"))]
async fn build_store() -> Result<Arc<dyn DocumentStore>, LambdaError> {
    let root = std::env::var("STORAGE_DIR").unwrap_or_else(|_| "/tmp/orientation".to_string());
    let store = orientation::storage::LocalStorage::new(root);
    info!("Using local document store at {}", store.root().display());
    Ok(Arc::new(store))
}

/// Handler for AWS Lambda events.
async fn handler(
    store: &dyn DocumentStore,
    cleanup: &CleanupConfig,
    event: LambdaEvent<Value>,
) -> Result<Response, LambdaError> {
    let (payload, context) = event.into_parts();
    let request_id = context.request_id;
    let invoker = context.identity.map(|identity| identity.identity_id);

    let invocation = match Invocation::from_payload(payload, invoker) {
        Ok(invocation) => invocation,
        Err(e) => {
            error!(%request_id, "Rejected payload: {}", e);
            return Ok(Response::failed(&e));
        }
    };
    info!(%request_id, action = invocation.name(), "Dispatching event");

    let response = lambda::dispatch(store, cleanup, invocation).await;
    if !response.success {
        error!(%request_id, code = ?response.code, "Handler failed");
    }
    Ok(response)
}
