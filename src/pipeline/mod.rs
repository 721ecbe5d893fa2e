use crate::config::AppConfig;
use crate::services::dispatcher::{DispatchError, ProcessingDispatcher, ProcessingRequest};
use crate::services::resolver::{EndpointResolver, ResolveError};
use crate::services::storage::ObjectStore;
use crate::utils::validation::{allowed_file, sanitize_filename};
use std::pin::Pin;
use std::sync::Arc;
use tokio::io::AsyncRead;

/// Terminal result of one pipeline run, rendered for the user by the
/// presentation layer. Failures are ordinary values, never faults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    Success { display_name: String },
    ValidationRejected,
    StorageFailed { cause: String },
    EndpointNotFound,
    DispatchFailed { status: Option<u16>, body: Option<String> },
    UnexpectedError { cause: String },
}

impl PipelineOutcome {
    /// Human-readable message embedded in the rendered page. Technical
    /// detail stays in the log.
    pub fn user_message(&self) -> String {
        match self {
            PipelineOutcome::Success { display_name } => {
                format!("Successfully uploaded: {display_name}")
            }
            PipelineOutcome::ValidationRejected => "File format not allowed.".to_string(),
            PipelineOutcome::StorageFailed { .. } => "Failed to upload to S3.".to_string(),
            PipelineOutcome::EndpointNotFound => {
                "Processing service could not be located.".to_string()
            }
            PipelineOutcome::DispatchFailed { .. } => {
                "Processing service reported a failure.".to_string()
            }
            PipelineOutcome::UnexpectedError { .. } => {
                "An unexpected error occurred. Please try again.".to_string()
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PipelineOutcome::Success { .. })
    }
}

/// Sequences one upload through validate -> store -> resolve -> dispatch.
/// Each step runs at most once per request; no step is retried.
pub struct Pipeline {
    store: Arc<dyn ObjectStore>,
    resolver: EndpointResolver,
    dispatcher: Arc<dyn ProcessingDispatcher>,
    config: AppConfig,
}

impl Pipeline {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        resolver: EndpointResolver,
        dispatcher: Arc<dyn ProcessingDispatcher>,
        config: AppConfig,
    ) -> Self {
        Self {
            store,
            resolver,
            dispatcher,
            config,
        }
    }

    /// Run the whole pipeline for one uploaded file. Never returns an error:
    /// every failure mode collapses into a `PipelineOutcome` variant.
    pub async fn run(
        &self,
        filename: &str,
        data: Pin<Box<dyn AsyncRead + Send>>,
    ) -> PipelineOutcome {
        if !allowed_file(filename) {
            tracing::info!("Rejected upload '{}': extension not allowed", filename);
            return PipelineOutcome::ValidationRejected;
        }

        let key = match sanitize_filename(filename) {
            Ok(key) => key,
            Err(e) => {
                tracing::info!("Rejected upload '{}': {}", filename, e);
                return PipelineOutcome::ValidationRejected;
            }
        };

        if let Err(e) = self.store.put_object(&key, data).await {
            tracing::error!("S3 upload of '{}' failed: {:?}", key, e);
            return PipelineOutcome::StorageFailed {
                cause: e.to_string(),
            };
        }
        tracing::info!(
            "Stored '{}' in bucket '{}'",
            key,
            self.config.bucket
        );

        let endpoint = match self
            .resolver
            .resolve(&self.config.api_name, &self.config.stage)
            .await
        {
            Ok(endpoint) => endpoint,
            Err(ResolveError::NotFound(name)) => {
                tracing::error!("API Gateway '{}' not found in registry", name);
                return PipelineOutcome::EndpointNotFound;
            }
            Err(ResolveError::Registry(e)) => {
                tracing::error!("Registry lookup failed: {:?}", e);
                return PipelineOutcome::UnexpectedError {
                    cause: e.to_string(),
                };
            }
        };

        let request = ProcessingRequest {
            input_bucket: self.config.bucket.clone(),
            input_bucket_file: key.clone(),
        };

        match self.dispatcher.dispatch(&endpoint, &request).await {
            Ok(()) => {
                tracing::info!("Dispatched processing request for '{}'", key);
                PipelineOutcome::Success { display_name: key }
            }
            Err(DispatchError::Status { status, body }) => {
                tracing::error!(
                    "Processing endpoint returned {} for '{}': {:?}",
                    status,
                    key,
                    body
                );
                PipelineOutcome::DispatchFailed {
                    status: Some(status),
                    body,
                }
            }
            Err(DispatchError::Transport(e)) => {
                tracing::error!("Dispatch transport failure for '{}': {:?}", key, e);
                PipelineOutcome::DispatchFailed {
                    status: None,
                    body: Some(e.to_string()),
                }
            }
        }
    }
}
