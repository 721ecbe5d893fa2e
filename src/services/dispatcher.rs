use crate::services::resolver::ServiceEndpoint;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payload sent to the processing endpoint. References the stored object;
/// the document bytes themselves are never sent over this hop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessingRequest {
    pub input_bucket: String,
    pub input_bucket_file: String,
}

#[derive(Error, Debug)]
pub enum DispatchError {
    /// The endpoint answered with a non-200 status
    #[error("processing endpoint returned status {status}")]
    Status { status: u16, body: Option<String> },

    #[error("request to processing endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Trait for dispatching a processing request to a resolved endpoint
#[async_trait::async_trait]
pub trait ProcessingDispatcher: Send + Sync {
    async fn dispatch(
        &self,
        endpoint: &ServiceEndpoint,
        request: &ProcessingRequest,
    ) -> Result<(), DispatchError>;
}

/// Dispatcher POSTing the JSON payload over HTTP. One attempt per call, no
/// retries; anything other than status 200 is a failure.
pub struct HttpDispatcher {
    http: reqwest::Client,
    resource_path: String,
}

impl HttpDispatcher {
    pub fn new(http: reqwest::Client, resource_path: String) -> Self {
        Self { http, resource_path }
    }
}

#[async_trait::async_trait]
impl ProcessingDispatcher for HttpDispatcher {
    async fn dispatch(
        &self,
        endpoint: &ServiceEndpoint,
        request: &ProcessingRequest,
    ) -> Result<(), DispatchError> {
        let url = format!("{}/{}", endpoint.base_url, self.resource_path);

        let response = self.http.post(&url).json(request).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::OK {
            return Ok(());
        }

        let body = response.text().await.ok().filter(|b| !b.is_empty());
        Err(DispatchError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

/// Dispatcher that records every call and answers with a fixed result
/// (for development/testing)
#[derive(Default)]
pub struct RecordingDispatcher {
    calls: std::sync::Mutex<Vec<(ServiceEndpoint, ProcessingRequest)>>,
    failure: Option<(u16, Option<String>)>,
}

impl RecordingDispatcher {
    pub fn succeeding() -> Self {
        Self::default()
    }

    /// Every dispatch fails with the given status and body
    pub fn failing(status: u16, body: Option<String>) -> Self {
        Self {
            calls: std::sync::Mutex::new(Vec::new()),
            failure: Some((status, body)),
        }
    }

    pub fn calls(&self) -> Vec<(ServiceEndpoint, ProcessingRequest)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ProcessingDispatcher for RecordingDispatcher {
    async fn dispatch(
        &self,
        endpoint: &ServiceEndpoint,
        request: &ProcessingRequest,
    ) -> Result<(), DispatchError> {
        self.calls
            .lock()
            .unwrap()
            .push((endpoint.clone(), request.clone()));

        match &self.failure {
            None => Ok(()),
            Some((status, body)) => Err(DispatchError::Status {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recording_dispatcher_captures_payload() {
        let dispatcher = RecordingDispatcher::succeeding();
        let endpoint = ServiceEndpoint {
            base_url: "https://abc123.execute-api.us-east-1.amazonaws.com/prod".to_string(),
        };
        let request = ProcessingRequest {
            input_bucket: "input-textract-jahnavi".to_string(),
            input_bucket_file: "photo.jpg".to_string(),
        };

        dispatcher.dispatch(&endpoint, &request).await.unwrap();

        let calls = dispatcher.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, request);
    }

    #[tokio::test]
    async fn test_recording_dispatcher_failure() {
        let dispatcher = RecordingDispatcher::failing(503, Some("unavailable".to_string()));
        let endpoint = ServiceEndpoint {
            base_url: "https://abc123.execute-api.us-east-1.amazonaws.com/prod".to_string(),
        };
        let request = ProcessingRequest {
            input_bucket: "b".to_string(),
            input_bucket_file: "f.pdf".to_string(),
        };

        let err = dispatcher.dispatch(&endpoint, &request).await.unwrap_err();
        match err {
            DispatchError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body.as_deref(), Some("unavailable"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_processing_request_wire_format() {
        let request = ProcessingRequest {
            input_bucket: "input-textract-jahnavi".to_string(),
            input_bucket_file: "photo.jpg".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "input_bucket": "input-textract-jahnavi",
                "input_bucket_file": "photo.jpg",
            })
        );
    }
}
