use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use textract_polly_frontend::services::dispatcher::{
    DispatchError, HttpDispatcher, ProcessingDispatcher, ProcessingRequest,
};
use textract_polly_frontend::services::resolver::ServiceEndpoint;

type Received = Arc<Mutex<Vec<ProcessingRequest>>>;

async fn record_ok(
    State(received): State<Received>,
    Json(payload): Json<ProcessingRequest>,
) -> StatusCode {
    received.lock().unwrap().push(payload);
    StatusCode::OK
}

async fn always_503() -> (StatusCode, &'static str) {
    (StatusCode::SERVICE_UNAVAILABLE, "downstream exploded")
}

/// Bind a throwaway server on a loopback port and return its address
async fn spawn_server(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_dispatch_posts_json_payload_once() {
    let received: Received = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/textract-polly", post(record_ok))
        .with_state(received.clone());
    let addr = spawn_server(app).await;

    let dispatcher = HttpDispatcher::new(reqwest::Client::new(), "textract-polly".to_string());
    let endpoint = ServiceEndpoint {
        base_url: format!("http://{addr}"),
    };
    let request = ProcessingRequest {
        input_bucket: "input-textract-jahnavi".to_string(),
        input_bucket_file: "photo.jpg".to_string(),
    };

    dispatcher.dispatch(&endpoint, &request).await.unwrap();

    let calls = received.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], request);
}

#[tokio::test]
async fn test_dispatch_non_200_is_a_failure_with_status_and_body() {
    let app = Router::new().route("/textract-polly", post(always_503));
    let addr = spawn_server(app).await;

    let dispatcher = HttpDispatcher::new(reqwest::Client::new(), "textract-polly".to_string());
    let endpoint = ServiceEndpoint {
        base_url: format!("http://{addr}"),
    };
    let request = ProcessingRequest {
        input_bucket: "bucket".to_string(),
        input_bucket_file: "file.pdf".to_string(),
    };

    let err = dispatcher.dispatch(&endpoint, &request).await.unwrap_err();
    match err {
        DispatchError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body.as_deref(), Some("downstream exploded"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_dispatch_transport_error() {
    // Nothing listens on this port
    let dispatcher = HttpDispatcher::new(reqwest::Client::new(), "textract-polly".to_string());
    let endpoint = ServiceEndpoint {
        base_url: "http://127.0.0.1:1".to_string(),
    };
    let request = ProcessingRequest {
        input_bucket: "bucket".to_string(),
        input_bucket_file: "file.pdf".to_string(),
    };

    let err = dispatcher.dispatch(&endpoint, &request).await.unwrap_err();
    assert!(matches!(err, DispatchError::Transport(_)));
}
