pub mod config;
pub mod handlers;
pub mod infrastructure;
pub mod middleware;
pub mod pipeline;
pub mod services;
pub mod utils;
pub mod views;

use crate::config::AppConfig;
use crate::pipeline::Pipeline;
use crate::services::storage::ObjectStore;
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub store: Arc<dyn ObjectStore>,
    pub config: AppConfig,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::upload::show_form).post(handlers::upload::upload_file),
        )
        .route("/upload", post(handlers::upload::upload_file))
        .route("/health", get(handlers::health::health_check))
        .layer(from_fn(middleware::request_id::request_id_middleware))
        .with_state(state)
}
