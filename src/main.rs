use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use textract_polly_frontend::config::AppConfig;
use textract_polly_frontend::infrastructure::aws;
use textract_polly_frontend::pipeline::Pipeline;
use textract_polly_frontend::services::dispatcher::HttpDispatcher;
use textract_polly_frontend::services::resolver::EndpointResolver;
use textract_polly_frontend::{AppState, create_app};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing with EnvFilter
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "textract_polly_frontend=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🚀 Starting Textract/Polly upload frontend...");

    let config = AppConfig::from_env();
    info!(
        "⚙️  Config: bucket={}, api={}, stage={}, max size={}MB",
        config.bucket,
        config.api_name,
        config.stage,
        config.max_file_size / 1024 / 1024
    );

    let (store, catalog) = aws::setup_aws(&config).await;

    let resolver = EndpointResolver::new(catalog, config.region.clone());
    let dispatcher = Arc::new(HttpDispatcher::new(
        reqwest::Client::new(),
        config.resource_path.clone(),
    ));
    let pipeline = Arc::new(Pipeline::new(
        store.clone(),
        resolver,
        dispatcher,
        config.clone(),
    ));

    let state = AppState {
        pipeline,
        store,
        config: config.clone(),
    };

    let app = create_app(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .headers()
                        .get(textract_polly_frontend::middleware::request_id::REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("unknown");
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                })
                .on_request(|request: &axum::http::Request<_>, _span: &tracing::Span| {
                    info!("📥 {} {}", request.method(), request.uri());
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        info!(
                            "📤 Finished in {:?} with status {}",
                            latency,
                            response.status()
                        );
                    },
                ),
        )
        .layer(axum::extract::DefaultBodyLimit::max(config.max_file_size));

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    info!("✅ Server ready at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("🛑 Server shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("⌨️  Ctrl+C received, starting graceful shutdown...");
        },
        _ = terminate => {
            info!("💤 SIGTERM received, starting graceful shutdown...");
        },
    }
}
