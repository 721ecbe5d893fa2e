use crate::config::AppConfig;
use crate::services::registry::ApiGatewayCatalog;
use crate::services::storage::S3ObjectStore;
use aws_sdk_s3::config::Region;
use std::sync::Arc;
use tracing::info;

/// Build the S3 object store and the API Gateway catalog from the shared AWS
/// configuration. Credentials come from the default provider chain (env,
/// profile, instance role).
pub async fn setup_aws(config: &AppConfig) -> (Arc<S3ObjectStore>, Arc<ApiGatewayCatalog>) {
    let region = Region::new(config.region.clone());

    let mut loader = aws_config::from_env().region(region);
    // Local object stores such as MinIO need an explicit endpoint
    if let Ok(endpoint_url) = std::env::var("S3_ENDPOINT") {
        loader = loader.endpoint_url(endpoint_url);
    }
    let aws_config = loader.load().await;

    info!(
        "☁️  AWS clients ready (region: {}, bucket: {})",
        config.region, config.bucket
    );

    let s3_client = aws_sdk_s3::Client::new(&aws_config);
    let apigateway_client = aws_sdk_apigateway::Client::new(&aws_config);

    (
        Arc::new(S3ObjectStore::new(s3_client, config.bucket.clone())),
        Arc::new(ApiGatewayCatalog::new(apigateway_client)),
    )
}
