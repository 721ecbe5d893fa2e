use std::env;

/// Application configuration, fixed at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// S3 bucket receiving uploaded documents (default: "input-textract-jahnavi")
    pub bucket: String,

    /// AWS region used for the registry lookup and the invoke URL (default: "us-east-1")
    pub region: String,

    /// Logical API Gateway name to resolve (default: "JahnaviApiGateway")
    pub api_name: String,

    /// Deployment stage appended to the invoke URL (default: "prod")
    pub stage: String,

    /// Resource path of the processing endpoint (default: "textract-polly")
    pub resource_path: String,

    /// Maximum upload size in bytes (default: 10 MB)
    pub max_file_size: usize,

    /// Port the HTTP server listens on (default: 3000)
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bucket: "input-textract-jahnavi".to_string(),
            region: "us-east-1".to_string(),
            api_name: "JahnaviApiGateway".to_string(),
            stage: "prod".to_string(),
            resource_path: "textract-polly".to_string(),
            max_file_size: 10 * 1024 * 1024, // 10 MB
            port: 3000,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            bucket: env::var("UPLOAD_BUCKET").unwrap_or(default.bucket),

            region: env::var("AWS_REGION").unwrap_or(default.region),

            api_name: env::var("PROCESSING_API_NAME").unwrap_or(default.api_name),

            stage: env::var("PROCESSING_API_STAGE").unwrap_or(default.stage),

            resource_path: env::var("PROCESSING_RESOURCE_PATH").unwrap_or(default.resource_path),

            max_file_size: env::var("MAX_FILE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_file_size),

            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.port),
        }
    }
}
