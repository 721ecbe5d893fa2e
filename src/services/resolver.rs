use crate::services::registry::ApiCatalog;
use std::sync::Arc;
use thiserror::Error;

/// A resolved processing endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    pub base_url: String,
}

#[derive(Error, Debug)]
pub enum ResolveError {
    /// No registered API carries the requested name. A normal outcome, not
    /// an infrastructure fault.
    #[error("no API Gateway named '{0}' is registered")]
    NotFound(String),

    #[error("registry listing failed: {0}")]
    Registry(#[from] anyhow::Error),
}

/// Resolves a logical API name to its live invoke URL by walking the registry.
/// Resolution is performed fresh on every call; results are not cached.
pub struct EndpointResolver {
    catalog: Arc<dyn ApiCatalog>,
    region: String,
}

impl EndpointResolver {
    pub fn new(catalog: Arc<dyn ApiCatalog>, region: String) -> Self {
        Self { catalog, region }
    }

    /// Find the API named `api_name` and build its stage invoke URL.
    ///
    /// Pages through the whole registry so a match beyond the first page is
    /// still found. Name matching is exact and case-sensitive; if several
    /// entries share the name, the earliest-listed one wins.
    pub async fn resolve(&self, api_name: &str, stage: &str) -> Result<ServiceEndpoint, ResolveError> {
        let mut position: Option<String> = None;

        loop {
            let page = self.catalog.list_page(position.as_deref()).await?;

            if let Some(api) = page.items.iter().find(|api| api.name == api_name) {
                let base_url = format!(
                    "https://{}.execute-api.{}.amazonaws.com/{}",
                    api.id, self.region, stage
                );
                tracing::debug!("Resolved API '{}' to {}", api_name, base_url);
                return Ok(ServiceEndpoint { base_url });
            }

            match page.position {
                Some(next) => position = Some(next),
                None => return Err(ResolveError::NotFound(api_name.to_string())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::registry::StaticCatalog;

    fn resolver(catalog: StaticCatalog) -> EndpointResolver {
        EndpointResolver::new(Arc::new(catalog), "us-east-1".to_string())
    }

    #[tokio::test]
    async fn test_resolve_builds_invoke_url() {
        let resolver = resolver(StaticCatalog::new(vec![
            ("zzz999", "OtherApi"),
            ("abc123", "JahnaviApiGateway"),
        ]));

        let endpoint = resolver.resolve("JahnaviApiGateway", "prod").await.unwrap();
        assert_eq!(
            endpoint.base_url,
            "https://abc123.execute-api.us-east-1.amazonaws.com/prod"
        );
    }

    #[tokio::test]
    async fn test_resolve_missing_api_is_not_found() {
        let resolver = resolver(StaticCatalog::new(vec![
            ("aaa111", "SomeApi"),
            ("bbb222", "AnotherApi"),
        ]));

        let err = resolver.resolve("JahnaviApiGateway", "prod").await.unwrap_err();
        assert!(matches!(err, ResolveError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_resolve_match_is_case_sensitive() {
        let resolver = resolver(StaticCatalog::new(vec![("abc123", "jahnaviapigateway")]));

        let err = resolver.resolve("JahnaviApiGateway", "prod").await.unwrap_err();
        assert!(matches!(err, ResolveError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_resolve_finds_match_on_last_page() {
        let resolver = resolver(StaticCatalog::paged(vec![
            vec![("aaa111", "FirstApi"), ("bbb222", "SecondApi")],
            vec![("ccc333", "ThirdApi")],
            vec![("abc123", "JahnaviApiGateway")],
        ]));

        let endpoint = resolver.resolve("JahnaviApiGateway", "prod").await.unwrap();
        assert_eq!(
            endpoint.base_url,
            "https://abc123.execute-api.us-east-1.amazonaws.com/prod"
        );
    }

    #[tokio::test]
    async fn test_resolve_first_duplicate_wins() {
        let resolver = resolver(StaticCatalog::paged(vec![
            vec![("first1", "JahnaviApiGateway")],
            vec![("later2", "JahnaviApiGateway")],
        ]));

        let endpoint = resolver.resolve("JahnaviApiGateway", "prod").await.unwrap();
        assert!(endpoint.base_url.starts_with("https://first1."));
    }
}
