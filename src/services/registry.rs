use anyhow::Result;
use aws_sdk_apigateway::Client;

/// Upstream page-size cap observed on the registry. A single listing call
/// never returns more than this many entries, so callers must page.
pub const REGISTRY_PAGE_LIMIT: i32 = 1000;

/// One registered REST API as reported by the registry
#[derive(Debug, Clone)]
pub struct RegisteredApi {
    pub id: String,
    pub name: String,
}

/// One page of registry results; `position` is the token for the next page
#[derive(Debug, Clone, Default)]
pub struct ApiPage {
    pub items: Vec<RegisteredApi>,
    pub position: Option<String>,
}

/// Trait for API registry implementations. Listing is paginated: pass the
/// `position` token of the previous page (or `None` for the first page).
#[async_trait::async_trait]
pub trait ApiCatalog: Send + Sync {
    async fn list_page(&self, position: Option<&str>) -> Result<ApiPage>;
}

/// API Gateway registry client
pub struct ApiGatewayCatalog {
    client: Client,
}

impl ApiGatewayCatalog {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ApiCatalog for ApiGatewayCatalog {
    async fn list_page(&self, position: Option<&str>) -> Result<ApiPage> {
        let mut req = self.client.get_rest_apis().limit(REGISTRY_PAGE_LIMIT);
        if let Some(pos) = position {
            req = req.position(pos);
        }
        let output = req.send().await?;

        let items = output
            .items()
            .iter()
            .filter_map(|api| {
                // Entries without both id and name cannot be resolved against
                match (api.id(), api.name()) {
                    (Some(id), Some(name)) => Some(RegisteredApi {
                        id: id.to_string(),
                        name: name.to_string(),
                    }),
                    _ => None,
                }
            })
            .collect();

        Ok(ApiPage {
            items,
            position: output.position().map(|p| p.to_string()),
        })
    }
}

/// Fixed-content catalog serving pre-built pages (for development/testing)
pub struct StaticCatalog {
    pages: Vec<Vec<RegisteredApi>>,
}

impl StaticCatalog {
    /// Single-page catalog from (id, name) pairs
    pub fn new(apis: Vec<(&str, &str)>) -> Self {
        Self::paged(vec![apis])
    }

    /// Multi-page catalog; each inner vec becomes one page
    pub fn paged(pages: Vec<Vec<(&str, &str)>>) -> Self {
        Self {
            pages: pages
                .into_iter()
                .map(|page| {
                    page.into_iter()
                        .map(|(id, name)| RegisteredApi {
                            id: id.to_string(),
                            name: name.to_string(),
                        })
                        .collect()
                })
                .collect(),
        }
    }
}

#[async_trait::async_trait]
impl ApiCatalog for StaticCatalog {
    async fn list_page(&self, position: Option<&str>) -> Result<ApiPage> {
        let index: usize = match position {
            None => 0,
            Some(pos) => pos.parse()?,
        };

        let items = self.pages.get(index).cloned().unwrap_or_default();
        let position = if index + 1 < self.pages.len() {
            Some((index + 1).to_string())
        } else {
            None
        };

        Ok(ApiPage { items, position })
    }
}
