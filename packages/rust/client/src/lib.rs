//! HTTP client for the help content service.
//!
//! [`HelpClient`] wraps the REST CRUD API for help articles: exact-match
//! search, get/create/update/delete, and bulk import/export. The resolution
//! pipeline only uses [`HelpClient::search`]; everything else serves the
//! surrounding management commands.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};
use url::Url;

use helpdeck_shared::{ArticlePage, HelpArticle, HelpdeckError, Result, SearchCriteria, ServiceConfig};

/// User-Agent string for service requests.
const USER_AGENT: &str = concat!("Helpdeck/", env!("CARGO_PKG_VERSION"));

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 3;

/// Collection path for help article resources.
const ITEMS_PATH: &str = "helpItems";

// ---------------------------------------------------------------------------
// HelpClient
// ---------------------------------------------------------------------------

/// Client for the help content service's `helpItems` resource.
#[derive(Debug, Clone)]
pub struct HelpClient {
    client: Client,
    base_url: Url,
}

impl HelpClient {
    /// Create a client against `base_url` with the given request timeout.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            HelpdeckError::config(format!("invalid service base URL '{base_url}': {e}"))
        })?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| HelpdeckError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Create a client from the `[service]` config section.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        Self::new(&config.base_url, config.timeout_secs)
    }

    /// Build the endpoint URL for the collection or a single resource.
    fn endpoint(&self, id: Option<&str>) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        match id {
            Some(id) => format!("{base}/{ITEMS_PATH}/{id}"),
            None => format!("{base}/{ITEMS_PATH}"),
        }
    }

    /// Search for articles matching the given criteria.
    ///
    /// The service treats criteria fields as exact-match filters; the
    /// response carries the matching page plus the overall `totalElements`.
    #[instrument(skip_all, fields(product = ?criteria.product_name, item = ?criteria.item_id))]
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<ArticlePage> {
        let url = format!("{}/search", self.endpoint(None));
        debug!(%url, "searching help articles");

        let response = self
            .client
            .post(&url)
            .json(criteria)
            .send()
            .await
            .map_err(|e| HelpdeckError::Network(format!("{url}: {e}")))?;

        let response = check_status(response, &url).await?;
        response
            .json::<ArticlePage>()
            .await
            .map_err(|e| HelpdeckError::Network(format!("{url}: invalid response body: {e}")))
    }

    /// Fetch a single article by its server-assigned id.
    pub async fn get(&self, id: &str) -> Result<HelpArticle> {
        let url = self.endpoint(Some(id));

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| HelpdeckError::Network(format!("{url}: {e}")))?;

        let response = check_status(response, &url).await?;
        response
            .json::<HelpArticle>()
            .await
            .map_err(|e| HelpdeckError::Network(format!("{url}: invalid response body: {e}")))
    }

    /// Create a new article. Returns the stored record with its assigned id.
    #[instrument(skip_all, fields(item = %article.item_id, product = %article.product_name))]
    pub async fn create(&self, article: &HelpArticle) -> Result<HelpArticle> {
        article.validate()?;
        let url = self.endpoint(None);

        let response = self
            .client
            .post(&url)
            .json(article)
            .send()
            .await
            .map_err(|e| HelpdeckError::Network(format!("{url}: {e}")))?;

        let response = check_status(response, &url).await?;
        response
            .json::<HelpArticle>()
            .await
            .map_err(|e| HelpdeckError::Network(format!("{url}: invalid response body: {e}")))
    }

    /// Update an existing article.
    ///
    /// The article's current `modification_count` is echoed in the body; a
    /// stale count is rejected by the service and surfaced as a conflict.
    #[instrument(skip_all, fields(id = %id))]
    pub async fn update(&self, id: &str, article: &HelpArticle) -> Result<HelpArticle> {
        article.validate()?;
        let url = self.endpoint(Some(id));

        let response = self
            .client
            .put(&url)
            .json(article)
            .send()
            .await
            .map_err(|e| HelpdeckError::Network(format!("{url}: {e}")))?;

        let response = check_status(response, &url).await?;
        response
            .json::<HelpArticle>()
            .await
            .map_err(|e| HelpdeckError::Network(format!("{url}: invalid response body: {e}")))
    }

    /// Delete an article by id.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let url = self.endpoint(Some(id));

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| HelpdeckError::Network(format!("{url}: {e}")))?;

        check_status(response, &url).await?;
        Ok(())
    }

    /// Export all articles for the given owner keys (all owners when empty).
    pub async fn export(&self, product_names: &[String]) -> Result<Vec<HelpArticle>> {
        let url = format!("{}/export", self.endpoint(None));
        let body = serde_json::json!({ "productNames": product_names });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| HelpdeckError::Network(format!("{url}: {e}")))?;

        let response = check_status(response, &url).await?;
        response
            .json::<Vec<HelpArticle>>()
            .await
            .map_err(|e| HelpdeckError::Network(format!("{url}: invalid response body: {e}")))
    }

    /// Import a batch of articles. Each article must already be validated.
    #[instrument(skip_all, fields(count = articles.len()))]
    pub async fn import(&self, articles: &[HelpArticle]) -> Result<()> {
        let url = format!("{}/import", self.endpoint(None));

        let response = self
            .client
            .post(&url)
            .json(articles)
            .send()
            .await
            .map_err(|e| HelpdeckError::Network(format!("{url}: {e}")))?;

        check_status(response, &url).await?;
        Ok(())
    }
}

/// Map a non-success status to the matching error variant.
async fn check_status(response: reqwest::Response, url: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    if status == StatusCode::CONFLICT {
        return Err(HelpdeckError::conflict(format!(
            "{url}: {}",
            if body.is_empty() { "modificationCount is stale" } else { body.as_str() }
        )));
    }

    Err(HelpdeckError::Network(format!("{url}: HTTP {status}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn article_json(item_id: &str, product: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "42",
            "itemId": item_id,
            "productName": product,
            "baseUrl": "http://localhost:8080/help",
            "modificationCount": 1
        })
    }

    async fn client_for(server: &MockServer) -> HelpClient {
        HelpClient::new(&server.uri(), 5).expect("build client")
    }

    #[tokio::test]
    async fn search_sends_exact_criteria_and_parses_page() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/helpItems/search"))
            .and(body_partial_json(serde_json::json!({
                "productName": "help-mgmt-ui",
                "itemId": "PAGE_HELP_SEARCH"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "stream": [article_json("PAGE_HELP_SEARCH", "help-mgmt-ui")],
                "totalElements": 1,
                "number": 0,
                "size": 100
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let criteria = SearchCriteria::exact("help-mgmt-ui", "PAGE_HELP_SEARCH");
        let page = client.search(&criteria).await.expect("search");

        assert_eq!(page.total_elements, 1);
        assert_eq!(page.stream[0].product_name, "help-mgmt-ui");
    }

    #[tokio::test]
    async fn search_maps_server_error_to_network_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/helpItems/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client.search(&SearchCriteria::exact("p1", "PAGE_A")).await;

        assert!(matches!(result, Err(HelpdeckError::Network(_))));
    }

    #[tokio::test]
    async fn get_fetches_single_article() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/helpItems/42"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(article_json("PAGE_A", "p1")),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let article = client.get("42").await.expect("get");
        assert_eq!(article.id.as_deref(), Some("42"));
        assert_eq!(article.item_id, "PAGE_A");
    }

    #[tokio::test]
    async fn create_rejects_invalid_article_without_network_call() {
        let server = MockServer::start().await;
        let client = client_for(&server).await;

        let invalid = HelpArticle {
            item_id: "x".into(), // below minimum length
            product_name: "p1".into(),
            ..Default::default()
        };

        let result = client.create(&invalid).await;
        assert!(matches!(result, Err(HelpdeckError::Validation { .. })));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_echoes_modification_count() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/helpItems/42"))
            .and(body_partial_json(serde_json::json!({
                "modificationCount": 7
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(article_json("PAGE_A", "p1")),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let article = HelpArticle {
            id: Some("42".into()),
            item_id: "PAGE_A".into(),
            product_name: "p1".into(),
            modification_count: 7,
            ..Default::default()
        };

        client.update("42", &article).await.expect("update");
    }

    #[tokio::test]
    async fn update_conflict_surfaces_as_conflict_error() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/helpItems/42"))
            .respond_with(ResponseTemplate::new(409))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let article = HelpArticle {
            id: Some("42".into()),
            item_id: "PAGE_A".into(),
            product_name: "p1".into(),
            modification_count: 1,
            ..Default::default()
        };

        let result = client.update("42", &article).await;
        assert!(matches!(result, Err(HelpdeckError::Conflict { .. })));
    }

    #[tokio::test]
    async fn delete_succeeds_on_no_content() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/helpItems/42"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client.delete("42").await.expect("delete");
    }

    #[tokio::test]
    async fn export_returns_article_list() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/helpItems/export"))
            .and(body_partial_json(serde_json::json!({
                "productNames": ["p1"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                article_json("PAGE_A", "p1"),
                article_json("PAGE_B", "p1"),
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let articles = client.export(&["p1".to_string()]).await.expect("export");
        assert_eq!(articles.len(), 2);
    }

    #[tokio::test]
    async fn import_posts_article_batch() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/helpItems/import"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let batch = vec![HelpArticle {
            item_id: "PAGE_A".into(),
            product_name: "p1".into(),
            ..Default::default()
        }];

        client.import(&batch).await.expect("import");
    }

    #[test]
    fn endpoint_handles_trailing_slash_in_base() {
        let client = HelpClient::new("http://localhost:8080/", 5).expect("client");
        assert_eq!(client.endpoint(None), "http://localhost:8080/helpItems");
        assert_eq!(client.endpoint(Some("42")), "http://localhost:8080/helpItems/42");
    }
}
