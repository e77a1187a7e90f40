use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use super::extract;
use super::types::Candidate;

const SEARCH_BASE: &str = "https://www.bing.com/images/search";

/// Form tag Bing uses for the HD wallpaper results page.
const SEARCH_FORM: &str = "HDRSC2";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("search failed: status {0}")]
    Status(u16),
}

/// Abstraction over the image search endpoint.
/// Implemented by `BingClient` for production; mock implementations used in tests.
pub trait ImageSearch {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Candidate>, SearchError>;
}

#[derive(Clone)]
pub struct BingClient {
    http: Client,
    base_url: String,
}

impl BingClient {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            base_url: SEARCH_BASE.to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
        }
    }

    async fn search_page(&self, query: &str) -> Result<String, SearchError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("q", query), ("form", SEARCH_FORM)])
            .header("User-Agent", crate::USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

impl ImageSearch for BingClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Candidate>, SearchError> {
        let html = self.search_page(query).await?;
        let found = extract::candidates(&html, limit);
        debug!(count = found.len(), "search page resolved");
        Ok(found)
    }
}

#[cfg(test)]
mod http_tests {
    use super::*;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TWO_RESULTS: &str = r#"<html><body>
        <a class="iusc" m='{"murl":"https://img.example/a.jpg","t":"A"}'></a>
        <a class="iusc" m='{"murl":"https://img.example/b.jpg","t":"B"}'></a>
    </body></html>"#;

    #[tokio::test]
    async fn search_success_extracts_candidates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(TWO_RESULTS))
            .mount(&server)
            .await;

        let client = BingClient::with_base_url(Client::new(), &server.uri());
        let found = client.search("wallpapers", 1000).await.unwrap();

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].url, "https://img.example/a.jpg");
        assert_eq!(found[1].url, "https://img.example/b.jpg");
    }

    #[tokio::test]
    async fn search_sends_query_and_form_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "mountain lakes"))
            .and(query_param("form", "HDRSC2"))
            .respond_with(ResponseTemplate::new(200).set_body_string(TWO_RESULTS))
            .mount(&server)
            .await;

        let client = BingClient::with_base_url(Client::new(), &server.uri());
        let found = client.search("mountain lakes", 1000).await.unwrap();

        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn search_respects_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(TWO_RESULTS))
            .mount(&server)
            .await;

        let client = BingClient::with_base_url(Client::new(), &server.uri());
        let found = client.search("wallpapers", 1).await.unwrap();

        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn search_404_returns_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = BingClient::with_base_url(Client::new(), &server.uri());
        let result = client.search("wallpapers", 1000).await;

        assert!(matches!(result, Err(SearchError::Status(404))));
    }

    #[tokio::test]
    async fn search_500_returns_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = BingClient::with_base_url(Client::new(), &server.uri());
        let result = client.search("wallpapers", 1000).await;

        assert!(matches!(result, Err(SearchError::Status(500))));
    }

    #[tokio::test]
    async fn search_page_without_results_yields_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("<html><body>no results</body></html>"),
            )
            .mount(&server)
            .await;

        let client = BingClient::with_base_url(Client::new(), &server.uri());
        let found = client.search("wallpapers", 1000).await.unwrap();

        assert!(found.is_empty());
    }
}
