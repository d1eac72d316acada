use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use shared::{
    domain::{SearchRequest, SearchResult, DEFAULT_PAGE_SIZE},
    error::SearchError,
    protocol::{RemoteErrorBody, UserSearchResponse},
};
use tracing::debug;
use url::Url;

use crate::DirectorySearch;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const SEARCH_PATH: &str = "search/users";
const ACCEPT_JSON: &str = "application/vnd.github+json";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api_url: String,
    pub user_agent: String,
    pub request_timeout: Duration,
    pub page_size: u32,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            user_agent: concat!("finder/", env!("CARGO_PKG_VERSION")).into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Issues one page-scoped user search per call. Never retries.
#[derive(Clone)]
pub struct SearchClient {
    http: Client,
    endpoint: Url,
    page_size: u32,
    request_timeout: Duration,
}

impl SearchClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, SearchError> {
        if settings.page_size == 0 {
            return Err(SearchError::InvalidConfig("page size must be positive".into()));
        }
        let endpoint = search_endpoint(&settings.api_url)?;
        let http = Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| SearchError::InvalidConfig(err.to_string()))?;

        Ok(Self {
            http,
            endpoint,
            page_size: settings.page_size,
            request_timeout: settings.request_timeout,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn query_params(&self, request: &SearchRequest) -> Vec<(&'static str, String)> {
        vec![
            ("q", format!("{} in:fullname", request.term.as_str().trim())),
            ("sort", "followers".into()),
            ("order", "desc".into()),
            ("page", request.page.to_string()),
            ("per_page", self.page_size.to_string()),
        ]
    }

    pub async fn fetch_page(&self, request: &SearchRequest) -> Result<SearchResult, SearchError> {
        debug!(term = %request.term, page = %request.page, "fetching search page");
        let res = self
            .http
            .get(self.endpoint.clone())
            .header(header::ACCEPT, ACCEPT_JSON)
            .query(&self.query_params(request))
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;

        let status = res.status();
        let body = res.bytes().await.map_err(|err| self.transport_error(err))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<RemoteErrorBody>(&body)
                .map(|body| body.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("unexpected status")
                        .to_string()
                });
            return Err(SearchError::remote(status.as_u16(), message));
        }

        let parsed: UserSearchResponse =
            serde_json::from_slice(&body).map_err(|err| SearchError::parse(err.to_string()))?;
        Ok(parsed.into())
    }

    fn transport_error(&self, err: reqwest::Error) -> SearchError {
        if err.is_timeout() {
            SearchError::network(format!(
                "request timed out after {}ms",
                self.request_timeout.as_millis()
            ))
        } else {
            SearchError::network(err.to_string())
        }
    }
}

#[async_trait]
impl DirectorySearch for SearchClient {
    async fn fetch_page(&self, request: &SearchRequest) -> Result<SearchResult, SearchError> {
        SearchClient::fetch_page(self, request).await
    }
}

fn search_endpoint(api_url: &str) -> Result<Url, SearchError> {
    let trimmed = api_url.trim();
    let base = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let base = Url::parse(&base)
        .map_err(|err| SearchError::InvalidConfig(format!("api url '{api_url}': {err}")))?;
    if base.cannot_be_a_base() {
        return Err(SearchError::InvalidConfig(format!(
            "api url '{api_url}' cannot be used as a base"
        )));
    }
    base.join(SEARCH_PATH)
        .map_err(|err| SearchError::InvalidConfig(format!("api url '{api_url}': {err}")))
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
