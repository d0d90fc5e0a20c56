use std::env;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use nw_core::config::GUARDIAN_API_KEY_VAR;
use nw_core::{ArticleSearch, Config, Error, Result, SearchQuery};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

pub const GUARDIAN_SEARCH_URL: &str = "https://content.guardianapis.com/search";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Guardian content search endpoint.
///
/// The API key is checked at construction; a client without one cannot exist.
pub struct GuardianClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl GuardianClient {
    /// Uses `api_key` when given, otherwise `GUARDIAN_API_KEY`.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .or_else(|| env::var(GUARDIAN_API_KEY_VAR).ok().filter(|key| !key.trim().is_empty()));
        match api_key {
            Some(api_key) => Self::with_api_key(api_key),
            None => Err(missing_api_key()),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Self::with_api_key(config.api_key()?.to_string())?;
        match &config.guardian_api_url {
            Some(url) => client.with_base_url(url),
            None => Ok(client),
        }
    }

    fn with_api_key(api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to build HTTP client: {}", e)))?;
        let base_url = Url::parse(GUARDIAN_SEARCH_URL)
            .map_err(|e| Error::Configuration(format!("Invalid Guardian API URL: {}", e)))?;
        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = Url::parse(base_url)
            .map_err(|e| Error::Configuration(format!("Invalid Guardian API URL {}: {}", base_url, e)))?;
        Ok(self)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn query_params(&self, query: &SearchQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", query.search_term.clone()),
            ("api-key", self.api_key.clone()),
            ("page-size", query.page_size.to_string()),
            ("show-fields", query.show_fields.clone()),
            ("order-by", "newest".to_string()),
        ];
        if let Some(date_from) = query.date_from.as_deref().filter(|d| !d.is_empty()) {
            params.push(("from-date", date_from.to_string()));
        }
        params
    }
}

fn missing_api_key() -> Error {
    Error::Configuration(format!(
        "Guardian API key is required. Set {} environment variable.",
        GUARDIAN_API_KEY_VAR
    ))
}

// reqwest errors carry the request URL, which includes the api key.
fn search_failed(e: reqwest::Error) -> Error {
    Error::SearchFailed(e.without_url().to_string())
}

impl fmt::Debug for GuardianClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardianClient")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

#[async_trait]
impl ArticleSearch for GuardianClient {
    async fn search(&self, query: &SearchQuery) -> Result<Value> {
        info!("Searching Guardian API for: {}", query.search_term);

        let response = self
            .client
            .get(self.base_url.clone())
            .query(&self.query_params(query))
            .send()
            .await
            .map_err(search_failed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::SearchFailed(format!("Guardian API returned {}", status)));
        }

        let body = response.json::<Value>().await.map_err(search_failed)?;
        debug!("Guardian API responded for: {}", query.search_term);
        Ok(body)
    }
}
