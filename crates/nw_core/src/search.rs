use async_trait::async_trait;
use serde_json::Value;

use crate::types::SearchQuery;
use crate::Result;

#[async_trait]
pub trait ArticleSearch: Send + Sync {
    /// Run a search and return the raw API response
    async fn search(&self, query: &SearchQuery) -> Result<Value>;
}
