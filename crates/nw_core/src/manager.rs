use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::info;

use crate::broker::MessagePublisher;
use crate::error::ValidationError;
use crate::normalize;
use crate::router;
use crate::search::ArticleSearch;
use crate::types::{BrokerKind, BrokerMessage, BrokerType, NormalizedArticle, PublishResult, SearchQuery};
use crate::Result;

/// Runs search → normalize → publish for one request.
///
/// Holds the search collaborator (which owns the API credential) and one
/// publisher per broker family. Immutable after construction, so a single
/// instance can be shared behind an `Arc`.
pub struct PublishManager {
    search: Arc<dyn ArticleSearch>,
    topic: Arc<dyn MessagePublisher>,
    queue: Arc<dyn MessagePublisher>,
}

impl PublishManager {
    pub fn new(
        search: Arc<dyn ArticleSearch>,
        topic: Arc<dyn MessagePublisher>,
        queue: Arc<dyn MessagePublisher>,
    ) -> Self {
        Self { search, topic, queue }
    }

    /// Validated passthrough to the search collaborator.
    pub async fn search_articles(&self, query: &SearchQuery) -> Result<Value> {
        if query.search_term.is_empty() {
            return Err(ValidationError::EmptySearchTerm.into());
        }
        if let Some(date_from) = non_empty(query.date_from.as_deref()) {
            validate_date_from(date_from)?;
        }
        self.search.search(query).await
    }

    pub fn process_articles(&self, response: &Value) -> Result<Vec<NormalizedArticle>> {
        normalize::process_articles(response)
    }

    pub fn determine_broker_type(&self, broker_reference: &str) -> BrokerKind {
        router::classify(broker_reference)
    }

    pub async fn publish_articles(
        &self,
        search_term: &str,
        broker_reference: &str,
        date_from: Option<&str>,
    ) -> Result<PublishResult> {
        if search_term.is_empty() {
            return Err(ValidationError::EmptySearchTerm.into());
        }
        if broker_reference.is_empty() {
            return Err(ValidationError::EmptyBrokerReference.into());
        }
        let date_from = non_empty(date_from);
        if let Some(date_from) = date_from {
            validate_date_from(date_from)?;
        }

        let query = SearchQuery::new(search_term).with_date_from(date_from.map(str::to_string));
        let response = self.search.search(&query).await?;
        let articles = self.process_articles(&response)?;
        info!("📰 {} articles ready for '{}'", articles.len(), search_term);

        // the reported label follows the branch taken, not the publisher
        let (publisher, broker_type) = match self.determine_broker_type(broker_reference) {
            BrokerKind::Topic => (&self.topic, BrokerType::Sns),
            BrokerKind::Queue => (&self.queue, BrokerType::Sqs),
            BrokerKind::Unknown => {
                return Err(ValidationError::UnknownBrokerType(broker_reference.to_string()).into())
            }
        };

        let message = BrokerMessage::from_articles(&articles)?;
        let receipt = publisher.publish(broker_reference, &message).await?;
        info!(
            "✨ Published {} articles to {} (message id: {})",
            articles.len(),
            broker_type,
            receipt.message_id.as_deref().unwrap_or("-")
        );

        Ok(PublishResult::success(broker_type, articles.len(), receipt.message_id))
    }
}

/// Accepts only `YYYY-MM-DD` calendar dates.
pub fn validate_date_from(date_from: &str) -> Result<NaiveDate> {
    let invalid = || ValidationError::InvalidDateFormat(date_from.to_string());
    let bytes = date_from.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid().into());
    }
    NaiveDate::parse_from_str(date_from, "%Y-%m-%d").map_err(|_| invalid().into())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
