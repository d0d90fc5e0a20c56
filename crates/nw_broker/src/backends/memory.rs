use std::sync::Mutex;

use async_trait::async_trait;
use nw_core::{BrokerMessage, BrokerType, MessagePublisher, PublishReceipt, Result};
use tracing::info;

/// Publisher that keeps every message in memory.
#[derive(Debug)]
pub struct MemoryPublisher {
    broker_type: BrokerType,
    published: Mutex<Vec<(String, BrokerMessage)>>,
}

impl MemoryPublisher {
    pub fn new(broker_type: BrokerType) -> Self {
        Self {
            broker_type,
            published: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of `(reference, message)` pairs in publish order.
    pub fn published(&self) -> Vec<(String, BrokerMessage)> {
        match self.published.lock() {
            Ok(published) => published.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl MessagePublisher for MemoryPublisher {
    fn broker_type(&self) -> BrokerType {
        self.broker_type
    }

    async fn publish(&self, reference: &str, message: &BrokerMessage) -> Result<PublishReceipt> {
        let mut published = match self.published.lock() {
            Ok(published) => published,
            Err(poisoned) => poisoned.into_inner(),
        };
        published.push((reference.to_string(), message.clone()));
        let message_id = format!("memory-{}", published.len());
        info!(
            "Recorded {} articles for {} reference {} as {}",
            message.article_count, self.broker_type, reference, message_id
        );
        Ok(PublishReceipt {
            message_id: Some(message_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nw_core::NormalizedArticle;

    fn message(titles: &[&str]) -> BrokerMessage {
        let articles: Vec<NormalizedArticle> = titles
            .iter()
            .map(|title| NormalizedArticle {
                web_publication_date: None,
                web_title: Some(title.to_string()),
                web_url: None,
                content_preview: Default::default(),
            })
            .collect();
        BrokerMessage::from_articles(&articles).unwrap()
    }

    #[tokio::test]
    async fn test_records_messages_in_order() {
        let publisher = MemoryPublisher::new(BrokerType::Sqs);
        let first = publisher.publish("https://sqs.a/q", &message(&["one"])).await.unwrap();
        let second = publisher.publish("https://sqs.a/q", &message(&["two", "three"])).await.unwrap();

        assert_eq!(first.message_id.as_deref(), Some("memory-1"));
        assert_eq!(second.message_id.as_deref(), Some("memory-2"));

        let published = publisher.published();
        assert_eq!(published.len(), 2);
        assert_eq!(published[1].0, "https://sqs.a/q");
        assert_eq!(published[1].1.article_count, 2);

        let body: serde_json::Value = serde_json::from_str(&published[1].1.body).unwrap();
        assert_eq!(body[0]["webTitle"], "two");
    }

    #[test]
    fn test_reports_configured_broker_type() {
        assert_eq!(MemoryPublisher::new(BrokerType::Sns).broker_type(), BrokerType::Sns);
        assert_eq!(MemoryPublisher::new(BrokerType::Sqs).broker_type(), BrokerType::Sqs);
    }
}
