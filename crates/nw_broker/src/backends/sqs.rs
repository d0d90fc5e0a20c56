use async_trait::async_trait;
use aws_sdk_sqs::error::DisplayErrorContext;
use aws_sdk_sqs::types::MessageAttributeValue;
use aws_sdk_sqs::Client;
use nw_core::{BrokerMessage, BrokerType, Error, MessagePublisher, PublishReceipt, Result};
use tracing::{error, info};

use super::{TTL_ATTRIBUTE, TTL_DATA_TYPE};

/// Publishes article batches to an SQS queue addressed by URL.
#[derive(Debug, Clone)]
pub struct SqsPublisher {
    client: Client,
}

impl SqsPublisher {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self::from_client(Client::new(sdk_config))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

fn ttl_attribute(ttl_seconds: u32) -> Result<MessageAttributeValue> {
    MessageAttributeValue::builder()
        .data_type(TTL_DATA_TYPE)
        .string_value(ttl_seconds.to_string())
        .build()
        .map_err(|e| Error::publish_failed(BrokerType::Sqs, e.to_string()))
}

#[async_trait]
impl MessagePublisher for SqsPublisher {
    fn broker_type(&self) -> BrokerType {
        BrokerType::Sqs
    }

    async fn publish(&self, reference: &str, message: &BrokerMessage) -> Result<PublishReceipt> {
        info!("Publishing {} articles to SQS queue: {}", message.article_count, reference);

        let output = self
            .client
            .send_message()
            .queue_url(reference)
            .message_body(&message.body)
            .message_attributes(TTL_ATTRIBUTE, ttl_attribute(message.ttl_seconds)?)
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                error!("Failed to publish to SQS queue {}: {}", reference, message);
                Error::publish_failed(BrokerType::Sqs, message)
            })?;

        Ok(PublishReceipt {
            message_id: output.message_id().map(str::to_string),
        })
    }
}
