use async_trait::async_trait;
use aws_sdk_sns::error::DisplayErrorContext;
use aws_sdk_sns::types::MessageAttributeValue;
use aws_sdk_sns::Client;
use nw_core::{BrokerMessage, BrokerType, Error, MessagePublisher, PublishReceipt, Result};
use tracing::{error, info};

use super::{TTL_ATTRIBUTE, TTL_DATA_TYPE};

/// Publishes article batches to an SNS topic addressed by ARN.
#[derive(Debug, Clone)]
pub struct SnsPublisher {
    client: Client,
}

impl SnsPublisher {
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
        .map_err(|e| Error::publish_failed(BrokerType::Sns, e.to_string()))
}

#[async_trait]
impl MessagePublisher for SnsPublisher {
    fn broker_type(&self) -> BrokerType {
        BrokerType::Sns
    }

    async fn publish(&self, reference: &str, message: &BrokerMessage) -> Result<PublishReceipt> {
        info!("Publishing {} articles to SNS topic: {}", message.article_count, reference);

        let output = self
            .client
            .publish()
            .topic_arn(reference)
            .message(&message.body)
            .message_attributes(TTL_ATTRIBUTE, ttl_attribute(message.ttl_seconds)?)
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                error!("Failed to publish to SNS topic {}: {}", reference, message);
                Error::publish_failed(BrokerType::Sns, message)
            })?;

        Ok(PublishReceipt {
            message_id: output.message_id().map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_sns::config::retry::RetryConfig;
    use aws_sdk_sns::config::{BehaviorVersion, Credentials, Region};

    fn unreachable_client() -> Client {
        let config = aws_sdk_sns::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("test", "test", None, None, "tests"))
            .endpoint_url("http://127.0.0.1:1")
            .retry_config(RetryConfig::disabled())
            .build();
        Client::from_conf(config)
    }

    #[test]
    fn test_ttl_attribute_is_numeric() {
        let attribute = ttl_attribute(259_200).unwrap();
        assert_eq!(attribute.data_type(), "Number");
        assert_eq!(attribute.string_value(), Some("259200"));
    }

    #[tokio::test]
    async fn test_sdk_failure_becomes_publish_failed() {
        let publisher = SnsPublisher::from_client(unreachable_client());
        let message = BrokerMessage::from_articles(&[]).unwrap();

        let err = publisher
            .publish("arn:aws:sns:us-east-1:123456789012:guardian_content", &message)
            .await
            .unwrap_err();

        match err {
            Error::PublishFailed { broker, .. } => assert_eq!(broker, BrokerType::Sns),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
