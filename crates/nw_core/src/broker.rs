use async_trait::async_trait;

use crate::types::{BrokerMessage, BrokerType, PublishReceipt};
use crate::Result;

#[async_trait]
pub trait MessagePublisher: Send + Sync {
    /// The broker family this publisher talks to
    fn broker_type(&self) -> BrokerType;

    /// Publish one message to the destination named by `reference`
    async fn publish(&self, reference: &str, message: &BrokerMessage) -> Result<PublishReceipt>;
}
