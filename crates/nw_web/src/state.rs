use std::sync::Arc;

use nw_broker::BrokerConfig;
use nw_core::{Config, PublishManager, Result};
use nw_search::GuardianClient;

pub struct AppState {
    pub manager: Arc<PublishManager>,
}

impl AppState {
    pub fn new(manager: Arc<PublishManager>) -> Self {
        Self { manager }
    }

    /// Wires the Guardian client and both AWS publishers. Fails when the
    /// Guardian API key is missing.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let search = GuardianClient::from_config(config)?;
        let brokers = nw_broker::connect(&BrokerConfig::from_config(config)).await;
        let manager = PublishManager::new(Arc::new(search), Arc::new(brokers.sns), Arc::new(brokers.sqs));
        Ok(Self::new(Arc::new(manager)))
    }
}
