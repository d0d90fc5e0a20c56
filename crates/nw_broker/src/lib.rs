use nw_core::Config;

pub mod backends;

pub use backends::*;

/// Where the AWS clients connect. Unset fields fall back to the SDK's own
/// provider chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrokerConfig {
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
}

impl BrokerConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            region: config.aws_region.clone(),
            endpoint_url: config.aws_endpoint_url.clone(),
        }
    }
}

/// Both AWS publishers, built from one shared SDK configuration.
#[cfg(all(feature = "sns", feature = "sqs"))]
#[derive(Debug, Clone)]
pub struct Brokers {
    pub sns: SnsPublisher,
    pub sqs: SqsPublisher,
}

#[cfg(any(feature = "sns", feature = "sqs"))]
pub async fn load_sdk_config(config: &BrokerConfig) -> aws_config::SdkConfig {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
    if let Some(region) = &config.region {
        loader = loader.region(aws_config::Region::new(region.clone()));
    }
    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }
    loader.load().await
}

#[cfg(all(feature = "sns", feature = "sqs"))]
pub async fn connect(config: &BrokerConfig) -> Brokers {
    tracing::debug!("Loading AWS configuration: {:?}", config);
    let sdk_config = load_sdk_config(config).await;
    Brokers {
        sns: SnsPublisher::new(&sdk_config),
        sqs: SqsPublisher::new(&sdk_config),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::BrokerConfig;
}
