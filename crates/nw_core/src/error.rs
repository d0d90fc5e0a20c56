use thiserror::Error;

use crate::types::BrokerType;

/// Caller-input problems. These surface as 400-style responses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Search term is required")]
    EmptySearchTerm,

    #[error("Broker reference is required")]
    EmptyBrokerReference,

    #[error("Invalid date_from format: {0}. Use YYYY-MM-DD")]
    InvalidDateFormat(String),

    #[error("Unknown broker type for reference: {0}")]
    UnknownBrokerType(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Search failed: {0}")]
    SearchFailed(String),

    #[error("Error processing articles: {0}")]
    ArticleProcessing(#[source] anyhow::Error),

    #[error("Publish to {broker} failed: {message}")]
    PublishFailed { broker: BrokerType, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    pub fn publish_failed(broker: BrokerType, message: impl Into<String>) -> Self {
        Error::PublishFailed {
            broker,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
