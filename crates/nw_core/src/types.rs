use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Maximum number of characters kept from `fields.bodyText`.
pub const CONTENT_PREVIEW_CHARS: usize = 1000;

/// Message TTL attribute attached to every publish call (3 days).
pub const MESSAGE_TTL_SECONDS: u32 = 259_200;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_SHOW_FIELDS: &str = "bodyText";

/// A JSON object member that can be missing, explicitly `null`, or hold a value.
///
/// Deserialize with `#[serde(default)]` so a missing key lands on `Missing`;
/// serialize with `skip_serializing_if = "Field::is_missing"` so it stays missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    Missing,
    Null,
    Value(T),
}

impl<T> Field<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Field::Missing)
    }

    pub fn as_ref(&self) -> Field<&T> {
        match self {
            Field::Missing => Field::Missing,
            Field::Null => Field::Null,
            Field::Value(value) => Field::Value(value),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Field<U> {
        match self {
            Field::Missing => Field::Missing,
            Field::Null => Field::Null,
            Field::Value(value) => Field::Value(f(value)),
        }
    }

    /// Collapses `Missing` and `Null` into `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Value(value) => Some(value),
            Field::Missing | Field::Null => None,
        }
    }
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Missing
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Field::Value(value) => value.serialize(serializer),
            Field::Missing | Field::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(value) => Field::Value(value),
            None => Field::Null,
        })
    }
}

/// One record of the search API's `response.results` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    pub web_publication_date: Option<String>,
    pub web_title: Option<String>,
    pub web_url: Option<String>,
    pub fields: Option<RawFields>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawFields {
    #[serde(rename = "bodyText", default)]
    pub body_text: Field<String>,
}

/// Publish-ready article record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedArticle {
    pub web_publication_date: Option<String>,
    pub web_title: Option<String>,
    pub web_url: Option<String>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub content_preview: Field<String>,
}

/// Broker family addressed by a reference string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrokerKind {
    Topic,
    Queue,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrokerType {
    Sns,
    Sqs,
}

impl BrokerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrokerType::Sns => "sns",
            BrokerType::Sqs => "sqs",
        }
    }
}

impl fmt::Display for BrokerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body handed to a publish backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerMessage {
    pub body: String,
    pub ttl_seconds: u32,
    pub article_count: usize,
}

impl BrokerMessage {
    pub fn from_articles(articles: &[NormalizedArticle]) -> crate::Result<Self> {
        Ok(Self {
            body: serde_json::to_string(articles)?,
            ttl_seconds: MESSAGE_TTL_SECONDS,
            article_count: articles.len(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReceipt {
    pub message_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    Success,
}

/// Summary returned to the caller after a successful publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishResult {
    pub status: PublishStatus,
    pub broker_type: BrokerType,
    pub articles_count: usize,
    pub message_id: Option<String>,
}

impl PublishResult {
    pub fn success(broker_type: BrokerType, articles_count: usize, message_id: Option<String>) -> Self {
        Self {
            status: PublishStatus::Success,
            broker_type,
            articles_count,
            message_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub search_term: String,
    pub date_from: Option<String>,
    pub page_size: u32,
    pub show_fields: String,
}

impl SearchQuery {
    pub fn new(search_term: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            date_from: None,
            page_size: DEFAULT_PAGE_SIZE,
            show_fields: DEFAULT_SHOW_FIELDS.to_string(),
        }
    }

    pub fn with_date_from(mut self, date_from: Option<String>) -> Self {
        self.date_from = date_from;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_show_fields(mut self, show_fields: impl Into<String>) -> Self {
        self.show_fields = show_fields.into();
        self
    }
}
