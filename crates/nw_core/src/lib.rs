pub mod broker;
pub mod config;
pub mod error;
pub mod logging;
pub mod manager;
pub mod normalize;
pub mod router;
pub mod search;
pub mod types;

pub use broker::MessagePublisher;
pub use config::Config;
pub use error::{Error, Result, ValidationError};
pub use manager::PublishManager;
pub use search::ArticleSearch;
pub use types::{
    BrokerKind, BrokerMessage, BrokerType, Field, NormalizedArticle, PublishReceipt, PublishResult,
    RawArticle, SearchQuery,
};

pub mod prelude {
    pub use super::{
        ArticleSearch, BrokerKind, BrokerMessage, BrokerType, Config, Error, MessagePublisher,
        PublishManager, PublishReceipt, PublishResult, Result, SearchQuery,
    };
}
