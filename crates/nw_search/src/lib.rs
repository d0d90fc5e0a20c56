pub mod guardian;

pub use guardian::{GuardianClient, GUARDIAN_SEARCH_URL};

pub mod prelude {
    pub use super::GuardianClient;
    pub use nw_core::{ArticleSearch, Error, Result, SearchQuery};
}
