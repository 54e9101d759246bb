pub mod activity;
pub mod ids;
pub mod message;
pub mod person;
pub mod report;
pub mod user;

pub use activity::{Activity, ActivityPatch, Delivery};
pub use ids::IdPlusName;
pub use message::{Message, MessagePatch};
pub use person::{Child, Person, PersonPatch};
pub use report::Report;
pub use user::{Grade, LoginResponse, School, User};

use std::cmp::Reverse;

/// Ordering key for a collection. Lists of dated records show the newest
/// first; the people directory is alphabetical.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Date(Reverse<i64>),
    Name(String),
}

impl SortKey {
    pub fn date(millis: i64) -> Self {
        Self::Date(Reverse(millis))
    }

    pub fn name(name: &str) -> Self {
        Self::Name(name.to_lowercase())
    }
}

/// One list entry: a stable identifier, an ordering key, and the fields the
/// filter pipeline consumes. Everything else on the struct is render data.
pub trait Record {
    fn record_id(&self) -> &str;

    fn sort_key(&self) -> SortKey;

    /// Text fed to the fuzzy search index.
    fn search_text(&self) -> &str;

    /// Millisecond timestamp the primary date filter applies to.
    fn primary_date(&self) -> Option<i64> {
        None
    }

    /// Timestamp a secondary date filter applies to (activity expiration).
    fn secondary_date(&self) -> Option<i64> {
        None
    }
}
