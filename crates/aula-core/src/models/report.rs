use serde::{Deserialize, Serialize};

use super::{IdPlusName, Record, SortKey};

/// A filed student report: a titled document attached to a student record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub title: String,
    pub file: IdPlusName,
    pub author: IdPlusName,
    /// Filing time, Unix milliseconds.
    pub date: i64,
}

impl Record for Report {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn sort_key(&self) -> SortKey {
        SortKey::date(self.date)
    }

    fn search_text(&self) -> &str {
        &self.title
    }

    fn primary_date(&self) -> Option<i64> {
        Some(self.date)
    }
}
