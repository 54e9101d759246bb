//! The projection engine behind every list view.
//!
//! Each view owns one `ListSync`: the full sorted collection from the bulk
//! fetch, the user's active filter predicates, and the window of records
//! currently materialized for rendering. Live events mutate the collection
//! in place; filters and the window are projections and never touch it.
//!
//! Invariant: window ⊆ filter(collection) ⊆ collection, and no id appears
//! twice in the collection.

use std::collections::HashSet;

use chrono::{NaiveDate, TimeZone, Utc};

use crate::constants::{FUZZY_THRESHOLD, PAGE_SIZE};
use crate::models::Record;
use crate::search::{search_key, FuzzyIndex};

/// Bulk-fetch dimension of a view. `Loaded` is terminal; a failed fetch
/// stays `Loading`-less with the error surfaced by the owning store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Empty,
    Loading,
    Loaded,
}

/// Active view predicates. Recomputed per keystroke; applying them is a
/// projection over the collection, in collection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Fuzzy title query.
    pub query: Option<String>,
    /// Calendar-day equality against the record's primary date.
    pub date: Option<NaiveDate>,
    /// Calendar-day equality against the record's secondary date.
    pub secondary_date: Option<NaiveDate>,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.query.is_none() && self.date.is_none() && self.secondary_date.is_none()
    }
}

fn same_calendar_day(millis: i64, day: NaiveDate) -> bool {
    Utc.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.date_naive() == day)
        .unwrap_or(false)
}

pub struct ListSync<R: Record> {
    records: Vec<R>,
    index: FuzzyIndex,
    filter: FilterState,
    window_len: usize,
    load_state: LoadState,
}

impl<R: Record> Default for ListSync<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> ListSync<R> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            index: FuzzyIndex::new(),
            filter: FilterState::default(),
            window_len: PAGE_SIZE,
            load_state: LoadState::default(),
        }
    }

    // ===== Bulk load =====

    pub fn set_loading(&mut self) {
        if self.load_state == LoadState::Empty {
            self.load_state = LoadState::Loading;
        }
    }

    /// Replace the collection wholesale with a bulk-fetch result: sort,
    /// rebuild the search index, materialize the first page.
    pub fn load(&mut self, records: Vec<R>) {
        let mut seen = HashSet::new();
        self.records = records;
        self.records
            .retain(|r| seen.insert(r.record_id().to_string()));
        self.records.sort_by_key(|r| r.sort_key());
        self.index = FuzzyIndex::new();
        for record in &self.records {
            self.index.add(record.search_text());
        }
        self.window_len = PAGE_SIZE;
        self.load_state = LoadState::Loaded;
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    // ===== Live mutations =====

    /// Sorted insert. A record whose id is already present is dropped, which
    /// makes duplicate create deliveries harmless.
    pub fn insert(&mut self, record: R) -> bool {
        if self.position_of(record.record_id()).is_some() {
            return false;
        }
        self.index.add(record.search_text());
        let key = record.sort_key();
        let at = self.records.partition_point(|r| r.sort_key() < key);
        self.records.insert(at, record);
        true
    }

    /// Remove by id. Removing an id that is not present is a no-op, so a
    /// replayed delete cannot fail or disturb the collection.
    pub fn remove(&mut self, id: &str) -> Option<R> {
        let at = self.position_of(id)?;
        let record = self.records.remove(at);
        self.index.remove(record.search_text());
        Some(record)
    }

    /// Apply `mutate` to the record with the given id. The search index
    /// follows title changes and the record is re-sorted if the mutation
    /// moved its sort key. Returns false when the id is unknown (an edit
    /// arriving before its create is dropped).
    pub fn apply_edit(&mut self, id: &str, mutate: impl FnOnce(&mut R)) -> bool {
        let Some(at) = self.position_of(id) else {
            return false;
        };
        let old_text = self.records[at].search_text().to_string();
        let old_key = self.records[at].sort_key();
        mutate(&mut self.records[at]);

        if self.records[at].search_text() != old_text {
            self.index.remove(&old_text);
            let new_text = self.records[at].search_text().to_string();
            self.index.add(&new_text);
        }
        if self.records[at].sort_key() != old_key {
            let record = self.records.remove(at);
            let key = record.sort_key();
            let new_at = self.records.partition_point(|r| r.sort_key() < key);
            self.records.insert(new_at, record);
        }
        true
    }

    /// Forget everything (logout / view teardown).
    pub fn clear(&mut self) {
        self.records.clear();
        self.index = FuzzyIndex::new();
        self.filter = FilterState::default();
        self.window_len = PAGE_SIZE;
        self.load_state = LoadState::Empty;
    }

    // ===== Filters =====

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Set or clear the fuzzy title query. Any change resets the window to
    /// the leading page.
    pub fn set_query(&mut self, query: Option<&str>) {
        let query = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string);
        if self.filter.query != query {
            self.filter.query = query;
            self.window_len = PAGE_SIZE;
        }
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        if self.filter.date != date {
            self.filter.date = date;
            self.window_len = PAGE_SIZE;
        }
    }

    pub fn set_secondary_date(&mut self, date: Option<NaiveDate>) {
        if self.filter.secondary_date != date {
            self.filter.secondary_date = date;
            self.window_len = PAGE_SIZE;
        }
    }

    /// The filtered collection, in collection order. Predicates compose
    /// with AND, so application order cannot matter.
    pub fn filtered(&self) -> Vec<&R> {
        let matched: Option<HashSet<String>> = self
            .filter
            .query
            .as_deref()
            .map(|query| self.index.matches(query, FUZZY_THRESHOLD));

        self.records
            .iter()
            .filter(|record| {
                if let Some(titles) = &matched {
                    if !titles.contains(&search_key(record.search_text())) {
                        return false;
                    }
                }
                if let Some(day) = self.filter.date {
                    if !record.primary_date().is_some_and(|ms| same_calendar_day(ms, day)) {
                        return false;
                    }
                }
                if let Some(day) = self.filter.secondary_date {
                    if !record
                        .secondary_date()
                        .is_some_and(|ms| same_calendar_day(ms, day))
                    {
                        return false;
                    }
                }
                true
            })
            .collect()
    }

    // ===== Window =====

    /// The materialized slice of the filtered collection.
    pub fn window(&self) -> Vec<&R> {
        let mut filtered = self.filtered();
        filtered.truncate(self.window_len);
        filtered
    }

    pub fn window_len(&self) -> usize {
        self.window().len()
    }

    /// Extend the window by one page, up to the filtered collection.
    pub fn load_more(&mut self) {
        if !self.is_complete() {
            self.window_len += PAGE_SIZE;
        }
    }

    /// Whether the window already covers the whole filtered collection.
    pub fn is_complete(&self) -> bool {
        self.window_len >= self.filtered().len()
    }

    // ===== Accessors =====

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.position_of(id).map(|at| &self.records[at])
    }

    fn position_of(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.record_id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IdPlusName, Message};

    fn make_message(id: &str, date: i64, title: &str) -> Message {
        Message {
            id: id.to_string(),
            title: title.to_string(),
            content: String::new(),
            pdf: None,
            files: vec![],
            author: IdPlusName {
                id: "t1".to_string(),
                name: "Ms. Rivera".to_string(),
            },
            date,
            receiver: vec![],
            preview: None,
        }
    }

    fn ids(records: &[&Message]) -> Vec<String> {
        records.iter().map(|m| m.id.clone()).collect()
    }

    #[test]
    fn test_load_sorts_descending_and_fills_first_page() {
        let mut list = ListSync::new();
        list.load(vec![make_message("1", 200, "Math"), make_message("2", 100, "Art")]);
        assert_eq!(ids(&list.records().iter().collect::<Vec<_>>()), ["1", "2"]);
        assert_eq!(ids(&list.window()), ["1", "2"]);
        assert_eq!(list.load_state(), LoadState::Loaded);
    }

    #[test]
    fn test_insert_keeps_descending_order() {
        let mut list = ListSync::new();
        list.load(vec![make_message("1", 200, "Math"), make_message("2", 100, "Art")]);
        assert!(list.insert(make_message("3", 300, "Science")));
        assert_eq!(ids(&list.records().iter().collect::<Vec<_>>()), ["3", "1", "2"]);
    }

    #[test]
    fn test_insert_is_idempotent_by_id() {
        let mut list = ListSync::new();
        list.load(vec![make_message("1", 200, "Math")]);
        assert!(!list.insert(make_message("1", 999, "Math again")));
        assert_eq!(list.len(), 1);
        assert_eq!(list.get("1").unwrap().date, 200);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut list = ListSync::new();
        list.load(vec![make_message("1", 200, "Math"), make_message("2", 100, "Art")]);
        assert!(list.remove("2").is_some());
        assert!(list.remove("2").is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_edit_for_unknown_id_is_dropped() {
        let mut list = ListSync::new();
        list.load(vec![make_message("1", 200, "Math")]);
        assert!(!list.apply_edit("missing", |m| m.title = "X".to_string()));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_edit_that_moves_sort_key_resorts() {
        let mut list = ListSync::new();
        list.load(vec![
            make_message("3", 300, "Science"),
            make_message("1", 200, "Math"),
            make_message("2", 100, "Art"),
        ]);
        assert!(list.apply_edit("1", |m| m.date = 400));
        assert_eq!(ids(&list.records().iter().collect::<Vec<_>>()), ["1", "3", "2"]);
    }

    #[test]
    fn test_edit_updates_search_index() {
        let mut list = ListSync::new();
        list.load(vec![make_message("1", 200, "Math")]);
        list.apply_edit("1", |m| m.title = "Chemistry".to_string());
        list.set_query(Some("math"));
        assert!(list.window().is_empty());
        list.set_query(Some("chemistry"));
        assert_eq!(ids(&list.window()), ["1"]);
    }

    #[test]
    fn test_fuzzy_query_filters_and_resets_window() {
        let mut list = ListSync::new();
        list.load(vec![make_message("1", 200, "Math"), make_message("2", 100, "Art")]);
        list.set_query(Some("art"));
        assert_eq!(ids(&list.filtered()), ["2"]);
        assert_eq!(ids(&list.window()), ["2"]);
    }

    #[test]
    fn test_delete_under_active_filter() {
        let mut list = ListSync::new();
        list.load(vec![make_message("1", 200, "Math"), make_message("2", 100, "Art")]);
        list.set_query(Some("art"));
        assert_eq!(list.window_len(), 1);
        assert!(list.remove("2").is_some());
        assert!(list.window().is_empty());
        // The pruned index no longer matches the deleted title.
        assert_eq!(list.filtered().len(), 0);
    }

    #[test]
    fn test_window_grows_by_pages_and_never_exceeds_filtered() {
        let mut list = ListSync::new();
        let records = (0..45)
            .map(|i| make_message(&i.to_string(), 1000 - i64::from(i), "Note"))
            .collect();
        list.load(records);
        assert_eq!(list.window_len(), 20);
        assert!(!list.is_complete());
        list.load_more();
        assert_eq!(list.window_len(), 40);
        list.load_more();
        assert_eq!(list.window_len(), 45);
        assert!(list.is_complete());
        list.load_more();
        assert_eq!(list.window_len(), 45);
    }

    #[test]
    fn test_window_monotonic_under_fixed_filter() {
        let mut list = ListSync::new();
        let records = (0..50)
            .map(|i| make_message(&i.to_string(), 1000 - i64::from(i), "Note"))
            .collect();
        list.load(records);
        list.set_query(Some("note"));
        let mut previous = 0;
        for _ in 0..5 {
            let len = list.window_len();
            assert!(len >= previous);
            assert!(len <= list.filtered().len());
            previous = len;
            list.load_more();
        }
    }

    #[test]
    fn test_filter_change_resets_window() {
        let mut list = ListSync::new();
        let records = (0..45)
            .map(|i| make_message(&i.to_string(), 1000 - i64::from(i), "Note"))
            .collect();
        list.load(records);
        list.load_more();
        assert_eq!(list.window_len(), 40);
        list.set_query(Some("note"));
        assert_eq!(list.window_len(), 20);
    }

    #[test]
    fn test_date_filter_matches_calendar_day() {
        let day = Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap();
        let morning = day.timestamp_millis() + 8 * 3600 * 1000;
        let evening = day.timestamp_millis() + 20 * 3600 * 1000;
        let other = morning + 3 * 86_400_000;

        let mut list = ListSync::new();
        list.load(vec![
            make_message("1", evening, "A"),
            make_message("2", morning, "B"),
            make_message("3", other, "C"),
        ]);
        list.set_date(Some(
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        ));
        assert_eq!(ids(&list.filtered()), ["1", "2"]);
    }

    #[test]
    fn test_filter_composition_is_order_independent() {
        let day = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let on_day = day.timestamp_millis();
        let off_day = on_day + 2 * 86_400_000;

        let records = vec![
            make_message("1", on_day, "Art show"),
            make_message("2", off_day, "Art class"),
            make_message("3", on_day, "Math quiz"),
        ];

        let mut query_first = ListSync::new();
        query_first.load(records.clone());
        query_first.set_query(Some("art"));
        query_first.set_date(NaiveDate::from_ymd_opt(2024, 3, 15));
        let a = ids(&query_first.filtered());

        let mut date_first = ListSync::new();
        date_first.load(records);
        date_first.set_date(NaiveDate::from_ymd_opt(2024, 3, 15));
        date_first.set_query(Some("art"));
        let b = ids(&date_first.filtered());

        assert_eq!(a, b);
        assert_eq!(a, ["1"]);
    }

    #[test]
    fn test_no_filter_means_first_page_of_collection() {
        let mut list = ListSync::new();
        let records = (0..25)
            .map(|i| make_message(&i.to_string(), 1000 - i64::from(i), "Note"))
            .collect();
        list.load(records);
        assert!(list.filter().is_empty());
        assert_eq!(list.window_len(), 20);
    }

    #[test]
    fn test_load_state_transitions() {
        let mut list: ListSync<Message> = ListSync::new();
        assert_eq!(list.load_state(), LoadState::Empty);
        list.set_loading();
        assert_eq!(list.load_state(), LoadState::Loading);
        list.load(vec![]);
        assert_eq!(list.load_state(), LoadState::Loaded);
    }
}
