use std::collections::HashMap;

use crate::models::{Grade, User};
use crate::net::api::Resource;
use crate::net::worker::DataChange;
use crate::store::activities_store::ActivitiesStore;
use crate::store::messages_store::MessagesStore;
use crate::store::people_store::PeopleStore;
use crate::store::reports_store::ReportsStore;
use crate::streaming::LiveEvent;

/// Single source of truth for everything the client shows: the logged-in
/// account, one synchronized list per view, the grade sheet, and connection
/// health. Updated exclusively through `apply`, on one thread.
#[derive(Default)]
pub struct AppDataStore {
    pub user: Option<User>,
    pub grades: Vec<Grade>,
    pub messages: MessagesStore,
    pub activities: ActivitiesStore,
    pub reports: ReportsStore,
    pub people: PeopleStore,
    /// Set once when the live socket drops; cleared by an explicit dismiss.
    pub connection_lost: bool,
    errors: HashMap<Resource, String>,
}

impl AppDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, change: DataChange) {
        match change {
            DataChange::InfoLoaded(user) => {
                self.grades = user.grades.clone();
                self.user = Some(user);
                self.errors.remove(&Resource::Info);
            }
            DataChange::MessagesLoaded(messages) => {
                self.messages.load(messages);
                self.errors.remove(&Resource::Messages);
            }
            DataChange::ActivitiesLoaded(activities) => {
                self.activities.load(activities);
                self.errors.remove(&Resource::Activities);
            }
            DataChange::ReportsLoaded(reports) => {
                self.reports.load(reports);
                self.errors.remove(&Resource::Reports);
            }
            DataChange::PeopleLoaded(people) => {
                self.people.load(people);
                self.errors.remove(&Resource::People);
            }
            DataChange::GradesLoaded(grades) => {
                self.grades = grades;
                self.errors.remove(&Resource::Grades);
            }
            DataChange::FetchFailed { resource, error } => {
                self.errors.insert(resource, error);
            }
            DataChange::Live(event) => self.handle_live(event),
            DataChange::ConnectionLost => self.connection_lost = true,
        }
    }

    fn handle_live(&mut self, event: LiveEvent) {
        match event {
            LiveEvent::NewMessage(message) => self.messages.handle_new(message),
            LiveEvent::EditedMessage { id, message } => self.messages.handle_edited(&id, message),
            LiveEvent::DeletedMessage { id } => self.messages.handle_deleted(&id),

            LiveEvent::NewActivity(activity) => self.activities.handle_new(activity),
            LiveEvent::EditedActivity { id, activity } => {
                self.activities.handle_edited(&id, activity)
            }
            LiveEvent::DeletedActivity { id } => self.activities.handle_deleted(&id),
            LiveEvent::DeliveredActivity { id, user, delivery } => {
                self.activities.handle_delivered(&id, &user, delivery)
            }
            LiveEvent::ResultActivity { id, user, result } => {
                self.activities.handle_result(&id, &user, result)
            }
            LiveEvent::ViewedActivity { id, user } => self.activities.handle_viewed(&id, &user),

            LiveEvent::NewReport(report) => self.reports.handle_new(report),
            LiveEvent::EditedReport { id, new_title } => {
                self.reports.handle_edited(&id, new_title)
            }
            LiveEvent::DeletedReport { id } => self.reports.handle_deleted(&id),

            LiveEvent::NewUser { user } => self.people.handle_new(user),
            LiveEvent::EditedUser { user } => self.people.handle_edited(user),
            LiveEvent::DeletedUser { user_id } => self.people.handle_deleted(&user_id),

            LiveEvent::NewGrades { grades } => self.grades = grades,
        }
    }

    /// Last bulk-fetch error for a resource, if its fetch failed.
    pub fn error(&self, resource: Resource) -> Option<&str> {
        self.errors.get(&resource).map(String::as_str)
    }

    pub fn dismiss_connection_lost(&mut self) {
        self.connection_lost = false;
    }

    /// Forget everything (logout / school switch).
    pub fn clear(&mut self) {
        self.user = None;
        self.grades.clear();
        self.messages.list.clear();
        self.activities.list.clear();
        self.reports.list.clear();
        self.people.list.clear();
        self.connection_lost = false;
        self.errors.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streaming::parse_frame;

    fn live(raw: &str) -> DataChange {
        DataChange::Live(parse_frame(raw).expect("frame should parse"))
    }

    #[test]
    fn test_bulk_then_live_scenario() {
        let mut store = AppDataStore::new();
        store.apply(DataChange::MessagesLoaded(
            serde_json::from_str(
                r#"[
                    {"id": "1", "date": 200, "title": "Math",
                     "author": {"id": "t", "name": "T"}, "files": [], "receiver": []},
                    {"id": "2", "date": 100, "title": "Art",
                     "author": {"id": "t", "name": "T"}, "files": [], "receiver": []}
                ]"#,
            )
            .unwrap(),
        ));
        let ids: Vec<_> = store
            .messages
            .list
            .records()
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids, ["1", "2"]);

        store.apply(live(
            r#"{"event": "newMessage", "id": "3", "date": 300, "title": "Science",
                "author": {"id": "t", "name": "T"}, "files": [], "receiver": []}"#,
        ));
        let ids: Vec<_> = store
            .messages
            .list
            .records()
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids, ["3", "1", "2"]);

        store.apply(live(r#"{"event": "deletedMessage", "id": "2"}"#));
        assert!(store.messages.list.get("2").is_none());
    }

    #[test]
    fn test_fetch_failure_surfaces_and_clears_on_success() {
        let mut store = AppDataStore::new();
        store.apply(DataChange::FetchFailed {
            resource: Resource::Reports,
            error: "Session expired".to_string(),
        });
        assert_eq!(store.error(Resource::Reports), Some("Session expired"));

        store.apply(DataChange::ReportsLoaded(vec![]));
        assert!(store.error(Resource::Reports).is_none());
    }

    #[test]
    fn test_new_grades_replaces_sheet() {
        let mut store = AppDataStore::new();
        store.apply(live(
            r#"{"event": "newGrades", "grades": [
                {"id": "g1", "fullName": "Ana", "subject": "Math", "deliberation": "",
                 "conceptual": "", "averageFirstFour": "8", "averageSecondFour": "9", "final": "8.5"}
            ]}"#,
        ));
        assert_eq!(store.grades.len(), 1);
        assert_eq!(store.grades[0].final_grade, "8.5");
    }

    #[test]
    fn test_connection_lost_flag() {
        let mut store = AppDataStore::new();
        store.apply(DataChange::ConnectionLost);
        assert!(store.connection_lost);
        store.dismiss_connection_lost();
        assert!(!store.connection_lost);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut store = AppDataStore::new();
        store.apply(live(
            r#"{"event": "newReport", "id": "r1", "title": "T",
                "file": {"id": "f", "name": "f.pdf"},
                "author": {"id": "t", "name": "T"}, "date": 10}"#,
        ));
        store.apply(DataChange::ConnectionLost);
        store.clear();
        assert!(store.reports.list.is_empty());
        assert!(!store.connection_lost);
        assert!(store.user.is_none());
    }
}
