use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{IdPlusName, Record, SortKey};

/// One student's hand-in for an activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Delivery {
    #[serde(default)]
    pub files: Vec<IdPlusName>,
    #[serde(default)]
    pub comments: String,
    /// Display name of the delivering student.
    pub name: String,
    /// Hand-in time, Unix milliseconds.
    pub date: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub files: Vec<IdPlusName>,
    /// Activity category shown in lists (homework, exam, ...).
    #[serde(rename = "type", default)]
    pub kind: String,
    /// How the work is handed in (on paper, online, ...).
    #[serde(default)]
    pub delivery: String,
    pub author: IdPlusName,
    /// Publication time, Unix milliseconds.
    pub date: i64,
    /// Due time, Unix milliseconds.
    pub expiration: i64,
    /// Hand-ins keyed by student id.
    #[serde(default)]
    pub delivered: HashMap<String, Delivery>,
    /// Grading results keyed by student id.
    #[serde(rename = "result", default)]
    pub results: HashMap<String, String>,
    /// Seen-flags keyed by student id.
    #[serde(default)]
    pub viewed: HashMap<String, bool>,
    /// Recipient student ids.
    #[serde(default)]
    pub receiver: Vec<String>,
}

/// Mutable fields carried by an edit event.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityPatch {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub delivery: String,
    pub expiration: i64,
    #[serde(default)]
    pub receiver: Vec<String>,
}

impl Activity {
    pub fn apply_patch(&mut self, patch: ActivityPatch) {
        self.title = patch.title;
        self.description = patch.description;
        self.kind = patch.kind;
        self.delivery = patch.delivery;
        self.expiration = patch.expiration;
        self.receiver = patch.receiver;
    }

    /// Record a student's hand-in: stores the delivery, marks the activity
    /// viewed for that student, and resets their result to `Unchecked`.
    pub fn record_delivery(&mut self, student_id: &str, delivery: Delivery) {
        self.viewed.insert(student_id.to_string(), true);
        self.delivered.insert(student_id.to_string(), delivery);
        self.results.insert(
            student_id.to_string(),
            crate::constants::RESULT_UNCHECKED.to_string(),
        );
    }

    pub fn record_result(&mut self, student_id: &str, result: String) {
        self.results.insert(student_id.to_string(), result);
    }

    pub fn record_viewed(&mut self, student_id: &str) {
        self.viewed.insert(student_id.to_string(), true);
    }
}

impl Record for Activity {
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

    fn secondary_date(&self) -> Option<i64> {
        Some(self.expiration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_activity() -> Activity {
        serde_json::from_str(
            r#"{
                "id": "a1",
                "title": "Algebra homework",
                "description": "Exercises 1-10",
                "subject": "Math",
                "type": "Homework",
                "delivery": "Online",
                "author": {"id": "t1", "name": "Mr. Soto"},
                "date": 1700000000000,
                "expiration": 1700600000000,
                "receiver": ["s1", "s2"]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_deserialize_defaults_recipient_state() {
        let activity = sample_activity();
        assert_eq!(activity.kind, "Homework");
        assert!(activity.delivered.is_empty());
        assert!(activity.results.is_empty());
        assert!(activity.viewed.is_empty());
    }

    #[test]
    fn test_record_delivery_touches_only_that_student() {
        let mut activity = sample_activity();
        activity.record_delivery(
            "s1",
            Delivery {
                files: vec![],
                comments: "done".to_string(),
                name: "Ana".to_string(),
                date: 1700100000000,
            },
        );
        assert_eq!(activity.viewed.get("s1"), Some(&true));
        assert_eq!(activity.results.get("s1").map(String::as_str), Some("Unchecked"));
        assert!(!activity.delivered.contains_key("s2"));
        assert!(!activity.viewed.contains_key("s2"));
    }

    #[test]
    fn test_record_result_overwrites_unchecked() {
        let mut activity = sample_activity();
        activity.record_delivery(
            "s1",
            Delivery {
                files: vec![],
                comments: String::new(),
                name: "Ana".to_string(),
                date: 1700100000000,
            },
        );
        activity.record_result("s1", "9/10".to_string());
        assert_eq!(activity.results.get("s1").map(String::as_str), Some("9/10"));
    }
}
