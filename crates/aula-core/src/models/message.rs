use serde::{Deserialize, Serialize};

use super::{IdPlusName, Record, SortKey};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// File id of a PDF circular, when the message body is a document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf: Option<String>,
    #[serde(default)]
    pub files: Vec<IdPlusName>,
    pub author: IdPlusName,
    /// Publication time, Unix milliseconds.
    pub date: i64,
    #[serde(default)]
    pub receiver: Vec<IdPlusName>,
    /// Short body excerpt for list rendering; absent on older messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

/// Mutable fields carried by an edit event.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagePatch {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub files: Vec<IdPlusName>,
    #[serde(default)]
    pub receiver: Vec<IdPlusName>,
}

impl Message {
    pub fn apply_patch(&mut self, patch: MessagePatch) {
        self.title = patch.title;
        self.content = patch.content;
        self.files = patch.files;
        self.receiver = patch.receiver;
    }
}

impl Record for Message {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_message() {
        let message: Message = serde_json::from_str(
            r#"{
                "id": "m1",
                "title": "Field trip",
                "content": "Bring a signed form.",
                "author": {"id": "t1", "name": "Ms. Rivera"},
                "date": 1700000000000,
                "files": [],
                "receiver": []
            }"#,
        )
        .unwrap();
        assert_eq!(message.id, "m1");
        assert!(message.pdf.is_none());
        assert!(message.preview.is_none());
    }

    #[test]
    fn test_apply_patch_overwrites_mutable_fields() {
        let mut message: Message = serde_json::from_str(
            r#"{
                "id": "m1",
                "title": "Old",
                "content": "old body",
                "author": {"id": "t1", "name": "Ms. Rivera"},
                "date": 100,
                "files": [],
                "receiver": []
            }"#,
        )
        .unwrap();
        let patch: MessagePatch = serde_json::from_str(
            r#"{"title": "New", "content": "new body", "files": [], "receiver": [{"id": "s1", "name": "Ana"}]}"#,
        )
        .unwrap();
        message.apply_patch(patch);
        assert_eq!(message.title, "New");
        assert_eq!(message.receiver.len(), 1);
        // Author and date are not editable.
        assert_eq!(message.author.id, "t1");
        assert_eq!(message.date, 100);
    }
}
