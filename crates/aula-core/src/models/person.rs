use serde::{Deserialize, Serialize};

use super::{Record, SortKey};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    pub id: String,
    pub name: String,
}

/// One directory entry: a student, parent, teacher or administrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    /// Account kind: "Student", "Parent", "Teacher" or "Administrator".
    #[serde(rename = "type", default)]
    pub role: String,
    /// Subject taught; empty for non-teachers. Some endpoints label this
    /// field `teacher` instead of `subject`.
    #[serde(default, alias = "teacher")]
    pub subject: String,
    /// The linked student, for parent accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child: Option<Child>,
}

/// Mutable fields carried by a directory edit event.
#[derive(Debug, Clone, Deserialize)]
pub struct PersonPatch {
    pub id: String,
    pub name: String,
    #[serde(default, alias = "teacher")]
    pub subject: String,
}

impl Person {
    pub fn apply_patch(&mut self, patch: PersonPatch) {
        self.name = patch.name;
        self.subject = patch.subject;
    }
}

impl Record for Person {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn sort_key(&self) -> SortKey {
        SortKey::name(&self.name)
    }

    fn search_text(&self) -> &str {
        &self.name
    }
}
