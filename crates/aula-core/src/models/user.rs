use serde::{Deserialize, Serialize};

use super::Person;

/// One row of a student's grade sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    pub subject: String,
    #[serde(default)]
    pub deliberation: String,
    #[serde(default)]
    pub conceptual: String,
    #[serde(default)]
    pub average_first_four: String,
    #[serde(default)]
    pub average_second_four: String,
    #[serde(default, rename = "final")]
    pub final_grade: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    pub id: String,
    pub name: String,
}

/// Body of a successful `/login` or `/loginByToken` response.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub schools: Vec<School>,
}

/// The logged-in account, fetched from `/info` right after login.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Subject taught; empty for non-teachers.
    #[serde(default)]
    pub teacher: String,
    #[serde(default)]
    pub administrator: bool,
    #[serde(default)]
    pub grades: Vec<Grade>,
    /// People this account may address. The wire field name carries the
    /// server's historical spelling.
    #[serde(default, rename = "avaliable")]
    pub available: Vec<Person>,
    /// Linked student id, for parent accounts.
    #[serde(default)]
    pub child: Option<String>,
}

impl User {
    pub fn is_teacher(&self) -> bool {
        !self.teacher.is_empty()
    }
}
