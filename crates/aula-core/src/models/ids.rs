use serde::{Deserialize, Serialize};

/// Identifier/name pair used wherever the server references a person or a
/// stored file without expanding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdPlusName {
    pub id: String,
    pub name: String,
}
