use crate::secure_storage::{SecureKey, SecureStorage};

/// Authenticated session context, created at login and threaded explicitly
/// through every server call. There is no ambient credential state: code
/// that talks to the server takes a `&Session`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub school: String,
}

impl Session {
    pub fn new(token: impl Into<String>, school: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            school: school.into(),
        }
    }

    /// Restore a previously saved session, if both credentials are present.
    pub fn load() -> Option<Self> {
        let token = SecureStorage::get(SecureKey::SessionToken).ok()?;
        let school = SecureStorage::get(SecureKey::SchoolId).ok()?;
        Some(Self { token, school })
    }

    /// The saved token without a school selection (mid-login state).
    pub fn load_token() -> Option<String> {
        SecureStorage::get(SecureKey::SessionToken).ok()
    }

    pub fn save(&self) {
        let _ = SecureStorage::set(SecureKey::SessionToken, &self.token);
        let _ = SecureStorage::set(SecureKey::SchoolId, &self.school);
    }

    pub fn save_token(token: &str) {
        let _ = SecureStorage::set(SecureKey::SessionToken, token);
    }

    /// Sign out: forget both credentials.
    pub fn clear() {
        let _ = SecureStorage::delete(SecureKey::SessionToken);
        let _ = SecureStorage::delete(SecureKey::SchoolId);
    }

    /// Switch school: keep the token, drop the school selection.
    pub fn clear_school() {
        let _ = SecureStorage::delete(SecureKey::SchoolId);
    }
}
