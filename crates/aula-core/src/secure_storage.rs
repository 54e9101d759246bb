/// Secure storage for session credentials
///
/// Uses OS-backed secure storage:
/// - macOS/iOS: Keychain
/// - Linux: Secret Service API (gnome-keyring, KWallet, etc.)
/// - Windows: Credential Manager
use keyring::Entry;
use std::fmt;

const SERVICE_NAME: &str = "com.aula.client";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecureKey {
    SessionToken,
    SchoolId,
}

impl SecureKey {
    fn key_name(&self) -> &'static str {
        match self {
            SecureKey::SessionToken => "session_token",
            SecureKey::SchoolId => "school_id",
        }
    }
}

impl fmt::Display for SecureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key_name())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SecureStorageError {
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("Key not found: {0}")]
    KeyNotFound(SecureKey),
}

pub struct SecureStorage;

impl SecureStorage {
    /// Store a secret value in secure storage
    pub fn set(key: SecureKey, value: &str) -> Result<(), SecureStorageError> {
        let entry = Entry::new(SERVICE_NAME, key.key_name())?;
        entry.set_password(value)?;
        Ok(())
    }

    /// Retrieve a secret value from secure storage
    pub fn get(key: SecureKey) -> Result<String, SecureStorageError> {
        let entry = Entry::new(SERVICE_NAME, key.key_name())?;
        match entry.get_password() {
            Ok(value) => Ok(value),
            Err(keyring::Error::NoEntry) => Err(SecureStorageError::KeyNotFound(key)),
            Err(e) => Err(SecureStorageError::Keyring(e)),
        }
    }

    /// Delete a secret value from secure storage
    pub fn delete(key: SecureKey) -> Result<(), SecureStorageError> {
        let entry = Entry::new(SERVICE_NAME, key.key_name())?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Already deleted is success
            Err(e) => Err(SecureStorageError::Keyring(e)),
        }
    }

    /// Check if a key exists in secure storage
    pub fn exists(key: SecureKey) -> bool {
        Self::get(key).is_ok()
    }
}
