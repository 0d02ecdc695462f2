//! Durable credential storage for the terminal session.
//!
//! The persisted state is small: the backend URL, the bearer token, and the
//! serialized profile of the signed-in user. On Windows this lands in DPAPI
//! (via the `keyring` crate), on macOS the Keychain, and on Linux the Secret
//! Service API. `CredentialStore` is a seam so the session layer can run on
//! an in-memory store in tests and headless tools.

use std::collections::HashMap;
use std::sync::Mutex;

use keyring::Entry;
use tracing::warn;

use crate::error::StorageError;

const SERVICE_NAME: &str = "comanda-pos";

// Credential keys
pub const KEY_BACKEND_URL: &str = "backend_url";
pub const KEY_AUTH_TOKEN: &str = "auth_token";
pub const KEY_PERFIL: &str = "perfil";

/// All credential keys managed by this module.
const ALL_KEYS: &[&str] = &[KEY_BACKEND_URL, KEY_AUTH_TOKEN, KEY_PERFIL];

/// Abstract key/value credential storage.
pub trait CredentialStore: Send + Sync {
    /// Read a credential. `None` when the entry does not exist.
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Delete a credential; deleting a missing entry succeeds silently.
    fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Delete every key this crate manages (factory reset).
    fn clear_all(&self) -> Result<(), StorageError> {
        for key in ALL_KEYS {
            self.delete(key)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// OS keyring store
// ---------------------------------------------------------------------------

/// Production store backed by the OS credential manager.
#[derive(Debug, Default)]
pub struct KeyringStore;

impl KeyringStore {
    pub fn new() -> Self {
        Self
    }

    fn entry(key: &str) -> Result<Entry, StorageError> {
        Entry::new(SERVICE_NAME, key).map_err(|e| StorageError::Backend {
            key: key.to_string(),
            message: e.to_string(),
        })
    }
}

impl CredentialStore for KeyringStore {
    fn get(&self, key: &str) -> Option<String> {
        let entry = match Self::entry(key) {
            Ok(e) => e,
            Err(e) => {
                warn!(key, error = %e, "keyring: failed to create entry");
                return None;
            }
        };
        match entry.get_password() {
            Ok(pw) => Some(pw),
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                warn!(key, error = %e, "keyring: failed to read credential");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::entry(key)?
            .set_password(value)
            .map_err(|e| StorageError::Backend {
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        match Self::entry(key)?.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(StorageError::Backend {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Volatile store for tests and headless use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().map_err(|e| StorageError::Backend {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().map_err(|e| StorageError::Backend {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get(KEY_AUTH_TOKEN), None);
        store.set(KEY_AUTH_TOKEN, "tok").expect("set");
        assert_eq!(store.get(KEY_AUTH_TOKEN).as_deref(), Some("tok"));
        store.delete(KEY_AUTH_TOKEN).expect("delete");
        assert_eq!(store.get(KEY_AUTH_TOKEN), None);
        // Deleting a missing key is fine.
        store.delete(KEY_AUTH_TOKEN).expect("delete missing");
    }

    // Touches the real OS credential store; serialized because the keyring
    // is process-global, and ignored by default so CI without a Secret
    // Service does not fail.
    #[test]
    #[serial_test::serial]
    #[ignore = "requires an OS keyring"]
    fn keyring_store_roundtrip() {
        let store = KeyringStore::new();
        store.set(KEY_AUTH_TOKEN, "tok-keyring").expect("set");
        assert_eq!(store.get(KEY_AUTH_TOKEN).as_deref(), Some("tok-keyring"));
        store.delete(KEY_AUTH_TOKEN).expect("delete");
        assert_eq!(store.get(KEY_AUTH_TOKEN), None);
    }

    #[test]
    fn clear_all_removes_managed_keys() {
        let store = MemoryStore::new();
        store
            .set(KEY_BACKEND_URL, "http://localhost:8080")
            .expect("set");
        store.set(KEY_AUTH_TOKEN, "tok").expect("set");
        store.set(KEY_PERFIL, "{}").expect("set");
        store.clear_all().expect("clear");
        assert_eq!(store.get(KEY_BACKEND_URL), None);
        assert_eq!(store.get(KEY_AUTH_TOKEN), None);
        assert_eq!(store.get(KEY_PERFIL), None);
    }
}
