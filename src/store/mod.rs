//! Persistent key-value storage for tokens and cached user data. Values are stored
//! as strings under fixed keys; nothing here tracks expiry, which is only discovered
//! by a failed session check. The storage medium is shared by every process using
//! the same backing file and is accessed without locking.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Session (bearer) token key.
pub const JWT_TOKEN_KEY: &str = "jwt_token";
/// In-progress sign-up token key.
pub const SIGN_UP_TOKEN_KEY: &str = "user_uuid";
/// Cached user data key, JSON-serialized.
pub const USER_DATA_KEY: &str = "user_data";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Minimal string key-value storage, the shape of browser local storage.
pub trait KeyValueStore {
    /// # Errors
    /// Returns an error if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// # Errors
    /// Returns an error if the backing medium cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// # Errors
    /// Returns an error if the backing medium cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Typed access to the fixed keys used by the flows.
#[derive(Debug)]
pub struct TokenStore<S> {
    inner: S,
}

impl<S: KeyValueStore> TokenStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// # Errors
    /// Returns an error if the token cannot be persisted.
    pub fn save_token(&mut self, token: &SecretString) -> Result<(), StoreError> {
        debug!("storing session token");
        self.inner.set(JWT_TOKEN_KEY, token.expose_secret())
    }

    /// Stored session token. Empty values count as absent.
    ///
    /// # Errors
    /// Returns an error if the storage cannot be read.
    pub fn get_token(&self) -> Result<Option<SecretString>, StoreError> {
        Ok(self
            .inner
            .get(JWT_TOKEN_KEY)?
            .filter(|token| !token.is_empty())
            .map(SecretString::from))
    }

    /// # Errors
    /// Returns an error if the storage cannot be written.
    pub fn remove_token(&mut self) -> Result<(), StoreError> {
        debug!("removing session token");
        self.inner.remove(JWT_TOKEN_KEY)
    }

    /// # Errors
    /// Returns an error if the token cannot be persisted.
    pub fn save_sign_up_token(&mut self, token: &SecretString) -> Result<(), StoreError> {
        self.inner.set(SIGN_UP_TOKEN_KEY, token.expose_secret())
    }

    /// # Errors
    /// Returns an error if the storage cannot be read.
    pub fn sign_up_token(&self) -> Result<Option<SecretString>, StoreError> {
        Ok(self
            .inner
            .get(SIGN_UP_TOKEN_KEY)?
            .filter(|token| !token.is_empty())
            .map(SecretString::from))
    }

    /// # Errors
    /// Returns an error if the storage cannot be written.
    pub fn clear_sign_up_token(&mut self) -> Result<(), StoreError> {
        self.inner.remove(SIGN_UP_TOKEN_KEY)
    }

    /// # Errors
    /// Returns an error if the data cannot be serialized or persisted.
    pub fn save_user_data(&mut self, user_data: &Value) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(user_data)?;
        self.inner.set(USER_DATA_KEY, &encoded)
    }

    /// # Errors
    /// Returns an error if the storage cannot be read or holds invalid JSON.
    pub fn user_data(&self) -> Result<Option<Value>, StoreError> {
        self.inner
            .get(USER_DATA_KEY)?
            .map(|encoded| serde_json::from_str(&encoded))
            .transpose()
            .map_err(StoreError::from)
    }

    /// # Errors
    /// Returns an error if the storage cannot be written.
    pub fn clear_user_data(&mut self) -> Result<(), StoreError> {
        self.inner.remove(USER_DATA_KEY)
    }
}
