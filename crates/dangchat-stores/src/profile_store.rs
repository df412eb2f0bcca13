//! ProfileStore - keyed storage for a user's SajuProfile.
//!
//! get/set-by-identity-id semantics. Write failures are swallowed by
//! orchestrator policy (logged, never surfaced, never block a transition).

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use thiserror::Error;

use dangchat_core::SajuProfile;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Profile not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// ProfileStore trait - async interface to the external profile storage.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch the stored profile for an identity, if any.
    async fn get(&self, identity_id: &str) -> Result<Option<SajuProfile>, StoreError>;

    /// Persist the profile verbatim, replacing any previous value.
    async fn put(&self, identity_id: &str, profile: &SajuProfile) -> Result<(), StoreError>;
}

/// In-memory implementation for development and testing.
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<String, SajuProfile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self {
            profiles: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get(&self, identity_id: &str) -> Result<Option<SajuProfile>, StoreError> {
        let profiles = self
            .profiles
            .read()
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        Ok(profiles.get(identity_id).cloned())
    }

    async fn put(&self, identity_id: &str, profile: &SajuProfile) -> Result<(), StoreError> {
        let mut profiles = self
            .profiles
            .write()
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        profiles.insert(identity_id.to_string(), profile.clone());
        Ok(())
    }
}
