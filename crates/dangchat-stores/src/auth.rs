//! AuthSession - the identity provider's state stream.
//!
//! The provider's login/signup/logout actions complete elsewhere; only
//! their completions arrive here, as a stream the orchestrator subscribes
//! to. Events may be re-delivered for an unchanged identity; consumers are
//! expected to treat repeats as idempotent.

use async_trait::async_trait;
use tokio::sync::broadcast;

use dangchat_core::{AuthIdentity, SajuProfile};

use crate::profile_store::StoreError;

/// One notification from the identity provider.
#[derive(Debug, Clone)]
pub enum AuthEvent {
    /// A user is signed in. `cached_profile` is the identity's stored
    /// "home" profile when the provider resolved one.
    SignedIn {
        identity: AuthIdentity,
        cached_profile: Option<SajuProfile>,
    },
    SignedOut,
}

/// AuthBus trait - publish/subscribe for auth-state notifications.
#[async_trait]
pub trait AuthBus: Send + Sync {
    /// Publish an event to all active subscribers.
    async fn publish(&self, event: AuthEvent) -> Result<(), StoreError>;

    /// Subscribe to auth-state notifications.
    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;
}

/// In-process AuthBus based on tokio broadcast channels.
pub struct BroadcastAuthBus {
    tx: broadcast::Sender<AuthEvent>,
    capacity: usize,
}

impl BroadcastAuthBus {
    /// Create a new broadcast bus with channel capacity.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Return the configured channel capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for BroadcastAuthBus {
    fn default() -> Self {
        // Auth state changes are rare; a small buffer is plenty.
        Self::new(16)
    }
}

#[async_trait]
impl AuthBus for BroadcastAuthBus {
    async fn publish(&self, event: AuthEvent) -> Result<(), StoreError> {
        // "No receiver" is not an error; a session may not be attached yet.
        match self.tx.send(event) {
            Ok(_) => Ok(()),
            Err(broadcast::error::SendError(_)) => Ok(()),
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.tx.subscribe()
    }
}
