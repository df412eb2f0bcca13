//! # dangchat-stores
//!
//! External-storage boundaries for the session orchestrator:
//! - ProfileStore: keyed persistence of a user's SajuProfile
//! - AuthSession: the identity provider's signed-in/signed-out stream
//!
//! Both ship in-memory implementations for development and tests; the
//! production adapters live with the embedding app.

pub mod auth;
pub mod profile_store;

pub use auth::{AuthBus, AuthEvent, BroadcastAuthBus};
pub use profile_store::{InMemoryProfileStore, ProfileStore, StoreError};
