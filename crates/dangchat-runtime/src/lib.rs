//! # dangchat-runtime
//!
//! The Session & Navigation Orchestrator: the single owner of "what screen
//! is showing". Two independent asynchronous writers meet here - user
//! operations and the auth-session stream - and are reconciled by explicit,
//! table-driven rules instead of last-write-wins.
//!
//! Architecture:
//!
//! ```text
//! user op / auth event
//!        ↓
//! reducer (pure transition on SessionState)
//!        ↓
//! orchestrator shell (locks state, runs effects: oracle fetch,
//!                     profile persistence, event publication)
//!        ↓
//! SessionEvent bus → presentation layer re-renders
//! ```
//!
//! A fetch suspends only its own flow; staleness is detected at settlement
//! time via a per-attempt token, never by cancellation.

pub mod events;
pub mod install_prompt;
pub mod orchestrator;
pub mod reducer;
pub mod result_cache;
pub mod state;

pub use events::{SessionEvent, SessionEvents};
pub use install_prompt::{InstallPromptError, InstallPromptHandle, InstallPromptSlot};
pub use orchestrator::{SessionConfig, SessionOrchestrator};
pub use reducer::{
    auth_action, AuthAction, AuthKind, AuthOutcome, SelectOutcome, SettleOutcome, SubmitOutcome,
    TransitionError,
};
pub use result_cache::ResultCache;
pub use state::{Attempt, AttemptToken, Notice, SessionState};
