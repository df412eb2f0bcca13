//! SessionState - the single shared mutable resource.
//!
//! An explicit, owned state object passed to pure transition functions;
//! never a free-floating global. The orchestrator shell is its only writer.

use chrono::{DateTime, Utc};

use dangchat_core::{AuthIdentity, FortuneResult, Mode, SajuProfile, Screen};

use crate::install_prompt::InstallPromptSlot;
use crate::result_cache::ResultCache;

/// Monotonic marker distinguishing fetch attempts. A settlement whose token
/// no longer matches the in-flight attempt is stale and discarded.
pub type AttemptToken = u64;

/// The fetch currently outstanding for this session, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt {
    pub mode: Mode,
    pub token: AttemptToken,
}

/// A dismissible user-facing notification (fetch failures only; store
/// failures are never surfaced).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

/// Everything the presentation layer renders from, plus the bookkeeping the
/// reconciliation rules need.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Session id, for log correlation only.
    pub id: String,
    pub screen: Screen,
    /// Mode selected on the hub; cleared by reset.
    pub mode: Option<Mode>,
    /// The profile last submitted (or adopted) in this session.
    pub active_profile: Option<SajuProfile>,
    /// Partner profile for the pair mode, recorded at submit.
    pub partner_profile: Option<SajuProfile>,
    pub identity: Option<AuthIdentity>,
    /// The identity's stored profile, adopted from the auth stream. Kept
    /// apart from `active_profile` so a background refresh never clobbers
    /// in-progress input.
    pub home_profile: Option<SajuProfile>,
    /// Identity id the session already reacted to; makes re-delivery of an
    /// unchanged identity a no-op for the transition rules.
    pub reacted_identity: Option<String>,
    /// Screen the auth screen was entered from; back() returns there.
    pub auth_return: Option<Screen>,
    pub results: ResultCache,
    pub in_flight: Option<Attempt>,
    pub notice: Option<Notice>,
    pub install_prompt: InstallPromptSlot,
    pub created_at: DateTime<Utc>,
}

impl SessionState {
    /// Fresh session: welcome screen, guest, nothing cached. A cached
    /// identity arrives through the auth stream and lands the user on the
    /// hub via the reconciliation rules.
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            screen: Screen::Welcome,
            mode: None,
            active_profile: None,
            partner_profile: None,
            identity: None,
            home_profile: None,
            reacted_identity: None,
            auth_return: None,
            results: ResultCache::new(),
            in_flight: None,
            notice: None,
            install_prompt: InstallPromptSlot::new(),
            created_at: Utc::now(),
        }
    }

    pub fn is_guest(&self) -> bool {
        self.identity.is_none()
    }

    /// The profile the returning-user shortcut would submit: the session's
    /// working profile first, else the identity's stored one. Only complete
    /// profiles qualify.
    pub fn shortcut_profile(&self) -> Option<&SajuProfile> {
        self.active_profile
            .as_ref()
            .or(self.home_profile.as_ref())
            .filter(|p| p.is_complete())
    }

    /// Committed result for a mode, readable only on the result screen.
    pub fn result_for(&self, mode: Mode) -> Option<&FortuneResult> {
        self.results.get(mode)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
