//! Install-prompt slot.
//!
//! The browser hands the app one installability handle; it can be used at
//! most once. The orchestrator only tracks captured/consumed - the handle
//! itself is opaque.

use thiserror::Error;

/// Opaque token for the browser-provided install prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPromptHandle(String);

impl InstallPromptHandle {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InstallPromptError {
    #[error("an install prompt is already captured")]
    AlreadyCaptured,
    #[error("the install prompt was already consumed")]
    AlreadyConsumed,
    #[error("no install prompt has been captured")]
    NotCaptured,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum SlotState {
    #[default]
    Empty,
    Captured(InstallPromptHandle),
    Consumed,
}

/// At-most-once capture/consume slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallPromptSlot {
    state: SlotState,
}

impl InstallPromptSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the browser's handle. Fails once one was captured or spent.
    pub fn capture(&mut self, handle: InstallPromptHandle) -> Result<(), InstallPromptError> {
        match self.state {
            SlotState::Empty => {
                self.state = SlotState::Captured(handle);
                Ok(())
            }
            SlotState::Captured(_) => Err(InstallPromptError::AlreadyCaptured),
            SlotState::Consumed => Err(InstallPromptError::AlreadyConsumed),
        }
    }

    /// Take the handle out; it can never be taken again.
    pub fn consume(&mut self) -> Result<InstallPromptHandle, InstallPromptError> {
        match std::mem::replace(&mut self.state, SlotState::Consumed) {
            SlotState::Captured(handle) => Ok(handle),
            SlotState::Empty => {
                self.state = SlotState::Empty;
                Err(InstallPromptError::NotCaptured)
            }
            SlotState::Consumed => Err(InstallPromptError::AlreadyConsumed),
        }
    }

    pub fn is_captured(&self) -> bool {
        matches!(self.state, SlotState::Captured(_))
    }

    pub fn is_consumed(&self) -> bool {
        self.state == SlotState::Consumed
    }
}
