//! Validation errors for user-submitted data.

use thiserror::Error;

use crate::types::Mode;

/// Rejected before any fetch; the screen never changes on validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("{0} requires a partner profile")]
    MissingPartner(Mode),

    #[error("no mode selected for submission")]
    NoModeSelected,
}
