//! AuthIdentity - opaque reference to an externally managed account.

use serde::{Deserialize, Serialize};

/// The identity provider's id for a signed-in user. The orchestrator never
/// inspects the id beyond equality; it is the ProfileStore key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthIdentity {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl AuthIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: Some(display_name.into()),
        }
    }
}
