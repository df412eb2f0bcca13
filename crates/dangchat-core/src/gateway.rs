//! OracleGateway - boundary to the generative fortune service.
//!
//! Pure request/response: no retries, no local state. A failure is terminal
//! for the attempt and must be re-triggered by the user.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{FortuneResult, Mode, SajuProfile};

/// One fetch for one mode. Pair modes carry the partner profile.
#[derive(Debug, Clone, PartialEq)]
pub struct OracleRequest {
    pub mode: Mode,
    pub profile: SajuProfile,
    pub partner: Option<SajuProfile>,
}

impl OracleRequest {
    pub fn single(mode: Mode, profile: SajuProfile) -> Self {
        Self {
            mode,
            profile,
            partner: None,
        }
    }

    pub fn pair(mode: Mode, profile: SajuProfile, partner: SajuProfile) -> Self {
        Self {
            mode,
            profile,
            partner: Some(partner),
        }
    }
}

/// Oracle failures. All three kinds collapse to one user-facing fetch
/// failure at the orchestrator boundary; the split exists for logging and
/// gateway tests.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("oracle transport error: {0}")]
    Http(String),

    #[error("oracle returned no content: {0}")]
    EmptyResponse(String),

    #[error("oracle response did not match the {mode} shape: {detail}")]
    Schema { mode: Mode, detail: String },
}

/// The fortune service boundary. Implementations map a profile (or pair)
/// to the mode's typed payload.
#[async_trait]
pub trait OracleGateway: Send + Sync {
    async fn fetch(&self, request: OracleRequest) -> Result<FortuneResult, OracleError>;
}

#[async_trait]
impl OracleGateway for Arc<dyn OracleGateway> {
    async fn fetch(&self, request: OracleRequest) -> Result<FortuneResult, OracleError> {
        (**self).fetch(request).await
    }
}
