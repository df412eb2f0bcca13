//! # dangchat
//!
//! Session & navigation orchestrator for the dangchat saju fortune app.
//!
//! The presentation layer renders screens; this workspace owns everything
//! underneath: the single source of truth for "what screen is showing",
//! reconciliation between user operations and the auth-session stream,
//! per-mode oracle dispatch, and clean recovery from failures.
//!
//! ## Architecture
//!
//! ```text
//! User Operation          Auth Stream
//!        ↓                     ↓
//!   SessionOrchestrator (dangchat-runtime)
//!        ↓ consults
//!   ModeRegistry (dangchat-core)
//!        ↓ dispatches
//!   OracleGateway (dangchat-gateways, Gemini)
//!        ↓ settles
//!   ResultCache → SessionEvent bus → presentation re-renders
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use dangchat::prelude::*;
//!
//! let config = dangchat_config::load_config(path)?;
//! let oracle = dangchat::oracle_from_config(&config)?;
//! let store = Arc::new(InMemoryProfileStore::new());
//! let session = Arc::new(SessionOrchestrator::new(Arc::new(oracle), store));
//! session.attach_auth(&auth_bus);
//!
//! session.enter().await?;
//! session.select_mode(Mode::Chongun).await?;
//! ```

pub use dangchat_config as config;
pub use dangchat_core as model;
pub use dangchat_gateways as gateways;
pub use dangchat_runtime as runtime;
pub use dangchat_stores as stores;

use thiserror::Error;

use dangchat_config::{AppConfig, ConfigError};
use dangchat_gateways::{GeminiClientConfig, GeminiError, GeminiOracle};

/// Prelude for convenient imports
pub mod prelude {
    pub use dangchat_config::{load_config, AppConfig};
    pub use dangchat_core::{
        mode_spec, BirthTime, CalendarType, FortuneResult, Gender, Mode, OracleGateway,
        OracleRequest, RecoveryScreen, SajuProfile, Screen,
    };
    pub use dangchat_gateways::{GeminiClientConfig, GeminiOracle};
    pub use dangchat_runtime::{
        SessionConfig, SessionEvent, SessionOrchestrator, SessionState, TransitionError,
    };
    pub use dangchat_stores::{
        AuthBus, AuthEvent, BroadcastAuthBus, InMemoryProfileStore, ProfileStore,
    };
}

/// Wiring failures when building the oracle from configuration.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Gateway(#[from] GeminiError),
}

/// Build the production oracle from a validated configuration, resolving
/// the API key from the configured environment variable.
pub fn oracle_from_config(config: &AppConfig) -> Result<GeminiOracle, BuildError> {
    let api_key = config.oracle.resolve_api_key()?;
    let oracle = GeminiOracle::new(GeminiClientConfig {
        api_key,
        model: config.oracle.model.clone(),
        endpoint: config.oracle.endpoint.clone(),
        temperature: config.oracle.temperature,
        timeout_secs: config.oracle.timeout_secs,
    })?;
    Ok(oracle)
}
