//! # dangchat-core
//!
//! Data model and boundary contracts for the dangchat session orchestrator:
//!
//! - **SajuProfile**: the canonical birth-data record a user supplies
//! - **Mode / Screen**: the closed sets of reading types and UI states
//! - **FortuneResult**: one typed payload per mode, carried opaquely
//! - **ModeRegistry**: the data table driving per-mode dispatch
//! - **OracleGateway**: the boundary to the generative fortune service
//!
//! Note: implementations of the boundaries live in dangchat-gateways and
//! dangchat-stores; the session state machine lives in dangchat-runtime.

pub mod error;
pub mod gateway;
pub mod lotto;
pub mod registry;
pub mod types;

pub use error::ValidationError;
pub use gateway::{OracleError, OracleGateway, OracleRequest};
pub use lotto::LottoError;
pub use registry::{all_modes, mode_spec, ModeSpec, ProfileArity};
pub use types::{
    AuthIdentity, BirthTime, CalendarType, FortuneResult, Gender, Mode, RecoveryScreen,
    SajuProfile, Screen,
};
