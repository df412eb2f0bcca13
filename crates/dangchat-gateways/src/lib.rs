//! # dangchat-gateways
//!
//! The production OracleGateway: Google Gemini with per-mode prompts and
//! strict-JSON response schemas. Network failure, empty output, and
//! schema-mismatched output are split into the three OracleError kinds;
//! the orchestrator collapses all of them into one fetch failure.

pub mod gemini;
pub mod oracle;
pub mod prompts;

pub use gemini::{GeminiClient, GeminiClientConfig, GeminiError};
pub use oracle::GeminiOracle;
