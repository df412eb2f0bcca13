//! GeminiOracle - the OracleGateway implementation.
//!
//! One fetch = one prompt + schema call and one typed parse. No retries;
//! a failure is terminal for the attempt and the orchestrator decides what
//! the user sees.

use async_trait::async_trait;
use tracing::debug;

use dangchat_core::{FortuneResult, Mode, OracleError, OracleGateway, OracleRequest};

use crate::gemini::{GeminiClient, GeminiClientConfig, GeminiError};
use crate::prompts;

/// Gemini-backed fortune gateway.
pub struct GeminiOracle {
    client: GeminiClient,
}

impl GeminiOracle {
    /// Create a gateway from client configuration.
    pub fn new(config: GeminiClientConfig) -> Result<Self, GeminiError> {
        Ok(Self {
            client: GeminiClient::new(config)?,
        })
    }

    /// Wrap an existing client.
    pub fn with_client(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OracleGateway for GeminiOracle {
    async fn fetch(&self, request: OracleRequest) -> Result<FortuneResult, OracleError> {
        let parts = prompts::for_request(&request);
        debug!(mode = %request.mode, "dispatching oracle fetch");

        let text = self
            .client
            .generate_json(&parts.system, &parts.user, parts.schema)
            .await
            .map_err(|e| map_gemini_error(request.mode, e))?;

        let result = parse_payload(request.mode, &text)?;
        debug!(mode = %request.mode, "oracle fetch parsed");
        Ok(result)
    }
}

/// Transport and API-envelope failures. A malformed envelope counts as an
/// unusable response, not a schema mismatch of the mode payload.
fn map_gemini_error(mode: Mode, error: GeminiError) -> OracleError {
    match error {
        GeminiError::Http(detail) | GeminiError::Response(detail) => OracleError::Http(detail),
        GeminiError::Empty(detail) => OracleError::EmptyResponse(detail),
        GeminiError::Serialization(detail) => {
            OracleError::EmptyResponse(format!("malformed envelope for {}: {}", mode, detail))
        }
    }
}

/// Parse the model's JSON text into the typed payload for the mode.
pub(crate) fn parse_payload(mode: Mode, text: &str) -> Result<FortuneResult, OracleError> {
    let schema_err = |e: serde_json::Error| OracleError::Schema {
        mode,
        detail: e.to_string(),
    };
    let result = match mode {
        Mode::Manse => FortuneResult::Manse(serde_json::from_str(text).map_err(schema_err)?),
        Mode::Chongun => FortuneResult::Chongun(serde_json::from_str(text).map_err(schema_err)?),
        Mode::Gunghap => FortuneResult::Gunghap(serde_json::from_str(text).map_err(schema_err)?),
        Mode::Lotto => FortuneResult::Lotto(serde_json::from_str(text).map_err(schema_err)?),
        Mode::CelebMatch => {
            FortuneResult::CelebMatch(serde_json::from_str(text).map_err(schema_err)?)
        }
        Mode::Travel => FortuneResult::Travel(serde_json::from_str(text).map_err(schema_err)?),
        Mode::Samjae => FortuneResult::Samjae(serde_json::from_str(text).map_err(schema_err)?),
    };
    Ok(result)
}
