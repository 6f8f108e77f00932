use std::sync::Arc;

use tracing::{debug, warn};

use super::inference::{CompletionBackend, InferenceError};
use super::parser::{parse_completion, FormatMismatchError};
use super::profile::{RiskComparisonRequest, RiskComparisonResult};
use super::prompt::{synthesize_prompt, SYSTEM_DIRECTIVE};

/// Service running one comparison end to end: synthesize the prompt, call
/// the completion backend, parse the reply against the output grammar.
///
/// Stateless per call; every failure is terminal for that submission.
pub struct RiskEstimationService<B> {
    backend: Arc<B>,
}

impl<B> RiskEstimationService<B>
where
    B: CompletionBackend + 'static,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    pub async fn estimate(
        &self,
        request: &RiskComparisonRequest,
    ) -> Result<RiskComparisonResult, RiskEstimateError> {
        let prompt = synthesize_prompt(request)?;
        debug!(prompt_bytes = prompt.len(), "prompt synthesized");

        let completion = self.backend.complete(SYSTEM_DIRECTIVE, &prompt).await?;

        let result = parse_completion(&completion).map_err(|err| {
            warn!(completion = %err.completion, "completion rejected by output grammar");
            err
        })?;

        debug!(
            multiplier = %result.multiplier,
            direction = %result.direction,
            "risk estimate parsed"
        );
        Ok(result)
    }
}

/// Error raised while producing one estimate.
#[derive(Debug, thiserror::Error)]
pub enum RiskEstimateError {
    #[error("failed to embed profiles into the prompt: {0}")]
    Prompt(#[from] serde_json::Error),
    #[error(transparent)]
    Inference(#[from] InferenceError),
    #[error(transparent)]
    Format(#[from] FormatMismatchError),
}
