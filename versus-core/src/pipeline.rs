//! The comparison pipeline — prompt, request, parse, sanitize.
//!
//! Strict sequential composition: a failure in the request or parse step
//! aborts the run and propagates its failure kind unchanged; sanitization
//! cannot fail. Single-flight is the session's responsibility and is not
//! re-checked here.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::client::AiClient;
use crate::error::AiError;
use crate::parse::extract_payload;
use crate::prompt::build_comparison_prompt;
use crate::sanitize::sanitize;
use crate::types::{ComparisonRequest, ComparisonResult};

/// Orchestrates one cancellable comparison run against an AI client.
pub struct ComparisonPipeline {
    client: Arc<dyn AiClient>,
}

impl ComparisonPipeline {
    pub fn new(client: Arc<dyn AiClient>) -> Self {
        Self { client }
    }

    /// Run the full pipeline for a validated request.
    ///
    /// Only the network step suspends; the surrounding stages are pure
    /// synchronous transforms executed strictly in sequence.
    pub async fn run(
        &self,
        request: &ComparisonRequest,
        cancel: &CancellationToken,
    ) -> Result<ComparisonResult, AiError> {
        debug!(
            url1_len = request.url1.len(),
            url2_len = request.url2.len(),
            "Starting comparison run"
        );

        let prompt = build_comparison_prompt(&request.url1, &request.url2);
        let raw = self.client.generate(&prompt, cancel).await?;
        let payload = extract_payload(&raw)?;
        let result = sanitize(&payload);

        info!(
            winner = %result.recommendation.winner,
            confidence = result.recommendation.confidence,
            "Comparison run complete"
        );
        Ok(result)
    }
}
