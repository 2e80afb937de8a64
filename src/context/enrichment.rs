use serde::Serialize;

use crate::{llm::ApiKeyStatus, log_debug, log_warn};

use super::{AppContext, ENABLE_LOGS};

/// What happened to an enrichment request. Never an error: the record is
/// untouched unless the outcome is [`EnrichOutcome::Applied`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "message", rename_all = "camelCase")]
pub enum EnrichOutcome {
    Applied,
    /// The record did not exist, before the call or after it resolved.
    RecordMissing,
    /// No credential, or nothing to send. The collaborator was not called.
    Unavailable,
    Failed(String),
}

impl EnrichOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, EnrichOutcome::Applied)
    }

    /// Inline message for the triggering action, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            EnrichOutcome::Applied | EnrichOutcome::RecordMissing => None,
            EnrichOutcome::Unavailable => Some("AI feature unavailable".into()),
            EnrichOutcome::Failed(message) => Some(message.clone()),
        }
    }
}

impl AppContext {
    /// Run one plain-text enrichment.
    ///
    /// `prompt` is `None` when the record is absent. `apply` receives the
    /// generated text and must re-resolve the record by id, returning whether
    /// it still existed.
    pub(super) async fn enrich(
        &self,
        what: &str,
        prompt: Option<String>,
        apply: impl FnOnce(String) -> bool,
    ) -> EnrichOutcome {
        let Some(prompt) = prompt else {
            log_debug!("Skipping {}: record not found", what);
            return EnrichOutcome::RecordMissing;
        };
        if self.api_key_status == ApiKeyStatus::Missing {
            return EnrichOutcome::Unavailable;
        }

        match self.llm.generate(&prompt, false).await {
            Ok(generated) if generated.text.trim().is_empty() => {
                log_warn!("{} returned no text", what);
                EnrichOutcome::Failed("AI returned an empty response".into())
            }
            Ok(generated) => {
                if apply(generated.text) {
                    EnrichOutcome::Applied
                } else {
                    log_debug!("{} resolved after its record was deleted", what);
                    EnrichOutcome::RecordMissing
                }
            }
            Err(err) => {
                log_warn!("{} failed: {}", what, err);
                EnrichOutcome::Failed(err.to_string())
            }
        }
    }
}
