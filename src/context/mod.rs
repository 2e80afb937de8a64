//! The workbook: every entity store, loaded once and shared by handle.
//!
//! Operations are split by workbook area (`canvases`, `insights`,
//! `experiments`, `fermi`, `learning`) as `impl AppContext` blocks. Every
//! mutation updates memory before it returns; persistence and change
//! notification happen inside the store.

mod canvases;
mod enrichment;
mod experiments;
mod fermi;
mod insights;
mod learning;
mod prompts;
mod suggestions;

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use tokio::sync::watch;

use crate::{
    llm::{ApiKeyStatus, TextGenerator},
    log_info, log_warn,
    models::{
        BusinessModelCanvasData, FermiEstimation, Hypothesis, Interview, LearningCard, Mvp,
        ProblemCanvasData, TestCard, ValuePropositionCanvas, DEFAULT_PROJECT_NAME,
    },
    storage::{keys, KvAdapter},
    store::{ChangeFeed, Collection, Singleton},
};

pub use enrichment::EnrichOutcome;
pub use suggestions::{append_suggestions, parse_suggestions, SuggestionError, SuggestionKind};

const ENABLE_LOGS: bool = true;

pub struct AppContext {
    kv: KvAdapter,
    feed: ChangeFeed,
    llm: Arc<dyn TextGenerator>,
    api_key_status: ApiKeyStatus,
    project_name: Singleton<String>,
    problem_canvas: Singleton<ProblemCanvasData>,
    interviews: Collection<Interview>,
    hypotheses: Collection<Hypothesis>,
    test_cards: Collection<TestCard>,
    mvps: Collection<Mvp>,
    value_proposition: Singleton<ValuePropositionCanvas>,
    business_model: Singleton<BusinessModelCanvasData>,
    fermi_estimations: Collection<FermiEstimation>,
    learning_cards: Collection<LearningCard>,
}

/// Collection sizes, for startup logs and status displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkbookSummary {
    pub project_name: String,
    pub interviews: usize,
    pub hypotheses: usize,
    pub test_cards: usize,
    pub mvps: usize,
    pub fermi_estimations: usize,
    pub learning_cards: usize,
    pub api_key_status: ApiKeyStatus,
}

impl AppContext {
    /// Load every collection from `kv`, substituting defaults for anything absent.
    pub async fn load(kv: KvAdapter, llm: Arc<dyn TextGenerator>) -> Self {
        let feed = ChangeFeed::new();

        let project_name = Singleton::load(
            kv.clone(),
            keys::PROJECT_NAME,
            feed.clone(),
            DEFAULT_PROJECT_NAME.to_string(),
        )
        .await;
        let problem_canvas = Singleton::load(
            kv.clone(),
            keys::PROBLEM_CANVAS,
            feed.clone(),
            ProblemCanvasData::default(),
        )
        .await;
        let value_proposition = Singleton::load(
            kv.clone(),
            keys::VALUE_PROPOSITION,
            feed.clone(),
            ValuePropositionCanvas::default(),
        )
        .await;

        let stored_bmc: BusinessModelCanvasData = kv
            .read(keys::BUSINESS_MODEL, BusinessModelCanvasData::default())
            .await;
        let business_model = Singleton::with_value(
            kv.clone(),
            keys::BUSINESS_MODEL,
            feed.clone(),
            stored_bmc.normalize(),
        );

        let interviews = Collection::load(kv.clone(), keys::INTERVIEWS, feed.clone()).await;
        let hypotheses = Collection::load(kv.clone(), keys::HYPOTHESES, feed.clone()).await;
        let test_cards = Collection::load(kv.clone(), keys::TEST_CARDS, feed.clone()).await;
        let mvps = Collection::load(kv.clone(), keys::MVPS, feed.clone()).await;
        let fermi_estimations =
            Collection::load(kv.clone(), keys::FERMI_ESTIMATIONS, feed.clone()).await;
        let learning_cards =
            Collection::load(kv.clone(), keys::LEARNING_CARDS, feed.clone()).await;

        let api_key_status = llm.api_key_status();
        if api_key_status == ApiKeyStatus::Missing {
            log_warn!("API key is not configured; AI features are disabled");
        } else {
            log_info!("AI features enabled with model {}", llm.id());
        }

        Self {
            kv,
            feed,
            llm,
            api_key_status,
            project_name,
            problem_canvas,
            interviews,
            hypotheses,
            test_cards,
            mvps,
            value_proposition,
            business_model,
            fermi_estimations,
            learning_cards,
        }
    }

    pub fn api_key_status(&self) -> ApiKeyStatus {
        self.api_key_status
    }

    /// Receiver that observes a new revision after every store mutation.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.feed.subscribe()
    }

    pub fn revision(&self) -> u64 {
        self.feed.revision()
    }

    /// Wait until every write issued so far has reached the durable medium.
    pub async fn flush(&self) -> Result<()> {
        self.kv.flush().await
    }

    pub fn summary(&self) -> WorkbookSummary {
        WorkbookSummary {
            project_name: self.project_name(),
            interviews: self.interviews.len(),
            hypotheses: self.hypotheses.len(),
            test_cards: self.test_cards.len(),
            mvps: self.mvps.len(),
            fermi_estimations: self.fermi_estimations.len(),
            learning_cards: self.learning_cards.len(),
            api_key_status: self.api_key_status,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::context_with;
    use super::*;
    use crate::{llm::MockGenerator, storage::MemoryBackend};

    #[tokio::test]
    async fn empty_storage_loads_defaults() {
        let (_backend, _mock, ctx) = context_with(MockGenerator::default()).await;

        assert_eq!(ctx.project_name(), "My Awesome Idea");
        assert_eq!(ctx.problem_canvas(), ProblemCanvasData::default());
        assert_eq!(ctx.business_model(), BusinessModelCanvasData::default());
        assert!(ctx.interviews().is_empty());
        assert_eq!(ctx.api_key_status(), ApiKeyStatus::Ok);
    }

    #[tokio::test]
    async fn legacy_marker_block_is_loaded_as_linked() {
        let backend = Arc::new(MemoryBackend::new());
        backend.insert_raw(
            "validatehub-businessModel",
            r#"{"id":"default-bmc","blocks":{"valuePropositions":{"content":"Linked from VP Canvas:\nold","financialHypotheses":""}}}"#,
        );

        let ctx = AppContext::load(
            KvAdapter::new(backend.clone()),
            Arc::new(MockGenerator::default()),
        )
        .await;
        assert!(ctx.business_model().blocks.value_propositions.linked);
    }

    #[tokio::test]
    async fn malformed_collection_falls_back_to_empty() {
        let backend = Arc::new(MemoryBackend::new());
        backend.insert_raw("validatehub-hypotheses", "{not json");

        let ctx = AppContext::load(
            KvAdapter::new(backend),
            Arc::new(MockGenerator::without_key()),
        )
        .await;
        assert!(ctx.hypotheses().is_empty());
        assert_eq!(ctx.summary().api_key_status, ApiKeyStatus::Missing);
    }
}
