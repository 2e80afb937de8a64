use crate::{
    derive,
    llm::ApiKeyStatus,
    log_info, log_warn,
    models::{
        BusinessModelBlockPatch, BusinessModelBlockType, BusinessModelCanvasData,
        ProblemCanvasData, ProblemCanvasPatch, ValuePropositionCanvas, ValuePropositionPatch,
        VALUE_PROPOSITIONS_MARKER,
    },
};

use super::{prompts, AppContext, EnrichOutcome, ENABLE_LOGS};

const NO_REPHRASING: &str = "No specific rephrasing provided.";

impl AppContext {
    pub fn project_name(&self) -> String {
        self.project_name.get()
    }

    pub fn update_project_name(&self, name: impl Into<String>) {
        self.project_name.set(name.into());
    }

    pub fn problem_canvas(&self) -> ProblemCanvasData {
        self.problem_canvas.get()
    }

    pub fn update_problem_canvas(&self, patch: ProblemCanvasPatch) -> ProblemCanvasData {
        self.problem_canvas.update(|canvas| patch.apply(canvas))
    }

    /// The stored Value Proposition Canvas, without derived defaults.
    pub fn value_proposition(&self) -> ValuePropositionCanvas {
        self.value_proposition.get()
    }

    /// The Value Proposition Canvas with blank customer-profile fields filled
    /// from the Problem Canvas.
    pub fn value_proposition_view(&self) -> ValuePropositionCanvas {
        let problem = self.problem_canvas.get();
        self.value_proposition
            .read(|stored| derive::value_proposition_view(stored, &problem))
    }

    pub fn update_value_proposition(&self, patch: ValuePropositionPatch) -> ValuePropositionCanvas {
        self.value_proposition.update(|canvas| patch.apply(canvas))
    }

    /// The stored Business Model Canvas, without derived content.
    pub fn business_model(&self) -> BusinessModelCanvasData {
        self.business_model.get()
    }

    /// The Business Model Canvas with the `valuePropositions` block derived
    /// from the Value Proposition Canvas while it is linked or blank.
    pub fn business_model_view(&self) -> BusinessModelCanvasData {
        let vp = self.value_proposition.get();
        self.business_model
            .read(|stored| derive::business_model_view(stored, &vp))
    }

    /// Merge `patch` into one block; the other eight are left as they are.
    ///
    /// New `valuePropositions` content without an explicit `linked` value is
    /// linked exactly when it starts with the marker line.
    pub fn update_business_model_block(
        &self,
        block: BusinessModelBlockType,
        mut patch: BusinessModelBlockPatch,
    ) -> BusinessModelCanvasData {
        if block == BusinessModelBlockType::ValuePropositions && patch.linked.is_none() {
            if let Some(content) = &patch.content {
                patch.linked = Some(content.starts_with(VALUE_PROPOSITIONS_MARKER));
            }
        }
        self.business_model
            .update(|canvas| patch.apply(canvas.blocks.get_mut(block)))
    }

    /// Take ownership of the `valuePropositions` block, keeping the summary
    /// text it currently shows without the marker line.
    pub fn unlink_value_propositions(&self) -> BusinessModelCanvasData {
        let shown = self.business_model_view().blocks.value_propositions.content;
        log_info!("Unlinking business model value propositions from the VP canvas");
        self.update_business_model_block(
            BusinessModelBlockType::ValuePropositions,
            BusinessModelBlockPatch {
                content: Some(derive::unlinked_content(&shown)),
                linked: Some(false),
                ..Default::default()
            },
        )
    }

    /// Generate marketing messaging for the canvas `canvas_id` and store it in
    /// `aiMessagingSuggestions`.
    pub async fn generate_vp_messaging(&self, canvas_id: &str) -> EnrichOutcome {
        let view = self.value_proposition_view();
        let prompt = (view.id == canvas_id).then(|| prompts::vp_messaging(&view));
        let canvas = &self.value_proposition;

        self.enrich("VP messaging", prompt, |text| {
            let current_id = canvas.read(|stored| stored.id.clone());
            if current_id != canvas_id {
                return false;
            }
            canvas.update(|stored| stored.ai_messaging_suggestions = Some(text));
            true
        })
        .await
    }

    /// Check the stored `innovatorsBiasCheckInput` for solution bias and
    /// overwrite `innovatorsBiasCheckResult` with the rephrasing.
    pub async fn check_innovators_bias(&self) -> EnrichOutcome {
        let input = self
            .problem_canvas
            .read(|canvas| canvas.innovators_bias_check_input.clone());
        if input.trim().is_empty() {
            return EnrichOutcome::Unavailable;
        }
        if self.api_key_status == ApiKeyStatus::Missing {
            return EnrichOutcome::Unavailable;
        }

        match self.llm.generate(&prompts::innovators_bias(&input), false).await {
            Ok(generated) => {
                let result = if generated.text.trim().is_empty() {
                    NO_REPHRASING.to_string()
                } else {
                    generated.text
                };
                self.problem_canvas
                    .update(|canvas| canvas.innovators_bias_check_result = result);
                EnrichOutcome::Applied
            }
            Err(err) => {
                log_warn!("Innovator's bias check failed: {}", err);
                EnrichOutcome::Failed(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        context::test_support::context_with,
        llm::MockGenerator,
        models::{BusinessModelBlockData, BusinessModelBlockPatch, BusinessModelBlockType},
    };

    use super::*;

    #[tokio::test]
    async fn project_name_persists() {
        let (backend, _mock, ctx) = context_with(MockGenerator::default()).await;
        ctx.update_project_name("Invoice Copilot");

        assert_eq!(ctx.project_name(), "Invoice Copilot");
        assert_eq!(
            backend.raw("validatehub-projectName").as_deref(),
            Some("\"Invoice Copilot\"")
        );
    }

    #[tokio::test]
    async fn block_update_leaves_other_blocks_untouched() {
        let (_backend, _mock, ctx) = context_with(MockGenerator::default()).await;
        ctx.update_business_model_block(
            BusinessModelBlockType::Channels,
            BusinessModelBlockPatch::content("newsletter"),
        );
        let before = ctx.business_model();

        let patch = BusinessModelBlockPatch {
            financial_hypotheses: Some("$20/seat".into()),
            ..Default::default()
        };
        ctx.update_business_model_block(BusinessModelBlockType::RevenueStreams, patch.clone());
        let after = ctx.update_business_model_block(BusinessModelBlockType::RevenueStreams, patch);

        for block in BusinessModelBlockType::ALL {
            if block != BusinessModelBlockType::RevenueStreams {
                assert_eq!(after.blocks.get(block), before.blocks.get(block));
            }
        }
        assert_eq!(
            after.blocks.revenue_streams,
            BusinessModelBlockData {
                financial_hypotheses: "$20/seat".into(),
                ..Default::default()
            }
        );
    }

    #[tokio::test]
    async fn direct_content_update_takes_over_a_legacy_linked_block() {
        let backend = std::sync::Arc::new(crate::storage::MemoryBackend::new());
        backend.insert_raw(
            "validatehub-businessModel",
            r#"{"id":"default-bmc","blocks":{"valuePropositions":{"content":"Linked from VP Canvas:\nold","financialHypotheses":""}}}"#,
        );
        let ctx = AppContext::load(
            crate::storage::KvAdapter::new(backend),
            std::sync::Arc::new(MockGenerator::default()),
        )
        .await;
        assert!(ctx.business_model().blocks.value_propositions.linked);

        ctx.update_business_model_block(
            BusinessModelBlockType::ValuePropositions,
            BusinessModelBlockPatch::content("Our own words"),
        );

        let shown = ctx.business_model_view().blocks.value_propositions;
        assert_eq!(shown.content, "Our own words");
        assert!(!shown.linked);
    }

    #[tokio::test]
    async fn marker_content_relinks_the_block() {
        let (_backend, _mock, ctx) = context_with(MockGenerator::default()).await;
        ctx.update_business_model_block(
            BusinessModelBlockType::ValuePropositions,
            BusinessModelBlockPatch::content("Mine"),
        );
        assert!(!ctx.business_model().blocks.value_propositions.linked);

        ctx.update_business_model_block(
            BusinessModelBlockType::ValuePropositions,
            BusinessModelBlockPatch::content(format!("{VALUE_PROPOSITIONS_MARKER}\nanything")),
        );
        assert!(ctx.business_model().blocks.value_propositions.linked);
    }

    #[tokio::test]
    async fn unlinking_keeps_the_summary_as_user_content() {
        let (_backend, _mock, ctx) = context_with(MockGenerator::default()).await;
        ctx.update_value_proposition(ValuePropositionPatch {
            products_services: Some("Invoice bot".into()),
            ..Default::default()
        });
        assert!(ctx.business_model_view().blocks.value_propositions.linked);

        let stored = ctx.unlink_value_propositions();
        let block = &stored.blocks.value_propositions;
        assert!(!block.linked);
        assert!(block.content.starts_with("Products/Services: Invoice bot"));

        ctx.update_value_proposition(ValuePropositionPatch {
            products_services: Some("Something else".into()),
            ..Default::default()
        });
        assert!(ctx
            .business_model_view()
            .blocks
            .value_propositions
            .content
            .contains("Invoice bot"));
    }

    #[tokio::test]
    async fn vp_messaging_is_stored_on_the_canvas() {
        let (_backend, mock, ctx) = context_with(MockGenerator::new("Close books in a day.")).await;
        ctx.update_problem_canvas(ProblemCanvasPatch {
            jobs_to_be_done: Some("close the books".into()),
            ..Default::default()
        });

        let outcome = ctx.generate_vp_messaging("default-vp").await;
        assert_eq!(outcome, EnrichOutcome::Applied);
        assert_eq!(
            ctx.value_proposition().ai_messaging_suggestions.as_deref(),
            Some("Close books in a day.")
        );
        assert!(mock.prompts()[0].contains("Customer Jobs: close the books"));
    }

    #[tokio::test]
    async fn vp_messaging_for_another_canvas_is_skipped() {
        let (_backend, mock, ctx) = context_with(MockGenerator::default()).await;
        assert_eq!(
            ctx.generate_vp_messaging("other-vp").await,
            EnrichOutcome::RecordMissing
        );
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn bias_check_overwrites_result() {
        let (_backend, _mock, ctx) = context_with(MockGenerator::new("Customers lose receipts.")).await;
        ctx.update_problem_canvas(ProblemCanvasPatch {
            innovators_bias_check_input: Some("We need an app that scans receipts".into()),
            innovators_bias_check_result: Some("old".into()),
            ..Default::default()
        });

        assert_eq!(ctx.check_innovators_bias().await, EnrichOutcome::Applied);
        assert_eq!(
            ctx.problem_canvas().innovators_bias_check_result,
            "Customers lose receipts."
        );
    }

    #[tokio::test]
    async fn bias_check_placeholder_on_empty_reply() {
        let (_backend, _mock, ctx) = context_with(MockGenerator::new("  ")).await;
        ctx.update_problem_canvas(ProblemCanvasPatch {
            innovators_bias_check_input: Some("An app for X".into()),
            ..Default::default()
        });

        ctx.check_innovators_bias().await;
        assert_eq!(
            ctx.problem_canvas().innovators_bias_check_result,
            "No specific rephrasing provided."
        );
    }

    #[tokio::test]
    async fn bias_check_without_input_does_not_call_out() {
        let (_backend, mock, ctx) = context_with(MockGenerator::default()).await;
        assert_eq!(ctx.check_innovators_bias().await, EnrichOutcome::Unavailable);
        assert_eq!(mock.call_count(), 0);
    }
}
