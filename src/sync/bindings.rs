use std::{collections::BTreeMap, sync::Arc};

use crate::{
    context::{append_suggestions, AppContext, SuggestionKind},
    models::{
        BusinessModelBlockPatch, BusinessModelBlockType, BusinessModelCanvasData,
        ProblemCanvasData, ProblemCanvasPatch, ValuePropositionCanvas, ValuePropositionPatch,
    },
    settings::DebounceSettings,
};

use super::{
    editor::{CanvasEditor, CanvasSource},
    reconcile::{BlockPart, BusinessModelField, ProblemField, ValuePropositionField},
};

pub type ProblemCanvasEditor = CanvasEditor<ProblemCanvasSource>;
pub type ValuePropositionEditor = CanvasEditor<ValuePropositionSource>;
pub type BusinessModelEditor = CanvasEditor<BusinessModelSource>;

pub struct ProblemCanvasSource {
    ctx: Arc<AppContext>,
}

impl CanvasSource for ProblemCanvasSource {
    type Record = ProblemCanvasData;

    fn name(&self) -> &'static str {
        "problem canvas"
    }

    fn incoming(&self) -> ProblemCanvasData {
        self.ctx.problem_canvas()
    }

    fn write_fields(&self, changes: Vec<(ProblemField, String)>) {
        let mut patch = ProblemCanvasPatch::default();
        for (field, value) in changes {
            let slot = match field {
                ProblemField::JobsToBeDone => &mut patch.jobs_to_be_done,
                ProblemField::Pains => &mut patch.pains,
                ProblemField::Gains => &mut patch.gains,
                ProblemField::InnovatorsBiasCheckInput => &mut patch.innovators_bias_check_input,
            };
            *slot = Some(value);
        }
        if !patch.is_empty() {
            self.ctx.update_problem_canvas(patch);
        }
    }
}

pub struct ValuePropositionSource {
    ctx: Arc<AppContext>,
}

impl CanvasSource for ValuePropositionSource {
    type Record = ValuePropositionCanvas;

    fn name(&self) -> &'static str {
        "value proposition canvas"
    }

    fn incoming(&self) -> ValuePropositionCanvas {
        self.ctx.value_proposition_view()
    }

    fn write_fields(&self, changes: Vec<(ValuePropositionField, String)>) {
        let mut patch = ValuePropositionPatch::default();
        for (field, value) in changes {
            let slot = match field {
                ValuePropositionField::CustomerJobs => &mut patch.customer_jobs,
                ValuePropositionField::CustomerPains => &mut patch.customer_pains,
                ValuePropositionField::CustomerGains => &mut patch.customer_gains,
                ValuePropositionField::ProductsServices => &mut patch.products_services,
                ValuePropositionField::PainRelievers => &mut patch.pain_relievers,
                ValuePropositionField::GainCreators => &mut patch.gain_creators,
            };
            *slot = Some(value);
        }
        if !patch.is_empty() {
            self.ctx.update_value_proposition(patch);
        }
    }
}

pub struct BusinessModelSource {
    ctx: Arc<AppContext>,
}

impl CanvasSource for BusinessModelSource {
    type Record = BusinessModelCanvasData;

    fn name(&self) -> &'static str {
        "business model canvas"
    }

    fn incoming(&self) -> BusinessModelCanvasData {
        self.ctx.business_model_view()
    }

    /// One block update per touched block.
    fn write_fields(&self, changes: Vec<(BusinessModelField, String)>) {
        let mut patches: BTreeMap<BusinessModelBlockType, BusinessModelBlockPatch> = BTreeMap::new();
        for (field, value) in changes {
            let patch = patches.entry(field.block).or_default();
            match field.part {
                BlockPart::Content => patch.content = Some(value),
                BlockPart::FinancialHypotheses => patch.financial_hypotheses = Some(value),
            }
        }
        for (block, patch) in patches {
            self.ctx.update_business_model_block(block, patch);
        }
    }
}

impl ProblemCanvasEditor {
    pub fn open(ctx: Arc<AppContext>, debounce: &DebounceSettings) -> Self {
        CanvasEditor::new(ProblemCanvasSource { ctx }, debounce.problem_canvas())
    }

    /// Append fetched suggestions to the pains or gains buffer as a local edit.
    pub fn append_suggestions(&self, kind: SuggestionKind, suggestions: &[String]) -> bool {
        if suggestions.is_empty() {
            return false;
        }
        let field = match kind {
            SuggestionKind::Pains => ProblemField::Pains,
            SuggestionKind::Gains => ProblemField::Gains,
        };
        let combined = append_suggestions(&self.value(field), suggestions);
        self.edit(field, combined)
    }
}

impl ValuePropositionEditor {
    pub fn open(ctx: Arc<AppContext>, debounce: &DebounceSettings) -> Self {
        CanvasEditor::new(ValuePropositionSource { ctx }, debounce.value_proposition())
    }
}

impl BusinessModelEditor {
    pub fn open(ctx: Arc<AppContext>, debounce: &DebounceSettings) -> Self {
        CanvasEditor::new(BusinessModelSource { ctx }, debounce.business_model())
    }

    /// Unlink the `valuePropositions` block so it becomes editable here.
    pub fn unlink_value_propositions(&self) {
        self.source().ctx.unlink_value_propositions();
        self.sync_from_store();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{context::test_support::context_with, llm::MockGenerator};

    async fn shared_context() -> Arc<AppContext> {
        let (_backend, _mock, ctx) = context_with(MockGenerator::default()).await;
        Arc::new(ctx)
    }

    #[tokio::test]
    async fn untouched_derived_fields_are_not_written() {
        let ctx = shared_context().await;
        ctx.update_problem_canvas(ProblemCanvasPatch {
            jobs_to_be_done: Some("track expenses".into()),
            ..Default::default()
        });

        let editor = ValuePropositionEditor::open(ctx.clone(), &DebounceSettings::default());
        assert_eq!(editor.value(ValuePropositionField::CustomerJobs), "track expenses");

        editor.edit(ValuePropositionField::GainCreators, "auto-categorize");
        assert!(editor.flush());

        let stored = ctx.value_proposition();
        assert_eq!(stored.customer_jobs, "");
        assert_eq!(stored.gain_creators, "auto-categorize");
    }

    #[tokio::test]
    async fn linked_block_is_read_only_until_unlinked() {
        let ctx = shared_context().await;
        let editor = BusinessModelEditor::open(ctx.clone(), &DebounceSettings::default());
        let field = BusinessModelField::content(BusinessModelBlockType::ValuePropositions);

        assert!(editor.is_read_only(field));
        assert!(!editor.edit(field, "our words"));

        editor.unlink_value_propositions();
        assert!(!editor.is_read_only(field));
        assert!(editor.edit(field, "our words"));
        editor.flush();

        let stored = ctx.business_model().blocks.value_propositions;
        assert_eq!(stored.content, "our words");
        assert!(!stored.linked);
    }

    #[tokio::test]
    async fn block_parts_are_grouped_per_block() {
        let ctx = shared_context().await;
        let editor = BusinessModelEditor::open(ctx.clone(), &DebounceSettings::default());
        let revision = ctx.revision();

        editor.edit(
            BusinessModelField::content(BusinessModelBlockType::CostStructure),
            "servers",
        );
        editor.edit(
            BusinessModelField::financial_hypotheses(BusinessModelBlockType::CostStructure),
            "$2k/month",
        );
        editor.flush();

        assert_eq!(ctx.revision(), revision + 1);
        let block = ctx.business_model().blocks.cost_structure;
        assert_eq!(block.content, "servers");
        assert_eq!(block.financial_hypotheses, "$2k/month");
    }

    #[tokio::test]
    async fn suggestions_land_in_the_buffer() {
        let ctx = shared_context().await;
        let editor = ProblemCanvasEditor::open(ctx.clone(), &DebounceSettings::default());
        editor.edit(ProblemField::Pains, "Slow approvals");

        let applied = editor.append_suggestions(
            SuggestionKind::Pains,
            &["Lost receipts".to_string(), "Late fees".to_string()],
        );
        assert!(applied);
        assert_eq!(
            editor.value(ProblemField::Pains),
            "Slow approvals\n- Lost receipts\n- Late fees"
        );
        assert!(editor.has_pending_write());
    }
}
