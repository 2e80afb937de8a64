//! One-directional defaults between canvases, recomputed on every read.
//!
//! Problem Canvas → Value Proposition customer profile, and
//! Value Proposition value map → Business Model `valuePropositions` block.
//! Nothing here is persisted; a derived value becomes stored data only once the
//! user edits the target field.

use crate::models::{
    BusinessModelCanvasData, ProblemCanvasData, ValuePropositionCanvas, VALUE_PROPOSITIONS_MARKER,
};

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn or_default(own: &str, upstream: &str) -> String {
    let chosen = if is_blank(own) { upstream } else { own };
    chosen.to_string()
}

fn or_na(value: &str) -> &str {
    if is_blank(value) {
        "N/A"
    } else {
        value
    }
}

/// The Value Proposition Canvas as shown: blank customer-profile fields fall
/// back to the Problem Canvas.
pub fn value_proposition_view(
    stored: &ValuePropositionCanvas,
    problem: &ProblemCanvasData,
) -> ValuePropositionCanvas {
    ValuePropositionCanvas {
        customer_jobs: or_default(&stored.customer_jobs, &problem.jobs_to_be_done),
        customer_pains: or_default(&stored.customer_pains, &problem.pains),
        customer_gains: or_default(&stored.customer_gains, &problem.gains),
        ..stored.clone()
    }
}

pub fn value_propositions_summary(vp: &ValuePropositionCanvas) -> String {
    format!(
        "Products/Services: {}\nPain Relievers: {}\nGain Creators: {}",
        or_na(&vp.products_services),
        or_na(&vp.pain_relievers),
        or_na(&vp.gain_creators),
    )
}

/// Marker line followed by the value-map summary.
pub fn linked_value_propositions_content(vp: &ValuePropositionCanvas) -> String {
    format!("{}\n{}", VALUE_PROPOSITIONS_MARKER, value_propositions_summary(vp))
}

/// Content a user keeps after taking ownership of a linked block.
pub fn unlinked_content(content: &str) -> String {
    content
        .strip_prefix(VALUE_PROPOSITIONS_MARKER)
        .map(|rest| rest.trim_start_matches('\n'))
        .unwrap_or(content)
        .to_string()
}

/// The Business Model Canvas as shown: a blank or linked `valuePropositions`
/// block is replaced by the current Value Proposition summary.
pub fn business_model_view(
    stored: &BusinessModelCanvasData,
    vp: &ValuePropositionCanvas,
) -> BusinessModelCanvasData {
    let mut view = stored.clone();
    let block = &mut view.blocks.value_propositions;
    if block.linked || is_blank(&block.content) {
        block.content = linked_value_propositions_content(vp);
        block.linked = true;
    }
    view
}
