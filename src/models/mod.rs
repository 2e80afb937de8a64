//! Persisted workbook records.
//!
//! Field names serialize in camelCase so the stored JSON matches the layout the
//! browser workbook has always written.

pub mod business_model;
pub mod experiment;
pub mod fermi;
pub mod interview;
pub mod learning;
pub mod problem;
pub mod value_proposition;

pub use business_model::{
    BusinessModelBlockData, BusinessModelBlockType, BusinessModelBlocks, BusinessModelCanvasData,
    BusinessModelBlockPatch, BUSINESS_MODEL_ID, VALUE_PROPOSITIONS_MARKER,
};
pub use experiment::{
    parse_id_list, Hypothesis, HypothesisStatus, Mvp, MvpStatus, MvpType, NewHypothesis, NewMvp,
    NewTestCard, TestCard, TestCardStatus,
};
pub use fermi::{parse_assumptions, FermiAssumption, FermiEstimation, NewFermiEstimation};
pub use interview::{parse_tags, Interview, NewInterview, Sentiment};
pub use learning::{LearningCard, NewLearningCard};
pub use problem::{ProblemCanvasData, ProblemCanvasPatch, PROBLEM_CANVAS_ID};
pub use value_proposition::{ValuePropositionCanvas, ValuePropositionPatch, VALUE_PROPOSITION_ID};

use uuid::Uuid;

pub const DEFAULT_PROJECT_NAME: &str = "My Awesome Idea";

/// A member of a list-valued collection, addressed by an opaque id.
pub trait Record {
    fn id(&self) -> &str;
}

/// Fresh opaque identifier, unique within any collection.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Split a comma-separated input into trimmed, non-empty entries.
pub(crate) fn split_list(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
}
