use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{split_list, Record};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HypothesisStatus {
    #[default]
    Pending,
    Testing,
    Validated,
    Invalidated,
}

/// A falsifiable belief about customers. Status moves freely; nothing enforces
/// the pending → testing → validated/invalidated order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hypothesis {
    pub id: String,
    pub description: String,
    pub status: HypothesisStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_critique: Option<String>,
}

impl Record for Hypothesis {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewHypothesis {
    pub description: String,
}

impl NewHypothesis {
    pub(crate) fn into_record(self, id: String, created_at: DateTime<Utc>) -> Hypothesis {
        Hypothesis {
            id,
            description: self.description,
            status: HypothesisStatus::Pending,
            created_at,
            ai_critique: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestCardStatus {
    #[default]
    Planned,
    Running,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCard {
    pub id: String,
    /// Soft reference; may outlive the hypothesis it names.
    pub hypothesis_id: String,
    pub test_description: String,
    pub metric: String,
    pub success_criteria: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learnings: Option<String>,
    pub status: TestCardStatus,
}

impl Record for TestCard {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewTestCard {
    pub hypothesis_id: String,
    pub test_description: String,
    pub metric: String,
    pub success_criteria: String,
    pub results: Option<String>,
    pub learnings: Option<String>,
}

impl NewTestCard {
    pub(crate) fn into_record(self, id: String) -> TestCard {
        TestCard {
            id,
            hypothesis_id: self.hypothesis_id,
            test_description: self.test_description,
            metric: self.metric,
            success_criteria: self.success_criteria,
            results: self.results,
            learnings: self.learnings,
            status: TestCardStatus::Planned,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MvpType {
    #[default]
    #[serde(rename = "landing page")]
    LandingPage,
    #[serde(rename = "interactive mockup")]
    InteractiveMockup,
    #[serde(rename = "concierge")]
    Concierge,
    #[serde(rename = "facade")]
    Facade,
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "other")]
    Other,
}

impl MvpType {
    pub fn label(&self) -> &'static str {
        match self {
            MvpType::LandingPage => "Landing Page",
            MvpType::InteractiveMockup => "Interactive Mockup",
            MvpType::Concierge => "Concierge",
            MvpType::Facade => "Facade (Wizard of Oz)",
            MvpType::Video => "Video",
            MvpType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MvpStatus {
    #[default]
    Ideation,
    Building,
    Testing,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mvp {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub mvp_type: MvpType,
    pub description: String,
    /// Soft references into the hypothesis collection.
    #[serde(default)]
    pub linked_hypothesis_ids: Vec<String>,
    pub metrics_to_track: String,
    pub status: MvpStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_summary: Option<String>,
}

impl Record for Mvp {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewMvp {
    pub name: String,
    #[serde(rename = "type")]
    pub mvp_type: MvpType,
    pub description: String,
    pub linked_hypothesis_ids: Vec<String>,
    pub metrics_to_track: String,
    pub feedback_summary: Option<String>,
}

impl NewMvp {
    /// Take the linked hypotheses from a comma-separated id list.
    pub fn with_hypothesis_ids(mut self, raw: &str) -> Self {
        self.linked_hypothesis_ids = parse_id_list(raw);
        self
    }

    pub(crate) fn into_record(self, id: String) -> Mvp {
        Mvp {
            id,
            name: self.name,
            mvp_type: self.mvp_type,
            description: self.description,
            linked_hypothesis_ids: self.linked_hypothesis_ids,
            metrics_to_track: self.metrics_to_track,
            status: MvpStatus::Ideation,
            feedback_summary: self.feedback_summary,
        }
    }
}

pub fn parse_id_list(raw: &str) -> Vec<String> {
    split_list(raw).collect()
}
