use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Record;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningCard {
    pub id: String,
    /// Set once when the card is created.
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_test_card_id: Option<String>,
    pub what_we_thought: String,
    pub what_happened: String,
    pub what_we_learned: String,
    pub what_we_will_change: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_reflection_prompt: Option<String>,
}

impl Record for LearningCard {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewLearningCard {
    pub related_test_card_id: Option<String>,
    pub what_we_thought: String,
    pub what_happened: String,
    pub what_we_learned: String,
    pub what_we_will_change: String,
}

impl NewLearningCard {
    pub(crate) fn into_record(self, id: String, date: DateTime<Utc>) -> LearningCard {
        LearningCard {
            id,
            date,
            related_test_card_id: self.related_test_card_id,
            what_we_thought: self.what_we_thought,
            what_happened: self.what_happened,
            what_we_learned: self.what_we_learned,
            what_we_will_change: self.what_we_will_change,
            ai_reflection_prompt: None,
        }
    }
}
