use serde::{Deserialize, Serialize};

use super::{split_list, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    pub id: String,
    /// Date as entered by the user (ISO `YYYY-MM-DD`).
    pub date: String,
    pub interviewee_name: String,
    pub customer_segment: String,
    pub key_takeaways: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// `None` means the interviewer has not picked one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
}

impl Record for Interview {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Input for a new interview; tags arrive as one comma-separated string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewInterview {
    pub date: String,
    pub interviewee_name: String,
    pub customer_segment: String,
    pub key_takeaways: String,
    pub tags_string: Option<String>,
    pub sentiment: Option<Sentiment>,
}

impl NewInterview {
    pub(crate) fn into_record(self, id: String) -> Interview {
        let tags = self.tags_string.as_deref().map(parse_tags).unwrap_or_default();
        Interview {
            id,
            date: self.date,
            interviewee_name: self.interviewee_name,
            customer_segment: self.customer_segment,
            key_takeaways: self.key_takeaways,
            tags,
            sentiment: self.sentiment,
            ai_summary: None,
        }
    }
}

/// Tags are a set: duplicates collapse onto their first occurrence.
pub fn parse_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in split_list(raw) {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}
