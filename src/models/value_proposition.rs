use serde::{Deserialize, Serialize};

/// Fixed id of the single Value Proposition Canvas.
pub const VALUE_PROPOSITION_ID: &str = "default-vp";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValuePropositionCanvas {
    pub id: String,
    // Customer profile; blank values are filled from the Problem Canvas on read.
    pub customer_jobs: String,
    pub customer_pains: String,
    pub customer_gains: String,
    // Value map.
    pub products_services: String,
    pub pain_relievers: String,
    pub gain_creators: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_messaging_suggestions: Option<String>,
}

impl Default for ValuePropositionCanvas {
    fn default() -> Self {
        Self {
            id: VALUE_PROPOSITION_ID.into(),
            customer_jobs: String::new(),
            customer_pains: String::new(),
            customer_gains: String::new(),
            products_services: String::new(),
            pain_relievers: String::new(),
            gain_creators: String::new(),
            ai_messaging_suggestions: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValuePropositionPatch {
    pub customer_jobs: Option<String>,
    pub customer_pains: Option<String>,
    pub customer_gains: Option<String>,
    pub products_services: Option<String>,
    pub pain_relievers: Option<String>,
    pub gain_creators: Option<String>,
    pub ai_messaging_suggestions: Option<String>,
}

impl ValuePropositionPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(self, canvas: &mut ValuePropositionCanvas) {
        let fields = [
            (self.customer_jobs, &mut canvas.customer_jobs),
            (self.customer_pains, &mut canvas.customer_pains),
            (self.customer_gains, &mut canvas.customer_gains),
            (self.products_services, &mut canvas.products_services),
            (self.pain_relievers, &mut canvas.pain_relievers),
            (self.gain_creators, &mut canvas.gain_creators),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if let Some(suggestions) = self.ai_messaging_suggestions {
            canvas.ai_messaging_suggestions = Some(suggestions);
        }
    }
}
