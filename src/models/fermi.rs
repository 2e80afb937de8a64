use serde::{Deserialize, Serialize};

use super::{generate_id, Record};

const PLACEHOLDER_LABEL: &str = "New Assumption";
const PLACEHOLDER_VALUE: &str = "0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FermiAssumption {
    pub id: String,
    pub label: String,
    /// Kept as text so ranges ("10-20") survive.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FermiEstimation {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub assumptions: Vec<FermiAssumption>,
    pub calculation_logic: String,
    pub estimated_outcome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_viability_assessment: Option<String>,
}

impl Record for FermiEstimation {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewFermiEstimation {
    pub name: String,
    /// `label:value` pairs separated by commas.
    pub assumptions_string: Option<String>,
    pub calculation_logic: String,
    pub estimated_outcome: String,
}

impl NewFermiEstimation {
    pub(crate) fn into_record(self, id: String) -> FermiEstimation {
        let assumptions = self
            .assumptions_string
            .as_deref()
            .map(parse_assumptions)
            .unwrap_or_default();
        FermiEstimation {
            id,
            name: self.name,
            assumptions,
            calculation_logic: self.calculation_logic,
            estimated_outcome: self.estimated_outcome,
            ai_viability_assessment: None,
        }
    }
}

/// Parse `"CAC:50, LTV:200"` into assumptions.
///
/// Every comma segment yields one entry. Each splits on its first colon; an
/// empty label becomes "New Assumption" and an empty value becomes "0".
pub fn parse_assumptions(raw: &str) -> Vec<FermiAssumption> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    raw.split(',')
        .map(|segment| {
            let (label, value) = segment.split_once(':').unwrap_or((segment, ""));
            let label = label.trim();
            let value = value.trim();
            FermiAssumption {
                id: generate_id(),
                label: if label.is_empty() { PLACEHOLDER_LABEL } else { label }.to_string(),
                value: if value.is_empty() { PLACEHOLDER_VALUE } else { value }.to_string(),
            }
        })
        .collect()
}
