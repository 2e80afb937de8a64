use serde::{Deserialize, Serialize};

/// Fixed id of the single Problem Canvas.
pub const PROBLEM_CANVAS_ID: &str = "default-project";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProblemCanvasData {
    pub id: String,
    pub jobs_to_be_done: String,
    pub pains: String,
    pub gains: String,
    pub innovators_bias_check_input: String,
    /// Machine-generated; replaced wholesale by the bias check.
    pub innovators_bias_check_result: String,
}

impl Default for ProblemCanvasData {
    fn default() -> Self {
        Self {
            id: PROBLEM_CANVAS_ID.into(),
            jobs_to_be_done: String::new(),
            pains: String::new(),
            gains: String::new(),
            innovators_bias_check_input: String::new(),
            innovators_bias_check_result: String::new(),
        }
    }
}

/// Fields to merge into the Problem Canvas; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProblemCanvasPatch {
    pub jobs_to_be_done: Option<String>,
    pub pains: Option<String>,
    pub gains: Option<String>,
    pub innovators_bias_check_input: Option<String>,
    pub innovators_bias_check_result: Option<String>,
}

impl ProblemCanvasPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(self, canvas: &mut ProblemCanvasData) {
        if let Some(value) = self.jobs_to_be_done {
            canvas.jobs_to_be_done = value;
        }
        if let Some(value) = self.pains {
            canvas.pains = value;
        }
        if let Some(value) = self.gains {
            canvas.gains = value;
        }
        if let Some(value) = self.innovators_bias_check_input {
            canvas.innovators_bias_check_input = value;
        }
        if let Some(value) = self.innovators_bias_check_result {
            canvas.innovators_bias_check_result = value;
        }
    }
}
