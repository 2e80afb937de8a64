//! Text-generation collaborator.
//!
//! - `traits`: the [`TextGenerator`] seam used by enrichment
//! - `gemini`: REST client for the Gemini `generateContent` endpoint
//! - `json`: fenced-JSON extraction for JSON-mode responses
//! - `mock`: scripted generator for tests

pub mod gemini;
pub mod json;
pub mod mock;
pub mod traits;

pub use gemini::GeminiClient;
pub use mock::MockGenerator;
pub use traits::{ApiKeyStatus, Generated, LlmError, TextGenerator};
