use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock, time::Duration};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-04-17";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const MIN_DEBOUNCE_MS: u64 = 500;
const MAX_DEBOUNCE_MS: u64 = 700;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub base_url: String,
    pub model: String,
    /// Usually supplied through the environment rather than the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            api_key: None,
        }
    }
}

/// Quiet period before a canvas edit buffer is written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceSettings {
    pub problem_canvas_ms: u64,
    pub value_proposition_ms: u64,
    pub business_model_ms: u64,
}

impl Default for DebounceSettings {
    fn default() -> Self {
        Self {
            problem_canvas_ms: 500,
            value_proposition_ms: 500,
            business_model_ms: 700,
        }
    }
}

impl DebounceSettings {
    fn clamp(ms: u64) -> Duration {
        Duration::from_millis(ms.clamp(MIN_DEBOUNCE_MS, MAX_DEBOUNCE_MS))
    }

    pub fn problem_canvas(&self) -> Duration {
        Self::clamp(self.problem_canvas_ms)
    }

    pub fn value_proposition(&self) -> Duration {
        Self::clamp(self.value_proposition_ms)
    }

    pub fn business_model(&self) -> Duration {
        Self::clamp(self.business_model_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkbookSettings {
    pub llm: LlmSettings,
    pub debounce: DebounceSettings,
}

impl WorkbookSettings {
    /// Apply `VALIDATEHUB_API_KEY` (or `API_KEY`) and `VALIDATEHUB_MODEL`.
    pub fn with_env_overrides(mut self) -> Self {
        let api_key = std::env::var("VALIDATEHUB_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty());
        if api_key.is_some() {
            self.llm.api_key = api_key;
        }
        if let Ok(model) = std::env::var("VALIDATEHUB_MODEL") {
            if !model.trim().is_empty() {
                self.llm.model = model;
            }
        }
        self
    }
}

/// Directory holding the database and settings file.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("VALIDATEHUB_DATA_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    std::env::var("HOME")
        .map(|home| PathBuf::from(home).join(".validatehub"))
        .unwrap_or_else(|_| PathBuf::from(".validatehub"))
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<WorkbookSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log::warn!("Ignoring malformed settings at {}: {}", path.display(), err);
                WorkbookSettings::default()
            })
        } else {
            WorkbookSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    /// Stored settings with environment overrides applied.
    pub fn effective(&self) -> WorkbookSettings {
        self.snapshot().with_env_overrides()
    }

    pub fn snapshot(&self) -> WorkbookSettings {
        self.data
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn update(&self, settings: WorkbookSettings) -> Result<()> {
        let mut guard = self
            .data
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.persist(&settings)?;
        *guard = settings;
        Ok(())
    }

    fn persist(&self, data: &WorkbookSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

/// `abcd...wxyz` for display; short keys are fully masked.
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
