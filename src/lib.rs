pub mod context;
pub mod db;
pub mod derive;
pub mod llm;
pub mod models;
pub mod settings;
pub mod storage;
pub mod store;
pub mod sync;
mod utils;

use std::sync::Arc;

use anyhow::{Context, Result};
use log::{error, info};

pub use context::{AppContext, EnrichOutcome, WorkbookSummary};
pub use db::Database;
pub use llm::{ApiKeyStatus, GeminiClient, TextGenerator};
pub use settings::{SettingsStore, WorkbookSettings};
pub use storage::{KvAdapter, SqliteBackend};

/// Open the workbook stored under `data_dir` with the given settings.
pub async fn open_workbook(
    data_dir: &std::path::Path,
    settings: &WorkbookSettings,
) -> Result<AppContext> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

    let database = Database::new(data_dir.join("validatehub.sqlite3"))?;
    let kv = KvAdapter::new(Arc::new(SqliteBackend::new(database)));
    let llm: Arc<dyn TextGenerator> = Arc::new(GeminiClient::from_settings(&settings.llm));

    Ok(AppContext::load(kv, llm).await)
}

fn try_run() -> Result<()> {
    let data_dir = settings::data_dir();
    let settings_store = SettingsStore::new(data_dir.join("settings.json"))?;
    let settings = settings_store.effective();
    if let Some(key) = settings.llm.api_key.as_deref() {
        info!("Using API key {}", settings::mask_api_key(key));
    }

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(async {
        let ctx = open_workbook(&data_dir, &settings).await?;
        let summary = ctx.summary();
        info!(
            "Workbook \"{}\": {} interviews, {} hypotheses, {} test cards, {} MVPs, {} Fermi estimations, {} learning cards (API key {})",
            summary.project_name,
            summary.interviews,
            summary.hypotheses,
            summary.test_cards,
            summary.mvps,
            summary.fermi_estimations,
            summary.learning_cards,
            summary.api_key_status.as_str(),
        );
        ctx.flush().await
    })
}

pub fn run() {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("ValidateHub starting up...");

    if let Err(err) = try_run() {
        error!("ValidateHub failed to start: {err:#}");
        std::process::exit(1);
    }
}
