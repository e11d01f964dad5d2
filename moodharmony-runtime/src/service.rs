use std::path::{Path, PathBuf};
use std::sync::Arc;

use moodharmony_core::config::ClientConfig;
use moodharmony_core::error::InputError;
use moodharmony_core::types::Hour;
use moodharmony_engine::client::RecommendationClient;
use moodharmony_engine::controller::{MoodController, SubmitOutcome};
use moodharmony_engine::session::SessionContext;
use moodharmony_engine::state::RequestState;
use moodharmony_engine::traits::IdentityStore;

use crate::config_store::ConfigStore;
use crate::fs_util::{CONFIG_FILENAME, HISTORY_FILENAME, IDENTITY_FILENAME};
use crate::history::{HistoryEntry, HistoryStore};
use crate::http::HttpBackend;
use crate::identity_store::FileIdentityStore;

/// Everything a front end needs, wired from one data directory.
pub struct AppService {
    data_dir: PathBuf,
    config: ClientConfig,
    controller: MoodController,
    history: HistoryStore,
}

impl AppService {
    pub fn open(data_dir: impl Into<PathBuf>, api_override: Option<&str>) -> anyhow::Result<Self> {
        let data_dir = data_dir.into();
        let config = ConfigStore::at_path(data_dir.join(CONFIG_FILENAME)).resolve(api_override)?;
        log::info!("using api {}", config.api_base_url);

        let backend = Arc::new(HttpBackend::from_config(&config)?);
        let identity = Arc::new(FileIdentityStore::at_path(data_dir.join(IDENTITY_FILENAME)));
        let session = Arc::new(SessionContext::hydrate(identity, backend.clone()));
        let controller = MoodController::new(RecommendationClient::new(backend), session);

        Ok(Self {
            history: HistoryStore::at_path(data_dir.join(HISTORY_FILENAME)),
            data_dir,
            config,
            controller,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        self.controller.session()
    }

    pub fn controller(&self) -> &MoodController {
        &self.controller
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Submits a mood and records applied successes in the local history.
    pub async fn recommend(&self, mood: &str, hour: Hour) -> Result<SubmitOutcome, InputError> {
        let outcome = self.controller.submit(mood, hour).await?;

        if let SubmitOutcome::Applied(RequestState::Success(result)) = &outcome {
            let entry = HistoryEntry {
                ts_unix_ms: chrono::Utc::now().timestamp_millis(),
                user_id: self.session().identity().map(|id| id.0),
                mood: moodharmony_core::text::normalize_mood(mood),
                hour: hour.get(),
                result: result.clone(),
            };
            // History is a convenience; never fail the submission over it.
            if let Err(e) = self.history.append(entry) {
                log::warn!("failed to record history: {e:#}");
            }
        }

        Ok(outcome)
    }
}

/// Clears the stored identity. Works even when the config does not load.
pub fn forget_identity(data_dir: &Path) -> anyhow::Result<()> {
    FileIdentityStore::at_path(data_dir.join(IDENTITY_FILENAME)).clear()?;
    log::info!("logged out");
    Ok(())
}

/// Persists a new API base URL, replacing a config file that no longer loads.
pub fn set_api_base_url(data_dir: &Path, url: &str) -> anyhow::Result<ClientConfig> {
    ConfigStore::at_path(data_dir.join(CONFIG_FILENAME)).set_api_base_url(url)
}
