use anyhow::{Context, anyhow};
use std::path::PathBuf;
use moodharmony_core::config::ClientConfig;

use crate::fs_util::write_atomic;

#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> anyhow::Result<ClientConfig> {
        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("read config: {}", self.path.display()))?;
        let cfg: ClientConfig = serde_json::from_slice(&bytes).context("decode config JSON")?;
        Ok(cfg)
    }

    /// A missing file is not an error; the defaults apply.
    pub fn load_or_default(&self) -> anyhow::Result<ClientConfig> {
        if !self.path.exists() {
            return Ok(ClientConfig::default());
        }
        self.load()
    }

    pub fn save(&self, cfg: &ClientConfig) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(cfg).context("encode config JSON")?;
        write_atomic(&self.path, &json)
            .with_context(|| format!("save config: {}", self.path.display()))
    }

    /// Replaces the stored base URL. A file that no longer decodes is
    /// overwritten with defaults plus the new URL.
    pub fn set_api_base_url(&self, url: &str) -> anyhow::Result<ClientConfig> {
        let base = self.load_or_default().unwrap_or_else(|e| {
            log::warn!("replacing unreadable config: {e:#}");
            ClientConfig::default()
        });
        let cfg = base.with_api_base_url(url.trim());
        cfg.validate().map_err(|e| anyhow!(e))?;
        self.save(&cfg)?;
        Ok(cfg)
    }

    /// Stored config with an optional base-URL override applied, then validated.
    pub fn resolve(&self, api_override: Option<&str>) -> anyhow::Result<ClientConfig> {
        let mut cfg = self.load_or_default()?;
        if let Some(url) = api_override.map(str::trim).filter(|u| !u.is_empty()) {
            cfg.api_base_url = url.to_string();
        }
        cfg.validate().map_err(|e| anyhow!(e))?;
        Ok(cfg)
    }
}
