use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use moodharmony_core::recommendation::RecommendationResult;
use serde::{Deserialize, Serialize};

use crate::fs_util::write_atomic;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub ts_unix_ms: i64,
    pub user_id: Option<String>,
    pub mood: String,
    pub hour: u32,
    pub result: RecommendationResult,
}

/// Successful recommendations, oldest first, capped at `max_entries`.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    max_entries: usize,
}

impl HistoryStore {
    pub fn at_path(path: PathBuf) -> Self {
        Self { path, max_entries: 200 }
    }

    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = max.max(1);
        self
    }

    pub fn load(&self) -> anyhow::Result<Vec<HistoryEntry>> {
        if !self.path.exists() {
            return Ok(vec![]);
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read history: {}", self.path.display()))?;
        let entries: Vec<HistoryEntry> = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse history: {}", self.path.display()))?;
        Ok(entries)
    }

    pub fn append(&self, entry: HistoryEntry) -> anyhow::Result<()> {
        let mut entries = self.load()?;
        entries.push(entry);
        if entries.len() > self.max_entries {
            let start = entries.len() - self.max_entries;
            entries = entries.split_off(start);
        }

        let json = serde_json::to_vec_pretty(&entries).context("encode history JSON")?;
        write_atomic(&self.path, &json)
            .with_context(|| format!("failed to replace history: {}", self.path.display()))
    }

    pub fn clear(&self) -> anyhow::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("failed to remove history: {}", self.path.display()))?;
        }
        Ok(())
    }
}
