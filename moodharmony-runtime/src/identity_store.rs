use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use moodharmony_core::types::UserId;
use moodharmony_engine::traits::IdentityStore;
use serde::Serialize;
use serde_json::Value;

use crate::fs_util::write_atomic;

#[derive(Debug, Serialize)]
struct StoredIdentity {
    #[serde(rename = "userId")]
    user_id: String,
}

/// Keeps the session identity in a single JSON file under the data directory.
#[derive(Debug, Clone)]
pub struct FileIdentityStore {
    path: PathBuf,
}

impl FileIdentityStore {
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

// Older files may hold the backend's integer key.
fn decode_identity(bytes: &[u8]) -> Option<UserId> {
    let value: Value = serde_json::from_slice(bytes).ok()?;
    match value.get("userId")? {
        Value::String(s) => Some(UserId::new(s.clone())),
        Value::Number(n) => Some(UserId::new(n.to_string())),
        _ => None,
    }
}

impl IdentityStore for FileIdentityStore {
    fn save(&self, id: &UserId) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(&StoredIdentity {
            user_id: id.as_str().to_string(),
        })
        .context("encode identity JSON")?;
        write_atomic(&self.path, &json)
            .with_context(|| format!("save identity: {}", self.path.display()))
    }

    fn load(&self) -> anyhow::Result<Option<UserId>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&self.path)
            .with_context(|| format!("read identity: {}", self.path.display()))?;
        let id = decode_identity(&bytes);
        if id.is_none() {
            log::warn!("ignoring undecodable identity file: {}", self.path.display());
        }
        Ok(id)
    }

    fn clear(&self) -> anyhow::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("remove identity: {}", self.path.display()))?;
        }
        Ok(())
    }
}
