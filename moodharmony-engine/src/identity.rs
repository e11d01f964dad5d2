use std::sync::Mutex;

use anyhow::anyhow;
use moodharmony_core::types::UserId;

use crate::traits::IdentityStore;

/// Identity that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryIdentityStore {
    value: Mutex<Option<UserId>>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identity(id: UserId) -> Self {
        Self {
            value: Mutex::new(Some(id)),
        }
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn save(&self, id: &UserId) -> anyhow::Result<()> {
        *self.value.lock().map_err(|_| anyhow!("identity lock poisoned"))? = Some(id.clone());
        Ok(())
    }

    fn load(&self) -> anyhow::Result<Option<UserId>> {
        Ok(self
            .value
            .lock()
            .map_err(|_| anyhow!("identity lock poisoned"))?
            .clone())
    }

    fn clear(&self) -> anyhow::Result<()> {
        *self.value.lock().map_err(|_| anyhow!("identity lock poisoned"))? = None;
        Ok(())
    }
}
