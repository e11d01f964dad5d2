use std::sync::{Arc, RwLock};

use moodharmony_core::error::AccountError;
use moodharmony_core::types::{Credentials, UserId};

use crate::identity::MemoryIdentityStore;
use crate::traits::{AccountBackend, IdentityStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Registration / login.
    Entry,
    Dashboard,
}

/// Owns the session identity and is passed explicitly to whoever needs it.
pub struct SessionContext {
    store: Arc<dyn IdentityStore>,
    accounts: Arc<dyn AccountBackend>,
    identity: RwLock<Option<UserId>>,
}

impl SessionContext {
    /// Reads the persisted identity once; later reads hit memory only.
    /// An unreadable store starts the session anonymous.
    pub fn hydrate(store: Arc<dyn IdentityStore>, accounts: Arc<dyn AccountBackend>) -> Self {
        let identity = match store.load() {
            Ok(identity) => identity,
            Err(e) => {
                log::warn!("ignoring unreadable identity: {e:#}");
                None
            }
        };
        match &identity {
            Some(id) => log::info!("restored session for user {id}"),
            None => log::info!("no stored identity; anonymous session"),
        }
        Self {
            store,
            accounts,
            identity: RwLock::new(identity),
        }
    }

    /// An anonymous session whose identity never touches disk.
    pub fn ephemeral(accounts: Arc<dyn AccountBackend>) -> Self {
        Self {
            store: Arc::new(MemoryIdentityStore::new()),
            accounts,
            identity: RwLock::new(None),
        }
    }

    pub fn identity(&self) -> Option<UserId> {
        self.identity
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn view(&self) -> View {
        if self.identity().is_some() {
            View::Dashboard
        } else {
            View::Entry
        }
    }

    pub async fn register(&self, creds: &Credentials) -> Result<UserId, AccountError> {
        let id = self.accounts.register(creds).await?;
        self.adopt(id)
    }

    pub async fn login(&self, creds: &Credentials) -> Result<UserId, AccountError> {
        let id = self.accounts.login(creds).await?;
        self.adopt(id)
    }

    /// Forgets the identity everywhere and returns to the entry view.
    pub fn logout(&self) -> anyhow::Result<View> {
        self.store.clear()?;
        *self
            .identity
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        log::info!("logged out");
        Ok(View::Entry)
    }

    fn adopt(&self, id: UserId) -> Result<UserId, AccountError> {
        self.store
            .save(&id)
            .map_err(|e| AccountError::Storage(format!("{e:#}")))?;
        *self
            .identity
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(id.clone());
        log::info!("signed in as user {id}");
        Ok(id)
    }
}
