use async_trait::async_trait;
use moodharmony_core::error::{AccountError, RecommendationError};
use moodharmony_core::recommendation::RecommendationResult;
use moodharmony_core::types::{Credentials, MoodRequest, UserId};

#[async_trait]
pub trait RecommendationBackend: Send + Sync {
    async fn recommend(
        &self,
        req: &MoodRequest,
    ) -> Result<RecommendationResult, RecommendationError>;
}

#[async_trait]
pub trait AccountBackend: Send + Sync {
    async fn register(&self, creds: &Credentials) -> Result<UserId, AccountError>;
    async fn login(&self, creds: &Credentials) -> Result<UserId, AccountError>;
}

/// Persists the session identity across runs.
///
/// Stores accept any string; nothing expires or is validated.
pub trait IdentityStore: Send + Sync {
    fn save(&self, id: &UserId) -> anyhow::Result<()>;
    fn load(&self) -> anyhow::Result<Option<UserId>>;
    fn clear(&self) -> anyhow::Result<()>;
}
