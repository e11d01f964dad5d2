use std::sync::Arc;
use std::time::Instant;

use moodharmony_core::error::RecommendationError;
use moodharmony_core::recommendation::RecommendationResult;
use moodharmony_core::types::{Hour, Mood, MoodRequest, UserId};

use crate::traits::RecommendationBackend;

/// Issues exactly one backend call per submission. No retry, no cache.
#[derive(Clone)]
pub struct RecommendationClient {
    backend: Arc<dyn RecommendationBackend>,
}

impl RecommendationClient {
    pub fn new(backend: Arc<dyn RecommendationBackend>) -> Self {
        Self { backend }
    }

    pub async fn submit_mood(
        &self,
        mood: &Mood,
        hour: Hour,
        identity: Option<&UserId>,
    ) -> Result<RecommendationResult, RecommendationError> {
        let req = MoodRequest::new(mood.clone(), hour, identity.cloned());

        let t0 = Instant::now();
        let outcome = self.backend.recommend(&req).await;
        let elapsed_ms = t0.elapsed().as_millis();

        match &outcome {
            Ok(r) => log::info!(
                "recommendation received in {elapsed_ms}ms: cuisine={:?} songs={}",
                r.cuisine,
                r.songs.len()
            ),
            Err(e) => log::warn!("recommendation failed after {elapsed_ms}ms: {e}"),
        }
        outcome
    }
}
