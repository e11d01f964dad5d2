use std::sync::Arc;

use moodharmony_core::error::InputError;
use moodharmony_core::types::{Hour, Mood};
use tokio::sync::{Mutex, watch};

use crate::client::RecommendationClient;
use crate::session::SessionContext;
use crate::state::{Completion, RequestState, RequestTracker};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// This submission was the latest one; its result is now the visible state.
    Applied(RequestState),
    /// A newer submission started while this one was in flight.
    Superseded,
}

/// Drives the request-state machine for one view.
///
/// Overlapping submissions all reach the backend, but only the latest one is
/// allowed to change the visible state.
pub struct MoodController {
    client: RecommendationClient,
    session: Arc<SessionContext>,
    tracker: Mutex<RequestTracker>,
    state_tx: watch::Sender<RequestState>,
}

impl MoodController {
    pub fn new(client: RecommendationClient, session: Arc<SessionContext>) -> Self {
        let (state_tx, _) = watch::channel(RequestState::Idle);
        Self {
            client,
            session,
            tracker: Mutex::new(RequestTracker::new()),
            state_tx,
        }
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    pub fn state(&self) -> RequestState {
        self.state_tx.borrow().clone()
    }

    /// Observers see every applied transition, including Pending.
    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.state_tx.subscribe()
    }

    pub async fn submit(&self, mood: &str, hour: Hour) -> Result<SubmitOutcome, InputError> {
        let mood = Mood::parse(mood)?;
        let identity = self.session.identity();

        let token = {
            let mut tracker = self.tracker.lock().await;
            let token = tracker.begin();
            self.publish(tracker.state());
            token
        };
        log::debug!("submission #{} started", token.value());

        // The lock is not held across the network call so newer submissions can start.
        let outcome = self
            .client
            .submit_mood(&mood, hour, identity.as_ref())
            .await;

        let mut tracker = self.tracker.lock().await;
        match tracker.complete(token, &outcome) {
            Completion::Applied => {
                let state = tracker.state().clone();
                self.publish(&state);
                Ok(SubmitOutcome::Applied(state))
            }
            Completion::Superseded => {
                log::info!("discarding stale result of submission #{}", token.value());
                Ok(SubmitOutcome::Superseded)
            }
        }
    }

    fn publish(&self, state: &RequestState) {
        let prev = self.state_tx.send_replace(state.clone());
        if prev.label() != state.label() {
            log::info!("request state: {} -> {}", prev.label(), state.label());
        }
    }
}
