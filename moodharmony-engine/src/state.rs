use moodharmony_core::error::RecommendationError;
use moodharmony_core::recommendation::RecommendationResult;
use serde::{Deserialize, Serialize};

const STAGE_IDLE: &str = "idle";
const STAGE_PENDING: &str = "pending";
const STAGE_SUCCESS: &str = "success";
const STAGE_FAILED: &str = "failed";

/// Client-visible lifecycle of the latest recommendation request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "stage", content = "payload", rename_all = "snake_case")]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Success(RecommendationResult),
    /// Carries the user-facing banner text, never the underlying cause.
    Failed(String),
}

impl RequestState {
    // A stable string label for display; intentionally not derived from `Debug`.
    pub fn label(&self) -> &'static str {
        match self {
            RequestState::Idle => STAGE_IDLE,
            RequestState::Pending => STAGE_PENDING,
            RequestState::Success(_) => STAGE_SUCCESS,
            RequestState::Failed(_) => STAGE_FAILED,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }

    pub fn result(&self) -> Option<&RecommendationResult> {
        match self {
            RequestState::Success(r) => Some(r),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn from_outcome(outcome: &Result<RecommendationResult, RecommendationError>) -> Self {
        match outcome {
            Ok(result) => RequestState::Success(result.clone()),
            Err(e) => RequestState::Failed(e.user_message().to_string()),
        }
    }
}

/// Identifies one submission. Later submissions always get larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer submission began before this one finished; its outcome was dropped.
    Superseded,
}

/// The request-state machine without any I/O.
///
/// Idle -> Pending -> {Success, Failed} -> Pending -> ...
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    state: RequestState,
    latest: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn begin(&mut self) -> RequestToken {
        self.latest = self.latest.wrapping_add(1);
        self.state = RequestState::Pending;
        RequestToken(self.latest)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }

    pub fn complete(
        &mut self,
        token: RequestToken,
        outcome: &Result<RecommendationResult, RecommendationError>,
    ) -> Completion {
        if !self.is_current(token) {
            return Completion::Superseded;
        }
        self.state = RequestState::from_outcome(outcome);
        Completion::Applied
    }
}
