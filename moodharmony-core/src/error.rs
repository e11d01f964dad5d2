use thiserror::Error;

/// The only message a failed recommendation ever shows to the user.
pub const RECOMMENDATION_FAILED_MESSAGE: &str = "Failed to get recommendations. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("mood must not be empty")]
    EmptyMood,
    #[error("hour must be between 0 and 23, got {0}")]
    HourOutOfRange(u32),
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("password must not be empty")]
    EmptyPassword,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendationError {
    /// Connection refused, reset, timed out, or the body could not be read.
    #[error("recommendation request failed: {0}")]
    Transport(String),

    #[error("recommendation endpoint returned status {0}")]
    Status(u16),

    /// A 2xx response without a usable `songs` sequence.
    #[error("malformed recommendation response: {0}")]
    MalformedResponse(String),
}

impl RecommendationError {
    /// Every failure kind collapses to one banner message.
    pub fn user_message(&self) -> &'static str {
        RECOMMENDATION_FAILED_MESSAGE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// The server's own `error` text, passed through verbatim.
    #[error("{0}")]
    Rejected(String),

    #[error("account request failed: {0}")]
    Transport(String),

    #[error("malformed account response: {0}")]
    MalformedResponse(String),

    #[error("could not persist identity: {0}")]
    Storage(String),
}
