use crate::error::InputError;
use crate::text::normalize_mood;
use serde::{Deserialize, Serialize};

/// Free-text description of how the user feels. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mood(String);

impl Mood {
    /// Normalizes whitespace and rejects input that is empty afterwards.
    pub fn parse(value: &str) -> Result<Self, InputError> {
        let normalized = normalize_mood(value);
        if normalized.is_empty() {
            return Err(InputError::EmptyMood);
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Hour of the day in the submitter's local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Hour(u8);

impl Hour {
    pub fn new(value: u32) -> Result<Self, InputError> {
        if value > 23 {
            return Err(InputError::HourOutOfRange(value));
        }
        Ok(Self(value as u8))
    }

    pub fn get(self) -> u32 {
        u32::from(self.0)
    }
}

impl TryFrom<u32> for Hour {
    type Error = InputError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Hour> for u32 {
    fn from(hour: Hour) -> Self {
        hour.get()
    }
}

impl std::fmt::Display for Hour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:00", self.0)
    }
}

/// Opaque identifier issued by the backend at registration or login.
///
/// No validation is applied; any string the backend hands out is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// Only non-emptiness is checked. The password is sent as typed.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Result<Self, InputError> {
        let email = email.into().trim().to_string();
        let password = password.into();
        if email.is_empty() {
            return Err(InputError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(InputError::EmptyPassword);
        }
        Ok(Self { email, password })
    }
}

/// One submission to the recommendation endpoint. Built fresh per submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodRequest {
    pub mood: Mood,
    pub hour: Hour,
    pub user_id: Option<UserId>,
}

impl MoodRequest {
    pub fn new(mood: Mood, hour: Hour, user_id: Option<UserId>) -> Self {
        Self {
            mood,
            hour,
            user_id,
        }
    }
}
