use regex::Regex;
use std::sync::OnceLock;

use crate::types::Hour;

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"))
}

/// Trims and collapses every whitespace run (including newlines) to one space.
pub fn normalize_mood(text: &str) -> String {
    whitespace_re().replace_all(text.trim(), " ").into_owned()
}

/// Splits "Song Title - Artist Name" on the first " - ".
pub fn split_song_title(title: &str) -> (&str, Option<&str>) {
    match title.split_once(" - ") {
        Some((song, artist)) if !artist.trim().is_empty() => (song.trim(), Some(artist.trim())),
        _ => (title.trim(), None),
    }
}

/// The backend sends `""` for "no link". Anything that isn't an absolute
/// http(s) URL is dropped.
pub fn normalize_link(raw: Option<&str>) -> Option<String> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match url::Url::parse(raw) {
        Ok(u) if matches!(u.scheme(), "http" | "https") => Some(raw.to_string()),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        }
    }
}

/// Same buckets the recommendation backend uses when it builds its prompt.
pub fn time_of_day(hour: Hour) -> TimeOfDay {
    match hour.get() {
        5..=11 => TimeOfDay::Morning,
        12..=16 => TimeOfDay::Afternoon,
        17..=21 => TimeOfDay::Evening,
        _ => TimeOfDay::Night,
    }
}
