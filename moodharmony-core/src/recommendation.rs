use serde::{Deserialize, Serialize};

use crate::text::split_song_title;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Usually "Song Title - Artist Name".
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotify_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
}

impl Song {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_youtube_link(mut self, link: impl Into<String>) -> Self {
        self.youtube_link = Some(link.into());
        self
    }

    pub fn with_spotify_link(mut self, link: impl Into<String>) -> Self {
        self.spotify_link = Some(link.into());
        self
    }

    /// Title and artist, if the title follows the "title - artist" convention.
    pub fn title_and_artist(&self) -> (&str, Option<&str>) {
        split_song_title(&self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    pub cuisine: String,
    // Only sent by older backends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_genre: Option<String>,
    pub songs: Vec<Song>,
    pub explanation: String,
}
