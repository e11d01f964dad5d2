use moodharmony_core::recommendation::{RecommendationResult, Song};
use moodharmony_engine::state::RequestState;
use moodharmony_runtime::history::HistoryEntry;

pub const PROMPT: &str = "How are you feeling right now?";
pub const PENDING: &str = "Getting Recommendations...";
pub const SLOW_BACKEND_NOTE: &str =
    "It may take some time since it's running on the Gemini free tier.";
pub const NO_SONGS: &str = "No songs available at the moment.";

pub fn render_state(state: &RequestState) -> String {
    match state {
        RequestState::Idle => PROMPT.to_string(),
        RequestState::Pending => PENDING.to_string(),
        RequestState::Failed(message) => format!("[error] {message}"),
        RequestState::Success(result) => render_result(result),
    }
}

pub fn render_result(result: &RecommendationResult) -> String {
    let mut out = String::new();

    out.push_str("== Cuisine Recommendation ==\n");
    out.push_str(&format!("{}\n\n", result.cuisine));

    out.push_str("== Music Recommendations ==\n");
    if let Some(genre) = &result.music_genre {
        out.push_str(&format!("Genre: {genre}\n"));
    }
    if result.songs.is_empty() {
        out.push_str(NO_SONGS);
        out.push('\n');
    } else {
        for (i, song) in result.songs.iter().enumerate() {
            out.push_str(&render_song(i + 1, song));
        }
    }
    out.push('\n');

    out.push_str("== Why These Recommendations? ==\n");
    out.push_str(&result.explanation);
    out.push('\n');
    out
}

fn render_song(n: usize, song: &Song) -> String {
    let mut out = match song.title_and_artist() {
        (title, Some(artist)) => format!("{n:>2}. {title} ({artist})\n"),
        (title, None) => format!("{n:>2}. {title}\n"),
    };
    if let Some(link) = &song.youtube_link {
        out.push_str(&format!("      YouTube: {link}\n"));
    }
    if let Some(link) = &song.spotify_link {
        out.push_str(&format!("      Spotify: {link}\n"));
    }
    out
}

pub fn render_history_entry(entry: &HistoryEntry) -> String {
    let when = chrono::DateTime::<chrono::Utc>::from_timestamp_millis(entry.ts_unix_ms)
        .map(|t| {
            t.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "?".into());
    format!(
        "{when}  {:<20} -> {} ({} songs)",
        entry.mood,
        entry.result.cuisine,
        entry.result.songs.len()
    )
}
