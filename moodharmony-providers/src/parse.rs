use moodharmony_core::error::{AccountError, RecommendationError};
use moodharmony_core::recommendation::{RecommendationResult, Song};
use moodharmony_core::text::normalize_link;
use moodharmony_core::types::UserId;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRecommendation {
    #[serde(default)]
    cuisine: Option<String>,
    #[serde(default)]
    music_genre: Option<String>,
    songs: Vec<WireSong>,
    #[serde(default)]
    explanation: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSong {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    youtube_link: Option<String>,
    #[serde(default)]
    spotify_link: Option<String>,
    #[serde(default)]
    preview_url: Option<String>,
}

/// Decodes a 2xx body from `/api/recommendations`.
///
/// A body without a `songs` array is rejected even though the HTTP exchange
/// succeeded; the backend answers 200 with `{error, details}` when its model
/// output was unusable.
pub fn parse_recommendations(body: &[u8]) -> Result<RecommendationResult, RecommendationError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| RecommendationError::MalformedResponse(format!("decode JSON: {e}")))?;

    match value.get("songs") {
        Some(Value::Array(_)) => {}
        Some(_) => {
            return Err(RecommendationError::MalformedResponse(
                "`songs` is not a sequence".into(),
            ));
        }
        None => {
            if let Some(server_error) = value.get("error").and_then(Value::as_str) {
                log::warn!("recommendation backend reported: {server_error}");
            }
            return Err(RecommendationError::MalformedResponse(
                "missing `songs`".into(),
            ));
        }
    }

    let wire: WireRecommendation = serde_json::from_value(value)
        .map_err(|e| RecommendationError::MalformedResponse(format!("decode songs: {e}")))?;

    Ok(RecommendationResult {
        cuisine: wire.cuisine.unwrap_or_default(),
        music_genre: wire.music_genre.filter(|g| !g.trim().is_empty()),
        songs: wire
            .songs
            .into_iter()
            .map(|s| Song {
                title: s.title.unwrap_or_default(),
                youtube_link: normalize_link(s.youtube_link.as_deref()),
                spotify_link: normalize_link(s.spotify_link.as_deref()),
                preview_url: normalize_link(s.preview_url.as_deref()),
            })
            .collect(),
        explanation: wire.explanation.unwrap_or_default(),
    })
}

/// Interprets a `/api/register` or `/api/login` response.
pub fn parse_account_response(status: u16, body: &[u8]) -> Result<UserId, AccountError> {
    let value: Option<Value> = serde_json::from_slice(body).ok();

    if !(200..=299).contains(&status) {
        let message = value
            .as_ref()
            .and_then(|v| v.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("request failed with status {status}"));
        return Err(AccountError::Rejected(message));
    }

    let value = value
        .ok_or_else(|| AccountError::MalformedResponse("response is not JSON".into()))?;

    // The backend hands out integer primary keys; the client treats them as opaque.
    match value.get("user_id") {
        Some(Value::String(s)) => Ok(UserId::new(s.clone())),
        Some(Value::Number(n)) => Ok(UserId::new(n.to_string())),
        _ => Err(AccountError::MalformedResponse(
            "missing `user_id`".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_recommendation() {
        let body = br#"{"cuisine":"Italian","songs":[{"title":"Song A"}],"explanation":"matches energetic mood"}"#;
        let r = parse_recommendations(body).unwrap();
        assert_eq!(r.cuisine, "Italian");
        assert_eq!(r.songs, vec![Song::new("Song A")]);
        assert_eq!(r.explanation, "matches energetic mood");
        assert_eq!(r.music_genre, None);
    }

    #[test]
    fn empty_song_list_is_valid() {
        let r = parse_recommendations(br#"{"cuisine":"Ramen","songs":[],"explanation":"e"}"#)
            .unwrap();
        assert!(r.songs.is_empty());
    }

    #[test]
    fn missing_songs_is_malformed() {
        let err = parse_recommendations(br#"{"cuisine":"X","explanation":"Y"}"#).unwrap_err();
        assert!(matches!(err, RecommendationError::MalformedResponse(_)));
    }

    #[test]
    fn non_sequence_songs_is_malformed() {
        for body in [
            br#"{"cuisine":"X","songs":"none","explanation":"Y"}"#.as_slice(),
            br#"{"cuisine":"X","songs":null,"explanation":"Y"}"#.as_slice(),
            br#"{"cuisine":"X","songs":{"title":"a"},"explanation":"Y"}"#.as_slice(),
        ] {
            assert!(matches!(
                parse_recommendations(body),
                Err(RecommendationError::MalformedResponse(_))
            ));
        }
    }

    #[test]
    fn backend_error_body_is_malformed() {
        let body = br#"{"error":"Expecting value","details":"Expecting value"}"#;
        assert!(parse_recommendations(body).is_err());
        assert!(parse_recommendations(b"<html>oops</html>").is_err());
    }

    #[test]
    fn empty_links_become_absent() {
        let body = br#"{"cuisine":"Tacos","songs":[{"title":"Song A - Band","youtubeLink":"","spotifyLink":"https://open.spotify.com/track/1","previewUrl":""}],"explanation":"x","musicGenre":"Pop"}"#;
        let r = parse_recommendations(body).unwrap();
        let song = &r.songs[0];
        assert_eq!(song.youtube_link, None);
        assert_eq!(song.spotify_link.as_deref(), Some("https://open.spotify.com/track/1"));
        assert_eq!(song.preview_url, None);
        assert_eq!(r.music_genre.as_deref(), Some("Pop"));
    }

    #[test]
    fn account_success_accepts_numeric_and_string_ids() {
        let id = parse_account_response(201, br#"{"message":"ok","user_id":7}"#).unwrap();
        assert_eq!(id, UserId::new("7"));
        let id = parse_account_response(200, br#"{"user_id":"abc"}"#).unwrap();
        assert_eq!(id, UserId::new("abc"));
    }

    #[test]
    fn account_success_keeps_empty_string_id() {
        let id = parse_account_response(200, br#"{"user_id":""}"#).unwrap();
        assert_eq!(id, UserId::new(""));
    }

    #[test]
    fn account_failure_surfaces_server_error_verbatim() {
        let err = parse_account_response(400, br#"{"error":"Email already exists"}"#).unwrap_err();
        assert_eq!(err, AccountError::Rejected("Email already exists".into()));
    }

    #[test]
    fn account_failure_without_message_mentions_status() {
        let err = parse_account_response(502, b"Bad Gateway").unwrap_err();
        assert_eq!(
            err,
            AccountError::Rejected("request failed with status 502".into())
        );
    }

    #[test]
    fn account_success_without_id_is_malformed() {
        let err = parse_account_response(201, br#"{"message":"ok"}"#).unwrap_err();
        assert!(matches!(err, AccountError::MalformedResponse(_)));
    }
}
