use crate::join_url;
use crate::request::HttpRequest;
use moodharmony_core::types::MoodRequest;
use serde_json::json;

pub const RECOMMENDATIONS_PATH: &str = "/api/recommendations";

/// `POST /api/recommendations` with `{mood, hour, user_id?}`.
///
/// `user_id` is omitted entirely for anonymous sessions.
pub fn build_recommendations_request(base_url: &str, req: &MoodRequest) -> HttpRequest {
    let mut payload = json!({
        "mood": req.mood.as_str(),
        "hour": req.hour.get(),
    });
    if let Some(user_id) = &req.user_id {
        payload["user_id"] = json!(user_id.as_str());
    }

    HttpRequest::post_json(join_url(base_url, RECOMMENDATIONS_PATH), &payload)
}
