use std::sync::Arc;

use moodharmony_core::config::ClientConfig;
use moodharmony_core::error::RECOMMENDATION_FAILED_MESSAGE;
use moodharmony_core::recommendation::{RecommendationResult, Song};
use moodharmony_core::types::{Credentials, Hour, UserId};
use moodharmony_engine::client::RecommendationClient;
use moodharmony_engine::controller::{MoodController, SubmitOutcome};
use moodharmony_engine::session::{SessionContext, View};
use moodharmony_engine::state::RequestState;
use moodharmony_engine::traits::IdentityStore;
use moodharmony_runtime::http::HttpBackend;
use moodharmony_runtime::identity_store::FileIdentityStore;
use moodharmony_runtime::service::{AppService, forget_identity, set_api_base_url};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer) -> Arc<HttpBackend> {
    let cfg = ClientConfig::default().with_api_base_url(server.uri());
    Arc::new(HttpBackend::from_config(&cfg).unwrap())
}

fn anonymous_controller(server: &MockServer) -> MoodController {
    let backend = backend_for(server);
    let session = Arc::new(SessionContext::ephemeral(backend.clone()));
    MoodController::new(RecommendationClient::new(backend), session)
}

fn hour(h: u32) -> Hour {
    Hour::new(h).unwrap()
}

#[tokio::test]
async fn happy_mood_renders_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/recommendations"))
        .and(body_json(json!({"mood": "happy", "hour": 14})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cuisine": "Italian",
            "songs": [{"title": "Song A"}],
            "explanation": "matches energetic mood"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let c = anonymous_controller(&server);
    let out = c.submit("happy", hour(14)).await.unwrap();

    let expected = RecommendationResult {
        cuisine: "Italian".into(),
        music_genre: None,
        songs: vec![Song::new("Song A")],
        explanation: "matches energetic mood".into(),
    };
    assert_eq!(out, SubmitOutcome::Applied(RequestState::Success(expected.clone())));
    assert_eq!(c.state(), RequestState::Success(expected));
}

#[tokio::test]
async fn server_error_is_failed_with_generic_message() {
    let server = MockServer::start().await;

    // A perfectly good body must not rescue a non-2xx status.
    Mock::given(method("POST"))
        .and(path("/api/recommendations"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "cuisine": "Italian",
            "songs": [],
            "explanation": "x"
        })))
        .mount(&server)
        .await;

    let c = anonymous_controller(&server);
    c.submit("happy", hour(14)).await.unwrap();
    assert_eq!(
        c.state(),
        RequestState::Failed(RECOMMENDATION_FAILED_MESSAGE.into())
    );
}

#[tokio::test]
async fn missing_songs_with_200_is_failed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/recommendations"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"cuisine": "X", "explanation": "Y"})),
        )
        .mount(&server)
        .await;

    let c = anonymous_controller(&server);
    c.submit("meh", hour(8)).await.unwrap();
    assert_eq!(c.state().error(), Some(RECOMMENDATION_FAILED_MESSAGE));
}

#[tokio::test]
async fn unreachable_backend_is_failed() {
    // Nothing listens on the discard port.
    let cfg = ClientConfig::default().with_api_base_url("http://127.0.0.1:9");
    let backend = Arc::new(HttpBackend::from_config(&cfg).unwrap());
    let session = Arc::new(SessionContext::ephemeral(backend.clone()));
    let c = MoodController::new(RecommendationClient::new(backend), session);

    c.submit("anxious", hour(2)).await.unwrap();
    assert_eq!(c.state().error(), Some(RECOMMENDATION_FAILED_MESSAGE));
}

#[tokio::test]
async fn identical_requests_are_not_deduplicated() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/recommendations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cuisine": "Ramen",
            "songs": [{"title": "Lo-fi - Someone", "youtubeLink": "", "spotifyLink": ""}],
            "explanation": "cozy"
        })))
        .expect(2)
        .mount(&server)
        .await;

    let c = anonymous_controller(&server);
    let first = c.submit("sleepy", hour(23)).await.unwrap();
    let second = c.submit("sleepy", hour(23)).await.unwrap();
    assert_eq!(first, second);

    let state = c.state();
    let song = &state.result().unwrap().songs[0];
    assert_eq!(song.youtube_link, None);
    assert_eq!(song.spotify_link, None);
}

#[tokio::test]
async fn register_then_recommend_sends_identity() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/register"))
        .and(body_json(json!({"email": "a@example.com", "password": "pw"})))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"message": "User registered successfully", "user_id": 7})),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/recommendations"))
        .and(body_json(json!({"mood": "hungry", "hour": 12, "user_id": "7"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cuisine": "Burgers",
            "songs": [],
            "explanation": "fuel"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let svc = AppService::open(dir.path(), Some(server.uri().as_str())).unwrap();
    assert_eq!(svc.session().view(), View::Entry);

    let creds = Credentials::new("a@example.com", "pw").unwrap();
    svc.session().register(&creds).await.unwrap();
    assert_eq!(svc.session().view(), View::Dashboard);

    let out = svc.recommend("hungry", hour(12)).await.unwrap();
    assert!(matches!(out, SubmitOutcome::Applied(RequestState::Success(_))));

    let history = svc.history().load().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].mood, "hungry");
    assert_eq!(history[0].user_id.as_deref(), Some("7"));

    // A fresh service over the same directory restores the identity.
    let reopened = AppService::open(dir.path(), Some(server.uri().as_str())).unwrap();
    assert_eq!(reopened.session().identity().map(|id| id.0), Some("7".into()));

    assert_eq!(reopened.session().logout().unwrap(), View::Entry);
    let store = FileIdentityStore::at_path(dir.path().join("identity.json"));
    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn rejected_registration_surfaces_server_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/register"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Email already exists"})),
        )
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let session = SessionContext::ephemeral(backend);
    let creds = Credentials::new("a@example.com", "pw").unwrap();

    let err = session.register(&creds).await.unwrap_err();
    assert_eq!(err.to_string(), "Email already exists");
    assert_eq!(session.view(), View::Entry);
}

#[tokio::test]
async fn login_uses_login_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Login successful", "user_id": 11})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = SessionContext::ephemeral(backend_for(&server));
    let creds = Credentials::new("a@example.com", "pw").unwrap();
    let id = session.login(&creds).await.unwrap();
    assert_eq!(id.as_str(), "11");
}

#[tokio::test]
async fn failed_recommendation_is_not_recorded() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/recommendations"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let svc = AppService::open(dir.path(), Some(server.uri().as_str())).unwrap();
    svc.recommend("tired", hour(6)).await.unwrap();
    assert!(svc.controller().state().error().is_some());
    assert!(svc.history().load().unwrap().is_empty());
}

#[tokio::test]
async fn numeric_stored_identity_is_restored_and_sent() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("identity.json"), br#"{"userId": 7}"#).unwrap();

    Mock::given(method("POST"))
        .and(path("/api/recommendations"))
        .and(body_json(json!({"mood": "calm", "hour": 8, "user_id": "7"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cuisine": "Tea",
            "songs": [],
            "explanation": "slow morning"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let svc = AppService::open(dir.path(), Some(server.uri().as_str())).unwrap();
    assert_eq!(svc.session().identity().map(|id| id.0), Some("7".into()));

    let out = svc.recommend("calm", hour(8)).await.unwrap();
    assert!(matches!(out, SubmitOutcome::Applied(RequestState::Success(_))));
}

#[tokio::test]
async fn corrupt_identity_opens_anonymous() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("identity.json"), b"{ not json").unwrap();

    let svc = AppService::open(dir.path(), Some("http://127.0.0.1:9")).unwrap();
    assert_eq!(svc.session().view(), View::Entry);

    assert_eq!(svc.session().logout().unwrap(), View::Entry);
    assert!(!dir.path().join("identity.json").exists());
}

#[test]
fn broken_config_can_still_log_out_and_be_repaired() {
    let dir = tempfile::tempdir().unwrap();
    FileIdentityStore::at_path(dir.path().join("identity.json"))
        .save(&UserId::new("7"))
        .unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        br#"{"api_base_url":"not a url"}"#,
    )
    .unwrap();
    assert!(AppService::open(dir.path(), None).is_err());

    forget_identity(dir.path()).unwrap();
    assert!(!dir.path().join("identity.json").exists());

    let cfg = set_api_base_url(dir.path(), "http://127.0.0.1:9").unwrap();
    assert_eq!(cfg.api_base_url, "http://127.0.0.1:9");

    let svc = AppService::open(dir.path(), None).unwrap();
    assert_eq!(svc.config().api_base_url, "http://127.0.0.1:9");
    assert_eq!(svc.session().view(), View::Entry);
}
