use moodharmony_core::config::ClientConfig;
use moodharmony_core::error::{AccountError, RecommendationError};
use moodharmony_core::recommendation::RecommendationResult;
use moodharmony_core::types::{Credentials, MoodRequest, UserId};
use moodharmony_engine::traits::{AccountBackend, RecommendationBackend};
use moodharmony_providers::account::{build_login_request, build_register_request};
use moodharmony_providers::parse::{parse_account_response, parse_recommendations};
use moodharmony_providers::recommendations::build_recommendations_request;
use moodharmony_providers::request::HttpRequest;
use moodharmony_providers::runtime::HttpTransport;

/// Talks to the Mood Harmony backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    transport: HttpTransport,
}

impl HttpBackend {
    pub fn from_config(cfg: &ClientConfig) -> anyhow::Result<Self> {
        Ok(Self {
            base_url: cfg.api_base_url.clone(),
            transport: HttpTransport::new(cfg)?,
        })
    }

    async fn account_call(&self, req: HttpRequest) -> Result<UserId, AccountError> {
        let resp = self
            .transport
            .execute(&req)
            .await
            .map_err(|e| AccountError::Transport(format!("{e:#}")))?;
        parse_account_response(resp.status, &resp.body)
    }
}

#[async_trait::async_trait]
impl RecommendationBackend for HttpBackend {
    async fn recommend(
        &self,
        req: &MoodRequest,
    ) -> Result<RecommendationResult, RecommendationError> {
        let http = build_recommendations_request(&self.base_url, req);
        let resp = self
            .transport
            .execute(&http)
            .await
            .map_err(|e| RecommendationError::Transport(format!("{e:#}")))?;

        if !resp.is_success() {
            log::warn!(
                "recommendation request failed: status={} body={}",
                resp.status,
                String::from_utf8_lossy(&resp.body)
            );
            return Err(RecommendationError::Status(resp.status));
        }

        parse_recommendations(&resp.body)
    }
}

#[async_trait::async_trait]
impl AccountBackend for HttpBackend {
    async fn register(&self, creds: &Credentials) -> Result<UserId, AccountError> {
        self.account_call(build_register_request(&self.base_url, creds))
            .await
    }

    async fn login(&self, creds: &Credentials) -> Result<UserId, AccountError> {
        self.account_call(build_login_request(&self.base_url, creds))
            .await
    }
}
