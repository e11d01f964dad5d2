use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_base_url: String,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    // The backend can take a long time to answer; no overall limit unless set.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Checks that the base URL is an absolute http(s) URL.
    pub fn validate(&self) -> Result<(), String> {
        let parsed = url::Url::parse(&self.api_base_url)
            .map_err(|e| format!("invalid api base url {:?}: {e}", self.api_base_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(format!(
                "api base url must be http or https, got {}",
                parsed.scheme()
            ));
        }
        Ok(())
    }
}
