//! Session configuration (code > env).

use std::time::Duration;

use crate::turn::TurnOptions;

/// Default Responses WebSocket endpoint.
pub const DEFAULT_URL: &str = "wss://api.openai.com/v1/responses";

/// Feature opt-in value sent in the `OpenAI-Beta` header when enabled.
pub const BETA_HEADER_VALUE: &str = "responses_websockets=2026-02-06";

const DEFAULT_MODEL: &str = "gpt-5.2";
const DEFAULT_RUN_TIMEOUT: Duration = Duration::from_secs(120);
const DEFAULT_MAX_TOOL_ROUNDS: usize = 8;
const DEFAULT_TOOL_CONCURRENCY: usize = 4;

/// Configuration for one streaming session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// WebSocket endpoint URL.
    pub url: String,
    /// Bearer token attached to the open request, if any.
    pub api_key: Option<String>,
    /// Model identifier sent on every `response.create`.
    pub model: String,
    /// Attach the beta opt-in header to the session open request.
    pub use_beta_header: bool,
    /// Deadline for each response run to reach a terminal event.
    pub run_timeout: Duration,
    /// Maximum tool round-trips per turn before the turn fails.
    pub max_tool_rounds: usize,
    /// Concurrency limit for tool dispatch within one batch.
    pub tool_concurrency: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            use_beta_header: false,
            run_timeout: DEFAULT_RUN_TIMEOUT,
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
            tool_concurrency: DEFAULT_TOOL_CONCURRENCY,
        }
    }
}

impl SessionConfig {
    /// Create a config for the given model with all other defaults.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    /// Load from environment variables (`OPENAI_API_KEY`,
    /// `PONDWIRE_RESPONSES_URL`), reading `.env` if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let mut config = Self::default();
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            config.api_key = Some(key);
        }
        if let Ok(url) = std::env::var("PONDWIRE_RESPONSES_URL") {
            config.url = url;
        }
        config
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_beta_header(mut self, enabled: bool) -> Self {
        self.use_beta_header = enabled;
        self
    }

    pub fn with_run_timeout(mut self, timeout: Duration) -> Self {
        self.run_timeout = timeout;
        self
    }

    pub fn with_max_tool_rounds(mut self, rounds: usize) -> Self {
        self.max_tool_rounds = rounds;
        self
    }

    pub fn with_tool_concurrency(mut self, limit: usize) -> Self {
        self.tool_concurrency = limit.max(1);
        self
    }

    /// Per-turn options derived from this config.
    pub fn turn_options(&self) -> TurnOptions {
        TurnOptions {
            model: self.model.clone(),
            run_timeout: self.run_timeout,
            max_tool_rounds: self.max_tool_rounds,
            tool_concurrency: self.tool_concurrency,
        }
    }
}
