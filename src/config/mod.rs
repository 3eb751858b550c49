//! Configuration for external services (explicit, dependency-injected).
//!
//! Credentials and base URLs are resolved once and handed to the components
//! that need them. Nothing reads the process environment after construction.

use crate::error::{AgentError, Result};

/// Default Qianfan chat endpoint prefix.
pub const DEFAULT_ERNIE_BASE_URL: &str =
    "https://aip.baidubce.com/rpc/2.0/ai_custom/v1/wenxinworkshop";

/// Default chat model served through that endpoint.
pub const DEFAULT_ERNIE_MODEL: &str = "ernie-func-8k";

/// Configuration for one agent run.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Access token for the chat-completion service.
    pub access_token: Option<String>,
    /// API key / secret key pair, exchanged for an access token when no
    /// explicit token is configured.
    pub api_key: Option<String>,
    pub secret_key: Option<String>,
    /// Chat endpoint prefix (overridable for tests and proxies).
    pub ernie_base_url: String,
    /// Chat model name appended to the endpoint prefix.
    pub ernie_model: String,
    /// Host that serves the plugin endpoints.
    pub plugin_base_url: String,
    /// Rerank service used for catalog retrieval.
    pub rerank_base_url: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            api_key: None,
            secret_key: None,
            ernie_base_url: DEFAULT_ERNIE_BASE_URL.to_string(),
            ernie_model: DEFAULT_ERNIE_MODEL.to_string(),
            plugin_base_url: String::new(),
            rerank_base_url: String::new(),
        }
    }
}

impl AgentConfig {
    /// Load from environment variables (reads `.env` if present).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let mut config = Self::default();

        if let Ok(token) = std::env::var("ERNIE_ACCESS_TOKEN") {
            config.access_token = Some(token);
        }
        if let Ok(key) = std::env::var("ERNIE_API_KEY") {
            config.api_key = Some(key);
        }
        if let Ok(secret) = std::env::var("ERNIE_SECRET_KEY") {
            config.secret_key = Some(secret);
        }
        if let Ok(url) = std::env::var("ERNIE_BASE_URL") {
            config.ernie_base_url = url;
        }
        if let Ok(model) = std::env::var("ERNIE_MODEL") {
            config.ernie_model = model;
        }
        if let Ok(url) = std::env::var("PLUGIN_BASE_URL") {
            config.plugin_base_url = url;
        }
        if let Ok(url) = std::env::var("RERANK_BASE_URL") {
            config.rerank_base_url = url;
        }

        config
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_credentials(
        mut self,
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.api_key = Some(api_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Resolve chat credentials, failing when neither a token nor a key pair
    /// is configured.
    pub fn require_chat_credentials(&self) -> Result<()> {
        if self.access_token.is_some() || (self.api_key.is_some() && self.secret_key.is_some()) {
            Ok(())
        } else {
            Err(AgentError::Configuration(
                "missing ERNIE_ACCESS_TOKEN (or ERNIE_API_KEY / ERNIE_SECRET_KEY)".to_string(),
            ))
        }
    }
}
