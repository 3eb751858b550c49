//! ERNIE (Qianfan) function-calling chat provider.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::catalog::SchemaRecord;
use crate::config::AgentConfig;
use crate::error::{AgentError, Result};
use crate::types::ModelMessage;

use super::http::shared_client;
use super::{ChatProvider, ChatTurn, FunctionInvocation};

/// OAuth host used to exchange an API key pair for an access token.
pub const DEFAULT_AUTH_BASE_URL: &str = "https://aip.baidubce.com";

pub struct ErnieProvider {
    base_url: String,
    model: String,
    access_token: String,
}

impl ErnieProvider {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            access_token: access_token.into(),
        }
    }

    /// Build a provider from config, exchanging the API key pair for an
    /// access token when no explicit token is configured.
    pub async fn from_config(config: &AgentConfig) -> Result<Self> {
        config.require_chat_credentials()?;
        let token = match &config.access_token {
            Some(token) => token.clone(),
            None => {
                let api_key = config.api_key.as_deref().unwrap_or_default();
                let secret_key = config.secret_key.as_deref().unwrap_or_default();
                exchange_credentials(DEFAULT_AUTH_BASE_URL, api_key, secret_key).await?
            }
        };
        Ok(Self::new(
            config.ernie_base_url.clone(),
            config.ernie_model.clone(),
            token,
        ))
    }
}

#[async_trait]
impl ChatProvider for ErnieProvider {
    fn provider_name(&self) -> &str {
        "ernie"
    }

    async fn complete(
        &self,
        messages: &[ModelMessage],
        functions: &[SchemaRecord],
    ) -> Result<ChatTurn> {
        let url = format!(
            "{}/chat/{}?access_token={}",
            self.base_url, self.model, self.access_token
        );
        let body = serde_json::json!({
            "messages": messages,
            "functions": functions,
        });

        debug!(model = %self.model, messages = messages.len(), "ernie complete");

        let resp = shared_client().post(&url).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(AgentError::ChatService(format!(
                "ernie returned {status}: {body_text}"
            )));
        }

        let data: ErnieResponse = resp.json().await?;
        if let Some(code) = data.error_code {
            return Err(AgentError::ChatService(format!(
                "ernie error {code}: {}",
                data.error_msg.unwrap_or_default()
            )));
        }

        // A non-empty textual result wins even when a function_call is also
        // present, matching the platform's own precedence.
        if let Some(result) = data.result.filter(|r| !r.is_empty()) {
            return Ok(ChatTurn::Answer(result));
        }

        let call = data.function_call.ok_or_else(|| {
            AgentError::ChatService("response carried neither result nor function_call".to_string())
        })?;
        let arguments = serde_json::from_str(&call.arguments).map_err(|e| {
            AgentError::ChatService(format!(
                "unparseable function_call arguments for '{}': {e}",
                call.name
            ))
        })?;
        Ok(ChatTurn::ToolCall(FunctionInvocation {
            name: call.name,
            arguments,
            raw_arguments: call.arguments,
        }))
    }
}

/// Exchange a Qianfan API key / secret key pair for an access token.
pub async fn exchange_credentials(
    auth_base_url: &str,
    api_key: &str,
    secret_key: &str,
) -> Result<String> {
    let url = format!("{auth_base_url}/oauth/2.0/token");
    let resp = shared_client()
        .post(&url)
        .query(&[
            ("grant_type", "client_credentials"),
            ("client_id", api_key),
            ("client_secret", secret_key),
        ])
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(AgentError::ChatService(format!(
            "token exchange returned {status}: {body}"
        )));
    }

    let data: TokenResponse = resp.json().await?;
    data.access_token.ok_or_else(|| {
        AgentError::ChatService(
            data.error_description
                .unwrap_or_else(|| "token exchange returned no access_token".to_string()),
        )
    })
}

// Qianfan API response types (internal)

#[derive(Deserialize)]
struct ErnieResponse {
    result: Option<String>,
    function_call: Option<ErnieFunctionCall>,
    error_code: Option<i64>,
    error_msg: Option<String>,
}

#[derive(Deserialize)]
struct ErnieFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error_description: Option<String>,
}
