//! OpenAI 호환 chat-completions provider 어댑터(기본: Groq).

use anyhow::{Result, bail};
use reqwest::Client;
use serde_json::{Value, json};
use tracing::info;
use url::Url;

use crate::application::config::Config;
use crate::domain::article::TransformResponse;
use crate::infrastructure::config::resolve_api_key;

use super::api_runner::{build_api_client, collect_text, send_json};
use super::usage_parser::parse_usage;

/// API 호출에 필요한 해석 완료된 설정.
#[derive(Debug, Clone)]
pub struct ChatApiSettings {
    pub base_url: String,
    pub model: String,
    pub credential: String,
    pub timeout_secs: u64,
}

pub struct ChatCompletionProvider {
    client: Client,
    settings: ChatApiSettings,
    name: String,
}

impl ChatCompletionProvider {
    pub fn new(settings: ChatApiSettings) -> Self {
        Self {
            client: build_api_client(settings.timeout_secs),
            name: display_name(&settings.base_url),
            settings,
        }
    }

    /// 설정과 세션 키를 해석해 provider를 구성한다.
    pub fn from_config(config: &Config, session_key: Option<&str>) -> Result<Self> {
        let provider = &config.provider;
        if !provider.is_enabled() {
            bail!("provider disabled. Set provider.enabled to true in config");
        }

        let Some(credential) = resolve_api_key(provider, session_key).credential else {
            bail!(
                "missing API key. Configure provider.api_key or set the {} environment variable (provider.api_key_env)",
                provider.api_key_env()
            );
        };

        Ok(Self::new(ChatApiSettings {
            base_url: provider.api_base(),
            model: provider.model(),
            credential,
            timeout_secs: config.request_timeout_secs(),
        }))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    /// 단일 user 메시지로 chat-completions를 호출한다.
    pub async fn complete(&self, prompt: &str) -> Result<TransformResponse> {
        let endpoint = format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        );
        let payload = json!({
            "model": self.settings.model,
            "messages": [
                { "role": "user", "content": prompt }
            ]
        });

        info!(model = %self.settings.model, prompt_chars = prompt.chars().count(), "requesting comic rewrite");
        let request = self
            .client
            .post(endpoint)
            .bearer_auth(&self.settings.credential)
            .json(&payload);

        let response = send_json(&self.name, "request chat completion", request).await?;
        let content = extract_message_content(&response).trim().to_string();
        if content.is_empty() {
            bail!("{}: empty response content", self.name);
        }

        Ok(TransformResponse {
            content,
            usage: parse_usage(&response),
        })
    }
}

fn extract_message_content(response: &Value) -> String {
    response
        .pointer("/choices/0/message/content")
        .map(collect_text)
        .unwrap_or_default()
}

/// 베이스 URL 호스트로 사용자 표시 이름을 정한다.
fn display_name(base_url: &str) -> String {
    let host = Url::parse(base_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default();

    if host.ends_with("groq.com") {
        "Groq".to_string()
    } else if host.ends_with("openai.com") {
        "OpenAI".to_string()
    } else if host.is_empty() {
        "Chat API".to_string()
    } else {
        format!("Chat API ({host})")
    }
}
