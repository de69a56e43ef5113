//! 만화 서술 변환 provider 모듈.
//! OpenAI 호환 chat-completions API를 호출하고 결과/사용량을 표준화한다.

mod api_runner;
pub mod chat;
mod usage_parser;

use anyhow::Result;

use crate::application::config::Config;

pub use chat::{ChatApiSettings, ChatCompletionProvider};

/// 설정에 맞는 provider를 구성한다. 비활성/키 누락이면 에러.
pub fn build_provider(config: &Config, session_key: Option<&str>) -> Result<ChatCompletionProvider> {
    ChatCompletionProvider::from_config(config, session_key)
}
