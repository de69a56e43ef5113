//! 변환기 팩토리 포트 구현 어댑터.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::Config;
use crate::application::ports::{NarrativeTransformer, TransformerFactory};
use crate::domain::article::TransformResponse;
use crate::infrastructure::providers::{self, ChatCompletionProvider};

/// chat-completions provider를 구성하는 팩토리 어댑터.
pub struct TransformerFactoryAdapter;

impl TransformerFactory for TransformerFactoryAdapter {
    fn build(
        &self,
        config: &Config,
        session_key: Option<&str>,
    ) -> Result<Box<dyn NarrativeTransformer>> {
        let inner = providers::build_provider(config, session_key)?;
        Ok(Box::new(ChatTransformerAdapter { inner }))
    }
}

/// 인프라 provider를 애플리케이션 포트로 감싸는 래퍼.
struct ChatTransformerAdapter {
    inner: ChatCompletionProvider,
}

#[async_trait]
impl NarrativeTransformer for ChatTransformerAdapter {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn model(&self) -> &str {
        self.inner.model()
    }

    async fn transform(&self, prompt: &str) -> Result<TransformResponse> {
        self.inner.complete(prompt).await
    }
}
