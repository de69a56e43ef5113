//! 기사/변환 도메인 엔티티와 값 객체.

use std::path::PathBuf;

use anyhow::{Result, bail};
use url::Url;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub urls: Vec<String>,
    /// HTML 출력 디렉터리 override
    pub output_dir: Option<PathBuf>,
    /// 파일을 쓰지 않고 패널만 출력
    pub dry_run: bool,
    /// 세션 한정 API key(설정보다 우선)
    pub api_key: Option<String>,
}

/// 기사 원문 위치(검증된 http/https URL).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleTarget {
    url: Url,
}

impl ArticleTarget {
    /// 절대 http/https URL만 허용한다.
    pub fn parse(input: &str) -> Result<Self> {
        let url = Url::parse(input.trim())?;
        match url.scheme() {
            "http" | "https" => {}
            other => bail!("unsupported URL scheme '{other}': {input}"),
        }
        if url.host_str().is_none_or(str::is_empty) {
            bail!("URL host is missing: {input}");
        }

        Ok(Self { url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct Article {
    pub url: String,
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
}

impl TokenUsage {
    pub fn add_from(&mut self, other: &TokenUsage) {
        self.prompt_tokens = sum_optional(self.prompt_tokens, other.prompt_tokens);
        self.completion_tokens = sum_optional(self.completion_tokens, other.completion_tokens);
        self.total_tokens = sum_optional(self.total_tokens, other.total_tokens);
    }
}

/// 원격 변환 응답(본문 + 토큰 사용량).
#[derive(Debug, Clone)]
pub struct TransformResponse {
    pub content: String,
    pub usage: TokenUsage,
}

fn sum_optional(a: Option<u64>, b: Option<u64>) -> Option<u64> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x + y),
        (Some(x), None) => Some(x),
        (None, Some(y)) => Some(y),
        (None, None) => None,
    }
}
