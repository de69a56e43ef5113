//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::Config;
use crate::domain::article::{Article, ArticleTarget, TokenUsage, TransformResponse};
use crate::domain::panel::ComicPanel;

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// URL 입력값을 기사 대상으로 변환하는 포트.
pub trait TargetResolver: Send + Sync {
    fn parse(&self, input: &str) -> Result<ArticleTarget>;
}

/// 기사 다운로드 + 본문 추출 포트.
#[async_trait]
pub trait ArticleFetcher: Send + Sync {
    async fn fetch(&self, target: &ArticleTarget, timeout_secs: u64) -> Result<Article>;
}

/// 기사 본문을 만화 서술로 바꾸는 원격 변환기 포트.
#[async_trait]
pub trait NarrativeTransformer: Send + Sync {
    /// 사용자 표시 이름
    fn name(&self) -> &str;
    fn model(&self) -> &str;
    async fn transform(&self, prompt: &str) -> Result<TransformResponse>;
}

/// 설정과 세션 키로 변환기를 구성하는 팩토리 포트.
pub trait TransformerFactory: Send + Sync {
    fn build(
        &self,
        config: &Config,
        session_key: Option<&str>,
    ) -> Result<Box<dyn NarrativeTransformer>>;
}

/// 패널 HTML 렌더링 포트.
pub trait ComicRenderer: Send + Sync {
    fn render_page(&self, title: &str, source_url: Option<&str>, panels: &[ComicPanel]) -> String;
    fn format_usage(&self, usage: &TokenUsage) -> String;
}

/// 렌더링 결과 저장 포트.
#[async_trait]
pub trait ComicWriter: Send + Sync {
    async fn write(&self, dir: &Path, file_name: &str, html: &str) -> Result<PathBuf>;
}

/// 콘솔/로그 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn section(&self, name: &str);
    fn kv(&self, key: &str, value: &str);
    fn status(&self, scope: &str, message: &str);
    fn article_status(&self, article: &str, status: &str, extra: Option<&str>);
    fn raw(&self, line: &str);
}
