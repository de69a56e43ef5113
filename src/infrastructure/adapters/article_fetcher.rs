//! 기사 다운로드 포트 구현 어댑터.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::ports::ArticleFetcher;
use crate::domain::article::{Article, ArticleTarget};
use crate::infrastructure::article;

/// HTTP + readability 기반 기사 수집 어댑터.
pub struct HttpArticleFetcher;

#[async_trait]
impl ArticleFetcher for HttpArticleFetcher {
    async fn fetch(&self, target: &ArticleTarget, timeout_secs: u64) -> Result<Article> {
        article::fetch_article(target, timeout_secs).await
    }
}
