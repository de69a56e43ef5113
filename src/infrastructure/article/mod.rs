//! 기사 HTML 다운로드 + readability 본문 추출.

use std::io::Cursor;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use readability::extractor;
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use crate::domain::article::{Article, ArticleTarget};

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// 기사 페이지를 내려받아 제목/본문 텍스트를 추출한다.
pub async fn fetch_article(target: &ArticleTarget, timeout_secs: u64) -> Result<Article> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs.max(1)))
        .user_agent(USER_AGENT)
        .build()
        .context("failed to build HTTP client")?;

    info!(url = %target.as_str(), "fetching article");
    let response = client
        .get(target.url().clone())
        .send()
        .await
        .with_context(|| format!("failed to request {}", target.as_str()))?;

    let status = response.status();
    if !status.is_success() {
        warn!(url = %target.as_str(), %status, "article request rejected");
        bail!("failed to fetch article ({status})");
    }

    let html = response
        .text()
        .await
        .with_context(|| format!("failed to read body of {}", target.as_str()))?;
    debug!(url = %target.as_str(), bytes = html.len(), "article downloaded");

    // readability는 동기 파서이므로 blocking 풀에서 실행한다.
    let url = target.url().clone();
    tokio::task::spawn_blocking(move || extract_article(&html, &url))
        .await
        .context("article extraction task failed")?
}

/// HTML 문자열에서 기사 제목/본문을 추출한다.
pub fn extract_article(html: &str, url: &Url) -> Result<Article> {
    let mut input = Cursor::new(html.as_bytes());
    let product = extractor::extract(&mut input, url)
        .map_err(|e| anyhow!("readability extraction failed: {e}"))?;

    let text = normalize_text(&product.text);
    if text.is_empty() {
        bail!("no article text extracted from {url}");
    }

    Ok(Article {
        url: url.to_string(),
        title: product.title.trim().to_string(),
        text,
    })
}

/// 줄마다 앞뒤 공백을 지우고 빈 줄을 없앤다.
fn normalize_text(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
