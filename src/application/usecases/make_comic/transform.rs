//! 기사 다운로드와 만화 서술 변환(원격 API) 단계.

use std::time::Instant;

use anyhow::{Context, Result};
use futures::stream::{FuturesUnordered, StreamExt};

use crate::application::ports::NarrativeTransformer;
use crate::application::usecases::make_comic::{MakeComicUseCase, context::ExecutionContext};
use crate::domain::article::{Article, ArticleTarget, TokenUsage};
use crate::domain::policy::{build_comic_prompt, truncate_article_text};

/// 기사 하나의 변환 결과.
pub(super) struct TransformedArticle {
    pub article: Article,
    pub narrative: String,
    pub usage: TokenUsage,
}

/// 입력 순서 인덱스가 붙은 기사 작업 결과.
pub(super) struct ArticleJob {
    pub index: usize,
    pub target: ArticleTarget,
    pub result: Result<TransformedArticle>,
}

/// 설정/세션 키로 변환기를 구성한다.
pub(super) fn build_transformer(
    use_case: &MakeComicUseCase<'_>,
    ctx: &ExecutionContext,
    session_key: Option<&str>,
) -> Result<Box<dyn NarrativeTransformer>> {
    let transformer = use_case
        .transformer_factory
        .build(&ctx.config, session_key)
        .context("failed to configure transformation provider")?;

    use_case.reporter.section("Provider");
    use_case.reporter.kv("Name", transformer.name());
    use_case.reporter.kv("Model", transformer.model());
    Ok(transformer)
}

/// 모든 기사를 동시에 다운로드/변환하고 입력 순서대로 정렬해 돌려준다.
pub(super) async fn run_article_jobs(
    use_case: &MakeComicUseCase<'_>,
    ctx: &ExecutionContext,
    transformer: &dyn NarrativeTransformer,
) -> Vec<ArticleJob> {
    use_case.reporter.section("Articles (Fetch + Transform)");

    let mut futures = FuturesUnordered::new();
    for (index, target) in ctx.targets.iter().enumerate() {
        let label = target.as_str().to_string();
        use_case.reporter.article_status(&label, "queued", None);
        futures.push(async move {
            let started = Instant::now();
            let result = process_article(use_case, ctx, transformer, target, &label).await;
            (index, target.clone(), label, result, started.elapsed().as_secs_f32())
        });
    }

    let mut jobs = Vec::new();
    while let Some((index, target, label, result, sec)) = futures.next().await {
        let elapsed = format!("{sec:.1}s");
        match &result {
            Ok(_) => use_case
                .reporter
                .article_status(&label, "done", Some(&elapsed)),
            Err(_) => use_case
                .reporter
                .article_status(&label, "error", Some(&elapsed)),
        }
        jobs.push(ArticleJob {
            index,
            target,
            result,
        });
    }

    jobs.sort_by_key(|job| job.index);
    jobs
}

async fn process_article(
    use_case: &MakeComicUseCase<'_>,
    ctx: &ExecutionContext,
    transformer: &dyn NarrativeTransformer,
    target: &ArticleTarget,
    label: &str,
) -> Result<TransformedArticle> {
    use_case.reporter.article_status(label, "fetching", None);
    let article = use_case
        .article_fetcher
        .fetch(target, ctx.config.fetch_timeout_secs())
        .await
        .with_context(|| format!("failed to extract article from {}", target.as_str()))?;

    let max_chars = ctx.config.max_article_chars();
    let (text, truncated) = truncate_article_text(&article.text, max_chars);
    if truncated {
        use_case.reporter.status(
            "Article",
            &format!(
                "warning: article text truncated to {max_chars} chars ({})",
                target.as_str()
            ),
        );
    }

    let prompt = build_comic_prompt(&ctx.config.comic_prompt(), text);
    use_case.reporter.article_status(label, "transforming", None);
    let response = transformer
        .transform(&prompt)
        .await
        .with_context(|| format!("failed to transform article from {}", target.as_str()))?;

    Ok(TransformedArticle {
        article,
        narrative: response.content,
        usage: response.usage,
    })
}
