//! 기사 URL → 본문 추출 → 만화 서술 변환 → 패널 HTML 저장까지의 오케스트레이션 유스케이스.

mod context;
mod publish;
mod transform;

use std::path::PathBuf;

use anyhow::{Result, bail};

use crate::application::ports::{
    ArticleFetcher, ComicRenderer, ComicWriter, ConfigRepository, Reporter, TargetResolver,
    TransformerFactory,
};
use crate::domain::article::RunOptions;

use context::load_execution_context;
use publish::publish_comics;
use transform::{build_transformer, run_article_jobs};

/// 기사 하나의 처리 결과.
#[derive(Debug, Clone)]
pub enum ComicOutcome {
    Written {
        url: String,
        path: PathBuf,
        panels: usize,
    },
    Previewed {
        url: String,
        panels: usize,
    },
    Failed {
        url: String,
        error: String,
    },
}

impl ComicOutcome {
    pub fn url(&self) -> &str {
        match self {
            ComicOutcome::Written { url, .. } => url,
            ComicOutcome::Previewed { url, .. } => url,
            ComicOutcome::Failed { url, .. } => url,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ComicOutcome::Failed { .. })
    }
}

pub struct MakeComicUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub target_resolver: &'a dyn TargetResolver,
    pub article_fetcher: &'a dyn ArticleFetcher,
    pub transformer_factory: &'a dyn TransformerFactory,
    pub renderer: &'a dyn ComicRenderer,
    pub writer: &'a dyn ComicWriter,
    pub reporter: &'a dyn Reporter,
}

impl<'a> MakeComicUseCase<'a> {
    /// 실행 진입점.
    /// 기사별 실패는 결과에 기록하고, 모든 기사가 실패했을 때만 에러를 돌려준다.
    pub async fn execute(&self, options: RunOptions) -> Result<Vec<ComicOutcome>> {
        self.reporter.section("Session");
        self.reporter.kv("Articles", &options.urls.len().to_string());
        self.reporter
            .kv("Mode", if options.dry_run { "dry-run" } else { "write-html" });

        let ctx = load_execution_context(self, &options)?;
        let transformer = build_transformer(self, &ctx, options.api_key.as_deref())?;
        let jobs = run_article_jobs(self, &ctx, transformer.as_ref()).await;
        let outcomes = publish_comics(self, &ctx, &options, jobs).await;

        let failed: Vec<&ComicOutcome> = outcomes.iter().filter(|o| o.is_failed()).collect();
        if failed.len() == outcomes.len() {
            match failed.as_slice() {
                [ComicOutcome::Failed { error, .. }] => bail!("{error}"),
                _ => bail!("all {} articles failed", failed.len()),
            }
        }

        Ok(outcomes)
    }
}
