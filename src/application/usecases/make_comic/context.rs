//! 실행 컨텍스트(설정/대상 URL) 준비 단계.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use crate::application::config::Config;
use crate::application::usecases::make_comic::MakeComicUseCase;
use crate::domain::article::{ArticleTarget, RunOptions};

/// 유스케이스 전 구간에서 공유되는 실행 상태.
pub(super) struct ExecutionContext {
    pub config: Config,
    pub targets: Vec<ArticleTarget>,
    pub output_dir: PathBuf,
}

/// 설정 로딩과 URL 검증을 네트워크 호출 전에 끝낸다.
pub(super) fn load_execution_context(
    use_case: &MakeComicUseCase<'_>,
    options: &RunOptions,
) -> Result<ExecutionContext> {
    if options.urls.iter().all(|u| u.trim().is_empty()) {
        bail!("no article URL given");
    }

    use_case.reporter.section("Load Config");
    let config = use_case
        .config_repo
        .load()
        .context("failed to load comicpilot config")?;

    let mut targets = Vec::new();
    for url in options.urls.iter().filter(|u| !u.trim().is_empty()) {
        let target = use_case
            .target_resolver
            .parse(url)
            .with_context(|| format!("failed to parse article URL '{url}'"))?;
        targets.push(target);
    }

    let output_dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output_dir());

    use_case.reporter.kv("Model", &config.provider.model());
    use_case
        .reporter
        .kv("Title mode", config.segment_options().title_mode.code());
    if !options.dry_run {
        use_case
            .reporter
            .kv("Output dir", &output_dir.display().to_string());
    }

    Ok(ExecutionContext {
        config,
        targets,
        output_dir,
    })
}
