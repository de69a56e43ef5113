//! 변환 텍스트 → 패널 → HTML 저장(또는 미리보기) 공통 단계.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::config::Config;
use crate::application::ports::{ComicRenderer, ComicWriter, Reporter};
use crate::domain::panel::{Panel, decorate};
use crate::domain::segment::segment;

/// 한 페이지 생성에 필요한 입력.
pub(super) struct PageRequest<'r> {
    pub title: &'r str,
    pub source_url: Option<&'r str>,
    pub text: &'r str,
    pub output_dir: &'r Path,
    pub file_name: &'r str,
    pub dry_run: bool,
}

/// 생성 결과. dry-run이면 `path`는 None.
pub(super) struct PageOutcome {
    pub panels: Vec<Panel>,
    pub path: Option<PathBuf>,
}

pub(super) async fn publish_page(
    config: &Config,
    renderer: &dyn ComicRenderer,
    writer: &dyn ComicWriter,
    reporter: &dyn Reporter,
    request: PageRequest<'_>,
) -> Result<PageOutcome> {
    let options = config.segment_options();
    let panels = segment(request.text, &options, &config.fallback_titles());
    reporter.kv("Panels", &panels.len().to_string());

    if request.dry_run {
        print_panels(reporter, &panels);
        return Ok(PageOutcome { panels, path: None });
    }

    let decorated = decorate(panels.clone(), &config.icons());
    let html = renderer.render_page(request.title, request.source_url, &decorated);
    let path = writer
        .write(request.output_dir, request.file_name, &html)
        .await
        .with_context(|| format!("failed to write comic page {}", request.file_name))?;
    reporter.kv("Output", &path.display().to_string());

    Ok(PageOutcome {
        panels,
        path: Some(path),
    })
}

fn print_panels(reporter: &dyn Reporter, panels: &[Panel]) {
    for (idx, panel) in panels.iter().enumerate() {
        reporter.raw(&format!("[{}] {}", idx + 1, panel.title));
        if !panel.content.is_empty() {
            reporter.raw(&panel.content);
        }
        reporter.raw("");
    }
}
