//! 로컬 텍스트(이미 변환된 서술)를 네트워크 없이 패널 페이지로 만드는 유스케이스.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::{ComicRenderer, ComicWriter, ConfigRepository, Reporter};
use crate::application::usecases::comic_page::{PageRequest, publish_page};
use crate::domain::panel::Panel;
use crate::domain::policy::{clean_model_output, slugify};

#[derive(Debug, Clone, Default)]
pub struct SegmentTextOptions {
    /// 페이지 제목(파일 이름의 기반)
    pub title: String,
    pub output_dir: Option<PathBuf>,
    pub dry_run: bool,
}

pub struct SegmentTextUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub renderer: &'a dyn ComicRenderer,
    pub writer: &'a dyn ComicWriter,
    pub reporter: &'a dyn Reporter,
}

impl<'a> SegmentTextUseCase<'a> {
    /// 텍스트를 분할해 저장(또는 출력)하고 패널 목록을 돌려준다.
    pub async fn execute(&self, text: &str, options: SegmentTextOptions) -> Result<Vec<Panel>> {
        let config = self
            .config_repo
            .load()
            .context("failed to load comicpilot config")?;

        let title = if options.title.trim().is_empty() {
            "comic".to_string()
        } else {
            options.title.trim().to_string()
        };
        let stem = slugify(&title);
        let file_name = format!("{}.html", if stem.is_empty() { "comic" } else { stem.as_str() });
        let output_dir = options.output_dir.unwrap_or_else(|| config.output_dir());

        let text = clean_model_output(text);

        self.reporter.section("Segment");
        self.reporter.kv("Input", &format!("{} chars", text.chars().count()));
        self.reporter.kv("Title mode", config.segment_options().title_mode.code());

        let outcome = publish_page(
            &config,
            self.renderer,
            self.writer,
            self.reporter,
            PageRequest {
                title: &title,
                source_url: None,
                text: &text,
                output_dir: &output_dir,
                file_name: &file_name,
                dry_run: options.dry_run,
            },
        )
        .await?;

        Ok(outcome.panels)
    }
}
