//! 변환 결과를 패널로 나누고 HTML로 저장(또는 미리보기)하는 단계.

use std::collections::HashSet;

use crate::application::usecases::comic_page::{PageRequest, publish_page};
use crate::application::usecases::make_comic::{
    ComicOutcome, MakeComicUseCase, context::ExecutionContext, transform::ArticleJob,
};
use crate::domain::article::{RunOptions, TokenUsage};
use crate::domain::policy::{clean_model_output, output_file_name, page_title, unique_file_name};

/// 입력 순서대로 기사별 페이지를 만들고, 마지막에 토큰 사용량 합계를 보고한다.
pub(super) async fn publish_comics(
    use_case: &MakeComicUseCase<'_>,
    ctx: &ExecutionContext,
    options: &RunOptions,
    jobs: Vec<ArticleJob>,
) -> Vec<ComicOutcome> {
    let mut outcomes = Vec::new();
    let mut usage_total = TokenUsage::default();
    let mut used_names = HashSet::new();

    for job in jobs {
        let url = job.target.as_str().to_string();
        let transformed = match job.result {
            Ok(transformed) => transformed,
            Err(err) => {
                use_case.reporter.section("Failed");
                use_case.reporter.kv("Article", &url);
                use_case.reporter.status("Error", &format!("{err:#}"));
                outcomes.push(ComicOutcome::Failed {
                    url,
                    error: format!("{err:#}"),
                });
                continue;
            }
        };

        usage_total.add_from(&transformed.usage);

        let title = page_title(&transformed.article, &job.target);
        let narrative = clean_model_output(&transformed.narrative);
        let file_name = unique_file_name(&output_file_name(&job.target), &mut used_names);

        use_case.reporter.section("Comic");
        use_case.reporter.kv("Article", &url);
        use_case.reporter.kv("Title", &title);
        use_case
            .reporter
            .kv("Tokens", &use_case.renderer.format_usage(&transformed.usage));

        let request = PageRequest {
            title: &title,
            source_url: Some(url.as_str()),
            text: &narrative,
            output_dir: &ctx.output_dir,
            file_name: &file_name,
            dry_run: options.dry_run,
        };

        let published = publish_page(
            &ctx.config,
            use_case.renderer,
            use_case.writer,
            use_case.reporter,
            request,
        )
        .await;

        match published {
            Ok(page) => match page.path {
                Some(path) => outcomes.push(ComicOutcome::Written {
                    url,
                    path,
                    panels: page.panels.len(),
                }),
                None => outcomes.push(ComicOutcome::Previewed {
                    url,
                    panels: page.panels.len(),
                }),
            },
            Err(err) => {
                use_case.reporter.status("Error", &format!("{err:#}"));
                outcomes.push(ComicOutcome::Failed {
                    url,
                    error: format!("{err:#}"),
                });
            }
        }
    }

    if outcomes.len() > 1 {
        use_case.reporter.section("Token Usage");
        use_case
            .reporter
            .kv("Total", &use_case.renderer.format_usage(&usage_total));
    }

    outcomes
}
