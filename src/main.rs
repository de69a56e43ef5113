//! `comicpilot` 바이너리 진입점.

use std::io::Read;

use anyhow::{Context, Result};
use comicpilot::application::usecases::segment_text::SegmentTextOptions;
use comicpilot::interface::cli::command::TextSource;
use comicpilot::interface::cli::{AppComposition, Cli, CliAction, run_repl};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let action = match Cli::parse_action() {
        Ok(action) => action,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(2);
        }
    };

    if let Err(err) = dispatch(action).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn dispatch(action: CliAction) -> Result<()> {
    match action {
        CliAction::Interactive => {
            // REPL 입력 패널과 겹치지 않도록 기사 상태판은 끈다.
            let composition = AppComposition::new(false);
            run_repl(&composition).await
        }
        CliAction::InspectConfig => {
            let json = AppComposition::default().inspect_config_usecase().execute()?;
            println!("{json}");
            Ok(())
        }
        CliAction::MakeComic(options) => {
            let outcomes = AppComposition::default()
                .make_comic_usecase()
                .execute(options)
                .await?;
            for outcome in outcomes.iter().filter(|o| o.is_failed()) {
                eprintln!("warning: skipped {}", outcome.url());
            }
            Ok(())
        }
        CliAction::Segment {
            source,
            title,
            output_dir,
            dry_run,
        } => {
            let (text, default_title) = read_source(&source)?;
            let options = SegmentTextOptions {
                title: title.unwrap_or(default_title),
                output_dir,
                dry_run,
            };
            AppComposition::default()
                .segment_text_usecase()
                .execute(&text, options)
                .await?;
            Ok(())
        }
    }
}

/// 입력 텍스트와 기본 페이지 제목(파일 이름)을 읽는다.
fn read_source(source: &TextSource) -> Result<(String, String)> {
    match source {
        TextSource::Stdin => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok((text, "comic".to_string()))
        }
        TextSource::File(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "comic".to_string());
            Ok((text, stem))
        }
    }
}
