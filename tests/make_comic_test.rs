use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Result, bail};
use async_trait::async_trait;

use comicpilot::application::config::Config;
use comicpilot::application::ports::{
    ArticleFetcher, ComicWriter, ConfigRepository, NarrativeTransformer, Reporter,
    TransformerFactory,
};
use comicpilot::application::usecases::make_comic::{ComicOutcome, MakeComicUseCase};
use comicpilot::application::usecases::segment_text::{SegmentTextOptions, SegmentTextUseCase};
use comicpilot::domain::article::{
    Article, ArticleTarget, RunOptions, TokenUsage, TransformResponse,
};
use comicpilot::infrastructure::adapters::{
    FileComicWriter, HtmlComicRenderer, UrlTargetResolver,
};

const NARRATIVE: &str = "**Il robot cuoco**\nA Torino un robot prepara il risotto.\n\n\
Sorpresa: gli chef assaggiano il piatto.\n\n\
Il segreto\nSensori e bracci controllano la cottura.\n\n\
Domani si replica in un ristorante del centro.\n\n\
Fine\nIl robot torna in laboratorio.";

struct StaticConfig(Config);

impl ConfigRepository for StaticConfig {
    fn load(&self) -> Result<Config> {
        Ok(self.0.clone())
    }

    fn inspect_pretty_json(&self) -> Result<String> {
        Ok("{}".to_string())
    }
}

/// `broken` 호스트는 실패하고 나머지는 고정 기사를 돌려준다.
struct FakeFetcher;

#[async_trait]
impl ArticleFetcher for FakeFetcher {
    async fn fetch(&self, target: &ArticleTarget, _timeout_secs: u64) -> Result<Article> {
        if target.host() == "broken.it" {
            bail!("failed to fetch article (404 Not Found)");
        }
        Ok(Article {
            url: target.as_str().to_string(),
            title: "Robot in cucina".to_string(),
            text: "Un robot ha cucinato un risotto a Torino.".to_string(),
        })
    }
}

#[derive(Default)]
struct RecordingTransformer {
    prompts: Mutex<Vec<String>>,
}

/// 팩토리가 만들어 주는 공유 변환기 핸들.
struct SharedTransformer(&'static RecordingTransformer);

#[async_trait]
impl NarrativeTransformer for SharedTransformer {
    fn name(&self) -> &str {
        "Fake"
    }

    fn model(&self) -> &str {
        "fake-model"
    }

    async fn transform(&self, prompt: &str) -> Result<TransformResponse> {
        self.0.prompts.lock().unwrap().push(prompt.to_string());
        Ok(TransformResponse {
            content: NARRATIVE.to_string(),
            usage: TokenUsage {
                prompt_tokens: Some(10),
                completion_tokens: Some(5),
                total_tokens: Some(15),
            },
        })
    }
}

struct FakeFactory(&'static RecordingTransformer);

impl TransformerFactory for FakeFactory {
    fn build(
        &self,
        _config: &Config,
        session_key: Option<&str>,
    ) -> Result<Box<dyn NarrativeTransformer>> {
        if session_key != Some("session-key") {
            bail!("missing API key");
        }
        Ok(Box::new(SharedTransformer(self.0)))
    }
}

#[derive(Default)]
struct RecordingReporter {
    lines: Mutex<Vec<String>>,
}

impl RecordingReporter {
    fn contains(&self, needle: &str) -> bool {
        self.lines.lock().unwrap().iter().any(|l| l.contains(needle))
    }
}

impl Reporter for RecordingReporter {
    fn section(&self, name: &str) {
        self.lines.lock().unwrap().push(format!("== {name}"));
    }

    fn kv(&self, key: &str, value: &str) {
        self.lines.lock().unwrap().push(format!("{key}: {value}"));
    }

    fn status(&self, scope: &str, message: &str) {
        self.lines.lock().unwrap().push(format!("[{scope}] {message}"));
    }

    fn article_status(&self, article: &str, status: &str, _extra: Option<&str>) {
        self.lines
            .lock()
            .unwrap()
            .push(format!("article {status} {article}"));
    }

    fn raw(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}

/// 쓰기 요청만 기록하는 writer.
#[derive(Default)]
struct MemoryWriter {
    pages: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl ComicWriter for MemoryWriter {
    async fn write(&self, dir: &Path, file_name: &str, html: &str) -> Result<PathBuf> {
        self.pages
            .lock()
            .unwrap()
            .push((file_name.to_string(), html.to_string()));
        Ok(dir.join(file_name))
    }
}

fn leak_transformer() -> &'static RecordingTransformer {
    Box::leak(Box::new(RecordingTransformer::default()))
}

#[tokio::test]
async fn writes_one_page_per_article_in_input_order() {
    let temp = tempfile::tempdir().unwrap();
    let transformer = leak_transformer();
    let reporter = RecordingReporter::default();
    let config = StaticConfig(Config::default());
    let factory = FakeFactory(transformer);

    let use_case = MakeComicUseCase {
        config_repo: &config,
        target_resolver: &UrlTargetResolver,
        article_fetcher: &FakeFetcher,
        transformer_factory: &factory,
        renderer: &HtmlComicRenderer,
        writer: &FileComicWriter,
        reporter: &reporter,
    };

    let outcomes = use_case
        .execute(RunOptions {
            urls: vec![
                "https://news.it/tech/robot-in-cucina.html".to_string(),
                "https://broken.it/pezzo".to_string(),
                "https://altro.it/".to_string(),
            ],
            output_dir: Some(temp.path().to_path_buf()),
            dry_run: false,
            api_key: Some("session-key".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 3);
    let urls: Vec<&str> = outcomes.iter().map(ComicOutcome::url).collect();
    assert_eq!(
        urls,
        vec![
            "https://news.it/tech/robot-in-cucina.html",
            "https://broken.it/pezzo",
            "https://altro.it/"
        ]
    );

    let ComicOutcome::Written { path, panels, .. } = &outcomes[0] else {
        panic!("first article should be written: {:?}", outcomes[0]);
    };
    assert_eq!(path, &temp.path().join("robot-in-cucina.html"));
    assert_eq!(*panels, 5);

    let html = std::fs::read_to_string(path).unwrap();
    assert!(html.contains("<title>Robot in cucina</title>"));
    assert!(html.contains("<h2>Il robot cuoco</h2>"));
    assert!(!html.contains("**"));

    assert!(outcomes[1].is_failed());
    assert!(matches!(
        &outcomes[2],
        ComicOutcome::Written { path, .. } if path == &temp.path().join("altro-it.html")
    ));

    let prompts = transformer.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].ends_with("Testo articolo:\n\nUn robot ha cucinato un risotto a Torino."));

    assert!(reporter.contains("== Token Usage"));
    assert!(reporter.contains("Total: prompt=20, completion=10, total=30"));
}

#[tokio::test]
async fn dry_run_prints_panels_without_writing() {
    let transformer = leak_transformer();
    let reporter = RecordingReporter::default();
    let writer = MemoryWriter::default();
    let config = StaticConfig(Config::default());
    let factory = FakeFactory(transformer);

    let use_case = MakeComicUseCase {
        config_repo: &config,
        target_resolver: &UrlTargetResolver,
        article_fetcher: &FakeFetcher,
        transformer_factory: &factory,
        renderer: &HtmlComicRenderer,
        writer: &writer,
        reporter: &reporter,
    };

    let outcomes = use_case
        .execute(RunOptions {
            urls: vec!["https://news.it/robot".to_string()],
            output_dir: None,
            dry_run: true,
            api_key: Some("session-key".to_string()),
        })
        .await
        .unwrap();

    assert!(matches!(
        outcomes.as_slice(),
        [ComicOutcome::Previewed { panels: 5, .. }]
    ));
    assert!(writer.pages.lock().unwrap().is_empty());
    assert!(reporter.contains("[1] Il robot cuoco"));
    assert!(reporter.contains("[2] Sorpresa"));
}

#[tokio::test]
async fn single_failed_article_is_an_error() {
    let transformer = leak_transformer();
    let reporter = RecordingReporter::default();
    let config = StaticConfig(Config::default());
    let factory = FakeFactory(transformer);

    let use_case = MakeComicUseCase {
        config_repo: &config,
        target_resolver: &UrlTargetResolver,
        article_fetcher: &FakeFetcher,
        transformer_factory: &factory,
        renderer: &HtmlComicRenderer,
        writer: &MemoryWriter::default(),
        reporter: &reporter,
    };

    let err = use_case
        .execute(RunOptions {
            urls: vec!["https://broken.it/pezzo".to_string()],
            dry_run: true,
            api_key: Some("session-key".to_string()),
            ..RunOptions::default()
        })
        .await
        .err()
        .unwrap();
    assert!(err.to_string().contains("404"), "{err:#}");
}

#[tokio::test]
async fn invalid_url_or_missing_key_stops_before_fetching() {
    let transformer = leak_transformer();
    let reporter = RecordingReporter::default();
    let config = StaticConfig(Config::default());
    let factory = FakeFactory(transformer);

    let use_case = MakeComicUseCase {
        config_repo: &config,
        target_resolver: &UrlTargetResolver,
        article_fetcher: &FakeFetcher,
        transformer_factory: &factory,
        renderer: &HtmlComicRenderer,
        writer: &MemoryWriter::default(),
        reporter: &reporter,
    };

    let invalid = use_case
        .execute(RunOptions {
            urls: vec!["ftp://news.it/file".to_string()],
            api_key: Some("session-key".to_string()),
            ..RunOptions::default()
        })
        .await;
    assert!(invalid.is_err());

    let no_key = use_case
        .execute(RunOptions {
            urls: vec!["https://news.it/robot".to_string()],
            ..RunOptions::default()
        })
        .await;
    assert!(no_key.is_err());

    let empty = use_case.execute(RunOptions::default()).await;
    assert!(empty.err().unwrap().to_string().contains("no article URL"));

    assert!(transformer.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn segment_text_writes_page_named_after_title() {
    let reporter = RecordingReporter::default();
    let writer = MemoryWriter::default();
    let config = StaticConfig(Config::default());

    let use_case = SegmentTextUseCase {
        config_repo: &config,
        renderer: &HtmlComicRenderer,
        writer: &writer,
        reporter: &reporter,
    };

    let panels = use_case
        .execute(
            NARRATIVE,
            SegmentTextOptions {
                title: "La Storia del Robot".to_string(),
                output_dir: Some(PathBuf::from("out")),
                dry_run: false,
            },
        )
        .await
        .unwrap();

    assert_eq!(panels.len(), 5);
    assert_eq!(panels[0].title, "Il robot cuoco");

    let pages = writer.pages.lock().unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].0, "la-storia-del-robot.html");
    assert!(pages[0].1.contains("icon-globe"));
    assert!(reporter.contains("Output: out"));
}

#[tokio::test]
async fn articles_with_same_slug_get_distinct_files() {
    let temp = tempfile::tempdir().unwrap();
    let transformer = leak_transformer();
    let reporter = RecordingReporter::default();
    let config = StaticConfig(Config::default());
    let factory = FakeFactory(transformer);

    let use_case = MakeComicUseCase {
        config_repo: &config,
        target_resolver: &UrlTargetResolver,
        article_fetcher: &FakeFetcher,
        transformer_factory: &factory,
        renderer: &HtmlComicRenderer,
        writer: &FileComicWriter,
        reporter: &reporter,
    };

    let outcomes = use_case
        .execute(RunOptions {
            urls: vec![
                "https://a.it/news/story".to_string(),
                "https://b.it/other/story".to_string(),
            ],
            output_dir: Some(temp.path().to_path_buf()),
            dry_run: false,
            api_key: Some("session-key".to_string()),
        })
        .await
        .unwrap();

    let paths: Vec<PathBuf> = outcomes
        .iter()
        .map(|outcome| match outcome {
            ComicOutcome::Written { path, .. } => path.clone(),
            other => panic!("expected written page: {other:?}"),
        })
        .collect();
    assert_eq!(
        paths,
        vec![temp.path().join("story.html"), temp.path().join("story-2.html")]
    );

    let files = std::fs::read_dir(temp.path()).unwrap().count();
    assert_eq!(files, 2);
    assert!(std::fs::read_to_string(&paths[1]).unwrap().contains("https://b.it/other/story"));
}
