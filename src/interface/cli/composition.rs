//! 애플리케이션 조립(composition root) 모듈.

use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::application::usecases::make_comic::MakeComicUseCase;
use crate::application::usecases::segment_text::SegmentTextUseCase;
use crate::infrastructure::adapters::{
    ConsoleReporter, FileComicWriter, HtmlComicRenderer, HttpArticleFetcher,
    JsonConfigRepository, TransformerFactoryAdapter, UrlTargetResolver,
};

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config_repo: JsonConfigRepository,
    target_resolver: UrlTargetResolver,
    article_fetcher: HttpArticleFetcher,
    transformer_factory: TransformerFactoryAdapter,
    renderer: HtmlComicRenderer,
    writer: FileComicWriter,
    reporter: ConsoleReporter,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self::new(true)
    }
}

impl AppComposition {
    /// 기사 상태판 사용 여부를 받아 실행 조합을 생성한다.
    pub fn new(article_panel_enabled: bool) -> Self {
        Self {
            config_repo: JsonConfigRepository,
            target_resolver: UrlTargetResolver,
            article_fetcher: HttpArticleFetcher,
            transformer_factory: TransformerFactoryAdapter,
            renderer: HtmlComicRenderer,
            writer: FileComicWriter,
            reporter: ConsoleReporter::with_article_panel(article_panel_enabled),
        }
    }

    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
        }
    }

    /// 기사 → 만화 변환 유스케이스를 생성한다.
    pub fn make_comic_usecase(&self) -> MakeComicUseCase<'_> {
        MakeComicUseCase {
            config_repo: &self.config_repo,
            target_resolver: &self.target_resolver,
            article_fetcher: &self.article_fetcher,
            transformer_factory: &self.transformer_factory,
            renderer: &self.renderer,
            writer: &self.writer,
            reporter: &self.reporter,
        }
    }

    /// 로컬 텍스트 분할 유스케이스를 생성한다.
    pub fn segment_text_usecase(&self) -> SegmentTextUseCase<'_> {
        SegmentTextUseCase {
            config_repo: &self.config_repo,
            renderer: &self.renderer,
            writer: &self.writer,
            reporter: &self.reporter,
        }
    }
}
