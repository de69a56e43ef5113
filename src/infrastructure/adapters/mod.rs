//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod article_fetcher;
mod comic_writer;
mod config_repository;
mod html_renderer;
mod reporter;
mod target_resolver;
mod transformer_factory;

pub use article_fetcher::HttpArticleFetcher;
pub use comic_writer::FileComicWriter;
pub use config_repository::JsonConfigRepository;
pub use html_renderer::HtmlComicRenderer;
pub use reporter::ConsoleReporter;
pub use target_resolver::UrlTargetResolver;
pub use transformer_factory::TransformerFactoryAdapter;
