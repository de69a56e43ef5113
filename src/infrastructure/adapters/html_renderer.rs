//! 만화 HTML 렌더링 포트 구현 어댑터.

use crate::application::ports::ComicRenderer;
use crate::domain::article::TokenUsage;
use crate::domain::panel::ComicPanel;
use crate::infrastructure::render;

/// HTML 렌더링 어댑터.
pub struct HtmlComicRenderer;

impl ComicRenderer for HtmlComicRenderer {
    fn render_page(&self, title: &str, source_url: Option<&str>, panels: &[ComicPanel]) -> String {
        render::render_comic_page(title, source_url, panels)
    }

    fn format_usage(&self, usage: &TokenUsage) -> String {
        render::format_usage(usage)
    }
}
