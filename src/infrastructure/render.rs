//! 만화 패널 HTML 페이지 렌더링 모듈.

use crate::domain::article::TokenUsage;
use crate::domain::panel::ComicPanel;

const COMIC_CSS: &str = r#"
body:has(.comic-container) {
    font-family: 'Comic Neue', cursive;
    background: linear-gradient(135deg, #f0f0f0, #e0f0f0);
    margin: 0;
    padding: 20px;
    color: #333;
    overflow-x: hidden;
}
.comic-container {
    display: flex;
    flex-wrap: wrap;
    gap: 30px;
    justify-content: center;
    max-width: 1200px;
    margin: 0 auto;
    padding: 20px;
    background-color: #fff;
    box-shadow: 0 10px 20px rgba(0, 0, 0, 0.1);
    border-radius: 15px;
    box-sizing: border-box;
}
.panel {
    background-color: #fff;
    border: 5px solid #333;
    box-shadow: 5px 5px 15px rgba(0, 0, 0, 0.3);
    padding: 20px;
    border-radius: 10px;
    position: relative;
    overflow: hidden;
    width: calc(50% - 30px);
    min-width: 300px;
    box-sizing: border-box;
}
.panel h2 {
    font-family: 'Bangers', cursive;
    color: #e53935;
    text-align: center;
    margin: 0 0 10px 0;
    text-shadow: 2px 2px #333;
    font-size: 2em;
    line-height: 1.1;
}
.panel p {
    margin: 10px 0 0 0;
    line-height: 1.5;
    text-align: justify;
}
.panel-content {
    display: flex;
    flex-direction: column;
    align-items: center;
    padding: 0 10px;
}
.icon {
    display: block;
    margin: 10px auto 0 auto;
    font-size: 3em;
    text-align: center;
}
.icon-globe::before { content: '🌍'; }
.icon-ai::before { content: '🤖'; }
.icon-code::before { content: '💻'; }
.icon-trophy::before { content: '🏆'; }
.icon-star::before { content: '⭐'; }
.icon-fire::before { content: '🔥'; }
.icon-lightbulb::before { content: '💡'; }
.icon-music::before { content: '🎵'; }
.icon-book::before { content: '📚'; }
.icon-rocket::before { content: '🚀'; }
.icon-leaf::before { content: '🌿'; }
.icon-map::before { content: '📍'; }
.icon-cloud::before { content: '☁️'; }
.highlight {
    font-weight: bold;
    color: #1a73e8;
    font-family: 'Bangers', cursive;
}
.comic-header {
    text-align: center;
    margin-bottom: 30px;
    font-family: 'Bangers', cursive;
    color: #e53935;
    text-shadow: 3px 3px #333;
    font-size: 3em;
}
.comic-source {
    text-align: center;
    font-size: 0.9em;
    color: #666;
}
@media (max-width: 768px) {
    .panel { width: 100%; min-width: auto; }
    .icon { font-size: 2em; }
    body:has(.comic-container) { padding: 10px; }
}
@media (max-width: 480px) {
    .panel h2 { font-size: 1.5em; }
    .comic-header { font-size: 2em; margin-bottom: 20px; }
}
"#;

/// 패널 목록을 독립 실행 가능한 HTML 문서로 렌더링한다.
pub fn render_comic_page(title: &str, source_url: Option<&str>, panels: &[ComicPanel]) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    out.push_str("<style>");
    out.push_str(COMIC_CSS);
    out.push_str("</style>\n</head>\n<body>\n");
    out.push_str(&format!(
        "<h1 class=\"comic-header\">{}</h1>\n",
        escape_html(title)
    ));
    if let Some(url) = source_url {
        let url = escape_html(url);
        out.push_str(&format!(
            "<p class=\"comic-source\"><a href=\"{url}\">{url}</a></p>\n"
        ));
    }
    out.push_str("<div class=\"comic-container\">\n");
    for panel in panels {
        out.push_str(&render_panel(panel));
    }
    out.push_str("</div>\n</body>\n</html>\n");
    out
}

/// 패널 카드 하나를 렌더링한다.
pub fn render_panel(panel: &ComicPanel) -> String {
    let mut out = String::new();
    out.push_str("<div class=\"panel visible\">\n<div class=\"panel-content\">\n");
    out.push_str(&format!(
        "<div class=\"icon {}\"></div>\n",
        escape_html(&panel.icon)
    ));
    out.push_str(&format!("<h2>{}</h2>\n", escape_html(&panel.panel.title)));
    if !panel.panel.content.is_empty() {
        out.push_str(&format!(
            "<p>{}</p>\n",
            highlight_content(&panel.panel.content, panel.highlight.as_deref())
        ));
    }
    out.push_str("</div>\n</div>\n");
    out
}

/// 원문에서 강조 단어의 첫 등장을 찾아 앞/단어/뒤를 각각 이스케이프한다.
fn highlight_content(content: &str, highlight: Option<&str>) -> String {
    let Some(word) = highlight.filter(|w| !w.is_empty()) else {
        return escape_html(content);
    };
    let Some(start) = content.find(word) else {
        return escape_html(content);
    };

    let end = start + word.len();
    format!(
        "{}<span class=\"highlight\">{}</span>{}",
        escape_html(&content[..start]),
        escape_html(word),
        escape_html(&content[end..])
    )
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// 토큰 사용량을 콘솔 표기용 문자열로 변환한다.
pub fn format_usage(usage: &TokenUsage) -> String {
    format!(
        "prompt={}, completion={}, total={}",
        opt_num(usage.prompt_tokens),
        opt_num(usage.completion_tokens),
        opt_num(usage.total_tokens)
    )
}

fn opt_num(value: Option<u64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "n/a".to_string())
}
