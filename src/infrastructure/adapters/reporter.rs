//! 콘솔 리포터 포트 구현 어댑터.

use std::io::{self, IsTerminal, Write};
use std::sync::Mutex;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::application::ports::Reporter;

const LABEL_WIDTH: usize = 44;

#[derive(Default)]
struct ArticlePanelState {
    in_article_section: bool,
    rendered_lines: usize,
    // 입력 순서를 유지한다.
    rows: Vec<(String, String, Option<String>)>,
}

impl ArticlePanelState {
    fn upsert(&mut self, article: &str, status: &str, extra: Option<&str>) {
        let extra = extra.map(str::to_string);
        match self.rows.iter_mut().find(|(label, _, _)| label == article) {
            Some(row) => {
                row.1 = status.to_string();
                row.2 = extra;
            }
            None => self
                .rows
                .push((article.to_string(), status.to_string(), extra)),
        }
    }
}

/// 콘솔 전용 리포터 어댑터.
pub struct ConsoleReporter {
    interactive: bool,
    article_panel_enabled: bool,
    state: Mutex<ArticlePanelState>,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleReporter {
    /// stdout이 TTY일 때 실시간 상태판 모드를 활성화한다.
    pub fn new() -> Self {
        Self::with_article_panel(true)
    }

    /// REPL UI와 충돌을 피해야 할 때 기사 상태판을 비활성화할 수 있다.
    pub fn with_article_panel(enabled: bool) -> Self {
        Self {
            interactive: io::stdout().is_terminal(),
            article_panel_enabled: enabled,
            state: Mutex::new(ArticlePanelState::default()),
        }
    }

    fn set_section(&self, name: &str) {
        if !self.interactive {
            return;
        }

        if let Ok(mut state) = self.state.lock() {
            state.in_article_section = name.starts_with("Articles (");
            state.rows.clear();
            state.rendered_lines = 0;
        }
    }

    fn render_article_panel(&self, state: &mut ArticlePanelState) {
        let mut out = io::stdout();
        if state.rendered_lines > 0 {
            let _ = write!(out, "\x1b[{}A\x1b[J", state.rendered_lines);
        }

        let mut lines = Vec::new();
        lines.push(format!("┌{:─^78}┐", " Article Status "));
        for (article, status, extra) in &state.rows {
            let label = pad_to_width(&truncate_to_width(article, LABEL_WIDTH), LABEL_WIDTH);
            // 색 코드가 폭 계산을 깨지 않도록 패딩 후 색을 입힌다.
            let status_colored = colorize_status(&format!("{status:<13}"));
            let extra_text = extra.as_deref().unwrap_or("-");
            lines.push(format!(
                "│ {label} {status_colored} {:<17} │",
                extra_text
            ));
        }
        lines.push(format!("└{}┘", "─".repeat(78)));

        for line in &lines {
            let _ = writeln!(out, "{line}");
        }
        let _ = out.flush();
        state.rendered_lines = lines.len();
    }
}

impl Reporter for ConsoleReporter {
    fn section(&self, name: &str) {
        self.set_section(name);
        println!();
        println!("==================== {} ====================", name);
    }

    fn kv(&self, key: &str, value: &str) {
        println!("{:<12}: {}", key, value);
    }

    fn status(&self, scope: &str, message: &str) {
        println!("[{:<12}] {}", scope, message);
    }

    fn article_status(&self, article: &str, status: &str, extra: Option<&str>) {
        if self.interactive
            && self.article_panel_enabled
            && let Ok(mut state) = self.state.lock()
            && state.in_article_section
        {
            state.upsert(article, status, extra);
            self.render_article_panel(&mut state);
            return;
        }

        match extra {
            Some(extra) => println!("[article] {:<12} {} {}", status, article, extra),
            None => println!("[article] {:<12} {}", status, article),
        }
    }

    fn raw(&self, line: &str) {
        println!("{}", line);
    }
}

fn colorize_status(status: &str) -> String {
    match status.trim_end() {
        "fetching" | "transforming" => format!("\x1b[33m{status}\x1b[0m"),
        "done" => format!("\x1b[32m{status}\x1b[0m"),
        "error" => format!("\x1b[31m{status}\x1b[0m"),
        _ => status.to_string(),
    }
}

/// 표시 폭 기준으로 자르고 잘렸으면 `…`을 붙인다.
fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

fn pad_to_width(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(pad))
}
