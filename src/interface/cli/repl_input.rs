//! REPL 입력 처리기.
//! `/`로 시작하면 입력 중 실시간으로 명령 추천을 표시한다.

use std::env;
use std::io::{self, IsTerminal, Write};

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::style::{Color, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, ClearType};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::domain::article::ArticleTarget;

struct Suggestion {
    slash: &'static str,
    description: &'static str,
    usage: &'static str,
}

const SUGGESTIONS: [Suggestion; 4] = [
    Suggestion {
        slash: "/comic",
        description: "turn article URLs into comic pages",
        usage: "/comic <url>... [--dry-run]",
    },
    Suggestion {
        slash: "/key",
        description: "set API key for this session",
        usage: "/key [clear]",
    },
    Suggestion {
        slash: "/config",
        description: "show effective merged config",
        usage: "/config",
    },
    Suggestion {
        slash: "/exit",
        description: "exit interactive shell",
        usage: "/exit",
    },
];
pub(crate) const COMIC_USAGE: &str = "/comic <url>... [--dry-run]";
// 입력 영역 기본 높이: 상단 구분선 + 입력줄 + 하단 구분선
const PANEL_BASE_HEIGHT: usize = 3;

/// REPL 한 줄 입력을 읽는다.
/// - TTY + 지원 터미널: 실시간 추천 + 방향키 선택
/// - non-TTY/미지원 터미널: 일반 라인 입력
pub fn read_repl_input(prefill: Option<&str>) -> Result<Option<String>> {
    let initial = prefill.unwrap_or_default();

    if !supports_interactive_input() {
        return read_line_fallback(initial);
    }

    match read_line_interactive(initial) {
        Ok(v) => Ok(v),
        Err(_) => read_line_fallback(initial),
    }
}

/// 입력 문자를 화면에 표시하지 않고 한 줄을 읽는다. 취소되면 `None`.
pub fn read_secret(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;

    if !supports_interactive_input() {
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        return Ok(Some(trim_newline(line)));
    }

    let mut stdout = io::stdout();
    let _guard = InputGuard::enter(&mut stdout)?;
    let mut secret = String::new();

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Enter => break,
            KeyCode::Esc => {
                write!(stdout, "\r\n")?;
                return Ok(None);
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                write!(stdout, "\r\n")?;
                return Ok(None);
            }
            KeyCode::Backspace => {
                secret.pop();
            }
            KeyCode::Char(ch) => secret.push(ch),
            _ => {}
        }
    }

    write!(stdout, "\r\n")?;
    stdout.flush()?;
    Ok(Some(secret))
}

fn supports_interactive_input() -> bool {
    if !io::stdout().is_terminal() || !io::stdin().is_terminal() {
        return false;
    }

    // dumb 터미널에서는 제어 시퀀스 기반 UI를 비활성화한다.
    if let Ok(term) = env::var("TERM") && term.eq_ignore_ascii_case("dumb") {
        return false;
    }

    true
}

fn read_line_fallback(initial: &str) -> Result<Option<String>> {
    print!("comicpilot> {initial}");
    io::stdout().flush()?;

    let mut line = String::new();
    let read = io::stdin().read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }

    let typed = trim_newline(line);
    if initial.is_empty() || typed.starts_with('/') || typed.starts_with(initial) {
        return Ok(Some(typed));
    }

    Ok(Some(format!("{initial}{typed}")))
}

fn read_line_interactive(initial: &str) -> Result<Option<String>> {
    let mut stdout = io::stdout();
    let _guard = InputGuard::enter(&mut stdout)?;

    let mut input = initial.to_string();
    let mut cursor_chars = input.chars().count();
    let mut selected_idx = 0;

    loop {
        let suggestions = match_suggestions(&input);
        if suggestions.is_empty() {
            selected_idx = 0;
        } else if selected_idx >= suggestions.len() {
            selected_idx = suggestions.len() - 1;
        }

        render_frame(&mut stdout, &input, cursor_chars, &suggestions, selected_idx)?;

        match event::read()? {
            Event::Paste(text) => {
                for ch in text.chars().filter(|c| *c != '\n' && *c != '\r') {
                    insert_char_at(&mut input, cursor_chars, ch);
                    cursor_chars += 1;
                }
            }
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match key.code {
                    KeyCode::Enter => {
                        // 인자가 필요한 명령은 즉시 실행하지 않고 인자 입력 상태로 확장한다.
                        if let Some(expanded) = expand_input(&input, &suggestions, selected_idx) {
                            input = expanded;
                            cursor_chars = input.chars().count();
                            continue;
                        }
                        let final_input = finalize_input(&input, &suggestions, selected_idx);
                        clear_panel_for_output(&mut stdout)?;
                        return Ok(Some(final_input));
                    }
                    KeyCode::Backspace => {
                        if cursor_chars > 0 {
                            remove_char_at(&mut input, cursor_chars - 1);
                            cursor_chars -= 1;
                        }
                    }
                    KeyCode::Delete => {
                        if cursor_chars < input.chars().count() {
                            remove_char_at(&mut input, cursor_chars);
                        }
                    }
                    KeyCode::Left => cursor_chars = cursor_chars.saturating_sub(1),
                    KeyCode::Right => {
                        cursor_chars = (cursor_chars + 1).min(input.chars().count());
                    }
                    KeyCode::Home => cursor_chars = 0,
                    KeyCode::End => cursor_chars = input.chars().count(),
                    KeyCode::Up => {
                        if !suggestions.is_empty() {
                            selected_idx = selected_idx.saturating_sub(1);
                        }
                    }
                    KeyCode::Down => {
                        if !suggestions.is_empty() {
                            selected_idx = (selected_idx + 1).min(suggestions.len() - 1);
                        }
                    }
                    KeyCode::Tab => {
                        if !suggestions.is_empty() {
                            input = suggestions[selected_idx].slash.to_string();
                            cursor_chars = input.chars().count();
                        }
                    }
                    KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        clear_panel_for_output(&mut stdout)?;
                        return Ok(None);
                    }
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        clear_panel_for_output(&mut stdout)?;
                        return Ok(Some("/exit".to_string()));
                    }
                    KeyCode::Char(ch) => {
                        if !key.modifiers.contains(KeyModifiers::CONTROL)
                            && !key.modifiers.contains(KeyModifiers::ALT)
                        {
                            insert_char_at(&mut input, cursor_chars, ch);
                            cursor_chars += 1;
                        }
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }
}

fn match_suggestions(input: &str) -> Vec<&'static Suggestion> {
    if !input.starts_with('/') || input.contains(' ') {
        return Vec::new();
    }

    let q = input.to_ascii_lowercase();
    SUGGESTIONS
        .iter()
        .filter(|s| s.slash.starts_with(&q))
        .collect()
}

fn finalize_input(input: &str, suggestions: &[&Suggestion], selected_idx: usize) -> String {
    if input.starts_with('/') && !input.contains(' ') && !suggestions.is_empty() {
        return suggestions[selected_idx].slash.to_string();
    }
    input.to_string()
}

/// `/comic` 단독 입력 시 공백을 추가해 URL 입력 상태로 확장한다.
fn expand_input(input: &str, suggestions: &[&Suggestion], selected_idx: usize) -> Option<String> {
    if input.contains(' ') {
        return None;
    }

    if input == "/comic" {
        return Some("/comic ".to_string());
    }

    if input.starts_with('/')
        && !suggestions.is_empty()
        && suggestions[selected_idx].slash == "/comic"
    {
        return Some("/comic ".to_string());
    }

    None
}

/// 입력 중인 명령의 실시간 힌트를 반환한다.
fn realtime_hint(input: &str) -> Option<(Color, String)> {
    let trimmed = input.trim_start();
    if let Some(rest) = trimmed.strip_prefix("/comic") {
        if !rest.is_empty() && !rest.starts_with(' ') {
            return None;
        }
        return Some(comic_args_hint(rest));
    }

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return Some(comic_args_hint(trimmed));
    }

    None
}

fn comic_args_hint(rest: &str) -> (Color, String) {
    let mut urls = 0usize;
    for arg in rest.split_whitespace() {
        match arg {
            "--dry-run" => {}
            _ if arg.starts_with("--") => {
                return (Color::Red, format!("error: unknown option `{arg}`"));
            }
            _ => {
                if ArticleTarget::parse(arg).is_err() {
                    return (Color::Red, format!("error: invalid URL `{arg}` (http/https only)"));
                }
                urls += 1;
            }
        }
    }

    match urls {
        0 => (Color::Yellow, format!("hint: {COMIC_USAGE}")),
        1 => (Color::Green, "ready: press Enter to run".to_string()),
        n => (Color::Green, format!("ready: {n} articles, press Enter to run")),
    }
}

fn render_frame(
    stdout: &mut io::Stdout,
    input: &str,
    cursor_chars: usize,
    suggestions: &[&Suggestion],
    selected_idx: usize,
) -> Result<()> {
    let (w, h) = terminal::size().unwrap_or((120, 40));
    let width = (w as usize).max(20);
    let total_rows = h as usize;

    let hint = realtime_hint(input);
    let extra_rows = usize::from(hint.is_some()) + suggestions.len();
    let panel_top = total_rows.saturating_sub(PANEL_BASE_HEIGHT + extra_rows);
    let input_row = panel_top + 1;

    // 이전 프레임 잔상을 지우기 위해 가능한 최대 영역을 클리어한다.
    let max_panel_height = PANEL_BASE_HEIGHT + 1 + SUGGESTIONS.len();
    for row in total_rows.saturating_sub(max_panel_height)..total_rows {
        execute!(
            stdout,
            cursor::MoveTo(0, row as u16),
            terminal::Clear(ClearType::CurrentLine)
        )?;
    }

    let divider = "─".repeat(width);
    draw_line_at(stdout, panel_top as u16, &divider, width, Color::White, true)?;
    if input.is_empty() {
        let placeholder = render_prompt_line("/ commands · paste an article URL", width);
        draw_line_at(stdout, input_row as u16, &placeholder, width, Color::Grey, true)?;
    } else {
        let line = render_prompt_line(input, width);
        draw_line_at(stdout, input_row as u16, &line, width, Color::White, true)?;
    }
    draw_line_at(stdout, (panel_top + 2) as u16, &divider, width, Color::White, true)?;

    let mut next_row = panel_top + 3;
    if let Some((color, line)) = hint {
        draw_line_at(stdout, next_row as u16, &line, width, color, false)?;
        next_row += 1;
    }

    for (idx, item) in suggestions.iter().enumerate() {
        let marker = if idx == selected_idx { ">" } else { " " };
        let line = format!(
            "{marker} {:<8} - {} | usage: {}",
            item.slash, item.description, item.usage
        );
        draw_line_at(stdout, next_row as u16, &line, width, Color::White, false)?;
        next_row += 1;
    }

    let col = prompt_cursor_col(input, cursor_chars, width) as u16;
    execute!(stdout, cursor::MoveTo(col, input_row as u16), cursor::Show)?;
    stdout.flush()?;
    Ok(())
}

fn render_prompt_line(input: &str, width: usize) -> String {
    let prefix = "> ";
    let available = width.saturating_sub(prefix.width());
    format!("{prefix}{}", tail_with_ellipsis(input, available))
}

fn prompt_cursor_col(input: &str, cursor_chars: usize, width: usize) -> usize {
    let prefix_width = "> ".width();
    let available = width.saturating_sub(prefix_width);

    if input.width() <= available {
        let before: String = input.chars().take(cursor_chars).collect();
        return (prefix_width + before.width()).min(width.saturating_sub(1));
    }

    // 넘친 입력은 꼬리만 보이므로 커서를 끝에 둔다.
    (prefix_width + tail_with_ellipsis(input, available).width()).min(width.saturating_sub(1))
}

fn tail_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let target = max_width - 3;
    let mut tail_rev = String::new();
    let mut used = 0usize;
    for ch in text.chars().rev() {
        let cw = ch.width().unwrap_or(0);
        if used + cw > target {
            break;
        }
        tail_rev.push(ch);
        used += cw;
    }

    let tail: String = tail_rev.chars().rev().collect();
    format!("...{tail}")
}

fn clip_line(line: &str, max_width: usize) -> String {
    if line.width() <= max_width {
        return line.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let mut out = String::new();
    let mut used = 0usize;
    for ch in line.chars() {
        let cw = ch.width().unwrap_or(0);
        if used + cw > max_width - 3 {
            break;
        }
        out.push(ch);
        used += cw;
    }
    out.push_str("...");
    out
}

fn draw_line_at(
    stdout: &mut io::Stdout,
    row: u16,
    text: &str,
    width: usize,
    fg: Color,
    panel_background: bool,
) -> Result<()> {
    execute!(stdout, cursor::MoveTo(0, row))?;
    if panel_background {
        execute!(stdout, SetBackgroundColor(Color::DarkGrey))?;
    }
    execute!(
        stdout,
        SetForegroundColor(fg),
        terminal::Clear(ClearType::CurrentLine)
    )?;

    let clipped = clip_line(text, width);
    let pad = width.saturating_sub(clipped.width());
    write!(stdout, "{clipped}{}", " ".repeat(pad))?;
    execute!(stdout, ResetColor)?;
    Ok(())
}

fn clear_panel_for_output(stdout: &mut io::Stdout) -> Result<()> {
    // 명령 실행 로그는 항상 상단에서 시작하도록 화면을 정리한다.
    execute!(
        stdout,
        cursor::MoveTo(0, 0),
        terminal::Clear(ClearType::All),
        ResetColor,
        cursor::Show
    )?;
    stdout.flush()?;
    Ok(())
}

fn trim_newline(mut s: String) -> String {
    while matches!(s.chars().last(), Some('\n' | '\r')) {
        s.pop();
    }
    s
}

struct InputGuard;

impl InputGuard {
    fn enter(stdout: &mut io::Stdout) -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(stdout, cursor::Show)?;
        Ok(Self)
    }
}

impl Drop for InputGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show, ResetColor);
        let _ = terminal::disable_raw_mode();
        let _ = stdout.flush();
    }
}

fn insert_char_at(input: &mut String, char_idx: usize, ch: char) {
    let byte_idx = byte_index_at_char(input, char_idx);
    input.insert(byte_idx, ch);
}

fn remove_char_at(input: &mut String, char_idx: usize) {
    let start = byte_index_at_char(input, char_idx);
    let end = byte_index_at_char(input, char_idx + 1);
    if start < end {
        input.replace_range(start..end, "");
    }
}

fn byte_index_at_char(input: &str, char_idx: usize) -> usize {
    input
        .char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(input.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestions_filter_by_prefix() {
        let all = match_suggestions("/");
        assert_eq!(all.len(), SUGGESTIONS.len());

        let comic: Vec<&str> = match_suggestions("/co").iter().map(|s| s.slash).collect();
        assert_eq!(comic, vec!["/comic", "/config"]);
        assert!(match_suggestions("/comic https://x.it").is_empty());
        assert!(match_suggestions("https://x.it").is_empty());
    }

    #[test]
    fn bare_comic_expands_for_arguments() {
        let suggestions = match_suggestions("/comic");
        assert_eq!(
            expand_input("/comic", &suggestions, 0).as_deref(),
            Some("/comic ")
        );
        assert!(expand_input("/comic https://x.it", &[], 0).is_none());
    }

    #[test]
    fn comic_hint_validates_urls() {
        let (color, _) = comic_args_hint(" https://x.it/a https://y.it/b");
        assert_eq!(color, Color::Green);
        let (color, msg) = comic_args_hint(" ftp://x.it/a");
        assert_eq!(color, Color::Red);
        assert!(msg.contains("invalid URL"));
        let (color, _) = comic_args_hint(" --force");
        assert_eq!(color, Color::Red);
        assert!(realtime_hint("https://x.it/a").is_some());
        assert!(realtime_hint("/config").is_none());
    }

    #[test]
    fn char_editing_respects_multibyte() {
        let mut input = "città".to_string();
        insert_char_at(&mut input, 5, '!');
        assert_eq!(input, "città!");
        remove_char_at(&mut input, 4);
        assert_eq!(input, "citt!");
    }

    #[test]
    fn tail_keeps_end_of_long_input() {
        assert_eq!(tail_with_ellipsis("abcdefghij", 6), "...hij");
        assert_eq!(clip_line("abcdefghij", 6), "abc...");
    }
}
