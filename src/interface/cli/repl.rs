//! `comicpilot` 대화형 쉘(REPL) 인터페이스.

use std::io::{self, IsTerminal, Write};

use anyhow::Result;
use serde_json::Value;

use crate::application::usecases::make_comic::ComicOutcome;
use crate::domain::article::RunOptions;
use crate::interface::cli::composition::AppComposition;
use crate::interface::cli::repl_input::{COMIC_USAGE, read_repl_input, read_secret};

/// 쉘 세션 상태. API key는 메모리에만 보관한다.
#[derive(Default)]
struct ReplSession {
    api_key: Option<String>,
}

/// 대화형 입력으로 `/command`를 처리한다.
pub async fn run_repl(composition: &AppComposition) -> Result<()> {
    print_welcome(composition);
    io::stdout().flush()?;
    let mut session = ReplSession::default();
    let mut next_prefill: Option<String> = None;

    loop {
        let prefill = next_prefill.take();
        let Some(raw_input) = read_repl_input(prefill.as_deref())? else {
            println!();
            break;
        };
        let input = raw_input.trim();
        if input.is_empty() {
            continue;
        }

        match parse_repl_command(input) {
            Ok(ReplCommand::Exit) => break,
            Ok(ReplCommand::ComicNeedsArgs) => {
                next_prefill = Some("/comic ".to_string());
            }
            Ok(cmd) => {
                if let Err(err) = execute_command(composition, &mut session, cmd).await {
                    eprintln!("error: {err:#}");
                }
            }
            Err(msg) => {
                eprintln!("error: {msg}");
                eprintln!("hint: start typing / for command suggestions, or paste an article URL");
            }
        }
    }

    Ok(())
}

#[derive(Debug, PartialEq)]
enum ReplCommand {
    Exit,
    InspectConfig,
    SetKey,
    ClearKey,
    /// `/comic`만 입력된 상태. 다음 입력 라운드에 `/comic `을 프리필한다.
    ComicNeedsArgs,
    Comic { urls: Vec<String>, dry_run: bool },
}

async fn execute_command(
    composition: &AppComposition,
    session: &mut ReplSession,
    command: ReplCommand,
) -> Result<()> {
    match command {
        ReplCommand::Exit | ReplCommand::ComicNeedsArgs => Ok(()),
        ReplCommand::InspectConfig => {
            let json = composition.inspect_config_usecase().execute()?;
            println!("{json}");
            Ok(())
        }
        ReplCommand::SetKey => {
            match read_secret("API key (hidden, session only): ")? {
                Some(key) if !key.trim().is_empty() => {
                    session.api_key = Some(key.trim().to_string());
                    println!("API key set for this session");
                }
                _ => println!("API key unchanged"),
            }
            Ok(())
        }
        ReplCommand::ClearKey => {
            session.api_key = None;
            println!("session API key cleared");
            Ok(())
        }
        ReplCommand::Comic { urls, dry_run } => {
            let options = RunOptions {
                urls,
                output_dir: None,
                dry_run,
                api_key: session.api_key.clone(),
            };
            let outcomes = composition.make_comic_usecase().execute(options).await?;
            print_outcomes(&outcomes);
            Ok(())
        }
    }
}

fn parse_repl_command(input: &str) -> Result<ReplCommand, String> {
    // 붙여넣은 URL은 `/comic <url>`로 취급한다.
    if input.starts_with("http://") || input.starts_with("https://") {
        let args: Vec<&str> = input.split_whitespace().collect();
        return parse_comic_args(&args);
    }

    if !input.starts_with('/') {
        return Err(format!("slash command or article URL expected. example: {COMIC_USAGE}"));
    }

    let parts: Vec<&str> = input.split_whitespace().collect();
    let Some((command, args)) = parts.split_first() else {
        return Err("empty command".to_string());
    };

    match *command {
        "/exit" | "/quit" => Ok(ReplCommand::Exit),
        "/config" => {
            if args.is_empty() {
                Ok(ReplCommand::InspectConfig)
            } else {
                Err("usage: /config".to_string())
            }
        }
        "/key" => match args {
            [] => Ok(ReplCommand::SetKey),
            ["clear"] => Ok(ReplCommand::ClearKey),
            _ => Err("usage: /key [clear]".to_string()),
        },
        "/comic" => {
            if args.is_empty() {
                Ok(ReplCommand::ComicNeedsArgs)
            } else {
                parse_comic_args(args)
            }
        }
        other => Err(format!("unknown command: {other}")),
    }
}

fn parse_comic_args(args: &[&str]) -> Result<ReplCommand, String> {
    let mut urls = Vec::new();
    let mut dry_run = false;

    for arg in args {
        match *arg {
            "--dry-run" => dry_run = true,
            _ if arg.starts_with("--") => return Err(format!("unknown option: {arg}")),
            _ => urls.push((*arg).to_string()),
        }
    }

    if urls.is_empty() {
        return Err(format!("usage: {COMIC_USAGE}"));
    }

    Ok(ReplCommand::Comic { urls, dry_run })
}

fn print_outcomes(outcomes: &[ComicOutcome]) {
    println!();
    for outcome in outcomes {
        match outcome {
            ComicOutcome::Written { url, path, panels } => {
                println!("  ok      {url} -> {} ({panels} panels)", path.display());
            }
            ComicOutcome::Previewed { url, panels } => {
                println!("  preview {url} ({panels} panels)");
            }
            ComicOutcome::Failed { url, error } => {
                println!("  failed  {url}: {error}");
            }
        }
    }
}

fn print_welcome(composition: &AppComposition) {
    let interactive = io::stdout().is_terminal();
    if interactive {
        // 대화형 터미널에서는 시작 화면을 지우고 배너를 출력한다.
        print!("\x1b[2J\x1b[H");
    }

    let title = paint("ComicPilot interactive shell", "1;36", interactive);
    let subtitle = paint("news articles as comic panels", "2;37", interactive);
    let cmd_comic = paint(COMIC_USAGE, "1;35", interactive);
    let cmd_key = paint("/key [clear]", "1;33", interactive);
    let cmd_config = paint("/config", "1;32", interactive);
    let cmd_exit = paint("/exit", "1;31", interactive);

    println!("+------------------------------------------------------------+");
    println!("| {:<58} |", title);
    println!("| {:<58} |", subtitle);
    println!("+------------------------------------------------------------+");
    println!("| Status Dashboard                                           |");
    for line in build_startup_dashboard_lines(composition) {
        println!("| {:<58} |", fit_box_line(&line, 58));
    }
    println!("+------------------------------------------------------------+");
    println!("| Quick start                                                |");
    println!("|  1) {:<54} |", cmd_comic);
    println!("|  2) {:<54} |", cmd_key);
    println!("|  3) {:<54} |", cmd_config);
    println!("|  4) {:<54} |", cmd_exit);
    println!("+------------------------------------------------------------+");
    println!();
}

fn paint(text: &str, ansi: &str, interactive: bool) -> String {
    if interactive {
        format!("\x1b[{ansi}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

fn build_startup_dashboard_lines(composition: &AppComposition) -> Vec<String> {
    let inspection_json = match composition.inspect_config_usecase().execute() {
        Ok(raw) => raw,
        Err(err) => {
            return vec![
                "Config: error".to_string(),
                format!("detail: {err}"),
                "hint: run `/config` to inspect and fix".to_string(),
            ];
        }
    };

    let Ok(value) = serde_json::from_str::<Value>(&inspection_json) else {
        return vec!["Config: loaded (dashboard parse fallback)".to_string()];
    };

    dashboard_lines(&value)
}

fn dashboard_lines(value: &Value) -> Vec<String> {
    let str_at = |pointer: &str, default: &'static str| {
        value
            .pointer(pointer)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    };

    let loaded_count = value
        .get("loaded_paths")
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0);
    let mut lines = vec![format!("Config: ok (loaded files: {loaded_count})")];
    lines.push(format!(
        "Output dir: {}",
        str_at("/effective_defaults/output_dir", "comics")
    ));
    lines.push(format!(
        "Title mode: {}",
        str_at("/effective_defaults/title_mode", "heuristic")
    ));

    let enabled = value
        .pointer("/provider/enabled")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let resolved = value
        .pointer("/provider/api_key_resolved")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let model = str_at("/provider/model", "-");
    let state = if enabled { "enabled" } else { "disabled" };
    let key = if resolved {
        str_at("/provider/api_key_source", "resolved")
    } else {
        "missing (use /key)".to_string()
    };
    lines.push(format!("Provider: {state} {model}"));
    lines.push(format!("API key: {key}"));

    lines
}

fn fit_box_line(text: &str, width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= width {
        return text.to_string();
    }

    if width <= 3 {
        return ".".repeat(width);
    }

    let head: String = chars.into_iter().take(width - 3).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn pasted_url_runs_comic() {
        assert_eq!(
            parse_repl_command("https://x.it/a --dry-run"),
            Ok(ReplCommand::Comic {
                urls: vec!["https://x.it/a".to_string()],
                dry_run: true,
            })
        );
    }

    #[test]
    fn comic_accepts_many_urls() {
        let Ok(ReplCommand::Comic { urls, dry_run }) =
            parse_repl_command("/comic https://a.it/1 https://b.it/2")
        else {
            panic!("expected comic command");
        };
        assert_eq!(urls.len(), 2);
        assert!(!dry_run);
    }

    #[test]
    fn bare_comic_asks_for_arguments() {
        assert_eq!(parse_repl_command("/comic"), Ok(ReplCommand::ComicNeedsArgs));
        assert!(parse_repl_command("/comic --dry-run").is_err());
        assert!(parse_repl_command("/comic https://a.it --force").is_err());
    }

    #[test]
    fn key_and_exit_commands() {
        assert_eq!(parse_repl_command("/key"), Ok(ReplCommand::SetKey));
        assert_eq!(parse_repl_command("/key clear"), Ok(ReplCommand::ClearKey));
        assert!(parse_repl_command("/key abc").is_err());
        assert_eq!(parse_repl_command("/quit"), Ok(ReplCommand::Exit));
        assert_eq!(parse_repl_command("/config"), Ok(ReplCommand::InspectConfig));
        assert!(parse_repl_command("hello").is_err());
        assert!(parse_repl_command("/nope").is_err());
    }

    #[test]
    fn dashboard_reports_missing_key() {
        let lines = dashboard_lines(&json!({
            "loaded_paths": ["/tmp/a.json"],
            "effective_defaults": { "output_dir": "out", "title_mode": "pool" },
            "provider": { "enabled": true, "model": "m", "api_key_resolved": false }
        }));
        assert_eq!(lines[0], "Config: ok (loaded files: 1)");
        assert!(lines.contains(&"Output dir: out".to_string()));
        assert!(lines.contains(&"Title mode: pool".to_string()));
        assert!(lines.contains(&"Provider: enabled m".to_string()));
        assert!(lines.contains(&"API key: missing (use /key)".to_string()));
    }

    #[test]
    fn fit_box_line_truncates() {
        assert_eq!(fit_box_line("abcdef", 5), "ab...");
        assert_eq!(fit_box_line("abc", 5), "abc");
    }
}
