//! CLI 명령 파싱 모듈.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::article::RunOptions;

#[derive(Debug, Parser)]
#[command(name = "comicpilot")]
#[command(about = "Turn news articles into comic-style HTML panel pages")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Article URLs
    urls: Vec<String>,

    /// Output directory for generated HTML (default: defaults.output_dir)
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Print panels to stdout, do not write HTML
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show effective merged config and credential resolution
    Config,
    /// Split already-written comic text into panels (no network)
    Segment {
        /// Text file to read; `-` or missing reads stdin
        file: Option<PathBuf>,

        /// Page title (default: file name stem)
        #[arg(long)]
        title: Option<String>,

        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,

        #[arg(long)]
        dry_run: bool,
    },
}

/// 세그먼트 입력 소스.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    Stdin,
    File(PathBuf),
}

#[derive(Debug)]
pub enum CliAction {
    Interactive,
    InspectConfig,
    MakeComic(RunOptions),
    Segment {
        source: TextSource,
        title: Option<String>,
        output_dir: Option<PathBuf>,
        dry_run: bool,
    },
}

impl Cli {
    pub fn parse_action() -> Result<CliAction, String> {
        Cli::parse().into_action()
    }

    fn into_action(self) -> Result<CliAction, String> {
        match self.command {
            Some(Commands::Config) => Ok(CliAction::InspectConfig),
            Some(Commands::Segment {
                file,
                title,
                out,
                dry_run,
            }) => {
                let source = match file {
                    Some(path) if path.as_os_str() != "-" => TextSource::File(path),
                    _ => TextSource::Stdin,
                };
                Ok(CliAction::Segment {
                    source,
                    title,
                    output_dir: out,
                    dry_run,
                })
            }
            None => {
                if self.urls.is_empty() {
                    if self.out.is_some() || self.dry_run {
                        return Err("options require at least one article URL".to_string());
                    }
                    return Ok(CliAction::Interactive);
                }

                Ok(CliAction::MakeComic(RunOptions {
                    urls: self.urls,
                    output_dir: self.out,
                    dry_run: self.dry_run,
                    api_key: None,
                }))
            }
        }
    }
}
