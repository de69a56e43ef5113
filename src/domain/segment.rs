//! 변환된 만화 서술 텍스트를 패널 목록으로 분할한다.
//!
//! 입력이 비어 있거나 형식이 깨져 있어도 실패하지 않으며, 항상 한 개 이상의 패널을 돌려준다.

use serde::{Deserialize, Serialize};

use crate::domain::panel::Panel;
use crate::domain::pool::CyclicPool;
use crate::domain::title::derive_title;

pub const DEFAULT_TITLE_MAX_CHARS: usize = 70;
pub const DEFAULT_MIN_PARAGRAPH_CHUNKS: usize = 5;

/// 패널 제목을 정하는 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleMode {
    /// 규칙 테이블로 청크에서 제목을 뽑는다.
    #[default]
    Heuristic,
    /// 모든 패널에 대체 제목 풀을 순환 적용하고 청크 전체를 본문으로 쓴다.
    Pool,
}

impl TitleMode {
    /// 설정 문자열을 제목 방식으로 변환한다(알 수 없는 값은 heuristic).
    pub fn from_config(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("pool") | Some("fixed") => Self::Pool,
            _ => Self::Heuristic,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Heuristic => "heuristic",
            Self::Pool => "pool",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentOptions {
    /// 제목 후보 최대 길이(문자 수, 미만이어야 함)
    pub title_max_chars: usize,
    /// 빈 줄 분할 결과가 이보다 적으면 줄 단위로 다시 나눈다
    pub min_paragraph_chunks: usize,
    pub title_mode: TitleMode,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            title_max_chars: DEFAULT_TITLE_MAX_CHARS,
            min_paragraph_chunks: DEFAULT_MIN_PARAGRAPH_CHUNKS,
            title_mode: TitleMode::Heuristic,
        }
    }
}

/// 텍스트를 순서가 보존된 패널 목록으로 나눈다.
pub fn segment(text: &str, options: &SegmentOptions, fallback_titles: &CyclicPool) -> Vec<Panel> {
    split_chunks(text, options.min_paragraph_chunks)
        .into_iter()
        .enumerate()
        .map(|(index, chunk)| build_panel(index, chunk, options, fallback_titles))
        .collect()
}

/// 기본 옵션과 기본 대체 제목 풀로 분할한다.
pub fn segment_default(text: &str) -> Vec<Panel> {
    segment(text, &SegmentOptions::default(), &CyclicPool::fallback_titles())
}

/// 빈 줄 기준 분할 → 줄 단위 분할 → 전체 입력 순으로 청크를 만든다.
/// 결과는 항상 한 개 이상이며, 빈 입력이면 빈 문자열 하나를 담는다.
pub fn split_chunks(text: &str, min_paragraph_chunks: usize) -> Vec<&str> {
    let mut chunks = split_paragraphs(text);

    if chunks.len() < min_paragraph_chunks {
        chunks = split_lines(text);
    }

    if chunks.is_empty() {
        chunks.push(text.trim());
    }

    chunks
}

/// 공백만 있는 줄이 하나 이상 이어지는 경계에서 나눈다.
fn split_paragraphs(text: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start: Option<usize> = None;
    let mut end = 0;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        if line.trim().is_empty() {
            if let Some(s) = start.take() {
                chunks.push(&text[s..end]);
            }
            continue;
        }

        if start.is_none() {
            start = Some(line_start);
        }
        end = offset;
    }

    if let Some(s) = start {
        chunks.push(&text[s..end]);
    }

    chunks
        .into_iter()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect()
}

fn split_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

fn build_panel(
    index: usize,
    chunk: &str,
    options: &SegmentOptions,
    fallback_titles: &CyclicPool,
) -> Panel {
    if options.title_mode == TitleMode::Pool {
        return Panel::new(fallback_titles.pick(index), chunk);
    }

    let (split, _rule) = derive_title(chunk, options.title_max_chars);
    let title = if split.title.is_empty() {
        fallback_titles.pick(index).to_string()
    } else {
        split.title
    };

    Panel::new(title, split.content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraphs(n: usize) -> String {
        (1..=n)
            .map(|i| format!("Titolo {i}\nIl paragrafo numero {i} racconta un pezzo della storia."))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    #[test]
    fn empty_input_yields_single_fallback_panel() {
        for input in ["", "   ", "\n\n \t\n"] {
            let panels = segment_default(input);
            assert_eq!(panels.len(), 1, "input {input:?}");
            assert!(panels[0].content.is_empty());
            assert_eq!(panels[0].title, "Avventura Inizia");
        }
    }

    #[test]
    fn non_empty_input_yields_at_least_one_panel() {
        for input in ["x", "una frase", "a\nb", "uno: due", "!!!"] {
            assert!(!segment_default(input).is_empty());
        }
    }

    #[test]
    fn paragraphs_keep_source_order() {
        let panels = segment_default(&paragraphs(6));
        assert_eq!(panels.len(), 6);
        for (i, panel) in panels.iter().enumerate() {
            assert_eq!(panel.title, format!("Titolo {}", i + 1));
            assert!(panel.content.contains(&format!("numero {}", i + 1)));
        }
    }

    #[test]
    fn whitespace_only_lines_count_as_blank() {
        let text = "uno\n  \t\ndue\n\n\n\ntre\n \nquattro\n\ncinque";
        assert_eq!(
            split_chunks(text, 5),
            vec!["uno", "due", "tre", "quattro", "cinque"]
        );
    }

    #[test]
    fn few_paragraphs_fall_back_to_lines() {
        let text = "prima riga\nseconda riga\n\nterza riga\nquarta riga\nquinta riga\n";
        let chunks = split_chunks(text, 5);
        assert_eq!(
            chunks,
            vec![
                "prima riga",
                "seconda riga",
                "terza riga",
                "quarta riga",
                "quinta riga"
            ]
        );
        assert_eq!(segment_default(text).len(), 5);
    }

    #[test]
    fn paragraph_split_is_kept_when_threshold_met() {
        let text = paragraphs(5);
        let chunks = split_chunks(&text, 5);
        assert_eq!(chunks.len(), 5);
        assert!(chunks[0].contains('\n'));
    }

    #[test]
    fn single_paragraph_without_newlines_is_one_chunk() {
        let text = "  Grande notizia: oggi è stato annunciato un risultato storico.  ";
        let panels = segment_default(text);
        assert_eq!(panels.len(), 1);
        assert_eq!(panels[0].title, "Grande notizia");
        assert_eq!(
            panels[0].content,
            "oggi è stato annunciato un risultato storico."
        );
    }

    #[test]
    fn crlf_line_endings_are_handled() {
        let text = "a uno\r\n\r\nb due\r\n\r\nc tre\r\n\r\nd quattro\r\n\r\ne cinque";
        let chunks = split_chunks(text, 5);
        assert_eq!(chunks, vec!["a uno", "b due", "c tre", "d quattro", "e cinque"]);
    }

    #[test]
    fn custom_threshold_keeps_paragraphs() {
        let text = "Primo\nriga a\n\nSecondo\nriga b";
        assert_eq!(split_chunks(text, 2).len(), 2);
        assert_eq!(split_chunks(text, 3).len(), 4);
    }

    #[test]
    fn pool_mode_assigns_cyclic_titles_and_whole_chunks() {
        let options = SegmentOptions {
            title_mode: TitleMode::Pool,
            ..SegmentOptions::default()
        };
        let pool = CyclicPool::new(["A", "B"], &[]);
        let panels = segment(&paragraphs(5), &options, &pool);
        let titles: Vec<&str> = panels.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "A", "B", "A"]);
        assert!(panels[0].content.starts_with("Titolo 1\n"));
    }

    #[test]
    fn segmentation_is_deterministic() {
        let text = format!("{}\n\nbreve", paragraphs(5));
        assert_eq!(segment_default(&text), segment_default(&text));
    }

    #[test]
    fn title_mode_parses_config_values() {
        assert_eq!(TitleMode::from_config(Some(" Pool ")), TitleMode::Pool);
        assert_eq!(TitleMode::from_config(Some("other")), TitleMode::Heuristic);
        assert_eq!(TitleMode::from_config(None), TitleMode::Heuristic);
    }
}
