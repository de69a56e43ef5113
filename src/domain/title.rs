//! 청크에서 제목/본문을 분리하는 규칙 테이블.
//!
//! 규칙은 `TITLE_RULES` 순서대로 시도하며 처음 일치한 규칙이 이긴다.
//! 마지막 `whole_chunk` 규칙은 항상 일치한다.

/// 제목 끝에 오면 제목 후보에서 제외하는 문장부호.
pub const TERMINAL_PUNCTUATION: [char; 5] = ['.', '!', '?', ':', ';'];

/// `leading_words` 규칙이 제목으로 쓰는 단어 수.
pub const LEADING_WORD_COUNT: usize = 5;

/// 규칙 하나가 만들어내는 제목/본문 쌍.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleSplit {
    pub title: String,
    pub content: String,
}

impl TitleSplit {
    fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// 이름이 붙은 제목 추출 규칙.
pub struct TitleRule {
    pub name: &'static str,
    pub apply: fn(&str, usize) -> Option<TitleSplit>,
}

/// 우선순위 순서의 규칙 테이블.
pub const TITLE_RULES: [TitleRule; 4] = [
    TitleRule {
        name: "first_line",
        apply: first_line,
    },
    TitleRule {
        name: "colon",
        apply: colon,
    },
    TitleRule {
        name: "leading_words",
        apply: leading_words,
    },
    TitleRule {
        name: "whole_chunk",
        apply: whole_chunk,
    },
];

/// 규칙 테이블을 순서대로 적용해 제목/본문을 구한다.
/// 반환값의 두 번째 요소는 일치한 규칙 이름이다.
pub fn derive_title(chunk: &str, max_title_chars: usize) -> (TitleSplit, &'static str) {
    for rule in &TITLE_RULES {
        if let Some(split) = (rule.apply)(chunk, max_title_chars) {
            return (split, rule.name);
        }
    }

    // whole_chunk가 전역 규칙이므로 도달하지 않는다.
    (whole_chunk_split(chunk), "whole_chunk")
}

/// 첫 줄이 짧고 문장부호로 끝나지 않으면 제목으로 쓴다.
pub fn first_line(chunk: &str, max_title_chars: usize) -> Option<TitleSplit> {
    let (head, tail) = chunk.split_once('\n')?;
    let candidate = head.trim();
    if candidate.is_empty() || candidate.chars().count() >= max_title_chars {
        return None;
    }
    if candidate.ends_with(|c: char| TERMINAL_PUNCTUATION.contains(&c)) {
        return None;
    }

    Some(TitleSplit::new(candidate, tail.trim()))
}

/// 첫 콜론 앞부분이 짧으면 제목으로 쓴다.
pub fn colon(chunk: &str, max_title_chars: usize) -> Option<TitleSplit> {
    let (head, tail) = chunk.split_once(':')?;
    let candidate = head.trim();
    if candidate.is_empty() || candidate.chars().count() >= max_title_chars {
        return None;
    }

    Some(TitleSplit::new(candidate, tail.trim()))
}

/// 단어가 충분하면 앞 다섯 단어를 제목으로 쓴다.
pub fn leading_words(chunk: &str, _max_title_chars: usize) -> Option<TitleSplit> {
    let words: Vec<&str> = chunk.split_whitespace().collect();
    if words.len() < LEADING_WORD_COUNT {
        return None;
    }

    Some(TitleSplit::new(
        words[..LEADING_WORD_COUNT].join(" "),
        words[LEADING_WORD_COUNT..].join(" "),
    ))
}

pub fn whole_chunk(chunk: &str, _max_title_chars: usize) -> Option<TitleSplit> {
    Some(whole_chunk_split(chunk))
}

fn whole_chunk_split(chunk: &str) -> TitleSplit {
    TitleSplit::new(chunk.trim(), "")
}
