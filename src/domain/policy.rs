//! 도메인 정책(프롬프트 구성, 모델 출력 정리, 출력 파일 이름 규칙).

use std::collections::HashSet;

use percent_encoding::percent_decode_str;

use crate::domain::article::{Article, ArticleTarget};

pub const DEFAULT_COMIC_PROMPT: &str = "Riscrivi il seguente articolo in formato fumettistico, come se un narratore stesse raccontando la storia in maniera informativa e coinvolgente, destinata a un pubblico giovane. Suddividi il testo in numerosi pannelli. Per ciascun pannello non includere un titolo all'inizio del paragrafo, perché il titolo verrà assegnato in seguito in modo unico. Rendi il testo del pannello completo e coerente. Non inserire numerazioni, simboli o markdown extra.";

const ARTICLE_TEXT_HEADER: &str = "Testo articolo:\n\n";
const MAX_FILE_STEM_CHARS: usize = 60;

/// 기사 본문을 문자 경계에서 자른다. 잘렸으면 두 번째 값이 true.
pub fn truncate_article_text(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => (&text[..idx], true),
        None => (text, false),
    }
}

/// 기본 지시문 + 기사 본문으로 변환 프롬프트를 만든다.
pub fn build_comic_prompt(base_prompt: &str, article_text: &str) -> String {
    let mut out = String::new();
    out.push_str(base_prompt.trim());
    out.push(' ');
    out.push_str(ARTICLE_TEXT_HEADER);
    out.push_str(article_text.trim());
    out
}

/// 모델 출력에서 굵게 표시(`**`)를 지우고 앞뒤 공백을 정리한다.
pub fn clean_model_output(raw: &str) -> String {
    raw.replace("**", "").trim().to_string()
}

/// 페이지 헤더에 쓸 제목. 기사 제목이 비어 있으면 호스트를 쓴다.
pub fn page_title(article: &Article, target: &ArticleTarget) -> String {
    let title = article.title.trim();
    if title.is_empty() {
        target.host().to_string()
    } else {
        title.to_string()
    }
}

/// URL 마지막 경로 조각으로 `<slug>.html` 파일 이름을 만든다.
/// 조각이 없거나 slug가 비면 호스트로 대체한다.
pub fn output_file_name(target: &ArticleTarget) -> String {
    let from_path = target
        .url()
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
        .map(|segment| slugify(&percent_decode_str(segment).decode_utf8_lossy()))
        .filter(|slug| !slug.is_empty());

    let stem = from_path.unwrap_or_else(|| slugify(target.host()));
    let stem = if stem.is_empty() {
        "comic".to_string()
    } else {
        stem
    };
    format!("{stem}.html")
}

/// 같은 실행에서 이미 쓴 이름과 겹치면 `<stem>-2.html`, `<stem>-3.html` 순으로 바꾼다.
pub fn unique_file_name(file_name: &str, used: &mut HashSet<String>) -> String {
    let stem = file_name.strip_suffix(".html").unwrap_or(file_name);
    let mut candidate = file_name.to_string();
    let mut n = 2;
    while used.contains(&candidate) {
        candidate = format!("{stem}-{n}.html");
        n += 1;
    }
    used.insert(candidate.clone());
    candidate
}

/// 소문자화 후 영숫자가 아닌 연속 구간을 `-` 하나로 바꾼다.
pub fn slugify(input: &str) -> String {
    let mut out = String::new();
    let mut pending_dash = false;

    for ch in strip_html_extension(input).chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    out.chars()
        .take(MAX_FILE_STEM_CHARS)
        .collect::<String>()
        .trim_end_matches('-')
        .to_string()
}

/// 대소문자 구분 없이 `.html`/`.htm` 확장자를 뗀다.
fn strip_html_extension(input: &str) -> &str {
    for ext in [".html", ".htm"] {
        if let Some(idx) = input.len().checked_sub(ext.len())
            && input.is_char_boundary(idx)
            && input[idx..].eq_ignore_ascii_case(ext)
        {
            return &input[..idx];
        }
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(url: &str) -> ArticleTarget {
        ArticleTarget::parse(url).unwrap()
    }

    #[test]
    fn truncates_on_char_boundary() {
        let (text, truncated) = truncate_article_text("àèìòù", 3);
        assert_eq!(text, "àèì");
        assert!(truncated);

        let (text, truncated) = truncate_article_text("breve", 10);
        assert_eq!(text, "breve");
        assert!(!truncated);
    }

    #[test]
    fn prompt_ends_with_article_text() {
        let prompt = build_comic_prompt("Riscrivi.", "  Il testo.  ");
        assert_eq!(prompt, "Riscrivi. Testo articolo:\n\nIl testo.");
    }

    #[test]
    fn cleanup_removes_bold_markers() {
        assert_eq!(
            clean_model_output("  **Titolo**\n\nTesto **forte**.\n"),
            "Titolo\n\nTesto forte."
        );
    }

    #[test]
    fn file_name_uses_last_path_segment() {
        assert_eq!(
            output_file_name(&target("https://news.example.it/tech/Robot_Che-Cammina.html")),
            "robot-che-cammina.html"
        );
        assert_eq!(
            output_file_name(&target("https://news.example.it/2024/05/perch%C3%A9-oggi/")),
            "perché-oggi.html"
        );
    }

    #[test]
    fn file_name_falls_back_to_host() {
        assert_eq!(
            output_file_name(&target("https://news.example.it/")),
            "news-example-it.html"
        );
        assert_eq!(
            output_file_name(&target("https://news.example.it/---/")),
            "news-example-it.html"
        );
    }

    #[test]
    fn html_extension_is_case_insensitive() {
        assert_eq!(
            output_file_name(&target("https://news.example.it/tech/Story.HTML")),
            "story.html"
        );
        assert_eq!(slugify("Pagina.Htm"), "pagina");
    }

    #[test]
    fn repeated_names_get_numbered() {
        let mut used = HashSet::new();
        assert_eq!(unique_file_name("story.html", &mut used), "story.html");
        assert_eq!(unique_file_name("story.html", &mut used), "story-2.html");
        assert_eq!(unique_file_name("story.html", &mut used), "story-3.html");
        assert_eq!(unique_file_name("altro.html", &mut used), "altro.html");
    }

    #[test]
    fn slug_is_capped() {
        let long = "a".repeat(100);
        assert_eq!(slugify(&long).chars().count(), MAX_FILE_STEM_CHARS);
    }

    #[test]
    fn page_title_prefers_article_title() {
        let t = target("https://news.example.it/x");
        let mut article = Article {
            url: t.as_str().to_string(),
            title: "  Robot  ".to_string(),
            text: "testo".to_string(),
        };
        assert_eq!(page_title(&article, &t), "Robot");
        article.title.clear();
        assert_eq!(page_title(&article, &t), "news.example.it");
    }
}
