//! 패널 엔티티와 표시용 장식(아이콘/강조 단어).

use serde::Serialize;

use crate::domain::pool::CyclicPool;

/// 강조 단어 앞뒤에서 떼어낼 문장부호.
const HIGHLIGHT_STRIP: [char; 8] = ['.', ',', ';', ':', '!', '?', '\'', '"'];

/// 만화 서술의 한 칸.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Panel {
    pub title: String,
    pub content: String,
}

impl Panel {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// 본문(없으면 제목)의 첫 단어에서 문장부호를 걷어낸 강조 단어.
    pub fn highlight_word(&self) -> Option<String> {
        let source = if self.content.trim().is_empty() {
            &self.title
        } else {
            &self.content
        };

        let word = source
            .split_whitespace()
            .next()?
            .trim_matches(|c: char| HIGHLIGHT_STRIP.contains(&c));
        if word.is_empty() {
            return None;
        }
        Some(word.to_string())
    }
}

/// 렌더링 직전의 패널(아이콘 클래스 + 강조 단어 포함).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComicPanel {
    pub panel: Panel,
    pub icon: String,
    pub highlight: Option<String>,
}

/// 패널 순서대로 아이콘을 순환 배정하고 강조 단어를 계산한다.
pub fn decorate(panels: Vec<Panel>, icons: &CyclicPool) -> Vec<ComicPanel> {
    panels
        .into_iter()
        .enumerate()
        .map(|(index, panel)| ComicPanel {
            icon: icons.pick(index).to_string(),
            highlight: panel.highlight_word(),
            panel,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_uses_first_content_word() {
        let panel = Panel::new("Titolo", "\"Incredibile!\" disse il narratore.");
        assert_eq!(panel.highlight_word().as_deref(), Some("Incredibile"));
    }

    #[test]
    fn highlight_falls_back_to_title() {
        let panel = Panel::new("Tutto è cambiato.", "");
        assert_eq!(panel.highlight_word().as_deref(), Some("Tutto"));
    }

    #[test]
    fn highlight_is_none_for_punctuation_only() {
        assert_eq!(Panel::new("", "...!").highlight_word(), None);
        assert_eq!(Panel::new("", "   ").highlight_word(), None);
    }

    #[test]
    fn decorate_cycles_icons_in_order() {
        let icons = CyclicPool::new(["icon-a", "icon-b"], &[]);
        let panels = vec![
            Panel::new("uno", "primo"),
            Panel::new("due", "secondo"),
            Panel::new("tre", "terzo"),
        ];
        let decorated = decorate(panels, &icons);
        let classes: Vec<&str> = decorated.iter().map(|p| p.icon.as_str()).collect();
        assert_eq!(classes, vec!["icon-a", "icon-b", "icon-a"]);
        assert_eq!(decorated[2].highlight.as_deref(), Some("terzo"));
        assert_eq!(decorated[1].panel.title, "due");
    }
}
