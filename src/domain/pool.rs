//! 패널 장식용 고정 풀(대체 제목/아이콘)과 순환 선택 규칙.

/// 구조적 단서로 제목을 얻지 못했을 때 쓰는 기본 제목 목록.
pub const DEFAULT_FALLBACK_TITLES: [&str; 8] = [
    "Avventura Inizia",
    "Scoperta Inedita",
    "Cuore della Narrazione",
    "Intreccio Emozionante",
    "Finale Inatteso",
    "Svolta Cruciale",
    "Momento Rivelatore",
    "Epilogo Indimenticabile",
];

/// 패널마다 붙일 아이콘 CSS 클래스 목록.
pub const DEFAULT_ICONS: [&str; 10] = [
    "icon-globe",
    "icon-ai",
    "icon-code",
    "icon-trophy",
    "icon-star",
    "icon-fire",
    "icon-lightbulb",
    "icon-music",
    "icon-book",
    "icon-rocket",
];

/// 인덱스로 순환 선택하는 불변 문자열 풀.
/// 빈 목록이나 공백 항목은 생성 시 걸러내고, 결과가 비면 `default`로 대체한다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CyclicPool {
    items: Vec<String>,
}

impl CyclicPool {
    pub fn new<I, S>(items: I, default: &[&str]) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut items: Vec<String> = items
            .into_iter()
            .map(|s| {
                let s: String = s.into();
                s.trim().to_string()
            })
            .filter(|s| !s.is_empty())
            .collect();

        if items.is_empty() {
            items = default.iter().map(|s| s.to_string()).collect();
        }

        Self { items }
    }

    pub fn fallback_titles() -> Self {
        Self::new(DEFAULT_FALLBACK_TITLES, &DEFAULT_FALLBACK_TITLES)
    }

    pub fn icons() -> Self {
        Self::new(DEFAULT_ICONS, &DEFAULT_ICONS)
    }

    /// `index % len` 위치의 항목을 돌려준다. 비어 있으면 빈 문자열.
    pub fn pick(&self, index: usize) -> &str {
        if self.items.is_empty() {
            return "";
        }
        &self.items[index % self.items.len()]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }
}

impl Default for CyclicPool {
    fn default() -> Self {
        Self::fallback_titles()
    }
}
