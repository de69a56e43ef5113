//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수 접근은 `infrastructure`에서만 수행한다.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::policy::DEFAULT_COMIC_PROMPT;
use crate::domain::pool::{CyclicPool, DEFAULT_FALLBACK_TITLES, DEFAULT_ICONS};
use crate::domain::segment::{
    DEFAULT_MIN_PARAGRAPH_CHUNKS, DEFAULT_TITLE_MAX_CHARS, SegmentOptions, TitleMode,
};

pub const DEFAULT_MAX_ARTICLE_CHARS: usize = 12_000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 40;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_OUTPUT_DIR: &str = "comics";
pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_API_KEY_ENV: &str = "GROQ_API_KEY";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 전역 기본값
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// 패널 분할 설정
    #[serde(default)]
    pub segmenter: SegmenterConfig,
    /// 변환 API 설정
    #[serde(default)]
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DefaultsConfig {
    /// 변환 지시 프롬프트(기사 본문 앞에 붙음)
    pub prompt: Option<String>,
    /// HTML 출력 디렉터리
    pub output_dir: Option<String>,
    /// 프롬프트에 넣을 기사 본문 최대 문자 수
    pub max_article_chars: Option<usize>,
    /// 변환 API 타임아웃(초)
    pub request_timeout_secs: Option<u64>,
    /// 기사 다운로드 타임아웃(초)
    pub fetch_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SegmenterConfig {
    /// 제목 후보 최대 길이(문자 수)
    pub title_max_chars: Option<usize>,
    /// 줄 단위 재분할 기준 문단 수
    pub min_paragraph_chunks: Option<usize>,
    /// heuristic | pool
    pub title_mode: Option<String>,
    pub fallback_titles: Option<Vec<String>>,
    /// 아이콘 CSS 클래스 목록
    pub icons: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProviderConfig {
    /// 활성화 여부(기본 true)
    pub enabled: Option<bool>,
    /// OpenAI 호환 API 베이스 URL
    pub api_base: Option<String>,
    /// 모델 식별자
    pub model: Option<String>,
    /// 인증 키(직접값)
    pub api_key: Option<String>,
    /// 인증 키를 읽을 환경변수 이름
    pub api_key_env: Option<String>,
}

impl Config {
    pub fn comic_prompt(&self) -> String {
        self.defaults
            .prompt
            .clone()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COMIC_PROMPT.to_string())
    }

    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(
            self.defaults
                .output_dir
                .as_deref()
                .unwrap_or(DEFAULT_OUTPUT_DIR),
        )
    }

    pub fn max_article_chars(&self) -> usize {
        self.defaults
            .max_article_chars
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_MAX_ARTICLE_CHARS)
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.defaults
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    pub fn fetch_timeout_secs(&self) -> u64 {
        self.defaults
            .fetch_timeout_secs
            .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS)
    }

    /// 분할 옵션을 정규화한다(0 이하 값은 기본값으로 대체).
    pub fn segment_options(&self) -> SegmentOptions {
        SegmentOptions {
            title_max_chars: self
                .segmenter
                .title_max_chars
                .filter(|v| *v > 0)
                .unwrap_or(DEFAULT_TITLE_MAX_CHARS),
            min_paragraph_chunks: self
                .segmenter
                .min_paragraph_chunks
                .unwrap_or(DEFAULT_MIN_PARAGRAPH_CHUNKS),
            title_mode: TitleMode::from_config(self.segmenter.title_mode.as_deref()),
        }
    }

    pub fn fallback_titles(&self) -> CyclicPool {
        match &self.segmenter.fallback_titles {
            Some(items) => CyclicPool::new(items.iter().cloned(), &DEFAULT_FALLBACK_TITLES),
            None => CyclicPool::fallback_titles(),
        }
    }

    pub fn icons(&self) -> CyclicPool {
        match &self.segmenter.icons {
            Some(items) => CyclicPool::new(items.iter().cloned(), &DEFAULT_ICONS),
            None => CyclicPool::icons(),
        }
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        self.defaults.merge_from(other.defaults);
        self.segmenter.merge_from(other.segmenter);
        self.provider.merge_from(other.provider);
    }
}

impl DefaultsConfig {
    pub fn merge_from(&mut self, other: DefaultsConfig) {
        if other.prompt.is_some() {
            self.prompt = other.prompt;
        }
        if other.output_dir.is_some() {
            self.output_dir = other.output_dir;
        }
        if other.max_article_chars.is_some() {
            self.max_article_chars = other.max_article_chars;
        }
        if other.request_timeout_secs.is_some() {
            self.request_timeout_secs = other.request_timeout_secs;
        }
        if other.fetch_timeout_secs.is_some() {
            self.fetch_timeout_secs = other.fetch_timeout_secs;
        }
    }
}

impl SegmenterConfig {
    pub fn merge_from(&mut self, other: SegmenterConfig) {
        if other.title_max_chars.is_some() {
            self.title_max_chars = other.title_max_chars;
        }
        if other.min_paragraph_chunks.is_some() {
            self.min_paragraph_chunks = other.min_paragraph_chunks;
        }
        if other.title_mode.is_some() {
            self.title_mode = other.title_mode;
        }
        if other.fallback_titles.is_some() {
            self.fallback_titles = other.fallback_titles;
        }
        if other.icons.is_some() {
            self.icons = other.icons;
        }
    }
}

impl ProviderConfig {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn api_base(&self) -> String {
        self.api_base
            .clone()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
    }

    pub fn model(&self) -> String {
        self.model
            .clone()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    /// 키 환경변수 이름. 미지정이면 `GROQ_API_KEY`.
    pub fn api_key_env(&self) -> String {
        self.api_key_env
            .clone()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string())
    }

    pub fn merge_from(&mut self, other: ProviderConfig) {
        if other.enabled.is_some() {
            self.enabled = other.enabled;
        }
        if other.api_base.is_some() {
            self.api_base = other.api_base;
        }
        if other.model.is_some() {
            self.model = other.model;
        }
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.api_key_env.is_some() {
            self.api_key_env = other.api_key_env;
        }
    }
}
