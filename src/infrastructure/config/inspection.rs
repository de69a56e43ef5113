//! 적용 설정 진단(inspection) 뷰 모델.

use serde::Serialize;

use super::loader::LoadedConfig;
use super::resolve::resolve_api_key;
use crate::application::config::{DefaultsConfig, ProviderConfig};

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub defaults: DefaultsConfig,
    pub effective_defaults: EffectiveDefaults,
    pub provider: ProviderInspection,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveDefaults {
    pub output_dir: String,
    pub max_article_chars: usize,
    pub request_timeout_secs: u64,
    pub fetch_timeout_secs: u64,
    pub title_max_chars: usize,
    pub min_paragraph_chunks: usize,
    pub title_mode: String,
    pub fallback_titles: Vec<String>,
    pub icons: Vec<String>,
    pub prompt_chars: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProviderInspection {
    pub enabled: bool,
    pub runnable: bool,
    pub api_base: String,
    pub model: String,
    pub api_key_source: Option<String>,
    pub api_key_resolved: bool,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let config = &loaded.config;
        let options = config.segment_options();

        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            defaults: config.defaults.clone(),
            effective_defaults: EffectiveDefaults {
                output_dir: config.output_dir().display().to_string(),
                max_article_chars: config.max_article_chars(),
                request_timeout_secs: config.request_timeout_secs(),
                fetch_timeout_secs: config.fetch_timeout_secs(),
                title_max_chars: options.title_max_chars,
                min_paragraph_chunks: options.min_paragraph_chunks,
                title_mode: options.title_mode.code().to_string(),
                fallback_titles: config.fallback_titles().items().to_vec(),
                icons: config.icons().items().to_vec(),
                prompt_chars: config.comic_prompt().chars().count(),
            },
            provider: ProviderInspection::from_config(&config.provider),
        }
    }
}

impl ProviderInspection {
    pub(crate) fn from_config(cfg: &ProviderConfig) -> Self {
        let enabled = cfg.is_enabled();
        let resolution = resolve_api_key(cfg, None);
        let api_key_resolved = resolution.credential.is_some();

        Self {
            enabled,
            runnable: enabled && api_key_resolved,
            api_base: cfg.api_base(),
            model: cfg.model(),
            api_key_source: resolution.source,
            api_key_resolved,
        }
    }
}
