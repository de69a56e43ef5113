//! 설정 파일 탐색/병합 로더.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::json;
use tracing::debug;

use crate::application::config::{
    Config, DEFAULT_API_BASE, DEFAULT_API_KEY_ENV, DEFAULT_MODEL, DEFAULT_OUTPUT_DIR,
};
use crate::domain::pool::{DEFAULT_FALLBACK_TITLES, DEFAULT_ICONS};

const CONFIG_ENV: &str = "COMICPILOT_CONFIG";
const PROJECT_CONFIG_PATH: &str = ".comicpilot/config.json";

#[derive(Debug, Clone)]
pub(crate) struct LoadedConfig {
    pub config: Config,
    pub searched_paths: Vec<PathBuf>,
    pub loaded_paths: Vec<PathBuf>,
}

/// 우선순위 경로를 순회해 JSON 설정을 병합한다.
pub(crate) fn load_merged_config() -> Result<LoadedConfig> {
    let paths = config_paths();

    if let Ok(path) = env::var(CONFIG_ENV)
        && !Path::new(&path).exists()
    {
        bootstrap_template(Path::new(&path))?;
    }

    let (mut merged, mut loaded_paths) = merge_existing(&paths)?;

    if loaded_paths.is_empty() {
        // 최초 실행 시 프로젝트 로컬 설정 템플릿을 만들어 둔다.
        let bootstrap_target = default_bootstrap_config_path();
        bootstrap_template(&bootstrap_target)?;
        merged.merge_from(read_config(&bootstrap_target)?);
        loaded_paths.push(bootstrap_target);
    }

    Ok(LoadedConfig {
        config: merged,
        searched_paths: paths,
        loaded_paths,
    })
}

/// 주어진 경로 중 존재하는 파일만 순서대로 병합한다(템플릿 생성 없음).
pub fn load_from_paths(paths: &[PathBuf]) -> Result<Config> {
    Ok(merge_existing(paths)?.0)
}

/// 기본 + 사용자 + 프로젝트 + 명시 경로 순으로 병합 경로를 구성한다.
pub fn config_paths() -> Vec<PathBuf> {
    // 낮은 우선순위 -> 높은 우선순위 순서로 병합됨.
    let mut paths = vec![PathBuf::from("/etc/comicpilot/config.json")];

    if let Some(base) = dirs::config_dir() {
        paths.push(base.join("comicpilot").join("config.json"));
    }

    paths.push(PathBuf::from(PROJECT_CONFIG_PATH));

    if let Ok(path) = env::var(CONFIG_ENV) {
        paths.push(PathBuf::from(path));
    }

    dedup_paths(paths)
}

fn merge_existing(paths: &[PathBuf]) -> Result<(Config, Vec<PathBuf>)> {
    let mut merged = Config::default();
    let mut loaded_paths = Vec::new();

    for path in paths {
        if !path.exists() {
            continue;
        }
        merged.merge_from(read_config(path)?);
        loaded_paths.push(path.to_path_buf());
        debug!(path = %path.display(), "merged config file");
    }

    Ok((merged, loaded_paths))
}

fn read_config(path: &Path) -> Result<Config> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config at {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse JSON in {}", path.display()))
}

fn default_bootstrap_config_path() -> PathBuf {
    if let Ok(path) = env::var(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    PathBuf::from(PROJECT_CONFIG_PATH)
}

fn bootstrap_template(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        return Ok(());
    }

    if let Some(parent) = config_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let template = json!({
        "defaults": {
            "output_dir": DEFAULT_OUTPUT_DIR,
            "max_article_chars": 12000,
            "request_timeout_secs": 40,
            "fetch_timeout_secs": 30
        },
        "segmenter": {
            "title_max_chars": 70,
            "min_paragraph_chunks": 5,
            "title_mode": "heuristic",
            "fallback_titles": DEFAULT_FALLBACK_TITLES,
            "icons": DEFAULT_ICONS
        },
        "provider": {
            "enabled": true,
            "api_base": DEFAULT_API_BASE,
            "model": DEFAULT_MODEL,
            "api_key_env": DEFAULT_API_KEY_ENV
        }
    });

    let rendered = serde_json::to_string_pretty(&template)?;
    fs::write(config_path, format!("{rendered}\n"))
        .with_context(|| format!("failed to create config template at {}", config_path.display()))
}

fn dedup_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for p in paths {
        if !out.contains(&p) {
            out.push(p);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrapped_template_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        bootstrap_template(&path).unwrap();
        let config = read_config(&path).unwrap();

        assert_eq!(config.provider.model(), DEFAULT_MODEL);
        assert_eq!(config.segment_options().min_paragraph_chunks, 5);
        assert_eq!(config.fallback_titles().len(), DEFAULT_FALLBACK_TITLES.len());
    }

    #[test]
    fn bootstrap_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{\"provider\":{\"model\":\"mine\"}}").unwrap();

        bootstrap_template(&path).unwrap();

        assert_eq!(read_config(&path).unwrap().provider.model(), "mine");
    }

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        let paths = dedup_paths(vec![
            PathBuf::from("a"),
            PathBuf::from("b"),
            PathBuf::from("a"),
        ]);
        assert_eq!(paths, vec![PathBuf::from("a"), PathBuf::from("b")]);
    }
}
