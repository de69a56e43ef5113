//! 설정 값(key/env)을 실제 런타임 자격 증명으로 해석하는 유틸리티.
//!
//! - 환경변수 접근은 인프라 계층에서만 수행한다.

use std::env;

use crate::application::config::ProviderConfig;

/// API key 해석 결과. `source`는 진단 출력용 라벨이다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialResolution {
    pub credential: Option<String>,
    pub source: Option<String>,
}

/// 세션 키 → 설정 inline 키 → 환경변수 순으로 API key를 찾는다.
pub fn resolve_api_key(cfg: &ProviderConfig, session_key: Option<&str>) -> CredentialResolution {
    if let Some(key) = session_key.map(str::trim).filter(|v| !v.is_empty()) {
        return CredentialResolution {
            credential: Some(key.to_string()),
            source: Some("session".to_string()),
        };
    }

    if let Some(key) = cfg.api_key.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        return CredentialResolution {
            credential: Some(key.to_string()),
            source: Some("inline".to_string()),
        };
    }

    let env_name = cfg.api_key_env();
    match env::var(&env_name).ok().map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => CredentialResolution {
            credential: Some(v),
            source: Some(format!("env:{env_name}")),
        },
        _ => CredentialResolution {
            credential: None,
            source: Some(format!("env:{env_name} (missing)")),
        },
    }
}
