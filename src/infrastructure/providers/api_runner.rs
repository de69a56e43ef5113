//! Provider HTTP API 호출 공용 유틸리티.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::debug;

/// 타임아웃이 걸린 API 호출용 HTTP 클라이언트를 생성한다.
pub fn build_api_client(timeout_secs: u64) -> Client {
    // TLS 설정 실패 등 예외 상황에서는 기본 클라이언트로 폴백한다.
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs.max(1)))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// JSON 응답을 기대하는 요청을 전송하고 실패/파싱 오류를 표준화한다.
pub async fn send_json(
    provider_name: &str,
    action: &str,
    request: RequestBuilder,
) -> Result<Value> {
    let response = request
        .send()
        .await
        .with_context(|| format!("{provider_name}: failed to {action}"))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .with_context(|| format!("{provider_name}: failed to read {action} response body"))?;
    debug!(provider = provider_name, %status, bytes = body.len(), "api response");

    if !status.is_success() {
        bail!("{provider_name}: {action} failed ({status}): {body}");
    }

    serde_json::from_str(&body)
        .with_context(|| format!("{provider_name}: invalid JSON response while {action}"))
}

/// 메시지 content(문자열 또는 파트 배열)에서 텍스트를 재귀적으로 추출한다.
pub fn collect_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.to_string(),
        Value::Array(items) => items
            .iter()
            .map(collect_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(""),
        Value::Object(map) => {
            if let Some(text) = map.get("text").and_then(Value::as_str) {
                return text.to_string();
            }
            if let Some(content) = map.get("content") {
                return collect_text(content);
            }
            String::new()
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn collects_plain_string() {
        assert_eq!(collect_text(&json!("ciao")), "ciao");
    }

    #[test]
    fn collects_content_parts() {
        let value = json!([
            { "type": "text", "text": "Primo " },
            { "type": "image_url", "image_url": { "url": "x" } },
            { "type": "text", "text": "secondo" }
        ]);
        assert_eq!(collect_text(&value), "Primo secondo");
    }

    #[test]
    fn non_text_values_are_empty() {
        assert_eq!(collect_text(&json!(null)), "");
        assert_eq!(collect_text(&json!(42)), "");
    }
}
