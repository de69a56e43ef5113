//! chat-completions 응답의 `usage` 블록에서 토큰 사용량을 추출한다.

use serde_json::Value;

use crate::domain::article::TokenUsage;

pub(super) fn parse_usage(response: &Value) -> TokenUsage {
    let prompt = metric(response, &["/usage/prompt_tokens", "/usage/input_tokens"]);
    let completion = metric(
        response,
        &["/usage/completion_tokens", "/usage/output_tokens"],
    );
    let mut total = metric(response, &["/usage/total_tokens"]);

    if total.is_none() {
        total = match (prompt, completion) {
            (Some(p), Some(c)) => Some(p + c),
            _ => None,
        };
    }

    TokenUsage {
        prompt_tokens: prompt,
        completion_tokens: completion,
        total_tokens: total,
    }
}

fn metric(response: &Value, pointers: &[&str]) -> Option<u64> {
    pointers
        .iter()
        .find_map(|pointer| response.pointer(pointer).and_then(Value::as_u64))
}
