//! Model reply cleanup.

/// Pull the JSON payload out of a model reply.
///
/// Uses the first ```` ```json ```` fence when present, otherwise the first
/// bare ```` ``` ```` fence, otherwise the whole reply. The result is
/// trimmed.
pub fn extract_json_block(response: &str) -> &str {
    let body = if let Some((_, rest)) = response.split_once("```json") {
        rest.split("```").next().unwrap_or(rest)
    } else if let Some((_, rest)) = response.split_once("```") {
        rest.split("```").next().unwrap_or(rest)
    } else {
        response
    };

    body.trim()
}
