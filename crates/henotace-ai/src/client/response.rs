//! Response classification and envelope unwrapping.

use serde_json::Value;

use crate::HenotaceError;

/// Longest server message carried into an error.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Map a non-2xx status and its body to the error taxonomy.
pub fn classify_status(status: u16, body: &str) -> HenotaceError {
    let message = error_message(body);
    match status {
        401 | 403 => HenotaceError::Authentication { status, message },
        429 => HenotaceError::RateLimited,
        _ => HenotaceError::Api { status, message },
    }
}

/// Pull a human-readable message out of an error body.
///
/// JSON bodies carry it in `message`, `error` or `detail`; anything else
/// (including HTML debug pages) is truncated verbatim.
pub(crate) fn error_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        if let Some(message) = message_field(&json) {
            return truncate(&message);
        }
    }
    truncate(body.trim())
}

fn message_field(json: &Value) -> Option<String> {
    ["message", "error", "detail"].iter().find_map(|key| match &json[*key] {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(inner) => inner
            .get("message")
            .and_then(Value::as_str)
            .map(String::from),
        _ => None,
    })
}

fn truncate(text: &str) -> String {
    text.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

/// Strip the `{ "success": ..., "data": ... }` envelope if present.
///
/// A 2xx body that says `success: false` is still a failure.
pub(crate) fn unwrap_envelope(status: u16, json: Value) -> Result<Value, HenotaceError> {
    if json.get("success").and_then(Value::as_bool) == Some(false) {
        let message = message_field(&json).unwrap_or_else(|| "request was not successful".into());
        return Err(HenotaceError::Api { status, message });
    }

    match json {
        Value::Object(mut map) => match map.remove("data") {
            Some(data @ Value::Object(_)) => Ok(data),
            Some(other) => {
                map.insert("data".into(), other);
                Ok(Value::Object(map))
            }
            None => Ok(Value::Object(map)),
        },
        other => Err(HenotaceError::Parse(format!(
            "expected a JSON object, got {}",
            truncate(&other.to_string())
        ))),
    }
}

/// Map a transport-level reqwest failure.
pub(crate) fn transport_error(err: reqwest::Error) -> HenotaceError {
    if err.is_timeout() {
        HenotaceError::Timeout
    } else {
        HenotaceError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unauthorized_is_authentication() {
        let err = classify_status(401, r#"{"error":"Invalid API key"}"#);
        assert!(err.is_auth());
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("Invalid API key"));

        assert!(classify_status(403, "").is_auth());
    }

    #[test]
    fn too_many_requests_is_rate_limited() {
        assert!(matches!(classify_status(429, ""), HenotaceError::RateLimited));
    }

    #[test]
    fn other_statuses_are_api_errors() {
        let err = classify_status(500, "<html><body>UnboundLocalError</body></html>");
        match err {
            HenotaceError::Api { status, message } => {
                assert_eq!(status, 500);
                assert!(message.contains("UnboundLocalError"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(5000);
        match classify_status(502, &body) {
            HenotaceError::Api { message, .. } => assert_eq!(message.len(), MAX_ERROR_BODY_CHARS),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn nested_error_message() {
        let msg = error_message(r#"{"error":{"code":"bad_request","message":"history must be a list"}}"#);
        assert_eq!(msg, "history must be a list");
    }

    #[test]
    fn envelope_data_is_unwrapped() {
        let inner = unwrap_envelope(200, json!({ "success": true, "data": { "ai_response": "hi" } }))
            .unwrap();
        assert_eq!(inner, json!({ "ai_response": "hi" }));
    }

    #[test]
    fn bare_objects_pass_through() {
        let inner = unwrap_envelope(200, json!({ "ai_response": "hi" })).unwrap();
        assert_eq!(inner["ai_response"], "hi");
    }

    #[test]
    fn success_false_is_an_error() {
        let err = unwrap_envelope(200, json!({ "success": false, "message": "quota exceeded" }))
            .unwrap_err();
        match err {
            HenotaceError::Api { status, message } => {
                assert_eq!(status, 200);
                assert_eq!(message, "quota exceeded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_object_body_is_parse_error() {
        let err = unwrap_envelope(200, json!(["a", "b"])).unwrap_err();
        assert!(matches!(err, HenotaceError::Parse(_)));
    }
}
