//! Error message normalization
//!
//! Converts any [`ApiFailure`] into exactly one non-empty, human-readable
//! message. Backends disagree about error payload shapes, so rejections are
//! inspected for the FastAPI shape (`{detail}`), the Express shape
//! (`{message}`), and the validation shape (`{errors: [...]}`) before falling
//! back to a plain-string body and finally to a fixed per-status table.

use serde_json::Value;

use super::classification::{ApiFailure, TransportFailure};

/// Message for a request that exceeded the transport deadline.
pub const TIMEOUT_MESSAGE: &str = "Request timeout. Please check your connection and try again.";
/// Message for an unreachable network.
pub const NETWORK_MESSAGE: &str = "Network error. Please check your internet connection.";
/// Message for any other transport failure.
pub const CONNECT_MESSAGE: &str = "Unable to connect to the server. Please check your connection.";
/// Message when nothing is known about a failure.
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred.";

/// Produces the single user-facing message for a failure.
pub fn normalize(failure: &ApiFailure) -> String {
    match failure {
        ApiFailure::Rejected { status, payload } => payload
            .as_ref()
            .and_then(message_from_payload)
            .unwrap_or_else(|| status_message(*status)),
        ApiFailure::Transport(reason) => transport_message(reason).to_string(),
        ApiFailure::Local(description) if !description.trim().is_empty() => description.clone(),
        ApiFailure::Local(_) | ApiFailure::Unknown => UNEXPECTED_MESSAGE.to_string(),
    }
}

/// Extracts a message from a rejection payload, if it has a recognizable shape.
pub fn message_from_payload(payload: &Value) -> Option<String> {
    if let Some(detail) = payload.get("detail").filter(|v| is_truthy(v)) {
        return Some(stringify(detail)).filter(|s| !s.is_empty());
    }

    if let Some(message) = payload.get("message").filter(|v| is_truthy(v)) {
        return Some(stringify(message)).filter(|s| !s.is_empty());
    }

    if let Some(Value::Array(errors)) = payload.get("errors") {
        let joined = errors
            .iter()
            .map(|entry| match entry.get("message").filter(|v| is_truthy(v)) {
                Some(message) => stringify(message),
                None => stringify(entry),
            })
            .collect::<Vec<_>>()
            .join(", ");
        if !joined.is_empty() {
            return Some(joined);
        }
    }

    match payload {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        _ => None,
    }
}

/// Fixed message for a rejection without a usable payload.
pub fn status_message(status: u16) -> String {
    match status {
        400 => "Invalid request. Please check your input.".to_string(),
        401 => "Unauthorized. Please check your credentials.".to_string(),
        403 => "Forbidden. You do not have permission to perform this action.".to_string(),
        404 => "Resource not found.".to_string(),
        409 => "Conflict. This resource already exists.".to_string(),
        422 => "Validation error. Please check your input.".to_string(),
        500 => "Server error. Please try again later.".to_string(),
        503 => "Service unavailable. Please try again later.".to_string(),
        other => format!("Request failed with status {}", other),
    }
}

fn transport_message(reason: &TransportFailure) -> &'static str {
    match reason {
        TransportFailure::Timeout => TIMEOUT_MESSAGE,
        TransportFailure::NetworkUnreachable => NETWORK_MESSAGE,
        TransportFailure::Other(_) => CONNECT_MESSAGE,
    }
}

/// `null`, `false`, zero and the empty string count as absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Strings verbatim, everything else as compact JSON.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rejected(status: u16, payload: Value) -> ApiFailure {
        ApiFailure::rejected(status, Some(payload))
    }

    #[test]
    fn test_detail_string_is_verbatim() {
        let failure = rejected(409, json!({"detail": "Employee ID already exists"}));
        assert_eq!(normalize(&failure), "Employee ID already exists");
    }

    #[test]
    fn test_structured_detail_is_stringified_in_order() {
        let failure = rejected(
            422,
            json!({"detail": [{"loc": ["body", "email"], "msg": "value is not a valid email"}]}),
        );
        assert_eq!(
            normalize(&failure),
            r#"[{"loc":["body","email"],"msg":"value is not a valid email"}]"#
        );
    }

    #[test]
    fn test_detail_wins_over_message() {
        let failure = rejected(400, json!({"message": "second", "detail": "first"}));
        assert_eq!(normalize(&failure), "first");
    }

    #[test]
    fn test_message_field() {
        let failure = rejected(400, json!({"message": "Email already registered"}));
        assert_eq!(normalize(&failure), "Email already registered");
    }

    #[test]
    fn test_empty_detail_falls_through_to_message() {
        let failure = rejected(400, json!({"detail": "", "message": "from message"}));
        assert_eq!(normalize(&failure), "from message");

        let failure = rejected(400, json!({"detail": null, "message": "from message"}));
        assert_eq!(normalize(&failure), "from message");
    }

    #[test]
    fn test_errors_array_joined_in_order() {
        let failure = rejected(
            422,
            json!({"errors": [
                {"message": "Full name is required"},
                "Department is required",
                {"message": "Email is invalid"}
            ]}),
        );
        assert_eq!(
            normalize(&failure),
            "Full name is required, Department is required, Email is invalid"
        );
    }

    #[test]
    fn test_errors_entry_without_message_is_serialized() {
        let failure = rejected(422, json!({"errors": [{"field": "email"}, 7]}));
        assert_eq!(normalize(&failure), r#"{"field":"email"}, 7"#);
    }

    #[test]
    fn test_empty_errors_array_falls_back_to_status() {
        let failure = rejected(422, json!({"errors": []}));
        assert_eq!(
            normalize(&failure),
            "Validation error. Please check your input."
        );
    }

    #[test]
    fn test_plain_string_payload() {
        let failure = rejected(502, json!("Bad gateway from proxy"));
        assert_eq!(normalize(&failure), "Bad gateway from proxy");
    }

    #[test]
    fn test_empty_string_payload_uses_status_table() {
        let failure = rejected(500, json!(""));
        assert_eq!(normalize(&failure), "Server error. Please try again later.");
    }

    #[test]
    fn test_status_table() {
        let cases = [
            (400, "Invalid request. Please check your input."),
            (401, "Unauthorized. Please check your credentials."),
            (
                403,
                "Forbidden. You do not have permission to perform this action.",
            ),
            (404, "Resource not found."),
            (409, "Conflict. This resource already exists."),
            (422, "Validation error. Please check your input."),
            (500, "Server error. Please try again later."),
            (503, "Service unavailable. Please try again later."),
        ];
        for (status, expected) in cases {
            assert_eq!(normalize(&ApiFailure::rejected(status, None)), expected);
            assert_eq!(
                normalize(&rejected(status, json!({"unrelated": true}))),
                expected
            );
        }
    }

    #[test]
    fn test_unknown_status_substitutes_code() {
        assert_eq!(
            normalize(&ApiFailure::rejected(418, None)),
            "Request failed with status 418"
        );
        assert_eq!(
            normalize(&ApiFailure::rejected(502, Some(json!({})))),
            "Request failed with status 502"
        );
    }

    #[test]
    fn test_transport_messages() {
        assert_eq!(normalize(&ApiFailure::timeout()), TIMEOUT_MESSAGE);
        assert_eq!(
            normalize(&ApiFailure::Transport(TransportFailure::NetworkUnreachable)),
            NETWORK_MESSAGE
        );
        assert_eq!(
            normalize(&ApiFailure::Transport(TransportFailure::Other(
                "connection refused".to_string()
            ))),
            CONNECT_MESSAGE
        );
    }

    #[test]
    fn test_local_description_and_unknown() {
        assert_eq!(
            normalize(&ApiFailure::local("relative URL without a base")),
            "relative URL without a base"
        );
        assert_eq!(normalize(&ApiFailure::local("  ")), UNEXPECTED_MESSAGE);
        assert_eq!(normalize(&ApiFailure::Unknown), UNEXPECTED_MESSAGE);
    }

    #[test]
    fn test_output_is_never_empty() {
        let failures = vec![
            ApiFailure::rejected(200, Some(json!({"detail": false}))),
            ApiFailure::rejected(0, Some(Value::Null)),
            ApiFailure::rejected(500, Some(json!({"message": 0}))),
            ApiFailure::local(""),
            ApiFailure::Unknown,
        ];
        for failure in failures {
            assert!(!normalize(&failure).is_empty(), "{:?}", failure);
        }
    }
}
