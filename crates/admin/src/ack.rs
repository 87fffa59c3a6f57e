//! Classification of status-change responses.
//!
//! The management API acknowledges a status change with either
//! `{"success": true}` or `{"status": "success"}`. Both collapse into
//! [`Acknowledgement::Accepted`]; every other body is a rejection.

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acknowledgement {
    Accepted(Value),
    Rejected {
        /// The body's `message`, when it carried a usable one.
        message: Option<String>,
        body: Value,
    },
}

impl Acknowledgement {
    pub fn from_body(body: Value) -> Self {
        let accepted = body.get("success").is_some_and(is_truthy)
            || body.get("status").and_then(Value::as_str) == Some("success");

        if accepted {
            Acknowledgement::Accepted(body)
        } else {
            Acknowledgement::Rejected {
                message: message_of(&body),
                body,
            }
        }
    }

    /// The accepted body, or the rejection message (falling back to
    /// `default_message`).
    pub fn into_result(self, default_message: &str) -> Result<Value, String> {
        match self {
            Acknowledgement::Accepted(body) => Ok(body),
            Acknowledgement::Rejected { message, .. } => {
                Err(message.unwrap_or_else(|| default_message.to_string()))
            }
        }
    }
}

/// JSON truthiness: `null`, `false`, `0` and `""` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn message_of(body: &Value) -> Option<String> {
    match body.get("message")? {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other if is_truthy(other) => Some(other.to_string()),
        _ => None,
    }
}
