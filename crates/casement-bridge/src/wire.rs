//! Wire marshaling between the renderer and the bridge.
//!
//! The renderer posts a JSON invocation request naming an object, a
//! method, and an argument payload; the bridge answers with either
//! `{"ok": <value>}` or `{"error": {"kind", "message"}}`. A request that
//! cannot even be parsed gets an `argument` error response; the wire
//! never drops a call silently and never takes the process down.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use casement_common::BridgeError;

use crate::invoke::MethodBindingBridge;

/// A parsed invocation request from the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationRequest {
    pub object: String,
    pub method: String,
    #[serde(default)]
    pub args: Value,
}

impl InvocationRequest {
    /// Parse a request from raw JSON (from the renderer's postMessage).
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// The bridge's answer to one invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum InvocationResponse {
    #[serde(rename = "ok")]
    Ok(Value),
    #[serde(rename = "error")]
    Error { kind: String, message: String },
}

impl InvocationResponse {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|e| format!(r#"{{"error":{{"kind":"invocation","message":"{e}"}}}}"#))
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }
}

impl From<Result<Value, BridgeError>> for InvocationResponse {
    fn from(result: Result<Value, BridgeError>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(err) => Self::Error {
                kind: err.kind().to_string(),
                message: err.to_string(),
            },
        }
    }
}

impl MethodBindingBridge {
    /// The host's frontend-call hook: raw JSON in, raw JSON out.
    pub fn dispatch_json(&self, raw: &str) -> String {
        let request = match InvocationRequest::from_json(raw) {
            Some(request) => request,
            None => {
                tracing::warn!(body_len = raw.len(), "invocation rejected: failed to parse");
                return InvocationResponse::Error {
                    kind: "argument".to_string(),
                    message: "malformed invocation request".to_string(),
                }
                .to_json();
            }
        };

        let response: InvocationResponse = self
            .invoke(&request.object, &request.method, &request.args)
            .into();
        response.to_json()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::binding::{ArgShape, BoundObject, BoundObjectTable, ParamSpec};

    fn echo_bridge() -> MethodBindingBridge {
        let object = BoundObject::builder("echo")
            .method(
                "say",
                vec![ParamSpec::new("text", ArgShape::Str)],
                |args| Ok(args[0].clone()),
            )
            .build();
        let mut table = BoundObjectTable::new();
        table.bind(object);
        MethodBindingBridge::new(table)
    }

    #[test]
    fn request_parses_with_named_args() {
        let request =
            InvocationRequest::from_json(r#"{"object":"counter","method":"increment","args":{"by":5}}"#)
                .unwrap();
        assert_eq!(request.object, "counter");
        assert_eq!(request.method, "increment");
        assert_eq!(request.args, json!({"by": 5}));
    }

    #[test]
    fn request_args_default_to_null() {
        let request =
            InvocationRequest::from_json(r#"{"object":"clock","method":"now"}"#).unwrap();
        assert_eq!(request.args, Value::Null);
    }

    #[test]
    fn malformed_request_is_none() {
        assert!(InvocationRequest::from_json("not json").is_none());
        assert!(InvocationRequest::from_json(r#"{"object":"x"}"#).is_none());
    }

    #[test]
    fn ok_response_serializes_as_ok_envelope() {
        let response = InvocationResponse::Ok(json!(42));
        assert_eq!(response.to_json(), r#"{"ok":42}"#);
        assert!(response.is_ok());
    }

    #[test]
    fn error_response_carries_kind_and_message() {
        let result: Result<Value, BridgeError> = Err(BridgeError::not_bound("a.b"));
        let response: InvocationResponse = result.into();
        let json = response.to_json();
        assert!(json.contains(r#""kind":"not_bound""#));
        assert!(json.contains("a.b"));
        assert!(!response.is_ok());
    }

    #[test]
    fn dispatch_json_round_trip() {
        let bridge = echo_bridge();
        let raw = r#"{"object":"echo","method":"say","args":["hello"]}"#;
        let response: InvocationResponse =
            serde_json::from_str(&bridge.dispatch_json(raw)).unwrap();
        assert_eq!(response, InvocationResponse::Ok(json!("hello")));
    }

    #[test]
    fn dispatch_json_surfaces_bridge_errors() {
        let bridge = echo_bridge();
        let raw = r#"{"object":"echo","method":"shout","args":["hello"]}"#;
        let response: InvocationResponse =
            serde_json::from_str(&bridge.dispatch_json(raw)).unwrap();
        assert!(matches!(
            response,
            InvocationResponse::Error { kind, .. } if kind == "not_bound"
        ));
    }

    #[test]
    fn dispatch_json_rejects_garbage_as_argument_error() {
        let bridge = echo_bridge();
        let response: InvocationResponse =
            serde_json::from_str(&bridge.dispatch_json("{{{{")).unwrap();
        assert!(matches!(
            response,
            InvocationResponse::Error { kind, message } if kind == "argument" && message.contains("malformed")
        ));
    }
}
