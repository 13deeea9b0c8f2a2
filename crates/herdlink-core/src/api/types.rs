//! Request descriptors and the backend response envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{ApiError, ApiResult};

/// HTTP method subset used by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// Immutable description of one outbound call.
///
/// The client never mutates a descriptor; retry bookkeeping is an
/// explicit attempt counter inside the send loop, so callers can reuse
/// a descriptor freely.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the configured base address, leading slash included.
    pub path: String,
    pub body: Option<Value>,
    /// Extra headers as (name, value) pairs.
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// The backend's `{code, message, data}` response wrapper.
///
/// Decoding is an explicit step: callers of the client receive the inner
/// payload, never the wrapper, and a non-zero code is surfaced as an
/// HTTP-level error carrying the envelope message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Unwraps the payload, mapping a non-zero code to an error.
    pub fn into_payload(self, status: u16) -> ApiResult<T> {
        if self.code != 0 {
            let body = serde_json::json!({
                "code": self.code,
                "message": self.message,
            })
            .to_string();
            return Err(ApiError::http_status(status, &body));
        }
        self.data
            .ok_or_else(|| ApiError::decode("envelope has code 0 but no data field"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_unwraps_payload_on_code_zero() {
        let env: Envelope<Value> = serde_json::from_str(
            r#"{"code":0,"message":"ok","data":{"id":7,"name":"Bella"}}"#,
        )
        .unwrap();
        let payload = env.into_payload(200).unwrap();
        assert_eq!(payload["name"], "Bella");
    }

    #[test]
    fn envelope_nonzero_code_becomes_http_error() {
        let env: Envelope<Value> =
            serde_json::from_str(r#"{"code":1004,"message":"pen is full","data":null}"#).unwrap();
        let err = env.into_payload(200).unwrap_err();
        assert_eq!(err.message, "HTTP 200: pen is full");
    }

    #[test]
    fn envelope_missing_data_is_decode_error() {
        let env: Envelope<Value> = serde_json::from_str(r#"{"code":0,"message":"ok"}"#).unwrap();
        let err = env.into_payload(200).unwrap_err();
        assert_eq!(err.kind, super::super::error::ApiErrorKind::Decode);
    }

    #[test]
    fn request_builders_do_not_alias_state() {
        let base = ApiRequest::get("/cows/7");
        let with_header = base.clone().with_header("X-Farm", "north");
        assert!(base.headers.is_empty());
        assert_eq!(with_header.headers.len(), 1);
        assert_eq!(with_header.method.as_str(), "GET");
    }
}
