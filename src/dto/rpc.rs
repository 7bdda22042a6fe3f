use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::ErrorRecord;

/// The service ignores the request id, every envelope carries the same one.
pub const REQUEST_ID: i32 = -1;

/// Fallback error name when the service omits one.
pub const DEFAULT_ERROR_NAME: &str = "JsonRpcError";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest<T> {
    pub id: i32,
    pub method: String,
    pub params: T,
}

impl<T> JsonRpcRequest<T> {
    pub fn new(method: impl Into<String>, params: T) -> Self {
        Self {
            id: REQUEST_ID,
            method: method.into(),
            params,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl JsonRpcResponse {
    /// Parse a response body, which must be a JSON object.
    pub fn from_body(body: &str) -> Result<Self, String> {
        match serde_json::from_str::<Value>(body).map_err(|e| e.to_string())? {
            value @ Value::Object(_) => serde_json::from_value(value).map_err(|e| e.to_string()),
            other => Err(format!("expected a JSON object, got {}", json_kind(&other))),
        }
    }

    /// Application error carried by the response, if any.
    ///
    /// The service reports errors either at the top level (`error`) or nested
    /// inside an otherwise successful payload (`result.error`).
    pub fn application_error(&self) -> Option<ErrorRecord> {
        let nested = self
            .result
            .as_ref()
            .and_then(|result| result.as_object())
            .and_then(|result| result.get("error"));

        self.error
            .as_ref()
            .into_iter()
            .chain(nested)
            .find(|error| error.is_object())
            .map(|error| {
                serde_json::from_value::<ApiError>(error.clone())
                    .unwrap_or_default()
                    .into_record()
            })
    }

    pub fn into_result(self) -> Value {
        self.result.unwrap_or(Value::Null)
    }
}

/// Error body as sent by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiError {
    pub fn into_record(self) -> ErrorRecord {
        let name = self
            .errors
            .into_iter()
            .next()
            .and_then(|detail| detail.name)
            .or(self.name)
            .unwrap_or_else(|| DEFAULT_ERROR_NAME.to_string());

        ErrorRecord {
            code: self.code.as_ref().and_then(error_code),
            message: self.message.unwrap_or_default(),
            name,
        }
    }
}

/// Error codes arrive as integers, occasionally as numeric strings.
fn error_code(code: &Value) -> Option<i64> {
    let parsed = match code {
        Value::String(s) => s.trim().parse().ok(),
        other => other.as_i64(),
    };
    if parsed.is_none() && !code.is_null() {
        debug!("Dropping non-integer error code: {}", code);
    }
    parsed
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticateRequest {
    pub username: String,
    pub password: String,
}

/// The fields of an `Authenticate` result the client depends on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateResponse {
    pub user_id: String,
    pub session_id: String,
}
