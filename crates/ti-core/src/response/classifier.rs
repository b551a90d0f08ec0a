use serde_json::Value;

use crate::ports::RemoteCallError;

/// Generic message used when an error response carries no `error` field.
pub const GENERIC_APPLICATION_ERROR: &str = "request failed";

/// Classification category of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Success,
    Interstitial,
    DecodeError,
    ApplicationError,
}

/// A raw response after classification.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedResponse {
    /// Live response, ok status, structured body without an `error` field.
    Success(Value),
    /// The tunnel gateway answered with an HTML page instead of proxying.
    Interstitial,
    /// Body is not structured data.
    DecodeError(String),
    /// Non-ok status or explicit `error` field. `None` when the server gave no message.
    ApplicationError(Option<String>),
}

impl ClassifiedResponse {
    pub fn kind(&self) -> ResponseKind {
        match self {
            Self::Success(_) => ResponseKind::Success,
            Self::Interstitial => ResponseKind::Interstitial,
            Self::DecodeError(_) => ResponseKind::DecodeError,
            Self::ApplicationError(_) => ResponseKind::ApplicationError,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Server-supplied message of an application error, or the generic fallback.
    pub fn application_message(&self) -> Option<&str> {
        match self {
            Self::ApplicationError(Some(message)) => Some(message),
            Self::ApplicationError(None) => Some(GENERIC_APPLICATION_ERROR),
            _ => None,
        }
    }

    /// Unwraps the success payload or maps the classification onto a
    /// [`RemoteCallError`]. `fallback` replaces a missing application error message.
    pub fn into_payload(self, fallback: &str) -> Result<Value, RemoteCallError> {
        match self {
            Self::Success(payload) => Ok(payload),
            Self::Interstitial => Err(RemoteCallError::GatewayInterstitial),
            Self::DecodeError(detail) => Err(RemoteCallError::DecodeError(detail)),
            Self::ApplicationError(message) => Err(RemoteCallError::ApplicationError(
                message.unwrap_or_else(|| fallback.to_string()),
            )),
        }
    }
}

/// Returns true when the body starts with an HTML document marker.
///
/// Leading whitespace and a UTF-8 BOM are ignored; the match is case-insensitive.
pub fn is_html_document(raw_body: &str) -> bool {
    let head = raw_body.trim_start_matches('\u{feff}').trim_start();
    let prefix: String = head.chars().take(16).collect::<String>().to_ascii_lowercase();
    prefix.starts_with("<!doctype html") || prefix.starts_with("<html")
}

/// Classifies a raw response body and its status.
///
/// The HTML check runs before decoding: an interstitial page is never
/// reported as a decode error.
pub fn classify(raw_body: &str, http_ok: bool) -> ClassifiedResponse {
    if is_html_document(raw_body) {
        return ClassifiedResponse::Interstitial;
    }

    let payload: Value = match serde_json::from_str(raw_body) {
        Ok(payload) => payload,
        Err(err) => return ClassifiedResponse::DecodeError(err.to_string()),
    };

    let error_field = error_message(&payload);
    if !http_ok || error_field.is_some() || payload.is_null() {
        return ClassifiedResponse::ApplicationError(error_field);
    }

    ClassifiedResponse::Success(payload)
}

/// `None` when the `error` field is absent or falsy (`null`, `false`, `0`, blank string).
fn error_message(payload: &Value) -> Option<String> {
    match payload.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(message) if message.trim().is_empty() => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}
