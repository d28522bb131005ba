//! Decoded response types

use serde_json::Value;

/// Decoded response body.
///
/// Which variant is produced depends on the content type the server
/// declared: `application/json` decodes to [`ResponseBody::Json`],
/// `text/plain` (parameters ignored) to [`ResponseBody::Text`]. Any other
/// content type is rejected before decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// JSON value decoded from an `application/json` response
    Json(Value),
    /// Raw text of a `text/plain` response
    Text(String),
}

impl ResponseBody {
    /// JSON value, if the response was `application/json`
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }

    /// Text content, if the response was `text/plain`
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Json(_) => None,
            ResponseBody::Text(text) => Some(text),
        }
    }

    /// Consume into a JSON value, if the response was `application/json`
    pub fn into_json(self) -> Option<Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }

    /// Consume into the text content, if the response was `text/plain`
    pub fn into_text(self) -> Option<String> {
        match self {
            ResponseBody::Json(_) => None,
            ResponseBody::Text(text) => Some(text),
        }
    }
}

/// Strip parameters from a content type, e.g.
/// `text/plain; charset=utf-8` becomes `text/plain`.
pub(crate) fn content_type_essence(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
}
