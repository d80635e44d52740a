//! Response classification

use crate::error::{Error, Result};
use crate::types::JsonValue;
use tracing::debug;

/// One successfully classified response body
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPage {
    body: JsonValue,
}

impl ResultPage {
    /// The parsed body
    pub fn body(&self) -> &JsonValue {
        &self.body
    }

    /// Whether the body carries the given collection key
    pub fn has_collection(&self, key: &str) -> bool {
        self.body.get(key).is_some()
    }

    /// Take the records stored under `key`
    ///
    /// A missing key is an error. A present key holding anything other
    /// than an array yields no records.
    pub fn into_records(self, key: &str) -> Result<Vec<JsonValue>> {
        let JsonValue::Object(mut map) = self.body else {
            return Err(Error::missing_collection(key));
        };

        match map.remove(key) {
            Some(JsonValue::Array(records)) => Ok(records),
            Some(other) => {
                debug!(collection = key, kind = json_kind(&other), "collection is not an array");
                Ok(Vec::new())
            }
            None => Err(Error::missing_collection(key)),
        }
    }
}

/// Classify a raw response body
pub fn classify_response(body: &str) -> Result<ResultPage> {
    if body.is_empty() {
        return Err(Error::EmptyResponse);
    }

    let value: JsonValue =
        serde_json::from_str(body).map_err(|e| Error::response_decode(e.to_string()))?;

    if is_falsy(&value) {
        return Err(Error::response_decode(format!(
            "response decoded to an empty {} value",
            json_kind(&value)
        )));
    }

    if let JsonValue::Object(map) = &value {
        if let Some(first) = first_error(map.get("errors")) {
            return Err(Error::api_errors(first));
        }

        if let (Some(code), Some(message)) = (map.get("code"), map.get("message")) {
            return Err(Error::api_code(scalar_text(code), scalar_text(message)));
        }
    }

    Ok(ResultPage { body: value })
}

/// First entry of a non-empty `errors` payload
fn first_error(errors: Option<&JsonValue>) -> Option<String> {
    match errors? {
        JsonValue::Array(entries) => entries.first().map(scalar_text),
        JsonValue::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Strings unquoted, everything else as compact JSON
fn scalar_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_falsy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::Bool(b) => !b,
        JsonValue::Number(n) => n.as_f64() == Some(0.0),
        JsonValue::String(s) => s.is_empty() || s == "0",
        JsonValue::Array(a) => a.is_empty(),
        JsonValue::Object(o) => o.is_empty(),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
