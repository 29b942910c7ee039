//! Wire format shared with the prediction endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier attached to each submission so late completions can be recognised.
pub type RequestId = u64;

/// Label shown when a successful response carries no usable label.
pub const FALLBACK_LABEL: &str = "?";

/// Largest magnitude at which every integer is exactly representable as an `f64`.
const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_992.0;

/// JSON body posted to the endpoint: `{"image": "data:image/png;base64,..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub image: String,
}

/// Raw HTTP answer, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl EndpointReply {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Pull the predicted label out of a successful response body.
///
/// Looks at `prediction`, then `digit`; a missing field, a `null`, a body that is not a JSON
/// object, or a body that is not JSON at all all yield [`FALLBACK_LABEL`].
pub fn extract_label(body: &[u8]) -> String {
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(_) => return FALLBACK_LABEL.to_string(),
    };

    ["prediction", "digit"]
        .iter()
        .find_map(|field| value.get(field).and_then(stringify))
        .unwrap_or_else(|| FALLBACK_LABEL.to_string())
}

fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.is_f64() => n.as_f64().map(format_float),
        other => Some(other.to_string()),
    }
}

/// Whole floats print without a fractional part, so a class index of `7.0` reads `7`.
fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_FLOAT_INT {
        (value as i64).to_string()
    } else {
        value.to_string()
    }
}
