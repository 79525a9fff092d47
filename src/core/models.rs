//! Request bodies accepted by the business-data endpoints.
//!
//! Every field is optional on the wire and falls back to its default, and
//! both camelCase and PascalCase field names are accepted. A field that is
//! `null` or of the wrong type degrades on its own; its siblings are kept.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

fn lenient_i32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    Ok(Value::deserialize(deserializer)?
        .as_i64()
        .and_then(|n| i32::try_from(n).ok())
        .unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonRegistrationRequest {
    #[serde(alias = "Name", deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(alias = "Email", deserialize_with = "lenient_string")]
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VehicleRegistrationRequest {
    #[serde(alias = "Brand", deserialize_with = "lenient_string")]
    pub brand: String,
    #[serde(alias = "Model", deserialize_with = "lenient_string")]
    pub model: String,
    #[serde(alias = "Year", deserialize_with = "lenient_i32")]
    pub year: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommentSubmissionRequest {
    #[serde(alias = "Comment", deserialize_with = "lenient_string")]
    pub comment: String,
    #[serde(alias = "Author", deserialize_with = "lenient_string")]
    pub author: String,
}

/// Parse a JSON body, degrading to the default value when it is missing or
/// malformed.
pub fn parse_lenient<T: DeserializeOwned + Default>(body: &[u8]) -> T {
    if body.is_empty() {
        return T::default();
    }
    match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!("Treating malformed request body as empty: {}", e);
            T::default()
        }
    }
}
