use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use super::FieldError;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Request body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Request body must be a JSON object")]
    NotAnObject,
}

/// A JSON object body. Keeps key presence so updates can tell
/// "not sent" apart from "sent as null".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload(Map<String, Value>);

impl Payload {
    pub fn parse(body: &[u8]) -> Result<Self, PayloadError> {
        match serde_json::from_slice(body)? {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(PayloadError::NotAnObject),
        }
    }

    /// Key sent with a non-null value
    pub fn is_present(&self, key: &str) -> bool {
        matches!(self.0.get(key), Some(v) if !v.is_null())
    }

    /// Present and not blank: null, `false`, zero, `""`, `[]` and `{}` all read as missing
    pub fn is_filled(&self, key: &str) -> bool {
        match self.0.get(key) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64() != Some(0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(a)) => !a.is_empty(),
            Some(Value::Object(o)) => !o.is_empty(),
        }
    }

    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Typed value of a key; absent and null both read as `None`
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, FieldError> {
        match self.raw(key) {
            None => Ok(None),
            Some(v) => serde_json::from_value(v.clone())
                .map(Some)
                .map_err(|e| FieldError::new(key, e)),
        }
    }

    /// Typed value of a key the create check already proved present
    pub fn require<T: DeserializeOwned>(&self, key: &str) -> Result<T, FieldError> {
        self.get(key)?.ok_or_else(|| FieldError::new(key, "value is required"))
    }

    /// Replace `target` with the sent value when `key` is in the body.
    /// An explicit null only fits an `Option` target.
    pub fn merge_into<T: DeserializeOwned>(&self, key: &str, target: &mut T) -> Result<(), FieldError> {
        if let Some(v) = self.0.get(key) {
            *target = serde_json::from_value(v.clone()).map_err(|e| FieldError::new(key, e))?;
        }
        Ok(())
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Payload {
    type Error = PayloadError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(PayloadError::NotAnObject),
        }
    }
}
