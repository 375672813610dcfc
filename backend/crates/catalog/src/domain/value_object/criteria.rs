//! Structured evaluation criteria
//!
//! Free-form JSON object, e.g. `{"stitching": "ok", "logo": "misaligned"}`.

use kernel::error::app_error::{AppError, AppResult};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Criteria(Map<String, Value>);

impl Criteria {
    /// `null` means no criteria; anything else must be an object
    pub fn new(value: Value) -> AppResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::default()),
            _ => Err(AppError::bad_request(
                "evaluationCriteria must be a JSON object",
            )),
        }
    }

    /// Create from database value. Non-object values degrade to empty.
    pub fn from_db(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
