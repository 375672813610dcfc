use kernel::error::app_error::{AppError, AppResult};
use serde::Serialize;

pub const CONFIDENCE_MIN: i64 = 1;
pub const CONFIDENCE_MAX: i64 = 100;

/// Evaluator's confidence in a verdict, a percentage in `1..=100`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Confidence(i16);

impl Confidence {
    pub fn new(value: i64) -> AppResult<Self> {
        if !(CONFIDENCE_MIN..=CONFIDENCE_MAX).contains(&value) {
            return Err(AppError::bad_request(format!(
                "Confidence must be between {CONFIDENCE_MIN} and {CONFIDENCE_MAX}"
            )));
        }
        Ok(Self(value as i16))
    }

    /// Create from database value (guarded by a CHECK constraint)
    pub fn from_db(value: i16) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i16 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_inclusive() {
        assert!(Confidence::new(1).is_ok());
        assert!(Confidence::new(100).is_ok());
        assert_eq!(Confidence::new(90).unwrap().value(), 90);
    }

    #[test]
    fn test_out_of_range_rejected() {
        for value in [0, -5, 101, i64::MAX] {
            let err = Confidence::new(value).unwrap_err();
            assert_eq!(err.status_code(), 400);
        }
    }
}
