//! Evaluation verdict and the item status it implies

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::item_status::ItemStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum EvaluationResult {
    Authentic = 0,
    Fake = 1,
    Inconclusive = 2,
}

impl EvaluationResult {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            EvaluationResult::Authentic => "authentic",
            EvaluationResult::Fake => "fake",
            EvaluationResult::Inconclusive => "inconclusive",
        }
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(EvaluationResult::Authentic),
            1 => Some(EvaluationResult::Fake),
            2 => Some(EvaluationResult::Inconclusive),
            _ => {
                tracing::error!("Invalid EvaluationResult id: {}", id);
                None
            }
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "authentic" => Some(EvaluationResult::Authentic),
            "fake" => Some(EvaluationResult::Fake),
            "inconclusive" => Some(EvaluationResult::Inconclusive),
            _ => None,
        }
    }

    /// Parse client input, rejecting anything outside the three verdicts
    pub fn parse(code: &str) -> AppResult<Self> {
        let code = code.trim();
        Self::from_code(code).ok_or_else(|| {
            AppError::bad_request(format!("Invalid result: {code}"))
                .with_action("Use one of: authentic, fake, inconclusive")
        })
    }

    /// Item status implied by this verdict
    pub const fn derive_status(&self) -> ItemStatus {
        match self {
            EvaluationResult::Authentic => ItemStatus::Approved,
            EvaluationResult::Fake => ItemStatus::Rejected,
            EvaluationResult::Inconclusive => ItemStatus::Pending,
        }
    }
}

impl fmt::Display for EvaluationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
