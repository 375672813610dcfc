//! Evaluation Entity

use chrono::{DateTime, Utc};
use kernel::id::{EvaluationId, ItemId, UserId};

use crate::domain::value_object::{
    confidence::Confidence, criteria::Criteria, evaluation_result::EvaluationResult,
    item_status::ItemStatus,
};

/// An admin's verdict on one item
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub evaluation_id: EvaluationId,
    /// At most one evaluation per item
    pub item_id: ItemId,
    pub evaluator_id: UserId,
    pub result: EvaluationResult,
    pub confidence: Confidence,
    pub notes: Option<String>,
    pub criteria: Criteria,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial revision; `notes: Some(None)` clears the notes
#[derive(Debug, Clone, Default)]
pub struct EvaluationPatch {
    pub result: Option<EvaluationResult>,
    pub confidence: Option<Confidence>,
    pub notes: Option<Option<String>>,
    pub criteria: Option<Criteria>,
}

impl Evaluation {
    pub fn new(
        item_id: ItemId,
        evaluator_id: UserId,
        result: EvaluationResult,
        confidence: Confidence,
        notes: Option<String>,
        criteria: Criteria,
    ) -> Self {
        let now = Utc::now();

        Self {
            evaluation_id: EvaluationId::new(),
            item_id,
            evaluator_id,
            result,
            confidence,
            notes,
            criteria,
            created_at: now,
            updated_at: now,
        }
    }

    /// Status the evaluated item must carry
    pub fn item_status(&self) -> ItemStatus {
        self.result.derive_status()
    }

    /// Apply a revision. Returns true when the verdict changed.
    pub fn apply(&mut self, patch: EvaluationPatch) -> bool {
        let previous = self.result;

        if let Some(result) = patch.result {
            self.result = result;
        }
        if let Some(confidence) = patch.confidence {
            self.confidence = confidence;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(criteria) = patch.criteria {
            self.criteria = criteria;
        }
        self.updated_at = Utc::now();

        self.result != previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluation(result: EvaluationResult) -> Evaluation {
        Evaluation::new(
            ItemId::new(),
            UserId::new(),
            result,
            Confidence::new(90).unwrap(),
            Some("Stitching is off".into()),
            Criteria::default(),
        )
    }

    #[test]
    fn test_item_status_follows_result() {
        assert_eq!(evaluation(EvaluationResult::Fake).item_status(), ItemStatus::Rejected);
        assert_eq!(
            evaluation(EvaluationResult::Authentic).item_status(),
            ItemStatus::Approved
        );
    }

    #[test]
    fn test_apply_reports_result_change() {
        let mut eval = evaluation(EvaluationResult::Fake);

        let changed = eval.apply(EvaluationPatch {
            confidence: Some(Confidence::new(70).unwrap()),
            ..Default::default()
        });
        assert!(!changed);
        assert_eq!(eval.confidence.value(), 70);

        let changed = eval.apply(EvaluationPatch {
            result: Some(EvaluationResult::Authentic),
            notes: Some(None),
            ..Default::default()
        });
        assert!(changed);
        assert_eq!(eval.notes, None);
        assert_eq!(eval.item_status(), ItemStatus::Approved);
    }
}
