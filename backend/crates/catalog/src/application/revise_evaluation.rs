//! Revise Evaluation Use Case
//!
//! Only the original evaluator or an admin may revise. A changed verdict
//! re-derives the item status in the same write.

use std::sync::Arc;

use auth::AuthUser;
use kernel::id::EvaluationId;
use serde_json::Value;

use crate::domain::entity::{evaluation::EvaluationPatch, views::EvaluationView};
use crate::domain::repository::EvaluationRepository;
use crate::domain::value_object::{
    confidence::Confidence, criteria::Criteria, evaluation_result::EvaluationResult,
    item_fields::optional_text,
};
use crate::error::{CatalogError, CatalogResult};

/// Partial revision; `None` keeps the current value and an empty
/// `notes` string clears the notes.
#[derive(Debug, Default)]
pub struct ReviseEvaluationInput {
    pub result: Option<String>,
    pub confidence: Option<i64>,
    pub notes: Option<String>,
    pub criteria: Option<Value>,
}

pub struct ReviseEvaluationUseCase<E>
where
    E: EvaluationRepository,
{
    evaluations: Arc<E>,
}

impl<E> ReviseEvaluationUseCase<E>
where
    E: EvaluationRepository,
{
    pub fn new(evaluations: Arc<E>) -> Self {
        Self { evaluations }
    }

    pub async fn execute(
        &self,
        caller: &AuthUser,
        evaluation_id: &EvaluationId,
        input: ReviseEvaluationInput,
    ) -> CatalogResult<EvaluationView> {
        let mut evaluation = self
            .evaluations
            .find_by_id(evaluation_id)
            .await?
            .ok_or(CatalogError::EvaluationNotFound)?;

        if !caller.can_manage(&evaluation.evaluator_id) {
            return Err(CatalogError::AccessDenied);
        }

        let patch = EvaluationPatch {
            result: input
                .result
                .as_deref()
                .map(EvaluationResult::parse)
                .transpose()?,
            confidence: input.confidence.map(Confidence::new).transpose()?,
            notes: input.notes.as_deref().map(optional_text),
            criteria: input.criteria.map(Criteria::new).transpose()?,
        };

        let result_changed = evaluation.apply(patch);
        self.evaluations.update_with_status(&evaluation).await?;

        tracing::info!(
            evaluation_id = %evaluation.evaluation_id,
            item_id = %evaluation.item_id,
            user_id = %caller.user_id,
            result = %evaluation.result,
            result_changed,
            "Evaluation revised"
        );

        self.evaluations
            .view(&evaluation.evaluation_id)
            .await?
            .ok_or(CatalogError::EvaluationNotFound)
    }
}
