//! Submit Evaluation Use Case
//!
//! Records an admin's verdict and moves the item to the derived status.

use std::sync::Arc;

use auth::AuthUser;
use kernel::id::ItemId;
use serde_json::Value;

use crate::domain::entity::{evaluation::Evaluation, views::EvaluationView};
use crate::domain::repository::EvaluationRepository;
use crate::domain::value_object::{
    confidence::Confidence, criteria::Criteria, evaluation_result::EvaluationResult,
    item_fields::optional_text,
};
use crate::error::{CatalogError, CatalogResult};

pub struct SubmitEvaluationInput {
    pub item_id: ItemId,
    pub result: String,
    pub confidence: i64,
    pub notes: Option<String>,
    pub criteria: Option<Value>,
}

pub struct SubmitEvaluationUseCase<E>
where
    E: EvaluationRepository,
{
    evaluations: Arc<E>,
}

impl<E> SubmitEvaluationUseCase<E>
where
    E: EvaluationRepository,
{
    pub fn new(evaluations: Arc<E>) -> Self {
        Self { evaluations }
    }

    pub async fn execute(
        &self,
        evaluator: &AuthUser,
        input: SubmitEvaluationInput,
    ) -> CatalogResult<EvaluationView> {
        if !evaluator.is_admin() {
            return Err(CatalogError::AccessDenied);
        }

        let result = EvaluationResult::parse(&input.result)?;
        let confidence = Confidence::new(input.confidence)?;
        let criteria = Criteria::new(input.criteria.unwrap_or(Value::Null))?;
        let notes = input.notes.as_deref().and_then(optional_text);

        let evaluation = Evaluation::new(
            input.item_id,
            evaluator.user_id,
            result,
            confidence,
            notes,
            criteria,
        );

        self.evaluations.create_with_status(&evaluation).await?;

        tracing::info!(
            evaluation_id = %evaluation.evaluation_id,
            item_id = %evaluation.item_id,
            user_id = %evaluator.user_id,
            result = %evaluation.result,
            status = %evaluation.item_status(),
            "Evaluation submitted"
        );

        self.evaluations
            .view(&evaluation.evaluation_id)
            .await?
            .ok_or_else(|| CatalogError::Internal("Created evaluation is missing".to_string()))
    }
}
