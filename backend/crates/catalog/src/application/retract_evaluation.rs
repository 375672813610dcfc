//! Retract Evaluation Use Case

use std::sync::Arc;

use auth::AuthUser;
use kernel::id::EvaluationId;

use crate::domain::repository::EvaluationRepository;
use crate::error::{CatalogError, CatalogResult};

pub struct RetractEvaluationUseCase<E>
where
    E: EvaluationRepository,
{
    evaluations: Arc<E>,
}

impl<E> RetractEvaluationUseCase<E>
where
    E: EvaluationRepository,
{
    pub fn new(evaluations: Arc<E>) -> Self {
        Self { evaluations }
    }

    /// Admin only. The item returns to `pending`.
    pub async fn execute(&self, caller: &AuthUser, evaluation_id: &EvaluationId) -> CatalogResult<()> {
        if !caller.is_admin() {
            return Err(CatalogError::AccessDenied);
        }

        if !self.evaluations.delete_with_reset(evaluation_id).await? {
            return Err(CatalogError::EvaluationNotFound);
        }

        tracing::info!(
            evaluation_id = %evaluation_id,
            user_id = %caller.user_id,
            "Evaluation retracted"
        );

        Ok(())
    }
}
