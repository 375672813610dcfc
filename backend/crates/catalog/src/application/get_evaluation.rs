use std::sync::Arc;

use kernel::id::EvaluationId;

use crate::domain::entity::views::EvaluationView;
use crate::domain::repository::EvaluationRepository;
use crate::error::{CatalogError, CatalogResult};

pub struct GetEvaluationUseCase<E>
where
    E: EvaluationRepository,
{
    evaluations: Arc<E>,
}

impl<E> GetEvaluationUseCase<E>
where
    E: EvaluationRepository,
{
    pub fn new(evaluations: Arc<E>) -> Self {
        Self { evaluations }
    }

    pub async fn execute(&self, evaluation_id: &EvaluationId) -> CatalogResult<EvaluationView> {
        self.evaluations
            .view(evaluation_id)
            .await?
            .ok_or(CatalogError::EvaluationNotFound)
    }
}
