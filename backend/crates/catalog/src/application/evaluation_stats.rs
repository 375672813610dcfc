use std::sync::Arc;

use crate::domain::entity::views::EvaluationStats;
use crate::domain::repository::EvaluationRepository;
use crate::error::CatalogResult;

/// Verdict counts plus a per-evaluator breakdown (admin)
pub struct EvaluationStatsUseCase<E>
where
    E: EvaluationRepository,
{
    evaluations: Arc<E>,
}

impl<E> EvaluationStatsUseCase<E>
where
    E: EvaluationRepository,
{
    pub fn new(evaluations: Arc<E>) -> Self {
        Self { evaluations }
    }

    pub async fn execute(&self) -> CatalogResult<EvaluationStats> {
        self.evaluations.stats().await
    }
}
