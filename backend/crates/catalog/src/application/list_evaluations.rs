//! List Evaluations Use Case

use std::sync::Arc;

use kernel::pagination::{PageInfo, PageRequest};

use crate::domain::entity::views::EvaluationView;
use crate::domain::repository::{EvaluationFilter, EvaluationRepository};
use crate::error::CatalogResult;

pub struct ListEvaluationsInput {
    pub filter: EvaluationFilter,
    pub page: PageRequest,
}

#[derive(Debug)]
pub struct ListEvaluationsOutput {
    pub evaluations: Vec<EvaluationView>,
    pub pagination: PageInfo,
}

pub struct ListEvaluationsUseCase<E>
where
    E: EvaluationRepository,
{
    evaluations: Arc<E>,
}

impl<E> ListEvaluationsUseCase<E>
where
    E: EvaluationRepository,
{
    pub fn new(evaluations: Arc<E>) -> Self {
        Self { evaluations }
    }

    pub async fn execute(&self, input: ListEvaluationsInput) -> CatalogResult<ListEvaluationsOutput> {
        let page = self.evaluations.list(&input.filter, &input.page).await?;

        Ok(ListEvaluationsOutput {
            pagination: input.page.info(page.total),
            evaluations: page.rows,
        })
    }
}
