//! Read projections
//!
//! Fixed shapes returned by the repositories for each kind of listing,
//! instead of loading related rows ad hoc.

use kernel::id::UserId;

use super::{evaluation::Evaluation, item::Item};

/// Owner of an item as shown next to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerView {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
}

/// Admin who authored an evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluatorView {
    pub user_id: UserId,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct EvaluationSummary {
    pub evaluation: Evaluation,
    pub evaluator: EvaluatorView,
}

/// Item with its owner and, once evaluated, the verdict
#[derive(Debug, Clone)]
pub struct ItemView {
    pub item: Item,
    pub owner: OwnerView,
    pub evaluation: Option<EvaluationSummary>,
}

/// Evaluation with its evaluator and the evaluated item
#[derive(Debug, Clone)]
pub struct EvaluationView {
    pub evaluation: Evaluation,
    pub evaluator: EvaluatorView,
    pub item: Item,
    pub owner: OwnerView,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemStats {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluatorCount {
    pub evaluator_id: UserId,
    pub evaluator_name: String,
    pub count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationStats {
    pub total: i64,
    pub authentic: i64,
    pub fake: i64,
    pub inconclusive: i64,
    /// Most active evaluator first
    pub by_evaluator: Vec<EvaluatorCount>,
}
