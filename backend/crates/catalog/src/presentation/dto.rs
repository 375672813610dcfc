//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, NaiveDate, Utc};
use kernel::error::app_error::{AppError, AppResult};
use kernel::pagination::PageInfo;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::application::item_input::ItemFields;
use crate::domain::entity::{
    evaluation::Evaluation,
    item::Item,
    views::{
        EvaluationStats, EvaluationSummary, EvaluationView, EvaluatorCount, EvaluatorView,
        ItemStats, ItemView, OwnerView,
    },
};
use crate::domain::value_object::image_record::ImageRecord;

// ============================================================================
// Requests
// ============================================================================

/// JSON variant of the item form. Absent fields are `None`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFieldsRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    /// Number or numeric string
    pub purchase_price: Option<Value>,
    pub purchase_date: Option<String>,
    pub purchase_location: Option<String>,
}

impl ItemFieldsRequest {
    pub fn into_fields(self) -> AppResult<ItemFields> {
        let purchase_price = match self.purchase_price {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(_) => return Err(AppError::bad_request("purchasePrice must be a number")),
        };

        Ok(ItemFields {
            title: self.title,
            description: self.description,
            brand: self.brand,
            model: self.model,
            size: self.size,
            color: self.color,
            purchase_price,
            purchase_date: self.purchase_date,
            purchase_location: self.purchase_location,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub status: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub result: Option<String>,
    pub evaluator_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvaluationRequest {
    pub item_id: String,
    pub result: String,
    pub confidence: i64,
    pub notes: Option<String>,
    pub evaluation_criteria: Option<Value>,
}

/// Absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEvaluationRequest {
    pub result: Option<String>,
    pub confidence: Option<i64>,
    pub notes: Option<String>,
    pub evaluation_criteria: Option<Value>,
}

// ============================================================================
// Items
// ============================================================================

/// Owner as shown next to an item. The email is withheld from anonymous callers.
#[derive(Debug, Clone, Serialize)]
pub struct OwnerResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl OwnerResponse {
    fn new(owner: &OwnerView, with_email: bool) -> Self {
        Self {
            id: owner.user_id.into_uuid(),
            name: owner.name.clone(),
            email: with_email.then(|| owner.email.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub brand: String,
    pub model: String,
    pub size: Option<String>,
    pub color: Option<String>,
    /// Decimal string with two places, e.g. `"199.90"`
    pub purchase_price: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_location: Option<String>,
    pub images: Vec<ImageRecord>,
    pub status: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: OwnerResponse,
}

impl ItemResponse {
    pub fn new(item: &Item, owner: &OwnerView, with_email: bool) -> Self {
        Self {
            id: item.item_id.into_uuid(),
            title: item.title.as_str().to_string(),
            description: item.description.clone(),
            brand: item.brand.as_str().to_string(),
            model: item.model.as_str().to_string(),
            size: item.size.clone(),
            color: item.color.clone(),
            purchase_price: item.purchase_price.map(|p| p.to_string()),
            purchase_date: item.purchase_date,
            purchase_location: item.purchase_location.clone(),
            images: item.images.clone(),
            status: item.status.code().to_string(),
            user_id: item.owner_id.into_uuid(),
            created_at: item.created_at,
            updated_at: item.updated_at,
            user: OwnerResponse::new(owner, with_email),
        }
    }
}

/// Item with its evaluation (`null` until evaluated)
#[derive(Debug, Clone, Serialize)]
pub struct ItemDetailResponse {
    #[serde(flatten)]
    pub item: ItemResponse,
    pub evaluation: Option<EvaluationSummaryResponse>,
}

impl ItemDetailResponse {
    pub fn new(view: &ItemView, with_email: bool) -> Self {
        Self {
            item: ItemResponse::new(&view.item, &view.owner, with_email),
            evaluation: view.evaluation.as_ref().map(EvaluationSummaryResponse::from),
        }
    }
}

/// `{message?, item}`
#[derive(Debug, Clone, Serialize)]
pub struct ItemEnvelope<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub item: T,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemListResponse {
    pub items: Vec<ItemDetailResponse>,
    pub pagination: PageInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemStatsBody {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
}

impl From<ItemStats> for ItemStatsBody {
    fn from(stats: ItemStats) -> Self {
        Self {
            total: stats.total,
            pending: stats.pending,
            approved: stats.approved,
            rejected: stats.rejected,
        }
    }
}

// ============================================================================
// Evaluations
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct EvaluatorResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<&EvaluatorView> for EvaluatorResponse {
    fn from(evaluator: &EvaluatorView) -> Self {
        Self {
            id: evaluator.user_id.into_uuid(),
            name: evaluator.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationBody {
    pub id: Uuid,
    pub item_id: Uuid,
    pub evaluator_id: Uuid,
    pub result: String,
    pub confidence: i16,
    pub notes: Option<String>,
    pub evaluation_criteria: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Evaluation> for EvaluationBody {
    fn from(evaluation: &Evaluation) -> Self {
        Self {
            id: evaluation.evaluation_id.into_uuid(),
            item_id: evaluation.item_id.into_uuid(),
            evaluator_id: evaluation.evaluator_id.into_uuid(),
            result: evaluation.result.code().to_string(),
            confidence: evaluation.confidence.value(),
            notes: evaluation.notes.clone(),
            evaluation_criteria: evaluation.criteria.to_value(),
            created_at: evaluation.created_at,
            updated_at: evaluation.updated_at,
        }
    }
}

/// Evaluation embedded in an item payload
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationSummaryResponse {
    #[serde(flatten)]
    pub evaluation: EvaluationBody,
    pub evaluator: EvaluatorResponse,
}

impl From<&EvaluationSummary> for EvaluationSummaryResponse {
    fn from(summary: &EvaluationSummary) -> Self {
        Self {
            evaluation: EvaluationBody::from(&summary.evaluation),
            evaluator: EvaluatorResponse::from(&summary.evaluator),
        }
    }
}

/// Evaluation with its evaluator and the evaluated item
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResponse {
    #[serde(flatten)]
    pub evaluation: EvaluationBody,
    pub evaluator: EvaluatorResponse,
    pub item: ItemResponse,
}

impl EvaluationResponse {
    pub fn new(view: &EvaluationView, with_email: bool) -> Self {
        Self {
            evaluation: EvaluationBody::from(&view.evaluation),
            evaluator: EvaluatorResponse::from(&view.evaluator),
            item: ItemResponse::new(&view.item, &view.owner, with_email),
        }
    }
}

/// `{message?, evaluation}`
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationEnvelope<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub evaluation: T,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationListResponse {
    pub evaluations: Vec<EvaluationResponse>,
    pub pagination: PageInfo,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatorCountBody {
    pub evaluator_id: Uuid,
    pub evaluator_name: String,
    pub count: i64,
}

impl From<EvaluatorCount> for EvaluatorCountBody {
    fn from(count: EvaluatorCount) -> Self {
        Self {
            evaluator_id: count.evaluator_id.into_uuid(),
            evaluator_name: count.evaluator_name,
            count: count.count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationStatsBody {
    pub total: i64,
    pub authentic: i64,
    pub fake: i64,
    pub inconclusive: i64,
    pub by_evaluator: Vec<EvaluatorCountBody>,
}

impl From<EvaluationStats> for EvaluationStatsBody {
    fn from(stats: EvaluationStats) -> Self {
        Self {
            total: stats.total,
            authentic: stats.authentic,
            fake: stats.fake,
            inconclusive: stats.inconclusive,
            by_evaluator: stats.by_evaluator.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Shared envelopes
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse<T> {
    pub stats: T,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_price_accepts_number_or_string() {
        let req: ItemFieldsRequest =
            serde_json::from_value(json!({"purchasePrice": 199.9})).unwrap();
        assert_eq!(req.into_fields().unwrap().purchase_price.as_deref(), Some("199.9"));

        let req: ItemFieldsRequest =
            serde_json::from_value(json!({"purchasePrice": "45.00"})).unwrap();
        assert_eq!(req.into_fields().unwrap().purchase_price.as_deref(), Some("45.00"));

        let req: ItemFieldsRequest =
            serde_json::from_value(json!({"purchasePrice": [1]})).unwrap();
        assert!(req.into_fields().is_err());
    }

    #[test]
    fn test_owner_email_visibility() {
        let owner = OwnerView {
            user_id: kernel::id::UserId::new(),
            name: "Ana".into(),
            email: "ana@example.com".into(),
        };
        let hidden = serde_json::to_value(OwnerResponse::new(&owner, false)).unwrap();
        assert!(hidden.get("email").is_none());

        let shown = serde_json::to_value(OwnerResponse::new(&owner, true)).unwrap();
        assert_eq!(shown["email"], "ana@example.com");
    }
}
