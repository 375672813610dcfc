//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use auth::{AuthUser, Caller};
use kernel::error::app_error::AppError;
use kernel::id::{EvaluationId, ItemId, UserId};
use kernel::pagination::PageRequest;
use std::sync::Arc;

use crate::application::config::CatalogConfig;
use crate::application::{
    CreateItemInput, CreateItemUseCase, DeleteItemUseCase, EvaluationStatsUseCase,
    GetEvaluationUseCase, GetItemUseCase, ItemStatsUseCase, ListEvaluationsInput,
    ListEvaluationsUseCase, ListItemsInput, ListItemsUseCase, RetractEvaluationUseCase,
    ReviseEvaluationInput, ReviseEvaluationUseCase, SubmitEvaluationInput,
    SubmitEvaluationUseCase, UpdateItemInput, UpdateItemUseCase,
};
use crate::domain::image_store::ImageStore;
use crate::domain::repository::{
    EvaluationFilter, EvaluationRepository, ItemFilter, ItemRepository,
};
use crate::domain::value_object::{evaluation_result::EvaluationResult, item_status::ItemStatus};
use crate::error::{CatalogError, CatalogResult};
use crate::presentation::dto::{
    CreateEvaluationRequest, EvaluationEnvelope, EvaluationListQuery, EvaluationListResponse,
    EvaluationResponse, EvaluationStatsBody, ItemDetailResponse, ItemEnvelope, ItemListQuery,
    ItemListResponse, ItemStatsBody, MessageResponse, StatsResponse, UpdateEvaluationRequest,
};
use crate::presentation::multipart::ItemForm;

/// Shared state for catalog handlers
#[derive(Clone)]
pub struct CatalogAppState<R, S>
where
    R: ItemRepository + EvaluationRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub store: Arc<S>,
    pub config: Arc<CatalogConfig>,
}

// ============================================================================
// Items (requires authentication)
// ============================================================================

/// POST /api/items
pub async fn create_item<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    Extension(auth_user): Extension<AuthUser>,
    form: ItemForm,
) -> CatalogResult<impl IntoResponse>
where
    R: ItemRepository + EvaluationRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let use_case = CreateItemUseCase::new(state.repo.clone(), state.store.clone(), state.config.clone());

    let view = use_case
        .execute(
            &auth_user,
            CreateItemInput {
                fields: form.fields,
                images: form.images,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ItemEnvelope {
            message: Some("Item created successfully".to_string()),
            item: ItemDetailResponse::new(&view, true),
        }),
    ))
}

/// GET /api/items/my-items
pub async fn list_my_items<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<ItemListQuery>,
) -> CatalogResult<Json<ItemListResponse>>
where
    R: ItemRepository + EvaluationRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let filter = ItemFilter {
        status: parse_status_filter(query.status.as_deref())?,
        owner_id: Some(auth_user.user_id),
    };

    list_items_with(&state, filter, &query, true).await
}

/// GET /api/items/{id} (owner or admin)
pub async fn get_item<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> CatalogResult<Json<ItemEnvelope<ItemDetailResponse>>>
where
    R: ItemRepository + EvaluationRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let item_id = parse_item_id(&id)?;

    let view = GetItemUseCase::new(state.repo.clone())
        .execute(&auth_user, &item_id)
        .await?;

    Ok(Json(ItemEnvelope {
        message: None,
        item: ItemDetailResponse::new(&view, true),
    }))
}

/// PUT /api/items/{id} (owner or admin)
pub async fn update_item<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
    form: ItemForm,
) -> CatalogResult<Json<ItemEnvelope<ItemDetailResponse>>>
where
    R: ItemRepository + EvaluationRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let item_id = parse_item_id(&id)?;

    let use_case = UpdateItemUseCase::new(state.repo.clone(), state.store.clone(), state.config.clone());
    let view = use_case
        .execute(
            &auth_user,
            &item_id,
            UpdateItemInput {
                fields: form.fields,
                images: form.images,
            },
        )
        .await?;

    Ok(Json(ItemEnvelope {
        message: Some("Item updated successfully".to_string()),
        item: ItemDetailResponse::new(&view, true),
    }))
}

/// DELETE /api/items/{id} (owner or admin)
pub async fn delete_item<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> CatalogResult<Json<MessageResponse>>
where
    R: ItemRepository + EvaluationRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let item_id = parse_item_id(&id)?;

    DeleteItemUseCase::new(state.repo.clone(), state.store.clone())
        .execute(&auth_user, &item_id)
        .await?;

    Ok(Json(MessageResponse {
        message: "Item deleted successfully".to_string(),
    }))
}

// ============================================================================
// Items (admin)
// ============================================================================

/// GET /api/items
pub async fn list_items<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    Query(query): Query<ItemListQuery>,
) -> CatalogResult<Json<ItemListResponse>>
where
    R: ItemRepository + EvaluationRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let filter = ItemFilter {
        status: parse_status_filter(query.status.as_deref())?,
        owner_id: parse_user_filter("userId", query.user_id.as_deref())?,
    };

    list_items_with(&state, filter, &query, true).await
}

/// GET /api/items/stats
pub async fn item_stats<R, S>(
    State(state): State<CatalogAppState<R, S>>,
) -> CatalogResult<Json<StatsResponse<ItemStatsBody>>>
where
    R: ItemRepository + EvaluationRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let stats = ItemStatsUseCase::new(state.repo.clone()).execute().await?;

    Ok(Json(StatsResponse {
        stats: stats.into(),
    }))
}

// ============================================================================
// Items (public, optional authentication)
// ============================================================================

/// GET /api/items/public
pub async fn list_public_items<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    Extension(caller): Extension<Caller>,
    Query(query): Query<ItemListQuery>,
) -> CatalogResult<Json<ItemListResponse>>
where
    R: ItemRepository + EvaluationRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let filter = ItemFilter {
        status: parse_status_filter(query.status.as_deref())?,
        owner_id: parse_user_filter("userId", query.user_id.as_deref())?,
    };

    list_items_with(&state, filter, &query, caller.is_authenticated()).await
}

/// GET /api/items/public/{id}
pub async fn get_public_item<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> CatalogResult<Json<ItemEnvelope<ItemDetailResponse>>>
where
    R: ItemRepository + EvaluationRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let item_id = parse_item_id(&id)?;

    let view = GetItemUseCase::new(state.repo.clone())
        .public(&item_id)
        .await?;

    Ok(Json(ItemEnvelope {
        message: None,
        item: ItemDetailResponse::new(&view, caller.is_authenticated()),
    }))
}

// ============================================================================
// Evaluations (admin)
// ============================================================================

/// POST /api/evaluations
pub async fn create_evaluation<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    Extension(auth_user): Extension<AuthUser>,
    payload: Result<Json<CreateEvaluationRequest>, JsonRejection>,
) -> CatalogResult<impl IntoResponse>
where
    R: ItemRepository + EvaluationRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let item_id = parse_item_id(&req.item_id)?;

    let view = SubmitEvaluationUseCase::new(state.repo.clone())
        .execute(
            &auth_user,
            SubmitEvaluationInput {
                item_id,
                result: req.result,
                confidence: req.confidence,
                notes: req.notes,
                criteria: req.evaluation_criteria,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(EvaluationEnvelope {
            message: Some("Evaluation created successfully".to_string()),
            evaluation: EvaluationResponse::new(&view, true),
        }),
    ))
}

/// GET /api/evaluations
pub async fn list_evaluations<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    Query(query): Query<EvaluationListQuery>,
) -> CatalogResult<Json<EvaluationListResponse>>
where
    R: ItemRepository + EvaluationRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let filter = EvaluationFilter {
        result: parse_result_filter(query.result.as_deref())?,
        evaluator_id: parse_user_filter("evaluatorId", query.evaluator_id.as_deref())?,
    };

    list_evaluations_with(&state, filter, &query, true).await
}

/// GET /api/evaluations/my-evaluations
pub async fn list_my_evaluations<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<EvaluationListQuery>,
) -> CatalogResult<Json<EvaluationListResponse>>
where
    R: ItemRepository + EvaluationRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let filter = EvaluationFilter {
        result: parse_result_filter(query.result.as_deref())?,
        evaluator_id: Some(auth_user.user_id),
    };

    list_evaluations_with(&state, filter, &query, true).await
}

/// GET /api/evaluations/{id}
pub async fn get_evaluation<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    Path(id): Path<String>,
) -> CatalogResult<Json<EvaluationEnvelope<EvaluationResponse>>>
where
    R: ItemRepository + EvaluationRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let evaluation_id = parse_evaluation_id(&id)?;

    let view = GetEvaluationUseCase::new(state.repo.clone())
        .execute(&evaluation_id)
        .await?;

    Ok(Json(EvaluationEnvelope {
        message: None,
        evaluation: EvaluationResponse::new(&view, true),
    }))
}

/// PUT /api/evaluations/{id}
pub async fn update_evaluation<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateEvaluationRequest>, JsonRejection>,
) -> CatalogResult<Json<EvaluationEnvelope<EvaluationResponse>>>
where
    R: ItemRepository + EvaluationRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let evaluation_id = parse_evaluation_id(&id)?;
    let Json(req) = payload?;

    let view = ReviseEvaluationUseCase::new(state.repo.clone())
        .execute(
            &auth_user,
            &evaluation_id,
            ReviseEvaluationInput {
                result: req.result,
                confidence: req.confidence,
                notes: req.notes,
                criteria: req.evaluation_criteria,
            },
        )
        .await?;

    Ok(Json(EvaluationEnvelope {
        message: Some("Evaluation updated successfully".to_string()),
        evaluation: EvaluationResponse::new(&view, true),
    }))
}

/// DELETE /api/evaluations/{id}
pub async fn delete_evaluation<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> CatalogResult<Json<MessageResponse>>
where
    R: ItemRepository + EvaluationRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let evaluation_id = parse_evaluation_id(&id)?;

    RetractEvaluationUseCase::new(state.repo.clone())
        .execute(&auth_user, &evaluation_id)
        .await?;

    Ok(Json(MessageResponse {
        message: "Evaluation deleted successfully".to_string(),
    }))
}

/// GET /api/evaluations/stats
pub async fn evaluation_stats<R, S>(
    State(state): State<CatalogAppState<R, S>>,
) -> CatalogResult<Json<StatsResponse<EvaluationStatsBody>>>
where
    R: ItemRepository + EvaluationRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let stats = EvaluationStatsUseCase::new(state.repo.clone())
        .execute()
        .await?;

    Ok(Json(StatsResponse {
        stats: stats.into(),
    }))
}

// ============================================================================
// Evaluations (public, optional authentication)
// ============================================================================

/// GET /api/evaluations/public
pub async fn list_public_evaluations<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    Extension(caller): Extension<Caller>,
    Query(query): Query<EvaluationListQuery>,
) -> CatalogResult<Json<EvaluationListResponse>>
where
    R: ItemRepository + EvaluationRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let filter = EvaluationFilter {
        result: parse_result_filter(query.result.as_deref())?,
        evaluator_id: parse_user_filter("evaluatorId", query.evaluator_id.as_deref())?,
    };

    list_evaluations_with(&state, filter, &query, caller.is_authenticated()).await
}

/// GET /api/evaluations/public/{id}
pub async fn get_public_evaluation<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> CatalogResult<Json<EvaluationEnvelope<EvaluationResponse>>>
where
    R: ItemRepository + EvaluationRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let evaluation_id = parse_evaluation_id(&id)?;

    let view = GetEvaluationUseCase::new(state.repo.clone())
        .execute(&evaluation_id)
        .await?;

    Ok(Json(EvaluationEnvelope {
        message: None,
        evaluation: EvaluationResponse::new(&view, caller.is_authenticated()),
    }))
}

// ============================================================================
// Helper Functions
// ============================================================================

async fn list_items_with<R, S>(
    state: &CatalogAppState<R, S>,
    filter: ItemFilter,
    query: &ItemListQuery,
    with_email: bool,
) -> CatalogResult<Json<ItemListResponse>>
where
    R: ItemRepository + EvaluationRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let output = ListItemsUseCase::new(state.repo.clone())
        .execute(ListItemsInput {
            filter,
            page: PageRequest::from_query(query.page.as_deref(), query.limit.as_deref()),
        })
        .await?;

    Ok(Json(ItemListResponse {
        items: output
            .items
            .iter()
            .map(|view| ItemDetailResponse::new(view, with_email))
            .collect(),
        pagination: output.pagination,
    }))
}

async fn list_evaluations_with<R, S>(
    state: &CatalogAppState<R, S>,
    filter: EvaluationFilter,
    query: &EvaluationListQuery,
    with_email: bool,
) -> CatalogResult<Json<EvaluationListResponse>>
where
    R: ItemRepository + EvaluationRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let output = ListEvaluationsUseCase::new(state.repo.clone())
        .execute(ListEvaluationsInput {
            filter,
            page: PageRequest::from_query(query.page.as_deref(), query.limit.as_deref()),
        })
        .await?;

    Ok(Json(EvaluationListResponse {
        evaluations: output
            .evaluations
            .iter()
            .map(|view| EvaluationResponse::new(view, with_email))
            .collect(),
        pagination: output.pagination,
    }))
}

/// An id that is not a UUID cannot name an existing item
fn parse_item_id(raw: &str) -> CatalogResult<ItemId> {
    raw.trim().parse().map_err(|_| CatalogError::ItemNotFound)
}

fn parse_evaluation_id(raw: &str) -> CatalogResult<EvaluationId> {
    raw.trim().parse().map_err(|_| CatalogError::EvaluationNotFound)
}

/// Blank filter values mean "no filter"
fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_status_filter(raw: Option<&str>) -> CatalogResult<Option<ItemStatus>> {
    non_blank(raw)
        .map(|code| {
            ItemStatus::from_code(code)
                .ok_or_else(|| AppError::bad_request(format!("Invalid status filter: {code}")).into())
        })
        .transpose()
}

fn parse_result_filter(raw: Option<&str>) -> CatalogResult<Option<EvaluationResult>> {
    non_blank(raw)
        .map(|code| {
            EvaluationResult::from_code(code)
                .ok_or_else(|| AppError::bad_request(format!("Invalid result filter: {code}")).into())
        })
        .transpose()
}

fn parse_user_filter(field: &str, raw: Option<&str>) -> CatalogResult<Option<UserId>> {
    non_blank(raw)
        .map(|v| {
            v.parse::<UserId>()
                .map_err(|_| AppError::bad_request(format!("Invalid {field}: {v}")).into())
        })
        .transpose()
}
