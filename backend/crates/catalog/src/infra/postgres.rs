//! PostgreSQL Repository Implementations

use chrono::{DateTime, NaiveDate, Utc};
use kernel::error::conversions::is_unique_violation;
use kernel::id::{EvaluationId, ItemId, UserId};
use kernel::pagination::{Page, PageRequest};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::domain::entity::{
    evaluation::Evaluation,
    item::Item,
    views::{
        EvaluationStats, EvaluationSummary, EvaluationView, EvaluatorCount, EvaluatorView,
        ItemStats, ItemView, OwnerView,
    },
};
use crate::domain::repository::{
    EvaluationFilter, EvaluationRepository, ItemFilter, ItemRepository,
};
use crate::domain::value_object::{
    confidence::Confidence,
    criteria::Criteria,
    evaluation_result::EvaluationResult,
    image_record::ImageRecord,
    item_fields::{Brand, ModelName, Price, Title},
    item_status::ItemStatus,
};
use crate::error::{CatalogError, CatalogResult};

/// PostgreSQL-backed item and evaluation repository
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const ITEM_COLUMNS: &str = r#"
    i.item_id,
    i.owner_id,
    i.title,
    i.description,
    i.brand,
    i.model,
    i.size,
    i.color,
    i.purchase_price_cents,
    i.purchase_date,
    i.purchase_location,
    i.images,
    i.item_status,
    i.created_at,
    i.updated_at
"#;

/// Evaluation columns without `item_id`, which the item side already selects
const EVALUATION_DETAIL_COLUMNS: &str = r#"
    e.evaluation_id,
    e.evaluator_id,
    e.result,
    e.confidence,
    e.notes,
    e.criteria,
    e.created_at AS evaluation_created_at,
    e.updated_at AS evaluation_updated_at
"#;

fn item_view_query(tail: &str) -> String {
    format!(
        r#"
        SELECT
            {ITEM_COLUMNS},
            {EVALUATION_DETAIL_COLUMNS},
            o.display_name AS owner_name,
            o.email AS owner_email,
            ev.display_name AS evaluator_name
        FROM items i
        JOIN users o ON o.user_id = i.owner_id
        LEFT JOIN evaluations e ON e.item_id = i.item_id
        LEFT JOIN users ev ON ev.user_id = e.evaluator_id
        {tail}
        "#
    )
}

fn evaluation_view_query(tail: &str) -> String {
    format!(
        r#"
        SELECT
            {ITEM_COLUMNS},
            {EVALUATION_DETAIL_COLUMNS},
            o.display_name AS owner_name,
            o.email AS owner_email,
            ev.display_name AS evaluator_name
        FROM evaluations e
        JOIN items i ON i.item_id = e.item_id
        JOIN users o ON o.user_id = i.owner_id
        JOIN users ev ON ev.user_id = e.evaluator_id
        {tail}
        "#
    )
}

// ============================================================================
// Item Repository Implementation
// ============================================================================

impl ItemRepository for PgCatalogRepository {
    async fn create(&self, item: &Item) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO items (
                item_id,
                owner_id,
                title,
                description,
                brand,
                model,
                size,
                color,
                purchase_price_cents,
                purchase_date,
                purchase_location,
                images,
                item_status,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(item.item_id.as_uuid())
        .bind(item.owner_id.as_uuid())
        .bind(item.title.as_str())
        .bind(item.description.as_deref())
        .bind(item.brand.as_str())
        .bind(item.model.as_str())
        .bind(item.size.as_deref())
        .bind(item.color.as_deref())
        .bind(item.purchase_price.map(|p| p.cents()))
        .bind(item.purchase_date)
        .bind(item.purchase_location.as_deref())
        .bind(Json(&item.images))
        .bind(item.status.id())
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, item_id: &ItemId) -> CatalogResult<Option<Item>> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items i WHERE i.item_id = $1"
        ))
        .bind(item_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ItemRow::into_item).transpose()
    }

    async fn update(&self, item: &Item, new_images: &[ImageRecord]) -> CatalogResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE items SET
                title = $2,
                description = $3,
                brand = $4,
                model = $5,
                size = $6,
                color = $7,
                purchase_price_cents = $8,
                purchase_date = $9,
                purchase_location = $10,
                images = images || $11::jsonb,
                updated_at = $12
            WHERE item_id = $1
            "#,
        )
        .bind(item.item_id.as_uuid())
        .bind(item.title.as_str())
        .bind(item.description.as_deref())
        .bind(item.brand.as_str())
        .bind(item.model.as_str())
        .bind(item.size.as_deref())
        .bind(item.color.as_deref())
        .bind(item.purchase_price.map(|p| p.cents()))
        .bind(item.purchase_date)
        .bind(item.purchase_location.as_deref())
        .bind(Json(new_images))
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::ItemNotFound);
        }
        Ok(())
    }

    async fn delete(&self, item_id: &ItemId) -> CatalogResult<bool> {
        let result = sqlx::query("DELETE FROM items WHERE item_id = $1")
            .bind(item_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn view(&self, item_id: &ItemId) -> CatalogResult<Option<ItemView>> {
        let row = sqlx::query_as::<_, ItemViewRow>(&item_view_query("WHERE i.item_id = $1"))
            .bind(item_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(ItemViewRow::into_view).transpose()
    }

    async fn list(&self, filter: &ItemFilter, page: &PageRequest) -> CatalogResult<Page<ItemView>> {
        let status = filter.status.map(|s| s.id());
        let owner_id = filter.owner_id.map(UserId::into_uuid);

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM items i
            WHERE ($1::smallint IS NULL OR i.item_status = $1)
              AND ($2::uuid IS NULL OR i.owner_id = $2)
            "#,
        )
        .bind(status)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, ItemViewRow>(&item_view_query(
            r#"
            WHERE ($1::smallint IS NULL OR i.item_status = $1)
              AND ($2::uuid IS NULL OR i.owner_id = $2)
            ORDER BY i.created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        ))
        .bind(status)
        .bind(owner_id)
        .bind(page.limit() as i64)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let items = rows
            .into_iter()
            .map(ItemViewRow::into_view)
            .collect::<CatalogResult<Vec<_>>>()?;

        Ok(Page::new(items, total))
    }

    async fn stats(&self) -> CatalogResult<ItemStats> {
        let row = sqlx::query_as::<_, ItemStatsRow>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE item_status = $1) AS pending,
                COUNT(*) FILTER (WHERE item_status = $2) AS approved,
                COUNT(*) FILTER (WHERE item_status = $3) AS rejected
            FROM items
            "#,
        )
        .bind(ItemStatus::Pending.id())
        .bind(ItemStatus::Approved.id())
        .bind(ItemStatus::Rejected.id())
        .fetch_one(&self.pool)
        .await?;

        Ok(ItemStats {
            total: row.total,
            pending: row.pending,
            approved: row.approved,
            rejected: row.rejected,
        })
    }
}

// ============================================================================
// Evaluation Repository Implementation
// ============================================================================

/// Lock the item row for the rest of the transaction
async fn lock_item(conn: &mut PgConnection, item_id: &ItemId) -> CatalogResult<()> {
    sqlx::query_scalar::<_, Uuid>("SELECT item_id FROM items WHERE item_id = $1 FOR UPDATE")
        .bind(item_id.as_uuid())
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(CatalogError::ItemNotFound)?;

    Ok(())
}

async fn set_item_status(
    conn: &mut PgConnection,
    item_id: &ItemId,
    status: ItemStatus,
) -> CatalogResult<()> {
    sqlx::query("UPDATE items SET item_status = $2, updated_at = $3 WHERE item_id = $1")
        .bind(item_id.as_uuid())
        .bind(status.id())
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?;

    Ok(())
}

impl EvaluationRepository for PgCatalogRepository {
    async fn create_with_status(&self, evaluation: &Evaluation) -> CatalogResult<()> {
        let mut tx = self.pool.begin().await?;

        lock_item(&mut tx, &evaluation.item_id).await?;

        let evaluated = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM evaluations WHERE item_id = $1)",
        )
        .bind(evaluation.item_id.as_uuid())
        .fetch_one(&mut *tx)
        .await?;

        if evaluated {
            return Err(CatalogError::AlreadyEvaluated);
        }

        sqlx::query(
            r#"
            INSERT INTO evaluations (
                evaluation_id,
                item_id,
                evaluator_id,
                result,
                confidence,
                notes,
                criteria,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(evaluation.evaluation_id.as_uuid())
        .bind(evaluation.item_id.as_uuid())
        .bind(evaluation.evaluator_id.as_uuid())
        .bind(evaluation.result.id())
        .bind(evaluation.confidence.value())
        .bind(evaluation.notes.as_deref())
        .bind(Json(evaluation.criteria.to_value()))
        .bind(evaluation.created_at)
        .bind(evaluation.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_unique_evaluation)?;

        set_item_status(&mut tx, &evaluation.item_id, evaluation.item_status()).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn find_by_id(&self, evaluation_id: &EvaluationId) -> CatalogResult<Option<Evaluation>> {
        let row = sqlx::query_as::<_, EvaluationRow>(&format!(
            "SELECT e.item_id, {EVALUATION_DETAIL_COLUMNS} FROM evaluations e WHERE e.evaluation_id = $1"
        ))
        .bind(evaluation_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(EvaluationRow::into_evaluation).transpose()
    }

    async fn update_with_status(&self, evaluation: &Evaluation) -> CatalogResult<()> {
        let mut tx = self.pool.begin().await?;

        lock_item(&mut tx, &evaluation.item_id).await?;

        let result = sqlx::query(
            r#"
            UPDATE evaluations SET
                result = $2,
                confidence = $3,
                notes = $4,
                criteria = $5,
                updated_at = $6
            WHERE evaluation_id = $1
            "#,
        )
        .bind(evaluation.evaluation_id.as_uuid())
        .bind(evaluation.result.id())
        .bind(evaluation.confidence.value())
        .bind(evaluation.notes.as_deref())
        .bind(Json(evaluation.criteria.to_value()))
        .bind(evaluation.updated_at)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::EvaluationNotFound);
        }

        set_item_status(&mut tx, &evaluation.item_id, evaluation.item_status()).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn delete_with_reset(&self, evaluation_id: &EvaluationId) -> CatalogResult<bool> {
        let mut tx = self.pool.begin().await?;

        let item_id = sqlx::query_scalar::<_, Uuid>(
            "DELETE FROM evaluations WHERE evaluation_id = $1 RETURNING item_id",
        )
        .bind(evaluation_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(item_id) = item_id else {
            return Ok(false);
        };

        set_item_status(&mut tx, &ItemId::from_uuid(item_id), ItemStatus::Pending).await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn view(&self, evaluation_id: &EvaluationId) -> CatalogResult<Option<EvaluationView>> {
        let row = sqlx::query_as::<_, EvaluationViewRow>(&evaluation_view_query(
            "WHERE e.evaluation_id = $1",
        ))
        .bind(evaluation_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(EvaluationViewRow::into_view).transpose()
    }

    async fn list(
        &self,
        filter: &EvaluationFilter,
        page: &PageRequest,
    ) -> CatalogResult<Page<EvaluationView>> {
        let result = filter.result.map(|r| r.id());
        let evaluator_id = filter.evaluator_id.map(UserId::into_uuid);

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM evaluations e
            WHERE ($1::smallint IS NULL OR e.result = $1)
              AND ($2::uuid IS NULL OR e.evaluator_id = $2)
            "#,
        )
        .bind(result)
        .bind(evaluator_id)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, EvaluationViewRow>(&evaluation_view_query(
            r#"
            WHERE ($1::smallint IS NULL OR e.result = $1)
              AND ($2::uuid IS NULL OR e.evaluator_id = $2)
            ORDER BY e.created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        ))
        .bind(result)
        .bind(evaluator_id)
        .bind(page.limit() as i64)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let evaluations = rows
            .into_iter()
            .map(EvaluationViewRow::into_view)
            .collect::<CatalogResult<Vec<_>>>()?;

        Ok(Page::new(evaluations, total))
    }

    async fn stats(&self) -> CatalogResult<EvaluationStats> {
        let row = sqlx::query_as::<_, EvaluationStatsRow>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE result = $1) AS authentic,
                COUNT(*) FILTER (WHERE result = $2) AS fake,
                COUNT(*) FILTER (WHERE result = $3) AS inconclusive
            FROM evaluations
            "#,
        )
        .bind(EvaluationResult::Authentic.id())
        .bind(EvaluationResult::Fake.id())
        .bind(EvaluationResult::Inconclusive.id())
        .fetch_one(&self.pool)
        .await?;

        let by_evaluator = sqlx::query_as::<_, EvaluatorCountRow>(
            r#"
            SELECT
                e.evaluator_id,
                u.display_name AS evaluator_name,
                COUNT(*) AS count
            FROM evaluations e
            JOIN users u ON u.user_id = e.evaluator_id
            GROUP BY e.evaluator_id, u.display_name
            ORDER BY count DESC, evaluator_name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(EvaluationStats {
            total: row.total,
            authentic: row.authentic,
            fake: row.fake,
            inconclusive: row.inconclusive,
            by_evaluator: by_evaluator
                .into_iter()
                .map(|r| EvaluatorCount {
                    evaluator_id: UserId::from_uuid(r.evaluator_id),
                    evaluator_name: r.evaluator_name,
                    count: r.count,
                })
                .collect(),
        })
    }
}

fn map_unique_evaluation(err: sqlx::Error) -> CatalogError {
    if is_unique_violation(&err) {
        CatalogError::AlreadyEvaluated
    } else {
        CatalogError::Database(err)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct ItemRow {
    item_id: Uuid,
    owner_id: Uuid,
    title: String,
    description: Option<String>,
    brand: String,
    model: String,
    size: Option<String>,
    color: Option<String>,
    purchase_price_cents: Option<i64>,
    purchase_date: Option<NaiveDate>,
    purchase_location: Option<String>,
    images: Json<Vec<ImageRecord>>,
    item_status: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ItemRow {
    fn into_item(self) -> CatalogResult<Item> {
        let status = ItemStatus::from_id(self.item_status).ok_or_else(|| {
            CatalogError::Internal(format!("Invalid item_status: {}", self.item_status))
        })?;

        Ok(Item {
            item_id: ItemId::from_uuid(self.item_id),
            owner_id: UserId::from_uuid(self.owner_id),
            title: Title::from_db(self.title),
            description: self.description,
            brand: Brand::from_db(self.brand),
            model: ModelName::from_db(self.model),
            size: self.size,
            color: self.color,
            purchase_price: self.purchase_price_cents.map(Price::from_cents),
            purchase_date: self.purchase_date,
            purchase_location: self.purchase_location,
            images: self.images.0,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct EvaluationRow {
    evaluation_id: Uuid,
    item_id: Uuid,
    evaluator_id: Uuid,
    result: i16,
    confidence: i16,
    notes: Option<String>,
    criteria: Json<Value>,
    evaluation_created_at: DateTime<Utc>,
    evaluation_updated_at: DateTime<Utc>,
}

impl EvaluationRow {
    fn into_evaluation(self) -> CatalogResult<Evaluation> {
        let result = EvaluationResult::from_id(self.result)
            .ok_or_else(|| CatalogError::Internal(format!("Invalid result: {}", self.result)))?;

        Ok(Evaluation {
            evaluation_id: EvaluationId::from_uuid(self.evaluation_id),
            item_id: ItemId::from_uuid(self.item_id),
            evaluator_id: UserId::from_uuid(self.evaluator_id),
            result,
            confidence: Confidence::from_db(self.confidence),
            notes: self.notes,
            criteria: Criteria::from_db(self.criteria.0),
            created_at: self.evaluation_created_at,
            updated_at: self.evaluation_updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ItemViewRow {
    #[sqlx(flatten)]
    item: ItemRow,
    owner_name: String,
    owner_email: String,
    // Evaluation side of the LEFT JOIN
    evaluation_id: Option<Uuid>,
    evaluator_id: Option<Uuid>,
    result: Option<i16>,
    confidence: Option<i16>,
    notes: Option<String>,
    criteria: Option<Json<Value>>,
    evaluation_created_at: Option<DateTime<Utc>>,
    evaluation_updated_at: Option<DateTime<Utc>>,
    evaluator_name: Option<String>,
}

impl ItemViewRow {
    fn into_view(self) -> CatalogResult<ItemView> {
        let owner = OwnerView {
            user_id: UserId::from_uuid(self.item.owner_id),
            name: self.owner_name,
            email: self.owner_email,
        };

        let evaluation = match (
            self.evaluation_id,
            self.evaluator_id,
            self.result,
            self.confidence,
            self.evaluation_created_at,
            self.evaluation_updated_at,
        ) {
            (
                Some(evaluation_id),
                Some(evaluator_id),
                Some(result),
                Some(confidence),
                Some(created_at),
                Some(updated_at),
            ) => {
                let evaluation = EvaluationRow {
                    evaluation_id,
                    item_id: self.item.item_id,
                    evaluator_id,
                    result,
                    confidence,
                    notes: self.notes,
                    criteria: self.criteria.unwrap_or(Json(Value::Null)),
                    evaluation_created_at: created_at,
                    evaluation_updated_at: updated_at,
                }
                .into_evaluation()?;

                Some(EvaluationSummary {
                    evaluation,
                    evaluator: EvaluatorView {
                        user_id: UserId::from_uuid(evaluator_id),
                        name: self.evaluator_name.unwrap_or_default(),
                    },
                })
            }
            _ => None,
        };

        Ok(ItemView {
            item: self.item.into_item()?,
            owner,
            evaluation,
        })
    }
}

#[derive(sqlx::FromRow)]
struct EvaluationViewRow {
    #[sqlx(flatten)]
    item: ItemRow,
    #[sqlx(flatten)]
    evaluation: EvaluationRow,
    owner_name: String,
    owner_email: String,
    evaluator_name: String,
}

impl EvaluationViewRow {
    fn into_view(self) -> CatalogResult<EvaluationView> {
        let evaluation = self.evaluation.into_evaluation()?;

        Ok(EvaluationView {
            evaluator: EvaluatorView {
                user_id: evaluation.evaluator_id,
                name: self.evaluator_name,
            },
            owner: OwnerView {
                user_id: UserId::from_uuid(self.item.owner_id),
                name: self.owner_name,
                email: self.owner_email,
            },
            item: self.item.into_item()?,
            evaluation,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ItemStatsRow {
    total: i64,
    pending: i64,
    approved: i64,
    rejected: i64,
}

#[derive(sqlx::FromRow)]
struct EvaluationStatsRow {
    total: i64,
    authentic: i64,
    fake: i64,
    inconclusive: i64,
}

#[derive(sqlx::FromRow)]
struct EvaluatorCountRow {
    evaluator_id: Uuid,
    evaluator_name: String,
    count: i64,
}
