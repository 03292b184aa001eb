//! Administrative regions (wilayas) and per-region shipping rates.

use axum::extract::{Path, Query, State};
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AdminUser;
use crate::error::AppError;
use crate::models::{Shipping, Wilaya};
use crate::response::{ApiResponse, ListParams, Paginated};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct WilayaPayload {
    pub name: String,
    pub code: String,
}

pub async fn list_wilayas(State(s): State<AppState>) -> Result<ApiResponse<Vec<Wilaya>>, AppError> {
    let wilayas = sqlx::query_as("SELECT * FROM wilayas ORDER BY code").fetch_all(&s.db).await?;
    Ok(ApiResponse::ok("Wilayas retrieved", wilayas))
}

pub async fn get_wilaya(
    State(s): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Wilaya>, AppError> {
    let wilaya = sqlx::query_as("SELECT * FROM wilayas WHERE id = $1")
        .bind(id)
        .fetch_optional(&s.db)
        .await?
        .ok_or_else(|| AppError::not_found("wilaya", id))?;
    Ok(ApiResponse::ok("Wilaya retrieved", wilaya))
}

pub async fn create_wilaya(
    State(s): State<AppState>,
    _admin: AdminUser,
    Json(r): Json<WilayaPayload>,
) -> Result<ApiResponse<Wilaya>, AppError> {
    let wilaya = sqlx::query_as("INSERT INTO wilayas (id, name, code) VALUES ($1, $2, $3) RETURNING *")
        .bind(Uuid::now_v7())
        .bind(&r.name)
        .bind(&r.code)
        .fetch_one(&s.db)
        .await?;
    Ok(ApiResponse::created("Wilaya created", wilaya))
}

pub async fn delete_wilaya(
    State(s): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, AppError> {
    let res = sqlx::query("DELETE FROM wilayas WHERE id = $1").bind(id).execute(&s.db).await?;
    if res.rows_affected() == 0 {
        return Err(AppError::not_found("wilaya", id));
    }
    Ok(ApiResponse::ok("Wilaya deleted", ()))
}

// ---------------------------------------------------------------------------
// Shipping rates
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingPayload {
    pub company_name: String,
    pub wilaya_id: Uuid,
    pub amount: Decimal,
}

pub async fn list_shippings(
    State(s): State<AppState>,
    Query(p): Query<ListParams>,
) -> Result<ApiResponse<Paginated<Shipping>>, AppError> {
    let (page, limit, offset) = p.paging();
    let items =
        sqlx::query_as("SELECT * FROM shippings ORDER BY company_name LIMIT $1 OFFSET $2")
            .bind(limit)
            .bind(offset)
            .fetch_all(&s.db)
            .await?;
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shippings").fetch_one(&s.db).await?;
    Ok(ApiResponse::ok("Shipping methods retrieved", Paginated { items, total, page }))
}

pub async fn get_shipping(
    State(s): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Shipping>, AppError> {
    let shipping = sqlx::query_as("SELECT * FROM shippings WHERE id = $1")
        .bind(id)
        .fetch_optional(&s.db)
        .await?
        .ok_or_else(|| AppError::not_found("shipping method", id))?;
    Ok(ApiResponse::ok("Shipping method retrieved", shipping))
}

pub async fn create_shipping(
    State(s): State<AppState>,
    _admin: AdminUser,
    Json(r): Json<ShippingPayload>,
) -> Result<ApiResponse<Shipping>, AppError> {
    let shipping = sqlx::query_as(
        "INSERT INTO shippings (id, company_name, wilaya_id, amount)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(&r.company_name)
    .bind(r.wilaya_id)
    .bind(r.amount)
    .fetch_one(&s.db)
    .await?;
    Ok(ApiResponse::created("Shipping method created", shipping))
}

pub async fn update_shipping(
    State(s): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(r): Json<ShippingPayload>,
) -> Result<ApiResponse<Shipping>, AppError> {
    let shipping = sqlx::query_as(
        "UPDATE shippings SET company_name = $2, wilaya_id = $3, amount = $4
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&r.company_name)
    .bind(r.wilaya_id)
    .bind(r.amount)
    .fetch_optional(&s.db)
    .await?
    .ok_or_else(|| AppError::not_found("shipping method", id))?;
    Ok(ApiResponse::ok("Shipping method updated", shipping))
}

pub async fn delete_shipping(
    State(s): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, AppError> {
    let res = sqlx::query("DELETE FROM shippings WHERE id = $1").bind(id).execute(&s.db).await?;
    if res.rows_affected() == 0 {
        return Err(AppError::not_found("shipping method", id));
    }
    Ok(ApiResponse::ok("Shipping method deleted", ()))
}
