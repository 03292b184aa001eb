//! Session-scoped cart. Adding the same specification twice accumulates
//! quantity via upsert.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::CartItem;
use crate::response::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddToCart {
    pub product_specification_id: Uuid,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

pub async fn get_cart(
    State(s): State<AppState>,
    Path(session): Path<String>,
) -> Result<ApiResponse<Vec<CartItem>>, AppError> {
    let items = sqlx::query_as("SELECT * FROM cart_items WHERE session_id = $1 ORDER BY created_at")
        .bind(&session)
        .fetch_all(&s.db)
        .await?;
    Ok(ApiResponse::ok("Cart retrieved", items))
}

pub async fn add_to_cart(
    State(s): State<AppState>,
    Path(session): Path<String>,
    Json(r): Json<AddToCart>,
) -> Result<ApiResponse<CartItem>, AppError> {
    r.validate()?;
    let spec: Option<Uuid> = sqlx::query_scalar(
        "SELECT ps.id FROM product_specifications ps
         JOIN products p ON p.id = ps.product_id
         WHERE ps.id = $1 AND p.deleted_at IS NULL",
    )
    .bind(r.product_specification_id)
    .fetch_optional(&s.db)
    .await?;
    if spec.is_none() {
        return Err(AppError::not_found("product specification", r.product_specification_id));
    }
    let item = sqlx::query_as(
        "INSERT INTO cart_items (id, session_id, product_specification_id, quantity)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (session_id, product_specification_id)
         DO UPDATE SET quantity = cart_items.quantity + $4
         RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(&session)
    .bind(r.product_specification_id)
    .bind(r.quantity)
    .fetch_one(&s.db)
    .await?;
    Ok(ApiResponse::created("Item added to cart", item))
}

pub async fn clear_cart(
    State(s): State<AppState>,
    Path(session): Path<String>,
) -> Result<ApiResponse<()>, AppError> {
    sqlx::query("DELETE FROM cart_items WHERE session_id = $1")
        .bind(&session)
        .execute(&s.db)
        .await?;
    Ok(ApiResponse::ok("Cart cleared", ()))
}
