//! Checkout and order management.
//!
//! `create_order` is the thin controller over the order-placement service:
//! validate the payload, hand the optional verified identity and the request
//! to the service, publish the confirmation event after commit.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::auth::{AdminUser, MaybeAuthUser};
use crate::error::AppError;
use crate::events;
use crate::models::{FulfillmentStatus, Order, OrderItem, OrderWithItems, PaymentStatus};
use crate::response::{ApiResponse, ListParams, Paginated};
use crate::services::checkout::{self, PlaceOrder};
use crate::AppState;

pub async fn create_order(
    State(s): State<AppState>,
    MaybeAuthUser(user_id): MaybeAuthUser,
    Json(req): Json<PlaceOrder>,
) -> Result<ApiResponse<OrderWithItems>, AppError> {
    req.validate()?;
    let order = checkout::place_order(&s.db, user_id, &req).await?;
    // Post-commit, fire-and-forget; a broker failure never fails the order.
    events::publish_order_created(&s.nats, &order).await;
    Ok(ApiResponse::created("Order created successfully", order))
}

pub async fn list_orders(
    State(s): State<AppState>,
    _admin: AdminUser,
    Query(p): Query<ListParams>,
) -> Result<ApiResponse<Paginated<Order>>, AppError> {
    let (page, limit, offset) = p.paging();
    let items = sqlx::query_as("SELECT * FROM orders ORDER BY created_at DESC LIMIT $1 OFFSET $2")
        .bind(limit)
        .bind(offset)
        .fetch_all(&s.db)
        .await?;
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders").fetch_one(&s.db).await?;
    Ok(ApiResponse::ok("Orders retrieved", Paginated { items, total, page }))
}

pub async fn get_order(
    State(s): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<OrderWithItems>, AppError> {
    let order: Order = sqlx::query_as("SELECT * FROM orders WHERE id = $1")
        .bind(id)
        .fetch_optional(&s.db)
        .await?
        .ok_or_else(|| AppError::not_found("order", id))?;
    let order_items: Vec<OrderItem> =
        sqlx::query_as("SELECT * FROM order_items WHERE order_id = $1")
            .bind(id)
            .fetch_all(&s.db)
            .await?;
    Ok(ApiResponse::ok("Order retrieved", OrderWithItems { order, order_items }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub fulfillment_status: Option<FulfillmentStatus>,
    pub payment_status: Option<PaymentStatus>,
}

/// Status transitions are the only mutation orders ever receive.
pub async fn update_order_status(
    State(s): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(r): Json<StatusUpdate>,
) -> Result<ApiResponse<Order>, AppError> {
    let current: Order = sqlx::query_as("SELECT * FROM orders WHERE id = $1")
        .bind(id)
        .fetch_optional(&s.db)
        .await?
        .ok_or_else(|| AppError::not_found("order", id))?;

    let fulfillment = match r.fulfillment_status {
        Some(next) => {
            if !current.fulfillment_status.can_transition_to(next) {
                return Err(AppError::Validation(format!(
                    "cannot move order from {:?} to {:?}",
                    current.fulfillment_status, next
                )));
            }
            next
        }
        None => current.fulfillment_status,
    };
    let payment = match r.payment_status {
        Some(next) => {
            if !current.payment_status.can_transition_to(next) {
                return Err(AppError::Validation(format!(
                    "cannot move payment from {:?} to {:?}",
                    current.payment_status, next
                )));
            }
            next
        }
        None => current.payment_status,
    };

    let order = sqlx::query_as(
        "UPDATE orders SET fulfillment_status = $2, payment_status = $3 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(fulfillment)
    .bind(payment)
    .fetch_one(&s.db)
    .await?;
    Ok(ApiResponse::ok("Order updated", order))
}
