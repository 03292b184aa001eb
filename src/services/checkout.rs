//! Order placement.
//!
//! The seven-step sequence runs inside one database transaction: resolve the
//! customer, resolve the shipping rate, resolve and price every line item,
//! compute totals, allocate the next order number, resolve or create the
//! shipping address, then persist the order with its line items. Any failure
//! at any step rolls the whole transaction back; there is no partial order,
//! and a failed run leaves no guest user or address behind.

use serde::Deserialize;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::{Order, OrderItem, OrderWithItems, Shipping};
use crate::services::customers::{resolve_address, resolve_user};
use crate::services::order_number::{acquire_checkout_lock, allocate_order_number};
use crate::services::pricing::{price_cart, resolve_lines, ResolvedLine};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrder {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub phone_number: String,
    #[validate(length(min = 1))]
    pub address_line1: String,
    pub address_line2: Option<String>,
    #[validate(length(min = 1))]
    pub commune: String,
    pub wilaya_id: Uuid,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub shipping_id: Uuid,
    #[validate]
    pub order_items: Vec<OrderItemInput>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    pub product_specification_id: Uuid,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

/// Places an order atomically and returns it with its line items.
///
/// `auth_user_id` is the verified identity injected by the auth layer, if
/// any. The transaction-scoped advisory lock taken up front serializes
/// concurrent checkouts, which makes the order-number read-increment-write
/// race-free; the lock drops with the transaction on every exit path.
pub async fn place_order(
    db: &PgPool,
    auth_user_id: Option<Uuid>,
    req: &PlaceOrder,
) -> Result<OrderWithItems, AppError> {
    if req.order_items.is_empty() {
        return Err(AppError::Validation("order must contain at least one item".into()));
    }

    let mut tx = db.begin().await?;
    acquire_checkout_lock(&mut tx).await?;

    let customer = resolve_user(&mut tx, auth_user_id, req).await?;
    let shipping = fetch_shipping(&mut tx, req.shipping_id).await?;
    let lines = resolve_lines(&mut tx, &req.order_items).await?;
    let totals = price_cart(&lines, shipping.amount);
    let order_number = allocate_order_number(&mut tx).await?;
    let address_id = match customer.guest_address_id {
        Some(id) => id,
        None => resolve_address(&mut tx, customer.user.id, req).await?,
    };

    let order: Order = sqlx::query_as(
        "INSERT INTO orders
            (id, order_number, user_id, address_id, shipping_id,
             subtotal, shipping_cost, tax_amount, discount_amount, total_amount)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(&order_number)
    .bind(customer.user.id)
    .bind(address_id)
    .bind(shipping.id)
    .bind(totals.subtotal)
    .bind(totals.shipping_cost)
    .bind(totals.tax_amount)
    .bind(totals.discount_amount)
    .bind(totals.total_amount)
    .fetch_one(&mut *tx)
    .await?;

    let order_items = insert_items(&mut tx, order.id, &lines).await?;
    tx.commit().await?;

    tracing::info!(order_number = %order.order_number, total = %order.total_amount, "order placed");
    Ok(OrderWithItems { order, order_items })
}

async fn fetch_shipping(
    tx: &mut Transaction<'_, Postgres>,
    shipping_id: Uuid,
) -> Result<Shipping, AppError> {
    sqlx::query_as("SELECT * FROM shippings WHERE id = $1")
        .bind(shipping_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::not_found("shipping method", shipping_id))
}

async fn insert_items(
    tx: &mut Transaction<'_, Postgres>,
    order_id: Uuid,
    lines: &[ResolvedLine],
) -> Result<Vec<OrderItem>, AppError> {
    let mut items = Vec::with_capacity(lines.len());
    for line in lines {
        let item: OrderItem = sqlx::query_as(
            "INSERT INTO order_items (id, order_id, product_specification_id, quantity, unit_price)
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(order_id)
        .bind(line.product_specification_id)
        .bind(line.quantity)
        .bind(line.unit_price)
        .fetch_one(&mut **tx)
        .await?;
        items.push(item);
    }
    Ok(items)
}
