//! Cart pricing.
//!
//! Line items are resolved against the catalog inside the checkout
//! transaction, then priced by a pure computation. Prices always come from
//! the parent product's current price, never from the client.

use rust_decimal::Decimal;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::error::AppError;
use crate::services::checkout::OrderItemInput;

/// A line item joined to its parent product.
#[derive(Debug, Clone)]
pub struct ResolvedLine {
    pub product_specification_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub free_shipping: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub tax_amount: Decimal,
    pub discount_amount: Decimal,
    pub total_amount: Decimal,
}

/// Resolves every requested specification to its non-deleted parent product.
/// Any unknown id aborts the whole order; the error names the offending id.
pub async fn resolve_lines(
    tx: &mut Transaction<'_, Postgres>,
    items: &[OrderItemInput],
) -> Result<Vec<ResolvedLine>, AppError> {
    let mut lines = Vec::with_capacity(items.len());
    for item in items {
        let row: Option<(Decimal, bool)> = sqlx::query_as(
            "SELECT p.price, p.free_shipping
             FROM product_specifications ps
             JOIN products p ON p.id = ps.product_id
             WHERE ps.id = $1 AND p.deleted_at IS NULL",
        )
        .bind(item.product_specification_id)
        .fetch_optional(&mut **tx)
        .await?;
        let (unit_price, free_shipping) = row.ok_or_else(|| {
            AppError::not_found("product specification", item.product_specification_id)
        })?;
        lines.push(ResolvedLine {
            product_specification_id: item.product_specification_id,
            quantity: item.quantity,
            unit_price,
            free_shipping,
        });
    }
    Ok(lines)
}

/// Derives totals from resolved lines and a flat shipping rate.
///
/// Shipping is waived only when *every* line's product carries the
/// free-shipping flag; one regular item forces the full rate. Tax and
/// discount are zero in this workflow but stay in the equation:
/// `total = subtotal + shipping + tax - discount`.
pub fn price_cart(lines: &[ResolvedLine], shipping_rate: Decimal) -> CartTotals {
    let subtotal = lines
        .iter()
        .fold(Decimal::ZERO, |acc, l| acc + l.unit_price * Decimal::from(l.quantity));
    let all_free = !lines.is_empty() && lines.iter().all(|l| l.free_shipping);
    let shipping_cost = if all_free { Decimal::ZERO } else { shipping_rate };
    let tax_amount = Decimal::ZERO;
    let discount_amount = Decimal::ZERO;
    CartTotals {
        subtotal,
        shipping_cost,
        tax_amount,
        discount_amount,
        total_amount: subtotal + shipping_cost + tax_amount - discount_amount,
    }
}
