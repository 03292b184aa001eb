use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "fulfillment_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum FulfillmentStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    Cash,
    Card,
}

/// One checkout transaction. Created atomically with its items, never deleted;
/// only the status fields change afterwards.
///
/// Invariant at creation:
/// `total_amount == subtotal + shipping_cost + tax_amount - discount_amount`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub user_id: Uuid,
    pub address_id: Uuid,
    pub shipping_id: Uuid,
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub tax_amount: Decimal,
    pub discount_amount: Decimal,
    pub total_amount: Decimal,
    pub fulfillment_status: FulfillmentStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
}

/// One priced line within an order. `unit_price` is a snapshot of the parent
/// product's price at order time; later price changes never touch it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_specification_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    #[serde(rename = "orderItems")]
    pub order_items: Vec<OrderItem>,
}

impl FulfillmentStatus {
    /// Legal transitions: the PENDING -> PROCESSING -> SHIPPED -> DELIVERED
    /// chain, with CANCELLED reachable from any non-terminal state.
    pub fn can_transition_to(self, next: Self) -> bool {
        use FulfillmentStatus::*;
        match (self, next) {
            (Pending, Processing) | (Processing, Shipped) | (Shipped, Delivered) => true,
            (Pending | Processing | Shipped, Cancelled) => true,
            _ => false,
        }
    }
}

impl PaymentStatus {
    /// Payment settles once: PENDING may become PAID or FAILED, and only a
    /// PAID order can be REFUNDED. FAILED and REFUNDED are terminal.
    pub fn can_transition_to(self, next: Self) -> bool {
        use PaymentStatus::*;
        matches!((self, next), (Pending, Paid) | (Pending, Failed) | (Paid, Refunded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fulfillment_transitions() {
        use FulfillmentStatus::*;
        assert!(Pending.can_transition_to(Processing));
        assert!(Processing.can_transition_to(Shipped));
        assert!(Shipped.can_transition_to(Delivered));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(!Delivered.can_transition_to(Cancelled));
        assert!(!Shipped.can_transition_to(Processing));
        assert!(!Cancelled.can_transition_to(Pending));
    }

    #[test]
    fn payment_transitions() {
        use PaymentStatus::*;
        assert!(Pending.can_transition_to(Paid));
        assert!(Pending.can_transition_to(Failed));
        assert!(Paid.can_transition_to(Refunded));
        assert!(!Paid.can_transition_to(Pending));
        assert!(!Refunded.can_transition_to(Pending));
        assert!(!Failed.can_transition_to(Paid));
        assert!(!Pending.can_transition_to(Refunded));
    }
}
