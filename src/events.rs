//! Post-commit event publication.
//!
//! Order confirmation is dispatched after the checkout transaction commits,
//! fire-and-forget: a broker outage must never fail or delay an order.

use crate::models::OrderWithItems;

pub const ORDER_CREATED_SUBJECT: &str = "orders.created";

pub async fn publish_order_created(nats: &Option<async_nats::Client>, order: &OrderWithItems) {
    let Some(client) = nats else { return };
    let payload = match serde_json::to_vec(order) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!("failed to serialize order event: {e}");
            return;
        }
    };
    if let Err(e) = client.publish(ORDER_CREATED_SUBJECT, payload.into()).await {
        tracing::warn!(order_number = %order.order.order_number, "failed to publish order event: {e}");
    }
}
