use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Administrative region (wilaya) a shipping rate is scoped to.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Wilaya {
    pub id: Uuid,
    pub name: String,
    pub code: String,
}

/// A named carrier rate for a region. Referenced, never mutated, during
/// order placement.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Shipping {
    pub id: Uuid,
    pub company_name: String,
    pub wilaya_id: Uuid,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}
