use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Non-usable password stored on accounts created implicitly at checkout.
/// Guests never authenticate; `is_active = false` marks them.
pub const GUEST_PASSWORD_HASH: &str = "!guest-checkout!";

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Address {
    pub id: Uuid,
    pub user_id: Uuid,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub commune: String,
    pub wilaya_id: Uuid,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}
