//! Customer resolution for checkout: mapping an optional authenticated
//! identity plus submitted contact fields to exactly one user, and
//! finding-or-creating the shipping address for that user.

use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Address, User, GUEST_PASSWORD_HASH};
use crate::services::checkout::PlaceOrder;

/// The user an order attaches to, plus the address id when the guest path
/// already created one (address dedup is skipped in that case).
#[derive(Debug)]
pub struct ResolvedCustomer {
    pub user: User,
    pub guest_address_id: Option<Uuid>,
}

/// Exactly one of three paths runs:
/// 1. authenticated id -> must exist (a stale session id is a hard 404,
///    never a silent fall-through to guest creation);
/// 2. no id, email matches an existing user (guests included) -> reuse;
/// 3. no id, unknown email -> create an inactive guest account together with
///    its address, in this same transaction.
pub async fn resolve_user(
    tx: &mut Transaction<'_, Postgres>,
    auth_user_id: Option<Uuid>,
    req: &PlaceOrder,
) -> Result<ResolvedCustomer, AppError> {
    if let Some(id) = auth_user_id {
        let user: User = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| AppError::not_found("user", id))?;
        return Ok(ResolvedCustomer { user, guest_address_id: None });
    }

    let existing: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&req.email)
        .fetch_optional(&mut **tx)
        .await?;
    if let Some(user) = existing {
        return Ok(ResolvedCustomer { user, guest_address_id: None });
    }

    let user: User = sqlx::query_as(
        "INSERT INTO users (id, first_name, last_name, email, password_hash, phone, is_active)
         VALUES ($1, $2, $3, $4, $5, $6, FALSE) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(&req.first_name)
    .bind(&req.last_name)
    .bind(&req.email)
    .bind(GUEST_PASSWORD_HASH)
    .bind(&req.phone_number)
    .fetch_one(&mut **tx)
    .await?;
    let address = insert_address(tx, user.id, req).await?;
    Ok(ResolvedCustomer { user, guest_address_id: Some(address.id) })
}

/// Returns an existing address matching every submitted field exactly
/// (NULL-safe), or creates one. Tie-break when several match: lowest id.
pub async fn resolve_address(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    req: &PlaceOrder,
) -> Result<Uuid, AppError> {
    let existing: Option<Uuid> = sqlx::query_scalar(
        "SELECT id FROM addresses
         WHERE user_id = $1
           AND address_line1 = $2
           AND address_line2 IS NOT DISTINCT FROM $3
           AND commune = $4
           AND wilaya_id = $5
           AND postal_code IS NOT DISTINCT FROM $6
           AND country IS NOT DISTINCT FROM $7
           AND phone = $8
         ORDER BY id
         LIMIT 1",
    )
    .bind(user_id)
    .bind(&req.address_line1)
    .bind(&req.address_line2)
    .bind(&req.commune)
    .bind(req.wilaya_id)
    .bind(&req.postal_code)
    .bind(&req.country)
    .bind(&req.phone_number)
    .fetch_optional(&mut **tx)
    .await?;
    match existing {
        Some(id) => Ok(id),
        None => Ok(insert_address(tx, user_id, req).await?.id),
    }
}

async fn insert_address(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    req: &PlaceOrder,
) -> Result<Address, AppError> {
    let address: Address = sqlx::query_as(
        "INSERT INTO addresses
            (id, user_id, address_line1, address_line2, commune, wilaya_id, postal_code, country, phone)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(user_id)
    .bind(&req.address_line1)
    .bind(&req.address_line2)
    .bind(&req.commune)
    .bind(req.wilaya_id)
    .bind(&req.postal_code)
    .bind(&req.country)
    .bind(&req.phone_number)
    .fetch_one(&mut **tx)
    .await?;
    Ok(address)
}
