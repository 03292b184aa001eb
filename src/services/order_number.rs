//! Sequential, human-readable order numbers.
//!
//! Numbers are zero-padded decimal strings ("00001", "00002", ...) allocated
//! strictly monotonically. The allocation read happens under a
//! transaction-scoped advisory lock so two concurrent checkouts can never
//! observe the same predecessor; the lock is released at commit or rollback.

use sqlx::{Postgres, Transaction};

use crate::error::AppError;

/// Minimum rendered width. Numbers past "99999" widen rather than truncate.
pub const ORDER_NUMBER_WIDTH: usize = 5;

/// Advisory-lock key for checkout serialization, arbitrary but stable.
const CHECKOUT_LOCK_KEY: i64 = 0x6f72_6465_7273; // "orders"

/// Serializes the checkout critical section. Must be called before the
/// max-order-number read; `pg_advisory_xact_lock` blocks until any other
/// in-flight checkout commits or rolls back.
pub async fn acquire_checkout_lock(tx: &mut Transaction<'_, Postgres>) -> Result<(), AppError> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(CHECKOUT_LOCK_KEY)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Reads the current maximum order number (by numeric value, not by
/// timestamp) and returns its successor. Caller must hold the checkout lock.
pub async fn allocate_order_number(
    tx: &mut Transaction<'_, Postgres>,
) -> Result<String, AppError> {
    let prev: Option<String> = sqlx::query_scalar(
        "SELECT order_number FROM orders ORDER BY order_number::bigint DESC LIMIT 1",
    )
    .fetch_optional(&mut **tx)
    .await?;
    next_order_number(prev.as_deref())
}

/// Pure successor function: `None -> "00001"`, `"00042" -> "00043"`.
pub fn next_order_number(prev: Option<&str>) -> Result<String, AppError> {
    let next = match prev {
        None => 1,
        Some(s) => s
            .parse::<i64>()
            .map_err(|_| AppError::Internal(format!("malformed order number {s:?}")))?
            + 1,
    };
    Ok(format!("{next:0width$}", width = ORDER_NUMBER_WIDTH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_order_number() {
        assert_eq!(next_order_number(None).unwrap(), "00001");
    }

    #[test]
    fn increments_and_pads() {
        assert_eq!(next_order_number(Some("00042")).unwrap(), "00043");
        assert_eq!(next_order_number(Some("00009")).unwrap(), "00010");
        assert_eq!(next_order_number(Some("09999")).unwrap(), "10000");
    }

    #[test]
    fn widens_past_five_digits() {
        assert_eq!(next_order_number(Some("99999")).unwrap(), "100000");
        assert_eq!(next_order_number(Some("100000")).unwrap(), "100001");
    }

    #[test]
    fn rejects_malformed_previous_number() {
        assert!(next_order_number(Some("ORD-1")).is_err());
        assert!(next_order_number(Some("")).is_err());
    }
}
