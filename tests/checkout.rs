//! Transactional checkout properties, run against a real PostgreSQL database
//! via `#[sqlx::test]` (each test gets its own migrated database).

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use bijoux_commerce::error::AppError;
use bijoux_commerce::services::checkout::{place_order, OrderItemInput, PlaceOrder};

struct Region {
    wilaya_id: Uuid,
    shipping_id: Uuid,
    shipping_rate: Decimal,
}

async fn seed_region(pool: &PgPool) -> Region {
    let wilaya_id = Uuid::now_v7();
    sqlx::query("INSERT INTO wilayas (id, name, code) VALUES ($1, 'Alger', '16')")
        .bind(wilaya_id)
        .execute(pool)
        .await
        .unwrap();
    let shipping_id = Uuid::now_v7();
    let shipping_rate = Decimal::new(50_000, 2); // 500.00
    sqlx::query(
        "INSERT INTO shippings (id, company_name, wilaya_id, amount) VALUES ($1, 'Yalidine', $2, $3)",
    )
    .bind(shipping_id)
    .bind(wilaya_id)
    .bind(shipping_rate)
    .execute(pool)
    .await
    .unwrap();
    Region { wilaya_id, shipping_id, shipping_rate }
}

/// Inserts a product with one specification; returns (product_id, spec_id).
async fn seed_product(pool: &PgPool, price: Decimal, free_shipping: bool) -> (Uuid, Uuid) {
    let product_id = Uuid::now_v7();
    sqlx::query(
        "INSERT INTO products (id, sku, name, price, free_shipping)
         VALUES ($1, $2, 'Gold Ring', $3, $4)",
    )
    .bind(product_id)
    .bind(format!("SKU-{product_id}"))
    .bind(price)
    .bind(free_shipping)
    .execute(pool)
    .await
    .unwrap();
    let spec_id = Uuid::now_v7();
    sqlx::query(
        "INSERT INTO product_specifications (id, product_id, size, color, material, inventory_quantity)
         VALUES ($1, $2, '54', 'gold', '18k', 10)",
    )
    .bind(spec_id)
    .bind(product_id)
    .execute(pool)
    .await
    .unwrap();
    (product_id, spec_id)
}

fn request(email: &str, region: &Region, items: Vec<OrderItemInput>) -> PlaceOrder {
    PlaceOrder {
        first_name: "Lina".into(),
        last_name: "Benali".into(),
        email: email.into(),
        phone_number: "0550000000".into(),
        address_line1: "12 Rue Didouche Mourad".into(),
        address_line2: None,
        commune: "Alger Centre".into(),
        wilaya_id: region.wilaya_id,
        postal_code: Some("16000".into()),
        country: Some("DZ".into()),
        shipping_id: region.shipping_id,
        order_items: items,
    }
}

fn item(spec_id: Uuid, quantity: i32) -> OrderItemInput {
    OrderItemInput { product_specification_id: spec_id, quantity }
}

async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn sequential_checkouts_get_gap_free_numbers(pool: PgPool) {
    let region = seed_region(&pool).await;
    let (_, spec) = seed_product(&pool, Decimal::new(120_000, 2), false).await;

    for expected in ["00001", "00002", "00003"] {
        let order = place_order(&pool, None, &request("lina@example.com", &region, vec![item(spec, 1)]))
            .await
            .unwrap();
        assert_eq!(order.order.order_number, expected);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn concurrent_checkouts_never_share_a_number(pool: PgPool) {
    let region = seed_region(&pool).await;
    let (_, spec) = seed_product(&pool, Decimal::new(120_000, 2), false).await;

    let mut handles = Vec::new();
    for i in 0..4 {
        let pool = pool.clone();
        let req = request(&format!("buyer{i}@example.com"), &region, vec![item(spec, 1)]);
        handles.push(tokio::spawn(async move { place_order(&pool, None, &req).await }));
    }
    let mut numbers: Vec<String> = Vec::new();
    for h in handles {
        numbers.push(h.await.unwrap().unwrap().order.order_number);
    }
    numbers.sort();
    assert_eq!(numbers, vec!["00001", "00002", "00003", "00004"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn pricing_and_totals_equation(pool: PgPool) {
    let region = seed_region(&pool).await;
    let (_, a) = seed_product(&pool, Decimal::new(129_950, 2), false).await;
    let (_, b) = seed_product(&pool, Decimal::new(45_000, 2), false).await;

    let order = place_order(
        &pool,
        None,
        &request("lina@example.com", &region, vec![item(a, 2), item(b, 3)]),
    )
    .await
    .unwrap()
    .order;

    // 1299.50 * 2 + 450.00 * 3 = 3949.00
    assert_eq!(order.subtotal, Decimal::new(394_900, 2));
    assert_eq!(order.shipping_cost, region.shipping_rate);
    assert_eq!(
        order.total_amount,
        order.subtotal + order.shipping_cost + order.tax_amount - order.discount_amount
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn free_shipping_is_all_or_nothing(pool: PgPool) {
    let region = seed_region(&pool).await;
    let (_, free) = seed_product(&pool, Decimal::new(100_000, 2), true).await;
    let (_, paid) = seed_product(&pool, Decimal::new(100_000, 2), false).await;

    let mixed = place_order(
        &pool,
        None,
        &request("a@example.com", &region, vec![item(free, 1), item(paid, 1)]),
    )
    .await
    .unwrap()
    .order;
    assert_eq!(mixed.shipping_cost, region.shipping_rate);

    let all_free = place_order(&pool, None, &request("b@example.com", &region, vec![item(free, 2)]))
        .await
        .unwrap()
        .order;
    assert_eq!(all_free.shipping_cost, Decimal::ZERO);
}

#[sqlx::test(migrations = "./migrations")]
async fn guest_checkout_creates_inactive_user_and_address(pool: PgPool) {
    let region = seed_region(&pool).await;
    let (_, spec) = seed_product(&pool, Decimal::new(80_000, 2), false).await;

    let order = place_order(&pool, None, &request("guest@example.com", &region, vec![item(spec, 1)]))
        .await
        .unwrap()
        .order;

    let (email, is_active): (String, bool) =
        sqlx::query_as("SELECT email, is_active FROM users WHERE id = $1")
            .bind(order.user_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(email, "guest@example.com");
    assert!(!is_active);
    assert_eq!(count(&pool, "users").await, 1);
    assert_eq!(count(&pool, "addresses").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn returning_guest_is_reused_not_duplicated(pool: PgPool) {
    let region = seed_region(&pool).await;
    let (_, spec) = seed_product(&pool, Decimal::new(80_000, 2), false).await;
    let req = request("guest@example.com", &region, vec![item(spec, 1)]);

    let first = place_order(&pool, None, &req).await.unwrap().order;
    let second = place_order(&pool, None, &req).await.unwrap().order;

    assert_eq!(first.user_id, second.user_id);
    assert_eq!(count(&pool, "users").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn identical_address_is_reused_and_variant_creates_new_row(pool: PgPool) {
    let region = seed_region(&pool).await;
    let (_, spec) = seed_product(&pool, Decimal::new(80_000, 2), false).await;
    let req = request("guest@example.com", &region, vec![item(spec, 1)]);

    let first = place_order(&pool, None, &req).await.unwrap().order;
    let second = place_order(&pool, None, &req).await.unwrap().order;
    assert_eq!(first.address_id, second.address_id);
    assert_eq!(count(&pool, "addresses").await, 1);

    let mut variant = req.clone();
    variant.address_line2 = Some("Apt 4".into());
    let third = place_order(&pool, None, &variant).await.unwrap().order;
    assert_ne!(third.address_id, first.address_id);
    assert_eq!(count(&pool, "addresses").await, 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn unknown_specification_rolls_back_everything(pool: PgPool) {
    let region = seed_region(&pool).await;
    let (_, spec) = seed_product(&pool, Decimal::new(80_000, 2), false).await;

    let req = request(
        "guest@example.com",
        &region,
        vec![item(spec, 1), item(Uuid::now_v7(), 1)],
    );
    let err = place_order(&pool, None, &req).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // Full rollback: not even the guest user or address survives.
    assert_eq!(count(&pool, "orders").await, 0);
    assert_eq!(count(&pool, "order_items").await, 0);
    assert_eq!(count(&pool, "users").await, 0);
    assert_eq!(count(&pool, "addresses").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn stale_authenticated_id_is_not_found_never_guest_fallback(pool: PgPool) {
    let region = seed_region(&pool).await;
    let (_, spec) = seed_product(&pool, Decimal::new(80_000, 2), false).await;

    let req = request("guest@example.com", &region, vec![item(spec, 1)]);
    let err = place_order(&pool, Some(Uuid::now_v7()), &req).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(count(&pool, "users").await, 0);
    assert_eq!(count(&pool, "orders").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn unit_price_snapshot_survives_product_price_change(pool: PgPool) {
    let region = seed_region(&pool).await;
    let (product, spec) = seed_product(&pool, Decimal::new(80_000, 2), false).await;

    let order = place_order(&pool, None, &request("g@example.com", &region, vec![item(spec, 2)]))
        .await
        .unwrap();
    assert_eq!(order.order_items[0].unit_price, Decimal::new(80_000, 2));

    sqlx::query("UPDATE products SET price = $2 WHERE id = $1")
        .bind(product)
        .bind(Decimal::new(999_900, 2))
        .execute(&pool)
        .await
        .unwrap();

    let stored: Decimal =
        sqlx::query_scalar("SELECT unit_price FROM order_items WHERE order_id = $1")
            .bind(order.order.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(stored, Decimal::new(80_000, 2));
}

#[sqlx::test(migrations = "./migrations")]
async fn soft_deleted_product_cannot_be_ordered(pool: PgPool) {
    let region = seed_region(&pool).await;
    let (product, spec) = seed_product(&pool, Decimal::new(80_000, 2), false).await;
    sqlx::query("UPDATE products SET deleted_at = NOW() WHERE id = $1")
        .bind(product)
        .execute(&pool)
        .await
        .unwrap();

    let err = place_order(&pool, None, &request("g@example.com", &region, vec![item(spec, 1)]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[sqlx::test(migrations = "./migrations")]
async fn authenticated_checkout_attaches_to_that_user(pool: PgPool) {
    let region = seed_region(&pool).await;
    let (_, spec) = seed_product(&pool, Decimal::new(80_000, 2), false).await;

    let user_id = Uuid::now_v7();
    sqlx::query(
        "INSERT INTO users (id, first_name, last_name, email, password_hash, is_active)
         VALUES ($1, 'Nour', 'Khelifi', 'nour@example.com', 'hash', TRUE)",
    )
    .bind(user_id)
    .execute(&pool)
    .await
    .unwrap();

    // Contact email differs from the account email; the authenticated id wins.
    let order = place_order(
        &pool,
        Some(user_id),
        &request("other@example.com", &region, vec![item(spec, 1)]),
    )
    .await
    .unwrap()
    .order;
    assert_eq!(order.user_id, user_id);
    assert_eq!(count(&pool, "users").await, 1);
}
