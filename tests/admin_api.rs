//! Admin endpoint behavior that sits above the checkout service: order
//! status lifecycle guards and soft-delete visibility of specifications.

use axum::extract::{Path, State};
use axum::Json;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use bijoux_commerce::auth::AdminUser;
use bijoux_commerce::config::AppConfig;
use bijoux_commerce::error::AppError;
use bijoux_commerce::handlers::{orders, products};
use bijoux_commerce::models::{FulfillmentStatus, PaymentStatus};
use bijoux_commerce::services::checkout::{place_order, OrderItemInput, PlaceOrder};
use bijoux_commerce::AppState;

fn state(pool: PgPool) -> AppState {
    AppState {
        db: pool,
        nats: None,
        config: AppConfig {
            database_url: String::new(),
            port: 0,
            jwt_secret: "test-secret".into(),
            nats_url: None,
            max_db_connections: 1,
        },
    }
}

fn admin() -> AdminUser {
    AdminUser(Uuid::now_v7())
}

/// Seeds a region, a product with one specification, and one placed order.
/// Returns (order_id, product_id, spec_id).
async fn seed_order(pool: &PgPool) -> (Uuid, Uuid, Uuid) {
    let wilaya_id = Uuid::now_v7();
    sqlx::query("INSERT INTO wilayas (id, name, code) VALUES ($1, 'Oran', '31')")
        .bind(wilaya_id)
        .execute(pool)
        .await
        .unwrap();
    let shipping_id = Uuid::now_v7();
    sqlx::query(
        "INSERT INTO shippings (id, company_name, wilaya_id, amount) VALUES ($1, 'ZR', $2, $3)",
    )
    .bind(shipping_id)
    .bind(wilaya_id)
    .bind(Decimal::new(40_000, 2))
    .execute(pool)
    .await
    .unwrap();
    let product_id = Uuid::now_v7();
    sqlx::query(
        "INSERT INTO products (id, sku, name, price, free_shipping)
         VALUES ($1, $2, 'Silver Chain', $3, FALSE)",
    )
    .bind(product_id)
    .bind(format!("SKU-{product_id}"))
    .bind(Decimal::new(65_000, 2))
    .execute(pool)
    .await
    .unwrap();
    let spec_id = Uuid::now_v7();
    sqlx::query(
        "INSERT INTO product_specifications (id, product_id, size, color, material, inventory_quantity)
         VALUES ($1, $2, '45cm', 'silver', '925', 5)",
    )
    .bind(spec_id)
    .bind(product_id)
    .execute(pool)
    .await
    .unwrap();

    let req = PlaceOrder {
        first_name: "Amine".into(),
        last_name: "Cherif".into(),
        email: "amine@example.com".into(),
        phone_number: "0660000000".into(),
        address_line1: "5 Boulevard de la Soummam".into(),
        address_line2: None,
        commune: "Oran".into(),
        wilaya_id,
        postal_code: None,
        country: Some("DZ".into()),
        shipping_id,
        order_items: vec![OrderItemInput { product_specification_id: spec_id, quantity: 1 }],
    };
    let order = place_order(pool, None, &req).await.unwrap();
    (order.order.id, product_id, spec_id)
}

fn status_body(
    fulfillment: Option<FulfillmentStatus>,
    payment: Option<PaymentStatus>,
) -> Json<orders::StatusUpdate> {
    Json(orders::StatusUpdate { fulfillment_status: fulfillment, payment_status: payment })
}

#[sqlx::test(migrations = "./migrations")]
async fn payment_can_settle_forward(pool: PgPool) {
    let (order_id, _, _) = seed_order(&pool).await;
    let s = state(pool);

    let updated = orders::update_order_status(
        State(s.clone()),
        admin(),
        Path(order_id),
        status_body(None, Some(PaymentStatus::Paid)),
    )
    .await
    .unwrap();
    assert_eq!(updated.data.payment_status, PaymentStatus::Paid);

    let refunded = orders::update_order_status(
        State(s),
        admin(),
        Path(order_id),
        status_body(None, Some(PaymentStatus::Refunded)),
    )
    .await
    .unwrap();
    assert_eq!(refunded.data.payment_status, PaymentStatus::Refunded);
}

#[sqlx::test(migrations = "./migrations")]
async fn paid_order_cannot_revert_to_pending(pool: PgPool) {
    let (order_id, _, _) = seed_order(&pool).await;
    let s = state(pool.clone());

    orders::update_order_status(
        State(s.clone()),
        admin(),
        Path(order_id),
        status_body(None, Some(PaymentStatus::Paid)),
    )
    .await
    .unwrap();

    let err = orders::update_order_status(
        State(s),
        admin(),
        Path(order_id),
        status_body(None, Some(PaymentStatus::Pending)),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let stored: PaymentStatus =
        sqlx::query_scalar("SELECT payment_status FROM orders WHERE id = $1")
            .bind(order_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(stored, PaymentStatus::Paid);
}

#[sqlx::test(migrations = "./migrations")]
async fn fulfillment_follows_the_chain_and_rejects_skips(pool: PgPool) {
    let (order_id, _, _) = seed_order(&pool).await;
    let s = state(pool);

    let updated = orders::update_order_status(
        State(s.clone()),
        admin(),
        Path(order_id),
        status_body(Some(FulfillmentStatus::Processing), None),
    )
    .await
    .unwrap();
    assert_eq!(updated.data.fulfillment_status, FulfillmentStatus::Processing);

    // PROCESSING cannot jump straight to DELIVERED.
    let err = orders::update_order_status(
        State(s),
        admin(),
        Path(order_id),
        status_body(Some(FulfillmentStatus::Delivered), None),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[sqlx::test(migrations = "./migrations")]
async fn specification_of_deleted_product_is_hidden(pool: PgPool) {
    let (_, product_id, spec_id) = seed_order(&pool).await;
    let s = state(pool.clone());

    // Visible while the parent product is live.
    products::get_specification(State(s.clone()), Path(spec_id)).await.unwrap();

    sqlx::query("UPDATE products SET deleted_at = NOW() WHERE id = $1")
        .bind(product_id)
        .execute(&pool)
        .await
        .unwrap();

    let err = products::get_specification(State(s), Path(spec_id)).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
