//! Products and their purchasable variants (specifications).
//!
//! Product delete is a soft delete: deleted products vanish from listings and
//! can no longer be ordered, but historical order items keep resolving.

use axum::extract::{Path, Query, State};
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AdminUser;
use crate::error::AppError;
use crate::models::{Product, ProductSpecification};
use crate::response::{ApiResponse, ListParams, Paginated};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub free_shipping: bool,
    pub brand_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
}

pub async fn list_products(
    State(s): State<AppState>,
    Query(p): Query<ListParams>,
) -> Result<ApiResponse<Paginated<Product>>, AppError> {
    let (page, limit, offset) = p.paging();
    let search = p.search.as_deref().unwrap_or("");
    let pattern = format!("%{search}%");
    let items = sqlx::query_as(
        "SELECT * FROM products
         WHERE deleted_at IS NULL AND name ILIKE $1
         ORDER BY created_at DESC LIMIT $2 OFFSET $3",
    )
    .bind(&pattern)
    .bind(limit)
    .bind(offset)
    .fetch_all(&s.db)
    .await?;
    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM products WHERE deleted_at IS NULL AND name ILIKE $1",
    )
    .bind(&pattern)
    .fetch_one(&s.db)
    .await?;
    Ok(ApiResponse::ok("Products retrieved", Paginated { items, total, page }))
}

pub async fn get_product(
    State(s): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Product>, AppError> {
    let product = sqlx::query_as("SELECT * FROM products WHERE id = $1 AND deleted_at IS NULL")
        .bind(id)
        .fetch_optional(&s.db)
        .await?
        .ok_or_else(|| AppError::not_found("product", id))?;
    Ok(ApiResponse::ok("Product retrieved", product))
}

pub async fn create_product(
    State(s): State<AppState>,
    _admin: AdminUser,
    Json(r): Json<ProductPayload>,
) -> Result<ApiResponse<Product>, AppError> {
    let sku = format!("SKU-{:08}", rand::random::<u32>() % 100_000_000);
    let product = sqlx::query_as(
        "INSERT INTO products
            (id, sku, name, description, price, free_shipping, brand_id, category_id, supplier_id)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(&sku)
    .bind(&r.name)
    .bind(&r.description)
    .bind(r.price)
    .bind(r.free_shipping)
    .bind(r.brand_id)
    .bind(r.category_id)
    .bind(r.supplier_id)
    .fetch_one(&s.db)
    .await?;
    Ok(ApiResponse::created("Product created", product))
}

pub async fn update_product(
    State(s): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(r): Json<ProductPayload>,
) -> Result<ApiResponse<Product>, AppError> {
    let product = sqlx::query_as(
        "UPDATE products
         SET name = $2, description = $3, price = $4, free_shipping = $5,
             brand_id = $6, category_id = $7, supplier_id = $8, updated_at = NOW()
         WHERE id = $1 AND deleted_at IS NULL RETURNING *",
    )
    .bind(id)
    .bind(&r.name)
    .bind(&r.description)
    .bind(r.price)
    .bind(r.free_shipping)
    .bind(r.brand_id)
    .bind(r.category_id)
    .bind(r.supplier_id)
    .fetch_optional(&s.db)
    .await?
    .ok_or_else(|| AppError::not_found("product", id))?;
    Ok(ApiResponse::ok("Product updated", product))
}

pub async fn delete_product(
    State(s): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, AppError> {
    let res = sqlx::query(
        "UPDATE products SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
    )
    .bind(id)
    .execute(&s.db)
    .await?;
    if res.rows_affected() == 0 {
        return Err(AppError::not_found("product", id));
    }
    Ok(ApiResponse::ok("Product deleted", ()))
}

// ---------------------------------------------------------------------------
// Specifications
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificationPayload {
    pub size: Option<String>,
    pub color: Option<String>,
    pub material: Option<String>,
    #[serde(default)]
    pub inventory_quantity: i32,
}

pub async fn list_specifications(
    State(s): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<ApiResponse<Vec<ProductSpecification>>, AppError> {
    let specs = sqlx::query_as(
        "SELECT ps.* FROM product_specifications ps
         JOIN products p ON p.id = ps.product_id
         WHERE ps.product_id = $1 AND p.deleted_at IS NULL
         ORDER BY ps.created_at",
    )
    .bind(product_id)
    .fetch_all(&s.db)
    .await?;
    Ok(ApiResponse::ok("Specifications retrieved", specs))
}

pub async fn get_specification(
    State(s): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<ProductSpecification>, AppError> {
    // Same soft-delete visibility as listings: a variant of a deleted
    // product is gone from the read path too.
    let spec = sqlx::query_as(
        "SELECT ps.* FROM product_specifications ps
         JOIN products p ON p.id = ps.product_id
         WHERE ps.id = $1 AND p.deleted_at IS NULL",
    )
    .bind(id)
    .fetch_optional(&s.db)
    .await?
    .ok_or_else(|| AppError::not_found("product specification", id))?;
    Ok(ApiResponse::ok("Specification retrieved", spec))
}

pub async fn create_specification(
    State(s): State<AppState>,
    _admin: AdminUser,
    Path(product_id): Path<Uuid>,
    Json(r): Json<SpecificationPayload>,
) -> Result<ApiResponse<ProductSpecification>, AppError> {
    // Variants can only hang off live products.
    let exists: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM products WHERE id = $1 AND deleted_at IS NULL")
            .bind(product_id)
            .fetch_optional(&s.db)
            .await?;
    if exists.is_none() {
        return Err(AppError::not_found("product", product_id));
    }
    let spec = sqlx::query_as(
        "INSERT INTO product_specifications (id, product_id, size, color, material, inventory_quantity)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(product_id)
    .bind(&r.size)
    .bind(&r.color)
    .bind(&r.material)
    .bind(r.inventory_quantity)
    .fetch_one(&s.db)
    .await?;
    Ok(ApiResponse::created("Specification created", spec))
}

pub async fn update_specification(
    State(s): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(r): Json<SpecificationPayload>,
) -> Result<ApiResponse<ProductSpecification>, AppError> {
    let spec = sqlx::query_as(
        "UPDATE product_specifications
         SET size = $2, color = $3, material = $4, inventory_quantity = $5
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&r.size)
    .bind(&r.color)
    .bind(&r.material)
    .bind(r.inventory_quantity)
    .fetch_optional(&s.db)
    .await?
    .ok_or_else(|| AppError::not_found("product specification", id))?;
    Ok(ApiResponse::ok("Specification updated", spec))
}

pub async fn delete_specification(
    State(s): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, AppError> {
    let res = sqlx::query("DELETE FROM product_specifications WHERE id = $1")
        .bind(id)
        .execute(&s.db)
        .await?;
    if res.rows_affected() == 0 {
        return Err(AppError::not_found("product specification", id));
    }
    Ok(ApiResponse::ok("Specification deleted", ()))
}
