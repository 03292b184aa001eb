//! Catalog reference data: brands, categories, suppliers, tags, coupons.
//! Uniform CRUD; mutations require the admin role.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AdminUser;
use crate::error::AppError;
use crate::models::{Brand, Category, Coupon, Supplier, Tag};
use crate::response::{ApiResponse, ListParams, Paginated};
use crate::AppState;

fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

// ---------------------------------------------------------------------------
// Brands
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandPayload {
    pub name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
}

pub async fn list_brands(
    State(s): State<AppState>,
    Query(p): Query<ListParams>,
) -> Result<ApiResponse<Paginated<Brand>>, AppError> {
    let (page, limit, offset) = p.paging();
    let items = sqlx::query_as("SELECT * FROM brands ORDER BY name LIMIT $1 OFFSET $2")
        .bind(limit)
        .bind(offset)
        .fetch_all(&s.db)
        .await?;
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM brands").fetch_one(&s.db).await?;
    Ok(ApiResponse::ok("Brands retrieved", Paginated { items, total, page }))
}

pub async fn get_brand(
    State(s): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Brand>, AppError> {
    let brand = sqlx::query_as("SELECT * FROM brands WHERE id = $1")
        .bind(id)
        .fetch_optional(&s.db)
        .await?
        .ok_or_else(|| AppError::not_found("brand", id))?;
    Ok(ApiResponse::ok("Brand retrieved", brand))
}

pub async fn create_brand(
    State(s): State<AppState>,
    _admin: AdminUser,
    Json(r): Json<BrandPayload>,
) -> Result<ApiResponse<Brand>, AppError> {
    let brand = sqlx::query_as(
        "INSERT INTO brands (id, name, slug, description, logo_url)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(&r.name)
    .bind(slugify(&r.name))
    .bind(&r.description)
    .bind(&r.logo_url)
    .fetch_one(&s.db)
    .await?;
    Ok(ApiResponse::created("Brand created", brand))
}

pub async fn update_brand(
    State(s): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(r): Json<BrandPayload>,
) -> Result<ApiResponse<Brand>, AppError> {
    let brand = sqlx::query_as(
        "UPDATE brands SET name = $2, slug = $3, description = $4, logo_url = $5
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&r.name)
    .bind(slugify(&r.name))
    .bind(&r.description)
    .bind(&r.logo_url)
    .fetch_optional(&s.db)
    .await?
    .ok_or_else(|| AppError::not_found("brand", id))?;
    Ok(ApiResponse::ok("Brand updated", brand))
}

pub async fn delete_brand(
    State(s): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, AppError> {
    let res = sqlx::query("DELETE FROM brands WHERE id = $1").bind(id).execute(&s.db).await?;
    if res.rows_affected() == 0 {
        return Err(AppError::not_found("brand", id));
    }
    Ok(ApiResponse::ok("Brand deleted", ()))
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
    pub image_url: Option<String>,
}

pub async fn list_categories(
    State(s): State<AppState>,
    Query(p): Query<ListParams>,
) -> Result<ApiResponse<Paginated<Category>>, AppError> {
    let (page, limit, offset) = p.paging();
    let items = sqlx::query_as("SELECT * FROM categories ORDER BY name LIMIT $1 OFFSET $2")
        .bind(limit)
        .bind(offset)
        .fetch_all(&s.db)
        .await?;
    let total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM categories").fetch_one(&s.db).await?;
    Ok(ApiResponse::ok("Categories retrieved", Paginated { items, total, page }))
}

pub async fn get_category(
    State(s): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Category>, AppError> {
    let category = sqlx::query_as("SELECT * FROM categories WHERE id = $1")
        .bind(id)
        .fetch_optional(&s.db)
        .await?
        .ok_or_else(|| AppError::not_found("category", id))?;
    Ok(ApiResponse::ok("Category retrieved", category))
}

pub async fn create_category(
    State(s): State<AppState>,
    _admin: AdminUser,
    Json(r): Json<CategoryPayload>,
) -> Result<ApiResponse<Category>, AppError> {
    let category = sqlx::query_as(
        "INSERT INTO categories (id, name, slug, description, parent_id, image_url)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(&r.name)
    .bind(slugify(&r.name))
    .bind(&r.description)
    .bind(r.parent_id)
    .bind(&r.image_url)
    .fetch_one(&s.db)
    .await?;
    Ok(ApiResponse::created("Category created", category))
}

pub async fn update_category(
    State(s): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(r): Json<CategoryPayload>,
) -> Result<ApiResponse<Category>, AppError> {
    let category = sqlx::query_as(
        "UPDATE categories SET name = $2, slug = $3, description = $4, parent_id = $5, image_url = $6
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&r.name)
    .bind(slugify(&r.name))
    .bind(&r.description)
    .bind(r.parent_id)
    .bind(&r.image_url)
    .fetch_optional(&s.db)
    .await?
    .ok_or_else(|| AppError::not_found("category", id))?;
    Ok(ApiResponse::ok("Category updated", category))
}

pub async fn delete_category(
    State(s): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, AppError> {
    let res = sqlx::query("DELETE FROM categories WHERE id = $1").bind(id).execute(&s.db).await?;
    if res.rows_affected() == 0 {
        return Err(AppError::not_found("category", id));
    }
    Ok(ApiResponse::ok("Category deleted", ()))
}

// ---------------------------------------------------------------------------
// Suppliers
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierPayload {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

pub async fn list_suppliers(
    State(s): State<AppState>,
    Query(p): Query<ListParams>,
) -> Result<ApiResponse<Paginated<Supplier>>, AppError> {
    let (page, limit, offset) = p.paging();
    let items = sqlx::query_as("SELECT * FROM suppliers ORDER BY name LIMIT $1 OFFSET $2")
        .bind(limit)
        .bind(offset)
        .fetch_all(&s.db)
        .await?;
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM suppliers").fetch_one(&s.db).await?;
    Ok(ApiResponse::ok("Suppliers retrieved", Paginated { items, total, page }))
}

pub async fn get_supplier(
    State(s): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Supplier>, AppError> {
    let supplier = sqlx::query_as("SELECT * FROM suppliers WHERE id = $1")
        .bind(id)
        .fetch_optional(&s.db)
        .await?
        .ok_or_else(|| AppError::not_found("supplier", id))?;
    Ok(ApiResponse::ok("Supplier retrieved", supplier))
}

pub async fn create_supplier(
    State(s): State<AppState>,
    _admin: AdminUser,
    Json(r): Json<SupplierPayload>,
) -> Result<ApiResponse<Supplier>, AppError> {
    let supplier = sqlx::query_as(
        "INSERT INTO suppliers (id, name, email, phone) VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(&r.name)
    .bind(&r.email)
    .bind(&r.phone)
    .fetch_one(&s.db)
    .await?;
    Ok(ApiResponse::created("Supplier created", supplier))
}

pub async fn update_supplier(
    State(s): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(r): Json<SupplierPayload>,
) -> Result<ApiResponse<Supplier>, AppError> {
    let supplier = sqlx::query_as(
        "UPDATE suppliers SET name = $2, email = $3, phone = $4 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&r.name)
    .bind(&r.email)
    .bind(&r.phone)
    .fetch_optional(&s.db)
    .await?
    .ok_or_else(|| AppError::not_found("supplier", id))?;
    Ok(ApiResponse::ok("Supplier updated", supplier))
}

pub async fn delete_supplier(
    State(s): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, AppError> {
    let res = sqlx::query("DELETE FROM suppliers WHERE id = $1").bind(id).execute(&s.db).await?;
    if res.rows_affected() == 0 {
        return Err(AppError::not_found("supplier", id));
    }
    Ok(ApiResponse::ok("Supplier deleted", ()))
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct TagPayload {
    pub name: String,
}

pub async fn list_tags(State(s): State<AppState>) -> Result<ApiResponse<Vec<Tag>>, AppError> {
    let tags = sqlx::query_as("SELECT * FROM tags ORDER BY name").fetch_all(&s.db).await?;
    Ok(ApiResponse::ok("Tags retrieved", tags))
}

pub async fn get_tag(
    State(s): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Tag>, AppError> {
    let tag = sqlx::query_as("SELECT * FROM tags WHERE id = $1")
        .bind(id)
        .fetch_optional(&s.db)
        .await?
        .ok_or_else(|| AppError::not_found("tag", id))?;
    Ok(ApiResponse::ok("Tag retrieved", tag))
}

pub async fn create_tag(
    State(s): State<AppState>,
    _admin: AdminUser,
    Json(r): Json<TagPayload>,
) -> Result<ApiResponse<Tag>, AppError> {
    let tag = sqlx::query_as("INSERT INTO tags (id, name) VALUES ($1, $2) RETURNING *")
        .bind(Uuid::now_v7())
        .bind(&r.name)
        .fetch_one(&s.db)
        .await?;
    Ok(ApiResponse::created("Tag created", tag))
}

pub async fn delete_tag(
    State(s): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, AppError> {
    let res = sqlx::query("DELETE FROM tags WHERE id = $1").bind(id).execute(&s.db).await?;
    if res.rows_affected() == 0 {
        return Err(AppError::not_found("tag", id));
    }
    Ok(ApiResponse::ok("Tag deleted", ()))
}

// ---------------------------------------------------------------------------
// Coupons
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponPayload {
    pub code: String,
    pub discount_percent: Decimal,
    pub expires_at: Option<DateTime<Utc>>,
}

pub async fn list_coupons(
    State(s): State<AppState>,
    Query(p): Query<ListParams>,
) -> Result<ApiResponse<Paginated<Coupon>>, AppError> {
    let (page, limit, offset) = p.paging();
    let items = sqlx::query_as("SELECT * FROM coupons ORDER BY created_at DESC LIMIT $1 OFFSET $2")
        .bind(limit)
        .bind(offset)
        .fetch_all(&s.db)
        .await?;
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM coupons").fetch_one(&s.db).await?;
    Ok(ApiResponse::ok("Coupons retrieved", Paginated { items, total, page }))
}

pub async fn get_coupon(
    State(s): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Coupon>, AppError> {
    let coupon = sqlx::query_as("SELECT * FROM coupons WHERE id = $1")
        .bind(id)
        .fetch_optional(&s.db)
        .await?
        .ok_or_else(|| AppError::not_found("coupon", id))?;
    Ok(ApiResponse::ok("Coupon retrieved", coupon))
}

pub async fn create_coupon(
    State(s): State<AppState>,
    _admin: AdminUser,
    Json(r): Json<CouponPayload>,
) -> Result<ApiResponse<Coupon>, AppError> {
    let coupon = sqlx::query_as(
        "INSERT INTO coupons (id, code, discount_percent, expires_at)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(&r.code)
    .bind(r.discount_percent)
    .bind(r.expires_at)
    .fetch_one(&s.db)
    .await?;
    Ok(ApiResponse::created("Coupon created", coupon))
}

pub async fn update_coupon(
    State(s): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(r): Json<CouponPayload>,
) -> Result<ApiResponse<Coupon>, AppError> {
    let coupon = sqlx::query_as(
        "UPDATE coupons SET code = $2, discount_percent = $3, expires_at = $4
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&r.code)
    .bind(r.discount_percent)
    .bind(r.expires_at)
    .fetch_optional(&s.db)
    .await?
    .ok_or_else(|| AppError::not_found("coupon", id))?;
    Ok(ApiResponse::ok("Coupon updated", coupon))
}

pub async fn delete_coupon(
    State(s): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, AppError> {
    let res = sqlx::query("DELETE FROM coupons WHERE id = $1").bind(id).execute(&s.db).await?;
    if res.rows_affected() == 0 {
        return Err(AppError::not_found("coupon", id));
    }
    Ok(ApiResponse::ok("Coupon deleted", ()))
}
