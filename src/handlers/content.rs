//! Ancillary content: landing-page highlights, company profile, contact form.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::auth::AdminUser;
use crate::error::AppError;
use crate::models::{CompanyInfo, ContactMessage, Highlight};
use crate::response::{ApiResponse, ListParams, Paginated};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightPayload {
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub position: i32,
}

pub async fn list_highlights(
    State(s): State<AppState>,
) -> Result<ApiResponse<Vec<Highlight>>, AppError> {
    let highlights =
        sqlx::query_as("SELECT * FROM highlights ORDER BY position").fetch_all(&s.db).await?;
    Ok(ApiResponse::ok("Highlights retrieved", highlights))
}

pub async fn get_highlight(
    State(s): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Highlight>, AppError> {
    let highlight = sqlx::query_as("SELECT * FROM highlights WHERE id = $1")
        .bind(id)
        .fetch_optional(&s.db)
        .await?
        .ok_or_else(|| AppError::not_found("highlight", id))?;
    Ok(ApiResponse::ok("Highlight retrieved", highlight))
}

pub async fn create_highlight(
    State(s): State<AppState>,
    _admin: AdminUser,
    Json(r): Json<HighlightPayload>,
) -> Result<ApiResponse<Highlight>, AppError> {
    let highlight = sqlx::query_as(
        "INSERT INTO highlights (id, title, subtitle, image_url, position)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(&r.title)
    .bind(&r.subtitle)
    .bind(&r.image_url)
    .bind(r.position)
    .fetch_one(&s.db)
    .await?;
    Ok(ApiResponse::created("Highlight created", highlight))
}

pub async fn update_highlight(
    State(s): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(r): Json<HighlightPayload>,
) -> Result<ApiResponse<Highlight>, AppError> {
    let highlight = sqlx::query_as(
        "UPDATE highlights SET title = $2, subtitle = $3, image_url = $4, position = $5
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&r.title)
    .bind(&r.subtitle)
    .bind(&r.image_url)
    .bind(r.position)
    .fetch_optional(&s.db)
    .await?
    .ok_or_else(|| AppError::not_found("highlight", id))?;
    Ok(ApiResponse::ok("Highlight updated", highlight))
}

pub async fn delete_highlight(
    State(s): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, AppError> {
    let res = sqlx::query("DELETE FROM highlights WHERE id = $1").bind(id).execute(&s.db).await?;
    if res.rows_affected() == 0 {
        return Err(AppError::not_found("highlight", id));
    }
    Ok(ApiResponse::ok("Highlight deleted", ()))
}

// ---------------------------------------------------------------------------
// Company info (single row)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CompanyInfoPayload {
    pub name: String,
    pub about: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

pub async fn get_company_info(
    State(s): State<AppState>,
) -> Result<ApiResponse<CompanyInfo>, AppError> {
    let info = sqlx::query_as("SELECT * FROM company_info ORDER BY updated_at DESC LIMIT 1")
        .fetch_optional(&s.db)
        .await?
        .ok_or_else(|| AppError::NotFound("company info not set".into()))?;
    Ok(ApiResponse::ok("Company info retrieved", info))
}

pub async fn upsert_company_info(
    State(s): State<AppState>,
    _admin: AdminUser,
    Json(r): Json<CompanyInfoPayload>,
) -> Result<ApiResponse<CompanyInfo>, AppError> {
    let existing: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM company_info ORDER BY updated_at DESC LIMIT 1")
            .fetch_optional(&s.db)
            .await?;
    let info = match existing {
        Some(id) => {
            sqlx::query_as(
                "UPDATE company_info
                 SET name = $2, about = $3, email = $4, phone = $5, address = $6, updated_at = NOW()
                 WHERE id = $1 RETURNING *",
            )
            .bind(id)
            .bind(&r.name)
            .bind(&r.about)
            .bind(&r.email)
            .bind(&r.phone)
            .bind(&r.address)
            .fetch_one(&s.db)
            .await?
        }
        None => {
            sqlx::query_as(
                "INSERT INTO company_info (id, name, about, email, phone, address)
                 VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
            )
            .bind(Uuid::now_v7())
            .bind(&r.name)
            .bind(&r.about)
            .bind(&r.email)
            .bind(&r.phone)
            .bind(&r.address)
            .fetch_one(&s.db)
            .await?
        }
    };
    Ok(ApiResponse::ok("Company info saved", info))
}

// ---------------------------------------------------------------------------
// Contact messages
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct ContactPayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub subject: Option<String>,
    #[validate(length(min = 1))]
    pub message: String,
}

pub async fn create_contact(
    State(s): State<AppState>,
    Json(r): Json<ContactPayload>,
) -> Result<ApiResponse<ContactMessage>, AppError> {
    r.validate()?;
    let msg = sqlx::query_as(
        "INSERT INTO contact_messages (id, name, email, subject, message)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(&r.name)
    .bind(&r.email)
    .bind(&r.subject)
    .bind(&r.message)
    .fetch_one(&s.db)
    .await?;
    Ok(ApiResponse::created("Message received", msg))
}

pub async fn list_contacts(
    State(s): State<AppState>,
    _admin: AdminUser,
    Query(p): Query<ListParams>,
) -> Result<ApiResponse<Paginated<ContactMessage>>, AppError> {
    let (page, limit, offset) = p.paging();
    let items = sqlx::query_as(
        "SELECT * FROM contact_messages ORDER BY created_at DESC LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(&s.db)
    .await?;
    let total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM contact_messages").fetch_one(&s.db).await?;
    Ok(ApiResponse::ok("Messages retrieved", Paginated { items, total, page }))
}
