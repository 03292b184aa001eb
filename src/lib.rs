//! Bijoux Commerce - Jewelry E-commerce Backend
//!
//! Layered web service: axum handlers validate input and delegate to
//! services; services talk to PostgreSQL through one shared `sqlx` pool.
//!
//! ## Features
//! - Catalog management (products, specifications, brands, categories)
//! - Session cart and guest-friendly checkout
//! - Atomic order placement with sequential order numbers
//! - Landing-page content (highlights, company info, contact form)

pub mod auth;
pub mod config;
pub mod error;
pub mod events;
pub mod handlers;
pub mod models;
pub mod response;
pub mod services;

use config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub nats: Option<async_nats::Client>,
    pub config: AppConfig,
}
