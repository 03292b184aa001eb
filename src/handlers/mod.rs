pub mod cart;
pub mod catalog;
pub mod content;
pub mod orders;
pub mod products;
pub mod shipping;

use axum::routing::{get, patch};
use axum::Router;

use crate::AppState;

pub fn api_router() -> Router<AppState> {
    Router::new()
        // catalog reference data
        .route("/brands", get(catalog::list_brands).post(catalog::create_brand))
        .route(
            "/brands/:id",
            get(catalog::get_brand).put(catalog::update_brand).delete(catalog::delete_brand),
        )
        .route("/categories", get(catalog::list_categories).post(catalog::create_category))
        .route(
            "/categories/:id",
            get(catalog::get_category)
                .put(catalog::update_category)
                .delete(catalog::delete_category),
        )
        .route("/suppliers", get(catalog::list_suppliers).post(catalog::create_supplier))
        .route(
            "/suppliers/:id",
            get(catalog::get_supplier)
                .put(catalog::update_supplier)
                .delete(catalog::delete_supplier),
        )
        .route("/tags", get(catalog::list_tags).post(catalog::create_tag))
        .route("/tags/:id", get(catalog::get_tag).delete(catalog::delete_tag))
        .route("/coupons", get(catalog::list_coupons).post(catalog::create_coupon))
        .route(
            "/coupons/:id",
            get(catalog::get_coupon).put(catalog::update_coupon).delete(catalog::delete_coupon),
        )
        // products and their purchasable variants
        .route("/products", get(products::list_products).post(products::create_product))
        .route(
            "/products/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route(
            "/products/:id/specifications",
            get(products::list_specifications).post(products::create_specification),
        )
        .route(
            "/specifications/:id",
            get(products::get_specification)
                .put(products::update_specification)
                .delete(products::delete_specification),
        )
        // regions and rates
        .route("/wilayas", get(shipping::list_wilayas).post(shipping::create_wilaya))
        .route("/wilayas/:id", get(shipping::get_wilaya).delete(shipping::delete_wilaya))
        .route("/shippings", get(shipping::list_shippings).post(shipping::create_shipping))
        .route(
            "/shippings/:id",
            get(shipping::get_shipping)
                .put(shipping::update_shipping)
                .delete(shipping::delete_shipping),
        )
        // cart & checkout
        .route(
            "/cart/:session",
            get(cart::get_cart).post(cart::add_to_cart).delete(cart::clear_cart),
        )
        .route("/orders", get(orders::list_orders).post(orders::create_order))
        .route("/orders/:id", get(orders::get_order))
        .route("/orders/:id/status", patch(orders::update_order_status))
        // ancillary content
        .route("/highlights", get(content::list_highlights).post(content::create_highlight))
        .route(
            "/highlights/:id",
            get(content::get_highlight)
                .put(content::update_highlight)
                .delete(content::delete_highlight),
        )
        .route("/company-info", get(content::get_company_info).put(content::upsert_company_info))
        .route("/contacts", get(content::list_contacts).post(content::create_contact))
}
