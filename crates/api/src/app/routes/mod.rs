use axum::{routing::get, routing::post, Router};

pub mod common;
pub mod employees;
pub mod organizations;
pub mod product_variants;
pub mod system;

/// Router for all authenticated (tenant-scoped) endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/create-variants", post(product_variants::create_variants))
        .nest("/product-variants", product_variants::router())
        .nest("/organizations", organizations::router())
        .nest("/employees", employees::router())
}
