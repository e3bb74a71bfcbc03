use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use opsdesk_auth::Permission;
use opsdesk_core::EntityId;
use opsdesk_products::{CreateProductVariants, ProductVariantId};

use crate::app::routes::common::CmdAuth;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_variants))
        .route("/:id", get(get_variant).delete(delete_variant))
}

/// `POST /create-variants`: bulk-create the variants implied by the product
/// body's option groups. Delegates to the command bus; the controller itself
/// holds no business logic.
pub async fn create_variants(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<crate::context::TenantContext>,
    Extension(principal): Extension<crate::context::PrincipalContext>,
    Json(body): Json<dto::ProductBody>,
) -> axum::response::Response {
    let product = match dto::product_from_body(tenant.tenant_id(), body) {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    let cmd = CreateProductVariants {
        tenant_id: tenant.tenant_id(),
        product,
    };

    let cmd_auth = CmdAuth {
        inner: cmd,
        required: vec![Permission::PRODUCT_VARIANTS_CREATE],
    };
    if let Err(e) = crate::authz::authorize_command(&tenant, &principal, &cmd_auth) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string());
    }

    let variants = match services.bus.execute(cmd_auth.inner) {
        Ok(v) => v,
        Err(e) => return errors::bus_error_to_response(e),
    };

    (
        StatusCode::CREATED,
        Json(variants.iter().map(dto::variant_to_json).collect::<Vec<_>>()),
    )
        .into_response()
}

pub async fn get_variant(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<crate::context::TenantContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_variant_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.variants.get(tenant.tenant_id(), &id) {
        Some(variant) => (StatusCode::OK, Json(dto::variant_to_json(&variant))).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "variant not found"),
    }
}

pub async fn list_variants(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<crate::context::TenantContext>,
) -> axum::response::Response {
    let items = services
        .variants
        .list(tenant.tenant_id())
        .iter()
        .map(dto::variant_to_json)
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn delete_variant(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<crate::context::TenantContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_variant_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.variants.remove(tenant.tenant_id(), &id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

fn parse_variant_id(raw: &str) -> Result<ProductVariantId, axum::response::Response> {
    raw.parse::<EntityId>()
        .map(ProductVariantId)
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid variant id"))
}
