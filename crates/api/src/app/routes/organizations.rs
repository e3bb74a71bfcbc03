use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use opsdesk_auth::Permission;
use opsdesk_core::EntityId;
use opsdesk_organizations::{OrganizationId, OrganizationPatch};

use crate::app::routes::common::CmdAuth;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_organization).get(list_organizations))
        .route("/:id", get(get_organization).put(update_organization))
}

pub async fn create_organization(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<crate::context::TenantContext>,
    Extension(principal): Extension<crate::context::PrincipalContext>,
    Json(body): Json<dto::CreateOrganizationRequest>,
) -> axum::response::Response {
    let guard = CmdAuth {
        inner: (),
        required: vec![Permission::ORGANIZATIONS_EDIT],
    };
    if let Err(e) = crate::authz::authorize_command(&tenant, &principal, &guard) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string());
    }

    match services
        .organizations
        .create(tenant.tenant_id(), body.name, body.profile_link)
    {
        Ok(org) => (StatusCode::CREATED, Json(dto::organization_to_json(&org))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_organization(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<crate::context::TenantContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_organization_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.organizations.get(tenant.tenant_id(), &id) {
        Some(org) => (StatusCode::OK, Json(dto::organization_to_json(&org))).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "organization not found"),
    }
}

pub async fn list_organizations(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<crate::context::TenantContext>,
) -> axum::response::Response {
    let items = services
        .organizations
        .list(tenant.tenant_id())
        .iter()
        .map(dto::organization_to_json)
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn update_organization(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<crate::context::TenantContext>,
    Extension(principal): Extension<crate::context::PrincipalContext>,
    Path(id): Path<String>,
    Json(patch): Json<OrganizationPatch>,
) -> axum::response::Response {
    let id = match parse_organization_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let guard = CmdAuth {
        inner: (),
        required: vec![Permission::ORGANIZATIONS_EDIT],
    };
    if let Err(e) = crate::authz::authorize_command(&tenant, &principal, &guard) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string());
    }

    match services.organizations.update(tenant.tenant_id(), &id, patch) {
        Ok(org) => (StatusCode::OK, Json(dto::organization_to_json(&org))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

fn parse_organization_id(raw: &str) -> Result<OrganizationId, axum::response::Response> {
    raw.parse::<EntityId>().map(OrganizationId).map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid organization id")
    })
}
