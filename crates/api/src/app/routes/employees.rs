use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use opsdesk_core::EntityId;
use opsdesk_organizations::{EmployeeFilter, OrganizationId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_employees).post(add_employee))
        .route("/count", get(count_employees))
}

pub async fn add_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<crate::context::TenantContext>,
    Json(body): Json<dto::CreateEmployeeRequest>,
) -> axum::response::Response {
    let organization_id = match parse_organization_id(&body.organization_id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services
        .employees
        .add(tenant.tenant_id(), organization_id, body.name, body.email)
    {
        Ok(employee) => (StatusCode::CREATED, Json(employee_to_json(&employee))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// `GET /employees?organization_id=` returns matching items plus the total.
pub async fn list_employees(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<crate::context::TenantContext>,
    Query(query): Query<dto::EmployeeQuery>,
) -> axum::response::Response {
    let filter = match filter_from_query(query) {
        Ok(f) => f,
        Err(resp) => return resp,
    };

    let page = services.employees.list(tenant.tenant_id(), filter);
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "items": page.items.iter().map(employee_to_json).collect::<Vec<_>>(),
            "total": page.total,
        })),
    )
        .into_response()
}

pub async fn count_employees(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<crate::context::TenantContext>,
    Query(query): Query<dto::EmployeeQuery>,
) -> axum::response::Response {
    let filter = match filter_from_query(query) {
        Ok(f) => f,
        Err(resp) => return resp,
    };

    let total = services.employees.count(tenant.tenant_id(), filter);
    (StatusCode::OK, Json(serde_json::json!({ "total": total }))).into_response()
}

fn filter_from_query(
    query: dto::EmployeeQuery,
) -> Result<EmployeeFilter, axum::response::Response> {
    let organization_id = match query.organization_id {
        Some(raw) => Some(parse_organization_id(&raw)?),
        None => None,
    };
    Ok(EmployeeFilter { organization_id })
}

fn parse_organization_id(raw: &str) -> Result<OrganizationId, axum::response::Response> {
    raw.parse::<EntityId>().map(OrganizationId).map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid organization id")
    })
}

fn employee_to_json(employee: &opsdesk_organizations::Employee) -> serde_json::Value {
    serde_json::json!({
        "id": employee.id.0.to_string(),
        "tenant_id": employee.tenant_id.to_string(),
        "organization_id": employee.organization_id.0.to_string(),
        "name": employee.name,
        "email": employee.email,
    })
}
