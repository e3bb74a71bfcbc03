use axum::http::StatusCode;
use serde::Deserialize;

use opsdesk_core::{EntityId, TenantId};
use opsdesk_organizations::Organization;
use opsdesk_products::{Product, ProductId, ProductOptionGroup, ProductVariant};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

/// Product representation accepted by `POST /create-variants`.
#[derive(Debug, Deserialize)]
pub struct ProductBody {
    /// Existing product id; a fresh one is minted when absent.
    pub id: Option<String>,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub option_groups: Vec<OptionGroupBody>,
}

#[derive(Debug, Deserialize)]
pub struct OptionGroupBody {
    pub name: String,
    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrganizationRequest {
    pub name: String,
    pub profile_link: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    pub organization_id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct EmployeeQuery {
    pub organization_id: Option<String>,
}

// -------------------------
// Body → domain mapping
// -------------------------

pub fn product_from_body(
    tenant_id: TenantId,
    body: ProductBody,
) -> Result<Product, axum::response::Response> {
    let id = match body.id {
        Some(raw) => raw.parse::<EntityId>().map_err(|e| {
            errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", e.to_string())
        })?,
        None => EntityId::new(),
    };

    Ok(Product {
        id: ProductId::new(id),
        tenant_id,
        name: body.name,
        code: body.code,
        option_groups: body
            .option_groups
            .into_iter()
            .map(|g| ProductOptionGroup {
                name: g.name,
                options: g.options,
            })
            .collect(),
    })
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn variant_to_json(variant: &ProductVariant) -> serde_json::Value {
    serde_json::json!({
        "id": variant.id.0.to_string(),
        "product_id": variant.product_id.0.to_string(),
        "options": variant.options.iter().map(|o| serde_json::json!({
            "group": o.group,
            "value": o.value,
        })).collect::<Vec<_>>(),
        "created_at": variant.created_at.to_rfc3339(),
    })
}

pub fn organization_to_json(org: &Organization) -> serde_json::Value {
    serde_json::json!({
        "id": org.id.0.to_string(),
        "name": org.name,
        "profile_link": org.profile_link,
    })
}
