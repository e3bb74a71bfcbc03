//! Client-side contract for the employees endpoints.

use serde::{Deserialize, Serialize};

use opsdesk_core::TenantId;
use opsdesk_organizations::{Employee, OrganizationId};

use crate::error::ClientError;

/// Query scope for employee lookups: one organization within one tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmployeeCountFilter {
    pub organization_id: OrganizationId,
    pub tenant_id: TenantId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeListing {
    pub items: Vec<Employee>,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct EmployeeCount {
    pub total: usize,
}

/// Employees query API as consumed by pages. Implemented over HTTP in
/// production and by fakes in tests.
pub trait EmployeesApi: Send + Sync + 'static {
    fn count(
        &self,
        filter: EmployeeCountFilter,
    ) -> impl Future<Output = Result<EmployeeCount, ClientError>> + Send;

    fn list(
        &self,
        filter: EmployeeCountFilter,
    ) -> impl Future<Output = Result<EmployeeListing, ClientError>> + Send;
}

/// HTTP implementation targeting the API server's `/employees` endpoints.
///
/// The tenant scope travels in the bearer token; only the organization filter
/// is sent as a query parameter.
pub struct HttpEmployeesApi {
    api_url: String,
    token: Option<String>,
}

impl HttpEmployeesApi {
    pub fn new(api_url: String) -> Self {
        Self {
            api_url,
            token: None,
        }
    }

    pub fn with_token(api_url: String, token: String) -> Self {
        Self {
            api_url,
            token: Some(token),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
    ) -> Result<T, ClientError> {
        let client = reqwest::Client::new();
        let mut req = client.get(&url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ClientError::Api(
                resp.status().as_u16(),
                resp.text().await.unwrap_or_default(),
            ));
        }

        resp.json::<T>()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }
}

impl EmployeesApi for HttpEmployeesApi {
    async fn count(&self, filter: EmployeeCountFilter) -> Result<EmployeeCount, ClientError> {
        let url = format!(
            "{}/employees/count?organization_id={}",
            self.api_url, filter.organization_id.0
        );
        self.get_json(url).await
    }

    async fn list(&self, filter: EmployeeCountFilter) -> Result<EmployeeListing, ClientError> {
        let url = format!(
            "{}/employees?organization_id={}",
            self.api_url, filter.organization_id.0
        );
        self.get_json(url).await
    }
}
