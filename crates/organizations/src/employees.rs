use serde::{Deserialize, Serialize};

use opsdesk_core::{DomainError, DomainResult, Entity, EntityId, TenantId};
use opsdesk_infra::TenantStore;

use crate::organization::OrganizationId;

/// Employee identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub EntityId);

impl EmployeeId {
    pub fn new() -> Self {
        Self(EntityId::new())
    }
}

impl Default for EmployeeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Employee record associated with one organization in one tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub tenant_id: TenantId,
    pub organization_id: OrganizationId,
    pub name: String,
    pub email: String,
}

impl Entity for Employee {
    type Id = EmployeeId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Query filter for employee lookups.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct EmployeeFilter {
    pub organization_id: Option<OrganizationId>,
}

/// Query result page: the matching items plus the total count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeePage {
    pub items: Vec<Employee>,
    pub total: usize,
}

/// Employee query/registration service.
pub struct EmployeeDirectory<S> {
    store: S,
}

impl<S> EmployeeDirectory<S>
where
    S: TenantStore<EmployeeId, Employee>,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn add(
        &self,
        tenant_id: TenantId,
        organization_id: OrganizationId,
        name: String,
        email: String,
    ) -> DomainResult<Employee> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("employee name cannot be empty"));
        }
        if !email.contains('@') {
            return Err(DomainError::validation("employee email is malformed"));
        }

        let employee = Employee {
            id: EmployeeId::new(),
            tenant_id,
            organization_id,
            name,
            email,
        };
        self.store.upsert(tenant_id, employee.id, employee.clone());
        Ok(employee)
    }

    /// List employees matching `filter`, with the total match count.
    pub fn list(&self, tenant_id: TenantId, filter: EmployeeFilter) -> EmployeePage {
        let items: Vec<Employee> = self
            .store
            .list(tenant_id)
            .into_iter()
            .filter(|e| match filter.organization_id {
                Some(org) => e.organization_id == org,
                None => true,
            })
            .collect();
        let total = items.len();
        EmployeePage { items, total }
    }

    pub fn count(&self, tenant_id: TenantId, filter: EmployeeFilter) -> usize {
        self.list(tenant_id, filter).total
    }
}
