use serde::{Deserialize, Serialize};

use opsdesk_core::{DomainError, DomainResult, Entity, EntityId, TenantId};
use opsdesk_infra::TenantStore;

/// Organization identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrganizationId(pub EntityId);

impl OrganizationId {
    pub fn new() -> Self {
        Self(EntityId::new())
    }
}

impl Default for OrganizationId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Organization entity.
///
/// `profile_link` is the URL slug of the organization's public page
/// (`/share/organization/<profile_link>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub tenant_id: TenantId,
    pub name: String,
    pub profile_link: String,
}

impl Organization {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("organization name cannot be empty"));
        }
        if self.profile_link.is_empty() {
            return Err(DomainError::validation("profile link cannot be empty"));
        }
        if !self
            .profile_link
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(DomainError::validation(
                "profile link must be a lowercase slug (a-z, 0-9, '-')",
            ));
        }
        Ok(())
    }
}

impl Entity for Organization {
    type Id = OrganizationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Partial update for an organization (absent fields are left unchanged).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganizationPatch {
    pub name: Option<String>,
    pub profile_link: Option<String>,
}

/// CRUD service for organizations.
pub struct OrganizationService<S> {
    store: S,
}

impl<S> OrganizationService<S>
where
    S: TenantStore<OrganizationId, Organization>,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn create(
        &self,
        tenant_id: TenantId,
        name: String,
        profile_link: String,
    ) -> DomainResult<Organization> {
        let organization = Organization {
            id: OrganizationId::new(),
            tenant_id,
            name,
            profile_link,
        };
        organization.validate()?;
        self.store
            .upsert(tenant_id, organization.id, organization.clone());
        Ok(organization)
    }

    pub fn get(&self, tenant_id: TenantId, id: &OrganizationId) -> Option<Organization> {
        self.store.get(tenant_id, id)
    }

    pub fn list(&self, tenant_id: TenantId) -> Vec<Organization> {
        self.store.list(tenant_id)
    }

    pub fn update(
        &self,
        tenant_id: TenantId,
        id: &OrganizationId,
        patch: OrganizationPatch,
    ) -> DomainResult<Organization> {
        let mut organization = self
            .store
            .get(tenant_id, id)
            .ok_or_else(DomainError::not_found)?;

        if let Some(name) = patch.name {
            organization.name = name;
        }
        if let Some(profile_link) = patch.profile_link {
            organization.profile_link = profile_link;
        }
        organization.validate()?;

        self.store
            .upsert(tenant_id, organization.id, organization.clone());
        Ok(organization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opsdesk_infra::InMemoryTenantStore;

    fn service() -> OrganizationService<InMemoryTenantStore<OrganizationId, Organization>> {
        OrganizationService::new(InMemoryTenantStore::new())
    }

    #[test]
    fn create_and_fetch_round_trip() {
        let svc = service();
        let tenant = TenantId::new();

        let org = svc
            .create(tenant, "Acme Corp".to_string(), "acme".to_string())
            .unwrap();
        assert_eq!(svc.get(tenant, &org.id), Some(org));
    }

    #[test]
    fn create_rejects_invalid_profile_link() {
        let svc = service();
        let err = svc
            .create(TenantId::new(), "Acme".to_string(), "Not A Slug".to_string())
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn update_applies_only_present_fields() {
        let svc = service();
        let tenant = TenantId::new();
        let org = svc
            .create(tenant, "Acme".to_string(), "acme".to_string())
            .unwrap();

        let updated = svc
            .update(
                tenant,
                &org.id,
                OrganizationPatch {
                    name: Some("Acme International".to_string()),
                    profile_link: None,
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Acme International");
        assert_eq!(updated.profile_link, "acme");
    }

    #[test]
    fn update_validates_the_patched_state() {
        let svc = service();
        let tenant = TenantId::new();
        let org = svc
            .create(tenant, "Acme".to_string(), "acme".to_string())
            .unwrap();

        let err = svc
            .update(
                tenant,
                &org.id,
                OrganizationPatch {
                    name: None,
                    profile_link: Some("BAD SLUG".to_string()),
                },
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        // The stored record is untouched.
        assert_eq!(svc.get(tenant, &org.id).unwrap().profile_link, "acme");
    }

    #[test]
    fn update_of_unknown_organization_is_not_found() {
        let svc = service();
        let err = svc
            .update(
                TenantId::new(),
                &OrganizationId::new(),
                OrganizationPatch::default(),
            )
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[test]
    fn organizations_are_tenant_isolated() {
        let svc = service();
        let tenant_a = TenantId::new();
        let tenant_b = TenantId::new();

        let org = svc
            .create(tenant_a, "Acme".to_string(), "acme".to_string())
            .unwrap();
        assert!(svc.get(tenant_b, &org.id).is_none());
    }
}
