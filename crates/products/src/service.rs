use chrono::Utc;

use opsdesk_core::{DomainError, DomainResult, TenantId};
use opsdesk_infra::TenantStore;

use crate::product::Product;
use crate::variant::{variant_combinations, ProductVariant, ProductVariantId};

/// CRUD service for product variants.
///
/// Creation is all-or-nothing per request: the product is validated before
/// any variant is written, so a rejected request persists nothing. Creation
/// is *not* idempotent — resubmitting the same product creates a fresh set of
/// variants with new identifiers.
pub struct ProductVariantService<S> {
    store: S,
}

impl<S> ProductVariantService<S>
where
    S: TenantStore<ProductVariantId, ProductVariant>,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create one variant per option combination of `product`.
    ///
    /// Returns the created variants in combination order.
    pub fn create_variants(
        &self,
        tenant_id: TenantId,
        product: &Product,
    ) -> DomainResult<Vec<ProductVariant>> {
        if product.tenant_id != tenant_id {
            return Err(DomainError::invariant("product belongs to another tenant"));
        }
        product.validate()?;

        let created_at = Utc::now();
        let variants: Vec<ProductVariant> = variant_combinations(&product.option_groups)
            .into_iter()
            .map(|options| ProductVariant {
                id: ProductVariantId::new(),
                product_id: product.id,
                tenant_id,
                options,
                created_at,
            })
            .collect();

        for variant in &variants {
            self.store.upsert(tenant_id, variant.id, variant.clone());
        }

        Ok(variants)
    }

    pub fn get(&self, tenant_id: TenantId, id: &ProductVariantId) -> Option<ProductVariant> {
        self.store.get(tenant_id, id)
    }

    pub fn list(&self, tenant_id: TenantId) -> Vec<ProductVariant> {
        self.store.list(tenant_id)
    }

    pub fn remove(&self, tenant_id: TenantId, id: &ProductVariantId) -> DomainResult<()> {
        self.store
            .remove(tenant_id, id)
            .map(|_| ())
            .ok_or_else(DomainError::not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opsdesk_core::EntityId;
    use opsdesk_infra::InMemoryTenantStore;

    use crate::product::{ProductId, ProductOptionGroup};

    fn service() -> ProductVariantService<InMemoryTenantStore<ProductVariantId, ProductVariant>> {
        ProductVariantService::new(InMemoryTenantStore::new())
    }

    fn shirt(tenant_id: TenantId) -> Product {
        Product {
            id: ProductId::new(EntityId::new()),
            tenant_id,
            name: "Shirt".to_string(),
            code: "SHIRT-01".to_string(),
            option_groups: vec![
                ProductOptionGroup {
                    name: "size".to_string(),
                    options: vec!["S".to_string(), "M".to_string()],
                },
                ProductOptionGroup {
                    name: "color".to_string(),
                    options: vec!["red".to_string(), "blue".to_string(), "green".to_string()],
                },
            ],
        }
    }

    #[test]
    fn creates_one_variant_per_combination() {
        let svc = service();
        let tenant = TenantId::new();
        let product = shirt(tenant);

        let variants = svc.create_variants(tenant, &product).unwrap();
        assert_eq!(variants.len(), 6);
        assert!(variants.iter().all(|v| v.product_id == product.id));
        assert!(variants.iter().all(|v| v.tenant_id == tenant));
        assert_eq!(svc.list(tenant).len(), 6);
    }

    #[test]
    fn product_without_options_yields_a_single_base_variant() {
        let svc = service();
        let tenant = TenantId::new();
        let mut product = shirt(tenant);
        product.option_groups.clear();

        let variants = svc.create_variants(tenant, &product).unwrap();
        assert_eq!(variants.len(), 1);
        assert!(variants[0].options.is_empty());
    }

    #[test]
    fn invalid_product_persists_nothing() {
        let svc = service();
        let tenant = TenantId::new();
        let mut product = shirt(tenant);
        product.name = String::new();

        let err = svc.create_variants(tenant, &product).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(svc.list(tenant).is_empty());
    }

    #[test]
    fn rejects_cross_tenant_products() {
        let svc = service();
        let tenant = TenantId::new();
        let product = shirt(TenantId::new());

        let err = svc.create_variants(tenant, &product).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn resubmission_creates_duplicate_variants() {
        // No deduplication key is specified; repeated submission duplicates.
        let svc = service();
        let tenant = TenantId::new();
        let product = shirt(tenant);

        svc.create_variants(tenant, &product).unwrap();
        svc.create_variants(tenant, &product).unwrap();
        assert_eq!(svc.list(tenant).len(), 12);
    }

    #[test]
    fn remove_missing_variant_is_not_found() {
        let svc = service();
        let tenant = TenantId::new();
        let err = svc.remove(tenant, &ProductVariantId::new()).unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }
}
