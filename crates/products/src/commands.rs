//! Commands for the product domain.

use std::sync::Arc;

use opsdesk_commands::{Command, CommandHandler};
use opsdesk_core::{DomainError, TenantId};
use opsdesk_infra::TenantStore;

use crate::product::Product;
use crate::service::ProductVariantService;
use crate::variant::{ProductVariant, ProductVariantId};

/// Intent: create the variants implied by a product's option groups.
#[derive(Debug, Clone)]
pub struct CreateProductVariants {
    pub tenant_id: TenantId,
    pub product: Product,
}

impl Command for CreateProductVariants {
    type Output = Vec<ProductVariant>;
    const NAME: &'static str = "products.variants.create";
}

/// Thin pass-through from the bus to [`ProductVariantService`].
pub struct CreateProductVariantsHandler<S> {
    service: Arc<ProductVariantService<S>>,
}

impl<S> CreateProductVariantsHandler<S> {
    pub fn new(service: Arc<ProductVariantService<S>>) -> Self {
        Self { service }
    }
}

impl<S> CommandHandler<CreateProductVariants> for CreateProductVariantsHandler<S>
where
    S: TenantStore<ProductVariantId, ProductVariant> + 'static,
{
    fn handle(&self, command: CreateProductVariants) -> Result<Vec<ProductVariant>, DomainError> {
        self.service
            .create_variants(command.tenant_id, &command.product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opsdesk_commands::CommandBus;
    use opsdesk_core::EntityId;
    use opsdesk_infra::InMemoryTenantStore;

    use crate::product::{ProductId, ProductOptionGroup};

    #[test]
    fn bus_dispatch_reaches_the_service() {
        let service = Arc::new(ProductVariantService::new(InMemoryTenantStore::new()));
        let bus = CommandBus::new();
        bus.register::<CreateProductVariants, _>(CreateProductVariantsHandler::new(
            service.clone(),
        ))
        .unwrap();

        let tenant = TenantId::new();
        let product = Product {
            id: ProductId::new(EntityId::new()),
            tenant_id: tenant,
            name: "Mug".to_string(),
            code: "MUG-01".to_string(),
            option_groups: vec![ProductOptionGroup {
                name: "color".to_string(),
                options: vec!["white".to_string(), "black".to_string()],
            }],
        };

        let variants = bus
            .execute(CreateProductVariants {
                tenant_id: tenant,
                product,
            })
            .unwrap();

        assert_eq!(variants.len(), 2);
        assert_eq!(service.list(tenant).len(), 2);
    }
}
