use std::sync::Arc;

use opsdesk_commands::CommandBus;
use opsdesk_infra::InMemoryTenantStore;
use opsdesk_organizations::{
    Employee, EmployeeDirectory, EmployeeId, Organization, OrganizationId, OrganizationService,
};
use opsdesk_products::{
    CreateProductVariants, CreateProductVariantsHandler, ProductVariant, ProductVariantId,
    ProductVariantService,
};

type VariantStore = InMemoryTenantStore<ProductVariantId, ProductVariant>;
type OrganizationStore = InMemoryTenantStore<OrganizationId, Organization>;
type EmployeeStore = InMemoryTenantStore<EmployeeId, Employee>;

/// Service container shared across request handlers via `Extension`.
#[derive(Clone)]
pub struct AppServices {
    pub bus: Arc<CommandBus>,
    pub variants: Arc<ProductVariantService<VariantStore>>,
    pub organizations: Arc<OrganizationService<OrganizationStore>>,
    pub employees: Arc<EmployeeDirectory<EmployeeStore>>,
}

/// Wire stores, services, and the command bus.
///
/// Handler registration happens exactly once here; the bus rejects a second
/// registration for the same command type.
pub fn build_services() -> AppServices {
    let variants = Arc::new(ProductVariantService::new(VariantStore::new()));
    let organizations = Arc::new(OrganizationService::new(OrganizationStore::new()));
    let employees = Arc::new(EmployeeDirectory::new(EmployeeStore::new()));

    let bus = Arc::new(CommandBus::new());
    bus.register::<CreateProductVariants, _>(CreateProductVariantsHandler::new(variants.clone()))
        .expect("create-variants handler registered once at startup");

    AppServices {
        bus,
        variants,
        organizations,
        employees,
    }
}
