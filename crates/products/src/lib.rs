//! `opsdesk-products` — product catalog domain.
//!
//! Products carry option groups (e.g. size, color); variants are the
//! purchasable combinations generated from them.

pub mod commands;
pub mod product;
pub mod service;
pub mod variant;

pub use commands::{CreateProductVariants, CreateProductVariantsHandler};
pub use product::{Product, ProductId, ProductOptionGroup};
pub use service::ProductVariantService;
pub use variant::{variant_combinations, ProductVariant, ProductVariantId, VariantOption};
