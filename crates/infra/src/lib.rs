//! `opsdesk-infra` — infrastructure adapters for the domain crates.

pub mod read_model;

pub use read_model::{InMemoryTenantStore, TenantStore};
