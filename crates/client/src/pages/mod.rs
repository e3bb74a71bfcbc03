pub mod edit_organization;

pub use edit_organization::{EditOrganizationPage, Lifecycle};
