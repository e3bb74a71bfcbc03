//! `opsdesk-organizations` — organization and employee domain.

pub mod employees;
pub mod organization;

pub use employees::{
    Employee, EmployeeDirectory, EmployeeFilter, EmployeeId, EmployeePage,
};
pub use organization::{
    Organization, OrganizationId, OrganizationPatch, OrganizationService,
};
