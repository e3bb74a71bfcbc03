//! Client runtime: observable store, in-process router, reactive stream
//! operators, and page controllers for the single-page-app side.

pub mod employees;
pub mod error;
pub mod pages;
pub mod route;
pub mod router;
pub mod rx;
pub mod store;

pub use employees::{EmployeeCount, EmployeeCountFilter, EmployeeListing, EmployeesApi, HttpEmployeesApi};
pub use error::ClientError;
pub use pages::{EditOrganizationPage, Lifecycle};
pub use route::{ActivatedRoute, RouteData};
pub use router::{ClientRouter, Location, PageOpener};
pub use rx::RxStreamExt;
pub use store::{CurrentUser, Store};
