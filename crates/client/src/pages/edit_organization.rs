//! Organization edit page controller.
//!
//! The page binds two independent pipelines:
//! - route-resolved data → local organization + employee count refresh;
//! - store's selected organization → navigation to the edit URL.
//!
//! The pipelines run as separate tasks with no cross-ordering guarantee.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_stream::StreamExt;

use opsdesk_auth::Permission;
use opsdesk_organizations::Organization;

use crate::employees::{EmployeeCountFilter, EmployeesApi};
use crate::error::ClientError;
use crate::route::ActivatedRoute;
use crate::router::{ClientRouter, Location, PageOpener};
use crate::rx::RxStreamExt;
use crate::store::Store;

const ROUTE_DATA_DEBOUNCE: Duration = Duration::from_millis(100);
const STORE_DEBOUNCE: Duration = Duration::from_millis(200);

/// Page lifecycle. Transitions are strictly ordered:
/// `Uninitialized → DataBound → ViewAttached → Destroyed`
/// (destroy is allowed from any live state).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    DataBound,
    ViewAttached,
    Destroyed,
}

struct PageState {
    organization: Option<Organization>,
    employees_count: usize,
    lifecycle: Lifecycle,
}

pub struct EditOrganizationPage<A> {
    state: Arc<Mutex<PageState>>,
    store: Arc<Store>,
    router: Arc<ClientRouter>,
    location: Location,
    route: Arc<ActivatedRoute>,
    employees: Arc<A>,
    tasks: Vec<JoinHandle<()>>,
}

impl<A: EmployeesApi> EditOrganizationPage<A> {
    pub fn new(
        store: Arc<Store>,
        router: Arc<ClientRouter>,
        location: Location,
        route: Arc<ActivatedRoute>,
        employees: Arc<A>,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(PageState {
                organization: None,
                employees_count: 0,
                lifecycle: Lifecycle::Uninitialized,
            })),
            store,
            router,
            location,
            route,
            employees,
            tasks: Vec::new(),
        }
    }

    /// Initialize the page: subscribe to route-resolved data.
    ///
    /// Each accepted emission stores the organization locally and refreshes
    /// the employee count.
    pub fn bind_route_data(&mut self) -> Result<(), ClientError> {
        self.transition(Lifecycle::Uninitialized, Lifecycle::DataBound, "bind_route_data")?;

        let stream = self
            .route
            .data_stream()
            .debounce(ROUTE_DATA_DEBOUNCE)
            .distinct_until_changed();

        let state = Arc::clone(&self.state);
        let store = Arc::clone(&self.store);
        let employees = Arc::clone(&self.employees);

        let handle = tokio::spawn(async move {
            let mut stream = stream;
            while let Some(data) = stream.next().await {
                let Some(organization) = data.organization else {
                    continue;
                };
                if let Ok(mut state) = state.lock() {
                    state.organization = Some(organization);
                }
                refresh_employees_count(&state, &store, &*employees).await;
            }
        });
        self.tasks.push(handle);

        Ok(())
    }

    /// Attach the view: follow the store's selected organization into the
    /// edit URL, preserving the active child route segment.
    pub fn attach_view(&mut self) -> Result<(), ClientError> {
        self.transition(Lifecycle::DataBound, Lifecycle::ViewAttached, "attach_view")?;

        let stream = self
            .store
            .selected_organization_stream()
            .filter_map(|organization| organization)
            .debounce(STORE_DEBOUNCE)
            .distinct_until_changed();

        let router = Arc::clone(&self.router);
        let route = Arc::clone(&self.route);

        let handle = tokio::spawn(async move {
            let mut stream = stream;
            while let Some(organization) = stream.next().await {
                let mut segments = vec![
                    "pages".to_string(),
                    "organizations".to_string(),
                    "edit".to_string(),
                    organization.id.to_string(),
                ];
                if let Some(tab) = route.active_child() {
                    segments.push(tab);
                }
                router.navigate(&segments);
            }
        });
        self.tasks.push(handle);

        Ok(())
    }

    /// Open the organization's public page in a new browsing context.
    ///
    /// A no-op unless an organization is loaded and the current user holds
    /// the public-page edit permission.
    pub fn edit_public_page(&self, opener: &dyn PageOpener) {
        let Some(profile_link) = self
            .state
            .lock()
            .ok()
            .and_then(|s| s.organization.as_ref().map(|o| o.profile_link.clone()))
        else {
            return;
        };
        if !self.store.has_permission(&Permission::PUBLIC_PAGE_EDIT) {
            return;
        }

        let url = self
            .location
            .prepare_external_url(&format!("/share/organization/{profile_link}"));
        opener.open(&url);
    }

    /// Refresh the employee count for the loaded organization.
    ///
    /// A no-op when no organization is loaded.
    pub async fn load_employees_count(&self) {
        refresh_employees_count(&self.state, &self.store, &*self.employees).await;
    }

    /// Tear the page down; all pipeline tasks stop observing emissions.
    pub fn destroy(&mut self) -> Result<(), ClientError> {
        {
            let Ok(mut state) = self.state.lock() else {
                return Ok(());
            };
            if state.lifecycle == Lifecycle::Destroyed {
                return Err(ClientError::Lifecycle {
                    current: Lifecycle::Destroyed,
                    attempted: "destroy",
                });
            }
            state.lifecycle = Lifecycle::Destroyed;
        }

        for task in self.tasks.drain(..) {
            task.abort();
        }
        Ok(())
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.state
            .lock()
            .map(|s| s.lifecycle)
            .unwrap_or(Lifecycle::Destroyed)
    }

    pub fn organization(&self) -> Option<Organization> {
        self.state.lock().ok().and_then(|s| s.organization.clone())
    }

    pub fn employees_count(&self) -> usize {
        self.state.lock().map(|s| s.employees_count).unwrap_or(0)
    }

    fn transition(
        &self,
        from: Lifecycle,
        to: Lifecycle,
        attempted: &'static str,
    ) -> Result<(), ClientError> {
        let Ok(mut state) = self.state.lock() else {
            return Err(ClientError::Lifecycle {
                current: Lifecycle::Destroyed,
                attempted,
            });
        };
        if state.lifecycle != from {
            return Err(ClientError::Lifecycle {
                current: state.lifecycle,
                attempted,
            });
        }
        state.lifecycle = to;
        Ok(())
    }
}

impl<A> Drop for EditOrganizationPage<A> {
    fn drop(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

/// Fetch `{ items, total }` scoped to the loaded organization and store the
/// total. Fetch failures are logged and leave local state unchanged.
async fn refresh_employees_count<A: EmployeesApi>(
    state: &Arc<Mutex<PageState>>,
    store: &Store,
    employees: &A,
) {
    let Some(organization_id) = state
        .lock()
        .ok()
        .and_then(|s| s.organization.as_ref().map(|o| o.id))
    else {
        return;
    };
    let Some(user) = store.user() else {
        return;
    };

    let filter = EmployeeCountFilter {
        organization_id,
        tenant_id: user.tenant_id,
    };
    match employees.count(filter).await {
        Ok(count) => {
            if let Ok(mut state) = state.lock() {
                state.employees_count = count.total;
            }
        }
        Err(error) => {
            tracing::warn!(%error, organization_id = %organization_id, "employee count fetch failed");
        }
    }
}
