//! Process-wide observable application state.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use opsdesk_auth::Permission;
use opsdesk_core::{TenantId, UserId};
use opsdesk_organizations::Organization;

/// The authenticated user as seen by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub tenant_id: TenantId,
    pub permissions: Vec<Permission>,
}

/// Observable holder of client session state.
///
/// Backed by `watch` channels so pages can both snapshot the current value
/// and subscribe to changes. Cheap to clone via `Arc` at call sites.
pub struct Store {
    user: watch::Sender<Option<CurrentUser>>,
    selected_organization: watch::Sender<Option<Organization>>,
}

impl Store {
    pub fn new() -> Self {
        Self {
            user: watch::Sender::new(None),
            selected_organization: watch::Sender::new(None),
        }
    }

    pub fn set_user(&self, user: CurrentUser) {
        self.user.send_replace(Some(user));
    }

    pub fn user(&self) -> Option<CurrentUser> {
        self.user.borrow().clone()
    }

    pub fn set_selected_organization(&self, organization: Organization) {
        self.selected_organization.send_replace(Some(organization));
    }

    pub fn clear_selected_organization(&self) {
        self.selected_organization.send_replace(None);
    }

    pub fn selected_organization(&self) -> Option<Organization> {
        self.selected_organization.borrow().clone()
    }

    /// Change stream for the selected organization.
    ///
    /// Yields the current value first, then every subsequent change.
    pub fn selected_organization_stream(&self) -> WatchStream<Option<Organization>> {
        WatchStream::new(self.selected_organization.subscribe())
    }

    /// Whether the current user holds `permission` (wildcard `*` grants all).
    pub fn has_permission(&self, permission: &Permission) -> bool {
        match self.user.borrow().as_ref() {
            Some(user) => user
                .permissions
                .iter()
                .any(|p| p.is_wildcard() || p == permission),
            None => false,
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
