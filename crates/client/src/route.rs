//! Route state as seen by a page: resolver-produced data plus the active
//! child segment (the "tab" portion of the URL).

use std::sync::Mutex;

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use opsdesk_organizations::Organization;

/// Data produced by route resolvers for the organization edit page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteData {
    pub organization: Option<Organization>,
}

/// The currently activated route.
pub struct ActivatedRoute {
    data: watch::Sender<RouteData>,
    active_child: Mutex<Option<String>>,
}

impl ActivatedRoute {
    pub fn new() -> Self {
        Self {
            data: watch::Sender::new(RouteData::default()),
            active_child: Mutex::new(None),
        }
    }

    /// Publish freshly resolved route data (re-resolution re-emits).
    pub fn resolve(&self, data: RouteData) {
        self.data.send_replace(data);
    }

    /// Stream of resolved data; yields the current value first.
    pub fn data_stream(&self) -> WatchStream<RouteData> {
        WatchStream::new(self.data.subscribe())
    }

    pub fn set_active_child(&self, segment: impl Into<String>) {
        if let Ok(mut child) = self.active_child.lock() {
            *child = Some(segment.into());
        }
    }

    /// The active child route segment, if any (e.g. `"settings"`).
    pub fn active_child(&self) -> Option<String> {
        self.active_child.lock().ok().and_then(|c| c.clone())
    }
}

impl Default for ActivatedRoute {
    fn default() -> Self {
        Self::new()
    }
}
