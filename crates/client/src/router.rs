//! In-process router/location, mirroring single-page-app navigation.

use std::sync::Mutex;

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// Resolves app-relative paths against the deployment base href.
#[derive(Debug, Clone)]
pub struct Location {
    base_href: String,
}

impl Location {
    pub fn new(base_href: impl Into<String>) -> Self {
        Self {
            base_href: base_href.into(),
        }
    }

    /// Join `path` onto the base href, normalizing the slash between them.
    pub fn prepare_external_url(&self, path: &str) -> String {
        let base = self.base_href.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

/// Opens a URL in a new browsing context (new tab/window).
pub trait PageOpener: Send + Sync {
    fn open(&self, url: &str);
}

/// Records and publishes the current route.
pub struct ClientRouter {
    current: watch::Sender<String>,
    history: Mutex<Vec<String>>,
}

impl ClientRouter {
    pub fn new() -> Self {
        Self {
            current: watch::Sender::new(String::from("/")),
            history: Mutex::new(Vec::new()),
        }
    }

    /// Navigate to the route formed by `segments` (joined with `/`).
    pub fn navigate(&self, segments: &[String]) {
        let path = format!("/{}", segments.join("/"));
        if let Ok(mut history) = self.history.lock() {
            history.push(path.clone());
        }
        self.current.send_replace(path);
    }

    pub fn current(&self) -> String {
        self.current.borrow().clone()
    }

    pub fn route_stream(&self) -> WatchStream<String> {
        WatchStream::new(self.current.subscribe())
    }

    /// Every navigation performed so far, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.history.lock().map(|h| h.clone()).unwrap_or_default()
    }
}

impl Default for ClientRouter {
    fn default() -> Self {
        Self::new()
    }
}
