use thiserror::Error;

use crate::pages::Lifecycle;

/// Errors surfaced by the client runtime.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid lifecycle transition: {attempted} while {current:?}")]
    Lifecycle {
        current: Lifecycle,
        attempted: &'static str,
    },

    #[error("network error: {0}")]
    Network(String),

    #[error("api error (status {0}): {1}")]
    Api(u16, String),

    #[error("parse error: {0}")]
    Parse(String),
}
