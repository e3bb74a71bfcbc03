use opsdesk_core::DomainError;

use crate::Command;

/// Handles a single command type and produces its output.
///
/// Handlers are thin adapters between the bus and the service layer: they
/// unpack the command, call the service, and return the result. Business
/// rules live in the services, not here.
///
/// ## Error Model
///
/// Handlers fail with [`DomainError`] only. Transport concerns (status codes,
/// retries) are mapped by the caller; the bus itself adds routing errors on
/// top (see [`crate::CommandBusError`]).
///
/// ## Thread Safety
///
/// The bus is shared process-wide, so handlers must be `Send + Sync` and own
/// their dependencies (typically `Arc`s of services).
pub trait CommandHandler<C: Command>: Send + Sync + 'static {
    fn handle(&self, command: C) -> Result<C::Output, DomainError>;
}
