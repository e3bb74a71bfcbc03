/// An intent to perform a state change (command abstraction).
///
/// Commands are immutable data carriers: they describe *what* should happen
/// (e.g. "create variants for this product"), not *how*. They are transient —
/// constructed at the transport boundary, dispatched once, and dropped.
///
/// ## Command vs Query
///
/// - **Command**: request to change state; routed through the bus to exactly
///   one handler; may be rejected (validation, invariants).
/// - **Query**: read-only; served directly by services, never via the bus.
///
/// ## Design Constraints
///
/// Commands must be:
/// - **Send + 'static**: commands cross task boundaries (async handlers)
/// - owned data only (no borrows) so they can be stored and moved freely
///
/// `Output` is the value the registered handler produces on success; the bus
/// returns it to the caller unchanged.
pub trait Command: core::fmt::Debug + Send + 'static {
    /// Successful result of handling this command.
    type Output: Send + 'static;

    /// Stable command name used for routing diagnostics and logs.
    const NAME: &'static str;
}
