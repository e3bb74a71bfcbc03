//! Process-wide command dispatcher.
//!
//! The bus maps a command *type* to exactly one handler. Registration is done
//! once during application wiring; dispatch happens per request.
//!
//! ## Delivery Semantics
//!
//! - **Exactly one handler** per command type: duplicate registration is
//!   rejected, dispatch without a handler is an error.
//! - **Synchronous**: `execute` runs the handler on the calling task and
//!   returns its output. Handlers that need IO own async-capable services.
//! - **No persistence**: commands are transient; nothing is stored or
//!   replayed by the bus.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::RwLock;

use opsdesk_core::DomainError;
use thiserror::Error;

use crate::{Command, CommandHandler};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandBusError {
    #[error("no handler registered for command '{0}'")]
    NoHandler(&'static str),

    #[error("a handler is already registered for command '{0}'")]
    DuplicateHandler(&'static str),

    /// Downcast failure between the erased registry and the typed API.
    /// Unreachable as long as registration goes through `register`.
    #[error("internal routing failure for command '{0}'")]
    Routing(&'static str),

    #[error("command bus lock poisoned")]
    Poisoned,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Object-safe shim over a typed handler.
trait ErasedHandler: Send + Sync {
    fn call(&self, command: Box<dyn Any + Send>) -> Result<Box<dyn Any + Send>, CommandBusError>;
}

struct Registered<C, H> {
    handler: H,
    _command: PhantomData<fn(C)>,
}

impl<C, H> ErasedHandler for Registered<C, H>
where
    C: Command,
    H: CommandHandler<C>,
{
    fn call(&self, command: Box<dyn Any + Send>) -> Result<Box<dyn Any + Send>, CommandBusError> {
        let command = command
            .downcast::<C>()
            .map_err(|_| CommandBusError::Routing(C::NAME))?;
        let output = self.handler.handle(*command)?;
        Ok(Box::new(output))
    }
}

/// Command bus: registry of one handler per command type.
///
/// Shared process-wide behind an `Arc`; `register` during wiring, `execute`
/// from request handlers.
pub struct CommandBus {
    handlers: RwLock<HashMap<TypeId, Box<dyn ErasedHandler>>>,
}

impl CommandBus {
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Register the handler for command type `C`.
    ///
    /// Fails with [`CommandBusError::DuplicateHandler`] if `C` already has one.
    pub fn register<C, H>(&self, handler: H) -> Result<(), CommandBusError>
    where
        C: Command,
        H: CommandHandler<C>,
    {
        let mut handlers = self.handlers.write().map_err(|_| CommandBusError::Poisoned)?;
        if handlers.contains_key(&TypeId::of::<C>()) {
            return Err(CommandBusError::DuplicateHandler(C::NAME));
        }
        handlers.insert(
            TypeId::of::<C>(),
            Box::new(Registered::<C, H> {
                handler,
                _command: PhantomData,
            }),
        );
        tracing::debug!(command = C::NAME, "command handler registered");
        Ok(())
    }

    /// Dispatch `command` to its registered handler and return the output.
    pub fn execute<C: Command>(&self, command: C) -> Result<C::Output, CommandBusError> {
        let handlers = self.handlers.read().map_err(|_| CommandBusError::Poisoned)?;
        let handler = handlers
            .get(&TypeId::of::<C>())
            .ok_or(CommandBusError::NoHandler(C::NAME))?;

        tracing::debug!(command = C::NAME, "dispatching command");
        let output = handler.call(Box::new(command))?;
        output
            .downcast::<C::Output>()
            .map(|boxed| *boxed)
            .map_err(|_| CommandBusError::Routing(C::NAME))
    }
}

impl Default for CommandBus {
    fn default() -> Self {
        Self::new()
    }
}
