//! `opsdesk-commands` — command bus abstraction.
//!
//! Controllers build a [`Command`] and submit it to the [`CommandBus`]; the
//! bus routes it to the single registered [`CommandHandler`] for that command
//! type. This keeps HTTP adapters decoupled from business services.

pub mod bus;
pub mod command;
pub mod handler;

pub use bus::{CommandBus, CommandBusError};
pub use command::Command;
pub use handler::CommandHandler;
