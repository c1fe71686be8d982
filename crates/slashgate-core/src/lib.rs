//! Core of the slashgate slash command relay.
//!
//! A configured trigger maps to a remote HTTP endpoint. When a user types
//! `/trigger some text`, the [`Dispatcher`] looks the trigger up in the
//! [`CommandRegistry`], resolves team/channel/user through the host, calls
//! the endpoint and turns the response into a [`CommandReply`].
//!
//! [`SlashPlugin`] wires these together with the host lifecycle
//! (activation, configuration changes).
//!
//! [`CommandReply`]: slashgate_types::CommandReply

pub mod dispatch;
pub mod error;
pub mod plugin;
pub mod registry;

pub use dispatch::Dispatcher;
pub use error::DispatchError;
pub use plugin::SlashPlugin;
pub use registry::{CommandRegistry, RegistryError, RegistrySnapshot};
