//! Host collaborator traits for slashgate.
//!
//! The plugin runs embedded in a chat server that owns its lifecycle. This
//! crate defines the seam between the two:
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`PluginHost`] | Services the host exposes to the plugin |
//! | [`CommandRegistration`] | Command palette metadata sent to the host |
//! | [`PluginError`] | Lifecycle failures reported back to the host |
//! | [`HostError`] | Failures of individual host calls |
//! | [`StaticHost`] | In-process host backed by fixed data |

pub mod error;
pub mod host;
pub mod traits;

pub use error::{HostError, PluginError};
pub use host::StaticHost;
pub use traits::{Channel, CommandRegistration, PluginHost, Team, User};
