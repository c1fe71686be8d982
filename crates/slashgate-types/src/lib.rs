//! # slashgate-types
//!
//! Core type definitions for the slashgate slash command relay.
//!
//! This crate is the foundation of the dependency graph -- every other
//! slashgate crate depends on it. It contains:
//!
//! - **[`error`]** -- [`ConfigError`] for configuration decoding failures
//! - **[`config`]** -- Plugin configuration schema as stored by the host
//! - **[`endpoint`]** -- Per-trigger endpoint configuration
//! - **[`command`]** -- Command invocations and the replies sent back to the host

pub mod command;
pub mod config;
pub mod endpoint;
pub mod error;

pub use command::{CommandInvocation, CommandReply, ResponseType};
pub use config::{PluginConfig, SlashCommandConfig};
pub use endpoint::{EndpointConfig, RequestType};
pub use error::{ConfigError, Result};
