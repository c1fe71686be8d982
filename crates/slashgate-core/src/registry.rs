//! Trigger-to-endpoint registry.
//!
//! The registry publishes an immutable [`RegistrySnapshot`] behind an
//! `Arc`. Readers clone the `Arc` under a short read lock and then work on
//! the snapshot with no lock held; a configuration reload swaps the `Arc`
//! under the write lock. A reader therefore sees either the old or the new
//! snapshot in full, and in-flight dispatches keep the snapshot they
//! started with alive until they finish.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use slashgate_types::config::DEFAULT_REQUEST_TIMEOUT_SECS;
use slashgate_types::{EndpointConfig, PluginConfig};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised by registry updates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The replacement is the snapshot that is already published.
    #[error("replacement snapshot is the currently published snapshot")]
    SameSnapshot,
}

/// Immutable point-in-time view of the configured triggers.
#[derive(Debug, Clone)]
pub struct RegistrySnapshot {
    endpoints: HashMap<String, EndpointConfig>,
    request_timeout: Duration,
}

impl RegistrySnapshot {
    /// Build a snapshot from endpoints. The first endpoint for a trigger
    /// wins; later duplicates are dropped.
    pub fn new(endpoints: impl IntoIterator<Item = EndpointConfig>) -> Self {
        let mut map = HashMap::new();
        for endpoint in endpoints {
            if map.contains_key(&endpoint.trigger) {
                warn!(trigger = %endpoint.trigger, "duplicate trigger in snapshot, ignoring");
                continue;
            }
            map.insert(endpoint.trigger.clone(), endpoint);
        }
        Self {
            endpoints: map,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// A snapshot with no triggers.
    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }

    /// Build a snapshot from decoded plugin configuration.
    pub fn from_config(config: &PluginConfig) -> Self {
        Self::new(config.endpoints()).with_request_timeout(config.request_timeout())
    }

    /// Set the timeout applied to outbound requests dispatched from this
    /// snapshot.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn get(&self, trigger: &str) -> Option<&EndpointConfig> {
        self.endpoints.get(trigger)
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// All triggers, sorted.
    pub fn triggers(&self) -> Vec<&str> {
        let mut triggers: Vec<&str> = self.endpoints.keys().map(String::as_str).collect();
        triggers.sort_unstable();
        triggers
    }

    /// All endpoints, sorted by trigger.
    pub fn endpoints(&self) -> Vec<&EndpointConfig> {
        let mut endpoints: Vec<&EndpointConfig> = self.endpoints.values().collect();
        endpoints.sort_by(|a, b| a.trigger.cmp(&b.trigger));
        endpoints
    }
}

impl Default for RegistrySnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

/// Holder of the currently published [`RegistrySnapshot`].
pub struct CommandRegistry {
    current: RwLock<Arc<RegistrySnapshot>>,
}

impl CommandRegistry {
    pub fn new(snapshot: RegistrySnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// The currently published snapshot.
    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Look up a trigger in the current snapshot.
    pub fn lookup(&self, trigger: &str) -> Option<EndpointConfig> {
        self.snapshot().get(trigger).cloned()
    }

    /// Publish a new snapshot, returning the one it replaced.
    ///
    /// Fails with [`RegistryError::SameSnapshot`] when `snapshot` is the
    /// one already published.
    pub fn replace(
        &self,
        snapshot: Arc<RegistrySnapshot>,
    ) -> Result<Arc<RegistrySnapshot>, RegistryError> {
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        if Arc::ptr_eq(&*current, &snapshot) {
            return Err(RegistryError::SameSnapshot);
        }
        debug!(triggers = snapshot.len(), "publishing registry snapshot");
        Ok(std::mem::replace(&mut *current, snapshot))
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new(RegistrySnapshot::empty())
    }
}
