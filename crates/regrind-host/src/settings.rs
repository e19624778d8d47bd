//! An in-memory settings store.
//!
//! Real host glue reads persisted cvars; demos and tests use this instead.
//! Shared ownership so a settings panel (or a test) can edit values while
//! the plugin holds its own handle.

use std::sync::{Arc, RwLock};

use regrind_protocol::{ActionKind, ActionSettings, PluginSettings};

use crate::SettingsStore;

/// A cloneable, shared [`SettingsStore`] backed by a `PluginSettings`.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    inner: Arc<RwLock<PluginSettings>>,
}

impl MemorySettings {
    /// Creates a store with the given initial settings.
    pub fn new(settings: PluginSettings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings)),
        }
    }

    /// Replaces the stored settings wholesale.
    pub fn set(&self, settings: PluginSettings) {
        *self.inner.write().expect("settings lock poisoned") = settings;
    }

    /// Edits the stored settings in place.
    pub fn update(&self, edit: impl FnOnce(&mut PluginSettings)) {
        edit(&mut self.inner.write().expect("settings lock poisoned"));
    }

    /// A copy of the current settings.
    pub fn snapshot(&self) -> PluginSettings {
        self.inner.read().expect("settings lock poisoned").clone()
    }
}

impl SettingsStore for MemorySettings {
    fn plugin_enabled(&self) -> bool {
        self.snapshot().enabled
    }

    fn action(&self, kind: ActionKind) -> ActionSettings {
        self.snapshot().action(kind)
    }

    fn training_map(&self) -> String {
        self.snapshot().training_map
    }
}
