// Input configuration: keyboard table and TOML settings

use super::action::{default_keyboard_bindings, ActionId};
use super::binding::{BindingProfile, BindingTable};
use super::InputError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use winit::keyboard::KeyCode;

/// Keyboard table for the local player
/// Maps physical keys to logical actions; one action per key
#[derive(Debug, Clone, PartialEq)]
pub struct KeyboardBindings {
    bindings: HashMap<KeyCode, ActionId>,
}

impl KeyboardBindings {
    /// Create an empty keyboard table
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create a table from a list of bindings
    pub fn from_bindings(bindings: Vec<(KeyCode, ActionId)>) -> Self {
        let mut table = Self::new();
        for (key, action) in bindings {
            table.bind(key, action);
        }
        table
    }

    /// Bind a key to an action, replacing whatever the key drove before
    pub fn bind(&mut self, key: KeyCode, action: ActionId) {
        self.bindings.insert(key, action);
    }

    /// Unbind a key
    pub fn unbind_key(&mut self, key: KeyCode) {
        self.bindings.remove(&key);
    }

    /// Get the action bound to a key
    pub fn get_action(&self, key: KeyCode) -> Option<ActionId> {
        self.bindings.get(&key).copied()
    }

    /// Get all keys bound to an action
    pub fn get_keys(&self, action: ActionId) -> Vec<KeyCode> {
        self.bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(k, _)| *k)
            .collect()
    }

    /// Iterate over every (key, action) pair
    pub fn iter(&self) -> impl Iterator<Item = (KeyCode, ActionId)> + '_ {
        self.bindings.iter().map(|(k, a)| (*k, *a))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KeyboardBindings {
    fn default() -> Self {
        Self::from_bindings(default_keyboard_bindings())
    }
}

/// A keyboard override read from the settings file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: KeyCode,
    pub action: ActionId,
}

/// User-tunable input settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSettings {
    /// Derive d-pad bits from the first two axes of bound joypads
    #[serde(default)]
    pub map_axis_to_dpad: bool,

    /// Extra joypad auto-configurations
    #[serde(default)]
    pub profiles: Vec<BindingProfile>,

    /// Keyboard overrides for the local player
    #[serde(default)]
    pub keyboard: Vec<KeyBinding>,

    /// Default keys to drop from the local player's table
    #[serde(default)]
    pub unbind: Vec<KeyCode>,
}

impl InputSettings {
    /// Parse settings from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, InputError> {
        Ok(toml::from_str(text)?)
    }

    /// Load settings from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, InputError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_toml_str(&text)?;
        log::info!(
            "Loaded input settings from {} ({} profiles, {} key overrides)",
            path.as_ref().display(),
            settings.profiles.len(),
            settings.keyboard.len()
        );
        Ok(settings)
    }

    /// Built-in joypad profiles with the configured ones layered on top
    pub fn binding_table(&self) -> BindingTable {
        let mut table = BindingTable::with_defaults();
        for profile in &self.profiles {
            table.register(profile.clone());
        }
        table
    }

    /// Default keyboard table with the configured overrides applied
    ///
    /// Removals run first, so a key can be both dropped and rebound.
    pub fn keyboard_bindings(&self) -> KeyboardBindings {
        let mut table = KeyboardBindings::default();
        for key in &self.unbind {
            table.unbind_key(*key);
        }
        for binding in &self.keyboard {
            table.bind(binding.key, binding.action);
        }
        table
    }
}
