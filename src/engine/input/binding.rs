// Joypad binding tables and auto-configuration profiles

use super::action::ActionId;
use crate::core::math::clamp;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Physical source type on a joypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Button,
    Axis,
}

/// Maps one physical button or axis direction to a logical action
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    pub kind: SourceKind,
    pub index: u32,

    /// -1, 0 or +1; only meaningful for axes
    #[serde(default)]
    pub direction: i8,

    /// Magnitude in [0, 1] the axis must exceed in `direction`
    #[serde(default)]
    pub threshold: f32,

    pub action: ActionId,
}

impl Binding {
    /// Bind a button index
    pub fn button(index: u32, action: ActionId) -> Self {
        Self {
            kind: SourceKind::Button,
            index,
            direction: 0,
            threshold: 0.0,
            action,
        }
    }

    /// Bind an axis direction; direction is reduced to its sign and the
    /// threshold clamped to [0, 1]
    pub fn axis(index: u32, direction: i8, threshold: f32, action: ActionId) -> Self {
        Self {
            kind: SourceKind::Axis,
            index,
            direction: direction.signum(),
            threshold: clamp(threshold, 0.0, 1.0),
            action,
        }
    }

    /// Whether the binding fires for the given device readings.
    /// Indices outside the reported ranges never fire.
    pub fn is_active(&self, buttons: &[bool], axes: &[f32]) -> bool {
        let index = self.index as usize;
        match self.kind {
            SourceKind::Button => buttons.get(index).copied().unwrap_or(false),
            SourceKind::Axis => match axes.get(index) {
                Some(value) => f32::from(self.direction.signum()) * value > self.threshold.abs(),
                None => false,
            },
        }
    }
}

/// Named binding set for one controller model
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BindingProfile {
    /// Name the device reports when plugged
    pub name: String,

    #[serde(default)]
    pub bindings: Vec<Binding>,
}

impl BindingProfile {
    pub fn new(name: impl Into<String>, bindings: Vec<Binding>) -> Self {
        Self {
            name: name.into(),
            bindings,
        }
    }
}

/// Device-name keyed auto-configuration table
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    profiles: HashMap<String, Vec<Binding>>,
}

impl BindingTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table holding the built-in controller profiles
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        for profile in default_profiles() {
            table.register(profile);
        }
        table
    }

    /// Add a profile, replacing any profile with the same device name
    pub fn register(&mut self, profile: BindingProfile) {
        self.profiles.insert(profile.name, profile.bindings);
    }

    /// Remove the profile for a device name
    pub fn unregister(&mut self, name: &str) -> Option<Vec<Binding>> {
        self.profiles.remove(name)
    }

    /// Get the bindings for a device name; unknown devices have none
    pub fn resolve(&self, name: &str) -> Option<&[Binding]> {
        self.profiles.get(name).map(Vec::as_slice)
    }

    /// Check if a device name has an auto-configuration
    pub fn has_binding(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    /// Number of known device profiles
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Standard analog-stick and d-pad hat bindings shared by most pads
fn stick_bindings() -> Vec<Binding> {
    vec![
        Binding::axis(0, -1, 0.5, ActionId::Left),
        Binding::axis(0, 1, 0.5, ActionId::Right),
        Binding::axis(1, -1, 0.5, ActionId::Up),
        Binding::axis(1, 1, 0.5, ActionId::Down),
    ]
}

/// Built-in auto-configuration profiles
pub fn default_profiles() -> Vec<BindingProfile> {
    let xinput = |name: &str, l2_axis: u32, r2_axis: u32| {
        let mut bindings = vec![
            Binding::button(0, ActionId::A),
            Binding::button(1, ActionId::B),
            Binding::button(2, ActionId::Y),
            Binding::button(3, ActionId::X),
            Binding::button(4, ActionId::L),
            Binding::button(5, ActionId::R),
            Binding::button(6, ActionId::Select),
            Binding::button(7, ActionId::Start),
            Binding::button(8, ActionId::MenuToggle),
            Binding::button(9, ActionId::L3),
            Binding::button(10, ActionId::R3),
            Binding::button(11, ActionId::Up),
            Binding::button(12, ActionId::Right),
            Binding::button(13, ActionId::Down),
            Binding::button(14, ActionId::Left),
            Binding::axis(l2_axis, 1, 0.5, ActionId::L2),
            Binding::axis(r2_axis, 1, 0.5, ActionId::R2),
        ];
        bindings.extend(stick_bindings());
        BindingProfile::new(name, bindings)
    };

    let mut dualshock = vec![
        Binding::button(0, ActionId::Y),
        Binding::button(1, ActionId::B),
        Binding::button(2, ActionId::A),
        Binding::button(3, ActionId::X),
        Binding::button(4, ActionId::L),
        Binding::button(5, ActionId::R),
        Binding::button(6, ActionId::L2),
        Binding::button(7, ActionId::R2),
        Binding::button(8, ActionId::Select),
        Binding::button(9, ActionId::Start),
        Binding::button(10, ActionId::L3),
        Binding::button(11, ActionId::R3),
        Binding::button(12, ActionId::MenuToggle),
        Binding::button(14, ActionId::Up),
        Binding::button(15, ActionId::Right),
        Binding::button(16, ActionId::Down),
        Binding::button(17, ActionId::Left),
    ];
    dualshock.extend(stick_bindings());

    let mut sn30 = vec![
        Binding::button(0, ActionId::B),
        Binding::button(1, ActionId::A),
        Binding::button(3, ActionId::Y),
        Binding::button(4, ActionId::X),
        Binding::button(6, ActionId::L),
        Binding::button(7, ActionId::R),
        Binding::button(8, ActionId::L2),
        Binding::button(9, ActionId::R2),
        Binding::button(10, ActionId::Select),
        Binding::button(11, ActionId::Start),
        Binding::button(12, ActionId::MenuToggle),
        Binding::button(13, ActionId::L3),
        Binding::button(14, ActionId::R3),
    ];
    sn30.extend(stick_bindings());

    vec![
        xinput("Xbox 360 Controller", 2, 5),
        xinput("Xbox One Controller", 4, 5),
        BindingProfile::new("Wireless Controller", dualshock),
        BindingProfile::new("8Bitdo SN30 Pro", sn30),
    ]
}
