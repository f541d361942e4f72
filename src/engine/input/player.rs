// Per-player logical action vectors

use super::action::{ActionId, ACTION_LAST};
use serde::{Deserialize, Serialize};

/// Maximum number of players polled each tick
pub const MAX_PLAYERS: usize = 5;

/// The only player slot that receives keyboard input
pub const LOCAL_PLAYER: usize = 0;

/// One bit per action for a single player
///
/// `Copy` on purpose: history slots, the live snapshot and edge vectors
/// never share storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionVector([bool; ACTION_LAST]);

impl ActionVector {
    /// All actions released
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is set
    pub fn is_pressed(&self, action: ActionId) -> bool {
        self.0[action.index()]
    }

    /// Raw read by id; out-of-range ids read as released
    pub fn get(&self, id: usize) -> bool {
        self.0.get(id).copied().unwrap_or(false)
    }

    /// Set an action bit
    pub fn press(&mut self, action: ActionId) {
        self.0[action.index()] = true;
    }

    /// Clear an action bit
    pub fn release(&mut self, action: ActionId) {
        self.0[action.index()] = false;
    }

    /// Clear every bit
    pub fn clear(&mut self) {
        self.0 = [false; ACTION_LAST];
    }

    /// Check if no action is set
    pub fn is_empty(&self) -> bool {
        !self.0.iter().any(|bit| *bit)
    }

    /// Get all set actions in id order
    pub fn get_pressed_actions(&self) -> Vec<ActionId> {
        ActionId::ALL
            .iter()
            .copied()
            .filter(|action| self.is_pressed(*action))
            .collect()
    }

    pub(crate) fn bits(&self) -> &[bool; ACTION_LAST] {
        &self.0
    }

    pub(crate) fn from_bits(bits: [bool; ACTION_LAST]) -> Self {
        Self(bits)
    }
}

/// Action vectors for every player slot
pub type InputState = [ActionVector; MAX_PLAYERS];
