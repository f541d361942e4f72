// Tick-indexed input history for rewind and save states

use super::player::{ActionVector, InputState, MAX_PLAYERS};
use super::InputError;
use serde::{Deserialize, Serialize};

/// Number of ticks kept per player (one second at 60 Hz)
pub const HISTORY_DEPTH: usize = 60;

/// Current save-state blob layout
pub const SNAPSHOT_VERSION: u32 = 1;

/// Emulation frame counter, owned by the host clock
pub type Tick = i64;

/// Ring slot for a tick; never negative
///
/// A depth of 0 is treated as 1, matching `HistoryRing::new`.
pub fn slot(tick: Tick, depth: usize) -> usize {
    tick.rem_euclid(depth.max(1) as Tick) as usize
}

/// Fixed-depth circular buffer of one player's action vectors
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRing {
    slots: Vec<ActionVector>,
}

impl HistoryRing {
    /// Create a ring of `depth` released vectors
    pub fn new(depth: usize) -> Self {
        Self {
            slots: vec![ActionVector::new(); depth.max(1)],
        }
    }

    pub fn depth(&self) -> usize {
        self.slots.len()
    }

    /// Store a vector at the slot for `tick`
    pub fn set(&mut self, tick: Tick, vector: ActionVector) {
        let index = slot(tick, self.depth());
        self.slots[index] = vector;
    }

    /// Read the vector `offset` ticks away from `tick`
    ///
    /// Offsets reaching a full revolution would alias another tick's slot
    /// and are rejected.
    pub fn get(&self, tick: Tick, offset: i64) -> Result<ActionVector, InputError> {
        let depth = self.depth();
        if offset.unsigned_abs() >= depth as u64 {
            return Err(InputError::OffsetOutOfRange { offset, depth });
        }
        Ok(self.slots[slot(tick + offset, depth)])
    }

    /// Reset every slot to released
    pub fn initialize(&mut self) {
        self.slots.fill(ActionVector::new());
    }
}

/// Deep copy of every player's ring, captured for save states
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    pub version: u32,
    pub depth: usize,
    pub players: Vec<Vec<ActionVector>>,
}

/// One ring per player
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    rings: Vec<HistoryRing>,
    depth: usize,
}

impl History {
    /// Create rings for `MAX_PLAYERS` players
    pub fn new(depth: usize) -> Self {
        let depth = depth.max(1);
        Self {
            rings: (0..MAX_PLAYERS).map(|_| HistoryRing::new(depth)).collect(),
            depth,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn num_players(&self) -> usize {
        self.rings.len()
    }

    /// Commit a player's vector for `tick`
    pub fn set(&mut self, player: usize, tick: Tick, vector: ActionVector) -> Result<(), InputError> {
        self.ring_mut(player)?.set(tick, vector);
        Ok(())
    }

    /// Commit every player's vector for `tick`
    pub fn commit(&mut self, tick: Tick, state: &InputState) {
        for (ring, vector) in self.rings.iter_mut().zip(state) {
            ring.set(tick, *vector);
        }
    }

    /// Read a player's vector `offset` ticks away from `tick`
    pub fn get(&self, player: usize, tick: Tick, offset: i64) -> Result<ActionVector, InputError> {
        self.rings
            .get(player)
            .ok_or(InputError::InvalidPlayer(player))?
            .get(tick, offset)
    }

    /// Clear one player's ring
    pub fn initialize(&mut self, player: usize) -> Result<(), InputError> {
        self.ring_mut(player)?.initialize();
        Ok(())
    }

    /// Clear every ring
    pub fn initialize_all(&mut self) {
        for ring in &mut self.rings {
            ring.initialize();
        }
    }

    /// Capture every ring
    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            version: SNAPSHOT_VERSION,
            depth: self.depth,
            players: self.rings.iter().map(|ring| ring.slots.clone()).collect(),
        }
    }

    /// Replace every ring with the snapshot's contents
    ///
    /// The whole blob is validated before anything is written, so a
    /// rejected blob leaves the live rings untouched.
    pub fn restore(&mut self, snapshot: &HistorySnapshot) -> Result<(), InputError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(InputError::UnsupportedVersion {
                found: snapshot.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        let shape_matches = snapshot.depth == self.depth
            && snapshot.players.len() == self.rings.len()
            && snapshot.players.iter().all(|ring| ring.len() == self.depth);
        if !shape_matches {
            let found_depth = snapshot
                .players
                .iter()
                .map(Vec::len)
                .find(|len| *len != self.depth)
                .unwrap_or(snapshot.depth);
            return Err(InputError::ShapeMismatch {
                expected_players: self.rings.len(),
                expected_depth: self.depth,
                found_players: snapshot.players.len(),
                found_depth,
            });
        }

        for (ring, slots) in self.rings.iter_mut().zip(&snapshot.players) {
            ring.slots.copy_from_slice(slots);
        }
        Ok(())
    }

    fn ring_mut(&mut self, player: usize) -> Result<&mut HistoryRing, InputError> {
        self.rings
            .get_mut(player)
            .ok_or(InputError::InvalidPlayer(player))
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(HISTORY_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::action::ActionId;

    fn vector_with(action: ActionId) -> ActionVector {
        let mut vector = ActionVector::new();
        vector.press(action);
        vector
    }

    #[test]
    fn test_slot_is_periodic() {
        for tick in -200..200 {
            assert_eq!(slot(tick, HISTORY_DEPTH), slot(tick + HISTORY_DEPTH as Tick, HISTORY_DEPTH));
        }
    }

    #[test]
    fn test_slot_negative_ticks() {
        assert_eq!(slot(-1, 60), 59);
        assert_eq!(slot(-60, 60), 0);
        assert_eq!(slot(-61, 60), 59);
        assert_eq!(slot(61, 60), 1);
    }

    #[test]
    fn test_slot_zero_depth_maps_to_first_slot() {
        assert_eq!(slot(5, 0), 0);
        assert_eq!(slot(-3, 0), 0);
        assert_eq!(slot(0, 1), 0);
    }

    #[test]
    fn test_ring_set_get_current() {
        let mut ring = HistoryRing::new(HISTORY_DEPTH);
        ring.set(10, vector_with(ActionId::A));
        assert!(ring.get(10, 0).unwrap().is_pressed(ActionId::A));
    }

    #[test]
    fn test_ring_reads_past_ticks() {
        let mut ring = HistoryRing::new(HISTORY_DEPTH);
        ring.set(7, vector_with(ActionId::Up));
        ring.set(8, vector_with(ActionId::Down));

        assert!(ring.get(8, -1).unwrap().is_pressed(ActionId::Up));
        assert!(ring.get(8, 0).unwrap().is_pressed(ActionId::Down));
    }

    #[test]
    fn test_ring_wraps_at_depth() {
        let mut ring = HistoryRing::new(HISTORY_DEPTH);
        ring.set(0, vector_with(ActionId::B));
        ring.set(HISTORY_DEPTH as Tick, vector_with(ActionId::Y));

        let read = ring.get(HISTORY_DEPTH as Tick, 0).unwrap();
        assert!(read.is_pressed(ActionId::Y));
        assert!(!read.is_pressed(ActionId::B));
    }

    #[test]
    fn test_ring_rejects_offset_beyond_depth() {
        let ring = HistoryRing::new(HISTORY_DEPTH);
        assert!(ring.get(100, -(HISTORY_DEPTH as i64 - 1)).is_ok());
        assert!(matches!(
            ring.get(100, -(HISTORY_DEPTH as i64)),
            Err(InputError::OffsetOutOfRange { offset: -60, depth: 60 })
        ));
        assert!(ring.get(100, HISTORY_DEPTH as i64).is_err());
        assert!(ring.get(100, i64::MIN).is_err());
    }

    #[test]
    fn test_ring_initialize() {
        let mut ring = HistoryRing::new(4);
        for tick in 0..4 {
            ring.set(tick, vector_with(ActionId::Start));
        }
        ring.initialize();
        for offset in -3..=0 {
            assert!(ring.get(3, offset).unwrap().is_empty());
        }
    }

    #[test]
    fn test_history_invalid_player() {
        let mut history = History::default();
        assert!(matches!(
            history.set(MAX_PLAYERS, 0, ActionVector::new()),
            Err(InputError::InvalidPlayer(5))
        ));
        assert!(history.get(MAX_PLAYERS, 0, 0).is_err());
        assert!(history.initialize(99).is_err());
    }

    #[test]
    fn test_history_players_are_independent() {
        let mut history = History::default();
        history.set(1, 5, vector_with(ActionId::L)).unwrap();
        assert!(history.get(1, 5, 0).unwrap().is_pressed(ActionId::L));
        assert!(history.get(0, 5, 0).unwrap().is_empty());

        history.initialize(1).unwrap();
        assert!(history.get(1, 5, 0).unwrap().is_empty());
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let mut history = History::default();
        for tick in 0..90 {
            let action = ActionId::ALL[(tick as usize) % 16];
            for player in 0..MAX_PLAYERS {
                history.set(player, tick, vector_with(action)).unwrap();
            }
        }
        let snapshot = history.snapshot();
        let before = history.clone();

        history.initialize_all();
        history.restore(&snapshot).unwrap();

        for player in 0..MAX_PLAYERS {
            for offset in -(HISTORY_DEPTH as i64 - 1)..=0 {
                assert_eq!(
                    history.get(player, 89, offset).unwrap(),
                    before.get(player, 89, offset).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_snapshot_is_detached_from_live_rings() {
        let mut history = History::default();
        history.set(0, 3, vector_with(ActionId::X)).unwrap();
        let snapshot = history.snapshot();

        history.set(0, 3, vector_with(ActionId::R)).unwrap();
        assert!(snapshot.players[0][3].is_pressed(ActionId::X));
        assert!(!snapshot.players[0][3].is_pressed(ActionId::R));
    }

    #[test]
    fn test_restore_wrong_depth_leaves_rings_untouched() {
        let mut history = History::default();
        history.set(2, 11, vector_with(ActionId::Select)).unwrap();
        let before = history.clone();

        let mut foreign = History::new(45);
        foreign.set(2, 11, vector_with(ActionId::Start)).unwrap();

        let err = history.restore(&foreign.snapshot()).unwrap_err();
        assert!(matches!(
            err,
            InputError::ShapeMismatch {
                expected_depth: 60,
                found_depth: 45,
                ..
            }
        ));
        assert_eq!(history, before);
    }

    #[test]
    fn test_restore_wrong_player_count() {
        let mut history = History::default();
        let mut snapshot = history.snapshot();
        snapshot.players.pop();

        assert!(matches!(
            history.restore(&snapshot),
            Err(InputError::ShapeMismatch { found_players: 4, .. })
        ));
    }

    #[test]
    fn test_restore_ragged_ring() {
        let mut history = History::default();
        history.set(4, 0, vector_with(ActionId::L2)).unwrap();
        let before = history.clone();

        let mut snapshot = history.snapshot();
        snapshot.players[3].truncate(30);
        snapshot.players[0][0].press(ActionId::R2);

        assert!(matches!(
            history.restore(&snapshot),
            Err(InputError::ShapeMismatch { found_depth: 30, .. })
        ));
        assert_eq!(history, before);
    }

    #[test]
    fn test_restore_unsupported_version() {
        let mut history = History::default();
        let mut snapshot = history.snapshot();
        snapshot.version = SNAPSHOT_VERSION + 1;

        assert!(matches!(
            history.restore(&snapshot),
            Err(InputError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn test_snapshot_survives_serialization() {
        let mut history = History::default();
        history.set(0, 59, vector_with(ActionId::FastForwardToggle)).unwrap();

        let json = serde_json::to_string(&history.snapshot()).unwrap();
        let loaded: HistorySnapshot = serde_json::from_str(&json).unwrap();

        let mut other = History::default();
        other.restore(&loaded).unwrap();
        assert_eq!(other, history);
    }
}
