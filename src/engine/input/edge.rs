// Press/release edge detection between consecutive ticks

use super::action::ACTION_LAST;
use super::player::{ActionVector, InputState, MAX_PLAYERS};

/// Actions that changed state during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    /// Actions just pressed this tick
    pub pressed: InputState,

    /// Actions just released this tick
    pub released: InputState,
}

/// Compute the actions pressed or released between `old` and `new`
pub fn diff(new: &InputState, old: &InputState) -> Edges {
    let mut edges = Edges::default();
    for player in 0..MAX_PLAYERS {
        let (pressed, released) = diff_player(&new[player], &old[player]);
        edges.pressed[player] = pressed;
        edges.released[player] = released;
    }
    edges
}

fn diff_player(new: &ActionVector, old: &ActionVector) -> (ActionVector, ActionVector) {
    let mut pressed = [false; ACTION_LAST];
    let mut released = [false; ACTION_LAST];
    for (i, (now, before)) in new.bits().iter().zip(old.bits()).enumerate() {
        pressed[i] = *now && !*before;
        released[i] = !*now && *before;
    }
    (ActionVector::from_bits(pressed), ActionVector::from_bits(released))
}
