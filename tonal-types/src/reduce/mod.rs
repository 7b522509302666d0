//! Pure state-mutation reducers for the tonal engine.
//!
//! These functions are the single source of truth for action → state
//! mutations. A transition runs on a scratch copy of the state; only when it
//! succeeds is the copy committed and diffed into notifications. A rejected
//! transition leaves the state untouched and produces no notifications.

mod keyboard;
mod sync;

pub use sync::bias_transition;

use crate::{Keyboard, Notification, TonalAction, TonalError, TonalState};

/// Apply an action to the state and keyboard.
///
/// Returns the notifications for every field that actually changed.
pub fn reduce_action(
    action: &TonalAction,
    state: &mut TonalState,
    keyboard: &mut Keyboard,
) -> Result<Vec<Notification>, TonalError> {
    match action {
        TonalAction::SelectTonic(pitch) => commit(state, |s| sync::select_tonic(s, *pitch)),
        TonalAction::SelectMode(mode) => commit(state, |s| sync::select_mode(s, *mode)),
        TonalAction::ShiftOctave(step) => commit(state, |s| sync::shift_octave(s, *step)),
        TonalAction::ToggleLinkage(enabled) => {
            state.direction_linkage = *enabled;
            Ok(Vec::new())
        }
        TonalAction::ToggleAutoModeTonic(enabled) => {
            state.auto_mode_tonic = *enabled;
            Ok(Vec::new())
        }
        TonalAction::ActivatePitch { pitch, velocity } => {
            Ok(keyboard::activate(keyboard, *pitch, *velocity))
        }
        TonalAction::DeactivatePitch(pitch) => Ok(keyboard::deactivate(keyboard, *pitch)),
        TonalAction::DeactivateAll => Ok(keyboard::deactivate_all(keyboard)),
    }
}

fn commit(
    state: &mut TonalState,
    transition: impl FnOnce(&mut TonalState) -> Result<(), TonalError>,
) -> Result<Vec<Notification>, TonalError> {
    let mut next = state.clone();
    transition(&mut next)?;
    let notifications = diff(state, &next);
    *state = next;
    Ok(notifications)
}

fn diff(old: &TonalState, new: &TonalState) -> Vec<Notification> {
    let mut out = Vec::new();
    if old.tonic != new.tonic {
        out.push(Notification::TonicChanged { old: old.tonic, new: new.tonic });
    }
    if old.mode != new.mode {
        out.push(Notification::ModeChanged { old: old.mode, new: new.mode });
    }
    if old.direction != new.direction {
        out.push(Notification::DirectionChanged { old: old.direction, new: new.direction });
    }
    if old.octave_shift != new.octave_shift {
        out.push(Notification::OctaveShiftChanged {
            old: old.octave_shift,
            new: new.octave_shift,
        });
    }
    out
}
