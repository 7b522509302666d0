//! Tonic/mode/direction synchronization.
//!
//! Both tonic selection and mode selection go through `change_mode_linked`,
//! which owns the direction-bias transition table.

use crate::interval::interval;
use crate::mode::PitchDirection::{self, Downward, Mixed, Upward};
use crate::{Mode, OctaveStep, Pitch, TonalError, TonalState};

/// Compensating octave shift when the layout moves from one directional
/// bias to another. `None` means no shift.
pub fn bias_transition(old: PitchDirection, new: PitchDirection) -> Option<OctaveStep> {
    match (old, new) {
        (Mixed, Downward) | (Upward, Downward) => Some(OctaveStep::Up),
        (Downward, Upward) | (Downward, Mixed) | (Downward, Downward) => Some(OctaveStep::Down),
        (Mixed, Upward) | (Upward, Upward) | (Mixed, Mixed) | (Upward, Mixed) => None,
    }
}

pub(super) fn select_tonic(s: &mut TonalState, pitch: Pitch) -> Result<(), TonalError> {
    let iv = interval(s.tonic, pitch);

    // Reselecting the tonic in mixed direction toggles it down an octave.
    if s.direction == Mixed && iv.is_tonic() {
        return shift_octave(s, OctaveStep::Down);
    }

    if iv.is_octave() {
        s.direction = if pitch > s.tonic { Downward } else { Upward };
        s.tonic = pitch;
        return Ok(());
    }

    if !s.auto_mode_tonic {
        s.tonic = pitch;
        return Ok(());
    }

    let mode = s.mode.rotate(iv.distance());
    change_mode_linked(s, pitch.note() as i32, mode)
}

pub(super) fn select_mode(s: &mut TonalState, mode: Mode) -> Result<(), TonalError> {
    if mode == s.mode {
        return Ok(());
    }
    if !s.auto_mode_tonic {
        s.mode = mode;
        return Ok(());
    }
    let tonic_delta = s.mode.steps_to(mode) as i32;
    change_mode_linked(s, s.tonic.note() as i32 + tonic_delta, mode)
}

pub(super) fn shift_octave(s: &mut TonalState, step: OctaveStep) -> Result<(), TonalError> {
    s.tonic = s
        .tonic
        .transpose(step.semitones())
        .map_err(|_| TonalError::OctaveShiftOutOfRange {
            tonic: s.tonic.note(),
            step: step.delta() as i8,
        })?;
    s.octave_shift += step.delta();
    Ok(())
}

/// Move the tonic to `proposed` and the mode to `mode`, applying the bias
/// table when the mode actually changes and direction linkage is on.
fn change_mode_linked(s: &mut TonalState, proposed: i32, mode: Mode) -> Result<(), TonalError> {
    let follow_bias = mode != s.mode && s.direction_linkage;
    let mut target = proposed;
    let mut octave_shift = s.octave_shift;

    if follow_bias {
        if let Some(step) = bias_transition(s.mode.bias(), mode.bias()) {
            target += step.semitones();
            octave_shift += step.delta();
        }
    }

    let (tonic, folded) = s.range_policy.resolve(target)?;
    s.tonic = tonic;
    s.octave_shift = octave_shift + folded;
    s.mode = mode;
    if follow_bias && s.direction != mode.bias() {
        s.direction = mode.bias();
    }
    Ok(())
}
