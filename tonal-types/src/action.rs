//! Inbound events and outbound notifications.

use serde::{Deserialize, Serialize};

use crate::mode::{Mode, PitchDirection};
use crate::pitch::Pitch;

/// Direction of a single-octave transposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OctaveStep {
    Up,
    Down,
}

impl OctaveStep {
    /// +1 or -1.
    pub fn delta(self) -> i32 {
        match self {
            OctaveStep::Up => 1,
            OctaveStep::Down => -1,
        }
    }

    /// +12 or -12.
    pub fn semitones(self) -> i32 {
        self.delta() * 12
    }
}

/// Events fed into the engine by touch/MIDI collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TonalAction {
    SelectTonic(Pitch),
    SelectMode(Mode),
    ShiftOctave(OctaveStep),
    /// Enable or disable direction following the mode's bias.
    ToggleLinkage(bool),
    /// Enable or disable tonic/mode rotation coupling.
    ToggleAutoModeTonic(bool),
    ActivatePitch { pitch: Pitch, velocity: u8 },
    DeactivatePitch(Pitch),
    DeactivateAll,
}

impl TonalAction {
    /// Actions that touch the tonal aggregate (as opposed to key activation).
    pub fn is_tonal(&self) -> bool {
        !matches!(
            self,
            TonalAction::ActivatePitch { .. }
                | TonalAction::DeactivatePitch(_)
                | TonalAction::DeactivateAll
        )
    }
}

/// Change notifications delivered after a transition completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    TonicChanged { old: Pitch, new: Pitch },
    ModeChanged { old: Mode, new: Mode },
    DirectionChanged { old: PitchDirection, new: PitchDirection },
    OctaveShiftChanged { old: i32, new: i32 },
    PitchActivationChanged { pitch: Pitch, activated: bool, velocity: u8 },
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TonicChanged { old, new } => write!(f, "tonic {} -> {}", old, new),
            Self::ModeChanged { old, new } => write!(f, "mode {} -> {}", old, new),
            Self::DirectionChanged { old, new } => {
                write!(f, "direction {} -> {}", old.name(), new.name())
            }
            Self::OctaveShiftChanged { old, new } => write!(f, "octave shift {} -> {}", old, new),
            Self::PitchActivationChanged { pitch, activated: true, velocity } => {
                write!(f, "{} on (velocity {})", pitch, velocity)
            }
            Self::PitchActivationChanged { pitch, activated: false, .. } => {
                write!(f, "{} off", pitch)
            }
        }
    }
}
