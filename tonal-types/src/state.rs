use serde::{Deserialize, Serialize};

use crate::action::OctaveStep;
use crate::mode::{Mode, PitchDirection};
use crate::modulo::modulo12;
use crate::pitch::{Pitch, MAX_NOTE};
use crate::TonalError;

/// What to do when a mode- or tonic-driven transition would move the tonic
/// outside 0..=127. Explicit octave shifts are always rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RangePolicy {
    /// Reject the transition; the state is left as it was.
    #[default]
    Reject,
    /// Fold by whole octaves to the nearest in-range note of the same pitch class.
    Clamp,
    /// Fold by whole octaves to the opposite end of the range.
    Wrap,
}

impl RangePolicy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "reject" => Some(RangePolicy::Reject),
            "clamp" => Some(RangePolicy::Clamp),
            "wrap" => Some(RangePolicy::Wrap),
            _ => None,
        }
    }

    /// Resolve a proposed note number to a pitch plus the octaves it was folded by.
    pub fn resolve(self, proposed: i32) -> Result<(Pitch, i32), TonalError> {
        if let Ok(p) = Pitch::new(proposed) {
            return Ok((p, 0));
        }
        let max = MAX_NOTE as i32;
        let class = modulo12(proposed) as i32;
        let highest = class + 12 * ((max - class) / 12);
        let landed = match self {
            RangePolicy::Reject => return Err(TonalError::TransitionOutOfRange { proposed }),
            RangePolicy::Clamp if proposed > max => highest,
            RangePolicy::Clamp => class,
            RangePolicy::Wrap if proposed > max => class,
            RangePolicy::Wrap => highest,
        };
        let pitch = Pitch::new(landed)?;
        Ok((pitch, (landed - proposed) / 12))
    }
}

/// The synchronized tonic/mode/direction aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TonalState {
    pub tonic: Pitch,
    pub mode: Mode,
    pub direction: PitchDirection,
    /// Signed count of octave transpositions applied to the tonic.
    pub octave_shift: i32,
    /// Tonic changes rotate the mode and mode changes move the tonic.
    pub auto_mode_tonic: bool,
    /// Mode changes drive direction and compensating octave shifts.
    pub direction_linkage: bool,
    pub range_policy: RangePolicy,
}

impl Default for TonalState {
    fn default() -> Self {
        Self::new()
    }
}

impl TonalState {
    pub fn new() -> Self {
        Self {
            tonic: Pitch::MIDDLE_C,
            mode: Mode::default(),
            direction: PitchDirection::Mixed,
            octave_shift: 0,
            auto_mode_tonic: true,
            direction_linkage: true,
            range_policy: RangePolicy::Reject,
        }
    }

    pub fn with_tonic(mut self, tonic: Pitch) -> Self {
        self.tonic = tonic;
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_direction(mut self, direction: PitchDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Whether an explicit octave shift in `step`'s direction would be accepted.
    pub fn can_shift_octave(&self, step: OctaveStep) -> bool {
        self.tonic.transpose(step.semitones()).is_ok()
    }
}
