use serde::{Deserialize, Serialize};

use crate::modulo::modulo12;
use crate::TonalError;

/// Highest valid note number.
pub const MAX_NOTE: u8 = 127;

/// Number of pitches in the universe (0..=127).
pub const PITCH_COUNT: usize = 128;

/// Pitch class (chroma), C = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PitchClass {
    C,
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    As,
    B,
}

impl PitchClass {
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::Cs,
        PitchClass::D,
        PitchClass::Ds,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Fs,
        PitchClass::G,
        PitchClass::Gs,
        PitchClass::A,
        PitchClass::As,
        PitchClass::B,
    ];

    pub fn from_semitone(semitone: i32) -> Self {
        Self::ALL[modulo12(semitone) as usize]
    }

    pub fn name(&self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::Cs => "C#",
            PitchClass::D => "D",
            PitchClass::Ds => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::Fs => "F#",
            PitchClass::G => "G",
            PitchClass::Gs => "G#",
            PitchClass::A => "A",
            PitchClass::As => "A#",
            PitchClass::B => "B",
        }
    }

    pub fn semitone(&self) -> u8 {
        *self as u8
    }

    /// Member of the C major reference scale (a white key).
    pub fn is_natural(&self) -> bool {
        matches!(
            self,
            PitchClass::C
                | PitchClass::D
                | PitchClass::E
                | PitchClass::F
                | PitchClass::G
                | PitchClass::A
                | PitchClass::B
        )
    }
}

/// A note number guaranteed to lie in 0..=127.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "i32", into = "u8")]
pub struct Pitch(u8);

impl Pitch {
    pub const MIDDLE_C: Pitch = Pitch(60);

    pub fn new(note: i32) -> Result<Self, TonalError> {
        if is_valid_note_number(note) {
            Ok(Self(note as u8))
        } else {
            Err(TonalError::NoteOutOfRange(note))
        }
    }

    pub fn note(self) -> u8 {
        self.0
    }

    pub fn pitch_class(self) -> PitchClass {
        PitchClass::from_semitone(self.0 as i32)
    }

    /// `note / 12`: 0 for notes 0..=11, 5 for middle C.
    pub fn octave_index(self) -> u8 {
        self.0 / 12
    }

    /// Octave number in scientific pitch notation (middle C = C4).
    pub fn octave_number(self) -> i8 {
        self.octave_index() as i8 - 1
    }

    pub fn is_natural(self) -> bool {
        self.pitch_class().is_natural()
    }

    /// Equal-tempered frequency in Hz relative to `tuning_a4`.
    pub fn frequency(self, tuning_a4: f64) -> f64 {
        crate::tuning::et_freq(self, tuning_a4)
    }

    pub fn transpose(self, semitones: i32) -> Result<Self, TonalError> {
        Self::new(self.0 as i32 + semitones)
    }

    /// Scientific pitch name, e.g. `C4` or `F#-1`.
    pub fn name(self) -> String {
        format!("{}{}", self.pitch_class().name(), self.octave_number())
    }

    /// Parse a scientific pitch name such as `C4`, `F#3`, `Bb-1`.
    pub fn from_name(name: &str) -> Option<Self> {
        let mut chars = name.trim().chars();
        let letter = match chars.next()?.to_ascii_uppercase() {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return None,
        };
        let rest = chars.as_str();
        let (accidental, octave) = if let Some(r) = rest.strip_prefix('#') {
            (1, r)
        } else if let Some(r) = rest.strip_prefix('b') {
            (-1, r)
        } else {
            (0, rest)
        };
        let octave: i32 = octave.parse().ok()?;
        Self::new((octave + 1) * 12 + letter + accidental).ok()
    }

    /// Every pitch in ascending order.
    pub fn all() -> impl Iterator<Item = Pitch> {
        (0..=MAX_NOTE).map(Pitch)
    }
}

impl TryFrom<i32> for Pitch {
    type Error = TonalError;

    fn try_from(note: i32) -> Result<Self, Self::Error> {
        Self::new(note)
    }
}

impl From<Pitch> for u8 {
    fn from(p: Pitch) -> u8 {
        p.0
    }
}

impl std::fmt::Display for Pitch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

pub fn is_valid_note_number(note: i32) -> bool {
    (0..=MAX_NOTE as i32).contains(&note)
}

pub fn pitch_class(pitch: Pitch) -> u8 {
    modulo12(pitch.note() as i32)
}

pub fn octave_index(pitch: Pitch) -> u8 {
    pitch.octave_index()
}

pub fn is_natural(pitch: Pitch) -> bool {
    pitch.is_natural()
}

/// Activation state of one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyState {
    pub activated: bool,
    /// Only meaningful while `activated`.
    pub velocity: u8,
}

/// Activation state for the whole pitch universe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyboard {
    keys: Vec<KeyState>,
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Keyboard {
    pub fn new() -> Self {
        Self {
            keys: vec![KeyState::default(); PITCH_COUNT],
        }
    }

    pub fn key(&self, pitch: Pitch) -> KeyState {
        self.keys[pitch.note() as usize]
    }

    pub fn is_activated(&self, pitch: Pitch) -> bool {
        self.key(pitch).activated
    }

    /// Activate `pitch`. Returns true if it was not already active.
    ///
    /// A key that is already active keeps the velocity it was struck with.
    pub fn activate(&mut self, pitch: Pitch, velocity: u8) -> bool {
        let key = &mut self.keys[pitch.note() as usize];
        if key.activated {
            return false;
        }
        key.activated = true;
        key.velocity = velocity.min(127);
        true
    }

    /// Deactivate `pitch`. Returns true if it was active.
    pub fn deactivate(&mut self, pitch: Pitch) -> bool {
        let key = &mut self.keys[pitch.note() as usize];
        let changed = key.activated;
        *key = KeyState::default();
        changed
    }

    /// Deactivate everything, returning the pitches that were active.
    pub fn deactivate_all(&mut self) -> Vec<Pitch> {
        let released: Vec<Pitch> = self.activated().collect();
        for p in &released {
            self.keys[p.note() as usize] = KeyState::default();
        }
        released
    }

    pub fn activated(&self) -> impl Iterator<Item = Pitch> + '_ {
        Pitch::all().filter(|p| self.is_activated(*p))
    }
}
