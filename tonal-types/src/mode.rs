//! The 12-entry mode table.
//!
//! Modes are the 12 rotations of one seven-note pitch collection. Mode `m`
//! lists the interval classes of the collection measured from a tonic sitting
//! `m` semitones above the collection's Dorian final, so moving the tonic up
//! `d` semitones inside the same collection selects mode `m + d`. Modes whose
//! tonic falls outside the collection (1, 4, 6, 8, 11) have no church-mode
//! name and a neutral affinity.
//!
//! Directional bias follows the mirror relation: modes with a major triad
//! above the tonic lean upward, their inversions (major triad below) lean
//! downward, and self-mirroring sets are mixed.

use serde::{Deserialize, Serialize};

use crate::modulo::modulo12;
use crate::TonalError;

/// Orientation of the layout around the tonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PitchDirection {
    /// Tonic at the bottom, intervals measured upward.
    Upward,
    /// Tonic at the top, intervals measured downward.
    Downward,
    /// Tonic in the middle.
    #[default]
    Mixed,
}

impl PitchDirection {
    pub const ALL: [PitchDirection; 3] = [
        PitchDirection::Upward,
        PitchDirection::Downward,
        PitchDirection::Mixed,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PitchDirection::Upward => "upward",
            PitchDirection::Downward => "downward",
            PitchDirection::Mixed => "mixed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Affinity {
    Major,
    Minor,
    Neutral,
}

/// One row of the mode table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeInfo {
    pub name: Option<&'static str>,
    /// Interval classes of the collection relative to the tonic, ascending.
    pub interval_classes: [u8; 7],
    pub affinity: Affinity,
    pub bias: PitchDirection,
}

impl ModeInfo {
    pub fn contains(&self, class: u8) -> bool {
        self.interval_classes.contains(&(class % 12))
    }
}

use Affinity::{Major, Minor, Neutral};
use PitchDirection::{Downward, Mixed, Upward};

const MODE_TABLE: [ModeInfo; 12] = [
    ModeInfo { name: Some("Dorian"), interval_classes: [0, 2, 3, 5, 7, 9, 10], affinity: Minor, bias: Mixed },
    ModeInfo { name: None, interval_classes: [1, 2, 4, 6, 8, 9, 11], affinity: Neutral, bias: Mixed },
    ModeInfo { name: Some("Phrygian"), interval_classes: [0, 1, 3, 5, 7, 8, 10], affinity: Minor, bias: Downward },
    ModeInfo { name: Some("Lydian"), interval_classes: [0, 2, 4, 6, 7, 9, 11], affinity: Major, bias: Upward },
    ModeInfo { name: None, interval_classes: [1, 3, 5, 6, 8, 10, 11], affinity: Neutral, bias: Downward },
    ModeInfo { name: Some("Mixolydian"), interval_classes: [0, 2, 4, 5, 7, 9, 10], affinity: Major, bias: Upward },
    ModeInfo { name: None, interval_classes: [1, 3, 4, 6, 8, 9, 11], affinity: Neutral, bias: Mixed },
    ModeInfo { name: Some("Aeolian"), interval_classes: [0, 2, 3, 5, 7, 8, 10], affinity: Minor, bias: Downward },
    ModeInfo { name: None, interval_classes: [1, 2, 4, 6, 7, 9, 11], affinity: Neutral, bias: Upward },
    ModeInfo { name: Some("Locrian"), interval_classes: [0, 1, 3, 5, 6, 8, 10], affinity: Minor, bias: Downward },
    ModeInfo { name: Some("Ionian"), interval_classes: [0, 2, 4, 5, 7, 9, 11], affinity: Major, bias: Upward },
    ModeInfo { name: None, interval_classes: [1, 3, 4, 6, 8, 10, 11], affinity: Neutral, bias: Mixed },
];

/// Number of modes.
pub const MODE_COUNT: u8 = 12;

/// A mode index in 0..12.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "i32", into = "u8")]
pub struct Mode(u8);

impl Mode {
    pub fn new(index: i32) -> Result<Self, TonalError> {
        if (0..MODE_COUNT as i32).contains(&index) {
            Ok(Self(index as u8))
        } else {
            Err(TonalError::ModeOutOfRange(index))
        }
    }

    /// Any integer, reduced mod 12.
    pub fn from_rotation(steps: i32) -> Self {
        Self(modulo12(steps))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn rotate(self, steps: i32) -> Self {
        Self::from_rotation(self.0 as i32 + steps)
    }

    /// Steps from `self` up to `other`, in 0..12.
    pub fn steps_to(self, other: Mode) -> u8 {
        modulo12(other.0 as i32 - self.0 as i32)
    }

    pub fn info(self) -> &'static ModeInfo {
        &MODE_TABLE[self.0 as usize]
    }

    pub fn bias(self) -> PitchDirection {
        self.info().bias
    }

    pub fn affinity(self) -> Affinity {
        self.info().affinity
    }

    pub fn all() -> impl Iterator<Item = Mode> {
        (0..MODE_COUNT).map(Mode)
    }
}

impl TryFrom<i32> for Mode {
    type Error = TonalError;

    fn try_from(index: i32) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

impl From<Mode> for u8 {
    fn from(m: Mode) -> u8 {
        m.0
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.info().name {
            Some(name) => write!(f, "{} ({})", self.0, name),
            None => write!(f, "{}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Each interval class moved down `steps` semitones, mod 12, sorted.
    fn rotate_classes(classes: &[u8], steps: i32) -> Vec<u8> {
        let mut out: Vec<u8> = classes
            .iter()
            .map(|&c| modulo12(c as i32 - steps))
            .collect();
        out.sort_unstable();
        out
    }

    /// Direction seen through the mirror (inversion about the tonic).
    fn mirrored(d: PitchDirection) -> PitchDirection {
        match d {
            Upward => Downward,
            Downward => Upward,
            Mixed => Mixed,
        }
    }

    #[test]
    fn exactly_twelve_modes() {
        assert_eq!(Mode::all().count(), 12);
        assert!(Mode::new(11).is_ok());
        assert_eq!(Mode::new(12), Err(TonalError::ModeOutOfRange(12)));
        assert_eq!(Mode::new(-1), Err(TonalError::ModeOutOfRange(-1)));
    }

    #[test]
    fn rotation_selects_rotated_entry() {
        for m in Mode::all() {
            for d in -24..=24 {
                let rotated = m.rotate(d);
                assert_eq!(
                    rotated.info().interval_classes.to_vec(),
                    rotate_classes(&m.info().interval_classes, d),
                    "mode {} rotated by {}",
                    m.index(),
                    d
                );
            }
        }
    }

    #[test]
    fn classes_sorted_and_distinct() {
        for m in Mode::all() {
            let classes = m.info().interval_classes;
            assert!(classes.windows(2).all(|w| w[0] < w[1]), "mode {}", m.index());
            assert!(classes.iter().all(|&c| c < 12));
        }
    }

    #[test]
    fn named_modes_contain_their_tonic() {
        for m in Mode::all() {
            assert_eq!(m.info().name.is_some(), m.info().contains(0), "mode {}", m.index());
        }
    }

    #[test]
    fn affinity_matches_third() {
        for m in Mode::all() {
            let info = m.info();
            let expected = if !info.contains(0) {
                Affinity::Neutral
            } else if info.contains(4) {
                Affinity::Major
            } else {
                Affinity::Minor
            };
            assert_eq!(info.affinity, expected, "mode {}", m.index());
        }
    }

    #[test]
    fn mirrored_modes_have_mirrored_bias() {
        for m in Mode::all() {
            let mirror = Mode::from_rotation(-(m.index() as i32));
            assert_eq!(mirror.bias(), mirrored(m.bias()), "mode {}", m.index());
        }
    }

    #[test]
    fn church_mode_positions() {
        assert_eq!(Mode::new(0).unwrap().info().name, Some("Dorian"));
        assert_eq!(Mode::new(7).unwrap().info().name, Some("Aeolian"));
        assert_eq!(Mode::new(10).unwrap().info().name, Some("Ionian"));
        assert_eq!(Mode::new(7).unwrap().bias(), PitchDirection::Downward);
        assert_eq!(Mode::new(0).unwrap().bias(), PitchDirection::Mixed);
    }

    #[test]
    fn steps_to_wraps() {
        let a = Mode::new(10).unwrap();
        let b = Mode::new(2).unwrap();
        assert_eq!(a.steps_to(b), 4);
        assert_eq!(b.steps_to(a), 8);
    }
}
