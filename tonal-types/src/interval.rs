//! Relation between two pitches: signed distance, interval class, and the
//! fixed consonance lookup.

use serde::{Deserialize, Serialize};

use crate::modulo::modulo12;
use crate::pitch::Pitch;

/// Consonance category of an interval class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Consonance {
    /// Unison/octave.
    Unison,
    /// Fourth and fifth.
    Perfect,
    /// Thirds and sixths.
    Imperfect,
    /// Seconds and sevenths.
    Dissonant,
    /// The tritone.
    Tritone,
}

impl Consonance {
    pub fn is_consonant(&self) -> bool {
        matches!(self, Consonance::Unison | Consonance::Perfect | Consonance::Imperfect)
    }
}

const CONSONANCE: [Consonance; 12] = [
    Consonance::Unison,    // P1
    Consonance::Dissonant, // m2
    Consonance::Dissonant, // M2
    Consonance::Imperfect, // m3
    Consonance::Imperfect, // M3
    Consonance::Perfect,   // P4
    Consonance::Tritone,   // TT
    Consonance::Perfect,   // P5
    Consonance::Imperfect, // m6
    Consonance::Imperfect, // M6
    Consonance::Dissonant, // m7
    Consonance::Dissonant, // M7
];

const SHORT_NAMES: [&str; 12] = [
    "P1", "m2", "M2", "m3", "M3", "P4", "TT", "P5", "m6", "M6", "m7", "M7",
];

/// Consonance of an interval class (taken mod 12).
pub fn consonance(class: u8) -> Consonance {
    CONSONANCE[(class % 12) as usize]
}

/// Directed interval from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub from: Pitch,
    pub to: Pitch,
}

impl Interval {
    pub fn new(from: Pitch, to: Pitch) -> Self {
        Self { from, to }
    }

    /// Signed distance in semitones, `to - from`.
    pub fn distance(&self) -> i32 {
        self.to.note() as i32 - self.from.note() as i32
    }

    /// Distance reduced to 0..12.
    pub fn class(&self) -> u8 {
        modulo12(self.distance())
    }

    pub fn is_tonic(&self) -> bool {
        self.distance() == 0
    }

    pub fn is_octave(&self) -> bool {
        self.distance() != 0 && self.class() == 0
    }

    pub fn consonance(&self) -> Consonance {
        consonance(self.class())
    }

    pub fn short_name(&self) -> &'static str {
        SHORT_NAMES[self.class() as usize]
    }
}

/// Interval from `tonic` up (or down) to `pitch`.
pub fn interval(tonic: Pitch, pitch: Pitch) -> Interval {
    Interval::new(tonic, pitch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(n: i32) -> Pitch {
        Pitch::new(n).unwrap()
    }

    #[test]
    fn distance_and_class() {
        let i = interval(p(60), p(67));
        assert_eq!(i.distance(), 7);
        assert_eq!(i.class(), 7);
        assert_eq!(i.short_name(), "P5");

        let down = interval(p(60), p(53));
        assert_eq!(down.distance(), -7);
        assert_eq!(down.class(), 5);
    }

    #[test]
    fn tonic_is_not_octave() {
        let i = interval(p(60), p(60));
        assert!(i.is_tonic());
        assert!(!i.is_octave());
        assert_eq!(i.consonance(), Consonance::Unison);
    }

    #[test]
    fn octave_iff_nonzero_multiple_of_12() {
        for a in 0..=127 {
            for b in 0..=127 {
                let i = interval(p(a), p(b));
                assert_eq!(
                    i.is_octave(),
                    a != b && (b - a).rem_euclid(12) == 0,
                    "{} -> {}",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn class_is_stable_across_octaves() {
        for n in 0..=115 {
            assert_eq!(interval(p(0), p(n)).class(), interval(p(0), p(n + 12)).class());
        }
    }

    #[test]
    fn consonance_table() {
        assert_eq!(consonance(7), Consonance::Perfect);
        assert_eq!(consonance(5), Consonance::Perfect);
        assert_eq!(consonance(4), Consonance::Imperfect);
        assert_eq!(consonance(6), Consonance::Tritone);
        assert_eq!(consonance(1), Consonance::Dissonant);
        assert_eq!((0..12).filter(|c| consonance(*c).is_consonant()).count(), 7);
    }
}
