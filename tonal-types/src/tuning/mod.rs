//! Pitch-to-frequency math and interval ratios.
//!
//! All tuning math lives here. Pure functions, no audio dependencies.

pub mod ratios;

pub use ratios::{scale_ratios, JustFlavor};

use crate::interval::Interval;
use crate::pitch::Pitch;
use crate::ratio::{approximate, Approximation, Fraction, RatioError};

/// Standard concert pitch for A4 (note 69).
pub const DEFAULT_A4: f64 = 440.0;

/// Standard 12-TET frequency of a pitch.
pub fn et_freq(pitch: Pitch, tuning_a4: f64) -> f64 {
    tuning_a4 * et_ratio(pitch.note() as i32 - 69)
}

/// Equal-tempered frequency ratio for a signed semitone distance.
pub fn et_ratio(semitones: i32) -> f64 {
    2.0_f64.powf(semitones as f64 / 12.0)
}

/// Just ratio for a signed semitone distance, octave-extended.
pub fn just_ratio(semitones: i32, flavor: JustFlavor) -> f64 {
    let class = semitones.rem_euclid(12) as usize;
    let octaves = semitones.div_euclid(12);
    scale_ratios(flavor)[class] * 2.0_f64.powi(octaves)
}

/// The ratios a labeling collaborator shows for an interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalRatios {
    /// Equal-tempered frequency ratio `to / from`.
    pub frequency: f64,
    /// Simplest fraction near `frequency`.
    pub frequency_fraction: Approximation,
    /// Period (and wavelength) ratio, the inverse of the frequency fraction.
    pub period_fraction: Fraction,
}

impl IntervalRatios {
    pub fn for_interval(interval: &Interval, tolerance: f64) -> Result<Self, RatioError> {
        let frequency = et_ratio(interval.distance());
        let frequency_fraction = approximate(frequency, tolerance)?;
        Ok(Self {
            frequency,
            frequency_fraction,
            period_fraction: frequency_fraction.fraction().reciprocal(),
        })
    }
}
