//! Just-intonation ratio tables per flavor.

use serde::{Deserialize, Serialize};

/// 12 ratios relative to the tonic, indexed by interval class (0..12).
pub type RatioTable = [f64; 12];

/// Which just-intonation ratio philosophy to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JustFlavor {
    /// Classic 5-limit: 9/5 minor 7th
    #[default]
    FiveLimit,
    /// Septimal 7-limit: 7/4 minor 7th
    SevenLimit,
    /// Pure fifths: 16/9 minor 7th
    Pythagorean,
}

impl JustFlavor {
    pub const ALL: [JustFlavor; 3] = [
        JustFlavor::FiveLimit,
        JustFlavor::SevenLimit,
        JustFlavor::Pythagorean,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            JustFlavor::FiveLimit => "5-Limit",
            JustFlavor::SevenLimit => "7-Limit",
            JustFlavor::Pythagorean => "Pythagorean",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "5-limit" | "five-limit" | "fivelimit" => Some(JustFlavor::FiveLimit),
            "7-limit" | "seven-limit" | "sevenlimit" => Some(JustFlavor::SevenLimit),
            "pythagorean" => Some(JustFlavor::Pythagorean),
            _ => None,
        }
    }
}

/// Ratio table for a flavor.
pub fn scale_ratios(flavor: JustFlavor) -> &'static RatioTable {
    match flavor {
        JustFlavor::FiveLimit => &FIVE_LIMIT,
        JustFlavor::SevenLimit => &SEVEN_LIMIT,
        JustFlavor::Pythagorean => &PYTHAGOREAN,
    }
}

const FIVE_LIMIT: RatioTable = [
    1.0,          // 1/1
    16.0 / 15.0,  // 16/15
    9.0 / 8.0,    // 9/8
    6.0 / 5.0,    // 6/5
    5.0 / 4.0,    // 5/4
    4.0 / 3.0,    // 4/3
    45.0 / 32.0,  // 45/32
    3.0 / 2.0,    // 3/2
    8.0 / 5.0,    // 8/5
    5.0 / 3.0,    // 5/3
    9.0 / 5.0,    // 9/5
    15.0 / 8.0,   // 15/8
];

const SEVEN_LIMIT: RatioTable = [
    1.0,          // 1/1
    15.0 / 14.0,  // 15/14
    9.0 / 8.0,    // 9/8
    7.0 / 6.0,    // 7/6
    5.0 / 4.0,    // 5/4
    4.0 / 3.0,    // 4/3
    7.0 / 5.0,    // 7/5
    3.0 / 2.0,    // 3/2
    14.0 / 9.0,   // 14/9
    5.0 / 3.0,    // 5/3
    7.0 / 4.0,    // 7/4
    15.0 / 8.0,   // 15/8
];

const PYTHAGOREAN: RatioTable = [
    1.0,            // 1/1
    256.0 / 243.0,  // 256/243
    9.0 / 8.0,      // 9/8
    32.0 / 27.0,    // 32/27
    81.0 / 64.0,    // 81/64
    4.0 / 3.0,      // 4/3
    729.0 / 512.0,  // 729/512
    3.0 / 2.0,      // 3/2
    128.0 / 81.0,   // 128/81
    27.0 / 16.0,    // 27/16
    16.0 / 9.0,     // 16/9
    243.0 / 128.0,  // 243/128
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_tables_start_at_unison_with_pure_fifth() {
        for flavor in JustFlavor::ALL {
            let table = scale_ratios(flavor);
            assert_eq!(table[0], 1.0, "{:?}", flavor);
            assert!((table[7] - 1.5).abs() < 1e-10, "{:?}", flavor);
            assert!((table[5] - 4.0 / 3.0).abs() < 1e-10, "{:?}", flavor);
        }
    }

    #[test]
    fn all_ratios_increase_within_octave() {
        for flavor in JustFlavor::ALL {
            let table = scale_ratios(flavor);
            for i in 1..12 {
                assert!(table[i] > table[i - 1], "{:?} ratio[{}]", flavor, i);
            }
            assert!(table[11] < 2.0);
        }
    }

    #[test]
    fn minor_seventh_varies_by_flavor() {
        assert!((scale_ratios(JustFlavor::FiveLimit)[10] - 9.0 / 5.0).abs() < 1e-10);
        assert!((scale_ratios(JustFlavor::SevenLimit)[10] - 7.0 / 4.0).abs() < 1e-10);
        assert!((scale_ratios(JustFlavor::Pythagorean)[10] - 16.0 / 9.0).abs() < 1e-10);
    }

    #[test]
    fn names_parse_back() {
        for flavor in JustFlavor::ALL {
            assert_eq!(JustFlavor::from_name(flavor.name()), Some(flavor));
        }
        assert_eq!(JustFlavor::from_name("meantone"), None);
    }
}
