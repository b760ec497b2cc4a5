//! Three-round-burst hit counts
//!
//! A weapon's burst-capability value nearest-matches one of three
//! dispersion columns; the EAL row then gives cumulative chances of
//! scoring at least one, two, or all three hits, resolved with a single
//! roll.

use crate::core::dice::DieRoller;
use crate::tables::band::{band_index, Band};

/// Burst dispersion keys (nearest). Lower is tighter.
const TRB_KEYS: [f64; 3] = [2.0, 4.0, 6.0];

/// EAL rows run from 3 to 28; values outside clamp.
const TRB_EAL_MIN: i32 = 3;
const TRB_EAL_MAX: i32 = 28;

/// Cumulative (>=1 hit, >=2 hits, 3 hits) percentages per EAL row.
const TRB_TIGHT: [(u32, u32, u32); 26] = [
    (54, 29, 4),
    (58, 33, 8),
    (62, 37, 12),
    (66, 41, 16),
    (70, 45, 20),
    (74, 49, 24),
    (77, 52, 27),
    (80, 55, 30),
    (83, 58, 33),
    (85, 60, 35),
    (87, 62, 37),
    (89, 64, 39),
    (91, 66, 41),
    (92, 67, 42),
    (93, 68, 43),
    (94, 69, 44),
    (95, 70, 45),
    (96, 71, 46),
    (96, 71, 46),
    (97, 72, 47),
    (97, 72, 47),
    (98, 73, 48),
    (98, 73, 48),
    (98, 73, 48),
    (99, 74, 49),
    (99, 74, 49),
];

const TRB_MEDIUM: [(u32, u32, u32); 26] = [
    (54, 19, 0),
    (58, 23, 0),
    (62, 27, 0),
    (66, 31, 1),
    (70, 35, 5),
    (74, 39, 9),
    (77, 42, 12),
    (80, 45, 15),
    (83, 48, 18),
    (85, 50, 20),
    (87, 52, 22),
    (89, 54, 24),
    (91, 56, 26),
    (92, 57, 27),
    (93, 58, 28),
    (94, 59, 29),
    (95, 60, 30),
    (96, 61, 31),
    (96, 61, 31),
    (97, 62, 32),
    (97, 62, 32),
    (98, 63, 33),
    (98, 63, 33),
    (98, 63, 33),
    (99, 64, 34),
    (99, 64, 34),
];

const TRB_LOOSE: [(u32, u32, u32); 26] = [
    (54, 9, 0),
    (58, 13, 0),
    (62, 17, 0),
    (66, 21, 0),
    (70, 25, 0),
    (74, 29, 0),
    (77, 32, 0),
    (80, 35, 0),
    (83, 38, 3),
    (85, 40, 5),
    (87, 42, 7),
    (89, 44, 9),
    (91, 46, 11),
    (92, 47, 12),
    (93, 48, 13),
    (94, 49, 14),
    (95, 50, 15),
    (96, 51, 16),
    (96, 51, 16),
    (97, 52, 17),
    (97, 52, 17),
    (98, 53, 18),
    (98, 53, 18),
    (98, 53, 18),
    (99, 54, 19),
    (99, 54, 19),
];

fn trb_row(trb_value: f64, eal: i32) -> (u32, u32, u32) {
    let key = band_index(&TRB_KEYS, trb_value, Band::Nearest).unwrap_or(0);
    let row = (eal.clamp(TRB_EAL_MIN, TRB_EAL_MAX) - TRB_EAL_MIN) as usize;
    match key {
        0 => TRB_TIGHT[row],
        1 => TRB_MEDIUM[row],
        _ => TRB_LOOSE[row],
    }
}

/// Cumulative hit thresholds for preview display.
pub fn three_round_burst_odds(trb_value: f64, eal: i32) -> (u32, u32, u32) {
    trb_row(trb_value, eal)
}

/// Bucket one roll against a cumulative threshold triple.
pub fn hits_from_roll(odds: (u32, u32, u32), roll: u32) -> u32 {
    let (p1, p2, p3) = odds;
    if roll < p3 {
        3
    } else if roll < p2 {
        2
    } else if roll < p1 {
        1
    } else {
        0
    }
}

/// Hits scored by a three-round burst, 0-3 from one roll against the
/// cumulative thresholds.
pub fn three_round_burst_hits(trb_value: f64, eal: i32, dice: &mut dyn DieRoller) -> u32 {
    hits_from_roll(trb_row(trb_value, eal), dice.percentile())
}
