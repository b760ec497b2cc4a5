//! Accuracy-level modifiers and odds of hitting
//!
//! Range, target size, and movement contributions to EAL, plus the odds
//! table that converts a final EAL into a hit percentage.

use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};
use crate::tables::band::{band_index, Band};

/// Which odds column a shot resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotKind {
    /// Aimed single round (also shotgun patterns).
    SingleShot,
    /// Elevation check for automatic fire walking onto a target.
    BurstElevation,
}

/// How much of the target presents itself to the shooter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetExposure {
    Standing,
    Kneeling,
    Prone,
    HeadOnly,
    BodyOnly,
    LegsOnly,
    ArmsOnly,
    LookingOverCover,
    FiringOverCover,
}

/// Which size-modifier variant a lookup wants.
///
/// Standard feeds the EAL sum; Width and Elevation feed the auto-fire
/// table's row shift and the burst elevation check respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeKind {
    Standard,
    Width,
    Elevation,
}

/// Range bands in hexes (ceiling).
const RANGE_KEYS: [u32; 17] = [
    1, 2, 4, 6, 8, 10, 15, 20, 30, 40, 60, 80, 100, 150, 200, 300, 400,
];
const RANGE_ALM: [i32; 17] = [
    30, 24, 20, 17, 15, 13, 10, 8, 5, 3, 0, -2, -4, -7, -9, -12, -14,
];

/// Maximum tabulated range in hexes.
pub const MAX_RANGE: u32 = 400;

/// Range accuracy modifier, ceiling-banded. Shots beyond the last band
/// are outside tabulated ballistic data and error rather than clamp.
pub fn range_alm(range: u32) -> Result<i32> {
    match band_index(&RANGE_KEYS, range, Band::Ceiling) {
        Some(i) => Ok(RANGE_ALM[i]),
        None => Err(EngineError::RangeBeyondTable {
            range,
            max: MAX_RANGE,
        }),
    }
}

/// Lowest tabulated EAL row.
pub const EAL_MIN: i32 = -22;
/// Highest tabulated EAL row.
pub const EAL_MAX: i32 = 28;

/// Odds of hitting for a single aimed shot, per EAL from -22 to 28.
const ODDS_SINGLE: [u32; 51] = [
    1, 1, 2, 2, 3, 3, 4, 5, 6, 7, 8, 9, 11, 13, 15, 17, 20, 23, 26, 30, 34, 38, 42, 46, 50, 54,
    58, 62, 66, 70, 74, 77, 80, 83, 85, 87, 89, 91, 92, 93, 94, 95, 96, 96, 97, 97, 98, 98, 98,
    99, 99,
];

/// Odds of a burst walking onto the target's elevation, per EAL.
const ODDS_BURST: [u32; 51] = [
    3, 3, 4, 5, 6, 7, 8, 9, 11, 13, 15, 17, 20, 23, 26, 30, 34, 38, 42, 46, 50, 54, 58, 62, 66,
    70, 74, 77, 80, 83, 85, 87, 89, 91, 92, 93, 94, 95, 96, 96, 97, 97, 98, 98, 98, 99, 99, 99,
    99, 99, 99,
];

/// Hit percentage for an EAL, saturating at 0% below -22 and 99% above 28.
pub fn odds_of_hitting(eal: i32, kind: ShotKind) -> u32 {
    if eal < EAL_MIN {
        return 0;
    }
    if eal > EAL_MAX {
        return 99;
    }
    let row = (eal - EAL_MIN) as usize;
    match kind {
        ShotKind::SingleShot => ODDS_SINGLE[row],
        ShotKind::BurstElevation => ODDS_BURST[row],
    }
}

/// Target size modifier by exact (exposure, kind) pair.
///
/// Cover exposures only present a silhouette, not a width or an
/// elevation; asking for those is a caller bug and errors.
pub fn target_size_alm(exposure: TargetExposure, kind: SizeKind) -> Result<i32> {
    use SizeKind::*;
    use TargetExposure::*;
    let alm = match (exposure, kind) {
        (Standing, Standard) => 0,
        (Standing, Width) => 0,
        (Standing, Elevation) => 0,
        (Kneeling, Standard) => -2,
        (Kneeling, Width) => 0,
        (Kneeling, Elevation) => -2,
        (Prone, Standard) => -4,
        (Prone, Width) => 0,
        (Prone, Elevation) => -7,
        (HeadOnly, Standard) => -8,
        (HeadOnly, Width) => -4,
        (HeadOnly, Elevation) => -6,
        (BodyOnly, Standard) => -2,
        (BodyOnly, Width) => -1,
        (BodyOnly, Elevation) => -2,
        (LegsOnly, Standard) => -4,
        (LegsOnly, Width) => -2,
        (LegsOnly, Elevation) => -2,
        (ArmsOnly, Standard) => -7,
        (ArmsOnly, Width) => -4,
        (ArmsOnly, Elevation) => -4,
        (LookingOverCover, Standard) => -9,
        (FiringOverCover, Standard) => -6,
        (LookingOverCover | FiringOverCover, Width | Elevation) => {
            return Err(EngineError::TableDomain {
                table: "target size",
                detail: format!("{exposure:?} has no {kind:?} modifier"),
            })
        }
    };
    Ok(alm)
}

/// Speed bands in hexes per turn (floor).
const SPEED_KEYS: [i32; 7] = [1, 2, 3, 4, 6, 8, 10];

/// Size-proxy bands on the standard size modifier (floor).
const SIZE_PROXY_KEYS: [i32; 5] = [-9, -6, -4, -2, 0];

/// Movement accuracy modifier by (speed row, size-proxy column).
const MOVE_ALM: [[i32; 5]; 7] = [
    [-3, -2, -2, -1, -1],
    [-5, -4, -3, -2, -2],
    [-7, -5, -4, -3, -3],
    [-8, -7, -5, -4, -4],
    [-10, -8, -7, -5, -5],
    [-12, -10, -8, -7, -6],
    [-14, -12, -10, -8, -7],
];

/// Maximum useful aim time in impulses by (speed row, size-proxy column).
const MAX_AIM: [[u32; 5]; 7] = [
    [3, 4, 4, 5, 5],
    [2, 3, 3, 4, 4],
    [2, 2, 3, 3, 3],
    [1, 2, 2, 2, 3],
    [1, 1, 2, 2, 2],
    [1, 1, 1, 1, 2],
    [0, 1, 1, 1, 1],
];

fn speed_size_cell(speed: i32, size_alm: i32) -> Option<(usize, usize)> {
    if speed <= 0 {
        return None;
    }
    let row = band_index(&SPEED_KEYS, speed, Band::Floor)?;
    // Below the smallest proxy band clamps to it.
    let col = band_index(&SIZE_PROXY_KEYS, size_alm.min(0), Band::Floor).unwrap_or(0);
    Some((row, col))
}

/// Accuracy penalty for a mover (shooter or target). Zero when standing still.
pub fn movement_alm(speed: i32, size_alm: i32) -> i32 {
    match speed_size_cell(speed, size_alm) {
        Some((row, col)) => MOVE_ALM[row][col],
        None => 0,
    }
}

/// Aim-time cap imposed by movement. `None` means unconstrained.
pub fn max_aim_time(speed: i32, size_alm: i32) -> Option<u32> {
    speed_size_cell(speed, size_alm).map(|(row, col)| MAX_AIM[row][col])
}
