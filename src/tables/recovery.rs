//! Incapacitation and recovery tables
//!
//! Incapacitation risk compares accumulated damage-plus-shock against a
//! character's knockout value; recovery prospects come from the ratio of
//! total damage to health, nearest-matched rather than banded.

use serde::{Deserialize, Serialize};

use crate::tables::band::{band_index, Band};

/// Level of medical care available to a casualty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MedicalAid {
    None,
    FirstAid,
    FieldHospital,
    TraumaCenter,
}

impl MedicalAid {
    fn index(self) -> usize {
        match self {
            MedicalAid::None => 0,
            MedicalAid::FirstAid => 1,
            MedicalAid::FieldHospital => 2,
            MedicalAid::TraumaCenter => 3,
        }
    }
}

/// What an incapacitated character is doing instead of fighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncapacitationEffect {
    Stunned,
    Dazed,
    Collapsed,
    Unconscious,
}

/// Recovery prospects for a wounded character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recovery {
    pub healing_days: u32,
    pub critical_period_hours: u32,
    pub recovery_chance: u32,
}

struct RecoveryRow {
    ratio: f64,
    healing_days: u32,
    /// (critical period hours, recovery chance %) per aid tier.
    aid: [(u32, u32); 4],
}

const fn row(ratio: f64, healing_days: u32, aid: [(u32, u32); 4]) -> RecoveryRow {
    RecoveryRow {
        ratio,
        healing_days,
        aid,
    }
}

static RECOVERY: [RecoveryRow; 10] = [
    row(0.05, 3, [(96, 99), (120, 99), (160, 99), (200, 99)]),
    row(0.1, 7, [(72, 95), (96, 97), (120, 98), (160, 99)]),
    row(0.25, 14, [(48, 88), (72, 92), (96, 95), (120, 98)]),
    row(0.5, 30, [(24, 75), (48, 85), (72, 90), (96, 95)]),
    row(1.0, 60, [(12, 55), (24, 70), (48, 80), (72, 90)]),
    row(2.0, 90, [(6, 35), (12, 55), (24, 70), (48, 85)]),
    row(4.0, 150, [(3, 20), (6, 40), (12, 60), (24, 78)]),
    row(8.0, 240, [(1, 10), (3, 25), (6, 45), (12, 68)]),
    row(15.0, 360, [(1, 4), (2, 15), (4, 30), (8, 55)]),
    row(30.0, 600, [(1, 1), (1, 8), (2, 18), (4, 40)]),
];

/// Damage totals are in wound points; one point of health stands for a
/// hundred of them when normalizing.
const HEALTH_SCALE: f64 = 100.0;

/// Recovery data for a damage total, nearest-matched on the normalized
/// damage-to-health ratio.
pub fn recovery(damage_total: u32, health: i32, aid: MedicalAid) -> Recovery {
    let ratio = damage_total as f64 / (health.max(1) as f64 * HEALTH_SCALE);
    let keys: Vec<f64> = RECOVERY.iter().map(|r| r.ratio).collect();
    let idx = band_index(&keys, ratio, Band::Nearest).unwrap_or(0);
    let r = &RECOVERY[idx];
    let (critical_period_hours, recovery_chance) = r.aid[aid.index()];
    Recovery {
        healing_days: r.healing_days,
        critical_period_hours,
        recovery_chance,
    }
}

/// Recovery data across every aid tier, for callers that do not yet
/// know what care the casualty will reach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryProfile {
    pub healing_days: u32,
    /// (aid tier, critical period hours, recovery chance %).
    pub tiers: [(MedicalAid, u32, u32); 4],
}

pub fn recovery_profile(damage_total: u32, health: i32) -> RecoveryProfile {
    let ratio = damage_total as f64 / (health.max(1) as f64 * HEALTH_SCALE);
    let keys: Vec<f64> = RECOVERY.iter().map(|r| r.ratio).collect();
    let idx = band_index(&keys, ratio, Band::Nearest).unwrap_or(0);
    let r = &RECOVERY[idx];
    let tier = |aid: MedicalAid| {
        let (hours, pct) = r.aid[aid.index()];
        (aid, hours, pct)
    };
    RecoveryProfile {
        healing_days: r.healing_days,
        tiers: [
            tier(MedicalAid::None),
            tier(MedicalAid::FirstAid),
            tier(MedicalAid::FieldHospital),
            tier(MedicalAid::TraumaCenter),
        ],
    }
}

/// Ratio bands of (damage + shock) / knockout value (floor).
const KO_RATIO_KEYS: [u32; 8] = [0, 1, 2, 4, 8, 16, 32, 64];
const KO_CHANCE: [u32; 8] = [0, 5, 15, 30, 50, 70, 85, 95];

/// Chance that this much damage-plus-shock knocks the character out of
/// the fight.
pub fn incapacitation_chance(damage_plus_shock: u32, knockout_value: i32) -> u32 {
    let ratio = damage_plus_shock / knockout_value.max(1) as u32;
    let idx = band_index(&KO_RATIO_KEYS, ratio, Band::Floor).unwrap_or(0);
    KO_CHANCE[idx]
}

/// Effect selected by the decile bucket of one roll.
pub fn incapacitation_effect(roll: u32) -> IncapacitationEffect {
    match roll / 10 {
        0..=2 => IncapacitationEffect::Stunned,
        3..=5 => IncapacitationEffect::Dazed,
        6..=7 => IncapacitationEffect::Collapsed,
        _ => IncapacitationEffect::Unconscious,
    }
}

/// Damage rows for incapacitation duration (floor).
const DURATION_DAMAGE_KEYS: [u32; 8] = [1, 10, 30, 100, 300, 1000, 3000, 10000];

/// Duration in turns by (damage row, roll decile column).
const DURATION_TURNS: [[u32; 10]; 8] = [
    [1, 1, 1, 1, 1, 2, 2, 2, 3, 3],
    [1, 1, 2, 2, 3, 3, 4, 4, 5, 6],
    [2, 2, 3, 4, 5, 6, 7, 8, 10, 12],
    [3, 4, 5, 6, 8, 10, 12, 15, 18, 22],
    [5, 6, 8, 10, 13, 16, 20, 25, 30, 40],
    [8, 10, 13, 17, 22, 28, 35, 45, 60, 80],
    [12, 16, 20, 27, 35, 45, 60, 80, 110, 150],
    [20, 26, 34, 45, 60, 80, 110, 150, 210, 300],
];

/// How long the effect lasts, floor-banded on total damage with the
/// column fixed by the same roll's decile bucket.
pub fn incapacitation_duration(damage_total: u32, roll: u32) -> u32 {
    let row = band_index(&DURATION_DAMAGE_KEYS, damage_total.max(1), Band::Floor).unwrap_or(0);
    let col = (roll / 10).min(9) as usize;
    DURATION_TURNS[row][col]
}
