//! Layered penetration damage
//!
//! Each hit location is a column of penetration thresholds walked in
//! depth order. A front shot reads the tabulated value at the deepest
//! threshold it reaches; a rear shot enters from the far side, so its
//! damage is the column maximum minus the value at the depth where the
//! projectile stops. Magnitudes are encoded strings with suffix
//! multipliers (H x100, K x1e3, T x1e4, L x1e5, M x1e6).

use crate::core::error::{EngineError, Result};
use crate::tables::hit_location::{Facing, HitLocation};

/// One penetration threshold in a location column.
struct DamageStep {
    /// Tissue depth in inches.
    depth: f64,
    /// Damage magnitude at damage class 1.
    damage: &'static str,
    /// Shock magnitude at damage class 1, where the threshold has one.
    shock: Option<&'static str>,
    /// Tissue region this threshold bounds; `true` marks it critical.
    organ: Option<(&'static str, bool)>,
}

const fn step(
    depth: f64,
    damage: &'static str,
    shock: Option<&'static str>,
    organ: Option<(&'static str, bool)>,
) -> DamageStep {
    DamageStep {
        depth,
        damage,
        shock,
        organ,
    }
}

/// Damage-class scaling applied to every tabulated magnitude.
const DC_SCALE: [f64; 10] = [1.0, 1.8, 3.2, 5.5, 9.0, 15.0, 25.0, 40.0, 65.0, 100.0];

static HEAD: [DamageStep; 5] = [
    step(0.1, "30", Some("2H"), None),
    step(0.5, "1H", Some("1K"), Some(("cranium", false))),
    step(1.0, "4H", Some("5K"), Some(("brain", true))),
    step(2.5, "2K", Some("10K"), None),
    step(4.0, "3K", None, None),
];

static EYES: [DamageStep; 4] = [
    step(0.1, "40", Some("5H"), None),
    step(0.5, "2H", Some("2K"), Some(("eye", false))),
    step(1.0, "6H", Some("8K"), Some(("brain", true))),
    step(3.0, "3K", Some("15K"), None),
];

static NECK: [DamageStep; 5] = [
    step(0.1, "20", Some("1H"), None),
    step(0.8, "1H", Some("8H"), Some(("trachea", false))),
    step(1.5, "3H", Some("3K"), Some(("carotid artery", true))),
    step(3.0, "8H", Some("5K"), Some(("spinal cord", true))),
    step(4.0, "1K", None, None),
];

static SHOULDER: [DamageStep; 5] = [
    step(0.2, "10", Some("50"), None),
    step(1.0, "40", Some("2H"), None),
    step(2.0, "90", Some("5H"), Some(("scapula", false))),
    step(4.0, "1.5H", Some("8H"), None),
    step(6.0, "2H", None, None),
];

static UPPER_CHEST: [DamageStep; 6] = [
    step(0.2, "15", Some("80"), None),
    step(1.0, "60", Some("4H"), Some(("ribs", false))),
    step(2.0, "2H", Some("1.5K"), Some(("lung", false))),
    step(3.5, "5H", Some("4K"), Some(("heart", true))),
    step(5.5, "9H", Some("6K"), Some(("spine", true))),
    step(7.0, "1.2K", None, None),
];

static LOWER_CHEST: [DamageStep; 6] = [
    step(0.2, "12", Some("60"), None),
    step(1.0, "50", Some("3H"), Some(("ribs", false))),
    step(2.2, "1.6H", Some("1K"), Some(("liver", false))),
    step(4.0, "4H", Some("2.5K"), Some(("stomach", false))),
    step(6.0, "7H", Some("4K"), Some(("spine", true))),
    step(7.5, "9H", None, None),
];

static ABDOMEN: [DamageStep; 6] = [
    step(0.2, "10", Some("50"), None),
    step(1.2, "40", Some("2H"), None),
    step(2.5, "1.2H", Some("8H"), Some(("intestines", false))),
    step(4.5, "3H", Some("2K"), Some(("kidney", false))),
    step(6.5, "5H", Some("3K"), Some(("spine", true))),
    step(8.0, "7H", None, None),
];

static PELVIS: [DamageStep; 5] = [
    step(0.2, "8", Some("40"), None),
    step(1.2, "35", Some("1.5H"), None),
    step(2.5, "1H", Some("6H"), Some(("bladder", false))),
    step(4.0, "2.5H", Some("1.5K"), Some(("pelvic girdle", false))),
    step(6.0, "4H", None, None),
];

static UPPER_ARM: [DamageStep; 4] = [
    step(0.1, "4", Some("20"), None),
    step(0.8, "15", Some("60"), None),
    step(1.5, "40", Some("1.5H"), Some(("humerus", false))),
    step(2.5, "70", None, None),
];

static FOREARM: [DamageStep; 4] = [
    step(0.1, "3", Some("15"), None),
    step(0.6, "10", Some("40"), None),
    step(1.2, "25", Some("90"), Some(("radius", false))),
    step(2.0, "45", None, None),
];

static HAND: [DamageStep; 3] = [
    step(0.1, "2", Some("10"), None),
    step(0.5, "8", Some("30"), Some(("metacarpals", false))),
    step(1.2, "20", None, None),
];

static THIGH: [DamageStep; 5] = [
    step(0.2, "8", Some("40"), None),
    step(1.5, "30", Some("1.2H"), None),
    step(3.0, "80", Some("4H"), Some(("femoral artery", true))),
    step(4.5, "1.8H", Some("7H"), Some(("femur", false))),
    step(6.0, "2.8H", None, None),
];

static KNEE: [DamageStep; 4] = [
    step(0.1, "5", Some("25"), None),
    step(0.8, "18", Some("80"), Some(("patella", false))),
    step(1.8, "45", Some("1.6H"), Some(("knee joint", false))),
    step(3.0, "80", None, None),
];

static CALF: [DamageStep; 4] = [
    step(0.1, "4", Some("20"), None),
    step(1.0, "15", Some("60"), None),
    step(2.0, "40", Some("1.2H"), Some(("tibia", false))),
    step(3.5, "70", None, None),
];

static FOOT: [DamageStep; 3] = [
    step(0.1, "2", Some("10"), None),
    step(0.6, "8", Some("30"), Some(("tarsals", false))),
    step(1.5, "18", None, None),
];

fn column(location: HitLocation) -> &'static [DamageStep] {
    use HitLocation::*;
    match location {
        Head => &HEAD,
        Eyes => &EYES,
        Neck => &NECK,
        Shoulder => &SHOULDER,
        UpperChest => &UPPER_CHEST,
        LowerChest => &LOWER_CHEST,
        Abdomen => &ABDOMEN,
        Pelvis => &PELVIS,
        UpperArm => &UPPER_ARM,
        Forearm => &FOREARM,
        Hand => &HAND,
        Thigh => &THIGH,
        Knee => &KNEE,
        Calf => &CALF,
        Foot => &FOOT,
    }
}

/// Parse a damage magnitude string with its suffix multiplier.
pub fn parse_magnitude(encoded: &str) -> Result<f64> {
    let (mantissa, factor) = match encoded.chars().last() {
        Some('H') => (&encoded[..encoded.len() - 1], 1e2),
        Some('K') => (&encoded[..encoded.len() - 1], 1e3),
        Some('T') => (&encoded[..encoded.len() - 1], 1e4),
        Some('L') => (&encoded[..encoded.len() - 1], 1e5),
        Some('M') => (&encoded[..encoded.len() - 1], 1e6),
        _ => (encoded, 1.0),
    };
    mantissa
        .parse::<f64>()
        .map(|v| v * factor)
        .map_err(|_| EngineError::TableDomain {
            table: "damage magnitude",
            detail: format!("unparseable magnitude {encoded:?}"),
        })
}

fn scaled(encoded: &str, dc_index: usize) -> Result<u32> {
    Ok((parse_magnitude(encoded)? * DC_SCALE[dc_index]).round() as u32)
}

/// Wound produced by a penetrating hit at one location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PenetrationWound {
    pub damage: u32,
    pub shock: u32,
    pub pierced_organs: Vec<String>,
    pub disabled: bool,
    /// Penetration left over past the deepest threshold (pass-through),
    /// in inches; stored as tenths to stay integral.
    pub excess_tenths: u32,
}

fn dc_index(damage_class: u8) -> Result<usize> {
    if !(1..=10).contains(&damage_class) {
        return Err(EngineError::TableDomain {
            table: "penetration damage",
            detail: format!("damage class {damage_class} outside 1-10"),
        });
    }
    Ok((damage_class - 1) as usize)
}

/// Resolve a penetrating hit into damage, shock, and pierced regions.
///
/// `effective_penetration` is the penetration remaining after armor, in
/// inches of tissue.
pub fn penetration_wound(
    location: HitLocation,
    damage_class: u8,
    effective_penetration: f64,
    facing: Facing,
) -> Result<PenetrationWound> {
    let dc = dc_index(damage_class)?;
    let steps = column(location);
    let max_depth = steps[steps.len() - 1].depth;
    let excess = (effective_penetration - max_depth).max(0.0);

    match facing {
        Facing::Front => {
            let mut damage = 0;
            let mut shock = 0;
            let mut organs = Vec::new();
            let mut disabled = false;
            for s in steps {
                if s.depth > effective_penetration {
                    break;
                }
                damage = scaled(s.damage, dc)?;
                if let Some(encoded) = s.shock {
                    shock = shock.max(scaled(encoded, dc)?);
                }
                if let Some((name, critical)) = s.organ {
                    organs.push(name.to_string());
                    disabled |= critical;
                }
            }
            Ok(PenetrationWound {
                damage,
                shock,
                pierced_organs: organs,
                disabled,
                excess_tenths: (excess * 10.0).round() as u32,
            })
        }
        Facing::Rear => {
            // The projectile enters from the far threshold and stops where
            // its remaining penetration runs out.
            let stop_depth = max_depth - effective_penetration;
            let max_damage = scaled(steps[steps.len() - 1].damage, dc)?;
            let mut max_shock = 0;
            let mut shock_at_stop = 0;
            let mut damage_at_stop = 0;
            let mut organs = Vec::new();
            let mut disabled = false;
            for s in steps {
                if let Some(encoded) = s.shock {
                    max_shock = max_shock.max(scaled(encoded, dc)?);
                }
                if s.depth <= stop_depth {
                    damage_at_stop = scaled(s.damage, dc)?;
                    if let Some(encoded) = s.shock {
                        shock_at_stop = shock_at_stop.max(scaled(encoded, dc)?);
                    }
                } else if let Some((name, critical)) = s.organ {
                    organs.push(name.to_string());
                    disabled |= critical;
                }
            }
            Ok(PenetrationWound {
                damage: max_damage - damage_at_stop,
                shock: max_shock - shock_at_stop,
                pierced_organs: organs,
                disabled,
                excess_tenths: (excess * 10.0).round() as u32,
            })
        }
    }
}
