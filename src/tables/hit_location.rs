//! Hit-location distributions
//!
//! One roll-range table per target orientation, with exposure narrowing
//! the 00-99 roll to the sub-band that is actually visible. Bands are
//! laid out head, arms, torso, legs so every exposure window is a
//! contiguous slice.

use serde::{Deserialize, Serialize};

use crate::core::dice::DieRoller;
use crate::core::error::{EngineError, Result};
use crate::tables::accuracy::TargetExposure;

/// Which armor face a projectile strikes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    Front,
    Rear,
}

/// Target orientation relative to the shooter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Front,
    Rear,
    Oblique,
    LeftSide,
    RightSide,
}

impl Orientation {
    /// Armor face presented to the shot.
    pub fn facing(self) -> Facing {
        match self {
            Orientation::Rear => Facing::Rear,
            _ => Facing::Front,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitLocation {
    Head,
    Eyes,
    Neck,
    Shoulder,
    UpperChest,
    LowerChest,
    Abdomen,
    Pelvis,
    UpperArm,
    Forearm,
    Hand,
    Thigh,
    Knee,
    Calf,
    Foot,
}

/// Broad body region, used for exposure windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyGroup {
    Head,
    Arms,
    Body,
    Legs,
}

impl HitLocation {
    pub fn group(self) -> BodyGroup {
        use HitLocation::*;
        match self {
            Head | Eyes | Neck => BodyGroup::Head,
            UpperArm | Forearm | Hand => BodyGroup::Arms,
            Shoulder | UpperChest | LowerChest | Abdomen | Pelvis => BodyGroup::Body,
            Thigh | Knee | Calf | Foot => BodyGroup::Legs,
        }
    }
}

/// One contiguous roll range mapping to a location.
#[derive(Debug, Clone, Copy)]
pub struct LocBand {
    pub lo: u32,
    pub hi: u32,
    pub location: HitLocation,
}

const fn band(lo: u32, hi: u32, location: HitLocation) -> LocBand {
    LocBand { lo, hi, location }
}

use HitLocation::*;

/// Facing the shooter (also used shot in the back: same silhouette).
static FRONT: [LocBand; 15] = [
    band(0, 5, Head),
    band(6, 6, Eyes),
    band(7, 8, Neck),
    band(9, 13, UpperArm),
    band(14, 17, Forearm),
    band(18, 19, Hand),
    band(20, 26, Shoulder),
    band(27, 39, UpperChest),
    band(40, 51, LowerChest),
    band(52, 63, Abdomen),
    band(64, 71, Pelvis),
    band(72, 83, Thigh),
    band(84, 87, Knee),
    band(88, 95, Calf),
    band(96, 99, Foot),
];

static OBLIQUE: [LocBand; 15] = [
    band(0, 4, Head),
    band(5, 5, Eyes),
    band(6, 8, Neck),
    band(9, 15, UpperArm),
    band(16, 20, Forearm),
    band(21, 23, Hand),
    band(24, 31, Shoulder),
    band(32, 43, UpperChest),
    band(44, 54, LowerChest),
    band(55, 64, Abdomen),
    band(65, 71, Pelvis),
    band(72, 84, Thigh),
    band(85, 88, Knee),
    band(89, 96, Calf),
    band(97, 99, Foot),
];

static LEFT_SIDE: [LocBand; 15] = [
    band(0, 6, Head),
    band(7, 7, Eyes),
    band(8, 9, Neck),
    band(10, 19, UpperArm),
    band(20, 26, Forearm),
    band(27, 29, Hand),
    band(30, 37, Shoulder),
    band(38, 48, UpperChest),
    band(49, 59, LowerChest),
    band(60, 68, Abdomen),
    band(69, 74, Pelvis),
    band(75, 86, Thigh),
    band(87, 90, Knee),
    band(91, 96, Calf),
    band(97, 99, Foot),
];

static RIGHT_SIDE: [LocBand; 15] = [
    band(0, 6, Head),
    band(7, 7, Eyes),
    band(8, 9, Neck),
    band(10, 18, UpperArm),
    band(19, 25, Forearm),
    band(26, 29, Hand),
    band(30, 36, Shoulder),
    band(37, 47, UpperChest),
    band(48, 58, LowerChest),
    band(59, 68, Abdomen),
    band(69, 74, Pelvis),
    band(75, 85, Thigh),
    band(86, 89, Knee),
    band(90, 96, Calf),
    band(97, 99, Foot),
];

/// Only the head shows above the parapet.
static LOOKING_OVER_COVER: [LocBand; 4] = [
    band(0, 44, Head),
    band(45, 54, Eyes),
    band(55, 69, Neck),
    band(70, 99, Shoulder),
];

/// Head, shoulders and the firing arm are exposed.
static FIRING_OVER_COVER: [LocBand; 8] = [
    band(0, 24, Head),
    band(25, 29, Eyes),
    band(30, 39, Neck),
    band(40, 59, Shoulder),
    band(60, 79, UpperChest),
    band(80, 91, UpperArm),
    band(92, 97, Forearm),
    band(98, 99, Hand),
];

/// Full distribution for an orientation. Front and rear share one
/// silhouette; the facing only changes armor and damage traversal.
pub fn distribution(orientation: Orientation) -> &'static [LocBand] {
    match orientation {
        Orientation::Front | Orientation::Rear => &FRONT,
        Orientation::Oblique => &OBLIQUE,
        Orientation::LeftSide => &LEFT_SIDE,
        Orientation::RightSide => &RIGHT_SIDE,
    }
}

/// The roll window an exposure narrows the distribution to.
fn exposure_window(dist: &[LocBand], group: BodyGroup) -> Result<(u32, u32)> {
    let mut lo = None;
    let mut hi = None;
    for b in dist {
        if b.location.group() == group {
            lo.get_or_insert(b.lo);
            hi = Some(b.hi);
        }
    }
    match (lo, hi) {
        (Some(lo), Some(hi)) => Ok((lo, hi)),
        _ => Err(EngineError::TableDomain {
            table: "hit location",
            detail: format!("no {group:?} bands in this orientation"),
        }),
    }
}

fn locate(dist: &[LocBand], roll: u32) -> HitLocation {
    for b in dist {
        if roll >= b.lo && roll <= b.hi {
            return b.location;
        }
    }
    // Bands cover 0-99 by construction; a roll is always in range.
    dist[dist.len() - 1].location
}

/// Draw a hit location for one resolved hit.
pub fn sample_location(
    orientation: Orientation,
    exposure: TargetExposure,
    dice: &mut dyn DieRoller,
) -> Result<HitLocation> {
    use TargetExposure::*;
    let roll = dice.percentile();
    match exposure {
        LookingOverCover => return Ok(locate(&LOOKING_OVER_COVER, roll)),
        FiringOverCover => return Ok(locate(&FIRING_OVER_COVER, roll)),
        _ => {}
    }
    let dist = distribution(orientation);
    let (lo, hi) = match exposure {
        Standing | Kneeling | Prone => (0, 99),
        HeadOnly => exposure_window(dist, BodyGroup::Head)?,
        BodyOnly => exposure_window(dist, BodyGroup::Body)?,
        LegsOnly => exposure_window(dist, BodyGroup::Legs)?,
        ArmsOnly => exposure_window(dist, BodyGroup::Arms)?,
        LookingOverCover | FiringOverCover => unreachable!(),
    };
    let span = hi - lo + 1;
    let narrowed = lo + roll * span / 100;
    Ok(locate(dist, narrowed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dice::ScriptedDice;

    fn covers_full_range(dist: &[LocBand]) {
        let mut next = 0;
        for b in dist {
            assert_eq!(b.lo, next, "gap before {:?}", b.location);
            assert!(b.hi >= b.lo);
            next = b.hi + 1;
        }
        assert_eq!(next, 100);
    }

    #[test]
    fn test_distributions_cover_00_to_99() {
        covers_full_range(&FRONT);
        covers_full_range(&OBLIQUE);
        covers_full_range(&LEFT_SIDE);
        covers_full_range(&RIGHT_SIDE);
        covers_full_range(&LOOKING_OVER_COVER);
        covers_full_range(&FIRING_OVER_COVER);
    }

    #[test]
    fn test_groups_are_contiguous() {
        for dist in [&FRONT[..], &OBLIQUE[..], &LEFT_SIDE[..], &RIGHT_SIDE[..]] {
            let mut seen = Vec::new();
            let mut last = None;
            for b in dist {
                let g = b.location.group();
                if last != Some(g) {
                    assert!(!seen.contains(&g), "{g:?} bands are split");
                    seen.push(g);
                    last = Some(g);
                }
            }
        }
    }

    #[test]
    fn test_head_only_narrows_to_head_group() {
        for roll in [0, 50, 99] {
            let mut dice = ScriptedDice::new(&[roll]);
            let loc =
                sample_location(Orientation::Front, TargetExposure::HeadOnly, &mut dice).unwrap();
            assert_eq!(loc.group(), BodyGroup::Head, "roll {roll} left the head");
        }
    }

    #[test]
    fn test_legs_only_narrows_to_leg_group() {
        for roll in [0, 30, 99] {
            let mut dice = ScriptedDice::new(&[roll]);
            let loc =
                sample_location(Orientation::Oblique, TargetExposure::LegsOnly, &mut dice).unwrap();
            assert_eq!(loc.group(), BodyGroup::Legs);
        }
    }

    #[test]
    fn test_cover_uses_its_own_distribution() {
        let mut dice = ScriptedDice::new(&[0]);
        let loc = sample_location(
            Orientation::LeftSide,
            TargetExposure::LookingOverCover,
            &mut dice,
        )
        .unwrap();
        assert_eq!(loc, HitLocation::Head);
    }

    #[test]
    fn test_full_exposure_samples_whole_silhouette() {
        let mut dice = ScriptedDice::new(&[99]);
        let loc =
            sample_location(Orientation::Front, TargetExposure::Standing, &mut dice).unwrap();
        assert_eq!(loc, HitLocation::Foot);
    }

    #[test]
    fn test_rear_shares_front_silhouette() {
        assert_eq!(distribution(Orientation::Rear).len(), FRONT.len());
        assert_eq!(Orientation::Rear.facing(), Facing::Rear);
        assert_eq!(Orientation::Oblique.facing(), Facing::Front);
    }
}
