//! Per-attempt shot configuration
//!
//! Everything situational about one trigger pull, fixed before any dice
//! are rolled. The same parameters fed to a preview and a resolution
//! must produce the same pre-roll numbers.

use serde::{Deserialize, Serialize};

pub use crate::tables::accuracy::TargetExposure;
pub use crate::tables::hit_location::{Facing, HitLocation, Orientation};
pub use crate::tables::min_arc::Stance;

/// Shooter-side situation and stance modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SituationModifier {
    Braced,
    Bipod,
    ShoulderRest,
    HipFire,
    OneHanded,
    WrongHand,
    FiringFromVehicle,
    QuickShot,
}

impl SituationModifier {
    pub fn alm(self) -> i32 {
        match self {
            SituationModifier::Braced => 3,
            SituationModifier::Bipod => 6,
            SituationModifier::ShoulderRest => 2,
            SituationModifier::HipFire => -6,
            SituationModifier::OneHanded => -4,
            SituationModifier::WrongHand => -9,
            SituationModifier::FiringFromVehicle => -8,
            SituationModifier::QuickShot => -5,
        }
    }
}

/// Light and obscuration between shooter and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisibilityModifier {
    Dusk,
    Night,
    Fog,
    Smoke,
    MuzzleFlashOnly,
    TargetIlluminated,
}

impl VisibilityModifier {
    pub fn alm(self) -> i32 {
        match self {
            VisibilityModifier::Dusk => -2,
            VisibilityModifier::Night => -9,
            VisibilityModifier::Fog => -4,
            VisibilityModifier::Smoke => -6,
            VisibilityModifier::MuzzleFlashOnly => -11,
            VisibilityModifier::TargetIlluminated => 2,
        }
    }
}

/// Aim-point class for explosive weapons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExplosiveTarget {
    /// Open ground at a map point.
    Area,
    /// Through a window.
    Window,
    /// Through a doorway.
    Doorway,
}

impl ExplosiveTarget {
    pub fn alm(self) -> i32 {
        match self {
            ExplosiveTarget::Area => 0,
            ExplosiveTarget::Window => -6,
            ExplosiveTarget::Doorway => -3,
        }
    }
}

/// Immutable configuration for one shot attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShotParameters {
    /// Impulses spent aiming.
    pub aim_time: u32,
    /// Range to target in hexes.
    pub range: u32,
    pub situation: Vec<SituationModifier>,
    pub visibility: Vec<VisibilityModifier>,
    pub orientation: Orientation,
    pub exposure: TargetExposure,
    /// Shooter stance; also feeds the minimum-arc pipeline.
    pub stance: Stance,
    /// Hexes per turn. Zero means stationary.
    pub shooter_speed: i32,
    pub target_speed: i32,
    /// Reflexive duck called on the shot.
    pub shooter_ducked: bool,
    pub target_ducked: bool,
}

impl ShotParameters {
    /// An aimed shot with everything else quiet.
    pub fn aimed(range: u32, aim_time: u32) -> Self {
        Self {
            aim_time,
            range,
            situation: Vec::new(),
            visibility: Vec::new(),
            orientation: Orientation::Front,
            exposure: TargetExposure::Standing,
            stance: Stance::Standing,
            shooter_speed: 0,
            target_speed: 0,
            shooter_ducked: false,
            target_ducked: false,
        }
    }

    pub fn situation_alm(&self) -> i32 {
        self.situation.iter().map(|m| m.alm()).sum()
    }

    pub fn visibility_alm(&self) -> i32 {
        self.visibility.iter().map(|m| m.alm()).sum()
    }
}
