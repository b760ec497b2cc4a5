//! Result objects returned by the weapon-mode operations
//!
//! A miss or a zero-damage hit is a normal, fully-typed outcome.

use serde::{Deserialize, Serialize};

use crate::tables::hit_location::HitLocation;
use crate::tables::recovery::{IncapacitationEffect, Recovery};

/// Where a hit landed and what it did there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageResult {
    pub location: HitLocation,
    pub damage: u32,
    pub shock: u32,
    /// Pass-through penetration past the deepest threshold, in tenths
    /// of an inch.
    pub excess_penetration_tenths: u32,
    /// A critical region was traversed.
    pub disabled: bool,
    pub pierced_organs: Vec<String>,
}

/// Knocked out of the fight, and for how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incapacitation {
    pub effect: IncapacitationEffect,
    pub duration_turns: u32,
}

/// Outcome of a single resolved round against one target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShotResult {
    pub hit: bool,
    pub eal: i32,
    pub odds: u32,
    pub roll: u32,
    pub target: String,
    pub damage: Option<DamageResult>,
    pub incapacitation: Option<Incapacitation>,
    pub recovery: Option<Recovery>,
    pub log: String,
}

/// Which way a missed explosive round went long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LongShort {
    Long,
    Short,
}

/// Outcome of one explosive round against its aim point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplosiveShotResult {
    pub hit: bool,
    pub eal: i32,
    pub odds: u32,
    pub roll: u32,
    /// Hexes from the aim point on a miss; zero on a hit.
    pub scatter_hexes: u32,
    /// Set only on a miss.
    pub long_short: Option<LongShort>,
    /// The launcher burst never walked onto the target's elevation.
    pub elevation_failed: bool,
}

/// Outcome of a burst elevation check against one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurstElevationResult {
    pub hit: bool,
    pub eal: i32,
    pub odds: u32,
    pub roll: u32,
    /// Rounds allocated onto this target after the auto-fire table and
    /// any redistribution.
    pub hit_count: u32,
}
