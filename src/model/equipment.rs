//! Equipment: gear, ammunition, weapons, armor, grenades
//!
//! Equipment is a tagged union over the capability set; resolving code
//! asks for a capability once through a checked accessor and gets a
//! typed error when it is absent, never a silent default.

use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};
use crate::tables::hit_location::{Facing, HitLocation};
use crate::tables::min_arc::WeaponFamily;

/// Stable identifier for an item in a character's inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

/// Anything a character can carry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Equipment {
    Gear(Gear),
    Ammo(AmmoType),
    Weapon(Weapon),
    Armor(Armor),
    Grenade(Grenade),
}

impl Equipment {
    pub fn name(&self) -> &str {
        match self {
            Equipment::Gear(g) => &g.name,
            Equipment::Ammo(a) => &a.name,
            Equipment::Weapon(w) => &w.name,
            Equipment::Armor(a) => &a.name,
            Equipment::Grenade(g) => &g.name,
        }
    }

    pub fn weight(&self) -> f64 {
        match self {
            Equipment::Gear(g) => g.weight,
            Equipment::Ammo(a) => a.weight,
            Equipment::Weapon(w) => w.weight,
            Equipment::Armor(a) => a.weight,
            Equipment::Grenade(g) => g.weight,
        }
    }

    pub fn as_weapon(&self) -> Result<&Weapon> {
        match self {
            Equipment::Weapon(w) => Ok(w),
            other => Err(EngineError::MissingCapability {
                item: other.name().to_string(),
                capability: "weapon",
            }),
        }
    }

    pub fn as_ammo(&self) -> Result<&AmmoType> {
        match self {
            Equipment::Ammo(a) => Ok(a),
            other => Err(EngineError::MissingCapability {
                item: other.name().to_string(),
                capability: "ammunition",
            }),
        }
    }

    pub fn as_armor(&self) -> Result<&Armor> {
        match self {
            Equipment::Armor(a) => Ok(a),
            other => Err(EngineError::MissingCapability {
                item: other.name().to_string(),
                capability: "armor",
            }),
        }
    }

    pub fn as_grenade(&self) -> Result<&Grenade> {
        match self {
            Equipment::Grenade(g) => Ok(g),
            other => Err(EngineError::MissingCapability {
                item: other.name().to_string(),
                capability: "grenade",
            }),
        }
    }
}

/// Plain carried kit with no combat behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gear {
    pub name: String,
    pub weight: f64,
    pub description: String,
}

/// One range band of ballistic performance for a round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallisticEntry {
    /// Band ceiling in hexes.
    pub range: u32,
    /// Penetration in inches of tissue.
    pub penetration: f64,
    /// Pattern accuracy modifier; shotgun loads only.
    pub shotgun_alm: Option<i32>,
    /// Base pellet hit chance; multi-projectile loads only.
    pub pellet_hit_chance: Option<u32>,
    /// Pattern radius in hexes; multi-projectile loads only.
    pub pattern_radius: Option<f64>,
}

/// One range band of burst effect around a detonation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosiveEntry {
    /// Distance-from-burst ceiling in hexes.
    pub range: u32,
    /// Base shrapnel hit chance at this distance.
    pub shrapnel_hit_chance: u32,
    /// Shrapnel penetration in inches of tissue.
    pub shrapnel_penetration: f64,
    /// Shrapnel damage class.
    pub shrapnel_damage_class: u8,
    /// Concussion damage before blast modifiers.
    pub concussion: f64,
}

fn entry_at<'a, T>(entries: &'a [T], range: u32, key: impl Fn(&T) -> u32) -> Result<&'a T> {
    let max = entries.last().map(|e| key(e)).unwrap_or(0);
    entries
        .iter()
        .find(|e| key(e) >= range)
        .ok_or(EngineError::RangeBeyondTable { range, max })
}

/// Explosive band covering a distance from the burst point, for any
/// explosive source (ammunition or grenade).
pub fn explosive_entry_at(entries: &[ExplosiveEntry], range: u32) -> Result<&ExplosiveEntry> {
    entry_at(entries, range, |e| e.range)
}

/// A kind of ammunition, with its range-banded performance tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmmoType {
    pub name: String,
    pub weight: f64,
    /// Severity tier 1-10 selecting the damage column.
    pub damage_class: u8,
    /// Ordered by ascending range ceiling.
    pub ballistic: Vec<BallisticEntry>,
    /// Ordered by ascending distance-from-burst ceiling.
    pub explosive: Vec<ExplosiveEntry>,
    /// Projectiles per shell; shot loads only.
    pub pellet_count: Option<u32>,
}

impl AmmoType {
    /// Ballistic band covering `range`, ceiling-matched.
    pub fn ballistic_at(&self, range: u32) -> Result<&BallisticEntry> {
        if self.ballistic.is_empty() {
            return Err(EngineError::MissingCapability {
                item: self.name.clone(),
                capability: "ballistic table",
            });
        }
        entry_at(&self.ballistic, range, |e| e.range)
    }

    /// Explosive band covering a distance from the burst point.
    pub fn explosive_at(&self, range: u32) -> Result<&ExplosiveEntry> {
        if self.explosive.is_empty() {
            return Err(EngineError::MissingCapability {
                item: self.name.clone(),
                capability: "explosive table",
            });
        }
        entry_at(&self.explosive, range, |e| e.range)
    }

    pub fn pellet_count(&self) -> Result<u32> {
        self.pellet_count.ok_or_else(|| EngineError::MissingCapability {
            item: self.name.clone(),
            capability: "pellet count",
        })
    }
}

/// Full-automatic capability: rate of fire and the sustained-burst
/// penalty travel together or not at all.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FullAuto {
    /// Rounds per burst.
    pub rate_of_fire: u32,
    /// EAL penalty per impulse of continuous fire beyond the first.
    pub sab_penalty: i32,
}

/// One range band of a weapon's ballistic envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallisticBand {
    /// Band ceiling in hexes.
    pub range: u32,
    /// Tightest sweep the weapon can hold at this range, in hexes.
    pub minimum_arc: f64,
    /// EAL ceiling the barrel is mechanically capable of.
    pub accuracy: i32,
    /// Burst-dispersion value; only for weapons with a burst selector.
    pub three_round_burst: Option<f64>,
    /// Seconds in flight.
    pub time_of_flight: f64,
}

/// Range-banded ballistic data for a weapon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallisticData {
    pub bands: Vec<BallisticBand>,
}

impl BallisticData {
    pub fn at(&self, range: u32) -> Result<&BallisticBand> {
        entry_at(&self.bands, range, |b| b.range)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    Pistol,
    SubmachineGun,
    Rifle,
    AssaultRifle,
    MachineGun,
    Shotgun,
    GrenadeLauncher,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub caliber: String,
    pub kind: WeaponKind,
    pub country: String,
    pub weight: f64,
    pub family: WeaponFamily,
    pub one_handed: bool,
    /// (aim time in impulses, accuracy modifier), ascending. Aiming
    /// longer than the last entry earns nothing further.
    pub aim_mods: Vec<(u32, i32)>,
    pub compatible_ammo: Vec<String>,
    pub full_auto: Option<FullAuto>,
    pub ballistics: Option<BallisticData>,
}

impl Weapon {
    /// Aim-time accuracy modifier, floor-matched and capped at the top
    /// of the weapon's aim table.
    pub fn aim_alm(&self, aim_time: u32) -> i32 {
        let mut alm = self.aim_mods.first().map(|&(_, m)| m).unwrap_or(0);
        for &(t, m) in &self.aim_mods {
            if t <= aim_time {
                alm = m;
            } else {
                break;
            }
        }
        alm
    }

    pub fn full_auto(&self) -> Result<FullAuto> {
        self.full_auto.ok_or_else(|| EngineError::MissingCapability {
            item: self.name.clone(),
            capability: "full-auto fire",
        })
    }

    pub fn ballistics(&self) -> Result<&BallisticData> {
        self.ballistics
            .as_ref()
            .ok_or_else(|| EngineError::MissingCapability {
                item: self.name.clone(),
                capability: "ballistic",
            })
    }

    /// Burst-dispersion value at range; errors when the weapon has no
    /// burst selector.
    pub fn three_round_burst_at(&self, range: u32) -> Result<f64> {
        let band = self.ballistics()?.at(range)?;
        band.three_round_burst
            .ok_or_else(|| EngineError::MissingCapability {
                item: self.name.clone(),
                capability: "three-round burst",
            })
    }

    pub fn accepts(&self, ammo: &AmmoType) -> bool {
        self.compatible_ammo.iter().any(|n| *n == ammo.name)
    }
}

/// What an armor layer is made of; sets how fast it wears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmorMaterial {
    Steel,
    Titanium,
    Ceramic,
    Aramid,
    BallisticNylon,
}

impl ArmorMaterial {
    /// Condition lost per hit. Brittle materials shatter under
    /// penetration; soft weaves mostly shrug off stopped rounds.
    pub fn wear_rate(self, penetrated: bool) -> f64 {
        match (self, penetrated) {
            (ArmorMaterial::Steel, false) => 0.01,
            (ArmorMaterial::Steel, true) => 0.08,
            (ArmorMaterial::Titanium, false) => 0.01,
            (ArmorMaterial::Titanium, true) => 0.06,
            (ArmorMaterial::Ceramic, false) => 0.15,
            (ArmorMaterial::Ceramic, true) => 0.40,
            (ArmorMaterial::Aramid, false) => 0.03,
            (ArmorMaterial::Aramid, true) => 0.12,
            (ArmorMaterial::BallisticNylon, false) => 0.05,
            (ArmorMaterial::BallisticNylon, true) => 0.15,
        }
    }
}

/// One layer of protection over a location.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ArmorLayer {
    pub material: ArmorMaterial,
    /// Penetration absorbed at full condition, in inches of tissue.
    pub ballistic_factor: f64,
    /// Protection factor against blunt transfer when the layer stops a round.
    pub blunt_factor: f64,
    /// Remaining integrity in [0, 1]; never increases.
    pub condition: f64,
}

impl ArmorLayer {
    pub fn new(material: ArmorMaterial, ballistic_factor: f64, blunt_factor: f64) -> Self {
        Self {
            material,
            ballistic_factor,
            blunt_factor,
            condition: 1.0,
        }
    }

    /// Wear from one hit. Condition floors at zero.
    pub fn degrade(&mut self, penetrated: bool) {
        let worn = self.condition - self.material.wear_rate(penetrated);
        self.condition = worn.max(0.0);
    }
}

/// The layers worn over one (location, facing) slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArmorCoverage {
    pub location: HitLocation,
    pub facing: Facing,
    /// Outermost first.
    pub layers: Vec<ArmorLayer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Armor {
    pub name: String,
    pub weight: f64,
    pub coverage: Vec<ArmorCoverage>,
}

impl Armor {
    pub fn layers_at(&self, location: HitLocation, facing: Facing) -> Option<&[ArmorLayer]> {
        self.coverage
            .iter()
            .find(|c| c.location == location && c.facing == facing)
            .map(|c| c.layers.as_slice())
    }

    pub fn layers_at_mut(
        &mut self,
        location: HitLocation,
        facing: Facing,
    ) -> Option<&mut Vec<ArmorLayer>> {
        self.coverage
            .iter_mut()
            .find(|c| c.location == location && c.facing == facing)
            .map(|c| &mut c.layers)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrenadeKind {
    Fragmentation,
    Concussion,
    Smoke,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grenade {
    pub name: String,
    pub weight: f64,
    pub kind: GrenadeKind,
    /// Impulses to arm.
    pub arm_time: u32,
    /// Impulses from release to detonation.
    pub fuse_length: u32,
    /// Maximum throw in hexes.
    pub throw_range: u32,
    pub explosive: Vec<ExplosiveEntry>,
}

impl Grenade {
    pub fn explosive_at(&self, range: u32) -> Result<&ExplosiveEntry> {
        if self.explosive.is_empty() {
            return Err(EngineError::MissingCapability {
                item: self.name.clone(),
                capability: "explosive table",
            });
        }
        entry_at(&self.explosive, range, |e| e.range)
    }
}

// ---------------------------------------------------------------------------
// Reference equipment
// ---------------------------------------------------------------------------

impl Weapon {
    /// Reference weapon: 5.56mm assault rifle
    pub fn assault_rifle() -> Self {
        Self {
            name: "M16A2".into(),
            caliber: "5.56mm".into(),
            kind: WeaponKind::AssaultRifle,
            country: "US".into(),
            weight: 7.5,
            family: WeaponFamily::Rifle,
            one_handed: false,
            aim_mods: vec![(0, -8), (1, -4), (2, -1), (3, 1), (4, 3), (5, 5), (6, 6)],
            compatible_ammo: vec!["5.56mm Ball".into()],
            full_auto: Some(FullAuto {
                rate_of_fire: 15,
                sab_penalty: -2,
            }),
            ballistics: Some(BallisticData {
                bands: vec![
                    BallisticBand {
                        range: 10,
                        minimum_arc: 0.2,
                        accuracy: 18,
                        three_round_burst: Some(2.0),
                        time_of_flight: 0.1,
                    },
                    BallisticBand {
                        range: 50,
                        minimum_arc: 0.3,
                        accuracy: 16,
                        three_round_burst: Some(2.0),
                        time_of_flight: 0.4,
                    },
                    BallisticBand {
                        range: 100,
                        minimum_arc: 0.4,
                        accuracy: 14,
                        three_round_burst: Some(2.5),
                        time_of_flight: 0.9,
                    },
                    BallisticBand {
                        range: 200,
                        minimum_arc: 0.6,
                        accuracy: 11,
                        three_round_burst: Some(3.0),
                        time_of_flight: 2.0,
                    },
                    BallisticBand {
                        range: 400,
                        minimum_arc: 1.0,
                        accuracy: 7,
                        three_round_burst: Some(4.0),
                        time_of_flight: 4.5,
                    },
                ],
            }),
        }
    }

    /// Reference weapon: 9mm submachine gun
    pub fn submachine_gun() -> Self {
        Self {
            name: "MP5A3".into(),
            caliber: "9mm".into(),
            kind: WeaponKind::SubmachineGun,
            country: "DE".into(),
            weight: 6.8,
            family: WeaponFamily::Rifle,
            one_handed: false,
            aim_mods: vec![(0, -7), (1, -3), (2, 0), (3, 2), (4, 4), (5, 5)],
            compatible_ammo: vec!["9mm Ball".into()],
            full_auto: Some(FullAuto {
                rate_of_fire: 20,
                sab_penalty: -3,
            }),
            ballistics: Some(BallisticData {
                bands: vec![
                    BallisticBand {
                        range: 10,
                        minimum_arc: 0.2,
                        accuracy: 15,
                        three_round_burst: Some(3.0),
                        time_of_flight: 0.1,
                    },
                    BallisticBand {
                        range: 50,
                        minimum_arc: 0.3,
                        accuracy: 13,
                        three_round_burst: Some(4.0),
                        time_of_flight: 0.5,
                    },
                    BallisticBand {
                        range: 100,
                        minimum_arc: 0.5,
                        accuracy: 10,
                        three_round_burst: Some(5.0),
                        time_of_flight: 1.1,
                    },
                    BallisticBand {
                        range: 200,
                        minimum_arc: 0.8,
                        accuracy: 6,
                        three_round_burst: Some(6.0),
                        time_of_flight: 2.6,
                    },
                ],
            }),
        }
    }

    /// Reference weapon: belt-fed general-purpose machine gun
    pub fn machine_gun() -> Self {
        Self {
            name: "M60".into(),
            caliber: "7.62mm".into(),
            kind: WeaponKind::MachineGun,
            country: "US".into(),
            weight: 23.0,
            family: WeaponFamily::Support,
            one_handed: false,
            aim_mods: vec![(0, -9), (1, -5), (2, -2), (3, 0), (4, 2), (5, 4), (6, 5)],
            compatible_ammo: vec!["7.62mm Ball".into()],
            full_auto: Some(FullAuto {
                rate_of_fire: 30,
                sab_penalty: -1,
            }),
            ballistics: Some(BallisticData {
                bands: vec![
                    BallisticBand {
                        range: 10,
                        minimum_arc: 0.3,
                        accuracy: 17,
                        three_round_burst: None,
                        time_of_flight: 0.1,
                    },
                    BallisticBand {
                        range: 100,
                        minimum_arc: 0.5,
                        accuracy: 15,
                        three_round_burst: None,
                        time_of_flight: 0.8,
                    },
                    BallisticBand {
                        range: 200,
                        minimum_arc: 0.7,
                        accuracy: 13,
                        three_round_burst: None,
                        time_of_flight: 1.8,
                    },
                    BallisticBand {
                        range: 400,
                        minimum_arc: 1.0,
                        accuracy: 10,
                        three_round_burst: None,
                        time_of_flight: 4.0,
                    },
                ],
            }),
        }
    }

    /// Reference weapon: pump 12-gauge shotgun
    pub fn shotgun() -> Self {
        Self {
            name: "M870".into(),
            caliber: "12ga".into(),
            kind: WeaponKind::Shotgun,
            country: "US".into(),
            weight: 8.0,
            family: WeaponFamily::Rifle,
            one_handed: false,
            aim_mods: vec![(0, -7), (1, -3), (2, 0), (3, 2), (4, 3)],
            compatible_ammo: vec!["12ga 00 Buck".into()],
            full_auto: None,
            ballistics: Some(BallisticData {
                bands: vec![
                    BallisticBand {
                        range: 10,
                        minimum_arc: 0.2,
                        accuracy: 14,
                        three_round_burst: None,
                        time_of_flight: 0.1,
                    },
                    BallisticBand {
                        range: 20,
                        minimum_arc: 0.3,
                        accuracy: 12,
                        three_round_burst: None,
                        time_of_flight: 0.2,
                    },
                    BallisticBand {
                        range: 40,
                        minimum_arc: 0.4,
                        accuracy: 9,
                        three_round_burst: None,
                        time_of_flight: 0.5,
                    },
                ],
            }),
        }
    }

    /// Reference weapon: automatic 40mm grenade launcher
    pub fn grenade_launcher() -> Self {
        Self {
            name: "Mk19".into(),
            caliber: "40mm".into(),
            kind: WeaponKind::GrenadeLauncher,
            country: "US".into(),
            weight: 77.0,
            family: WeaponFamily::Support,
            one_handed: false,
            aim_mods: vec![(0, -9), (1, -5), (2, -2), (3, 0), (4, 1), (5, 3)],
            compatible_ammo: vec!["40mm HE".into()],
            full_auto: Some(FullAuto {
                rate_of_fire: 6,
                sab_penalty: -2,
            }),
            ballistics: Some(BallisticData {
                bands: vec![
                    BallisticBand {
                        range: 50,
                        minimum_arc: 0.5,
                        accuracy: 12,
                        three_round_burst: None,
                        time_of_flight: 1.0,
                    },
                    BallisticBand {
                        range: 150,
                        minimum_arc: 0.8,
                        accuracy: 10,
                        three_round_burst: None,
                        time_of_flight: 3.0,
                    },
                    BallisticBand {
                        range: 300,
                        minimum_arc: 1.2,
                        accuracy: 8,
                        three_round_burst: None,
                        time_of_flight: 7.0,
                    },
                ],
            }),
        }
    }
}

impl AmmoType {
    /// Reference load: 5.56mm rifle ball
    pub fn rifle_ball() -> Self {
        Self {
            name: "5.56mm Ball".into(),
            weight: 0.03,
            damage_class: 5,
            ballistic: vec![
                BallisticEntry {
                    range: 10,
                    penetration: 6.5,
                    shotgun_alm: None,
                    pellet_hit_chance: None,
                    pattern_radius: None,
                },
                BallisticEntry {
                    range: 50,
                    penetration: 5.8,
                    shotgun_alm: None,
                    pellet_hit_chance: None,
                    pattern_radius: None,
                },
                BallisticEntry {
                    range: 100,
                    penetration: 4.9,
                    shotgun_alm: None,
                    pellet_hit_chance: None,
                    pattern_radius: None,
                },
                BallisticEntry {
                    range: 200,
                    penetration: 3.6,
                    shotgun_alm: None,
                    pellet_hit_chance: None,
                    pattern_radius: None,
                },
                BallisticEntry {
                    range: 400,
                    penetration: 2.1,
                    shotgun_alm: None,
                    pellet_hit_chance: None,
                    pattern_radius: None,
                },
            ],
            explosive: vec![],
            pellet_count: None,
        }
    }

    /// Reference load: 9mm pistol ball
    pub fn pistol_ball() -> Self {
        Self {
            name: "9mm Ball".into(),
            weight: 0.026,
            damage_class: 2,
            ballistic: vec![
                BallisticEntry {
                    range: 10,
                    penetration: 2.6,
                    shotgun_alm: None,
                    pellet_hit_chance: None,
                    pattern_radius: None,
                },
                BallisticEntry {
                    range: 50,
                    penetration: 2.1,
                    shotgun_alm: None,
                    pellet_hit_chance: None,
                    pattern_radius: None,
                },
                BallisticEntry {
                    range: 100,
                    penetration: 1.6,
                    shotgun_alm: None,
                    pellet_hit_chance: None,
                    pattern_radius: None,
                },
                BallisticEntry {
                    range: 200,
                    penetration: 1.0,
                    shotgun_alm: None,
                    pellet_hit_chance: None,
                    pattern_radius: None,
                },
            ],
            explosive: vec![],
            pellet_count: None,
        }
    }

    /// Reference load: 7.62mm machine-gun ball
    pub fn mg_ball() -> Self {
        Self {
            name: "7.62mm Ball".into(),
            weight: 0.055,
            damage_class: 6,
            ballistic: vec![
                BallisticEntry {
                    range: 10,
                    penetration: 8.8,
                    shotgun_alm: None,
                    pellet_hit_chance: None,
                    pattern_radius: None,
                },
                BallisticEntry {
                    range: 100,
                    penetration: 7.4,
                    shotgun_alm: None,
                    pellet_hit_chance: None,
                    pattern_radius: None,
                },
                BallisticEntry {
                    range: 200,
                    penetration: 6.1,
                    shotgun_alm: None,
                    pellet_hit_chance: None,
                    pattern_radius: None,
                },
                BallisticEntry {
                    range: 400,
                    penetration: 4.2,
                    shotgun_alm: None,
                    pellet_hit_chance: None,
                    pattern_radius: None,
                },
            ],
            explosive: vec![],
            pellet_count: None,
        }
    }

    /// Reference load: 12-gauge 00 buckshot, nine pellets
    pub fn buckshot() -> Self {
        Self {
            name: "12ga 00 Buck".into(),
            weight: 0.11,
            damage_class: 2,
            ballistic: vec![
                BallisticEntry {
                    range: 10,
                    penetration: 1.8,
                    shotgun_alm: Some(0),
                    pellet_hit_chance: Some(120),
                    pattern_radius: Some(0.5),
                },
                BallisticEntry {
                    range: 20,
                    penetration: 1.4,
                    shotgun_alm: Some(3),
                    pellet_hit_chance: Some(70),
                    pattern_radius: Some(1.0),
                },
                BallisticEntry {
                    range: 40,
                    penetration: 0.9,
                    shotgun_alm: Some(6),
                    pellet_hit_chance: Some(35),
                    pattern_radius: Some(2.0),
                },
            ],
            explosive: vec![],
            pellet_count: Some(9),
        }
    }

    /// Reference load: 40mm high-explosive grenade
    pub fn he_40mm() -> Self {
        Self {
            name: "40mm HE".into(),
            weight: 0.5,
            damage_class: 3,
            ballistic: vec![],
            explosive: vec![
                ExplosiveEntry {
                    range: 0,
                    shrapnel_hit_chance: 140,
                    shrapnel_penetration: 1.2,
                    shrapnel_damage_class: 3,
                    concussion: 900.0,
                },
                ExplosiveEntry {
                    range: 2,
                    shrapnel_hit_chance: 80,
                    shrapnel_penetration: 0.9,
                    shrapnel_damage_class: 2,
                    concussion: 400.0,
                },
                ExplosiveEntry {
                    range: 5,
                    shrapnel_hit_chance: 40,
                    shrapnel_penetration: 0.6,
                    shrapnel_damage_class: 1,
                    concussion: 150.0,
                },
                ExplosiveEntry {
                    range: 10,
                    shrapnel_hit_chance: 15,
                    shrapnel_penetration: 0.4,
                    shrapnel_damage_class: 1,
                    concussion: 50.0,
                },
                ExplosiveEntry {
                    range: 20,
                    shrapnel_hit_chance: 5,
                    shrapnel_penetration: 0.2,
                    shrapnel_damage_class: 1,
                    concussion: 10.0,
                },
            ],
            pellet_count: None,
        }
    }
}

impl Armor {
    /// Reference armor: aramid vest over the torso, front and rear
    pub fn flak_vest() -> Self {
        use HitLocation::*;
        let layer = || ArmorLayer::new(ArmorMaterial::Aramid, 3.2, 6.0);
        let mut coverage = Vec::new();
        for location in [Shoulder, UpperChest, LowerChest, Abdomen] {
            for facing in [Facing::Front, Facing::Rear] {
                coverage.push(ArmorCoverage {
                    location,
                    facing,
                    layers: vec![layer()],
                });
            }
        }
        Self {
            name: "PASGT Vest".into(),
            weight: 9.0,
            coverage,
        }
    }

    /// Reference armor: steel-and-aramid helmet
    pub fn helmet() -> Self {
        let layers = vec![
            ArmorLayer::new(ArmorMaterial::Steel, 4.5, 4.0),
            ArmorLayer::new(ArmorMaterial::Aramid, 1.5, 5.0),
        ];
        Self {
            name: "PASGT Helmet".into(),
            weight: 3.1,
            coverage: vec![
                ArmorCoverage {
                    location: HitLocation::Head,
                    facing: Facing::Front,
                    layers: layers.clone(),
                },
                ArmorCoverage {
                    location: HitLocation::Head,
                    facing: Facing::Rear,
                    layers,
                },
            ],
        }
    }
}

impl Grenade {
    /// Reference grenade: fragmentation
    pub fn fragmentation() -> Self {
        Self {
            name: "M67 Frag".into(),
            weight: 0.875,
            kind: GrenadeKind::Fragmentation,
            arm_time: 1,
            fuse_length: 8,
            throw_range: 35,
            explosive: vec![
                ExplosiveEntry {
                    range: 0,
                    shrapnel_hit_chance: 120,
                    shrapnel_penetration: 0.9,
                    shrapnel_damage_class: 2,
                    concussion: 600.0,
                },
                ExplosiveEntry {
                    range: 2,
                    shrapnel_hit_chance: 65,
                    shrapnel_penetration: 0.7,
                    shrapnel_damage_class: 2,
                    concussion: 250.0,
                },
                ExplosiveEntry {
                    range: 5,
                    shrapnel_hit_chance: 30,
                    shrapnel_penetration: 0.5,
                    shrapnel_damage_class: 1,
                    concussion: 80.0,
                },
                ExplosiveEntry {
                    range: 10,
                    shrapnel_hit_chance: 10,
                    shrapnel_penetration: 0.3,
                    shrapnel_damage_class: 1,
                    concussion: 20.0,
                },
                ExplosiveEntry {
                    range: 15,
                    shrapnel_hit_chance: 3,
                    shrapnel_penetration: 0.15,
                    shrapnel_damage_class: 1,
                    concussion: 5.0,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_accessor_errors_are_typed() {
        let gear = Equipment::Gear(Gear {
            name: "Canteen".into(),
            weight: 2.0,
            description: "One quart".into(),
        });
        assert!(matches!(
            gear.as_weapon(),
            Err(EngineError::MissingCapability { capability: "weapon", .. })
        ));
        assert!(gear.as_armor().is_err());
    }

    #[test]
    fn test_ballistic_band_ceiling_match() {
        let ammo = AmmoType::rifle_ball();
        assert_eq!(ammo.ballistic_at(10).unwrap().penetration, 6.5);
        // 60 hexes ceilings into the 100 band.
        assert_eq!(ammo.ballistic_at(60).unwrap().penetration, 4.9);
        assert!(matches!(
            ammo.ballistic_at(401),
            Err(EngineError::RangeBeyondTable { range: 401, max: 400 })
        ));
    }

    #[test]
    fn test_missing_tables_are_capability_errors() {
        let ammo = AmmoType::rifle_ball();
        assert!(ammo.explosive_at(5).is_err());
        assert!(ammo.pellet_count().is_err());
        let he = AmmoType::he_40mm();
        assert!(he.ballistic_at(10).is_err());
        assert!(he.explosive_at(5).is_ok());
    }

    #[test]
    fn test_aim_alm_floors_and_caps() {
        let rifle = Weapon::assault_rifle();
        assert_eq!(rifle.aim_alm(0), -8);
        assert_eq!(rifle.aim_alm(3), 1);
        // Beyond the table caps at the last entry.
        assert_eq!(rifle.aim_alm(12), 6);
    }

    #[test]
    fn test_shotgun_has_no_full_auto() {
        let shotgun = Weapon::shotgun();
        assert!(shotgun.full_auto().is_err());
        assert!(shotgun.three_round_burst_at(10).is_err());
        let rifle = Weapon::assault_rifle();
        assert_eq!(rifle.three_round_burst_at(10).unwrap(), 2.0);
    }

    #[test]
    fn test_armor_layer_degrades_toward_zero() {
        let mut layer = ArmorLayer::new(ArmorMaterial::Ceramic, 5.0, 8.0);
        layer.degrade(true);
        assert!((layer.condition - 0.6).abs() < 1e-9);
        for _ in 0..10 {
            layer.degrade(true);
        }
        assert_eq!(layer.condition, 0.0);
    }

    #[test]
    fn test_armor_coverage_lookup() {
        let vest = Armor::flak_vest();
        assert!(vest
            .layers_at(HitLocation::UpperChest, Facing::Front)
            .is_some());
        assert!(vest.layers_at(HitLocation::Head, Facing::Front).is_none());
        let helmet = Armor::helmet();
        assert_eq!(
            helmet.layers_at(HitLocation::Head, Facing::Rear).unwrap().len(),
            2
        );
    }

    #[test]
    fn test_weapon_ammo_compatibility() {
        let rifle = Weapon::assault_rifle();
        assert!(rifle.accepts(&AmmoType::rifle_ball()));
        assert!(!rifle.accepts(&AmmoType::buckshot()));
    }
}
