pub mod character;
pub mod equipment;
pub mod results;
pub mod shot;

pub use character::{Character, Inventory};
pub use equipment::{
    AmmoType, Armor, ArmorLayer, ArmorMaterial, BallisticData, Equipment, FullAuto, Gear, Grenade,
    ItemId, Weapon, WeaponKind,
};
pub use results::{
    BurstElevationResult, DamageResult, ExplosiveShotResult, Incapacitation, LongShort, ShotResult,
};
pub use shot::{ExplosiveTarget, ShotParameters, SituationModifier, VisibilityModifier};
