//! Characters and their inventories
//!
//! A character owns an ordered arena of equipment; derived statistics
//! are recomputed from the tables on demand and never cached. The only
//! state the engine mutates is the physical damage total and the
//! condition of worn armor layers.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};
use crate::model::equipment::{ArmorLayer, Equipment, ItemId};
use crate::tables::chargen;
use crate::tables::hit_location::{Facing, HitLocation};

/// Order-preserving equipment arena. Removal is by id, so two
/// otherwise-identical items never collide.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    items: AHashMap<ItemId, Equipment>,
    order: Vec<ItemId>,
    next: u32,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: Equipment) -> ItemId {
        let id = ItemId(self.next);
        self.next += 1;
        self.items.insert(id, item);
        self.order.push(id);
        id
    }

    pub fn remove(&mut self, id: ItemId) -> Result<Equipment> {
        let item = self.items.remove(&id).ok_or(EngineError::ItemNotFound(id))?;
        self.order.retain(|o| *o != id);
        Ok(item)
    }

    pub fn get(&self, id: ItemId) -> Result<&Equipment> {
        self.items.get(&id).ok_or(EngineError::ItemNotFound(id))
    }

    pub fn get_mut(&mut self, id: ItemId) -> Result<&mut Equipment> {
        self.items.get_mut(&id).ok_or(EngineError::ItemNotFound(id))
    }

    /// Items in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &Equipment)> {
        self.order.iter().filter_map(|id| {
            self.items.get(id).map(|item| (*id, item))
        })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub strength: i32,
    pub intelligence: i32,
    pub will: i32,
    pub health: i32,
    pub agility: i32,
    pub gun_skill_level: i32,
    damage_total: u32,
    inventory: Inventory,
}

impl Character {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        strength: i32,
        intelligence: i32,
        will: i32,
        health: i32,
        agility: i32,
        gun_skill_level: i32,
    ) -> Self {
        Self {
            name: name.into(),
            strength,
            intelligence,
            will,
            health,
            agility,
            gun_skill_level,
            damage_total: 0,
            inventory: Inventory::new(),
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    /// Accumulated physical damage. Monotone non-decreasing.
    pub fn damage_total(&self) -> u32 {
        self.damage_total
    }

    /// Apply wound damage. The only way the total ever moves.
    pub fn apply_damage(&mut self, damage: u32) {
        self.damage_total += damage;
    }

    /// Total carried weight in pounds.
    pub fn encumbrance(&self) -> f64 {
        self.inventory.iter().map(|(_, item)| item.weight()).sum()
    }

    /// Armor layers covering a (location, facing) slot, outermost first,
    /// with the owning item id and layer index for later degradation.
    pub fn armor_at(&self, location: HitLocation, facing: Facing) -> Vec<(ItemId, usize, ArmorLayer)> {
        let mut found = Vec::new();
        for (id, item) in self.inventory.iter() {
            if let Equipment::Armor(armor) = item {
                if let Some(layers) = armor.layers_at(location, facing) {
                    for (idx, layer) in layers.iter().enumerate() {
                        found.push((id, idx, *layer));
                    }
                }
            }
        }
        found
    }

    /// Wear one armor layer after a hit.
    pub fn degrade_armor_layer(
        &mut self,
        id: ItemId,
        location: HitLocation,
        facing: Facing,
        layer_index: usize,
        penetrated: bool,
    ) -> Result<()> {
        let item = self.inventory.get_mut(id)?;
        if let Equipment::Armor(armor) = item {
            if let Some(layers) = armor.layers_at_mut(location, facing) {
                if let Some(layer) = layers.get_mut(layer_index) {
                    layer.degrade(penetrated);
                    return Ok(());
                }
            }
        }
        Err(EngineError::ItemNotFound(id))
    }

    pub fn base_speed(&self) -> Result<i32> {
        chargen::base_speed(self.strength, self.encumbrance())
    }

    pub fn max_speed(&self) -> Result<i32> {
        Ok(chargen::max_speed(self.agility, self.base_speed()?))
    }

    pub fn skill_accuracy_level(&self) -> Result<i32> {
        chargen::skill_accuracy_level(self.gun_skill_level)
    }

    pub fn combat_actions(&self) -> Result<i32> {
        let isf = self.intelligence + self.gun_skill_level;
        chargen::combat_actions(self.max_speed()?, isf)
    }

    pub fn impulses_per_turn(&self) -> Result<[u8; 4]> {
        chargen::impulses_per_turn(self.combat_actions()?)
    }

    pub fn knockout_value(&self) -> i32 {
        chargen::knockout_value(self.will, self.health)
    }

    pub fn defense_alm(&self) -> Result<i32> {
        Ok(chargen::defense_alm(self.combat_actions()?))
    }
}

// ---------------------------------------------------------------------------
// Reference characters
// ---------------------------------------------------------------------------

impl Character {
    /// Reference character: trained rifleman with vest and helmet
    pub fn test_rifleman() -> Self {
        use crate::model::equipment::{AmmoType, Armor, Weapon};
        let mut c = Character::new("Rifleman", 11, 10, 12, 12, 9, 8);
        c.inventory.add(Equipment::Weapon(Weapon::assault_rifle()));
        c.inventory.add(Equipment::Ammo(AmmoType::rifle_ball()));
        c.inventory.add(Equipment::Armor(Armor::flak_vest()));
        c.inventory.add(Equipment::Armor(Armor::helmet()));
        c
    }

    /// Reference character: green conscript, no armor
    pub fn test_conscript() -> Self {
        Character::new("Conscript", 9, 8, 8, 9, 7, 1)
    }
}
