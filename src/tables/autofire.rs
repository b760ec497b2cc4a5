//! Automatic-fire and swarm hit counts
//!
//! The auto-fire table crosses arc of fire with rate of fire; each cell
//! is either a guaranteed hit count or a percentage rolled for a single
//! hit. The swarm array does the same for pellet and shrapnel clouds,
//! driven by a base hit chance instead of an arc.

use serde::{Deserialize, Serialize};

use crate::core::dice::DieRoller;
use crate::tables::band::{band_index, Band};

/// A hit-count cell: either guaranteed hits or one probabilistic hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitCell {
    Hits(u32),
    Chance(u32),
}

/// Arc-of-fire rows in hexes of width (ceiling).
const ARC_KEYS: [f64; 8] = [0.25, 0.5, 1.0, 2.0, 3.0, 5.0, 8.0, 12.0];

/// Rate-of-fire columns in rounds per burst (ceiling).
const ROF_KEYS: [u32; 8] = [3, 6, 10, 15, 20, 30, 40, 60];

use HitCell::*;

const AUTOFIRE: [[HitCell; 8]; 8] = [
    [Chance(70), Hits(1), Hits(2), Hits(3), Hits(4), Hits(6), Hits(8), Hits(12)],
    [Chance(50), Chance(90), Hits(1), Hits(2), Hits(3), Hits(4), Hits(6), Hits(9)],
    [Chance(30), Chance(60), Chance(95), Hits(1), Hits(2), Hits(3), Hits(4), Hits(6)],
    [Chance(15), Chance(35), Chance(60), Chance(90), Hits(1), Hits(2), Hits(3), Hits(4)],
    [Chance(10), Chance(25), Chance(45), Chance(65), Chance(90), Hits(1), Hits(2), Hits(3)],
    [Chance(6), Chance(15), Chance(28), Chance(42), Chance(60), Chance(90), Hits(1), Hits(2)],
    [Chance(4), Chance(9), Chance(17), Chance(27), Chance(38), Chance(60), Chance(80), Hits(1)],
    [Chance(2), Chance(6), Chance(11), Chance(17), Chance(25), Chance(40), Chance(55), Chance(80)],
];

/// Row/index shift contributed by a width or elevation size modifier.
fn size_shift(size_alm: i32) -> i32 {
    size_alm / 4
}

/// Auto-fire cell for a burst of `rate_of_fire` rounds swept over
/// `arc_width` hexes at a target with the given width size modifier.
///
/// Arcs wider and bursts longer than the table clamp to the outermost
/// band; the cell there is already the worst case.
pub fn autofire_cell(arc_width: f64, rate_of_fire: u32, size_alm: i32) -> HitCell {
    let row = band_index(&ARC_KEYS, arc_width, Band::Ceiling).unwrap_or(ARC_KEYS.len() - 1);
    let col = band_index(&ROF_KEYS, rate_of_fire, Band::Ceiling).unwrap_or(ROF_KEYS.len() - 1);
    let shifted = (row as i32 - size_shift(size_alm)).clamp(0, ARC_KEYS.len() as i32 - 1);
    AUTOFIRE[shifted as usize][col]
}

/// Combined guaranteed/probabilistic ladder for pellet and shrapnel
/// swarms, indexed from the base hit chance in steps of five.
const SWARM: [HitCell; 31] = [
    Chance(1),
    Chance(5),
    Chance(10),
    Chance(15),
    Chance(20),
    Chance(25),
    Chance(30),
    Chance(35),
    Chance(40),
    Chance(45),
    Chance(50),
    Chance(55),
    Chance(60),
    Chance(65),
    Chance(70),
    Chance(75),
    Chance(80),
    Chance(85),
    Chance(90),
    Chance(95),
    Hits(1),
    Hits(1),
    Hits(2),
    Hits(2),
    Hits(3),
    Hits(3),
    Hits(4),
    Hits(5),
    Hits(6),
    Hits(8),
    Hits(10),
];

/// Swarm cell for a base pellet/shrapnel hit chance. Values past 100
/// index into the guaranteed-hit tail of the ladder.
pub fn swarm_cell(base_hit_chance: u32, size_alm: i32) -> HitCell {
    let idx = (base_hit_chance as i32 / 5 + size_shift(size_alm)).clamp(0, SWARM.len() as i32 - 1);
    SWARM[idx as usize]
}

/// Resolve a cell into a hit count, spending one roll only when the
/// cell is probabilistic.
pub fn roll_hits(cell: HitCell, dice: &mut dyn DieRoller) -> u32 {
    match cell {
        Hits(n) => n,
        Chance(pct) => {
            if dice.percentile() < pct {
                1
            } else {
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dice::ScriptedDice;

    #[test]
    fn test_tight_arc_long_burst_guarantees_hits() {
        assert_eq!(autofire_cell(0.25, 60, 0), Hits(12));
        assert_eq!(autofire_cell(0.2, 18, 0), Hits(4));
    }

    #[test]
    fn test_wide_arc_is_probabilistic() {
        assert_eq!(autofire_cell(12.0, 3, 0), Chance(2));
        // Beyond the last arc band clamps to it.
        assert_eq!(autofire_cell(50.0, 3, 0), Chance(2));
    }

    #[test]
    fn test_size_modifier_shifts_rows_down() {
        // A -8 width modifier moves two rows toward the wide-arc cells.
        assert_eq!(autofire_cell(0.25, 10, -8), autofire_cell(1.0, 10, 0));
        // Shift clamps at the table edge.
        assert_eq!(autofire_cell(12.0, 10, -40), autofire_cell(12.0, 10, -8));
    }

    #[test]
    fn test_roll_hits_only_rolls_for_chance_cells() {
        let mut dice = ScriptedDice::new(&[99]);
        assert_eq!(roll_hits(Hits(5), &mut dice), 5);
        // Script untouched by the guaranteed cell; now consume it.
        assert_eq!(roll_hits(Chance(99), &mut dice), 0);
        let mut dice = ScriptedDice::new(&[40]);
        assert_eq!(roll_hits(Chance(41), &mut dice), 1);
    }

    #[test]
    fn test_swarm_ladder_crosses_into_guaranteed() {
        assert_eq!(swarm_cell(40, 0), Chance(40));
        assert_eq!(swarm_cell(100, 0), Hits(1));
        assert_eq!(swarm_cell(150, 0), Hits(10));
        assert_eq!(swarm_cell(999, 0), Hits(10));
    }

    #[test]
    fn test_swarm_size_shift_matches_autofire_rule() {
        // -8 ALM drops the index by two steps.
        assert_eq!(swarm_cell(50, -8), Chance(40));
        assert_eq!(swarm_cell(0, -20), Chance(1));
    }
}
