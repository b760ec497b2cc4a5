//! Injected randomness source for combat resolution
//!
//! Every resolving call takes a `&mut dyn DieRoller` so complete multi-step
//! resolutions can be replayed from a seed or a scripted roll sequence.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Uniform-integer roll source. All randomness in the engine flows
/// through this trait; nothing reads a thread-local or global generator.
pub trait DieRoller {
    /// Uniform integer in [0, 99].
    fn percentile(&mut self) -> u32;

    /// Uniform integer in [0, 9].
    fn d10(&mut self) -> u32 {
        self.percentile() % 10
    }
}

/// Seeded production roller backed by ChaCha8.
#[derive(Debug, Clone)]
pub struct Dice {
    rng: ChaCha8Rng,
}

impl Dice {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl DieRoller for Dice {
    fn percentile(&mut self) -> u32 {
        self.rng.gen_range(0..100)
    }
}

/// Test roller that replays a fixed sequence, then wraps around.
///
/// Panics on an empty script; acceptable in tests only.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    rolls: VecDeque<u32>,
}

impl ScriptedDice {
    pub fn new(rolls: &[u32]) -> Self {
        assert!(!rolls.is_empty(), "scripted dice need at least one roll");
        Self {
            rolls: rolls.iter().copied().collect(),
        }
    }
}

impl DieRoller for ScriptedDice {
    fn percentile(&mut self) -> u32 {
        let roll = self.rolls.pop_front().expect("non-empty script");
        self.rolls.push_back(roll);
        roll % 100
    }
}
