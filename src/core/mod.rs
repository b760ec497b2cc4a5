pub mod dice;
pub mod error;
pub mod log;

pub use dice::{Dice, DieRoller, ScriptedDice};
pub use error::{EngineError, Result};
pub use log::CombatLog;
