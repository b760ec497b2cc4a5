pub mod explosion;
pub mod explosive;
pub mod gunfire;
pub mod shotgun;

pub use explosion::{explosion_damage, ExplosionResult, ExplosionTarget, ExplosionTargetResult};
pub use explosive::{
    explosive_weapon_shot, grenade_throw, launcher_burst, LauncherBurstResult,
};
pub use gunfire::{
    burst_fire, single_shot, three_round_burst, BurstFireResult, ThreeRoundBurstResult,
};
pub use shotgun::{shotgun_burst_fire, shotgun_shot, PatternTarget, ShotgunResult};
