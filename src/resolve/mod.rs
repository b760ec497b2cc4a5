pub mod blast;
pub mod burst;
pub mod eal;
pub mod hit;

pub use burst::redistribute;
pub use eal::{accuracy_with_size, point_accuracy, shot_accuracy, AccuracyBreakdown};
pub use hit::{resolve_concussion, resolve_hit, HitOutcome};
